use serde::Serialize;
use tracing::{debug, trace};

use super::{
    capabilities::{ConfigurationError, DeviceCapabilities},
    packet::{HeaderFrame, Packet, PayloadFrame},
    timing::{Timing, TimingError, TIMING},
    Intent, Mode,
};

pub const PROTOCOL: &str = "nec";

/// Everything the transmitter needs: protocol, timing descriptor and the
/// packets to send, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Command {
    pub protocol: &'static str,
    pub timing: &'static str,
    pub packets: Vec<Packet>,
}

impl Command {
    fn new(packets: Vec<Packet>) -> Self {
        Self {
            protocol: PROTOCOL,
            timing: TIMING,
            packets,
        }
    }

    pub fn parsed_timing(&self) -> Result<Timing, TimingError> {
        self.timing.parse()
    }
}

/// Encodes an intent into the packet sequence sent by the remote.
///
/// Never fails: out of range temperatures use the table defaults. Swing and
/// the turbo/self-cleaning toggles are accepted but the remote does not send
/// them in these frames, so they have no effect on the output.
pub fn encode(intent: &Intent) -> Command {
    if intent.mode == Mode::Off {
        return Command::new(vec![Packet::off(), Packet::off()]);
    }

    let fan = intent.effective_fan();
    if fan != intent.fan {
        debug!(mode = %intent.mode, requested = %intent.fan, "fan forced to auto");
    }

    let params = fan.params();
    let header = Packet::from(HeaderFrame::new(intent.mode, params, intent.temperature));
    let payload = Packet::from(PayloadFrame::new(intent.mode, params, intent.temperature));
    trace!(%header, %payload, "encoded {:?}", intent);

    // The header frame is always sent twice
    Command::new(vec![header.clone(), header, payload])
}

/// Same as [`encode`], but first rejects intents the device doesn't declare.
pub fn encode_checked(
    capabilities: &DeviceCapabilities,
    intent: &Intent,
) -> Result<Command, ConfigurationError> {
    capabilities.validate(intent)?;
    Ok(encode(intent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perfectaire::{Fan, Swing};
    use hex_literal::hex;

    fn bytes(command: &Command) -> Vec<Vec<u8>> {
        command.packets.iter().map(|p| p.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_cool_auto_72() {
        let command = encode(&Intent::new(Mode::Cool, Swing::On, Fan::Auto, 72));
        assert_eq!(command.protocol, "nec");
        assert_eq!(
            command.timing,
            "tp=528,t0=519,t1=1571,ph=4272,pl=4303,cm=3,a=2,pg=5096"
        );
        assert_eq!(
            bytes(&command),
            vec![
                hex!("4db2fd020ef1").to_vec(),
                hex!("4db2fd020ef1").to_vec(),
                hex!("ab660080003c").to_vec(),
            ]
        );
    }

    #[test]
    fn test_heat_high_60() {
        let command = encode(&Intent::new(Mode::Heat, Swing::Top, Fan::High, 60));
        assert_eq!(
            bytes(&command),
            vec![
                hex!("4db2fc0330cf").to_vec(),
                hex!("4db2fc0330cf").to_vec(),
                hex!("ab2600880052").to_vec(),
            ]
        );
    }

    #[test]
    fn test_forced_fan() {
        let requested = encode(&Intent::new(Mode::Dry, Swing::On, Fan::High, 75));
        let auto = encode(&Intent::new(Mode::Dry, Swing::On, Fan::Auto, 75));
        assert_eq!(requested, auto);
        assert_eq!(
            bytes(&requested),
            vec![
                hex!("4db2f80722dd").to_vec(),
                hex!("4db2f80722dd").to_vec(),
                hex!("aba6008000dc").to_vec(),
            ]
        );
    }

    #[test]
    fn test_off() {
        let expected = vec![hex!("4dde07").to_vec(), hex!("4dde07").to_vec()];

        let command = encode(&Intent::new(Mode::Off, Swing::On, Fan::Auto, 72));
        assert_eq!(bytes(&command), expected);
        assert_eq!(command.timing, TIMING);

        let command = encode(
            &Intent::new(Mode::Off, Swing::Bottom, Fan::High, 1000)
                .with_turbo(true)
                .with_self_cleaning(true),
        );
        assert_eq!(bytes(&command), expected);
    }

    #[test]
    fn test_out_of_range_temperature() {
        // Falls back to coarse 0x00, fine 0x00, base checksum 0x3C
        let command = encode(&Intent::new(Mode::Cool, Swing::On, Fan::Low, 90));
        assert_eq!(
            bytes(&command),
            vec![
                hex!("4db2ff0000ff").to_vec(),
                hex!("4db2ff0000ff").to_vec(),
                hex!("ab2800800057").to_vec(),
            ]
        );
    }

    #[test]
    fn test_checked() {
        let caps = DeviceCapabilities::perfect_aire();

        let intent = Intent::new(Mode::Cool, Swing::On, Fan::Auto, 72);
        assert_eq!(encode_checked(&caps, &intent), Ok(encode(&intent)));

        let intent = Intent::new(Mode::Cool, Swing::On, Fan::Auto, 90);
        assert!(matches!(
            encode_checked(&caps, &intent),
            Err(ConfigurationError::TemperatureOutOfRange { temperature: 90, .. })
        ));
    }

    #[test]
    fn test_timing() {
        let command = encode(&Intent::new(Mode::Heat, Swing::On, Fan::Auto, 70));
        assert_eq!(command.parsed_timing(), Ok(Timing::NEC));
    }

    #[test]
    fn test_json() {
        let command = encode(&Intent::new(Mode::Off, Swing::On, Fan::Auto, 72));
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            serde_json::json!({
                "protocol": "nec",
                "timing": TIMING,
                "packets": [[77, 222, 7], [77, 222, 7]],
            })
        );
    }
}
