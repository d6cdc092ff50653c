//! Properties of the Perfect Aire encoder over the whole input domain.

use aircode::perfectaire::{
    encode,
    tables::{MAX_TEMPERATURE, MIN_TEMPERATURE},
    Fan, Intent, Mode, Swing,
};
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

fn any_mode() -> impl Strategy<Value = Mode> {
    select(Mode::iter().collect::<Vec<_>>())
}

fn running_mode() -> impl Strategy<Value = Mode> {
    select(vec![Mode::Cool, Mode::Heat, Mode::Auto, Mode::Dry])
}

fn any_fan() -> impl Strategy<Value = Fan> {
    select(Fan::iter().collect::<Vec<_>>())
}

fn any_swing() -> impl Strategy<Value = Swing> {
    select(Swing::iter().collect::<Vec<_>>())
}

fn valid_temperature() -> impl Strategy<Value = i32> {
    MIN_TEMPERATURE..=MAX_TEMPERATURE
}

proptest! {
    /// Header byte 5 is the complement of byte 4, and byte 3 of byte 2.
    #[test]
    fn header_checks_are_complements(
        mode in running_mode(),
        fan in any_fan(),
        swing in any_swing(),
        temperature in valid_temperature(),
    ) {
        let command = encode(&Intent::new(mode, swing, fan, temperature));
        prop_assert_eq!(command.packets.len(), 3);

        let header = command.packets[0].as_bytes();
        prop_assert_eq!(header.len(), 6);
        prop_assert_eq!(&header[..2], &[0x4D, 0xB2][..]);
        prop_assert_eq!(header[5], !header[4]);
        prop_assert_eq!(header[3], !header[2]);

        if mode.forces_auto_fan() {
            prop_assert_eq!(header[2], 0xF8);
            prop_assert_eq!(header[3], 0x07);
        }
    }

    /// The header frame is sent twice, then the payload.
    #[test]
    fn header_is_repeated(
        mode in running_mode(),
        fan in any_fan(),
        temperature in any::<i32>(),
    ) {
        let command = encode(&Intent::new(mode, Swing::On, fan, temperature));
        prop_assert_eq!(&command.packets[0], &command.packets[1]);

        let payload = command.packets[2].as_bytes();
        prop_assert_eq!(payload.len(), 6);
        prop_assert_eq!(payload[0], 0xAB);
        prop_assert_eq!(payload[4], 0x00);
        prop_assert_eq!(payload[3], if temperature <= 61 { 0x88 } else { 0x80 });
    }

    /// Off ignores every other field.
    #[test]
    fn off_is_invariant(
        fan in any_fan(),
        swing in any_swing(),
        temperature in any::<i32>(),
        turbo in any::<bool>(),
        self_cleaning in any::<bool>(),
    ) {
        let command = encode(
            &Intent::new(Mode::Off, swing, fan, temperature)
                .with_turbo(turbo)
                .with_self_cleaning(self_cleaning),
        );
        prop_assert_eq!(command.protocol, "nec");
        prop_assert_eq!(command.packets.len(), 2);
        for packet in &command.packets {
            prop_assert_eq!(packet.as_bytes(), &[0x4D, 0xDE, 0x07][..]);
        }
    }

    /// Auto and dry encode the same bytes whatever fan is requested.
    #[test]
    fn auto_and_dry_force_fan(
        mode in select(vec![Mode::Auto, Mode::Dry]),
        fan in any_fan(),
        temperature in valid_temperature(),
    ) {
        let requested = encode(&Intent::new(mode, Swing::On, fan, temperature));
        let auto = encode(&Intent::new(mode, Swing::On, Fan::Auto, temperature));
        prop_assert_eq!(&requested, &auto);
        prop_assert_eq!(requested.packets[2].as_bytes()[1], 0xA6);
    }

    /// Swing and toggles never change the output, and encoding is repeatable.
    #[test]
    fn swing_and_toggles_are_ignored(
        mode in any_mode(),
        fan in any_fan(),
        swing in any_swing(),
        temperature in any::<i32>(),
        turbo in any::<bool>(),
        self_cleaning in any::<bool>(),
    ) {
        let intent = Intent::new(mode, swing, fan, temperature)
            .with_turbo(turbo)
            .with_self_cleaning(self_cleaning);
        let plain = Intent::new(mode, Swing::On, fan, temperature);

        prop_assert_eq!(encode(&intent), encode(&plain));
        prop_assert_eq!(encode(&intent), encode(&intent));
    }

    /// Outside the table every temperature encodes like any other out of range value.
    #[test]
    fn out_of_range_uses_defaults(
        mode in running_mode(),
        fan in any_fan(),
        temperature in prop_oneof![i32::MIN..MIN_TEMPERATURE, (MAX_TEMPERATURE + 1)..=i32::MAX],
    ) {
        let command = encode(&Intent::new(mode, Swing::On, fan, temperature));
        let reference = if temperature < MIN_TEMPERATURE { 0 } else { 1000 };
        let expected = encode(&Intent::new(mode, Swing::On, fan, reference));
        prop_assert_eq!(command, expected);
    }
}

#[test]
fn low_end_boundary() {
    let at_61 = encode(&Intent::new(Mode::Cool, Swing::On, Fan::Auto, 61));
    let at_62 = encode(&Intent::new(Mode::Cool, Swing::On, Fan::Auto, 62));
    assert_eq!(at_61.packets[2].as_bytes()[3], 0x88);
    assert_eq!(at_62.packets[2].as_bytes()[3], 0x80);
}

#[test]
fn lenient_request_matches_typed_intent() {
    let intent = Intent::parse_lenient("heat", "top", "high", 60.0, false, false).unwrap();
    let command = encode(&intent);
    let header = command.packets[0].as_bytes();
    assert_eq!(header, &[0x4D, 0xB2, 0xFC, 0x03, 0x30, 0xCF][..]);

    // Unknown fan behaves like auto
    let unknown =
        Intent::parse_lenient("cool", "on", "whirlwind", 72.0, false, false).unwrap();
    let unknown = encode(&unknown);
    let auto = encode(&Intent::new(Mode::Cool, Swing::On, Fan::Auto, 72));
    assert_eq!(unknown, auto);
}
