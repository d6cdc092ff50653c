//! Perfect Aire mini-split, remote RG10A(D2S)/BGEFU1.
//!
//! The remote speaks an NEC-style protocol: a header frame carrying fan and
//! coarse temperature, repeated once, followed by a payload frame carrying the
//! fine temperature bit and a checksum.

pub mod capabilities;
pub mod command;
pub mod packet;
pub mod tables;
pub mod timing;

pub use capabilities::{ConfigurationError, DeviceCapabilities};
pub use command::{encode, encode_checked, Command};
pub use packet::Packet;
pub use timing::Timing;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Off,
    Cool,
    Heat,
    Auto,
    Dry,
}

impl Mode {
    /// The remote has no fan control in these modes, the fan always reports auto.
    pub fn forces_auto_fan(self) -> bool {
        matches!(self, Mode::Auto | Mode::Dry)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Fan {
    #[default]
    Auto,
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
}

/// Louver position. Accepted for completeness, the protocol carries no swing bits.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Swing {
    #[default]
    On,
    Top,
    Upper,
    Middle,
    Lower,
    Bottom,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    TurboMode,
    SelfCleaning,
}

// The complete state requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Intent {
    pub mode: Mode,

    // Not encoded
    pub swing: Swing,

    // Requested fan speed, ignored in auto and dry
    pub fan: Fan,

    // Set point in Fahrenheit
    pub temperature: i32,

    // Not encoded
    pub turbo: bool,

    // Not encoded
    pub self_cleaning: bool,
}

impl Intent {
    pub fn new(mode: Mode, swing: Swing, fan: Fan, temperature: i32) -> Self {
        Self {
            mode,
            swing,
            fan,
            temperature,
            turbo: false,
            self_cleaning: false,
        }
    }

    pub fn with_turbo(mut self, turbo: bool) -> Self {
        self.turbo = turbo;
        self
    }

    pub fn with_self_cleaning(mut self, self_cleaning: bool) -> Self {
        self.self_cleaning = self_cleaning;
        self
    }

    /// The fan speed that actually gets encoded.
    pub fn effective_fan(&self) -> Fan {
        if self.mode.forces_auto_fan() {
            Fan::Auto
        } else {
            self.fan
        }
    }

    /// Builds an intent from a host request, rejecting any value that isn't a
    /// declared enumeration member.
    pub fn parse(
        mode: &str,
        swing: &str,
        fan: &str,
        temperature: f64,
        turbo: bool,
        self_cleaning: bool,
    ) -> Result<Self, ConfigurationError> {
        let mode = parse_mode(mode)?;
        let swing =
            Swing::from_str(swing).map_err(|_| ConfigurationError::UnknownSwing(swing.into()))?;
        let fan = Fan::from_str(fan).map_err(|_| ConfigurationError::UnknownFan(fan.into()))?;
        if !temperature.is_finite() {
            return Err(ConfigurationError::InvalidTemperature(temperature));
        }

        Ok(Intent::new(mode, swing, fan, truncate(temperature))
            .with_turbo(turbo)
            .with_self_cleaning(self_cleaning))
    }

    /// Builds an intent from a host request the way the remote tables do:
    /// unknown fan modes fall back to auto and unknown swing modes to the
    /// default position. A non-finite temperature becomes 0, which lands on
    /// the out of range table defaults.
    ///
    /// Only the operating mode has no fallback. An unknown mode is rejected
    /// rather than encoded like cool with the requested fan.
    pub fn parse_lenient(
        mode: &str,
        swing: &str,
        fan: &str,
        temperature: f64,
        turbo: bool,
        self_cleaning: bool,
    ) -> Result<Self, ConfigurationError> {
        let mode = parse_mode(mode)?;
        let swing = Swing::from_str(swing).unwrap_or_else(|_| {
            debug!(swing, "unrecognized swing mode, using default");
            Swing::default()
        });
        let fan = Fan::from_str(fan).unwrap_or_else(|_| {
            debug!(fan, "unrecognized fan mode, using auto");
            Fan::Auto
        });

        Ok(Intent::new(mode, swing, fan, truncate(temperature))
            .with_turbo(turbo)
            .with_self_cleaning(self_cleaning))
    }
}

fn parse_mode(mode: &str) -> Result<Mode, ConfigurationError> {
    Mode::from_str(mode).map_err(|_| ConfigurationError::UnknownMode(mode.into()))
}

// Host temperatures are numbers, the tables are keyed by whole degrees
fn truncate(temperature: f64) -> i32 {
    temperature.trunc() as i32
}
