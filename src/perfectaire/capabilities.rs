use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use super::{
    tables::{MAX_TEMPERATURE, MIN_TEMPERATURE},
    Fan, Intent, Mode, Swing, Toggle,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("unknown operating mode: {0:?}")]
    UnknownMode(String),
    #[error("unknown fan mode: {0:?}")]
    UnknownFan(String),
    #[error("unknown swing mode: {0:?}")]
    UnknownSwing(String),

    #[error("operating mode not supported by this device: {0}")]
    UnsupportedMode(Mode),
    #[error("fan mode not supported by this device: {0}")]
    UnsupportedFan(Fan),
    #[error("swing mode not supported by this device: {0}")]
    UnsupportedSwing(Swing),
    #[error("toggle not supported by this device: {0}")]
    UnsupportedToggle(Toggle),

    #[error("temperature must be a finite number, got {0}")]
    InvalidTemperature(f64),

    #[error("no temperature range declared for mode {0}")]
    MissingTemperatureRange(Mode),
    #[error("temperature {temperature} out of range for {mode}. Must be between {min} and {max}")]
    TemperatureOutOfRange {
        mode: Mode,
        temperature: i32,
        min: i32,
        max: i32,
    },
}

/// What the device accepts. Consulted by callers before encoding; the encoder
/// itself never looks at it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapabilities {
    pub manufacturer: String,
    pub supported_models: Vec<String>,
    pub commands_encoding: String,
    pub min_temperature: BTreeMap<Mode, i32>,
    pub max_temperature: BTreeMap<Mode, i32>,
    pub precision: u8,
    pub operation_modes: Vec<Mode>,
    pub fan_modes: Vec<Fan>,
    pub swing_modes: Vec<Swing>,
    pub toggles: Vec<Toggle>,
}

impl DeviceCapabilities {
    pub fn perfect_aire() -> Self {
        let operation_modes = vec![Mode::Cool, Mode::Heat, Mode::Auto, Mode::Dry];

        Self {
            manufacturer: "Perfect Aire".into(),
            supported_models: vec!["RG10A(D2S)/BGEFU1".into()],
            commands_encoding: "Generic".into(),
            min_temperature: operation_modes
                .iter()
                .map(|&m| (m, MIN_TEMPERATURE))
                .collect(),
            max_temperature: operation_modes
                .iter()
                .map(|&m| (m, MAX_TEMPERATURE))
                .collect(),
            precision: 1,
            operation_modes,
            fan_modes: Fan::iter().collect(),
            swing_modes: Swing::iter().collect(),
            toggles: Toggle::iter().collect(),
        }
    }

    /// Declared (min, max) set point for a mode.
    pub fn temperature_range(&self, mode: Mode) -> Option<(i32, i32)> {
        Some((
            *self.min_temperature.get(&mode)?,
            *self.max_temperature.get(&mode)?,
        ))
    }

    /// Checks an intent against the declared capabilities. Power-off is
    /// always accepted since it ignores every other field.
    pub fn validate(&self, intent: &Intent) -> Result<(), ConfigurationError> {
        if intent.mode == Mode::Off {
            return Ok(());
        }

        if !self.operation_modes.contains(&intent.mode) {
            return Err(ConfigurationError::UnsupportedMode(intent.mode));
        }
        if !self.fan_modes.contains(&intent.fan) {
            return Err(ConfigurationError::UnsupportedFan(intent.fan));
        }
        if !self.swing_modes.contains(&intent.swing) {
            return Err(ConfigurationError::UnsupportedSwing(intent.swing));
        }

        for (enabled, toggle) in [
            (intent.turbo, Toggle::TurboMode),
            (intent.self_cleaning, Toggle::SelfCleaning),
        ] {
            if enabled && !self.toggles.contains(&toggle) {
                return Err(ConfigurationError::UnsupportedToggle(toggle));
            }
        }

        let (min, max) = self
            .temperature_range(intent.mode)
            .ok_or(ConfigurationError::MissingTemperatureRange(intent.mode))?;
        if !(min..=max).contains(&intent.temperature) {
            return Err(ConfigurationError::TemperatureOutOfRange {
                mode: intent.mode,
                temperature: intent.temperature,
                min,
                max,
            });
        }

        Ok(())
    }
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        DeviceCapabilities::perfect_aire()
    }
}
