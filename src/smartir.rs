use serde::Serialize;
use tracing::debug;

use crate::perfectaire::{encode, DeviceCapabilities, Fan, Intent, Mode, Swing};

/*
{
   "manufacturer":"Perfect Aire",
   "supportedModels":[
      "RG10A(D2S)/BGEFU1"
   ],
   "commandsEncoding":"Generic",
   "minTemperature":{ "cool":60, ... },
   "maxTemperature":{ "cool":86, ... },
   "precision":1,
   "operationModes":[ "cool", "heat", "auto", "dry" ],
   ...
   "commands": {
      "off": { "protocol": "nec", "timing": "...", "packets": [[77, 222, 7], ...] },
      "cool": { "auto": { "60": { ... } } }
   }
*/

#[derive(Serialize, Debug, Clone)]
pub struct CodeFile {
    #[serde(flatten)]
    pub capabilities: DeviceCapabilities,
    pub commands: serde_json::Value,
}

/// Generates a SmartIR code file from all declared states
pub fn gen_smartir(capabilities: &DeviceCapabilities) -> anyhow::Result<CodeFile> {
    // Commands are nested to represent all possible states, the hierarchy used in other models is:
    // mode -> fan -> temperature
    // Swing carries no bits so it isn't part of the hierarchy.
    let mut all_commands = serde_json::Map::new();

    let off = Intent::new(Mode::Off, Swing::default(), Fan::Auto, 0);
    all_commands.insert(Mode::Off.to_string(), serde_json::to_value(encode(&off))?);

    for &mode in &capabilities.operation_modes {
        if mode == Mode::Off {
            continue;
        }

        let Some((min, max)) = capabilities.temperature_range(mode) else {
            debug!(%mode, "no temperature range declared, skipping");
            continue;
        };

        let mut mode_map = serde_json::Map::new();
        for &fan in &capabilities.fan_modes {
            let mut fan_map = serde_json::Map::new();
            for temperature in min..=max {
                let state = Intent::new(mode, Swing::default(), fan, temperature);
                fan_map.insert(
                    temperature.to_string(),
                    serde_json::to_value(encode(&state))?,
                );
            }
            mode_map.insert(fan.to_string(), fan_map.into());
        }

        all_commands.insert(mode.to_string(), mode_map.into());
    }

    Ok(CodeFile {
        capabilities: capabilities.clone(),
        commands: all_commands.into(),
    })
}
