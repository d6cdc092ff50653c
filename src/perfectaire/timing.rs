//! Timing descriptor handed to the transmitter alongside the packets.
//!
//! The descriptor travels as a flat `key=value` string. [`Timing`] is a typed
//! view over it for transmitters that would rather not parse it themselves.

use std::{fmt, str::FromStr, time::Duration};

use thiserror::Error;

pub const TIMING: &str = "tp=528,t0=519,t1=1571,ph=4272,pl=4303,cm=3,a=2,pg=5096";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// `tp`: mark preceding every bit
    pub pulse: Duration,
    /// `t0`: space encoding a 0
    pub zero: Duration,
    /// `t1`: space encoding a 1
    pub one: Duration,
    /// `ph`: header mark
    pub header_mark: Duration,
    /// `pl`: header space
    pub header_space: Duration,
    /// `cm`
    pub command_width: u8,
    /// `a`
    pub address_width: u8,
    /// `pg`: gap between frames
    pub gap: Duration,
}

impl Timing {
    pub const NEC: Timing = Timing {
        pulse: Duration::from_micros(528),
        zero: Duration::from_micros(519),
        one: Duration::from_micros(1571),
        header_mark: Duration::from_micros(4272),
        header_space: Duration::from_micros(4303),
        command_width: 3,
        address_width: 2,
        gap: Duration::from_micros(5096),
    };
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimingError {
    #[error("expected key=value, got {0:?}")]
    MalformedPair(String),
    #[error("unknown timing key: {0}")]
    UnknownKey(String),
    #[error("timing key given twice: {0}")]
    DuplicateKey(&'static str),
    #[error("missing timing key: {0}")]
    MissingKey(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

const KEYS: [&str; 8] = ["tp", "t0", "t1", "ph", "pl", "cm", "a", "pg"];

impl FromStr for Timing {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values: [Option<u64>; 8] = [None; 8];

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| TimingError::MalformedPair(pair.into()))?;

            let slot = KEYS
                .iter()
                .position(|&k| k == key.trim())
                .ok_or_else(|| TimingError::UnknownKey(key.trim().into()))?;
            let key = KEYS[slot];

            let value = value
                .trim()
                .parse::<u64>()
                .map_err(|_| TimingError::InvalidValue {
                    key,
                    value: value.into(),
                })?;

            if values[slot].replace(value).is_some() {
                return Err(TimingError::DuplicateKey(key));
            }
        }

        let get = |key: &'static str| -> Result<u64, TimingError> {
            KEYS.iter()
                .position(|&k| k == key)
                .and_then(|slot| values[slot])
                .ok_or(TimingError::MissingKey(key))
        };
        let width = |key: &'static str| -> Result<u8, TimingError> {
            let value = get(key)?;
            u8::try_from(value).map_err(|_| TimingError::InvalidValue {
                key,
                value: value.to_string(),
            })
        };

        Ok(Timing {
            pulse: Duration::from_micros(get("tp")?),
            zero: Duration::from_micros(get("t0")?),
            one: Duration::from_micros(get("t1")?),
            header_mark: Duration::from_micros(get("ph")?),
            header_space: Duration::from_micros(get("pl")?),
            command_width: width("cm")?,
            address_width: width("a")?,
            gap: Duration::from_micros(get("pg")?),
        })
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tp={},t0={},t1={},ph={},pl={},cm={},a={},pg={}",
            self.pulse.as_micros(),
            self.zero.as_micros(),
            self.one.as_micros(),
            self.header_mark.as_micros(),
            self.header_space.as_micros(),
            self.command_width,
            self.address_width,
            self.gap.as_micros(),
        )
    }
}
