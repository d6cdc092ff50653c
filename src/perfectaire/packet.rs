use std::fmt;

use bitfield::bitfield;
use serde::{Deserialize, Serialize};

use super::{
    tables::{self, FanParams},
    Mode,
};

// Both frames are 6 bytes, held in the low 48 bits
bitfield! {
    pub struct HeaderFrame(u64);
    impl Debug;
    pub u16, leader, set_leader : 47, 32;
    pub u8, fan, set_fan : 31, 24;
    pub u8, fan_check, set_fan_check : 23, 16;
    pub u8, temperature, set_temperature : 15, 8;
    pub u8, temperature_check, set_temperature_check : 7, 0;
}

bitfield! {
    pub struct PayloadFrame(u64);
    impl Debug;
    pub u8, marker, set_marker : 47, 40;
    pub u8, fan, set_fan : 39, 32;
    pub u8, fine_tune, set_fine_tune : 31, 24;
    pub u8, flags, set_flags : 23, 16;
    pub u8, reserved, set_reserved : 15, 8;
    pub u8, checksum, set_checksum : 7, 0;
}

impl Clone for HeaderFrame {
    fn clone(&self) -> Self {
        HeaderFrame(self.0)
    }
}

impl Copy for HeaderFrame {}

impl Clone for PayloadFrame {
    fn clone(&self) -> Self {
        PayloadFrame(self.0)
    }
}

impl Copy for PayloadFrame {}

impl HeaderFrame {
    const LEADER: u16 = 0x4DB2;

    // Auto and dry replace the fan bytes entirely
    const FORCED_FAN: u8 = 0xF8;
    const FORCED_FAN_CHECK: u8 = 0x07;

    pub fn new(mode: Mode, fan: FanParams, temperature: i32) -> Self {
        let mut frame = HeaderFrame(0);
        frame.set_leader(HeaderFrame::LEADER);

        if mode.forces_auto_fan() {
            // Kept explicit even though it equals !FORCED_FAN
            frame.set_fan(HeaderFrame::FORCED_FAN);
            frame.set_fan_check(HeaderFrame::FORCED_FAN_CHECK);
        } else {
            frame.set_fan(fan.header);
            frame.set_fan_check(!fan.header);
        }

        let temperature = tables::coarse(temperature).wrapping_add(mode.temperature_offset());
        frame.set_temperature(temperature);
        frame.set_temperature_check(!temperature);
        frame
    }

    pub fn to_bytes(&self) -> [u8; 6] {
        frame_bytes(self.0)
    }
}

impl PayloadFrame {
    const MARKER: u8 = 0xAB;

    const FORCED_FAN: u8 = 0xA6;
    const FORCED_CHECKSUM_OFFSET: u8 = 0xA0;

    // The remote flags the two lowest set points
    const FLAGS: u8 = 0x80;
    const LOW_END_FLAGS: u8 = 0x88;
    const LOW_END_MAX: i32 = 61;

    pub fn new(mode: Mode, fan: FanParams, temperature: i32) -> Self {
        let (fan_byte, checksum_offset) = if mode.forces_auto_fan() {
            // Like the header, the requested fan plays no part here
            (
                PayloadFrame::FORCED_FAN,
                FanParams::AUTO
                    .checksum_offset
                    .wrapping_add(PayloadFrame::FORCED_CHECKSUM_OFFSET),
            )
        } else {
            (fan.payload, fan.checksum_offset)
        };

        let mut frame = PayloadFrame(0);
        frame.set_marker(PayloadFrame::MARKER);
        frame.set_fan(fan_byte);
        frame.set_fine_tune(tables::fine_tune(temperature));
        frame.set_flags(if temperature <= PayloadFrame::LOW_END_MAX {
            PayloadFrame::LOW_END_FLAGS
        } else {
            PayloadFrame::FLAGS
        });
        frame.set_reserved(0);
        frame.set_checksum(tables::base_checksum(temperature).wrapping_add(checksum_offset));
        frame
    }

    pub fn to_bytes(&self) -> [u8; 6] {
        frame_bytes(self.0)
    }
}

fn frame_bytes(word: u64) -> [u8; 6] {
    let [_, _, bytes @ ..] = word.to_be_bytes();
    bytes
}

/// The bytes of a single frame, in transmission order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Packet(pub Vec<u8>);

impl Packet {
    const OFF: [u8; 3] = [0x4D, 0xDE, 0x07];

    /// The short power-off frame, which carries no other state.
    pub fn off() -> Self {
        Packet(Packet::OFF.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<HeaderFrame> for Packet {
    fn from(frame: HeaderFrame) -> Self {
        Packet(frame.to_bytes().to_vec())
    }
}

impl From<PayloadFrame> for Packet {
    fn from(frame: PayloadFrame) -> Self {
        Packet(frame.to_bytes().to_vec())
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
