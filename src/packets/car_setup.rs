//! Car setup packet (id 5).
//!
//! Other cars' setups are blanked by the game in multiplayer sessions.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const CAR_SETUP_DATA_SIZE: usize = 49;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarSetupData {
    pub front_wing: u8,
    pub rear_wing: u8,
    /// Differential adjustment on throttle, percent
    pub on_throttle: u8,
    pub off_throttle: u8,
    pub front_camber: f32,
    pub rear_camber: f32,
    pub front_toe: f32,
    pub rear_toe: f32,
    pub front_suspension: u8,
    pub rear_suspension: u8,
    pub front_anti_roll_bar: u8,
    pub rear_anti_roll_bar: u8,
    pub front_suspension_height: u8,
    pub rear_suspension_height: u8,
    pub brake_pressure: u8,
    pub brake_bias: u8,
    /// PSI
    pub rear_left_tyre_pressure: f32,
    pub rear_right_tyre_pressure: f32,
    pub front_left_tyre_pressure: f32,
    pub front_right_tyre_pressure: f32,
    pub ballast: u8,
    /// Kilograms
    pub fuel_load: f32,
}

impl CarSetupData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            front_wing: r.u8()?,
            rear_wing: r.u8()?,
            on_throttle: r.u8()?,
            off_throttle: r.u8()?,
            front_camber: r.f32()?,
            rear_camber: r.f32()?,
            front_toe: r.f32()?,
            rear_toe: r.f32()?,
            front_suspension: r.u8()?,
            rear_suspension: r.u8()?,
            front_anti_roll_bar: r.u8()?,
            rear_anti_roll_bar: r.u8()?,
            front_suspension_height: r.u8()?,
            rear_suspension_height: r.u8()?,
            brake_pressure: r.u8()?,
            brake_bias: r.u8()?,
            rear_left_tyre_pressure: r.f32()?,
            rear_right_tyre_pressure: r.f32()?,
            front_left_tyre_pressure: r.f32()?,
            front_right_tyre_pressure: r.f32()?,
            ballast: r.u8()?,
            fuel_load: r.f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSetupPacket {
    pub header: PacketHeader,
    pub car_setups: [CarSetupData; NUM_CARS],
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + NUM_CARS * CAR_SETUP_DATA_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<CarSetupPacket> {
    ensure_len(data, packet_size(version), "car setup")?;
    let mut r = WireReader::at(data, version.header_size(), "car setup");
    let car_setups: [CarSetupData; NUM_CARS] =
        r.records(CAR_SETUP_DATA_SIZE, CarSetupData::read)?;
    Ok(CarSetupPacket { header, car_setups })
}
