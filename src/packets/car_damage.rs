//! Car damage packet (id 10): wear and damage percentages.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const CAR_DAMAGE_DATA_SIZE: usize = 42;

/// Wheel arrays are in wire order: rear left, rear right, front left, front right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarDamageData {
    /// Percent
    pub tyres_wear: [f32; 4],
    pub tyres_damage: [u8; 4],
    pub brakes_damage: [u8; 4],
    pub front_left_wing_damage: u8,
    pub front_right_wing_damage: u8,
    pub rear_wing_damage: u8,
    pub floor_damage: u8,
    pub diffuser_damage: u8,
    pub sidepod_damage: u8,
    pub drs_fault: u8,
    pub ers_fault: u8,
    pub gear_box_damage: u8,
    pub engine_damage: u8,
    pub engine_mguh_wear: u8,
    pub engine_es_wear: u8,
    pub engine_ce_wear: u8,
    pub engine_ice_wear: u8,
    pub engine_mguk_wear: u8,
    pub engine_tc_wear: u8,
    pub engine_blown: u8,
    pub engine_seized: u8,
}

impl CarDamageData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            tyres_wear: r.f32_array()?,
            tyres_damage: r.u8_array()?,
            brakes_damage: r.u8_array()?,
            front_left_wing_damage: r.u8()?,
            front_right_wing_damage: r.u8()?,
            rear_wing_damage: r.u8()?,
            floor_damage: r.u8()?,
            diffuser_damage: r.u8()?,
            sidepod_damage: r.u8()?,
            drs_fault: r.u8()?,
            ers_fault: r.u8()?,
            gear_box_damage: r.u8()?,
            engine_damage: r.u8()?,
            engine_mguh_wear: r.u8()?,
            engine_es_wear: r.u8()?,
            engine_ce_wear: r.u8()?,
            engine_ice_wear: r.u8()?,
            engine_mguk_wear: r.u8()?,
            engine_tc_wear: r.u8()?,
            engine_blown: r.u8()?,
            engine_seized: r.u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarDamagePacket {
    pub header: PacketHeader,
    pub car_damage_data: [CarDamageData; NUM_CARS],
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + NUM_CARS * CAR_DAMAGE_DATA_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<CarDamagePacket> {
    ensure_len(data, packet_size(version), "car damage")?;
    let mut r = WireReader::at(data, version.header_size(), "car damage");
    let car_damage_data: [CarDamageData; NUM_CARS] =
        r.records(CAR_DAMAGE_DATA_SIZE, CarDamageData::read)?;
    Ok(CarDamagePacket { header, car_damage_data })
}
