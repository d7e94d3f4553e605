//! Car status packet (id 7): fuel, ERS, tyre compound and assists.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const CAR_STATUS_DATA_SIZE_2023: usize = 55;
pub const CAR_STATUS_DATA_SIZE_2022: usize = 47;

/// One car's status.
///
/// Format 2022 has no engine power fields; they decode as 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarStatusData {
    pub traction_control: u8,
    pub anti_lock_brakes: u8,
    pub fuel_mix: u8,
    pub front_brake_bias: u8,
    pub pit_limiter_status: u8,
    pub fuel_in_tank: f32,
    pub fuel_capacity: f32,
    pub fuel_remaining_laps: f32,
    pub max_rpm: u16,
    pub idle_rpm: u16,
    pub max_gears: u8,
    pub drs_allowed: u8,
    /// Metres until DRS may be used, 0 when unavailable
    pub drs_activation_distance: u16,
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub tyres_age_laps: u8,
    /// -1 invalid, 0 none, 1 green, 2 blue, 3 yellow
    pub vehicle_fia_flags: i8,
    /// Watts
    pub engine_power_ice: f32,
    pub engine_power_mguk: f32,
    /// Joules
    pub ers_store_energy: f32,
    pub ers_deploy_mode: u8,
    pub ers_harvested_this_lap_mguk: f32,
    pub ers_harvested_this_lap_mguh: f32,
    pub ers_deployed_this_lap: f32,
    pub network_paused: u8,
}

impl CarStatusData {
    fn read(r: &mut WireReader<'_>, version: ProtocolVersion) -> Result<Self> {
        let traction_control = r.u8()?;
        let anti_lock_brakes = r.u8()?;
        let fuel_mix = r.u8()?;
        let front_brake_bias = r.u8()?;
        let pit_limiter_status = r.u8()?;
        let fuel_in_tank = r.f32()?;
        let fuel_capacity = r.f32()?;
        let fuel_remaining_laps = r.f32()?;
        let max_rpm = r.u16()?;
        let idle_rpm = r.u16()?;
        let max_gears = r.u8()?;
        let drs_allowed = r.u8()?;
        let drs_activation_distance = r.u16()?;
        let actual_tyre_compound = r.u8()?;
        let visual_tyre_compound = r.u8()?;
        let tyres_age_laps = r.u8()?;
        let vehicle_fia_flags = r.i8()?;
        let (engine_power_ice, engine_power_mguk) = match version {
            ProtocolVersion::Format2023 => (r.f32()?, r.f32()?),
            ProtocolVersion::Format2022 => (0.0, 0.0),
        };
        Ok(Self {
            traction_control,
            anti_lock_brakes,
            fuel_mix,
            front_brake_bias,
            pit_limiter_status,
            fuel_in_tank,
            fuel_capacity,
            fuel_remaining_laps,
            max_rpm,
            idle_rpm,
            max_gears,
            drs_allowed,
            drs_activation_distance,
            actual_tyre_compound,
            visual_tyre_compound,
            tyres_age_laps,
            vehicle_fia_flags,
            engine_power_ice,
            engine_power_mguk,
            ers_store_energy: r.f32()?,
            ers_deploy_mode: r.u8()?,
            ers_harvested_this_lap_mguk: r.f32()?,
            ers_harvested_this_lap_mguh: r.f32()?,
            ers_deployed_this_lap: r.f32()?,
            network_paused: r.u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarStatusPacket {
    pub header: PacketHeader,
    pub car_status_data: [CarStatusData; NUM_CARS],
}

pub const fn record_size(version: ProtocolVersion) -> usize {
    match version {
        ProtocolVersion::Format2022 => CAR_STATUS_DATA_SIZE_2022,
        ProtocolVersion::Format2023 => CAR_STATUS_DATA_SIZE_2023,
    }
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + NUM_CARS * record_size(version)
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<CarStatusPacket> {
    ensure_len(data, packet_size(version), "car status")?;
    let mut r = WireReader::at(data, version.header_size(), "car status");
    let car_status_data: [CarStatusData; NUM_CARS] =
        r.records(record_size(version), |r| CarStatusData::read(r, version))?;
    Ok(CarStatusPacket { header, car_status_data })
}
