//! Lap data packet (id 2): timing and race state for every car.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const LAP_DATA_SIZE_2023: usize = 50;
pub const LAP_DATA_SIZE_2022: usize = 43;
const TRAILING_SIZE: usize = 2;

/// One car's lap state.
///
/// Format 2022 has no sector minute, delta or corner cutting fields; they
/// decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LapData {
    pub last_lap_time_in_ms: u32,
    pub current_lap_time_in_ms: u32,
    pub sector1_time_in_ms: u16,
    pub sector1_time_minutes: u8,
    pub sector2_time_in_ms: u16,
    pub sector2_time_minutes: u8,
    pub delta_to_car_in_front_in_ms: u16,
    pub delta_to_race_leader_in_ms: u16,
    /// Metres from the start line this lap; negative before crossing it
    pub lap_distance: f32,
    pub total_distance: f32,
    pub safety_car_delta: f32,
    pub car_position: u8,
    pub current_lap_num: u8,
    pub pit_status: u8,
    pub num_pit_stops: u8,
    pub sector: u8,
    pub current_lap_invalid: u8,
    /// Seconds
    pub penalties: u8,
    pub total_warnings: u8,
    pub corner_cutting_warnings: u8,
    pub num_unserved_drive_through_pens: u8,
    pub num_unserved_stop_go_pens: u8,
    pub grid_position: u8,
    pub driver_status: u8,
    pub result_status: u8,
    pub pit_lane_timer_active: u8,
    pub pit_lane_time_in_lane_in_ms: u16,
    pub pit_stop_timer_in_ms: u16,
    pub pit_stop_should_serve_pen: u8,
}

impl LapData {
    fn read_2023(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            last_lap_time_in_ms: r.u32()?,
            current_lap_time_in_ms: r.u32()?,
            sector1_time_in_ms: r.u16()?,
            sector1_time_minutes: r.u8()?,
            sector2_time_in_ms: r.u16()?,
            sector2_time_minutes: r.u8()?,
            delta_to_car_in_front_in_ms: r.u16()?,
            delta_to_race_leader_in_ms: r.u16()?,
            lap_distance: r.f32()?,
            total_distance: r.f32()?,
            safety_car_delta: r.f32()?,
            car_position: r.u8()?,
            current_lap_num: r.u8()?,
            pit_status: r.u8()?,
            num_pit_stops: r.u8()?,
            sector: r.u8()?,
            current_lap_invalid: r.u8()?,
            penalties: r.u8()?,
            total_warnings: r.u8()?,
            corner_cutting_warnings: r.u8()?,
            num_unserved_drive_through_pens: r.u8()?,
            num_unserved_stop_go_pens: r.u8()?,
            grid_position: r.u8()?,
            driver_status: r.u8()?,
            result_status: r.u8()?,
            pit_lane_timer_active: r.u8()?,
            pit_lane_time_in_lane_in_ms: r.u16()?,
            pit_stop_timer_in_ms: r.u16()?,
            pit_stop_should_serve_pen: r.u8()?,
        })
    }

    fn read_2022(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            last_lap_time_in_ms: r.u32()?,
            current_lap_time_in_ms: r.u32()?,
            sector1_time_in_ms: r.u16()?,
            sector2_time_in_ms: r.u16()?,
            lap_distance: r.f32()?,
            total_distance: r.f32()?,
            safety_car_delta: r.f32()?,
            car_position: r.u8()?,
            current_lap_num: r.u8()?,
            pit_status: r.u8()?,
            num_pit_stops: r.u8()?,
            sector: r.u8()?,
            current_lap_invalid: r.u8()?,
            penalties: r.u8()?,
            total_warnings: r.u8()?,
            num_unserved_drive_through_pens: r.u8()?,
            num_unserved_stop_go_pens: r.u8()?,
            grid_position: r.u8()?,
            driver_status: r.u8()?,
            result_status: r.u8()?,
            pit_lane_timer_active: r.u8()?,
            pit_lane_time_in_lane_in_ms: r.u16()?,
            pit_stop_timer_in_ms: r.u16()?,
            pit_stop_should_serve_pen: r.u8()?,
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapDataPacket {
    pub header: PacketHeader,
    pub lap_data: [LapData; NUM_CARS],
    /// 255 when there is no personal best car
    pub time_trial_pb_car_idx: u8,
    pub time_trial_rival_car_idx: u8,
}

pub const fn record_size(version: ProtocolVersion) -> usize {
    match version {
        ProtocolVersion::Format2022 => LAP_DATA_SIZE_2022,
        ProtocolVersion::Format2023 => LAP_DATA_SIZE_2023,
    }
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + NUM_CARS * record_size(version) + TRAILING_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<LapDataPacket> {
    ensure_len(data, packet_size(version), "lap data")?;
    let mut r = WireReader::at(data, version.header_size(), "lap data");
    let lap_data: [LapData; NUM_CARS] = match version {
        ProtocolVersion::Format2023 => r.records(LAP_DATA_SIZE_2023, LapData::read_2023)?,
        ProtocolVersion::Format2022 => r.records(LAP_DATA_SIZE_2022, LapData::read_2022)?,
    };
    Ok(LapDataPacket {
        header,
        lap_data,
        time_trial_pb_car_idx: r.u8()?,
        time_trial_rival_car_idx: r.u8()?,
    })
}
