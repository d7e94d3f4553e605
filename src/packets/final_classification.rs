//! Final classification packet (id 8), sent once at the end of a session.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const FINAL_CLASSIFICATION_DATA_SIZE: usize = 45;
pub const MAX_TYRE_STINTS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalClassificationData {
    pub position: u8,
    pub num_laps: u8,
    pub grid_position: u8,
    pub points: u8,
    pub num_pit_stops: u8,
    pub result_status: u8,
    pub best_lap_time_in_ms: u32,
    /// Seconds, without penalties
    pub total_race_time: f64,
    /// Seconds
    pub penalties_time: u8,
    pub num_penalties: u8,
    pub num_tyre_stints: u8,
    pub tyre_stints_actual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_visual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_end_laps: [u8; MAX_TYRE_STINTS],
}

impl FinalClassificationData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            position: r.u8()?,
            num_laps: r.u8()?,
            grid_position: r.u8()?,
            points: r.u8()?,
            num_pit_stops: r.u8()?,
            result_status: r.u8()?,
            best_lap_time_in_ms: r.u32()?,
            total_race_time: r.f64()?,
            penalties_time: r.u8()?,
            num_penalties: r.u8()?,
            num_tyre_stints: r.u8()?,
            tyre_stints_actual: r.u8_array()?,
            tyre_stints_visual: r.u8_array()?,
            tyre_stints_end_laps: r.u8_array()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalClassificationPacket {
    pub header: PacketHeader,
    pub num_cars: u8,
    pub classification_data: [FinalClassificationData; NUM_CARS],
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + 1 + NUM_CARS * FINAL_CLASSIFICATION_DATA_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<FinalClassificationPacket> {
    ensure_len(data, packet_size(version), "final classification")?;
    let mut r = WireReader::at(data, version.header_size(), "final classification");
    let num_cars = r.u8()?;
    let classification_data: [FinalClassificationData; NUM_CARS] =
        r.records(FINAL_CLASSIFICATION_DATA_SIZE, FinalClassificationData::read)?;
    Ok(FinalClassificationPacket { header, num_cars, classification_data })
}
