//! Motion packet (id 0): world position and orientation of every car.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const CAR_MOTION_DATA_SIZE: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarMotionData {
    pub world_position_x: f32,
    pub world_position_y: f32,
    pub world_position_z: f32,
    pub world_velocity_x: f32,
    pub world_velocity_y: f32,
    pub world_velocity_z: f32,
    /// Normalised to 32767
    pub world_forward_dir_x: i16,
    pub world_forward_dir_y: i16,
    pub world_forward_dir_z: i16,
    pub world_right_dir_x: i16,
    pub world_right_dir_y: i16,
    pub world_right_dir_z: i16,
    pub g_force_lateral: f32,
    pub g_force_longitudinal: f32,
    pub g_force_vertical: f32,
    /// Radians
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl CarMotionData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            world_position_x: r.f32()?,
            world_position_y: r.f32()?,
            world_position_z: r.f32()?,
            world_velocity_x: r.f32()?,
            world_velocity_y: r.f32()?,
            world_velocity_z: r.f32()?,
            world_forward_dir_x: r.i16()?,
            world_forward_dir_y: r.i16()?,
            world_forward_dir_z: r.i16()?,
            world_right_dir_x: r.i16()?,
            world_right_dir_y: r.i16()?,
            world_right_dir_z: r.i16()?,
            g_force_lateral: r.f32()?,
            g_force_longitudinal: r.f32()?,
            g_force_vertical: r.f32()?,
            yaw: r.f32()?,
            pitch: r.f32()?,
            roll: r.f32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionPacket {
    pub header: PacketHeader,
    pub car_motion_data: [CarMotionData; NUM_CARS],
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + NUM_CARS * CAR_MOTION_DATA_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<MotionPacket> {
    ensure_len(data, packet_size(version), "motion")?;
    let mut r = WireReader::at(data, version.header_size(), "motion");
    let car_motion_data: [CarMotionData; NUM_CARS] =
        r.records(CAR_MOTION_DATA_SIZE, CarMotionData::read)?;
    Ok(MotionPacket { header, car_motion_data })
}
