//! Car telemetry packet (id 6): speed, inputs, temperatures and pressures.
//!
//! Wheel arrays are in wire order: rear left, rear right, front left, front right.

use serde::{Deserialize, Serialize};

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{SurfaceType, WireReader, decode_surface_type, ensure_len};

pub const CAR_TELEMETRY_DATA_SIZE: usize = 60;
const TRAILING_SIZE: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarTelemetryData {
    /// km/h
    pub speed: u16,
    pub throttle: f32,
    /// -1.0 full left, 1.0 full right
    pub steer: f32,
    pub brake: f32,
    pub clutch: u8,
    /// -1 reverse, 0 neutral
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    pub rev_lights_percent: u8,
    pub rev_lights_bit_value: u16,
    /// Celsius
    pub brakes_temperature: [u16; 4],
    pub tyres_surface_temperature: [u8; 4],
    pub tyres_inner_temperature: [u8; 4],
    pub engine_temperature: u16,
    /// PSI
    pub tyres_pressure: [f32; 4],
    pub surface_type: [u8; 4],
}

impl CarTelemetryData {
    pub fn surface_types(&self) -> [SurfaceType; 4] {
        self.surface_type.map(decode_surface_type)
    }

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            speed: r.u16()?,
            throttle: r.f32()?,
            steer: r.f32()?,
            brake: r.f32()?,
            clutch: r.u8()?,
            gear: r.i8()?,
            engine_rpm: r.u16()?,
            drs: r.u8()?,
            rev_lights_percent: r.u8()?,
            rev_lights_bit_value: r.u16()?,
            brakes_temperature: r.u16_array()?,
            tyres_surface_temperature: r.u8_array()?,
            tyres_inner_temperature: r.u8_array()?,
            engine_temperature: r.u16()?,
            tyres_pressure: r.f32_array()?,
            surface_type: r.u8_array()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarTelemetryPacket {
    pub header: PacketHeader,
    pub car_telemetry_data: [CarTelemetryData; NUM_CARS],
    /// 255 when the MFD is closed
    pub mfd_panel_index: u8,
    pub mfd_panel_index_secondary_player: u8,
    /// 0 when there is no suggestion
    pub suggested_gear: i8,
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + NUM_CARS * CAR_TELEMETRY_DATA_SIZE + TRAILING_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<CarTelemetryPacket> {
    ensure_len(data, packet_size(version), "car telemetry")?;
    let mut r = WireReader::at(data, version.header_size(), "car telemetry");
    let car_telemetry_data: [CarTelemetryData; NUM_CARS] =
        r.records(CAR_TELEMETRY_DATA_SIZE, CarTelemetryData::read)?;
    Ok(CarTelemetryPacket {
        header,
        car_telemetry_data,
        mfd_panel_index: r.u8()?,
        mfd_panel_index_secondary_player: r.u8()?,
        suggested_gear: r.i8()?,
    })
}
