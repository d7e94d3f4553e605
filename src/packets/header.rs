//! Packet header shared by every datagram.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MIN_HEADER_SIZE, PacketKind, ProtocolVersion};
use crate::types::{WireReader, ensure_len};
use crate::{Result, TelemetryError};

/// Header common to every datagram.
///
/// `game_year` and `overall_frame_identifier` only exist in format 2023.
/// `player_car_index` is not validated here; projection checks it against the
/// fixed array size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacketHeader {
    pub packet_format: u16,
    pub game_year: Option<u8>,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    pub packet_id: u8,
    pub session_uid: u64,
    pub session_time: f32,
    pub frame_identifier: u32,
    pub overall_frame_identifier: Option<u32>,
    pub player_car_index: u8,
    pub secondary_player_car_index: u8,
}

impl PacketHeader {
    /// Protocol version named by `packet_format`.
    pub fn protocol_version(&self) -> Result<ProtocolVersion> {
        ProtocolVersion::from_format(self.packet_format)
    }

    /// Packet kind named by `packet_id`, if this crate decodes it.
    pub fn kind(&self) -> Option<PacketKind> {
        PacketKind::from_id(self.packet_id)
    }

    /// Bytes the header occupies on the wire.
    pub fn wire_size(&self) -> usize {
        self.protocol_version().map(ProtocolVersion::header_size).unwrap_or(MIN_HEADER_SIZE)
    }

    /// Fail with `UnhandledPacketType` for this header.
    pub(crate) fn unhandled(&self) -> TelemetryError {
        TelemetryError::UnhandledPacketType {
            packet_format: self.packet_format,
            packet_id: self.packet_id,
        }
    }
}

/// Decode the header at the start of a datagram.
///
/// Anything shorter than 24 bytes is rejected before a single field is read.
pub fn decode_header(data: &[u8]) -> Result<PacketHeader> {
    ensure_len(data, MIN_HEADER_SIZE, "packet header")?;

    let mut reader = WireReader::new(data, "packet header");
    let packet_format = reader.u16()?;
    let version = ProtocolVersion::from_format(packet_format)?;
    ensure_len(data, version.header_size(), "packet header")?;

    let header = match version {
        ProtocolVersion::Format2023 => PacketHeader {
            packet_format,
            game_year: Some(reader.u8()?),
            game_major_version: reader.u8()?,
            game_minor_version: reader.u8()?,
            packet_version: reader.u8()?,
            packet_id: reader.u8()?,
            session_uid: reader.u64()?,
            session_time: reader.f32()?,
            frame_identifier: reader.u32()?,
            overall_frame_identifier: Some(reader.u32()?),
            player_car_index: reader.u8()?,
            secondary_player_car_index: reader.u8()?,
        },
        ProtocolVersion::Format2022 => PacketHeader {
            packet_format,
            game_year: None,
            game_major_version: reader.u8()?,
            game_minor_version: reader.u8()?,
            packet_version: reader.u8()?,
            packet_id: reader.u8()?,
            session_uid: reader.u64()?,
            session_time: reader.f32()?,
            frame_identifier: reader.u32()?,
            overall_frame_identifier: None,
            player_car_index: reader.u8()?,
            secondary_player_car_index: reader.u8()?,
        },
    };

    debug!(
        packet_format,
        packet_id = header.packet_id,
        frame = header.frame_identifier,
        "Decoded packet header"
    );
    Ok(header)
}
