//! Packet dispatch: header first, then the body decoder for (format, kind).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Result;
use crate::packets::{
    self, Packet, PacketHeader, PacketKind, ProtocolVersion, car_damage, car_setup, car_status,
    car_telemetry, final_classification, lap_data, motion, participants, session, tyre_sets,
};

/// Stateless datagram decoder.
///
/// ```rust
/// use pitlane::{PacketDecoder, TelemetryError};
///
/// let decoder = PacketDecoder;
/// let err = decoder.decode(&[0u8; 10]).unwrap_err();
/// assert!(matches!(err, TelemetryError::TruncatedBuffer { .. }));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketDecoder;

impl PacketDecoder {
    pub fn decode(&self, data: &[u8]) -> Result<Packet> {
        decode_packet(data)
    }

    pub fn decode_header(&self, data: &[u8]) -> Result<PacketHeader> {
        packets::decode_header(data)
    }

    /// Whether a decoder exists for this (format, kind) pair.
    pub fn supports(&self, version: ProtocolVersion, kind: PacketKind) -> bool {
        use PacketKind::*;
        match version {
            ProtocolVersion::Format2023 => true,
            ProtocolVersion::Format2022 => {
                matches!(kind, LapData | CarTelemetry | CarStatus | CarDamage)
            }
        }
    }
}

/// Decode one datagram into a typed packet.
///
/// Unknown packet ids and (format, kind) pairs without a decoder return
/// `UnhandledPacketType` without looking at body bytes.
pub fn decode_packet(data: &[u8]) -> Result<Packet> {
    let header = packets::decode_header(data)?;
    let version = header.protocol_version()?;
    let Some(kind) = PacketKind::from_id(header.packet_id) else {
        return Err(header.unhandled());
    };

    trace!(len = data.len(), %kind, "Dispatching datagram");

    use PacketKind as K;
    use ProtocolVersion::{Format2022, Format2023};
    let packet = match (version, kind) {
        (Format2023, K::Motion) => Packet::Motion(motion::decode(data, header, version)?),
        (Format2023, K::Session) => Packet::Session(session::decode(data, header, version)?),
        (_, K::LapData) => Packet::LapData(lap_data::decode(data, header, version)?),
        (Format2023, K::Participants) => {
            Packet::Participants(participants::decode(data, header, version)?)
        }
        (Format2023, K::CarSetup) => Packet::CarSetup(car_setup::decode(data, header, version)?),
        (_, K::CarTelemetry) => {
            Packet::CarTelemetry(car_telemetry::decode(data, header, version)?)
        }
        (_, K::CarStatus) => Packet::CarStatus(car_status::decode(data, header, version)?),
        (Format2023, K::FinalClassification) => Packet::FinalClassification(
            final_classification::decode(data, header, version)?,
        ),
        (_, K::CarDamage) => Packet::CarDamage(car_damage::decode(data, header, version)?),
        (Format2023, K::TyreSets) => Packet::TyreSets(tyre_sets::decode(data, header, version)?),
        (
            Format2022,
            K::Motion
            | K::Session
            | K::Participants
            | K::CarSetup
            | K::FinalClassification
            | K::TyreSets,
        ) => return Err(header.unhandled()),
    };
    Ok(packet)
}
