//! Typed packet bodies and their wire layouts.
//!
//! Every datagram carries one [`PacketHeader`] followed by a fixed-layout
//! body selected by the header's packet id. Per-car bodies always hold
//! [`NUM_CARS`] records indexed by car slot; the "active cars" counts the
//! game sends are informational and never bound what is decoded.
//!
//! Layouts are versioned by the header's `packet_format`. Format 2023 is the
//! canonical layout; format 2022 adds rows for the packet kinds whose layouts
//! differ.

use serde::{Deserialize, Serialize, Serializer};

use crate::{Result, TelemetryError};

pub mod car_damage;
pub mod car_setup;
pub mod car_status;
pub mod car_telemetry;
pub mod final_classification;
pub mod header;
pub mod lap_data;
pub mod motion;
pub mod participants;
pub mod session;
pub mod tyre_sets;

pub use car_damage::{CarDamageData, CarDamagePacket};
pub use car_setup::{CarSetupData, CarSetupPacket};
pub use car_status::{CarStatusData, CarStatusPacket};
pub use car_telemetry::{CarTelemetryData, CarTelemetryPacket};
pub use final_classification::{FinalClassificationData, FinalClassificationPacket};
pub use header::{PacketHeader, decode_header};
pub use lap_data::{LapData, LapDataPacket};
pub use motion::{CarMotionData, MotionPacket};
pub use participants::{ParticipantData, ParticipantsPacket};
pub use session::{MarshalZone, SessionPacket, WeatherForecastSample};
pub use tyre_sets::{TyreSetData, TyreSetsPacket};

/// Fixed number of car slots in every per-car array.
pub const NUM_CARS: usize = 22;

/// Smallest datagram that can hold any header.
pub const MIN_HEADER_SIZE: usize = 24;

/// Largest datagram the game sends.
pub const MAX_PACKET_SIZE: usize = 2048;

/// Wire format generation, taken from the header's `packet_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ProtocolVersion {
    /// F1 22 (`packet_format` 2022), 24-byte header
    Format2022,
    /// F1 23 (`packet_format` 2023), 29-byte header
    Format2023,
}

impl ProtocolVersion {
    pub fn from_format(packet_format: u16) -> Result<Self> {
        match packet_format {
            2022 => Ok(ProtocolVersion::Format2022),
            2023 => Ok(ProtocolVersion::Format2023),
            found => Err(TelemetryError::UnsupportedFormat { found }),
        }
    }

    pub const fn packet_format(self) -> u16 {
        match self {
            ProtocolVersion::Format2022 => 2022,
            ProtocolVersion::Format2023 => 2023,
        }
    }

    pub const fn header_size(self) -> usize {
        match self {
            ProtocolVersion::Format2022 => 24,
            ProtocolVersion::Format2023 => 29,
        }
    }
}

/// Packet kinds this crate decodes, keyed by the header's packet id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum PacketKind {
    Motion,
    Session,
    LapData,
    Participants,
    CarSetup,
    CarTelemetry,
    CarStatus,
    FinalClassification,
    CarDamage,
    TyreSets,
}

impl PacketKind {
    pub const ALL: [PacketKind; 10] = [
        PacketKind::Motion,
        PacketKind::Session,
        PacketKind::LapData,
        PacketKind::Participants,
        PacketKind::CarSetup,
        PacketKind::CarTelemetry,
        PacketKind::CarStatus,
        PacketKind::FinalClassification,
        PacketKind::CarDamage,
        PacketKind::TyreSets,
    ];

    /// Map a packet id to its kind. Ids without a decoder return `None`.
    pub fn from_id(packet_id: u8) -> Option<Self> {
        match packet_id {
            0 => Some(PacketKind::Motion),
            1 => Some(PacketKind::Session),
            2 => Some(PacketKind::LapData),
            4 => Some(PacketKind::Participants),
            5 => Some(PacketKind::CarSetup),
            6 => Some(PacketKind::CarTelemetry),
            7 => Some(PacketKind::CarStatus),
            8 => Some(PacketKind::FinalClassification),
            10 => Some(PacketKind::CarDamage),
            12 => Some(PacketKind::TyreSets),
            _ => None,
        }
    }

    pub const fn id(self) -> u8 {
        match self {
            PacketKind::Motion => 0,
            PacketKind::Session => 1,
            PacketKind::LapData => 2,
            PacketKind::Participants => 4,
            PacketKind::CarSetup => 5,
            PacketKind::CarTelemetry => 6,
            PacketKind::CarStatus => 7,
            PacketKind::FinalClassification => 8,
            PacketKind::CarDamage => 10,
            PacketKind::TyreSets => 12,
        }
    }

    /// Storage name used by writers downstream (collection, measurement or table).
    pub const fn collection_name(self) -> &'static str {
        match self {
            PacketKind::Motion => "motion",
            PacketKind::Session => "session",
            PacketKind::LapData => "lap",
            PacketKind::Participants => "participants",
            PacketKind::CarSetup => "car_setup",
            PacketKind::CarTelemetry => "car_telemetry",
            PacketKind::CarStatus => "car_status",
            PacketKind::FinalClassification => "final_classification",
            PacketKind::CarDamage => "car_damage",
            PacketKind::TyreSets => "tyre_sets",
        }
    }

    /// Whether the body is a `[_; NUM_CARS]` array that can be projected per car.
    pub const fn is_per_car(self) -> bool {
        !matches!(self, PacketKind::Session | PacketKind::TyreSets)
    }
}

impl std::fmt::Display for PacketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// A fully decoded datagram.
///
/// The variant is fixed by the header's packet id at decode time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Packet {
    Motion(MotionPacket),
    Session(SessionPacket),
    LapData(LapDataPacket),
    Participants(ParticipantsPacket),
    CarSetup(CarSetupPacket),
    CarTelemetry(CarTelemetryPacket),
    CarStatus(CarStatusPacket),
    FinalClassification(FinalClassificationPacket),
    CarDamage(CarDamagePacket),
    TyreSets(TyreSetsPacket),
}

impl Packet {
    pub fn header(&self) -> &PacketHeader {
        match self {
            Packet::Motion(p) => &p.header,
            Packet::Session(p) => &p.header,
            Packet::LapData(p) => &p.header,
            Packet::Participants(p) => &p.header,
            Packet::CarSetup(p) => &p.header,
            Packet::CarTelemetry(p) => &p.header,
            Packet::CarStatus(p) => &p.header,
            Packet::FinalClassification(p) => &p.header,
            Packet::CarDamage(p) => &p.header,
            Packet::TyreSets(p) => &p.header,
        }
    }

    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Motion(_) => PacketKind::Motion,
            Packet::Session(_) => PacketKind::Session,
            Packet::LapData(_) => PacketKind::LapData,
            Packet::Participants(_) => PacketKind::Participants,
            Packet::CarSetup(_) => PacketKind::CarSetup,
            Packet::CarTelemetry(_) => PacketKind::CarTelemetry,
            Packet::CarStatus(_) => PacketKind::CarStatus,
            Packet::FinalClassification(_) => PacketKind::FinalClassification,
            Packet::CarDamage(_) => PacketKind::CarDamage,
            Packet::TyreSets(_) => PacketKind::TyreSets,
        }
    }
}

/// Serialize fixed arrays longer than serde's built-in array support.
pub(crate) fn serialize_array<S, T, const N: usize>(
    items: &[T; N],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(items.iter())
}

#[cfg(test)]
mod boundary_tests;
