//! Packet adapter trait and the adapters shipped with the crate

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::packets::{
    CarDamagePacket, CarSetupPacket, CarStatusPacket, CarTelemetryPacket,
    FinalClassificationPacket, LapDataPacket, MotionPacket, Packet, PacketKind,
    ParticipantsPacket, SessionPacket, TyreSetsPacket,
};
use crate::projection::{FlattenedRecord, project_player};

/// Two-phase adapter from decoded packets to a subscriber's type.
///
/// `accepts()` is consulted before `adapt()` so streams can drop unwanted
/// packet kinds without touching them. `adapt()` runs for every accepted
/// packet and returns `None` to skip one.
pub trait PacketAdapter: Sized {
    /// Whether packets of this kind are offered to `adapt()`.
    fn accepts(kind: PacketKind) -> bool;

    /// Convert a decoded packet. `None` drops it from the stream.
    fn adapt(packet: &Arc<Packet>) -> Option<Self>;
}

impl PacketAdapter for Arc<Packet> {
    fn accepts(_kind: PacketKind) -> bool {
        true
    }

    fn adapt(packet: &Arc<Packet>) -> Option<Self> {
        Some(Arc::clone(packet))
    }
}

/// The player's car, flattened. Packets whose player index is out of range
/// (spectating) are skipped.
impl PacketAdapter for FlattenedRecord {
    fn accepts(_kind: PacketKind) -> bool {
        true
    }

    fn adapt(packet: &Arc<Packet>) -> Option<Self> {
        match project_player(packet) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(kind = %packet.kind(), error = %e, "Skipping player projection");
                None
            }
        }
    }
}

/// A flattened player record tagged with the packet kind it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindedRecord {
    pub kind: PacketKind,
    pub record: FlattenedRecord,
}

impl KindedRecord {
    /// Storage name for writers, e.g. `car_telemetry`.
    pub fn collection_name(&self) -> &'static str {
        self.kind.collection_name()
    }
}

impl PacketAdapter for KindedRecord {
    fn accepts(_kind: PacketKind) -> bool {
        true
    }

    fn adapt(packet: &Arc<Packet>) -> Option<Self> {
        FlattenedRecord::adapt(packet).map(|record| KindedRecord { kind: packet.kind(), record })
    }
}

macro_rules! body_adapter {
    ($($body:ty => $variant:ident),+ $(,)?) => {
        $(
            impl PacketAdapter for $body {
                fn accepts(kind: PacketKind) -> bool {
                    kind == PacketKind::$variant
                }

                fn adapt(packet: &Arc<Packet>) -> Option<Self> {
                    match packet.as_ref() {
                        Packet::$variant(body) => Some(body.clone()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

body_adapter! {
    MotionPacket => Motion,
    SessionPacket => Session,
    LapDataPacket => LapData,
    ParticipantsPacket => Participants,
    CarSetupPacket => CarSetup,
    CarTelemetryPacket => CarTelemetry,
    CarStatusPacket => CarStatus,
    FinalClassificationPacket => FinalClassification,
    CarDamagePacket => CarDamage,
    TyreSetsPacket => TyreSets,
}
