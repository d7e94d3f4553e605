//! Typed views over decoded packets for stream subscribers.
//!
//! A connection decodes every datagram once and shares it as `Arc<Packet>`.
//! Subscribers pick the shape they want through [`PacketAdapter`]:
//! - `Arc<Packet>` for every packet, untouched
//! - a body type such as [`CarTelemetryPacket`](crate::CarTelemetryPacket) for one kind
//! - [`FlattenedRecord`](crate::FlattenedRecord) for the player's car, flattened
//! - [`KindedRecord`] for the flattened player record plus its collection name
//!
//! # Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use pitlane::{Packet, PacketKind, adapters::PacketAdapter};
//!
//! /// Gear and speed of the player's car.
//! struct Dash {
//!     speed: u16,
//!     gear: i8,
//! }
//!
//! impl PacketAdapter for Dash {
//!     fn accepts(kind: PacketKind) -> bool {
//!         kind == PacketKind::CarTelemetry
//!     }
//!
//!     fn adapt(packet: &Arc<Packet>) -> Option<Self> {
//!         let Packet::CarTelemetry(telemetry) = packet.as_ref() else {
//!             return None;
//!         };
//!         let car = telemetry
//!             .car_telemetry_data
//!             .get(telemetry.header.player_car_index as usize)?;
//!         Some(Dash { speed: car.speed, gear: car.gear })
//!     }
//! }
//! ```

mod packet_adapter;

pub use packet_adapter::{KindedRecord, PacketAdapter};
