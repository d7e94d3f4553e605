//! Type-safe Rust library for F1 UDP telemetry.
//!
//! We Race Pitlane decodes the binary datagrams the F1 games broadcast over
//! UDP into typed packets, and flattens the player's car into named scalars
//! for storage.
//!
//! # Features
//!
//! - **Typed packets**: every supported packet kind decodes to a plain struct
//! - **Versioned layouts**: format 2023 and the 2022 layouts that differ
//! - **Safe on hostile input**: short or garbage datagrams are errors, never panics
//! - **Streaming**: a UDP receive loop with rate-controlled subscriptions
//!
//! # Quick Start
//!
//! Decode a single datagram:
//!
//! ```rust
//! use pitlane::{TelemetryError, decode_packet};
//!
//! match decode_packet(&[0u8; 10]) {
//!     Err(TelemetryError::TruncatedBuffer { needed, available, .. }) => {
//!         assert_eq!((needed, available), (24, 10));
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Example (UDP)
//!
//! ```rust,no_run
//! use pitlane::{CarTelemetryPacket, Pitlane, ReceiverConfig, UpdateRate};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> pitlane::Result<()> {
//!     let connection = Pitlane::bind(ReceiverConfig::from_env()?).await?;
//!     let mut stream = connection.subscribe::<CarTelemetryPacket>(UpdateRate::Max(10));
//!
//!     while let Some(packet) = stream.next().await {
//!         let player = packet.header.player_car_index as usize;
//!         if let Some(car) = packet.car_telemetry_data.get(player) {
//!             println!("Speed: {} km/h", car.speed);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod adapters;
pub mod config;
pub mod dispatch;
mod error;
pub mod packets;
pub mod projection;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Stream-based telemetry architecture
pub mod connection;
pub mod driver;
pub mod provider;
pub mod providers;
pub mod stream;

// Core exports
pub use adapters::{KindedRecord, PacketAdapter};
pub use config::ReceiverConfig;
pub use dispatch::{PacketDecoder, decode_packet};
pub use error::*;
pub use packets::{
    CarDamagePacket, CarSetupPacket, CarStatusPacket, CarTelemetryPacket,
    FinalClassificationPacket, LapDataPacket, MotionPacket, Packet, PacketHeader, PacketKind,
    ParticipantsPacket, ProtocolVersion, SessionPacket, TyreSetsPacket, decode_header,
};
pub use projection::{Flatten, FlattenedRecord, project, project_player};

// Main API exports
pub use types::UpdateRate;

pub use connection::{ReplayConnection, UdpConnection};

/// Unified entry point for Pitlane telemetry connections.
///
/// This factory provides a consistent API for listening to the game over UDP
/// and for replaying captured datagrams.
///
/// # Examples
///
/// ## UDP
/// ```rust,no_run
/// use pitlane::{Pitlane, ReceiverConfig};
///
/// #[tokio::main]
/// async fn main() -> pitlane::Result<()> {
///     let connection = Pitlane::bind(ReceiverConfig::default()).await?;
///     // Use connection...
///     Ok(())
/// }
/// ```
///
/// ## Replay
/// ```rust,no_run
/// use pitlane::Pitlane;
///
/// #[tokio::main]
/// async fn main() {
///     let captured: Vec<Vec<u8>> = Vec::new();
///     let connection = Pitlane::replay(captured, 60.0);
///     // Use connection...
/// }
/// ```
pub struct Pitlane;

impl Pitlane {
    /// Listen for telemetry on the configured UDP address.
    ///
    /// Returns once the socket is bound. The game does not need to be
    /// running yet; packets stream as soon as it starts sending.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The address cannot be bound (already in use, not local)
    pub async fn bind(config: ReceiverConfig) -> Result<UdpConnection> {
        UdpConnection::bind(config).await
    }

    /// Listen with defaults overridden by `F1_UDP_SERVER_ADDRESS` and
    /// `F1_UDP_SERVER_PORT`.
    pub async fn listen() -> Result<UdpConnection> {
        UdpConnection::bind(ReceiverConfig::from_env()?).await
    }

    /// Replay captured datagrams paced at `source_hz`.
    ///
    /// Must be called within a tokio runtime.
    pub fn replay<I>(datagrams: I, source_hz: f64) -> ReplayConnection
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        ReplayConnection::new(datagrams, source_hz)
    }
}
