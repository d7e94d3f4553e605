//! Provider trait for datagram sources

use crate::Result;

/// Trait for datagram sources
///
/// Providers abstract over where raw datagrams come from (a UDP socket, an
/// in-memory capture) and handle their own timing internally. Decoding
/// happens in the driver, never in the provider.
#[async_trait::async_trait]
pub trait Provider: Send + 'static {
    /// Get the next raw datagram
    ///
    /// Returns:
    /// - `Ok(Some(bytes))` - Datagram received
    /// - `Ok(None)` - Source ended (normal termination)
    /// - `Err(e)` - Error occurred
    ///
    /// Each provider handles timing internally:
    /// - UDP: Waits on the socket
    /// - Replay: Paces datagrams at the configured rate
    async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>>;

    /// Get the nominal send rate in Hz
    ///
    /// Used to normalize subscription rates.
    fn source_hz(&self) -> f64;
}
