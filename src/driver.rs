//! Driver spawns and manages the receive loop

use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::config::ReceiverConfig;
use crate::dispatch::decode_packet;
use crate::packets::Packet;
use crate::provider::Provider;

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Every decoded packet, in receive order
    ///
    /// Use [`resubscribe`](broadcast::Receiver::resubscribe) for further
    /// subscribers. Streams end once the receive loop stops.
    pub packets: broadcast::Receiver<Arc<Packet>>,
    /// Most recent decoded packet, `None` before the first one and after shutdown
    pub latest: watch::Receiver<Option<Arc<Packet>>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Counters reported when the receive loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiveStats {
    pub datagrams: u64,
    pub decoded: u64,
    pub skipped: u64,
}

/// Driver spawns and manages the receive loop
///
/// The spawned task owns the provider, decodes each datagram once, and fans
/// the shared result out to subscribers. A datagram that fails to decode is
/// logged and dropped; the loop never stops on bad input.
pub struct Driver;

impl Driver {
    /// Spawn the receive loop for the given provider
    pub fn spawn<P>(provider: P, config: &ReceiverConfig) -> DriverChannels
    where
        P: Provider,
    {
        let (packet_tx, packet_rx) = broadcast::channel(config.channel_capacity.max(1));
        let (latest_tx, latest_rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let max_errors = config.max_provider_errors.max(1);

        tokio::spawn(async move {
            Self::receive_task(provider, packet_tx, latest_tx, task_cancel, max_errors).await;
        });

        DriverChannels { packets: packet_rx, latest: latest_rx, cancel }
    }

    async fn receive_task<P>(
        mut provider: P,
        packet_tx: broadcast::Sender<Arc<Packet>>,
        latest_tx: watch::Sender<Option<Arc<Packet>>>,
        cancel: CancellationToken,
        max_errors: u32,
    ) -> ReceiveStats
    where
        P: Provider,
    {
        info!("Receive task started");
        let mut stats = ReceiveStats::default();
        let mut error_count = 0u32;

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Receive task cancelled");
                    break;
                }
                result = provider.next_datagram() => result,
            };

            match result {
                Ok(Some(datagram)) => {
                    stats.datagrams += 1;
                    error_count = 0;

                    let packet = match decode_packet(&datagram) {
                        Ok(packet) => Arc::new(packet),
                        Err(e) if e.is_skip() => {
                            stats.skipped += 1;
                            debug!(len = datagram.len(), error = %e, "Skipping datagram");
                            continue;
                        }
                        Err(e) => {
                            stats.skipped += 1;
                            warn!(
                                len = datagram.len(),
                                error = %e,
                                "Dropping undecodable datagram"
                            );
                            continue;
                        }
                    };
                    stats.decoded += 1;

                    trace!(
                        kind = %packet.kind(),
                        frame = packet.header().frame_identifier,
                        "Packet {}",
                        stats.decoded
                    );

                    // Errors only when no receiver is left
                    let _ = packet_tx.send(Arc::clone(&packet));
                    latest_tx.send_replace(Some(packet));
                }
                Ok(None) => {
                    info!("Provider ended after {} datagrams", stats.datagrams);
                    break;
                }
                Err(e) => {
                    error_count += 1;
                    error!("Provider error ({}/{}): {}", error_count, max_errors, e);

                    if error_count >= max_errors {
                        error!("Too many provider errors, shutting down");
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff = std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }

        latest_tx.send_replace(None);
        info!(
            datagrams = stats.datagrams,
            decoded = stats.decoded,
            skipped = stats.skipped,
            "Receive task ended"
        );
        stats
    }
}
