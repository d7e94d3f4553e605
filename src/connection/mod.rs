//! Connections own a running receive loop and hand packets to subscribers.
//!
//! [`UdpConnection`] listens on a socket, [`ReplayConnection`] feeds captured
//! datagrams. Both decode each datagram once and share the result, so any
//! number of subscriptions cost one decode per datagram. Dropping a
//! connection stops its receive loop.

use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::adapters::PacketAdapter;
use crate::driver::DriverChannels;
use crate::packets::Packet;
use crate::stream::{RecordBuffer, ThrottleExt};
use crate::types::UpdateRate;

mod replay;
mod udp;

pub use replay::ReplayConnection;
pub use udp::UdpConnection;

/// Subscriber side of a receive loop, shared by both connection types
struct PacketFeed {
    /// Template receiver; subscribers resubscribe from it
    packets: broadcast::Receiver<Arc<Packet>>,

    latest: watch::Receiver<Option<Arc<Packet>>>,

    source_hz: f64,

    cancel: CancellationToken,
}

impl PacketFeed {
    fn new(channels: DriverChannels, source_hz: f64) -> Self {
        let DriverChannels { packets, latest, cancel } = channels;
        Self { packets, latest, source_hz, cancel }
    }

    /// Every decoded packet from now on. Lagging subscribers lose the oldest
    /// packets and carry on.
    fn packets(&self) -> impl Stream<Item = Arc<Packet>> + Send + 'static {
        BroadcastStream::new(self.packets.resubscribe()).filter_map(|item| async move {
            match item {
                Ok(packet) => Some(packet),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagging, oldest packets dropped");
                    None
                }
            }
        })
    }

    fn subscribe<T>(&self, rate: UpdateRate) -> impl Stream<Item = T> + Send + Unpin + 'static
    where
        T: PacketAdapter + Send + 'static,
    {
        let accepted = self.packets().filter(|packet| {
            let keep = T::accepts(packet.kind());
            async move { keep }
        });

        match rate.throttle_interval(self.source_hz) {
            None => accepted.filter_map(|packet| async move { T::adapt(&packet) }).boxed(),
            Some(interval) => accepted
                .throttle(interval)
                .filter_map(|packet| async move { T::adapt(&packet) })
                .boxed(),
        }
    }

    fn latest(&self) -> Option<Arc<Packet>> {
        self.latest.borrow().clone()
    }

    fn buffer<T>(&self, capacity: usize) -> Arc<RecordBuffer<T>>
    where
        T: PacketAdapter + Send + Sync + 'static,
    {
        let buffer = Arc::new(RecordBuffer::new(capacity));
        let mut records = self.subscribe::<T>(UpdateRate::Native);
        let sink = Arc::clone(&buffer);
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    record = records.next() => match record {
                        Some(record) => {
                            sink.push(record);
                        }
                        None => break,
                    },
                }
            }
            debug!(evicted = sink.evicted(), "Record buffer filler stopped");
        });

        buffer
    }

    fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.latest.has_changed().is_ok()
    }
}

impl Drop for PacketFeed {
    fn drop(&mut self) {
        debug!("Dropping connection");
        self.cancel.cancel();
    }
}
