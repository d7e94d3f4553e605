//! Replay connection for captured datagrams

use futures::Stream;
use std::sync::Arc;
use tracing::info;

use super::PacketFeed;
use crate::adapters::PacketAdapter;
use crate::config::ReceiverConfig;
use crate::driver::Driver;
use crate::packets::Packet;
use crate::provider::Provider;
use crate::providers::ReplayProvider;
use crate::stream::RecordBuffer;
use crate::types::UpdateRate;

/// Connection replaying captured datagrams through the same decode path as UDP
pub struct ReplayConnection {
    feed: PacketFeed,
}

impl ReplayConnection {
    /// Replay `datagrams` paced at `source_hz`.
    ///
    /// Playback starts on the next scheduler turn, so subscribe before
    /// awaiting anything to see every packet.
    pub fn new<I>(datagrams: I, source_hz: f64) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self::from_provider(ReplayProvider::new(datagrams, source_hz))
    }

    /// Replay `datagrams` back to back without pacing.
    pub fn unpaced<I>(datagrams: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self::from_provider(ReplayProvider::unpaced(datagrams))
    }

    /// Start a replay from a configured provider, e.g. after
    /// [`set_speed`](ReplayProvider::set_speed).
    pub fn from_provider(provider: ReplayProvider) -> Self {
        let source_hz = provider.source_hz();
        let config = ReceiverConfig { source_hz, ..ReceiverConfig::default() };
        let remaining = provider.remaining();

        let channels = Driver::spawn(provider, &config);
        info!(datagrams = remaining, source_hz, "Replay connection opened");

        Self { feed: PacketFeed::new(channels, source_hz) }
    }

    /// Subscribe to packets adapted to `T`, at most `rate` per second
    pub fn subscribe<T>(&self, rate: UpdateRate) -> impl Stream<Item = T> + Send + Unpin + 'static
    where
        T: PacketAdapter + Send + 'static,
    {
        self.feed.subscribe(rate)
    }

    /// Every decoded packet, unthrottled
    pub fn packets(&self) -> impl Stream<Item = Arc<Packet>> + Send + 'static {
        self.feed.packets()
    }

    /// Most recently decoded packet of any kind
    pub fn latest(&self) -> Option<Arc<Packet>> {
        self.feed.latest()
    }

    /// Keep the newest `capacity` adapted records for polling consumers
    pub fn buffer<T>(&self, capacity: usize) -> Arc<RecordBuffer<T>>
    where
        T: PacketAdapter + Send + Sync + 'static,
    {
        self.feed.buffer(capacity)
    }

    /// Rate the datagrams were captured at
    pub fn source_hz(&self) -> f64 {
        self.feed.source_hz
    }

    /// Whether the replay is still feeding packets
    pub fn is_running(&self) -> bool {
        self.feed.is_running()
    }
}
