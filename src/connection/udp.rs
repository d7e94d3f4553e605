//! UDP telemetry connection

use futures::Stream;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use super::PacketFeed;
use crate::adapters::PacketAdapter;
use crate::config::ReceiverConfig;
use crate::driver::Driver;
use crate::packets::Packet;
use crate::provider::Provider;
use crate::providers::UdpProvider;
use crate::stream::RecordBuffer;
use crate::types::UpdateRate;
use crate::Result;

/// Connection receiving telemetry from the game over UDP
pub struct UdpConnection {
    feed: PacketFeed,
    local_addr: SocketAddr,
    update_rate: UpdateRate,
}

impl UdpConnection {
    /// Bind the configured socket and start the receive loop.
    ///
    /// Returns as soon as the socket is bound; packets flow once the game
    /// starts sending.
    pub async fn bind(config: ReceiverConfig) -> Result<Self> {
        let provider = UdpProvider::bind(&config).await?;
        let local_addr = provider.local_addr();
        let source_hz = provider.source_hz();

        let channels = Driver::spawn(provider, &config);
        info!(%local_addr, source_hz, "UDP connection established");

        let feed = PacketFeed::new(channels, source_hz);
        Ok(Self { feed, local_addr, update_rate: config.update_rate })
    }

    /// Subscribe to packets adapted to `T`, at most `rate` per second
    pub fn subscribe<T>(&self, rate: UpdateRate) -> impl Stream<Item = T> + Send + Unpin + 'static
    where
        T: PacketAdapter + Send + 'static,
    {
        self.feed.subscribe(rate)
    }

    /// Subscribe at the rate from the connection's configuration
    pub fn subscribe_default<T>(&self) -> impl Stream<Item = T> + Send + Unpin + 'static
    where
        T: PacketAdapter + Send + 'static,
    {
        self.feed.subscribe(self.update_rate)
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

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Nominal game send rate
    pub fn source_hz(&self) -> f64 {
        self.feed.source_hz
    }

    /// Whether the receive loop is still running
    pub fn is_running(&self) -> bool {
        self.feed.is_running()
    }
}
