//! Replay provider for captured datagrams

use std::collections::VecDeque;
use tokio::time::{Duration, Interval, MissedTickBehavior, interval};
use tracing::{debug, info, trace};

use crate::provider::Provider;
use crate::Result;

/// Replay provider that feeds previously captured datagrams
pub struct ReplayProvider {
    /// Datagrams not yet delivered, in capture order
    datagrams: VecDeque<Vec<u8>>,

    /// Capture size, for progress logging
    total: usize,

    /// Playback speed multiplier (1.0 = normal, 2.0 = double speed)
    speed: f64,

    /// Datagram pacing, `None` for as fast as possible
    interval: Option<Interval>,

    /// Rate the datagrams were captured at
    source_hz: f64,
}

impl ReplayProvider {
    /// Replay datagrams paced at `source_hz`.
    pub fn new<I>(datagrams: I, source_hz: f64) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let datagrams: VecDeque<_> = datagrams.into_iter().collect();
        let total = datagrams.len();
        let source_hz = if source_hz.is_finite() && source_hz > 0.0 { source_hz } else { 60.0 };

        info!("Replaying {} datagrams at {}Hz", total, source_hz);

        let mut provider = Self { datagrams, total, speed: 1.0, interval: None, source_hz };
        provider.interval = provider.pacing();
        provider
    }

    /// Replay datagrams back to back without pacing.
    pub fn unpaced<I>(datagrams: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut provider = Self::new(datagrams, 60.0);
        provider.interval = None;
        provider
    }

    /// Set playback speed
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.1, 10.0);
        if self.interval.is_some() {
            self.interval = self.pacing();
        }
        debug!("Playback speed set to {}x", self.speed);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Datagrams left to deliver
    pub fn remaining(&self) -> usize {
        self.datagrams.len()
    }

    /// Whether datagrams are delivered on a timer
    pub fn is_paced(&self) -> bool {
        self.interval.is_some()
    }

    /// Interval for the current rate; `None` when the period rounds to zero.
    fn pacing(&self) -> Option<Interval> {
        let period = Duration::from_secs_f64(1.0 / (self.source_hz * self.speed));
        if period.is_zero() {
            debug!(source_hz = self.source_hz, "Rate too high to pace, replaying unpaced");
            return None;
        }
        let mut pacing = interval(period);
        pacing.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(pacing)
    }
}

#[async_trait::async_trait]
impl Provider for ReplayProvider {
    async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>> {
        if self.datagrams.is_empty() {
            debug!("Reached end of replay");
            return Ok(None);
        }

        if let Some(pacing) = self.interval.as_mut() {
            pacing.tick().await;
        }

        let datagram = self.datagrams.pop_front();
        trace!("Datagram {}/{}", self.total - self.datagrams.len(), self.total);
        Ok(datagram)
    }

    fn source_hz(&self) -> f64 {
        self.source_hz
    }
}
