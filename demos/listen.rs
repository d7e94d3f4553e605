//! Print a line per decoded packet from a running F1 game.
//!
//! ```text
//! cargo run --example listen                 # F1_UDP_SERVER_ADDRESS / F1_UDP_SERVER_PORT
//! cargo run --example listen -- receiver.yaml
//! RUST_LOG=pitlane=debug cargo run --example listen
//! ```

use anyhow::{Context, Result};
use futures::StreamExt;
use pitlane::{KindedRecord, Pitlane, ReceiverConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let yaml = std::fs::read_to_string(&path)
                .with_context(|| format!("reading receiver config {path}"))?;
            ReceiverConfig::from_yaml_str(&yaml)?
        }
        None => ReceiverConfig::from_env()?,
    };

    let connection = Pitlane::bind(config).await.context("binding telemetry socket")?;
    println!("Listening on {} ({} Hz source)", connection.local_addr(), connection.source_hz());

    let mut records = connection.subscribe_default::<KindedRecord>();
    while let Some(record) = records.next().await {
        let frame = record.record.get_f64("m_frame_identifier").unwrap_or_default();
        let fields = record.record.len();
        println!("{:>22} frame {frame:>8} {fields:>3} fields", record.collection_name());
    }

    Ok(())
}
