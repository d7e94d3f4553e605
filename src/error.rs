//! Error types for telemetry decoding.
//!
//! Every error produced while decoding a datagram is local to that datagram.
//! The receive loop logs it, drops the datagram and moves on; nothing in this
//! crate is fatal to the process.
//!
//! ## Error Categories
//!
//! - **Truncation**: the datagram is shorter than the layout being decoded
//! - **Skip signals**: unhandled packet ids and unsupported packet formats
//! - **Projection**: car index outside the fixed per-car array
//! - **Text**: fixed-width name fields that are not valid UTF-8
//! - **I/O and configuration**: socket and receive-loop setup failures
//!
//! ## Skipping vs failing
//!
//! ```rust
//! use pitlane::TelemetryError;
//!
//! let error = TelemetryError::UnhandledPacketType { packet_format: 2023, packet_id: 3 };
//! assert!(error.is_skip());
//!
//! let error = TelemetryError::truncated("car telemetry", 1352, 600);
//! assert!(!error.is_skip());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::str::Utf8Error;
use thiserror::Error;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("Truncated buffer while decoding {context}: need {needed} bytes, have {available}")]
    TruncatedBuffer { context: String, needed: usize, available: usize },

    #[error("No decoder registered for packet id {packet_id} (format {packet_format})")]
    UnhandledPacketType { packet_format: u16, packet_id: u8 },

    #[error("Unsupported packet format {found}")]
    UnsupportedFormat { found: u16 },

    #[error("Car index {index} out of range (array holds {len} cars)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Field '{field}' is not valid UTF-8")]
    InvalidText {
        field: String,
        #[source]
        source: Utf8Error,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid receiver configuration: {reason}")]
    Config { reason: String },
}

impl TelemetryError {
    /// Returns whether this error is a normal "not for us" signal rather than a fault.
    ///
    /// The stream carries packet types and formats a consumer may not decode;
    /// those datagrams are skipped silently.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            TelemetryError::UnhandledPacketType { .. } | TelemetryError::UnsupportedFormat { .. }
        )
    }

    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Datagrams are never retried, so only socket-level failures qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::Io { .. } => true,
            TelemetryError::TruncatedBuffer { .. } => false,
            TelemetryError::UnhandledPacketType { .. } => false,
            TelemetryError::UnsupportedFormat { .. } => false,
            TelemetryError::IndexOutOfRange { .. } => false,
            TelemetryError::InvalidText { .. } => false,
            TelemetryError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TelemetryError::TruncatedBuffer { .. } => vec![
                "Check the in-game UDP format matches a supported packet format",
                "Verify nothing between the game and this host truncates datagrams",
                "Raise the receive buffer size if it is below 2048 bytes",
            ],
            TelemetryError::UnhandledPacketType { .. } => {
                vec!["Ignore the datagram; this packet type has no decoder"]
            }
            TelemetryError::UnsupportedFormat { .. } => vec![
                "Set the in-game UDP format to 2023 or 2022",
                "Check that only telemetry senders target this port",
            ],
            TelemetryError::IndexOutOfRange { .. } => vec![
                "Check the player car index before projecting",
                "Spectator sessions report an index of 255; project a specific car instead",
            ],
            TelemetryError::InvalidText { .. } => {
                vec!["Treat the name as unknown; other fields are still valid"]
            }
            TelemetryError::Io { .. } => vec![
                "Check the bind address and port are free",
                "Verify firewall rules allow inbound UDP",
                "Retry after a short delay",
            ],
            TelemetryError::Config { .. } => vec![
                "Check configuration values against the documented defaults",
                "Remove overrides to fall back to defaults",
            ],
        }
    }

    /// Helper constructor for truncated buffer errors.
    pub fn truncated(context: impl Into<String>, needed: usize, available: usize) -> Self {
        TelemetryError::TruncatedBuffer { context: context.into(), needed, available }
    }

    /// Helper constructor for I/O errors with context.
    pub fn io_error(context: impl Into<String>, source: std::io::Error) -> Self {
        TelemetryError::Io { context: context.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        TelemetryError::Config { reason: reason.into() }
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::Io { context: "<unknown>".to_string(), source: err }
    }
}
