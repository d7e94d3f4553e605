//! Core types for telemetry data representation.
//!
//! This module provides the primitive building blocks the packet decoders
//! are written against:
//! - [`FieldType`] describes a wire field (width, signedness, float, text)
//! - [`Value`] holds one decoded scalar
//! - [`WireReader`] performs bounds-checked little-endian reads
//! - [`UpdateRate`] controls subscription rates
//! - [`Track`], [`SessionType`], [`Weather`], [`SurfaceType`] give names to raw ids
//!
//! ## Usage Example
//!
//! ```rust
//! use pitlane::types::{FieldType, Value, read_value};
//!
//! let data = [0x00, 0x00, 0x80, 0x3f, 0xfa, 0x00];
//! let (throttle, used) = read_value(&data, 0, FieldType::Float32).unwrap();
//! assert_eq!(throttle, Value::Float32(1.0));
//! assert_eq!(used, 4);
//!
//! let (speed, _) = read_value(&data, used, FieldType::UInt16).unwrap();
//! assert_eq!(speed, Value::UInt16(250));
//! ```

mod field_type;
mod ids;
mod update_rate;
mod wire;

pub use field_type::{FieldType, Value};
pub use ids::{
    SessionType, SurfaceType, Track, Weather, decode_session_type, decode_surface_type,
    decode_track, decode_weather,
};
pub use update_rate::UpdateRate;
pub use wire::{WireReader, ensure_len, read_value};
