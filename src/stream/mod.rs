//! Stream combinators and hand-off buffers for packet consumers

mod buffer;
mod throttle;

pub use buffer::RecordBuffer;
pub use throttle::{Throttle, ThrottleExt};
