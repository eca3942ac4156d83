//! Visual components of the battery meter.
//!
//! - [`meter`]: the battery widget itself - shell, fill, warning glyph, and
//!   percentage text, driven by one draw pass per frame.
//! - [`bolt`]: the charging bolt polygon with its frame-keyed path cache.

pub mod bolt;
pub mod meter;

pub use meter::{BatteryMeter, fill_fraction};
