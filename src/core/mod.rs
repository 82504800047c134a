//! Aggregates the "business logic" layer.

pub mod binner;
pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod rng;

// re-export frequently-used items for convenience
pub use bounds::Thresholds;
pub use color::{AnsiCode, ColorError, colorize, strip_ansi, text_width, visible_width};
pub use config::{GraphConfig, GraphConfigBuilder};
pub use data::{ColorTag, DataPoint, RawField, RawItem, Segment, Value, normalize};
pub use error::{ConfigError, GraphError};
pub use format::{NumberFormat, UnitScale, format_value};
