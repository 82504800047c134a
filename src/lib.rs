//! Public-facing crate root – re-exports + one-shot helper.
//!
//! ```
//! use ascii_graph::{Graph, GraphConfig, RawItem};
//!
//! let graph = Graph::new(GraphConfig::default());
//! let lines = graph.render_raw(
//!     Some("rooms"),
//!     &[RawItem::from(("1 room", 12.0)), RawItem::from(("2 rooms", 30.0))],
//! );
//! assert_eq!(lines.len(), 4);
//! ```

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    binner::{RangeBin, bin_by_range, group_mean, mean_by_label, range_step},
    bounds::Thresholds,
    color::{AnsiCode, ColorError, colorize, strip_ansi, text_width, visible_width},
    config::{GraphConfig, GraphConfigBuilder},
    data::{
        ColorTag, DataPoint, ParseCsvError, RawField, RawItem, Segment, Value, normalize,
        read_csv, read_csv_from_path,
    },
    error::{ConfigError, GraphError},
    format::{NumberFormat, UnitScale, format_value},
};

pub use crate::render::{BarScale, Graph, Layout, Regime, plan_stack, render_bar};

/// Render `items` with the default configuration.
#[must_use]
pub fn graph(title: Option<&str>, items: &[RawItem]) -> Vec<String> {
    Graph::default().render_raw(title, items)
}
