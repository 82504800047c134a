use clap::{Args, Parser, Subcommand};

use crate::core::{
    bounds::terminal_width,
    config::GraphConfig,
    constants::{
        DEFAULT_BAR_GLYPH, DEFAULT_MIN_GRAPH_LENGTH, DEFAULT_PRECISION, DEFAULT_SEPARATOR_LENGTH,
        DEFAULT_TITLE_BAR_GLYPH,
    },
    error::ConfigError,
    format::{NumberFormat, UnitScale},
};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "ascii-graph",
    about = "Horizontal bar charts rendered as plain text"
)]
pub struct Cli {
    /// Emit diagnostics on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Chart `label,value[,colour]` rows from a CSV file
    Csv(CsvArgs),
    /// Chart how many values fall in each range
    Histogram(HistogramArgs),
    /// Chart random data
    Demo(DemoArgs),
    /// Show available color names / hex syntax
    Colors,
    /// Print example invocations
    Examples,
}

/// Options shared by every chart-producing command.
#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    /// Target line width (defaults to the terminal width minus one)
    #[arg(short = 'w', long)]
    pub line_length: Option<usize>,

    /// Minimum width of the bar area
    #[arg(long, default_value_t = DEFAULT_MIN_GRAPH_LENGTH)]
    pub min_graph_length: usize,

    /// Blank columns between bar, value and label
    #[arg(long, default_value_t = DEFAULT_SEPARATOR_LENGTH)]
    pub separator: usize,

    /// Scale bars against at least this value
    #[arg(long)]
    pub max: Option<f64>,

    /// Bar glyph (exactly one column wide)
    #[arg(long, default_value = DEFAULT_BAR_GLYPH)]
    pub glyph: String,

    /// Show only the largest segment of stacked rows
    #[arg(long)]
    pub single_value: bool,

    /// Unit scaling: raw, si (1000) or cs (1024)
    #[arg(long, default_value = "raw")]
    pub units: UnitScale,

    /// Digits after the decimal point
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    /// Group thousands with `,`
    #[arg(long)]
    pub grouping: bool,

    /// Glyph repeated under the title
    #[arg(long, default_value = DEFAULT_TITLE_BAR_GLYPH)]
    pub title_bar: String,

    /// Colour the value column like its bar
    #[arg(long)]
    pub color_values: bool,
}

impl StyleArgs {
    pub fn to_config(&self) -> Result<GraphConfig, ConfigError> {
        let mut format = NumberFormat::new(self.precision);
        if self.grouping {
            format = format.grouped();
        }
        GraphConfig::builder()
            .line_length(
                self.line_length
                    .unwrap_or_else(|| terminal_width().saturating_sub(1)),
            )
            .min_graph_length(self.min_graph_length)
            .separator_length(self.separator)
            .forced_max_value_opt(self.max)
            .bar_glyph(self.glyph.as_str())
            .multivalue_stacking(!self.single_value)
            .unit_scale(self.units)
            .number_format(format)
            .title_bar_glyph(self.title_bar.as_str())
            .colorize_values(self.color_values)
            .build()
    }
}

/// `ascii-graph csv …`
#[derive(Parser, Debug)]
pub struct CsvArgs {
    /// CSV path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Graph title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Sort rows by value, largest first
    #[arg(long)]
    pub sort: bool,

    /// Average rows that share a label
    #[arg(long)]
    pub mean: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// `ascii-graph histogram …`
#[derive(Parser, Debug)]
pub struct HistogramArgs {
    /// One number per line, first CSV column (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Graph title
    #[arg(short, long, default_value = "count by range")]
    pub title: String,

    /// Approximate number of ranges
    #[arg(long, default_value_t = 7)]
    pub steps: usize,

    /// Upper bound for the range width
    #[arg(long, default_value_t = 5.0)]
    pub max_step: f64,

    /// Plot the mean of each range instead of its count
    #[arg(long)]
    pub mean: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// `ascii-graph demo …`
#[derive(Parser, Debug)]
pub struct DemoArgs {
    #[arg(long, default_value_t = 8)]
    pub rows: usize,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, help = "Three stacked, coloured segments per row")]
    pub stacked: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}
