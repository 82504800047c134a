//! A collection of constants.

/// Target width of a rendered line.
pub const DEFAULT_LINE_LENGTH: usize = 79;
/// The bar area never shrinks below this many columns.
pub const DEFAULT_MIN_GRAPH_LENGTH: usize = 50;
/// Blank columns between bar, value and label.
pub const DEFAULT_SEPARATOR_LENGTH: usize = 2;

/// Solid block, one display column wide.
pub const DEFAULT_BAR_GLYPH: &str = "█";
/// Rule printed under the title.
pub const DEFAULT_TITLE_BAR_GLYPH: &str = "#";

/// Numbers are rounded to integers unless told otherwise.
///
/// 14.832 becomes 15
pub const DEFAULT_PRECISION: usize = 0;

/// Separator between the values of a stacked row.
pub const VALUE_JOINER: char = ',';

/// Human-readable unit ladder, smallest first.
pub const UNIT_SUFFIXES: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Fallback when the terminal size cannot be queried.
pub const FALLBACK_TERMINAL_WIDTH: u16 = 80;
