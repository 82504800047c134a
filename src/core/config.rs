//! Run-time configuration object + fluent builder.

use crate::core::{
    color::{text_width, visible_width},
    constants::{
        DEFAULT_BAR_GLYPH, DEFAULT_LINE_LENGTH, DEFAULT_MIN_GRAPH_LENGTH,
        DEFAULT_SEPARATOR_LENGTH, DEFAULT_TITLE_BAR_GLYPH,
    },
    error::ConfigError,
    format::{NumberFormat, UnitScale, format_value},
};

/// Immutable parameters handed to the renderer.
///
/// Only obtainable through [`GraphConfigBuilder::build`] (or `Default`), so
/// the bar glyph is always exactly one column wide.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub(crate) line_length: usize,
    pub(crate) min_graph_length: usize,
    pub(crate) separator_length: usize,
    pub(crate) forced_max_value: Option<f64>,
    pub(crate) bar_glyph: String,
    pub(crate) multivalue_stacking: bool,
    pub(crate) unit_scale: UnitScale,
    pub(crate) number_format: NumberFormat,
    pub(crate) title_bar_glyph: String,
    pub(crate) colorize_values: bool,
}

impl GraphConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }

    #[must_use]
    pub fn line_length(&self) -> usize {
        self.line_length
    }
    #[must_use]
    pub fn min_graph_length(&self) -> usize {
        self.min_graph_length
    }
    #[must_use]
    pub fn separator_length(&self) -> usize {
        self.separator_length
    }
    #[must_use]
    pub fn forced_max_value(&self) -> Option<f64> {
        self.forced_max_value
    }
    #[must_use]
    pub fn bar_glyph(&self) -> &str {
        &self.bar_glyph
    }
    #[must_use]
    pub fn multivalue_stacking(&self) -> bool {
        self.multivalue_stacking
    }
    #[must_use]
    pub fn unit_scale(&self) -> UnitScale {
        self.unit_scale
    }
    #[must_use]
    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }
    #[must_use]
    pub fn title_bar_glyph(&self) -> &str {
        &self.title_bar_glyph
    }
    #[must_use]
    pub fn colorize_values(&self) -> bool {
        self.colorize_values
    }

    /// Format one magnitude the way the value column shows it.
    #[inline]
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        format_value(value, &self.number_format, self.unit_scale)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            min_graph_length: DEFAULT_MIN_GRAPH_LENGTH,
            separator_length: DEFAULT_SEPARATOR_LENGTH,
            forced_max_value: None,
            bar_glyph: DEFAULT_BAR_GLYPH.to_owned(),
            multivalue_stacking: true,
            unit_scale: UnitScale::Raw,
            number_format: NumberFormat::default(),
            title_bar_glyph: DEFAULT_TITLE_BAR_GLYPH.to_owned(),
            colorize_values: false,
        }
    }
}

/// Fluent builder; every field starts at its documented default.
#[derive(Debug, Default)]
pub struct GraphConfigBuilder {
    line_length: Option<usize>,
    min_graph_length: Option<usize>,
    separator_length: Option<usize>,
    forced_max_value: Option<f64>,
    bar_glyph: Option<String>,
    multivalue_stacking: Option<bool>,
    unit_scale: Option<UnitScale>,
    number_format: Option<NumberFormat>,
    title_bar_glyph: Option<String>,
    colorize_values: Option<bool>,
}

impl GraphConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn line_length(mut self, n: usize) -> Self {
        self.line_length = Some(n);
        self
    }
    #[inline]
    #[must_use]
    pub fn min_graph_length(mut self, n: usize) -> Self {
        self.min_graph_length = Some(n);
        self
    }
    #[inline]
    #[must_use]
    pub fn separator_length(mut self, n: usize) -> Self {
        self.separator_length = Some(n);
        self
    }
    #[inline]
    #[must_use]
    pub fn forced_max_value(mut self, v: f64) -> Self {
        self.forced_max_value = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn forced_max_value_opt(mut self, v: Option<f64>) -> Self {
        self.forced_max_value = v;
        self
    }
    #[inline]
    #[must_use]
    pub fn bar_glyph(mut self, g: impl Into<String>) -> Self {
        self.bar_glyph = Some(g.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn multivalue_stacking(mut self, on: bool) -> Self {
        self.multivalue_stacking = Some(on);
        self
    }
    #[inline]
    #[must_use]
    pub fn unit_scale(mut self, s: UnitScale) -> Self {
        self.unit_scale = Some(s);
        self
    }
    #[inline]
    #[must_use]
    pub fn number_format(mut self, f: NumberFormat) -> Self {
        self.number_format = Some(f);
        self
    }
    #[inline]
    #[must_use]
    pub fn precision(mut self, digits: usize) -> Self {
        let grouping = self.number_format.is_some_and(|f| f.grouping);
        self.number_format = Some(NumberFormat {
            precision: digits,
            grouping,
        });
        self
    }
    #[inline]
    #[must_use]
    pub fn title_bar_glyph(mut self, g: impl Into<String>) -> Self {
        self.title_bar_glyph = Some(g.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn colorize_values(mut self, on: bool) -> Self {
        self.colorize_values = Some(on);
        self
    }

    pub fn build(self) -> Result<GraphConfig, ConfigError> {
        let d = GraphConfig::default();

        let bar_glyph = self.bar_glyph.unwrap_or(d.bar_glyph);
        let width = visible_width(&bar_glyph);
        if width != 1 {
            return Err(ConfigError::BadGlyphWidth {
                glyph: bar_glyph,
                width,
            });
        }

        let title_bar_glyph = self.title_bar_glyph.unwrap_or(d.title_bar_glyph);
        if text_width(&title_bar_glyph) == 0 {
            return Err(ConfigError::EmptyTitleBar);
        }

        if let Some(v) = self.forced_max_value {
            if !v.is_finite() {
                return Err(ConfigError::BadForcedMax(v));
            }
        }

        Ok(GraphConfig {
            line_length: self.line_length.unwrap_or(d.line_length),
            min_graph_length: self.min_graph_length.unwrap_or(d.min_graph_length),
            separator_length: self.separator_length.unwrap_or(d.separator_length),
            forced_max_value: self.forced_max_value,
            bar_glyph,
            multivalue_stacking: self.multivalue_stacking.unwrap_or(d.multivalue_stacking),
            unit_scale: self.unit_scale.unwrap_or(d.unit_scale),
            number_format: self.number_format.unwrap_or(d.number_format),
            title_bar_glyph,
            colorize_values: self.colorize_values.unwrap_or(d.colorize_values),
        })
    }
}
