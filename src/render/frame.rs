//! Line composer: bar + value + label per row, plus the optional header.
//!
//! A [`Graph`] owns nothing but its immutable [`GraphConfig`]; thresholds
//! and layout are recomputed on every call, so one instance can be shared
//! freely across threads.

use std::io::Write;

use tracing::debug;

use crate::{
    core::{
        bounds::{Thresholds, extreme_segment},
        color::{colorize_opt, strip_ansi, text_width},
        config::GraphConfig,
        constants::VALUE_JOINER,
        data::{ColorTag, DataPoint, RawItem, Value, normalize},
        error::GraphError,
    },
    render::{
        bar::{BarScale, render_bar},
        layout::Layout,
    },
};

#[inline]
fn push_spaces(buf: &mut String, n: usize) {
    buf.extend(std::iter::repeat_n(' ', n));
}

/// Title rule of exactly `width` characters, cycling through the glyph.
fn title_bar(glyph: &str, width: usize) -> String {
    let plain = strip_ansi(glyph);
    if plain.is_empty() {
        return " ".repeat(width);
    }
    plain.chars().cycle().take(width).collect()
}

/// Stateless bar-chart renderer.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    cfg: GraphConfig,
}

impl Graph {
    #[inline]
    #[must_use]
    pub fn new(cfg: GraphConfig) -> Self {
        Self { cfg }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.cfg
    }

    /// Normalize loosely shaped items, then render them.
    #[must_use]
    pub fn render_raw(&self, title: Option<&str>, items: &[RawItem]) -> Vec<String> {
        self.render(title, &normalize(items))
    }

    /// Render `points` into lines: title + rule (when a title is given),
    /// then one line per point in input order.
    #[must_use]
    pub fn render(&self, title: Option<&str>, points: &[DataPoint]) -> Vec<String> {
        let t = Thresholds::scan(points, &self.cfg);
        let title_width = title.map_or(0, text_width);
        let layout = Layout::plan(&t, &self.cfg, title_width);
        let scale = BarScale::new(&t, layout.bar_width);

        let mut lines = Vec::with_capacity(points.len() + 2);
        if let Some(title) = title {
            lines.push(title.to_owned());
            lines.push(title_bar(self.cfg.title_bar_glyph(), layout.line_width));
        }
        lines.extend(points.iter().map(|p| self.compose_row(p, &layout, &scale)));

        debug!(
            rows = points.len(),
            width = layout.line_width,
            regime = ?layout.regime,
            "rendered graph"
        );
        lines
    }

    /// Render and write every line, newline-terminated, to `out`.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        title: Option<&str>,
        points: &[DataPoint],
    ) -> Result<(), GraphError> {
        for line in self.render(title, points) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn compose_row(&self, p: &DataPoint, layout: &Layout, scale: &BarScale) -> String {
        let mut line = render_bar(p.value(), p.color(), scale, self.cfg.bar_glyph());
        push_spaces(&mut line, layout.value_start - layout.bar_width);

        // value column: right-aligned, trailing separator
        let (text, text_width) = self.value_text(p);
        let area = layout.info_start - layout.value_start;
        let lead = area.saturating_sub(text_width + self.cfg.separator_length());
        push_spaces(&mut line, lead);
        line.push_str(&text);
        push_spaces(&mut line, area.saturating_sub(text_width + lead));

        // label column: left-aligned, padded to the full line
        line.push_str(p.label());
        push_spaces(
            &mut line,
            layout
                .line_width
                .saturating_sub(layout.info_start + crate::core::color::text_width(p.label())),
        );
        line
    }

    /// Value column text and its visible width.
    fn value_text(&self, p: &DataPoint) -> (String, usize) {
        let paint = |v: f64, color: Option<&ColorTag>| {
            let s = self.cfg.format_value(v);
            let w = text_width(&s);
            let color = if self.cfg.colorize_values() { color } else { None };
            (colorize_opt(color, &s), w)
        };

        match p.value() {
            Value::Scalar(v) => paint(*v, p.color()),
            Value::Composite(segs) if self.cfg.multivalue_stacking() => {
                let mut text = String::new();
                let mut width = 0;
                for (i, s) in segs.iter().enumerate() {
                    if i > 0 {
                        text.push(VALUE_JOINER);
                        width += 1;
                    }
                    let (part, w) = paint(s.magnitude, s.color.as_ref());
                    text.push_str(&part);
                    width += w;
                }
                (text, width)
            }
            Value::Composite(segs) => {
                extreme_segment(segs).map_or((String::new(), 0), |s| {
                    paint(s.magnitude, s.color.as_ref())
                })
            }
        }
    }
}
