//! Column boundaries for one render call.
//!
//! ```text
//! |<------ bar_width ------>|sep|<- value ->|sep|<- label ... ->|
//! 0                     value_start     info_start         line_width
//! ```

use tracing::trace;

use crate::core::{bounds::Thresholds, config::GraphConfig};

/// Which sizing policy produced a [`Layout`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Regime {
    /// The target line length has room to spare; columns hug the right edge.
    Anchored,
    /// The target is too narrow; the minimum bar width wins and lines grow.
    Minimal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layout {
    pub regime: Regime,
    pub bar_width: usize,
    pub value_start: usize,
    pub info_start: usize,
    pub line_width: usize,
}

impl Layout {
    /// Narrowest line that still honours `min_graph_length`.
    #[inline]
    #[must_use]
    pub fn minimal_width(t: &Thresholds, cfg: &GraphConfig) -> usize {
        cfg.min_graph_length()
            .saturating_add(cfg.separator_length().saturating_mul(2))
            .saturating_add(t.value_width)
            .saturating_add(t.info_width)
    }

    /// A title longer than the target widens an anchored line; it never
    /// moves a column, and a minimal line keeps its width.
    #[must_use]
    pub fn plan(t: &Thresholds, cfg: &GraphConfig, title_width: usize) -> Self {
        let sep = cfg.separator_length();
        let minimal = Self::minimal_width(t, cfg);

        let layout = if minimal < cfg.line_length() {
            let info_start = cfg.line_length() - t.info_width;
            let value_start = info_start - sep - t.value_width;
            Self {
                regime: Regime::Anchored,
                bar_width: value_start - sep,
                value_start,
                info_start,
                line_width: cfg.line_length().max(title_width),
            }
        } else {
            let value_start = cfg.min_graph_length().saturating_add(sep);
            Self {
                regime: Regime::Minimal,
                bar_width: cfg.min_graph_length(),
                value_start,
                info_start: value_start.saturating_add(t.value_width).saturating_add(sep),
                line_width: minimal,
            }
        };

        trace!(?layout, minimal, "layout");
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(value_width: usize, info_width: usize) -> Thresholds {
        Thresholds {
            max_positive: 1.0,
            min_negative: 0.0,
            value_width,
            info_width,
        }
    }

    #[test]
    fn anchored_when_target_has_slack() {
        let l = Layout::plan(&thresholds(2, 5), &GraphConfig::default(), 0);
        assert_eq!(l.regime, Regime::Anchored);
        assert_eq!(l.info_start, 74);
        assert_eq!(l.value_start, 70);
        assert_eq!(l.bar_width, 68);
        assert_eq!(l.line_width, 79);
    }

    #[test]
    fn minimal_when_columns_do_not_fit() {
        let l = Layout::plan(&thresholds(10, 30), &GraphConfig::default(), 0);
        assert_eq!(l.regime, Regime::Minimal);
        assert_eq!(l.bar_width, 50);
        assert_eq!(l.value_start, 52);
        assert_eq!(l.info_start, 64);
        assert_eq!(l.line_width, 94);
    }

    #[test]
    fn exact_fit_uses_minimal_regime() {
        // 50 + 4 + 10 + 15 == 79
        let l = Layout::plan(&thresholds(10, 15), &GraphConfig::default(), 0);
        assert_eq!(l.regime, Regime::Minimal);
        assert_eq!(l.line_width, 79);
    }

    #[test]
    fn long_title_widens_line_only() {
        let t = thresholds(2, 5);
        let plain = Layout::plan(&t, &GraphConfig::default(), 0);
        let titled = Layout::plan(&t, &GraphConfig::default(), 120);
        assert_eq!(titled.line_width, 120);
        assert_eq!(titled.info_start, plain.info_start);
        assert_eq!(titled.bar_width, plain.bar_width);
    }

    #[test]
    fn long_title_leaves_minimal_line_alone() {
        let cfg = GraphConfig::builder()
            .line_length(12)
            .min_graph_length(10)
            .build()
            .unwrap();
        let l = Layout::plan(&thresholds(1, 1), &cfg, 40);
        assert_eq!(l.regime, Regime::Minimal);
        assert_eq!(l.line_width, 16);
    }

    #[test]
    fn huge_lengths_saturate_instead_of_overflowing() {
        let cfg = GraphConfig::builder()
            .min_graph_length(usize::MAX - 1)
            .separator_length(usize::MAX / 2 + 1)
            .build()
            .unwrap();
        let l = Layout::plan(&thresholds(3, 3), &cfg, 0);
        assert_eq!(l.regime, Regime::Minimal);
        assert_eq!(l.line_width, usize::MAX);
        assert_eq!(l.info_start, usize::MAX);
    }

    #[test]
    fn bar_never_below_minimum() {
        for info in 0..60 {
            let l = Layout::plan(&thresholds(4, info), &GraphConfig::default(), 0);
            assert!(l.bar_width >= 50, "info width {info}");
        }
    }
}
