//! Global extrema + column widths, and terminal size plumbing.

use terminal_size::{Width, terminal_size};
use tracing::trace;

use crate::core::{
    color::text_width,
    config::GraphConfig,
    constants::FALLBACK_TERMINAL_WIDTH,
    data::{DataPoint, Segment, Value},
};

/// What one render call learns from scanning its data set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Thresholds {
    /// Largest magnitude seen, never below zero (or the forced maximum).
    pub max_positive: f64,
    /// Smallest magnitude seen, never above zero.
    pub min_negative: f64,
    /// Widest formatted value column.
    pub value_width: usize,
    /// Widest label, colour sequences excluded.
    pub info_width: usize,
}

impl Thresholds {
    /// Scan every point once.
    ///
    /// Composite points contribute each segment's own magnitude to the
    /// extrema; segments are never summed.
    #[must_use]
    pub fn scan(points: &[DataPoint], cfg: &GraphConfig) -> Self {
        let mut t = Self {
            max_positive: cfg.forced_max_value().unwrap_or(0.0).max(0.0),
            ..Self::default()
        };

        for p in points {
            let value_width = match p.value() {
                Value::Scalar(v) => {
                    t.observe(*v);
                    text_width(&cfg.format_value(*v))
                }
                Value::Composite(segs) => {
                    for s in segs {
                        t.observe(s.magnitude);
                    }
                    composite_value_width(segs, cfg)
                }
            };
            t.value_width = t.value_width.max(value_width);
            t.info_width = t.info_width.max(text_width(p.label()));
        }

        trace!(?t, points = points.len(), "thresholds");
        t
    }

    #[inline]
    fn observe(&mut self, v: f64) {
        if v > self.max_positive {
            self.max_positive = v;
        }
        if v < self.min_negative {
            self.min_negative = v;
        }
    }

    /// `max_positive + |min_negative|`, the range one bar area represents.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max_positive + self.min_negative.abs()
    }
}

/// Width of the value column text for a stacked row.
#[must_use]
pub fn composite_value_width(segs: &[Segment], cfg: &GraphConfig) -> usize {
    if cfg.multivalue_stacking() {
        let digits: usize = segs
            .iter()
            .map(|s| text_width(&cfg.format_value(s.magnitude)))
            .sum();
        digits + segs.len().saturating_sub(1)
    } else {
        extreme_segment(segs).map_or(0, |s| text_width(&cfg.format_value(s.magnitude)))
    }
}

/// The segment with the largest absolute magnitude (first one on ties).
#[must_use]
pub fn extreme_segment(segs: &[Segment]) -> Option<&Segment> {
    segs.iter().reduce(|best, s| {
        if s.magnitude.abs() > best.magnitude.abs() {
            s
        } else {
            best
        }
    })
}

/// Current terminal width (80 column fallback).
#[inline]
#[must_use]
pub fn terminal_width() -> usize {
    let Width(w) = terminal_size().map_or(Width(FALLBACK_TERMINAL_WIDTH), |(w, _)| w);
    usize::from(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{color::AnsiCode, format::UnitScale};

    fn cfg() -> GraphConfig {
        GraphConfig::default()
    }

    #[test]
    fn scalar_extrema_and_widths() {
        let pts = [
            DataPoint::scalar("short", 12.0),
            DataPoint::scalar("a longer one", -345.0),
        ];
        let t = Thresholds::scan(&pts, &cfg());
        assert_eq!(t.max_positive, 12.0);
        assert_eq!(t.min_negative, -345.0);
        assert_eq!(t.value_width, 4);
        assert_eq!(t.info_width, 12);
        assert_eq!(t.span(), 357.0);
    }

    #[test]
    fn all_positive_keeps_zero_floor() {
        let t = Thresholds::scan(&[DataPoint::scalar("a", 5.0)], &cfg());
        assert_eq!(t.min_negative, 0.0);
        let t = Thresholds::scan(&[DataPoint::scalar("a", -5.0)], &cfg());
        assert_eq!(t.max_positive, 0.0);
    }

    #[test]
    fn forced_max_seeds_and_is_raised() {
        let c = GraphConfig::builder().forced_max_value(100.0).build().unwrap();
        let t = Thresholds::scan(&[DataPoint::scalar("a", 5.0)], &c);
        assert_eq!(t.max_positive, 100.0);
        let t = Thresholds::scan(&[DataPoint::scalar("a", 500.0)], &c);
        assert_eq!(t.max_positive, 500.0);

        let below_zero = GraphConfig::builder().forced_max_value(-3.0).build().unwrap();
        let t = Thresholds::scan(&[DataPoint::scalar("a", -1.0)], &below_zero);
        assert_eq!(t.max_positive, 0.0);
    }

    /// Extrema come from individual segments, not from their running sum.
    #[test]
    fn composite_extrema_are_per_segment_not_summed() {
        let pts = [DataPoint::composite(
            "stack",
            vec![Segment::new(30.0), Segment::new(40.0), Segment::new(-5.0)],
        )];
        let t = Thresholds::scan(&pts, &cfg());
        assert_eq!(t.max_positive, 40.0);
        assert_eq!(t.min_negative, -5.0);
    }

    #[test]
    fn stacked_value_width_is_comma_joined_length() {
        let pts = [DataPoint::composite(
            "s",
            vec![Segment::new(1.0), Segment::new(200.0), Segment::new(-30.0)],
        )];
        // "1,200,-30"
        assert_eq!(Thresholds::scan(&pts, &cfg()).value_width, 9);

        let single = GraphConfig::builder().multivalue_stacking(false).build().unwrap();
        // "200"
        assert_eq!(Thresholds::scan(&pts, &single).value_width, 3);
    }

    #[test]
    fn empty_composite_has_zero_width() {
        let pts = [DataPoint::composite("none", vec![])];
        assert_eq!(Thresholds::scan(&pts, &cfg()).value_width, 0);
    }

    #[test]
    fn label_width_ignores_colour_sequences() {
        let label = format!("{}ok", AnsiCode::red());
        let t = Thresholds::scan(&[DataPoint::scalar(label, 1.0)], &cfg());
        assert_eq!(t.info_width, 2);
    }

    #[test]
    fn widths_follow_unit_scaling() {
        let c = GraphConfig::builder().unit_scale(UnitScale::Decimal).build().unwrap();
        let t = Thresholds::scan(&[DataPoint::scalar("a", 1_500_000.0)], &c);
        // "2M"
        assert_eq!(t.value_width, 2);
    }

    #[test]
    fn extreme_prefers_magnitude_then_first() {
        let segs = [Segment::new(3.0), Segment::new(-7.0), Segment::new(7.0)];
        assert_eq!(extreme_segment(&segs).unwrap().magnitude, -7.0);
        assert!(extreme_segment(&[]).is_none());
    }
}
