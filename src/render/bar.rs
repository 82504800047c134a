//! Glyph runs for one row's bar.
//!
//! Every row shares one reference frame: the zero column sits `neg_width`
//! cells from the left edge, negative runs grow leftwards from it and
//! positive runs grow rightwards.  The returned fragment is always exactly
//! `bar_width` columns wide once colour sequences are ignored.
//!
//! Stacked segments are absolute levels.  After sorting by distance from
//! zero, a segment's run covers the cells between the previous level and
//! its own, measured as `floor(after * scale) - floor(before * scale)`.
//! Differencing the floors keeps the total identical to a single run for
//! the outermost level, so no rounding error builds up along the stack.

use crate::core::{
    bounds::Thresholds,
    color::colorize_opt,
    data::{ColorTag, Segment, Value},
};

/// Shared scaling for every row of one render call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarScale {
    span: f64,
    width: usize,
    neg_width: usize,
    pos_width: usize,
}

impl BarScale {
    #[must_use]
    pub fn new(t: &Thresholds, width: usize) -> Self {
        let mut scale = Self {
            span: t.span(),
            width,
            neg_width: 0,
            pos_width: 0,
        };
        scale.neg_width = scale.run_len(t.min_negative);
        scale.pos_width = scale.run_len(t.max_positive);
        scale
    }

    /// `floor(|magnitude| * width / span)`, zero when the span is empty.
    #[inline]
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn run_len(&self, magnitude: f64) -> usize {
        if self.span <= 0.0 {
            return 0;
        }
        (magnitude.abs() * self.width as f64 / self.span).floor() as usize
    }

    /// Offset of the zero column inside the bar area.
    #[inline]
    #[must_use]
    pub fn neg_width(&self) -> usize {
        self.neg_width
    }
    #[inline]
    #[must_use]
    pub fn pos_width(&self) -> usize {
        self.pos_width
    }
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }
}

/// One coloured stretch of glyphs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Run {
    pub len: usize,
    pub color: Option<ColorTag>,
}

/// Runs on each side of the zero column, nearest to zero first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackPlan {
    pub negative: Vec<Run>,
    pub positive: Vec<Run>,
}

impl StackPlan {
    #[must_use]
    pub fn negative_len(&self) -> usize {
        self.negative.iter().map(|r| r.len).sum()
    }
    #[must_use]
    pub fn positive_len(&self) -> usize {
        self.positive.iter().map(|r| r.len).sum()
    }
}

/// Split `segs` around zero and size each run by the delta of floors.
#[must_use]
pub fn plan_stack(segs: &[Segment], scale: &BarScale) -> StackPlan {
    let mut sorted = segs.to_vec();
    sorted.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    let split = sorted.partition_point(|s| s.magnitude < 0.0);
    let (neg, pos) = sorted.split_at(split);

    StackPlan {
        negative: side_runs(neg.iter().rev(), scale),
        positive: side_runs(pos.iter(), scale),
    }
}

fn side_runs<'a>(segs: impl Iterator<Item = &'a Segment>, scale: &BarScale) -> Vec<Run> {
    let mut reached = 0;
    segs.map(|s| {
        let cells = scale.run_len(s.magnitude);
        let len = cells.saturating_sub(reached);
        reached = reached.max(cells);
        Run {
            len,
            color: s.color,
        }
    })
    .collect()
}

#[inline]
fn paint(out: &mut String, glyph: &str, run: &Run) {
    if run.len > 0 {
        out.push_str(&colorize_opt(run.color.as_ref(), &glyph.repeat(run.len)));
    }
}

#[inline]
fn pad(out: &mut String, n: usize) {
    out.extend(std::iter::repeat_n(' ', n));
}

/// Bar fragment for one value, exactly `scale.width()` visible columns.
#[must_use]
pub fn render_bar(
    value: &Value,
    color: Option<&ColorTag>,
    scale: &BarScale,
    glyph: &str,
) -> String {
    let neg = scale.neg_width();
    let mut out = String::with_capacity(scale.width() * glyph.len());

    match value {
        Value::Scalar(v) => {
            let run = Run {
                len: scale.run_len(*v),
                color: color.copied(),
            };
            if *v >= 0.0 {
                pad(&mut out, neg);
                paint(&mut out, glyph, &run);
                pad(&mut out, scale.width().saturating_sub(neg + run.len));
            } else {
                pad(&mut out, neg.saturating_sub(run.len));
                paint(&mut out, glyph, &run);
                pad(&mut out, scale.width().saturating_sub(neg));
            }
        }
        Value::Composite(segs) => {
            let plan = plan_stack(segs, scale);
            pad(&mut out, neg.saturating_sub(plan.negative_len()));
            for run in plan.negative.iter().rev() {
                paint(&mut out, glyph, run);
            }
            for run in &plan.positive {
                paint(&mut out, glyph, run);
            }
            pad(
                &mut out,
                scale
                    .width()
                    .saturating_sub(neg.max(plan.negative_len()) + plan.positive_len()),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{AnsiCode, strip_ansi, visible_width};

    const G: &str = "█";

    fn scale(max: f64, min: f64, width: usize) -> BarScale {
        BarScale::new(
            &Thresholds {
                max_positive: max,
                min_negative: min,
                ..Thresholds::default()
            },
            width,
        )
    }

    fn glyphs(s: &str) -> usize {
        strip_ansi(s).matches(G).count()
    }

    #[test]
    fn scalar_positive_starts_at_zero_column() {
        let sc = scale(10.0, -10.0, 20);
        assert_eq!(sc.neg_width(), 10);
        let bar = render_bar(&Value::Scalar(5.0), None, &sc, G);
        assert_eq!(bar, format!("{}{}{}", " ".repeat(10), G.repeat(5), " ".repeat(5)));
    }

    #[test]
    fn scalar_negative_ends_at_zero_column() {
        let sc = scale(10.0, -10.0, 20);
        let bar = render_bar(&Value::Scalar(-4.0), None, &sc, G);
        assert_eq!(bar, format!("{}{}{}", " ".repeat(6), G.repeat(4), " ".repeat(10)));
    }

    #[test]
    fn scalar_length_is_floored() {
        let sc = scale(3.0, 0.0, 10);
        assert_eq!(sc.run_len(1.0), 3);
        assert_eq!(sc.run_len(2.0), 6);
        assert_eq!(sc.run_len(3.0), 10);
    }

    #[test]
    fn empty_span_gives_blank_bars() {
        let sc = scale(0.0, 0.0, 12);
        for v in [Value::Scalar(0.0), Value::Composite(vec![Segment::new(0.0)])] {
            let bar = render_bar(&v, None, &sc, G);
            assert_eq!(bar, " ".repeat(12));
        }
    }

    #[test]
    fn colour_wraps_only_the_run() {
        let sc = scale(10.0, 0.0, 10);
        let bar = render_bar(&Value::Scalar(3.0), Some(&AnsiCode::red()), &sc, G);
        assert_eq!(bar, format!("\x1b[31m{}\x1b[0m{}", G.repeat(3), " ".repeat(7)));
    }

    #[test]
    fn stack_uses_delta_of_floors() {
        // scale = 10 / 3; naive per-segment floors would give 3 + 3 + 3 = 9
        let sc = scale(3.0, 0.0, 10);
        let segs = [Segment::new(1.0), Segment::new(2.0), Segment::new(3.0)];
        let plan = plan_stack(&segs, &sc);
        let lens: Vec<usize> = plan.positive.iter().map(|r| r.len).collect();
        assert_eq!(lens, vec![3, 3, 4]);
        assert_eq!(plan.positive_len(), sc.run_len(3.0));
    }

    #[test]
    fn stack_sorts_segments_and_splits_sides() {
        let sc = scale(10.0, -10.0, 20);
        let segs = [
            Segment::colored(-10.0, AnsiCode::blue()),
            Segment::new(8.0),
            Segment::colored(-4.0, AnsiCode::red()),
            Segment::new(2.0),
        ];
        let plan = plan_stack(&segs, &sc);
        assert_eq!(
            plan.negative,
            vec![
                Run { len: 4, color: Some(AnsiCode::red()) },
                Run { len: 6, color: Some(AnsiCode::blue()) },
            ]
        );
        let lens: Vec<usize> = plan.positive.iter().map(|r| r.len).collect();
        assert_eq!(lens, vec![2, 6]);

        let bar = render_bar(&Value::Composite(segs.to_vec()), None, &sc, G);
        // outermost negative segment is painted first, red sits next to zero
        assert!(bar.starts_with(&format!("\x1b[34m{}\x1b[0m\x1b[31m", G.repeat(6))));
        assert_eq!(visible_width(&bar), 20);
        assert_eq!(glyphs(&bar), 18);
    }

    #[test]
    fn composite_is_padded_to_full_width() {
        let sc = scale(100.0, -50.0, 30);
        let bar = render_bar(
            &Value::Composite(vec![Segment::new(10.0), Segment::new(-5.0)]),
            None,
            &sc,
            G,
        );
        assert_eq!(visible_width(&bar), 30);
        let zero = sc.neg_width();
        let plain = strip_ansi(&bar).into_owned();
        let cells: Vec<char> = plain.chars().collect();
        assert_eq!(cells[zero - 1], '█');
        assert_eq!(cells[zero], '█');
        assert_eq!(cells[zero - 2], ' ');
    }

    #[test]
    fn zero_segment_paints_nothing() {
        let sc = scale(5.0, 0.0, 10);
        let plan = plan_stack(&[Segment::new(0.0), Segment::new(5.0)], &sc);
        assert_eq!(plan.positive[0].len, 0);
        assert_eq!(plan.positive[1].len, 10);
    }
}
