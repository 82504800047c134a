//! Range binning for histogram-style charts.
//!
//! Values are bucketed by `floor(v / step)`; each bucket becomes one row
//! labelled `"<low> to <high>"`.  The step is derived from the data spread
//! so roughly `steps` buckets appear, capped at `max_step`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::data::{DataPoint, Value};

/// One populated range.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeBin {
    pub low: f64,
    pub high: f64,
    pub count: usize,
    pub mean: f64,
}

impl RangeBin {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} to {}", self.low, self.high)
    }
}

/// `max(1, floor((max - min) / steps))`, capped at `max_step`.
#[must_use]
pub fn range_step(values: &[f64], steps: usize, max_step: f64) -> f64 {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() || steps == 0 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = ((hi - lo) / steps as f64).floor().max(1.0);
    raw.min(max_step.max(1.0))
}

/// Bucket `values` by `floor(v / step)`, lowest bucket first.
#[must_use]
pub fn bin_by_range(values: &[f64], step: f64) -> Vec<RangeBin> {
    #[allow(clippy::cast_possible_truncation)]
    let key = |v: f64| (v / step).floor() as i64;

    let mut buckets: BTreeMap<i64, (usize, f64)> = BTreeMap::new();
    for &v in values.iter().filter(|v| v.is_finite()) {
        let e = buckets.entry(key(v)).or_insert((0, 0.0));
        e.0 += 1;
        e.1 += v;
    }

    buckets
        .into_iter()
        .map(|(k, (count, sum))| {
            #[allow(clippy::cast_precision_loss)]
            let low = k as f64 * step;
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / count as f64;
            RangeBin {
                low,
                high: low + step,
                count,
                mean,
            }
        })
        .collect()
}

/// Average `value` per `key`, keys in ascending order.
#[must_use]
pub fn group_mean<K: Ord + Clone>(pairs: &[(K, f64)]) -> Vec<(K, f64)> {
    let mut groups: BTreeMap<K, (usize, f64)> = BTreeMap::new();
    for (k, v) in pairs {
        let e = groups.entry(k.clone()).or_insert((0, 0.0));
        e.0 += 1;
        e.1 += v;
    }
    groups
        .into_iter()
        .map(|(k, (n, sum))| {
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / n as f64;
            (k, mean)
        })
        .collect()
}

/// Collapse scalar rows sharing a label into one row holding their mean,
/// labels in ascending order.  Stacked rows have no single value to
/// average and are dropped.
#[must_use]
pub fn mean_by_label(points: &[DataPoint]) -> Vec<DataPoint> {
    let pairs: Vec<(&str, f64)> = points
        .iter()
        .filter_map(|p| match p.value() {
            Value::Scalar(v) => Some((p.label(), *v)),
            Value::Composite(_) => {
                debug!(label = p.label(), "not averaging stacked row");
                None
            }
        })
        .collect();
    group_mean(&pairs)
        .into_iter()
        .map(|(label, mean)| DataPoint::scalar(label, mean))
        .collect()
}

/// One row per bin, bar length = number of values in the range.
#[must_use]
pub fn count_points(bins: &[RangeBin]) -> Vec<DataPoint> {
    bins.iter()
        .map(|b| {
            #[allow(clippy::cast_precision_loss)]
            let count = b.count as f64;
            DataPoint::scalar(b.label(), count)
        })
        .collect()
}

/// One row per bin, bar length = mean of the values in the range.
#[must_use]
pub fn mean_points(bins: &[RangeBin]) -> Vec<DataPoint> {
    bins.iter()
        .map(|b| DataPoint::scalar(b.label(), b.mean))
        .collect()
}
