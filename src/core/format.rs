//! Number formatting with optional human-readable unit scaling.
//!
//! `999` stays `999`, `1000` becomes `1K` on the decimal ladder and
//! `1048576` becomes `1M` on the binary one.

use std::str::FromStr;

use crate::core::constants::{DEFAULT_PRECISION, UNIT_SUFFIXES};

/// Which divisor the unit ladder uses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnitScale {
    /// Values are printed as-is.
    #[default]
    Raw,
    /// Powers of 1000 (`K`, `M`, …).
    Decimal,
    /// Powers of 1024.
    Binary,
}

impl UnitScale {
    #[inline]
    #[must_use]
    pub const fn divider(self) -> Option<f64> {
        match self {
            Self::Raw => None,
            Self::Decimal => Some(1000.0),
            Self::Binary => Some(1024.0),
        }
    }
}

impl FromStr for UnitScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "none" => Ok(Self::Raw),
            "si" | "decimal" => Ok(Self::Decimal),
            "cs" | "binary" => Ok(Self::Binary),
            other => Err(format!("unknown unit scale `{other}` (raw, si, cs)")),
        }
    }
}

/// Fixed-point rendering of one magnitude.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NumberFormat {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Insert `,` every three integer digits.
    pub grouping: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            grouping: false,
        }
    }
}

impl NumberFormat {
    #[must_use]
    pub const fn new(precision: usize) -> Self {
        Self {
            precision,
            grouping: false,
        }
    }

    #[must_use]
    pub const fn grouped(mut self) -> Self {
        self.grouping = true;
        self
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let prec = self.precision;
        let plain = format!("{value:.prec$}");
        if self.grouping {
            group_thousands(&plain)
        } else {
            plain
        }
    }
}

/// `-1234567.50` -> `-1,234,567.50`
fn group_thousands(plain: &str) -> String {
    let (sign, body) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int, frac) = match body.find('.') {
        Some(dot) => body.split_at(dot),
        None => (body, ""),
    };

    let mut out = String::with_capacity(plain.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}

/// Render `value` with `fmt`, walking the unit ladder when `scale` asks for it.
///
/// Negative values are never scaled: the first division already yields a
/// candidate below one.
#[must_use]
pub fn format_value(value: f64, fmt: &NumberFormat, scale: UnitScale) -> String {
    let Some(divider) = scale.divider() else {
        return fmt.format(value);
    };

    let mut current = value;
    for suffix in UNIT_SUFFIXES {
        let candidate = current / divider;
        if candidate < 1.0 {
            let mut s = fmt.format(current);
            s.push_str(suffix);
            return s;
        }
        current = candidate;
    }

    // ladder exhausted: undo the last division and keep the top suffix
    let mut s = fmt.format(current * divider);
    s.push_str(UNIT_SUFFIXES[UNIT_SUFFIXES.len() - 1]);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn si(v: f64) -> String {
        format_value(v, &NumberFormat::default(), UnitScale::Decimal)
    }

    #[test]
    fn raw_values_are_rounded_to_integers() {
        let f = NumberFormat::default();
        assert_eq!(format_value(14.832, &f, UnitScale::Raw), "15");
        assert_eq!(format_value(-3.0, &f, UnitScale::Raw), "-3");
        assert_eq!(format_value(1_000_000.0, &f, UnitScale::Raw), "1000000");
    }

    #[test]
    fn decimal_ladder() {
        assert_eq!(si(999.0), "999");
        assert_eq!(si(1000.0), "1K");
        assert_eq!(si(2_600_000.0), "3M");
        assert_eq!(si(0.0), "0");
    }

    #[test]
    fn binary_ladder() {
        let f = NumberFormat::default();
        assert_eq!(format_value(1_048_576.0, &f, UnitScale::Binary), "1M");
        assert_eq!(format_value(1023.0, &f, UnitScale::Binary), "1023");
        assert_eq!(format_value(1536.0, &NumberFormat::new(1), UnitScale::Binary), "1.5K");
    }

    #[test]
    fn negatives_stay_unscaled() {
        assert_eq!(si(-5000.0), "-5000");
    }

    #[test]
    fn exhausted_ladder_keeps_last_suffix() {
        assert_eq!(si(1e27), "1000Y");
        assert_eq!(si(5e30), "5000000Y");
    }

    #[test]
    fn grouping_inserts_commas() {
        let f = NumberFormat::new(2).grouped();
        assert_eq!(f.format(1_234_567.5), "1,234,567.50");
        assert_eq!(f.format(-999.0), "-999.00");
        assert_eq!(f.format(-1000.0), "-1,000.00");
        assert_eq!(NumberFormat::default().grouped().format(100_000.0), "100,000");
    }

    #[test]
    fn unit_scale_parses_aliases() {
        assert_eq!("si".parse::<UnitScale>(), Ok(UnitScale::Decimal));
        assert_eq!("CS".parse::<UnitScale>(), Ok(UnitScale::Binary));
        assert_eq!("none".parse::<UnitScale>(), Ok(UnitScale::Raw));
        assert!("kilo".parse::<UnitScale>().is_err());
    }
}
