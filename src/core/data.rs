//! Data-point model, the permissive normalizer, and a small CSV loader.
//!
//! Callers hand over loosely shaped [`RawItem`]s (a label, a value and an
//! optional colour, just like a tuple) and get back canonical
//! [`DataPoint`]s.  Items that do not have two or three fields are skipped
//! silently; that is part of the contract, not an error path.

use std::{
    borrow::Cow,
    io::{BufRead, BufReader, Read},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::color::AnsiCode;

/// Colour attached to a bar or a segment.
pub type ColorTag = AnsiCode;


/// One slice of a stacked bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub magnitude: f64,
    pub color: Option<ColorTag>,
}

impl Segment {
    #[must_use]
    pub const fn new(magnitude: f64) -> Self {
        Self {
            magnitude,
            color: None,
        }
    }
    #[must_use]
    pub const fn colored(magnitude: f64, color: ColorTag) -> Self {
        Self {
            magnitude,
            color: Some(color),
        }
    }
}

/// Either a single magnitude or several stacked segments, in supplied order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(f64),
    Composite(Vec<Segment>),
}

/// One chart row.  Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    label: String,
    value: Value,
    color: Option<ColorTag>,
}

impl DataPoint {
    #[must_use]
    pub fn scalar(label: impl Into<String>, magnitude: f64) -> Self {
        Self {
            label: label.into(),
            value: Value::Scalar(magnitude),
            color: None,
        }
    }

    #[must_use]
    pub fn composite(label: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            label: label.into(),
            value: Value::Composite(segments),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
    #[inline]
    #[must_use]
    pub fn color(&self) -> Option<&ColorTag> {
        self.color.as_ref()
    }
}


/// One loosely typed field of an input item.
#[derive(Clone, Debug, PartialEq)]
pub enum RawField {
    Text(String),
    Number(f64),
    /// Segments of a stacked value, each `(magnitude)` or `(magnitude, colour)`.
    Series(Vec<RawItem>),
}

/// A tuple-like input item; its arity decides whether it survives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawItem(pub Vec<RawField>);

impl RawItem {
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}
impl From<String> for RawField {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
impl From<f64> for RawField {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}
impl From<i32> for RawField {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}
impl From<u32> for RawField {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}
impl From<Vec<RawItem>> for RawField {
    fn from(v: Vec<RawItem>) -> Self {
        Self::Series(v)
    }
}
impl From<Vec<RawField>> for RawItem {
    fn from(v: Vec<RawField>) -> Self {
        Self(v)
    }
}
impl<A: Into<RawField>> From<(A,)> for RawItem {
    fn from((a,): (A,)) -> Self {
        Self(vec![a.into()])
    }
}
impl<A: Into<RawField>, B: Into<RawField>> From<(A, B)> for RawItem {
    fn from((a, b): (A, B)) -> Self {
        Self(vec![a.into(), b.into()])
    }
}
impl<A: Into<RawField>, B: Into<RawField>, C: Into<RawField>> From<(A, B, C)> for RawItem {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self(vec![a.into(), b.into(), c.into()])
    }
}


/// Coerce raw items into data points, preserving order.
///
/// Skipped without error: items whose arity is not 2 or 3, items whose
/// label is a series, and items whose value is not a finite number or a
/// series.  An unusable colour is dropped but the item is kept.
#[must_use]
pub fn normalize(items: &[RawItem]) -> Vec<DataPoint> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| normalize_item(index, item))
        .collect()
}

fn normalize_item(index: usize, item: &RawItem) -> Option<DataPoint> {
    let (label, value, color) = match item.0.as_slice() {
        [label, value] => (label, value, None),
        [label, value, color] => (label, value, Some(color)),
        other => {
            debug!(index, arity = other.len(), "skipping item: need 2 or 3 fields");
            return None;
        }
    };

    let Some(label) = field_text(label) else {
        debug!(index, "skipping item: label is not text");
        return None;
    };

    let value = match value {
        RawField::Series(segments) => Value::Composite(
            segments
                .iter()
                .filter_map(|s| normalize_segment(index, s))
                .collect(),
        ),
        field => {
            let Some(v) = field_number(field) else {
                debug!(index, %label, "skipping item: value is not a finite number");
                return None;
            };
            Value::Scalar(v)
        }
    };

    Some(DataPoint {
        label: label.into_owned(),
        value,
        color: color.and_then(|c| field_color(index, c)),
    })
}

fn normalize_segment(index: usize, seg: &RawItem) -> Option<Segment> {
    let Some(first) = seg.0.first() else {
        debug!(index, "dropping empty segment");
        return None;
    };
    let Some(magnitude) = field_number(first) else {
        debug!(index, "dropping segment: magnitude is not a finite number");
        return None;
    };
    Some(Segment {
        magnitude,
        color: seg.0.get(1).and_then(|c| field_color(index, c)),
    })
}

fn field_text(f: &RawField) -> Option<Cow<'_, str>> {
    match f {
        RawField::Text(s) => Some(Cow::Borrowed(s)),
        RawField::Number(v) => Some(Cow::Owned(v.to_string())),
        RawField::Series(_) => None,
    }
}

fn field_number(f: &RawField) -> Option<f64> {
    let v = match f {
        RawField::Number(v) => *v,
        RawField::Text(s) => {
            let mut buf = s.as_bytes().to_vec();
            normalize_unicode_minus(&mut buf);
            lexical_core::parse::<f64>(trim(&buf)).ok()?
        }
        RawField::Series(_) => return None,
    };
    v.is_finite().then_some(v)
}

fn field_color(index: usize, f: &RawField) -> Option<ColorTag> {
    let parsed = match f {
        RawField::Text(s) if s.trim().is_empty() => return None,
        RawField::Text(s) => AnsiCode::from_name(s).map_err(|e| e.to_string()),
        RawField::Number(n) if n.fract() == 0.0 && (0.0..=255.0).contains(n) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Ok(AnsiCode::indexed(*n as u8))
        }
        RawField::Number(n) => Err(format!("palette index {n} out of range")),
        RawField::Series(_) => Err("a series is not a colour".to_owned()),
    };
    parsed
        .inspect_err(|reason| warn!(index, %reason, "ignoring colour tag"))
        .ok()
}

#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {field} value '{text}'")]
    BadFloat { field: &'static str, text: String },
    #[error("no data rows")]
    Empty,
}

#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while !b.is_empty() && b[0].is_ascii_whitespace() {
        b = &b[1..];
    }
    while !b.is_empty() && b[b.len() - 1].is_ascii_whitespace() {
        b = &b[..b.len() - 1];
    }
    b
}

/// Rewrite U+2212 MINUS SIGN as an ASCII hyphen, in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize, field: &'static str) -> Result<f64, ParseCsvError> {
    let bad = || ParseCsvError {
        line,
        kind: ParseErrorKind::BadFloat {
            field,
            text: String::from_utf8_lossy(bytes).into_owned(),
        },
    };
    let val = lexical_core::parse::<f64>(trim(bytes)).map_err(|_| bad())?;
    if val.is_finite() { Ok(val) } else { Err(bad()) }
}

/// `12.5@red;30@#00ff00;4` -> one raw segment per `;`-separated part.
fn parse_series(field: &[u8], line: usize) -> Result<RawField, ParseCsvError> {
    let mut segments = Vec::new();
    for part in field.split(|&b| b == b';') {
        let part = trim(part);
        if part.is_empty() {
            continue;
        }
        let mut seg = Vec::with_capacity(2);
        match part.iter().position(|&b| b == b'@') {
            Some(at) => {
                seg.push(RawField::Number(parse_f64(&part[..at], line, "segment")?));
                seg.push(RawField::Text(
                    String::from_utf8_lossy(trim(&part[at + 1..])).into_owned(),
                ));
            }
            None => seg.push(RawField::Number(parse_f64(part, line, "segment")?)),
        }
        segments.push(RawItem(seg));
    }
    Ok(RawField::Series(segments))
}

// --- CSV ingest ---
const BUF_CAP: usize = 1 << 16;

#[inline]
fn read_line<R: BufRead>(
    rdr: &mut R,
    buf: &mut Vec<u8>,
    line_no: usize,
) -> Result<bool, ParseCsvError> {
    buf.clear();
    let n = rdr.read_until(b'\n', buf).map_err(|e| ParseCsvError {
        line: line_no,
        kind: ParseErrorKind::Io(e),
    })?;
    if buf.ends_with(b"\n") {
        buf.pop();
    }
    if buf.ends_with(b"\r") {
        buf.pop();
    }
    normalize_unicode_minus(buf);
    Ok(n != 0)
}

/// Read `label,value[,colour]` rows.
///
/// The value column holds either one number or `;`-separated segments,
/// each optionally tagged `@colour`.  Rows with the wrong number of
/// columns are passed through so the normalizer can drop them; a first
/// row whose value does not parse is treated as a header.
pub fn read_csv<R: Read>(src: R) -> Result<Vec<RawItem>, ParseCsvError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut items = Vec::<RawItem>::new();
    let mut saw_first = false;
    let mut line_no = 0usize;

    while read_line(&mut rdr, &mut buf, line_no + 1)? {
        line_no += 1;
        if trim(&buf).is_empty() || buf[0] == b'#' {
            continue;
        }

        let cols: Vec<&[u8]> = buf.split(|&b| b == b',').collect();
        let first_row = !saw_first;
        saw_first = true;

        let mut fields = Vec::with_capacity(cols.len());
        for (i, col) in cols.iter().enumerate() {
            let field = match i {
                1 if col.contains(&b';') || col.contains(&b'@') => parse_series(col, line_no),
                1 => parse_f64(col, line_no, "value").map(RawField::Number),
                _ => Ok(RawField::Text(
                    String::from_utf8_lossy(trim(col)).into_owned(),
                )),
            };
            match field {
                Ok(f) => fields.push(f),
                // simple header detection (non-numeric value on the first row)
                Err(_) if first_row => {
                    fields.clear();
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        if !fields.is_empty() {
            items.push(RawItem(fields));
        }
    }

    if items.is_empty() {
        return Err(ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::Empty,
        });
    }
    Ok(items)
}

/// Read the first column of every row as a number (histogram input).
pub fn read_values<R: Read>(src: R) -> Result<Vec<f64>, ParseCsvError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(64);
    let mut values = Vec::new();
    let mut line_no = 0usize;

    while read_line(&mut rdr, &mut buf, line_no + 1)? {
        line_no += 1;
        if trim(&buf).is_empty() || buf[0] == b'#' {
            continue;
        }
        let first = buf.split(|&b| b == b',').next().unwrap_or_default();
        match parse_f64(first, line_no, "value") {
            Ok(v) => values.push(v),
            Err(_) if values.is_empty() => {} // header
            Err(e) => return Err(e),
        }
    }

    if values.is_empty() {
        return Err(ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::Empty,
        });
    }
    Ok(values)
}

fn open_path(path: &str) -> Result<Box<dyn Read>, ParseCsvError> {
    if path == "-" {
        Ok(Box::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(path).map_err(|e| ParseCsvError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?;
        Ok(Box::new(file))
    }
}

pub fn read_csv_from_path(path: &str) -> Result<Vec<RawItem>, ParseCsvError> {
    read_csv(open_path(path)?)
}

pub fn read_values_from_path(path: &str) -> Result<Vec<f64>, ParseCsvError> {
    read_values(open_path(path)?)
}
