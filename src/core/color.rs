//! Zero-alloc ANSI colour tags plus escape-aware width measurement.

use std::{borrow::Cow, fmt, str};

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

const ESC: char = '\x1b';
const INLINE_CAP: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
    #[error("unknown colour `{0}`")]
    UnknownName(String),
    #[error("escape sequence longer than {INLINE_CAP} bytes")]
    EscapeTooLong,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; INLINE_CAP], len: u8 },
}

impl AnsiCode {
    pub const fn black() -> Self {
        Self::Static("\x1b[30m")
    }
    pub const fn red() -> Self {
        Self::Static("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self::Static("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self::Static("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self::Static("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self::Static("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self::Static("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self::Static("\x1b[37m")
    }
    pub const fn orange() -> Self {
        Self::Static("\x1b[38;2;210;135;10m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; INLINE_CAP];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::inline(buf, len)
    }

    /// 256-colour palette escape `ESC[38;5;Nm`.
    #[must_use]
    pub fn indexed(n: u8) -> Self {
        let mut buf = [0u8; INLINE_CAP];
        buf[..7].copy_from_slice(b"\x1b[38;5;");
        let mut len = 7 + write_u8(&mut buf[7..], n);
        buf[len] = b'm';
        len += 1;
        Self::inline(buf, len)
    }

    /// Keep a caller-supplied escape sequence verbatim.
    pub fn from_escape(seq: &str) -> Result<Self, ColorError> {
        let bytes = seq.as_bytes();
        if bytes.len() > INLINE_CAP {
            return Err(ColorError::EscapeTooLong);
        }
        let mut buf = [0u8; INLINE_CAP];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self::inline(buf, bytes.len()))
    }

    /// Parse colour names, palette indices, `#rrggbb` or raw escapes.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        if s.starts_with(ESC) {
            return Self::from_escape(s);
        }
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "black" => Ok(Self::black()),
            "red" => Ok(Self::red()),
            "green" => Ok(Self::green()),
            "yellow" => Ok(Self::yellow()),
            "blue" => Ok(Self::blue()),
            "magenta" => Ok(Self::magenta()),
            "cyan" => Ok(Self::cyan()),
            "white" => Ok(Self::white()),
            "orange" => Ok(Self::orange()),
            n if n.starts_with('#') => Self::from_hex(n),
            n => n
                .parse::<u8>()
                .map(Self::indexed)
                .map_err(|_| ColorError::UnknownName(s.to_owned())),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or_default(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn inline(buf: [u8; INLINE_CAP], len: usize) -> Self {
        Self::Inline {
            buf,
            len: len as u8,
        }
    }
}

impl str::FromStr for AnsiCode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl From<AnsiCode> for String {
    #[inline]
    fn from(c: AnsiCode) -> Self {
        c.as_str().to_owned()
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}

/// Wrap `text` only when a colour is present.
#[inline]
#[must_use]
pub fn colorize_opt(c: Option<&AnsiCode>, text: &str) -> String {
    match c {
        Some(c) => colorize(c, text),
        None => text.to_owned(),
    }
}

/// Remove every `ESC … m` run.  An ESC with no terminating `m` is kept.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains(ESC) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(ESC) {
        out.push_str(&rest[..start]);
        match rest[start..].find('m') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Columns `text` occupies on screen once colour sequences are removed.
#[inline]
#[must_use]
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_ref())
}

/// Characters left in `text` once colour sequences are removed.
///
/// Column arithmetic runs on this count, so a line holds the same number
/// of characters whatever script its label is written in.
#[inline]
#[must_use]
pub fn text_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_escape_is_well_formed() {
        assert_eq!(AnsiCode::rgb(255, 0, 7).as_str(), "\x1b[38;2;255;0;7m");
        assert_eq!(AnsiCode::indexed(14).as_str(), "\x1b[38;5;14m");
    }

    #[test]
    fn names_hex_indices_and_escapes_parse() {
        assert_eq!(AnsiCode::from_name(" Red ").unwrap(), AnsiCode::red());
        assert_eq!(
            AnsiCode::from_name("#0a0B0c").unwrap(),
            AnsiCode::rgb(10, 11, 12)
        );
        assert_eq!(AnsiCode::from_name("208").unwrap(), AnsiCode::indexed(208));
        assert_eq!(
            AnsiCode::from_name("\x1b[1;31m").unwrap().as_str(),
            "\x1b[1;31m"
        );
    }

    #[test]
    fn bad_colours_are_rejected() {
        assert_eq!(
            AnsiCode::from_name("chartreuse"),
            Err(ColorError::UnknownName("chartreuse".into()))
        );
        assert_eq!(AnsiCode::from_hex("#12345"), Err(ColorError::InvalidHexLength));
        assert_eq!(AnsiCode::from_hex("#12345z"), Err(ColorError::InvalidHexDigit));
        assert_eq!(
            AnsiCode::from_escape("\x1b[38;2;255;255;255;1m"),
            Err(ColorError::EscapeTooLong)
        );
    }

    #[test]
    fn strip_removes_only_complete_sequences() {
        let s = colorize(&AnsiCode::green(), "ok");
        assert_eq!(strip_ansi(&s), "ok");
        assert_eq!(strip_ansi("a\x1bb"), "a\x1bb");
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn visible_width_ignores_colour() {
        let s = format!("{}{}", colorize(&AnsiCode::red(), "ab"), "cd");
        assert_eq!(visible_width(&s), 4);
        assert_eq!(visible_width("█"), 1);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn text_width_counts_characters_not_columns() {
        assert_eq!(visible_width("漢字"), 4);
        assert_eq!(text_width("漢字"), 2);
        assert_eq!(text_width(&colorize(&AnsiCode::blue(), "漢字ab")), 4);
    }
}
