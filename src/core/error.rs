//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::data::ParseCsvError;

/// Precise configuration faults, all raised by `GraphConfigBuilder::build`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bar glyph `{glyph}` is {width} columns wide, must be exactly 1")]
    BadGlyphWidth { glyph: String, width: usize },
    #[error("title bar glyph must hold at least one visible character")]
    EmptyTitleBar,
    #[error("forced max value {0} is not a finite number")]
    BadForcedMax(f64),
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] ParseCsvError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("data set is empty")]
    EmptyData,
}
