//! Error types.

use thiserror::Error;

/// Dataset problems detected before a chart starts streaming.
///
/// Validation runs once in [`Chart::stream_to`](crate::Chart::stream_to);
/// nothing is drawn when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A sample has a key while its predecessor has none, or the other way round.
    #[error("series {position}: sample {index} mixes set and unset keys with its predecessor")]
    MixedKeyPresence {
        /// Position of the offending series.
        position: u32,
        /// Index of the offending sample.
        index: usize,
    },
    /// A sample has a value while its predecessor has none, or the other way round.
    #[error("series {position}: sample {index} mixes set and unset values with its predecessor")]
    MixedValuePresence {
        /// Position of the offending series.
        position: u32,
        /// Index of the offending sample.
        index: usize,
    },
    /// Series positions start at 1.
    #[error("series position must be at least 1")]
    ZeroPosition,
    /// Two series share the same position.
    #[error("series position {0} is used more than once")]
    DuplicatePosition(u32),
}

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    /// The number of hex digits is not 3, 4, 6 or 8.
    #[error("color `{input}` has {len} hex digits, expected 3, 4, 6 or 8")]
    InvalidLength {
        /// Original input.
        input: String,
        /// Number of digits found.
        len: usize,
    },
    /// A character is not a hex digit.
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}
