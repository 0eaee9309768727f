use core::fmt;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `linearid` can produce.
///
/// Parsing and packing failures are returned to the immediate caller. Nothing
/// here is raised for ticker saturation: that is a wait, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input to a hex or byte parser was the wrong length or held a byte
    /// outside the accepted alphabet.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),

    /// A field handed to a strict pack exceeds its bit width.
    #[error("{field} value {value} exceeds its maximum of {max}")]
    FieldOutOfRange {
        /// The offending field.
        field: Field,
        /// The value that was supplied.
        value: u128,
        /// The largest value the field can hold.
        max: u128,
    },

    /// A shared generator lock was poisoned by a panicking thread.
    ///
    /// Only produced by the std mutex; `parking_lot` mutexes do not poison.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` for errors caused by malformed parser input.
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

/// The ways serialized input can be malformed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedInput {
    /// The input did not have the exact length of the canonical form.
    #[error("invalid length: expected {expected}, got {len}")]
    InvalidLength {
        /// Required length, in characters or bytes.
        expected: usize,
        /// Length actually supplied.
        len: usize,
    },

    /// A character outside `[0-9a-fA-F]` was found.
    #[error("invalid hex digit {byte:#04x} at index {index}")]
    InvalidHexDigit {
        /// The raw byte that was rejected.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },
}

/// Names one of the three bit fields of a Linear ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Timestamp,
    Ticker,
    Source,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timestamp => "timestamp",
            Self::Ticker => "ticker",
            Self::Source => "source",
        };
        f.write_str(name)
    }
}

#[cfg(not(feature = "parking-lot"))]
impl<T> From<std::sync::PoisonError<std::sync::MutexGuard<'_, T>>> for Error {
    fn from(_: std::sync::PoisonError<std::sync::MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::from(MalformedInput::InvalidLength {
            expected: 32,
            len: 31,
        });
        assert!(err.is_malformed_input());
        assert_eq!(
            err.to_string(),
            "malformed input: invalid length: expected 32, got 31"
        );

        let err = Error::FieldOutOfRange {
            field: Field::Ticker,
            value: 70_000,
            max: 65_535,
        };
        assert!(!err.is_malformed_input());
        assert_eq!(err.to_string(), "ticker value 70000 exceeds its maximum of 65535");
    }

    #[test]
    fn hex_digit_message_shows_byte() {
        let err = MalformedInput::InvalidHexDigit {
            byte: b'g',
            index: 3,
        };
        assert_eq!(err.to_string(), "invalid hex digit 0x67 at index 3");
    }
}
