use core::{
    fmt,
    hash::Hash,
    ops::{Add, AddAssign, BitAnd, BitOr, Not, Shl, Shr, Sub, SubAssign},
};

use crate::{
    error::{Error, Field, Result},
    id::ToU64,
};

/// A trait for types that wrap a primitive scalar identifier.
///
/// This is used to abstract over the raw scalar type behind an ID (`u64` or
/// `u128`).
pub trait Id:
    Copy + Clone + fmt::Display + PartialOrd + Ord + PartialEq + Eq + Hash + fmt::Debug
{
    /// Zero value (used for resetting the ticker and as the unset source)
    const ZERO: Self::Ty;

    /// One value (used for incrementing the ticker)
    const ONE: Self::Ty;

    /// Scalar type for all bit fields (`u64` or `u128`)
    type Ty: Copy
        + Clone
        + Default
        + fmt::Debug
        + fmt::Display
        + fmt::LowerHex
        + Ord
        + PartialOrd
        + Eq
        + PartialEq
        + Hash
        + Send
        + Sync
        // For sleep durations and testing
        + ToU64
        // For error reporting and wide random draws
        + Into<u128>
        + TryFrom<u128>
        // For hex decode
        + From<u8>
        // Arithmetic
        + Add<Output = Self::Ty>
        + AddAssign<Self::Ty>
        + Sub<Output = Self::Ty>
        + SubAssign<Self::Ty>
        // Bitwise
        + BitOr<Output = Self::Ty>
        + BitAnd<Output = Self::Ty>
        + Not<Output = Self::Ty>
        // Shifting
        + Shl<usize, Output = Self::Ty>
        + Shr<usize, Output = Self::Ty>;

    /// Converts this type into its raw type representation
    fn to_raw(&self) -> Self::Ty;

    /// Converts a raw type into this type
    fn from_raw(raw: Self::Ty) -> Self;
}

/// A Linear ID layout: `timestamp | ticker | source`, MSB to LSB.
///
/// Implementations are normally generated with [`define_linear_id!`], which
/// also exposes `const` inherent versions of these methods.
///
/// [`define_linear_id!`]: crate::define_linear_id
pub trait LinearId: Id {
    /// Returns the timestamp portion of the ID.
    fn timestamp(&self) -> Self::Ty;

    /// Returns the ticker portion of the ID.
    fn ticker(&self) -> Self::Ty;

    /// Returns the source portion of the ID.
    fn source(&self) -> Self::Ty;

    /// Returns the maximum possible value for the timestamp field.
    fn max_timestamp() -> Self::Ty;

    /// Returns the maximum possible value for the ticker field.
    fn max_ticker() -> Self::Ty;

    /// Returns the maximum possible value for the source field.
    ///
    /// Zero for layouts without a source field.
    fn max_source() -> Self::Ty;

    /// Constructs a new ID from its components, masking each to its width.
    ///
    /// Out-of-range components trip a debug assertion. Use
    /// [`LinearId::try_from_components`] to reject them instead.
    #[must_use]
    fn from_components(timestamp: Self::Ty, ticker: Self::Ty, source: Self::Ty) -> Self;

    /// Constructs a new ID from its components, rejecting any component
    /// that does not fit its field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOutOfRange`] naming the first offending field.
    fn try_from_components(timestamp: Self::Ty, ticker: Self::Ty, source: Self::Ty) -> Result<Self> {
        check_field(Field::Timestamp, timestamp, Self::max_timestamp())?;
        check_field(Field::Ticker, ticker, Self::max_ticker())?;
        check_field(Field::Source, source, Self::max_source())?;
        Ok(Self::from_components(timestamp, ticker, source))
    }

    /// Splits the ID into `(timestamp, ticker, source)`.
    fn unpack(&self) -> (Self::Ty, Self::Ty, Self::Ty) {
        (self.timestamp(), self.ticker(), self.source())
    }

    /// Returns true if the current ticker value can be incremented.
    fn has_ticker_room(&self) -> bool {
        self.ticker() < Self::max_ticker()
    }

    /// Returns the next ticker value.
    fn next_ticker(&self) -> Self::Ty {
        self.ticker() + Self::ONE
    }

    /// Returns a new ID with the ticker incremented.
    #[must_use]
    fn increment_ticker(&self) -> Self {
        Self::from_components(self.timestamp(), self.next_ticker(), self.source())
    }

    /// Returns a new ID for a different tick with the ticker reset to zero.
    #[must_use]
    fn rollover_to_timestamp(&self, ts: Self::Ty) -> Self {
        Self::from_components(ts, Self::ZERO, self.source())
    }

    /// Returns a copy of this ID carrying a different source.
    #[must_use]
    fn with_source(&self, source: Self::Ty) -> Self {
        Self::from_components(self.timestamp(), self.ticker(), source)
    }
}

fn check_field<T>(field: Field, value: T, max: T) -> Result<()>
where
    T: Ord + Into<u128>,
{
    if value > max {
        return Err(Error::FieldOutOfRange {
            field,
            value: value.into(),
            max: max.into(),
        });
    }
    Ok(())
}
