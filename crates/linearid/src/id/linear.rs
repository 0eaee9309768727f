/// A macro for defining a Linear ID bit layout from three components:
/// `timestamp`, `ticker`, and `source`.
///
/// These components are always laid out from **most significant bit (MSB)** to
/// **least significant bit (LSB)** - in that exact order.
///
/// - The first field (`timestamp`) occupies the highest bits.
/// - The last field (`source`) occupies the lowest bits and may be zero bits
///   wide for process-local layouts.
/// - The total number of bits **must exactly equal** the size of the backing
///   integer type (`u64` or `u128`). If it doesn't, the macro will trigger a
///   compile-time assertion failure.
///
/// ```text
/// define_linear_id!(
///     <TypeName>, <IntegerType>,
///     timestamp: <bits>,
///     ticker: <bits>,
///     source: <bits>
/// );
/// ```
///
/// ## Example
/// ```rust
/// use linearid::{define_linear_id, id::LinearId};
///
/// define_linear_id!(
///     /// A 64-bit layout with a wide ticker.
///     WideTickerId, u64,
///     timestamp: 32,
///     ticker: 24,
///     source: 8
/// );
///
/// let id = WideTickerId::pack(7, 1 << 20, 3).unwrap();
/// assert_eq!(id.unpack(), (7, 1 << 20, 3));
/// assert!(WideTickerId::pack(0, 1 << 24, 0).is_err());
/// ```
///
/// Which expands to the following bit layout:
///
/// ```text
///  Bit Index:  63             32 31          8 7          0
///              +----------------+-------------+------------+
///  Field:      | timestamp (32) | ticker (24) | source (8) |
///              +----------------+-------------+------------+
///              |<------- MSB ------ 64 bits ----- LSB ---->|
/// ```
#[macro_export]
macro_rules! define_linear_id {
    (
        $(#[$meta:meta])*
        $name:ident, $int:ty,
        timestamp: $timestamp_bits:expr,
        ticker: $ticker_bits:expr,
        source: $source_bits:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name {
            id: $int,
        }

        const _: () = {
            // Compile-time check: total bit width _must_ equal the backing
            // type, otherwise hex and byte forms would not be bijective.
            assert!(
                $timestamp_bits + $ticker_bits + $source_bits == <$int>::BITS,
                "Layout must match underlying type width"
            );
            assert!($timestamp_bits > 0, "timestamp field must not be empty");
            assert!($ticker_bits > 0, "ticker field must not be empty");
        };

        impl $name {
            pub const TIMESTAMP_BITS: u32 = $timestamp_bits;
            pub const TICKER_BITS: u32 = $ticker_bits;
            pub const SOURCE_BITS: u32 = $source_bits;

            pub const SOURCE_SHIFT: u32 = 0;
            pub const TICKER_SHIFT: u32 = Self::SOURCE_SHIFT + Self::SOURCE_BITS;
            pub const TIMESTAMP_SHIFT: u32 = Self::TICKER_SHIFT + Self::TICKER_BITS;

            pub const TIMESTAMP_MASK: $int = Self::mask(Self::TIMESTAMP_BITS);
            pub const TICKER_MASK: $int = Self::mask(Self::TICKER_BITS);
            pub const SOURCE_MASK: $int = Self::mask(Self::SOURCE_BITS);

            /// Number of characters in the canonical hex form.
            pub const HEX_LEN: usize = (<$int>::BITS / 4) as usize;

            /// Number of bytes in the little-endian byte form.
            pub const BYTE_LEN: usize = (<$int>::BITS / 8) as usize;

            const fn mask(bits: u32) -> $int {
                if bits == 0 {
                    0
                } else {
                    <$int>::MAX >> (<$int>::BITS - bits)
                }
            }

            /// Packs the components, masking each to its field width.
            #[must_use]
            pub const fn from(timestamp: $int, ticker: $int, source: $int) -> Self {
                let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let k = (ticker & Self::TICKER_MASK) << Self::TICKER_SHIFT;
                let s = (source & Self::SOURCE_MASK) << Self::SOURCE_SHIFT;
                Self { id: t | k | s }
            }

            /// Packs the components, rejecting any that overflow their field.
            ///
            /// # Errors
            ///
            /// Returns `Error::FieldOutOfRange` for the first component that
            /// does not fit.
            pub fn pack(timestamp: $int, ticker: $int, source: $int) -> $crate::Result<Self> {
                <Self as $crate::id::LinearId>::try_from_components(timestamp, ticker, source)
            }

            /// Splits the ID into `(timestamp, ticker, source)`.
            #[must_use]
            pub const fn unpack(&self) -> ($int, $int, $int) {
                (self.timestamp(), self.ticker(), self.source())
            }

            /// Extracts the timestamp from the packed ID.
            #[must_use]
            pub const fn timestamp(&self) -> $int {
                (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
            }

            /// Extracts the ticker from the packed ID.
            #[must_use]
            pub const fn ticker(&self) -> $int {
                (self.id >> Self::TICKER_SHIFT) & Self::TICKER_MASK
            }

            /// Extracts the source id from the packed ID.
            #[must_use]
            pub const fn source(&self) -> $int {
                (self.id >> Self::SOURCE_SHIFT) & Self::SOURCE_MASK
            }

            #[must_use]
            pub const fn max_timestamp() -> $int {
                Self::TIMESTAMP_MASK
            }

            #[must_use]
            pub const fn max_ticker() -> $int {
                Self::TICKER_MASK
            }

            #[must_use]
            pub const fn max_source() -> $int {
                Self::SOURCE_MASK
            }

            /// Converts this type into its raw type representation
            #[must_use]
            pub const fn to_raw(&self) -> $int {
                self.id
            }

            /// Converts a raw type into this type
            #[must_use]
            pub const fn from_raw(raw: $int) -> Self {
                Self { id: raw }
            }
        }

        impl $crate::id::Id for $name {
            type Ty = $int;
            const ZERO: $int = 0;
            const ONE: $int = 1;

            fn to_raw(&self) -> Self::Ty {
                self.to_raw()
            }

            fn from_raw(raw: Self::Ty) -> Self {
                Self::from_raw(raw)
            }
        }

        impl $crate::id::LinearId for $name {
            fn timestamp(&self) -> Self::Ty {
                self.timestamp()
            }

            fn ticker(&self) -> Self::Ty {
                self.ticker()
            }

            fn source(&self) -> Self::Ty {
                self.source()
            }

            fn max_timestamp() -> Self::Ty {
                Self::TIMESTAMP_MASK
            }

            fn max_ticker() -> Self::Ty {
                Self::TICKER_MASK
            }

            fn max_source() -> Self::Ty {
                Self::SOURCE_MASK
            }

            fn from_components(timestamp: $int, ticker: $int, source: $int) -> Self {
                debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
                debug_assert!(ticker <= Self::TICKER_MASK, "ticker overflow");
                debug_assert!(source <= Self::SOURCE_MASK, "source overflow");
                Self::from(timestamp, ticker, source)
            }
        }

        impl core::fmt::Display for $name {
            /// Writes the canonical, zero-padded lowercase hex form.
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{:0width$x}", self.id, width = Self::HEX_LEN)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                $crate::id::write_bit_layout_debug(
                    f,
                    stringify!($name),
                    &self.to_string(),
                    &[
                        ("timestamp", Self::TIMESTAMP_BITS, u128::from(self.timestamp())),
                        ("ticker", Self::TICKER_BITS, u128::from(self.ticker())),
                        ("source", Self::SOURCE_BITS, u128::from(self.source())),
                    ],
                )
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
                <Self as $crate::codec::LinearIdCodecExt>::from_hex(s)
            }
        }

        impl From<$name> for $int {
            fn from(id: $name) -> Self {
                id.to_raw()
            }
        }

        impl From<$int> for $name {
            fn from(raw: $int) -> Self {
                Self::from_raw(raw)
            }
        }
    };
}

/// Formats a Linear ID as its hex form followed by each field's width and
/// value.
///
/// Output looks like `Lid64 { hex: "...", timestamp(32): 1, ticker(16): 2,
/// source(16): 3 }`.
#[doc(hidden)]
pub fn write_bit_layout_debug(
    f: &mut core::fmt::Formatter<'_>,
    name: &str,
    hex: &str,
    fields: &[(&str, u32, u128)],
) -> core::fmt::Result {
    write!(f, "{name} {{ hex: {hex:?}")?;
    for (field, bits, value) in fields {
        write!(f, ", {field}({bits}): {value}")?;
    }
    f.write_str(" }")
}

define_linear_id!(
    /// The 128-bit Linear ID.
    ///
    /// - 33 bits timestamp (seconds since the Unix epoch by default)
    /// - 22 bits ticker
    /// - 73 bits random source id
    ///
    /// ```text
    ///  Bit Index:  127           95 94          73 72              0
    ///              +---------------+-------------+-----------------+
    ///  Field:      | timestamp (33)| ticker (22) |   source (73)   |
    ///              +---------------+-------------+-----------------+
    ///              |<----- MSB ------- 128 bits ------ LSB ------->|
    /// ```
    Lid128, u128,
    timestamp: 33,
    ticker: 22,
    source: 73
);

define_linear_id!(
    /// The 64-bit Linear ID.
    ///
    /// - 32 bits timestamp (seconds since the Unix epoch by default)
    /// - 16 bits ticker
    /// - 16 bits random source id
    ///
    /// ```text
    ///  Bit Index:  63            32 31          16 15          0
    ///              +---------------+-------------+-------------+
    ///  Field:      | timestamp (32)| ticker (16) | source (16) |
    ///              +---------------+-------------+-------------+
    ///              |<----- MSB ------ 64 bits ------- LSB ---->|
    /// ```
    Lid64, u64,
    timestamp: 32,
    ticker: 16,
    source: 16
);

define_linear_id!(
    /// The 64-bit Local Linear ID, unique only within one process.
    ///
    /// - 32 bits timestamp (seconds since the Unix epoch by default)
    /// - 32 bits ticker
    /// - no source field
    ///
    /// ```text
    ///  Bit Index:  63             32 31            0
    ///              +----------------+--------------+
    ///  Field:      | timestamp (32) | ticker (32)  |
    ///              +----------------+--------------+
    ///              |<--- MSB --- 64 bits -- LSB -->|
    /// ```
    Llid, u64,
    timestamp: 32,
    ticker: 32,
    source: 0
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Field, id::LinearId};

    #[test]
    fn lid128_concrete_pack() {
        let id = Lid128::pack(1000, 5, 42).unwrap();
        assert_eq!(id.to_raw(), (1000_u128 << 95) | (5_u128 << 73) | 42);
        assert_eq!(id.unpack(), (1000, 5, 42));
        assert_eq!(Lid128::TIMESTAMP_SHIFT, 95);
        assert_eq!(Lid128::TICKER_SHIFT, 73);
    }

    #[test]
    fn lid128_fields_and_bounds() {
        let ts = Lid128::max_timestamp();
        let tk = Lid128::max_ticker();
        let src = Lid128::max_source();

        let id = Lid128::from(ts, tk, src);
        assert_eq!(id.to_raw(), u128::MAX);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.ticker(), tk);
        assert_eq!(id.source(), src);
        assert_eq!(<Lid128 as LinearId>::from_components(ts, tk, src), id);
        assert_eq!(tk, (1 << 22) - 1);
        assert_eq!(src, (1 << 73) - 1);
    }

    #[test]
    fn lid64_fields_and_bounds() {
        let id = Lid64::from(
            Lid64::max_timestamp(),
            Lid64::max_ticker(),
            Lid64::max_source(),
        );
        assert_eq!(id.to_raw(), u64::MAX);
        assert_eq!(Lid64::max_timestamp(), u64::from(u32::MAX));
        assert_eq!(Lid64::max_ticker(), 0xffff);
        assert_eq!(Lid64::max_source(), 0xffff);

        let id = Lid64::pack(0xdead_beef, 0x1234, 0xabcd).unwrap();
        assert_eq!(id.to_raw(), 0xdead_beef_1234_abcd);
    }

    #[test]
    fn llid_has_no_source() {
        assert_eq!(Llid::max_source(), 0);
        assert_eq!(Llid::TICKER_SHIFT, 0);
        let id = Llid::pack(9, 77, 0).unwrap();
        assert_eq!(id.to_raw(), (9 << 32) | 77);
        assert_eq!(id.source(), 0);
        assert_eq!(
            Llid::pack(9, 77, 1),
            Err(Error::FieldOutOfRange {
                field: Field::Source,
                value: 1,
                max: 0
            })
        );
    }

    #[test]
    fn pack_rejects_out_of_range() {
        let err = Lid128::pack(1 << 33, 0, 1).unwrap_err();
        assert_eq!(
            err,
            Error::FieldOutOfRange {
                field: Field::Timestamp,
                value: 1 << 33,
                max: (1 << 33) - 1
            }
        );

        let err = Lid64::pack(0, 1 << 16, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldOutOfRange {
                field: Field::Ticker,
                ..
            }
        ));

        let err = Lid64::pack(0, 0, 1 << 16).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldOutOfRange {
                field: Field::Source,
                ..
            }
        ));
    }

    #[test]
    fn ordering_follows_timestamp_then_ticker() {
        let a = Lid128::pack(10, 5, Lid128::max_source()).unwrap();
        let b = Lid128::pack(10, 6, 1).unwrap();
        let c = Lid128::pack(11, 0, 1).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn rollover_and_increment_keep_source() {
        let id = Lid64::pack(100, 7, 42).unwrap();
        assert!(id.has_ticker_room());

        let next = id.increment_ticker();
        assert_eq!(next.unpack(), (100, 8, 42));

        let rolled = next.rollover_to_timestamp(101);
        assert_eq!(rolled.unpack(), (101, 0, 42));

        let saturated = Lid64::pack(100, Lid64::max_ticker(), 42).unwrap();
        assert!(!saturated.has_ticker_room());
        assert_eq!(saturated.with_source(9).source(), 9);
    }

    #[test]
    fn display_is_fixed_width_hex() {
        assert_eq!(Lid128::from_raw(1).to_string(), format!("{:032x}", 1));
        assert_eq!(Lid64::from_raw(0xab).to_string(), "00000000000000ab");
        assert_eq!(Llid::from_raw(u64::MAX).to_string(), "ffffffffffffffff");
    }

    #[test]
    fn debug_shows_layout() {
        let id = Lid64::pack(1, 2, 3).unwrap();
        assert_eq!(
            format!("{id:?}"),
            "Lid64 { hex: \"0000000100020003\", timestamp(32): 1, ticker(16): 2, source(16): 3 }"
        );
    }

    #[test]
    fn from_str_parses_display() {
        let id = Lid128::pack(1_700_000_000, 3, 0x1f_ffff_ffff).unwrap();
        let parsed: Lid128 = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("xyz".parse::<Lid128>().is_err());
    }

    #[test]
    #[should_panic(expected = "ticker overflow")]
    fn from_components_ticker_overflow_panics() {
        let tk = Lid64::max_ticker() + 1;
        let _ = <Lid64 as LinearId>::from_components(0, tk, 0);
    }

    #[test]
    #[should_panic(expected = "source overflow")]
    fn from_components_source_overflow_panics() {
        let _ = <Llid as LinearId>::from_components(0, 0, 1);
    }
}
