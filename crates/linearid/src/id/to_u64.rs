/// Trait for converting numeric-like values into a `u64`.
///
/// Used to turn a pending tick count into a
/// [`core::time::Duration`] when sleeping. Values wider than `u64` saturate.
pub trait ToU64 {
    fn to_u64(self) -> u64;
}

impl ToU64 for u8 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl ToU64 for u16 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl ToU64 for u32 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl ToU64 for u64 {
    fn to_u64(self) -> u64 {
        self
    }
}

impl ToU64 for u128 {
    fn to_u64(self) -> u64 {
        u64::try_from(self).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u128_saturates() {
        assert_eq!(42_u128.to_u64(), 42);
        assert_eq!(u128::MAX.to_u64(), u64::MAX);
    }
}
