use core::hash::Hash;

const fn hex_size(bytes: usize) -> usize {
    bytes * 2
}

/// A trait for integers that can be encoded to and decoded from
/// little-endian bytes and fixed-width hex.
pub trait LeBytes: Sized {
    const SIZE: usize;
    const HEX_SIZE: usize;
    type ByteArray: AsRef<[u8]>
        + AsMut<[u8]>
        + for<'a> TryFrom<&'a [u8]>
        + core::fmt::Debug
        + Default
        + Copy
        + PartialEq
        + Eq
        + Hash;
    type HexArray: AsRef<[u8]>
        + AsMut<[u8]>
        + core::fmt::Debug
        + Default
        + Copy
        + PartialEq
        + Eq
        + Hash;

    fn to_le_bytes(self) -> Self::ByteArray;
    fn from_le_bytes(bytes: Self::ByteArray) -> Self;
}

impl LeBytes for u64 {
    const SIZE: usize = core::mem::size_of::<u64>();
    const HEX_SIZE: usize = hex_size(Self::SIZE);

    type ByteArray = [u8; Self::SIZE];
    type HexArray = [u8; Self::HEX_SIZE];

    fn to_le_bytes(self) -> Self::ByteArray {
        self.to_le_bytes()
    }

    fn from_le_bytes(bytes: Self::ByteArray) -> Self {
        Self::from_le_bytes(bytes)
    }
}

impl LeBytes for u128 {
    const SIZE: usize = core::mem::size_of::<u128>();
    const HEX_SIZE: usize = hex_size(Self::SIZE);

    type ByteArray = [u8; Self::SIZE];
    type HexArray = [u8; Self::HEX_SIZE];

    fn to_le_bytes(self) -> Self::ByteArray {
        self.to_le_bytes()
    }

    fn from_le_bytes(bytes: Self::ByteArray) -> Self {
        Self::from_le_bytes(bytes)
    }
}
