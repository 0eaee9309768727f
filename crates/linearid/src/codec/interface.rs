use crate::{
    MalformedInput, Result,
    codec::{LeBytes, decode_hex, encode_hex},
    id::{Id, LinearId},
};

/// Extension trait for the wire forms of a Linear ID.
///
/// Two forms are supported, both a total bijection with the raw integer:
///
/// - hex: exactly `width / 4` lowercase characters, most significant nibble
///   first. Either case is accepted when parsing.
/// - bytes: exactly `width / 8` bytes, little-endian (byte 0 is the least
///   significant byte).
///
/// Decoding never panics; malformed input is reported as
/// [`Error::MalformedInput`](crate::Error::MalformedInput).
pub trait LinearIdCodecExt: LinearId
where
    Self::Ty: LeBytes,
{
    /// Encodes this ID as fixed-width lowercase hex.
    ///
    /// # Example
    ///
    /// ```
    /// use linearid::{codec::LinearIdCodecExt, id::Lid64};
    ///
    /// let id = Lid64::pack(0x6553_f100, 2, 0xbeef).unwrap();
    /// assert_eq!(id.to_hex(), "6553f1000002beef");
    /// ```
    fn to_hex(&self) -> String {
        let mut buf = <Self::Ty as LeBytes>::HexArray::default();
        self.encode_hex_to_buf(&mut buf);
        buf.as_ref().iter().map(|&b| char::from(b)).collect()
    }

    /// Encodes this ID into a caller-provided buffer without allocating.
    ///
    /// The output is always ASCII.
    fn encode_hex_to_buf(&self, buf: &mut <<Self as Id>::Ty as LeBytes>::HexArray) {
        encode_hex(self.to_raw().to_le_bytes().as_ref(), buf.as_mut());
    }

    /// Parses the fixed-width hex form.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error if `s` is not exactly
    /// [`LeBytes::HEX_SIZE`] characters or holds a non-hex character.
    fn from_hex(s: &str) -> Result<Self> {
        let expected = <Self::Ty as LeBytes>::HEX_SIZE;
        if s.len() != expected {
            return Err(MalformedInput::InvalidLength {
                expected,
                len: s.len(),
            }
            .into());
        }
        let raw = decode_hex::<Self::Ty>(s)?;
        Ok(Self::from_raw(raw))
    }

    /// Returns the little-endian byte form.
    ///
    /// # Example
    ///
    /// ```
    /// use linearid::{codec::LinearIdCodecExt, id::Lid128};
    ///
    /// let bytes = Lid128::from_raw(1).to_bytes();
    /// assert_eq!(bytes[0], 0x01);
    /// assert!(bytes[1..].iter().all(|&b| b == 0));
    /// ```
    fn to_bytes(&self) -> <<Self as Id>::Ty as LeBytes>::ByteArray {
        self.to_raw().to_le_bytes()
    }

    /// Parses the little-endian byte form.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error if `bytes` is not exactly
    /// [`LeBytes::SIZE`] long.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = <Self::Ty as LeBytes>::SIZE;
        let array = <<Self::Ty as LeBytes>::ByteArray as TryFrom<&[u8]>>::try_from(bytes)
            .map_err(|_| {
                MalformedInput::InvalidLength {
                    expected,
                    len: bytes.len(),
                }
            })?;
        Ok(Self::from_raw(<Self::Ty as LeBytes>::from_le_bytes(array)))
    }
}

impl<ID> LinearIdCodecExt for ID
where
    ID: LinearId,
    ID::Ty: LeBytes,
{
}
