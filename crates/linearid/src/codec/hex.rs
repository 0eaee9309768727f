use crate::{MalformedInput, Result, codec::LeBytes};

const ALPHABET: &[u8; 16] = b"0123456789abcdef";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 4;

/// Lookup table for hex decoding; accepts either case.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 16 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i;
        }
        i += 1;
    }
    lut
};

/// Encodes little-endian `input` as lowercase hex into `buf`, most
/// significant nibble first.
///
/// `buf` must be exactly twice as long as `input`; callers get this for free
/// by passing a [`LeBytes::HexArray`].
pub fn encode_hex(input: &[u8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len(), input.len() * 2, "hex buffer size mismatch");
    for (pair, &b) in buf.chunks_exact_mut(2).zip(input.iter().rev()) {
        pair[0] = ALPHABET[usize::from(b >> 4)];
        pair[1] = ALPHABET[usize::from(b & 0x0f)];
    }
}

/// Decodes a hex string into the integer type `T`.
///
/// Length is the caller's concern; this only rejects characters outside
/// `[0-9a-fA-F]`.
///
/// # Errors
///
/// Returns [`MalformedInput::InvalidHexDigit`] for the first bad byte.
pub fn decode_hex<T>(encoded: &str) -> Result<T>
where
    T: LeBytes
        + Default
        + From<u8>
        + core::ops::Shl<usize, Output = T>
        + core::ops::BitOr<Output = T>,
{
    let mut acc = T::default();
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[usize::from(byte)];
        if val == NO_VALUE {
            return Err(MalformedInput::InvalidHexDigit { byte, index }.into());
        }
        acc = (acc << BITS_PER_CHAR) | T::from(val);
    }
    Ok(acc)
}
