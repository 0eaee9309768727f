use crate::rand::RandRange;

const fn low_mask(bits: u32) -> u128 {
    if bits == 0 {
        0
    } else {
        u128::MAX >> (u128::BITS - bits)
    }
}

/// Draws `bits` uniformly random bits (at most 128).
///
/// The value is built from `R::BITS`-wide draws concatenated most significant
/// first; the last draw covers the remaining `bits % R::BITS` bits.
pub fn random_bits<R: RandRange>(rng: &R, bits: u32) -> u128 {
    debug_assert!(bits <= u128::BITS, "at most 128 random bits");
    let chunk = R::BITS.min(u64::BITS);
    let mut acc = 0_u128;
    let mut remaining = bits.min(u128::BITS);
    while remaining > 0 {
        let take = remaining.min(chunk);
        let max = low_mask(take) as u64;
        let draw = u128::from(rng.random_in_range(0, max) & max);
        acc = (acc << take) | draw;
        remaining -= take;
    }
    acc
}

/// Returns a uniformly distributed `u128` in `[min, max]`.
///
/// Spans that fit in a single draw go straight to the RNG. Wider spans draw
/// `bit_len(max - min)` bits and reject values past the span, so the result is
/// unbiased at the boundary. Fewer than two rounds are expected.
///
/// # Example
/// ```
/// use linearid::rand::{ThreadRandom, random_in_range_u128};
///
/// let max = (1_u128 << 73) - 1;
/// let source = random_in_range_u128(&ThreadRandom, 1, max);
/// assert!((1..=max).contains(&source));
/// ```
pub fn random_in_range_u128<R: RandRange>(rng: &R, min: u128, max: u128) -> u128 {
    debug_assert!(min <= max, "empty range");
    let span = max.saturating_sub(min);
    if span == 0 {
        return min;
    }

    let bits = u128::BITS - span.leading_zeros();
    if bits <= R::BITS.min(u64::BITS) {
        return min + u128::from(rng.random_in_range(0, span as u64));
    }

    loop {
        let candidate = random_bits(rng, bits);
        if candidate <= span {
            return min + candidate;
        }
    }
}
