/// A uniform random integer capability with inclusive bounds.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Wider values are composed from several calls, see
/// [`random_bits`](crate::rand::random_bits).
///
/// # Example
/// ```
/// use linearid::rand::RandRange;
///
/// struct FixedRand;
/// impl RandRange for FixedRand {
///     fn random_in_range(&self, min: u64, _max: u64) -> u64 {
///         min
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.random_in_range(7, 9), 7);
/// ```
pub trait RandRange {
    /// The widest range, in bits, a single call can cover.
    ///
    /// Implementations must accept any `max - min < 2^BITS`.
    const BITS: u32 = 48;

    /// Returns a uniformly distributed integer in `[min, max]`.
    ///
    /// Callers guarantee `min <= max`.
    fn random_in_range(&self, min: u64, max: u64) -> u64;
}
