use rand::{Rng, rng};

use crate::rand::RandRange;

/// A [`RandRange`] that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is cryptographically secure (ChaCha-based) and automatically
/// reseeded from the operating system.
///
/// The type is a zero-sized handle that looks up the calling thread's RNG on
/// each call, so it may be shared freely across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandRange for ThreadRandom {
    fn random_in_range(&self, min: u64, max: u64) -> u64 {
        rng().random_range(min..=max)
    }
}
