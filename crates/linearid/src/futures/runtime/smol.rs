use core::{convert::Infallible, future::Future, time::Duration};

use smol::Timer;

use crate::{
    futures::{LinearIdGeneratorAsyncExt, SleepProvider},
    generator::LinearIdGenerator,
    id::LinearId,
    rand::RandRange,
    time::TimeSource,
};

/// An implementation of [`SleepProvider`] using Smol's timer.
///
/// This is the default provider for use in async applications built on Smol.
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    async fn sleep_for(dur: Duration) {
        Timer::after(dur).await;
    }
}

/// An implementation of [`SleepProvider`] using Smol's yield.
pub struct SmolYield;
impl SleepProvider for SmolYield {
    async fn sleep_for(_dur: Duration) {
        smol::future::yield_now().await;
    }
}

/// Extension trait for asynchronously generating Linear IDs on the
/// [`smol`](https://docs.rs/smol) runtime, using [`SmolSleep`].
pub trait LinearIdGeneratorAsyncSmolExt<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    type Err;

    /// Returns a future that resolves to the next available ID.
    fn next_id_async(&self) -> impl Future<Output = ID>
    where
        Self::Err: Into<Infallible>;

    /// Returns a future that resolves to the next available ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying generator fails.
    fn try_next_id_async(&self) -> impl Future<Output = Result<ID, Self::Err>>;
}

impl<G, ID, T, R> LinearIdGeneratorAsyncSmolExt<ID, T, R> for G
where
    G: LinearIdGenerator<ID, T, R> + Sync,
    ID: LinearId + Send,
    T: TimeSource<ID::Ty> + Send,
    R: RandRange + Send,
{
    type Err = G::Err;

    fn next_id_async(&self) -> impl Future<Output = ID>
    where
        Self::Err: Into<Infallible>,
    {
        <Self as LinearIdGeneratorAsyncExt<ID, T, R>>::next_id_async::<SmolSleep>(self)
    }

    fn try_next_id_async(&self) -> impl Future<Output = Result<ID, Self::Err>> {
        <Self as LinearIdGeneratorAsyncExt<ID, T, R>>::try_next_id_async::<SmolSleep>(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        generator::{AtomicLinearIdGenerator, LockLinearIdGenerator},
        id::{Lid64, Lid128},
        rand::ThreadRandom,
        time::{MonotonicClock, SystemClock, TimeSource},
    };

    #[test]
    fn atomic_ids_in_order() {
        smol::block_on(async {
            let generator: AtomicLinearIdGenerator<Lid64, _, _> =
                AtomicLinearIdGenerator::new(MonotonicClock::default(), ThreadRandom);
            let mut last = LinearIdGeneratorAsyncSmolExt::next_id_async(&generator).await;
            for _ in 0..4096 * 4 {
                let id = LinearIdGeneratorAsyncSmolExt::next_id_async(&generator).await;
                assert!(id > last);
                last = id;
            }
        });
    }

    #[test]
    fn lock_yield_unique_ids() {
        smol::block_on(async {
            let generator: LockLinearIdGenerator<Lid128, _, _> =
                LockLinearIdGenerator::new(SystemClock::seconds(), ThreadRandom);
            let mut seen = HashSet::new();
            for _ in 0..4096 * 4 {
                let id = LinearIdGeneratorAsyncExt::try_next_id_async::<SmolYield>(&generator)
                    .await
                    .unwrap();
                assert!(seen.insert(id));
            }
        });
    }

    #[test]
    fn lock_sleeps_through_a_saturated_tick() {
        smol::block_on(async {
            let clock = MonotonicClock::default();
            let start = TimeSource::<u128>::current_ticks(&clock);
            let generator: LockLinearIdGenerator<Lid128, _, _> =
                LockLinearIdGenerator::from_components(
                    start,
                    Lid128::max_ticker(),
                    9,
                    clock,
                    ThreadRandom,
                );
            let id = LinearIdGeneratorAsyncSmolExt::try_next_id_async(&generator)
                .await
                .unwrap();
            assert!(id.timestamp() > start);
            assert_eq!(id.ticker(), 0);
            assert_eq!(id.source(), 9);
        });
    }
}
