use core::{convert::Infallible, future::Future, time::Duration};

use crate::{
    futures::{LinearIdGeneratorAsyncExt, SleepProvider},
    generator::LinearIdGenerator,
    id::LinearId,
    rand::RandRange,
    time::TimeSource,
};

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// Yields to the scheduler instead of arming a timer. Responsive under light
/// load, but it polls more often than [`TokioSleep`] while a tick drains.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Extension trait for asynchronously generating Linear IDs on the
/// [`tokio`](https://docs.rs/tokio) runtime, using [`TokioSleep`].
pub trait LinearIdGeneratorAsyncTokioExt<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    type Err;

    /// Returns a future that resolves to the next available ID.
    ///
    /// Only available for generators with infallible error types.
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

impl<G, ID, T, R> LinearIdGeneratorAsyncTokioExt<ID, T, R> for G
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
        <Self as LinearIdGeneratorAsyncExt<ID, T, R>>::next_id_async::<TokioSleep>(self)
    }

    fn try_next_id_async(&self) -> impl Future<Output = Result<ID, Self::Err>> {
        <Self as LinearIdGeneratorAsyncExt<ID, T, R>>::try_next_id_async::<TokioSleep>(self)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use futures::future::try_join_all;

    use super::*;
    use crate::{
        generator::{AtomicLinearIdGenerator, LockLinearIdGenerator},
        id::{Lid64, Lid128},
        rand::ThreadRandom,
        time::{MonotonicClock, TimeSource},
    };

    const TASKS: usize = 8;
    const IDS_PER_TASK: usize = 4096 * 4;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn atomic_can_call_next_id_async() {
        let generator: AtomicLinearIdGenerator<Lid64, _, _> =
            AtomicLinearIdGenerator::new(MonotonicClock::default(), ThreadRandom);
        let a = LinearIdGeneratorAsyncTokioExt::next_id_async(&generator).await;
        let b = LinearIdGeneratorAsyncExt::next_id_async::<TokioYield>(&generator).await;
        assert!(a < b);
        assert_eq!(a.source(), b.source());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn lock_waits_out_a_saturated_tick() {
        let clock = MonotonicClock::default();
        let start = TimeSource::<u128>::current_ticks(&clock);
        let generator: LockLinearIdGenerator<Lid128, _, _> = LockLinearIdGenerator::from_components(
            start,
            Lid128::max_ticker(),
            1,
            clock,
            ThreadRandom,
        );

        let id = LinearIdGeneratorAsyncTokioExt::try_next_id_async(&generator)
            .await
            .unwrap();
        assert!(id.timestamp() > start);
        assert_eq!(id.ticker(), 0);
        assert_eq!(id.source(), 1);
    }

    async fn unique_ids_across_tasks<G, ID, T, R, S>(generator: G)
    where
        G: LinearIdGenerator<ID, T, R> + Send + Sync + 'static,
        G::Err: Send + core::fmt::Debug,
        ID: LinearId + Send + 'static,
        T: TimeSource<ID::Ty> + Send + 'static,
        R: RandRange + Send + 'static,
        S: SleepProvider,
    {
        let generator = Arc::new(generator);
        let tasks: Vec<_> = (0..TASKS)
            .map(|_| {
                let generator = Arc::clone(&generator);
                tokio::spawn(async move {
                    let mut ids = Vec::with_capacity(IDS_PER_TASK);
                    for _ in 0..IDS_PER_TASK {
                        let id = LinearIdGeneratorAsyncExt::try_next_id_async::<S>(&*generator)
                            .await
                            .unwrap();
                        ids.push(id);
                    }
                    ids
                })
            })
            .collect();

        let all_ids: Vec<ID> = try_join_all(tasks).await.unwrap().into_iter().flatten().collect();
        assert_eq!(all_ids.len(), TASKS * IDS_PER_TASK);

        let mut seen = HashSet::with_capacity(all_ids.len());
        for id in &all_ids {
            assert!(seen.insert(id), "duplicate ID found: {id:?}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn lock_unique_ids_sleep() {
        let generator: LockLinearIdGenerator<Lid128, _, _> =
            LockLinearIdGenerator::new(MonotonicClock::default(), ThreadRandom);
        unique_ids_across_tasks::<_, _, _, _, TokioSleep>(generator).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn lock_unique_ids_yield() {
        let generator: LockLinearIdGenerator<Lid128, _, _> =
            LockLinearIdGenerator::new(MonotonicClock::default(), ThreadRandom);
        unique_ids_across_tasks::<_, _, _, _, TokioYield>(generator).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn atomic_unique_ids_sleep() {
        let generator: AtomicLinearIdGenerator<Lid64, _, _> =
            AtomicLinearIdGenerator::new(MonotonicClock::default(), ThreadRandom);
        unique_ids_across_tasks::<_, _, _, _, TokioSleep>(generator).await;
    }
}
