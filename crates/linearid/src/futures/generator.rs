use core::{convert::Infallible, future::Future};

use crate::{
    futures::SleepProvider,
    generator::{LinearIdGenerator, Poll},
    id::{LinearId, ToU64},
    rand::RandRange,
    time::TimeSource,
};

/// Extension trait for asynchronously generating Linear IDs.
///
/// Instead of spinning while the ticker is saturated, the returned future
/// sleeps through the configured [`SleepProvider`] for the number of ticks the
/// generator asked for, converted with the clock's resolution.
pub trait LinearIdGeneratorAsyncExt<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    type Err;

    /// Returns a future that resolves to the next available ID.
    fn next_id_async<S>(&self) -> impl Future<Output = ID>
    where
        S: SleepProvider,
        Self::Err: Into<Infallible>;

    /// Returns a future that resolves to the next available ID.
    ///
    /// # Errors
    ///
    /// This future may return an error if the generator encounters one.
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<ID, Self::Err>>
    where
        S: SleepProvider;
}

impl<G, ID, T, R> LinearIdGeneratorAsyncExt<ID, T, R> for G
where
    G: LinearIdGenerator<ID, T, R> + Sync,
    ID: LinearId + Send,
    T: TimeSource<ID::Ty> + Send,
    R: RandRange + Send,
{
    type Err = G::Err;

    fn next_id_async<S>(&self) -> impl Future<Output = ID>
    where
        S: SleepProvider,
        Self::Err: Into<Infallible>,
    {
        async {
            match <Self as LinearIdGeneratorAsyncExt<ID, T, R>>::try_next_id_async::<S>(self).await {
                Ok(id) => id,
                Err(e) => {
                    #[allow(unreachable_code)]
                    match e.into() {}
                }
            }
        }
    }

    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<ID, Self::Err>>
    where
        S: SleepProvider,
    {
        async {
            loop {
                let dur = match self.try_poll_id()? {
                    Poll::Ready { id } => return Ok(id),
                    Poll::Pending { yield_for } => {
                        self.resolution().duration_of(yield_for.to_u64())
                    }
                };
                S::sleep_for(dur).await;
            }
        }
    }
}
