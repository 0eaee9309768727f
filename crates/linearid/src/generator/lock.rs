use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

use crate::{
    generator::{
        LinearIdGenerator, LockError, Mutex, MutexGuard, Poll,
        state::{clamp_timestamp, draw_source, needs_source, next_after, step_source},
    },
    id::LinearId,
    rand::RandRange,
    time::{Resolution, TimeSource},
};

/// A lock-based Linear ID generator suitable for multi-threaded environments.
///
/// The last issued ID lives in an [`Arc<Mutex<_>>`]; the whole read-compare-
/// increment step runs under the lock. Clones share that state, so every
/// clone draws from the same sequence and source.
///
/// With the `parking-lot` feature the mutex cannot poison and the generator
/// is infallible. With `cache-padded` the mutex sits on its own cache line.
///
/// ## See Also
/// - [`BasicLinearIdGenerator`]
/// - [`AtomicLinearIdGenerator`]
///
/// [`BasicLinearIdGenerator`]: crate::generator::BasicLinearIdGenerator
/// [`AtomicLinearIdGenerator`]: crate::generator::AtomicLinearIdGenerator
pub struct LockLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<ID>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<ID>>,
    time: T,
    rng: R,
}

impl<ID, T, R> Clone for LockLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty> + Clone,
    R: RandRange + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            time: self.time.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<ID, T, R> LockLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    /// Creates a new generator with an unset source.
    ///
    /// # Example
    /// ```
    /// use linearid::{
    ///     generator::LockLinearIdGenerator,
    ///     id::Lid128,
    ///     rand::ThreadRandom,
    ///     time::MonotonicClock,
    /// };
    ///
    /// let generator = LockLinearIdGenerator::new(MonotonicClock::seconds(), ThreadRandom);
    ///
    /// let id: Lid128 = generator
    ///     .try_next_id(|_| std::thread::yield_now())
    ///     .expect("lock poisoned");
    /// ```
    pub fn new(time: T, rng: R) -> Self {
        Self::from_components(ID::ZERO, ID::ZERO, ID::ZERO, time, rng)
    }

    /// Creates a generator whose last issued ID is `(timestamp, ticker,
    /// source)`. A zero `source` is treated as unset.
    pub fn from_components(timestamp: ID::Ty, ticker: ID::Ty, source: ID::Ty, time: T, rng: R) -> Self {
        let id = ID::from_components(timestamp, ticker, source);
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(id))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(id)),
            time,
            rng,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ID>, LockError> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    /// Generates a new ID, calling `f` with the ticks to wait whenever the
    /// ticker is saturated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`](crate::Error) if another thread
    /// panicked while holding the lock (std mutex only).
    pub fn try_next_id(&self, mut f: impl FnMut(ID::Ty)) -> Result<ID, LockError> {
        loop {
            match self.try_poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Attempts to generate the next available ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`](crate::Error) if another thread
    /// panicked while holding the lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll<ID>, LockError> {
        let mut last = self.lock()?;
        // Read under the lock so a stale reading never looks like a step back.
        let now = clamp_timestamp::<ID>(self.time.current_ticks());
        if needs_source(*last) {
            *last = last.with_source(draw_source::<ID, R>(&self.rng));
        }

        match next_after(*last, now) {
            Some(id) => {
                *last = id;
                Ok(Poll::Ready { id })
            }
            None => Ok(Poll::Pending { yield_for: ID::ONE }),
        }
    }

    /// Returns the source id, drawing one first if it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`](crate::Error) if another thread
    /// panicked while holding the lock (std mutex only).
    pub fn try_ensure_source(&self) -> Result<ID::Ty, LockError> {
        let mut last = self.lock()?;
        if needs_source(*last) {
            *last = last.with_source(draw_source::<ID, R>(&self.rng));
        }
        Ok(last.source())
    }

    /// Draws and stores a new source id, keeping the ticker state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`](crate::Error) if another thread
    /// panicked while holding the lock (std mutex only).
    pub fn try_reseed_source(&self) -> Result<ID::Ty, LockError> {
        let mut last = self.lock()?;
        let source = draw_source::<ID, R>(&self.rng);
        *last = last.with_source(source);
        #[cfg(feature = "tracing")]
        debug!(source = %source, "reseeded source id");
        Ok(source)
    }

    /// Steps the source id by one, wrapping past the maximum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`](crate::Error) if another thread
    /// panicked while holding the lock (std mutex only).
    pub fn try_increment_source(&self) -> Result<ID::Ty, LockError> {
        let mut last = self.lock()?;
        let source = step_source::<ID>(last.source());
        *last = last.with_source(source);
        Ok(source)
    }
}

impl<ID, T, R> LinearIdGenerator<ID, T, R> for LockLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    type Err = LockError;

    fn new(time: T, rng: R) -> Self {
        Self::new(time, rng)
    }

    fn resolution(&self) -> Resolution {
        self.time.resolution()
    }

    fn try_next_id(&self, f: impl FnMut(ID::Ty)) -> Result<ID, Self::Err> {
        self.try_next_id(f)
    }

    fn try_poll_id(&self) -> Result<Poll<ID>, Self::Err> {
        self.try_poll_id()
    }

    fn try_ensure_source(&self) -> Result<ID::Ty, Self::Err> {
        self.try_ensure_source()
    }

    fn try_reseed_source(&self) -> Result<ID::Ty, Self::Err> {
        self.try_reseed_source()
    }

    fn try_increment_source(&self) -> Result<ID::Ty, Self::Err> {
        self.try_increment_source()
    }
}
