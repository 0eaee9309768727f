use core::{convert::Infallible, marker::PhantomData};

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

use crate::{
    generator::{
        LinearIdGenerator, Poll,
        state::{clamp_timestamp, draw_source, needs_source, next_after, step_source},
    },
    id::LinearId,
    rand::RandRange,
    time::{Resolution, TimeSource},
};

/// A lock-free Linear ID generator for 64-bit layouts.
///
/// The last issued ID is held in a single [`AtomicU64`] and advanced with a
/// compare-and-swap. When another thread wins the race the call returns
/// [`Poll::Pending`] with `yield_for == 0`, meaning retry immediately.
///
/// ## See Also
/// - [`BasicLinearIdGenerator`]
/// - [`LockLinearIdGenerator`]
///
/// [`BasicLinearIdGenerator`]: crate::generator::BasicLinearIdGenerator
/// [`LockLinearIdGenerator`]: crate::generator::LockLinearIdGenerator
pub struct AtomicLinearIdGenerator<ID, T, R>
where
    ID: LinearId<Ty = u64>,
    T: TimeSource<u64>,
    R: RandRange,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    time: T,
    rng: R,
    _id: PhantomData<ID>,
}

impl<ID, T, R> AtomicLinearIdGenerator<ID, T, R>
where
    ID: LinearId<Ty = u64>,
    T: TimeSource<u64>,
    R: RandRange,
{
    /// Creates a new generator with an unset source.
    ///
    /// # Example
    /// ```
    /// use linearid::{
    ///     generator::{AtomicLinearIdGenerator, Poll},
    ///     id::Lid64,
    ///     rand::ThreadRandom,
    ///     time::SystemClock,
    /// };
    ///
    /// let generator = AtomicLinearIdGenerator::new(SystemClock::seconds(), ThreadRandom);
    ///
    /// let id: Lid64 = loop {
    ///     match generator.poll_id() {
    ///         Poll::Ready { id } => break id,
    ///         Poll::Pending { .. } => core::hint::spin_loop(),
    ///     }
    /// };
    /// ```
    pub fn new(time: T, rng: R) -> Self {
        Self::from_components(0, 0, 0, time, rng)
    }

    /// Creates a generator whose last issued ID is `(timestamp, ticker,
    /// source)`. A zero `source` is treated as unset.
    pub fn from_components(timestamp: u64, ticker: u64, source: u64, time: T, rng: R) -> Self {
        let initial = ID::from_components(timestamp, ticker, source).to_raw();
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(initial)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(initial),
            time,
            rng,
            _id: PhantomData,
        }
    }

    /// Loads the state, installing a source first if it is unset.
    fn load_seeded(&self) -> ID {
        loop {
            let raw = self.state.load(Ordering::Acquire);
            let current = ID::from_raw(raw);
            if !needs_source(current) {
                break current;
            }
            let seeded = current.with_source(draw_source::<ID, R>(&self.rng));
            if self
                .state
                .compare_exchange(raw, seeded.to_raw(), Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                break seeded;
            }
        }
    }

    /// Generates a new ID, calling `f` with the ticks to wait whenever the
    /// ticker is saturated or a race was lost.
    pub fn next_id(&self, mut f: impl FnMut(u64)) -> ID {
        loop {
            match self.poll_id() {
                Poll::Ready { id } => break id,
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Attempts to generate the next available ID.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Poll<ID> {
        // Load before reading the clock so `now` is never older than the state.
        let current = self.load_seeded();
        let now = clamp_timestamp::<ID>(self.time.current_ticks());

        let Some(next) = next_after(current, now) else {
            return Poll::Pending { yield_for: 1 };
        };

        if self
            .state
            .compare_exchange(
                current.to_raw(),
                next.to_raw(),
                Ordering::AcqRel,
                Ordering::Relaxed,
            )
            .is_ok()
        {
            Poll::Ready { id: next }
        } else {
            // Another thread won the race; retry immediately.
            Poll::Pending { yield_for: 0 }
        }
    }

    /// Returns the source id, drawing one first if it is unset.
    pub fn ensure_source(&self) -> u64 {
        self.load_seeded().source()
    }

    /// Draws and stores a new source id, keeping the ticker state.
    pub fn reseed_source(&self) -> u64 {
        let source = draw_source::<ID, R>(&self.rng);
        let mut raw = self.state.load(Ordering::Acquire);
        loop {
            let updated = ID::from_raw(raw).with_source(source).to_raw();
            match self
                .state
                .compare_exchange_weak(raw, updated, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(actual) => raw = actual,
            }
        }
        #[cfg(feature = "tracing")]
        debug!(source, "reseeded source id");
        source
    }

    /// Steps the source id by one, wrapping past the maximum to 1.
    pub fn increment_source(&self) -> u64 {
        let mut raw = self.state.load(Ordering::Acquire);
        loop {
            let current = ID::from_raw(raw);
            let source = step_source::<ID>(current.source());
            match self.state.compare_exchange_weak(
                raw,
                current.with_source(source).to_raw(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break source,
                Err(actual) => raw = actual,
            }
        }
    }
}

impl<ID, T, R> LinearIdGenerator<ID, T, R> for AtomicLinearIdGenerator<ID, T, R>
where
    ID: LinearId<Ty = u64>,
    T: TimeSource<u64>,
    R: RandRange,
{
    type Err = Infallible;

    fn new(time: T, rng: R) -> Self {
        Self::new(time, rng)
    }

    fn resolution(&self) -> Resolution {
        self.time.resolution()
    }

    fn next_id(&self, f: impl FnMut(u64)) -> ID {
        self.next_id(f)
    }

    fn try_poll_id(&self) -> Result<Poll<ID>, Self::Err> {
        Ok(self.poll_id())
    }

    fn poll_id(&self) -> Poll<ID> {
        self.poll_id()
    }

    fn try_ensure_source(&self) -> Result<u64, Self::Err> {
        Ok(self.ensure_source())
    }

    fn try_reseed_source(&self) -> Result<u64, Self::Err> {
        Ok(self.reseed_source())
    }

    fn increment_source(&self) -> u64 {
        self.increment_source()
    }

    fn try_increment_source(&self) -> Result<u64, Self::Err> {
        Ok(self.increment_source())
    }
}
