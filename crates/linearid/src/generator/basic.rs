use core::{cell::Cell, convert::Infallible};

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

/// A non-concurrent Linear ID generator suitable for single-threaded
/// environments.
///
/// This generator is lightweight and fast, but **not thread-safe**. Callers
/// that share it must serialize access themselves.
///
/// ## See Also
/// - [`LockLinearIdGenerator`]
/// - [`AtomicLinearIdGenerator`]
///
/// [`LockLinearIdGenerator`]: crate::generator::LockLinearIdGenerator
/// [`AtomicLinearIdGenerator`]: crate::generator::AtomicLinearIdGenerator
pub struct BasicLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    state: Cell<ID>,
    time: T,
    rng: R,
}

impl<ID, T, R> BasicLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    /// Creates a new generator with an unset source.
    ///
    /// The source is drawn from `rng` on the first call that needs it.
    ///
    /// # Example
    /// ```
    /// use linearid::{
    ///     generator::BasicLinearIdGenerator,
    ///     id::{Lid64, LinearId},
    ///     rand::ThreadRandom,
    ///     time::SystemClock,
    /// };
    ///
    /// let generator = BasicLinearIdGenerator::new(SystemClock::seconds(), ThreadRandom);
    ///
    /// let a: Lid64 = generator.next_id(|_| std::thread::yield_now());
    /// let b: Lid64 = generator.next_id(|_| std::thread::yield_now());
    /// assert!(a < b);
    /// assert_eq!(a.source(), b.source());
    /// ```
    pub fn new(time: T, rng: R) -> Self {
        Self::from_components(ID::ZERO, ID::ZERO, ID::ZERO, time, rng)
    }

    /// Creates a generator whose last issued ID is `(timestamp, ticker,
    /// source)`.
    ///
    /// Useful for restoring state or for starting with a preset source. A
    /// zero `source` is treated as unset.
    pub fn from_components(timestamp: ID::Ty, ticker: ID::Ty, source: ID::Ty, time: T, rng: R) -> Self {
        Self {
            state: Cell::new(ID::from_components(timestamp, ticker, source)),
            time,
            rng,
        }
    }

    /// Generates a new ID, calling `f` with the ticks to wait whenever the
    /// ticker is saturated.
    pub fn next_id(&self, mut f: impl FnMut(ID::Ty)) -> ID {
        loop {
            match self.poll_id() {
                Poll::Ready { id } => break id,
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Fallible form of [`Self::next_id`].
    ///
    /// # Errors
    ///
    /// This method is infallible for this generator. Use [`Self::next_id`]
    /// instead.
    pub fn try_next_id(&self, f: impl FnMut(ID::Ty)) -> Result<ID, Infallible> {
        Ok(self.next_id(f))
    }

    /// Attempts to generate the next available ID.
    ///
    /// # Example
    /// ```
    /// use linearid::{
    ///     generator::{BasicLinearIdGenerator, Poll},
    ///     id::Lid128,
    ///     rand::ThreadRandom,
    ///     time::SystemClock,
    /// };
    ///
    /// let generator = BasicLinearIdGenerator::new(SystemClock::seconds(), ThreadRandom);
    ///
    /// let id: Lid128 = loop {
    ///     match generator.poll_id() {
    ///         Poll::Ready { id } => break id,
    ///         Poll::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Poll<ID> {
        let now = clamp_timestamp::<ID>(self.time.current_ticks());
        let mut last = self.state.get();
        if needs_source(last) {
            last = last.with_source(draw_source::<ID, R>(&self.rng));
            self.state.set(last);
        }

        match next_after(last, now) {
            Some(id) => {
                self.state.set(id);
                Poll::Ready { id }
            }
            None => Poll::Pending { yield_for: ID::ONE },
        }
    }

    /// Fallible form of [`Self::poll_id`].
    ///
    /// # Errors
    ///
    /// This method is infallible for this generator. Use [`Self::poll_id`]
    /// instead.
    pub fn try_poll_id(&self) -> Result<Poll<ID>, Infallible> {
        Ok(self.poll_id())
    }

    /// Returns the source id, drawing one first if it is unset.
    pub fn ensure_source(&self) -> ID::Ty {
        let last = self.state.get();
        if !needs_source(last) {
            return last.source();
        }
        let source = draw_source::<ID, R>(&self.rng);
        self.state.set(last.with_source(source));
        source
    }

    /// Draws and stores a new source id, keeping the ticker state.
    pub fn reseed_source(&self) -> ID::Ty {
        let source = draw_source::<ID, R>(&self.rng);
        self.state.set(self.state.get().with_source(source));
        #[cfg(feature = "tracing")]
        debug!(source = %source, "reseeded source id");
        source
    }

    /// Steps the source id by one, wrapping past the maximum to 1.
    pub fn increment_source(&self) -> ID::Ty {
        let last = self.state.get();
        let source = step_source::<ID>(last.source());
        self.state.set(last.with_source(source));
        source
    }
}

impl<ID, T, R> LinearIdGenerator<ID, T, R> for BasicLinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    type Err = Infallible;

    fn new(time: T, rng: R) -> Self {
        Self::new(time, rng)
    }

    fn resolution(&self) -> Resolution {
        self.time.resolution()
    }

    fn next_id(&self, f: impl FnMut(ID::Ty)) -> ID {
        self.next_id(f)
    }

    fn try_next_id(&self, f: impl FnMut(ID::Ty)) -> Result<ID, Self::Err> {
        self.try_next_id(f)
    }

    fn poll_id(&self) -> Poll<ID> {
        self.poll_id()
    }

    fn try_poll_id(&self) -> Result<Poll<ID>, Self::Err> {
        self.try_poll_id()
    }

    fn try_ensure_source(&self) -> Result<ID::Ty, Self::Err> {
        Ok(self.ensure_source())
    }

    fn try_reseed_source(&self) -> Result<ID::Ty, Self::Err> {
        Ok(self.reseed_source())
    }

    fn increment_source(&self) -> ID::Ty {
        self.increment_source()
    }

    fn try_increment_source(&self) -> Result<ID::Ty, Self::Err> {
        Ok(self.increment_source())
    }
}
