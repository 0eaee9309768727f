use core::{convert::Infallible, fmt};

use crate::{
    generator::Poll,
    id::LinearId,
    rand::RandRange,
    time::{Resolution, TimeSource},
};

/// A minimal interface for generating Linear IDs.
///
/// Every implementation shares one state machine: the generator remembers the
/// last ID it issued, and the next ID is derived from it and the current
/// clock reading.
///
/// - A tick different from the last one restarts the ticker at zero.
/// - The same tick increments the ticker.
/// - A saturated ticker yields [`Poll::Pending`] until the tick changes.
///
/// The source is drawn lazily on first use and then kept, so IDs from one
/// generator always carry the same source until it is reseeded.
pub trait LinearIdGenerator<ID, T, R>
where
    ID: LinearId,
    T: TimeSource<ID::Ty>,
    R: RandRange,
{
    /// The error type returned by the fallible methods.
    type Err: fmt::Debug;

    /// Creates a new generator with an unset source.
    fn new(time: T, rng: R) -> Self;

    /// Returns the tick length of the underlying clock.
    fn resolution(&self) -> Resolution;

    /// Generates the next ID, calling `f` with the number of ticks to back off
    /// whenever the ticker is saturated.
    ///
    /// This is the infallible counterpart to
    /// [`LinearIdGenerator::try_next_id`].
    fn next_id(&self, f: impl FnMut(ID::Ty)) -> ID
    where
        Self::Err: Into<Infallible>,
    {
        match self.try_next_id(f) {
            Ok(id) => id,
            Err(e) => {
                #[allow(unreachable_code)]
                // `into()` satisfies the trait bound at compile time.
                match e.into() {}
            }
        }
    }

    /// Generates the next ID with fallible error handling.
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and it
    /// is poisoned.
    fn try_next_id(&self, mut f: impl FnMut(ID::Ty)) -> Result<ID, Self::Err> {
        loop {
            match self.try_poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Makes a single non-blocking attempt to generate an ID.
    fn poll_id(&self) -> Poll<ID>
    where
        Self::Err: Into<Infallible>,
    {
        match self.try_poll_id() {
            Ok(status) => status,
            Err(e) => {
                #[allow(unreachable_code)]
                match e.into() {}
            }
        }
    }

    /// Makes a single non-blocking attempt to generate an ID with fallible
    /// error handling.
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and it
    /// is poisoned.
    fn try_poll_id(&self) -> Result<Poll<ID>, Self::Err>;

    /// Returns the source id, drawing one first if it is still unset.
    ///
    /// Repeated calls return the same non-zero value until the source is
    /// reseeded. Layouts without a source field always return zero.
    fn ensure_source(&self) -> ID::Ty
    where
        Self::Err: Into<Infallible>,
    {
        match self.try_ensure_source() {
            Ok(source) => source,
            Err(e) => {
                #[allow(unreachable_code)]
                match e.into() {}
            }
        }
    }

    /// Fallible version of [`LinearIdGenerator::ensure_source`].
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and it
    /// is poisoned.
    fn try_ensure_source(&self) -> Result<ID::Ty, Self::Err>;

    /// Draws a new source id unconditionally and returns it.
    ///
    /// The ticker state is kept, so ordering is unaffected. Layouts without a
    /// source field always return zero.
    fn reseed_source(&self) -> ID::Ty
    where
        Self::Err: Into<Infallible>,
    {
        match self.try_reseed_source() {
            Ok(source) => source,
            Err(e) => {
                #[allow(unreachable_code)]
                match e.into() {}
            }
        }
    }

    /// Fallible version of [`LinearIdGenerator::reseed_source`].
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and it
    /// is poisoned.
    fn try_reseed_source(&self) -> Result<ID::Ty, Self::Err>;

    /// Steps the source id by one and returns the new value.
    ///
    /// Past `2^S - 1` the source wraps to 1, and an unset source becomes 1.
    /// The RNG is not consulted, so a process can hand out a deterministic
    /// run of sources. Layouts without a source field always return zero.
    fn increment_source(&self) -> ID::Ty
    where
        Self::Err: Into<Infallible>,
    {
        match self.try_increment_source() {
            Ok(source) => source,
            Err(e) => {
                #[allow(unreachable_code)]
                match e.into() {}
            }
        }
    }

    /// Fallible version of [`LinearIdGenerator::increment_source`].
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and it
    /// is poisoned.
    fn try_increment_source(&self) -> Result<ID::Ty, Self::Err>;
}
