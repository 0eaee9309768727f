use crate::id::Id;

/// Outcome of a single non-blocking generation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Poll<T: Id> {
    /// A new ID was issued.
    Ready { id: T },
    /// The ticker is saturated (or another thread won a race). Try again after
    /// `yield_for` ticks; zero means retry immediately.
    Pending { yield_for: T::Ty },
}
