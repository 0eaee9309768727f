#[cfg(not(feature = "parking-lot"))]
pub use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "parking-lot")]
pub use parking_lot::{Mutex, MutexGuard};

/// Error type of [`LockLinearIdGenerator`](crate::generator::LockLinearIdGenerator).
///
/// A std mutex can be poisoned; a `parking_lot` mutex cannot, so with the
/// `parking-lot` feature the lock generator is infallible.
#[cfg(not(feature = "parking-lot"))]
pub type LockError = crate::Error;

/// Error type of [`LockLinearIdGenerator`](crate::generator::LockLinearIdGenerator).
///
/// A std mutex can be poisoned; a `parking_lot` mutex cannot, so with the
/// `parking-lot` feature the lock generator is infallible.
#[cfg(feature = "parking-lot")]
pub type LockError = core::convert::Infallible;
