#![cfg_attr(docsrs, feature(doc_cfg))]
//! Linear IDs: process-local, time-ordered, collision-resistant identifiers.
//!
//! A Linear ID packs three fields into one fixed-width integer, most
//! significant first:
//!
//! ```text
//! +----------------+-------------+-------------+
//! | timestamp (T)  | ticker (K)  | source (S)  |
//! +----------------+-------------+-------------+
//! |<-- MSB ------ T + K + S bits ------ LSB -->|
//! ```
//!
//! - `timestamp`: ticks since the Unix epoch. The predefined layouts are
//!   sized for seconds; millisecond clocks need a layout with a timestamp of
//!   at least 41 bits.
//! - `ticker`: a per-tick sequence number that resets on every new tick.
//! - `source`: a random, non-zero id drawn once per generator from a
//!   cryptographically secure RNG.
//!
//! # Example
//!
//! ```
//! use linearid::{
//!     generator::BasicLinearIdGenerator,
//!     id::{Lid128, LinearId},
//!     codec::LinearIdCodecExt,
//!     rand::ThreadRandom,
//!     time::SystemClock,
//! };
//!
//! let generator = BasicLinearIdGenerator::new(SystemClock::seconds(), ThreadRandom);
//! let id: Lid128 = generator.next_id(|_| std::thread::yield_now());
//!
//! assert_ne!(id.source(), 0);
//! let hex = id.to_hex();
//! assert_eq!(hex.len(), 32);
//! assert_eq!(Lid128::from_hex(&hex).unwrap(), id);
//! ```

pub mod codec;
mod error;
#[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
#[cfg(feature = "futures")]
pub mod futures;
pub mod generator;
pub mod id;
pub mod rand;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
pub mod time;

pub use crate::error::*;
