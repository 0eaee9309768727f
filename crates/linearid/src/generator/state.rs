//! Transition rules shared by every generator flavour.

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

use crate::{
    id::{Id, LinearId},
    rand::{RandRange, random_in_range_u128},
};

/// Computes the ID that follows `last` when the clock reads `now`.
///
/// A different tick, ahead of or behind the last one, restarts the ticker at
/// zero. Within the same tick the ticker is incremented. Returns `None` when
/// the ticker is saturated.
#[inline]
pub(crate) fn next_after<ID: LinearId>(last: ID, now: ID::Ty) -> Option<ID> {
    if now != last.timestamp() {
        Some(last.rollover_to_timestamp(now))
    } else if last.has_ticker_room() {
        Some(last.increment_ticker())
    } else {
        #[cfg(feature = "tracing")]
        trace!(timestamp = %now, "ticker saturated");
        None
    }
}

/// Fits a clock reading into the timestamp field.
///
/// A reading past `max_timestamp()` is pinned to it rather than wrapped, so
/// IDs never sort behind ones already issued. The generator then stalls once
/// that last tick's ticker is exhausted. This happens when the clock's
/// resolution is too fine for the layout, e.g. milliseconds with a 32 or
/// 33-bit timestamp; such clocks need a layout with a wider timestamp.
#[inline]
pub(crate) fn clamp_timestamp<ID: LinearId>(ticks: ID::Ty) -> ID::Ty {
    let max = ID::max_timestamp();
    if ticks > max {
        #[cfg(feature = "tracing")]
        warn_timestamp_overflow(ticks.into(), max.into());
        return max;
    }
    ticks
}

#[cfg(feature = "tracing")]
fn warn_timestamp_overflow(ticks: u128, max: u128) {
    use std::sync::atomic::{AtomicBool, Ordering};

    static WARNED: AtomicBool = AtomicBool::new(false);
    if !WARNED.swap(true, Ordering::Relaxed) {
        warn!(ticks, max, "clock reading exceeds the timestamp field, pinning to its maximum");
    }
}

/// Returns true when `id` needs a source drawn before it can be issued.
#[inline]
pub(crate) fn needs_source<ID: LinearId>(id: ID) -> bool {
    id.source() == ID::ZERO && ID::max_source() != ID::ZERO
}

/// Draws a fresh source id uniformly from `[1, 2^S - 1]`.
///
/// Layouts without a source field get zero and the RNG is never consulted.
pub(crate) fn draw_source<ID, R>(rng: &R) -> ID::Ty
where
    ID: LinearId,
    R: RandRange,
{
    let max: u128 = ID::max_source().into();
    if max == 0 {
        return ID::ZERO;
    }
    let raw = random_in_range_u128(rng, 1, max);
    // `raw <= max_source`, so the conversion cannot fail.
    let source = <ID::Ty as TryFrom<u128>>::try_from(raw).unwrap_or(ID::ONE);
    #[cfg(feature = "tracing")]
    debug!(source = %source, "drew source id");
    source
}

/// Returns the source after `source`, wrapping past `2^S - 1` back to 1.
///
/// An unset source steps to 1. Layouts without a source field stay at zero.
#[inline]
pub(crate) fn step_source<ID: LinearId>(source: ID::Ty) -> ID::Ty {
    let max = ID::max_source();
    if max == ID::ZERO {
        ID::ZERO
    } else if source >= max {
        ID::ONE
    } else {
        source + ID::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{Lid64, Llid};

    #[test]
    fn new_tick_resets_ticker() {
        let last = Lid64::pack(10, 9, 3).unwrap();
        assert_eq!(next_after(last, 11).unwrap().unpack(), (11, 0, 3));
        // Backward steps reset too.
        assert_eq!(next_after(last, 9).unwrap().unpack(), (9, 0, 3));
    }

    #[test]
    fn same_tick_increments_until_saturated() {
        let last = Lid64::pack(10, 9, 3).unwrap();
        assert_eq!(next_after(last, 10).unwrap().unpack(), (10, 10, 3));

        let full = Lid64::pack(10, Lid64::max_ticker(), 3).unwrap();
        assert!(next_after(full, 10).is_none());
        assert!(next_after(full, 11).is_some());
    }

    #[test]
    fn timestamp_past_field_width_is_pinned() {
        let max = Lid64::max_timestamp();
        assert_eq!(clamp_timestamp::<Lid64>(max - 1), max - 1);
        assert_eq!(clamp_timestamp::<Lid64>(max), max);
        assert_eq!(clamp_timestamp::<Lid64>(1 << 32), max);
        assert_eq!(clamp_timestamp::<Lid64>(u64::MAX), max);
    }

    #[test]
    fn source_steps_and_wraps_to_one() {
        assert_eq!(step_source::<Lid64>(0), 1);
        assert_eq!(step_source::<Lid64>(41), 42);
        assert_eq!(step_source::<Lid64>(Lid64::max_source()), 1);
        assert_eq!(step_source::<Llid>(0), 0);
    }

    #[test]
    fn sourceless_layout_never_needs_source() {
        assert!(!needs_source(Llid::from_raw(0)));
        assert!(needs_source(Lid64::from_raw(0)));
        assert!(!needs_source(Lid64::pack(0, 0, 1).unwrap()));
    }
}
