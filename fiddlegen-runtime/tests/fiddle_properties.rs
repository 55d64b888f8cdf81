//! Property tests for fiddle-value denormalization.
//!
//! Uses proptest to verify:
//! 1. Range mappings are monotonic in the normalized value
//! 2. Range mappings hit their bounds exactly at 0 and 1
//! 3. Enumerated lists always pick an existing entry, the last one at 1.0

use fiddlegen_runtime::fiddle::{integer_list, integer_range, real_range};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_real_bounds() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e6..1.0e6_f64, 0.0..1.0e6_f64).prop_map(|(start, width)| (start, start + width))
}

fn arb_integer_bounds() -> impl Strategy<Value = (i32, i32)> {
    (-100_000..100_000_i32, 0..100_000_i32).prop_map(|(start, width)| (start, start + width))
}

fn arb_pair_of_units() -> impl Strategy<Value = (f64, f64)> {
    (0.0..=1.0_f64, 0.0..=1.0_f64).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

// ── 1. Monotonicity ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn real_range_is_monotonic((start, end) in arb_real_bounds(), (lo, hi) in arb_pair_of_units()) {
        prop_assert!(real_range(start, end, lo) <= real_range(start, end, hi));
    }

    #[test]
    fn integer_range_is_monotonic((start, end) in arb_integer_bounds(), (lo, hi) in arb_pair_of_units()) {
        prop_assert!(integer_range(start, end, lo) <= integer_range(start, end, hi));
    }
}

// ── 2. Exact bounds ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn real_range_hits_bounds((start, end) in arb_real_bounds()) {
        prop_assert_eq!(real_range(start, end, 0.0), start);
        prop_assert_eq!(real_range(start, end, 1.0), end);
    }

    #[test]
    fn integer_range_hits_bounds((start, end) in arb_integer_bounds()) {
        prop_assert_eq!(integer_range(start, end, 0.0), f64::from(start));
        prop_assert_eq!(integer_range(start, end, 1.0), f64::from(end));
    }

    #[test]
    fn range_stays_within_bounds((start, end) in arb_real_bounds(), t in 0.0..=1.0_f64) {
        let value = real_range(start, end, t);
        prop_assert!(value >= start && value <= end);
    }
}

// ── 3. Enumerated lists ──────────────────────────────────────────────

proptest! {
    #[test]
    fn integer_list_picks_an_entry(
        values in prop::collection::vec(-50..50_i32, 1..12),
        t in -0.5..1.5_f64,
    ) {
        let picked = integer_list(&values, t);
        prop_assert!(values.iter().any(|v| f64::from(*v) == picked));
    }

    #[test]
    fn integer_list_last_entry_at_one(values in prop::collection::vec(-50..50_i32, 1..12)) {
        let last = *values.last().unwrap();
        prop_assert_eq!(integer_list(&values, 1.0), f64::from(last));
    }

    #[test]
    fn integer_list_first_entry_at_zero(values in prop::collection::vec(-50..50_i32, 1..12)) {
        prop_assert_eq!(integer_list(&values, 0.0), f64::from(values[0]));
    }
}
