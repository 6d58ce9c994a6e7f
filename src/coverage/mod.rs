//! Coverage analysis over ground-to-satellite visibility windows.
//!
//! All routines operate on closed intervals `[start, end]`: windows that
//! merely touch (one ends exactly where the next begins) count as
//! continuous coverage. Inputs are copied before any in-place sort, so
//! caller-owned slices are never mutated.

mod error;
mod interval;

pub use error::CoverageError;
pub use interval::Interval;

use qtty::Unit;

/// Merges visibility windows into the minimal sorted, non-overlapping set
/// covering the same point-set as the union of the inputs.
///
/// Windows are sorted by start, then scanned left to right; the current
/// run is extended whenever the next window starts at or before the
/// current end (touching merges).
pub fn merge<U: Unit>(windows: &[Interval<U>]) -> Vec<Interval<U>> {
    let mut sorted = windows.to_vec();
    sorted.sort_by(|a, b| {
        a.start()
            .value()
            .total_cmp(&b.start().value())
    });

    let mut merged: Vec<Interval<U>> = Vec::with_capacity(sorted.len());
    for window in sorted {
        if let Some(last) = merged.last_mut() {
            if last.end().value() >= window.start().value() {
                // Overlapping or touching – extend the current run.
                if window.end().value() > last.end().value() {
                    *last = Interval::new(last.start(), window.end());
                }
            } else {
                merged.push(window);
            }
        } else {
            merged.push(window);
        }
    }
    merged
}

/// Returns the gaps inside `demand` not covered by any input window,
/// in ascending order. Leading and trailing gaps are included.
///
/// Every reported gap has strictly positive duration. Windows lying
/// outside the demand span are clamped by the cursor walk rather than
/// clipped up front, so they can neither mask nor create boundary gaps.
pub fn coverage_gaps<U: Unit>(windows: &[Interval<U>], demand: Interval<U>) -> Vec<Interval<U>> {
    let mut gaps = Vec::new();
    let mut cursor = demand.start();

    for window in merge(windows) {
        if window.start().value() >= demand.end().value() {
            break;
        }
        if window.start().value() > cursor.value() {
            gaps.push(Interval::new(cursor, window.start()));
        }
        if window.end().value() > cursor.value() {
            cursor = window.end();
        }
    }

    if cursor.value() < demand.end().value() {
        gaps.push(Interval::new(cursor, demand.end()));
    }

    gaps
}

/// Returns true iff the windows cover every instant of `demand`.
pub fn has_continuous_coverage<U: Unit>(windows: &[Interval<U>], demand: Interval<U>) -> bool {
    coverage_gaps(windows, demand).is_empty()
}

/// Peak number of simultaneously open visibility windows.
///
/// Sweep line over `(time, delta)` events: +1 at each start, -1 at each
/// end. At equal timestamps starts are processed before ends, so two
/// windows touching at a single point count as concurrent for an instant.
pub fn max_concurrent<U: Unit>(windows: &[Interval<U>]) -> usize {
    let mut events: Vec<(f64, i32)> = Vec::with_capacity(windows.len() * 2);
    for window in windows {
        events.push((window.start().value(), 1));
        events.push((window.end().value(), -1));
    }
    // Sort by time; at ties the +1 sorts after -1 under plain ordering,
    // so compare the delta in reverse to put starts first.
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut open = 0i32;
    let mut peak = 0i32;
    for (_, delta) in events {
        open += delta;
        if open > peak {
            peak = open;
        }
    }
    peak as usize
}
