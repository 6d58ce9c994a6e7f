//! Greedy handoff scheduling over tagged visibility windows.
//!
//! Both planners solve an interval-selection problem with a switch-count
//! objective: at each decision point, connect to the satellite whose
//! window reaches farthest. [`min_handoff_plan`] insists on continuous
//! coverage and reports infeasibility as an empty plan;
//! [`handoff_timeline`] tolerates gaps and reports them as explicit
//! events.

mod event;
mod window;

pub use event::ScheduleEvent;
pub use window::VisibilityWindow;


use qtty::Unit;

use crate::coverage::{self, Interval};
use crate::Id;

/// Computes a minimal-switch satellite sequence keeping a terminal
/// continuously connected from the earliest window start to the latest
/// window end.
///
/// Greedy interval cover: windows are sorted by start; among the windows
/// opening at or before the covered frontier, the farthest-reaching one is
/// selected and the frontier advances to its end. The overall target end
/// is computed once up front.
///
/// Returns an empty plan when continuous coverage is infeasible (some
/// instant of the span has no open window). That is a normal outcome, not
/// an error. An empty input yields an empty plan.
pub fn min_handoff_plan<U: Unit>(windows: &[VisibilityWindow<U>]) -> Vec<Id> {
    let Some(ranked) = rank_by_start(windows) else {
        return Vec::new();
    };

    let target = latest_end(windows);
    let mut frontier = ranked[0].start();
    let mut plan = Vec::new();
    let mut next = 0;

    while frontier.value() < target {
        match select_farthest(&ranked, &mut next, frontier.value()) {
            Some(choice) => {
                plan.push(choice.satellite().to_owned());
                frontier = choice.end();
            }
            // No open window extends past the frontier: infeasible.
            None => return Vec::new(),
        }
    }
    plan
}

/// Builds the full handoff timeline over the span implied by the data
/// (earliest start to latest end), with explicit [`ScheduleEvent::Gap`]
/// segments wherever no satellite is visible.
///
/// The concatenated event durations exactly tile the span.
pub fn handoff_timeline<U: Unit>(windows: &[VisibilityWindow<U>]) -> Vec<ScheduleEvent<U>> {
    let Some(ranked) = rank_by_start(windows) else {
        return Vec::new();
    };

    let span_end = latest_end(windows);
    let mut pointer = ranked[0].start();
    let mut events = Vec::new();
    let mut next = 0;

    while pointer.value() < span_end {
        match select_farthest(&ranked, &mut next, pointer.value()) {
            Some(choice) => {
                events.push(ScheduleEvent::Active {
                    satellite: choice.satellite().to_owned(),
                    connect: pointer,
                    disconnect: choice.end(),
                });
                pointer = choice.end();
            }
            None => {
                // `select_farthest` consumed every stale window, and the
                // latest-ending window is still ahead, so `next` is valid
                // and opens strictly after the pointer.
                let resume = ranked[next].start();
                events.push(ScheduleEvent::Gap {
                    start: pointer,
                    end: resume,
                });
                pointer = resume;
            }
        }
    }
    events
}

/// Peak number of simultaneously visible satellites; the sweep-line count
/// of [`coverage::max_concurrent`] applied to the bare windows.
pub fn max_concurrent<U: Unit>(windows: &[VisibilityWindow<U>]) -> usize {
    let bare: Vec<Interval<U>> = windows.iter().map(VisibilityWindow::window).collect();
    coverage::max_concurrent(&bare)
}

/// Windows sorted ascending by start, or `None` for empty input.
fn rank_by_start<U: Unit>(windows: &[VisibilityWindow<U>]) -> Option<Vec<&VisibilityWindow<U>>> {
    if windows.is_empty() {
        return None;
    }
    let mut ranked: Vec<&VisibilityWindow<U>> = windows.iter().collect();
    ranked.sort_by(|a, b| a.start().value().total_cmp(&b.start().value()));
    Some(ranked)
}

fn latest_end<U: Unit>(windows: &[VisibilityWindow<U>]) -> f64 {
    windows
        .iter()
        .map(|w| w.end().value())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Among windows opening at or before `frontier`, picks the one reaching
/// farthest past it, advancing `next` over everything scanned.
///
/// Scanned-but-rejected windows end at or before the chosen window's end,
/// so they can never become useful later; consuming them keeps the whole
/// plan O(n log n).
fn select_farthest<'a, U: Unit>(
    ranked: &[&'a VisibilityWindow<U>],
    next: &mut usize,
    frontier: f64,
) -> Option<&'a VisibilityWindow<U>> {
    let mut best: Option<&'a VisibilityWindow<U>> = None;
    while *next < ranked.len() && ranked[*next].start().value() <= frontier {
        let candidate = ranked[*next];
        if best.map_or(true, |b| candidate.end().value() > b.end().value()) {
            best = Some(candidate);
        }
        *next += 1;
    }
    best.filter(|w| w.end().value() > frontier)
}
