// src/monitor.rs
//
// Polling state machine. Two states, keyed on whether the last conclusive
// verdict said "available": alerts fire exactly on transitions, never while
// a state holds, and an indeterminate cycle changes nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::classify::{self, Verdict};
use crate::core::signals::SignalSet;
use crate::notify::{self, Notifier};
use crate::params;
use crate::render::Renderer;

/// The only state that survives across checks. Passed explicitly through the
/// loop so the transition logic stays testable without any I/O.
pub struct MonitorState {
    /// True iff the most recent conclusive verdict was `Available`.
    pub last_known_available: bool,
    /// Diagnostics only.
    pub check_count: u64,
}

impl MonitorState {
    pub fn new() -> Self {
        Self {
            last_known_available: false,
            check_count: 0,
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct Cadence {
    pub default: Duration,
    /// Used for exactly one cycle after tickets first look available.
    pub fast: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

pub struct CycleOutcome {
    pub alert: Option<Alert>,
    pub next_interval: Duration,
}

/// Pure transition function: fold one verdict into the state and decide what
/// (if anything) to announce and how long to wait before the next check.
pub fn step(state: &mut MonitorState, verdict: &Verdict, cadence: Cadence) -> CycleOutcome {
    match verdict {
        Verdict::Available(_) => {
            if state.last_known_available {
                // Already alerted; stay quiet.
                return CycleOutcome {
                    alert: None,
                    next_interval: cadence.default,
                };
            }
            state.last_known_available = true;
            CycleOutcome {
                alert: Some(Alert {
                    title: s!("Tickets Available!"),
                    message: format!(
                        "Thursday tickets may be available!\n{}",
                        params::EVENT_URL
                    ),
                }),
                next_interval: cadence.fast,
            }
        }
        Verdict::Unavailable(_) => {
            if !state.last_known_available {
                return CycleOutcome {
                    alert: None,
                    next_interval: cadence.default,
                };
            }
            state.last_known_available = false;
            CycleOutcome {
                alert: Some(Alert {
                    title: s!("Tickets Status Changed"),
                    message: s!("Thursday ticket status changed - may have been sold"),
                }),
                next_interval: cadence.default,
            }
        }
        // No ticket-state information: no alert, no state change.
        Verdict::Indeterminate(_) => CycleOutcome {
            alert: None,
            next_interval: cadence.default,
        },
    }
}

/// Drive checks until `stop` is raised. One check in flight at a time; the
/// rendering session acquired for a cycle is released before the next one
/// starts (the renderer holds it only inside `render`).
pub fn run_loop<R: Renderer, N: Notifier>(
    renderer: &mut R,
    notifier: &N,
    signals: &SignalSet,
    state: &mut MonitorState,
    cadence: Cadence,
    stop: &AtomicBool,
) {
    while !stop.load(Ordering::Relaxed) {
        state.check_count += 1;
        info!(check = state.check_count, "checking {}", params::EVENT_URL);

        let verdict = match renderer.render(params::EVENT_URL, params::PAGE_LOAD_TIMEOUT) {
            Ok(page) => classify::classify(&page, params::TARGET_LABEL, signals),
            // Per-cycle failures degrade to "no conclusion"; the loop goes on.
            Err(e) => Verdict::Indeterminate(e.to_string()),
        };

        match &verdict {
            Verdict::Available(reason) => info!("FOUND: {reason}"),
            Verdict::Unavailable(reason) => info!("status: {reason}"),
            Verdict::Indeterminate(reason) => warn!("{reason}"),
        }

        let outcome = step(state, &verdict, cadence);
        if let Some(alert) = &outcome.alert {
            notify::deliver(notifier, alert);
        }

        info!("next check in {}s", outcome.next_interval.as_secs());
        sleep_interruptible(outcome.next_interval, stop);
    }
}

/// Sleep in one-second slices so an operator interrupt is honored within one
/// slice rather than a full polling interval.
pub fn sleep_interruptible(total: Duration, stop: &AtomicBool) {
    let mut remaining = total;
    while !remaining.is_zero() && !stop.load(Ordering::Relaxed) {
        let slice = remaining.min(Duration::from_secs(1));
        thread::sleep(slice);
        remaining -= slice;
    }
}
