// tests/monitor.rs
//
// State machine and loop scheduling, driven with a scripted renderer and a
// recording notifier. Cadence is zeroed so nothing actually sleeps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use ticket_watch::classify::Verdict;
use ticket_watch::core::page::PageSnapshot;
use ticket_watch::core::signals::SignalSet;
use ticket_watch::monitor::{Cadence, MonitorState, run_loop, sleep_interruptible, step};
use ticket_watch::notify::{Notifier, NullNotifier};
use ticket_watch::render::{RenderError, Renderer};

const CADENCE: Cadence = Cadence {
    default: Duration::from_secs(300),
    fast: Duration::from_secs(60),
};

fn available() -> Verdict {
    Verdict::Available("enabled".into())
}
fn unavailable() -> Verdict {
    Verdict::Unavailable("sold out".into())
}
fn indeterminate() -> Verdict {
    Verdict::Indeterminate("page load timeout".into())
}

/* ---------------- step: transition table ---------------- */

#[test]
fn watching_plus_available_alerts_and_speeds_up() {
    let mut state = MonitorState::new();
    let out = step(&mut state, &available(), CADENCE);
    assert!(state.last_known_available);
    let alert = out.alert.expect("rising edge must alert");
    assert_eq!(alert.title, "Tickets Available!");
    assert_eq!(out.next_interval, CADENCE.fast);
}

#[test]
fn watching_plus_unavailable_stays_quiet() {
    let mut state = MonitorState::new();
    let out = step(&mut state, &unavailable(), CADENCE);
    assert!(!state.last_known_available);
    assert!(out.alert.is_none());
    assert_eq!(out.next_interval, CADENCE.default);
}

#[test]
fn alerted_plus_available_is_idempotent() {
    let mut state = MonitorState::new();
    step(&mut state, &available(), CADENCE);

    // Repeated Available verdicts never re-trigger the alert.
    for _ in 0..3 {
        let out = step(&mut state, &available(), CADENCE);
        assert!(out.alert.is_none());
        assert_eq!(out.next_interval, CADENCE.default);
    }
    assert!(state.last_known_available);
}

#[test]
fn alerted_plus_unavailable_alerts_exactly_once() {
    let mut state = MonitorState::new();
    step(&mut state, &available(), CADENCE);

    let out = step(&mut state, &unavailable(), CADENCE);
    let alert = out.alert.expect("falling edge must alert");
    assert_eq!(alert.title, "Tickets Status Changed");
    assert!(!state.last_known_available);
    assert_eq!(out.next_interval, CADENCE.default);

    // And only once per transition.
    let out = step(&mut state, &unavailable(), CADENCE);
    assert!(out.alert.is_none());
}

#[test]
fn fast_cadence_lasts_exactly_one_cycle() {
    let mut state = MonitorState::new();
    assert_eq!(step(&mut state, &available(), CADENCE).next_interval, CADENCE.fast);
    assert_eq!(step(&mut state, &available(), CADENCE).next_interval, CADENCE.default);
    assert_eq!(step(&mut state, &available(), CADENCE).next_interval, CADENCE.default);
}

#[test]
fn indeterminate_never_mutates_state_or_alerts() {
    let mut state = MonitorState::new();
    let out = step(&mut state, &indeterminate(), CADENCE);
    assert!(!state.last_known_available);
    assert!(out.alert.is_none());
    assert_eq!(out.next_interval, CADENCE.default);

    // Same while alerted.
    step(&mut state, &available(), CADENCE);
    let out = step(&mut state, &indeterminate(), CADENCE);
    assert!(state.last_known_available);
    assert!(out.alert.is_none());
}

/* ---------------- run_loop: end to end with fakes ---------------- */

const DISABLED_PAGE: &str =
    r#"<html><body><button class="btn disabled">Torsdag</button></body></html>"#;
const ENABLED_PAGE: &str =
    r#"<html><body><div><button class="btn">Torsdag</button></div></body></html>"#;

/// Serves a fixed script of pages/errors, then raises the stop flag once the
/// script runs out so the loop winds down.
struct ScriptedRenderer {
    script: Vec<Result<String, RenderError>>,
    cursor: usize,
    stop: Arc<AtomicBool>,
}

impl ScriptedRenderer {
    fn new(script: Vec<Result<String, RenderError>>, stop: Arc<AtomicBool>) -> Self {
        Self { script, cursor: 0, stop }
    }
}

impl Renderer for ScriptedRenderer {
    fn render(&mut self, _url: &str, _timeout: Duration) -> Result<PageSnapshot, RenderError> {
        let slot = std::mem::replace(
            &mut self.script[self.cursor],
            Err(RenderError::Browser("script slot spent".into())),
        );
        self.cursor += 1;
        if self.cursor == self.script.len() {
            self.stop.store(true, Ordering::Relaxed);
        }
        slot.map(|html| PageSnapshot::parse(&html))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.alerts.lock().unwrap().push((title.into(), message.into()));
    }
}

fn zero_cadence() -> Cadence {
    Cadence {
        default: Duration::ZERO,
        fast: Duration::ZERO,
    }
}

#[test]
fn full_cycle_alerts_once_per_transition() {
    let stop = Arc::new(AtomicBool::new(false));
    let mut renderer = ScriptedRenderer::new(
        vec![
            Ok(DISABLED_PAGE.into()),
            Ok(ENABLED_PAGE.into()),
            Ok(ENABLED_PAGE.into()),
            Ok(DISABLED_PAGE.into()),
        ],
        Arc::clone(&stop),
    );
    let notifier = RecordingNotifier::default();
    let mut state = MonitorState::new();

    run_loop(
        &mut renderer,
        &notifier,
        &SignalSet::builtin(),
        &mut state,
        zero_cadence(),
        &stop,
    );

    let alerts = notifier.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 2, "one alert per transition, not per cycle");
    assert_eq!(alerts[0].0, "Tickets Available!");
    assert_eq!(alerts[1].0, "Tickets Status Changed");
    assert_eq!(state.check_count, 4);
    assert!(!state.last_known_available);
}

#[test]
fn render_failure_is_indeterminate_and_loop_continues() {
    let stop = Arc::new(AtomicBool::new(false));
    let mut renderer = ScriptedRenderer::new(
        vec![
            Err(RenderError::Timeout),
            Err(RenderError::Browser("tab crashed".into())),
            Ok(DISABLED_PAGE.into()),
        ],
        Arc::clone(&stop),
    );
    let notifier = RecordingNotifier::default();
    let mut state = MonitorState::new();

    run_loop(
        &mut renderer,
        &notifier,
        &SignalSet::builtin(),
        &mut state,
        zero_cadence(),
        &stop,
    );

    // All three cycles ran; failures never alerted or flipped state.
    assert_eq!(state.check_count, 3);
    assert!(notifier.alerts.lock().unwrap().is_empty());
    assert!(!state.last_known_available);
}

#[test]
fn render_failure_while_alerted_keeps_the_alerted_state() {
    let stop = Arc::new(AtomicBool::new(false));
    let mut renderer = ScriptedRenderer::new(
        vec![Ok(ENABLED_PAGE.into()), Err(RenderError::Timeout)],
        Arc::clone(&stop),
    );
    let notifier = RecordingNotifier::default();
    let mut state = MonitorState::new();

    run_loop(
        &mut renderer,
        &notifier,
        &SignalSet::builtin(),
        &mut state,
        zero_cadence(),
        &stop,
    );

    assert_eq!(notifier.alerts.lock().unwrap().len(), 1);
    assert!(state.last_known_available, "timeout must not clear the flag");
}

/* ---------------- interrupt handling ---------------- */

#[test]
fn sleep_honors_a_raised_stop_flag_immediately() {
    let stop = AtomicBool::new(true);
    let begin = Instant::now();
    sleep_interruptible(Duration::from_secs(300), &stop);
    assert!(begin.elapsed() < Duration::from_secs(1));
}

#[test]
fn stopped_loop_never_renders() {
    let stop = Arc::new(AtomicBool::new(true));
    let mut renderer = ScriptedRenderer::new(vec![], Arc::clone(&stop));
    let mut state = MonitorState::new();

    run_loop(
        &mut renderer,
        &NullNotifier,
        &SignalSet::builtin(),
        &mut state,
        zero_cadence(),
        &stop,
    );

    assert_eq!(state.check_count, 0);
}
