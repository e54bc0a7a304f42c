// src/classify.rs
//
// Availability heuristic. Ticketing pages express "this day is sold out"
// in several channels at once (attributes, classes, inline styles, wrapper
// styling), so every channel is probed and the result errs toward asking a
// human to look rather than asserting availability.

use tracing::debug;

use crate::core::page::{PageElement, PageSnapshot};
use crate::core::signals::SignalSet;
use crate::params::{ANCESTOR_DEPTH, EVENT_URL};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Available(String),
    Unavailable(String),
    /// Rendering failed or no conclusion was possible; carries no
    /// ticket-state information.
    Indeterminate(String),
}

impl Verdict {
    pub fn reason(&self) -> &str {
        match self {
            Verdict::Available(r) | Verdict::Unavailable(r) | Verdict::Indeterminate(r) => r,
        }
    }
}

/// Classify a rendered page against the target day label.
///
/// Walks every element labelled with `label` in document order and returns
/// `Available` on the first one that carries no disabled signal. A single
/// enabled instance of the control is enough evidence to wake the operator,
/// even if other instances are disabled.
pub fn classify(page: &PageSnapshot, label: &str, signals: &SignalSet) -> Verdict {
    if !page.contains_ci(label) {
        return Verdict::Unavailable(format!("{label} section not found on page"));
    }

    let candidates = page.elements_with_text(label);
    if candidates.is_empty() {
        return Verdict::Unavailable(format!("{label} section not found on page"));
    }

    for el in &candidates {
        if is_disabled(el, signals) {
            debug!("candidate judged disabled: {}", el.class_attr());
            continue;
        }
        return Verdict::Available(format!(
            "{label} button appears ENABLED - check manually: {EVENT_URL}"
        ));
    }

    Verdict::Unavailable(format!("{label} found but disabled/sold out"))
}

fn is_disabled(el: &PageElement, signals: &SignalSet) -> bool {
    // `disabled` present without a value counts as disabled too.
    if matches!(el.attr("disabled"), Some("") | Some("true")) {
        return true;
    }
    if el.attr("aria-disabled") == Some("true") {
        return true;
    }
    signals.is_disabled_signal(el.class_attr())
        || signals.is_disabled_signal(&el.outer_html())
        || signals.is_disabled_signal(&el.ancestor_context(ANCESTOR_DEPTH))
}
