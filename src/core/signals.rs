// src/core/signals.rs
//
// The disabled-state vocabulary: flat substrings matched case-insensitively
// against element markup, class strings, and ancestor markup. Deliberately a
// blunt instrument; the page is a third-party DOM we do not control.

use aho_corasick::AhoCorasick;
use tracing::warn;

use crate::params::EXTRA_SIGNALS_ENV;

/// Disabled/unavailable indicators seen on the target site: HTML attributes,
/// class naming conventions, inline-style disabling idioms, and the Norwegian
/// "sold out" / "not available" wording.
pub const BUILTIN_SIGNALS: &[&str] = &[
    "disabled",
    "unavailable",
    "sold-out",
    "soldout",
    "sold out",
    "utsolgt",
    "ikke tilgjengelig",
    "opacity: 0.5",
    "opacity:0.5",
    "pointer-events: none",
    "cursor: not-allowed",
    "btn--disabled",
    "is-disabled",
];

pub struct SignalSet {
    ac: AhoCorasick,
}

impl SignalSet {
    pub fn from_patterns<I, P>(patterns: I) -> Result<Self, aho_corasick::BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let ac = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(patterns)?;
        Ok(Self { ac })
    }

    pub fn builtin() -> Self {
        // Static vocabulary; the automaton build cannot fail on it.
        Self::from_patterns(BUILTIN_SIGNALS).expect("built-in signal set")
    }

    /// Built-in vocabulary plus comma-separated extras from the environment,
    /// so the signal set can grow without recompiling.
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var(EXTRA_SIGNALS_ENV) else {
            return Self::builtin();
        };
        let extras: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if extras.is_empty() {
            return Self::builtin();
        }
        let patterns = BUILTIN_SIGNALS
            .iter()
            .map(|s| s!(*s))
            .chain(extras)
            .collect::<Vec<_>>();
        match Self::from_patterns(&patterns) {
            Ok(set) => set,
            Err(e) => {
                warn!("ignoring {EXTRA_SIGNALS_ENV}: {e}");
                Self::builtin()
            }
        }
    }

    pub fn is_disabled_signal(&self, haystack: &str) -> bool {
        self.ac.is_match(haystack)
    }
}

impl Default for SignalSet {
    fn default() -> Self {
        Self::builtin()
    }
}
