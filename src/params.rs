// src/params.rs
use std::time::Duration;

use crate::monitor::Cadence;

/// The one page this monitor watches.
pub const EVENT_URL: &str = "https://www.ticketmaster.no/event/1517649920";

/// Visible text of the day-selector control we care about ("Thursday" in the
/// target locale). Matched case-insensitively against element text.
pub const TARGET_LABEL: &str = "torsdag";

/// Normal time between checks.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(300);
/// One tighter confirmation cycle right after tickets first look available.
pub const FAST_INTERVAL: Duration = Duration::from_secs(60);

pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);
/// Grace period after navigation for client-side rendering to settle.
pub const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// How many ancestor levels the classifier inspects for disabled styling.
pub const ANCESTOR_DEPTH: usize = 5;

/// Extra disabled-signal substrings, comma-separated, appended to the
/// built-in vocabulary without recompiling.
pub const EXTRA_SIGNALS_ENV: &str = "TICKET_WATCH_SIGNALS";

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const CADENCE: Cadence = Cadence {
    default: CHECK_INTERVAL,
    fast: FAST_INTERVAL,
};
