// src/render.rs
//
// Rendering collaborator: something that can turn a URL into a settled DOM
// snapshot. The monitor depends only on the trait; the Chrome implementation
// is the one real backing.

use std::ffi::OsStr;
use std::thread;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use thiserror::Error;
use tracing::debug;

use crate::core::page::PageSnapshot;
use crate::params;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page load timeout")]
    Timeout,
    #[error("browser error: {0}")]
    Browser(String),
    /// Browser runtime missing or unlaunchable. Fatal at start-up.
    #[error("browser setup failed: {0}")]
    Setup(String),
}

pub trait Renderer {
    fn render(&mut self, url: &str, timeout: Duration) -> Result<PageSnapshot, RenderError>;
}

/// Keeps `navigator.webdriver` unobservable from page script; the target
/// site's bot defenses probe for it.
const STEALTH_JS: &str = "
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined
    })
";

pub struct ChromeRenderer {
    user_agent: String,
    settle: Duration,
}

impl ChromeRenderer {
    pub fn new() -> Self {
        Self {
            user_agent: s!(params::USER_AGENT),
            settle: params::SETTLE_DELAY,
        }
    }

    /// Launch-and-discard self test, run once before the first cycle.
    pub fn probe(&self) -> Result<(), RenderError> {
        self.launch().map(|_| ())
    }

    fn launch(&self) -> Result<Browser, RenderError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
            ])
            .build()
            .map_err(|e| RenderError::Setup(e.to_string()))?;
        Browser::new(options).map_err(|e| RenderError::Setup(e.to_string()))
    }
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ChromeRenderer {
    fn render(&mut self, url: &str, timeout: Duration) -> Result<PageSnapshot, RenderError> {
        // Fresh browser per check. Dropping it at the end of this function
        // closes the whole session on every path, error returns included.
        let browser = self.launch()?;
        let tab = browser.new_tab().map_err(browser_err)?;
        tab.set_default_timeout(timeout);
        tab.set_user_agent(&self.user_agent, None, None)
            .map_err(browser_err)?;
        tab.call_method(Page::AddScriptToEvaluateOnNewDocument {
            source: s!(STEALTH_JS),
            world_name: None,
            include_command_line_api: None,
            run_immediately: None,
        })
        .map_err(browser_err)?;

        debug!("loading {url}");
        tab.navigate_to(url).map_err(browser_err)?;
        tab.wait_until_navigated().map_err(browser_err)?;

        // Give client-side rendering time to settle before the snapshot.
        thread::sleep(self.settle);

        let html = tab.get_content().map_err(browser_err)?;
        Ok(PageSnapshot::parse(&html))
    }
}

fn browser_err<E: std::fmt::Display>(e: E) -> RenderError {
    let msg = e.to_string();
    let lc = msg.to_lowercase();
    if lc.contains("timeout") || lc.contains("timed out") {
        RenderError::Timeout
    } else {
        RenderError::Browser(msg)
    }
}
