// src/cli.rs
//
// Operator surface: one long-running command, no subcommands. Target URL and
// label are compile-time constants in params.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use crate::core::signals::SignalSet;
use crate::monitor::{self, MonitorState};
use crate::notify::DesktopNotifier;
use crate::params;
use crate::render::ChromeRenderer;

pub fn run() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    banner();

    // Fail fast if the browser runtime is missing; nothing else about this
    // condition is retryable.
    println!("Testing browser setup...");
    let mut renderer = ChromeRenderer::new();
    if let Err(e) = renderer.probe() {
        eprintln!("Browser setup FAILED: {e}");
        eprintln!("Make sure Chrome or Chromium is installed:");
        eprintln!("  Ubuntu/Debian: sudo apt-get install chromium-browser");
        eprintln!("  macOS:         brew install --cask google-chrome");
        return Err(e).wrap_err("browser setup failed");
    }
    println!("Browser setup OK");
    println!();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .wrap_err("failed to install interrupt handler")?;
    }

    let signals = SignalSet::from_env();
    let mut state = MonitorState::new();
    monitor::run_loop(
        &mut renderer,
        &DesktopNotifier,
        &signals,
        &mut state,
        params::CADENCE,
        &stop,
    );

    // The only way out of the loop is the operator interrupt.
    println!("\nMonitoring stopped by user");
    Ok(())
}

fn banner() {
    println!("{}", "=".repeat(60));
    println!("Ticketmaster Monitor - Tons of Rock 2026");
    println!("Monitoring VIP Thursday Resale Tickets");
    println!("{}", "=".repeat(60));
    println!("URL: {}", params::EVENT_URL);
    println!(
        "Check interval: {}s ({:.1} minutes)",
        params::CHECK_INTERVAL.as_secs(),
        params::CHECK_INTERVAL.as_secs_f64() / 60.0
    );
    println!("Looking for: \"{}\" day selector", params::TARGET_LABEL);
    println!("{}", "=".repeat(60));
    println!();
}
