// src/notify.rs
//
// Alert delivery. The console banner is the notification of record and goes
// out first; desktop delivery is best-effort on top and its failures are
// swallowed, never the loop's problem.

use tracing::debug;

use crate::monitor::Alert;

pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// A no-op sink you can pass when you don't care.
pub struct NullNotifier;
impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _message: &str) {}
}

/// Print the banner, then hand off to the platform mechanism.
pub fn deliver<N: Notifier + ?Sized>(notifier: &N, alert: &Alert) {
    println!();
    println!("{}", "!".repeat(60));
    println!("!!! {} !!!", alert.title);
    println!("!!! {}", alert.message);
    println!("{}", "!".repeat(60));
    println!();
    notifier.notify(&alert.title, &alert.message);
}

/// OS desktop notifications via the platform's own tooling.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        if let Err(e) = desktop_notify(title, message) {
            debug!("desktop notification failed: {e}");
        }
    }
}

#[cfg(target_os = "linux")]
fn desktop_notify(title: &str, message: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    if is_wsl() {
        // Inside WSL the Linux notification daemons aren't there; pop a
        // Windows message box through the interop bridge instead.
        let safe_title = powershell_escape(title);
        let safe_message = powershell_escape(message);
        Command::new("powershell.exe")
            .args([
                "-NoProfile",
                "-ExecutionPolicy",
                "Bypass",
                "-Command",
                &format!(
                    "Add-Type -AssemblyName System.Windows.Forms; \
                     [System.Windows.Forms.MessageBox]::Show(\
                     \"{safe_message}\", \"{safe_title}\", \"OK\", \"Information\")"
                ),
            ])
            .status()?;
        return Ok(());
    }

    Command::new("notify-send")
        .args(["-u", "critical", "-t", "0", title, message])
        .status()?;
    // Completion chime, best-effort.
    let _ = Command::new("paplay")
        .arg("/usr/share/sounds/freedesktop/stereo/complete.oga")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    Ok(())
}

#[cfg(target_os = "macos")]
fn desktop_notify(title: &str, message: &str) -> std::io::Result<()> {
    use std::process::Command;

    let script = format!(
        "display notification \"{}\" with title \"{}\" sound name \"Glass\"",
        applescript_escape(message),
        applescript_escape(title),
    );
    Command::new("osascript").args(["-e", &script]).status()?;
    Ok(())
}

#[cfg(target_os = "windows")]
fn desktop_notify(title: &str, message: &str) -> std::io::Result<()> {
    use std::process::Command;

    let safe_title = powershell_escape(title);
    let safe_message = powershell_escape(message);
    Command::new("powershell")
        .args([
            "-Command",
            &format!(
                "[System.Reflection.Assembly]::LoadWithPartialName(\
                 \"System.Windows.Forms\"); \
                 [System.Windows.Forms.MessageBox]::Show(\
                 \"{safe_message}\", \"{safe_title}\")"
            ),
        ])
        .status()?;
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn desktop_notify(_title: &str, _message: &str) -> std::io::Result<()> {
    Ok(())
}

#[cfg(target_os = "linux")]
fn is_wsl() -> bool {
    std::fs::read_to_string("/proc/version")
        .map(|v| v.to_lowercase().contains("microsoft"))
        .unwrap_or(false)
}

#[cfg(any(target_os = "linux", target_os = "windows"))]
fn powershell_escape(s: &str) -> String {
    s.replace('\'', "''").replace('"', "`\"")
}

#[cfg(target_os = "macos")]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
