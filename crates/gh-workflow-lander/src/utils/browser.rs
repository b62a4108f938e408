//! Browser utilities
//!
//! Functions for opening URLs in the system's default browser.

use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// How long an opener may take to fail before it counts as launched
const LAUNCH_GRACE: Duration = Duration::from_millis(500);

/// Open a URL in the system's default browser
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Linux: `xdg-open`
/// - Windows: `cmd /C start`
///
/// Fails when the opener could not be started or exited unsuccessfully
/// right away. An opener still running after a short grace period (e.g.
/// `xdg-open` running the browser in the foreground) counts as success.
pub async fn open_url(url: &str) -> io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "macos")]
    command.arg(url);

    #[cfg(target_os = "windows")]
    let mut command = Command::new("cmd");
    #[cfg(target_os = "windows")]
    command.args(["/C", "start", url]);

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    command.arg(url);

    launch(command, LAUNCH_GRACE).await
}

async fn launch(mut command: Command, grace: Duration) -> io::Result<()> {
    let mut child = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(status) => {
            let status = status?;
            if status.success() {
                Ok(())
            } else {
                Err(io::Error::other(format!("browser opener exited with {}", status)))
            }
        }
        Err(_) => {
            // Left running detached; the child is not killed on drop
            log::debug!("Browser opener still running, assuming it launched");
            Ok(())
        }
    }
}
