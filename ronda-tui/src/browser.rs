use anyhow::{Context, Result};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

fn launcher(url: &str) -> std::io::Result<Command> {
    #[cfg(target_os = "linux")]
    let command = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "macos")]
    let command = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let command = {
        let mut c = Command::new("cmd");
        c.args(["/c", "start", "", url]);
        c
    };
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("no browser launcher for this platform ({})", url),
    ));

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    Ok(command)
}

/// Waits for the child on a background thread so it never lingers as a
/// zombie.
fn reap(mut child: Child) -> JoinHandle<std::io::Result<ExitStatus>> {
    std::thread::spawn(move || child.wait())
}

/// Open a URL in the system default browser.
pub fn open(url: &str) -> Result<()> {
    // Launcher output would draw over the terminal UI.
    let child = launcher(url)
        .and_then(|mut command| {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
        })
        .with_context(|| format!("Failed to open {}", url))?;
    reap(child);
    Ok(())
}
