//! Host-facing side channels: file-manager reveal and advisory alerts.
//!
//! The shim triggers both through the [`HostUi`] capability. [`SystemUi`]
//! gives platform defaults for hosts that do not bring their own dialog
//! service.

use std::io;
use std::path::Path;
use std::process::Command;

/// User-facing side effects the shim may trigger.
pub trait HostUi: Send + Sync {
    /// Open the platform file manager with `path` selected. Fire-and-forget:
    /// the spawned process is not awaited.
    fn reveal(&self, path: &Path) -> io::Result<()>;

    /// Modal/alert-style advisory. Text only, no structured payload.
    fn alert(&self, title: &str, body: &str);
}

/// Platform defaults: file-manager spawn, alerts to the error log + stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUi;

impl HostUi for SystemUi {
    fn reveal(&self, path: &Path) -> io::Result<()> {
        spawn_file_manager(path)
    }

    fn alert(&self, title: &str, body: &str) {
        tracing::error!(title = %title, "{}", body);
        eprintln!("[{title}] {body}");
    }
}

#[cfg(target_os = "windows")]
fn spawn_file_manager(path: &Path) -> io::Result<()> {
    // /select puts the file itself in focus instead of opening it.
    Command::new("explorer.exe")
        .arg(format!("/select,{}", path.display()))
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn spawn_file_manager(path: &Path) -> io::Result<()> {
    Command::new("open").arg("-R").arg(path).spawn().map(|_| ())
}

#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
fn spawn_file_manager(path: &Path) -> io::Result<()> {
    // No select syntax is portable across Linux file managers; open the
    // containing directory instead.
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    Command::new("xdg-open")
        .arg(dir.unwrap_or_else(|| Path::new(".")))
        .spawn()
        .map(|_| ())
}
