//! Observability: tracing init and the launch-audit log.
//!
//! Uses [`crate::config::ObservabilityConfig`] for DYNOLITE_QUIET,
//! DYNOLITE_LOG_LEVEL, DYNOLITE_AUDIT_LOG, etc.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::options::LaunchOptions;
use crate::protocol::ResultCode;

static AUDIT_PATH: Mutex<Option<String>> = Mutex::new(None);

/// Initialize tracing. Call once when the host loads the plugin.
/// When DYNOLITE_QUIET is set, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "dynolite=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn get_audit_path() -> Option<String> {
    {
        let guard = AUDIT_PATH.lock().ok()?;
        if let Some(ref p) = *guard {
            return Some(p.clone());
        }
    }
    let path = crate::config::ObservabilityConfig::from_env().audit_log?;
    // Ensure parent dir exists
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    {
        let mut guard = AUDIT_PATH.lock().ok()?;
        *guard = Some(path.clone());
    }
    Some(path)
}

// Audit must never fail a launch: IO errors are swallowed.
fn append_jsonl(path: &str, record: &serde_json::Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

/// Audit: a delegated launch is about to be attempted.
pub fn audit_launch_attempted(workspace: &str, options: &LaunchOptions) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "event": "launch_attempted",
            "workspace": workspace,
            "options": options,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: a delegated launch returned to the shim.
pub fn audit_launch_completed(workspace: &str, result: ResultCode, duration_ms: u64) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "event": "launch_completed",
            "workspace": workspace,
            "result": result.to_string(),
            "duration_ms": duration_ms,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: the runtime module could not be found in the host process.
pub fn audit_runtime_missing(workspace: &str, module: &str) {
    tracing::warn!(
        workspace = %workspace,
        module = %module,
        "delegated runtime is not loaded in the host process"
    );
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "event": "runtime_missing",
            "workspace": workspace,
            "module": module,
        });
        append_jsonl(&path, &record);
    }
}
