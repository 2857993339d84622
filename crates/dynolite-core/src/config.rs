//! Unified configuration layer.
//!
//! The shim exposes no end-user configuration surface; the only knobs are
//! observability-related and come from environment variables. All env reads
//! are centralized here; business code goes through the structured config,
//! never `std::env::var` directly.

use std::env;

/// Environment variable key constants.
pub mod env_keys {
    /// Tracing filter directive, e.g. `dynolite=debug`.
    pub const DYNOLITE_LOG_LEVEL: &str = "DYNOLITE_LOG_LEVEL";
    /// Truthy value: only WARN and above are logged.
    pub const DYNOLITE_QUIET: &str = "DYNOLITE_QUIET";
    /// Truthy value: JSON log lines instead of human-readable ones.
    pub const DYNOLITE_LOG_JSON: &str = "DYNOLITE_LOG_JSON";
    /// Path of the JSONL launch-audit log. Unset or empty disables auditing.
    pub const DYNOLITE_AUDIT_LOG: &str = "DYNOLITE_AUDIT_LOG";
}

/// Read `key` as a boolean flag. Unset or unrecognized values are `false`.
pub fn env_bool(key: &str) -> bool {
    env::var(key).map(|v| truthy(&v)).unwrap_or(false)
}

/// Read `key`, falling back to `default` when unset or empty.
pub fn env_or(key: &str, default: impl FnOnce() -> String) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default(),
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Logging and audit configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    /// Launch-audit JSONL path; `None` disables auditing.
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        let audit_log = env::var(env_keys::DYNOLITE_AUDIT_LOG)
            .ok()
            .filter(|p| !p.trim().is_empty());
        Self {
            quiet: env_bool(env_keys::DYNOLITE_QUIET),
            log_level: env_or(env_keys::DYNOLITE_LOG_LEVEL, || {
                "dynolite=info".to_string()
            }),
            log_json: env_bool(env_keys::DYNOLITE_LOG_JSON),
            audit_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_accepts_common_spellings() {
        for v in ["1", "true", "TRUE", "yes", "on", " 1 "] {
            assert!(truthy(v), "{v:?} should be truthy");
        }
        for v in ["0", "false", "", "off", "2"] {
            assert!(!truthy(v), "{v:?} should be falsy");
        }
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        let val = env_or("DYNOLITE_TEST_UNSET_KEY", || "fallback".to_string());
        assert_eq!(val, "fallback");
    }
}
