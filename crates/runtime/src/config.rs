//! Runtime configuration
//!
//! ## Configuration (Environment Variables)
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PYC_ON_ERROR` | `report` | `report` (set last error, return neutral value) or `exit` (legacy: print diagnostic, exit 1) |
//! | `PYC_LOG` | `pyc_runtime=warn` | Log filter, see [`crate::logging`] |
//!
//! ## Example
//!
//! ```bash
//! # Behave like the legacy C runtime: abort on the first bad index
//! PYC_ON_ERROR=exit ./generated-program
//! ```
//!
//! The configuration is read once, on first use, and cached for the life of
//! the process.

use std::sync::OnceLock;

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// What a C ABI export does when an operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Record the error in the thread-local slot and return a neutral value (default)
    Report,
    /// Print the diagnostic and terminate with status 1
    Exit,
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Action taken by C ABI exports on failure
    pub on_error: ErrorAction,
    /// Filter directives for the log subscriber
    pub log_filter: String,
}

pub const DEFAULT_LOG_FILTER: &str = "pyc_runtime=warn";

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            on_error: ErrorAction::Report,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let on_error = lookup("PYC_ON_ERROR")
            .map(|s| match s.trim().to_lowercase().as_str() {
                "exit" | "abort" => ErrorAction::Exit,
                _ => ErrorAction::Report,
            })
            .unwrap_or(ErrorAction::Report);

        let log_filter = lookup("PYC_LOG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            on_error,
            log_filter,
        }
    }
}

/// Process-wide configuration, loaded from the environment on first access
pub fn runtime_config() -> &'static RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(|| {
        let config = RuntimeConfig::from_env();
        tracing::debug!(?config, "runtime configuration loaded");
        config
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[]));
        assert_eq!(config.on_error, ErrorAction::Report);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_exit_action() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[("PYC_ON_ERROR", "EXIT")]));
        assert_eq!(config.on_error, ErrorAction::Exit);

        let config = RuntimeConfig::from_lookup(lookup_in(&[("PYC_ON_ERROR", " abort ")]));
        assert_eq!(config.on_error, ErrorAction::Exit);
    }

    #[test]
    fn test_unknown_action_falls_back_to_report() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[("PYC_ON_ERROR", "explode")]));
        assert_eq!(config.on_error, ErrorAction::Report);
    }

    #[test]
    fn test_blank_log_filter_uses_default() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[("PYC_LOG", "  ")]));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        unsafe {
            std::env::set_var("PYC_LOG", "pyc_runtime=debug");
            std::env::set_var("PYC_ON_ERROR", "report");
        }
        let config = RuntimeConfig::from_env();
        assert_eq!(config.log_filter, "pyc_runtime=debug");
        assert_eq!(config.on_error, ErrorAction::Report);
        unsafe {
            std::env::remove_var("PYC_LOG");
            std::env::remove_var("PYC_ON_ERROR");
        }
    }
}
