//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration for safety hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `honda_safety=debug,info`
    pub log_level: String,

    /// Whether to write logs at all
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "safety-gate".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SAFETY_SERVICE_NAME`: Service name (default: safety-gate)
    /// - `SAFETY_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SAFETY_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SAFETY_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            service_name: lookup("SAFETY_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("SAFETY_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("SAFETY_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("SAFETY_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Raise the filter to `debug` unless a more specific directive is set.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose && self.log_level == "info" {
            self.log_level = "debug".to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "safety-gate");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        assert_eq!(TelemetryConfig::from_lookup(lookup(&[])), TelemetryConfig::default());
    }

    #[test]
    fn test_safety_log_level_wins_over_rust_log() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("SAFETY_LOG_LEVEL", "warn"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.log_level, "warn");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "trace")]));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_boolean_flags() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("SAFETY_JSON_LOGS", "TRUE"),
            ("SAFETY_CONSOLE_OUTPUT", "0"),
        ]));
        assert!(config.json_logs);
        assert!(!config.console_output);
    }

    #[test]
    fn test_with_verbose() {
        assert_eq!(TelemetryConfig::default().with_verbose(true).log_level, "debug");
        assert_eq!(TelemetryConfig::default().with_verbose(false).log_level, "info");

        let custom = TelemetryConfig {
            log_level: "honda_safety=trace".to_string(),
            ..TelemetryConfig::default()
        };
        assert_eq!(custom.with_verbose(true).log_level, "honda_safety=trace");
    }
}
