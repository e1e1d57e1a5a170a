/*!
 * Simulator Configuration
 *
 * Defaults, builder-style overrides, and environment overrides
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{DEFAULT_LOG_FILTER, ENV_LOG_FILTER, ENV_QUANTUM, ENV_TRACE_JSON};
use crate::scheduler::TimeQuantum;
use serde::{Deserialize, Serialize};
use std::env;

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulatorConfig {
    /// Quantum used when a run does not name one (default: 5ms)
    pub default_quantum: TimeQuantum,
    /// Emit diagnostics as JSON lines
    pub trace_json: bool,
    /// Diagnostic filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Echo each command before its output
    pub echo_commands: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_quantum: TimeQuantum::default(),
            trace_json: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            echo_commands: false,
        }
    }
}

impl SimulatorConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().apply_env()
    }

    /// Apply `RR_SIM_QUANTUM`, `RR_SIM_TRACE_JSON` and `RR_SIM_LOG` when set
    pub fn apply_env(mut self) -> ConfigResult<Self> {
        if let Ok(value) = env::var(ENV_QUANTUM) {
            self.default_quantum = parse_quantum_env(&value)?;
        }
        if let Ok(value) = env::var(ENV_TRACE_JSON) {
            self.trace_json = parse_flag_env(ENV_TRACE_JSON, &value)?;
        }
        if let Ok(value) = env::var(ENV_LOG_FILTER) {
            if !value.trim().is_empty() {
                self.log_filter = value.trim().to_string();
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_quantum(mut self, quantum: TimeQuantum) -> Self {
        self.default_quantum = quantum;
        self
    }

    #[must_use]
    pub fn with_trace_json(mut self, enabled: bool) -> Self {
        self.trace_json = enabled;
        self
    }

    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    #[must_use]
    pub fn with_echo_commands(mut self, enabled: bool) -> Self {
        self.echo_commands = enabled;
        self
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        key: key.into(),
        value: value.into(),
        reason: reason.into(),
    }
}

fn parse_quantum_env(value: &str) -> ConfigResult<TimeQuantum> {
    let ticks = value
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid(ENV_QUANTUM, value, "not a whole number"))?;
    TimeQuantum::new(ticks).map_err(|_| invalid(ENV_QUANTUM, value, "must be at least 1"))
}

fn parse_flag_env(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(ENV_QUANTUM);
        env::remove_var(ENV_TRACE_JSON);
        env::remove_var(ENV_LOG_FILTER);
    }

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.default_quantum.get(), 5);
        assert!(!config.trace_json);
        assert!(!config.echo_commands);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_builders() {
        let config = SimulatorConfig::default()
            .with_quantum(TimeQuantum::new(3).unwrap())
            .with_trace_json(true)
            .with_log_filter("debug")
            .with_echo_commands(true);
        assert_eq!(config.default_quantum.get(), 3);
        assert!(config.trace_json);
        assert!(config.echo_commands);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"default_quantum": 8}"#).unwrap();
        assert_eq!(config.default_quantum.get(), 8);
        assert_eq!(config.log_filter, "warn");

        assert!(serde_json::from_str::<SimulatorConfig>(r#"{"default_quantum": 0}"#).is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var(ENV_QUANTUM, "7");
        env::set_var(ENV_TRACE_JSON, "true");
        env::set_var(ENV_LOG_FILTER, "rr_sim=trace");

        let config = SimulatorConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.default_quantum.get(), 7);
        assert!(config.trace_json);
        assert_eq!(config.log_filter, "rr_sim=trace");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        env::set_var(ENV_QUANTUM, "0");
        let err = SimulatorConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_QUANTUM));

        env::set_var(ENV_QUANTUM, "4");
        env::set_var(ENV_TRACE_JSON, "maybe");
        let err = SimulatorConfig::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    #[serial]
    fn test_from_env_without_overrides() {
        clear_env();
        assert_eq!(SimulatorConfig::from_env().unwrap(), SimulatorConfig::default());
    }
}
