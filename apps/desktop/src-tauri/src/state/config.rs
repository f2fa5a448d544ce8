//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CALC_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use calc_core::{
    Dispatcher, NumericPolicy, Validator, OPERAND_RESET_DELAY_MS, TRANSCENDENTAL_DECIMALS,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Explicit path to `calc.wasm`.
    /// Default: `None` (the bundled resource is used)
    pub module_path: Option<PathBuf>,

    /// Decimal places kept on trigonometric/exponential results.
    pub decimals: u32,

    /// How long after a successful operation the fields are cleared.
    pub reset_delay_ms: u64,

    /// Reject non-numeric field text (`true`) or let it through as NaN.
    pub strict_numeric: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Module: bundled resource
    /// - Decimals: 6
    /// - Reset delay: 300 ms
    /// - Numeric checks: strict
    fn default() -> Self {
        ConfigState {
            module_path: None,
            decimals: TRANSCENDENTAL_DECIMALS,
            reset_delay_ms: OPERAND_RESET_DELAY_MS,
            strict_numeric: true,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CALC_MODULE_PATH`: Override path to `calc.wasm`
    /// - `CALC_DECIMALS`: Rounding digits for transcendental results (e.g., "4")
    /// - `CALC_RESET_DELAY_MS`: Operand reset delay in milliseconds
    /// - `CALC_STRICT_NUMERIC`: "true"/"false"
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unparseable values are logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("CALC_MODULE_PATH").filter(|p| !p.trim().is_empty()) {
            config.module_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup("CALC_DECIMALS") {
            match raw.trim().parse::<u32>() {
                // f64 carries ~15 significant digits
                Ok(decimals) if decimals <= 15 => config.decimals = decimals,
                _ => warn!(value = %raw, "Ignoring invalid CALC_DECIMALS"),
            }
        }

        if let Some(raw) = lookup("CALC_RESET_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.reset_delay_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid CALC_RESET_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("CALC_STRICT_NUMERIC") {
            match parse_flag(&raw) {
                Some(strict) => config.strict_numeric = strict,
                None => warn!(value = %raw, "Ignoring invalid CALC_STRICT_NUMERIC"),
            }
        }

        config
    }

    pub fn numeric_policy(&self) -> NumericPolicy {
        if self.strict_numeric {
            NumericPolicy::Strict
        } else {
            NumericPolicy::Lenient
        }
    }

    /// Dispatcher configured with this policy and rounding.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Validator::new(self.numeric_policy())).decimals(self.decimals)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.reset_delay(), Duration::from_millis(300));
        assert_eq!(config.numeric_policy(), NumericPolicy::Strict);
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("CALC_MODULE_PATH", "/opt/calc/calc.wasm"),
            ("CALC_DECIMALS", "3"),
            ("CALC_RESET_DELAY_MS", "0"),
            ("CALC_STRICT_NUMERIC", "false"),
        ]));
        assert_eq!(config.module_path, Some(PathBuf::from("/opt/calc/calc.wasm")));
        assert_eq!(config.decimals, 3);
        assert_eq!(config.reset_delay_ms, 0);
        assert_eq!(config.numeric_policy(), NumericPolicy::Lenient);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ConfigState::from_lookup(lookup(&[
            ("CALC_MODULE_PATH", "  "),
            ("CALC_DECIMALS", "forty"),
            ("CALC_RESET_DELAY_MS", "-5"),
            ("CALC_STRICT_NUMERIC", "maybe"),
        ]));
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_dispatcher_uses_policy() {
        let config = ConfigState {
            strict_numeric: false,
            ..ConfigState::default()
        };
        assert_eq!(
            config.dispatcher().validator().policy(),
            NumericPolicy::Lenient
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();
        assert_eq!(json["resetDelayMs"], 300);
        assert_eq!(json["strictNumeric"], true);
        assert!(json["modulePath"].is_null());
    }
}
