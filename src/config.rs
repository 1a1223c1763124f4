//! Bridge settings resolved from the environment.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use thiserror::Error;

/// Environment variable naming the bridge host.
pub const HOST_VAR: &str = "RHINO_BRIDGE_HOST";
/// Environment variable naming the bridge port.
pub const PORT_VAR: &str = "RHINO_BRIDGE_PORT";
/// Environment variable naming the client timeout in seconds.
pub const TIMEOUT_VAR: &str = "RHINO_BRIDGE_TIMEOUT_SECS";
/// Environment variable enabling verbose responses.
pub const DEBUG_MODE_VAR: &str = "DEBUG_MODE";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while reading settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("{variable} has invalid value '{value}': {reason}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },
}

/// Result type for settings resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connection and verbosity settings shared by client and server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    host: String,
    port: u16,
    timeout: Duration,
    debug_mode: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug_mode: false,
        }
    }
}

impl BridgeSettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be
    /// parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Reads settings through an arbitrary lookup. Unset or blank variables
    /// keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be
    /// parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let read = |variable: &str| {
            lookup(variable)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let mut settings = Self::default();
        if let Some(host) = read(HOST_VAR) {
            settings.host = host;
        }
        if let Some(port) = read(PORT_VAR) {
            settings.port = port.parse().map_err(|error: std::num::ParseIntError| {
                invalid(PORT_VAR, &port, &error.to_string())
            })?;
        }
        if let Some(timeout) = read(TIMEOUT_VAR) {
            let seconds: u64 = timeout.parse().map_err(|error: std::num::ParseIntError| {
                invalid(TIMEOUT_VAR, &timeout, &error.to_string())
            })?;
            if seconds == 0 {
                return Err(invalid(TIMEOUT_VAR, &timeout, "timeout must be positive"));
            }
            settings.timeout = Duration::from_secs(seconds);
        }
        if let Some(debug_mode) = read(DEBUG_MODE_VAR) {
            settings.debug_mode = parse_flag(&debug_mode)
                .ok_or_else(|| invalid(DEBUG_MODE_VAR, &debug_mode, "expected true or false"))?;
        }
        Ok(settings)
    }

    /// Replaces the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Replaces the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replaces the client timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the debug-mode flag.
    #[must_use]
    pub const fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Returns the bridge host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the bridge port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the client timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether verbose responses are enabled.
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Returns the base URL clients connect to.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Returns the `host:port` pair servers bind to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared verbosity switch read at call time.
///
/// Clones observe the same flag, so toggling it takes effect for the next
/// response without a restart.
#[derive(Debug, Clone, Default)]
pub struct VerbosityFlag(Arc<AtomicBool>);

impl VerbosityFlag {
    /// Creates a flag with an initial value.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self(Arc::new(AtomicBool::new(verbose)))
    }

    /// Returns whether responses are verbose.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sets the flag.
    pub fn set(&self, verbose: bool) {
        self.0.store(verbose, Ordering::Relaxed);
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(variable: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        variable,
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{BridgeSettings, ConfigError, VerbosityFlag};
    use rstest::rstest;
    use std::{collections::HashMap, time::Duration};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let settings = BridgeSettings::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(settings, BridgeSettings::default());
        assert_eq!(settings.base_url(), "http://127.0.0.1:8080");
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert!(!settings.debug_mode());
    }

    #[rstest]
    fn variables_override_defaults() {
        let settings = BridgeSettings::from_lookup(lookup(&[
            ("RHINO_BRIDGE_HOST", "localhost"),
            ("RHINO_BRIDGE_PORT", "9090"),
            ("RHINO_BRIDGE_TIMEOUT_SECS", "3"),
            ("DEBUG_MODE", "TRUE"),
        ]))
        .expect("valid settings");
        assert_eq!(settings.bind_address(), "localhost:9090");
        assert_eq!(settings.timeout(), Duration::from_secs(3));
        assert!(settings.debug_mode());
    }

    #[rstest]
    #[case("RHINO_BRIDGE_PORT", "eighty")]
    #[case("RHINO_BRIDGE_PORT", "70000")]
    #[case("RHINO_BRIDGE_TIMEOUT_SECS", "0")]
    #[case("DEBUG_MODE", "maybe")]
    fn invalid_values_are_rejected(#[case] variable: &str, #[case] value: &str) {
        let result = BridgeSettings::from_lookup(lookup(&[(variable, value)]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[rstest]
    fn verbosity_flag_is_shared_between_clones() {
        let flag = VerbosityFlag::new(false);
        let observer = flag.clone();
        flag.set(true);
        assert!(observer.is_verbose());
    }
}
