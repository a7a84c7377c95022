//! TOML-based service configuration and preset definitions.

use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

use serde::Deserialize;

use crate::jobs::{MissingJobPolicy, RegistryPolicy, TransitionPolicy};

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Top-level service configuration parsed from TOML.
///
/// All sections have defaults matching the demo preset. Load from TOML
/// with [`ServiceConfig::from_toml_file`] or use [`ServiceConfig::demo`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP bind parameters.
    #[serde(default)]
    pub server: ServerConfig,
    /// Grid simulator parameters.
    #[serde(default)]
    pub grid: GridConfig,
    /// Job registry validation policy.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// HTTP bind parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Grid simulator parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Seed for carbon-intensity noise; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Job registry validation policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// `"ignore"` or `"reject"` unknown job ids.
    pub missing_job: MissingJobPolicy,
    /// `"permissive"` or `"strict"` status transitions.
    pub transitions: TransitionPolicy,
    /// Refuse to pause high-urgency jobs.
    pub protect_urgent: bool,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ServiceConfig {
    /// Returns the demo configuration: permissive registry, port 3000.
    pub fn demo() -> Self {
        Self::default()
    }

    /// Returns the strict preset: unknown ids rejected, transition table
    /// enforced, urgent jobs protected, fixed grid seed.
    pub fn strict() -> Self {
        Self {
            grid: GridConfig { seed: Some(42) },
            registry: RegistryConfig {
                missing_job: MissingJobPolicy::Reject,
                transitions: TransitionPolicy::Strict,
                protect_urgent: true,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "strict"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "strict" => Ok(Self::strict()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Only [`PORT_ENV`] is recognised.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the variable is set but not a valid port.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup(PORT_ENV) {
            self.server.port = raw.trim().parse().map_err(|_| {
                ConfigError::new("server.port", format!("{PORT_ENV}=\"{raw}\" is not a valid u16"))
            })?;
        }
        Ok(())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.server;

        if s.host.trim().is_empty() {
            errors.push(ConfigError::new("server.host", "must not be empty"));
        }
        if s.port == 0 {
            errors.push(ConfigError::new("server.port", "must be > 0"));
        }
        if errors.is_empty() && self.socket_addr().is_err() {
            errors.push(ConfigError::new(
                "server.host",
                format!("\"{}\" does not resolve to a socket address", s.host),
            ));
        }

        errors
    }

    /// Resolves `server.host` and `server.port` to a bind address.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the host cannot be resolved.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| {
                ConfigError::new(
                    "server.host",
                    format!("cannot resolve \"{}\"", self.server.host),
                )
            })
    }

    /// Registry policy described by the `[registry]` section.
    pub fn registry_policy(&self) -> RegistryPolicy {
        let r = &self.registry;
        RegistryPolicy {
            missing_job: r.missing_job,
            transitions: r.transitions,
            protect_urgent: r.protect_urgent,
        }
    }
}
