//! Registry configuration.
//!
//! Hosts may tune registry behavior from a TOML table:
//!
//! ```toml
//! notify-on-noop = false
//! max-flush-rounds = 16
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bus::DEFAULT_MAX_FLUSH_ROUNDS;
use crate::error::ConfigError;

/// Behavior knobs shared by every registry a host constructs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RegistryConfig {
	/// Publish a change even when a removal found nothing to remove.
	pub notify_on_noop: bool,
	/// Queued reentrant rounds one dispatch may flush before dropping the rest.
	pub max_flush_rounds: usize,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			notify_on_noop: true,
			max_flush_rounds: DEFAULT_MAX_FLUSH_ROUNDS,
		}
	}
}

impl RegistryConfig {
	/// Parses a config from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML config file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}
}
