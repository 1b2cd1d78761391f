//! Error types for the registries and their configuration.

use std::path::PathBuf;

pub use tether_primitives::UnsupportedModeError;
use thiserror::Error;

/// Errors loading a [`crate::RegistryConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The config file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The config text is not valid TOML or has unknown keys.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Errors building [`crate::RouteOptions`] from plugin-supplied data.
#[derive(Debug, Error)]
pub enum OptionsError {
	/// Malformed JSON, a wrongly typed field, or an unknown field.
	#[error("invalid route options: {0}")]
	Parse(#[from] serde_json::Error),

	/// The options were written against a different schema version.
	#[error("unsupported route options version {found} (expected {expected})")]
	UnsupportedVersion { found: u32, expected: u32 },
}
