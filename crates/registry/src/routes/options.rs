use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Everything a route carries besides its path and component.
///
/// The set of fields is closed: unknown keys are rejected when parsing, and
/// the version must match [`RouteOptions::VERSION`]. The version is private,
/// so options built in code always carry the current one; only parsed options
/// can disagree, and [`RouteOptions::from_json`] rejects those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteOptions {
	/// Schema version the options were written against.
	version: u32,
	/// Only match the path exactly.
	pub exact: bool,
	/// Treat a trailing slash as significant.
	pub strict: bool,
	/// Match the path case-sensitively.
	pub sensitive: bool,
	/// Title shown by the host while the route is active.
	pub title: Option<String>,
}

impl Default for RouteOptions {
	fn default() -> Self {
		Self {
			version: Self::VERSION,
			exact: false,
			strict: false,
			sensitive: false,
			title: None,
		}
	}
}

impl RouteOptions {
	/// Current options schema version.
	pub const VERSION: u32 = 1;

	/// Parses plugin-supplied JSON options.
	pub fn from_json(text: &str) -> Result<Self, OptionsError> {
		let options: Self = serde_json::from_str(text)?;
		options.validate()?;
		Ok(options)
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn validate(&self) -> Result<(), OptionsError> {
		if self.version != Self::VERSION {
			return Err(OptionsError::UnsupportedVersion {
				found: self.version,
				expected: Self::VERSION,
			});
		}
		Ok(())
	}

	pub fn exact(mut self, exact: bool) -> Self {
		self.exact = exact;
		self
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}
