use thiserror::Error;

use crate::UiMode;

/// A mode-keyed lookup used a mode the container was not seeded with.
///
/// This is always a caller bug: the set of supported modes is fixed when the
/// host is built, so retrying cannot succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("UI mode {mode} not supported")]
pub struct UnsupportedModeError {
	/// The offending mode.
	pub mode: UiMode,
}

impl UnsupportedModeError {
	pub fn new(mode: UiMode) -> Self {
		Self { mode }
	}
}
