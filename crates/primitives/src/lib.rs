//! Core types shared between the host and the extension registries: UI modes,
//! the mode-keyed container, and the unsupported-mode error.

/// Error raised when a mode outside the seeded set is used.
pub mod error;
/// Presentation contexts understood by the host.
pub mod mode;
/// Containers pre-seeded with one slot per supported mode.
pub mod mode_map;

pub use error::UnsupportedModeError;
pub use mode::UiMode;
pub use mode_map::ModeMap;
