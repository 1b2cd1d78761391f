//! Desktop-mode collaborators of the extension registries.
//!
//! In desktop mode the host shows the plugin view in a separate popup window
//! instead of a side panel. This crate describes that window request, the
//! traits the host's window and navigation subsystems implement, and the
//! controller that opens and closes the window as the menu toggles.
//! Creating real windows is the host's job.

/// Window creation flags understood by the host.
pub mod flags;
/// Menu controller tying the popup to the menu's open state.
pub mod menu;
/// Popup window requests and the host window traits.
pub mod popup;

pub use flags::CreationFlags;
pub use menu::{DesktopMenu, Navigator};
pub use popup::{Dimensions, PopupError, PopupHost, PopupSpec, PopupWindow};
