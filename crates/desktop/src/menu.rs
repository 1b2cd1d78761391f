//! Desktop menu controller.
//!
//! # Role
//!
//! In desktop mode the plugin menu lives in its own popup window. The
//! [`DesktopMenu`] keeps that window in step with the menu's open flag:
//! opening spawns the window unless a live one exists, closing closes it.
//!
//! # Invariants
//!
//! - At most one window is held at a time.
//! - If the host refuses the window the menu reads as closed.
//! - Dropping the controller closes a live window.

use tracing::{debug, warn};

use crate::popup::{PopupHost, PopupSpec, PopupWindow};

/// The host's navigation API.
pub trait Navigator {
	/// Switches the host to the screen at `path`.
	fn navigate(&mut self, path: &str);
	/// Closes any open host side menus.
	fn close_side_menus(&mut self);
}

pub struct DesktopMenu<H: PopupHost> {
	host: H,
	spec: PopupSpec,
	open: bool,
	window: Option<H::Window>,
}

impl<H: PopupHost> DesktopMenu<H> {
	/// Creates a closed menu that opens [`PopupSpec::plugin_view`].
	pub fn new(host: H, title: impl Into<String>) -> Self {
		Self::with_spec(host, PopupSpec::plugin_view(title))
	}

	pub fn with_spec(host: H, spec: PopupSpec) -> Self {
		Self {
			host,
			spec,
			open: false,
			window: None,
		}
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn window(&self) -> Option<&H::Window> {
		self.window.as_ref()
	}

	pub fn spec(&self) -> &PopupSpec {
		&self.spec
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	/// Flips the open flag, as clicking the menu icon does.
	pub fn toggle(&mut self) {
		self.set_open(!self.open);
	}

	pub fn set_open(&mut self, open: bool) {
		self.open = open;
		if open {
			self.ensure_window();
		} else {
			self.close_window();
		}
	}

	/// Called when the popup is about to unload, e.g. the user closed it.
	pub fn on_window_unload(&mut self) {
		debug!(popup = %self.spec.name, "popup unloading");
		self.set_open(false);
	}

	/// Routes the host to `path` and closes the menu.
	pub fn navigate(&mut self, navigator: &mut impl Navigator, path: &str) {
		navigator.navigate(path);
		navigator.close_side_menus();
		self.set_open(false);
	}

	fn ensure_window(&mut self) {
		if self.window.as_ref().is_some_and(|w| !w.is_closed()) {
			return;
		}
		match self.host.create(&self.spec) {
			Ok(window) => {
				debug!(popup = %self.spec.name, "popup opened");
				self.window = Some(window);
			}
			Err(error) => {
				warn!(popup = %self.spec.name, %error, "desktop menu popup failed");
				self.window = None;
				self.open = false;
			}
		}
	}

	fn close_window(&mut self) {
		if let Some(window) = self.window.take()
			&& !window.is_closed()
		{
			window.close();
			debug!(popup = %self.spec.name, "popup closed");
		}
	}
}

impl<H: PopupHost> Drop for DesktopMenu<H> {
	fn drop(&mut self) {
		self.close_window();
	}
}

#[cfg(test)]
mod tests;
