//! Per-plugin registration tracking.
//!
//! A [`PluginScope`] forwards to an [`ExtensionContext`] and remembers what it
//! registered. Unloading the scope (explicitly or by dropping it) removes
//! those registrations newest first, which is how a plugin's routes, patches
//! and components disappear when the plugin goes away.
//!
//! Routes are tracked by registration stamp: if another plugin overwrote a
//! route this scope registered, unloading leaves the newer route in place.

use tether_primitives::{UiMode, UnsupportedModeError};
use tracing::{debug, info, warn};

use crate::Component;
use crate::context::ExtensionContext;
use crate::routes::{PatchHandle, RouteOptions, RoutePatch, RouteStamp};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Registration {
	Route {
		path: String,
		stamp: RouteStamp,
	},
	Patch {
		path: String,
		handle: PatchHandle,
		mode: UiMode,
	},
	Component {
		path: String,
		mode: UiMode,
	},
}

/// Registrations made on behalf of one plugin.
pub struct PluginScope<C: Component> {
	plugin: String,
	ctx: ExtensionContext<C>,
	records: Vec<Registration>,
}

impl<C: Component> PluginScope<C> {
	pub(crate) fn new(plugin: impl Into<String>, ctx: ExtensionContext<C>) -> Self {
		Self {
			plugin: plugin.into(),
			ctx,
			records: Vec::new(),
		}
	}

	pub fn plugin(&self) -> &str {
		&self.plugin
	}

	/// Number of registrations that unloading would undo.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn add_route(&mut self, path: impl Into<String>, component: C) {
		self.add_route_with_options(path, component, RouteOptions::default());
	}

	pub fn add_route_with_options(&mut self, path: impl Into<String>, component: C, options: RouteOptions) {
		let path = path.into();
		let stamp = self.ctx.router.insert_route(path.clone(), component, options);
		self.forget_route(&path);
		self.record(Registration::Route { path, stamp });
	}

	pub fn remove_route(&mut self, path: &str) {
		self.ctx.router.remove_route(path);
		self.forget_route(path);
	}

	/// Adds a patch under the context's default mode.
	pub fn add_patch(&mut self, path: impl Into<String>, patch: RoutePatch<C>) -> Result<PatchHandle, UnsupportedModeError> {
		let mode = self.ctx.router.default_mode();
		self.add_patch_for(path, patch, mode)
	}

	pub fn add_patch_for(
		&mut self,
		path: impl Into<String>,
		patch: RoutePatch<C>,
		mode: UiMode,
	) -> Result<PatchHandle, UnsupportedModeError> {
		let path = path.into();
		let handle = self.ctx.router.add_patch_for(path.clone(), patch, mode)?;
		self.record(Registration::Patch { path, handle, mode });
		Ok(handle)
	}

	pub fn remove_patch(&mut self, path: &str, handle: PatchHandle, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.ctx.router.remove_patch_for(path, handle, mode)?;
		self.records
			.retain(|r| !matches!(r, Registration::Patch { handle: h, .. } if *h == handle));
		Ok(())
	}

	pub fn add_component(&mut self, path: impl Into<String>, component: C, mode: UiMode) -> Result<(), UnsupportedModeError> {
		let path = path.into();
		self.ctx.globals.add_component(path.clone(), component, mode)?;
		self.record(Registration::Component { path, mode });
		Ok(())
	}

	pub fn remove_component(&mut self, path: &str, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.ctx.globals.remove_component(path, mode)?;
		self.records
			.retain(|r| !matches!(r, Registration::Component { path: p, mode: m } if p == path && *m == mode));
		Ok(())
	}

	/// Removes everything this scope registered.
	pub fn unload(mut self) {
		self.release();
	}

	fn forget_route(&mut self, path: &str) {
		self.records
			.retain(|r| !matches!(r, Registration::Route { path: p, .. } if p == path));
	}

	fn record(&mut self, registration: Registration) {
		if self.records.contains(&registration) {
			return;
		}
		debug!(plugin = %self.plugin, ?registration, "tracked registration");
		self.records.push(registration);
	}

	fn release(&mut self) {
		if self.records.is_empty() {
			return;
		}
		let count = self.records.len();
		for registration in self.records.drain(..).rev() {
			let result = match &registration {
				Registration::Route { path, stamp } => {
					if !self.ctx.router.remove_route_if_current(path, *stamp) {
						debug!(plugin = %self.plugin, path = %path, "route overwritten by another registration; left in place");
					}
					Ok(())
				}
				Registration::Patch { path, handle, mode } => self.ctx.router.remove_patch_for(path, *handle, *mode),
				Registration::Component { path, mode } => self.ctx.globals.remove_component(path, *mode),
			};
			if let Err(error) = result {
				warn!(plugin = %self.plugin, ?registration, %error, "failed to release registration");
			}
		}
		info!(plugin = %self.plugin, count, "released plugin registrations");
	}
}

impl<C: Component> Drop for PluginScope<C> {
	fn drop(&mut self) {
		self.release();
	}
}
