//! Host-side ownership of the registries and the plugin-facing surface.
//!
//! The host constructs one [`ExtensionHost`] at startup and threads it (or
//! clones of its `Arc`s) to whoever needs it. Plugins never see a registry:
//! they receive an [`ExtensionContext`] whose APIs are bound to the host's
//! registries, so a plugin cannot accidentally build a second one.

use std::sync::Arc;

use tether_primitives::{UiMode, UnsupportedModeError};

use crate::Component;
use crate::bridge::SnapshotBridge;
use crate::config::RegistryConfig;
use crate::globals::{GlobalComponentRegistry, GlobalsSnapshot};
use crate::routes::{PatchHandle, RouteOptions, RoutePatch, RouteRegistry, RouteStamp, RouterSnapshot};
use crate::scope::PluginScope;

/// Owner of the process-wide registries.
pub struct ExtensionHost<C> {
	routes: Arc<RouteRegistry<C>>,
	globals: Arc<GlobalComponentRegistry<C>>,
}

impl<C: Component> Default for ExtensionHost<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: Component> ExtensionHost<C> {
	pub fn new() -> Self {
		Self::with_config(&RegistryConfig::default())
	}

	pub fn with_config(config: &RegistryConfig) -> Self {
		Self {
			routes: Arc::new(RouteRegistry::with_config(config)),
			globals: Arc::new(GlobalComponentRegistry::with_config(config)),
		}
	}

	/// Plugin-facing context whose patch calls default to `mode`.
	pub fn context(&self, mode: UiMode) -> ExtensionContext<C> {
		ExtensionContext {
			router: RouterApi {
				registry: self.routes.clone(),
				default_mode: mode,
			},
			globals: GlobalsApi {
				registry: self.globals.clone(),
			},
		}
	}

	/// Bridge over the route registry for the render layer.
	pub fn router_bridge(
		&self,
		rerender: impl Fn(&Arc<RouterSnapshot<C>>) + Send + Sync + 'static,
	) -> SnapshotBridge<RouteRegistry<C>> {
		SnapshotBridge::new(self.routes.clone(), rerender)
	}

	/// Bridge over the global component registry for the render layer.
	pub fn globals_bridge(
		&self,
		rerender: impl Fn(&Arc<GlobalsSnapshot<C>>) + Send + Sync + 'static,
	) -> SnapshotBridge<GlobalComponentRegistry<C>> {
		SnapshotBridge::new(self.globals.clone(), rerender)
	}

	pub fn routes(&self) -> &Arc<RouteRegistry<C>> {
		&self.routes
	}

	pub fn globals(&self) -> &Arc<GlobalComponentRegistry<C>> {
		&self.globals
	}
}

/// Route registration methods bound to one registry.
pub struct RouterApi<C> {
	registry: Arc<RouteRegistry<C>>,
	default_mode: UiMode,
}

impl<C> Clone for RouterApi<C> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
			default_mode: self.default_mode,
		}
	}
}

impl<C: Component> RouterApi<C> {
	/// Mode used by [`RouterApi::add_patch`] and [`RouterApi::remove_patch`].
	pub fn default_mode(&self) -> UiMode {
		self.default_mode
	}

	pub fn add_route(&self, path: impl Into<String>, component: C) {
		self.registry.add_route(path, component);
	}

	pub fn add_route_with_options(&self, path: impl Into<String>, component: C, options: RouteOptions) {
		self.registry.add_route_with_options(path, component, options);
	}

	pub fn insert_route(&self, path: impl Into<String>, component: C, options: RouteOptions) -> RouteStamp {
		self.registry.insert_route(path, component, options)
	}

	pub fn remove_route(&self, path: &str) {
		self.registry.remove_route(path);
	}

	pub fn remove_route_if_current(&self, path: &str, stamp: RouteStamp) -> bool {
		self.registry.remove_route_if_current(path, stamp)
	}

	pub fn add_patch(&self, path: impl Into<String>, patch: RoutePatch<C>) -> Result<PatchHandle, UnsupportedModeError> {
		self.registry.add_patch(path, patch, self.default_mode)
	}

	pub fn add_patch_for(
		&self,
		path: impl Into<String>,
		patch: RoutePatch<C>,
		mode: UiMode,
	) -> Result<PatchHandle, UnsupportedModeError> {
		self.registry.add_patch(path, patch, mode)
	}

	pub fn remove_patch(&self, path: &str, handle: PatchHandle) -> Result<(), UnsupportedModeError> {
		self.registry.remove_patch(path, handle, self.default_mode)
	}

	pub fn remove_patch_for(&self, path: &str, handle: PatchHandle, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.registry.remove_patch(path, handle, mode)
	}

	pub fn snapshot(&self) -> Arc<RouterSnapshot<C>> {
		self.registry.snapshot()
	}
}

/// Global component methods bound to one registry.
pub struct GlobalsApi<C> {
	registry: Arc<GlobalComponentRegistry<C>>,
}

impl<C> Clone for GlobalsApi<C> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
		}
	}
}

impl<C: Component> GlobalsApi<C> {
	pub fn add_component(&self, path: impl Into<String>, component: C, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.registry.add(path, component, mode)
	}

	pub fn remove_component(&self, path: &str, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.registry.remove(path, mode)
	}

	pub fn snapshot(&self) -> Arc<GlobalsSnapshot<C>> {
		self.registry.snapshot()
	}
}

/// Everything a plugin may call on the host's registries.
pub struct ExtensionContext<C> {
	pub router: RouterApi<C>,
	pub globals: GlobalsApi<C>,
}

impl<C> Clone for ExtensionContext<C> {
	fn clone(&self) -> Self {
		Self {
			router: self.router.clone(),
			globals: self.globals.clone(),
		}
	}
}

impl<C: Component> ExtensionContext<C> {
	/// Opens a scope that undoes the plugin's registrations when unloaded.
	pub fn scope(&self, plugin: impl Into<String>) -> PluginScope<C> {
		PluginScope::new(plugin, self.clone())
	}
}
