use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tether_primitives::{UiMode, UnsupportedModeError};
use tracing::debug;

use super::{PatchHandle, RouteEntry, RouteOptions, RoutePatch, RouteStamp, RouterSnapshot};
use crate::Component;
use crate::bus::{Listener, SubscriptionId};
use crate::config::RegistryConfig;
use crate::store::{Change, Store};

/// Routes and route patches registered by plugins.
///
/// Thread-safe; share it as `Arc<RouteRegistry<C>>` and hand plugins a
/// [`RouterApi`](crate::RouterApi) rather than the registry itself.
pub struct RouteRegistry<C> {
	store: Store<RouterSnapshot<C>>,
	next_patch: AtomicU64,
	next_stamp: AtomicU64,
}

impl<C: Component> Default for RouteRegistry<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: Component> RouteRegistry<C> {
	pub fn new() -> Self {
		Self::with_config(&RegistryConfig::default())
	}

	pub fn with_config(config: &RegistryConfig) -> Self {
		Self {
			store: Store::new("routes", RouterSnapshot::default(), config),
			next_patch: AtomicU64::new(0),
			next_stamp: AtomicU64::new(0),
		}
	}

	/// Registers `component` at `path` with default options.
	pub fn add_route(&self, path: impl Into<String>, component: C) {
		self.add_route_with_options(path, component, RouteOptions::default());
	}

	/// Registers `component` at `path`, replacing any route already there.
	pub fn add_route_with_options(&self, path: impl Into<String>, component: C, options: RouteOptions) {
		self.insert_route(path, component, options);
	}

	/// Registers a route and returns the stamp identifying this registration.
	pub fn insert_route(&self, path: impl Into<String>, component: C, options: RouteOptions) -> RouteStamp {
		let path = path.into();
		let stamp = RouteStamp(self.next_stamp.fetch_add(1, Ordering::Relaxed));
		debug!(registry = "routes", path = %path, stamp = stamp.0, "add route");
		self.store.update(|state| {
			let entry = RouteEntry {
				component,
				options,
				stamp,
			};
			state.routes.insert(path, entry);
			(stamp, Change::Modified)
		})
	}

	/// Removes the route at `path`. Missing paths are ignored.
	pub fn remove_route(&self, path: &str) {
		debug!(registry = "routes", path = %path, "remove route");
		self.store.update(|state| {
			let removed = state.routes.shift_remove(path).is_some();
			((), Change::from_bool(removed))
		});
	}

	/// Removes the route at `path` only if it is still the registration
	/// `stamp` identifies. Returns whether it was removed.
	pub fn remove_route_if_current(&self, path: &str, stamp: RouteStamp) -> bool {
		self.store.update(|state| {
			let current = state.routes.get(path).is_some_and(|entry| entry.stamp == stamp);
			if current {
				state.routes.shift_remove(path);
			}
			debug!(registry = "routes", path = %path, stamp = stamp.0, removed = current, "remove route if current");
			(current, Change::from_bool(current))
		})
	}

	/// Adds `patch` to the patch set for (`mode`, `path`).
	///
	/// Returns the handle that [`RouteRegistry::remove_patch`] needs.
	pub fn add_patch(
		&self,
		path: impl Into<String>,
		patch: RoutePatch<C>,
		mode: UiMode,
	) -> Result<PatchHandle, UnsupportedModeError> {
		let path = path.into();
		self.store.mutate(|state| {
			let by_path = state.patches.get_mut(mode)?;
			let handle = PatchHandle(self.next_patch.fetch_add(1, Ordering::Relaxed));
			debug!(registry = "routes", path = %path, %mode, handle = handle.0, "add patch");
			by_path.entry(path).or_default().insert(handle, patch);
			Ok((handle, Change::Modified))
		})
	}

	/// Removes a patch; an emptied patch set is pruned from the mode's map.
	///
	/// Unknown paths and handles are ignored.
	pub fn remove_patch(&self, path: &str, handle: PatchHandle, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.store.mutate(|state| {
			let by_path = state.patches.get_mut(mode)?;
			debug!(registry = "routes", path = %path, %mode, handle = handle.0, "remove patch");
			let Some(set) = by_path.get_mut(path) else {
				return Ok(((), Change::Unchanged));
			};
			let removed = set.remove(handle);
			if set.is_empty() {
				by_path.shift_remove(path);
			}
			Ok(((), Change::from_bool(removed)))
		})
	}

	/// Returns the current state. Later mutations do not affect it.
	pub fn snapshot(&self) -> Arc<RouterSnapshot<C>> {
		self.store.load()
	}

	pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
		self.store.bus().subscribe(listener)
	}

	pub fn subscribe_arc(&self, listener: Listener) -> SubscriptionId {
		self.store.bus().subscribe_arc(listener)
	}

	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.store.bus().unsubscribe(id)
	}
}
