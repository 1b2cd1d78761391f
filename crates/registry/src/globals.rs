//! Global component registry.
//!
//! Global components are named renderable units the host mounts in fixed
//! slots regardless of the active route, one set per UI mode.

use std::sync::Arc;

use indexmap::IndexMap;
use tether_primitives::{ModeMap, UiMode, UnsupportedModeError};
use tracing::debug;

use crate::Component;
use crate::bus::{Listener, SubscriptionId};
use crate::config::RegistryConfig;
use crate::store::{Change, Store};

/// Components per mode at one point in time, in registration order.
pub struct GlobalsSnapshot<C> {
	components: ModeMap<IndexMap<String, C>>,
}

impl<C> Default for GlobalsSnapshot<C> {
	fn default() -> Self {
		Self {
			components: ModeMap::from_fn(|_| IndexMap::new()),
		}
	}
}

impl<C: Clone> Clone for GlobalsSnapshot<C> {
	fn clone(&self) -> Self {
		Self {
			components: self.components.clone(),
		}
	}
}

impl<C: std::fmt::Debug> std::fmt::Debug for GlobalsSnapshot<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GlobalsSnapshot")
			.field("components", &self.components)
			.finish()
	}
}

impl<C> GlobalsSnapshot<C> {
	pub fn components(&self, mode: UiMode) -> Result<&IndexMap<String, C>, UnsupportedModeError> {
		self.components.get(mode)
	}

	pub fn get(&self, path: &str, mode: UiMode) -> Result<Option<&C>, UnsupportedModeError> {
		Ok(self.components.get(mode)?.get(path))
	}

	/// Iterates every mode's components.
	pub fn iter(&self) -> impl Iterator<Item = (UiMode, &IndexMap<String, C>)> {
		self.components.iter()
	}
}

/// Named components injected into per-mode UI slots.
pub struct GlobalComponentRegistry<C> {
	store: Store<GlobalsSnapshot<C>>,
}

impl<C: Component> Default for GlobalComponentRegistry<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: Component> GlobalComponentRegistry<C> {
	pub fn new() -> Self {
		Self::with_config(&RegistryConfig::default())
	}

	pub fn with_config(config: &RegistryConfig) -> Self {
		Self {
			store: Store::new("globals", GlobalsSnapshot::default(), config),
		}
	}

	/// Registers `component` under `path` for `mode`, replacing any previous one.
	pub fn add(&self, path: impl Into<String>, component: C, mode: UiMode) -> Result<(), UnsupportedModeError> {
		let path = path.into();
		self.store.mutate(|state| {
			let slot = state.components.get_mut(mode)?;
			debug!(registry = "globals", path = %path, %mode, "add component");
			slot.insert(path, component);
			Ok(((), Change::Modified))
		})
	}

	/// Removes the component at `path` for `mode`. Missing paths are ignored.
	pub fn remove(&self, path: &str, mode: UiMode) -> Result<(), UnsupportedModeError> {
		self.store.mutate(|state| {
			let slot = state.components.get_mut(mode)?;
			debug!(registry = "globals", path = %path, %mode, "remove component");
			let removed = slot.shift_remove(path).is_some();
			Ok(((), Change::from_bool(removed)))
		})
	}

	pub fn snapshot(&self) -> Arc<GlobalsSnapshot<C>> {
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
