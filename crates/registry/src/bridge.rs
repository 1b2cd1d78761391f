//! Snapshot bridge between a registry and a reactive render layer.
//!
//! # Role
//!
//! Registries push a payload-free "something changed" signal. Render layers
//! want a current immutable value plus a re-render trigger. A
//! [`SnapshotBridge`] holds the latest snapshot, refreshes it on every
//! notification, and then calls the render layer's hook.
//!
//! # Invariants
//!
//! - The bridge holds the registry instance and the current snapshot `Arc`,
//!   never the registry's live state.
//! - The bus only keeps weak references to the bridge, so dropping the
//!   bridge both unsubscribes and frees it even if unsubscribe raced.
//! - The initial snapshot is loaded after subscribing, so no write can land
//!   unseen between the two.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;

use crate::Component;
use crate::bus::{Listener, SubscriptionId};
use crate::globals::{GlobalComponentRegistry, GlobalsSnapshot};
use crate::routes::{RouteRegistry, RouterSnapshot};

/// Anything that publishes immutable snapshots and payload-free change events.
pub trait Observable: Send + Sync + 'static {
	type Snapshot: Send + Sync + 'static;

	fn snapshot(&self) -> Arc<Self::Snapshot>;
	fn subscribe(&self, listener: Listener) -> SubscriptionId;
	fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

impl<C: Component> Observable for RouteRegistry<C> {
	type Snapshot = RouterSnapshot<C>;

	fn snapshot(&self) -> Arc<Self::Snapshot> {
		RouteRegistry::snapshot(self)
	}

	fn subscribe(&self, listener: Listener) -> SubscriptionId {
		self.subscribe_arc(listener)
	}

	fn unsubscribe(&self, id: SubscriptionId) -> bool {
		RouteRegistry::unsubscribe(self, id)
	}
}

impl<C: Component> Observable for GlobalComponentRegistry<C> {
	type Snapshot = GlobalsSnapshot<C>;

	fn snapshot(&self) -> Arc<Self::Snapshot> {
		GlobalComponentRegistry::snapshot(self)
	}

	fn subscribe(&self, listener: Listener) -> SubscriptionId {
		self.subscribe_arc(listener)
	}

	fn unsubscribe(&self, id: SubscriptionId) -> bool {
		GlobalComponentRegistry::unsubscribe(self, id)
	}
}

type Rerender<S> = Box<dyn Fn(&Arc<S>) + Send + Sync>;

struct BridgeState<S> {
	current: ArcSwap<S>,
	generation: AtomicU64,
	rerender: Rerender<S>,
}

impl<S> BridgeState<S> {
	fn refresh(&self, next: Arc<S>) {
		self.current.store(next.clone());
		self.generation.fetch_add(1, Ordering::AcqRel);
		(self.rerender)(&next);
	}
}

/// Observable value fed by a registry's change bus.
pub struct SnapshotBridge<R: Observable> {
	source: Arc<R>,
	state: Arc<BridgeState<R::Snapshot>>,
	subscription: SubscriptionId,
}

impl<R: Observable> SnapshotBridge<R> {
	/// Subscribes to `source` and takes an initial snapshot.
	///
	/// `rerender` runs after every refresh with the new snapshot; it is not
	/// called for the initial one.
	pub fn new(source: Arc<R>, rerender: impl Fn(&Arc<R::Snapshot>) + Send + Sync + 'static) -> Self {
		let state = Arc::new(BridgeState {
			current: ArcSwap::new(source.snapshot()),
			generation: AtomicU64::new(0),
			rerender: Box::new(rerender),
		});

		let weak_source: Weak<R> = Arc::downgrade(&source);
		let weak_state = Arc::downgrade(&state);
		let subscription = source.subscribe(Arc::new(move || {
			let (Some(source), Some(state)) = (weak_source.upgrade(), weak_state.upgrade()) else {
				return;
			};
			state.refresh(source.snapshot());
		}));
		// A write published before the listener was registered is only
		// visible through a reload. `rcu` retries if the listener refreshed
		// meanwhile, so an older snapshot never replaces a newer one.
		state.current.rcu(|_| source.snapshot());

		Self {
			source,
			state,
			subscription,
		}
	}

	/// Creates a bridge with no render hook; poll [`SnapshotBridge::get`].
	pub fn detached(source: Arc<R>) -> Self {
		Self::new(source, |_| {})
	}

	/// Current snapshot.
	pub fn get(&self) -> Arc<R::Snapshot> {
		self.state.current.load_full()
	}

	/// Number of refreshes since creation.
	pub fn generation(&self) -> u64 {
		self.state.generation.load(Ordering::Acquire)
	}

	pub fn source(&self) -> &Arc<R> {
		&self.source
	}
}

impl<R: Observable> fmt::Debug for SnapshotBridge<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SnapshotBridge")
			.field("subscription", &self.subscription)
			.field("generation", &self.generation())
			.finish()
	}
}

impl<R: Observable> Drop for SnapshotBridge<R> {
	fn drop(&mut self) {
		self.source.unsubscribe(self.subscription);
	}
}

#[cfg(test)]
mod tests;
