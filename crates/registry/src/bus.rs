//! Change notification bus.
//!
//! # Role
//!
//! Every registry owns one [`ChangeBus`]. Mutations call [`ChangeBus::publish`]
//! with no payload; listeners are expected to pull a fresh snapshot.
//!
//! # Reentrancy
//!
//! Delivery is synchronous. A `publish` issued while the bus is already
//! dispatching (a listener mutated the registry) is queued and delivered as a
//! full extra round once the current round finishes, so each publish reaches
//! each listener exactly once. One outer dispatch flushes at most
//! `max_flush_rounds` queued rounds; anything beyond that is dropped with a
//! warning, which bounds listeners that keep re-triggering themselves.
//!
//! # Invariants
//!
//! - A listener removed with [`ChangeBus::unsubscribe`] is never called again,
//!   including later in the round during which it was removed.
//! - The listener list lock is never held while a listener runs.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, ReentrantMutex};
use tracing::{trace, warn};

/// Default cap on queued rounds flushed by one outer dispatch.
pub const DEFAULT_MAX_FLUSH_ROUNDS: usize = 64;

/// Change callback. Carries no payload.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ChangeBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, Default)]
struct Dispatch {
	active: bool,
	queued: usize,
}

/// Resets dispatch state even if a listener panics.
struct DispatchReset<'a>(&'a Cell<Dispatch>);

impl Drop for DispatchReset<'_> {
	fn drop(&mut self) {
		self.0.set(Dispatch::default());
	}
}

/// Synchronous publish/subscribe primitive with queued reentrant delivery.
pub struct ChangeBus {
	label: &'static str,
	listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
	next_id: AtomicU64,
	dispatch: ReentrantMutex<Cell<Dispatch>>,
	max_flush_rounds: usize,
}

impl fmt::Debug for ChangeBus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChangeBus")
			.field("label", &self.label)
			.field("subscribers", &self.subscriber_count())
			.field("max_flush_rounds", &self.max_flush_rounds)
			.finish()
	}
}

impl ChangeBus {
	/// Creates a bus with [`DEFAULT_MAX_FLUSH_ROUNDS`].
	pub fn new(label: &'static str) -> Self {
		Self::with_flush_limit(label, DEFAULT_MAX_FLUSH_ROUNDS)
	}

	/// Creates a bus that flushes at most `max_flush_rounds` queued rounds per dispatch.
	pub fn with_flush_limit(label: &'static str, max_flush_rounds: usize) -> Self {
		Self {
			label,
			listeners: Mutex::new(Vec::new()),
			next_id: AtomicU64::new(0),
			dispatch: ReentrantMutex::new(Cell::new(Dispatch::default())),
			max_flush_rounds,
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Registers `listener` and returns the handle needed to remove it.
	pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
		self.subscribe_arc(Arc::new(listener))
	}

	/// Registers an already shared listener.
	pub fn subscribe_arc(&self, listener: Listener) -> SubscriptionId {
		let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.lock().push((id, listener));
		trace!(bus = self.label, id = id.0, "subscribed");
		id
	}

	/// Removes a listener. Returns false if `id` was not subscribed.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut listeners = self.listeners.lock();
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		let removed = listeners.len() != before;
		if removed {
			trace!(bus = self.label, id = id.0, "unsubscribed");
		}
		removed
	}

	pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
		self.listeners.lock().iter().any(|(existing, _)| *existing == id)
	}

	pub fn subscriber_count(&self) -> usize {
		self.listeners.lock().len()
	}

	/// Notifies every current subscriber once.
	///
	/// Called from inside a listener, the round is queued behind the one in
	/// progress instead of being delivered immediately.
	pub fn publish(&self) {
		let dispatch = self.dispatch.lock();
		let mut state = dispatch.get();
		if state.active {
			state.queued += 1;
			dispatch.set(state);
			trace!(bus = self.label, queued = state.queued, "publish queued behind active dispatch");
			return;
		}

		dispatch.set(Dispatch {
			active: true,
			queued: 0,
		});
		let _reset = DispatchReset(&*dispatch);

		let mut flushed = 0usize;
		loop {
			self.deliver();

			let mut state = dispatch.get();
			if state.queued == 0 {
				break;
			}
			if flushed >= self.max_flush_rounds {
				warn!(
					bus = self.label,
					dropped = state.queued,
					limit = self.max_flush_rounds,
					"dropping reentrant change notifications"
				);
				break;
			}
			state.queued -= 1;
			dispatch.set(state);
			flushed += 1;
		}
	}

	fn deliver(&self) {
		let listeners = self.listeners.lock().clone();
		trace!(bus = self.label, listeners = listeners.len(), "publishing change");
		for (id, listener) in listeners {
			if self.is_subscribed(id) {
				listener();
			}
		}
	}
}
