//! Copy-on-write state cell shared by both registries.
//!
//! # Role
//!
//! Holds the published state in an [`ArcSwap`] so readers take snapshots
//! without locking, and serializes writers on a reentrant gate held for the
//! whole mutate-and-notify cycle. Each mutation clones the current state,
//! edits the clone, and swaps it in; a previously loaded `Arc` never changes.
//!
//! # Invariants
//!
//! - A failed mutation publishes nothing and leaves the state untouched.
//! - A mutation that reports [`Change::Modified`] notifies exactly once.
//! - Writers on other threads wait until the current cycle (including
//!   listener delivery) completes; the gate is reentrant so listeners on the
//!   writing thread may mutate again.

use std::convert::Infallible;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::ReentrantMutex;

use crate::bus::ChangeBus;
use crate::config::RegistryConfig;

/// Whether a mutation altered the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Change {
	Modified,
	Unchanged,
}

impl Change {
	pub(crate) fn from_bool(modified: bool) -> Self {
		if modified { Change::Modified } else { Change::Unchanged }
	}
}

pub(crate) struct Store<S> {
	gate: ReentrantMutex<()>,
	state: ArcSwap<S>,
	bus: ChangeBus,
	notify_on_noop: bool,
}

impl<S: Clone> Store<S> {
	pub(crate) fn new(label: &'static str, initial: S, config: &RegistryConfig) -> Self {
		Self {
			gate: ReentrantMutex::new(()),
			state: ArcSwap::from_pointee(initial),
			bus: ChangeBus::with_flush_limit(label, config.max_flush_rounds),
			notify_on_noop: config.notify_on_noop,
		}
	}

	#[inline]
	pub(crate) fn load(&self) -> Arc<S> {
		self.state.load_full()
	}

	pub(crate) fn bus(&self) -> &ChangeBus {
		&self.bus
	}

	/// Runs a fallible edit against a private copy of the state.
	pub(crate) fn mutate<T, E>(
		&self,
		edit: impl FnOnce(&mut S) -> Result<(T, Change), E>,
	) -> Result<T, E> {
		let _cycle = self.gate.lock();

		let mut next = S::clone(&self.state.load_full());
		let (value, change) = edit(&mut next)?;

		let modified = change == Change::Modified;
		if modified {
			self.state.store(Arc::new(next));
		}
		if modified || self.notify_on_noop {
			self.bus.publish();
		}
		Ok(value)
	}

	/// Runs an edit that cannot fail.
	pub(crate) fn update<T>(&self, edit: impl FnOnce(&mut S) -> (T, Change)) -> T {
		match self.mutate::<T, Infallible>(|state| Ok(edit(state))) {
			Ok(value) => value,
			Err(never) => match never {},
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	fn counted(store: &Store<Vec<u32>>) -> Arc<AtomicUsize> {
		let hits = Arc::new(AtomicUsize::new(0));
		let seen = hits.clone();
		store.bus().subscribe(move || {
			seen.fetch_add(1, Ordering::SeqCst);
		});
		hits
	}

	#[test]
	fn modified_state_is_swapped_and_published() {
		let store = Store::new("test", Vec::new(), &RegistryConfig::default());
		let hits = counted(&store);
		let before = store.load();

		store.update(|v| {
			v.push(1);
			((), Change::Modified)
		});

		assert!(before.is_empty(), "old snapshot must not observe the edit");
		assert_eq!(*store.load(), vec![1]);
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn failed_edit_publishes_nothing() {
		let store = Store::new("test", vec![7], &RegistryConfig::default());
		let hits = counted(&store);

		let result: Result<(), &str> = store.mutate(|v| {
			v.clear();
			Err("nope")
		});

		assert_eq!(result, Err("nope"));
		assert_eq!(*store.load(), vec![7]);
		assert_eq!(hits.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn unchanged_edit_respects_noop_policy() {
		let quiet = RegistryConfig {
			notify_on_noop: false,
			..RegistryConfig::default()
		};
		let store = Store::new("test", Vec::new(), &quiet);
		let hits = counted(&store);
		let before = store.load();

		store.update(|_| ((), Change::Unchanged));

		assert_eq!(hits.load(Ordering::SeqCst), 0);
		assert!(Arc::ptr_eq(&before, &store.load()));

		let loud = Store::new("test", Vec::<u32>::new(), &RegistryConfig::default());
		let hits = counted(&loud);
		loud.update(|_| ((), Change::Unchanged));
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn listener_may_mutate_reentrantly() {
		let store = Arc::new(Store::new("test", Vec::<u32>::new(), &RegistryConfig::default()));
		let weak = Arc::downgrade(&store);
		store.bus().subscribe(move || {
			let Some(store) = weak.upgrade() else { return };
			if store.load().len() == 1 {
				store.update(|v| {
					v.push(2);
					((), Change::Modified)
				});
			}
		});

		store.update(|v| {
			v.push(1);
			((), Change::Modified)
		});

		assert_eq!(*store.load(), vec![1, 2]);
	}
}
