use std::sync::atomic::AtomicUsize;

use parking_lot::Mutex;
use tether_primitives::UiMode;

use super::*;

type Routes = RouteRegistry<&'static str>;

#[test]
fn starts_with_current_snapshot() {
	let routes = Arc::new(Routes::new());
	routes.add_route("/a", "A");

	let bridge = SnapshotBridge::detached(routes.clone());

	assert!(bridge.get().route("/a").is_some());
	assert_eq!(bridge.generation(), 0);
}

#[test]
fn refreshes_and_rerenders_on_change() {
	let routes = Arc::new(Routes::new());
	let rendered: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

	let sink = rendered.clone();
	let bridge = SnapshotBridge::new(routes.clone(), move |snap: &Arc<RouterSnapshot<&'static str>>| {
		sink.lock().push(snap.routes().len());
	});

	routes.add_route("/a", "A");
	routes.add_route("/b", "B");

	assert_eq!(*rendered.lock(), vec![1, 2]);
	assert_eq!(bridge.generation(), 2);
	assert_eq!(bridge.get().routes().len(), 2);
}

#[test]
fn held_snapshot_is_not_aliased() {
	let routes = Arc::new(Routes::new());
	let bridge = SnapshotBridge::detached(routes.clone());
	let held = bridge.get();

	routes.add_route("/a", "A");

	assert!(held.routes().is_empty());
	assert!(!Arc::ptr_eq(&held, &bridge.get()));
}

#[test]
fn drop_unsubscribes() {
	let routes = Arc::new(Routes::new());
	let renders = Arc::new(AtomicUsize::new(0));

	let counter = renders.clone();
	let bridge = SnapshotBridge::new(routes.clone(), move |_| {
		counter.fetch_add(1, Ordering::SeqCst);
	});
	routes.add_route("/a", "A");
	drop(bridge);
	routes.add_route("/b", "B");

	assert_eq!(renders.load(Ordering::SeqCst), 1);
	// Only the test's own handle remains; the bus holds no strong reference.
	assert_eq!(Arc::strong_count(&routes), 1);
}

#[test]
fn bridges_globals_too() {
	let globals = Arc::new(GlobalComponentRegistry::<&'static str>::new());
	let bridge = SnapshotBridge::detached(globals.clone());

	globals.add("toast", "Toast", UiMode::Desktop).unwrap();

	assert_eq!(bridge.get().get("toast", UiMode::Desktop).unwrap(), Some(&"Toast"));
	assert_eq!(bridge.generation(), 1);
}

#[test]
fn rerender_sees_registry_consistent_with_snapshot() {
	let routes = Arc::new(Routes::new());
	let weak = Arc::downgrade(&routes);
	let mismatches = Arc::new(AtomicUsize::new(0));

	let seen = mismatches.clone();
	let _bridge = SnapshotBridge::new(routes.clone(), move |snap: &Arc<RouterSnapshot<&'static str>>| {
		if let Some(routes) = weak.upgrade()
			&& !Arc::ptr_eq(snap, &routes.snapshot())
		{
			seen.fetch_add(1, Ordering::SeqCst);
		}
	});

	routes.add_route("/a", "A");
	routes.remove_route("/a");

	assert_eq!(mismatches.load(Ordering::SeqCst), 0);
}

/// Route registry whose `subscribe` lets a write land just before the
/// listener is registered, as a writer on another thread could.
struct WriteBeforeSubscribe {
	routes: Routes,
}

impl Observable for WriteBeforeSubscribe {
	type Snapshot = RouterSnapshot<&'static str>;

	fn snapshot(&self) -> Arc<Self::Snapshot> {
		self.routes.snapshot()
	}

	fn subscribe(&self, listener: Listener) -> SubscriptionId {
		self.routes.add_route("/late", "Late");
		self.routes.subscribe_arc(listener)
	}

	fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.routes.unsubscribe(id)
	}
}

#[test]
fn write_landing_before_subscription_is_seen() {
	let source = Arc::new(WriteBeforeSubscribe { routes: Routes::new() });

	let bridge = SnapshotBridge::detached(source.clone());

	assert!(bridge.get().route("/late").is_some());
	assert!(Arc::ptr_eq(&bridge.get(), &source.routes.snapshot()));
	assert_eq!(bridge.generation(), 0);

	source.routes.remove_route("/late");
	assert!(bridge.get().route("/late").is_none());
	assert_eq!(bridge.generation(), 1);
}
