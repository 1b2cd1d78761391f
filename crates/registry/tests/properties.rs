//! Property checks over arbitrary mutation sequences.

use proptest::prelude::*;
use tether_registry::{RoutePatch, RouteProps, RouteRegistry, RouteOptions, UiMode};

fn tagged(tag: u8) -> RoutePatch<u8> {
	RoutePatch::new(move |mut props: RouteProps<u8>| {
		let mut title = props.options.title.take().unwrap_or_default();
		title.push(char::from(b'a' + tag));
		props.options.title = Some(title);
		props
	})
}

proptest! {
	#[test]
	fn last_add_route_wins(components in prop::collection::vec(any::<u8>(), 1..16)) {
		let registry = RouteRegistry::new();
		for component in &components {
			registry.add_route("/p", *component);
		}
		let snap = registry.snapshot();
		prop_assert_eq!(snap.routes().len(), 1);
		prop_assert_eq!(snap.route("/p").map(|e| e.component), components.last().copied());
	}

	#[test]
	fn patches_apply_in_insertion_order(tags in prop::collection::vec(0u8..26, 0..12)) {
		let registry = RouteRegistry::new();
		for tag in &tags {
			registry.add_patch("/x", tagged(*tag), UiMode::GamePad).unwrap();
		}
		let base = RouteProps::new("/x", 0u8, RouteOptions::default());
		let patched = registry.snapshot().apply_patches(base, UiMode::GamePad).unwrap();

		let expected: String = tags.iter().map(|t| char::from(b'a' + t)).collect();
		let expected = if tags.is_empty() { None } else { Some(expected) };
		prop_assert_eq!(patched.options.title, expected);
	}

	#[test]
	fn removing_every_patch_prunes_the_path(
		count in 1usize..10,
		order in prop::collection::vec(any::<prop::sample::Index>(), 10),
	) {
		let registry = RouteRegistry::<u8>::new();
		let mut handles: Vec<_> = (0..count)
			.map(|i| registry.add_patch("/x", tagged(i as u8), UiMode::Desktop).unwrap())
			.collect();

		for idx in order.iter().take(count) {
			let handle = handles.remove(idx.index(handles.len()));
			registry.remove_patch("/x", handle, UiMode::Desktop).unwrap();
		}

		let snap = registry.snapshot();
		prop_assert!(snap.patches(UiMode::Desktop).unwrap().get("/x").is_none());
		prop_assert!(snap.patches(UiMode::GamePad).unwrap().is_empty());
	}
}
