use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::RouteOptions;

/// Route description handed through the patch chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProps<C> {
	pub path: String,
	pub component: C,
	pub options: RouteOptions,
}

impl<C> RouteProps<C> {
	pub fn new(path: impl Into<String>, component: C, options: RouteOptions) -> Self {
		Self {
			path: path.into(),
			component,
			options,
		}
	}
}

type PatchFn<C> = dyn Fn(RouteProps<C>) -> RouteProps<C> + Send + Sync;

/// Pure transform applied to a route description before render.
pub struct RoutePatch<C>(Arc<PatchFn<C>>);

impl<C> RoutePatch<C> {
	pub fn new(patch: impl Fn(RouteProps<C>) -> RouteProps<C> + Send + Sync + 'static) -> Self {
		Self(Arc::new(patch))
	}

	#[inline]
	pub fn apply(&self, props: RouteProps<C>) -> RouteProps<C> {
		(self.0)(props)
	}
}

impl<C> Clone for RoutePatch<C> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<C> fmt::Debug for RoutePatch<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("RoutePatch(..)")
	}
}

/// Opaque identity of one registered patch.
///
/// Closures have no usable identity, so [`RouteRegistry::add_patch`] mints a
/// handle and removal goes through it.
///
/// [`RouteRegistry::add_patch`]: super::RouteRegistry::add_patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatchHandle(pub(crate) u64);

/// Patches registered for one (mode, path), in insertion order.
pub struct PatchSet<C> {
	patches: IndexMap<PatchHandle, RoutePatch<C>>,
}

impl<C> Default for PatchSet<C> {
	fn default() -> Self {
		Self {
			patches: IndexMap::new(),
		}
	}
}

impl<C> Clone for PatchSet<C> {
	fn clone(&self) -> Self {
		Self {
			patches: self.patches.clone(),
		}
	}
}

impl<C> fmt::Debug for PatchSet<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.patches.keys()).finish()
	}
}

impl<C> PatchSet<C> {
	pub fn len(&self) -> usize {
		self.patches.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patches.is_empty()
	}

	pub fn contains(&self, handle: PatchHandle) -> bool {
		self.patches.contains_key(&handle)
	}

	/// Handles in application order.
	pub fn handles(&self) -> impl Iterator<Item = PatchHandle> + '_ {
		self.patches.keys().copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (PatchHandle, &RoutePatch<C>)> {
		self.patches.iter().map(|(handle, patch)| (*handle, patch))
	}

	/// Folds every patch over `base`, first-added first.
	pub fn apply(&self, base: RouteProps<C>) -> RouteProps<C> {
		self.patches.values().fold(base, |props, patch| patch.apply(props))
	}

	pub(crate) fn insert(&mut self, handle: PatchHandle, patch: RoutePatch<C>) {
		self.patches.insert(handle, patch);
	}

	/// Removes `handle`, keeping the remaining order intact.
	pub(crate) fn remove(&mut self, handle: PatchHandle) -> bool {
		self.patches.shift_remove(&handle).is_some()
	}
}
