//! Immutable view of the route registry.
//!
//! A [`RouterSnapshot`] is what [`RouteRegistry::snapshot`] hands out. It
//! doubles as the registry's internal state: the registry edits a private
//! clone and publishes it as a new `Arc`, so a snapshot already held by a
//! render layer never changes underneath it.
//!
//! [`RouteRegistry::snapshot`]: super::RouteRegistry::snapshot

use indexmap::IndexMap;
use tether_primitives::{ModeMap, UiMode, UnsupportedModeError};

use super::{PatchSet, RouteOptions, RouteProps};

/// Identity of one `add_route` call.
///
/// Re-registering a path mints a new stamp, so a holder can tell whether the
/// entry at a path is still the one it registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteStamp(pub(crate) u64);

/// A route registered by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<C> {
	pub component: C,
	pub options: RouteOptions,
	pub(crate) stamp: RouteStamp,
}

impl<C> RouteEntry<C> {
	pub fn stamp(&self) -> RouteStamp {
		self.stamp
	}
}

impl<C: Clone> RouteEntry<C> {
	/// Builds the unpatched description of this route at `path`.
	pub fn props(&self, path: &str) -> RouteProps<C> {
		RouteProps::new(path, self.component.clone(), self.options.clone())
	}
}

/// Routes plus per-mode patch sets at one point in time.
pub struct RouterSnapshot<C> {
	pub(crate) routes: IndexMap<String, RouteEntry<C>>,
	pub(crate) patches: ModeMap<IndexMap<String, PatchSet<C>>>,
}

impl<C> Default for RouterSnapshot<C> {
	fn default() -> Self {
		Self {
			routes: IndexMap::new(),
			patches: ModeMap::from_fn(|_| IndexMap::new()),
		}
	}
}

impl<C: Clone> Clone for RouterSnapshot<C> {
	fn clone(&self) -> Self {
		Self {
			routes: self.routes.clone(),
			patches: self.patches.clone(),
		}
	}
}

impl<C: std::fmt::Debug> std::fmt::Debug for RouterSnapshot<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterSnapshot")
			.field("routes", &self.routes)
			.field("patches", &self.patches)
			.finish()
	}
}

impl<C> RouterSnapshot<C> {
	/// Registered routes in registration order.
	pub fn routes(&self) -> &IndexMap<String, RouteEntry<C>> {
		&self.routes
	}

	pub fn route(&self, path: &str) -> Option<&RouteEntry<C>> {
		self.routes.get(path)
	}

	/// Patch sets for `mode`, keyed by path. Paths without patches are absent.
	pub fn patches(&self, mode: UiMode) -> Result<&IndexMap<String, PatchSet<C>>, UnsupportedModeError> {
		self.patches.get(mode)
	}

	pub fn patch_set(&self, path: &str, mode: UiMode) -> Result<Option<&PatchSet<C>>, UnsupportedModeError> {
		Ok(self.patches.get(mode)?.get(path))
	}

	/// Folds the patches registered for `base.path` under `mode` over `base`.
	///
	/// Works for host routes that were never registered here; patches for
	/// other modes are ignored. Without a patch set `base` comes back as is.
	pub fn apply_patches(&self, base: RouteProps<C>, mode: UiMode) -> Result<RouteProps<C>, UnsupportedModeError> {
		Ok(match self.patches.get(mode)?.get(base.path.as_str()) {
			Some(set) => set.apply(base),
			None => base,
		})
	}
}

impl<C: Clone> RouterSnapshot<C> {
	/// Resolves a registered route as it should render under `mode`.
	pub fn resolve(&self, path: &str, mode: UiMode) -> Result<Option<RouteProps<C>>, UnsupportedModeError> {
		let Some(entry) = self.routes.get(path) else {
			// Still reject unseeded modes for unknown paths.
			self.patches.get(mode)?;
			return Ok(None);
		};
		self.apply_patches(entry.props(path), mode).map(Some)
	}
}
