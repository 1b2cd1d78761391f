//! Route registry.
//!
//! Plugins register whole routes by path and attach patches that rewrite a
//! route's description right before it is rendered. Patches are partitioned
//! by [`UiMode`](tether_primitives::UiMode) and folded in insertion order.

mod options;
mod patch;
mod registry;
mod snapshot;

pub use options::RouteOptions;
pub use patch::{PatchHandle, PatchSet, RoutePatch, RouteProps};
pub use registry::RouteRegistry;
pub use snapshot::{RouteEntry, RouteStamp, RouterSnapshot};
