//! Runtime extension registries.
//!
//! Plugins extend a host's navigation and UI surface without the host knowing
//! about them at compile time. This crate tracks what they registered and
//! tells the render layer when that changes.
//!
//! # Registries
//!
//! - [`RouteRegistry`] - routes by path, plus per-mode route patches
//! - [`GlobalComponentRegistry`] - named components per mode
//!
//! # Data Flow
//!
//! 1. A plugin calls a mutation through its [`ExtensionContext`].
//! 2. The registry edits a private copy of its state and publishes it as a
//!    new immutable snapshot.
//! 3. The registry's [`ChangeBus`] fires with no payload.
//! 4. Each [`SnapshotBridge`] pulls the fresh snapshot and triggers its
//!    render hook.
//!
//! Mutations never return derived state; everything is read through
//! snapshots.
//!
//! # Concurrency
//!
//! - **Reads:** wait-free (atomic load of the current snapshot).
//! - **Writes:** one reentrant gate per registry, held across mutate and
//!   notify. Listeners may mutate the registry they observe; the resulting
//!   notifications are queued behind the current round (see [`bus`]).

pub mod bridge;
pub mod bus;
pub mod config;
pub mod context;
pub mod error;
pub mod globals;
pub mod routes;
pub mod scope;
mod store;

pub use bridge::{Observable, SnapshotBridge};
pub use bus::{ChangeBus, Listener, SubscriptionId};
pub use config::RegistryConfig;
pub use context::{ExtensionContext, ExtensionHost, GlobalsApi, RouterApi};
pub use error::{ConfigError, OptionsError, UnsupportedModeError};
pub use globals::{GlobalComponentRegistry, GlobalsSnapshot};
pub use routes::{PatchHandle, PatchSet, RouteEntry, RouteOptions, RoutePatch, RouteProps, RouteRegistry, RouteStamp, RouterSnapshot};
pub use scope::PluginScope;
pub use tether_primitives::{ModeMap, UiMode};

/// Marker trait for component references stored in the registries.
///
/// Registries only hold references; cloning one must be cheap (an `Arc`, an
/// id, a function pointer) and must not create or destroy the component.
pub trait Component: Clone + Send + Sync + 'static {}
impl<T> Component for T where T: Clone + Send + Sync + 'static {}
