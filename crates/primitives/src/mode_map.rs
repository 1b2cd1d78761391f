//! Mode-keyed container.
//!
//! Both registries partition their state by [`UiMode`]. [`ModeMap`] holds one
//! value per supported mode, created eagerly, so a registry never has to seed
//! or prune mode entries itself. Slots are never removed; only their contents
//! change.

use crate::{UiMode, UnsupportedModeError};

const SLOTS: usize = UiMode::SUPPORTED.len();

/// One `T` per supported [`UiMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeMap<T> {
	slots: [T; SLOTS],
}

impl<T: Default> Default for ModeMap<T> {
	fn default() -> Self {
		Self::from_fn(|_| T::default())
	}
}

impl<T> ModeMap<T> {
	/// Creates a map seeded with empty values for every supported mode.
	pub fn new() -> Self
	where
		T: Default,
	{
		Self::default()
	}

	/// Creates a map by calling `init` once per supported mode.
	pub fn from_fn(init: impl FnMut(UiMode) -> T) -> Self {
		Self {
			slots: UiMode::SUPPORTED.map(init),
		}
	}

	/// Returns the value for `mode`.
	pub fn get(&self, mode: UiMode) -> Result<&T, UnsupportedModeError> {
		let slot = mode.slot().ok_or(UnsupportedModeError::new(mode))?;
		Ok(&self.slots[slot])
	}

	/// Returns the value for `mode` mutably.
	pub fn get_mut(&mut self, mode: UiMode) -> Result<&mut T, UnsupportedModeError> {
		let slot = mode.slot().ok_or(UnsupportedModeError::new(mode))?;
		Ok(&mut self.slots[slot])
	}

	/// Iterates `(mode, value)` pairs in [`UiMode::SUPPORTED`] order.
	pub fn iter(&self) -> impl Iterator<Item = (UiMode, &T)> {
		UiMode::SUPPORTED.into_iter().zip(self.slots.iter())
	}

	/// Iterates `(mode, value)` pairs mutably.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = (UiMode, &mut T)> {
		UiMode::SUPPORTED.into_iter().zip(self.slots.iter_mut())
	}

	/// Builds a new map by transforming every slot.
	pub fn map<U>(&self, mut f: impl FnMut(UiMode, &T) -> U) -> ModeMap<U> {
		ModeMap {
			slots: std::array::from_fn(|slot| f(UiMode::SUPPORTED[slot], &self.slots[slot])),
		}
	}
}

impl<'a, T> IntoIterator for &'a ModeMap<T> {
	type Item = (UiMode, &'a T);
	type IntoIter = std::iter::Zip<std::array::IntoIter<UiMode, SLOTS>, std::slice::Iter<'a, T>>;

	fn into_iter(self) -> Self::IntoIter {
		UiMode::SUPPORTED.into_iter().zip(self.slots.iter())
	}
}

#[cfg(test)]
mod tests;
