use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Presentation context the host is currently rendering for.
///
/// Route patches and global components are partitioned by mode. The host
/// reports modes as raw integers; anything it reports that this enum does not
/// model collapses to [`UiMode::Unknown`], which is never seeded.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum UiMode {
	/// Mode reported before the host has settled, or one this build does not know.
	Unknown,
	/// Handheld, controller-driven interface.
	GamePad,
	/// Pointer-driven desktop interface.
	Desktop,
}

impl UiMode {
	/// Modes every mode-keyed container is seeded with, in slot order.
	///
	/// Adding a mode here is a breaking change for plugins and hosts alike.
	pub const SUPPORTED: [UiMode; 2] = [UiMode::GamePad, UiMode::Desktop];

	const RAW_UNKNOWN: i32 = -1;
	const RAW_GAMEPAD: i32 = 4;
	const RAW_DESKTOP: i32 = 7;

	/// Maps the host's numeric mode value.
	pub fn from_raw(raw: i32) -> Self {
		match raw {
			Self::RAW_GAMEPAD => UiMode::GamePad,
			Self::RAW_DESKTOP => UiMode::Desktop,
			_ => UiMode::Unknown,
		}
	}

	/// Returns the host's numeric value for this mode.
	pub fn raw(self) -> i32 {
		match self {
			UiMode::Unknown => Self::RAW_UNKNOWN,
			UiMode::GamePad => Self::RAW_GAMEPAD,
			UiMode::Desktop => Self::RAW_DESKTOP,
		}
	}

	/// Returns true if mode-keyed containers hold a slot for this mode.
	#[inline]
	pub fn is_supported(self) -> bool {
		self.slot().is_some()
	}

	/// Index of this mode in [`UiMode::SUPPORTED`].
	#[inline]
	pub(crate) fn slot(self) -> Option<usize> {
		match self {
			UiMode::GamePad => Some(0),
			UiMode::Desktop => Some(1),
			UiMode::Unknown => None,
		}
	}
}
