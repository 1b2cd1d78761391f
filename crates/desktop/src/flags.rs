use bitflags::bitflags;

bitflags! {
	/// Flags passed to the host when it creates a popup window.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CreationFlags: u32 {
		const MINIMIZED = 1 << 0;
		const HIDDEN = 1 << 1;
		const TOOLTIP_HINT = 1 << 2;
		const NO_TASKBAR_ICON = 1 << 3;
		const RESIZABLE = 1 << 4;
		const SCALE_POSITION = 1 << 5;
		const SCALE_SIZE = 1 << 6;
		const MAXIMIZED = 1 << 7;
		const COMPOSITED = 1 << 8;
		const NOT_FOCUSABLE = 1 << 9;
		const FULL_SCREEN = 1 << 10;
		const FULL_SCREEN_EXCLUSIVE = 1 << 11;
		const APPLY_BROWSER_SCALE_TO_DIMENSIONS = 1 << 12;
		const ALWAYS_ON_TOP = 1 << 13;
		const NO_WINDOW_SHADOW = 1 << 14;
		const NO_MINIMIZE = 1 << 15;
		const POPUP_MENU_HINT = 1 << 16;
		const IGNORE_SAVED_SIZE = 1 << 17;
		const NO_ROUNDED_CORNERS = 1 << 18;
		const FORCE_ROUNDED_CORNERS = 1 << 19;
		const OVERRIDE_REDIRECT = 1 << 20;
		const IGNORE_STEAM_DISPLAY_SCALE = 1 << 21;
		const TRANSPARENT_PARENT_WINDOW = 1 << 22;
		const DISABLE_DPI_SCALE = 1 << 23;
		const FORCE_BROWSER_VISIBLE = 1 << 24;
	}
}
