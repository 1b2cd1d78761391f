//! Popup window requests.
//!
//! # Role
//!
//! [`PopupSpec`] describes a window the host should open: the name it is
//! tracked under, its title, size constraints and creation flags. The host
//! opens windows from a feature string ([`PopupSpec::window_features`]) and an
//! `about:blank` URL whose query carries the host-specific options
//! ([`PopupSpec::url`]), then writes [`PopupSpec::document`] into it.
//!
//! # Invariants
//!
//! - Missing or zero width/height fall back to [`DEFAULT_EDGE`].
//! - `createflags` is always the first query parameter.
//! - Unbounded maxima are omitted from the URL.

use thiserror::Error;

use crate::flags::CreationFlags;

/// Width and height used when a request leaves them unset.
pub const DEFAULT_EDGE: u32 = 300;

/// Name the plugin view popup is tracked under.
pub const PLUGIN_VIEW_NAME: &str = "PluginView";

const PLUGIN_VIEW_STYLE: &str = "button.DialogButton { padding: 0 12px; }\nbody { overflow: hidden; }";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopupError {
	/// The host refused to open the window, usually a popup blocker.
	#[error("popup {name:?} was blocked by the host")]
	Blocked { name: String },
}

/// Requested window geometry. `None` leaves the choice to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub left: Option<i32>,
	pub top: Option<i32>,
}

impl Dimensions {
	pub fn sized(width: u32, height: u32) -> Self {
		Self {
			width: Some(width),
			height: Some(height),
			..Self::default()
		}
	}

	fn width_or_default(&self) -> u32 {
		self.width.filter(|w| *w > 0).unwrap_or(DEFAULT_EDGE)
	}

	fn height_or_default(&self) -> u32 {
		self.height.filter(|h| *h > 0).unwrap_or(DEFAULT_EDGE)
	}
}

/// Everything the host needs to open one popup window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupSpec {
	pub name: String,
	pub title: String,
	pub dimensions: Dimensions,
	pub flags: CreationFlags,
	pub min_width: Option<u32>,
	pub min_height: Option<u32>,
	/// `None` means unbounded.
	pub max_width: Option<u32>,
	/// `None` means unbounded.
	pub max_height: Option<u32>,
	pub restore_details: Option<String>,
	pub user_agent: Option<String>,
	pub pinned: bool,
	pub modal: bool,
	pub html_class: Option<String>,
	pub body_class: Option<String>,
	pub body_role: Option<String>,
	pub popup_class: Option<String>,
	/// Extra CSS written into the popup's head.
	pub style: Option<String>,
}

impl PopupSpec {
	pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			title: title.into(),
			..Self::default()
		}
	}

	/// The window the desktop menu shows plugins in.
	pub fn plugin_view(title: impl Into<String>) -> Self {
		Self {
			dimensions: Dimensions::sized(300, 600),
			flags: CreationFlags::RESIZABLE,
			min_width: Some(250),
			min_height: Some(300),
			restore_details: Some("1".to_owned()),
			html_class: Some("fullheight".to_owned()),
			body_class: Some("fullheight DesktopUI".to_owned()),
			popup_class: Some("fullheight".to_owned()),
			style: Some(PLUGIN_VIEW_STYLE.to_owned()),
			..Self::new(PLUGIN_VIEW_NAME, title)
		}
	}

	/// Feature string handed to the host's window opener.
	pub fn window_features(&self) -> String {
		let dims = &self.dimensions;
		let mut features = format!("width={},height={}", dims.width_or_default(), dims.height_or_default());
		if let Some(left) = dims.left {
			features.push_str(&format!(",left={left}"));
		}
		if let Some(top) = dims.top {
			features.push_str(&format!(",top={top}"));
		}
		features.push_str(",resizeable,status=0,toolbar=0,menubar=0,location=0");
		features
	}

	/// `about:blank` URL whose query carries the host window options.
	pub fn url(&self) -> String {
		let mut params = vec![format!("createflags={}", self.flags.bits())];

		let sizes = [
			("minwidth", self.min_width),
			("minheight", self.min_height),
			("maxwidth", self.max_width),
			("maxheight", self.max_height),
		];
		for (key, value) in sizes {
			if let Some(value) = value.filter(|v| *v > 0) {
				params.push(format!("{key}={value}"));
			}
		}

		let strings = [("restoredetails", &self.restore_details), ("useragent", &self.user_agent)];
		for (key, value) in strings {
			if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
				params.push(format!("{key}={value}"));
			}
		}

		if self.pinned {
			params.push("pinned=true".to_owned());
		}
		if self.modal {
			params.push("modal=true".to_owned());
		}

		format!("about:blank?{}", params.join("&"))
	}

	/// Initial document written into the opened window. Plugin content is
	/// mounted into the `popup_target` element.
	pub fn document(&self) -> String {
		let html_class = attr("class", &self.html_class);
		let body_attrs = [attr("class", &self.body_class), attr("role", &self.body_role)]
			.into_iter()
			.filter(|a| !a.is_empty())
			.collect::<Vec<_>>()
			.join("");
		let popup_class = attr("class", &self.popup_class);
		let style = self
			.style
			.as_deref()
			.map(|css| format!("<style>{css}</style>"))
			.unwrap_or_default();

		format!(
			"<!DOCTYPE html>\n<html{html_class}>\n<head><title>{title}</title>{style}</head>\n<body{body_attrs}>\n<div id=\"popup_target\"{popup_class}></div>\n</body>\n</html>\n",
			title = escape(&self.title),
		)
	}
}

fn attr(name: &str, value: &Option<String>) -> String {
	match value.as_deref() {
		Some(value) if !value.is_empty() => format!(" {name}=\"{}\"", escape(value)),
		_ => String::new(),
	}
}

fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			_ => out.push(ch),
		}
	}
	out
}

/// Handle to a window opened by a [`PopupHost`].
pub trait PopupWindow {
	/// Whether the user or the host already closed the window.
	fn is_closed(&self) -> bool;
	fn close(&self);
}

/// The host's window spawning subsystem.
pub trait PopupHost {
	type Window: PopupWindow;

	/// Opens a window for `spec`. Fails with [`PopupError::Blocked`] when the
	/// host refuses.
	fn create(&mut self, spec: &PopupSpec) -> Result<Self::Window, PopupError>;
}
