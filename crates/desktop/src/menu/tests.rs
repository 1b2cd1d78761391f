use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use super::*;
use crate::popup::PopupError;

#[derive(Clone, Default)]
struct FakeWindow {
	closed: Rc<Cell<bool>>,
	close_calls: Rc<Cell<usize>>,
}

impl PopupWindow for FakeWindow {
	fn is_closed(&self) -> bool {
		self.closed.get()
	}

	fn close(&self) {
		self.closed.set(true);
		self.close_calls.set(self.close_calls.get() + 1);
	}
}

#[derive(Default)]
struct FakeHost {
	block: bool,
	opened: Rc<RefCell<Vec<FakeWindow>>>,
}

impl PopupHost for FakeHost {
	type Window = FakeWindow;

	fn create(&mut self, spec: &PopupSpec) -> Result<FakeWindow, PopupError> {
		if self.block {
			return Err(PopupError::Blocked {
				name: spec.name.clone(),
			});
		}
		let window = FakeWindow::default();
		self.opened.borrow_mut().push(window.clone());
		Ok(window)
	}
}

#[derive(Default)]
struct RecordingNavigator {
	calls: Vec<String>,
}

impl Navigator for RecordingNavigator {
	fn navigate(&mut self, path: &str) {
		self.calls.push(format!("navigate {path}"));
	}

	fn close_side_menus(&mut self) {
		self.calls.push("close side menus".to_owned());
	}
}

#[fixture]
fn menu() -> DesktopMenu<FakeHost> {
	DesktopMenu::new(FakeHost::default(), "Tether")
}

fn opened(menu: &DesktopMenu<FakeHost>) -> Vec<FakeWindow> {
	menu.host().opened.borrow().clone()
}

#[rstest]
fn opening_spawns_one_window(mut menu: DesktopMenu<FakeHost>) {
	menu.toggle();
	menu.set_open(true);

	assert!(menu.is_open());
	assert_eq!(opened(&menu).len(), 1);
	assert_eq!(menu.spec().name, crate::popup::PLUGIN_VIEW_NAME);
}

#[rstest]
fn closing_closes_live_window(mut menu: DesktopMenu<FakeHost>) {
	menu.toggle();
	menu.toggle();

	assert!(!menu.is_open());
	assert!(menu.window().is_none());
	let windows = opened(&menu);
	assert!(windows[0].is_closed());
	assert_eq!(windows[0].close_calls.get(), 1);
}

#[rstest]
fn reopening_after_user_closed_window_spawns_new_one(mut menu: DesktopMenu<FakeHost>) {
	menu.toggle();
	opened(&menu)[0].closed.set(true);

	menu.set_open(true);

	assert_eq!(opened(&menu).len(), 2);
	assert!(!menu.window().is_some_and(PopupWindow::is_closed));
}

#[rstest]
fn unload_resets_menu_without_double_close(mut menu: DesktopMenu<FakeHost>) {
	menu.toggle();
	let window = opened(&menu)[0].clone();
	window.closed.set(true);

	menu.on_window_unload();

	assert!(!menu.is_open());
	assert_eq!(window.close_calls.get(), 0);
}

#[test]
fn blocked_popup_leaves_menu_closed() {
	let host = FakeHost {
		block: true,
		..FakeHost::default()
	};
	let mut menu = DesktopMenu::new(host, "Tether");

	menu.toggle();

	assert!(!menu.is_open());
	assert!(menu.window().is_none());
}

#[rstest]
fn navigate_routes_host_then_closes_menu(mut menu: DesktopMenu<FakeHost>) {
	let mut navigator = RecordingNavigator::default();
	menu.toggle();

	menu.navigate(&mut navigator, "/tether/store");

	assert_eq!(navigator.calls, vec!["navigate /tether/store", "close side menus"]);
	assert!(!menu.is_open());
	assert!(opened(&menu)[0].is_closed());
}

#[rstest]
fn drop_closes_window(mut menu: DesktopMenu<FakeHost>) {
	menu.toggle();
	let window = opened(&menu)[0].clone();

	drop(menu);

	assert!(window.is_closed());
}
