use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[test]
fn seeds_every_supported_mode() {
	let map: ModeMap<BTreeMap<String, u32>> = ModeMap::new();
	let modes: Vec<_> = map.iter().map(|(mode, _)| mode).collect();
	assert_eq!(modes, UiMode::SUPPORTED.to_vec());
	assert!(map.iter().all(|(_, inner)| inner.is_empty()));
}

#[rstest]
#[case(UiMode::GamePad)]
#[case(UiMode::Desktop)]
fn slots_are_independent(#[case] mode: UiMode) {
	let mut map: ModeMap<Vec<&str>> = ModeMap::new();
	map.get_mut(mode).unwrap().push("x");

	for (other, values) in &map {
		if other == mode {
			assert_eq!(values, &vec!["x"]);
		} else {
			assert!(values.is_empty());
		}
	}
}

#[test]
fn unknown_mode_is_rejected() {
	let mut map: ModeMap<Vec<u8>> = ModeMap::new();
	assert_eq!(
		map.get(UiMode::Unknown).unwrap_err(),
		UnsupportedModeError::new(UiMode::Unknown)
	);
	let err = map.get_mut(UiMode::Unknown).unwrap_err();
	assert_eq!(err.mode, UiMode::Unknown);
	assert_eq!(err.to_string(), "UI mode Unknown not supported");
}

#[test]
fn from_fn_and_map_see_each_mode() {
	let map = ModeMap::from_fn(|mode| mode.raw());
	assert_eq!(*map.get(UiMode::GamePad).unwrap(), 4);
	assert_eq!(*map.get(UiMode::Desktop).unwrap(), 7);

	let doubled = map.map(|_, raw| raw * 2);
	assert_eq!(*doubled.get(UiMode::Desktop).unwrap(), 14);
}

#[test]
fn clone_is_detached() {
	let mut original: ModeMap<Vec<u8>> = ModeMap::new();
	let copy = original.clone();
	original.get_mut(UiMode::GamePad).unwrap().push(1);
	assert!(copy.get(UiMode::GamePad).unwrap().is_empty());
}
