// Host-side tests for the keyboard mappings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use exhibit_core::{PagerCommand, ViewId};
use keys::*;

#[test]
fn digits_one_to_five_select_walls() {
    assert_eq!(
        view_command_for_key("1"),
        Some(ViewCommand::Select(ViewId::Wall1))
    );
    assert_eq!(
        view_command_for_key("5"),
        Some(ViewCommand::Select(ViewId::Wall5))
    );
    assert_eq!(wall_for_digit("6"), None);
    assert_eq!(view_command_for_key("6"), None);
}

#[test]
fn zero_and_home_return_to_overview() {
    for key in ["0", "Home"] {
        assert_eq!(
            view_command_for_key(key),
            Some(ViewCommand::Select(ViewId::Overview))
        );
    }
}

#[test]
fn arrows_step_the_tour() {
    assert_eq!(view_command_for_key("ArrowRight"), Some(ViewCommand::Next));
    assert_eq!(view_command_for_key("ArrowLeft"), Some(ViewCommand::Prev));
    assert_eq!(view_command_for_key("d"), Some(ViewCommand::Next));
    assert_eq!(view_command_for_key("A"), Some(ViewCommand::Prev));
}

#[test]
fn escape_and_backspace_go_back() {
    assert_eq!(view_command_for_key("Escape"), Some(ViewCommand::Back));
    assert_eq!(view_command_for_key("Backspace"), Some(ViewCommand::Back));
}

#[test]
fn h_toggles_help_in_either_case() {
    assert_eq!(view_command_for_key("h"), Some(ViewCommand::ToggleHelp));
    assert_eq!(view_command_for_key("H"), Some(ViewCommand::ToggleHelp));
}

#[test]
fn unrelated_keys_are_ignored() {
    for key in ["x", "Enter", " ", "Tab", ""] {
        assert_eq!(view_command_for_key(key), None, "key {key:?}");
        assert_eq!(pager_command_for_key(key), None, "key {key:?}");
    }
}

#[test]
fn pager_keys_map_to_commands() {
    assert_eq!(pager_command_for_key("ArrowDown"), Some(PagerCommand::Next));
    assert_eq!(pager_command_for_key("PageDown"), Some(PagerCommand::Next));
    assert_eq!(pager_command_for_key("ArrowUp"), Some(PagerCommand::Prev));
    assert_eq!(pager_command_for_key("PageUp"), Some(PagerCommand::Prev));
    assert_eq!(pager_command_for_key("Home"), Some(PagerCommand::First));
    assert_eq!(pager_command_for_key("End"), Some(PagerCommand::Last));
}
