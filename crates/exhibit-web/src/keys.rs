// Pure key mappings; no DOM access so they can be exercised host-side.

use exhibit_core::{PagerCommand, ViewId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewCommand {
    Next,
    Prev,
    Back,
    Select(ViewId),
    ToggleHelp,
}

#[inline]
pub fn wall_for_digit(key: &str) -> Option<ViewId> {
    match key {
        "1" => ViewId::wall(1),
        "2" => ViewId::wall(2),
        "3" => ViewId::wall(3),
        "4" => ViewId::wall(4),
        "5" => ViewId::wall(5),
        _ => None,
    }
}

pub fn view_command_for_key(key: &str) -> Option<ViewCommand> {
    if let Some(wall) = wall_for_digit(key) {
        return Some(ViewCommand::Select(wall));
    }
    match key {
        "ArrowRight" | "d" | "D" => Some(ViewCommand::Next),
        "ArrowLeft" | "a" | "A" => Some(ViewCommand::Prev),
        "Escape" | "Backspace" => Some(ViewCommand::Back),
        "0" | "Home" => Some(ViewCommand::Select(ViewId::Overview)),
        "h" | "H" => Some(ViewCommand::ToggleHelp),
        _ => None,
    }
}

pub fn pager_command_for_key(key: &str) -> Option<PagerCommand> {
    match key {
        "ArrowDown" | "PageDown" | "ArrowRight" => Some(PagerCommand::Next),
        "ArrowUp" | "PageUp" | "ArrowLeft" => Some(PagerCommand::Prev),
        "Home" => Some(PagerCommand::First),
        "End" => Some(PagerCommand::Last),
        _ => None,
    }
}
