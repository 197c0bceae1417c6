//! Wire vocabulary of the command link and the identifier matcher.
//!
//! Lines are matched by substring containment, as legacy senders expect: a
//! line matches an identifier if the identifier occurs anywhere in it. Several
//! identifiers are substrings of others (`MOUSE_LEFT` of `MOUSE_LEFT_CLICK`),
//! so [`longest_match`] always prefers the longest contained identifier and
//! only falls back to table order for identifiers of equal length.

use crate::keys::{Key, Modifier};
use crate::types::{Compass, Direction, Magnitude, MouseButton};

/// Selects mouse mode.
pub const MODE_MOUSE: &str = "MODE_MOUSE";
/// Selects keyboard mode.
pub const MODE_KEYBOARD: &str = "MODE_KEYBOARD";
/// Flips the current mode (single-marker deployments).
pub const MODE_TOGGLE: &str = "MODE_TOGGLE";

/// Command identifier table: identifier and the command it stands for.
pub type Table<T> = [(&'static str, T)];

/// Find the command whose identifier is the longest one contained in `line`.
///
/// Equal-length identifiers resolve to the earlier table entry. Matching is
/// case-sensitive.
#[must_use]
pub fn longest_match<T: Copy>(line: &str, table: &Table<T>) -> Option<T> {
    let mut best: Option<(usize, T)> = None;
    for &(ident, command) in table {
        if !line.contains(ident) {
            continue;
        }
        if best.map_or(true, |(len, _)| ident.len() > len) {
            best = Some((ident.len(), command));
        }
    }
    best.map(|(_, command)| command)
}

/// A recognized keyboard-mode command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardCommand {
    /// Press then release a single key.
    Tap(Key),
    /// Modifier plus letter, e.g. Ctrl+A.
    Chord(Modifier, char),
    /// Repeated delete taps used to catch a firmware setup screen.
    Burst,
}

/// A recognized mouse-mode command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseCommand {
    /// Orthogonal step; meaning depends on the mouse scheme (one-shot move or
    /// latch toggle).
    Step(Direction),
    /// One-shot move along a compass direction at a magnitude tier.
    Move(Compass, Magnitude),
    Click(MouseButton),
}

/// Keyboard and BIOS navigation commands.
pub static KEYBOARD_COMMANDS: &Table<KeyboardCommand> = &[
    ("KEYBOARD_SELECT_ALL", KeyboardCommand::Chord(Modifier::LeftCtrl, 'a')),
    ("KEYBOARD_COPY", KeyboardCommand::Chord(Modifier::LeftCtrl, 'c')),
    ("KEYBOARD_PASTE", KeyboardCommand::Chord(Modifier::LeftCtrl, 'v')),
    ("KEYBOARD_DELETE", KeyboardCommand::Tap(Key::Delete)),
    ("BIOS_UP", KeyboardCommand::Tap(Key::Up)),
    ("BIOS_DOWN", KeyboardCommand::Tap(Key::Down)),
    ("BIOS_LEFT", KeyboardCommand::Tap(Key::Left)),
    ("BIOS_RIGHT", KeyboardCommand::Tap(Key::Right)),
    ("BIOS_ENTER", KeyboardCommand::Tap(Key::Enter)),
    ("BIOS_ESC", KeyboardCommand::Tap(Key::Escape)),
    ("BIOS_F2", KeyboardCommand::Tap(Key::Function(2))),
    ("BIOS_F10", KeyboardCommand::Tap(Key::Function(10))),
    ("BIOS_F12", KeyboardCommand::Tap(Key::Function(12))),
    ("BIOS_DELETE", KeyboardCommand::Tap(Key::Delete)),
    ("BIOS_LOOP", KeyboardCommand::Burst),
];

/// Orthogonal steps and clicks (fixed-step and continuous schemes).
pub static STEP_MOUSE_COMMANDS: &Table<MouseCommand> = &[
    ("MOUSE_UP", MouseCommand::Step(Direction::Up)),
    ("MOUSE_DOWN", MouseCommand::Step(Direction::Down)),
    ("MOUSE_LEFT", MouseCommand::Step(Direction::Left)),
    ("MOUSE_RIGHT", MouseCommand::Step(Direction::Right)),
    ("MOUSE_LEFT_CLICK", MouseCommand::Click(MouseButton::Left)),
    ("MOUSE_RIGHT_CLICK", MouseCommand::Click(MouseButton::Right)),
];

/// Eight compass directions at two magnitudes, plus clicks.
pub static DUAL_MOUSE_COMMANDS: &Table<MouseCommand> = &[
    ("MOUSE_UP_20", MouseCommand::Move(Compass::Up, Magnitude::Small)),
    ("MOUSE_DOWN_20", MouseCommand::Move(Compass::Down, Magnitude::Small)),
    ("MOUSE_LEFT_20", MouseCommand::Move(Compass::Left, Magnitude::Small)),
    ("MOUSE_RIGHT_20", MouseCommand::Move(Compass::Right, Magnitude::Small)),
    ("MOUSE_UP_LEFT_20", MouseCommand::Move(Compass::UpLeft, Magnitude::Small)),
    ("MOUSE_UP_RIGHT_20", MouseCommand::Move(Compass::UpRight, Magnitude::Small)),
    ("MOUSE_DOWN_LEFT_20", MouseCommand::Move(Compass::DownLeft, Magnitude::Small)),
    ("MOUSE_DOWN_RIGHT_20", MouseCommand::Move(Compass::DownRight, Magnitude::Small)),
    ("MOUSE_UP_80", MouseCommand::Move(Compass::Up, Magnitude::Large)),
    ("MOUSE_DOWN_80", MouseCommand::Move(Compass::Down, Magnitude::Large)),
    ("MOUSE_LEFT_80", MouseCommand::Move(Compass::Left, Magnitude::Large)),
    ("MOUSE_RIGHT_80", MouseCommand::Move(Compass::Right, Magnitude::Large)),
    ("MOUSE_UP_LEFT_80", MouseCommand::Move(Compass::UpLeft, Magnitude::Large)),
    ("MOUSE_UP_RIGHT_80", MouseCommand::Move(Compass::UpRight, Magnitude::Large)),
    ("MOUSE_DOWN_LEFT_80", MouseCommand::Move(Compass::DownLeft, Magnitude::Large)),
    ("MOUSE_DOWN_RIGHT_80", MouseCommand::Move(Compass::DownRight, Magnitude::Large)),
    ("MOUSE_LEFT_CLICK", MouseCommand::Click(MouseButton::Left)),
    ("MOUSE_RIGHT_CLICK", MouseCommand::Click(MouseButton::Right)),
];
