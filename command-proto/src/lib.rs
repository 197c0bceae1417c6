//! Wire vocabulary, key usages and HID report state for the BLE command bridge.
//!
//! This crate holds everything about the bridge that is pure data:
//!
//! - **Types**: [`Mode`], [`Direction`], [`Compass`], [`MouseButton`], [`Magnitude`]
//!
//! - **Keys**: [`Key`] and [`Modifier`], resolved to HID keyboard usages
//!   ([`Usage`]) for a US layout
//!
//! - **Vocabulary**: the command identifiers understood on the wireless link
//!   and the substring matcher [`longest_match`]
//!   - [`KEYBOARD_COMMANDS`] - keyboard and BIOS navigation commands
//!   - [`STEP_MOUSE_COMMANDS`] - orthogonal steps and clicks
//!   - [`DUAL_MOUSE_COMMANDS`] - eight directions at two magnitudes
//!
//! - **Reports**: [`ReportState`] turns primitive press/release/move/click
//!   actions into boot keyboard and relative mouse reports
//!
//! # Protocol
//!
//! One command per line, newline terminated, surrounding whitespace ignored.
//! Identifiers are case-sensitive and matched by containment:
//!
//! ```text
//! MODE_KEYBOARD\n
//! KEYBOARD_SELECT_ALL\n
//! hello world\n          (no identifier: typed literally in keyboard mode)
//! MODE_MOUSE\n
//! MOUSE_UP_LEFT_80\n
//! ```
//!
//! # Example
//!
//! ```
//! use command_proto::{longest_match, MouseButton, MouseCommand, STEP_MOUSE_COMMANDS};
//!
//! // The longer identifier wins over the contained MOUSE_LEFT
//! assert_eq!(
//!     longest_match("MOUSE_LEFT_CLICK", STEP_MOUSE_COMMANDS),
//!     Some(MouseCommand::Click(MouseButton::Left))
//! );
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod keys;
pub mod report;
pub mod types;
pub mod vocabulary;

pub use keys::{Key, Modifier, Usage};
pub use report::{KeyboardReport, Movement, MouseReport, ReportError, ReportState, ROLLOVER};
pub use types::{Compass, Direction, Magnitude, Mode, MouseButton};
pub use vocabulary::{
    longest_match, KeyboardCommand, MouseCommand, Table, DUAL_MOUSE_COMMANDS, KEYBOARD_COMMANDS,
    MODE_KEYBOARD, MODE_MOUSE, MODE_TOGGLE, STEP_MOUSE_COMMANDS,
};
