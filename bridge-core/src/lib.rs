//! Platform-agnostic command dispatch engine for the BLE-to-USB HID bridge.
//!
//! This crate turns text command lines into keyboard and mouse actions
//! without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`input`]: Command source trait ([`CommandSource`]) and line splitting ([`LineAssembler`])
//! - [`output`]: Action sink trait ([`ActionSink`])
//! - [`clock`]: Monotonic time ([`Clock`])
//! - [`config`]: Deployment policy ([`BridgeConfig`], [`ModeSwitch`], [`MouseScheme`])
//! - [`keyboard`]: Keyboard-mode translation ([`KeyboardTranslator`])
//! - [`mouse`]: Mouse-mode translation and continuous movement ([`MouseTranslator`])
//! - [`dispatcher`]: Mode state and routing ([`Dispatcher`])
//! - [`bridge`]: The cooperative loop ([`CommandBridge`])
//! - [`bringup`]: Wireless module initialization ([`bring_up`])
//!
//! # Control flow
//!
//! ```text
//! CommandSource -> Dispatcher -> KeyboardTranslator | MouseTranslator -> ActionSink
//!                       ^
//!                       +-- tick (continuous mouse scheme, every iteration)
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded logging)
//! - **`log`**: Log through the `log` facade instead
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod bridge;
pub mod bringup;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod output;

#[cfg(test)]
mod mock;

// Re-export main types at crate root
pub use bridge::{BridgeError, CommandBridge, Step};
pub use bringup::{bring_up, BringUpReport, BringUpStep, LinkError, ModuleLink};
pub use clock::Clock;
pub use config::{BridgeConfig, BurstConfig, ModeSwitch, MouseScheme};
pub use dispatcher::{Activity, Dispatcher};
pub use input::{CommandSource, Line, LineAssembler, SourceError, MAX_LINE_LENGTH};
pub use keyboard::{KeyboardOutcome, KeyboardTranslator};
pub use mouse::MouseTranslator;
pub use output::{ActionSink, SinkError};
