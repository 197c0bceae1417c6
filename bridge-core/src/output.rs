//! Action sink trait and error types.

use command_proto::{Key, MouseButton, ReportError};
use core::future::Future;

/// Error type for HID output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Too many keys held at once.
    RolloverFull,
    /// Key has no HID usage.
    Unmapped,
}

impl From<ReportError> for SinkError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::RolloverFull => SinkError::RolloverFull,
            ReportError::Unmapped => SinkError::Unmapped,
        }
    }
}

/// Async trait for the primitive HID actions.
///
/// Each call corresponds to one host-observable event (or, for
/// [`click`](ActionSink::click) and large moves, a short fixed sequence of
/// reports). Calls complete in order.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ActionSink {
    /// Press and hold a key.
    fn press(&mut self, key: Key) -> impl Future<Output = Result<(), SinkError>>;

    /// Release a held key.
    fn release(&mut self, key: Key) -> impl Future<Output = Result<(), SinkError>>;

    /// Move the pointer by a relative delta.
    fn move_pointer(&mut self, dx: i16, dy: i16) -> impl Future<Output = Result<(), SinkError>>;

    /// Press and release a mouse button.
    fn click(&mut self, button: MouseButton) -> impl Future<Output = Result<(), SinkError>>;

    /// Release every held key and button.
    fn release_all(&mut self) -> impl Future<Output = Result<(), SinkError>>;

    /// Check if the output is ready to accept actions.
    fn is_ready(&self) -> bool;
}
