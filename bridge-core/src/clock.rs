//! Monotonic time source for the continuous mouse tick.

/// Monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (usually boot).
    fn now_ms(&self) -> u64;
}
