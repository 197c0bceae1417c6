//! Deployment policy of the bridge.
//!
//! Each deployment picks one mode marker scheme and one mouse scheme. The
//! schemes are alternatives, never combined.

use command_proto::{MODE_KEYBOARD, MODE_MOUSE, MODE_TOGGLE};

/// How mode markers are recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeSwitch {
    /// One marker per target mode.
    Explicit {
        mouse: &'static str,
        keyboard: &'static str,
    },
    /// A single marker that flips the mode.
    Toggle(&'static str),
}

impl ModeSwitch {
    /// `MODE_MOUSE` / `MODE_KEYBOARD`.
    pub const EXPLICIT: Self = ModeSwitch::Explicit {
        mouse: MODE_MOUSE,
        keyboard: MODE_KEYBOARD,
    };

    /// `MODE_TOGGLE`.
    pub const TOGGLE: Self = ModeSwitch::Toggle(MODE_TOGGLE);
}

/// Mouse behavior of a deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseScheme {
    /// Each direction command moves the pointer once by `step`.
    FixedStep { step: i16 },
    /// Eight directions at a small and a large step.
    DualMagnitude { small: i16, large: i16 },
    /// Direction commands toggle a latched direction; the pointer moves by
    /// `step` every `interval_ms` while a direction is latched.
    Continuous { step: i16, interval_ms: u64 },
}

impl MouseScheme {
    pub const FIXED_STEP: Self = MouseScheme::FixedStep { step: 20 };
    pub const DUAL_MAGNITUDE: Self = MouseScheme::DualMagnitude {
        small: 20,
        large: 80,
    };
    pub const CONTINUOUS: Self = MouseScheme::Continuous {
        step: 20,
        interval_ms: 500,
    };
}

/// Repeated delete taps sent by the burst command.
///
/// The burst blocks the bridge for `count * interval_ms` (100 s with the
/// defaults). No input is read and no mouse tick runs meanwhile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstConfig {
    pub count: u16,
    pub interval_ms: u32,
}

impl BurstConfig {
    pub const DEFAULT: Self = Self {
        count: 1000,
        interval_ms: 100,
    };
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete bridge configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    pub mode_switch: ModeSwitch,
    pub mouse: MouseScheme,
    pub burst: BurstConfig,
    /// Pause between loop iterations when no line is pending.
    pub idle_poll_ms: u32,
}

impl BridgeConfig {
    /// Explicit mode markers, dual-magnitude mouse, default burst.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode_switch: ModeSwitch::EXPLICIT,
            mouse: MouseScheme::DUAL_MAGNITUDE,
            burst: BurstConfig::DEFAULT,
            idle_poll_ms: 1,
        }
    }

    #[must_use]
    pub const fn with_mode_switch(mut self, mode_switch: ModeSwitch) -> Self {
        self.mode_switch = mode_switch;
        self
    }

    #[must_use]
    pub const fn with_mouse(mut self, mouse: MouseScheme) -> Self {
        self.mouse = mouse;
        self
    }

    #[must_use]
    pub const fn with_burst(mut self, burst: BurstConfig) -> Self {
        self.burst = burst;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
