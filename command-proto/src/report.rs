//! HID report state for a boot keyboard and a relative mouse.
//!
//! [`ReportState`] tracks which keys, modifiers and buttons are held and
//! renders the report the host should see after each primitive action.
//!
//! # Report layouts
//!
//! Keyboard (8 bytes): `modifier, reserved, key0..key5`
//!
//! Mouse (5 bytes): `buttons, x, y, wheel, pan`

use crate::keys::{Key, Modifier, Usage};
use crate::types::MouseButton;

/// Number of simultaneously held non-modifier keys (boot protocol).
pub const ROLLOVER: usize = 6;

/// Boot protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keycodes: [u8; ROLLOVER],
}

impl KeyboardReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let k = self.keycodes;
        [self.modifier, 0, k[0], k[1], k[2], k[3], k[4], k[5]]
    }

    /// True if no key or modifier is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Relative mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl MouseReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 5;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.buttons,
            self.x as u8,
            self.y as u8,
            self.wheel as u8,
            self.pan as u8,
        ]
    }
}

/// Reasons a key action cannot be turned into a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// All rollover slots are taken.
    RolloverFull,
    /// The key has no usage on the US layout.
    Unmapped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HeldKey {
    code: u8,
    shift: bool,
}

/// Held keys, modifiers and buttons.
#[derive(Clone, Debug, Default)]
pub struct ReportState {
    modifiers: u8,
    held: [Option<HeldKey>; ROLLOVER],
    buttons: u8,
}

impl ReportState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modifiers: 0,
            held: [None; ROLLOVER],
            buttons: 0,
        }
    }

    /// Mark `key` as held and return the resulting keyboard report.
    ///
    /// Pressing a key that is already held is a no-op.
    pub fn press(&mut self, key: Key) -> Result<KeyboardReport, ReportError> {
        match key.usage().ok_or(ReportError::Unmapped)? {
            Usage::Modifier(mask) => self.modifiers |= mask,
            Usage::Code { code, shift } => {
                if !self.held.iter().flatten().any(|k| k.code == code) {
                    let slot = self
                        .held
                        .iter_mut()
                        .find(|slot| slot.is_none())
                        .ok_or(ReportError::RolloverFull)?;
                    *slot = Some(HeldKey { code, shift });
                }
            }
        }
        Ok(self.keyboard_report())
    }

    /// Mark `key` as released and return the resulting keyboard report.
    pub fn release(&mut self, key: Key) -> Result<KeyboardReport, ReportError> {
        match key.usage().ok_or(ReportError::Unmapped)? {
            Usage::Modifier(mask) => self.modifiers &= !mask,
            Usage::Code { code, .. } => {
                for slot in self.held.iter_mut() {
                    if matches!(slot, Some(k) if k.code == code) {
                        *slot = None;
                    }
                }
            }
        }
        Ok(self.keyboard_report())
    }

    /// Current keyboard report.
    ///
    /// Shift is reported while any held character needs it, on top of the
    /// explicitly held modifiers.
    #[must_use]
    pub fn keyboard_report(&self) -> KeyboardReport {
        let mut report = KeyboardReport {
            modifier: self.modifiers,
            keycodes: [0; ROLLOVER],
        };
        for (out, held) in report.keycodes.iter_mut().zip(self.held.iter().flatten()) {
            *out = held.code;
            if held.shift {
                report.modifier |= Modifier::LeftShift.mask();
            }
        }
        report
    }

    /// Reports for a click: button down, then button up.
    #[must_use]
    pub fn click(&mut self, button: MouseButton) -> [MouseReport; 2] {
        let down = MouseReport {
            buttons: self.buttons | button.mask(),
            ..MouseReport::default()
        };
        self.buttons &= !button.mask();
        let up = MouseReport {
            buttons: self.buttons,
            ..MouseReport::default()
        };
        [down, up]
    }

    /// Reports moving the pointer by `(dx, dy)`, split into `i8` sized steps.
    #[must_use]
    pub fn movement(&self, dx: i16, dy: i16) -> Movement {
        Movement {
            buttons: self.buttons,
            dx: i32::from(dx),
            dy: i32::from(dy),
        }
    }

    /// Drop every held key, modifier and button.
    pub fn clear(&mut self) -> (KeyboardReport, MouseReport) {
        *self = Self::new();
        (KeyboardReport::default(), MouseReport::default())
    }
}

/// Iterator over the mouse reports of one pointer movement.
#[derive(Clone, Debug)]
pub struct Movement {
    buttons: u8,
    dx: i32,
    dy: i32,
}

impl Iterator for Movement {
    type Item = MouseReport;

    fn next(&mut self) -> Option<MouseReport> {
        if self.dx == 0 && self.dy == 0 {
            return None;
        }
        let x = self.dx.clamp(-127, 127);
        let y = self.dy.clamp(-127, 127);
        self.dx -= x;
        self.dy -= y;
        Some(MouseReport {
            buttons: self.buttons,
            x: x as i8,
            y: y as i8,
            ..MouseReport::default()
        })
    }
}
