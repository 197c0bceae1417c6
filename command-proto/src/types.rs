//! Core bridge types: Mode, Direction, Compass, MouseButton.

/// Interpretation context of the dispatcher.
///
/// The bridge boots in [`Mode::Mouse`] and only a mode marker changes it.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Mouse,
    Keyboard,
}

impl Mode {
    /// The other mode.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Mode::Mouse => Mode::Keyboard,
            Mode::Keyboard => Mode::Mouse,
        }
    }
}

/// One of the four orthogonal pointer directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Pointer delta for a step of `step` units (screen coordinates, +y is down).
    #[inline]
    #[must_use]
    pub const fn delta(self, step: i16) -> (i16, i16) {
        match self {
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
        }
    }
}

/// One of the eight compass directions used by the dual-magnitude vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Compass {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Compass {
    /// Pointer delta for a step of `step` units on each moving axis.
    #[must_use]
    pub const fn delta(self, step: i16) -> (i16, i16) {
        match self {
            Compass::Up => (0, -step),
            Compass::Down => (0, step),
            Compass::Left => (-step, 0),
            Compass::Right => (step, 0),
            Compass::UpLeft => (-step, -step),
            Compass::UpRight => (step, -step),
            Compass::DownLeft => (-step, step),
            Compass::DownRight => (step, step),
        }
    }
}

impl From<Direction> for Compass {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Compass::Up,
            Direction::Down => Compass::Down,
            Direction::Left => Compass::Left,
            Direction::Right => Compass::Right,
        }
    }
}

/// Mouse buttons the bridge can click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    /// Bit in the HID mouse report button field.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Right => 1 << 1,
        }
    }
}

/// Step size tier of the dual-magnitude vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Magnitude {
    Small,
    Large,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_to_mouse() {
        assert_eq!(Mode::default(), Mode::Mouse);
    }

    #[test]
    fn test_mode_flipped() {
        assert_eq!(Mode::Mouse.flipped(), Mode::Keyboard);
        assert_eq!(Mode::Keyboard.flipped(), Mode::Mouse);
    }

    #[test]
    fn test_direction_delta_screen_axes() {
        assert_eq!(Direction::Up.delta(20), (0, -20));
        assert_eq!(Direction::Down.delta(20), (0, 20));
        assert_eq!(Direction::Left.delta(20), (-20, 0));
        assert_eq!(Direction::Right.delta(20), (20, 0));
    }

    #[test]
    fn test_compass_diagonals_move_both_axes() {
        assert_eq!(Compass::UpLeft.delta(80), (-80, -80));
        assert_eq!(Compass::DownRight.delta(20), (20, 20));
        assert_eq!(Compass::from(Direction::Left).delta(40), (-40, 0));
    }

    #[test]
    fn test_mouse_button_masks() {
        assert_eq!(MouseButton::Left.mask(), 0x01);
        assert_eq!(MouseButton::Right.mask(), 0x02);
    }
}
