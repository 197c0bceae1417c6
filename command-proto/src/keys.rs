//! Keys the bridge can press and their HID keyboard usages (US layout).

/// Modifier keys, carried in the modifier byte of the keyboard report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftGui,
}

impl Modifier {
    /// Bit in the report modifier byte.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Modifier::LeftCtrl => 1 << 0,
            Modifier::LeftShift => 1 << 1,
            Modifier::LeftAlt => 1 << 2,
            Modifier::LeftGui => 1 << 3,
        }
    }
}

/// A key as seen by the action sink.
///
/// Printable characters are carried as [`Key::Char`]; the sink resolves the
/// shift state needed to produce them, the same way a host-side keyboard
/// library types text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    /// Function key F1..=F12.
    Function(u8),
    Modifier(Modifier),
}

/// Resolved HID usage of a [`Key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Usage {
    /// Keyboard page usage, with the implicit shift needed to produce it.
    Code { code: u8, shift: bool },
    /// Modifier bit mask.
    Modifier(u8),
}

impl Usage {
    const fn plain(code: u8) -> Self {
        Usage::Code { code, shift: false }
    }

    const fn shifted(code: u8) -> Self {
        Usage::Code { code, shift: true }
    }
}

const KEY_A: u8 = 0x04;
const KEY_1: u8 = 0x1E;
const KEY_0: u8 = 0x27;
const KEY_ENTER: u8 = 0x28;
const KEY_ESCAPE: u8 = 0x29;
const KEY_TAB: u8 = 0x2B;
const KEY_SPACE: u8 = 0x2C;
const KEY_F1: u8 = 0x3A;
const KEY_DELETE: u8 = 0x4C;
const KEY_RIGHT: u8 = 0x4F;
const KEY_LEFT: u8 = 0x50;
const KEY_DOWN: u8 = 0x51;
const KEY_UP: u8 = 0x52;

impl Key {
    /// Resolve the HID usage, or `None` if the key cannot be typed on a US
    /// layout keyboard.
    #[must_use]
    pub fn usage(self) -> Option<Usage> {
        Some(match self {
            Key::Char(c) => return char_usage(c),
            Key::Enter => Usage::plain(KEY_ENTER),
            Key::Escape => Usage::plain(KEY_ESCAPE),
            Key::Delete => Usage::plain(KEY_DELETE),
            Key::Tab => Usage::plain(KEY_TAB),
            Key::Up => Usage::plain(KEY_UP),
            Key::Down => Usage::plain(KEY_DOWN),
            Key::Left => Usage::plain(KEY_LEFT),
            Key::Right => Usage::plain(KEY_RIGHT),
            Key::Function(n @ 1..=12) => Usage::plain(KEY_F1 + n - 1),
            Key::Function(_) => return None,
            Key::Modifier(m) => Usage::Modifier(m.mask()),
        })
    }
}

fn char_usage(c: char) -> Option<Usage> {
    let usage = match c {
        'a'..='z' => Usage::plain(KEY_A + (c as u8 - b'a')),
        'A'..='Z' => Usage::shifted(KEY_A + (c as u8 - b'A')),
        '1'..='9' => Usage::plain(KEY_1 + (c as u8 - b'1')),
        '0' => Usage::plain(KEY_0),
        '\n' => Usage::plain(KEY_ENTER),
        '\t' => Usage::plain(KEY_TAB),
        ' ' => Usage::plain(KEY_SPACE),
        '-' => Usage::plain(0x2D),
        '=' => Usage::plain(0x2E),
        '[' => Usage::plain(0x2F),
        ']' => Usage::plain(0x30),
        '\\' => Usage::plain(0x31),
        ';' => Usage::plain(0x33),
        '\'' => Usage::plain(0x34),
        '`' => Usage::plain(0x35),
        ',' => Usage::plain(0x36),
        '.' => Usage::plain(0x37),
        '/' => Usage::plain(0x38),
        '!' => Usage::shifted(KEY_1),
        '@' => Usage::shifted(KEY_1 + 1),
        '#' => Usage::shifted(KEY_1 + 2),
        '$' => Usage::shifted(KEY_1 + 3),
        '%' => Usage::shifted(KEY_1 + 4),
        '^' => Usage::shifted(KEY_1 + 5),
        '&' => Usage::shifted(KEY_1 + 6),
        '*' => Usage::shifted(KEY_1 + 7),
        '(' => Usage::shifted(KEY_1 + 8),
        ')' => Usage::shifted(KEY_0),
        '_' => Usage::shifted(0x2D),
        '+' => Usage::shifted(0x2E),
        '{' => Usage::shifted(0x2F),
        '}' => Usage::shifted(0x30),
        '|' => Usage::shifted(0x31),
        ':' => Usage::shifted(0x33),
        '"' => Usage::shifted(0x34),
        '~' => Usage::shifted(0x35),
        '<' => Usage::shifted(0x36),
        '>' => Usage::shifted(0x37),
        '?' => Usage::shifted(0x38),
        _ => return None,
    };
    Some(usage)
}
