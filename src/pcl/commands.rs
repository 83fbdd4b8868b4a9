//! # PCL Command Values
//!
//! Byte constants for the PCL control language and the [`Command`] value the
//! decoder produces for every unit of input.
//!
//! ## Escape Sequence Structure
//!
//! PCL input is a mix of three things:
//!
//! | Kind | Bytes | Example |
//! |------|-------|---------|
//! | Control code | one byte `0..=32` | `LF`, `FF`, `CR`, `SP` |
//! | Simple escape | `ESC` + one byte outside `!..=/` | `ESC E` (reset) |
//! | Parameterized escape | `ESC` class [group] value param | `ESC & l 1 O` |
//!
//! Parameterized escapes sharing a class and group may be combined by
//! writing the parameter byte in lowercase:
//!
//! ```text
//! ESC & l 1 o 2 A     ==   ESC & l 1 O   +   ESC & l 2 A
//! ```
//!
//! ## Values
//!
//! Numeric values are signed fixed-point with three decimal places, carried
//! as an integer count of thousandths: `-1.5` is `-1500`, `2` is `2000`.

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

// ============================================================================
// CONTROL CODES
// ============================================================================

/// BS (Backspace) - Move left one character
pub const BS: u8 = 0x08;

/// HT (Horizontal Tab) - Advance to the next tab stop
pub const HT: u8 = 0x09;

/// LF (Line Feed) - Advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Eject the page
pub const FF: u8 = 0x0C;

/// CR (Carriage Return) - Return to the left margin
pub const CR: u8 = 0x0D;

/// SO (Shift Out) - Select the secondary font
pub const SO: u8 = 0x0E;

/// SI (Shift In) - Select the primary font
pub const SI: u8 = 0x0F;

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// SP (Space) - Advance by one HMI
pub const SP: u8 = 0x20;

// ============================================================================
// ESCAPE GRAMMAR RANGES
// ============================================================================

/// Bytes after `ESC` that open a parameterized escape (`!` through `/`).
pub const PARAMETERIZED_CLASS: RangeInclusive<u8> = 0x21..=0x2F;

/// Group characters (`` ` `` through `~`). Some sequences have none.
pub const GROUP_CHAR: RangeInclusive<u8> = 0x60..=0x7E;

/// Uppercase parameter characters: end the command and the whole escape.
pub const FINAL_PARAM: RangeInclusive<u8> = 0x40..=0x5E;

/// Lowercase parameter characters: end the command, the escape continues.
pub const COMBINED_PARAM: RangeInclusive<u8> = 0x60..=0x7E;

/// Distance between a lowercase parameter and its uppercase form.
pub const CASE_OFFSET: u8 = 0x20;

// ============================================================================
// COMMAND VALUES
// ============================================================================

/// A decoded parameterized escape.
///
/// `param` is always the uppercase form, whether or not the input used the
/// lowercase (combined) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameterized {
    /// Parameterized character (`!..=/`), e.g. `&`
    pub class: u8,
    /// Group character (`` `..=~ ``), e.g. `l`; absent for some sequences
    pub group: Option<u8>,
    /// Value in thousandths
    pub value: i64,
    /// Uppercase parameter character, e.g. `O`
    pub param: u8,
    /// The value carried an explicit `+` or `-` sign
    pub relative: bool,
    /// Binary payload for data-bearing commands (raster rows, downloads)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

impl Parameterized {
    /// Build a command with no payload.
    pub fn new(class: u8, group: Option<u8>, value: i64, param: u8) -> Self {
        Self {
            class,
            group,
            value,
            param,
            relative: false,
            data: Vec::new(),
        }
    }

    /// Whole part of the value, truncated toward zero.
    #[inline]
    pub fn whole(&self) -> i64 {
        self.value / 1000
    }

    /// Whether the value has no fractional part.
    #[inline]
    pub fn is_whole(&self) -> bool {
        self.value % 1000 == 0
    }
}

impl fmt::Display for Parameterized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ESC {}", self.class as char)?;
        if let Some(group) = self.group {
            write!(f, " {}", group as char)?;
        }
        let sign = if self.value < 0 { "-" } else { "" };
        let magnitude = self.value.unsigned_abs();
        write!(
            f,
            " {}{}.{:03} {}",
            sign,
            magnitude / 1000,
            magnitude % 1000,
            self.param as char
        )
    }
}

/// One unit of decoded PCL input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Command {
    /// Control code (`0..=32`, excluding `ESC`)
    Control(u8),
    /// `ESC` followed by a byte outside the parameterized class range
    SimpleEscape(u8),
    /// `ESC` class [group] value param
    ParameterizedEscape(Parameterized),
    /// Printable byte, passed through unparsed
    Printable(u8),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Control(code) => write!(f, "control {}", code),
            Command::SimpleEscape(c) => write!(f, "ESC {}", *c as char),
            Command::ParameterizedEscape(p) => p.fmt(f),
            Command::Printable(c) => write!(f, "printable {:?}", *c as char),
        }
    }
}
