//! # Font Descriptor
//!
//! Maps `{family, bold, italic, size}` to a PostScript font name.
//!
//! The name is computed on first use and remembered until the family,
//! weight or slant changes. Size is not part of the name; it goes out as a
//! separate number in the font directive.
//!
//! Every font is treated as monospaced with an advance of 0.6 em, which is
//! exact for Courier and close enough for placing the others.

use serde::Serialize;
use std::cell::Cell;

/// Typeface family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    #[default]
    Courier,
    Times,
    Helvetica,
}

impl Family {
    /// Map a PCL `ESC ( s # T` typeface number.
    pub fn from_typeface(typeface: i64) -> Option<Self> {
        Some(match typeface {
            0 | 3 | 4099 => Self::Courier,
            5 | 4101 | 16901 => Self::Times,
            4 | 4148 | 16602 => Self::Helvetica,
            _ => return None,
        })
    }

    fn postscript_name(self, bold: bool, italic: bool) -> &'static str {
        match (self, bold, italic) {
            (Self::Courier, false, false) => "Courier",
            (Self::Courier, true, false) => "Courier-Bold",
            (Self::Courier, false, true) => "Courier-Oblique",
            (Self::Courier, true, true) => "Courier-BoldOblique",
            (Self::Times, false, false) => "Times-Roman",
            (Self::Times, true, false) => "Times-Bold",
            (Self::Times, false, true) => "Times-Italic",
            (Self::Times, true, true) => "Times-BoldItalic",
            (Self::Helvetica, false, false) => "Helvetica",
            (Self::Helvetica, true, false) => "Helvetica-Bold",
            (Self::Helvetica, false, true) => "Helvetica-Oblique",
            (Self::Helvetica, true, true) => "Helvetica-BoldOblique",
        }
    }
}

/// Font selection state.
#[derive(Debug, Clone)]
pub struct FontDescriptor {
    family: Family,
    bold: bool,
    italic: bool,
    /// Hundredths of a point, which is also 1/7200 inch per em
    size: i64,
    name: Cell<Option<&'static str>>,
}

impl FontDescriptor {
    /// Upright, medium-weight Courier at `size`.
    pub fn new(size: i64) -> Self {
        Self {
            family: Family::Courier,
            bold: false,
            italic: false,
            size,
            name: Cell::new(None),
        }
    }

    pub fn set_family(&mut self, family: Family) {
        self.family = family;
        self.name.set(None);
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
        self.name.set(None);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
        self.name.set(None);
    }

    pub fn set_size(&mut self, size: i64) {
        self.size = size;
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// PostScript font name, e.g. `Courier-BoldOblique`.
    pub fn canonical_name(&self) -> &'static str {
        match self.name.get() {
            Some(name) => name,
            None => {
                let name = self.family.postscript_name(self.bold, self.italic);
                self.name.set(Some(name));
                name
            }
        }
    }

    /// Advance of the space character.
    #[inline]
    pub fn space_width(&self) -> i64 {
        self.size.saturating_mul(6) / 10
    }

    /// Advance of any character.
    #[inline]
    pub fn char_width(&self, _c: u8) -> i64 {
        self.space_width()
    }

    #[cfg(test)]
    fn is_memoized(&self) -> bool {
        self.name.get().is_some()
    }
}

impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.bold == other.bold
            && self.italic == other.italic
            && self.size == other.size
    }
}

impl Eq for FontDescriptor {}
