//! # Job Configuration
//!
//! Defaults a conversion job starts from, and the page sizes and paper
//! sources PCL can select.
//!
//! All lengths are in 1/7200 inch, the unit used throughout the crate.
//!
//! ## Presets
//!
//! | Preset | Page | Top margin | Left margin | Spacing | Pitch |
//! |--------|------|------------|-------------|---------|-------|
//! | `LETTER` | 8.5 × 11 in | 4175 | 2375 | 6 LPI | 10 CPI |
//! | `A4` | 210 × 297 mm | 4175 | 2375 | 6 LPI | 10 CPI |
//!
//! ## Usage
//!
//! ```
//! use pclps::printer::JobConfig;
//!
//! let config = JobConfig::by_name("a4").unwrap();
//! assert_eq!(config.page.size.name, "A4");
//! assert_eq!(config.line_spacing, 1200);
//! ```

use serde::Serialize;

/// Units per inch.
pub const UNITS_PER_INCH: i64 = 7200;

// ============================================================================
// PAGE SIZES
// ============================================================================

/// A physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSize {
    /// Name used in DSC comments and feature selections
    pub name: &'static str,
    /// Portrait width
    pub width: i64,
    /// Portrait height
    pub height: i64,
}

impl PageSize {
    pub const EXECUTIVE: Self = Self::new("Executive", 52200, 75600);
    pub const LETTER: Self = Self::new("Letter", 61200, 79200);
    pub const LEGAL: Self = Self::new("Legal", 61200, 100800);
    pub const LEDGER: Self = Self::new("Ledger", 79200, 122400);
    pub const A5: Self = Self::new("A5", 41953, 59528);
    pub const A4: Self = Self::new("A4", 59528, 84189);
    pub const A3: Self = Self::new("A3", 84189, 119055);
    pub const MONARCH: Self = Self::new("Monarch", 27900, 54000);
    pub const COM10: Self = Self::new("Comm10", 29700, 68400);
    pub const DL: Self = Self::new("DL", 31181, 62362);
    pub const C5: Self = Self::new("C5", 45921, 64913);
    pub const B5: Self = Self::new("B5", 49890, 70866);

    const fn new(name: &'static str, width: i64, height: i64) -> Self {
        Self {
            name,
            width,
            height,
        }
    }

    /// Look up a page size by its PCL `ESC & l # A` code.
    pub fn from_pcl_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Self::EXECUTIVE,
            2 => Self::LETTER,
            3 => Self::LEGAL,
            6 => Self::LEDGER,
            25 => Self::A5,
            26 => Self::A4,
            27 => Self::A3,
            80 => Self::MONARCH,
            81 => Self::COM10,
            90 => Self::DL,
            91 => Self::C5,
            100 => Self::B5,
            _ => return None,
        })
    }
}

// ============================================================================
// ORIENTATION
// ============================================================================

/// PCL logical page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait = 0,
    Landscape = 1,
    ReversePortrait = 2,
    ReverseLandscape = 3,
}

impl Orientation {
    /// Convert an `ESC & l # O` value in thousandths.
    ///
    /// Only whole values 0 through 3 are valid.
    pub fn from_value(value: i64) -> Option<Self> {
        if value % 1000 != 0 {
            return None;
        }
        Some(match value / 1000 {
            0 => Self::Portrait,
            1 => Self::Landscape,
            2 => Self::ReversePortrait,
            3 => Self::ReverseLandscape,
            _ => return None,
        })
    }

    /// Index passed to the `bp` page procedure.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Value for the DSC `%%Orientation` / `%%PageOrientation` comments.
    pub fn dsc_name(self) -> &'static str {
        match self {
            Self::Portrait | Self::ReversePortrait => "Portrait",
            Self::Landscape | Self::ReverseLandscape => "Landscape",
        }
    }
}

// ============================================================================
// PAPER SOURCE
// ============================================================================

/// Paper tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSlot {
    #[default]
    Upper,
    Lower,
    Optional,
    Envelope,
}

impl InputSlot {
    pub fn name(self) -> &'static str {
        match self {
            Self::Upper => "Upper",
            Self::Lower => "Lower",
            Self::Optional => "Optional",
            Self::Envelope => "Envelope",
        }
    }

    /// `MediaPosition` page device value.
    pub fn media_position(self) -> u8 {
        match self {
            Self::Upper => 0,
            Self::Lower => 1,
            Self::Optional => 2,
            Self::Envelope => 3,
        }
    }
}

/// Page attributes that may vary from page to page.
///
/// Compared by value: a page re-declares a feature only when it differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSetup {
    pub size: PageSize,
    pub orientation: Orientation,
    pub input_slot: InputSlot,
    pub manual_feed: bool,
}

impl PageSetup {
    pub const fn new(size: PageSize) -> Self {
        Self {
            size,
            orientation: Orientation::Portrait,
            input_slot: InputSlot::Upper,
            manual_feed: false,
        }
    }
}

// ============================================================================
// JOB CONFIGURATION
// ============================================================================

/// # Job Configuration
///
/// Defaults that Printer State is created from, and restored to on a PCL
/// reset (`ESC E`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    /// Preset name
    pub name: &'static str,

    /// Default page setup, declared once in the document header
    pub page: PageSetup,

    /// Top margin (4 lines at 8 LPI, less a little)
    pub top_margin: i64,

    /// Left margin
    pub left_margin: i64,

    /// Line spacing (1200 = 6 LPI)
    pub line_spacing: i64,

    /// Horizontal motion index (720 = 10 CPI)
    pub hmi: i64,

    /// Font size in hundredths of a point (1200 = 12 pt)
    pub font_size: i64,

    /// Line feed also returns the carriage
    pub lf_implies_cr: bool,
}

impl JobConfig {
    /// # US Letter
    ///
    /// 8.5 × 11 inch portrait, 12 pt Courier at 10 CPI, 6 LPI.
    pub const LETTER: Self = Self {
        name: "letter",
        page: PageSetup::new(PageSize::LETTER),
        top_margin: 4175,
        left_margin: 2375,
        line_spacing: 1200,
        hmi: 720,
        font_size: 1200,
        lf_implies_cr: true,
    };

    /// # ISO A4
    ///
    /// Same text defaults as [`JobConfig::LETTER`] on A4 paper.
    pub const A4: Self = Self {
        name: "a4",
        page: PageSetup::new(PageSize::A4),
        ..Self::LETTER
    };

    /// Look up a preset by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "letter" => Some(Self::LETTER),
            "a4" => Some(Self::A4),
            _ => None,
        }
    }

    /// Names accepted by [`JobConfig::by_name`].
    pub fn list_presets() -> &'static [&'static str] {
        &["letter", "a4"]
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self::LETTER
    }
}
