//! # PCL Command Table
//!
//! The finite set of commands the filter recognizes. Each decoded
//! [`Command`] either maps to a [`CommandId`] here or is unrecognized.
//!
//! Recognition does not imply an effect: many entries (copies, duplex,
//! symbol sets, raster graphics) are acknowledged by name and otherwise
//! ignored, because they have no counterpart in the PostScript output.
//!
//! ## Parameterized Escapes
//!
//! | Sequence | Command |
//! |----------|---------|
//! | `ESC & l # O` | Orientation |
//! | `ESC & l # E` | Top margin (lines) |
//! | `ESC & a # L` | Left margin (columns) |
//! | `ESC & l # C` | Vertical motion index (1/48 inch) |
//! | `ESC & l # D` | Line spacing (lines per inch) |
//! | `ESC & k # H` | Horizontal motion index (1/120 inch) |
//! | `ESC ( s # H` | Primary pitch (characters per inch) |
//! | `ESC ( s # B` | Primary stroke weight |
//! | `ESC & a # C/R/H/V` | Cursor position (columns/rows/decipoints) |
//! | `ESC * p # X/Y` | Cursor position (PCL units) |

use super::commands::{BS, CR, Command, FF, HT, LF, Parameterized, SI, SO, SP};

/// A recognized PCL command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // ========== Control Codes ==========
    Backspace,
    Tab,
    LineFeed,
    FormFeed,
    CarriageReturn,
    ShiftOut,
    ShiftIn,
    Space,

    // ========== Simple Escapes ==========
    Reset,
    ClearHorizontalMargins,
    HalfLineFeed,
    DisplayFunctionsOn,
    DisplayFunctionsOff,

    // ========== Job Control ==========
    UniversalExit,
    Copies,
    Duplex,
    LongEdgeOffset,
    ShortEdgeOffset,
    JobSeparation,
    OutputBin,
    UnitsOfMeasure,

    // ========== Page Control ==========
    PaperSource,
    PageSize,
    Orientation,
    PrintDirection,
    TopMargin,
    TextLength,
    LeftMargin,
    RightMargin,
    PerforationSkip,
    HorizontalMotionIndex,
    VerticalMotionIndex,
    LineSpacing,
    LineTermination,
    EndOfLineWrap,

    // ========== Cursor Positioning ==========
    VerticalRows,
    VerticalUnits,
    VerticalDecipoints,
    HorizontalColumns,
    HorizontalUnits,
    HorizontalDecipoints,
    PushPopPosition,

    // ========== Font Selection ==========
    PrimarySymbolSet,
    SecondarySymbolSet,
    PrimarySpacing,
    SecondarySpacing,
    PrimaryPitch,
    SecondaryPitch,
    PitchMode,
    PrimaryHeight,
    SecondaryHeight,
    PrimaryStyle,
    SecondaryStyle,
    PrimaryStrokeWeight,
    SecondaryStrokeWeight,
    PrimaryTypeface,
    SecondaryTypeface,
    PrimaryFontDefault,
    SecondaryFontDefault,
    PrimaryFontId,
    SecondaryFontId,
    FontDownload,
    SymbolSetDefinition,
    Underline,
    UnderlineOff,
    TransparentPrintData,

    // ========== Raster Graphics ==========
    StartRaster,
    EndRaster,
    RasterResolution,
    RasterCompression,
    RasterRow,
    RasterOrientation,
    ConfigureImageData,
}

/// Symbol set terminators (`ESC ( 8 U` selects Roman-8, and so on).
const SYMBOL_SET_PARAMS: &[u8] = b"DEFGIJLMNSTU";

impl CommandId {
    /// Look up a decoded command. Printable bytes are never commands.
    pub fn identify(command: &Command) -> Option<Self> {
        match command {
            Command::Control(code) => Self::control(*code),
            Command::SimpleEscape(c) => Self::simple(*c),
            Command::ParameterizedEscape(p) => Self::parameterized(p),
            Command::Printable(_) => None,
        }
    }

    fn control(code: u8) -> Option<Self> {
        Some(match code {
            BS => Self::Backspace,
            HT => Self::Tab,
            LF => Self::LineFeed,
            FF => Self::FormFeed,
            CR => Self::CarriageReturn,
            SO => Self::ShiftOut,
            SI => Self::ShiftIn,
            SP => Self::Space,
            _ => return None,
        })
    }

    fn simple(c: u8) -> Option<Self> {
        Some(match c {
            b'E' => Self::Reset,
            b'9' => Self::ClearHorizontalMargins,
            b'=' => Self::HalfLineFeed,
            b'Y' => Self::DisplayFunctionsOn,
            b'Z' => Self::DisplayFunctionsOff,
            _ => return None,
        })
    }

    fn parameterized(p: &Parameterized) -> Option<Self> {
        use CommandId::*;

        Some(match (p.class, p.group, p.param) {
            (b'%', None, b'X') => UniversalExit,

            (b'&', Some(b'l'), b'X') => Copies,
            (b'&', Some(b'l'), b'S') => Duplex,
            (b'&', Some(b'l'), b'U') => LongEdgeOffset,
            (b'&', Some(b'l'), b'Z') => ShortEdgeOffset,
            (b'&', Some(b'l'), b'T') => JobSeparation,
            (b'&', Some(b'l'), b'G') => OutputBin,
            (b'&', Some(b'u'), b'D') => UnitsOfMeasure,

            (b'&', Some(b'l'), b'H') => PaperSource,
            (b'&', Some(b'l'), b'A') => PageSize,
            (b'&', Some(b'l'), b'O') => Orientation,
            (b'&', Some(b'a'), b'P') => PrintDirection,
            (b'&', Some(b'l'), b'E') => TopMargin,
            (b'&', Some(b'l'), b'F') => TextLength,
            (b'&', Some(b'a'), b'L') => LeftMargin,
            (b'&', Some(b'a'), b'M') => RightMargin,
            (b'&', Some(b'l'), b'L') => PerforationSkip,
            (b'&', Some(b'k'), b'H') => HorizontalMotionIndex,
            (b'&', Some(b'l'), b'C') => VerticalMotionIndex,
            (b'&', Some(b'l'), b'D') => LineSpacing,
            (b'&', Some(b'k'), b'G') => LineTermination,
            (b'&', Some(b's'), b'C') => EndOfLineWrap,

            (b'&', Some(b'a'), b'R') => VerticalRows,
            (b'*', Some(b'p'), b'Y') => VerticalUnits,
            (b'&', Some(b'a'), b'V') => VerticalDecipoints,
            (b'&', Some(b'a'), b'C') => HorizontalColumns,
            (b'*', Some(b'p'), b'X') => HorizontalUnits,
            (b'&', Some(b'a'), b'H') => HorizontalDecipoints,
            (b'&', Some(b'f'), b'S') => PushPopPosition,

            (b'(', None, c) if SYMBOL_SET_PARAMS.contains(&c) => PrimarySymbolSet,
            (b')', None, c) if SYMBOL_SET_PARAMS.contains(&c) => SecondarySymbolSet,
            (b'(', None, b'@') => PrimaryFontDefault,
            (b')', None, b'@') => SecondaryFontDefault,
            (b'(', None, b'X') => PrimaryFontId,
            (b')', None, b'X') => SecondaryFontId,
            (b'(', Some(b's'), b'P') => PrimarySpacing,
            (b')', Some(b's'), b'P') => SecondarySpacing,
            (b'(', Some(b's'), b'H') => PrimaryPitch,
            (b')', Some(b's'), b'H') => SecondaryPitch,
            (b'&', Some(b'k'), b'S') => PitchMode,
            (b'(', Some(b's'), b'V') => PrimaryHeight,
            (b')', Some(b's'), b'V') => SecondaryHeight,
            (b'(', Some(b's'), b'S') => PrimaryStyle,
            (b')', Some(b's'), b'S') => SecondaryStyle,
            (b'(', Some(b's'), b'B') => PrimaryStrokeWeight,
            (b')', Some(b's'), b'B') => SecondaryStrokeWeight,
            (b'(', Some(b's'), b'T') => PrimaryTypeface,
            (b')', Some(b's'), b'T') => SecondaryTypeface,
            (b'(' | b')', Some(b's'), b'W') => FontDownload,
            (b'(', Some(b'f'), b'W') => SymbolSetDefinition,
            (b'&', Some(b'd'), b'D') => Underline,
            (b'&', Some(b'd'), b'@') => UnderlineOff,
            (b'&', Some(b'p'), b'X') => TransparentPrintData,

            (b'*', Some(b'r'), b'A') => StartRaster,
            (b'*', Some(b'r'), b'B') => EndRaster,
            (b'*', Some(b't'), b'R') => RasterResolution,
            (b'*', Some(b'b'), b'M') => RasterCompression,
            (b'*', Some(b'b'), b'W') => RasterRow,
            (b'*', Some(b'r'), b'F') => RasterOrientation,
            (b'*', Some(b'v'), b'W') => ConfigureImageData,

            _ => return None,
        })
    }

    /// Human-readable name, used in logs and event records.
    pub fn name(self) -> &'static str {
        use CommandId::*;

        match self {
            Backspace => "backspace",
            Tab => "tab",
            LineFeed => "line feed",
            FormFeed => "form feed",
            CarriageReturn => "carriage return",
            ShiftOut => "shift out",
            ShiftIn => "shift in",
            Space => "space",
            Reset => "reset printer",
            ClearHorizontalMargins => "clear horizontal margins",
            HalfLineFeed => "half line feed",
            DisplayFunctionsOn => "display functions on",
            DisplayFunctionsOff => "display functions off",
            UniversalExit => "UEL",
            Copies => "# copies",
            Duplex => "simplex/duplex",
            LongEdgeOffset => "long edge offset",
            ShortEdgeOffset => "short edge offset",
            JobSeparation => "job separation",
            OutputBin => "output bin",
            UnitsOfMeasure => "units of measure",
            PaperSource => "paper source",
            PageSize => "page size",
            Orientation => "orientation",
            PrintDirection => "print direction",
            TopMargin => "top margin",
            TextLength => "text length",
            LeftMargin => "left margin",
            RightMargin => "right margin",
            PerforationSkip => "perforation skip",
            HorizontalMotionIndex => "horizontal motion index",
            VerticalMotionIndex => "vertical motion index",
            LineSpacing => "line spacing",
            LineTermination => "line termination",
            EndOfLineWrap => "end of line wrap",
            VerticalRows => "vertical position in rows",
            VerticalUnits => "vertical position in units",
            VerticalDecipoints => "vertical position in decipoints",
            HorizontalColumns => "horizontal position in columns",
            HorizontalUnits => "horizontal position in units",
            HorizontalDecipoints => "horizontal position in decipoints",
            PushPopPosition => "push/pop position",
            PrimarySymbolSet => "primary symbol set",
            SecondarySymbolSet => "secondary symbol set",
            PrimarySpacing => "primary spacing",
            SecondarySpacing => "secondary spacing",
            PrimaryPitch => "primary pitch",
            SecondaryPitch => "secondary pitch",
            PitchMode => "set pitch mode",
            PrimaryHeight => "primary height",
            SecondaryHeight => "secondary height",
            PrimaryStyle => "primary style",
            SecondaryStyle => "secondary style",
            PrimaryStrokeWeight => "primary stroke weight",
            SecondaryStrokeWeight => "secondary stroke weight",
            PrimaryTypeface => "primary typeface family",
            SecondaryTypeface => "secondary typeface family",
            PrimaryFontDefault => "primary font default",
            SecondaryFontDefault => "secondary font default",
            PrimaryFontId => "primary font id",
            SecondaryFontId => "secondary font id",
            FontDownload => "font download",
            SymbolSetDefinition => "symbol set definition",
            Underline => "underline",
            UnderlineOff => "disable underline",
            TransparentPrintData => "transparent print data",
            StartRaster => "start raster graphics",
            EndRaster => "end raster graphics",
            RasterResolution => "set resolution",
            RasterCompression => "set compression method",
            RasterRow => "raster row",
            RasterOrientation => "raster graphics orientation",
            ConfigureImageData => "configure image data",
        }
    }
}
