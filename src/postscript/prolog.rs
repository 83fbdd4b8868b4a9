//! # Document Structure Text
//!
//! Builders for the fixed parts of the PostScript output: the header
//! comments, the helper-procedure prolog, the document setup, per-page
//! setup and the trailer.
//!
//! ## Helper Procedures
//!
//! | Procedure | Stack | Effect |
//! |-----------|-------|--------|
//! | `XY` | x y | Absolute move, y measured downwards |
//! | `x` | dx | Relative horizontal move |
//! | `y` | dy | Relative vertical move, downwards |
//! | `s` | string | Show a text run |
//! | `F` | /name size | Select and scale a font |
//! | `bp` | orientation pw ph | Begin page: save, rotate, scale to 1/7200 in |
//! | `ep` | | End page: restore and show |

use crate::printer::config::{InputSlot, PageSetup, PageSize};

/// Helper procedures shared by every page.
pub const PROLOG: &str = "%%BeginProlog
/XY { neg moveto } def
/x { 0 rmoveto } def
/y { neg 0 exch rmoveto } def
/s { show } def
/F { exch findfont exch scalefont setfont } def
/bp { /ph exch def /pw exch def save exch [
 { 0 ph translate } % portrait
 { 90 rotate } % landscape
 { pw 0 translate 180 rotate } % reverse portrait
 { pw ph translate -90 rotate } % reverse landscape
 ] exch get exec
 0.01 0.01 scale
 } def
/ep { restore showpage } def
%%EndProlog

";

/// Format a length in 1/7200 inch as PostScript points.
///
/// ```
/// use pclps::postscript::prolog::points;
///
/// assert_eq!(points(61200), "612");
/// assert_eq!(points(59528), "595.28");
/// assert_eq!(points(12340), "123.4");
/// ```
pub fn points(units: i64) -> String {
    let whole = units / 100;
    let hundredths = (units % 100).abs();
    if hundredths == 0 {
        return whole.to_string();
    }
    let mut text = format!("{}.{:02}", whole, hundredths);
    while text.ends_with('0') {
        text.pop();
    }
    text
}

/// Header comments, up to and including `%%EndComments`.
pub fn header(defaults: &PageSetup) -> String {
    let size = &defaults.size;
    format!(
        "%!PS-Adobe-3.0\n\
         %%Creator: pclps\n\
         %%Pages: (atend)\n\
         %%DocumentMedia: {} {} {} 0 () ()\n\
         %%Orientation: {}\n\
         %%EndComments\n\n",
        size.name,
        points(size.width),
        points(size.height),
        defaults.orientation.dsc_name()
    )
}

/// Document setup declaring the default page size and feed option.
pub fn setup(defaults: &PageSetup) -> String {
    format!(
        "%%BeginSetup\n{}{}%%EndSetup\n\n",
        page_size_feature(&defaults.size),
        manual_feed_feature(defaults.manual_feed)
    )
}

/// Page-level overrides for `page`.
///
/// A feature is declared when the page differs from the document default,
/// or when the device still carries a different value from an earlier
/// page. Returns an empty string when nothing needs declaring.
pub fn page_setup(page: &PageSetup, defaults: &PageSetup, device: &PageSetup) -> String {
    let mut text = String::new();
    if page.orientation.dsc_name() != defaults.orientation.dsc_name() {
        text.push_str(&format!(
            "%%PageOrientation: {}\n",
            page.orientation.dsc_name()
        ));
    }

    let mut features = String::new();
    if page.size != defaults.size || page.size != device.size {
        features.push_str(&page_size_feature(&page.size));
    }
    if page.input_slot != defaults.input_slot || page.input_slot != device.input_slot {
        features.push_str(&input_slot_feature(page.input_slot));
    }
    if page.manual_feed != defaults.manual_feed || page.manual_feed != device.manual_feed {
        features.push_str(&manual_feed_feature(page.manual_feed));
    }
    if !features.is_empty() {
        text.push_str("%%BeginPageSetup\n");
        text.push_str(&features);
        text.push_str("%%EndPageSetup\n");
    }
    text
}

/// Page-start line invoking `bp`.
pub fn begin_page(page: &PageSetup) -> String {
    format!(
        "{} {} {} bp\n",
        page.orientation.index(),
        points(page.size.width),
        points(page.size.height)
    )
}

/// Trailer with the final page count.
pub fn trailer(pages: u32) -> String {
    format!("%%Trailer\n%%Pages: {}\n%%EOF\n", pages)
}

fn page_size_feature(size: &PageSize) -> String {
    format!(
        "%%BeginFeature: *PageSize {}\n<< /PageSize [{} {}] >> setpagedevice\n%%EndFeature\n",
        size.name,
        points(size.width),
        points(size.height)
    )
}

fn input_slot_feature(slot: InputSlot) -> String {
    format!(
        "%%BeginFeature: *InputSlot {}\n<< /MediaPosition {} >> setpagedevice\n%%EndFeature\n",
        slot.name(),
        slot.media_position()
    )
}

fn manual_feed_feature(manual: bool) -> String {
    let (name, value) = if manual {
        ("True", "true")
    } else {
        ("False", "false")
    };
    format!(
        "%%BeginFeature: *ManualFeed {}\n<< /ManualFeed {} >> setpagedevice\n%%EndFeature\n",
        name, value
    )
}
