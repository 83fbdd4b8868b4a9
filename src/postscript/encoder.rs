//! # PostScript Encoder
//!
//! Writes PostScript incrementally while remembering what it has already
//! told the interpreter: the current point, the selected font and which
//! scopes are open. Each visible action compares that memory with the
//! desired [`PrinterState`] and emits only the directives needed to close
//! the gap.
//!
//! ## Scopes
//!
//! ```text
//! document ─┬─ page ─┬─ text run  "(...)s"
//!           │        └─ text run
//!           └─ page ── ...
//! ```
//!
//! Scopes open lazily, on the first call that needs them, and an outer
//! scope always closes its inner scopes first. The document scope never
//! reopens once [`PsEncoder::finish`] has run.
//!
//! ## Position Directives
//!
//! | Desired vs emitted | Output |
//! |--------------------|--------|
//! | both axes differ (or unknown) | `\n{x} {y} XY ` |
//! | only y differs | `\n{dy} y ` |
//! | only x differs, small whole number of spaces in an open run | spaces inside the run |
//! | only x differs, otherwise | `{dx} x ` |

use log::debug;
use std::io::Write;

use super::prolog;
use crate::error::CoreError;
use crate::printer::config::PageSetup;
use crate::printer::state::PrinterState;

/// Most spaces written into a run in place of a move directive.
pub const MAX_SPACE_RUN: i64 = 6;

/// Font name and size last selected in the output.
pub type FontKey = (&'static str, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentScope {
    Unopened,
    Open,
    Finished,
}

pub struct PsEncoder<W: Write> {
    out: W,
    /// Page setup declared in the document header
    defaults: PageSetup,
    /// Page setup currently in effect on the output device
    device: PageSetup,
    document: DocumentScope,
    page_open: bool,
    run_open: bool,
    pages: u32,
    /// Current point in the output; `None` is unknown
    ps_x: Option<i64>,
    ps_y: Option<i64>,
    ps_font: Option<FontKey>,
}

impl<W: Write> PsEncoder<W> {
    pub fn new(out: W, defaults: PageSetup) -> Self {
        Self {
            out,
            defaults,
            device: defaults,
            document: DocumentScope::Unopened,
            page_open: false,
            run_open: false,
            pages: 0,
            ps_x: None,
            ps_y: None,
            ps_font: None,
        }
    }

    // ========================================================================
    // SCOPES
    // ========================================================================

    /// Write the header, prolog and setup the first time it is called.
    pub fn ensure_document_open(&mut self) -> Result<(), CoreError> {
        match self.document {
            DocumentScope::Open => Ok(()),
            DocumentScope::Finished => Err(CoreError::InvariantViolation(
                "output requested after the document was finished".into(),
            )),
            DocumentScope::Unopened => {
                self.out.write_all(prolog::header(&self.defaults).as_bytes())?;
                self.out.write_all(prolog::PROLOG.as_bytes())?;
                self.out.write_all(prolog::setup(&self.defaults).as_bytes())?;
                self.document = DocumentScope::Open;
                Ok(())
            }
        }
    }

    /// Start a page using the page setup in `state`, unless one is open.
    pub fn ensure_page_open(&mut self, state: &PrinterState) -> Result<(), CoreError> {
        if self.page_open {
            return Ok(());
        }
        self.ensure_document_open()?;

        self.pages += 1;
        debug!("opening page {}", self.pages);
        writeln!(self.out, "%%Page: {} {}", self.pages, self.pages)?;
        let setup = prolog::page_setup(&state.page, &self.defaults, &self.device);
        self.out.write_all(setup.as_bytes())?;
        self.out.write_all(prolog::begin_page(&state.page).as_bytes())?;
        self.device = state.page;

        self.page_open = true;
        self.forget_emitted();
        Ok(())
    }

    /// End the current page, if any, and put the cursor at the page origin.
    pub fn close_page(&mut self, state: &mut PrinterState) -> Result<(), CoreError> {
        if self.page_open {
            self.close_run()?;
            self.out.write_all(b"\nep\n\n")?;
            self.page_open = false;
            self.forget_emitted();
            debug!("closed page {}", self.pages);
        }
        state.moveto(0, 0);
        Ok(())
    }

    /// Close any open page, write the trailer and flush.
    ///
    /// A job that produced no pages still gets a complete document.
    pub fn finish(&mut self, state: &mut PrinterState) -> Result<(), CoreError> {
        self.ensure_document_open()?;
        self.close_page(state)?;
        self.out.write_all(prolog::trailer(self.pages).as_bytes())?;
        self.document = DocumentScope::Finished;
        self.out.flush()?;
        Ok(())
    }

    fn open_run(&mut self) -> Result<(), CoreError> {
        if !self.run_open {
            self.out.write_all(b"(")?;
            self.run_open = true;
        }
        Ok(())
    }

    fn close_run(&mut self) -> Result<(), CoreError> {
        if self.run_open {
            self.out.write_all(b")s ")?;
            self.run_open = false;
        }
        Ok(())
    }

    /// Make the next mark re-emit both position and font.
    fn forget_emitted(&mut self) {
        self.ps_x = None;
        self.ps_y = None;
        self.ps_font = None;
    }

    // ========================================================================
    // RECONCILIATION
    // ========================================================================

    /// Move the output's current point to the desired cursor position.
    pub fn attain_position(&mut self, state: &PrinterState) -> Result<(), CoreError> {
        self.ensure_page_open(state)?;
        let (x, y) = state.position();

        match (self.ps_x, self.ps_y) {
            (Some(px), Some(py)) if px == x && py == y => {}
            (Some(px), Some(py)) if px == x => {
                self.close_run()?;
                write!(self.out, "\n{} y ", y.saturating_sub(py))?;
            }
            (Some(px), Some(py)) if py == y => {
                let dx = x.saturating_sub(px);
                match self.space_count(state, dx) {
                    Some(spaces) => {
                        for _ in 0..spaces {
                            self.out.write_all(b" ")?;
                        }
                    }
                    None => {
                        self.close_run()?;
                        write!(self.out, "{} x ", dx)?;
                    }
                }
            }
            _ => {
                self.close_run()?;
                write!(self.out, "\n{} {} XY ", x, y)?;
            }
        }

        self.ps_x = Some(x);
        self.ps_y = Some(y);
        Ok(())
    }

    /// Number of spaces that cover `dx` inside the open run, if that is
    /// allowed: the run's font size must match the desired one, so its space
    /// width is the desired space width, and `dx` must be a small positive
    /// multiple of it. The font name may differ.
    fn space_count(&self, state: &PrinterState, dx: i64) -> Option<i64> {
        let emitted_size = self.ps_font.map(|(_, size)| size);
        if !self.run_open || emitted_size != Some(state.font.size()) {
            return None;
        }
        let space = state.font.space_width();
        if dx <= 0 || space <= 0 || dx % space != 0 {
            return None;
        }
        let spaces = dx / space;
        (spaces <= MAX_SPACE_RUN).then_some(spaces)
    }

    /// Select the desired font in the output if it is not already selected.
    pub fn attain_font(&mut self, state: &PrinterState) -> Result<(), CoreError> {
        let key = font_key(state);
        if self.ps_font != Some(key) {
            self.close_run()?;
            write!(self.out, "/{} {} F ", key.0, key.1)?;
            self.ps_font = Some(key);
        }
        Ok(())
    }

    /// Print one character at the desired position in the desired font and
    /// advance the cursor past it.
    pub fn emit_printable(&mut self, state: &mut PrinterState, c: u8) -> Result<(), CoreError> {
        self.attain_position(state)?;
        self.attain_font(state)?;
        self.open_run()?;

        match c {
            b'(' | b')' | b'\\' => self.out.write_all(&[b'\\', c])?,
            0x00..=0x1F | 0x7F..=0xFF => write!(self.out, "\\{:03o}", c)?,
            _ => self.out.write_all(&[c])?,
        }

        let width = state.font.char_width(c);
        state.rxmoveto(width);
        self.ps_x = self.ps_x.map(|x| x.saturating_add(width));
        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Pages opened so far.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn is_document_open(&self) -> bool {
        self.document == DocumentScope::Open
    }

    pub fn is_finished(&self) -> bool {
        self.document == DocumentScope::Finished
    }

    pub fn is_page_open(&self) -> bool {
        self.page_open
    }

    pub fn is_run_open(&self) -> bool {
        self.run_open
    }

    /// Current point in the output, if known.
    pub fn emitted_position(&self) -> Option<(i64, i64)> {
        self.ps_x.zip(self.ps_y)
    }

    /// Font selected in the output, if known.
    pub fn emitted_font(&self) -> Option<FontKey> {
        self.ps_font
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn font_key(state: &PrinterState) -> FontKey {
    (state.font.canonical_name(), state.font.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::config::{JobConfig, Orientation, PageSize};
    use pretty_assertions::assert_eq;

    fn setup() -> (PsEncoder<Vec<u8>>, PrinterState) {
        let config = JobConfig::LETTER;
        (
            PsEncoder::new(Vec::new(), config.page),
            PrinterState::new(&config),
        )
    }

    fn text(encoder: &PsEncoder<Vec<u8>>) -> String {
        String::from_utf8_lossy(encoder.get_ref()).into_owned()
    }

    /// Output written after the first page-start line.
    fn body(encoder: &PsEncoder<Vec<u8>>) -> String {
        let all = text(encoder);
        match all.find(" bp\n") {
            Some(i) => all[i + 4..].to_string(),
            None => String::new(),
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_nothing_written_before_first_mark() {
        let (encoder, _) = setup();
        assert!(encoder.get_ref().is_empty());
        assert!(!encoder.is_document_open());
    }

    #[test]
    fn test_document_open_is_idempotent() {
        let (mut encoder, _) = setup();
        encoder.ensure_document_open().unwrap();
        let len = encoder.get_ref().len();
        encoder.ensure_document_open().unwrap();
        assert_eq!(encoder.get_ref().len(), len);
        assert!(text(&encoder).starts_with("%!PS-Adobe-3.0\n"));
    }

    #[test]
    fn test_first_printable() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'H').unwrap();
        encoder.emit_printable(&mut state, b'i').unwrap();
        assert_eq!(body(&encoder), "\n2375 4175 XY /Courier 1200 F (Hi");
        assert_eq!(state.x, 2375 + 2 * 720);
        assert_eq!(encoder.emitted_position(), Some((2375 + 1440, 4175)));
    }

    #[test]
    fn test_second_printable_emits_no_directives() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        encoder.emit_printable(&mut state, b'B').unwrap();
        let out = body(&encoder);
        assert_eq!(count(&out, " F "), 1);
        assert_eq!(count(&out, " XY "), 1);
        assert_eq!(count(&out, " x "), 0);
        assert_eq!(count(&out, " y "), 0);
    }

    #[test]
    fn test_six_spaces_stay_in_run() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.rxmoveto(6 * 720);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(encoder.is_run_open());
        assert!(body(&encoder).ends_with("(A      B"));
    }

    #[test]
    fn test_seven_spaces_close_run() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.rxmoveto(7 * 720);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s 5040 x (B"));
    }

    #[test]
    fn test_partial_space_uses_move() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.rxmoveto(100);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s 100 x (B"));
    }

    #[test]
    fn test_backwards_move_uses_move() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.rxmoveto(-720);
        encoder.emit_printable(&mut state, b'_').unwrap();
        assert!(body(&encoder).ends_with("(A)s -720 x (_"));
    }

    #[test]
    fn test_vertical_only_move() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.rymoveto(1200);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s \n1200 y (B"));
    }

    #[test]
    fn test_both_axes_use_absolute_move() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.moveto(2375, 5375);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s \n2375 5375 XY (B"));
    }

    #[test]
    fn test_font_change_closes_run() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.font.set_bold(true);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s /Courier-Bold 1200 F (B"));
    }

    #[test]
    fn test_size_change_reselects_font() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.font.set_size(1000);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s /Courier 1000 F (B"));
    }

    #[test]
    fn test_spaces_kept_across_weight_change() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.font.set_bold(true);
        state.rxmoveto(6 * 720);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A      )s /Courier-Bold 1200 F (B"));
    }

    #[test]
    fn test_spaces_not_used_across_size_change() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        state.font.set_size(1000);
        state.rxmoveto(600);
        encoder.emit_printable(&mut state, b'B').unwrap();
        assert!(body(&encoder).ends_with("(A)s 600 x /Courier 1000 F (B"));
    }

    #[test]
    fn test_metacharacters_escaped() {
        let (mut encoder, mut state) = setup();
        for &c in b"(a)\\" {
            encoder.emit_printable(&mut state, c).unwrap();
        }
        encoder.emit_printable(&mut state, 0xE9).unwrap();
        assert!(body(&encoder).ends_with("(\\(a\\)\\\\\\351"));
    }

    #[test]
    fn test_close_page_resets_memory() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        encoder.close_page(&mut state).unwrap();
        assert_eq!(state.position(), (0, 0));
        assert!(!encoder.is_page_open());
        assert_eq!(encoder.emitted_position(), None);
        assert_eq!(encoder.emitted_font(), None);

        state.moveto(2375, 4175);
        encoder.emit_printable(&mut state, b'A').unwrap();
        let out = text(&encoder);
        assert_eq!(count(&out, "\n2375 4175 XY /Courier 1200 F (A"), 2);
        assert!(out.contains("(A)s \nep\n\n%%Page: 2 2\n"));
    }

    #[test]
    fn test_close_page_without_page_writes_nothing() {
        let (mut encoder, mut state) = setup();
        encoder.close_page(&mut state).unwrap();
        assert!(encoder.get_ref().is_empty());
        assert_eq!(encoder.pages(), 0);
    }

    #[test]
    fn test_finish_writes_trailer() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        encoder.finish(&mut state).unwrap();
        let out = text(&encoder);
        assert!(out.ends_with("(A)s \nep\n\n%%Trailer\n%%Pages: 1\n%%EOF\n"));
        assert!(encoder.is_finished());
    }

    #[test]
    fn test_finish_empty_job() {
        let (mut encoder, mut state) = setup();
        encoder.finish(&mut state).unwrap();
        let out = text(&encoder);
        assert!(out.starts_with("%!PS-Adobe-3.0\n"));
        assert!(out.ends_with("%%EndSetup\n\n%%Trailer\n%%Pages: 0\n%%EOF\n"));
    }

    #[test]
    fn test_output_after_finish_is_invariant_violation() {
        let (mut encoder, mut state) = setup();
        encoder.finish(&mut state).unwrap();
        let err = encoder.emit_printable(&mut state, b'A').unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
        assert!(matches!(
            encoder.finish(&mut state),
            Err(CoreError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_page_overrides() {
        let (mut encoder, mut state) = setup();
        state.page.orientation = Orientation::Landscape;
        state.page.size = PageSize::LEGAL;
        encoder.emit_printable(&mut state, b'A').unwrap();
        let out = text(&encoder);
        assert!(out.contains(
            "%%Page: 1 1\n%%PageOrientation: Landscape\n%%BeginPageSetup\n\
             %%BeginFeature: *PageSize Legal\n"
        ));
        assert!(out.contains("%%EndPageSetup\n1 612 1008 bp\n"));
    }

    #[test]
    fn test_default_page_has_no_overrides() {
        let (mut encoder, mut state) = setup();
        encoder.emit_printable(&mut state, b'A').unwrap();
        let out = text(&encoder);
        assert!(out.contains("%%EndSetup\n\n%%Page: 1 1\n0 612 792 bp\n"));
        assert!(!out.contains("%%BeginPageSetup"));
    }
}
