//! # Command Dispatcher
//!
//! Maps each decoded [`Command`] onto [`PrinterState`] and the
//! [`PsEncoder`]. Printable bytes go straight to the encoder; everything
//! else is looked up in the [`CommandId`] table, applied, and reported to
//! the [`EventSink`].
//!
//! Nothing here fails on bad input. Unknown commands and out-of-range
//! parameters leave the state as it was and are reported as
//! [`Effect::Ignored`]; only output I/O errors propagate.
//!
//! ## Units
//!
//! All lengths are 1/7200 inch. Parameter values arrive in thousandths, so
//! a PCL value of `2` is `2000` here.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `ESC & l # E` | top margin = line spacing × lines, cursor to it |
//! | `ESC & a # L` | left margin = hmi × columns, cursor to it |
//! | `ESC & l # C` | line spacing = value × 3 / 20 (1/48 inch) |
//! | `ESC & l # D` | line spacing = 7200 / lines per inch |
//! | `ESC & k # H` | hmi = value × 3 / 50 (1/120 inch) |
//! | `ESC ( s # H` | hmi = 7200 / pitch, font size to match |

use std::io::Write;

use crate::error::{CoreError, Issue};
use crate::events::{DispatchEvent, Effect, EventSink, LogSink};
use crate::pcl::{Command, CommandId, MalformedEscape, Parameterized};
use crate::postscript::PsEncoder;
use crate::printer::config::{InputSlot, JobConfig, Orientation, PageSize, UNITS_PER_INCH};
use crate::printer::font::Family;
use crate::printer::state::{LineTermination, PrinterState};

/// Columns between horizontal tab stops.
pub const TAB_COLUMNS: i64 = 8;

/// Divided by a rate (lines or characters per inch, in thousandths) it
/// gives a length.
const RATE_NUMERATOR: i64 = UNITS_PER_INCH * 1000;

/// Divided by a pitch, the font size in hundredths of a point whose 0.6 em
/// advance matches it.
const PITCH_FONT_NUMERATOR: i64 = RATE_NUMERATOR * 10 / 6;

pub struct Dispatcher<W: Write, S: EventSink = LogSink> {
    config: JobConfig,
    state: PrinterState,
    encoder: PsEncoder<W>,
    sink: S,
}

impl<W: Write> Dispatcher<W, LogSink> {
    pub fn new(output: W, config: JobConfig) -> Self {
        Self::with_sink(output, config, LogSink)
    }
}

impl<W: Write, S: EventSink> Dispatcher<W, S> {
    pub fn with_sink(output: W, config: JobConfig, sink: S) -> Self {
        Self {
            config,
            state: PrinterState::new(&config),
            encoder: PsEncoder::new(output, config.page),
            sink,
        }
    }

    pub fn state(&self) -> &PrinterState {
        &self.state
    }

    pub fn encoder(&self) -> &PsEncoder<W> {
        &self.encoder
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one command.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CoreError> {
        if let Command::Printable(c) = command {
            return self.encoder.emit_printable(&mut self.state, c);
        }

        let id = CommandId::identify(&command);
        let effect = match id {
            Some(id) => match &command {
                Command::ParameterizedEscape(p) => self.parameterized(id, p)?,
                _ => self.immediate(id)?,
            },
            None => Effect::Ignored(Issue::UnrecognizedCommand),
        };

        self.sink.record(&DispatchEvent {
            command,
            name: id.map(CommandId::name),
            effect,
        });
        Ok(())
    }

    /// Pass a misterminated escape on to the sink.
    pub fn report_malformed(&mut self, escape: &MalformedEscape) {
        self.sink.malformed(escape);
    }

    /// Close the document and hand back the output and the sink.
    pub fn finish(mut self) -> Result<(W, S), CoreError> {
        self.encoder.finish(&mut self.state)?;
        let Self { encoder, sink, .. } = self;
        Ok((encoder.into_inner(), sink))
    }

    // ========================================================================
    // CONTROL CODES AND SIMPLE ESCAPES
    // ========================================================================

    fn immediate(&mut self, id: CommandId) -> Result<Effect, CoreError> {
        match id {
            CommandId::Backspace => {
                let width = self.state.font.space_width();
                self.state.rxmoveto(-width);
            }
            CommandId::Tab => {
                let stop = self.state.hmi.saturating_mul(TAB_COLUMNS);
                if stop <= 0 {
                    return Ok(Effect::Ignored(Issue::DegenerateRateParameter));
                }
                let column = self.state.x.saturating_sub(self.state.left_margin);
                let next = (column.div_euclid(stop) + 1).saturating_mul(stop);
                self.state.xmoveto(self.state.left_margin.saturating_add(next));
            }
            CommandId::LineFeed => {
                self.state.rymoveto(self.state.line_spacing);
                if self.state.line_termination.lf_implies_cr {
                    self.state.xmoveto(self.state.left_margin);
                }
            }
            CommandId::FormFeed => {
                self.encoder.close_page(&mut self.state)?;
                self.state.moveto(self.state.left_margin, self.state.top_margin);
            }
            CommandId::CarriageReturn => {
                self.state.xmoveto(self.state.left_margin);
                if self.state.line_termination.cr_implies_lf {
                    self.state.rymoveto(self.state.line_spacing);
                }
            }
            CommandId::Space => self.state.rxmoveto(self.state.hmi),

            CommandId::Reset => {
                self.encoder.close_page(&mut self.state)?;
                self.state = PrinterState::new(&self.config);
            }
            CommandId::ClearHorizontalMargins => {
                self.state.left_margin = self.config.left_margin;
            }
            CommandId::HalfLineFeed => self.state.rymoveto(self.state.line_spacing / 2),

            _ => return Ok(Effect::Acknowledged),
        }
        Ok(Effect::Applied)
    }

    // ========================================================================
    // PARAMETERIZED ESCAPES
    // ========================================================================

    fn parameterized(&mut self, id: CommandId, p: &Parameterized) -> Result<Effect, CoreError> {
        let value = p.value;
        match id {
            // ===== Page Control =====
            CommandId::PageSize => {
                match PageSize::from_pcl_code(p.whole()).filter(|_| p.is_whole()) {
                    Some(size) => self.state.page.size = size,
                    None => return Ok(invalid()),
                }
            }
            CommandId::PaperSource => return self.paper_source(p),
            CommandId::Orientation => match Orientation::from_value(value) {
                Some(orientation) => self.state.page.orientation = orientation,
                None => return Ok(invalid()),
            },
            CommandId::TopMargin => {
                let top = self.state.line_spacing.saturating_mul(value) / 1000;
                self.state.top_margin = top;
                self.state.ymoveto(top);
            }
            CommandId::LeftMargin => {
                let left = self.state.hmi.saturating_mul(value) / 1000;
                self.state.left_margin = left;
                self.state.xmoveto(left);
            }
            CommandId::HorizontalMotionIndex => {
                self.state.hmi = value.saturating_mul(3) / 50;
            }
            CommandId::VerticalMotionIndex => {
                self.state.line_spacing = value.saturating_mul(3) / 20;
            }
            CommandId::LineSpacing => {
                if value == 0 {
                    return Ok(Effect::Ignored(Issue::DegenerateRateParameter));
                }
                self.state.line_spacing = RATE_NUMERATOR / value;
            }
            CommandId::LineTermination => {
                match LineTermination::from_mode(p.whole()).filter(|_| p.is_whole()) {
                    Some(mode) => self.state.line_termination = mode,
                    None => return Ok(invalid()),
                }
            }

            // ===== Cursor Positioning =====
            CommandId::HorizontalColumns => {
                let dx = self.state.hmi.saturating_mul(value) / 1000;
                self.move_horizontal(p, dx);
            }
            CommandId::HorizontalDecipoints => self.move_horizontal(p, value / 100),
            CommandId::HorizontalUnits => {
                self.move_horizontal(p, value.saturating_mul(24) / 1000)
            }
            CommandId::VerticalRows => {
                let dy = self.state.line_spacing.saturating_mul(value) / 1000;
                self.move_vertical(p, dy);
            }
            CommandId::VerticalDecipoints => self.move_vertical(p, value / 100),
            CommandId::VerticalUnits => self.move_vertical(p, value.saturating_mul(24) / 1000),
            CommandId::PushPopPosition => {
                let done = match (p.is_whole(), p.whole()) {
                    (true, 0) => self.state.push_position(),
                    (true, 1) => self.state.pop_position(),
                    _ => false,
                };
                if !done {
                    return Ok(invalid());
                }
            }

            // ===== Font Selection =====
            CommandId::PrimaryPitch => {
                if value == 0 {
                    return Ok(Effect::Ignored(Issue::DegenerateRateParameter));
                }
                self.state.hmi = RATE_NUMERATOR / value;
                self.state
                    .font
                    .set_size(rounded_div(PITCH_FONT_NUMERATOR, value));
            }
            CommandId::PitchMode => {
                let size = match (p.is_whole(), p.whole()) {
                    (true, 0) => 1200,
                    (true, 2) => 720,
                    (true, 4) => 1000,
                    _ => return Ok(invalid()),
                };
                self.state.font.set_size(size);
                self.state.hmi = self.state.font.space_width();
            }
            CommandId::PrimaryStyle => {
                let posture = p.whole().rem_euclid(4);
                self.state.font.set_italic(matches!(posture, 1 | 2));
            }
            CommandId::PrimaryStrokeWeight => self.state.font.set_bold(value != 0),
            CommandId::PrimaryTypeface => match Family::from_typeface(p.whole()) {
                Some(family) => self.state.font.set_family(family),
                None => return Ok(invalid()),
            },
            CommandId::TransparentPrintData => {
                for &c in &p.data {
                    self.encoder.emit_printable(&mut self.state, c)?;
                }
            }

            _ => return Ok(Effect::Acknowledged),
        }
        Ok(Effect::Applied)
    }

    /// `ESC & l # H`: eject, or pick the tray the next page feeds from.
    fn paper_source(&mut self, p: &Parameterized) -> Result<Effect, CoreError> {
        if !p.is_whole() {
            return Ok(invalid());
        }
        if p.whole() == 0 {
            self.encoder.close_page(&mut self.state)?;
            self.state.moveto(self.state.left_margin, self.state.top_margin);
            return Ok(Effect::Applied);
        }

        let page = &mut self.state.page;
        match p.whole() {
            1 => {
                page.input_slot = InputSlot::Upper;
                page.manual_feed = false;
            }
            2 | 3 => page.manual_feed = true,
            4 => {
                page.input_slot = InputSlot::Lower;
                page.manual_feed = false;
            }
            5 => {
                page.input_slot = InputSlot::Optional;
                page.manual_feed = false;
            }
            6 => {
                page.input_slot = InputSlot::Envelope;
                page.manual_feed = false;
            }
            _ => return Ok(invalid()),
        }
        Ok(Effect::Applied)
    }

    /// Signed values move relative to the cursor; unsigned ones are
    /// measured from the left edge of the page, like `ESC & a # L`.
    fn move_horizontal(&mut self, p: &Parameterized, dx: i64) {
        if p.relative {
            self.state.rxmoveto(dx);
        } else {
            self.state.xmoveto(dx);
        }
    }

    /// Signed values move relative to the cursor; unsigned ones are
    /// measured from the top margin.
    fn move_vertical(&mut self, p: &Parameterized, dy: i64) {
        if p.relative {
            self.state.rymoveto(dy);
        } else {
            self.state.ymoveto(self.state.top_margin.saturating_add(dy));
        }
    }
}

fn invalid() -> Effect {
    Effect::Ignored(Issue::InvalidParameterRange)
}

/// `n / d` rounded half away from zero, for positive `n`.
fn rounded_div(n: i64, d: i64) -> i64 {
    n.saturating_add(d.saturating_abs() / 2) / d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::pcl::commands::{BS, CR, FF, HT, LF, SP};
    use pretty_assertions::assert_eq;

    type TestDispatcher = Dispatcher<Vec<u8>, RecordingSink>;

    fn dispatcher() -> TestDispatcher {
        Dispatcher::with_sink(Vec::new(), JobConfig::LETTER, RecordingSink::new())
    }

    fn esc(class: u8, group: Option<u8>, value: i64, param: u8) -> Command {
        Command::ParameterizedEscape(Parameterized::new(class, group, value, param))
    }

    fn signed(class: u8, group: Option<u8>, value: i64, param: u8) -> Command {
        let mut p = Parameterized::new(class, group, value, param);
        p.relative = true;
        Command::ParameterizedEscape(p)
    }

    fn last_effect(d: &TestDispatcher) -> Effect {
        d.sink().events.last().map(|e| e.effect).unwrap()
    }

    fn output(d: &TestDispatcher) -> String {
        String::from_utf8_lossy(d.encoder().get_ref()).into_owned()
    }

    #[test]
    fn test_orientation_whole_values_only() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'l'), 1000, b'O')).unwrap();
        assert_eq!(d.state().page.orientation, Orientation::Landscape);
        assert_eq!(last_effect(&d), Effect::Applied);

        d.dispatch(esc(b'&', Some(b'l'), 1500, b'O')).unwrap();
        assert_eq!(d.state().page.orientation, Orientation::Landscape);
        assert_eq!(last_effect(&d), invalid());

        d.dispatch(esc(b'&', Some(b'l'), 4000, b'O')).unwrap();
        assert_eq!(d.state().page.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_margins_move_cursor() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'l'), 2000, b'E')).unwrap();
        assert_eq!(d.state().top_margin, 2400);
        assert_eq!(d.state().y, 2400);

        d.dispatch(esc(b'&', Some(b'a'), 10000, b'L')).unwrap();
        assert_eq!(d.state().left_margin, 7200);
        assert_eq!(d.state().x, 7200);
    }

    #[test]
    fn test_column_and_margin_share_origin() {
        let mut margin = dispatcher();
        margin.dispatch(esc(b'&', Some(b'a'), 10000, b'L')).unwrap();
        margin.dispatch(Command::Control(SP)).unwrap();
        margin.dispatch(Command::Control(CR)).unwrap();

        let mut column = dispatcher();
        column.dispatch(esc(b'&', Some(b'a'), 10000, b'C')).unwrap();

        assert_eq!(margin.state().x, column.state().x);

        margin.dispatch(esc(b'&', Some(b'a'), 0, b'L')).unwrap();
        column.dispatch(esc(b'&', Some(b'a'), 0, b'C')).unwrap();
        assert_eq!(margin.state().x, 0);
        assert_eq!(column.state().x, 0);
    }

    #[test]
    fn test_default_sink_dispatcher() {
        let mut d = Dispatcher::new(Vec::new(), JobConfig::A4);
        d.dispatch(esc(b'&', Some(b'l'), 1000, b'O')).unwrap();
        d.dispatch(Command::Printable(b'A')).unwrap();
        let (out, _sink) = d.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1 595.28 841.89 bp\n"));
    }

    #[test]
    fn test_motion_indexes() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'l'), 8000, b'C')).unwrap();
        assert_eq!(d.state().line_spacing, 1200);

        // 7 / 48 inch keeps its rounding error
        d.dispatch(esc(b'&', Some(b'l'), 7000, b'C')).unwrap();
        assert_eq!(d.state().line_spacing, 1050);

        d.dispatch(esc(b'&', Some(b'k'), 12000, b'H')).unwrap();
        assert_eq!(d.state().hmi, 720);
    }

    #[test]
    fn test_line_spacing_zero_is_ignored() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'l'), 8000, b'D')).unwrap();
        assert_eq!(d.state().line_spacing, 900);

        d.dispatch(esc(b'&', Some(b'l'), 0, b'D')).unwrap();
        assert_eq!(d.state().line_spacing, 900);
        assert_eq!(
            last_effect(&d),
            Effect::Ignored(Issue::DegenerateRateParameter)
        );
    }

    #[test]
    fn test_primary_pitch_sets_hmi_and_size() {
        let mut d = dispatcher();
        d.dispatch(esc(b'(', Some(b's'), 12000, b'H')).unwrap();
        assert_eq!(d.state().hmi, 600);
        assert_eq!(d.state().font.size(), 1000);

        d.dispatch(esc(b'(', Some(b's'), 16670, b'H')).unwrap();
        assert_eq!(d.state().hmi, 431);
        assert_eq!(d.state().font.size(), 720);

        d.dispatch(esc(b'(', Some(b's'), 0, b'H')).unwrap();
        assert_eq!(d.state().hmi, 431);
        assert_eq!(
            last_effect(&d),
            Effect::Ignored(Issue::DegenerateRateParameter)
        );
    }

    #[test]
    fn test_pitch_mode() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'k'), 2000, b'S')).unwrap();
        assert_eq!(d.state().font.size(), 720);
        assert_eq!(d.state().hmi, 432);

        d.dispatch(esc(b'&', Some(b'k'), 3000, b'S')).unwrap();
        assert_eq!(last_effect(&d), invalid());
        assert_eq!(d.state().font.size(), 720);
    }

    #[test]
    fn test_font_attributes() {
        let mut d = dispatcher();
        d.dispatch(esc(b'(', Some(b's'), 3000, b'B')).unwrap();
        assert_eq!(d.state().font.canonical_name(), "Courier-Bold");

        d.dispatch(esc(b'(', Some(b's'), 1000, b'S')).unwrap();
        assert_eq!(d.state().font.canonical_name(), "Courier-BoldOblique");

        d.dispatch(esc(b'(', Some(b's'), 4148, b'T')).unwrap();
        assert_eq!(d.state().font.canonical_name(), "Helvetica-BoldOblique");

        d.dispatch(esc(b'(', Some(b's'), 0, b'B')).unwrap();
        d.dispatch(esc(b'(', Some(b's'), 0, b'S')).unwrap();
        assert_eq!(d.state().font.canonical_name(), "Helvetica");

        d.dispatch(esc(b'(', Some(b's'), 99000, b'T')).unwrap();
        assert_eq!(last_effect(&d), invalid());
        assert_eq!(d.state().font.family(), Family::Helvetica);
    }

    #[test]
    fn test_control_codes() {
        let mut d = dispatcher();
        d.dispatch(Command::Control(SP)).unwrap();
        assert_eq!(d.state().position(), (2375 + 720, 4175));

        d.dispatch(Command::Control(BS)).unwrap();
        assert_eq!(d.state().position(), (2375, 4175));

        d.dispatch(Command::Control(SP)).unwrap();
        d.dispatch(Command::Control(LF)).unwrap();
        assert_eq!(d.state().position(), (2375, 5375));

        d.dispatch(Command::Control(SP)).unwrap();
        d.dispatch(Command::Control(CR)).unwrap();
        assert_eq!(d.state().position(), (2375, 5375));
    }

    #[test]
    fn test_tab_stops() {
        let mut d = dispatcher();
        d.dispatch(Command::Control(HT)).unwrap();
        assert_eq!(d.state().x, 2375 + 5760);

        d.dispatch(Command::Control(SP)).unwrap();
        d.dispatch(Command::Control(HT)).unwrap();
        assert_eq!(d.state().x, 2375 + 11520);
    }

    #[test]
    fn test_line_termination_modes() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'k'), 0, b'G')).unwrap();
        d.dispatch(Command::Control(SP)).unwrap();
        d.dispatch(Command::Control(LF)).unwrap();
        assert_eq!(d.state().position(), (2375 + 720, 5375));

        d.dispatch(esc(b'&', Some(b'k'), 1000, b'G')).unwrap();
        d.dispatch(Command::Control(CR)).unwrap();
        assert_eq!(d.state().position(), (2375, 6575));

        d.dispatch(esc(b'&', Some(b'k'), 4000, b'G')).unwrap();
        assert_eq!(last_effect(&d), invalid());
    }

    #[test]
    fn test_form_feed_closes_page() {
        let mut d = dispatcher();
        d.dispatch(Command::Printable(b'A')).unwrap();
        assert!(d.encoder().is_page_open());

        d.dispatch(Command::Control(FF)).unwrap();
        assert!(!d.encoder().is_page_open());
        assert_eq!(d.encoder().pages(), 1);
        assert_eq!(d.state().position(), (2375, 4175));
    }

    #[test]
    fn test_form_feed_without_marks_adds_no_page() {
        let mut d = dispatcher();
        d.dispatch(Command::Control(FF)).unwrap();
        d.dispatch(Command::Control(FF)).unwrap();
        assert_eq!(d.encoder().pages(), 0);
        assert_eq!(output(&d), "");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut d = dispatcher();
        d.dispatch(esc(b'(', Some(b's'), 3000, b'B')).unwrap();
        d.dispatch(esc(b'&', Some(b'l'), 8000, b'D')).unwrap();
        d.dispatch(Command::Printable(b'A')).unwrap();

        d.dispatch(Command::SimpleEscape(b'E')).unwrap();
        assert!(!d.encoder().is_page_open());
        assert_eq!(*d.state(), PrinterState::new(&JobConfig::LETTER));
    }

    #[test]
    fn test_relative_moves_sum() {
        let mut d = dispatcher();
        d.dispatch(signed(b'&', Some(b'a'), 10000, b'H')).unwrap();
        d.dispatch(signed(b'&', Some(b'a'), 5000, b'V')).unwrap();
        assert_eq!(d.state().position(), (2375 + 100, 4175 + 50));

        d.dispatch(signed(b'*', Some(b'p'), -10000, b'X')).unwrap();
        assert_eq!(d.state().position(), (2375 + 100 - 240, 4175 + 50));
    }

    #[test]
    fn test_absolute_moves() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'a'), 10000, b'C')).unwrap();
        assert_eq!(d.state().x, 7200);

        d.dispatch(esc(b'&', Some(b'a'), 7200, b'H')).unwrap();
        assert_eq!(d.state().x, 72);

        d.dispatch(esc(b'*', Some(b'p'), 0, b'X')).unwrap();
        assert_eq!(d.state().x, 0);

        d.dispatch(esc(b'&', Some(b'a'), 2000, b'R')).unwrap();
        assert_eq!(d.state().y, 4175 + 2400);

        d.dispatch(esc(b'*', Some(b'p'), 300000, b'Y')).unwrap();
        assert_eq!(d.state().y, 4175 + 7200);
    }

    #[test]
    fn test_push_pop_position() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'f'), 0, b'S')).unwrap();
        d.dispatch(Command::Control(LF)).unwrap();
        d.dispatch(esc(b'&', Some(b'f'), 1000, b'S')).unwrap();
        assert_eq!(d.state().position(), (2375, 4175));

        d.dispatch(esc(b'&', Some(b'f'), 1000, b'S')).unwrap();
        assert_eq!(last_effect(&d), invalid());
    }

    #[test]
    fn test_page_size_and_source() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'l'), 26000, b'A')).unwrap();
        assert_eq!(d.state().page.size, PageSize::A4);

        d.dispatch(esc(b'&', Some(b'l'), 4000, b'H')).unwrap();
        assert_eq!(d.state().page.input_slot, InputSlot::Lower);

        d.dispatch(esc(b'&', Some(b'l'), 2000, b'H')).unwrap();
        assert!(d.state().page.manual_feed);

        d.dispatch(esc(b'&', Some(b'l'), 7000, b'A')).unwrap();
        assert_eq!(last_effect(&d), invalid());
        assert_eq!(d.state().page.size, PageSize::A4);
    }

    #[test]
    fn test_paper_source_zero_ejects() {
        let mut d = dispatcher();
        d.dispatch(Command::Printable(b'A')).unwrap();
        d.dispatch(esc(b'&', Some(b'l'), 0, b'H')).unwrap();
        assert!(!d.encoder().is_page_open());
        assert_eq!(d.encoder().pages(), 1);
    }

    #[test]
    fn test_transparent_print_data() {
        let mut d = dispatcher();
        let mut p = Parameterized::new(b'&', Some(b'p'), 3000, b'X');
        p.data = vec![b'(', 0x1B, b'A'];
        d.dispatch(Command::ParameterizedEscape(p)).unwrap();
        assert!(output(&d).contains("(\\(\\033A"));
        assert_eq!(d.state().x, 2375 + 3 * 720);
    }

    #[test]
    fn test_acknowledged_and_unrecognized() {
        let mut d = dispatcher();
        d.dispatch(esc(b'&', Some(b'l'), 2000, b'X')).unwrap();
        assert_eq!(last_effect(&d), Effect::Acknowledged);
        assert_eq!(d.sink().events[0].name, Some("# copies"));

        d.dispatch(esc(b'&', Some(b'z'), 0, b'Q')).unwrap();
        assert_eq!(d.sink().events[1].name, None);
        assert_eq!(
            last_effect(&d),
            Effect::Ignored(Issue::UnrecognizedCommand)
        );
        assert_eq!(*d.state(), PrinterState::new(&JobConfig::LETTER));
    }

    #[test]
    fn test_printables_are_not_events() {
        let mut d = dispatcher();
        d.dispatch(Command::Printable(b'A')).unwrap();
        assert!(d.sink().events.is_empty());
    }

    #[test]
    fn test_finish_returns_output() {
        let mut d = dispatcher();
        d.dispatch(Command::Printable(b'H')).unwrap();
        d.dispatch(Command::Printable(b'i')).unwrap();
        let (out, _sink) = d.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n2375 4175 XY /Courier 1200 F (Hi)s \nep\n"));
        assert!(text.ends_with("%%Trailer\n%%Pages: 1\n%%EOF\n"));
    }
}
