//! # Printer State
//!
//! The PCL printer's "desired" state: where the cursor is, the margins,
//! spacing and font the next character should use, and the page setup the
//! next page should have. Only the dispatcher mutates it; the PostScript
//! encoder reads it and catches the output up.
//!
//! Coordinates are in 1/7200 inch from the top-left corner of the page,
//! `y` growing downwards. Nothing is clamped to the page.

use super::config::{JobConfig, PageSetup};
use super::font::FontDescriptor;

/// Depth of the `ESC & f # S` position stack.
pub const POSITION_STACK_DEPTH: usize = 20;

/// Which control codes imply a carriage return or line feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineTermination {
    /// CR also advances one line
    pub cr_implies_lf: bool,
    /// LF (and FF) also return the carriage
    pub lf_implies_cr: bool,
}

impl LineTermination {
    /// Decode an `ESC & k # G` mode (0 through 3).
    pub fn from_mode(mode: i64) -> Option<Self> {
        if !(0..=3).contains(&mode) {
            return None;
        }
        Some(Self {
            cr_implies_lf: mode & 1 != 0,
            lf_implies_cr: mode & 2 != 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterState {
    pub x: i64,
    pub y: i64,
    pub top_margin: i64,
    pub left_margin: i64,
    pub line_spacing: i64,
    /// Horizontal motion index: advance for one space at the current pitch
    pub hmi: i64,
    pub font: FontDescriptor,
    /// Setup the next page opens with
    pub page: PageSetup,
    pub line_termination: LineTermination,
    position_stack: Vec<(i64, i64)>,
}

impl PrinterState {
    /// Fresh state for a job, with the cursor at the top-left margin corner.
    pub fn new(config: &JobConfig) -> Self {
        Self {
            x: config.left_margin,
            y: config.top_margin,
            top_margin: config.top_margin,
            left_margin: config.left_margin,
            line_spacing: config.line_spacing,
            hmi: config.hmi,
            font: FontDescriptor::new(config.font_size),
            page: config.page,
            line_termination: LineTermination {
                cr_implies_lf: false,
                lf_implies_cr: config.lf_implies_cr,
            },
            position_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn moveto(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    pub fn xmoveto(&mut self, x: i64) {
        self.x = x;
    }

    pub fn ymoveto(&mut self, y: i64) {
        self.y = y;
    }

    pub fn rmoveto(&mut self, dx: i64, dy: i64) {
        self.rxmoveto(dx);
        self.rymoveto(dy);
    }

    pub fn rxmoveto(&mut self, dx: i64) {
        self.x = self.x.saturating_add(dx);
    }

    pub fn rymoveto(&mut self, dy: i64) {
        self.y = self.y.saturating_add(dy);
    }

    /// Save the cursor. Returns `false` when the stack is full.
    pub fn push_position(&mut self) -> bool {
        if self.position_stack.len() >= POSITION_STACK_DEPTH {
            return false;
        }
        self.position_stack.push((self.x, self.y));
        true
    }

    /// Restore the last saved cursor. Returns `false` when nothing is saved.
    pub fn pop_position(&mut self) -> bool {
        match self.position_stack.pop() {
            Some((x, y)) => {
                self.moveto(x, y);
                true
            }
            None => false,
        }
    }
}
