//! # Printer Module
//!
//! The emulated PCL printer: job defaults and the state commands act on.
//!
//! ## Modules
//!
//! - [`config`]: Job defaults, page sizes, paper sources
//! - [`font`]: Font descriptor and PostScript font names
//! - [`state`]: Cursor, margins, spacing and font of the running job

pub mod config;
pub mod font;
pub mod state;

pub use config::{InputSlot, JobConfig, Orientation, PageSetup, PageSize};
pub use font::{Family, FontDescriptor};
pub use state::{LineTermination, PrinterState};
