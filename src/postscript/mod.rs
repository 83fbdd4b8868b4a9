//! # PostScript Output Language
//!
//! ## Module Structure
//!
//! - [`prolog`]: Header, helper procedures, setup and trailer text
//! - [`encoder`]: Incremental encoder that emits only what changed
//!
//! ## Usage Example
//!
//! ```
//! use pclps::postscript::PsEncoder;
//! use pclps::printer::{JobConfig, PrinterState};
//!
//! let config = JobConfig::LETTER;
//! let mut state = PrinterState::new(&config);
//! let mut encoder = PsEncoder::new(Vec::new(), config.page);
//!
//! encoder.emit_printable(&mut state, b'A').unwrap();
//! encoder.finish(&mut state).unwrap();
//!
//! let ps = String::from_utf8(encoder.into_inner()).unwrap();
//! assert!(ps.contains("\n2375 4175 XY /Courier 1200 F (A)s \nep\n"));
//! assert!(ps.ends_with("%%Pages: 1\n%%EOF\n"));
//! ```

pub mod encoder;
pub mod prolog;

pub use encoder::PsEncoder;
