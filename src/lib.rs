//! # pclps - PCL to PostScript Filter
//!
//! pclps reads a job in HP's Printer Control Language (PCL) and writes an
//! equivalent PostScript document. It provides:
//!
//! - **Decoding**: A streaming PCL escape-sequence decoder
//! - **Emulation**: The printer state PCL commands act on (cursor, margins,
//!   spacing, font, page setup)
//! - **Encoding**: A PostScript encoder that opens documents, pages and text
//!   runs lazily and emits only the directives that changed
//! - **Events**: Structured records of every command handled, for logging
//!   or tracing
//!
//! ## Quick Start
//!
//! ```
//! use pclps::{convert, events::RecordingSink, printer::JobConfig};
//!
//! // Landscape, then two lines of text
//! let pcl = b"\x1b&l1OHello\r\nWorld\x0c";
//!
//! let mut ps = Vec::new();
//! let sink = convert(&pcl[..], &mut ps, JobConfig::LETTER, RecordingSink::new())?;
//!
//! let ps = String::from_utf8(ps).unwrap();
//! assert!(ps.contains("%%PageOrientation: Landscape\n"));
//! assert!(ps.contains("(Hello)s "));
//! assert!(ps.ends_with("%%Pages: 1\n%%EOF\n"));
//! assert_eq!(sink.events[0].name, Some("orientation"));
//!
//! # Ok::<(), pclps::error::CoreError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pcl`] | Escape decoder and command table |
//! | [`dispatch`] | Command semantics |
//! | [`printer`] | Job defaults, printer state, fonts |
//! | [`postscript`] | Output encoder and document structure |
//! | [`events`] | Event sinks |
//! | [`error`] | Error types |

pub mod dispatch;
pub mod error;
pub mod events;
pub mod job;
pub mod pcl;
pub mod postscript;
pub mod printer;

// Re-exports for convenience
pub use dispatch::Dispatcher;
pub use error::CoreError;
pub use job::{convert, decode_and_emit};
pub use printer::JobConfig;
