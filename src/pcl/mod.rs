//! # PCL Input Language
//!
//! This module decodes the HP Printer Control Language byte stream.
//!
//! ## Module Structure
//!
//! - [`commands`]: Byte constants, grammar ranges and the [`Command`] value
//! - [`decoder`]: Streaming decoder, one command per call
//! - [`table`]: The set of recognized commands and their names
//!
//! ## Usage Example
//!
//! ```
//! use pclps::pcl::{Command, EscapeDecoder, Parameterized};
//!
//! let mut decoder = EscapeDecoder::new(&b"\x1b&l1OA"[..]);
//!
//! assert_eq!(
//!     decoder.next_command().unwrap(),
//!     Some(Command::ParameterizedEscape(Parameterized::new(b'&', Some(b'l'), 1000, b'O')))
//! );
//! assert_eq!(decoder.next_command().unwrap(), Some(Command::Printable(b'A')));
//! assert_eq!(decoder.next_command().unwrap(), None);
//! ```

pub mod commands;
pub mod decoder;
pub mod table;

pub use commands::{Command, Parameterized};
pub use decoder::{EscapeDecoder, MalformedEscape};
pub use table::CommandId;
