//! # Escape Decoder
//!
//! Turns a PCL byte stream into a sequence of [`Command`] values, one per
//! call to [`EscapeDecoder::next_command`].
//!
//! ## Grammar
//!
//! ```text
//! byte == ESC  ──► next in '!'..='/' ? parameterized : simple escape
//! byte <= ' '  ──► control code
//! otherwise    ──► printable
//!
//! parameterized = class [group] item { item }
//! item          = [+|-] digits [ '.' digits ] param
//! ```
//!
//! A lowercase `param` ends one item and continues the chain with the same
//! class and group; an uppercase one ends the escape. Any other byte where a
//! `param` is expected abandons the rest of the escape: nothing more is
//! produced for it and decoding resumes at the following byte.
//!
//! Running out of input in the middle of an escape is fatal
//! ([`CoreError::UnexpectedEndOfInput`]); running out between commands is
//! the normal end of the stream.

use log::warn;
use serde::Serialize;
use std::io::{self, Read};

use super::commands::{
    CASE_OFFSET, COMBINED_PARAM, Command, ESC, FINAL_PARAM, GROUP_CHAR, PARAMETERIZED_CLASS,
    Parameterized, SP,
};
use crate::error::CoreError;

/// Number of fraction digits a value keeps.
const FRACTION_DIGITS: u32 = 3;

/// Upper bound on the up-front allocation for a binary payload.
const PAYLOAD_PREALLOC: usize = 64 * 1024;

/// A parameterized escape abandoned because of a bad terminator byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MalformedEscape {
    pub class: u8,
    pub group: Option<u8>,
    /// The byte found where a parameter character was expected
    pub terminator: u8,
}

/// Class and group shared by the remaining items of a combined escape.
#[derive(Debug, Clone, Copy)]
struct Prefix {
    class: u8,
    group: Option<u8>,
}

/// Streaming PCL decoder.
///
/// Wrap unbuffered sources (files, stdin) in a `BufReader`; the decoder reads
/// one byte at a time.
pub struct EscapeDecoder<R> {
    bytes: io::Bytes<R>,
    /// Pending combined-command prefix after a lowercase terminator
    chain: Option<Prefix>,
    malformed: Vec<MalformedEscape>,
}

impl<R: Read> EscapeDecoder<R> {
    pub fn new(input: R) -> Self {
        Self {
            bytes: input.bytes(),
            chain: None,
            malformed: Vec::new(),
        }
    }

    /// Decode the next command.
    ///
    /// Returns `Ok(None)` at the end of the stream.
    pub fn next_command(&mut self) -> Result<Option<Command>, CoreError> {
        loop {
            if let Some(prefix) = self.chain.take() {
                let first = self.must_read()?;
                match self.parameterized(prefix, first)? {
                    Some(command) => return Ok(Some(command)),
                    None => continue,
                }
            }

            let Some(byte) = self.read()? else {
                return Ok(None);
            };

            match byte {
                ESC => {
                    let next = self.must_read()?;
                    if !PARAMETERIZED_CLASS.contains(&next) {
                        return Ok(Some(Command::SimpleEscape(next)));
                    }

                    // Some parameterized escapes have no group character, in
                    // which case this byte already belongs to the value.
                    let c = self.must_read()?;
                    let (group, first) = if GROUP_CHAR.contains(&c) {
                        (Some(c), self.must_read()?)
                    } else {
                        (None, c)
                    };

                    let prefix = Prefix { class: next, group };
                    if let Some(command) = self.parameterized(prefix, first)? {
                        return Ok(Some(command));
                    }
                }
                b if b <= SP => return Ok(Some(Command::Control(b))),
                b => return Ok(Some(Command::Printable(b))),
            }
        }
    }

    /// Escapes abandoned since the last call, oldest first.
    pub fn take_malformed(&mut self) -> Vec<MalformedEscape> {
        std::mem::take(&mut self.malformed)
    }

    /// Decode one item of a parameterized escape starting at byte `c`.
    ///
    /// Returns `None` when the item is misterminated.
    fn parameterized(&mut self, prefix: Prefix, mut c: u8) -> Result<Option<Command>, CoreError> {
        let mut relative = false;
        let mut negative = false;
        if c == b'+' || c == b'-' {
            relative = true;
            negative = c == b'-';
            c = self.must_read()?;
        }

        let mut value: i64 = 0;
        while c.is_ascii_digit() {
            value = push_digit(value, c);
            c = self.must_read()?;
        }

        let mut fraction = 0;
        if c == b'.' {
            c = self.must_read()?;
            while fraction < FRACTION_DIGITS && c.is_ascii_digit() {
                value = push_digit(value, c);
                fraction += 1;
                c = self.must_read()?;
            }
            // Digits past the third are dropped, not rounded.
            while c.is_ascii_digit() {
                c = self.must_read()?;
            }
        }
        value = value.saturating_mul(10_i64.pow(FRACTION_DIGITS - fraction));

        let param = if FINAL_PARAM.contains(&c) {
            c
        } else if COMBINED_PARAM.contains(&c) {
            self.chain = Some(prefix);
            c - CASE_OFFSET
        } else {
            warn!(
                "parameterized ESC {} misterminated by byte {:#04x}",
                prefix.class as char, c
            );
            self.malformed.push(MalformedEscape {
                class: prefix.class,
                group: prefix.group,
                terminator: c,
            });
            return Ok(None);
        };

        let value = if negative { -value } else { value };
        let data = if carries_payload(prefix.class, prefix.group, param) {
            self.read_payload(value / 1000)?
        } else {
            Vec::new()
        };

        Ok(Some(Command::ParameterizedEscape(Parameterized {
            class: prefix.class,
            group: prefix.group,
            value,
            param,
            relative,
            data,
        })))
    }

    fn read_payload(&mut self, count: i64) -> Result<Vec<u8>, CoreError> {
        let count = usize::try_from(count).unwrap_or(0);
        let mut data = Vec::with_capacity(count.min(PAYLOAD_PREALLOC));
        for _ in 0..count {
            data.push(self.must_read()?);
        }
        Ok(data)
    }

    fn read(&mut self) -> Result<Option<u8>, CoreError> {
        Ok(self.bytes.next().transpose()?)
    }

    /// Read a byte that the grammar requires.
    fn must_read(&mut self) -> Result<u8, CoreError> {
        self.read()?.ok_or(CoreError::UnexpectedEndOfInput)
    }
}

impl<R: Read> Iterator for EscapeDecoder<R> {
    type Item = Result<Command, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_command().transpose()
    }
}

#[inline]
fn push_digit(value: i64, digit: u8) -> i64 {
    value
        .saturating_mul(10)
        .saturating_add(i64::from(digit - b'0'))
}

/// Whether a command is followed by `value` bytes of binary data.
pub fn carries_payload(class: u8, group: Option<u8>, param: u8) -> bool {
    matches!(
        (class, group, param),
        (b'*', Some(b'b'), b'W')
            | (b'*', Some(b'v'), b'W')
            | (b'(', Some(b's'), b'W')
            | (b')', Some(b's'), b'W')
            | (b'(', Some(b'f'), b'W')
            | (b'&', Some(b'p'), b'X')
    )
}
