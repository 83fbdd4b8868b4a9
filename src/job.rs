//! # Conversion Jobs
//!
//! One job reads a whole PCL stream and writes one PostScript document.
//! The decoder, printer state and encoder belong to the job alone; nothing
//! is shared between jobs.

use std::io::{BufReader, Read, Write};

use log::debug;

use crate::dispatch::Dispatcher;
use crate::error::CoreError;
use crate::events::{EventSink, LogSink};
use crate::pcl::EscapeDecoder;
use crate::printer::JobConfig;

/// Convert `input` to PostScript on `output` with the default job
/// configuration, reporting dispatch events to the `log` facade.
///
/// ```
/// let mut ps = Vec::new();
/// pclps::decode_and_emit(&b"Hi\x0c"[..], &mut ps).unwrap();
///
/// let ps = String::from_utf8(ps).unwrap();
/// assert!(ps.starts_with("%!PS-Adobe-3.0\n"));
/// assert!(ps.contains("(Hi)s "));
/// ```
pub fn decode_and_emit<R: Read, W: Write>(input: R, output: W) -> Result<(), CoreError> {
    convert(input, output, JobConfig::default(), LogSink).map(|_| ())
}

/// Convert `input` to PostScript on `output`, returning the sink once the
/// document is closed.
///
/// A fatal error stops the job where it happened: the document is not
/// finished and no trailer is written.
pub fn convert<R, W, S>(input: R, output: W, config: JobConfig, sink: S) -> Result<S, CoreError>
where
    R: Read,
    W: Write,
    S: EventSink,
{
    debug!("starting {} job", config.name);
    let mut decoder = EscapeDecoder::new(BufReader::new(input));
    let mut dispatcher = Dispatcher::with_sink(output, config, sink);

    while let Some(command) = decoder.next_command()? {
        for escape in decoder.take_malformed() {
            dispatcher.report_malformed(&escape);
        }
        dispatcher.dispatch(command)?;
    }
    for escape in decoder.take_malformed() {
        dispatcher.report_malformed(&escape);
    }

    let pages = dispatcher.encoder().pages();
    let (_, sink) = dispatcher.finish()?;
    debug!("job finished, {} page(s)", pages);
    Ok(sink)
}
