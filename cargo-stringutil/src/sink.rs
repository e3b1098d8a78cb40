//! Diagnostic output for the CLI.

use std::io::{self, Write};

use static_string_util::{Diagnostic, DiagnosticSink};

/// Writes each diagnostic as an `error:` line and counts them.
#[derive(Debug)]
pub struct StreamSink<W> {
    writer: W,
    reported: usize,
}

impl StreamSink<io::Stderr> {
    /// Sink writing to the process's standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> StreamSink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            reported: 0,
        }
    }

    /// Number of diagnostics reported so far.
    #[must_use]
    pub const fn reported(&self) -> usize {
        self.reported
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for StreamSink<W> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.reported += 1;
        if let Err(err) = writeln!(self.writer, "error: {diagnostic}") {
            tracing::warn!(error = %err, "failed to write diagnostic");
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the stream sink.

    use super::*;
    use anyhow::Result;
    use rstest::rstest;

    #[rstest]
    fn writes_one_line_per_diagnostic() -> Result<()> {
        let mut sink = StreamSink::new(Vec::new());
        sink.report(&Diagnostic::generation_failed("the package of Loose has no name"));
        sink.report(&Diagnostic::generation_failed("disk full"));
        assert_eq!(sink.reported(), 2);
        let written = String::from_utf8(sink.into_inner())?;
        assert_eq!(
            written,
            "error: Couldn't generate class: the package of Loose has no name\n\
             error: Couldn't generate class: disk full\n"
        );
        Ok(())
    }
}
