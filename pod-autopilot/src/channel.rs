//! Line-oriented request/response channel over any reader/writer pair.

use anyhow::{Context, Result};
use pod_core::protocol::{parse_checkpoint, parse_count, parse_snapshot};
use pod_core::{Command, Course, ProtocolError, RaceChannel, Snapshot};
use std::io::{BufRead, Write};

#[derive(Clone, Debug)]
pub struct RaceSetup {
    pub course: Course,
    pub initial: Snapshot,
}

pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
    line_no: usize,
    course: Option<Course>,
    buf: String,
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line_no: 0,
            course: None,
            buf: String::new(),
        }
    }

    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Next non-blank line, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .with_context(|| format!("failed reading input line {}", self.line_no + 1))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = self.buf.trim();
            if !line.is_empty() {
                return Ok(Some((self.line_no, line.to_string())));
            }
        }
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<(usize, String)> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(ProtocolError::UnexpectedEof {
                line: self.line_no + 1,
                expected,
            }
            .into()),
        }
    }

    /// Reads the course and the setup snapshot that seeds the vehicles.
    pub fn read_setup(&mut self) -> Result<RaceSetup> {
        let (line_no, line) = self.expect_line("lap count")?;
        let laps = parse_count(&line, line_no)?;
        let (line_no, line) = self.expect_line("checkpoint count")?;
        let count = parse_count(&line, line_no)?;

        // The count is untrusted until that many lines actually arrive.
        let mut checkpoints = Vec::new();
        for _ in 0..count {
            let (line_no, line) = self.expect_line("checkpoint")?;
            checkpoints.push(parse_checkpoint(&line, line_no)?);
        }
        let course = Course::new(laps, checkpoints)?;

        let mut vehicle_lines = Vec::with_capacity(4);
        for _ in 0..4 {
            vehicle_lines.push(self.expect_line("vehicle state")?);
        }
        let initial = parse_snapshot(
            vehicle_lines.iter().map(|(no, line)| (*no, line.as_str())),
            &course,
        )?;

        tracing::debug!(laps, checkpoints = course.len(), "setup read");
        self.course = Some(course.clone());
        Ok(RaceSetup { course, initial })
    }
}

impl<R: BufRead, W: Write> RaceChannel for LineChannel<R, W> {
    type Error = anyhow::Error;

    fn next_turn_state(&mut self) -> Result<Option<Snapshot>> {
        let Some(first) = self.next_line()? else {
            return Ok(None);
        };
        let mut lines = vec![first];
        while lines.len() < 4 {
            match self.next_line()? {
                Some(line) => lines.push(line),
                None => {
                    return Err(ProtocolError::TruncatedTurn {
                        received: lines.len(),
                    }
                    .into())
                }
            }
        }
        let course = self
            .course
            .as_ref()
            .context("turn input requested before race setup")?;
        let snapshot = parse_snapshot(lines.iter().map(|(no, line)| (*no, line.as_str())), course)?;
        Ok(Some(snapshot))
    }

    fn emit(&mut self, commands: &[Command; 2]) -> Result<()> {
        for command in commands {
            writeln!(self.writer, "{command}").context("failed writing command")?;
        }
        self.writer.flush().context("failed flushing commands")
    }
}
