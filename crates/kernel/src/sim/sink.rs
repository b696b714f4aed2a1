//! Output sinks for the execution log and status snapshots.
//!
//! The simulator never touches files directly. It writes through two traits:
//! 1. **[`LogSink`]:** One `"<time>, <duration>, <message>"` line per emitted step.
//! 2. **[`SnapshotSink`]:** One pre-formatted table block per processed event.
//!
//! Both streams are append-only for the whole run.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Destination for execution log lines.
pub trait LogSink {
    /// Appends one step, in emission order.
    fn append(&mut self, time: u64, duration: u64, message: &str) -> io::Result<()>;
}

/// Destination for status snapshots.
pub trait SnapshotSink {
    /// Appends one formatted block; previous content is never revisited.
    fn append(&mut self, block: &str) -> io::Result<()>;
}

/// Log sink over any writer (usually a buffered output file).
#[derive(Debug)]
pub struct WriterLog<W: Write> {
    writer: W,
}

impl<W: Write> WriterLog<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes buffered lines to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterLog<W> {
    fn append(&mut self, time: u64, duration: u64, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{time}, {duration}, {message}")
    }
}

/// One captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Clock value when the step started.
    pub time: u64,
    /// Logged duration of the step.
    pub duration: u64,
    /// Step description.
    pub message: String,
}

/// In-memory log sink.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    lines: Vec<LogLine>,
}

impl MemoryLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Captured lines in emission order.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// The log exactly as [`WriterLog`] would have written it.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}, {}, {}\n", l.time, l.duration, l.message))
            .collect()
    }
}

impl LogSink for MemoryLog {
    fn append(&mut self, time: u64, duration: u64, message: &str) -> io::Result<()> {
        self.lines.push(LogLine {
            time,
            duration,
            message: message.to_string(),
        });
        Ok(())
    }
}

/// Snapshot sink that reopens its file in append mode for every block.
#[derive(Debug, Clone)]
pub struct AppendFileSnapshot {
    path: PathBuf,
}

impl AppendFileSnapshot {
    /// Appends to `path`, keeping whatever it already contains.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Truncates (or creates) `path`, then appends to it.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        drop(File::create(&path)?);
        Ok(Self { path })
    }

    /// File the snapshots are appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for AppendFileSnapshot {
    fn append(&mut self, block: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())
    }
}

/// In-memory snapshot sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    blocks: Vec<String>,
}

impl MemorySnapshot {
    /// Creates an empty history.
    pub const fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Captured blocks in order.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// All blocks concatenated, as a file sink would hold them.
    pub fn contents(&self) -> String {
        self.blocks.concat()
    }
}

impl SnapshotSink for MemorySnapshot {
    fn append(&mut self, block: &str) -> io::Result<()> {
        self.blocks.push(block.to_string());
        Ok(())
    }
}
