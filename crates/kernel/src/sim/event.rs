//! Trace Event Decoding.
//!
//! A trace line carries a tag such as `FORK`, `EXEC progA`, `CPU`, `SYSCALL 3`
//! or `END_IO 5`, plus a duration. Tags are decoded exactly once, at load time,
//! into [`EventKind`]; the dispatcher then matches exhaustively on the variant.
//!
//! Tag matching mirrors the kernel's command parser:
//! * `FORK` and `CPU` must match exactly.
//! * `EXEC`, `SYSCALL` and `END_IO` match by prefix; the remainder is the argument.
//!
//! An `EXEC` without a program name still runs, loading an empty name. Anything
//! else, or a `SYSCALL`/`END_IO` whose number cannot be read, decodes to
//! [`EventKind::Unknown`] and is ignored by the dispatcher.

use std::fmt;

const FORK: &str = "FORK";
const EXEC: &str = "EXEC";
const CPU: &str = "CPU";
const SYSCALL: &str = "SYSCALL";
const END_IO: &str = "END_IO";

/// Decoded event variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Duplicate the init PCB into a new child process.
    Fork,
    /// Load `program` into memory for the most recently forked process.
    Exec {
        /// Name looked up in the external program catalog.
        program: String,
    },
    /// User-mode CPU burst lasting the event's duration.
    Cpu,
    /// Software interrupt through vector `number`.
    Syscall {
        /// Raw interrupt number; range-checked at dispatch.
        number: i64,
    },
    /// I/O completion interrupt through vector `number`.
    EndIo {
        /// Raw interrupt number; range-checked at dispatch.
        number: i64,
    },
    /// Tag that matched no handler.
    Unknown {
        /// The tag as it appeared in the trace.
        raw: String,
    },
}

impl EventKind {
    /// Decodes a trace tag.
    pub fn decode(tag: &str) -> Self {
        let tag = tag.trim();
        if tag == FORK {
            return Self::Fork;
        }
        if let Some(rest) = tag.strip_prefix(EXEC) {
            return Self::Exec {
                program: rest.split_whitespace().next().unwrap_or_default().to_string(),
            };
        }
        if tag == CPU {
            return Self::Cpu;
        }
        if let Some(rest) = tag.strip_prefix(SYSCALL) {
            return scan_int(rest).map_or_else(
                || Self::unknown(tag),
                |(number, _)| Self::Syscall { number },
            );
        }
        if let Some(rest) = tag.strip_prefix(END_IO) {
            return scan_int(rest).map_or_else(
                || Self::unknown(tag),
                |(number, _)| Self::EndIo { number },
            );
        }
        Self::unknown(tag)
    }

    fn unknown(tag: &str) -> Self {
        Self::Unknown {
            raw: tag.to_string(),
        }
    }

    /// Short name of the variant, as used in diagnostics and statistics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fork => FORK,
            Self::Exec { .. } => EXEC,
            Self::Cpu => CPU,
            Self::Syscall { .. } => SYSCALL,
            Self::EndIo { .. } => END_IO,
            Self::Unknown { .. } => "UNKNOWN",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fork | Self::Cpu => f.write_str(self.name()),
            Self::Exec { program } => write!(f, "{EXEC} {program}"),
            Self::Syscall { number } => write!(f, "{SYSCALL} {number}"),
            Self::EndIo { number } => write!(f, "{END_IO} {number}"),
            Self::Unknown { raw } => f.write_str(raw),
        }
    }
}

/// One scripted instruction of the workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// What the kernel is asked to do.
    pub kind: EventKind,
    /// Declared duration; only `CPU` uses it.
    pub duration: u64,
}

impl TraceEvent {
    /// Creates an event from an already-decoded kind.
    pub const fn new(kind: EventKind, duration: u64) -> Self {
        Self { kind, duration }
    }

    /// Decodes `tag` and pairs it with `duration`.
    pub fn decode(tag: &str, duration: u64) -> Self {
        Self::new(EventKind::decode(tag), duration)
    }
}

/// Reads a leading signed decimal integer, skipping leading whitespace.
///
/// # Returns
///
/// The value and the number of bytes consumed, or `None` if no digits follow
/// (or the value does not fit in an `i64`).
pub(crate) fn scan_int(s: &str) -> Option<(i64, usize)> {
    let body = s.trim_start();
    let skipped = s.len() - body.len();
    let sign_len = usize::from(body.starts_with(['+', '-']));
    let digits = body[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let end = sign_len + digits;
    let value = body[..end].parse().ok()?;
    Some((value, skipped + end))
}
