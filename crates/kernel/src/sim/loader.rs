//! Trace and External File Loading.
//!
//! This module turns the two text inputs into records. It performs:
//! 1. **Scanning:** Reads `<text>, <integer>` records, skipping surrounding whitespace.
//! 2. **Decoding:** Trace tags become [`TraceEvent`]s; program lines become [`ExternalFileRecord`]s.
//! 3. **Bounding:** Stops at the configured cap and reports `CapacityExceeded`.
//!
//! Scanning stops at the first record that does not have the `<text>, <integer>`
//! shape, or whose integer is negative. Everything read up to that point is kept.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::{Bounded, SimError};

use super::catalog::{ExternalFileRecord, ProgramCatalog};
use super::event::{TraceEvent, scan_int};

/// Records read from one input, plus the overflow diagnostic if it was cut short.
#[derive(Debug)]
pub struct Loaded<T> {
    /// Records in input order.
    pub records: Vec<T>,
    /// `CapacityExceeded` when more records were present than the cap allows.
    pub overflow: Option<SimError>,
}

impl<T> Loaded<T> {
    /// Returns `true` if records were dropped.
    pub const fn is_truncated(&self) -> bool {
        self.overflow.is_some()
    }
}

/// Iterator over `<text>, <integer>` records.
struct Records<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Records<'a> {
    type Item = (&'a str, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let Some(comma) = rest.find(',') else {
            debug!(
                record = rest.lines().next().unwrap_or_default(),
                "record without a comma; stopping"
            );
            self.rest = "";
            return None;
        };
        let label = rest[..comma].trim_end();
        let after = &rest[comma + 1..];
        let parsed =
            scan_int(after).and_then(|(v, used)| u64::try_from(v).ok().map(|v| (v, used)));
        let Some((value, used)) = parsed.filter(|_| !label.is_empty()) else {
            debug!(record = label, "malformed record; stopping");
            self.rest = "";
            return None;
        };
        self.rest = &after[used..];
        Some((label, value))
    }
}

fn records(text: &str) -> Records<'_> {
    Records { rest: text }
}

fn collect_bounded<T>(
    items: impl Iterator<Item = T>,
    what: &'static str,
    limit: usize,
) -> Loaded<T> {
    let mut bounded = Bounded::new(what, limit);
    let mut overflow = None;
    for item in items {
        if let Err(e) = bounded.push(item) {
            warn!("{e}");
            overflow = Some(e);
            break;
        }
    }
    Loaded {
        records: bounded.into_vec(),
        overflow,
    }
}

/// Parses trace text (`<tag>, <duration>` per record).
pub fn parse_trace(text: &str, limit: usize) -> Loaded<TraceEvent> {
    collect_bounded(
        records(text).map(|(tag, duration)| TraceEvent::decode(tag, duration)),
        "trace event",
        limit,
    )
}

/// Parses external-files text (`<name>, <size>` per record).
///
/// Sizes that do not fit in `u32` end the scan like any malformed record.
pub fn parse_external_files(text: &str, limit: usize) -> Loaded<ExternalFileRecord> {
    collect_bounded(
        records(text).map_while(|(name, size)| {
            u32::try_from(size)
                .ok()
                .map(|size| ExternalFileRecord::new(name, size))
        }),
        "external file",
        limit,
    )
}

fn read_input(path: &Path, what: &'static str) -> Result<String, SimError> {
    fs::read_to_string(path).map_err(|source| SimError::ResourceUnavailable {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// `ResourceUnavailable` if the file cannot be read.
pub fn read_trace(path: &Path, limit: usize) -> Result<Loaded<TraceEvent>, SimError> {
    Ok(parse_trace(&read_input(path, "trace file")?, limit))
}

/// Reads an external-files list and builds the program catalog.
///
/// # Errors
///
/// `ResourceUnavailable` if the file cannot be read.
pub fn read_catalog(path: &Path, limit: usize) -> Result<ProgramCatalog, SimError> {
    let loaded = parse_external_files(&read_input(path, "external files list")?, limit);
    Ok(ProgramCatalog::from_records(loaded.records))
}
