//! External program catalog.
//!
//! Lists the programs `EXEC` can load and their sizes. Built once from the
//! external-files input and read-only afterwards.

use tracing::warn;

/// A loadable program and its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFileRecord {
    /// Program name as referenced by `EXEC`.
    pub name: String,
    /// Image size in Mb.
    pub size: u32,
}

impl ExternalFileRecord {
    /// Creates a record.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Name-to-size lookup table for loadable programs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramCatalog {
    records: Vec<ExternalFileRecord>,
}

impl ProgramCatalog {
    /// Builds a catalog; names must be unique, so later duplicates are dropped.
    pub fn from_records(records: impl IntoIterator<Item = ExternalFileRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            if catalog.size_of(&record.name).is_some() {
                warn!(program = %record.name, "duplicate external file entry ignored");
                continue;
            }
            catalog.records.push(record);
        }
        catalog
    }

    /// Size of `name` in Mb, if the program is listed.
    pub fn size_of(&self, name: &str) -> Option<u32> {
        self.records.iter().find(|r| r.name == name).map(|r| r.size)
    }

    /// Listed programs in input order.
    pub fn records(&self) -> &[ExternalFileRecord] {
        &self.records
    }

    /// Number of listed programs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no program is listed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
