// src/process/split.rs
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::error::is_clean_error;
use crate::output::Tables;
use crate::process::{Archive, Entry};
use crate::schema::classify;

/// What happened to the entries of one archive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// CSV entries whose rows were kept.
    pub entries: usize,
    /// CSV entries dropped because they could not be read.
    pub skipped_entries: usize,
    /// Data rows read from kept entries.
    pub rows: u64,
}

/// Stream every CSV entry of `zip_path` through the classifier and the
/// normalizers, appending the cleaned rows to `tables`.
///
/// An entry is all-or-nothing: its rows are staged and only appended once the
/// whole entry has been read. An entry that cannot be read (bad compression,
/// broken CSV framing, ragged rows) is logged and skipped. A field that cannot
/// be cleaned aborts the archive with the error, as does an archive that
/// cannot be opened.
#[instrument(level = "info", skip(zip_path, tables), fields(zip = %zip_path.as_ref().display()))]
pub fn split_zip_into_tables<P: AsRef<Path>>(zip_path: P, tables: &mut Tables) -> Result<ArchiveStats> {
    let start = Instant::now();
    let mut archive = Archive::open(&zip_path)?;
    let mut stats = ArchiveStats::default();

    for i in 0..archive.len() {
        let mut entry = match archive.entry(i) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(e) => {
                warn!("skipping entry #{}: {:#}", i, e);
                stats.skipped_entries += 1;
                continue;
            }
        };
        let name = entry.name().to_string();

        match split_entry(&mut entry) {
            Ok((staged, rows)) => {
                tables.extend(staged);
                stats.entries += 1;
                stats.rows += rows;
            }
            Err(e) if is_clean_error(&e) => {
                return Err(e)
                    .with_context(|| format!("cleaning {} in {:?}", name, zip_path.as_ref()));
            }
            Err(e) => {
                warn!(entry = %name, "skipping unreadable entry: {:#}", e);
                stats.skipped_entries += 1;
            }
        }
    }

    info!(
        entries = stats.entries,
        skipped = stats.skipped_entries,
        rows = stats.rows,
        "completed in {:?}",
        start.elapsed()
    );
    Ok(stats)
}

/// Clean one entry into fresh tables. Returns them with the number of rows read.
fn split_entry(entry: &mut Entry<'_>) -> Result<(Tables, u64)> {
    let schemas = classify(entry.columns().names());
    info!(
        entry = %entry.name(),
        columns = ?entry.columns().names(),
        schemas = ?schemas,
        "processing entry"
    );

    let mut staged = Tables::default();
    let mut rows = 0u64;
    for record in entry.records() {
        let record = record?;
        rows += 1;
        for kind in &schemas {
            let row = kind
                .normalize(&record)
                .with_context(|| format!("{} table, record {}", kind, rows))?;
            staged.append(row);
        }
    }
    Ok((staged, rows))
}
