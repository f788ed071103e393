use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

use super::{parquet::write_parquet, parquet::ArrowRow, OutputFormat, Tables};
use crate::config::TableNames;
use crate::schema::SchemaKind;

/// Publish every non-empty table into `out_dir` and return the final paths.
///
/// Each table is first written to a hidden `.<name>.tmp` file next to its
/// destination; only when all of them succeeded are they renamed over the
/// destinations. If any table fails, the staged files are removed and nothing
/// new appears in `out_dir`.
#[instrument(level = "info", skip(tables, out_dir, names), fields(out_dir = %out_dir.display()))]
pub fn write_tables(
    tables: &Tables,
    out_dir: &Path,
    names: &TableNames,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();

    let result = stage(&tables.client, SchemaKind::Client, out_dir, names, format, &mut staged)
        .and_then(|_| {
            stage(&tables.campaign, SchemaKind::Campaign, out_dir, names, format, &mut staged)
        })
        .and_then(|_| {
            stage(&tables.economics, SchemaKind::Economics, out_dir, names, format, &mut staged)
        });
    if let Err(err) = result {
        discard(&staged);
        return Err(err);
    }

    let mut written = Vec::with_capacity(staged.len());
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(err).with_context(|| format!("renaming {:?} -> {:?}", tmp, path));
        }
        info!(path = %path.display(), "wrote table");
        written.push(path.clone());
    }
    Ok(written)
}

/// Write one table to its temp path, recording it in `staged` before the first byte.
fn stage<R: Serialize + ArrowRow>(
    rows: &[R],
    kind: SchemaKind,
    out_dir: &Path,
    names: &TableNames,
    format: OutputFormat,
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<()> {
    if rows.is_empty() {
        debug!(table = %kind, "no rows, not written");
        return Ok(());
    }

    let file_name = format!("{}.{}", names.get(kind), format.extension());
    let path = out_dir.join(&file_name);
    let tmp = out_dir.join(format!(".{}.tmp", file_name));
    staged.push((tmp.clone(), path));

    let written = match format {
        OutputFormat::Csv => write_csv(rows, &tmp),
        OutputFormat::Parquet => write_parquet(rows, &tmp),
    };
    written.with_context(|| format!("writing {} table ({} rows)", kind, rows.len()))
}

/// Header row from the record's field names, then one line per row.
/// `None` fields come out empty.
pub fn write_csv<R: Serialize>(rows: &[R], path: &Path) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("creating {:?}", path))?;
    for (idx, row) in rows.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("serializing row {} into {:?}", idx, path))?;
    }
    wtr.flush().with_context(|| format!("flushing {:?}", path))?;
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove {:?}: {}", tmp, e);
            }
        }
    }
}
