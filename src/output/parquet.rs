use anyhow::{Context, Result};
use arrow::{array::ArrayRef, datatypes::Schema as ArrowSchema, record_batch::RecordBatch};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, path::Path, sync::Arc};

/// A row type that can be laid out as Arrow columns.
pub trait ArrowRow: Sized {
    /// Arrow schema, in output column order.
    fn schema() -> ArrowSchema;
    /// One array per schema field, each `rows.len()` long.
    fn to_arrays(rows: &[Self]) -> Vec<ArrayRef>;
}

/// Build a single record batch holding every row.
pub fn to_batch<R: ArrowRow>(rows: &[R]) -> Result<RecordBatch> {
    RecordBatch::try_new(Arc::new(R::schema()), R::to_arrays(rows))
        .context("building record batch")
}

/// Write `rows` to `path` as a Snappy-compressed Parquet file.
pub fn write_parquet<R: ArrowRow>(rows: &[R], path: &Path) -> Result<()> {
    let batch = to_batch(rows)?;
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .with_context(|| format!("creating Arrow writer for {:?}", path))?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}
