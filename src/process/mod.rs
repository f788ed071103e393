// src/process/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIter};

use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use tracing::debug;
use zip::ZipArchive;

pub mod date_parser;
pub mod split;
pub mod utils;

/// Column names from the header row of one CSV entry.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    /// Build the lookup. When a name repeats, the first column keeps it.
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// One data row of an entry, addressed by column name.
#[derive(Debug, Clone)]
pub struct RawRecord<'c> {
    columns: &'c Columns,
    values: StringRecord,
}

impl<'c> RawRecord<'c> {
    pub fn new(columns: &'c Columns, values: StringRecord) -> Self {
        Self { columns, values }
    }

    /// Value of `name`, or `None` when the column is missing or the field is empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.columns.position(name)?;
        self.values.get(idx).filter(|v| !v.is_empty())
    }

    /// Value of `name` as owned text; absent values become "".
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }
}

/// A ZIP container of CSV entries, opened for reading in place.
pub struct Archive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl Archive {
    /// Open `zip_path` and read its central directory.
    pub fn open<P: AsRef<Path>>(zip_path: P) -> Result<Self> {
        let path = zip_path.as_ref().to_path_buf();
        let file =
            File::open(&path).with_context(|| format!("Failed to open ZIP file: {:?}", path))?;
        let zip = ZipArchive::new(file)
            .with_context(|| format!("Failed to read ZIP archive: {:?}", path))?;
        Ok(Self { path, zip })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the central directory, CSV or not.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open entry `index` as a CSV source and read its header row.
    ///
    /// Returns `Ok(None)` for directories and non-CSV files. The entry is
    /// decompressed as it is read; nothing is written to disk.
    pub fn entry(&mut self, index: usize) -> Result<Option<Entry<'_>>> {
        let path = &self.path;
        let file = self
            .zip
            .by_index(index)
            .with_context(|| format!("Failed to access ZIP entry #{} in {:?}", index, path))?;
        let name = file.name().to_string();

        if !file.is_file() || !name.to_lowercase().ends_with(".csv") {
            debug!(entry = %name, "skipping non-CSV entry");
            return Ok(None);
        }

        let source: Box<dyn Read + '_> = Box::new(file);
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row of {}", name))?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Some(Entry {
            name,
            columns: Columns::new(headers),
            reader,
        }))
    }
}

/// One CSV file inside an [`Archive`].
pub struct Entry<'a> {
    name: String,
    columns: Columns,
    reader: csv::Reader<Box<dyn Read + 'a>>,
}

impl<'a> Entry<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Lazily parse the remaining data rows.
    pub fn records(&mut self) -> Records<'_, 'a> {
        Records {
            name: &self.name,
            columns: &self.columns,
            rows: self.reader.records(),
            line: 1,
        }
    }
}

/// Iterator over the data rows of an [`Entry`].
pub struct Records<'e, 'a> {
    name: &'e str,
    columns: &'e Columns,
    rows: StringRecordsIter<'e, Box<dyn Read + 'a>>,
    line: usize,
}

impl<'e, 'a> Iterator for Records<'e, 'a> {
    type Item = Result<RawRecord<'e>>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.line += 1;
        let line = self.line;
        let name = self.name;
        let columns = self.columns;
        Some(
            row.with_context(|| format!("CSV parse error in {} at record {}", name, line))
                .map(|values| RawRecord::new(columns, values)),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::{Cursor, Write};
    use std::path::Path;
    use tempfile::TempDir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    use zip::write::SimpleFileOptions;
    use zip::CompressionMethod;

    pub(crate) fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,campaign_split=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Write a ZIP holding `(entry name, contents)` pairs into `dir`.
    pub(crate) fn write_zip(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> Result<PathBuf> {
        let raw: Vec<(&str, &[u8])> = entries
            .iter()
            .map(|(name, content)| (*name, content.as_bytes()))
            .collect();
        write_zip_bytes(dir, file_name, &raw)
    }

    /// Like [`write_zip`], for entry contents that are not valid UTF-8.
    pub(crate) fn write_zip_bytes(
        dir: &Path,
        file_name: &str,
        entries: &[(&str, &[u8])],
    ) -> Result<PathBuf> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            for (name, content) in entries {
                zip.start_file(*name, options)?;
                zip.write_all(content)?;
            }
            zip.finish()?;
        }
        let path = dir.join(file_name);
        std::fs::write(&path, &buf)?;
        Ok(path)
    }

    #[test]
    fn reads_header_and_rows_lazily() -> Result<()> {
        init_test_logging();
        let dir = TempDir::new()?;
        let zip_path = write_zip(
            dir.path(),
            "bank.csv.zip",
            &[("bank.csv", "client_id,age,job\n1,35,admin.\n2,41,\n")],
        )?;

        let mut archive = Archive::open(&zip_path)?;
        assert_eq!(archive.len(), 1);
        let mut entry = archive.entry(0)?.expect("csv entry");
        assert_eq!(entry.name(), "bank.csv");
        assert_eq!(entry.columns().names(), ["client_id", "age", "job"]);

        let rows: Vec<(String, Option<String>)> = entry
            .records()
            .map(|r| r.map(|rec| (rec.text("client_id"), rec.get("job").map(str::to_string))))
            .collect::<Result<_>>()?;
        assert_eq!(
            rows,
            vec![
                ("1".to_string(), Some("admin.".to_string())),
                ("2".to_string(), None),
            ]
        );
        Ok(())
    }

    #[test]
    fn skips_directories_and_other_files() -> Result<()> {
        let dir = TempDir::new()?;
        let zip_path = write_zip(
            dir.path(),
            "mixed.zip",
            &[("README.txt", "hello"), ("DATA.CSV", "client_id\n7\n")],
        )?;

        let mut archive = Archive::open(&zip_path)?;
        assert!(archive.entry(0)?.is_none());
        let entry = archive.entry(1)?.expect("upper-case .CSV is still csv");
        assert!(entry.columns().contains("client_id"));
        Ok(())
    }

    #[test]
    fn ragged_row_is_an_entry_error() -> Result<()> {
        let dir = TempDir::new()?;
        let zip_path = write_zip(dir.path(), "bad.zip", &[("bad.csv", "a,b\n1,2\n3\n")])?;

        let mut archive = Archive::open(&zip_path)?;
        let mut entry = archive.entry(0)?.expect("csv entry");
        let results: Vec<_> = entry.records().collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(format!("{:#}", err).contains("bad.csv at record 3"));
        Ok(())
    }

    #[test]
    fn open_fails_on_garbage() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("junk.zip");
        std::fs::write(&path, b"not a zip at all")?;
        let err = Archive::open(&path).err().expect("garbage should not open");
        assert!(err.to_string().contains("Failed to read ZIP archive"));
        Ok(())
    }

    #[test]
    fn duplicate_header_keeps_first_column() {
        let columns = Columns::new(vec!["x".into(), "y".into(), "x".into()]);
        let rec = RawRecord::new(&columns, StringRecord::from(vec!["1", "2", "3"]));
        assert_eq!(rec.get("x"), Some("1"));
        assert_eq!(rec.get("missing"), None);
        assert_eq!(rec.text("missing"), "");
    }
}
