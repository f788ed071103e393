// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::output::OutputFormat;
use crate::schema::SchemaKind;

/// Where to read archives, where to publish tables, and in what format.
///
/// Every key is optional in the YAML form:
///
/// ```yaml
/// input_dir: files/input
/// output_dir: files/output
/// format: csv        # or parquet
/// table_names:
///   client: client
///   campaign: campaign
///   economics: economics
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub table_names: TableNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("files/input"),
            output_dir: PathBuf::from("files/output"),
            format: OutputFormat::Csv,
            table_names: TableNames::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // an empty document means "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("parsing YAML config")
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("loading config {:?}", path))
    }
}

/// File stems of the three tables; the extension comes from the format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableNames {
    pub client: String,
    pub campaign: String,
    pub economics: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            client: SchemaKind::Client.as_str().to_string(),
            campaign: SchemaKind::Campaign.as_str().to_string(),
            economics: SchemaKind::Economics.as_str().to_string(),
        }
    }
}

impl TableNames {
    pub fn get(&self, kind: SchemaKind) -> &str {
        match kind {
            SchemaKind::Client => &self.client,
            SchemaKind::Campaign => &self.campaign,
            SchemaKind::Economics => &self.economics,
        }
    }
}
