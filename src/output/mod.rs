//! In-memory accumulation of cleaned rows and their publication to disk.

use clap::ValueEnum;
use serde::Deserialize;

use crate::schema::{CampaignRecord, ClientRecord, EconomicsRecord, Row, SchemaKind};

pub mod parquet;
pub mod write;

pub use write::write_tables;

/// File format of the published tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

/// The three output tables, in processing order. Rows are never deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tables {
    pub client: Vec<ClientRecord>,
    pub campaign: Vec<CampaignRecord>,
    pub economics: Vec<EconomicsRecord>,
}

impl Tables {
    /// Append `row` to the table its variant names.
    pub fn append(&mut self, row: Row) {
        match row {
            Row::Client(r) => self.client.push(r),
            Row::Campaign(r) => self.campaign.push(r),
            Row::Economics(r) => self.economics.push(r),
        }
    }

    /// Move every row of `other` onto the end of these tables.
    pub fn extend(&mut self, other: Tables) {
        self.client.extend(other.client);
        self.campaign.extend(other.campaign);
        self.economics.extend(other.economics);
    }

    pub fn len(&self, kind: SchemaKind) -> usize {
        match kind {
            SchemaKind::Client => self.client.len(),
            SchemaKind::Campaign => self.campaign.len(),
            SchemaKind::Economics => self.economics.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        SchemaKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }
}
