//! The three fixed output schemas and the classifier that decides which of
//! them an entry can feed.

use std::{collections::HashSet, fmt};

use crate::error::CleanError;
use crate::process::RawRecord;

pub mod campaign;
pub mod client;
pub mod economics;

pub use campaign::CampaignRecord;
pub use client::ClientRecord;
pub use economics::EconomicsRecord;

/// One of the output tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    Client,
    Campaign,
    Economics,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [SchemaKind::Client, SchemaKind::Campaign, SchemaKind::Economics];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Client => "client",
            SchemaKind::Campaign => "campaign",
            SchemaKind::Economics => "economics",
        }
    }

    /// Input columns an entry must carry to feed this table.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SchemaKind::Client => &client::REQUIRED_FIELDS,
            SchemaKind::Campaign => &campaign::REQUIRED_FIELDS,
            SchemaKind::Economics => &economics::REQUIRED_FIELDS,
        }
    }

    /// Output header, in file order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SchemaKind::Client => &client::COLUMNS,
            SchemaKind::Campaign => &campaign::COLUMNS,
            SchemaKind::Economics => &economics::COLUMNS,
        }
    }

    /// Clean one record into this table's row type.
    pub fn normalize(&self, record: &RawRecord<'_>) -> Result<Row, CleanError> {
        Ok(match self {
            SchemaKind::Client => Row::Client(client::normalize(record)),
            SchemaKind::Campaign => Row::Campaign(campaign::normalize(record)?),
            SchemaKind::Economics => Row::Economics(economics::normalize(record)),
        })
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cleaned row, tagged with the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Client(ClientRecord),
    Campaign(CampaignRecord),
    Economics(EconomicsRecord),
}

impl Row {
    pub fn kind(&self) -> SchemaKind {
        match self {
            Row::Client(_) => SchemaKind::Client,
            Row::Campaign(_) => SchemaKind::Campaign,
            Row::Economics(_) => SchemaKind::Economics,
        }
    }
}

/// Schemas whose required columns are all present in `fields`, in table order.
///
/// Matching is exact and case-sensitive. A schema missing even one column is
/// left out; that is a normal outcome, not an error.
pub fn classify<S: AsRef<str>>(fields: &[S]) -> Vec<SchemaKind> {
    let available: HashSet<&str> = fields.iter().map(AsRef::as_ref).collect();
    SchemaKind::ALL
        .into_iter()
        .filter(|kind| {
            kind.required_fields()
                .iter()
                .all(|field| available.contains(field))
        })
        .collect()
}
