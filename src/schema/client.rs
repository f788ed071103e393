// src/schema/client.rs

use arrow::{
    array::{ArrayRef, Int64Array, StringArray},
    datatypes::{DataType as ArrowDataType, Field, Schema as ArrowSchema},
};
use serde::Serialize;
use std::sync::Arc;

use crate::output::parquet::ArrowRow;
use crate::process::{
    utils::{clean_education, clean_job, flag_if},
    RawRecord,
};

pub const REQUIRED_FIELDS: [&str; 7] = [
    "client_id",
    "age",
    "job",
    "marital",
    "education",
    "credit_default",
    "mortgage",
];

pub const COLUMNS: [&str; 7] = REQUIRED_FIELDS;

/// One row of `client.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    pub client_id: String,
    pub age: String,
    pub job: String,
    pub marital: String,
    /// `None` when the source said "unknown".
    pub education: Option<String>,
    pub credit_default: u8,
    pub mortgage: u8,
}

pub fn normalize(record: &RawRecord<'_>) -> ClientRecord {
    ClientRecord {
        client_id: record.text("client_id"),
        age: record.text("age"),
        job: clean_job(record.get("job").unwrap_or_default()),
        marital: record.text("marital"),
        education: clean_education(record.get("education")),
        credit_default: flag_if(record.get("credit_default"), "yes"),
        mortgage: flag_if(record.get("mortgage"), "yes"),
    }
}

impl ArrowRow for ClientRecord {
    fn schema() -> ArrowSchema {
        ArrowSchema::new(vec![
            Field::new("client_id", ArrowDataType::Utf8, false),
            Field::new("age", ArrowDataType::Utf8, false),
            Field::new("job", ArrowDataType::Utf8, false),
            Field::new("marital", ArrowDataType::Utf8, false),
            Field::new("education", ArrowDataType::Utf8, true),
            Field::new("credit_default", ArrowDataType::Int64, false),
            Field::new("mortgage", ArrowDataType::Int64, false),
        ])
    }

    fn to_arrays(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.client_id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.age))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.job))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.marital))),
            Arc::new(
                rows.iter()
                    .map(|r| r.education.as_deref())
                    .collect::<StringArray>(),
            ),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| i64::from(r.credit_default)),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| i64::from(r.mortgage)),
            )),
        ]
    }
}
