// src/schema/campaign.rs

use arrow::{
    array::{ArrayRef, Date32Array, Int64Array, StringArray},
    datatypes::{DataType as ArrowDataType, Date32Type, Field, Schema as ArrowSchema},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::error::CleanError;
use crate::output::parquet::ArrowRow;
use crate::process::{date_parser::last_contact_date, utils::flag_if, RawRecord};

pub const REQUIRED_FIELDS: [&str; 8] = [
    "client_id",
    "number_contacts",
    "contact_duration",
    "previous_campaign_contacts",
    "previous_outcome",
    "campaign_outcome",
    "day",
    "month",
];

pub const COLUMNS: [&str; 7] = [
    "client_id",
    "number_contacts",
    "contact_duration",
    "previous_campaign_contacts",
    "previous_outcome",
    "campaign_outcome",
    "last_contact_date",
];

/// One row of `campaign.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignRecord {
    pub client_id: String,
    pub number_contacts: String,
    pub contact_duration: String,
    pub previous_campaign_contacts: String,
    pub previous_outcome: u8,
    pub campaign_outcome: u8,
    /// Serialized as `YYYY-MM-DD`.
    pub last_contact_date: NaiveDate,
}

/// Fails when `day`/`month` do not form a real 2022 date.
pub fn normalize(record: &RawRecord<'_>) -> Result<CampaignRecord, CleanError> {
    Ok(CampaignRecord {
        client_id: record.text("client_id"),
        number_contacts: record.text("number_contacts"),
        contact_duration: record.text("contact_duration"),
        previous_campaign_contacts: record.text("previous_campaign_contacts"),
        previous_outcome: flag_if(record.get("previous_outcome"), "success"),
        campaign_outcome: flag_if(record.get("campaign_outcome"), "yes"),
        last_contact_date: last_contact_date(record.get("day"), record.get("month"))?,
    })
}

impl ArrowRow for CampaignRecord {
    fn schema() -> ArrowSchema {
        ArrowSchema::new(vec![
            Field::new("client_id", ArrowDataType::Utf8, false),
            Field::new("number_contacts", ArrowDataType::Utf8, false),
            Field::new("contact_duration", ArrowDataType::Utf8, false),
            Field::new("previous_campaign_contacts", ArrowDataType::Utf8, false),
            Field::new("previous_outcome", ArrowDataType::Int64, false),
            Field::new("campaign_outcome", ArrowDataType::Int64, false),
            Field::new("last_contact_date", ArrowDataType::Date32, false),
        ])
    }

    fn to_arrays(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.client_id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.number_contacts))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.contact_duration))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| &r.previous_campaign_contacts),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| i64::from(r.previous_outcome)),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| i64::from(r.campaign_outcome)),
            )),
            Arc::new(Date32Array::from_iter_values(
                rows.iter().map(|r| Date32Type::from_naive_date(r.last_contact_date)),
            )),
        ]
    }
}
