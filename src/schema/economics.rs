// src/schema/economics.rs

use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType as ArrowDataType, Field, Schema as ArrowSchema},
};
use serde::Serialize;
use std::sync::Arc;

use crate::output::parquet::ArrowRow;
use crate::process::RawRecord;

pub const REQUIRED_FIELDS: [&str; 3] = ["client_id", "cons_price_idx", "euribor_three_months"];

pub const COLUMNS: [&str; 3] = REQUIRED_FIELDS;

/// One row of `economics.csv`. Values are carried over verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EconomicsRecord {
    pub client_id: String,
    pub cons_price_idx: String,
    pub euribor_three_months: String,
}

pub fn normalize(record: &RawRecord<'_>) -> EconomicsRecord {
    EconomicsRecord {
        client_id: record.text("client_id"),
        cons_price_idx: record.text("cons_price_idx"),
        euribor_three_months: record.text("euribor_three_months"),
    }
}

impl ArrowRow for EconomicsRecord {
    fn schema() -> ArrowSchema {
        ArrowSchema::new(vec![
            Field::new("client_id", ArrowDataType::Utf8, false),
            Field::new("cons_price_idx", ArrowDataType::Utf8, false),
            Field::new("euribor_three_months", ArrowDataType::Utf8, false),
        ])
    }

    fn to_arrays(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.client_id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.cons_price_idx))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| &r.euribor_three_months),
            )),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Columns;
    use csv::StringRecord;

    #[test]
    fn passes_values_through() {
        let columns = Columns::new(
            ["euribor_three_months", "age", "client_id", "cons_price_idx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let record = RawRecord::new(
            &columns,
            StringRecord::from(vec!["4.857", "35", "12", "93.994"]),
        );
        assert_eq!(
            normalize(&record),
            EconomicsRecord {
                client_id: "12".into(),
                cons_price_idx: "93.994".into(),
                euribor_three_months: "4.857".into(),
            }
        );
    }
}
