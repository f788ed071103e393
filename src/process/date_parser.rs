use chrono::NaiveDate;

use crate::error::CleanError;

/// Every contact in the campaign happened in this year.
pub const CONTACT_YEAR: i32 = 2022;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// `"may"` → 5. ASCII case is ignored; full month names are not accepted.
pub fn month_number(abbrev: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbrev))
        .map(|i| i as u32 + 1)
}

/// Rebuild the last contact date from the `day` and `month` fields.
///
/// Both fields must be present: an empty one is a format error just like an
/// unrecognised month or a day that does not exist in that month (`feb 29`
/// included, 2022 is not a leap year).
pub fn last_contact_date(day: Option<&str>, month: Option<&str>) -> Result<NaiveDate, CleanError> {
    let month_raw = month.unwrap_or_default();
    let m = month_number(month_raw.trim()).ok_or_else(|| {
        CleanError::format("month", month_raw, "not a three-letter month abbreviation")
    })?;

    let day_raw = day.unwrap_or_default();
    let d: u32 = day_raw
        .trim()
        .parse()
        .map_err(|_| CleanError::format("day", day_raw, "not a day of month"))?;

    NaiveDate::from_ymd_opt(CONTACT_YEAR, m, d).ok_or_else(|| {
        CleanError::format(
            "day",
            day_raw,
            format!("out of range for {} {}", month_raw, CONTACT_YEAR),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(day: &str, month: &str) -> Result<String, CleanError> {
        last_contact_date(Some(day), Some(month)).map(|d| d.format("%Y-%m-%d").to_string())
    }

    #[test]
    fn builds_iso_dates_in_2022() {
        assert_eq!(iso("5", "may").unwrap(), "2022-05-05");
        assert_eq!(iso("31", "dec").unwrap(), "2022-12-31");
        assert_eq!(iso("01", "jan").unwrap(), "2022-01-01");
        assert_eq!(iso(" 7 ", "Aug").unwrap(), "2022-08-07");
        assert_eq!(iso("28", "FEB").unwrap(), "2022-02-28");
    }

    #[test]
    fn is_deterministic() {
        for (i, month) in MONTH_ABBREVIATIONS.iter().enumerate() {
            let first = iso("15", month).unwrap();
            assert_eq!(first, iso("15", month).unwrap());
            assert_eq!(first, format!("2022-{:02}-15", i + 1));
        }
    }

    #[test]
    fn rejects_unknown_month() {
        let err = iso("5", "xyz").unwrap_err();
        assert_eq!(
            err,
            CleanError::format("month", "xyz", "not a three-letter month abbreviation")
        );
        assert!(iso("5", "march").is_err());
        assert!(iso("5", "").is_err());
    }

    #[test]
    fn rejects_days_outside_the_month() {
        assert!(iso("29", "feb").is_err());
        assert!(iso("31", "apr").is_err());
        assert!(iso("0", "jan").is_err());
        assert!(iso("32", "jan").is_err());
        assert!(iso("5.0", "may").is_err());
        assert!(iso("-1", "may").is_err());
    }

    #[test]
    fn missing_fields_are_format_errors() {
        assert!(matches!(
            last_contact_date(None, Some("may")),
            Err(CleanError::Format { field: "day", .. })
        ));
        assert!(matches!(
            last_contact_date(Some("5"), None),
            Err(CleanError::Format { field: "month", .. })
        ));
    }

    #[test]
    fn month_lookup() {
        assert_eq!(month_number("jan"), Some(1));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("ju"), None);
    }
}
