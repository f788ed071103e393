/// Job category: drop every `.` then turn `-` into `_` ("blue-collar" → "blue_collar").
pub fn clean_job(raw: &str) -> String {
    raw.replace('.', "").replace('-', "_")
}

/// Education level: "unknown" (and an empty field) become `None`, otherwise `.` → `_`.
pub fn clean_education(raw: Option<&str>) -> Option<String> {
    match raw {
        None | Some("unknown") => None,
        Some(level) => Some(level.replace('.', "_")),
    }
}

/// 1 when the field holds exactly `expected`, 0 for anything else including absent.
pub fn flag_if(raw: Option<&str>, expected: &str) -> u8 {
    u8::from(raw == Some(expected))
}
