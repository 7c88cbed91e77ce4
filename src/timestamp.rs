use crate::error::{FilterError, Result};
use chrono::{Datelike, Local};
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: [(&str, &str); 12] = [
    ("Jan", "01"),
    ("Feb", "02"),
    ("Mar", "03"),
    ("Apr", "04"),
    ("May", "05"),
    ("Jun", "06"),
    ("Jul", "07"),
    ("Aug", "08"),
    ("Sep", "09"),
    ("Oct", "10"),
    ("Nov", "11"),
    ("Dec", "12"),
];

// `ls -l` style: "Jan 7 17:12", "Dec 24 09:05".
static SHORT_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{3})\s+([0-9]{1,2})\s+([0-9]{2}):([0-9]{2})$")
        .expect("short timestamp pattern is valid")
});

/// Rewrites a listing timestamp as `YYYY-MM-DD HH:MM`, taking the year from
/// the local clock.
pub fn format_short_timestamp(value: &str) -> Result<String> {
    format_short_timestamp_in_year(value, Local::now().year())
}

/// Same as [`format_short_timestamp`] with an explicit year.
///
/// Input that is not shaped like a listing timestamp is returned unchanged.
/// A well-shaped value whose month abbreviation is not one of `Jan`..`Dec`
/// is an error.
pub fn format_short_timestamp_in_year(value: &str, year: i32) -> Result<String> {
    let Some(captures) = SHORT_TIMESTAMP.captures(value) else {
        return Ok(value.to_string());
    };

    let abbreviation = &captures[1];
    let month = MONTHS
        .iter()
        .find(|(name, _)| *name == abbreviation)
        .map(|(_, number)| *number)
        .ok_or_else(|| FilterError::UnknownMonth(abbreviation.to_string()))?;

    Ok(format!(
        "{year}-{month}-{:0>2} {}:{}",
        &captures[2], &captures[3], &captures[4]
    ))
}
