// src/blog/date.rs
// =============================================================================
// Normalizes the index page's human-readable dates.
//
// Two attempts, in order:
// 1. chrono parses the "Month D, YYYY" family directly
// 2. A manual fallback tokenizes "Month Day, Year" and looks the month up
//    by its first three letters, case-insensitively
//
// A string that survives neither leaves the post undated. Undated posts are
// kept; they just sort after everything else.
// =============================================================================

use chrono::NaiveDate;

// Formats chrono tries first. %d accepts unpadded day numbers when parsing,
// so "Jan 7, 2025" and "January 07, 2025" land on the same branch.
const PARSE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y"];

const MONTH_PREFIXES: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Normalizes raw date text to a date, or None when it can't be read.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in PARSE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    parse_month_day_year(trimmed)
}

/// The date line shown on cards: "January 7, 2025" when the date parsed,
/// the raw index text otherwise.
pub fn display_date(date: Option<NaiveDate>, raw: &str) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.trim().to_string(),
    }
}

// Manual "Month Day, Year" parse for text chrono rejects, e.g. stray
// whitespace between tokens or nonstandard month abbreviations
fn parse_month_day_year(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.replace(',', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }

    let month_token = tokens[0].to_lowercase();
    let month = MONTH_PREFIXES
        .iter()
        .find(|(prefix, _)| month_token.starts_with(prefix))
        .map(|(_, number)| *number)?;

    let day: u32 = tokens[1].parse().ok()?;
    let year: i32 = tokens[2].parse().ok()?;
    if !(1000..=9999).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}
