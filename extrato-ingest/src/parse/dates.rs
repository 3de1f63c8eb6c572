//! Date extraction: an ordered pattern list finds the substring, an
//! ordered format list parses it. Day-first formats are tried before
//! year-first ones, so `03/08/2025` is August 3rd.

use chrono::NaiveDate;
use regex::Regex;

/// Concrete formats tried in order against a matched date substring.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%Y.%m.%d",
    // spreadsheet datetime cells stringify with a time part
    "%Y-%m-%d %H:%M:%S",
];

pub(crate) struct DateMatcher {
    patterns: Vec<Regex>,
}

impl DateMatcher {
    pub(crate) fn new() -> Self {
        let patterns = vec![
            // dd/mm/yyyy, dd-mm-yyyy, dd.mm.yyyy (2- or 4-digit year)
            Regex::new(r"(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})").expect("hardcoded pattern"),
            // yyyy/mm/dd family
            Regex::new(r"(\d{2,4}[/\-.]\d{1,2}[/\-.]\d{1,2})").expect("hardcoded pattern"),
        ];
        Self { patterns }
    }

    /// First pattern match wins; if its substring does not parse under any
    /// accepted format the unit yields no date (later patterns are not
    /// consulted).
    pub(crate) fn extract(&self, text: &str) -> Option<NaiveDate> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                return parse_date(caps.get(1).expect("pattern has one group").as_str());
            }
        }
        None
    }
}

/// Parse a date string against the accepted formats, first hit wins.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
