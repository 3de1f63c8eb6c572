//! Monetary amount extraction under Brazilian locale rules.
//!
//! When both separators appear, `.` groups thousands and `,` marks the
//! decimals (`1.234,56`); a lone `,` is the decimal point; a lone `.` is
//! taken as a decimal point, not a thousands separator.

use regex::Regex;

pub(crate) struct AmountMatcher {
    patterns: Vec<Regex>,
}

impl AmountMatcher {
    pub(crate) fn new() -> Self {
        let patterns = vec![
            // R$ 1.000,00
            Regex::new(r"R\$\s*(\d{1,3}(?:\.\d{3})*(?:,\d{2})?)").expect("hardcoded pattern"),
            // 1.000,00
            Regex::new(r"(\d{1,3}(?:\.\d{3})*(?:,\d{2}))").expect("hardcoded pattern"),
            // 100,50
            Regex::new(r"(\d+,\d{2})").expect("hardcoded pattern"),
            // 100.50
            Regex::new(r"(\d+\.\d{2})").expect("hardcoded pattern"),
        ];
        Self { patterns }
    }

    /// First pattern match wins; its substring either parses or the unit
    /// yields no amount.
    pub(crate) fn extract(&self, text: &str) -> Option<f64> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                return parse_amount(caps.get(1).expect("pattern has one group").as_str());
            }
        }
        None
    }
}

/// Parse a numeral with Brazilian separators; keeps the sign.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != 'R' && *c != '$' && !c.is_whitespace())
        .collect();

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}
