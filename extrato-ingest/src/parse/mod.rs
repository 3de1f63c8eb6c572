//! Line/row parser: one unit of raw content in, zero-or-one candidate out.
//!
//! Every matcher is an ordered list tried in sequence; a unit that yields
//! no date or no amount is silently skipped, never an error.

pub mod dates;
pub mod money;

use extrato_core::categorizer::suggest_category;
use extrato_core::types::{CandidateTransaction, Context, Direction, ExtractionSource};
use regex::Regex;

use crate::types::{RawContent, TableContent};

pub use dates::parse_date;
pub use money::parse_amount;

/// Lines shorter than this carry too little signal to be a transaction.
const MIN_LINE_CHARS: usize = 10;

/// Description length cap at parse time (the validator caps the persisted
/// form at 200 separately).
const DESCRIPTION_MAX_CHARS: usize = 100;

const DESCRIPTION_FALLBACK: &str = "Transação extraída de documento";

/// Phrases marking money leaving the account. Checked before the positive
/// list; first family hit decides.
const NEGATIVE_INDICATORS: &[&str] = &[
    "débito",
    "saque",
    "pagamento",
    "transferência enviada",
    "compra",
    "taxa",
    "tarifa",
    "anuidade",
    "juros",
    "multa",
    "desconto",
    "pix enviado",
    "ted enviada",
    "doc enviado",
];

/// Phrases marking money entering the account.
const POSITIVE_INDICATORS: &[&str] = &[
    "crédito",
    "depósito",
    "transferência recebida",
    "pix recebido",
    "ted recebida",
    "doc recebido",
    "salário",
    "rendimento",
    "estorno",
    "reembolso",
];

/// Column-name vocabularies for spreadsheet rows, per field. The first
/// header containing any vocabulary word wins.
const DATE_COLUMNS: &[&str] = &["data", "date", "dt"];
const AMOUNT_COLUMNS: &[&str] = &["valor", "amount", "quantia", "total"];
const DESCRIPTION_COLUMNS: &[&str] = &["descrição", "description", "histórico", "memo"];

/// Parser for free text lines and spreadsheet rows. Compiles its matcher
/// lists once; construction is cheap enough per ingestion run.
pub struct LineParser {
    dates: dates::DateMatcher,
    amounts: money::AmountMatcher,
    merchants: Vec<Regex>,
    strip_date: Regex,
    strip_amount: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        let merchants = vec![
            // EM POSTO SHELL / PARA FULANO / DE EMPRESA X
            Regex::new(r"(?i)(?:em|para|de)\s+([A-Z\s]+?)(?:\s+\d|\s*$)").expect("hardcoded pattern"),
            // MERCADO EXTRA
            Regex::new(r"(?i)([A-Z][A-Z\s]{3,}?)(?:\s+\d|\s*$)").expect("hardcoded pattern"),
            // Posto Shell
            Regex::new(r"(?i)(\w+\s+\w+)(?:\s+\d|\s*$)").expect("hardcoded pattern"),
        ];
        Self {
            dates: dates::DateMatcher::new(),
            amounts: money::AmountMatcher::new(),
            merchants,
            strip_date: Regex::new(r"\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}").expect("hardcoded pattern"),
            strip_amount: Regex::new(r"R\$\s*\d+(?:\.\d{3})*(?:,\d{2})?").expect("hardcoded pattern"),
        }
    }

    /// Run the parser over extracted content, keeping unit order.
    pub fn parse_content(&self, content: &RawContent, context: Context) -> Vec<CandidateTransaction> {
        match content {
            RawContent::Text(text) => text
                .lines()
                .filter_map(|line| self.parse_line(line, context))
                .collect(),
            RawContent::Table(table) => self.parse_table(table, context),
        }
    }

    /// Parse one free-text line into a candidate.
    ///
    /// The indicator phrases set the direction; the numeral's own sign is
    /// ignored on this path and the amount stored as an absolute value.
    pub fn parse_line(&self, line: &str, context: Context) -> Option<CandidateTransaction> {
        let line = line.trim();
        if line.chars().count() < MIN_LINE_CHARS {
            return None;
        }

        let date = self.dates.extract(line)?;
        let amount = self.amounts.extract(line).filter(|a| *a != 0.0)?;
        let direction = detect_direction(line);
        let description = self.extract_description(line);
        let category_name = suggest_category(&description);

        Some(CandidateTransaction {
            date,
            amount: amount.abs(),
            direction,
            description,
            category_name,
            category_id: None,
            context,
            source: ExtractionSource::DocumentExtraction,
            raw_line: Some(line.to_string()),
        })
    }

    fn parse_table(&self, table: &TableContent, context: Context) -> Vec<CandidateTransaction> {
        let date_col = find_column(&table.headers, DATE_COLUMNS);
        let amount_col = find_column(&table.headers, AMOUNT_COLUMNS);
        let description_col = find_column(&table.headers, DESCRIPTION_COLUMNS);

        table
            .rows
            .iter()
            .filter_map(|row| self.parse_row(row, date_col, amount_col, description_col, context))
            .collect()
    }

    /// Parse one spreadsheet row. Requires parseable date and amount cells;
    /// on this path the numeral's sign decides the direction.
    fn parse_row(
        &self,
        row: &[String],
        date_col: Option<usize>,
        amount_col: Option<usize>,
        description_col: Option<usize>,
        context: Context,
    ) -> Option<CandidateTransaction> {
        let date = cell(row, date_col).and_then(parse_date)?;
        let amount = cell(row, amount_col)
            .and_then(parse_amount)
            .filter(|a| *a != 0.0)?;

        let description = cell(row, description_col)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();
        let category_name = suggest_category(&description);

        Some(CandidateTransaction {
            date,
            amount: amount.abs(),
            direction: if amount < 0.0 { Direction::Expense } else { Direction::Income },
            description,
            category_name,
            category_id: None,
            context,
            source: ExtractionSource::SpreadsheetExtraction,
            raw_line: None,
        })
    }

    /// Best-effort merchant/description extraction. Merchant patterns are
    /// heuristic; the result is a human-readable string, possibly wrong.
    fn extract_description(&self, line: &str) -> String {
        for pattern in &self.merchants {
            if let Some(caps) = pattern.captures(line) {
                let merchant = caps
                    .get(1)
                    .map(|m| m.as_str().trim())
                    .unwrap_or_default();
                if merchant.chars().count() > 3 {
                    return merchant.to_string();
                }
            }
        }

        let without_dates = self.strip_date.replace_all(line, "");
        let without_amounts = self.strip_amount.replace_all(&without_dates, "");
        let collapsed = without_amounts.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.is_empty() {
            DESCRIPTION_FALLBACK.to_string()
        } else {
            truncate_chars(&collapsed, DESCRIPTION_MAX_CHARS)
        }
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a unit as income or expense from its wording; the negative
/// list has priority and unknown wording defaults to expense.
pub fn detect_direction(text: &str) -> Direction {
    let lower = text.to_lowercase();
    if NEGATIVE_INDICATORS.iter().any(|phrase| lower.contains(phrase)) {
        return Direction::Expense;
    }
    if POSITIVE_INDICATORS.iter().any(|phrase| lower.contains(phrase)) {
        return Direction::Income;
    }
    Direction::Expense
}

fn find_column(headers: &[String], vocabulary: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let lower = header.to_lowercase();
        vocabulary.iter().any(|word| lower.contains(word))
    })
}

fn cell<'a>(row: &'a [String], index: Option<usize>) -> Option<&'a str> {
    let value = row.get(index?)?.as_str();
    if value.trim().is_empty() { None } else { Some(value) }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
