//! Normalized extractor output consumed by the parser (format-agnostic)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// File formats accepted for ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Png,
    Jpg,
    Jpeg,
    Csv,
    Xlsx,
    Xls,
}

impl FileKind {
    /// Parse from a file name's extension; `None` for anything outside the
    /// accepted set.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "png" => Some(FileKind::Png),
            "jpg" => Some(FileKind::Jpg),
            "jpeg" => Some(FileKind::Jpeg),
            "csv" => Some(FileKind::Csv),
            "xlsx" => Some(FileKind::Xlsx),
            "xls" => Some(FileKind::Xls),
            _ => None,
        }
    }

    /// True for formats that extract to free text (PDF and images).
    pub fn is_textual(&self) -> bool {
        matches!(self, FileKind::Pdf | FileKind::Png | FileKind::Jpg | FileKind::Jpeg)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileKind::Pdf => "pdf",
            FileKind::Png => "png",
            FileKind::Jpg => "jpg",
            FileKind::Jpeg => "jpeg",
            FileKind::Csv => "csv",
            FileKind::Xlsx => "xlsx",
            FileKind::Xls => "xls",
        };
        f.write_str(s)
    }
}

/// Tabular content with column order preserved; the parser's column lookup
/// is first-match-wins over `headers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableContent {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What an extraction backend hands to the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawContent {
    /// Free text; the parser works line by line.
    Text(String),
    /// Ordered rows with named columns.
    Table(TableContent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_extensions() {
        assert_eq!(FileKind::from_filename("extrato.pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("foto.JPG"), Some(FileKind::Jpg));
        assert_eq!(FileKind::from_filename("planilha.xlsx"), Some(FileKind::Xlsx));
        assert_eq!(FileKind::from_filename("dados.csv"), Some(FileKind::Csv));
    }

    #[test]
    fn test_rejected_extensions() {
        assert_eq!(FileKind::from_filename("script.exe"), None);
        assert_eq!(FileKind::from_filename("sem_extensao"), None);
        assert_eq!(FileKind::from_filename(""), None);
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(FileKind::from_filename("extrato.pdf.exe"), None);
        assert_eq!(FileKind::from_filename("arquivo.backup.csv"), Some(FileKind::Csv));
    }

    #[test]
    fn test_textual_kinds() {
        assert!(FileKind::Pdf.is_textual());
        assert!(FileKind::Png.is_textual());
        assert!(!FileKind::Csv.is_textual());
        assert!(!FileKind::Xls.is_textual());
    }
}
