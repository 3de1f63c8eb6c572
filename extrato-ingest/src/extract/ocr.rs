//! OCR backend seam. The bundled implementation shells out to a local
//! tesseract binary; service-backed recognizers implement the same trait.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// Converts image bytes to text in the requested language.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &[u8], language: &str) -> ExtractResult<String>;
}

/// Local `tesseract` subprocess backend.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    binary: PathBuf,
}

impl TesseractRecognizer {
    /// Locate `tesseract` on PATH.
    pub fn discover() -> ExtractResult<Self> {
        let binary = which::which("tesseract")
            .map_err(|e| ExtractError::OcrUnavailable(format!("tesseract not found: {e}")))?;
        Ok(Self { binary })
    }

    pub fn at(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &[u8], language: &str) -> ExtractResult<String> {
        // Staged through a temp file; removed on drop whichever way the
        // call exits.
        let mut staged = tempfile::NamedTempFile::new()?;
        staged.write_all(image)?;
        staged.flush()?;

        debug!(binary = %self.binary.display(), language, "running tesseract");
        let output = tokio::process::Command::new(&self.binary)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Image(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_io_error() {
        let recognizer = TesseractRecognizer::at("/nonexistent/tesseract");
        let err = recognizer.recognize(b"img", "por").await.unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
