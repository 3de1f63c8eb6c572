//! PDF text extraction via pdf-extract, run off the async worker.

use crate::error::{ExtractError, ExtractResult};

/// Extract the full text of a PDF document.
pub async fn extract_pdf_text(bytes: &[u8]) -> ExtractResult<String> {
    let data = bytes.to_vec();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| ExtractError::Pdf(format!("extraction task panicked: {e}")))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_fail_as_pdf_error() {
        let err = extract_pdf_text(b"definitely not a pdf").await.unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
