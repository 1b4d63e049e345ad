//! Document Text Extractor — résumé PDF bytes to plain text.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts the text of every page that has any, in page order.
///
/// Fails with `InvalidDocument` when the bytes are not a readable PDF or when
/// no page yields text. Parsing runs on the blocking pool; a panic inside the
/// PDF library is reported as an unreadable document.
pub async fn extract_text(document: Bytes) -> Result<String, AppError> {
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&document)
    })
    .await
    .map_err(|e| {
        warn!("PDF extraction task failed: {e}");
        AppError::InvalidDocument("Error reading PDF file: the document could not be parsed".to_string())
    })?
    .map_err(|e| {
        warn!("PDF extraction error: {e}");
        AppError::InvalidDocument(format!("Error reading PDF file: {e}"))
    })?;

    let text = join_pages(pages);
    if text.is_empty() {
        return Err(AppError::InvalidDocument(
            "Could not extract text from the CV.".to_string(),
        ));
    }

    debug!("Extracted {} characters from the CV", text.len());
    Ok(text)
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
