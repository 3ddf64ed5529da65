//! PDF text extraction

use super::SampleBuffer;
use crate::error::Result;
use lopdf::Document;

/// Text of a PDF, page by page, stopping once the sample cap is passed.
///
/// A page whose text cannot be extracted contributes nothing.
pub fn extract_pdf_text(bytes: &[u8], max_chars: usize) -> Result<String> {
    let document = Document::load_mem(bytes)?;
    let mut sample = SampleBuffer::new(max_chars);
    for page in document.get_pages().into_keys() {
        let text = document.extract_text(&[page]).unwrap_or_else(|e| {
            log::debug!("skipping PDF page {page}: {e}");
            String::new()
        });
        if sample.push(text) {
            log::debug!("sample cap reached at PDF page {page}");
            break;
        }
    }
    Ok(sample.finish())
}
