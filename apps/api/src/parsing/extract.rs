//! Binary document to plain text. The filename extension selects the format
//! handler; PDF runs an ordered list of strategies until one yields text.

use std::io::Read;

use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

/// Upper bound on the decompressed size of `word/document.xml`.
const MAX_DOCX_XML_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type '{0}'. Only PDF and DOCX are allowed.")]
    UnsupportedFormat(String),

    #[error("Document container is unreadable: {0}")]
    DocumentCorrupt(String),

    #[error("Could not extract text from resume")]
    NoExtractableText,
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnsupportedFormat(_) => AppError::Validation(err.to_string()),
            ParseError::DocumentCorrupt(_) | ParseError::NoExtractableText => {
                AppError::UnprocessableEntity(err.to_string())
            }
        }
    }
}

/// Extracts plain text from `bytes`, choosing the handler by file extension.
/// The result is trimmed; an empty result is an error, never a valid document.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ParseError> {
    let filename_lower = filename.to_lowercase();
    if filename_lower.ends_with(".pdf") {
        extract_pdf(bytes)
    } else if filename_lower.ends_with(".docx") || filename_lower.ends_with(".doc") {
        extract_docx(bytes)
    } else {
        let ext = std::path::Path::new(&filename_lower)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        Err(ParseError::UnsupportedFormat(ext))
    }
}

/// PDF strategies in priority order. A strategy failure or whitespace-only
/// output moves on to the next one; only the all-failed end state is reported.
const PDF_STRATEGIES: &[(&str, fn(&[u8]) -> anyhow::Result<String>)] = &[
    ("layout", pdf_layout_text),
    ("raw-pages", pdf_raw_pages),
];

fn extract_pdf(bytes: &[u8]) -> Result<String, ParseError> {
    for (name, strategy) in PDF_STRATEGIES {
        match strategy(bytes) {
            Ok(text) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
            Ok(_) => debug!("PDF strategy '{name}' produced no text"),
            Err(e) => debug!("PDF strategy '{name}' failed: {e}"),
        }
    }
    Err(ParseError::NoExtractableText)
}

/// Primary strategy: layout-aware extraction across all pages.
fn pdf_layout_text(bytes: &[u8]) -> anyhow::Result<String> {
    Ok(pdf_extract::extract_text_from_mem(bytes)?)
}

/// Secondary strategy: permissive per-page extraction. Pages that fail to
/// decode are skipped instead of failing the whole document.
fn pdf_raw_pages(bytes: &[u8]) -> anyhow::Result<String> {
    let doc = lopdf::Document::load_mem(bytes)?;
    let mut pages = Vec::new();
    for page_no in doc.get_pages().keys() {
        if let Ok(text) = doc.extract_text(&[*page_no]) {
            pages.push(text);
        }
    }
    Ok(pages.join("\n"))
}

/// DOCX is a ZIP archive; the body text lives in `word/document.xml`.
fn extract_docx(bytes: &[u8]) -> Result<String, ParseError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ParseError::DocumentCorrupt(e.to_string()))?;

    let mut doc_xml = Vec::new();
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ParseError::DocumentCorrupt(e.to_string()))?;
    entry
        .take(MAX_DOCX_XML_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| ParseError::DocumentCorrupt(e.to_string()))?;
    if doc_xml.len() as u64 >= MAX_DOCX_XML_BYTES {
        return Err(ParseError::DocumentCorrupt(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }

    let text = docx_paragraph_text(&doc_xml)
        .map_err(|e| ParseError::DocumentCorrupt(e.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::NoExtractableText);
    }
    Ok(text.to_string())
}

/// Collects the text of every non-empty paragraph (`<w:p>`), in document
/// order, joined with newlines.
fn docx_paragraph_text(xml: &[u8]) -> anyhow::Result<String> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::Text(t)) if in_text => {
                current.push_str(t.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    if !current.trim().is_empty() {
        paragraphs.push(current.trim().to_string());
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Minimal in-memory DOCX with one paragraph per input string.
    fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            let body: String = paragraphs
                .iter()
                .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
                .collect();
            let xml = format!(
                "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{body}</w:body></w:document>"
            );
            zip.write_all(xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = extract_text(b"plain text", "resume.txt").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let bytes = docx_with_paragraphs(&["Senior engineer"]);
        let text = extract_text(&bytes, "Resume.DOCX").unwrap();
        assert_eq!(text, "Senior engineer");
    }

    #[test]
    fn test_invalid_pdf_yields_no_extractable_text() {
        // Both strategies fail on garbage; the aggregate error is NoExtractableText.
        let err = extract_text(b"not a pdf at all", "resume.pdf").unwrap_err();
        assert!(matches!(err, ParseError::NoExtractableText));
    }

    #[test]
    fn test_invalid_zip_is_document_corrupt() {
        let err = extract_text(b"not a zip archive", "resume.docx").unwrap_err();
        assert!(matches!(err, ParseError::DocumentCorrupt(_)));
    }

    #[test]
    fn test_docx_missing_document_xml_is_corrupt() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            zip.start_file("word/other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"<w:document/>").unwrap();
            zip.finish().unwrap();
        }
        let err = extract_text(&buf, "resume.docx").unwrap_err();
        assert!(matches!(err, ParseError::DocumentCorrupt(_)));
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let bytes = docx_with_paragraphs(&["Jane Doe", "Experience", "Built things"]);
        let text = extract_text(&bytes, "resume.docx").unwrap();
        assert_eq!(text, "Jane Doe\nExperience\nBuilt things");
    }

    #[test]
    fn test_docx_empty_paragraphs_are_skipped() {
        let bytes = docx_with_paragraphs(&["Jane Doe", "", "  ", "Skills"]);
        let text = extract_text(&bytes, "resume.docx").unwrap();
        assert_eq!(text, "Jane Doe\nSkills");
    }

    #[test]
    fn test_docx_with_only_whitespace_is_no_extractable_text() {
        let bytes = docx_with_paragraphs(&["", "   "]);
        let err = extract_text(&bytes, "resume.docx").unwrap_err();
        assert!(matches!(err, ParseError::NoExtractableText));
    }

    #[test]
    fn test_docx_entities_are_unescaped() {
        let bytes = docx_with_paragraphs(&["C&amp;C systems"]);
        let text = extract_text(&bytes, "resume.docx").unwrap();
        assert_eq!(text, "C&C systems");
    }
}
