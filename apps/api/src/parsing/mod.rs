//! Resume ingestion pipeline: binary document to text, then links, skills,
//! and sections derived from that text in one pass.

pub mod extract;
pub mod handlers;
pub mod links;
pub mod sections;
pub mod skills;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parsing::extract::{extract_text, ParseError};
use crate::parsing::links::{ExtractedLinks, LinkExtractor};
use crate::parsing::sections::{SectionSegmenter, SECTION_HEADERS};
use crate::parsing::skills::{SkillExtractor, TECH_SKILLS};

/// Everything derived from one uploaded document. Built exactly once at
/// upload time, persisted with the resume row, never recomputed for the same
/// bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub raw_text: String,
    pub links: ExtractedLinks,
    pub skills: Vec<String>,
    pub sections: HashMap<String, String>,
}

/// Orchestrates text extraction and the three derivation passes. The
/// extractors are compiled once at startup and injected here.
pub struct ResumeParser {
    links: LinkExtractor,
    skills: SkillExtractor,
    sections: SectionSegmenter,
}

impl ResumeParser {
    pub fn new() -> Self {
        Self {
            links: LinkExtractor::new(),
            skills: SkillExtractor::new(TECH_SKILLS),
            sections: SectionSegmenter::new(SECTION_HEADERS),
        }
    }

    /// Extraction failure aborts the whole pipeline; no partial record is
    /// produced.
    pub fn parse(&self, bytes: &[u8], filename: &str) -> Result<ParsedDocument, ParseError> {
        let raw_text = extract_text(bytes, filename)?;
        Ok(ParsedDocument {
            links: self.links.extract(&raw_text),
            skills: self.skills.extract(&raw_text),
            sections: self.sections.segment(&raw_text),
            raw_text,
        })
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_from_lines(lines: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            let body: String = lines
                .iter()
                .map(|l| format!("<w:p><w:r><w:t>{l}</w:t></w:r></w:p>"))
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
    fn test_parse_produces_text_links_skills_and_sections() {
        let bytes = docx_from_lines(&[
            "Jane Doe",
            "jane@x.co github.com/janedoe",
            "Skills",
            "Python and Docker",
        ]);
        let parsed = ResumeParser::new().parse(&bytes, "resume.docx").unwrap();

        assert!(parsed.raw_text.starts_with("Jane Doe"));
        assert_eq!(parsed.links.email.as_deref(), Some("jane@x.co"));
        assert_eq!(
            parsed.links.github.as_deref(),
            Some("https://github.com/janedoe")
        );
        assert!(parsed.skills.contains(&"python".to_string()));
        assert!(parsed.skills.contains(&"docker".to_string()));
        assert_eq!(
            parsed.sections.get("skills").map(String::as_str),
            Some("Python and Docker")
        );
    }

    #[test]
    fn test_parse_rejects_unknown_extension() {
        let err = ResumeParser::new().parse(b"text", "resume.md").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    }
}
