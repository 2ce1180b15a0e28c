//! Section segmentation: best-effort partition of resume text by header lines.

use std::collections::HashMap;

/// Known section header keywords. A header line must start with one of these.
pub const SECTION_HEADERS: &[&str] = &[
    "education",
    "experience",
    "work experience",
    "projects",
    "skills",
    "certifications",
    "achievements",
    "summary",
    "objective",
    "publications",
];

/// Header lines must stay under this length; longer lines are prose that
/// merely mentions a keyword.
const MAX_HEADER_LEN: usize = 40;

/// Partitions text into named sections with a line-by-line scan. This is a
/// heuristic, not a grammar: documents with nonstandard headers land entirely
/// under `general`.
pub struct SectionSegmenter {
    headers: Vec<String>,
}

impl SectionSegmenter {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// Maps section name to section body. The current section starts as
    /// `general`; on a header line the accumulated buffer is committed to the
    /// previous section (last write wins when a key recurs).
    pub fn segment(&self, text: &str) -> HashMap<String, String> {
        let mut sections = HashMap::new();
        let mut current = "general".to_string();
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            let lowered = trimmed.to_lowercase();
            let matched = self
                .headers
                .iter()
                .find(|h| lowered.starts_with(h.as_str()))
                .filter(|_| trimmed.chars().count() < MAX_HEADER_LEN);

            match matched {
                Some(header) => {
                    if !buffer.is_empty() {
                        sections.insert(current, buffer.join("\n").trim().to_string());
                    }
                    current = header.clone();
                    buffer = Vec::new();
                }
                None => buffer.push(line),
            }
        }

        if !buffer.is_empty() {
            sections.insert(current, buffer.join("\n").trim().to_string());
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> SectionSegmenter {
        SectionSegmenter::new(SECTION_HEADERS)
    }

    #[test]
    fn test_basic_two_section_split() {
        let sections = segmenter().segment("Summary\nBuilt things\nSkills\nPython, Go");
        assert_eq!(sections.get("summary").map(String::as_str), Some("Built things"));
        assert_eq!(sections.get("skills").map(String::as_str), Some("Python, Go"));
        assert!(!sections.contains_key("general"));
    }

    #[test]
    fn test_content_before_first_header_is_general() {
        let sections = segmenter().segment("Jane Doe\njane@x.co\nExperience\nAcme Corp");
        assert_eq!(
            sections.get("general").map(String::as_str),
            Some("Jane Doe\njane@x.co")
        );
        assert_eq!(sections.get("experience").map(String::as_str), Some("Acme Corp"));
    }

    #[test]
    fn test_header_keyword_in_long_line_is_not_a_header() {
        let text = "Summary\nskills in communication were essential to this role\nmore prose";
        let sections = segmenter().segment(text);
        assert_eq!(
            sections.get("summary").map(String::as_str),
            Some("skills in communication were essential to this role\nmore prose")
        );
        assert!(!sections.contains_key("skills"));
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let sections = segmenter().segment("WORK EXPERIENCE\nAcme Corp");
        assert_eq!(
            sections.get("work experience").map(String::as_str),
            Some("Acme Corp")
        );
    }

    #[test]
    fn test_repeated_section_last_write_wins() {
        let sections = segmenter().segment("Skills\nPython\nSummary\nStuff\nSkills\nRust");
        assert_eq!(sections.get("skills").map(String::as_str), Some("Rust"));
    }

    #[test]
    fn test_blank_lines_are_kept_inside_buffer() {
        let sections = segmenter().segment("Projects\nAlpha\n\nBeta");
        assert_eq!(sections.get("projects").map(String::as_str), Some("Alpha\n\nBeta"));
    }

    #[test]
    fn test_no_recognized_headers_lands_under_general() {
        let sections = segmenter().segment("Jane Doe\nBuilt many things\nShipped software");
        assert_eq!(sections.len(), 1);
        assert!(sections.contains_key("general"));
    }

    #[test]
    fn test_header_with_decoration_still_matches_by_prefix() {
        let sections = segmenter().segment("Education:\nMIT");
        assert_eq!(sections.get("education").map(String::as_str), Some("MIT"));
    }
}
