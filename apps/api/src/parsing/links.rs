//! Link extraction: scans resume text for categorized links and contacts.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Categorized links and contacts pulled from one resume. At most one value
/// per category (first match wins); absence stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub huggingface: Option<String>,
    pub leetcode: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkCategory {
    Github,
    Linkedin,
    Huggingface,
    Leetcode,
    Email,
    Phone,
    Portfolio,
}

/// Hosts claimed by dedicated categories, excluded from `portfolio`.
const PLATFORM_HOSTS: [&str; 4] = [
    "github.com",
    "linkedin.com",
    "huggingface.co",
    "leetcode.com",
];

/// Compiles the category patterns once; evaluation order is load-bearing:
/// `portfolio` runs last so the platform hosts are claimed by their own
/// categories first.
pub struct LinkExtractor {
    patterns: Vec<(LinkCategory, Regex)>,
}

impl LinkExtractor {
    pub fn new() -> Self {
        let specs: [(LinkCategory, &str); 7] = [
            (
                LinkCategory::Github,
                r"github\.com/([a-zA-Z0-9_-]+)(?:/[a-zA-Z0-9_\-\.]*)?",
            ),
            (LinkCategory::Linkedin, r"linkedin\.com/in/([a-zA-Z0-9_-]+)/?"),
            (
                LinkCategory::Huggingface,
                r"huggingface\.co/([a-zA-Z0-9_-]+)/?",
            ),
            (LinkCategory::Leetcode, r"leetcode\.com/([a-zA-Z0-9_-]+)/?"),
            (
                LinkCategory::Email,
                r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}",
            ),
            (
                LinkCategory::Phone,
                r"(?:\+?\d{1,3}[\s\-]?)?\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{4}",
            ),
            (
                LinkCategory::Portfolio,
                r"https?://(?:www\.)?([a-zA-Z0-9\-\.]+\.[a-zA-Z]{2,})(?:/[^\s]*)?",
            ),
        ];

        let patterns = specs
            .iter()
            .map(|(category, pattern)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("link pattern compiles");
                (*category, regex)
            })
            .collect();

        Self { patterns }
    }

    /// Extracts and categorizes all links from `text`. URL-bearing categories
    /// are normalized to canonical full URLs; email and phone stay verbatim.
    pub fn extract(&self, text: &str) -> ExtractedLinks {
        let mut links = ExtractedLinks::default();

        for (category, pattern) in &self.patterns {
            match category {
                LinkCategory::Github => {
                    links.github =
                        first_capture(pattern, text).map(|h| format!("https://github.com/{h}"));
                }
                LinkCategory::Linkedin => {
                    links.linkedin = first_capture(pattern, text)
                        .map(|h| format!("https://linkedin.com/in/{h}"));
                }
                LinkCategory::Huggingface => {
                    links.huggingface = first_capture(pattern, text)
                        .map(|h| format!("https://huggingface.co/{h}"));
                }
                LinkCategory::Leetcode => {
                    links.leetcode =
                        first_capture(pattern, text).map(|h| format!("https://leetcode.com/{h}"));
                }
                LinkCategory::Email => links.email = first_match(pattern, text),
                LinkCategory::Phone => links.phone = first_match(pattern, text),
                LinkCategory::Portfolio => links.portfolio = first_portfolio(pattern, text),
            }
        }

        links
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

/// First http(s) URL whose host is not one of the platform hosts. The regex
/// crate has no lookaround, so the exclusion is applied while selecting the
/// match rather than inside the pattern.
fn first_portfolio(pattern: &Regex, text: &str) -> Option<String> {
    for caps in pattern.captures_iter(text) {
        let host = caps
            .get(1)
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_default();
        if PLATFORM_HOSTS.iter().any(|p| host.ends_with(p)) {
            continue;
        }
        return caps.get(0).map(|m| m.as_str().to_string());
    }
    None
}

/// Recovers just the handle from a stored GitHub URL.
pub fn extract_github_username(url: &str) -> Option<String> {
    let pattern = RegexBuilder::new(r"github\.com/([a-zA-Z0-9_-]+)")
        .case_insensitive(true)
        .build()
        .expect("github pattern compiles");
    pattern
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Classifies a single URL by host substring, independent of the full-text
/// extractor. Reserved for per-link classification of stored `other` links.
#[allow(dead_code)]
pub fn detect_link_type(url: &str) -> &'static str {
    let url_lower = url.to_lowercase();
    if url_lower.contains("github.com") {
        "github"
    } else if url_lower.contains("linkedin.com") {
        "linkedin"
    } else if url_lower.contains("huggingface.co") {
        "huggingface"
    } else if url_lower.contains("leetcode.com") {
        "leetcode"
    } else {
        "other"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_github_extracted_portfolio_unset() {
        let extractor = LinkExtractor::new();
        let links = extractor.extract("reach me at jane@x.co, github.com/janedoe");
        assert_eq!(links.email.as_deref(), Some("jane@x.co"));
        assert_eq!(links.github.as_deref(), Some("https://github.com/janedoe"));
        assert_eq!(links.portfolio, None);
    }

    #[test]
    fn test_github_path_suffix_is_discarded() {
        let extractor = LinkExtractor::new();
        let links = extractor.extract("see https://github.com/janedoe/cool-repo for code");
        assert_eq!(links.github.as_deref(), Some("https://github.com/janedoe"));
    }

    #[test]
    fn test_linkedin_normalized_to_canonical_url() {
        let extractor = LinkExtractor::new();
        let links = extractor.extract("profile: www.linkedin.com/in/jane-doe/");
        assert_eq!(
            links.linkedin.as_deref(),
            Some("https://linkedin.com/in/jane-doe")
        );
    }

    #[test]
    fn test_first_match_wins_per_category() {
        let extractor = LinkExtractor::new();
        let links = extractor.extract("github.com/first and github.com/second");
        assert_eq!(links.github.as_deref(), Some("https://github.com/first"));
    }

    #[test]
    fn test_portfolio_matches_non_platform_url() {
        let extractor = LinkExtractor::new();
        let links = extractor.extract("site: https://janedoe.dev/projects");
        assert_eq!(links.portfolio.as_deref(), Some("https://janedoe.dev/projects"));
    }

    #[test]
    fn test_portfolio_skips_platform_urls() {
        let extractor = LinkExtractor::new();
        let links =
            extractor.extract("https://github.com/janedoe then https://www.janedoe.dev later");
        assert_eq!(links.github.as_deref(), Some("https://github.com/janedoe"));
        assert_eq!(links.portfolio.as_deref(), Some("https://www.janedoe.dev"));
    }

    #[test]
    fn test_phone_with_country_code() {
        let extractor = LinkExtractor::new();
        let links = extractor.extract("call +1 555-123-4567 anytime");
        assert_eq!(links.phone.as_deref(), Some("+1 555-123-4567"));
    }

    #[test]
    fn test_huggingface_and_leetcode() {
        let extractor = LinkExtractor::new();
        let links =
            extractor.extract("models at huggingface.co/janedoe, puzzles at leetcode.com/janedoe");
        assert_eq!(
            links.huggingface.as_deref(),
            Some("https://huggingface.co/janedoe")
        );
        assert_eq!(
            links.leetcode.as_deref(),
            Some("https://leetcode.com/janedoe")
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = LinkExtractor::new();
        let text = "jane@x.co github.com/janedoe https://janedoe.dev";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_extract_github_username_from_repo_url() {
        assert_eq!(
            extract_github_username("https://github.com/janedoe/repo").as_deref(),
            Some("janedoe")
        );
    }

    #[test]
    fn test_extract_github_username_none_for_other_hosts() {
        assert_eq!(extract_github_username("https://gitlab.com/janedoe"), None);
    }

    #[test]
    fn test_detect_link_type() {
        assert_eq!(detect_link_type("https://GitHub.com/janedoe"), "github");
        assert_eq!(detect_link_type("https://linkedin.com/in/x"), "linkedin");
        assert_eq!(detect_link_type("https://huggingface.co/x"), "huggingface");
        assert_eq!(detect_link_type("https://leetcode.com/x"), "leetcode");
        assert_eq!(detect_link_type("https://janedoe.dev"), "other");
    }
}
