//! Skill extraction against a static vocabulary.

/// Canonical skill vocabulary (subset; extend as needed). Extraction output
/// uses exactly these casings.
pub const TECH_SKILLS: &[&str] = &[
    // Languages
    "python",
    "javascript",
    "typescript",
    "java",
    "c++",
    "c#",
    "go",
    "rust",
    "kotlin",
    "swift",
    "ruby",
    "php",
    "scala",
    "r",
    "dart",
    "elixir",
    // Frontend
    "react",
    "next.js",
    "vue",
    "angular",
    "svelte",
    "html",
    "css",
    "tailwind",
    "bootstrap",
    "sass",
    "webpack",
    "vite",
    "redux",
    "zustand",
    // Backend
    "node.js",
    "fastapi",
    "django",
    "flask",
    "express",
    "spring boot",
    "nestjs",
    "graphql",
    "rest api",
    "grpc",
    // Databases
    "mongodb",
    "postgresql",
    "mysql",
    "sqlite",
    "redis",
    "elasticsearch",
    "cassandra",
    "dynamodb",
    "firebase",
    // Cloud / DevOps
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "github actions",
    "terraform",
    "ansible",
    "jenkins",
    "nginx",
    "linux",
    // ML / AI
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "hugging face",
    "langchain",
    "openai",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    // Tools
    "git",
    "jira",
    "figma",
    "postman",
    "pytest",
    "jest",
    "cypress",
];

/// Matches free text against an injected vocabulary with word-boundary
/// precision. The boundary is defined by the skill's own characters, not
/// generic alphanumeric token edges, so `c++` and `node.js` still match.
pub struct SkillExtractor {
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the vocabulary skills present in `text`, deduplicated and in
    /// canonical casing. Pure function of the input text.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let text_lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|skill| contains_token(&text_lower, &skill.to_lowercase()))
            .cloned()
            .collect()
    }
}

/// True when `token` occurs in `text` with non-alphanumeric (or absent)
/// neighbors on both sides. `java` never hits inside `javascript`; `c++`
/// followed by whitespace still hits despite ending in punctuation.
fn contains_token(text: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    for (start, _) in text.match_indices(token) {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[start + token.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(TECH_SKILLS)
    }

    #[test]
    fn test_standalone_skill_matches_once_regardless_of_casing() {
        let skills = extractor().extract("Python developer. python scripts. PYTHON.");
        assert_eq!(skills.iter().filter(|s| *s == "python").count(), 1);
    }

    #[test]
    fn test_java_does_not_match_inside_javascript() {
        let skills = extractor().extract("javascript developer");
        assert!(skills.contains(&"javascript".to_string()));
        assert!(!skills.contains(&"java".to_string()));
    }

    #[test]
    fn test_punctuated_skills_match() {
        let skills = extractor().extract("Fluent in C++, C# and Node.js since 2019");
        assert!(skills.contains(&"c++".to_string()));
        assert!(skills.contains(&"c#".to_string()));
        assert!(skills.contains(&"node.js".to_string()));
    }

    #[test]
    fn test_express_does_not_match_inside_expressway() {
        let skills = extractor().extract("took the expressway to work");
        assert!(!skills.contains(&"express".to_string()));
    }

    #[test]
    fn test_multi_word_skills_match() {
        let skills = extractor().extract("experience with machine learning and spring boot");
        assert!(skills.contains(&"machine learning".to_string()));
        assert!(skills.contains(&"spring boot".to_string()));
    }

    #[test]
    fn test_go_does_not_match_inside_mongodb_or_google() {
        let skills = extractor().extract("used MongoDB at Google");
        assert!(skills.contains(&"mongodb".to_string()));
        assert!(!skills.contains(&"go".to_string()));
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Rust, Python, Docker, kubernetes";
        assert_eq!(extractor().extract(text), extractor().extract(text));
    }
}
