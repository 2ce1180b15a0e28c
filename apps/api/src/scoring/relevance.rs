//! Relevance scoring: pluggable, trait-based scorer measuring a resume
//! against a job posting.
//!
//! The backend is selected once at startup: `LlmRelevanceScorer` when a
//! model credential is configured, `RuleBasedScorer` otherwise. The
//! rule-based path is a configuration fallback, not error recovery; a failed
//! LLM call surfaces as an error.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::score::{Feedback, ScoreBreakdown};
use crate::scoring::prompts::ATS_PROMPT_TEMPLATE;

/// Resume text beyond this many characters is not sent to the model.
const RESUME_TEXT_LIMIT: usize = 4000;
/// Job description cap for the prompt.
const JOB_DESCRIPTION_LIMIT: usize = 2000;
/// Provider flat per-token rate used for the cost estimate.
const COST_PER_TOKEN: f64 = 0.000_000_94;
/// Rule-based scores cap below the LLM ceiling to signal lower confidence.
const RULE_BASED_CEILING: f64 = 80.0;
/// At most this many "add missing skill" suggestions on the rule-based path.
const MAX_SUGGESTIONS: usize = 5;

/// Full scoring result for one (resume, job) evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceReport {
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub feedback: Feedback,
    pub suggestions: Vec<String>,
    pub tokens_used: i64,
    pub estimated_cost: f64,
}

/// The relevance scorer seam. Implement this to swap backends without
/// touching the endpoint or handler code. Carried in `AppState` as
/// `Arc<dyn RelevanceScorer>`.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        required_skills: &[String],
        github_score: Option<f64>,
    ) -> Result<RelevanceReport, AppError>;
}

/// Shape of the JSON object the model is instructed to return. Missing
/// fields degrade to defaults rather than failing the call.
#[derive(Debug, Deserialize)]
struct LlmScorePayload {
    #[serde(default)]
    overall_score: f64,
    #[serde(default)]
    breakdown: ScoreBreakdown,
    #[serde(default)]
    matched_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    feedback: Feedback,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Scores via a chat-completion call, optionally blending a previously
/// computed GitHub reputation score into the overall score.
pub struct LlmRelevanceScorer {
    llm: LlmClient,
}

impl LlmRelevanceScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RelevanceScorer for LlmRelevanceScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        required_skills: &[String],
        github_score: Option<f64>,
    ) -> Result<RelevanceReport, AppError> {
        let prompt = ATS_PROMPT_TEMPLATE
            .replace(
                "{resume_text}",
                truncate_chars(resume_text, RESUME_TEXT_LIMIT),
            )
            .replace(
                "{job_description}",
                truncate_chars(job_description, JOB_DESCRIPTION_LIMIT),
            )
            .replace("{required_skills}", &required_skills.join(", "));

        let completion = self
            .llm
            .chat(&prompt)
            .await
            .map_err(|e| AppError::Llm(format!("ATS scoring failed: {e}")))?;

        let content = completion
            .text()
            .ok_or_else(|| AppError::Llm("model returned no choices".to_string()))?;

        let object = extract_json_object(content).ok_or_else(|| {
            AppError::Llm("model response contains no JSON object".to_string())
        })?;
        let payload: LlmScorePayload = serde_json::from_str(object)
            .map_err(|e| AppError::Llm(format!("model returned malformed JSON: {e}")))?;

        let mut breakdown = payload.breakdown;
        let overall_score = match github_score {
            Some(gh) => {
                breakdown.link_verification = gh;
                blend_with_github(payload.overall_score, gh)
            }
            None => payload.overall_score,
        };

        let tokens_used = i64::from(completion.usage.total_tokens);

        Ok(RelevanceReport {
            overall_score,
            breakdown,
            matched_skills: payload.matched_skills,
            missing_skills: payload.missing_skills,
            feedback: payload.feedback,
            suggestions: payload.suggestions,
            tokens_used,
            estimated_cost: estimated_cost(tokens_used),
        })
    }
}

/// Deterministic scorer used when no model credential is configured.
/// Substring matching only; the supplied GitHub score is ignored (the blend
/// exists only on the LLM path).
pub struct RuleBasedScorer;

#[async_trait]
impl RelevanceScorer for RuleBasedScorer {
    async fn score(
        &self,
        resume_text: &str,
        _job_description: &str,
        required_skills: &[String],
        _github_score: Option<f64>,
    ) -> Result<RelevanceReport, AppError> {
        Ok(rule_based_report(resume_text, required_skills))
    }
}

fn rule_based_report(resume_text: &str, required_skills: &[String]) -> RelevanceReport {
    let text_lower = resume_text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = required_skills
        .iter()
        .cloned()
        .partition(|s| text_lower.contains(&s.to_lowercase()));

    let ratio = matched.len() as f64 / required_skills.len().max(1) as f64;
    let overall_score = (ratio * RULE_BASED_CEILING).round();

    let suggestions: Vec<String> = missing
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|s| format!("Add missing skill: {s}"))
        .collect();

    let feedback = Feedback {
        strengths: "Matched key skills from the job description.".to_string(),
        weaknesses: "No LLM analysis available (CEREBRAS_API_KEY not set).".to_string(),
        overall: format!(
            "Rule-based score: {}/{} required skills matched.",
            matched.len(),
            required_skills.len()
        ),
    };

    RelevanceReport {
        overall_score,
        breakdown: ScoreBreakdown {
            skills_match: (ratio * 100.0).round(),
            experience_relevance: overall_score,
            project_quality: 50.0,
            cultural_fit: 50.0,
            link_verification: 0.0,
        },
        matched_skills: matched,
        missing_skills: missing,
        feedback,
        suggestions,
        tokens_used: 0,
        estimated_cost: 0.0,
    }
}

/// First brace-delimited object in free-form model output. The model is not
/// trusted to return bare JSON; prose or code fences around the object are
/// tolerated.
fn extract_json_object(text: &str) -> Option<&str> {
    let pattern = Regex::new(r"(?s)\{.*\}").expect("JSON object pattern compiles");
    pattern.find(text).map(|m| m.as_str())
}

/// Fixed 70/30 weighting favoring textual relevance over external reputation.
fn blend_with_github(llm_score: f64, github_score: f64) -> f64 {
    (llm_score * 0.7 + github_score * 0.3).round()
}

/// Cost estimate at the provider's flat per-token rate, rounded to 6 decimals.
fn estimated_cost(tokens_used: i64) -> f64 {
    (tokens_used as f64 * COST_PER_TOKEN * 1e6).round() / 1e6
}

/// Char-boundary-safe prefix truncation.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rule_based_two_of_three_skills() {
        let report = rule_based_report(
            "Shipped services in Python and Go at scale",
            &skills(&["Python", "Go", "Rust"]),
        );
        assert_eq!(report.overall_score, 53.0);
        assert_eq!(report.matched_skills, skills(&["Python", "Go"]));
        assert_eq!(report.missing_skills, skills(&["Rust"]));
        assert_eq!(report.breakdown.skills_match, 67.0);
        assert_eq!(report.breakdown.experience_relevance, 53.0);
        assert_eq!(report.breakdown.project_quality, 50.0);
        assert_eq!(report.breakdown.cultural_fit, 50.0);
        assert_eq!(report.suggestions, vec!["Add missing skill: Rust"]);
        assert_eq!(report.tokens_used, 0);
        assert_eq!(report.estimated_cost, 0.0);
    }

    #[test]
    fn test_rule_based_matching_is_case_insensitive() {
        let report = rule_based_report("PYTHON expert", &skills(&["python"]));
        assert_eq!(report.overall_score, 80.0);
        assert_eq!(report.breakdown.skills_match, 100.0);
    }

    #[test]
    fn test_rule_based_empty_required_skills_scores_zero() {
        let report = rule_based_report("any resume text", &[]);
        assert_eq!(report.overall_score, 0.0);
        assert!(report.matched_skills.is_empty());
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn test_rule_based_suggestions_capped_at_five() {
        let required = skills(&["A1", "B2", "C3", "D4", "E5", "F6", "G7"]);
        let report = rule_based_report("nothing relevant", &required);
        assert_eq!(report.suggestions.len(), 5);
        assert_eq!(report.missing_skills.len(), 7);
    }

    #[test]
    fn test_blend_is_70_30() {
        assert_eq!(blend_with_github(80.0, 40.0), 68.0);
        assert_eq!(blend_with_github(0.0, 100.0), 30.0);
    }

    #[test]
    fn test_extract_json_object_from_prose() {
        let text = "Sure! Here is the evaluation:\n{\"overall_score\": 75}\nHope this helps.";
        assert_eq!(extract_json_object(text), Some("{\"overall_score\": 75}"));
    }

    #[test]
    fn test_extract_json_object_spans_newlines() {
        let text = "{\n  \"overall_score\": 75\n}";
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_json_object_none_without_braces() {
        assert_eq!(extract_json_object("I cannot score this resume."), None);
    }

    #[test]
    fn test_llm_payload_defaults_for_missing_fields() {
        let payload: LlmScorePayload =
            serde_json::from_str("{\"overall_score\": 88}").unwrap();
        assert_eq!(payload.overall_score, 88.0);
        assert_eq!(payload.breakdown, ScoreBreakdown::default());
        assert!(payload.matched_skills.is_empty());
        assert!(payload.suggestions.is_empty());
    }

    #[test]
    fn test_llm_payload_breakdown_without_link_verification() {
        let json = r#"{
            "overall_score": 72,
            "breakdown": {
                "skills_match": 70,
                "experience_relevance": 75,
                "project_quality": 60,
                "cultural_fit": 80
            }
        }"#;
        let payload: LlmScorePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.breakdown.skills_match, 70.0);
        assert_eq!(payload.breakdown.link_verification, 0.0);
    }

    #[test]
    fn test_estimated_cost_rounds_to_six_decimals() {
        assert_eq!(estimated_cost(0), 0.0);
        assert_eq!(estimated_cost(1000), 0.00094);
        assert_eq!(estimated_cost(1234), 0.00116);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 4000), "short");
    }
}
