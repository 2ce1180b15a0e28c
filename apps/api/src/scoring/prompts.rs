// Prompt constants for the relevance scoring engine.

/// ATS scoring prompt. Replace `{resume_text}`, `{job_description}` and
/// `{required_skills}` before sending. The model is instructed to return
/// bare JSON, but the response is still searched for the first JSON object
/// rather than parsed wholesale.
pub const ATS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) scoring system.

Analyze the following resume against the job description and provide a detailed evaluation.

## Resume Text:
{resume_text}

## Job Description:
{job_description}

## Required Skills:
{required_skills}

Return ONLY valid JSON in the following format:
{
  "overall_score": <0-100>,
  "breakdown": {
    "skills_match": <0-100>,
    "experience_relevance": <0-100>,
    "project_quality": <0-100>,
    "cultural_fit": <0-100>
  },
  "matched_skills": ["skill1", "skill2"],
  "missing_skills": ["skill3", "skill4"],
  "feedback": {
    "strengths": "Brief paragraph on candidate strengths",
    "weaknesses": "Brief paragraph on candidate weaknesses",
    "overall": "Brief overall assessment"
  },
  "suggestions": [
    "Actionable improvement 1",
    "Actionable improvement 2",
    "Actionable improvement 3"
  ]
}"#;
