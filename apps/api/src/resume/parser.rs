//! LLM-backed resume parsing into a `CareerInput`.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::career::CareerInput;
use crate::resume::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};

/// Longer resumes are cut here before they reach the model.
pub const MAX_RESUME_CHARS: usize = 8000;
const RESUME_MAX_TOKENS: u32 = 500;

/// Raw model output. Models return numbers or arrays for some of these
/// fields, so they are normalized in `into_career_input`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub job_title: Value,
    pub experience: Value,
    pub skills: Value,
    pub industry: Value,
    pub goal: Value,
}

pub async fn parse_resume(text: &str, llm: &LlmClient) -> Result<CareerInput, AppError> {
    let prompt = RESUME_PARSE_PROMPT.replace("{resume_text}", truncate_chars(text, MAX_RESUME_CHARS));

    let parsed: ParsedResume = llm
        .call_json(&prompt, RESUME_PARSE_SYSTEM, RESUME_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to parse resume: {e}")))?;

    let input = into_career_input(parsed)?;
    info!(
        "Parsed resume: '{}', {} skills",
        input.job_title,
        input.skill_list().len()
    );
    Ok(input)
}

pub fn into_career_input(parsed: ParsedResume) -> Result<CareerInput, AppError> {
    let job_title = text_field(&parsed.job_title);
    let skills = text_field(&parsed.skills);

    if job_title.is_empty() || skills.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Could not find a job title and skills in the resume".to_string(),
        ));
    }

    let experience = match text_field(&parsed.experience) {
        e if e.is_empty() => "0".to_string(),
        e => e,
    };

    Ok(CareerInput {
        job_title,
        experience,
        skills,
        industry: text_field(&parsed.industry),
        goal: text_field(&parsed.goal),
        ..CareerInput::default()
    }
    .with_defaults())
}

/// Cuts at a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn text_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(text_field)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}
