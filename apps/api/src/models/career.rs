use serde::{Deserialize, Serialize};

/// Placeholder skill used when the user declares none.
pub const PLACEHOLDER_SKILL: &str = "General";

/// User-declared career facts, as submitted by the form or the resume parser.
///
/// Every field is a raw string on the wire; the accessor methods below apply
/// the lenient parsing rules so malformed values degrade to safe defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerInput {
    pub job_title: String,
    pub experience: String,
    /// Comma-separated raw skill list.
    pub skills: String,
    pub industry: String,
    pub career_path: String,
    pub leadership_experience: String,
    pub global_experience: String,
    pub goal: String,
}

impl CareerInput {
    /// Declared skills in input order: split on commas, trimmed, empties dropped.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Years of experience. Leading digits are read, anything else is 0.
    pub fn experience_years(&self) -> u32 {
        let digits: String = self
            .experience
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return 0;
        }
        // Overflowing digit strings saturate rather than reset to zero.
        digits.parse::<u32>().unwrap_or(u32::MAX)
    }

    pub fn has_leadership_experience(&self) -> bool {
        self.leadership_experience.trim() == "true"
    }

    pub fn has_global_experience(&self) -> bool {
        self.global_experience.trim() == "true"
    }

    /// Career path split on arrows or commas, falling back to the current title.
    pub fn career_path_list(&self) -> Vec<String> {
        let steps: Vec<String> = self
            .career_path
            .replace('→', ",")
            .replace("->", ",")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if steps.is_empty() {
            vec![self.job_title.trim().to_string()]
        } else {
            steps
        }
    }

    /// Fills fields that older clients omit.
    pub fn with_defaults(mut self) -> Self {
        if self.career_path.trim().is_empty() {
            self.career_path = self.job_title.clone();
        }
        if self.leadership_experience.trim().is_empty() {
            self.leadership_experience = "false".to_string();
        }
        if self.global_experience.trim().is_empty() {
            self.global_experience = "false".to_string();
        }
        self
    }
}
