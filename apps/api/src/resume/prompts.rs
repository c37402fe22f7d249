// Resume parsing prompts.

pub const RESUME_PARSE_SYSTEM: &str = "You are a resume parser. \
    Extract career information from the given resume text. \
    If a field cannot be determined, infer a reasonable value from context. \
    Respond in the SAME LANGUAGE as the resume. \
    You MUST respond with valid JSON only. Do NOT use markdown code fences.";

pub const RESUME_PARSE_PROMPT: &str = r#"Extract the career profile from this resume.

Return exactly this structure:
{
  "jobTitle": "current or most recent job title",
  "experience": "total years of professional experience as a number string",
  "skills": "comma-separated list of technical skills",
  "industry": "industry sector",
  "goal": "career goal inferred from the trajectory"
}

Resume text:
{resume_text}"#;
