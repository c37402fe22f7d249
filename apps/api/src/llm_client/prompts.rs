// Cross-cutting prompt fragments shared by every LLM-backed service.
// Each service keeps its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps the model on the numbers it was given.
pub const DATA_ONLY_INSTRUCTION: &str = "\
    Base every statement ONLY on the structured data provided. \
    Do NOT search the internet or use outside knowledge. \
    Do NOT estimate probabilities or use words such as likely, possibly or maybe. \
    Do NOT make decisions on behalf of the user.";

/// Answer in the language the user wrote in.
pub const SAME_LANGUAGE_INSTRUCTION: &str = "\
    Respond in the SAME LANGUAGE as the user's input.";
