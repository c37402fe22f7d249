// Report generation prompts.
// The rule sections are rendered from the scoring constants so the model
// classifies with exactly the same cut points as the API.

use crate::analysis::composite::{classification_rules_text, gap_rules_text};
use crate::llm_client::prompts::{
    DATA_ONLY_INSTRUCTION, JSON_ONLY_INSTRUCTION, SAME_LANGUAGE_INSTRUCTION,
};

const REPORT_ROLE: &str = "You are a senior career strategy consultant producing a \
    consulting-grade strategic career report from structured decision signals.";

const REPORT_FORMAT: &str = r#"EVIDENCE RULES:
- Every analytical statement cites the exact signal value, e.g. "Evidence: market_demand_signal 74/100, Market Avg 70/100, Gap +4".
- Every skill analysis shows: User Score -> Market Avg -> Gap -> Applied Rule. Use the appliedRules given in [SKILL_SCORES]; never recompute them.
- Every roadmap item references the Gap value and signal that triggered it.
- If data is missing for a section, say that the collected data is insufficient to produce a signal.
- When [TREND_DELTA] is present, open with a trend section that uses its numbers verbatim.

FORMATTING RULES:
- Conclusions first. Paragraphs under 4 lines.
- Show every score as a 20-block bar, e.g. `██████████░░░░░░░░░░ 50/100`.
- Badges: 🟢 Strong, 🟡 Stable, 🔴 Weak.

OUTPUT SCHEMA (return exactly this structure):
{
  "content": "full markdown report",
  "summary": "2-3 sentence executive summary citing key numbers",
  "skillInsights": [{"name": "skill name", "analysis": "1-2 sentences with score and gap"}],
  "roadmap": {
    "month3": ["action item with gap reference"],
    "month6": ["action item with gap reference"],
    "month12": ["action item with gap reference"]
  }
}"#;

/// Full system prompt for report generation.
pub fn report_system_prompt() -> String {
    format!(
        "{REPORT_ROLE}\n\n{DATA_ONLY_INSTRUCTION}\n{SAME_LANGUAGE_INSTRUCTION}\n\n\
         CLASSIFICATION (apply strictly):\n{}\n\n\
         CAREER DEVELOPMENT RULES (apply strictly):\n{}\n\n\
         {REPORT_FORMAT}\n\n{JSON_ONLY_INSTRUCTION}",
        classification_rules_text(),
        gap_rules_text(),
    )
}
