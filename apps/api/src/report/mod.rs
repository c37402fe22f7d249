//! Report generation: hands the scored analysis to the LLM for prose.
//!
//! The numbers and the applied rules are computed here; the model only
//! writes them up. All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::composite::{assess_skill, classify, DecisionSignals};
use crate::analysis::trend::TrendDelta;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::analysis::AnalysisResult;
use crate::models::career::CareerInput;
use crate::report::prompts::report_system_prompt;

const REPORT_MAX_TOKENS: u32 = 6000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    pub content: String,
    pub summary: String,
    pub skill_insights: Vec<SkillInsight>,
    pub roadmap: Roadmap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillInsight {
    pub name: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Roadmap {
    pub month3: Vec<String>,
    pub month6: Vec<String>,
    pub month12: Vec<String>,
}

/// Generates the report for one analysis, comparing against `previous` when given.
pub async fn generate_report(
    llm: &LlmClient,
    input: &CareerInput,
    analysis: &AnalysisResult,
    previous: Option<&AnalysisResult>,
) -> Result<ReportData, AppError> {
    let prompt = build_user_prompt(input, analysis, previous);

    let report: ReportData = llm
        .call_json(&prompt, &report_system_prompt(), REPORT_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate report: {e}")))?;

    if report.content.trim().is_empty() {
        return Err(AppError::Llm("Report content was empty".to_string()));
    }

    info!(
        "Report generated: {} skill insights, trend={}",
        report.skill_insights.len(),
        previous.is_some()
    );
    Ok(report)
}

/// Assembles the structured user prompt: profile, signals, market baseline,
/// per-skill scores with their applied rules, sources and optional trend.
pub fn build_user_prompt(
    input: &CareerInput,
    analysis: &AnalysisResult,
    previous: Option<&AnalysisResult>,
) -> String {
    let profile = json!({
        "experience_years": input.experience_years(),
        "industry": input.industry,
        "current_role": input.job_title,
        "career_path": input.career_path_list(),
        "skills": input.skill_list(),
        "leadership_experience": input.has_leadership_experience(),
        "global_experience": input.has_global_experience(),
        "career_goal": input.goal,
    });

    let signals = DecisionSignals::derive(input, analysis);
    let baseline = DecisionSignals::market_baseline(analysis);

    let skill_scores: Vec<Value> = analysis
        .skills
        .iter()
        .map(|skill| {
            let assessment = assess_skill(skill, analysis);
            json!({
                "name": assessment.name,
                "yourScore": assessment.score,
                "marketAvg": assessment.market_avg,
                "gap": assessment.gap,
                "classification": assessment.level.label(),
                "appliedRules": assessment.advice.iter().map(|a| a.label()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let mut sections = vec![
        section("USER_PROFILE", &profile),
        section("DECISION_SIGNALS", &json!(signals)),
        section("MARKET_AVERAGE", &json!(baseline)),
        section("SKILL_SCORES", &Value::Array(skill_scores)),
        section("DATA_SOURCES", &json!(analysis.sources)),
        section(
            "OVERALL",
            &json!({
                "overall_score": analysis.overall_score,
                "classification": classify(analysis.overall_score).label(),
            }),
        ),
    ];

    if let Some(previous) = previous {
        let delta = TrendDelta::between(previous, analysis);
        sections.push(section(
            "PREVIOUS_ANALYSIS",
            &json!({
                "overallScore": previous.overall_score,
                "techTrend": previous.tech_trend,
                "demandLevel": previous.demand_level,
                "skills": previous.skills,
            }),
        ));
        sections.push(section(
            "TREND_DELTA",
            &json!({
                "overall_direction": delta.overall_direction(),
                "delta": delta,
            }),
        ));
    }

    format!(
        "Analyze the current market for this role, the user's skills, a career diagnosis \
         and a development roadmap, using ONLY the data below.\n\n{}",
        sections.join("\n\n")
    )
}

fn section(title: &str, body: &Value) -> String {
    format!("[{title}]\n{body:#}")
}
