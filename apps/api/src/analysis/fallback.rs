//! Fallback Generator: a complete, network-free analysis.
//!
//! Used when the primary connector is unreachable. Every number is derived
//! from the experience baseline, so the result is always well-formed and is
//! labelled with `FALLBACK_SOURCE` so it is never mistaken for market data.

use rand::Rng;

use crate::analysis::composite::{base_score, clamp_synthetic, jittered};
use crate::models::analysis::{AnalysisResult, SkillSignal, FALLBACK_SOURCE};
use crate::models::career::PLACEHOLDER_SKILL;

/// Offset of the placeholder skill's market average over the baseline.
const PLACEHOLDER_MARKET_OFFSET: i32 = 5;

/// Builds a synthetic analysis for the declared skills (possibly none).
pub fn generate_fallback<R: Rng + ?Sized>(
    experience_years: u32,
    declared_skills: &[String],
    rng: &mut R,
) -> AnalysisResult {
    let base = base_score(experience_years, declared_skills.len());

    let mut skills: Vec<SkillSignal> = declared_skills
        .iter()
        .map(|name| {
            let score = jittered(base, rng);
            let market_avg = jittered(score, rng);
            SkillSignal {
                name: name.clone(),
                score,
                market_avg,
            }
        })
        .collect();

    if skills.is_empty() {
        skills.push(SkillSignal {
            name: PLACEHOLDER_SKILL.to_string(),
            score: base,
            market_avg: clamp_synthetic(i32::from(base) + PLACEHOLDER_MARKET_OFFSET),
        });
    }

    AnalysisResult {
        market_position: jittered(base, rng),
        tech_trend: jittered(base, rng),
        demand_level: jittered(base, rng),
        overall_score: base,
        skills,
        sources: vec![FALLBACK_SOURCE.to_string()],
    }
}
