//! Trend delta between a subscriber's previous analysis and the current one.

use serde::Serialize;

use crate::models::analysis::AnalysisResult;

/// Deltas within this band are noise.
const FLAT_BAND: i16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn of(delta: i16) -> Self {
        if delta > FLAT_BAND {
            TrendDirection::Up
        } else if delta < -FLAT_BAND {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDelta {
    pub name: String,
    pub delta: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDelta {
    pub overall_score: i16,
    pub industry_growth_signal: i16,
    pub market_demand_signal: i16,
    pub skill_competitiveness: i16,
    /// Skills present in both analyses, in current order.
    pub skill_deltas: Vec<SkillDelta>,
}

impl TrendDelta {
    pub fn between(previous: &AnalysisResult, current: &AnalysisResult) -> Self {
        let skill_deltas = current
            .skills
            .iter()
            .filter_map(|skill| {
                previous
                    .skills
                    .iter()
                    .find(|p| p.name == skill.name)
                    .map(|p| SkillDelta {
                        name: skill.name.clone(),
                        delta: diff(p.score, skill.score),
                    })
            })
            .collect();

        Self {
            overall_score: diff(previous.overall_score, current.overall_score),
            industry_growth_signal: diff(previous.tech_trend, current.tech_trend),
            market_demand_signal: diff(previous.demand_level, current.demand_level),
            skill_competitiveness: diff(previous.mean_skill_score(), current.mean_skill_score()),
            skill_deltas,
        }
    }

    pub fn overall_direction(&self) -> TrendDirection {
        TrendDirection::of(self.overall_score)
    }
}

fn diff(before: u8, after: u8) -> i16 {
    i16::from(after) - i16::from(before)
}
