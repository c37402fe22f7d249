use serde::{Deserialize, Serialize};

/// Provenance marker for results produced without any network data.
pub const FALLBACK_SOURCE: &str = "Fallback (offline)";

/// One skill's standing: the synthetic user score against the market signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSignal {
    pub name: String,
    pub score: u8,
    pub market_avg: u8,
}

impl SkillSignal {
    /// `market_avg - score`. Positive when the market is ahead of the user.
    pub fn gap(&self) -> i16 {
        i16::from(self.market_avg) - i16::from(self.score)
    }
}

/// Aggregate output of one analysis run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub market_position: u8,
    pub tech_trend: u8,
    pub demand_level: u8,
    pub overall_score: u8,
    /// Declared skill order, never re-sorted.
    pub skills: Vec<SkillSignal>,
    /// Contributing sources in connector invocation order.
    pub sources: Vec<String>,
}

impl AnalysisResult {
    pub fn is_fallback(&self) -> bool {
        self.sources.iter().any(|s| s == FALLBACK_SOURCE)
    }

    /// Rounded mean of the user skill scores, or `overall_score` without skills.
    pub fn mean_skill_score(&self) -> u8 {
        rounded_mean(self.skills.iter().map(|s| s.score)).unwrap_or(self.overall_score)
    }

    /// Rounded mean of the skill market averages, if there are skills.
    pub fn mean_market_avg(&self) -> Option<u8> {
        rounded_mean(self.skills.iter().map(|s| s.market_avg))
    }
}

/// Rounded arithmetic mean of 0–100 values. `None` for an empty input.
pub fn rounded_mean(values: impl IntoIterator<Item = u8>) -> Option<u8> {
    let (sum, count) = values
        .into_iter()
        .fold((0u32, 0u32), |(sum, n), v| (sum + u32::from(v), n + 1));
    if count == 0 {
        return None;
    }
    Some((f64::from(sum) / f64::from(count)).round() as u8)
}
