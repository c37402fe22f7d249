//! Digest highlight: what the daily subscriber email leads with.

use serde::Serialize;

use crate::analysis::composite::{classify, SignalLevel, GAP_NEEDS_IMPROVEMENT};
use crate::models::analysis::AnalysisResult;

const TOP_GAP_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub name: String,
    pub score: u8,
    pub market_avg: u8,
    pub gap: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestHighlight {
    pub overall_score: u8,
    pub level: SignalLevel,
    /// Largest gaps first; ties keep declared skill order.
    pub top_gaps: Vec<SkillGap>,
    /// The top gap, when it is large enough to need improvement.
    pub focus: Option<SkillGap>,
}

impl DigestHighlight {
    /// Builds the highlight. A subscriber without a stored analysis scores 0.
    pub fn from_analysis(analysis: Option<&AnalysisResult>) -> Self {
        let overall_score = analysis.map(|a| a.overall_score).unwrap_or(0);

        let mut gaps: Vec<SkillGap> = analysis
            .map(|a| {
                a.skills
                    .iter()
                    .map(|s| SkillGap {
                        name: s.name.clone(),
                        score: s.score,
                        market_avg: s.market_avg,
                        gap: s.gap(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        // sort_by is stable
        gaps.sort_by(|a, b| b.gap.cmp(&a.gap));
        gaps.truncate(TOP_GAP_COUNT);

        let focus = gaps
            .first()
            .filter(|g| g.gap >= GAP_NEEDS_IMPROVEMENT)
            .cloned();

        Self {
            overall_score,
            level: classify(overall_score),
            top_gaps: gaps,
            focus,
        }
    }
}
