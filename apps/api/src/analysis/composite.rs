//! Composite Scorer: signals that no connector supplies directly.
//!
//! Owns the experience-based baseline, the bounded jitter, the profile-derived
//! signals (leadership, global portability, DX alignment) and the two rule
//! sets every consumer must share: the Strong/Stable/Weak classification and
//! the gap-driven advice. Report prompts and the digest render these rules
//! from the constants in this file, never from their own copies.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::analysis::{AnalysisResult, SkillSignal};
use crate::models::career::CareerInput;

const BASE_FLOOR: u32 = 40;
const POINTS_PER_YEAR: u32 = 5;
const POINTS_PER_SKILL: u32 = 3;
const BASE_CAP: u32 = 95;

/// Jitter is a uniform integer in `[-JITTER_BAND, JITTER_BAND]`.
pub const JITTER_BAND: i32 = 10;
/// Lower bound for every synthetic (jittered) value.
pub const SYNTHETIC_MIN: u8 = 10;
pub const SCORE_MAX: u8 = 100;

pub const STRONG_MIN: u8 = 70;
pub const STABLE_MIN: u8 = 40;

pub const GAP_NEEDS_IMPROVEMENT: i16 = 20;
pub const GAP_STRATEGIC_PIVOT: i16 = 40;
pub const TREND_FOCUSED_LEARNING: u8 = 70;
pub const DEMAND_ALTERNATIVE_MAX: u8 = 40;

/// Market comparison values the report shows next to the user's signals.
const BASELINE_INDUSTRY_GROWTH: u8 = 70;
const BASELINE_MARKET_DEMAND: u8 = 70;
const BASELINE_SKILL_COMPETITIVENESS: u8 = 70;
const BASELINE_DX_ALIGNMENT: u8 = 65;
const BASELINE_GLOBAL_PORTABILITY: u8 = 60;
const BASELINE_LEADERSHIP: u8 = 58;

// ────────────────────────────────────────────────────────────────────────────
// Baseline and jitter
// ────────────────────────────────────────────────────────────────────────────

/// `clamp(40 + years*5 + skills*3, 0, 95)`.
pub fn base_score(experience_years: u32, skill_count: usize) -> u8 {
    let skills = u32::try_from(skill_count).unwrap_or(u32::MAX);
    let raw = BASE_FLOOR
        .saturating_add(experience_years.saturating_mul(POINTS_PER_YEAR))
        .saturating_add(skills.saturating_mul(POINTS_PER_SKILL));
    raw.min(BASE_CAP) as u8
}

/// Uniform integer jitter in `[-JITTER_BAND, JITTER_BAND]`.
pub fn variance<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(-JITTER_BAND..=JITTER_BAND)
}

/// Clamps any intermediate value to the synthetic range `[10, 100]`.
pub fn clamp_synthetic(value: i32) -> u8 {
    value.clamp(i32::from(SYNTHETIC_MIN), i32::from(SCORE_MAX)) as u8
}

/// `clamp(value + variance(), 10, 100)`.
pub fn jittered<R: Rng + ?Sized>(value: u8, rng: &mut R) -> u8 {
    clamp_synthetic(i32::from(value) + variance(rng))
}

// ────────────────────────────────────────────────────────────────────────────
// Profile-derived signals
// ────────────────────────────────────────────────────────────────────────────

pub fn leadership_signal(input: &CareerInput) -> u8 {
    let years = input.experience_years();
    if input.has_leadership_experience() {
        50u32.saturating_add(years.saturating_mul(2)).min(95) as u8
    } else {
        30u32.saturating_add(years).min(60) as u8
    }
}

pub fn global_signal(input: &CareerInput) -> u8 {
    let years = input.experience_years();
    if input.has_global_experience() {
        55u32.saturating_add(years).min(85) as u8
    } else {
        25u32.saturating_add(years).min(50) as u8
    }
}

/// DX alignment is the tech trend, unchanged.
pub fn dx_alignment_signal(analysis: &AnalysisResult) -> u8 {
    analysis.tech_trend
}

/// The six decision signals handed to the report collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSignals {
    pub industry_growth_signal: u8,
    pub market_demand_signal: u8,
    pub skill_competitiveness_signal: u8,
    pub dx_alignment_signal: u8,
    pub global_portability_signal: u8,
    pub leadership_signal: u8,
}

impl DecisionSignals {
    pub fn derive(input: &CareerInput, analysis: &AnalysisResult) -> Self {
        Self {
            industry_growth_signal: analysis.tech_trend,
            market_demand_signal: analysis.demand_level,
            skill_competitiveness_signal: analysis.mean_skill_score(),
            dx_alignment_signal: dx_alignment_signal(analysis),
            global_portability_signal: global_signal(input),
            leadership_signal: leadership_signal(input),
        }
    }

    /// Market-side values for the same six signals.
    pub fn market_baseline(analysis: &AnalysisResult) -> Self {
        Self {
            industry_growth_signal: BASELINE_INDUSTRY_GROWTH,
            market_demand_signal: BASELINE_MARKET_DEMAND,
            skill_competitiveness_signal: analysis
                .mean_market_avg()
                .unwrap_or(BASELINE_SKILL_COMPETITIVENESS),
            dx_alignment_signal: BASELINE_DX_ALIGNMENT,
            global_portability_signal: BASELINE_GLOBAL_PORTABILITY,
            leadership_signal: BASELINE_LEADERSHIP,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classification and gap rules
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalLevel {
    Strong,
    Stable,
    Weak,
}

impl SignalLevel {
    pub fn label(self) -> &'static str {
        match self {
            SignalLevel::Strong => "Strong",
            SignalLevel::Stable => "Stable",
            SignalLevel::Weak => "Weak",
        }
    }
}

/// `>= 70` Strong, `40..=69` Stable, `<= 39` Weak.
pub fn classify(score: u8) -> SignalLevel {
    if score >= STRONG_MIN {
        SignalLevel::Strong
    } else if score >= STABLE_MIN {
        SignalLevel::Stable
    } else {
        SignalLevel::Weak
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapAdvice {
    NeedsImprovement,
    StrategicPivot,
    FocusedLearning,
    AlternativeTechnology,
}

impl GapAdvice {
    pub fn label(self) -> &'static str {
        match self {
            GapAdvice::NeedsImprovement => "needs improvement",
            GapAdvice::StrategicPivot => "consider strategic pivot",
            GapAdvice::FocusedLearning => "recommend 3-month focused learning",
            GapAdvice::AlternativeTechnology => "suggest alternative technology",
        }
    }
}

/// Every rule that fires for the given gap, trend and demand, in rule order.
/// The rules are cumulative: a pivot-sized gap also needs improvement.
pub fn gap_advice(gap: i16, trend: u8, demand: u8) -> Vec<GapAdvice> {
    let mut advice = Vec::new();
    if gap >= GAP_NEEDS_IMPROVEMENT {
        advice.push(GapAdvice::NeedsImprovement);
    }
    if gap >= GAP_STRATEGIC_PIVOT {
        advice.push(GapAdvice::StrategicPivot);
    }
    if trend >= TREND_FOCUSED_LEARNING && gap >= GAP_NEEDS_IMPROVEMENT {
        advice.push(GapAdvice::FocusedLearning);
    }
    if demand <= DEMAND_ALTERNATIVE_MAX {
        advice.push(GapAdvice::AlternativeTechnology);
    }
    advice
}

/// A skill with its gap, level and advice resolved against the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAssessment {
    pub name: String,
    pub score: u8,
    pub market_avg: u8,
    pub gap: i16,
    pub level: SignalLevel,
    pub advice: Vec<GapAdvice>,
}

pub fn assess_skill(skill: &SkillSignal, analysis: &AnalysisResult) -> SkillAssessment {
    let gap = skill.gap();
    SkillAssessment {
        name: skill.name.clone(),
        score: skill.score,
        market_avg: skill.market_avg,
        gap,
        level: classify(skill.score),
        advice: gap_advice(gap, analysis.tech_trend, analysis.demand_level),
    }
}

/// Classification rules as prompt text, rendered from the constants above.
pub fn classification_rules_text() -> String {
    format!(
        "- Score >= {strong} -> Strong\n- Score {stable}-{stable_max} -> Stable\n- Score <= {weak_max} -> Weak",
        strong = STRONG_MIN,
        stable = STABLE_MIN,
        stable_max = STRONG_MIN - 1,
        weak_max = STABLE_MIN - 1,
    )
}

/// Gap rules as prompt text, rendered from the constants above.
pub fn gap_rules_text() -> String {
    format!(
        "- Gap >= {improve} -> {a}\n- Gap >= {pivot} -> {b}\n- Trend >= {trend} AND Gap >= {improve} -> {c}\n- Demand <= {demand} -> {d}",
        improve = GAP_NEEDS_IMPROVEMENT,
        pivot = GAP_STRATEGIC_PIVOT,
        trend = TREND_FOCUSED_LEARNING,
        demand = DEMAND_ALTERNATIVE_MAX,
        a = GapAdvice::NeedsImprovement.label(),
        b = GapAdvice::StrategicPivot.label(),
        c = GapAdvice::FocusedLearning.label(),
        d = GapAdvice::AlternativeTechnology.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(experience: &str, leadership: &str, global: &str) -> CareerInput {
        CareerInput {
            job_title: "Engineer".to_string(),
            experience: experience.to_string(),
            leadership_experience: leadership.to_string(),
            global_experience: global.to_string(),
            ..Default::default()
        }
    }

    fn analysis(tech_trend: u8, demand_level: u8, skills: Vec<SkillSignal>) -> AnalysisResult {
        AnalysisResult {
            market_position: 50,
            tech_trend,
            demand_level,
            overall_score: 60,
            skills,
            sources: vec![],
        }
    }

    #[test]
    fn test_base_score() {
        assert_eq!(base_score(0, 0), 40);
        assert_eq!(base_score(5, 2), 71);
        assert_eq!(base_score(10, 3), 95); // 99 capped
        assert_eq!(base_score(u32::MAX, usize::MAX), 95);
    }

    #[test]
    fn test_variance_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let v = variance(&mut rng);
            assert!((-JITTER_BAND..=JITTER_BAND).contains(&v));
        }
    }

    #[test]
    fn test_jittered_is_clamped() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!((SYNTHETIC_MIN..=SCORE_MAX).contains(&jittered(0, &mut rng)));
            assert!((SYNTHETIC_MIN..=SCORE_MAX).contains(&jittered(100, &mut rng)));
        }
    }

    #[test]
    fn test_jitter_is_reproducible_for_a_seed() {
        let a: Vec<u8> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| jittered(60, &mut rng)).collect()
        };
        let b: Vec<u8> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| jittered(60, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_leadership_signal() {
        assert_eq!(leadership_signal(&profile("10", "true", "false")), 70);
        assert_eq!(leadership_signal(&profile("30", "true", "false")), 95);
        assert_eq!(leadership_signal(&profile("10", "false", "false")), 40);
        assert_eq!(leadership_signal(&profile("45", "false", "false")), 60);
    }

    #[test]
    fn test_global_signal() {
        assert_eq!(global_signal(&profile("10", "false", "true")), 65);
        assert_eq!(global_signal(&profile("40", "false", "true")), 85);
        assert_eq!(global_signal(&profile("10", "false", "false")), 35);
        assert_eq!(global_signal(&profile("40", "false", "false")), 50);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(100), SignalLevel::Strong);
        assert_eq!(classify(70), SignalLevel::Strong);
        assert_eq!(classify(69), SignalLevel::Stable);
        assert_eq!(classify(40), SignalLevel::Stable);
        assert_eq!(classify(39), SignalLevel::Weak);
        assert_eq!(classify(0), SignalLevel::Weak);
    }

    #[test]
    fn test_classification_is_total_and_exclusive() {
        for s in 0..=SCORE_MAX {
            let level = classify(s);
            assert_eq!(level == SignalLevel::Strong, s >= 70);
            assert_eq!(level == SignalLevel::Stable, (40..=69).contains(&s));
            assert_eq!(level == SignalLevel::Weak, s <= 39);
        }
    }

    #[test]
    fn test_gap_rules_are_cumulative() {
        assert!(gap_advice(19, 50, 80).is_empty());
        assert_eq!(gap_advice(20, 50, 80), vec![GapAdvice::NeedsImprovement]);
        assert_eq!(
            gap_advice(40, 50, 80),
            vec![GapAdvice::NeedsImprovement, GapAdvice::StrategicPivot]
        );
        assert_eq!(
            gap_advice(25, 70, 80),
            vec![GapAdvice::NeedsImprovement, GapAdvice::FocusedLearning]
        );
        assert_eq!(gap_advice(-15, 90, 40), vec![GapAdvice::AlternativeTechnology]);
    }

    #[test]
    fn test_pivot_always_implies_improvement() {
        for gap in -100..=100 {
            let advice = gap_advice(gap, 50, 50);
            if advice.contains(&GapAdvice::StrategicPivot) {
                assert!(advice.contains(&GapAdvice::NeedsImprovement));
            }
        }
    }

    #[test]
    fn test_decision_signals() {
        let input = profile("10", "true", "false");
        let result = analysis(
            77,
            64,
            vec![
                SkillSignal {
                    name: "Rust".to_string(),
                    score: 80,
                    market_avg: 70,
                },
                SkillSignal {
                    name: "Go".to_string(),
                    score: 61,
                    market_avg: 90,
                },
            ],
        );

        let signals = DecisionSignals::derive(&input, &result);
        assert_eq!(signals.industry_growth_signal, 77);
        assert_eq!(signals.market_demand_signal, 64);
        assert_eq!(signals.skill_competitiveness_signal, 71); // 70.5
        assert_eq!(signals.dx_alignment_signal, 77);
        assert_eq!(signals.global_portability_signal, 35);
        assert_eq!(signals.leadership_signal, 70);

        let baseline = DecisionSignals::market_baseline(&result);
        assert_eq!(baseline.skill_competitiveness_signal, 80);
        assert_eq!(baseline.leadership_signal, 58);
    }

    #[test]
    fn test_market_baseline_without_skills() {
        let baseline = DecisionSignals::market_baseline(&analysis(50, 50, vec![]));
        assert_eq!(baseline.skill_competitiveness_signal, 70);
    }

    #[test]
    fn test_assess_skill() {
        let skill = SkillSignal {
            name: "Kotlin".to_string(),
            score: 35,
            market_avg: 80,
        };
        let result = analysis(72, 55, vec![skill.clone()]);
        let assessment = assess_skill(&skill, &result);
        assert_eq!(assessment.gap, 45);
        assert_eq!(assessment.level, SignalLevel::Weak);
        assert_eq!(
            assessment.advice,
            vec![
                GapAdvice::NeedsImprovement,
                GapAdvice::StrategicPivot,
                GapAdvice::FocusedLearning
            ]
        );
    }

    #[test]
    fn test_rule_text_uses_constants() {
        let classification = classification_rules_text();
        assert!(classification.contains(">= 70 -> Strong"));
        assert!(classification.contains("40-69 -> Stable"));
        assert!(classification.contains("<= 39 -> Weak"));

        let gaps = gap_rules_text();
        assert!(gaps.contains("Gap >= 40 -> consider strategic pivot"));
        assert!(gaps.contains("Demand <= 40 -> suggest alternative technology"));
    }
}
