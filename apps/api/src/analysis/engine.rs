//! Aggregation Engine: turns one `CareerInput` into one `AnalysisResult`.
//!
//! Flow: split skills → fan out to all connectors (settle all) →
//!       primary-failure gate → per-skill market averages → composites.
//!
//! The network half (`AnalysisEngine::collect`) and the arithmetic half
//! (`aggregate`) are separate so the arithmetic can be driven by recorded
//! connector outcomes and a seeded RNG.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use rand::Rng;
use tracing::{info, warn};

use crate::analysis::composite::{base_score, jittered};
use crate::analysis::fallback::generate_fallback;
use crate::config::Config;
use crate::models::analysis::{rounded_mean, AnalysisResult, SkillSignal};
use crate::models::career::{CareerInput, PLACEHOLDER_SKILL};
use crate::signals::{
    build_http_client, ConnectorKind, GitHubConnector, NpmConnector, PyPiConnector,
    SignalConnector, SignalError, SignalOutcome, StackExchangeConnector,
};

/// Upper bound on skills per analysis. Each one costs a call per connector.
pub const MAX_QUERIED_SKILLS: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Connector set
// ────────────────────────────────────────────────────────────────────────────

/// One connector per family. Swappable for tests.
#[derive(Clone)]
pub struct Connectors {
    pub repositories: Arc<dyn SignalConnector>,
    pub questions: Arc<dyn SignalConnector>,
    pub downloads: Arc<dyn SignalConnector>,
    pub releases: Arc<dyn SignalConnector>,
}

impl Connectors {
    /// Live HTTP connectors against the configured public APIs.
    pub fn from_config(config: &Config) -> Result<Self, SignalError> {
        let client = build_http_client(config.connector_timeout)?;
        Ok(Self {
            repositories: Arc::new(GitHubConnector::new(
                client.clone(),
                config.github_api_url.clone(),
            )),
            questions: Arc::new(StackExchangeConnector::new(
                client.clone(),
                config.stackexchange_api_url.clone(),
            )),
            downloads: Arc::new(NpmConnector::new(client.clone(), config.npm_api_url.clone())),
            releases: Arc::new(PyPiConnector::new(client, config.pypi_api_url.clone())),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Settled fan-out results
// ────────────────────────────────────────────────────────────────────────────

/// Every connector outcome of one analysis. Per-skill vectors are indexed
/// like the queried skill list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorReadings {
    pub job_title: SignalOutcome,
    pub repositories: Vec<SignalOutcome>,
    pub questions: Vec<SignalOutcome>,
    pub downloads: Vec<SignalOutcome>,
    pub releases: Vec<SignalOutcome>,
}

impl ConnectorReadings {
    /// The primary connector failed outright: the job-title call, or every skill call.
    pub fn primary_failed(&self) -> bool {
        self.job_title.is_unavailable()
            || (!self.repositories.is_empty()
                && self.repositories.iter().all(SignalOutcome::is_unavailable))
    }

    fn outcomes(&self, kind: ConnectorKind) -> &[SignalOutcome] {
        match kind {
            ConnectorKind::Repositories => &self.repositories,
            ConnectorKind::Questions => &self.questions,
            ConnectorKind::Downloads => &self.downloads,
            ConnectorKind::Releases => &self.releases,
        }
    }

    fn secondary(&self) -> impl Iterator<Item = &[SignalOutcome]> + '_ {
        ConnectorKind::ALL
            .into_iter()
            .filter(|kind| *kind != ConnectorKind::Repositories)
            .map(|kind| self.outcomes(kind))
    }

    /// Sources in invocation order: connectors that found at least one skill.
    fn sources(&self) -> Vec<String> {
        ConnectorKind::ALL
            .into_iter()
            .filter(|kind| self.outcomes(*kind).iter().any(|o| o.score().is_some()))
            .map(|kind| kind.source_label().to_string())
            .collect()
    }

    /// Primary score for a skill; a missing reading counts as zero.
    fn primary_score(&self, index: usize) -> u8 {
        self.repositories
            .get(index)
            .and_then(SignalOutcome::score_or_zero)
            .unwrap_or(0)
    }

    /// Primary score plus every secondary score found for the skill.
    fn skill_scores(&self, index: usize) -> Vec<u8> {
        let mut scores = vec![self.primary_score(index)];
        for outcomes in self.secondary() {
            if let Some(score) = outcomes.get(index).and_then(SignalOutcome::score) {
                scores.push(score);
            }
        }
        scores
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

pub struct AnalysisEngine {
    connectors: Connectors,
    call_timeout: Duration,
}

impl AnalysisEngine {
    pub fn new(connectors: Connectors, call_timeout: Duration) -> Self {
        Self {
            connectors,
            call_timeout,
        }
    }

    /// Runs one full analysis. Never fails: connector trouble ends in either a
    /// partially-sourced result or the offline fallback.
    pub async fn analyze<R: Rng + Send>(&self, input: &CareerInput, rng: &mut R) -> AnalysisResult {
        let mut declared = input.skill_list();
        if declared.len() > MAX_QUERIED_SKILLS {
            warn!(
                "'{}' declared {} skills, analyzing the first {MAX_QUERIED_SKILLS}",
                input.job_title,
                declared.len()
            );
            declared.truncate(MAX_QUERIED_SKILLS);
        }
        let queried = queried_skills(&declared);

        let readings = self.collect(input.job_title.trim(), &queried).await;
        let result = aggregate(input.experience_years(), &declared, &queried, &readings, rng);

        info!(
            "Analysis for '{}': overall={} fallback={} sources={:?}",
            input.job_title,
            result.overall_score,
            result.is_fallback(),
            result.sources
        );
        result
    }

    /// Issues every connector call concurrently and waits for all of them.
    pub async fn collect(&self, job_title: &str, skills: &[String]) -> ConnectorReadings {
        let title_call = async {
            if job_title.is_empty() {
                SignalOutcome::NotFound
            } else {
                self.bounded(self.connectors.repositories.as_ref(), job_title)
                    .await
            }
        };

        let (job_title, repositories, questions, downloads, releases) = tokio::join!(
            title_call,
            self.fan_out(self.connectors.repositories.as_ref(), skills),
            self.fan_out(self.connectors.questions.as_ref(), skills),
            self.fan_out(self.connectors.downloads.as_ref(), skills),
            self.fan_out(self.connectors.releases.as_ref(), skills),
        );

        ConnectorReadings {
            job_title,
            repositories,
            questions,
            downloads,
            releases,
        }
    }

    async fn fan_out(&self, connector: &dyn SignalConnector, skills: &[String]) -> Vec<SignalOutcome> {
        join_all(skills.iter().map(|skill| self.bounded(connector, skill))).await
    }

    async fn bounded(&self, connector: &dyn SignalConnector, identifier: &str) -> SignalOutcome {
        match tokio::time::timeout(self.call_timeout, connector.fetch_signal(identifier)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    "{:?} connector timed out after {}ms for '{identifier}'",
                    connector.kind(),
                    self.call_timeout.as_millis()
                );
                SignalOutcome::Unavailable
            }
        }
    }
}

/// Skills sent to the connectors: the declared list, or the placeholder.
pub fn queried_skills(declared: &[String]) -> Vec<String> {
    if declared.is_empty() {
        vec![PLACEHOLDER_SKILL.to_string()]
    } else {
        declared.to_vec()
    }
}

/// Builds the result from settled connector readings.
///
/// `declared` drives the baseline skill count and the fallback skill list;
/// `queried` names the skills the readings refer to.
pub fn aggregate<R: Rng + ?Sized>(
    experience_years: u32,
    declared: &[String],
    queried: &[String],
    readings: &ConnectorReadings,
    rng: &mut R,
) -> AnalysisResult {
    if readings.primary_failed() {
        warn!("Primary connector unavailable, switching to offline fallback");
        return generate_fallback(experience_years, declared, rng);
    }

    let base = base_score(experience_years, declared.len());

    let skills: Vec<SkillSignal> = queried
        .iter()
        .enumerate()
        .map(|(i, name)| SkillSignal {
            name: name.clone(),
            score: jittered(base, rng),
            market_avg: rounded_mean(readings.skill_scores(i)).unwrap_or(0),
        })
        .collect();

    let tech_trend = rounded_mean((0..queried.len()).map(|i| readings.primary_score(i))).unwrap_or(0);
    let market_position = readings.job_title.score_or_zero().unwrap_or(0);

    let demand_level = match rounded_mean(readings.questions.iter().filter_map(SignalOutcome::score)) {
        Some(demand) => demand,
        None => jittered(base, rng),
    };

    let overall_score =
        rounded_mean([market_position, tech_trend, demand_level]).unwrap_or(base);

    AnalysisResult {
        market_position,
        tech_trend,
        demand_level,
        overall_score,
        skills,
        sources: readings.sources(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::models::analysis::FALLBACK_SOURCE;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// In-memory connector answering from a table of raw counts.
    struct FakeConnector {
        kind: ConnectorKind,
        counts: HashMap<String, u64>,
        otherwise: SignalOutcome,
        calls: AtomicUsize,
    }

    impl FakeConnector {
        fn new(kind: ConnectorKind, counts: &[(&str, u64)], otherwise: SignalOutcome) -> Arc<Self> {
            Arc::new(Self {
                kind,
                counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                otherwise,
                calls: AtomicUsize::new(0),
            })
        }

        fn down(kind: ConnectorKind) -> Arc<Self> {
            Self::new(kind, &[], SignalOutcome::Unavailable)
        }
    }

    #[async_trait]
    impl SignalConnector for FakeConnector {
        fn kind(&self) -> ConnectorKind {
            self.kind
        }

        async fn fetch_signal(&self, identifier: &str) -> SignalOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.counts.get(identifier) {
                Some(count) => SignalOutcome::from_count(self.kind, *count),
                None => self.otherwise,
            }
        }
    }

    /// Never answers within any sane timeout.
    struct StalledConnector;

    #[async_trait]
    impl SignalConnector for StalledConnector {
        fn kind(&self) -> ConnectorKind {
            ConnectorKind::Questions
        }

        async fn fetch_signal(&self, _identifier: &str) -> SignalOutcome {
            tokio::time::sleep(Duration::from_secs(3_600)).await;
            SignalOutcome::NotFound
        }
    }

    fn engine(
        repositories: Arc<dyn SignalConnector>,
        questions: Arc<dyn SignalConnector>,
        downloads: Arc<dyn SignalConnector>,
        releases: Arc<dyn SignalConnector>,
    ) -> AnalysisEngine {
        AnalysisEngine::new(
            Connectors {
                repositories,
                questions,
                downloads,
                releases,
            },
            TIMEOUT,
        )
    }

    fn input(job_title: &str, skills: &str, experience: &str) -> CareerInput {
        CareerInput {
            job_title: job_title.to_string(),
            skills: skills.to_string(),
            experience: experience.to_string(),
            ..Default::default()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn found(kind: ConnectorKind, count: u64) -> SignalOutcome {
        SignalOutcome::from_count(kind, count)
    }

    #[tokio::test]
    async fn test_primary_only_market_averages() {
        let repos = FakeConnector::new(
            ConnectorKind::Repositories,
            &[("Python", 900_000), ("Rust", 50_000), ("Data Engineer", 10_000)],
            SignalOutcome::NotFound,
        );
        let engine = engine(
            repos,
            FakeConnector::down(ConnectorKind::Questions),
            FakeConnector::down(ConnectorKind::Downloads),
            FakeConnector::down(ConnectorKind::Releases),
        );

        let mut rng = StdRng::seed_from_u64(5);
        let result = engine
            .analyze(&input("Data Engineer", "Python, Rust", "5"), &mut rng)
            .await;

        assert_eq!(result.skills.len(), 2);
        assert_eq!(result.skills[0].name, "Python");
        assert_eq!(result.skills[0].market_avg, 99);
        assert_eq!(result.skills[1].name, "Rust");
        assert_eq!(result.skills[1].market_avg, 78);
        assert_eq!(result.tech_trend, 89); // mean(99, 78) = 88.5
        assert_eq!(result.market_position, 67); // log10(10^4) / 6
        assert_eq!(result.sources, vec!["GitHub API"]);
    }

    #[tokio::test]
    async fn test_empty_skills_use_placeholder() {
        let repos = FakeConnector::new(
            ConnectorKind::Repositories,
            &[("General", 1_000), ("Engineer", 100_000)],
            SignalOutcome::NotFound,
        );
        let engine = engine(
            repos.clone(),
            FakeConnector::down(ConnectorKind::Questions),
            FakeConnector::down(ConnectorKind::Downloads),
            FakeConnector::down(ConnectorKind::Releases),
        );

        let result = engine
            .analyze(&input("Engineer", "", "0"), &mut StdRng::seed_from_u64(1))
            .await;

        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].name, "General");
        assert_eq!(result.skills[0].market_avg, 50);
        // title + one placeholder skill
        assert_eq!(repos.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_total_failure_falls_back() {
        let engine = engine(
            FakeConnector::down(ConnectorKind::Repositories),
            FakeConnector::down(ConnectorKind::Questions),
            FakeConnector::down(ConnectorKind::Downloads),
            FakeConnector::down(ConnectorKind::Releases),
        );

        let result = engine
            .analyze(
                &input("Backend Developer", "Java,Go,Kotlin", "10"),
                &mut StdRng::seed_from_u64(3),
            )
            .await;

        assert_eq!(result.overall_score, 95);
        assert_eq!(result.sources, vec![FALLBACK_SOURCE]);
        assert_eq!(result.skills.len(), 3);
    }

    #[tokio::test]
    async fn test_questions_failure_uses_primary_alone() {
        let repos = FakeConnector::new(
            ConnectorKind::Repositories,
            &[("Haskell", 100_000), ("Researcher", 1_000)],
            SignalOutcome::NotFound,
        );
        let engine = engine(
            repos,
            FakeConnector::down(ConnectorKind::Questions),
            FakeConnector::new(ConnectorKind::Downloads, &[], SignalOutcome::NotFound),
            FakeConnector::new(ConnectorKind::Releases, &[], SignalOutcome::NotFound),
        );

        let mut rng = StdRng::seed_from_u64(9);
        let result = engine
            .analyze(&input("Researcher", "Haskell", "2"), &mut rng)
            .await;

        assert_eq!(result.skills[0].market_avg, 83); // log10(10^5) / 6
        assert_eq!(result.sources, vec!["GitHub API"]);
        // demand falls back to the jittered baseline: base = 40 + 10 + 3
        assert!((43..=63).contains(&result.demand_level));
    }

    #[tokio::test]
    async fn test_all_sources_in_invocation_order() {
        let engine = engine(
            FakeConnector::new(
                ConnectorKind::Repositories,
                &[("react", 100_000), ("Frontend", 100_000)],
                SignalOutcome::NotFound,
            ),
            FakeConnector::new(ConnectorKind::Questions, &[("react", 10_000)], SignalOutcome::NotFound),
            FakeConnector::new(ConnectorKind::Downloads, &[("react", 1_000_000)], SignalOutcome::NotFound),
            FakeConnector::new(ConnectorKind::Releases, &[("react", 10)], SignalOutcome::NotFound),
        );

        let result = engine
            .analyze(&input("Frontend", "react", "3"), &mut StdRng::seed_from_u64(2))
            .await;

        assert_eq!(
            result.sources,
            vec!["GitHub API", "StackExchange API", "NPM Registry", "PyPI API"]
        );
        // mean(83, 57, 67, 33) = 60
        assert_eq!(result.skills[0].market_avg, 60);
        assert_eq!(result.demand_level, 57);
        assert_eq!(result.overall_score, 74); // mean(83, 83, 57) = 74.33
    }

    #[test]
    fn test_market_avg_composition_varies_per_skill() {
        let readings = ConnectorReadings {
            job_title: found(ConnectorKind::Repositories, 1_000),
            repositories: vec![
                found(ConnectorKind::Repositories, 50_000),
                found(ConnectorKind::Repositories, 50_000),
            ],
            questions: vec![found(ConnectorKind::Questions, 10_000), SignalOutcome::NotFound],
            downloads: vec![SignalOutcome::NotFound, SignalOutcome::Unavailable],
            releases: vec![found(ConnectorKind::Releases, 10), SignalOutcome::NotFound],
        };
        let skills = names(&["Go", "Elixir"]);

        let result = aggregate(4, &skills, &skills, &readings, &mut StdRng::seed_from_u64(8));

        assert_eq!(result.skills[0].market_avg, 56); // mean(78, 57, 33)
        assert_eq!(result.skills[1].market_avg, 78); // primary alone
        assert_eq!(result.sources, vec!["GitHub API", "StackExchange API", "PyPI API"]);
    }

    #[test]
    fn test_partial_primary_miss_is_scored_zero() {
        let readings = ConnectorReadings {
            job_title: found(ConnectorKind::Repositories, 1_000_000),
            repositories: vec![found(ConnectorKind::Repositories, 1_000), SignalOutcome::Unavailable],
            questions: vec![SignalOutcome::Unavailable; 2],
            downloads: vec![SignalOutcome::Unavailable; 2],
            releases: vec![SignalOutcome::Unavailable; 2],
        };
        let skills = names(&["Zig", "Nim"]);

        let result = aggregate(1, &skills, &skills, &readings, &mut StdRng::seed_from_u64(4));

        assert!(!result.is_fallback());
        assert_eq!(result.skills[0].market_avg, 50);
        assert_eq!(result.skills[1].market_avg, 0);
        assert_eq!(result.tech_trend, 25);
        assert_eq!(result.market_position, 100);
    }

    #[test]
    fn test_title_failure_triggers_fallback() {
        let readings = ConnectorReadings {
            job_title: SignalOutcome::Unavailable,
            repositories: vec![found(ConnectorKind::Repositories, 1_000)],
            questions: vec![found(ConnectorKind::Questions, 1_000)],
            downloads: vec![SignalOutcome::NotFound],
            releases: vec![SignalOutcome::NotFound],
        };
        let skills = names(&["Scala"]);

        let result = aggregate(3, &skills, &skills, &readings, &mut StdRng::seed_from_u64(4));

        assert_eq!(result.sources, vec![FALLBACK_SOURCE]);
        assert_eq!(result.overall_score, base_score(3, 1));
    }

    #[test]
    fn test_not_found_title_is_a_legitimate_zero() {
        let readings = ConnectorReadings {
            job_title: SignalOutcome::NotFound,
            repositories: vec![SignalOutcome::NotFound],
            questions: vec![SignalOutcome::NotFound],
            downloads: vec![SignalOutcome::NotFound],
            releases: vec![SignalOutcome::NotFound],
        };
        let skills = names(&["Obscure"]);

        let result = aggregate(0, &skills, &skills, &readings, &mut StdRng::seed_from_u64(4));

        assert!(!result.is_fallback());
        assert_eq!(result.market_position, 0);
        assert_eq!(result.tech_trend, 0);
        assert_eq!(result.skills[0].market_avg, 0);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_sources_list_only_connectors_that_found_a_skill() {
        let readings = ConnectorReadings {
            job_title: found(ConnectorKind::Repositories, 10_000),
            repositories: vec![SignalOutcome::NotFound; 2],
            questions: vec![SignalOutcome::NotFound, found(ConnectorKind::Questions, 1_000)],
            downloads: vec![SignalOutcome::Unavailable; 2],
            releases: vec![SignalOutcome::NotFound; 2],
        };
        let skills = names(&["Foo", "Bar"]);

        let result = aggregate(2, &skills, &skills, &readings, &mut StdRng::seed_from_u64(4));

        assert!(!result.is_fallback());
        assert_eq!(result.market_position, 67);
        assert_eq!(result.sources, vec!["StackExchange API"]);
    }

    #[test]
    fn test_overall_is_mean_of_composites() {
        let readings = ConnectorReadings {
            job_title: found(ConnectorKind::Repositories, 100),
            repositories: vec![found(ConnectorKind::Repositories, 1_000_000)],
            questions: vec![found(ConnectorKind::Questions, 100_000)],
            downloads: vec![SignalOutcome::NotFound],
            releases: vec![SignalOutcome::NotFound],
        };
        let skills = names(&["Kubernetes"]);

        let result = aggregate(0, &skills, &skills, &readings, &mut StdRng::seed_from_u64(4));

        // mean(33, 100, 71) = 68
        assert_eq!(result.market_position, 33);
        assert_eq!(result.tech_trend, 100);
        assert_eq!(result.demand_level, 71);
        assert_eq!(result.overall_score, 68);
    }

    #[test]
    fn test_results_always_bounded() {
        let outcomes = [
            SignalOutcome::Unavailable,
            SignalOutcome::NotFound,
            found(ConnectorKind::Repositories, u64::MAX),
            found(ConnectorKind::Repositories, 2),
        ];
        let skills = names(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(1234);

        for (seed, title) in outcomes.iter().enumerate() {
            for repo in &outcomes {
                for other in &outcomes {
                    let readings = ConnectorReadings {
                        job_title: *title,
                        repositories: vec![*repo, *other],
                        questions: vec![*other, *repo],
                        downloads: vec![*other; 2],
                        releases: vec![*repo; 2],
                    };
                    let years = (seed as u32) * 15;
                    let result = aggregate(years, &skills, &skills, &readings, &mut rng);
                    for v in [
                        result.market_position,
                        result.tech_trend,
                        result.demand_level,
                        result.overall_score,
                    ] {
                        assert!(v <= 100);
                    }
                    for s in &result.skills {
                        assert!(s.score <= 100 && s.market_avg <= 100);
                    }
                    let mut deduped = result.sources.clone();
                    deduped.dedup();
                    assert_eq!(deduped, result.sources);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_empty_title_skips_the_title_call() {
        let repos = FakeConnector::new(ConnectorKind::Repositories, &[("Go", 1_000)], SignalOutcome::Unavailable);
        let engine = engine(
            repos.clone(),
            FakeConnector::down(ConnectorKind::Questions),
            FakeConnector::down(ConnectorKind::Downloads),
            FakeConnector::down(ConnectorKind::Releases),
        );

        let result = engine
            .analyze(&input("  ", "Go", "1"), &mut StdRng::seed_from_u64(6))
            .await;

        assert!(!result.is_fallback());
        assert_eq!(result.market_position, 0);
        assert_eq!(repos.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_connector_times_out_as_unavailable() {
        let engine = engine(
            FakeConnector::new(
                ConnectorKind::Repositories,
                &[("Elm", 10_000), ("Frontend", 10_000)],
                SignalOutcome::NotFound,
            ),
            Arc::new(StalledConnector),
            FakeConnector::down(ConnectorKind::Downloads),
            FakeConnector::down(ConnectorKind::Releases),
        );

        let readings = engine.collect("Frontend", &names(&["Elm"])).await;

        assert_eq!(readings.questions, vec![SignalOutcome::Unavailable]);
        assert_eq!(readings.repositories, vec![found(ConnectorKind::Repositories, 10_000)]);
    }

    #[tokio::test]
    async fn test_skill_list_is_capped() {
        let repos = FakeConnector::new(ConnectorKind::Repositories, &[], SignalOutcome::NotFound);
        let questions = FakeConnector::new(ConnectorKind::Questions, &[], SignalOutcome::NotFound);
        let engine = engine(
            repos.clone(),
            questions.clone(),
            FakeConnector::down(ConnectorKind::Downloads),
            FakeConnector::down(ConnectorKind::Releases),
        );
        let skills: Vec<String> = (0..MAX_QUERIED_SKILLS + 15).map(|i| format!("s{i}")).collect();

        let result = engine
            .analyze(&input("Dev", &skills.join(","), "1"), &mut StdRng::seed_from_u64(0))
            .await;

        assert_eq!(result.skills.len(), MAX_QUERIED_SKILLS);
        assert_eq!(result.skills[0].name, "s0");
        assert_eq!(result.skills[MAX_QUERIED_SKILLS - 1].name, "s19");
        assert_eq!(repos.calls.load(Ordering::SeqCst), MAX_QUERIED_SKILLS + 1);
        assert_eq!(questions.calls.load(Ordering::SeqCst), MAX_QUERIED_SKILLS);
    }

    #[tokio::test]
    async fn test_each_connector_called_once_per_skill() {
        let repos = FakeConnector::new(ConnectorKind::Repositories, &[], SignalOutcome::NotFound);
        let questions = FakeConnector::new(ConnectorKind::Questions, &[], SignalOutcome::NotFound);
        let downloads = FakeConnector::new(ConnectorKind::Downloads, &[], SignalOutcome::NotFound);
        let releases = FakeConnector::new(ConnectorKind::Releases, &[], SignalOutcome::NotFound);
        let engine = engine(repos.clone(), questions.clone(), downloads.clone(), releases.clone());

        engine
            .analyze(&input("Dev", "a, b, c", "1"), &mut StdRng::seed_from_u64(0))
            .await;

        assert_eq!(repos.calls.load(Ordering::SeqCst), 4);
        assert_eq!(questions.calls.load(Ordering::SeqCst), 3);
        assert_eq!(downloads.calls.load(Ordering::SeqCst), 3);
        assert_eq!(releases.calls.load(Ordering::SeqCst), 3);
    }
}
