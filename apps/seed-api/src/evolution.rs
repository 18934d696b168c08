//! In-memory evolution record shared by every request.
//!
//! One `EvolutionStore` lives in `AppState`. All reads and transitions take the
//! lock for a short synchronous section and never hold it across an await.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use seed_protocol::{
    Activity, ActivityReport, ApplySuggestionResponse, ComponentTrends, Cycle,
    CycleCompleteResponse, CycleStartResponse, CycleStatus, EngineStatus, EngineSummary,
    EvolutionCounters, EvolutionHealth, EvolutionHealthResponse, EvolutionMetrics,
    EvolutionMetricsReport, EvolutionSnapshot, FileChange, GrowthInsight, GrowthPoint,
    GrowthReport, HealthIndicators, Improvement, InsightsReport, Priority, Projection,
    Projections, Recommendation, SeedGrowth, SeedHealth, StartEngineRequest,
    StartEngineResponse, StopEngineResponse, Suggestion, SuggestionsReport, Trend,
    TrendDirection, Trends, Vitals,
};

use crate::random::RandomSource;
use crate::util::iso;

const RECENT_ACTIVITY: usize = 5;
const ACTIVITY_SPACING_MIN: i64 = 30;
/// Completed cycles kept in memory; older ones only survive in `archived`.
const HISTORY_CAP: usize = 64;

#[derive(Debug, Clone)]
struct EngineState {
    status: EngineStatus,
    efficiency: f64,
    last_activity: String,
}

#[derive(Debug, Clone)]
pub(crate) struct EvolutionState {
    metrics: EvolutionMetrics,
    current_cycle: Cycle,
    history: VecDeque<Cycle>,
    archived: u64,
    engine: EngineState,
    seed_growth: SeedGrowth,
    growth_history: Vec<GrowthPoint>,
    growth_insights: Vec<GrowthInsight>,
    suggestions: Vec<Suggestion>,
}

fn seeded_improvement(kind: &str, description: &str, impact: &str, path: &str) -> Improvement {
    Improvement {
        kind: kind.into(),
        description: Some(description.into()),
        impact: Some(impact.into()),
        paths_affected: Some(vec![path.into()]),
    }
}

fn growth_point(date: &str, maturity: f64, branch_count: u32, leaf_density: u32) -> GrowthPoint {
    GrowthPoint {
        date: date.into(),
        maturity,
        branch_count,
        leaf_density,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_insights() -> Vec<GrowthInsight> {
    vec![
        GrowthInsight {
            id: 1,
            category: "Next Growth Phase".into(),
            icon: "🎯".into(),
            title: "Advanced Branching Ready".into(),
            description: "Based on current metrics, the seed is ready for advanced branching patterns and deeper root exploration.".into(),
            recommendation: "Implement feature flagging system".into(),
            priority: Priority::High,
        },
        GrowthInsight {
            id: 2,
            category: "Optimization Opportunities".into(),
            icon: "⚡".into(),
            title: "Test Coverage Expansion".into(),
            description: "Test coverage expansion could accelerate growth by 15%. Consider adding integration tests for new branches.".into(),
            recommendation: "Add end-to-end test suite".into(),
            priority: Priority::Medium,
        },
        GrowthInsight {
            id: 3,
            category: "Health Indicators".into(),
            icon: "🔍".into(),
            title: "Positive Growth Trends".into(),
            description: "All systems showing positive growth trends. Recommend maintaining current evolution pace.".into(),
            recommendation: "Continue current evolution cycle".into(),
            priority: Priority::Low,
        },
    ]
}

fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            id: "suggestion-1".into(),
            priority: Priority::High,
            kind: "performance".into(),
            title: "Optimize container image layers".into(),
            description: "Reduce Docker image size by 30% through layer optimization".into(),
            estimated_impact: "Build time -45s, Storage -150MB".into(),
            complexity: "medium".into(),
            paths_affected: strings(&["build-path", "deploy-path"]),
        },
        Suggestion {
            id: "suggestion-2".into(),
            priority: Priority::Medium,
            kind: "reliability".into(),
            title: "Add circuit breaker pattern to API calls".into(),
            description: "Implement circuit breakers for external service calls".into(),
            estimated_impact: "Reliability +12%, Error rate -25%".into(),
            complexity: "low".into(),
            paths_affected: strings(&["api-path"]),
        },
        Suggestion {
            id: "suggestion-3".into(),
            priority: Priority::Low,
            kind: "testing".into(),
            title: "Implement comprehensive test coverage".into(),
            description: "Add unit tests for all components and services".into(),
            estimated_impact: "Coverage +25%, Bug detection +40%".into(),
            complexity: "high".into(),
            paths_affected: strings(&["testing-path"]),
        },
    ]
}

fn recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            id: "rec-1".into(),
            kind: "architecture".into(),
            priority: Priority::High,
            description: "Consider implementing microservices pattern for better scalability"
                .into(),
            impact: "Improved maintainability and scaling capabilities".into(),
        },
        Recommendation {
            id: "rec-2".into(),
            kind: "testing".into(),
            priority: Priority::Medium,
            description: "Add property-based testing for more robust validation".into(),
            impact: "Increased confidence in edge case handling".into(),
        },
    ]
}

fn health_indicators() -> HealthIndicators {
    HealthIndicators {
        build_system: 85,
        code_quality: 78,
        test_coverage: 72,
        documentation: 85,
        security: 91,
        performance: 89,
    }
}

fn trends() -> Trends {
    let trend = |current, change, trend| Trend {
        current,
        change,
        trend,
    };
    Trends {
        code_quality: trend(78.0, 2.3, TrendDirection::Increasing),
        test_coverage: trend(72.0, 1.8, TrendDirection::Increasing),
        performance: trend(89.0, 0.5, TrendDirection::Stable),
        security: trend(91.0, 0.8, TrendDirection::Increasing),
    }
}

impl EvolutionState {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        let started = iso(now);
        Self {
            metrics: EvolutionMetrics {
                total_cycles: 23,
                improvements_made: 47,
                efficiency_gain: 15.8,
                last_cycle_date: started.clone(),
                health_score: 85,
                paths_optimized: 12,
                times_saved: "2.3 hours".into(),
                bugs_fixed: 8,
                performance_gains: "15.8%".into(),
                reliability_increase: "12.4%".into(),
            },
            current_cycle: Cycle {
                id: 24,
                status: CycleStatus::InProgress,
                start_time: started.clone(),
                end_time: None,
                improvements: vec![
                    seeded_improvement(
                        "build_optimization",
                        "Improved Docker build cache",
                        "high",
                        "build-path",
                    ),
                    seeded_improvement(
                        "code_quality",
                        "Fixed ESLint configuration",
                        "medium",
                        "linting-path",
                    ),
                    seeded_improvement(
                        "testing",
                        "Added component placeholder tests",
                        "medium",
                        "testing-path",
                    ),
                ],
            },
            history: VecDeque::with_capacity(HISTORY_CAP),
            archived: 0,
            engine: EngineState {
                status: EngineStatus::Running,
                efficiency: 94.2,
                last_activity: started,
            },
            seed_growth: SeedGrowth {
                maturity: 78.5,
                stage: "Growing".into(),
                branch_count: 12,
                leaf_density: 156,
                root_depth: 45,
                growth_rate: 2.3,
                health_score: 92,
                next_evolution_in: "2 hours".into(),
            },
            growth_history: vec![
                growth_point("2024-01-15", 78.5, 12, 156),
                growth_point("2024-01-14", 76.2, 11, 142),
                growth_point("2024-01-13", 74.8, 11, 138),
                growth_point("2024-01-12", 73.1, 10, 135),
                growth_point("2024-01-11", 71.5, 10, 131),
            ],
            growth_insights: default_insights(),
            suggestions: default_suggestions(),
        }
    }

    fn engine_summary(&self) -> EngineSummary {
        EngineSummary {
            status: self.engine.status,
            efficiency: self.engine.efficiency,
            last_activity: self.engine.last_activity.clone(),
            current_cycle: self.current_cycle.id,
            total_cycles: self.metrics.total_cycles,
        }
    }

    /// Improvements of the live cycle, or of its archived copy once it is completed.
    fn activity_source(&self) -> &[Improvement] {
        match (self.current_cycle.status, self.history.back()) {
            (CycleStatus::Completed, Some(last)) if last.id == self.current_cycle.id => {
                &last.improvements
            }
            _ => &self.current_cycle.improvements,
        }
    }

    /// The last few improvements, spaced half an hour apart going back from `now`.
    fn recent_activity(&self, now: DateTime<Utc>) -> Vec<Activity> {
        let improvements = self.activity_source();
        let skip = improvements.len().saturating_sub(RECENT_ACTIVITY);
        improvements
            .iter()
            .skip(skip)
            .enumerate()
            .map(|(index, imp)| Activity {
                id: index as u32 + 1,
                kind: imp.kind.clone(),
                description: imp.description.clone(),
                impact: imp.impact.clone(),
                timestamp: iso(now - chrono::Duration::minutes(ACTIVITY_SPACING_MIN * index as i64)),
                paths_affected: imp
                    .paths_affected
                    .clone()
                    .unwrap_or_else(|| vec!["unknown-path".to_string()]),
            })
            .collect()
    }
}

pub(crate) struct EvolutionStore {
    state: Mutex<EvolutionState>,
}

impl EvolutionStore {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(EvolutionState::new(now)),
        }
    }

    pub(crate) fn snapshot(&self, now: DateTime<Utc>) -> EvolutionSnapshot {
        let st = self.state.lock();
        EvolutionSnapshot {
            timestamp: iso(now),
            engine: st.engine_summary(),
            metrics: st.metrics.clone(),
            seed_growth: st.seed_growth.clone(),
            recent_activity: st.recent_activity(now),
            health_indicators: health_indicators(),
            suggestions: st.suggestions.clone(),
            growth_insights: st.growth_insights.clone(),
        }
    }

    /// Counters surfaced by `/api/metrics`.
    pub(crate) fn counters(&self) -> EvolutionCounters {
        let st = self.state.lock();
        EvolutionCounters {
            cycles: st.metrics.total_cycles,
            improvements: st.metrics.improvements_made,
            efficiency: st.engine.efficiency,
            last_cycle: st.metrics.last_cycle_date.clone(),
        }
    }

    pub(crate) fn growth(&self, now: DateTime<Utc>) -> GrowthReport {
        let st = self.state.lock();
        GrowthReport {
            seed_growth: st.seed_growth.clone(),
            growth_history: st.growth_history.clone(),
            projections: Projections {
                next_week: Projection {
                    maturity: 82.1,
                    branch_count: 14,
                    leaf_density: 175,
                },
                next_month: Projection {
                    maturity: 95.3,
                    branch_count: 18,
                    leaf_density: 220,
                },
            },
            timestamp: iso(now),
        }
    }

    pub(crate) fn insights(&self, now: DateTime<Utc>) -> InsightsReport {
        let st = self.state.lock();
        InsightsReport {
            insights: st.growth_insights.clone(),
            recommendations: recommendations(),
            timestamp: iso(now),
        }
    }

    pub(crate) fn metrics(&self, now: DateTime<Utc>) -> EvolutionMetricsReport {
        let st = self.state.lock();
        EvolutionMetricsReport {
            timestamp: iso(now),
            metrics: st.metrics.clone(),
            engine: st.engine_summary(),
            trends: trends(),
        }
    }

    pub(crate) fn activity(&self, now: DateTime<Utc>) -> ActivityReport {
        let st = self.state.lock();
        ActivityReport {
            timestamp: iso(now),
            activity: st.recent_activity(now),
        }
    }

    pub(crate) fn suggestions(&self, now: DateTime<Utc>) -> SuggestionsReport {
        let st = self.state.lock();
        SuggestionsReport {
            timestamp: iso(now),
            suggestions: st.suggestions.clone(),
        }
    }

    pub(crate) fn health(&self, now: DateTime<Utc>) -> EvolutionHealthResponse {
        let st = self.state.lock();
        EvolutionHealthResponse {
            success: true,
            data: EvolutionHealth {
                overall: st.metrics.health_score,
                components: health_indicators(),
                seed_health: SeedHealth {
                    maturity: st.seed_growth.maturity,
                    health_score: st.seed_growth.health_score,
                    growth_rate: st.seed_growth.growth_rate,
                },
                trends: ComponentTrends {
                    improving: strings(&["buildSystem", "security"]),
                    stable: strings(&["performance"]),
                    declining: strings(&["testCoverage", "documentation"]),
                },
                vitals: Vitals {
                    cpu: 45.2,
                    memory: 62.8,
                    disk: 34.1,
                    network: 12.5,
                },
                last_updated: iso(now),
            },
        }
    }

    pub(crate) fn start_engine(
        &self,
        req: StartEngineRequest,
        now: DateTime<Utc>,
    ) -> StartEngineResponse {
        let started = iso(now);
        {
            let mut st = self.state.lock();
            st.engine.status = EngineStatus::Running;
            st.engine.last_activity = started.clone();
        }
        StartEngineResponse {
            message: "Evolution engine started".into(),
            estimated_duration: format!("{} minutes", u64::from(req.cycles) * 15),
            mode: req.mode,
            cycles: req.cycles,
            start_time: started,
        }
    }

    pub(crate) fn stop_engine(&self, now: DateTime<Utc>) -> StopEngineResponse {
        let stopped = iso(now);
        let completed = {
            let mut st = self.state.lock();
            st.engine.status = EngineStatus::Stopped;
            st.engine.last_activity = stopped.clone();
            st.archived
        };
        StopEngineResponse {
            message: "Evolution engine stopped".into(),
            stop_time: stopped,
            cycles_completed: completed,
            last_activity: "Path optimization completed".into(),
        }
    }

    /// Open a fresh cycle with the next id and nudge the seed's growth.
    pub(crate) fn start_cycle(
        &self,
        rng: &dyn RandomSource,
        now: DateTime<Utc>,
    ) -> CycleStartResponse {
        let mut st = self.state.lock();
        let id = st.metrics.total_cycles + 1;
        st.current_cycle = Cycle {
            id,
            status: CycleStatus::InProgress,
            start_time: iso(now),
            end_time: None,
            improvements: Vec::new(),
        };
        st.metrics.total_cycles = id;
        st.engine.last_activity = iso(now);

        let growth = &mut st.seed_growth;
        growth.maturity = (growth.maturity + rng.next_f64() * 2.0).min(100.0);
        growth.branch_count += (rng.next_f64() * 2.0).floor() as u32;
        growth.leaf_density += (rng.next_f64() * 5.0).floor() as u32;

        tracing::debug!(cycle = id, maturity = st.seed_growth.maturity, "evolution cycle started");
        CycleStartResponse {
            success: true,
            data: st.current_cycle.clone(),
            message: "Evolution cycle started".into(),
            growth_update: st.seed_growth.clone(),
        }
    }

    /// Close the current cycle and archive a copy carrying `improvements`.
    ///
    /// The live cycle keeps its own improvement list, so completing it again
    /// archives only that call's additions on top of it.
    pub(crate) fn complete_cycle(
        &self,
        improvements: Vec<Improvement>,
        now: DateTime<Utc>,
    ) -> CycleCompleteResponse {
        let finished = iso(now);
        let mut st = self.state.lock();
        let added = improvements.len() as u64;
        st.current_cycle.status = CycleStatus::Completed;
        st.current_cycle.end_time = Some(finished.clone());
        let mut archived_improvements = st.current_cycle.improvements.clone();
        archived_improvements.extend(improvements);
        let completed = Cycle {
            id: st.current_cycle.id,
            status: CycleStatus::Completed,
            start_time: st.current_cycle.start_time.clone(),
            end_time: Some(finished.clone()),
            improvements: archived_improvements,
        };
        if st.history.len() == HISTORY_CAP {
            st.history.pop_front();
        }
        st.history.push_back(completed.clone());
        st.archived += 1;
        st.metrics.improvements_made += added;
        st.metrics.last_cycle_date = finished.clone();
        st.engine.last_activity = finished;

        tracing::debug!(cycle = completed.id, added, "evolution cycle completed");
        CycleCompleteResponse {
            success: true,
            data: completed,
            message: "Evolution cycle completed".into(),
        }
    }

    /// `None` when `id` is not in the suggestion catalog.
    pub(crate) fn apply_suggestion(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Option<ApplySuggestionResponse> {
        let suggestion = {
            let st = self.state.lock();
            st.suggestions.iter().find(|s| s.id == id).cloned()
        }?;
        Some(ApplySuggestionResponse {
            message: format!("Applying suggestion: {}", suggestion.title),
            suggestion,
            application_id: format!("app-{}", now.timestamp_millis()),
            estimated_time: "5-10 minutes".into(),
            start_time: iso(now),
            changes: vec![
                FileChange {
                    file: "src/utils/cache.js".into(),
                    kind: "created".into(),
                    description: "Added Redis caching implementation".into(),
                },
                FileChange {
                    file: "package.json".into(),
                    kind: "modified".into(),
                    description: "Added Redis dependency".into(),
                },
            ],
        })
    }

    #[cfg(test)]
    pub(crate) fn archived_cycles(&self) -> u64 {
        self.state.lock().archived
    }

    #[cfg(test)]
    pub(crate) fn history(&self) -> Vec<Cycle> {
        self.state.lock().history.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    fn imp(kind: &str) -> Improvement {
        Improvement {
            kind: kind.into(),
            description: None,
            impact: None,
            paths_affected: None,
        }
    }

    #[test]
    fn defaults_match_seed_record() {
        let store = EvolutionStore::new(Utc::now());
        let snap = store.snapshot(Utc::now());
        assert_eq!(snap.metrics.total_cycles, 23);
        assert_eq!(snap.metrics.improvements_made, 47);
        assert_eq!(snap.engine.current_cycle, 24);
        assert_eq!(snap.engine.status, EngineStatus::Running);
        assert_eq!(snap.recent_activity.len(), 3);
        assert_eq!(snap.suggestions.len(), 3);
    }

    #[test]
    fn cycle_ids_increase_with_total() {
        let store = EvolutionStore::new(Utc::now());
        let rng = SequenceRandom::constant(0.0);
        let mut last = 0;
        for expected in 24..30 {
            let started = store.start_cycle(&rng, Utc::now());
            assert_eq!(started.data.id, expected);
            assert!(started.data.id > last);
            assert!(started.data.improvements.is_empty());
            last = started.data.id;
            assert_eq!(store.counters().cycles, expected);
        }
    }

    #[test]
    fn growth_jitter_is_bounded() {
        let store = EvolutionStore::new(Utc::now());
        let rng = SequenceRandom::constant(0.99);
        let first = store.start_cycle(&rng, Utc::now());
        assert_eq!(first.growth_update.branch_count, 13);
        assert_eq!(first.growth_update.leaf_density, 160);
        for _ in 0..20 {
            store.start_cycle(&rng, Utc::now());
        }
        let growth = store.growth(Utc::now()).seed_growth;
        assert!(growth.maturity <= 100.0);
    }

    #[test]
    fn complete_archives_and_counts() {
        let store = EvolutionStore::new(Utc::now());
        let done = store.complete_cycle(vec![imp("x")], Utc::now());
        assert_eq!(done.data.status, CycleStatus::Completed);
        assert!(done.data.end_time.is_some());
        assert_eq!(done.data.improvements.len(), 4);
        assert_eq!(store.archived_cycles(), 1);
        assert_eq!(store.counters().improvements, 48);

        let empty = store.complete_cycle(Vec::new(), Utc::now());
        assert_eq!(empty.data.improvements.len(), 3);
        assert_eq!(store.archived_cycles(), 2);
        assert_eq!(store.counters().improvements, 48);
    }

    #[test]
    fn repeated_completion_does_not_reuse_earlier_bodies() {
        let store = EvolutionStore::new(Utc::now());
        let kinds = |cycle: &Cycle| -> Vec<String> {
            cycle.improvements.iter().map(|i| i.kind.clone()).collect()
        };
        let first = store.complete_cycle(vec![imp("a")], Utc::now());
        let second = store.complete_cycle(vec![imp("b")], Utc::now());
        assert_eq!(
            kinds(&first.data),
            ["build_optimization", "code_quality", "testing", "a"]
        );
        assert_eq!(
            kinds(&second.data),
            ["build_optimization", "code_quality", "testing", "b"]
        );
        assert_eq!(store.counters().improvements, 49);

        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].improvements.len(), 4);

        let activity = store.activity(Utc::now()).activity;
        assert_eq!(activity.last().unwrap().kind, "b");
    }

    #[test]
    fn history_is_capped_but_count_is_not() {
        let store = EvolutionStore::new(Utc::now());
        for _ in 0..HISTORY_CAP + 5 {
            store.complete_cycle(vec![imp("x")], Utc::now());
        }
        assert_eq!(store.history().len(), HISTORY_CAP);
        assert_eq!(store.archived_cycles(), (HISTORY_CAP + 5) as u64);
        assert_eq!(
            store.stop_engine(Utc::now()).cycles_completed,
            (HISTORY_CAP + 5) as u64
        );
    }

    #[test]
    fn new_cycle_starts_with_empty_activity() {
        let store = EvolutionStore::new(Utc::now());
        store.complete_cycle(vec![imp("a")], Utc::now());
        store.start_cycle(&SequenceRandom::constant(0.0), Utc::now());
        assert!(store.activity(Utc::now()).activity.is_empty());
    }

    #[test]
    fn read_views_expose_catalogs() {
        let store = EvolutionStore::new(Utc::now());
        let insights = store.insights(Utc::now());
        assert!(!insights.insights.is_empty());
        assert!(!insights.recommendations.is_empty());
        let suggestions = store.suggestions(Utc::now()).suggestions;
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].id, "suggestion-1");
        let health = store.health(Utc::now());
        assert!(health.success);
        assert_eq!(health.data.overall, 85);
        assert_eq!(health.data.seed_health.maturity, 78.5);
    }

    #[test]
    fn recent_activity_keeps_last_five() {
        let store = EvolutionStore::new(Utc::now());
        store.complete_cycle(
            vec![imp("a"), imp("b"), imp("c"), imp("d")],
            Utc::now(),
        );
        let activity = store.activity(Utc::now()).activity;
        assert_eq!(activity.len(), 5);
        assert_eq!(activity[0].kind, "testing");
        assert_eq!(activity[4].kind, "d");
        assert_eq!(activity[4].paths_affected, vec!["unknown-path".to_string()]);
        assert_eq!(activity[0].id, 1);
    }

    #[test]
    fn stop_reports_archived_cycles() {
        let store = EvolutionStore::new(Utc::now());
        store.complete_cycle(Vec::new(), Utc::now());
        let stopped = store.stop_engine(Utc::now());
        assert_eq!(stopped.cycles_completed, 1);
        assert_eq!(
            store.snapshot(Utc::now()).engine.status,
            EngineStatus::Stopped
        );
        let started = store.start_engine(
            StartEngineRequest {
                mode: "manual".into(),
                cycles: 3,
            },
            Utc::now(),
        );
        assert_eq!(started.estimated_duration, "45 minutes");
        assert_eq!(
            store.snapshot(Utc::now()).engine.status,
            EngineStatus::Running
        );
    }

    #[test]
    fn apply_unknown_suggestion_is_none() {
        let store = EvolutionStore::new(Utc::now());
        assert!(store.apply_suggestion("nope", Utc::now()).is_none());
        let applied = store.apply_suggestion("suggestion-2", Utc::now()).unwrap();
        assert_eq!(
            applied.message,
            "Applying suggestion: Add circuit breaker pattern to API calls"
        );
        assert!(applied.application_id.starts_with("app-"));
        assert_eq!(applied.changes.len(), 2);
    }
}
