//! Cohort-level summary of session outcome metrics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tolscore_stats::{descriptive::DescriptiveStats, outliers::IqrFences};

use crate::outcome::{PersonOutcomes, SessionOutcome};

/// Distribution of one metric across persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: String,
    pub stats: DescriptiveStats,
    pub fences: IqrFences,
    /// Number of persons outside the fences.
    pub outliers: usize,
}

impl MetricSummary {
    /// Summarizes `values`, `None` when there are none.
    #[must_use]
    pub fn new(metric: &str, values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::new(values.iter().copied())?;
        let fences = IqrFences::new(values)?;
        Some(Self {
            metric: metric.to_owned(),
            stats,
            fences,
            outliers: fences.count_outliers(values),
        })
    }
}

/// All metric summaries of one test session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub test: u32,
    pub persons: usize,
    pub metrics: Vec<MetricSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub sessions: Vec<SessionSummary>,
}

impl CohortSummary {
    /// Builds the summary from per-person outcomes, one entry per test session
    /// in ascending order.
    ///
    /// ```
    /// use tolscore_analysis::{cohort::CohortSummary, outcome::SessionOutcome};
    ///
    /// let session = SessionOutcome::from_reader(0, "step,done\n1,0\n2,1\n".as_bytes()).unwrap();
    /// let summary = CohortSummary::from_sessions([&session]);
    /// assert_eq!(summary.sessions[0].persons, 1);
    /// assert_eq!(summary.sessions[0].metrics[0].stats.mean, 2.0);
    /// ```
    #[must_use]
    pub fn new(persons: &[PersonOutcomes]) -> Self {
        Self::from_sessions(persons.iter().flat_map(|person| &person.sessions))
    }

    pub fn from_sessions<'a, I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = &'a SessionOutcome>,
    {
        let mut by_test = BTreeMap::<u32, Vec<&SessionOutcome>>::new();
        for session in sessions {
            by_test.entry(session.test).or_default().push(session);
        }

        let sessions = by_test
            .into_iter()
            .map(|(test, sessions)| {
                let rows = sessions.iter().map(|s| s.metrics()).collect::<Vec<_>>();
                let metrics = SessionOutcome::METRIC_NAMES
                    .iter()
                    .enumerate()
                    .filter_map(|(i, name)| {
                        let values = rows.iter().map(|row| row[i]).collect::<Vec<_>>();
                        MetricSummary::new(name, &values)
                    })
                    .collect();
                tracing::debug!(test, persons = sessions.len(), "summarized session");
                SessionSummary {
                    test,
                    persons: sessions.len(),
                    metrics,
                }
            })
            .collect();
        Self { sessions }
    }

    #[must_use]
    pub fn session(&self, test: u32) -> Option<&SessionSummary> {
        self.sessions.iter().find(|s| s.test == test)
    }
}

impl SessionSummary {
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&MetricSummary> {
        self.metrics.iter().find(|m| m.metric == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(test: u32, movements: u64) -> SessionOutcome {
        SessionOutcome {
            test,
            total_movements: movements,
            total_time_ms: 1000.0,
            completed_trials: 2,
            movements_per_trial: 0.0,
            avg_time_per_trial: 500.0,
            time_per_movement: 0.0,
            attempts: 0,
            total_min_moves: 4,
            movement_efficiency: 0.0,
        }
    }

    #[test]
    fn test_groups_by_test_session() {
        let persons = [
            PersonOutcomes {
                person: "a".to_owned(),
                sessions: vec![session(0, 10), session(1, 8)],
            },
            PersonOutcomes {
                person: "b".to_owned(),
                sessions: vec![session(0, 20)],
            },
        ];
        let summary = CohortSummary::new(&persons);
        let tests = summary.sessions.iter().map(|s| s.test).collect::<Vec<_>>();
        assert_eq!(tests, [0, 1]);

        let baseline = summary.session(0).unwrap();
        assert_eq!(baseline.persons, 2);
        assert_eq!(baseline.metrics.len(), SessionOutcome::METRIC_NAMES.len());
        let movements = baseline.metric("total_movements").unwrap();
        assert_eq!(movements.stats.mean, 15.0);
        assert_eq!(movements.stats.min, 10.0);
        assert_eq!(movements.stats.max, 20.0);
        assert_eq!(summary.session(1).unwrap().persons, 1);
        assert!(summary.session(2).is_none());
    }

    #[test]
    fn test_counts_outliers() {
        let sessions = [4, 5, 5, 6, 6, 7, 30].map(|movements| session(0, movements));
        let summary = CohortSummary::from_sessions(&sessions);
        let movements = summary.sessions[0].metric("total_movements").unwrap();
        assert_eq!(movements.outliers, 1);
        let time = summary.sessions[0].metric("total_time_ms").unwrap();
        assert_eq!(time.outliers, 0);
    }

    #[test]
    fn test_empty_cohort() {
        assert_eq!(CohortSummary::new(&[]), CohortSummary::default());
    }

    #[test]
    fn test_serializes_to_json() {
        let summary = CohortSummary::from_sessions(&[session(1, 3)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["sessions"][0]["test"], 1);
        assert_eq!(json["sessions"][0]["metrics"][0]["metric"], "total_movements");
        assert_eq!(json["sessions"][0]["metrics"][0]["stats"]["count"], 1);
    }
}
