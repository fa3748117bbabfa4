//! Running score and statistics, frozen into a summary at session end

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HIT_POINTS, MIN_HIT_POINTS, MISS_PENALTY};

/// Points for a hit: faster is better, never below the floor
pub fn hit_points(reaction_ms: f64) -> u64 {
    let points = (MAX_HIT_POINTS - reaction_ms).floor();
    if points.is_nan() || points < MIN_HIT_POINTS as f64 {
        MIN_HIT_POINTS
    } else {
        points as u64
    }
}

/// One reaction sample for the results chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionPoint {
    /// Whole seconds of game time into the session
    pub time: u32,
    /// Reaction time (ms)
    pub value: f64,
}

/// Mutable per-session totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    pub score: u64,
    pub clicks: u32,
    pub hits: u32,
    pub misses: u32,
    pub expired: u32,
    pub reaction_times: Vec<f64>,
    pub reaction_history: Vec<ReactionPoint>,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_click(&mut self) {
        self.clicks += 1;
    }

    /// Count a hit and return the points awarded
    pub fn record_hit(&mut self, reaction_ms: f64, elapsed_ms: f64) -> u64 {
        let points = hit_points(reaction_ms);
        self.hits += 1;
        self.score += points;
        self.reaction_times.push(reaction_ms);
        self.reaction_history.push(ReactionPoint {
            time: (elapsed_ms / 1000.0).floor().max(0.0) as u32,
            value: reaction_ms,
        });
        points
    }

    /// Count a background click and apply the penalty (score floors at 0)
    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.score = self.score.saturating_sub(MISS_PENALTY);
    }

    pub fn record_expired(&mut self, count: u32) {
        self.expired += count;
    }

    /// Hit percentage of all clicks; 0 when there were no clicks
    pub fn accuracy(&self) -> f64 {
        if self.clicks > 0 {
            self.hits as f64 / self.clicks as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Mean reaction time of hits; 0 when there were none
    pub fn avg_reaction_time(&self) -> f64 {
        if self.reaction_times.is_empty() {
            0.0
        } else {
            self.reaction_times.iter().sum::<f64>() / self.reaction_times.len() as f64
        }
    }

    pub fn summarize(&self, total_targets: u32) -> SessionSummary {
        SessionSummary {
            score: self.score,
            total_targets,
            clicked_targets: self.hits,
            missed_clicks: self.misses,
            targets_expired: self.expired,
            accuracy: self.accuracy(),
            avg_reaction_time: self.avg_reaction_time(),
            reaction_time_history: self.reaction_history.clone(),
        }
    }
}

/// Immutable end-of-session record for the results view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub score: u64,
    pub total_targets: u32,
    pub clicked_targets: u32,
    pub missed_clicks: u32,
    pub targets_expired: u32,
    /// Percent, 0..=100
    pub accuracy: f64,
    /// Milliseconds
    pub avg_reaction_time: f64,
    pub reaction_time_history: Vec<ReactionPoint>,
}

impl SessionSummary {
    /// Total pointer-downs in the session
    pub fn clicks(&self) -> u32 {
        self.clicked_targets + self.missed_clicks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hit_points_curve() {
        assert_eq!(hit_points(0.0), 1000);
        assert_eq!(hit_points(250.4), 749);
        assert_eq!(hit_points(989.0), 11);
        assert_eq!(hit_points(990.0), 10);
        assert_eq!(hit_points(1500.0), 10);
        assert_eq!(hit_points(f64::NAN), 10);
    }

    #[test]
    fn test_miss_penalty_floors_at_zero() {
        let mut stats = RunningStats::new();
        stats.record_miss();
        assert_eq!(stats.score, 0);
        stats.record_hit(900.0, 0.0);
        assert_eq!(stats.score, 100);
        stats.record_miss();
        assert_eq!(stats.score, 50);
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.score, 0);
        assert_eq!(stats.misses, 4);
    }

    #[test]
    fn test_empty_summary_has_zero_ratios() {
        let summary = RunningStats::new().summarize(12);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.avg_reaction_time, 0.0);
        assert_eq!(summary.total_targets, 12);
        assert!(summary.reaction_time_history.is_empty());
    }

    #[test]
    fn test_summary_fields() {
        let mut stats = RunningStats::new();
        for _ in 0..4 {
            stats.record_click();
        }
        stats.record_hit(200.0, 1500.0);
        stats.record_hit(400.0, 2999.0);
        stats.record_hit(300.0, 7000.0);
        stats.record_miss();
        stats.record_expired(2);

        let summary = stats.summarize(6);
        assert_eq!(summary.accuracy, 75.0);
        assert_eq!(summary.avg_reaction_time, 300.0);
        assert_eq!(summary.clicked_targets, 3);
        assert_eq!(summary.missed_clicks, 1);
        assert_eq!(summary.targets_expired, 2);
        assert_eq!(summary.clicks(), 4);
        assert_eq!(summary.score, 800 + 600 + 700 - 50);
        let seconds: Vec<u32> = summary.reaction_time_history.iter().map(|p| p.time).collect();
        assert_eq!(seconds, vec![1, 2, 7]);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_string(&RunningStats::new().summarize(0)).unwrap();
        assert!(json.contains("\"avgReactionTime\""));
        assert!(json.contains("\"reactionTimeHistory\""));
        assert!(json.contains("\"targetsExpired\""));
    }

    proptest! {
        #[test]
        fn prop_hit_points_floor_and_monotonic(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
            let (fast, slow) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(hit_points(fast) >= hit_points(slow));
            prop_assert!(hit_points(slow) >= MIN_HIT_POINTS);
        }

        #[test]
        fn prop_score_never_negative_and_accuracy_bounded(
            events in proptest::collection::vec(prop_oneof![Just(None), (0.0f64..2000.0).prop_map(Some)], 0..200)
        ) {
            let mut stats = RunningStats::new();
            for event in events {
                stats.record_click();
                match event {
                    Some(reaction) => { stats.record_hit(reaction, 0.0); }
                    None => stats.record_miss(),
                }
                let accuracy = stats.accuracy();
                prop_assert!((0.0..=100.0).contains(&accuracy));
            }
            prop_assert_eq!(stats.clicks, stats.hits + stats.misses);
        }
    }
}
