//! The Progress Tracker.
//!
//! [`ProgressTracker`] owns the single [`ProgressRecord`] of a service
//! instance. Every operation takes the record's lock for its whole
//! read-modify-write, so concurrent requests on a multi-threaded runtime
//! observe the same single-writer semantics as a sequential handler.
//!
//! # Achievements
//!
//! After each submission three thresholds are checked against the
//! cumulative record, and the achievement counter is bumped once for every
//! threshold that currently holds. A threshold that stays met keeps
//! bumping the counter on every later submission. This unbounded growth is
//! the established observable behavior of the service and is kept as is.

use std::num::NonZeroU64;

use tokio::sync::Mutex;
use tracing::{debug, info};
use wafiq_types::{ProgressRecord, ProgressStats};

use crate::stats::{TOTAL_GAMES_AVAILABLE, derive_stats};
use crate::submission::ProgressSubmission;

/// Total score at which [`Achievement::ScoreMilestone`] holds.
pub const SCORE_THRESHOLD: u64 = 100;
/// Distinct game types at which [`Achievement::GameVariety`] holds.
pub const GAMES_THRESHOLD: u64 = 3;
/// Total stars at which [`Achievement::StarCollector`] holds.
pub const STARS_THRESHOLD: u64 = 10;

/// A threshold on the cumulative record that earns an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    /// `total_score >= 100`.
    ScoreMilestone,
    /// `completed_games >= 3`.
    GameVariety,
    /// `total_stars >= 10`.
    StarCollector,
}

impl Achievement {
    /// All achievements, in evaluation order.
    pub const ALL: [Self; 3] = [Self::ScoreMilestone, Self::GameVariety, Self::StarCollector];

    /// Whether the threshold holds for `record`.
    pub const fn is_met(self, record: &ProgressRecord) -> bool {
        match self {
            Self::ScoreMilestone => record.total_score >= SCORE_THRESHOLD,
            Self::GameVariety => record.completed_games >= GAMES_THRESHOLD,
            Self::StarCollector => record.total_stars >= STARS_THRESHOLD,
        }
    }
}

/// Apply one submission to `record`.
///
/// Counters are added, a new game type is recorded once, and the
/// achievement counter grows by the number of thresholds met afterwards.
/// Returns those thresholds.
pub fn apply_submission(
    record: &mut ProgressRecord,
    submission: ProgressSubmission,
) -> Vec<Achievement> {
    record.total_score = record.total_score.saturating_add(submission.score);
    record.total_stars = record.total_stars.saturating_add(submission.stars);
    record.play_time = record.play_time.saturating_add(submission.duration);

    if let Some(game_type) = submission.game_type
        && !record.has_played(&game_type)
    {
        record.games_played.push(game_type);
        record.completed_games = record.completed_games.saturating_add(1);
    }

    let met: Vec<Achievement> = Achievement::ALL
        .into_iter()
        .filter(|a| a.is_met(record))
        .collect();
    let bump = u64::try_from(met.len()).unwrap_or(u64::MAX);
    record.achievements = record.achievements.saturating_add(bump);

    met
}

/// Owner of the progress record of one service instance.
#[derive(Debug)]
pub struct ProgressTracker {
    record: Mutex<ProgressRecord>,
    total_games_available: NonZeroU64,
}

impl ProgressTracker {
    /// Create a tracker with a zeroed record and the standard game count.
    pub fn new() -> Self {
        Self::with_games_available(TOTAL_GAMES_AVAILABLE)
    }

    /// Create a tracker whose statistics assume `total_games_available`
    /// games.
    pub fn with_games_available(total_games_available: NonZeroU64) -> Self {
        Self {
            record: Mutex::new(ProgressRecord::default()),
            total_games_available,
        }
    }

    /// Record a finished game and return the updated progress.
    pub async fn submit(&self, submission: ProgressSubmission) -> ProgressRecord {
        let mut record = self.record.lock().await;
        let met = apply_submission(&mut record, submission);
        debug!(
            total_score = record.total_score,
            completed_games = record.completed_games,
            achievements = record.achievements,
            thresholds_met = met.len(),
            "Progress updated"
        );
        record.clone()
    }

    /// Return the current progress.
    pub async fn read(&self) -> ProgressRecord {
        self.record.lock().await.clone()
    }

    /// Discard all progress and return the zeroed record.
    pub async fn reset(&self) -> ProgressRecord {
        let mut record = self.record.lock().await;
        *record = ProgressRecord::default();
        info!("Progress reset");
        record.clone()
    }

    /// Derive summary statistics from the current progress.
    pub async fn stats(&self) -> ProgressStats {
        let record = self.record.lock().await;
        derive_stats(&record, self.total_games_available)
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
