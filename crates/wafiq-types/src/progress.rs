//! Gameplay progress and the statistics derived from it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Cumulative gameplay progress for the single player of a service
/// instance.
///
/// All counters only grow until the record is reset. `completed_games`
/// always equals `games_played.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ProgressRecord {
    /// Sum of all submitted scores.
    pub total_score: u64,
    /// Sum of all submitted star counts.
    pub total_stars: u64,
    /// Number of distinct game types ever submitted.
    pub completed_games: u64,
    /// Sum of all submitted durations, in seconds.
    pub play_time: u64,
    /// Achievement counter, bumped once per met threshold on every
    /// submission.
    pub achievements: u64,
    /// Distinct game types in the order they were first submitted.
    pub games_played: Vec<String>,
}

impl ProgressRecord {
    /// Whether `game_type` has already contributed to `completed_games`.
    pub fn has_played(&self, game_type: &str) -> bool {
        self.games_played.iter().any(|g| g == game_type)
    }
}

/// Summary statistics derived from a [`ProgressRecord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ProgressStats {
    /// Number of games the application offers.
    pub total_games_available: u64,
    /// Rounded mean score per completed game type (0 when none).
    pub average_score: u64,
    /// Rounded percentage of available games that were played.
    pub completion_rate: u64,
    /// Rounded total play time in minutes.
    pub play_time_minutes: u64,
    /// Current achievement counter.
    pub achievements: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_camel_case() {
        let record = ProgressRecord {
            total_score: 50,
            total_stars: 5,
            completed_games: 1,
            play_time: 60,
            achievements: 0,
            games_played: vec![String::from("matching")],
        };
        let json = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(json["totalScore"], 50);
        assert_eq!(json["totalStars"], 5);
        assert_eq!(json["completedGames"], 1);
        assert_eq!(json["playTime"], 60);
        assert_eq!(json["achievements"], 0);
        assert_eq!(json["gamesPlayed"][0], "matching");
    }

    #[test]
    fn has_played_matches_exactly() {
        let record = ProgressRecord {
            games_played: vec![String::from("matching")],
            completed_games: 1,
            ..ProgressRecord::default()
        };
        assert!(record.has_played("matching"));
        assert!(!record.has_played("Matching"));
    }

    #[test]
    fn stats_serialize_camel_case() {
        let stats = ProgressStats {
            total_games_available: 6,
            average_score: 0,
            completion_rate: 17,
            play_time_minutes: 2,
            achievements: 1,
        };
        let json = serde_json::to_value(stats).unwrap_or_default();
        assert_eq!(json["totalGamesAvailable"], 6);
        assert_eq!(json["completionRate"], 17);
        assert_eq!(json["playTimeMinutes"], 2);
    }
}
