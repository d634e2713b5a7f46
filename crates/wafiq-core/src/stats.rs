//! Summary statistics derived from a progress record.
//!
//! All ratios are rounded half-up in integer arithmetic, which matches
//! half-away-from-zero for the non-negative values involved. No floating
//! point is used, so results are exact for every input.

use std::num::NonZeroU64;

use wafiq_types::{ProgressRecord, ProgressStats};

/// Number of games the application offers.
pub const TOTAL_GAMES_AVAILABLE: NonZeroU64 = NonZeroU64::MIN.saturating_add(5);

const SECONDS_PER_MINUTE: NonZeroU64 = NonZeroU64::MIN.saturating_add(59);

/// Derive [`ProgressStats`] from a record.
///
/// - `average_score` is `total_score / completed_games`, or 0 when no game
///   type was completed
/// - `completion_rate` is `completed_games / total_games_available * 100`
/// - `play_time_minutes` is `play_time / 60`
pub fn derive_stats(record: &ProgressRecord, total_games_available: NonZeroU64) -> ProgressStats {
    let average_score = NonZeroU64::new(record.completed_games)
        .map_or(0, |games| div_round(record.total_score, games));

    ProgressStats {
        total_games_available: total_games_available.get(),
        average_score,
        completion_rate: div_round(
            record.completed_games.saturating_mul(100),
            total_games_available,
        ),
        play_time_minutes: div_round(record.play_time, SECONDS_PER_MINUTE),
        achievements: record.achievements,
    }
}

/// Divide and round half-up: `2.5 -> 3`, `2.4 -> 2`.
pub const fn div_round(numerator: u64, denominator: NonZeroU64) -> u64 {
    let quotient = numerator / denominator.get();
    let remainder = numerator % denominator.get();
    // remainder < denominator, so the subtraction cannot underflow.
    if remainder >= denominator.get().saturating_sub(remainder) {
        quotient.saturating_add(1)
    } else {
        quotient
    }
}
