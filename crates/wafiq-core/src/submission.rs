//! Coercion of request bodies into progress submissions.
//!
//! Submissions are never rejected for their content. A field that is
//! missing or does not hold a usable value is treated as zero (for the
//! counters) or as absent (for the game type).

use std::collections::BTreeMap;

use serde_json::Value;

/// Body field carrying the score.
pub const FIELD_SCORE: &str = "score";
/// Body field carrying the star count.
pub const FIELD_STARS: &str = "stars";
/// Body field carrying the game type.
pub const FIELD_GAME_TYPE: &str = "gameType";
/// Body field carrying the duration in seconds.
pub const FIELD_DURATION: &str = "duration";

/// One finished game, already coerced into well-typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSubmission {
    /// Score earned in the game.
    pub score: u64,
    /// Stars earned in the game.
    pub stars: u64,
    /// Game type identifier, if one was sent.
    pub game_type: Option<String>,
    /// Time spent in the game, in seconds.
    pub duration: u64,
}

impl ProgressSubmission {
    /// Coerce a JSON body.
    ///
    /// Counters accept a non-negative integer or a string holding one.
    /// A body that is not an object yields an empty submission.
    pub fn from_json(body: &Value) -> Self {
        let Some(fields) = body.as_object() else {
            return Self::default();
        };

        Self {
            score: fields.get(FIELD_SCORE).map_or(0, count_from_json),
            stars: fields.get(FIELD_STARS).map_or(0, count_from_json),
            game_type: fields.get(FIELD_GAME_TYPE).and_then(game_type_from_json),
            duration: fields.get(FIELD_DURATION).map_or(0, count_from_json),
        }
    }

    /// Coerce a URL-encoded form body, where every value is a string.
    pub fn from_form(fields: &BTreeMap<String, String>) -> Self {
        let count = |key: &str| fields.get(key).map_or(0, |raw| count_from_str(raw));

        Self {
            score: count(FIELD_SCORE),
            stars: count(FIELD_STARS),
            game_type: fields
                .get(FIELD_GAME_TYPE)
                .filter(|g| !g.is_empty())
                .cloned(),
            duration: count(FIELD_DURATION),
        }
    }
}

fn count_from_json(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => count_from_str(s),
        _ => 0,
    }
}

fn count_from_str(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

fn game_type_from_json(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|g| !g.is_empty())
        .map(ToOwned::to_owned)
}
