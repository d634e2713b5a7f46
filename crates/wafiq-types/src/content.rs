//! Static learning content served to the games.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named color used by the color-recognition game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColorSwatch {
    /// Localized color name.
    pub name: String,
    /// Hex color code, e.g. `#ef4444`.
    pub color: String,
    /// Emoji shown next to the name.
    pub emoji: String,
}

/// A short illustrated story with a moral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Story {
    /// Stable story number, starting at 1.
    pub id: u32,
    /// Localized title.
    pub title: String,
    /// Story text.
    pub content: String,
    /// Emoji illustration.
    pub image: String,
    /// The lesson of the story.
    pub moral: String,
}
