//! Static learning content: the Arabic alphabet, colors, and stories.
//!
//! The content is literal data. A [`ContentCatalog`] is built once per
//! service instance and shared read-only between requests.

use wafiq_types::{ColorSwatch, Story};

const LETTERS: [&str; 28] = [
    "أ", "ب", "ت", "ث", "ج", "ح", "خ", "د", "ذ", "ر", "ز", "س", "ش", "ص", "ض", "ط", "ظ", "ع", "غ",
    "ف", "ق", "ك", "ل", "م", "ن", "هـ", "و", "ي",
];

/// `(name, hex, emoji)`.
const COLORS: [(&str, &str, &str); 8] = [
    ("أحمر", "#ef4444", "🔴"),
    ("أزرق", "#3b82f6", "🔵"),
    ("أخضر", "#10b981", "🟢"),
    ("أصفر", "#f59e0b", "🟡"),
    ("بنفسجي", "#8b5cf6", "🟣"),
    ("برتقالي", "#f97316", "🟠"),
    ("وردي", "#ec4899", "🩷"),
    ("بني", "#a3a3a3", "🤎"),
];

/// `(title, content, image, moral)`, numbered from 1 in order.
const STORIES: [(&str, &str, &str, &str); 3] = [
    (
        "القطة الصغيرة",
        "كان هناك قطة صغيرة تحب اللعب في الحديقة. كل يوم تجري وتلعب مع الفراشات الملونة.",
        "🐱",
        "اللعب والمرح مهمان للنمو الصحي",
    ),
    (
        "الأرنب السريع",
        "أرنب صغير يحب الجزر كثيراً. يقفز ويلعب مع أصدقائه في المرج الأخضر.",
        "🐰",
        "الأصدقاء يجعلون الحياة أجمل",
    ),
    (
        "النحلة المجتهدة",
        "نحلة صغيرة تطير من زهرة إلى زهرة لتجمع العسل اللذيذ لأصدقائها.",
        "🐝",
        "العمل الجاد يؤدي إلى النجاح",
    ),
];

/// The content served by the letters, colors, and stories endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCatalog {
    letters: Vec<String>,
    colors: Vec<ColorSwatch>,
    stories: Vec<Story>,
}

impl ContentCatalog {
    /// Build the standard catalog.
    pub fn new() -> Self {
        let letters = LETTERS.iter().map(|&l| String::from(l)).collect();

        let colors = COLORS
            .iter()
            .map(|&(name, color, emoji)| ColorSwatch {
                name: String::from(name),
                color: String::from(color),
                emoji: String::from(emoji),
            })
            .collect();

        let stories = (1_u32..)
            .zip(STORIES)
            .map(|(id, (title, content, image, moral))| Story {
                id,
                title: String::from(title),
                content: String::from(content),
                image: String::from(image),
                moral: String::from(moral),
            })
            .collect();

        Self {
            letters,
            colors,
            stories,
        }
    }

    /// The 28 letters of the Arabic alphabet, in order.
    pub fn letters(&self) -> &[String] {
        &self.letters
    }

    /// The colors of the color-recognition game.
    pub fn colors(&self) -> &[ColorSwatch] {
        &self.colors
    }

    /// The short stories, ordered by id.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::new()
    }
}
