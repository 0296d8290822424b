//! Musical style tags
//!
//! Leads and track requests carry a free-form style string; the known
//! styles map to a display symbol, everything else falls back to the
//! default music note.

/// Recognized musical styles plus a catch-all for anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Pop,
    Rock,
    Jazz,
    Classical,
    Electronic,
    HipHop,
    Ambient,
    Cinematic,
    Other,
}

impl StyleTag {
    /// Parse a free-form style string. Unknown styles become `Other`.
    pub fn parse(style: &str) -> Self {
        match style.trim().to_ascii_lowercase().as_str() {
            "pop" => Self::Pop,
            "rock" => Self::Rock,
            "jazz" => Self::Jazz,
            "classical" => Self::Classical,
            "electronic" => Self::Electronic,
            "hip-hop" | "hiphop" => Self::HipHop,
            "ambient" => Self::Ambient,
            "cinematic" => Self::Cinematic,
            _ => Self::Other,
        }
    }

    /// Display symbol for operator-facing messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pop => "\u{1F3B5}",        // 🎵
            Self::Rock => "\u{1F3B8}",       // 🎸
            Self::Jazz => "\u{1F3BA}",       // 🎺
            Self::Classical => "\u{1F3B9}",  // 🎹
            Self::Electronic => "\u{1F3A7}", // 🎧
            Self::HipHop => "\u{1F3A4}",     // 🎤
            Self::Ambient => "\u{1F319}",    // 🌙
            Self::Cinematic => "\u{1F3AC}",  // 🎬
            Self::Other => "\u{1F3B5}",      // 🎵 (default)
        }
    }
}

/// Title-case a style string for display ("hip-hop" -> "Hip-hop").
pub fn display_style(style: &str) -> String {
    let mut chars = style.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown".to_string(),
    }
}
