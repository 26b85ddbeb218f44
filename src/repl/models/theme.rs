//! # Theme Model
//!
//! Named color palettes. Widgets never hold colors directly; they ask the
//! active theme for a [`ThemeRole`] at render time.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Semantic color slot a widget renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Background,
    Primary,
    Secondary,
    Accent,
    Success,
    Error,
    Muted,
    White,
    Cool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub error: String,
    pub muted: String,
    pub white: String,
    pub cool: String,
}

/// Persisted theme selection. Changing themes replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn hex(&self, role: ThemeRole) -> &str {
        let c = &self.colors;
        match role {
            ThemeRole::Background => &c.background,
            ThemeRole::Primary => &c.primary,
            ThemeRole::Secondary => &c.secondary,
            ThemeRole::Accent => &c.accent,
            ThemeRole::Success => &c.success,
            ThemeRole::Error => &c.error,
            ThemeRole::Muted => &c.muted,
            ThemeRole::White => &c.white,
            ThemeRole::Cool => &c.cool,
        }
    }

    /// Terminal color for a role; unparsable hex falls back to the terminal default
    pub fn color(&self, role: ThemeRole) -> Color {
        parse_hex_color(self.hex(role)).unwrap_or(Color::Reset)
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

/// Parse `#rrggbb` (the `#` is optional)
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

pub const DEFAULT_THEME_NAME: &str = "Tokyo Night";

// name, then background primary secondary accent success error muted white cool
const BUILTIN_PALETTES: [(&str, [&str; 9]); 10] = [
    (
        "Catppuccin",
        [
            "#181825", "#8aadf4", "#b7bdf8", "#f5c2e7", "#a6e3a1", "#f38ba8", "#6e738d", "#cdd6f4",
            "#89dceb",
        ],
    ),
    (
        "Dracula",
        [
            "#282a36", "#bd93f9", "#ff79c6", "#50fa7b", "#50fa7b", "#ff5555", "#6272a4", "#f8f8f2",
            "#8be9fd",
        ],
    ),
    (
        "Nord",
        [
            "#2e3440", "#88c0d0", "#81a1c1", "#b48ead", "#a3be8c", "#bf616a", "#4c566a", "#eceff4",
            "#8fbcbb",
        ],
    ),
    (
        "Gruvbox",
        [
            "#282828", "#83a598", "#d3869b", "#b8bb26", "#b8bb26", "#fb4934", "#928374", "#ebdbb2",
            "#8ec07c",
        ],
    ),
    (
        "Tokyo Night",
        [
            "#1a1b26", "#7aa2f7", "#bb9af7", "#2ac3de", "#9ece6a", "#f7768e", "#565f89", "#a9b1d6",
            "#7dcfff",
        ],
    ),
    (
        "Ayu",
        [
            "#0f1419", "#39bae6", "#ffb454", "#a37acc", "#86b300", "#ff3333", "#626a73", "#e6e1cf",
            "#95e6cb",
        ],
    ),
    (
        "Monokai",
        [
            "#272822", "#66d9ef", "#ae81ff", "#f92672", "#a6e22e", "#f92672", "#75715e", "#f8f8f2",
            "#fd971f",
        ],
    ),
    (
        "Solarized Dark",
        [
            "#002b36", "#268bd2", "#6c71c4", "#2aa198", "#859900", "#dc322f", "#586e75", "#93a1a1",
            "#cb4b16",
        ],
    ),
    (
        "One Dark",
        [
            "#282c34", "#61afef", "#c678dd", "#98c379", "#98c379", "#e06c75", "#5c6370", "#abb2bf",
            "#56b6c2",
        ],
    ),
    (
        "Palenight",
        [
            "#292d3e", "#82aaff", "#c792ea", "#89ddff", "#c3e88d", "#f07178", "#676e95", "#a6accd",
            "#89ddff",
        ],
    ),
];

fn theme_from_palette(name: &str, palette: &[&str; 9]) -> Theme {
    let [background, primary, secondary, accent, success, error, muted, white, cool] =
        palette.map(str::to_string);
    Theme {
        name: name.to_string(),
        colors: ThemeColors {
            background,
            primary,
            secondary,
            accent,
            success,
            error,
            muted,
            white,
            cool,
        },
    }
}

/// All built-in themes in picker order
pub fn builtin_themes() -> Vec<Theme> {
    BUILTIN_PALETTES
        .iter()
        .map(|(name, palette)| theme_from_palette(name, palette))
        .collect()
}

pub fn default_theme() -> Theme {
    BUILTIN_PALETTES
        .iter()
        .find(|(name, _)| *name == DEFAULT_THEME_NAME)
        .map(|(name, palette)| theme_from_palette(name, palette))
        .unwrap_or_else(|| theme_from_palette(BUILTIN_PALETTES[0].0, &BUILTIN_PALETTES[0].1))
}
