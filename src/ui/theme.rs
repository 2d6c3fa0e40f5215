//! # Theme System
//!
//! Colour themes for the feature and selection screens.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines all colors used by the renderer. Rendering
//! code never hardcodes `ratatui::style::Color` values; it reads theme fields.
//! The active theme is chosen by name in the config file or with `--theme`.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default) - warm, dark pastel theme
//! - **Dracula** - dark theme with vivid colors
//! - **Nord** - arctic, north-bluish color palette
//! - **Gruvbox Dark** - retro groove color scheme

use crate::model::{Era, SupportStatus};
use ratatui::style::Color;

/// All colors used by the viewer, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name used in config files.
    pub name: &'static str,

    // -- Foreground / text colors --
    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (hints, footer, past versions).
    pub fg_dim: Color,

    // -- Accent / brand colors --
    /// Focused borders and the selected browser card.
    pub accent: Color,
    /// Section headings and the current-version marker.
    pub secondary: Color,
    /// Upcoming-version marker and tab titles.
    pub tertiary: Color,

    // -- Support status badges (drawn as background) --
    pub supported: Color,
    pub unsupported: Color,
    pub partial: Color,
    pub unknown: Color,
    /// Text drawn on top of a status badge.
    pub badge_fg: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Catppuccin Mocha).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Find a theme by name, falling back to the default for unknown names.
    pub fn resolve(name: &str) -> &'static Theme {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, using default");
            Self::default_theme()
        })
    }

    pub fn status_color(&self, status: SupportStatus) -> Color {
        match status {
            SupportStatus::Supported => self.supported,
            SupportStatus::Unsupported => self.unsupported,
            SupportStatus::Partial => self.partial,
            SupportStatus::Unknown => self.unknown,
        }
    }

    pub fn era_color(&self, era: Era) -> Color {
        match era {
            Era::Past => self.fg_dim,
            Era::Current => self.secondary,
            Era::Future => self.tertiary,
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 4] = [
    // 0 - Catppuccin Mocha (default)
    Theme {
        name: "Catppuccin Mocha",
        fg: Color::Rgb(205, 214, 244),          // text
        fg_dim: Color::Rgb(108, 112, 134),      // overlay0
        accent: Color::Rgb(137, 180, 250),      // blue
        secondary: Color::Rgb(137, 220, 235),   // sky
        tertiary: Color::Rgb(203, 166, 247),    // mauve
        supported: Color::Rgb(166, 227, 161),   // green
        unsupported: Color::Rgb(243, 139, 168), // red
        partial: Color::Rgb(249, 226, 175),     // yellow
        unknown: Color::Rgb(147, 153, 178),     // overlay2
        badge_fg: Color::Rgb(17, 17, 27),       // crust
    },
    // 1 - Dracula
    Theme {
        name: "Dracula",
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253), // cyan
        secondary: Color::Rgb(139, 233, 253),
        tertiary: Color::Rgb(255, 121, 198), // pink
        supported: Color::Rgb(80, 250, 123),
        unsupported: Color::Rgb(255, 85, 85),
        partial: Color::Rgb(241, 250, 140),
        unknown: Color::Rgb(189, 147, 249),
        badge_fg: Color::Rgb(40, 42, 54),
    },
    // 2 - Nord
    Theme {
        name: "Nord",
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208), // frost
        secondary: Color::Rgb(143, 188, 187),
        tertiary: Color::Rgb(180, 142, 173),
        supported: Color::Rgb(163, 190, 140),
        unsupported: Color::Rgb(191, 97, 106),
        partial: Color::Rgb(235, 203, 139),
        unknown: Color::Rgb(129, 161, 193),
        badge_fg: Color::Rgb(46, 52, 64),
    },
    // 3 - Gruvbox Dark
    Theme {
        name: "Gruvbox Dark",
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152), // blue
        secondary: Color::Rgb(142, 192, 124),
        tertiary: Color::Rgb(211, 134, 155),
        supported: Color::Rgb(184, 187, 38),
        unsupported: Color::Rgb(251, 73, 52),
        partial: Color::Rgb(250, 189, 47),
        unknown: Color::Rgb(168, 153, 132),
        badge_fg: Color::Rgb(40, 40, 40),
    },
];
