//! Theme system

use ratatui::style::Color;

/// Complete color palette for TUI rendering
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    // Borders
    pub border_default: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Status
    pub success: Color,
    pub error: Color,

    // Accents
    pub accent_purple: Color,
    pub accent_green: Color,
}

impl ThemeColors {
    /// Default theme
    pub const DEFAULT: Self = Self {
        // Borders
        border_default: Color::Rgb(130, 135, 160),

        // Text
        text_primary: Color::Rgb(230, 233, 248),
        text_secondary: Color::Rgb(185, 190, 210),
        text_muted: Color::Rgb(140, 145, 168),

        // Status
        success: Color::Rgb(110, 220, 120),
        error: Color::Rgb(250, 120, 130),

        // Accents
        accent_purple: Color::Rgb(190, 140, 240),
        accent_green: Color::Rgb(110, 210, 120),
    };
}

/// Theme container providing access to color palette
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    #[inline]
    pub const fn colors(&self) -> ThemeColors {
        ThemeColors::DEFAULT
    }
}
