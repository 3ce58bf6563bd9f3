//! Light and dark palettes for the terminal renderer.
//!
//! The palette is chosen from the document's dark marker, the same switch
//! the preference store flips, so the renderer never keeps its own copy of
//! the preference.

use ratatui::style::Color;

use crate::preference::ThemePreference;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Brand colors
    /// Headings, brand, current route
    pub primary: Color,
    /// Secondary emphasis (sub-headings)
    pub secondary: Color,
    /// Links and focus highlights
    pub accent: Color,
    /// Success state color
    pub success: Color,
    /// Error state color
    pub error: Color,

    // Text hierarchy
    /// Body text
    pub text: Color,
    /// Labels
    pub text_secondary: Color,
    /// Hints and footer
    pub text_muted: Color,

    // Backgrounds
    /// Page background
    pub background: Color,
    /// Cards, inputs, the loading box
    pub surface: Color,
    /// Background of the focused element
    pub highlight_bg: Color,
}

const BLUE_500: Color = Color::Rgb(0x3B, 0x82, 0xF6);
const BLUE_700: Color = Color::Rgb(0x1D, 0x4E, 0xD8);
const BLUE_400: Color = Color::Rgb(0x60, 0xA5, 0xFA);

impl Theme {
    /// Palette for a preference.
    #[must_use]
    pub const fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    /// Palette for the current state of the dark marker.
    #[must_use]
    pub const fn from_marker(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Dark palette: gray-900 background, gray-800 surfaces, gray-100 text.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: BLUE_400,
            secondary: BLUE_500,
            accent: BLUE_400,
            success: Color::Rgb(0x4A, 0xDE, 0x80),
            error: Color::Rgb(0xF8, 0x71, 0x71),

            text: Color::Rgb(0xF3, 0xF4, 0xF6),
            text_secondary: Color::Rgb(0xD1, 0xD5, 0xDB),
            text_muted: Color::Rgb(0x9C, 0xA3, 0xAF),

            background: Color::Rgb(0x11, 0x18, 0x27),
            surface: Color::Rgb(0x1F, 0x29, 0x37),
            highlight_bg: Color::Rgb(0x37, 0x41, 0x51),
        }
    }

    /// Light palette: white background, gray-800 text.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: BLUE_500,
            secondary: BLUE_700,
            accent: BLUE_700,
            success: Color::Rgb(0x15, 0x80, 0x3D),
            error: Color::Rgb(0xB9, 0x1C, 0x1C),

            text: Color::Rgb(0x1F, 0x29, 0x37),
            text_secondary: Color::Rgb(0x37, 0x41, 0x51),
            text_muted: Color::Rgb(0x6B, 0x72, 0x80),

            background: Color::White,
            surface: Color::Rgb(0xF9, 0xFA, 0xFB),
            highlight_bg: Color::Rgb(0xDB, 0xEA, 0xFE),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_follow_preference() {
        assert_eq!(Theme::for_preference(ThemePreference::Dark), Theme::dark());
        assert_eq!(Theme::for_preference(ThemePreference::Light), Theme::light());
        assert_eq!(Theme::from_marker(true), Theme::dark());
        assert_eq!(Theme::default(), Theme::light());
    }

    #[test]
    fn test_theme_contrast() {
        let dark = Theme::dark();
        assert_eq!(dark.background, Color::Rgb(0x11, 0x18, 0x27));
        assert_eq!(dark.text, Color::Rgb(0xF3, 0xF4, 0xF6));

        let light = Theme::light();
        assert_eq!(light.background, Color::White);
        assert_ne!(light.text, light.background);
    }

    #[test]
    fn test_semantic_colors_present() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(theme.success, theme.error);
            assert_ne!(theme.text, theme.text_muted);
            assert_ne!(theme.background, theme.highlight_bg);
        }
    }
}
