//! Navbar and footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::AppState;
use crate::dom::{ButtonRole, Element, ElementKind, LinkTarget, Region};

/// Navbar widget
pub struct NavBar;

impl NavBar {
    /// Render brand, route links and the theme toggle on one row.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let line = Self::line(state, theme);
        let widget = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.text_muted))
                .style(Style::default().bg(theme.surface)),
        );
        f.render_widget(widget, area);
    }

    fn line(state: &AppState, theme: &Theme) -> Line<'static> {
        let document = state.document();
        let active = document.active_element();
        let location = state.router().location();

        let mut spans = Vec::new();
        for element in document.region(Region::Nav) {
            let focused = Some(element.id) == active;
            let mut style = Self::base_style(element, location, state.is_dark(), theme);
            if focused {
                style = style.bg(theme.highlight_bg).add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {} ", Self::label(element, state)), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn base_style(element: &Element, location: &str, dark: bool, theme: &Theme) -> Style {
        match &element.kind {
            ElementKind::Link(_) if element.attribute("class") == Some("brand") => Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
            ElementKind::Link(LinkTarget::Route(path)) if path == location => Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::UNDERLINED),
            ElementKind::Button(ButtonRole::ToggleTheme) => {
                Style::default().fg(if dark { theme.accent } else { theme.text_secondary })
            }
            _ => Style::default().fg(theme.text),
        }
    }

    fn label(element: &Element, state: &AppState) -> String {
        match element.kind {
            ElementKind::Button(ButtonRole::ToggleTheme) => {
                if state.is_dark() {
                    "☀ Light".to_string()
                } else {
                    "☾ Dark".to_string()
                }
            }
            _ => element.text.clone(),
        }
    }
}

/// Footer widget
pub struct Footer;

impl Footer {
    /// Render the copyright line and the profile links.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let document = state.document();
        let active = document.active_element();

        let mut spans = Vec::new();
        for element in document.region(Region::Footer) {
            let focused = Some(element.id) == active;
            let mut style = match element.kind {
                ElementKind::Link(_) => Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
                _ => Style::default().fg(theme.text_muted),
            };
            if focused {
                style = style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(element.text.clone(), style));
            spans.push(Span::raw("  "));
        }

        let widget = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.text_muted))
                .style(Style::default().bg(theme.surface)),
        );
        f.render_widget(widget, area);
    }
}
