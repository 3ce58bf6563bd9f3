//! Status bar widget for displaying status messages and shortcut hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::AppState;
use crate::dom::ElementKind;
use crate::router::Route;
use crate::shortcuts::Action;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with the current message and the shortcut hints
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first_line = if let Some(error) = state.error_message() {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::styled(error.to_string(), Style::default().fg(theme.text)),
            ])
        } else if !state.status_message().is_empty() {
            Line::from(Span::styled(
                state.status_message().to_string(),
                Style::default().fg(theme.text),
            ))
        } else {
            Self::focus_line(state, theme)
        };

        let status = Paragraph::new(vec![first_line, Self::hints_line(state, theme)]).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.text_muted))
                .style(Style::default().bg(theme.background)),
        );

        f.render_widget(status, area);
    }

    /// Describes the focused element: where a link goes, or its hint.
    fn focus_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let document = state.document();
        let Some(element) = document.active_element().and_then(|id| document.get(id)) else {
            return Line::from("");
        };

        let detail = match &element.kind {
            ElementKind::Link(target) => element
                .attribute("title")
                .map_or_else(|| target.href().to_string(), |title| {
                    format!("{} ({title})", target.href())
                }),
            ElementKind::Button(_) => element
                .attribute("title")
                .unwrap_or(element.text.as_str())
                .to_string(),
            ElementKind::Input(field) | ElementKind::TextArea(field) => {
                format!("Editing {}", field.label())
            }
            _ => return Line::from(""),
        };

        Line::from(vec![
            Span::styled("Focus: ", Style::default().fg(theme.primary)),
            Span::styled(detail, Style::default().fg(theme.text_secondary)),
        ])
    }

    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let registry = state.dispatcher().registry();
        let mut hints: Vec<(String, &str)> = Route::ALL
            .into_iter()
            .filter_map(|route| {
                registry
                    .binding_for(Action::Navigate(route))
                    .map(|b| (b.label(), route.label()))
            })
            .collect();
        for (action, label) in [
            (Action::ToggleTheme, "Theme"),
            (Action::FocusNext, "Next"),
            (Action::Quit, "Quit"),
        ] {
            if let Some(binding) = registry.binding_for(action) {
                hints.push((binding.label(), label));
            }
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::styled(
                action.to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }

        if !state.preferences().is_persistent() {
            spans.push(Span::styled(
                "  (theme not saved)",
                Style::default().fg(theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}
