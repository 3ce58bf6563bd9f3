//! Main region renderer: page content, form fields and the enter animation.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::app::AppState;
use crate::contact::FormStatus;
use crate::dom::{ButtonRole, Element, ElementKind, Region};

/// Rows the content starts below its resting place when a page enters.
const ENTER_OFFSET_ROWS: f32 = 2.0;

/// Page content widget
pub struct PageView;

impl PageView {
    /// Render the main region.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let (mut lines, focus_line) = Self::lines(state, theme);

        let progress = state.transition().enter_progress(state.now());
        let offset = Self::enter_offset(progress, state.config().ui.reduced_motion);
        if offset > 0 {
            let mut shifted = vec![Line::default(); offset];
            shifted.append(&mut lines);
            lines = shifted;
        }

        let mut style = Style::default().fg(theme.text).bg(theme.background);
        if progress < 1.0 {
            style = style.add_modifier(Modifier::DIM);
        }

        // keep the focused element on screen
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = focus_line
            .map(|line| (line + offset + 1).saturating_sub(visible))
            .unwrap_or(0);

        let title = state
            .router()
            .route()
            .map_or_else(|| format!(" {} ", state.router().location()), |r| {
                format!(" {} ", r.label())
            });

        let paragraph = Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(Style::default().fg(theme.text_muted))
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(paragraph, area);
    }

    /// Rows of slide-in offset for an enter progress.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn enter_offset(progress: f32, reduced_motion: bool) -> usize {
        if reduced_motion {
            return 0;
        }
        let remaining = (1.0 - progress.clamp(0.0, 1.0)) * ENTER_OFFSET_ROWS;
        remaining.round() as usize
    }

    /// Lines of the main region and the line the focused element starts on.
    pub fn lines(state: &AppState, theme: &Theme) -> (Vec<Line<'static>>, Option<usize>) {
        let document = state.document();
        let active = document.active_element();
        let mut lines = Vec::new();
        let mut focus_line = None;

        for element in document.region(Region::Main) {
            if element.kind == ElementKind::Main || element.is_visually_hidden() {
                continue;
            }
            let focused = Some(element.id) == active;
            if focused {
                focus_line = Some(lines.len());
            }
            Self::push_element(&mut lines, element, focused, state, theme);
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nothing here.",
                Style::default().fg(theme.text_muted),
            )));
        }

        (lines, focus_line)
    }

    fn push_element(
        lines: &mut Vec<Line<'static>>,
        element: &Element,
        focused: bool,
        state: &AppState,
        theme: &Theme,
    ) {
        let focus = |style: Style| {
            if focused {
                style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
            } else {
                style
            }
        };
        let form = state.contact_form();

        match &element.kind {
            ElementKind::Heading(level) => {
                let color = if *level <= 1 { theme.primary } else { theme.secondary };
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                let text = if *level <= 1 {
                    element.text.to_uppercase()
                } else {
                    element.text.clone()
                };
                lines.push(Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
            }
            ElementKind::Paragraph => {
                lines.push(Line::from(element.text.clone()));
            }
            ElementKind::ListItem => {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(theme.accent)),
                    Span::raw(element.text.clone()),
                ]));
            }
            ElementKind::Link(_) => {
                lines.push(Line::from(Span::styled(
                    format!("→ {}", element.text),
                    focus(
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                )));
            }
            ElementKind::Label => {
                lines.push(Line::from(Span::styled(
                    element.text.clone(),
                    Style::default().fg(theme.text_secondary),
                )));
            }
            ElementKind::Input(field) | ElementKind::TextArea(field) => {
                let value = form.value(*field);
                let cursor = if focused { "▏" } else { "" };
                let field_style = focus(Style::default().fg(theme.text).bg(theme.surface));
                let mut rows: Vec<&str> = value.split('\n').collect();
                let cursor_row = rows.len() - 1;
                if field.is_multiline() {
                    while rows.len() < 3 {
                        rows.push("");
                    }
                }
                for (index, row) in rows.into_iter().enumerate() {
                    let text = if index == cursor_row {
                        format!(" {row}{cursor} ")
                    } else {
                        format!(" {row} ")
                    };
                    lines.push(Line::from(Span::styled(text, field_style)));
                }
                if let Some(error) = form.error(*field) {
                    lines.push(Line::from(Span::styled(
                        error,
                        Style::default().fg(theme.error),
                    )));
                }
            }
            ElementKind::Button(role) => {
                let label = match (role, form.status()) {
                    (ButtonRole::SubmitContact, FormStatus::Submitting) => "Sending...".to_string(),
                    _ => element.text.clone(),
                };
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("[ {label} ]"),
                    focus(Style::default().fg(theme.background).bg(theme.primary)),
                )));
                if *role == ButtonRole::SubmitContact {
                    match form.status() {
                        FormStatus::Sent => lines.push(Line::from(Span::styled(
                            "Thanks! Your message has been sent.",
                            Style::default().fg(theme.success),
                        ))),
                        FormStatus::Failed(reason) => lines.push(Line::from(Span::styled(
                            format!("Sending failed: {reason}"),
                            Style::default().fg(theme.error),
                        ))),
                        FormStatus::Editing | FormStatus::Submitting => {}
                    }
                }
            }
            ElementKind::Select | ElementKind::Main | ElementKind::Status => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_offset_shrinks_to_zero() {
        assert_eq!(PageView::enter_offset(0.0, false), 2);
        assert_eq!(PageView::enter_offset(0.5, false), 1);
        assert_eq!(PageView::enter_offset(1.0, false), 0);
        assert_eq!(PageView::enter_offset(0.0, true), 0);
    }
}
