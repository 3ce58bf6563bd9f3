//! Key event handling for [`AppState`].
//!
//! Global shortcuts are resolved first, on every key press, wherever focus
//! is. Keys that are not shortcuts go to the focused element: Enter and
//! Space activate links and buttons, text keys edit form fields.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::AppState;
use crate::contact::{Field, SubmitAttempt};
use crate::dispatcher::{self, FocusDirection};
use crate::dom::{ButtonRole, ElementKind, LinkTarget};
use crate::shortcuts::Action;

impl AppState {
    /// Handles one key event at time `now`.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Duration) {
        self.tick(now);
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(action) = self.dispatcher.resolve(key) {
            let boundary = self.dispatcher.tab_boundary();
            let prevented = dispatcher::apply(action, boundary, self);
            if !prevented {
                self.native_default(action);
            }
        } else if self.dispatcher.is_attached() {
            self.handle_focused_key(key);
        }

        self.dispatcher
            .set_focused_element(self.document.active_element());
    }

    /// The terminal's own behavior for a key the dispatcher left alone.
    fn native_default(&mut self, action: Action) {
        let direction = match action {
            Action::FocusNext => FocusDirection::Forward,
            Action::FocusPrevious => FocusDirection::Backward,
            _ => return,
        };
        dispatcher::native_focus_fallback(&mut self.document, direction);
    }

    fn handle_focused_key(&mut self, key: KeyEvent) {
        let Some(kind) = self
            .document
            .active_element()
            .and_then(|id| self.document.get(id))
            .map(|element| element.kind.clone())
        else {
            return;
        };

        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (kind, key.code) {
            (ElementKind::Link(target), KeyCode::Enter) => self.follow_link(&target),
            (ElementKind::Button(role), KeyCode::Enter | KeyCode::Char(' ')) => {
                self.press_button(role);
            }
            (ElementKind::Input(field) | ElementKind::TextArea(field), KeyCode::Backspace) => {
                self.contact_form.backspace(field);
            }
            (ElementKind::TextArea(field), KeyCode::Enter) => {
                self.contact_form.insert_char(field, '\n');
            }
            (ElementKind::Input(_), KeyCode::Enter) => self.submit_contact(),
            (ElementKind::Input(field) | ElementKind::TextArea(field), KeyCode::Char(c))
                if plain =>
            {
                self.type_char(field, c);
            }
            _ => {}
        }
    }

    fn type_char(&mut self, field: Field, c: char) {
        if !self.contact_form.insert_char(field, c) && !self.contact_form.is_editable() {
            self.set_status("Sending, please wait...");
        }
    }

    fn follow_link(&mut self, target: &LinkTarget) {
        match target {
            LinkTarget::Route(path) => {
                let path = path.clone();
                self.navigate(&path);
            }
            LinkTarget::External(href) => {
                tracing::info!(href = %href, "opening external link");
                match open::that_detached(href) {
                    Ok(()) => self.set_status(format!("Opened {href}")),
                    Err(e) => {
                        tracing::warn!("failed to open {href}: {e}");
                        self.set_error(format!("Could not open {href}: {e}"));
                    }
                }
            }
        }
    }

    fn press_button(&mut self, role: ButtonRole) {
        match role {
            ButtonRole::ToggleTheme => self.toggle_theme(),
            ButtonRole::SubmitContact => self.submit_contact(),
        }
    }

    fn submit_contact(&mut self) {
        let attempt =
            self.contact_form
                .submit(self.now, self.submitter.as_mut(), &mut self.scheduler);
        match attempt {
            SubmitAttempt::Started => self.set_status("Sending..."),
            SubmitAttempt::Invalid => self.set_error("Please fix the highlighted fields"),
            SubmitAttempt::Busy => tracing::debug!("submit ignored, already sending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::AppState;
    use crate::config::Config;
    use crate::contact::{Field, FormStatus, SimulatedSubmitter};
    use crate::dom::{ButtonRole, ElementKind};
    use crate::router::Route;
    use crate::storage::MemoryStorage;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    fn app_at(path: &str) -> AppState {
        AppState::new(
            Config::default(),
            Box::new(MemoryStorage::new()),
            Box::new(SimulatedSubmitter::default()),
            path,
            Duration::ZERO,
        )
    }

    fn key(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) {
        let now = app.now();
        app.handle_key_event(KeyEvent::new(code, modifiers), now);
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            key(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn focus_field(app: &mut AppState, field: Field) {
        let id = app.document().field_element(field).unwrap();
        app.document.focus(id);
    }

    #[test]
    fn test_enter_on_nav_link_navigates() {
        let mut app = app_at("/");
        let about = app
            .document()
            .elements()
            .iter()
            .find(|e| e.text == "About")
            .unwrap()
            .id;
        app.document.focus(about);
        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.router().route(), Some(Route::About));
    }

    #[test]
    fn test_space_on_theme_button_toggles() {
        let mut app = app_at("/");
        let button = app
            .document()
            .elements()
            .iter()
            .find(|e| e.kind == ElementKind::Button(ButtonRole::ToggleTheme))
            .unwrap()
            .id;
        app.document.focus(button);
        key(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(app.is_dark());
    }

    #[test]
    fn test_shortcuts_win_inside_fields() {
        let mut app = app_at(Route::Contact.path());
        focus_field(&mut app, Field::Name);
        key(&mut app, KeyCode::Char('h'), KeyModifiers::ALT);
        assert_eq!(app.router().route(), Some(Route::Home));
    }

    #[test]
    fn test_plain_letters_type_into_fields() {
        let mut app = app_at(Route::Contact.path());
        focus_field(&mut app, Field::Name);
        type_text(&mut app, "hat");
        key(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.contact_form().value(Field::Name), "ha");
        assert_eq!(app.router().route(), Some(Route::Contact));
    }

    #[test]
    fn test_textarea_accepts_newlines() {
        let mut app = app_at(Route::Contact.path());
        focus_field(&mut app, Field::Message);
        type_text(&mut app, "a");
        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        type_text(&mut app, "b");
        assert_eq!(app.contact_form().value(Field::Message), "a\nb");
    }

    #[test]
    fn test_enter_in_input_submits() {
        let mut app = app_at(Route::Contact.path());
        focus_field(&mut app, Field::Email);
        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.error_message().is_some());
        assert_eq!(app.contact_form().status(), &FormStatus::Editing);
        assert!(app.contact_form().error(Field::Name).is_some());
    }

    #[test]
    fn test_tab_from_main_moves_into_page() {
        let mut app = app_at("/");
        // focus starts on the main landmark, which is outside the roving order
        key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        let active = app.document().active_element().unwrap();
        let element = app.document().get(active).unwrap();
        assert!(element.is_focusable());
        assert_eq!(element.region, crate::dom::Region::Main);
        assert_eq!(app.dispatcher().focused_element(), Some(active));
    }
}
