//! Centralized shortcut and action system.
//!
//! Key events are resolved to [`Action`]s by a static table. Resolution is a
//! pure lookup so it can be tested without a terminal; applying the action is
//! the dispatcher's job.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

use crate::router::Route;

/// Everything a global shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Go to a route
    Navigate(Route),
    /// Flip light/dark
    ToggleTheme,
    /// Move focus to the next focusable element
    FocusNext,
    /// Move focus to the previous focusable element
    FocusPrevious,
    /// Leave the application
    Quit,
}

impl Action {
    /// Stable identifier, used in logs.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Navigate(Route::Home) => "navigate_home",
            Self::Navigate(Route::About) => "navigate_about",
            Self::Navigate(Route::Projects) => "navigate_projects",
            Self::Navigate(Route::Contact) => "navigate_contact",
            Self::ToggleTheme => "toggle_theme",
            Self::FocusNext => "focus_next",
            Self::FocusPrevious => "focus_previous",
            Self::Quit => "quit",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code, lowercase for characters
    pub code: KeyCode,
    /// Alt / Control only; Shift is folded into the code
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalizes a key event.
    ///
    /// Letters are lowercased so Alt+Shift+H still means Alt+H, and Shift+Tab
    /// becomes `BackTab` regardless of how the terminal reports it. Alt wins
    /// over Ctrl, since some terminals report AltGr as Ctrl+Alt.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Self {
        let modifiers = if event.modifiers.contains(KeyModifiers::ALT) {
            KeyModifiers::ALT
        } else {
            event.modifiers & KeyModifiers::CONTROL
        };
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            other => other,
        };
        Self { code, modifiers }
    }

    /// Human readable form, e.g. `Alt + H`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        parts.push(match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift + Tab".to_string(),
            other => format!("{other:?}"),
        });
        parts.join(" + ")
    }
}

/// Shortcut registry mapping key bindings to actions.
///
/// At most one action per binding; anything not in the table is ignored.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry {
    bindings: HashMap<KeyBinding, Action>,
}

impl ShortcutRegistry {
    /// Create a registry with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };
        registry.register_global_shortcuts();
        registry
    }

    fn register_global_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        // === NAVIGATION ===
        for route in Route::ALL {
            self.register(K::Char(route.shortcut_key()), M::ALT, Action::Navigate(route));
        }

        // === PREFERENCES ===
        self.register(K::Char('t'), M::ALT, Action::ToggleTheme);

        // === FOCUS ORDER ===
        self.register(K::Tab, M::NONE, Action::FocusNext);
        self.register(K::BackTab, M::NONE, Action::FocusPrevious);

        // === GENERAL ===
        self.register(K::Char('q'), M::CONTROL, Action::Quit);
        self.register(K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register(&mut self, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let previous = self.bindings.insert(KeyBinding::new(code, modifiers), action);
        debug_assert!(previous.is_none(), "duplicate binding for {action:?}");
    }

    /// Look up the action for a key event.
    ///
    /// Only key presses resolve; repeats and releases are ignored.
    #[must_use]
    pub fn lookup(&self, event: KeyEvent) -> Option<Action> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// The first binding for an action, for hints in the UI.
    #[must_use]
    pub fn binding_for(&self, action: Action) -> Option<KeyBinding> {
        let mut matches: Vec<KeyBinding> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(binding, _)| *binding)
            .collect();
        // HashMap order is arbitrary; keep hints stable
        matches.sort_by_key(KeyBinding::label);
        matches.into_iter().next()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
