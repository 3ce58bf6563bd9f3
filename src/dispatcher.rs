//! Keyboard command dispatcher.
//!
//! Dispatch is split in two: [`KeyboardDispatcher::resolve`] maps a key event
//! to an [`Action`] without side effects, and [`apply`] performs it against a
//! [`CommandTarget`]. `apply` reports whether the key's default behavior was
//! prevented; the host runs its own fallback when it was not.

use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, ElementId};
use crate::shortcuts::{Action, ShortcutRegistry};

/// What Tab does when the roving order has no neighbour to offer.
///
/// That happens when the active element is not in the focusable list (for
/// example the main landmark right after navigation) or is the first/last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabBoundary {
    /// Leave the key to the host's native traversal
    #[default]
    Native,
    /// Swallow the key; focus stays where it is
    Trap,
}

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Tab
    Forward,
    /// Shift+Tab
    Backward,
}

/// Side effects a dispatched action may need.
pub trait CommandTarget {
    /// Imperative navigation to a literal path.
    fn navigate(&mut self, path: &str);

    /// Flip the theme preference.
    fn toggle_theme(&mut self);

    /// Ask the host to exit.
    fn quit(&mut self);

    /// Document whose focus the roving order moves.
    fn document_mut(&mut self) -> &mut Document;
}

/// Global key listener.
///
/// Lives for as long as the application is mounted; while detached every
/// event resolves to nothing.
#[derive(Debug, Clone)]
pub struct KeyboardDispatcher {
    registry: ShortcutRegistry,
    tab_boundary: TabBoundary,
    attached: bool,
    focused_element: Option<ElementId>,
}

impl KeyboardDispatcher {
    /// Creates a detached dispatcher.
    #[must_use]
    pub const fn new(registry: ShortcutRegistry, tab_boundary: TabBoundary) -> Self {
        Self {
            registry,
            tab_boundary,
            attached: false,
            focused_element: None,
        }
    }

    /// Starts listening.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stops listening.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Whether the listener is active.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Tab boundary policy.
    #[must_use]
    pub const fn tab_boundary(&self) -> TabBoundary {
        self.tab_boundary
    }

    /// Shortcut table.
    #[must_use]
    pub const fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Maps a key event to its action. Unbound keys give `None`.
    #[must_use]
    pub fn resolve(&self, event: KeyEvent) -> Option<Action> {
        if !self.attached {
            return None;
        }
        let action = self.registry.lookup(event);
        if let Some(action) = action {
            tracing::debug!(action = action.id(), "shortcut resolved");
        }
        action
    }

    /// Last element recorded as relevant for focus bookkeeping.
    #[must_use]
    pub const fn focused_element(&self) -> Option<ElementId> {
        self.focused_element
    }

    /// Records the element relevant for focus bookkeeping.
    pub fn set_focused_element(&mut self, id: Option<ElementId>) {
        self.focused_element = id;
    }
}

/// Performs an action. Returns true when the key's default behavior is prevented.
pub fn apply(action: Action, tab_boundary: TabBoundary, target: &mut impl CommandTarget) -> bool {
    match action {
        Action::Navigate(route) => {
            target.navigate(route.path());
            true
        }
        Action::ToggleTheme => {
            target.toggle_theme();
            true
        }
        Action::Quit => {
            target.quit();
            true
        }
        Action::FocusNext => move_focus(target.document_mut(), FocusDirection::Forward, tab_boundary),
        Action::FocusPrevious => {
            move_focus(target.document_mut(), FocusDirection::Backward, tab_boundary)
        }
    }
}

/// Neighbour of `active` in `order`, if both exist.
#[must_use]
pub fn roving_neighbor(
    order: &[ElementId],
    active: Option<ElementId>,
    direction: FocusDirection,
) -> Option<ElementId> {
    let index = order.iter().position(|id| Some(*id) == active)?;
    let next = match direction {
        FocusDirection::Forward => index.checked_add(1)?,
        FocusDirection::Backward => index.checked_sub(1)?,
    };
    order.get(next).copied()
}

/// Roving focus step. Returns true when default traversal is prevented.
pub fn move_focus(document: &mut Document, direction: FocusDirection, boundary: TabBoundary) -> bool {
    let order = document.focusable_elements();
    match roving_neighbor(&order, document.active_element(), direction) {
        Some(next) => {
            document.focus(next);
            true
        }
        None => {
            tracing::debug!(?direction, ?boundary, "no roving neighbour");
            boundary == TabBoundary::Trap
        }
    }
}

/// The host's own Tab traversal, used when the dispatcher did not prevent it.
///
/// Moves to the next focusable element after the active one in document
/// order (the active element itself need not be focusable), wrapping at the
/// ends. With nothing focused it starts from the first or last element.
pub fn native_focus_fallback(document: &mut Document, direction: FocusDirection) -> Option<ElementId> {
    let elements = document.elements();
    let focusable: Vec<(usize, ElementId)> = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_focusable())
        .map(|(i, e)| (i, e.id))
        .collect();
    if focusable.is_empty() {
        return None;
    }

    let active_pos = document
        .active_element()
        .and_then(|id| elements.iter().position(|e| e.id == id));

    let target = match (direction, active_pos) {
        (FocusDirection::Forward, Some(pos)) => focusable
            .iter()
            .find(|(i, _)| *i > pos)
            .or_else(|| focusable.first()),
        (FocusDirection::Backward, Some(pos)) => focusable
            .iter()
            .rev()
            .find(|(i, _)| *i < pos)
            .or_else(|| focusable.last()),
        (FocusDirection::Forward, None) => focusable.first(),
        (FocusDirection::Backward, None) => focusable.last(),
    }
    .map(|(_, id)| *id)?;

    document.focus(target);
    Some(target)
}
