//! Focus and announcement manager.
//!
//! Runs after every location change: focus moves to the main landmark and a
//! polite, visually hidden status node reads "Navigated to {heading}" for a
//! short while. Pages without a level-one heading get no announcement.

use std::time::Duration;

use crate::constants::{ANNOUNCEMENT_DURATION, MAIN_CONTENT_ID};
use crate::dom::{Document, ElementId};
use crate::timer::{Scheduler, TimerHandle, TimerTask};

/// A live announcement and the timer that will remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    /// Status node in the document
    pub node: ElementId,
    /// Pending removal
    pub timer: TimerHandle,
}

/// What a location change did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationChangeReport {
    /// Main landmark that received focus
    pub focused: Option<ElementId>,
    /// Text of the announcement, if one was made
    pub announced: Option<String>,
}

/// Moves focus and posts announcements on navigation.
#[derive(Debug, Clone)]
pub struct FocusManager {
    announcement_duration: Duration,
    announcements: Vec<Announcement>,
}

impl FocusManager {
    /// Creates a manager that keeps announcements for `announcement_duration`.
    #[must_use]
    pub const fn new(announcement_duration: Duration) -> Self {
        Self {
            announcement_duration,
            announcements: Vec::new(),
        }
    }

    /// Announcements still in the document.
    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    /// Applies the focus move and the announcement for a new location.
    ///
    /// Each side effect is skipped on its own when its landmark is missing.
    pub fn on_location_change(
        &mut self,
        now: Duration,
        document: &mut Document,
        scheduler: &mut Scheduler,
    ) -> LocationChangeReport {
        let focused = Self::focus_main(document);

        let heading = document
            .primary_heading()
            .map(|h| h.text.trim().to_string())
            .filter(|text| !text.is_empty());

        let announced = heading.map(|heading| {
            let text = format!("Navigated to {heading}");
            let node = document.append_status(&text);
            let timer = scheduler.schedule(
                now,
                self.announcement_duration,
                TimerTask::RemoveAnnouncement(node),
            );
            self.announcements.push(Announcement { node, timer });
            tracing::info!(target: "folio::announce", "{text}");
            text
        });

        if announced.is_none() {
            tracing::debug!("no primary heading, skipping announcement");
        }

        LocationChangeReport { focused, announced }
    }

    fn focus_main(document: &mut Document) -> Option<ElementId> {
        let Some(main) = document.main_landmark() else {
            tracing::debug!("no main landmark, focus unchanged");
            return None;
        };
        document.set_attribute(main, "id", MAIN_CONTENT_ID);
        document.set_attribute(main, "tabindex", "-1");
        document.set_attribute(main, "style", "outline: none");
        document.focus(main);
        Some(main)
    }

    /// Handles a fired removal timer. Returns true if it was ours.
    pub fn on_timer(&mut self, handle: TimerHandle, document: &mut Document) -> bool {
        let Some(index) = self.announcements.iter().position(|a| a.timer == handle) else {
            return false;
        };
        let announcement = self.announcements.remove(index);
        document.remove(announcement.node);
        true
    }

    /// Removes every outstanding announcement and cancels its timer.
    pub fn unmount(&mut self, document: &mut Document, scheduler: &mut Scheduler) {
        for announcement in self.announcements.drain(..) {
            scheduler.cancel(announcement.timer);
            document.remove(announcement.node);
        }
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new(ANNOUNCEMENT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementKind, NewElement, Region};

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn document_with(heading: Option<(u8, &str)>) -> Document {
        let mut doc = Document::new();
        doc.append(Region::Main, NewElement::new(ElementKind::Main, ""));
        if let Some((level, text)) = heading {
            doc.replace_main_content(vec![NewElement::new(ElementKind::Heading(level), text)]);
        }
        doc
    }

    #[test]
    fn test_focus_and_announce() {
        let mut doc = document_with(Some((1, "Hi, I'm Pawan Yadav")));
        let mut scheduler = Scheduler::new();
        let mut manager = FocusManager::default();

        let report = manager.on_location_change(ms(0), &mut doc, &mut scheduler);
        let main = doc.main_landmark().unwrap();

        assert_eq!(report.focused, Some(main));
        assert_eq!(doc.active_element(), Some(main));
        let main_el = doc.get(main).unwrap();
        assert_eq!(main_el.tabindex, Some(-1));
        assert_eq!(main_el.attribute("id"), Some(MAIN_CONTENT_ID));
        assert_eq!(main_el.attribute("style"), Some("outline: none"));

        assert_eq!(
            report.announced.as_deref(),
            Some("Navigated to Hi, I'm Pawan Yadav")
        );
        let nodes: Vec<_> = doc.status_nodes().collect();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text, "Navigated to Hi, I'm Pawan Yadav");
    }

    #[test]
    fn test_announcement_removed_after_duration() {
        let mut doc = document_with(Some((1, "Home")));
        let mut scheduler = Scheduler::new();
        let mut manager = FocusManager::default();
        manager.on_location_change(ms(0), &mut doc, &mut scheduler);

        assert!(scheduler.drain_due(ms(999)).is_empty());
        for (handle, _) in scheduler.drain_due(ms(1000)) {
            assert!(manager.on_timer(handle, &mut doc));
        }
        assert_eq!(doc.status_nodes().count(), 0);
        assert!(manager.announcements().is_empty());
    }

    #[test]
    fn test_no_heading_means_no_announcement() {
        let mut doc = document_with(Some((2, "About Me")));
        let mut scheduler = Scheduler::new();
        let mut manager = FocusManager::default();

        let report = manager.on_location_change(ms(0), &mut doc, &mut scheduler);
        assert!(report.focused.is_some());
        assert!(report.announced.is_none());
        assert_eq!(doc.status_nodes().count(), 0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_missing_main_still_announces() {
        let mut doc = Document::new();
        doc.append(Region::Body, NewElement::new(ElementKind::Heading(1), "Orphan"));
        let mut scheduler = Scheduler::new();
        let mut manager = FocusManager::default();

        let report = manager.on_location_change(ms(0), &mut doc, &mut scheduler);
        assert!(report.focused.is_none());
        assert_eq!(report.announced.as_deref(), Some("Navigated to Orphan"));
    }

    #[test]
    fn test_unmount_clears_everything() {
        let mut doc = document_with(Some((1, "Home")));
        let mut scheduler = Scheduler::new();
        let mut manager = FocusManager::default();
        manager.on_location_change(ms(0), &mut doc, &mut scheduler);
        manager.on_location_change(ms(100), &mut doc, &mut scheduler);
        assert_eq!(doc.status_nodes().count(), 2);

        manager.unmount(&mut doc, &mut scheduler);
        assert_eq!(doc.status_nodes().count(), 0);
        assert!(scheduler.is_empty());
    }
}
