//! Application orchestration layer
//!
//! [`AppState`] wires the coordination pieces together: the router and route
//! table, the document, the preference store, the transition sequencer, the
//! focus manager, the keyboard dispatcher and the contact form. It owns the
//! timer queue and routes every fired task back to the piece that scheduled
//! it. Nothing here touches the terminal, so it can be driven from tests with
//! explicit timestamps.

mod input;
pub mod launch;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::Config;
use crate::contact::{ContactForm, ContactSubmitter};
use crate::dispatcher::{CommandTarget, KeyboardDispatcher};
use crate::dom::{Document, StyleRoot};
use crate::focus::FocusManager;
use crate::overlay::OverlayController;
use crate::pages::{self, SiteInfo};
use crate::preference::{PreferenceStore, ThemePreference};
use crate::router::{RouteTable, Router};
use crate::shortcuts::ShortcutRegistry;
use crate::storage::PreferenceStorage;
use crate::timer::{Scheduler, TimerTask};
use crate::transition::PageTransition;

/// Application state - single source of truth
///
/// The renderer reads from this state immutably. Only key events and timer
/// ticks modify it.
pub struct AppState {
    config: Config,
    site: SiteInfo,
    routes: RouteTable,
    router: Router,
    document: Document,
    preferences: PreferenceStore,
    overlay: OverlayController,
    transition: PageTransition,
    focus: FocusManager,
    dispatcher: KeyboardDispatcher,
    scheduler: Scheduler,
    contact_form: ContactForm,
    submitter: Box<dyn ContactSubmitter>,
    theme_changes: Rc<Cell<Option<ThemePreference>>>,
    status_message: String,
    error_message: Option<String>,
    now: Duration,
    should_quit: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("location", &self.router.location())
            .field("theme", &self.preferences.preference())
            .field("busy", &self.overlay.is_busy())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Mounts the application at `initial_path`.
    ///
    /// The stored theme is applied to the document before anything else
    /// happens, so the first frame already has the right appearance. The
    /// initial location then goes through the same transition, focus and
    /// announcement path as any later navigation.
    pub fn new(
        config: Config,
        storage: Box<dyn PreferenceStorage>,
        submitter: Box<dyn ContactSubmitter>,
        initial_path: &str,
        now: Duration,
    ) -> Self {
        let site = config.site_info();
        let registry = ShortcutRegistry::new();

        let mut document = Document::new();
        pages::mount_chrome(&mut document, &site, &registry);

        let mut preferences =
            PreferenceStore::load(storage, config.ui.first_run_theme.resolve(), &mut document);
        let theme_changes = Rc::new(Cell::new(None));
        let sink = Rc::clone(&theme_changes);
        preferences.subscribe(move |value| sink.set(Some(value)));

        let mut dispatcher = KeyboardDispatcher::new(registry, config.ui.tab_boundary);
        dispatcher.attach();

        let mut state = Self {
            transition: PageTransition::new(config.timing.transition()),
            focus: FocusManager::new(config.timing.announcement()),
            config,
            site,
            routes: RouteTable::site(),
            router: Router::new(initial_path),
            document,
            preferences,
            overlay: OverlayController::new(),
            dispatcher,
            scheduler: Scheduler::new(),
            contact_form: ContactForm::new(),
            submitter,
            theme_changes,
            status_message: String::new(),
            error_message: None,
            now,
            should_quit: false,
        };
        state.on_location_change();
        state
    }

    /// Pushes a new location and runs the location-change effects.
    ///
    /// A push to the current path keeps the mounted page, the overlay and the
    /// form as they are; only focus and the announcement run again.
    pub fn navigate(&mut self, path: &str) {
        let same_page = self.router.location() == path;
        self.router.navigate(path);
        if same_page {
            self.refocus_main();
        } else {
            self.on_location_change();
        }
    }

    fn on_location_change(&mut self) {
        let path = self.router.location().to_string();

        // the form's state belongs to the page that is going away
        self.contact_form.unmount(&mut self.scheduler);
        self.contact_form = ContactForm::new();

        let page = self.routes.resolve(&path).map(|entry| entry.page);
        if page.is_none() {
            tracing::warn!(path = %path, "no route matches location");
        }
        pages::mount_page(&mut self.document, &self.site, page);

        self.transition
            .begin(self.now, &mut self.overlay, &mut self.scheduler);
        self.refocus_main();
        self.clear_error();
    }

    fn refocus_main(&mut self) {
        let report = self
            .focus
            .on_location_change(self.now, &mut self.document, &mut self.scheduler);
        self.dispatcher.set_focused_element(report.focused);
    }

    /// Advances the clock and runs every timer that is due.
    pub fn tick(&mut self, now: Duration) {
        self.now = self.now.max(now);
        for (handle, task) in self.scheduler.drain_due(self.now) {
            let handled = match task {
                TimerTask::HideOverlay => self.transition.on_timer(handle, &mut self.overlay),
                TimerTask::RemoveAnnouncement(_) => self.focus.on_timer(handle, &mut self.document),
                TimerTask::SettleSubmission => {
                    let handled = self.contact_form.on_timer(handle);
                    if handled {
                        self.report_submission();
                    }
                    handled
                }
            };
            if !handled {
                tracing::debug!(?handle, ?task, "timer fired for a stale owner");
            }
        }
    }

    fn report_submission(&mut self) {
        use crate::contact::FormStatus;
        match self.contact_form.status().clone() {
            FormStatus::Sent => self.set_status("Message sent. Thanks for reaching out!"),
            FormStatus::Failed(reason) => self.set_error(format!("Message not sent: {reason}")),
            FormStatus::Editing | FormStatus::Submitting => {}
        }
    }

    /// Flips the theme.
    pub fn toggle_theme(&mut self) {
        self.preferences.toggle(&mut self.document);
        if let Some(value) = self.theme_changes.take() {
            let label = if value.is_dark() { "Dark" } else { "Light" };
            self.set_status(format!("{label} mode"));
        }
    }

    /// Detaches the listener and cancels everything still pending.
    pub fn unmount(&mut self) {
        self.dispatcher.detach();
        self.transition.unmount(&mut self.scheduler);
        self.focus.unmount(&mut self.document, &mut self.scheduler);
        self.contact_form.unmount(&mut self.scheduler);
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Loaded configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Site facts shown by the pages.
    pub const fn site(&self) -> &SiteInfo {
        &self.site
    }

    /// Current location and history.
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// The rendered document.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Theme preference owner.
    pub const fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Whether the root carries the dark marker.
    pub fn is_dark(&self) -> bool {
        self.document.has_marker(crate::constants::DARK_MARKER_CLASS)
    }

    /// Loading overlay.
    pub const fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Page transition sequencer.
    pub const fn transition(&self) -> &PageTransition {
        &self.transition
    }

    /// Focus and announcement manager.
    pub const fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// Keyboard dispatcher.
    pub const fn dispatcher(&self) -> &KeyboardDispatcher {
        &self.dispatcher
    }

    /// Pending timers.
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Contact form of the current page.
    pub const fn contact_form(&self) -> &ContactForm {
        &self.contact_form
    }

    /// Status bar message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Current error message.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Latest timestamp seen.
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Whether the application should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl CommandTarget for AppState {
    fn navigate(&mut self, path: &str) {
        Self::navigate(self, path);
    }

    fn toggle_theme(&mut self) {
        Self::toggle_theme(self);
    }

    fn quit(&mut self) {
        tracing::info!("quit requested");
        self.should_quit = true;
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}
