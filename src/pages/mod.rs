//! Page content and the persistent page chrome (navbar, main landmark, footer).
//!
//! Pages describe their main content through a [`PageBuilder`]; the router
//! swaps that content into the document on every location change while the
//! chrome stays mounted.

mod about;
mod contact;
mod home;
mod projects;

use chrono::Datelike;

use crate::constants::{MAIN_CONTENT_ID, OWNER_NAME};
use crate::contact::Field;
use crate::dom::{ButtonRole, Document, ElementKind, LinkTarget, NewElement, Region};
use crate::router::{PageFn, Route};
use crate::shortcuts::{Action, ShortcutRegistry};

/// Site-wide facts pages may show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    /// Owner's name
    pub owner: String,
    /// Address behind the contact `mailto:` links
    pub contact_email: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            owner: OWNER_NAME.to_string(),
            contact_email: "contact@example.com".to_string(),
        }
    }
}

/// Collects the main content of one page.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    site: SiteInfo,
    elements: Vec<NewElement>,
}

impl PageBuilder {
    /// Starts an empty page.
    #[must_use]
    pub const fn new(site: SiteInfo) -> Self {
        Self {
            site,
            elements: Vec::new(),
        }
    }

    /// Site facts.
    #[must_use]
    pub const fn site(&self) -> &SiteInfo {
        &self.site
    }

    fn push(&mut self, element: NewElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// `<h{level}>`
    pub fn heading(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        self.push(NewElement::new(ElementKind::Heading(level), text))
    }

    /// `<p>`
    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(NewElement::new(ElementKind::Paragraph, text))
    }

    /// `<li>`
    pub fn list_item(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(NewElement::new(ElementKind::ListItem, text))
    }

    /// `<a href>`
    pub fn link(&mut self, text: impl Into<String>, href: &str) -> &mut Self {
        self.push(NewElement::new(
            ElementKind::Link(LinkTarget::from_href(href)),
            text,
        ))
    }

    /// `<label>` followed by an `<input>` bound to `field`.
    pub fn input(&mut self, field: Field) -> &mut Self {
        self.push(NewElement::new(ElementKind::Label, field.label()));
        self.push(
            NewElement::new(ElementKind::Input(field), field.label())
                .with_attribute("aria-label", field.label())
                .with_attribute("required", "true"),
        )
    }

    /// `<label>` followed by a `<textarea>` bound to `field`.
    pub fn textarea(&mut self, field: Field) -> &mut Self {
        self.push(NewElement::new(ElementKind::Label, field.label()));
        self.push(
            NewElement::new(ElementKind::TextArea(field), field.label())
                .with_attribute("aria-label", field.label())
                .with_attribute("required", "true"),
        )
    }

    /// `<button>`
    pub fn button(&mut self, role: ButtonRole, text: impl Into<String>) -> &mut Self {
        self.push(NewElement::new(ElementKind::Button(role), text))
    }

    /// Finishes the page.
    #[must_use]
    pub fn into_elements(self) -> Vec<NewElement> {
        self.elements
    }
}

/// Page component for a route.
#[must_use]
pub fn page_for(route: Route) -> PageFn {
    match route {
        Route::Home => home::render,
        Route::About => about::render,
        Route::Projects => projects::render,
        Route::Contact => contact::render,
    }
}

/// Mounts the navbar, an empty main landmark and the footer.
pub fn mount_chrome(document: &mut Document, site: &SiteInfo, shortcuts: &ShortcutRegistry) {
    document.append(
        Region::Nav,
        NewElement::new(
            ElementKind::Link(LinkTarget::from_href(Route::Home.path())),
            site.owner.clone(),
        )
        .with_attribute("class", "brand"),
    );

    for route in Route::ALL {
        let mut link = NewElement::new(
            ElementKind::Link(LinkTarget::from_href(route.path())),
            route.label(),
        );
        if let Some(binding) = shortcuts.binding_for(Action::Navigate(route)) {
            link = link.with_attribute("title", binding.label());
        }
        document.append(Region::Nav, link);
    }

    let mut toggle = NewElement::new(ElementKind::Button(ButtonRole::ToggleTheme), "Theme")
        .with_attribute("aria-label", "Toggle dark mode");
    if let Some(binding) = shortcuts.binding_for(Action::ToggleTheme) {
        toggle = toggle.with_attribute("title", format!("Toggle theme ({})", binding.label()));
    }
    document.append(Region::Nav, toggle);

    document.append(
        Region::Main,
        NewElement::new(ElementKind::Main, "")
            .with_attribute("id", MAIN_CONTENT_ID)
            .with_attribute("role", "main"),
    );

    let year = chrono::Local::now().year();
    document.append(
        Region::Footer,
        NewElement::new(
            ElementKind::Paragraph,
            format!("© {year} {}. All rights reserved.", site.owner),
        ),
    );
    for (label, href) in [
        ("GitHub", "https://github.com/pawanyd".to_string()),
        ("LinkedIn", "https://linkedin.com/in/pawanyd".to_string()),
        ("Email", format!("mailto:{}", site.contact_email)),
    ] {
        document.append(
            Region::Footer,
            NewElement::new(ElementKind::Link(LinkTarget::External(href)), label),
        );
    }
}

/// Swaps the page for `path` into the main landmark.
///
/// Unknown paths leave the main landmark empty.
pub fn mount_page(document: &mut Document, site: &SiteInfo, page: Option<PageFn>) {
    let mut builder = PageBuilder::new(site.clone());
    if let Some(page) = page {
        page(&mut builder);
    }
    document.replace_main_content(builder.into_elements());
}
