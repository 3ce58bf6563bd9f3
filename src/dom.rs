//! Document model shared by the coordination layer and the renderer.
//!
//! The terminal front-end has no browser, so this module plays the part of
//! the DOM: an ordered list of elements split into regions, a set of marker
//! classes on the document root, the active (focused) element and the
//! transient status nodes used for screen-reader announcements.
//!
//! Lookups that can legitimately come up empty (no main landmark, no
//! primary heading) return `Option`; they are never errors.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::constants::SR_ONLY_CLASS;
use crate::contact::Field;

/// Opaque identifier of an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Page region an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Top navigation bar
    Nav,
    /// Main content landmark and its children
    Main,
    /// Page footer
    Footer,
    /// Direct children of the body (status nodes)
    Body,
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Client-side route path such as `/about`
    Route(String),
    /// Anything handled outside the application (`https:`, `mailto:`)
    External(String),
}

impl LinkTarget {
    /// Classifies an `href` value.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        if href.starts_with('/') {
            Self::Route(href.to_string())
        } else {
            Self::External(href.to_string())
        }
    }

    /// The raw `href` value.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Route(path) | Self::External(path) => path,
        }
    }
}

/// What a button does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    /// Flips the theme preference
    ToggleTheme,
    /// Submits the contact form
    SubmitContact,
}

/// Element kinds the renderer and the focus logic care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// `<a href>`
    Link(LinkTarget),
    /// `<button>`
    Button(ButtonRole),
    /// Single-line text input bound to a form field
    Input(Field),
    /// Multi-line text input bound to a form field
    TextArea(Field),
    /// `<select>`
    Select,
    /// `<main>` landmark
    Main,
    /// `<h1>`..`<h6>`
    Heading(u8),
    /// Body text
    Paragraph,
    /// Bulleted item
    ListItem,
    /// Form label
    Label,
    /// Live-region status node
    Status,
}

/// A single node in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Identifier, stable for the element's lifetime
    pub id: ElementId,
    /// Element kind
    pub kind: ElementKind,
    /// Region the element is rendered in
    pub region: Region,
    /// Text content (label text for inputs)
    pub text: String,
    /// Explicit `tabindex`, if any
    pub tabindex: Option<i32>,
    /// Remaining attributes (`id`, `role`, `aria-live`, `class`, `style`, ...)
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element matches
    /// `a[href], button, input, textarea, select, [tabindex]:not([tabindex="-1"])`.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        match self.kind {
            ElementKind::Link(_)
            | ElementKind::Button(_)
            | ElementKind::Input(_)
            | ElementKind::TextArea(_)
            | ElementKind::Select => true,
            _ => matches!(self.tabindex, Some(index) if index != -1),
        }
    }

    /// Whether the element is hidden from visual rendering.
    #[must_use]
    pub fn is_visually_hidden(&self) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == SR_ONLY_CLASS))
    }
}

/// Blueprint for an element that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewElement {
    /// Element kind
    pub kind: ElementKind,
    /// Text content
    pub text: String,
    /// Initial attributes
    pub attributes: BTreeMap<String, String>,
}

impl NewElement {
    /// Creates a blueprint without attributes.
    #[must_use]
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }
}

fn parse_tabindex(attributes: &BTreeMap<String, String>) -> Option<i32> {
    attributes.get("tabindex").and_then(|value| value.parse().ok())
}

/// Target for the document-level style marker.
///
/// The preference store is the only writer; anything may read.
pub trait StyleRoot {
    /// Adds or removes a marker class on the root.
    fn set_marker(&mut self, class: &str, enabled: bool);

    /// Whether the root carries the marker class.
    fn has_marker(&self, class: &str) -> bool;
}

/// The rendered document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    root_classes: BTreeSet<String>,
    active: Option<ElementId>,
    next_id: u32,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element to the end of the document.
    pub fn append(&mut self, region: Region, element: NewElement) -> ElementId {
        let id = self.allocate_id();
        self.elements.push(Element {
            id,
            kind: element.kind,
            region,
            text: element.text,
            tabindex: parse_tabindex(&element.attributes),
            attributes: element.attributes,
        });
        id
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// All elements in document order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements of one region in document order.
    pub fn region(&self, region: Region) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.region == region)
    }

    /// Looks up an element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Looks up an element mutably.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Sets an attribute, returning false if the element does not exist.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                if name == "tabindex" {
                    let value = value.into();
                    element.tabindex = value.parse().ok();
                    element.attributes.insert(name.to_string(), value);
                } else {
                    element.attributes.insert(name.to_string(), value.into());
                }
                true
            }
            None => false,
        }
    }

    /// Removes an element. Removing the active element blurs it.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.elements.len() != before
    }

    /// The `<main>` landmark, if the document has one.
    #[must_use]
    pub fn main_landmark(&self) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.kind == ElementKind::Main)
            .map(|e| e.id)
    }

    /// The first level-one heading.
    #[must_use]
    pub fn primary_heading(&self) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind == ElementKind::Heading(1))
    }

    /// Focusable elements in document order.
    #[must_use]
    pub fn focusable_elements(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.is_focusable())
            .map(|e| e.id)
            .collect()
    }

    /// The element holding keyboard focus.
    #[must_use]
    pub const fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// Moves focus to an element. Returns false if it does not exist.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if self.get(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Clears focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Replaces everything inside the main landmark with `content`.
    ///
    /// Content is placed directly after the landmark. Returns the new ids,
    /// or an empty list when the document has no main landmark.
    pub fn replace_main_content(&mut self, content: Vec<NewElement>) -> Vec<ElementId> {
        let Some(main_id) = self.main_landmark() else {
            return Vec::new();
        };

        let active = self.active;
        self.elements
            .retain(|e| e.region != Region::Main || e.id == main_id);
        if active.is_some_and(|id| self.get(id).is_none()) {
            self.active = None;
        }

        let Some(insert_at) = self.elements.iter().position(|e| e.id == main_id) else {
            return Vec::new();
        };

        let mut ids = Vec::with_capacity(content.len());
        for (offset, blueprint) in content.into_iter().enumerate() {
            let id = self.allocate_id();
            self.elements.insert(
                insert_at + 1 + offset,
                Element {
                    id,
                    kind: blueprint.kind,
                    region: Region::Main,
                    text: blueprint.text,
                    tabindex: parse_tabindex(&blueprint.attributes),
                    attributes: blueprint.attributes,
                },
            );
            ids.push(id);
        }
        ids
    }

    /// Appends a visually hidden, politely announced status node to the body.
    pub fn append_status(&mut self, text: impl Into<String>) -> ElementId {
        self.append(
            Region::Body,
            NewElement::new(ElementKind::Status, text)
                .with_attribute("role", "status")
                .with_attribute("aria-live", "polite")
                .with_attribute("class", SR_ONLY_CLASS),
        )
    }

    /// Live-region nodes currently in the document.
    pub fn status_nodes(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::Status)
    }

    /// Finds the focusable element bound to a form field.
    #[must_use]
    pub fn field_element(&self, field: Field) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| matches!(e.kind, ElementKind::Input(f) | ElementKind::TextArea(f) if f == field))
            .map(|e| e.id)
    }
}

impl StyleRoot for Document {
    fn set_marker(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.root_classes.insert(class.to_string());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn has_marker(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> (Document, ElementId) {
        let mut doc = Document::new();
        doc.append(
            Region::Nav,
            NewElement::new(ElementKind::Link(LinkTarget::from_href("/")), "Home"),
        );
        let main = doc.append(
            Region::Main,
            NewElement::new(ElementKind::Main, "").with_attribute("id", "main-content"),
        );
        doc.append(
            Region::Footer,
            NewElement::new(
                ElementKind::Link(LinkTarget::from_href("https://github.com")),
                "GitHub",
            ),
        );
        (doc, main)
    }

    #[test]
    fn test_link_target_classification() {
        assert_eq!(
            LinkTarget::from_href("/about"),
            LinkTarget::Route("/about".to_string())
        );
        assert_eq!(
            LinkTarget::from_href("mailto:a@b.c"),
            LinkTarget::External("mailto:a@b.c".to_string())
        );
    }

    #[test]
    fn test_focusable_selector() {
        let (mut doc, main) = sample_document();
        // main has no tabindex, so it is skipped
        assert_eq!(doc.focusable_elements().len(), 2);

        doc.set_attribute(main, "tabindex", "-1");
        assert_eq!(doc.focusable_elements().len(), 2);

        doc.set_attribute(main, "tabindex", "0");
        assert_eq!(doc.focusable_elements().len(), 3);
        assert_eq!(doc.focusable_elements()[1], main);
    }

    #[test]
    fn test_tabindex_from_blueprint_counts_as_focusable() {
        let (mut doc, _) = sample_document();
        let card = doc.append(
            Region::Footer,
            NewElement::new(ElementKind::Paragraph, "Card").with_attribute("tabindex", "0"),
        );
        let skipped = doc.append(
            Region::Footer,
            NewElement::new(ElementKind::Paragraph, "Note").with_attribute("tabindex", "-1"),
        );
        assert!(doc.focusable_elements().contains(&card));
        assert!(!doc.focusable_elements().contains(&skipped));

        let ids = doc.replace_main_content(vec![
            NewElement::new(ElementKind::ListItem, "Item").with_attribute("tabindex", "0"),
        ]);
        assert_eq!(doc.get(ids[0]).unwrap().tabindex, Some(0));
        assert!(doc.focusable_elements().contains(&ids[0]));
    }

    #[test]
    fn test_replace_main_content_keeps_order() {
        let (mut doc, main) = sample_document();
        let first = doc.replace_main_content(vec![
            NewElement::new(ElementKind::Heading(1), "Hello"),
            NewElement::new(ElementKind::Paragraph, "Body"),
        ]);
        assert_eq!(first.len(), 2);
        assert_eq!(doc.elements()[1].id, main);
        assert_eq!(doc.elements()[2].text, "Hello");
        assert_eq!(doc.elements().last().map(|e| e.region), Some(Region::Footer));

        doc.focus(first[0]);
        let second = doc.replace_main_content(vec![NewElement::new(
            ElementKind::Heading(2),
            "Other",
        )]);
        assert_eq!(second.len(), 1);
        assert!(doc.get(first[0]).is_none());
        assert_eq!(doc.active_element(), None);
        assert!(doc.primary_heading().is_none());
    }

    #[test]
    fn test_replace_without_main_is_noop() {
        let mut doc = Document::new();
        let ids = doc.replace_main_content(vec![NewElement::new(ElementKind::Paragraph, "x")]);
        assert!(ids.is_empty());
        assert!(doc.elements().is_empty());
    }

    #[test]
    fn test_status_node_attributes() {
        let mut doc = Document::new();
        let id = doc.append_status("Navigated to Home");
        let node = doc.get(id).unwrap();
        assert_eq!(node.attribute("aria-live"), Some("polite"));
        assert_eq!(node.attribute("role"), Some("status"));
        assert!(node.is_visually_hidden());
        assert_eq!(doc.status_nodes().count(), 1);

        assert!(doc.remove(id));
        assert!(!doc.remove(id));
        assert_eq!(doc.status_nodes().count(), 0);
    }

    #[test]
    fn test_focus_requires_existing_element() {
        let (mut doc, main) = sample_document();
        assert!(doc.focus(main));
        assert_eq!(doc.active_element(), Some(main));
        doc.remove(main);
        assert_eq!(doc.active_element(), None);
        assert!(!doc.focus(main));
    }

    #[test]
    fn test_marker_classes() {
        let mut doc = Document::new();
        assert!(!doc.has_marker("dark"));
        doc.set_marker("dark", true);
        assert!(doc.has_marker("dark"));
        doc.set_marker("dark", false);
        assert!(!doc.has_marker("dark"));
    }
}
