//! Routes, the route table and the client-side router.

use std::fmt;

use thiserror::Error;

use crate::pages::{self, PageBuilder};

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/about`
    About,
    /// `/projects`
    Projects,
    /// `/contact`
    Contact,
}

impl Route {
    /// Every route in navbar order.
    pub const ALL: [Self; 4] = [Self::Home, Self::About, Self::Projects, Self::Contact];

    /// Literal path, shared by the route table and the shortcuts.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Projects => "/projects",
            Self::Contact => "/contact",
        }
    }

    /// Exact path match.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Navbar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    /// Letter used with Alt to jump here.
    #[must_use]
    pub const fn shortcut_key(self) -> char {
        match self {
            Self::Home => 'h',
            Self::About => 'a',
            Self::Projects => 'p',
            Self::Contact => 'c',
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Builds a page's main content.
pub type PageFn = fn(&mut PageBuilder);

/// One row of the route table.
#[derive(Clone, Copy)]
pub struct RouteEntry {
    /// Literal path
    pub path: &'static str,
    /// Page component
    pub page: PageFn,
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry").field("path", &self.path).finish()
    }
}

/// Errors building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    /// Two entries share a path
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
}

/// Static mapping from path to page.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Builds a table, rejecting duplicate paths.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|e| e.path == entry.path) {
                return Err(RouteTableError::DuplicatePath(entry.path.to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// The site's table: one entry per [`Route`].
    #[must_use]
    pub fn site() -> Self {
        let entries = Route::ALL
            .into_iter()
            .map(|route| RouteEntry {
                path: route.path(),
                page: pages::page_for(route),
            })
            .collect();
        Self { entries }
    }

    /// Exact match for a location.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

/// Current location and history.
#[derive(Debug, Clone)]
pub struct Router {
    location: String,
    history: Vec<String>,
    location_key: u64,
}

impl Router {
    /// Starts at `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            history: vec![initial.clone()],
            location: initial,
            location_key: 0,
        }
    }

    /// Current path.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Current path as a known route.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        Route::from_path(&self.location)
    }

    /// Changes every time the location is pushed, even to the same path.
    #[must_use]
    pub const fn location_key(&self) -> u64 {
        self.location_key
    }

    /// Visited paths, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Pushes a new location.
    pub fn navigate(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::info!(from = %self.location, to = %path, "navigate");
        self.history.push(path.clone());
        self.location = path;
        self.location_key += 1;
    }
}
