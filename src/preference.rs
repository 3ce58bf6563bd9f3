//! Theme preference store.
//!
//! Holds the light/dark flag, mirrors it onto the document root marker class
//! and onto durable storage, and notifies subscribers after every change.
//! The store is the only writer of both the marker and the storage key; it is
//! owned by the application state and mutated through `&mut self`, which keeps
//! writes serialized.
//!
//! Storage failures never surface to the user. An unreadable stored value
//! counts as absent and is overwritten by the next write. Any other failed
//! read or write drops the backend and the store carries on in memory for the
//! session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DARK_MARKER_CLASS, THEME_STORAGE_KEY};
use crate::dom::StyleRoot;
use crate::storage::{PreferenceStorage, StorageError};

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light appearance (default)
    #[default]
    Light,
    /// Dark appearance
    Dark,
}

impl ThemePreference {
    /// Value written to durable storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite preference.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether this is the dark appearance.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a stored value that is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme value: {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemePreference {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Identifies a subscriber so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(ThemePreference)>;

/// The theme preference store.
pub struct PreferenceStore {
    value: ThemePreference,
    storage: Option<Box<dyn PreferenceStorage>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("value", &self.value)
            .field("persistent", &self.storage.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl PreferenceStore {
    /// Restores the preference from storage and applies it to `root`.
    ///
    /// Call this before the first frame is drawn so the stored appearance is
    /// in place from the start. `fallback` is used when storage holds nothing
    /// usable.
    pub fn load(
        storage: Box<dyn PreferenceStorage>,
        fallback: ThemePreference,
        root: &mut impl StyleRoot,
    ) -> Self {
        let mut store = Self {
            value: fallback,
            storage: Some(storage),
            subscribers: Vec::new(),
            next_subscription: 0,
        };

        let initial = store.read_stored().unwrap_or(fallback);
        tracing::debug!(theme = %initial, persistent = store.is_persistent(), "theme restored");
        store.set_preference(initial, root);
        store
    }

    fn read_stored(&mut self) -> Option<ThemePreference> {
        let storage = self.storage.as_ref()?;
        match storage.get(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("ignoring stored theme: {e}");
                    None
                }
            },
            Ok(None) => None,
            // the next write replaces the damaged file
            Err(e @ StorageError::Corrupt { .. }) => {
                tracing::warn!("ignoring unreadable theme storage: {e}");
                None
            }
            Err(e) => {
                self.degrade(&e);
                None
            }
        }
    }

    fn degrade(&mut self, error: &dyn std::error::Error) {
        tracing::warn!("theme storage unavailable, keeping preference in memory: {error}");
        self.storage = None;
    }

    /// Current preference.
    #[must_use]
    pub const fn preference(&self) -> ThemePreference {
        self.value
    }

    /// Whether changes still reach durable storage.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    /// Flips light and dark.
    pub fn toggle(&mut self, root: &mut impl StyleRoot) {
        self.set_preference(self.value.toggled(), root);
    }

    /// Sets an explicit preference.
    ///
    /// Updates the root marker first, then storage, then subscribers.
    pub fn set_preference(&mut self, value: ThemePreference, root: &mut impl StyleRoot) {
        self.value = value;
        root.set_marker(DARK_MARKER_CLASS, value.is_dark());

        if let Some(storage) = self.storage.as_mut() {
            if let Err(e) = storage.set(THEME_STORAGE_KEY, value.as_str()) {
                self.degrade(&e);
            }
        }

        for (_, subscriber) in &mut self.subscribers {
            subscriber(value);
        }
    }

    /// Registers a callback invoked after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(ThemePreference) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}
