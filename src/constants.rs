//! Application-wide constants.
//!
//! Names, storage keys, DOM contract identifiers and the default timings
//! of the transition choreography.

use std::time::Duration;

/// The display name of the application.
pub const APP_NAME: &str = "Folio";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "folio";

/// Name of the site owner shown in the brand link and footer.
pub const OWNER_NAME: &str = "Pawan Yadav";

/// Durable storage key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Marker class set on the document root while dark mode is active.
pub const DARK_MARKER_CLASS: &str = "dark";

/// `id` of the main content landmark.
pub const MAIN_CONTENT_ID: &str = "main-content";

/// Class that keeps a node out of the visual rendering.
pub const SR_ONLY_CLASS: &str = "sr-only";

/// How long the transient overlay stays up after a route change.
pub const OVERLAY_DURATION: Duration = Duration::from_millis(500);

/// How long a navigation announcement stays in the document.
pub const ANNOUNCEMENT_DURATION: Duration = Duration::from_millis(1000);

/// Length of the page enter animation.
pub const ENTER_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Delay of the simulated contact form submission.
pub const SIMULATED_SUBMIT_DELAY: Duration = Duration::from_millis(1000);
