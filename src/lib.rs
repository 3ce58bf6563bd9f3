//! Folio library
//!
//! Keyboard-first personal portfolio rendered in the terminal. The library
//! holds the coordination layer: the theme preference store, the loading
//! overlay and page transition sequencer, the keyboard command dispatcher,
//! focus management with live-region announcements, and the route table.
//! The `folio` binary drives it with a Ratatui front-end.

pub mod app;
pub mod config;
pub mod constants;
pub mod contact;
pub mod dispatcher;
pub mod dom;
pub mod focus;
pub mod overlay;
pub mod pages;
pub mod preference;
pub mod router;
pub mod shortcuts;
pub mod storage;
pub mod timer;
pub mod transition;
pub mod tui;
