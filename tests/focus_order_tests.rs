//! Integration tests for Tab / Shift+Tab traversal.
//!
//! Inside the focusable list Tab and Shift+Tab move to the neighbour. At the
//! edges, or when focus sits outside the list (the main landmark after a
//! navigation), the `native` boundary hands the key to the host traversal and
//! `trap` keeps focus where it is.

mod fixtures;

use crossterm::event::{KeyCode, KeyModifiers};
use fixtures::*;
use folio::config::Config;
use folio::dispatcher::TabBoundary;
use folio::dom::Region;
use folio::storage::MemoryStorage;

fn tab(app: &mut folio::app::AppState) {
    let now = app.now();
    press(app, KeyCode::Tab, KeyModifiers::NONE, now);
}

fn shift_tab(app: &mut folio::app::AppState) {
    let now = app.now();
    press(app, KeyCode::BackTab, KeyModifiers::SHIFT, now);
}

#[test]
fn test_tab_walks_the_focusable_list() {
    let mut app = app_at("/");
    let order = app.document().focusable_elements();

    // leave the landmark, landing on the first link inside the page
    tab(&mut app);
    let a = app.document().active_element().unwrap();
    let index = order.iter().position(|id| *id == a).unwrap();
    let (b, c) = (order[index + 1], order[index + 2]);

    tab(&mut app);
    assert_eq!(app.document().active_element(), Some(b));
    tab(&mut app);
    assert_eq!(app.document().active_element(), Some(c));
    shift_tab(&mut app);
    assert_eq!(app.document().active_element(), Some(b));
}

#[test]
fn test_first_tab_after_navigation_enters_page_content() {
    let mut app = app_at("/projects");
    tab(&mut app);
    let active = app.document().active_element().unwrap();
    assert_eq!(app.document().get(active).unwrap().region, Region::Main);
}

#[test]
fn test_native_boundary_wraps_at_the_end() {
    let mut app = app_at("/");
    let order = app.document().focusable_elements();
    let last = *order.last().unwrap();

    assert!(tab_until(&mut app, order.len() + 1, |_, id| id == last));
    tab(&mut app);
    assert_eq!(app.document().active_element(), Some(order[0]));

    shift_tab(&mut app);
    assert_eq!(app.document().active_element(), Some(last));
}

#[test]
fn test_trap_boundary_keeps_focus() {
    let mut config = Config::default();
    config.ui.tab_boundary = TabBoundary::Trap;
    let mut app = app_with(config, Box::new(MemoryStorage::new()), "/");
    let main = app.document().main_landmark();

    // focus on the landmark is outside the list, so nothing moves
    tab(&mut app);
    assert_eq!(app.document().active_element(), main);
    shift_tab(&mut app);
    assert_eq!(app.document().active_element(), main);
}

#[test]
fn test_shift_tab_from_landmark_goes_back_to_nav() {
    let mut app = app_at("/about");
    shift_tab(&mut app);
    let active = app.document().active_element().unwrap();
    assert_eq!(app.document().get(active).unwrap().region, Region::Nav);
}

#[test]
fn test_focused_element_bookkeeping_follows_focus() {
    let mut app = app_at("/");
    tab(&mut app);
    assert_eq!(
        app.dispatcher().focused_element(),
        app.document().active_element()
    );
}
