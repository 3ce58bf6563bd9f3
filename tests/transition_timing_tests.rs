//! Integration tests for the overlay pulse and the enter animation.

mod fixtures;

use fixtures::*;
use folio::config::Config;
use folio::overlay::OverlayController;
use folio::storage::MemoryStorage;
use folio::timer::Scheduler;
use folio::transition::{PageTransition, TransitionPhase, TransitionTimings};

#[test]
fn test_overlay_pulses_for_500ms() {
    let mut app = app_at("/");
    assert!(app.overlay().is_busy());
    app.tick(ms(499));
    assert!(app.overlay().is_busy());
    app.tick(ms(500));
    assert!(!app.overlay().is_busy());
}

#[test]
fn test_second_navigation_rearms_the_hide() {
    let mut app = app_at("/");
    alt(&mut app, 'a', ms(200));
    assert_eq!(app.overlay().shown_count(), 2);

    // the first hide was cancelled
    app.tick(ms(500));
    assert!(app.overlay().is_busy());
    app.tick(ms(699));
    assert!(app.overlay().is_busy());
    app.tick(ms(700));
    assert!(!app.overlay().is_busy());
    assert_eq!(app.transition().phase(), TransitionPhase::Idle);
}

#[test]
fn test_sequencer_hides_exactly_once() {
    let mut overlay = OverlayController::new();
    let mut scheduler = Scheduler::new();
    let mut transition = PageTransition::new(TransitionTimings::default());

    transition.begin(ms(0), &mut overlay, &mut scheduler);
    transition.begin(ms(100), &mut overlay, &mut scheduler);
    assert_eq!(scheduler.len(), 1);

    let fired = scheduler.drain_due(ms(10_000));
    assert_eq!(fired.len(), 1);
    for (handle, _) in fired {
        assert!(transition.on_timer(handle, &mut overlay));
    }
    assert!(!overlay.is_busy());
}

#[test]
fn test_enter_progress_follows_latest_navigation() {
    let mut app = app_at("/");
    app.tick(ms(150));
    assert!((app.transition().enter_progress(app.now()) - 0.5).abs() < 1e-3);

    alt(&mut app, 'p', ms(1000));
    assert!(app.transition().enter_progress(app.now()).abs() < 1e-3);
    app.tick(ms(1300));
    assert!((app.transition().enter_progress(app.now()) - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_configured_timings_are_used() {
    let mut config = Config::default();
    config.timing.overlay_ms = 50;
    config.timing.announcement_ms = 80;
    let mut app = app_with(config, Box::new(MemoryStorage::new()), "/");

    app.tick(ms(50));
    assert!(!app.overlay().is_busy());
    assert_eq!(live_regions(&app).len(), 1);
    app.tick(ms(80));
    assert!(live_regions(&app).is_empty());
}

#[test]
fn test_unmount_leaves_no_timers() {
    let mut app = app_at("/");
    alt(&mut app, 'h', ms(100));
    app.unmount();
    assert!(app.scheduler().is_empty());
    assert!(live_regions(&app).is_empty());

    // nothing left to fire
    app.tick(ms(10_000));
    assert!(app.overlay().is_busy());
}
