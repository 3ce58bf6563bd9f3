//! Page transition sequencer.
//!
//! Each location change mounts the new page with an enter animation and
//! pulses the overlay: show now, hide after the overlay duration. Only the
//! latest navigation owns the hide timer; starting a new sequence or
//! unmounting cancels the outstanding one first.

use std::time::Duration;

use crate::overlay::OverlayController;
use crate::timer::{Scheduler, TimerHandle, TimerTask};

/// Sequencer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No transition running
    Idle,
    /// Page entering, overlay shown
    Entering {
        /// When the sequence started
        started_at: Duration,
        /// Pending overlay hide
        hide_timer: TimerHandle,
    },
}

/// Timings of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// How long the overlay stays up
    pub overlay: Duration,
    /// Length of the enter animation
    pub enter_animation: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            overlay: crate::constants::OVERLAY_DURATION,
            enter_animation: crate::constants::ENTER_ANIMATION_DURATION,
        }
    }
}

/// Drives the enter animation and the overlay pulse.
#[derive(Debug, Clone)]
pub struct PageTransition {
    phase: TransitionPhase,
    timings: TransitionTimings,
    last_started_at: Option<Duration>,
}

impl PageTransition {
    /// Creates an idle sequencer.
    #[must_use]
    pub const fn new(timings: TransitionTimings) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            timings,
            last_started_at: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Starts the sequence for a freshly mounted page.
    pub fn begin(&mut self, now: Duration, overlay: &mut OverlayController, scheduler: &mut Scheduler) {
        self.cancel_pending(scheduler);

        overlay.show();
        let hide_timer = scheduler.schedule(now, self.timings.overlay, TimerTask::HideOverlay);
        self.phase = TransitionPhase::Entering {
            started_at: now,
            hide_timer,
        };
        self.last_started_at = Some(now);
    }

    /// Handles a fired timer. Returns true if the timer belonged to this sequencer.
    ///
    /// A handle that is not the current one is stale and ignored.
    pub fn on_timer(&mut self, handle: TimerHandle, overlay: &mut OverlayController) -> bool {
        match self.phase {
            TransitionPhase::Entering { hide_timer, .. } if hide_timer == handle => {
                overlay.hide();
                self.phase = TransitionPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Tears the sequence down when the page goes away early.
    ///
    /// The pending hide is cancelled so it can't act on a page that no longer
    /// exists.
    pub fn unmount(&mut self, scheduler: &mut Scheduler) {
        self.cancel_pending(scheduler);
    }

    fn cancel_pending(&mut self, scheduler: &mut Scheduler) {
        if let TransitionPhase::Entering { hide_timer, .. } = self.phase {
            scheduler.cancel(hide_timer);
        }
        self.phase = TransitionPhase::Idle;
    }

    /// Enter animation progress in `0.0..=1.0`.
    ///
    /// Driven by the most recent start, independent of the overlay.
    #[must_use]
    pub fn enter_progress(&self, now: Duration) -> f32 {
        let Some(started_at) = self.last_started_at else {
            return 1.0;
        };
        let total = self.timings.enter_animation.as_secs_f32();
        if total <= f32::EPSILON {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started_at).as_secs_f32();
        (elapsed / total).clamp(0.0, 1.0)
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        Self::new(TransitionTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn fire(
        now: Duration,
        scheduler: &mut Scheduler,
        transition: &mut PageTransition,
        overlay: &mut OverlayController,
    ) -> usize {
        let mut handled = 0;
        for (handle, task) in scheduler.drain_due(now) {
            assert_eq!(task, TimerTask::HideOverlay);
            if transition.on_timer(handle, overlay) {
                handled += 1;
            }
        }
        handled
    }

    #[test]
    fn test_single_transition() {
        let mut scheduler = Scheduler::new();
        let mut overlay = OverlayController::new();
        let mut transition = PageTransition::default();

        transition.begin(ms(0), &mut overlay, &mut scheduler);
        assert!(overlay.is_busy());
        assert!(matches!(transition.phase(), TransitionPhase::Entering { .. }));

        assert_eq!(fire(ms(499), &mut scheduler, &mut transition, &mut overlay), 0);
        assert!(overlay.is_busy());

        assert_eq!(fire(ms(500), &mut scheduler, &mut transition, &mut overlay), 1);
        assert!(!overlay.is_busy());
        assert_eq!(transition.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn test_second_transition_rearms_hide() {
        let mut scheduler = Scheduler::new();
        let mut overlay = OverlayController::new();
        let mut transition = PageTransition::default();

        transition.begin(ms(0), &mut overlay, &mut scheduler);
        transition.begin(ms(200), &mut overlay, &mut scheduler);
        assert_eq!(scheduler.len(), 1);

        // The first timer would have fired here
        assert_eq!(fire(ms(500), &mut scheduler, &mut transition, &mut overlay), 0);
        assert!(overlay.is_busy());

        assert_eq!(fire(ms(700), &mut scheduler, &mut transition, &mut overlay), 1);
        assert!(!overlay.is_busy());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_unmount_cancels_hide() {
        let mut scheduler = Scheduler::new();
        let mut overlay = OverlayController::new();
        let mut transition = PageTransition::default();

        transition.begin(ms(0), &mut overlay, &mut scheduler);
        transition.unmount(&mut scheduler);
        assert!(scheduler.is_empty());
        assert_eq!(transition.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn test_stale_handle_ignored() {
        let mut scheduler = Scheduler::new();
        let mut overlay = OverlayController::new();
        let mut transition = PageTransition::default();

        transition.begin(ms(0), &mut overlay, &mut scheduler);
        let stale = scheduler.schedule(ms(0), ms(1), TimerTask::HideOverlay);
        assert!(!transition.on_timer(stale, &mut overlay));
        assert!(overlay.is_busy());
    }

    #[test]
    fn test_enter_progress() {
        let mut scheduler = Scheduler::new();
        let mut overlay = OverlayController::new();
        let mut transition = PageTransition::default();
        assert!((transition.enter_progress(ms(0)) - 1.0).abs() < f32::EPSILON);

        transition.begin(ms(1000), &mut overlay, &mut scheduler);
        assert!(transition.enter_progress(ms(1000)).abs() < f32::EPSILON);
        assert!((transition.enter_progress(ms(1150)) - 0.5).abs() < 0.01);
        assert!((transition.enter_progress(ms(2000)) - 1.0).abs() < f32::EPSILON);
    }
}
