//! Timed visibility for loading indicators.
//!
//! A loader waits `initial_delay` before appearing, so quick operations never flash
//! it, and once it has appeared it stays for at least `min_display` so it does not
//! flicker. If the operation finishes before the loader appears, it never appears.
//!
//! [`LoaderState`] is the event-driven state; [`drive_loader`] feeds it timer and
//! completion events. The [`Loader`](crate::Loader) component runs that routine and
//! renders whatever state it publishes.

use std::future::Future;
use std::time::Duration;

use futures::{pin_mut, select, FutureExt};

use crate::timer::sleep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderTimeline {
    pub initial_delay: Duration,
    pub min_display: Duration,
}

impl Default for LoaderTimeline {
    fn default() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            min_display: Duration::from_millis(1000),
        }
    }
}

impl LoaderTimeline {
    pub fn from_millis(initial_delay_ms: u64, min_display_ms: u64) -> Self {
        Self {
            initial_delay: Duration::from_millis(initial_delay_ms),
            min_display: Duration::from_millis(min_display_ms),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderEvent {
    DelayElapsed,
    MinElapsed,
    Finished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoaderState {
    shown: bool,
    min_elapsed: bool,
    finished: bool,
}

impl LoaderState {
    /// State at mount. A zero delay shows the loader straight away.
    pub fn new(timeline: &LoaderTimeline) -> Self {
        let mut state = Self::default();
        if timeline.initial_delay.is_zero() {
            state.apply(LoaderEvent::DelayElapsed);
            if timeline.min_display.is_zero() {
                state.apply(LoaderEvent::MinElapsed);
            }
        }
        state
    }

    pub fn apply(&mut self, event: LoaderEvent) {
        match event {
            LoaderEvent::DelayElapsed => {
                if !self.finished {
                    self.shown = true;
                }
            }
            LoaderEvent::MinElapsed => {
                if self.shown {
                    self.min_elapsed = true;
                }
            }
            LoaderEvent::Finished => self.finished = true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown && !(self.finished && self.min_elapsed)
    }

    /// Nothing further can change the visibility.
    pub fn is_settled(&self) -> bool {
        self.finished && (!self.shown || self.min_elapsed)
    }
}

/// Run the loader through `timeline` until its visibility can no longer change.
///
/// `finished` resolves when the owning operation ends. Every state change, and the
/// state at mount, is passed to `publish`.
pub async fn drive_loader(
    timeline: LoaderTimeline,
    finished: impl Future<Output = ()>,
    mut publish: impl FnMut(LoaderState),
) {
    let mut state = LoaderState::new(&timeline);
    publish(state);

    let finished = finished.fuse();
    pin_mut!(finished);

    if !timeline.initial_delay.is_zero() {
        let delay = sleep(timeline.initial_delay).fuse();
        pin_mut!(delay);
        select! {
            _ = delay => state.apply(LoaderEvent::DelayElapsed),
            _ = finished => state.apply(LoaderEvent::Finished),
        }
        publish(state);
    }

    let min_display = sleep(timeline.min_display).fuse();
    pin_mut!(min_display);
    while !state.is_settled() {
        select! {
            _ = min_display => state.apply(LoaderEvent::MinElapsed),
            _ = finished => state.apply(LoaderEvent::Finished),
        }
        publish(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    /// Drive a loader whose operation ends after `finish_after`, recording
    /// (milliseconds since mount, visible) for every published state.
    async fn record(timeline: LoaderTimeline, finish_after: Duration) -> Vec<(u128, bool)> {
        let mounted = Instant::now();
        let mut seen = Vec::new();
        drive_loader(timeline, tokio::time::sleep(finish_after), |state| {
            seen.push((mounted.elapsed().as_millis(), state.is_visible()))
        })
        .await;
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_holds_for_min_display() {
        let seen = record(LoaderTimeline::from_millis(0, 1000), Duration::from_millis(400)).await;

        assert_eq!(seen, vec![(0, true), (400, true), (1000, false)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_delay_hides_until_elapsed() {
        let timeline = LoaderTimeline::from_millis(500, 1000);
        let seen = record(timeline, Duration::from_millis(5000)).await;

        assert_eq!(seen, vec![(0, false), (500, true), (1500, true), (5000, false)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_operation_hides_when_it_finishes() {
        let seen = record(LoaderTimeline::from_millis(0, 1000), Duration::from_millis(2500)).await;

        assert_eq!(seen.last(), Some(&(2500, false)));
        assert!(seen[..seen.len() - 1].iter().all(|(_, visible)| *visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_operation_never_shows_delayed_loader() {
        let mounted = Instant::now();
        let seen = record(LoaderTimeline::from_millis(500, 1000), Duration::from_millis(200)).await;

        assert_eq!(seen, vec![(0, false), (200, false)]);
        assert_eq!(mounted.elapsed().as_millis(), 200);
    }

    #[test]
    fn test_state_matches_mount_configuration() {
        assert!(LoaderState::new(&LoaderTimeline::from_millis(0, 1000)).is_visible());
        assert!(!LoaderState::new(&LoaderTimeline::from_millis(300, 1000)).is_visible());

        let mut state = LoaderState::new(&LoaderTimeline::from_millis(0, 1000));
        state.apply(LoaderEvent::Finished);
        assert!(state.is_visible());
        assert!(!state.is_settled());
        state.apply(LoaderEvent::MinElapsed);
        assert!(!state.is_visible());
        assert!(state.is_settled());
    }
}
