//! Cancellable delayed work.
//!
//! [`schedule`] splits delayed work into a future to hand to an executor and a
//! [`ScheduledTask`] guard. Dropping the guard cancels the work, so whoever owns the
//! guard owns the lifetime of the timer. Components get this through
//! [`use_scheduler`], which releases its guard when the component unmounts.

use std::future::Future;
use std::time::Duration;

use dioxus::prelude::*;
use futures::future::{AbortHandle, Abortable};
use futures::FutureExt;

/// Platform sleep: `gloo-timers` in the browser, tokio natively.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Guard for pending work. The work is cancelled when this is dropped.
#[must_use = "dropping a ScheduledTask cancels it"]
#[derive(Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
}

impl ScheduledTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Wrap `work` so it stops at its next suspension point once the guard is dropped.
pub fn cancellable<F>(work: F) -> (ScheduledTask, impl Future<Output = ()>)
where
    F: Future<Output = ()>,
{
    let (handle, registration) = AbortHandle::new_pair();
    let future = Abortable::new(work, registration).map(|_| ());
    (ScheduledTask { handle }, future)
}

/// Run `action` after `delay` unless the returned guard is dropped first.
pub fn schedule<F>(delay: Duration, action: F) -> (ScheduledTask, impl Future<Output = ()>)
where
    F: FnOnce(),
{
    cancellable(async move {
        sleep(delay).await;
        action();
    })
}

/// Component-scoped timer slot. Holds at most one pending task; scheduling a new one
/// cancels the previous.
#[derive(Clone, Copy, PartialEq)]
pub struct Scheduler {
    slot: Signal<Option<ScheduledTask>>,
}

impl Scheduler {
    /// Run `action` after `delay`, for as long as the owning component is mounted.
    pub fn schedule(&self, delay: Duration, action: impl FnOnce() + 'static) {
        let (task, future) = schedule(delay, action);
        self.hold(task);
        spawn(future);
    }

    /// Run arbitrary async work for as long as the owning component is mounted.
    pub fn run(&self, work: impl Future<Output = ()> + 'static) {
        let (task, future) = cancellable(work);
        self.hold(task);
        spawn(future);
    }

    pub fn cancel(&self) {
        let mut slot = self.slot;
        if let Ok(mut slot) = slot.try_write() {
            if let Some(task) = slot.take() {
                task.cancel();
            }
        };
    }

    fn hold(&self, task: ScheduledTask) {
        let mut slot = self.slot;
        slot.set(Some(task));
    }
}

/// A [`Scheduler`] whose pending task is cancelled when the component unmounts.
pub fn use_scheduler() -> Scheduler {
    let slot = use_signal(|| None::<ScheduledTask>);
    let scheduler = Scheduler { slot };
    use_drop(move || scheduler.cancel());
    scheduler
}
