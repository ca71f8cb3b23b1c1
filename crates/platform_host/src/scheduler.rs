//! Timer scheduling contracts, cancellable handles, and a deterministic manual clock.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

/// Cancellation handle for a scheduled timer.
///
/// Dropping the handle cancels the timer, so a timer lives exactly as long as its owner keeps
/// the handle.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    /// Wraps a cancellation closure that runs at most once.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Returns a handle with nothing to cancel.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Cancels the timer now.
    pub fn clear(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Host service for interval and one-shot timers on the UI event loop.
pub trait Scheduler {
    /// Runs `callback` every `period` until the returned handle is cleared or dropped.
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle;

    /// Runs `callback` once after `delay` unless the returned handle is cleared or dropped first.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

#[derive(Debug, Clone, Copy, Default)]
/// Scheduler that never fires, for hosts without an event loop.
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn set_interval(&self, _period: Duration, _callback: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::inert()
    }

    fn set_timeout(&self, _delay: Duration, _callback: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::inert()
    }
}

enum TimerCallback {
    Once(Box<dyn FnOnce()>),
    Repeat(Box<dyn FnMut()>),
}

struct ManualTimer {
    due: Duration,
    period: Option<Duration>,
    cancelled: Rc<Cell<bool>>,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, ManualTimer>,
}

impl ManualClock {
    fn take_next_due(&mut self, until: Duration) -> Option<ManualTimer> {
        let id = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, _)| *id)?;
        let timer = self.timers.remove(&id)?;
        self.now = self.now.max(timer.due);
        Some(timer)
    }
}

#[derive(Clone, Default)]
/// Deterministic scheduler driven by explicit [`ManualScheduler::advance`] calls.
///
/// Timers fire in due-time order (ties in scheduling order). Callbacks run without any internal
/// borrow held, so they may schedule or cancel other timers.
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    /// Returns elapsed virtual time.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Returns the number of armed timers.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .timers
            .values()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }

    /// Advances virtual time by `by`, firing every timer that comes due on the way.
    pub fn advance(&self, by: Duration) {
        let until = self.now() + by;
        loop {
            let next = self.clock.borrow_mut().take_next_due(until);
            let Some(timer) = next else {
                break;
            };
            if timer.cancelled.get() {
                continue;
            }
            match timer.callback {
                TimerCallback::Once(callback) => callback(),
                TimerCallback::Repeat(mut callback) => {
                    callback();
                    if !timer.cancelled.get() {
                        let period = timer.period.unwrap_or(Duration::from_millis(1));
                        self.insert(ManualTimer {
                            due: timer.due + period,
                            period: timer.period,
                            cancelled: timer.cancelled,
                            callback: TimerCallback::Repeat(callback),
                        });
                    }
                }
            }
        }
        let mut clock = self.clock.borrow_mut();
        clock.now = clock.now.max(until);
    }

    fn insert(&self, timer: ManualTimer) -> u64 {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        clock.timers.insert(id, timer);
        id
    }

    fn schedule(
        &self,
        delay: Duration,
        period: Option<Duration>,
        callback: TimerCallback,
    ) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        let due = self.now() + delay;
        let id = self.insert(ManualTimer {
            due,
            period,
            cancelled: cancelled.clone(),
            callback,
        });
        let clock: Weak<RefCell<ManualClock>> = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            cancelled.set(true);
            if let Some(clock) = clock.upgrade() {
                if let Ok(mut clock) = clock.try_borrow_mut() {
                    clock.timers.remove(&id);
                }
            }
        })
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), TimerCallback::Repeat(callback))
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        self.schedule(delay, None, TimerCallback::Once(callback))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}
