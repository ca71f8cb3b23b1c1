//! Featured-carousel state machine driven by an injected timer [`Scheduler`].
//!
//! The engine cycles a bounded index over its items. An interval timer advances it periodically;
//! `next`, `previous`, and `goto` advance it on demand. Every change passes through a short
//! `Transitioning` hand-off that a one-shot settle timer resolves into `Idle`.
//!
//! Triggers that arrive mid-transition are never merged. Each one schedules its own settle and
//! records a step (forward, back, or an absolute slide) that is resolved against the visible
//! slide only when that settle fires, so two quick `next` calls move two slides and an absolute
//! `goto` that settles last wins. Timer ticks count the same way as manual `next` calls.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use platform_host::{CatalogEntry, Scheduler, TimerHandle};
use thiserror::Error;

use crate::config::CarouselConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Carousel state machine phase.
pub enum CarouselPhase {
    /// No items; the host renders a loading placeholder and no timers run.
    Empty,
    /// Resting on a slide.
    Idle {
        /// Visible slide.
        index: usize,
    },
    /// Handing off between slides.
    Transitioning {
        /// Slide visible when the hand-off started.
        from: usize,
        /// Slide shown once the hand-off settles.
        to: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Observable carousel state handed to change observers.
pub struct CarouselSnapshot {
    /// Current phase.
    pub phase: CarouselPhase,
    /// Number of items.
    pub len: usize,
}

impl CarouselSnapshot {
    /// Slide currently on screen, or `None` while empty.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            CarouselPhase::Empty => None,
            CarouselPhase::Idle { index } => Some(index),
            CarouselPhase::Transitioning { from, .. } => Some(from),
        }
    }

    /// Whether a hand-off is in progress.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, CarouselPhase::Transitioning { .. })
    }
}

impl Default for CarouselSnapshot {
    fn default() -> Self {
        Self {
            phase: CarouselPhase::Empty,
            len: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Rejected carousel navigation.
pub enum CarouselError {
    /// Navigation requested while the carousel has no items.
    #[error("carousel has no items")]
    Empty,
    /// `goto` target outside `[0, len)`.
    #[error("slide {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// Requested slide.
        index: usize,
        /// Number of items.
        len: usize,
    },
}

type ChangeObserver = Rc<dyn Fn(&CarouselSnapshot)>;

#[derive(Debug, Clone, Copy)]
enum Step {
    Forward,
    Back,
    To(usize),
}

impl Step {
    fn resolve(self, index: usize, len: usize) -> usize {
        match self {
            Self::Forward => (index + 1) % len,
            Self::Back => (index + len - 1) % len,
            Self::To(target) => target,
        }
    }
}

struct PendingSettle {
    id: u64,
    step: Step,
    _timer: TimerHandle,
}

struct CarouselCore {
    items: Vec<CatalogEntry>,
    phase: CarouselPhase,
    pending: Vec<PendingSettle>,
    next_settle_id: u64,
    observer: Option<ChangeObserver>,
}

impl CarouselCore {
    fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            phase: self.phase,
            len: self.items.len(),
        }
    }

    /// Rest phase for `index` once every pending step has been applied in settle order.
    fn phase_from(&self, index: usize) -> CarouselPhase {
        if self.pending.is_empty() {
            return CarouselPhase::Idle { index };
        }
        let len = self.items.len();
        let to = self
            .pending
            .iter()
            .fold(index, |at, pending| pending.step.resolve(at, len));
        CarouselPhase::Transitioning { from: index, to }
    }
}

type SharedCore = Rc<RefCell<CarouselCore>>;

/// Timed carousel over a list of featured entries.
///
/// Timers hold only weak references to the engine state, and dropping the engine (or calling
/// [`CarouselEngine::unmount`]) cancels the interval and every pending settle. Every method takes
/// `&self`, so observers may read the engine while it is notifying them.
pub struct CarouselEngine {
    core: SharedCore,
    scheduler: Rc<dyn Scheduler>,
    timing: CarouselConfig,
    interval: RefCell<Option<TimerHandle>>,
}

impl CarouselEngine {
    /// Creates an empty carousel that schedules its timers on `scheduler`.
    pub fn new(scheduler: Rc<dyn Scheduler>, timing: CarouselConfig) -> Self {
        Self {
            core: Rc::new(RefCell::new(CarouselCore {
                items: Vec::new(),
                phase: CarouselPhase::Empty,
                pending: Vec::new(),
                next_settle_id: 0,
                observer: None,
            })),
            scheduler,
            timing,
            interval: RefCell::new(None),
        }
    }

    /// Current observable state.
    pub fn snapshot(&self) -> CarouselSnapshot {
        self.core.borrow().snapshot()
    }

    /// Current phase.
    pub fn phase(&self) -> CarouselPhase {
        self.core.borrow().phase
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.core.borrow().items.len()
    }

    /// Whether the carousel has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry currently on screen.
    pub fn current_item(&self) -> Option<CatalogEntry> {
        let core = self.core.borrow();
        let index = core.snapshot().current_index()?;
        core.items.get(index).cloned()
    }

    /// Number of indicator dots to render.
    pub fn indicator_count(&self) -> usize {
        self.len().min(self.timing.max_indicators)
    }

    /// Registers the observer notified after every phase or item change, replacing any previous one.
    pub fn on_change(&self, observer: impl Fn(&CarouselSnapshot) + 'static) {
        self.core.borrow_mut().observer = Some(Rc::new(observer));
    }

    /// Re-seeds the carousel.
    ///
    /// Pending settles are cancelled. The visible slide is kept when it is still in range and
    /// reset to the first slide otherwise. An empty list parks the carousel in
    /// [`CarouselPhase::Empty`] with no timers; any non-empty list restarts the auto-advance
    /// interval.
    pub fn set_items(&self, items: Vec<CatalogEntry>) {
        let cancelled = {
            let mut core = self.core.borrow_mut();
            let visible = core.snapshot().current_index();
            core.phase = if items.is_empty() {
                CarouselPhase::Empty
            } else {
                CarouselPhase::Idle {
                    index: visible.filter(|index| *index < items.len()).unwrap_or(0),
                }
            };
            core.items = items;
            std::mem::take(&mut core.pending)
        };
        drop(cancelled);

        let restarted = (!self.is_empty()).then(|| self.start_interval());
        drop(self.interval.replace(restarted));
        notify(&self.core);
    }

    /// Advances to the following slide, wrapping to the first.
    pub fn next(&self) {
        begin_transition(&self.core, &self.scheduler, self.timing.settle(), Step::Forward);
    }

    /// Moves back to the preceding slide, wrapping to the last.
    pub fn previous(&self) {
        begin_transition(&self.core, &self.scheduler, self.timing.settle(), Step::Back);
    }

    /// Moves to slide `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Empty`] when there are no items and
    /// [`CarouselError::IndexOutOfRange`] when `index` is not below the item count.
    pub fn goto(&self, index: usize) -> Result<(), CarouselError> {
        let len = self.len();
        if len == 0 {
            return Err(CarouselError::Empty);
        }
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }
        begin_transition(
            &self.core,
            &self.scheduler,
            self.timing.settle(),
            Step::To(index),
        );
        Ok(())
    }

    /// Tears the carousel down: cancels every timer, drops the items, and detaches the observer.
    ///
    /// Idempotent; also runs on drop.
    pub fn unmount(&self) {
        drop(self.interval.take());
        let cancelled = {
            let mut core = self.core.borrow_mut();
            core.items.clear();
            core.phase = CarouselPhase::Empty;
            core.observer = None;
            std::mem::take(&mut core.pending)
        };
        drop(cancelled);
    }

    fn start_interval(&self) -> TimerHandle {
        let core = Rc::downgrade(&self.core);
        let scheduler = self.scheduler.clone();
        let settle = self.timing.settle();
        self.scheduler.set_interval(
            self.timing.interval(),
            Box::new(move || {
                if let Some(core) = core.upgrade() {
                    begin_transition(&core, &scheduler, settle, Step::Forward);
                }
            }),
        )
    }
}

impl Drop for CarouselEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn begin_transition(
    core: &SharedCore,
    scheduler: &Rc<dyn Scheduler>,
    settle: Duration,
    step: Step,
) {
    let id = {
        let mut state = core.borrow_mut();
        if state.phase == CarouselPhase::Empty {
            return;
        }
        let id = state.next_settle_id;
        state.next_settle_id += 1;
        id
    };

    let weak = Rc::downgrade(core);
    let timer = scheduler.set_timeout(settle, Box::new(move || settle_transition(&weak, id)));
    {
        let mut state = core.borrow_mut();
        let visible = state.snapshot().current_index().unwrap_or(0);
        state.pending.push(PendingSettle {
            id,
            step,
            _timer: timer,
        });
        state.phase = state.phase_from(visible);
    }
    notify(core);
}

fn settle_transition(core: &Weak<RefCell<CarouselCore>>, id: u64) {
    let Some(core) = core.upgrade() else {
        return;
    };
    let settled = {
        let mut state = core.borrow_mut();
        let Some(position) = state.pending.iter().position(|pending| pending.id == id) else {
            return;
        };
        let settled = state.pending.remove(position);
        let visible = state.snapshot().current_index().unwrap_or(0);
        let index = settled.step.resolve(visible, state.items.len());
        state.phase = state.phase_from(index);
        settled
    };
    drop(settled);
    notify(&core);
}

fn notify(core: &SharedCore) {
    let (observer, snapshot) = {
        let state = core.borrow();
        (state.observer.clone(), state.snapshot())
    };
    if let Some(observer) = observer {
        observer(&snapshot);
    }
}
