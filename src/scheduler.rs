//! Deferred actions on the single UI-owning event loop.
//!
//! Nothing here spawns threads. The host drives the queue by calling
//! [`DeferredQueue::pop_due`] (usually via the controller's `poll`) from its
//! own loop, so fired actions run on the same thread as every other entry
//! point.

use std::cell::Cell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time for a [`DeferredQueue`].
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Cancelled,
    Fired,
}

/// Handle to a scheduled action. Cancelling takes effect immediately; the
/// queue will never hand the action out afterwards.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: u64,
    state: Rc<Cell<TaskState>>,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// No-op once the task has fired or was already cancelled.
    pub fn cancel(&self) {
        if self.state.get() == TaskState::Pending {
            self.state.set(TaskState::Cancelled);
        }
    }

    pub fn state(&self) -> TaskState {
        self.state.get()
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == TaskState::Pending
    }
}

struct Entry<A> {
    action: A,
    state: Rc<Cell<TaskState>>,
}

/// Min-heap of deadlines, ordered by (deadline, insertion order).
pub struct DeferredQueue<A, C: Clock = SystemClock> {
    clock: C,
    heap: BinaryHeap<Reverse<(Instant, u64)>>,
    tasks: HashMap<u64, Entry<A>>,
    next_id: u64,
}

impl<A> DeferredQueue<A, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<A> Default for DeferredQueue<A, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C: Clock> DeferredQueue<A, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            heap: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn schedule(&mut self, delay: Duration, action: A) -> TaskHandle {
        self.tasks.retain(|_, e| e.state.get() == TaskState::Pending);

        let id = self.next_id;
        self.next_id += 1;
        let state = Rc::new(Cell::new(TaskState::Pending));
        self.tasks.insert(
            id,
            Entry {
                action,
                state: state.clone(),
            },
        );
        // A deadline past the end of time stays pending but never comes due.
        match self.clock.now().checked_add(delay) {
            Some(deadline) => self.heap.push(Reverse((deadline, id))),
            None => tracing::warn!(task = id, ?delay, "deadline out of range; task will not fire"),
        }
        TaskHandle { id, state }
    }

    /// Number of tasks that are neither cancelled nor fired.
    pub fn pending(&self) -> usize {
        self.tasks
            .values()
            .filter(|e| e.state.get() == TaskState::Pending)
            .count()
    }

    /// Deadline of the earliest live task.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.discard_dead_head();
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Remove and return the earliest live action whose deadline has passed.
    pub fn pop_due(&mut self) -> Option<A> {
        self.discard_dead_head();
        let now = self.clock.now();
        let Reverse((deadline, id)) = *self.heap.peek()?;
        if deadline > now {
            return None;
        }
        self.heap.pop();
        let entry = self.tasks.remove(&id)?;
        entry.state.set(TaskState::Fired);
        Some(entry.action)
    }

    fn discard_dead_head(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek().copied() {
            let live = self
                .tasks
                .get(&id)
                .is_some_and(|e| e.state.get() == TaskState::Pending);
            if live {
                break;
            }
            self.heap.pop();
            self.tasks.remove(&id);
        }
    }
}

/// Debounces the auto-hide countdown: at most one pending hide exists, and
/// starting a new one always cancels the old one first.
#[derive(Debug, Default)]
pub struct AutoHideScheduler {
    pending: Option<TaskHandle>,
}

impl AutoHideScheduler {
    /// Idempotent; safe when nothing is pending.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            if task.is_pending() {
                tracing::debug!(task = task.id(), "auto-hide cancelled");
            }
            task.cancel();
        }
    }

    pub fn schedule_hide_after<A, C: Clock>(
        &mut self,
        queue: &mut DeferredQueue<A, C>,
        delay: Duration,
        action: A,
    ) {
        self.cancel();
        let task = queue.schedule(delay, action);
        tracing::debug!(task = task.id(), ?delay, "auto-hide scheduled");
        self.pending = Some(task);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(TaskHandle::is_pending)
    }
}
