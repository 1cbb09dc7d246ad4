// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cell::RefCell;
use core::cmp::{Ordering, Reverse};
use core::fmt;
use core::time::Duration;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// Deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Runs work after the current unit of work has completed.
///
/// Hosts implement this on top of their event loop, for example with a timeout queue
/// or the next animation frame. A task must never run before `defer` returns.
pub trait Scheduler {
    /// Run `task` once the current cycle has completed
    fn defer(&self, task: Task);

    /// Run `task` once `delay` has elapsed
    fn defer_for(&self, delay: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn defer(&self, task: Task) {
        (**self).defer(task);
    }

    fn defer_for(&self, delay: Duration, task: Task) {
        (**self).defer_for(delay, task);
    }
}

struct Entry {
    due: Duration,
    seq: u64,
    task: Task,
}

impl Entry {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Default)]
struct Queue {
    now: Duration,
    seq: u64,
    entries: BinaryHeap<Reverse<Entry>>,
}

impl Queue {
    fn push(&mut self, delay: Duration, task: Task) {
        let entry = Entry {
            due: self.now + delay,
            seq: self.seq,
            task,
        };
        self.seq += 1;
        self.entries.push(Reverse(entry));
    }

    fn pop_due(&mut self) -> Option<Task> {
        match self.entries.peek() {
            Some(Reverse(entry)) if entry.due <= self.now => {
                self.entries.pop().map(|Reverse(entry)| entry.task)
            }
            _ => None,
        }
    }
}

/// Single-threaded [`Scheduler`] driven by hand, with a virtual clock.
///
/// Tasks run in order of due time, then in the order they were deferred. Clones
/// share the same queue.
#[derive(Clone, Default)]
pub struct CycleScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl CycleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of tasks that have not run yet
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Run every task that is due, including tasks deferred while running.
    ///
    /// Returns the number of tasks run.
    pub fn run_cycle(&self) -> usize {
        let mut ran = 0;
        loop {
            // the queue must not stay borrowed while a task defers more work
            let task = self.queue.borrow_mut().pop_due();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Move the clock forward by `duration`, running tasks as they come due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.now() + duration;
        let mut ran = self.run_cycle();
        loop {
            let next_due = {
                let queue = self.queue.borrow();
                queue.entries.peek().map(|Reverse(entry)| entry.due)
            };
            match next_due {
                Some(due) if due <= target => {
                    self.queue.borrow_mut().now = due;
                    ran += self.run_cycle();
                }
                _ => break,
            }
        }
        self.queue.borrow_mut().now = target;
        ran + self.run_cycle()
    }

    /// Run everything, jumping the clock from one timer to the next until the queue
    /// is empty.
    ///
    /// Returns the number of tasks run. Work that keeps rescheduling itself makes
    /// this loop forever.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = self.run_cycle();
        loop {
            let next_due = {
                let queue = self.queue.borrow();
                queue.entries.peek().map(|Reverse(entry)| entry.due)
            };
            match next_due {
                Some(due) => {
                    let mut queue = self.queue.borrow_mut();
                    queue.now = queue.now.max(due);
                    drop(queue);
                    ran += self.run_cycle();
                }
                None => return ran,
            }
        }
    }
}

impl Scheduler for CycleScheduler {
    fn defer(&self, task: Task) {
        self.queue.borrow_mut().push(Duration::ZERO, task);
    }

    fn defer_for(&self, delay: Duration, task: Task) {
        self.queue.borrow_mut().push(delay, task);
    }
}

impl fmt::Debug for CycleScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("CycleScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.entries.len())
            .finish()
    }
}
