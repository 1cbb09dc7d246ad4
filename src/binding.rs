// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};

use crate::{
    text_fit, ElementRef, FitError, FitGroup, FitOptions, FitOverrides, MeasurableElement,
    Registration, RetryPolicy, Scheduler, Signal,
};

/// Where a binding stands after its latest fit attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitStatus {
    /// Nothing has been fitted yet
    Idle,
    /// Fitted on its own at this size; a group may apply a smaller one later
    Fitted(f32),
    /// Element had no rendered size, a retry is scheduled
    Waiting { retries: u32 },
    /// Element still had no rendered size after the last retry
    GaveUp,
}

struct BindingState<E> {
    element: ElementRef<E>,
    overrides: FitOverrides,
    group: Option<FitGroup<E>>,
    scheduler: Rc<dyn Scheduler>,
    retry: RetryPolicy,
    retries: u32,
    generation: u64,
    status: FitStatus,
}

impl<E: MeasurableElement + 'static> BindingState<E> {
    fn fit_options(&self) -> FitOptions {
        match &self.group {
            Some(group) => group.options_for(&self.overrides),
            None => self.overrides.resolve(),
        }
    }
}

/// Start a new generation of fit attempts, dropping retries of earlier ones
fn start_pass<E: MeasurableElement + 'static>(
    state: &Rc<RefCell<BindingState<E>>>,
) -> Result<FitStatus, FitError> {
    {
        let mut state = state.borrow_mut();
        state.generation += 1;
        state.retries = 0;
    }
    attempt(state)
}

fn attempt<E: MeasurableElement + 'static>(
    state: &Rc<RefCell<BindingState<E>>>,
) -> Result<FitStatus, FitError> {
    let (element, overrides, group, last_attempt) = {
        let state = state.borrow();
        if state.element.borrow().text().is_empty() {
            return Ok(state.status);
        }
        (
            state.element.clone(),
            state.overrides.clone(),
            state.group.clone(),
            state.retries >= state.retry.max_retries,
        )
    };

    let fitted = match &group {
        Some(group) => group.fit_one(&element, &overrides, last_attempt)?,
        None => text_fit(
            &mut *element.borrow_mut(),
            &overrides.resolve(),
            last_attempt,
        )?,
    };

    let mut binding = state.borrow_mut();
    let status = match fitted {
        Some(size) => {
            binding.retries = 0;
            if let Some(group) = &group {
                group.notify_relayout();
            }
            FitStatus::Fitted(size)
        }
        None if last_attempt => {
            log::warn!(
                "gave up fitting {:?} after {} retries",
                element.borrow().text(),
                binding.retries
            );
            FitStatus::GaveUp
        }
        None => {
            binding.retries += 1;
            let weak: Weak<RefCell<BindingState<E>>> = Rc::downgrade(state);
            let generation = binding.generation;
            binding.scheduler.defer_for(
                binding.retry.backoff,
                Box::new(move || {
                    let Some(state) = weak.upgrade() else {
                        return;
                    };
                    if state.borrow().generation != generation {
                        return;
                    }
                    if let Err(err) = attempt(&state) {
                        log::error!("text fit retry failed: {}", err);
                    }
                }),
            );
            FitStatus::Waiting {
                retries: binding.retries,
            }
        }
    };
    binding.status = status;
    Ok(status)
}

/// Keeps the font size of one element fitted to its container as its text changes.
///
/// A binding fits on its own, or through a [`FitGroup`] when one is given. While the
/// element has no rendered size (hidden, not laid out yet) the fit is retried
/// according to the [`RetryPolicy`]; the last retry is final and only warns.
///
/// Dropping the binding, or calling [`destroy`](Self::destroy), leaves the group and
/// releases every signal subscription.
pub struct FitBinding<E> {
    state: Rc<RefCell<BindingState<E>>>,
    group_registration: Option<Registration>,
    subscriptions: Vec<Registration>,
}

impl<E: MeasurableElement + 'static> FitBinding<E> {
    pub fn new(element: ElementRef<E>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            state: Rc::new(RefCell::new(BindingState {
                element,
                overrides: FitOverrides::default(),
                group: None,
                scheduler,
                retry: RetryPolicy::default(),
                retries: 0,
                generation: 0,
                status: FitStatus::Idle,
            })),
            group_registration: None,
            subscriptions: Vec::new(),
        }
    }

    /// Element level options, these win over the options of a group
    pub fn options(self, overrides: FitOverrides) -> Self {
        self.state.borrow_mut().overrides = overrides;
        self
    }

    pub fn retry(self, retry: RetryPolicy) -> Self {
        self.state.borrow_mut().retry = retry;
        self
    }

    /// Join `group`, leaving any group joined before
    pub fn group(mut self, group: &FitGroup<E>) -> Self {
        let registration = {
            let mut state = self.state.borrow_mut();
            state.group = Some(group.clone());
            group.register(state.element.clone())
        };
        self.group_registration = Some(registration);
        self
    }

    /// Check the resolved options once, so a bad configuration fails here rather than
    /// on the first fit
    pub fn bind(self) -> Result<Self, FitError> {
        self.fit_options().validate()?;
        Ok(self)
    }

    /// Refit whenever `signal` is emitted, until the binding is destroyed
    pub fn refit_on(&mut self, signal: &Signal) {
        let weak = Rc::downgrade(&self.state);
        let subscription = signal.subscribe(move || {
            if let Some(state) = weak.upgrade() {
                if let Err(err) = start_pass(&state) {
                    log::error!("text fit on signal failed: {}", err);
                }
            }
        });
        self.subscriptions.push(subscription);
    }

    /// Replace the element's text and fit it. Empty text is ignored.
    pub fn set_text(&self, text: &str) -> Result<FitStatus, FitError> {
        if text.is_empty() {
            return Ok(self.status());
        }
        {
            let state = self.state.borrow();
            state.element.borrow_mut().set_text(text);
        }
        start_pass(&self.state)
    }

    /// Fit again with the current text
    pub fn refit(&self) -> Result<FitStatus, FitError> {
        start_pass(&self.state)
    }

    pub fn status(&self) -> FitStatus {
        self.state.borrow().status
    }

    /// Retries scheduled since the latest trigger
    pub fn retries(&self) -> u32 {
        self.state.borrow().retries
    }

    pub fn element(&self) -> ElementRef<E> {
        self.state.borrow().element.clone()
    }

    /// Options after applying group and element overrides
    pub fn fit_options(&self) -> FitOptions {
        self.state.borrow().fit_options()
    }

    /// Leave the group and drop every subscription
    pub fn destroy(self) {
        log::trace!(
            "destroying text fit binding with {} subscriptions",
            self.subscriptions.len()
        );
    }
}

impl<E> fmt::Debug for FitBinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FitBinding")
            .field("status", &state.status)
            .field("retries", &state.retries)
            .field("grouped", &state.group.is_some())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
