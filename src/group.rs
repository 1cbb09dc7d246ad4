// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};

use crate::{
    text_fit, ElementRef, FitError, FitOptions, FitOverrides, MeasurableElement, Registration,
    Scheduler,
};

/// Outcome of the latest fit of a group member
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitState {
    /// Registered, not fitted yet
    Pending,
    /// Fitted on its own at this size
    Fitted(f32),
    /// Last fit found the member without a rendered size
    Unmeasurable,
}

struct Member<E> {
    id: u64,
    element: ElementRef<E>,
    /// Element level overrides of the latest fit
    overrides: FitOverrides,
    state: FitState,
}

struct GroupInner<E> {
    overrides: FitOverrides,
    members: Vec<Member<E>>,
    next_id: u64,
    relayout_pending: bool,
}

impl<E: MeasurableElement> GroupInner<E> {
    fn member_mut(&mut self, element: &ElementRef<E>) -> Option<&mut Member<E>> {
        self.members
            .iter_mut()
            .find(|member| Rc::ptr_eq(&member.element, element))
    }

    fn reconcile(&mut self) -> Option<f32> {
        self.relayout_pending = false;

        let smallest = self
            .members
            .iter()
            .filter_map(|member| match member.state {
                FitState::Fitted(size) => Some(size),
                FitState::Pending | FitState::Unmeasurable => None,
            })
            .reduce(f32::min);

        let options = self.overrides.resolve();
        if options.debug.is_enabled() {
            let sizes: Vec<FitState> = self.members.iter().map(|member| member.state).collect();
            log::debug!(
                "[{}] reconcile {:?} to {:?}",
                options.debug.label(),
                sizes,
                smallest
            );
        }

        let size = smallest?;
        for member in self
            .members
            .iter()
            .filter(|member| member.state != FitState::Unmeasurable)
        {
            member.element.borrow_mut().set_font_size(size);
        }
        Some(size)
    }
}

/// Keeps a set of sibling elements on one shared font size.
///
/// Each member is fitted on its own, then reports back through
/// [`notify_relayout`](Self::notify_relayout). All reports that arrive within one cycle
/// are folded into a single reconciliation, which applies the smallest fitted size to
/// every member, so the members never shrink one after another on screen.
///
/// Clones refer to the same group.
pub struct FitGroup<E> {
    inner: Rc<RefCell<GroupInner<E>>>,
    scheduler: Rc<dyn Scheduler>,
}

impl<E> Clone for FitGroup<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<E: MeasurableElement + 'static> FitGroup<E> {
    /// Create a group whose members share `overrides` as their base options
    pub fn new(overrides: FitOverrides, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GroupInner {
                overrides,
                members: Vec::new(),
                next_id: 0,
                relayout_pending: false,
            })),
            scheduler,
        }
    }

    /// Add `element` to the group until the returned registration is released
    pub fn register(&self, element: ElementRef<E>) -> Registration {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.members.push(Member {
                id,
                element,
                overrides: FitOverrides::default(),
                state: FitState::Pending,
            });
            id
        };

        let weak: Weak<RefCell<GroupInner<E>>> = Rc::downgrade(&self.inner);
        Registration::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().members.retain(|member| member.id != id);
            }
        })
    }

    /// Options for a member with the given element level overrides
    pub fn options_for(&self, overrides: &FitOverrides) -> FitOptions {
        FitOptions::default()
            .with_overrides(&self.inner.borrow().overrides)
            .with_overrides(overrides)
    }

    /// Fit one element with the group options, overridden by `overrides`.
    ///
    /// The result is recorded for the next reconciliation if `element` is a member,
    /// together with `overrides` so that [`fit_all`](Self::fit_all) fits it the same way.
    pub fn fit_one(
        &self,
        element: &ElementRef<E>,
        overrides: &FitOverrides,
        last_attempt: bool,
    ) -> Result<Option<f32>, FitError> {
        let options = self.options_for(overrides);
        let fitted = text_fit(&mut *element.borrow_mut(), &options, last_attempt)?;

        if let Some(member) = self.inner.borrow_mut().member_mut(element) {
            member.overrides = overrides.clone();
            member.state = match fitted {
                Some(size) => FitState::Fitted(size),
                None => FitState::Unmeasurable,
            };
        }
        Ok(fitted)
    }

    /// Called by a member after it was fitted on its own.
    ///
    /// The first call in a cycle defers a reconciliation, later calls in the same cycle
    /// are absorbed by it.
    pub fn notify_relayout(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.relayout_pending {
                log::trace!("relayout already pending");
                return;
            }
            inner.relayout_pending = true;
        }

        let weak = Rc::downgrade(&self.inner);
        self.scheduler.defer(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().reconcile();
            }
        }));
    }

    /// Apply the smallest fitted size to every measurable member right away.
    ///
    /// Returns the applied size, or `None` if no member has been fitted.
    pub fn reconcile(&self) -> Option<f32> {
        self.inner.borrow_mut().reconcile()
    }

    /// Fit every member and reconcile immediately.
    ///
    /// Each member keeps the element overrides it was last fitted with.
    pub fn fit_all(&self, last_attempt: bool) -> Result<Option<f32>, FitError> {
        let members: Vec<(ElementRef<E>, FitOverrides)> = self
            .inner
            .borrow()
            .members
            .iter()
            .map(|member| (member.element.clone(), member.overrides.clone()))
            .collect();
        for (element, overrides) in &members {
            self.fit_one(element, overrides, last_attempt)?;
        }
        Ok(self.reconcile())
    }

    pub fn overrides(&self) -> FitOverrides {
        self.inner.borrow().overrides.clone()
    }

    /// Latest fit state of `element`, `None` if it is not a member
    pub fn state_of(&self, element: &ElementRef<E>) -> Option<FitState> {
        self.inner
            .borrow()
            .members
            .iter()
            .find(|member| Rc::ptr_eq(&member.element, element))
            .map(|member| member.state)
    }

    pub fn is_relayout_pending(&self) -> bool {
        self.inner.borrow().relayout_pending
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> fmt::Debug for FitGroup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FitGroup")
            .field("overrides", &inner.overrides)
            .field("members", &inner.members.len())
            .field("relayout_pending", &inner.relayout_pending)
            .finish()
    }
}
