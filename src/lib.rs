// SPDX-License-Identifier: MIT OR Apache-2.0

//! # COSMIC Text Fit
//!
//! This library scales text up or down until it fills its container. [`text_fit`] runs a
//! binary search over font sizes against any [`MeasurableElement`], a [`FitGroup`] keeps
//! sibling elements on one shared size, and a [`FitBinding`] refits an element whenever
//! its text changes, retrying while the element is not laid out yet.
//!
//! Scheduling is left to the host through the [`Scheduler`] trait. [`CycleScheduler`] is
//! a hand-driven implementation for hosts without an event loop, and for tests. With the
//! `cosmic` feature, [`TextBox`] measures text with `cosmic-text`.
//!
//! ```
//! use std::rc::Rc;
//! use cosmic_text_fit::{
//!     element_ref, ContainerBox, CycleScheduler, FitBinding, FitGroup, FitOverrides,
//!     MeasurableElement, RenderedSize, WhiteSpace,
//! };
//!
//! // Every character is a square as wide as the font size
//! struct Label {
//!     text: String,
//!     font_size: Option<f32>,
//! }
//!
//! impl MeasurableElement for Label {
//!     fn text(&self) -> &str { &self.text }
//!     fn set_text(&mut self, text: &str) { self.text = text.to_string(); }
//!     fn font_size(&self) -> Option<f32> { self.font_size }
//!     fn set_font_size(&mut self, px: f32) { self.font_size = Some(px); }
//!     fn set_white_space(&mut self, _white_space: WhiteSpace) {}
//!     fn rendered_size(&mut self) -> RenderedSize {
//!         let px = self.font_size.unwrap_or(16.0);
//!         RenderedSize::new(self.text.chars().count() as f32 * px, px)
//!     }
//!     fn container(&self) -> ContainerBox { ContainerBox::new(100.0, 100.0) }
//! }
//!
//! let scheduler = CycleScheduler::new();
//! let group = FitGroup::new(FitOverrides::new(), Rc::new(scheduler.clone()));
//!
//! let short = element_ref(Label { text: String::new(), font_size: None });
//! let long = element_ref(Label { text: String::new(), font_size: None });
//! let short_binding = FitBinding::new(short.clone(), Rc::new(scheduler.clone()))
//!     .group(&group)
//!     .bind()
//!     .unwrap();
//! let long_binding = FitBinding::new(long.clone(), Rc::new(scheduler.clone()))
//!     .group(&group)
//!     .bind()
//!     .unwrap();
//!
//! short_binding.set_text("ok").unwrap();
//! long_binding.set_text("okay").unwrap();
//!
//! // Both relayouts are reconciled once, after the current cycle
//! scheduler.run_cycle();
//! assert_eq!(short.borrow().font_size(), Some(25.0));
//! assert_eq!(long.borrow().font_size(), Some(25.0));
//! ```

pub use self::binding::*;
mod binding;

#[cfg(feature = "cosmic")]
pub use self::cosmic::*;
#[cfg(feature = "cosmic")]
mod cosmic;

pub use self::element::*;
mod element;

pub use self::error::*;
mod error;

pub use self::group::*;
mod group;

mod math;

pub use self::options::*;
mod options;

pub use self::scheduler::*;
mod scheduler;

pub use self::signal::*;
mod signal;

pub use self::sizer::*;
mod sizer;
