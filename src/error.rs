// SPDX-License-Identifier: MIT OR Apache-2.0

/// Configuration errors reported before any element is probed.
///
/// An element that cannot be measured yet is not an error, see [`text_fit`](crate::text_fit).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("minimum font size {min}px is larger than maximum {max}px")]
    InvalidBounds { min: f32, max: f32 },

    #[error("minimum font size must be positive, got {0}px")]
    NonPositiveMin(f32),

    #[error("accuracy must not be negative, got {0}px")]
    NegativeAccuracy(f32),

    #[error("projected percentage of box must be in (0, 1], got {0}")]
    InvalidProjection(f32),

    #[error("option `{0}` is not a finite number")]
    NonFinite(&'static str),
}
