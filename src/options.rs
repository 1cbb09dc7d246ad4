// SPDX-License-Identifier: MIT OR Apache-2.0

use core::time::Duration;

use crate::FitError;

/// Whether probes are traced, and under which label
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DebugMode {
    #[default]
    Off,
    On,
    /// Trace with the given label in front of every line
    Labeled(String),
}

impl DebugMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Label used as a log prefix
    pub fn label(&self) -> &str {
        match self {
            Self::Labeled(label) => label.as_str(),
            _ => "text-fit",
        }
    }
}

impl From<bool> for DebugMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<&str> for DebugMode {
    fn from(label: &str) -> Self {
        Self::Labeled(label.to_string())
    }
}

/// Options of one fit pass, sizes in pixels
#[derive(Clone, Debug, PartialEq)]
pub struct FitOptions {
    pub min: f32,
    pub max: f32,
    /// Stop searching once the bounds are this close
    pub accuracy: f32,
    pub word_wrap: bool,
    pub debug: DebugMode,
    /// Share of the container height used for the first guess
    pub projected_percentage_of_box: f32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min: 6.0,
            max: 120.0,
            accuracy: 0.0,
            word_wrap: false,
            debug: DebugMode::Off,
            projected_percentage_of_box: 0.87,
        }
    }
}

impl FitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f32) -> Self {
        self.max = max;
        self
    }

    pub fn accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn debug(mut self, debug: impl Into<DebugMode>) -> Self {
        self.debug = debug.into();
        self
    }

    pub fn projected_percentage_of_box(mut self, ratio: f32) -> Self {
        self.projected_percentage_of_box = ratio;
        self
    }

    /// Apply the fields set in `overrides` on top of these options
    pub fn with_overrides(mut self, overrides: &FitOverrides) -> Self {
        if let Some(min) = overrides.min {
            self.min = min;
        }
        if let Some(max) = overrides.max {
            self.max = max;
        }
        if let Some(accuracy) = overrides.accuracy {
            self.accuracy = accuracy;
        }
        if let Some(word_wrap) = overrides.word_wrap {
            self.word_wrap = word_wrap;
        }
        if let Some(debug) = &overrides.debug {
            self.debug = debug.clone();
        }
        if let Some(ratio) = overrides.projected_percentage_of_box {
            self.projected_percentage_of_box = ratio;
        }
        self
    }

    /// Check that a binary search over these options terminates with a sensible answer
    pub fn validate(&self) -> Result<(), FitError> {
        for (name, value) in [
            ("min", self.min),
            ("max", self.max),
            ("accuracy", self.accuracy),
            ("projected_percentage_of_box", self.projected_percentage_of_box),
        ] {
            if !value.is_finite() {
                return Err(FitError::NonFinite(name));
            }
        }
        if self.min <= 0.0 {
            return Err(FitError::NonPositiveMin(self.min));
        }
        if self.min > self.max {
            return Err(FitError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.accuracy < 0.0 {
            return Err(FitError::NegativeAccuracy(self.accuracy));
        }
        if self.projected_percentage_of_box <= 0.0 || self.projected_percentage_of_box > 1.0 {
            return Err(FitError::InvalidProjection(self.projected_percentage_of_box));
        }
        Ok(())
    }
}

/// Partial [`FitOptions`], used for group level and element level settings.
///
/// Resolution order is defaults, then group overrides, then element overrides, so
/// an element always wins over the group it belongs to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitOverrides {
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub accuracy: Option<f32>,
    pub word_wrap: Option<bool>,
    pub debug: Option<DebugMode>,
    pub projected_percentage_of_box: Option<f32>,
}

impl FitOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    pub fn accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = Some(word_wrap);
        self
    }

    pub fn debug(mut self, debug: impl Into<DebugMode>) -> Self {
        self.debug = Some(debug.into());
        self
    }

    pub fn projected_percentage_of_box(mut self, ratio: f32) -> Self {
        self.projected_percentage_of_box = Some(ratio);
        self
    }

    /// Resolve against the defaults
    pub fn resolve(&self) -> FitOptions {
        FitOptions::default().with_overrides(self)
    }
}

/// How often and how far apart an unmeasurable element is retried
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            backoff: Duration::from_millis(35),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Never retry, the first attempt is the last
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }
}
