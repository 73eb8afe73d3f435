// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floormark_viewport::normalize_degrees;
use thiserror::Error;

use crate::{HeadingSample, NorthReference};

/// Tunables for [`HeadingSmoother`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingConfig {
    /// Weight of each new sample, in `0.0..=1.0`.
    pub smoothing_factor: f64,
    /// Samples reporting a worse accuracy than this are rejected.
    pub max_accuracy_degrees: f64,
    /// Accepted samples worse than this raise the accuracy warning.
    pub warning_accuracy_degrees: f64,
    /// North reference used by [`HeadingSmoother::ingest_sample`].
    pub north: NorthReference,
}

impl HeadingConfig {
    /// Sets the north reference.
    #[must_use]
    pub fn with_north(mut self, north: NorthReference) -> Self {
        self.north = north;
        self
    }

    /// Sets the smoothing factor, clamped into `0.0..=1.0`.
    #[must_use]
    pub fn with_smoothing_factor(mut self, factor: f64) -> Self {
        self.smoothing_factor = factor.clamp(0.0, 1.0);
        self
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.15,
            max_accuracy_degrees: 25.0,
            warning_accuracy_degrees: 15.0,
            north: NorthReference::True,
        }
    }
}

/// Why a sample did not update the smoothed heading.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum HeadingRejected {
    /// Accuracy was negative (invalid reading) or above the configured limit.
    #[error("heading accuracy {accuracy_degrees} out of range")]
    AccuracyOutOfRange {
        /// The reported accuracy.
        accuracy_degrees: f64,
    },
    /// Heading or accuracy was NaN or infinite.
    #[error("non-finite heading sample")]
    NonFinite,
}

/// Filter state exposed for inspection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadingState {
    /// Current smoothed heading in `[0, 360)`; meaningless until
    /// `has_initial_sample`.
    pub smoothed_heading_degrees: f64,
    /// Whether any sample has been accepted since creation or reset.
    pub has_initial_sample: bool,
}

/// Result of an accepted sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedHeading {
    /// Smoothed heading in `[0, 360)`.
    pub degrees: f64,
    /// Accuracy reported with the sample.
    pub accuracy_degrees: f64,
    /// Set when the accuracy is worse than the warning threshold.
    pub accuracy_warning: bool,
}

/// Circular low-pass filter for compass headings.
#[derive(Clone, Debug, Default)]
pub struct HeadingSmoother {
    config: HeadingConfig,
    state: HeadingState,
}

impl HeadingSmoother {
    /// Creates a smoother with no accepted samples.
    #[must_use]
    pub fn new(config: HeadingConfig) -> Self {
        Self {
            config,
            state: HeadingState::default(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HeadingConfig {
        &self.config
    }

    /// Returns the filter state.
    #[must_use]
    pub fn state(&self) -> HeadingState {
        self.state
    }

    /// Returns the smoothed heading, once a sample has been accepted.
    #[must_use]
    pub fn heading(&self) -> Option<f64> {
        self.state
            .has_initial_sample
            .then_some(self.state.smoothed_heading_degrees)
    }

    /// Forgets all samples, as when the compass restarts.
    pub fn reset(&mut self) {
        self.state = HeadingState::default();
    }

    /// Feeds a platform sample, choosing the heading for the configured north.
    pub fn ingest_sample(
        &mut self,
        sample: &HeadingSample,
    ) -> Result<SmoothedHeading, HeadingRejected> {
        self.ingest(sample.heading_for(self.config.north), sample.accuracy_degrees)
    }

    /// Feeds one raw heading.
    ///
    /// The first accepted sample is taken as is. Later samples move the
    /// smoothed heading by `smoothing_factor` times the shortest signed angle
    /// between it and the sample.
    pub fn ingest(
        &mut self,
        raw_heading_degrees: f64,
        accuracy_degrees: f64,
    ) -> Result<SmoothedHeading, HeadingRejected> {
        if !raw_heading_degrees.is_finite() || !accuracy_degrees.is_finite() {
            tracing::debug!(
                raw_heading_degrees,
                accuracy_degrees,
                "discarding non-finite heading"
            );
            return Err(HeadingRejected::NonFinite);
        }
        if !(0.0..=self.config.max_accuracy_degrees).contains(&accuracy_degrees) {
            tracing::debug!(accuracy_degrees, "discarding inaccurate heading");
            return Err(HeadingRejected::AccuracyOutOfRange { accuracy_degrees });
        }

        let smoothed = if self.state.has_initial_sample {
            let old = self.state.smoothed_heading_degrees.to_radians();
            let new = raw_heading_degrees.to_radians();
            let delta = new - old;
            let shortest = libm::atan2(libm::sin(delta), libm::cos(delta));
            normalize_degrees((old + self.config.smoothing_factor * shortest).to_degrees())
        } else {
            normalize_degrees(raw_heading_degrees)
        };
        self.state = HeadingState {
            smoothed_heading_degrees: smoothed,
            has_initial_sample: true,
        };

        Ok(SmoothedHeading {
            degrees: smoothed,
            accuracy_degrees,
            accuracy_warning: accuracy_degrees > self.config.warning_accuracy_degrees,
        })
    }
}
