// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Limits and defaults for a [`crate::ViewportTransform`].
///
/// The offset bound is expressed per unit of scale: at scale `s` each offset
/// axis is clamped to `[-max_offset * s, max_offset * s]`, so the pan range
/// grows as the user zooms in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Smallest allowed scale factor.
    pub min_scale: f64,
    /// Largest allowed scale factor.
    pub max_scale: f64,
    /// Offset bound per unit of scale, in screen units.
    pub max_offset: f64,
    /// Rotation applied on creation and on reset, in degrees.
    pub initial_rotation_degrees: f64,
}

impl ViewportConfig {
    /// Default lower scale limit.
    pub const DEFAULT_MIN_SCALE: f64 = 0.5;
    /// Default upper scale limit.
    pub const DEFAULT_MAX_SCALE: f64 = 3.0;
    /// Default offset bound per unit of scale.
    pub const DEFAULT_MAX_OFFSET: f64 = 500.0;

    /// Sets the scale limits.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the offset bound per unit of scale.
    #[must_use]
    pub fn with_max_offset(mut self, max_offset: f64) -> Self {
        self.max_offset = max_offset.abs();
        self
    }

    /// Sets the rotation used on creation and reset.
    #[must_use]
    pub fn with_initial_rotation(mut self, degrees: f64) -> Self {
        self.initial_rotation_degrees = degrees;
        self
    }

    /// Replaces unusable values with defaults and orders the scale limits.
    pub(crate) fn sanitized(self) -> Self {
        let valid_scale = |s: f64| s.is_finite() && s > 0.0;
        let min_scale = if valid_scale(self.min_scale) {
            self.min_scale
        } else {
            Self::DEFAULT_MIN_SCALE
        };
        let max_scale = if valid_scale(self.max_scale) {
            self.max_scale
        } else {
            Self::DEFAULT_MAX_SCALE
        };
        let max_offset = if self.max_offset.is_finite() {
            self.max_offset.abs()
        } else {
            Self::DEFAULT_MAX_OFFSET
        };
        let initial_rotation_degrees = if self.initial_rotation_degrees.is_finite() {
            crate::normalize_degrees(self.initial_rotation_degrees)
        } else {
            0.0
        };
        Self {
            min_scale,
            max_scale,
            max_offset,
            initial_rotation_degrees,
        }
        .with_scale_limits(min_scale, max_scale)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: Self::DEFAULT_MIN_SCALE,
            max_scale: Self::DEFAULT_MAX_SCALE,
            max_offset: Self::DEFAULT_MAX_OFFSET,
            initial_rotation_degrees: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewportConfig;

    #[test]
    fn scale_limits_are_ordered() {
        let config = ViewportConfig::default().with_scale_limits(4.0, 0.25);
        assert_eq!(config.min_scale, 0.25);
        assert_eq!(config.max_scale, 4.0);
    }

    #[test]
    fn sanitized_replaces_unusable_values() {
        let config = ViewportConfig {
            min_scale: f64::NAN,
            max_scale: -2.0,
            max_offset: f64::INFINITY,
            initial_rotation_degrees: -90.0,
        }
        .sanitized();
        assert_eq!(config.min_scale, ViewportConfig::DEFAULT_MIN_SCALE);
        assert_eq!(config.max_scale, ViewportConfig::DEFAULT_MAX_SCALE);
        assert_eq!(config.max_offset, ViewportConfig::DEFAULT_MAX_OFFSET);
        assert_eq!(config.initial_rotation_degrees, 270.0);
    }
}
