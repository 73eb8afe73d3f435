// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture session state, created on `Began` and dropped on `Ended` or
//! `Cancelled`.

use kurbo::{Point, Vec2};

/// Which viewport property a session drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    /// Offset, from pan primitives.
    Pan,
    /// Scale, from pinch primitives.
    Zoom,
    /// Rotation, from rotation primitives.
    Rotate,
}

/// Tracks one active gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    /// Driven property.
    pub kind: SessionKind,
    /// Viewport offset when the gesture began.
    pub start_viewport_offset: Vec2,
    /// Touch location (or focal point) when the gesture began.
    pub start_focal_point: Point,
    /// Set once a pan has moved far enough to stop being a tap candidate.
    pub has_exceeded_tap_threshold: bool,
    /// Touch count reported at `Began`.
    pub touch_count: u8,
    baseline: f64,
}

impl GestureSession {
    /// Starts a session.
    ///
    /// The incremental baseline is `1.0` for zoom sessions (a neutral scale
    /// ratio) and `0.0` otherwise.
    #[must_use]
    pub fn begin(
        kind: SessionKind,
        start_viewport_offset: Vec2,
        start_focal_point: Point,
        touch_count: u8,
    ) -> Self {
        Self {
            kind,
            start_viewport_offset,
            start_focal_point,
            has_exceeded_tap_threshold: false,
            touch_count,
            baseline: match kind {
                SessionKind::Zoom => 1.0,
                SessionKind::Pan | SessionKind::Rotate => 0.0,
            },
        }
    }

    /// Cumulative value already applied to the viewport.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Ratio between a cumulative pinch scale and the applied baseline.
    #[must_use]
    pub fn incremental_ratio(&self, cumulative_scale: f64) -> f64 {
        cumulative_scale / self.baseline
    }

    /// Difference between a cumulative rotation and the applied baseline.
    #[must_use]
    pub fn incremental_delta(&self, cumulative_degrees: f64) -> f64 {
        cumulative_degrees - self.baseline
    }

    /// Records that the viewport now reflects `cumulative`.
    pub fn advance_baseline(&mut self, cumulative: f64) {
        self.baseline = cumulative;
    }

    /// Whether a pan that ends now should be reported as a tap.
    #[must_use]
    pub fn is_tap_candidate(&self) -> bool {
        self.kind == SessionKind::Pan && !self.has_exceeded_tap_threshold && self.touch_count <= 1
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{GestureSession, SessionKind};

    #[test]
    fn baselines_start_neutral() {
        let zoom = GestureSession::begin(SessionKind::Zoom, Vec2::ZERO, Point::ZERO, 2);
        assert_eq!(zoom.baseline(), 1.0);
        assert_eq!(zoom.incremental_ratio(1.5), 1.5);

        let rotate = GestureSession::begin(SessionKind::Rotate, Vec2::ZERO, Point::ZERO, 2);
        assert_eq!(rotate.baseline(), 0.0);
        assert_eq!(rotate.incremental_delta(12.0), 12.0);
    }

    #[test]
    fn advancing_baseline_makes_deltas_incremental() {
        let mut zoom = GestureSession::begin(SessionKind::Zoom, Vec2::ZERO, Point::ZERO, 2);
        zoom.advance_baseline(2.0);
        assert_eq!(zoom.incremental_ratio(3.0), 1.5);

        let mut rotate = GestureSession::begin(SessionKind::Rotate, Vec2::ZERO, Point::ZERO, 2);
        rotate.advance_baseline(30.0);
        assert_eq!(rotate.incremental_delta(45.0), 15.0);
    }

    #[test]
    fn only_single_touch_pans_are_tap_candidates() {
        let mut pan = GestureSession::begin(SessionKind::Pan, Vec2::ZERO, Point::ZERO, 1);
        assert!(pan.is_tap_candidate());
        pan.has_exceeded_tap_threshold = true;
        assert!(!pan.is_tap_candidate());

        let two_finger = GestureSession::begin(SessionKind::Pan, Vec2::ZERO, Point::ZERO, 2);
        assert!(!two_finger.is_tap_candidate());
    }
}
