// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture primitives as delivered by the host's recognizers.
//!
//! Values are cumulative since `Began`, the way a recognizer reports them
//! before anyone resets it: the pan translation is measured from the start
//! point, the pinch scale starts at `1.0` and the rotation at `0.0`.

use kurbo::{Point, Vec2};

/// Lifecycle phase of a gesture primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// The gesture was recognized.
    Began,
    /// The gesture moved.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The gesture was interrupted by the system.
    Cancelled,
}

/// Which recognizer produced a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// One or more fingers dragging.
    Pan,
    /// Two-finger pinch.
    Pinch,
    /// Two-finger rotation.
    Rotation,
    /// Discrete tap.
    Tap,
}

/// One phased gesture update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GesturePrimitive {
    /// Lifecycle phase.
    pub phase: GesturePhase,
    /// Producing recognizer.
    pub kind: GestureKind,
    /// Pan translation since `Began`, in screen units.
    pub translation: Option<Vec2>,
    /// Pinch scale since `Began`.
    pub scale: Option<f64>,
    /// Rotation since `Began`, in degrees.
    pub rotation_degrees: Option<f64>,
    /// Touch location, or the touch centroid for multi-touch gestures.
    pub location: Point,
    /// Number of touches involved.
    pub touch_count: u8,
}

impl GesturePrimitive {
    /// A single-touch pan update.
    #[must_use]
    pub fn pan(phase: GesturePhase, translation: Vec2, location: Point) -> Self {
        Self {
            phase,
            kind: GestureKind::Pan,
            translation: Some(translation),
            scale: None,
            rotation_degrees: None,
            location,
            touch_count: 1,
        }
    }

    /// A two-touch pinch update centered on `focal`.
    #[must_use]
    pub fn pinch(phase: GesturePhase, scale: f64, focal: Point) -> Self {
        Self {
            phase,
            kind: GestureKind::Pinch,
            translation: None,
            scale: Some(scale),
            rotation_degrees: None,
            location: focal,
            touch_count: 2,
        }
    }

    /// A two-touch rotation update.
    #[must_use]
    pub fn rotation(phase: GesturePhase, degrees: f64, location: Point) -> Self {
        Self {
            phase,
            kind: GestureKind::Rotation,
            translation: None,
            scale: None,
            rotation_degrees: Some(degrees),
            location,
            touch_count: 2,
        }
    }

    /// A recognized tap.
    #[must_use]
    pub fn tap(location: Point) -> Self {
        Self {
            phase: GesturePhase::Ended,
            kind: GestureKind::Tap,
            translation: None,
            scale: None,
            rotation_degrees: None,
            location,
            touch_count: 1,
        }
    }

    /// Overrides the touch count.
    #[must_use]
    pub fn with_touch_count(mut self, touch_count: u8) -> Self {
        self.touch_count = touch_count;
        self
    }

    /// Returns `true` for `Ended` and `Cancelled`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}
