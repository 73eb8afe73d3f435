// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state machines that drive a viewport.
//!
//! ## Usage
//!
//! 1) Tell the orchestrator the container size with
//!    [`GestureOrchestrator::set_container`] (and again on every resize).
//! 2) Pass every primitive to [`GestureOrchestrator::handle`] together with the
//!    viewport it should drive.
//! 3) React to the returned [`GestureEvent`], if any. Viewport changes happen
//!    in place; the event only reports terminal outcomes.
//!
//! ## Pan versus tap
//!
//! A pan stays a pending tap while its translation is shorter than
//! [`GestureConfig::tap_threshold`]. During that time the viewport does not
//! move. Once the threshold is reached the pan commits and the offset follows
//! `start_offset + translation` for the rest of the gesture. A pan that ends
//! before committing fires [`GestureEvent::Tap`] where the finger lifted.

use floormark_viewport::{NormalizedPoint, ViewportError, ViewportTransform};
use kurbo::{Point, Size, Vec2};

use crate::primitive::{GestureKind, GesturePhase, GesturePrimitive};
use crate::session::{GestureSession, SessionKind};

/// Tunables for gesture interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance, in screen units, a pan must travel from its start point
    /// before it stops being a tap candidate.
    pub tap_threshold: f64,
}

impl GestureConfig {
    /// Default tap threshold.
    pub const DEFAULT_TAP_THRESHOLD: f64 = 10.0;

    /// Sets the tap threshold.
    #[must_use]
    pub fn with_tap_threshold(mut self, tap_threshold: f64) -> Self {
        self.tap_threshold = tap_threshold;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_threshold: Self::DEFAULT_TAP_THRESHOLD,
        }
    }
}

/// Terminal outcomes reported by [`GestureOrchestrator::handle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A tap, either recognized directly or a pan that never committed.
    Tap {
        /// Screen location of the tap. For a pan that never committed, the
        /// location reported with its `Ended` primitive.
        location: Point,
        /// Content position under the tap; `None` until a container is known.
        normalized: Option<NormalizedPoint>,
    },
    /// A committed pan finished; `offset` is the final viewport offset.
    PanEnded {
        /// Final offset.
        offset: Vec2,
    },
    /// A pinch finished; `scale` is the final viewport scale.
    ZoomEnded {
        /// Final scale.
        scale: f64,
    },
    /// A rotation finished with the viewport at `rotation_degrees`.
    RotationEnded {
        /// Final rotation.
        rotation_degrees: f64,
    },
}

/// Drives a [`ViewportTransform`] from phased gesture primitives.
#[derive(Clone, Debug, Default)]
pub struct GestureOrchestrator {
    config: GestureConfig,
    container: Option<Size>,
    pan: Option<GestureSession>,
    zoom: Option<GestureSession>,
    rotate: Option<GestureSession>,
}

impl GestureOrchestrator {
    /// Creates an orchestrator with no active gestures and no container.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns the container size used for anchoring and tap mapping.
    #[must_use]
    pub fn container(&self) -> Option<Size> {
        self.container
    }

    /// Sets the container size. Degenerate sizes are rejected and the previous
    /// size is kept.
    pub fn set_container(&mut self, size: Size) -> Result<(), ViewportError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(size.width) || !usable(size.height) {
            tracing::warn!(
                width = size.width,
                height = size.height,
                "ignoring degenerate container"
            );
            return Err(ViewportError::DegenerateSize {
                width: size.width,
                height: size.height,
            });
        }
        self.container = Some(size);
        Ok(())
    }

    /// Active pan session, if any.
    #[must_use]
    pub fn pan_session(&self) -> Option<&GestureSession> {
        self.pan.as_ref()
    }

    /// Active zoom session, if any.
    #[must_use]
    pub fn zoom_session(&self) -> Option<&GestureSession> {
        self.zoom.as_ref()
    }

    /// Active rotation session, if any.
    #[must_use]
    pub fn rotation_session(&self) -> Option<&GestureSession> {
        self.rotate.as_ref()
    }

    /// Returns `true` when no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pan.is_none() && self.zoom.is_none() && self.rotate.is_none()
    }

    /// Drops every active session, leaving the viewport as it is.
    pub fn cancel_all(&mut self) {
        self.pan = None;
        self.zoom = None;
        self.rotate = None;
    }

    /// Applies one primitive to `viewport`.
    ///
    /// Returns an event when a gesture reached a terminal outcome.
    pub fn handle(
        &mut self,
        viewport: &mut ViewportTransform,
        primitive: &GesturePrimitive,
    ) -> Option<GestureEvent> {
        match primitive.kind {
            GestureKind::Pan => self.handle_pan(viewport, primitive),
            GestureKind::Pinch => self.handle_pinch(viewport, primitive),
            GestureKind::Rotation => self.handle_rotation(viewport, primitive),
            GestureKind::Tap => {
                (primitive.phase == GesturePhase::Ended).then(|| GestureEvent::Tap {
                    location: primitive.location,
                    normalized: self.normalize(viewport, primitive.location),
                })
            }
        }
    }

    fn handle_pan(
        &mut self,
        viewport: &mut ViewportTransform,
        primitive: &GesturePrimitive,
    ) -> Option<GestureEvent> {
        if primitive.phase == GesturePhase::Began {
            self.pan = Some(GestureSession::begin(
                SessionKind::Pan,
                viewport.offset(),
                primitive.location,
                primitive.touch_count,
            ));
            tracing::trace!(x = primitive.location.x, y = primitive.location.y, "pan began");
            return None;
        }

        let Some(session) = self.pan.as_mut() else {
            tracing::trace!(phase = ?primitive.phase, "pan update without session");
            return None;
        };
        // Cancellation keeps whatever was committed but applies nothing new.
        if primitive.phase != GesturePhase::Cancelled {
            if let Some(translation) = primitive.translation {
                apply_pan(session, viewport, translation, self.config.tap_threshold);
            }
        }
        if !primitive.is_terminal() {
            return None;
        }

        let session = self.pan.take()?;
        if session.has_exceeded_tap_threshold {
            Some(GestureEvent::PanEnded {
                offset: viewport.offset(),
            })
        } else if primitive.phase == GesturePhase::Ended && session.is_tap_candidate() {
            let location = primitive.location;
            Some(GestureEvent::Tap {
                location,
                normalized: self.normalize(viewport, location),
            })
        } else {
            None
        }
    }

    fn handle_pinch(
        &mut self,
        viewport: &mut ViewportTransform,
        primitive: &GesturePrimitive,
    ) -> Option<GestureEvent> {
        if primitive.phase == GesturePhase::Began {
            self.zoom = Some(GestureSession::begin(
                SessionKind::Zoom,
                viewport.offset(),
                primitive.location,
                primitive.touch_count,
            ));
            return None;
        }

        let container = self.container;
        let Some(session) = self.zoom.as_mut() else {
            tracing::trace!(phase = ?primitive.phase, "pinch update without session");
            return None;
        };
        if primitive.phase != GesturePhase::Cancelled {
            if let Some(scale) = primitive.scale {
                match container {
                    Some(container) => {
                        let ratio = session.incremental_ratio(scale);
                        match viewport.anchored_zoom(ratio, primitive.location, container) {
                            Ok(_) => session.advance_baseline(scale),
                            Err(err) => tracing::debug!(%err, "pinch update rejected"),
                        }
                    }
                    None => tracing::debug!("pinch update before container size is known"),
                }
            }
        }
        if !primitive.is_terminal() {
            return None;
        }

        self.zoom = None;
        Some(GestureEvent::ZoomEnded {
            scale: viewport.scale(),
        })
    }

    fn handle_rotation(
        &mut self,
        viewport: &mut ViewportTransform,
        primitive: &GesturePrimitive,
    ) -> Option<GestureEvent> {
        if primitive.phase == GesturePhase::Began {
            self.rotate = Some(GestureSession::begin(
                SessionKind::Rotate,
                viewport.offset(),
                primitive.location,
                primitive.touch_count,
            ));
            return None;
        }

        let Some(session) = self.rotate.as_mut() else {
            tracing::trace!(phase = ?primitive.phase, "rotation update without session");
            return None;
        };
        if primitive.phase != GesturePhase::Cancelled {
            if let Some(degrees) = primitive.rotation_degrees {
                let target = viewport.rotation_degrees() + session.incremental_delta(degrees);
                match viewport.set_rotation(target) {
                    Ok(_) => session.advance_baseline(degrees),
                    Err(err) => tracing::debug!(%err, "rotation update rejected"),
                }
            }
        }
        if !primitive.is_terminal() {
            return None;
        }

        self.rotate = None;
        Some(GestureEvent::RotationEnded {
            rotation_degrees: viewport.rotation_degrees(),
        })
    }

    fn normalize(&self, viewport: &ViewportTransform, location: Point) -> Option<NormalizedPoint> {
        let container = self.container?;
        viewport.screen_to_normalized(location, container).ok()
    }
}

fn apply_pan(
    session: &mut GestureSession,
    viewport: &mut ViewportTransform,
    translation: Vec2,
    tap_threshold: f64,
) {
    if !session.has_exceeded_tap_threshold && translation.hypot() >= tap_threshold {
        session.has_exceeded_tap_threshold = true;
        tracing::trace!(dx = translation.x, dy = translation.y, "pan committed");
    }
    if session.has_exceeded_tap_threshold {
        if let Err(err) = viewport.set_offset(session.start_viewport_offset + translation) {
            tracing::debug!(%err, "pan update rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use floormark_viewport::{NormalizedPoint, ViewportTransform};
    use kurbo::{Point, Size, Vec2};

    use super::{GestureConfig, GestureEvent, GestureOrchestrator};
    use crate::primitive::{GesturePhase, GesturePrimitive};

    fn setup() -> (GestureOrchestrator, ViewportTransform) {
        let mut gestures = GestureOrchestrator::new(GestureConfig::default());
        gestures.set_container(Size::new(400.0, 400.0)).unwrap();
        (gestures, ViewportTransform::default())
    }

    #[test]
    fn short_pan_ends_as_tap() {
        let (mut gestures, mut vp) = setup();
        let at = Point::new(100.0, 300.0);

        assert_eq!(
            gestures.handle(&mut vp, &GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, at)),
            None
        );
        gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Changed, Vec2::new(5.0, 3.0), at),
        );
        assert_eq!(vp.offset(), Vec2::ZERO);

        let event = gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Ended, Vec2::new(5.0, 3.0), at),
        );
        assert_eq!(
            event,
            Some(GestureEvent::Tap {
                location: at,
                normalized: Some(NormalizedPoint::new(0.25, 0.75)),
            })
        );
        assert_eq!(vp.offset(), Vec2::ZERO);
        assert!(gestures.is_idle());
    }

    #[test]
    fn pan_tap_reports_the_lift_location() {
        let (mut gestures, mut vp) = setup();
        let down = Point::new(200.0, 200.0);
        let up = Point::new(204.0, 203.0);
        gestures.handle(&mut vp, &GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, down));

        let event = gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Ended, Vec2::new(4.0, 3.0), up),
        );
        assert_eq!(
            event,
            Some(GestureEvent::Tap {
                location: up,
                normalized: Some(NormalizedPoint::new(0.51, 0.5075)),
            })
        );
    }

    #[test]
    fn long_pan_commits_offset_from_start() {
        let (mut gestures, mut vp) = setup();
        vp.set_offset(Vec2::new(10.0, 10.0)).unwrap();
        let at = Point::new(50.0, 50.0);

        gestures.handle(&mut vp, &GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, at));
        gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Changed, Vec2::new(4.0, 0.0), at),
        );
        assert_eq!(vp.offset(), Vec2::new(10.0, 10.0));
        assert!(!gestures.pan_session().unwrap().has_exceeded_tap_threshold);

        gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Changed, Vec2::new(12.0, 5.0), at),
        );
        assert_eq!(vp.offset(), Vec2::new(22.0, 15.0));

        // Moving back under the threshold keeps the pan committed.
        gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Changed, Vec2::new(1.0, 1.0), at),
        );
        assert_eq!(vp.offset(), Vec2::new(11.0, 11.0));

        let event = gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Ended, Vec2::new(30.0, -20.0), at),
        );
        assert_eq!(
            event,
            Some(GestureEvent::PanEnded {
                offset: Vec2::new(40.0, -10.0)
            })
        );
    }

    #[test]
    fn cancelled_pan_keeps_committed_offset_and_never_taps() {
        let (mut gestures, mut vp) = setup();
        let at = Point::new(50.0, 50.0);

        gestures.handle(&mut vp, &GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, at));
        let event = gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Cancelled, Vec2::new(1.0, 1.0), at),
        );
        assert_eq!(event, None);

        gestures.handle(&mut vp, &GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, at));
        gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Changed, Vec2::new(0.0, 25.0), at),
        );
        let event = gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Cancelled, Vec2::new(0.0, 90.0), at),
        );
        assert_eq!(
            event,
            Some(GestureEvent::PanEnded {
                offset: Vec2::new(0.0, 25.0)
            })
        );
    }

    #[test]
    fn multi_touch_pan_is_not_a_tap() {
        let (mut gestures, mut vp) = setup();
        let at = Point::new(50.0, 50.0);
        let began = GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, at).with_touch_count(2);
        gestures.handle(&mut vp, &began);
        let ended =
            GesturePrimitive::pan(GesturePhase::Ended, Vec2::new(1.0, 0.0), at).with_touch_count(2);
        assert_eq!(gestures.handle(&mut vp, &ended), None);
    }

    #[test]
    fn pinch_at_center_scales_without_offset() {
        let (mut gestures, mut vp) = setup();
        let center = Point::new(200.0, 200.0);

        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Began, 1.0, center));
        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Changed, 2.0, center));
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.offset(), Vec2::ZERO);

        let ended = GesturePrimitive::pinch(GesturePhase::Ended, 2.0, center);
        let event = gestures.handle(&mut vp, &ended);
        assert_eq!(event, Some(GestureEvent::ZoomEnded { scale: 2.0 }));
    }

    #[test]
    fn pinch_updates_compose_multiplicatively() {
        let (mut gestures, mut vp) = setup();
        let center = Point::new(200.0, 200.0);

        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Began, 1.0, center));
        for scale in [1.2, 1.5, 2.5] {
            let changed = GesturePrimitive::pinch(GesturePhase::Changed, scale, center);
            gestures.handle(&mut vp, &changed);
            assert!((vp.scale() - scale).abs() < 1e-9);
        }
        assert!((gestures.zoom_session().unwrap().baseline() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn pinch_keeps_focal_content_under_fingers() {
        let (mut gestures, mut vp) = setup();
        let focal = Point::new(120.0, 80.0);
        let before = vp.screen_to_normalized(focal, Size::new(400.0, 400.0)).unwrap();

        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Began, 1.0, focal));
        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Changed, 1.7, focal));
        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Ended, 2.2, focal));

        let after = vp.screen_to_normalized(focal, Size::new(400.0, 400.0)).unwrap();
        assert!((before.x() - after.x()).abs() < 1e-9);
        assert!((before.y() - after.y()).abs() < 1e-9);
    }

    #[test]
    fn rejected_pinch_keeps_baseline() {
        let (mut gestures, mut vp) = setup();
        let center = Point::new(200.0, 200.0);
        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Began, 1.0, center));
        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Changed, f64::NAN, center));
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(gestures.zoom_session().unwrap().baseline(), 1.0);

        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Changed, 1.5, center));
        assert_eq!(vp.scale(), 1.5);
    }

    #[test]
    fn rotation_applies_incremental_deltas() {
        let (mut gestures, mut vp) = setup();
        vp.set_rotation(350.0).unwrap();
        let at = Point::new(200.0, 200.0);

        gestures.handle(&mut vp, &GesturePrimitive::rotation(GesturePhase::Began, 0.0, at));
        gestures.handle(&mut vp, &GesturePrimitive::rotation(GesturePhase::Changed, 5.0, at));
        assert!((vp.rotation_degrees() - 355.0).abs() < 1e-9);
        gestures.handle(&mut vp, &GesturePrimitive::rotation(GesturePhase::Changed, 20.0, at));
        assert!((vp.rotation_degrees() - 10.0).abs() < 1e-9);

        let ended = GesturePrimitive::rotation(GesturePhase::Ended, 20.0, at);
        let event = gestures.handle(&mut vp, &ended);
        match event {
            Some(GestureEvent::RotationEnded { rotation_degrees }) => {
                assert!((rotation_degrees - 10.0).abs() < 1e-9);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn interleaved_gestures_share_one_viewport() {
        let (mut gestures, mut vp) = setup();
        let center = Point::new(200.0, 200.0);

        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Began, 1.0, center));
        gestures.handle(&mut vp, &GesturePrimitive::rotation(GesturePhase::Began, 0.0, center));
        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Changed, 1.5, center));
        gestures.handle(&mut vp, &GesturePrimitive::rotation(GesturePhase::Changed, 90.0, center));
        assert!(!gestures.is_idle());

        gestures.handle(&mut vp, &GesturePrimitive::pinch(GesturePhase::Ended, 1.5, center));
        assert!(gestures.zoom_session().is_none());
        assert!(gestures.rotation_session().is_some());
        gestures.handle(&mut vp, &GesturePrimitive::rotation(GesturePhase::Ended, 90.0, center));

        assert!(gestures.is_idle());
        assert_eq!(vp.scale(), 1.5);
        assert!((vp.rotation_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn updates_without_began_are_ignored() {
        let (mut gestures, mut vp) = setup();
        let at = Point::new(10.0, 10.0);
        let event = gestures.handle(
            &mut vp,
            &GesturePrimitive::pan(GesturePhase::Ended, Vec2::new(50.0, 0.0), at),
        );
        assert_eq!(event, None);
        assert_eq!(vp.offset(), Vec2::ZERO);
    }

    #[test]
    fn direct_tap_is_mapped_through_viewport() {
        let (mut gestures, mut vp) = setup();
        vp.anchored_zoom(2.0, Point::new(200.0, 200.0), Size::new(400.0, 400.0))
            .unwrap();
        let event = gestures.handle(&mut vp, &GesturePrimitive::tap(Point::new(300.0, 200.0)));
        assert_eq!(
            event,
            Some(GestureEvent::Tap {
                location: Point::new(300.0, 200.0),
                normalized: Some(NormalizedPoint::new(0.625, 0.5)),
            })
        );
    }

    #[test]
    fn tap_without_container_has_no_normalized_point() {
        let mut gestures = GestureOrchestrator::default();
        let mut vp = ViewportTransform::default();
        assert!(gestures.set_container(Size::new(0.0, 10.0)).is_err());
        let event = gestures.handle(&mut vp, &GesturePrimitive::tap(Point::new(3.0, 4.0)));
        assert_eq!(
            event,
            Some(GestureEvent::Tap {
                location: Point::new(3.0, 4.0),
                normalized: None,
            })
        );
    }
}
