// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floormark Gesture: turn phased gesture primitives into viewport updates.
//!
//! Gesture recognizers on the host platform deliver already-parsed primitives
//! (pan translation, pinch scale, rotation angle, tap) tagged with a phase.
//! This crate keeps one small session per gesture kind and applies each update
//! to a [`ViewportTransform`](floormark_viewport::ViewportTransform):
//!
//! - [`primitive`]: the phased input primitives.
//! - [`session`]: per-gesture state captured at `Began`.
//! - [`orchestrator`]: the state machines that drive the viewport and decide
//!   whether a short pan was really a tap.
//!
//! Pan, pinch and rotation sessions are independent and may be active at the
//! same time; all of them update the same viewport. Delivery is expected to be
//! sequential (one primitive fully handled before the next).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use floormark_gesture::orchestrator::{GestureEvent, GestureOrchestrator};
//! use floormark_gesture::primitive::{GesturePhase, GesturePrimitive};
//! use floormark_viewport::ViewportTransform;
//!
//! let mut viewport = ViewportTransform::default();
//! let mut gestures = GestureOrchestrator::default();
//! gestures.set_container(Size::new(400.0, 400.0)).unwrap();
//!
//! let at = Point::new(100.0, 100.0);
//! gestures.handle(&mut viewport, &GesturePrimitive::pan(GesturePhase::Began, Vec2::ZERO, at));
//! let event = gestures.handle(
//!     &mut viewport,
//!     &GesturePrimitive::pan(GesturePhase::Ended, Vec2::new(2.0, 1.0), at),
//! );
//! // Barely moved: reported as a tap, the viewport did not pan.
//! assert!(matches!(event, Some(GestureEvent::Tap { .. })));
//! assert_eq!(viewport.offset(), Vec2::ZERO);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod orchestrator;
pub mod primitive;
pub mod session;
