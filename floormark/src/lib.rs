// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floormark: one owner for the state behind a floor-plan screen.
//!
//! [`MapSession`] ties the component crates together:
//!
//! - gestures from the touch layer drive the viewport through
//!   [`floormark_gesture`];
//! - compass samples are smoothed by [`floormark_heading`];
//! - beacon advertisements become distance estimates in
//!   [`floormark_ranging`];
//! - the viewport and the map markers are persisted with
//!   [`floormark_store`].
//!
//! Platform collaborators deliver [`InputEvent`]s, either directly through
//! [`MapSession::handle`] or from other threads through a channel obtained
//! from [`MapSession::sender`] and drained with [`MapSession::pump`]. Results
//! fan out to observers as [`Notification`]s.
//!
//! ```rust
//! use floormark::{InputEvent, MapSession, Notification};
//! use floormark_gesture::primitive::{GesturePhase, GesturePrimitive};
//! use kurbo::{Point, Size};
//!
//! let mut session = MapSession::default();
//! session.handle(InputEvent::ContainerResized(Size::new(400.0, 300.0)));
//!
//! let center = Point::new(200.0, 150.0);
//! for (phase, scale) in [
//!     (GesturePhase::Began, 1.0),
//!     (GesturePhase::Changed, 2.0),
//!     (GesturePhase::Ended, 2.0),
//! ] {
//!     session.handle(InputEvent::Gesture(GesturePrimitive::pinch(phase, scale, center)));
//! }
//! assert_eq!(session.viewport().scale(), 2.0);
//! ```

mod event;
mod session;

pub use event::{Availability, Capability, InputEvent, Notification};
pub use session::{MapSession, ObserverId, SessionConfig, SessionError};
