// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floormark Viewport: pan/zoom/rotate state over a floor-plan image.
//!
//! This crate provides a small, headless model of the viewport through which a
//! static floor-plan image is shown. It focuses on:
//! - Viewport state (scale, offset, rotation) with clamped updates.
//! - Anchored zoom that keeps the point under a focal location fixed.
//! - Coordinate conversion between screen space and normalized content space,
//!   where content positions are fractions (`0..=1`) of the image size.
//! - Fitting the content into its container.
//!
//! It does **not** own any rendering backend or gesture recognizer. Callers are
//! expected to:
//! - Feed gesture deltas into the setters (or let `floormark_gesture` do it).
//! - Apply [`ViewportTransform::view_transform`] when rendering the content.
//! - Store placed markers as [`NormalizedPoint`]s so they survive viewport
//!   changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use floormark_viewport::{ViewportConfig, ViewportTransform};
//!
//! let container = Size::new(400.0, 400.0);
//! let mut viewport = ViewportTransform::new(ViewportConfig::default());
//!
//! // Zoom in around the container center: the offset does not move.
//! viewport.anchored_zoom(2.0, Point::new(200.0, 200.0), container).unwrap();
//! assert_eq!(viewport.scale(), 2.0);
//!
//! // The center of the screen still shows the center of the content.
//! let hit = viewport.screen_to_normalized(Point::new(200.0, 200.0), container).unwrap();
//! assert!((hit.x() - 0.5).abs() < 1e-9);
//! assert!((hit.y() - 0.5).abs() < 1e-9);
//! ```
//!
//! ## Transform order
//!
//! Rendering applies, about the container center, the scale first, then the
//! rotation, then the offset as a plain translation. Un-projecting a screen
//! point undoes the stack in reverse: subtract the offset, rotate back, then
//! divide out the scale.
//!
//! Rejected updates (non-finite values, non-positive zoom ratios, degenerate
//! sizes) leave the state untouched and are reported through `tracing`.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod error;
mod normalized;
mod transform;

pub use config::ViewportConfig;
pub use error::ViewportError;
pub use normalized::NormalizedPoint;
pub use transform::{ViewportState, ViewportTransform, normalize_degrees};
