// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};

use crate::{NormalizedPoint, ViewportConfig, ViewportError};

/// Normalizes an angle in degrees into `[0, 360)`.
///
/// Uses `((degrees mod 360) + 360) mod 360`, so `normalize_degrees(r)` and
/// `normalize_degrees(r + 360.0 * k)` agree for integer `k` up to rounding.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = ((degrees % 360.0) + 360.0) % 360.0;
    // Tiny negative inputs round up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Snapshot of the viewport: what a renderer needs to draw the content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Uniform scale factor.
    pub scale: f64,
    /// Translation in screen units, applied after scale and rotation.
    pub offset: Vec2,
    /// Clockwise rotation in degrees, within `[0, 360)`.
    pub rotation_degrees: f64,
}

impl ViewportState {
    /// Scale 1, no offset, no rotation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
        rotation_degrees: 0.0,
    };

    /// Rotation in radians.
    #[must_use]
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Viewport over a floor-plan image laid out in a container.
///
/// `ViewportTransform` owns a [`ViewportState`] and only lets it change through
/// clamping setters, so the following always hold:
/// - `min_scale <= scale <= max_scale`.
/// - `|offset.x|, |offset.y| <= max_offset * scale`.
/// - `0 <= rotation_degrees < 360`.
///
/// Content positions are exchanged as [`NormalizedPoint`]s relative to a
/// container size supplied per call, so the same state serves containers that
/// are resized between frames.
#[derive(Clone, Debug)]
pub struct ViewportTransform {
    config: ViewportConfig,
    state: ViewportState,
    revision: u64,
}

impl ViewportTransform {
    /// Creates a viewport with scale 1 (clamped into the configured limits),
    /// zero offset and the configured initial rotation.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        let config = config.sanitized();
        Self {
            state: Self::initial_state(&config),
            config,
            revision: 0,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Returns the current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Returns the current offset in screen units.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.state.offset
    }

    /// Returns the current rotation in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.state.rotation_degrees
    }

    /// Counter bumped every time the state actually changes.
    ///
    /// Observers can compare revisions instead of whole states.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets the scale, clamping it into the configured range.
    ///
    /// The offset is re-clamped against the bound for the new scale.
    /// Returns the scale actually stored.
    pub fn set_scale(&mut self, candidate: f64) -> Result<f64, ViewportError> {
        ensure_finite("scale", candidate)?;
        let clamped = candidate.clamp(self.config.min_scale, self.config.max_scale);
        if (self.state.scale - clamped).abs() < f64::EPSILON {
            return Ok(self.state.scale);
        }
        self.state.scale = clamped;
        self.state.offset = self.clamp_offset(self.state.offset);
        self.revision += 1;
        Ok(clamped)
    }

    /// Sets the offset, clamping each axis to `max_offset * scale`.
    ///
    /// Returns the offset actually stored.
    pub fn set_offset(&mut self, candidate: Vec2) -> Result<Vec2, ViewportError> {
        ensure_finite("offset.x", candidate.x)?;
        ensure_finite("offset.y", candidate.y)?;
        let clamped = self.clamp_offset(candidate);
        if clamped != self.state.offset {
            self.state.offset = clamped;
            self.revision += 1;
        }
        Ok(clamped)
    }

    /// Sets the rotation, normalized into `[0, 360)`.
    ///
    /// Returns the rotation actually stored.
    pub fn set_rotation(&mut self, candidate: f64) -> Result<f64, ViewportError> {
        ensure_finite("rotation", candidate)?;
        let normalized = normalize_degrees(candidate);
        if normalized != self.state.rotation_degrees {
            self.state.rotation_degrees = normalized;
            self.revision += 1;
        }
        Ok(normalized)
    }

    /// Applies a previously captured state through the clamping setters.
    ///
    /// Either every field is applied or, if any field is non-finite, none is.
    pub fn restore(&mut self, state: ViewportState) -> Result<(), ViewportError> {
        ensure_finite("scale", state.scale)?;
        ensure_finite("offset.x", state.offset.x)?;
        ensure_finite("offset.y", state.offset.y)?;
        ensure_finite("rotation", state.rotation_degrees)?;
        self.set_scale(state.scale)?;
        self.set_offset(state.offset)?;
        self.set_rotation(state.rotation_degrees)?;
        Ok(())
    }

    /// Multiplies the scale by `scale_ratio` while keeping the content point
    /// under `focal` (in screen coordinates) where it is on screen.
    ///
    /// With `t = new_scale / old_scale` after clamping and
    /// `d = focal - center - old_offset`, the new offset is
    /// `old_offset + (1 - t) * d`. The point stays exactly fixed unless the
    /// resulting offset has to be clamped. Returns the new scale.
    pub fn anchored_zoom(
        &mut self,
        scale_ratio: f64,
        focal: Point,
        container: Size,
    ) -> Result<f64, ViewportError> {
        ensure_finite("zoom ratio", scale_ratio)?;
        if scale_ratio <= 0.0 {
            tracing::warn!(scale_ratio, "rejecting non-positive zoom ratio");
            return Err(ViewportError::InvalidZoomRatio { ratio: scale_ratio });
        }
        ensure_finite("focal.x", focal.x)?;
        ensure_finite("focal.y", focal.y)?;
        ensure_usable_size(container)?;

        let old_scale = self.state.scale;
        let old_offset = self.state.offset;
        let new_scale =
            (old_scale * scale_ratio).clamp(self.config.min_scale, self.config.max_scale);
        let t = new_scale / old_scale;
        let center = container.to_rect().center();
        let d = focal - center - old_offset;
        let new_offset = old_offset + d * (1.0 - t);
        ensure_finite("offset.x", new_offset.x)?;
        ensure_finite("offset.y", new_offset.y)?;

        self.set_scale(new_scale)?;
        self.set_offset(new_offset)?;
        Ok(self.state.scale)
    }

    /// Restores scale 1, zero offset and the configured initial rotation.
    pub fn reset_transform(&mut self) {
        let initial = Self::initial_state(&self.config);
        if initial != self.state {
            self.state = initial;
            self.revision += 1;
        }
    }

    /// Scales the content so it fits entirely inside the container, with no
    /// offset and no rotation. Returns the chosen scale.
    pub fn fit_to_bounds(&mut self, content: Size, container: Size) -> Result<f64, ViewportError> {
        ensure_usable_size(content)?;
        ensure_usable_size(container)?;
        let sx = container.width / content.width;
        let sy = container.height / content.height;
        let fitted = ViewportState {
            scale: sx.min(sy).clamp(self.config.min_scale, self.config.max_scale),
            offset: Vec2::ZERO,
            rotation_degrees: 0.0,
        };
        if fitted != self.state {
            self.state = fitted;
            self.revision += 1;
        }
        Ok(fitted.scale)
    }

    /// Returns the content-to-screen transform for a container of this size.
    ///
    /// Content is scaled, then rotated about the container center, then
    /// translated by the offset.
    #[must_use]
    pub fn view_transform(&self, container: Size) -> Affine {
        let center = container.to_rect().center();
        Affine::translate(self.state.offset)
            * Affine::rotate_about(self.state.rotation_radians(), center)
            * Affine::scale_about(self.state.scale, center)
    }

    /// Converts a screen point into a normalized content point.
    ///
    /// The result is clamped into the content, so points outside the image map
    /// onto its nearest edge.
    pub fn screen_to_normalized(
        &self,
        screen: Point,
        container: Size,
    ) -> Result<NormalizedPoint, ViewportError> {
        ensure_finite("screen.x", screen.x)?;
        ensure_finite("screen.y", screen.y)?;
        ensure_usable_size(container)?;
        let content = self.screen_to_content(screen, container);
        Ok(NormalizedPoint::new(
            content.x / container.width,
            content.y / container.height,
        ))
    }

    /// Converts a normalized point into container coordinates without applying
    /// the viewport.
    ///
    /// Use this for content laid out inside the already transformed container.
    #[must_use]
    pub fn normalized_to_screen(&self, point: NormalizedPoint, container: Size) -> Point {
        point.to_content(container)
    }

    /// Converts a normalized point into screen coordinates through the
    /// viewport.
    ///
    /// This is the forward counterpart of [`Self::screen_to_normalized`].
    #[must_use]
    pub fn normalized_to_view(&self, point: NormalizedPoint, container: Size) -> Point {
        self.view_transform(container) * point.to_content(container)
    }

    fn screen_to_content(&self, screen: Point, container: Size) -> Point {
        let center = container.to_rect().center();
        let translated = screen - self.state.offset;
        let unrotated = Affine::rotate_about(-self.state.rotation_radians(), center) * translated;
        center + (unrotated - center) / self.state.scale
    }

    fn clamp_offset(&self, offset: Vec2) -> Vec2 {
        let bound = self.config.max_offset * self.state.scale;
        Vec2::new(offset.x.clamp(-bound, bound), offset.y.clamp(-bound, bound))
    }

    fn initial_state(config: &ViewportConfig) -> ViewportState {
        ViewportState {
            scale: 1.0_f64.clamp(config.min_scale, config.max_scale),
            offset: Vec2::ZERO,
            rotation_degrees: config.initial_rotation_degrees,
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ViewportError> {
    if value.is_finite() {
        Ok(())
    } else {
        tracing::warn!(field, value, "rejecting non-finite viewport input");
        Err(ViewportError::NonFinite { field })
    }
}

fn ensure_usable_size(size: Size) -> Result<(), ViewportError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(size.width) && usable(size.height) {
        Ok(())
    } else {
        tracing::warn!(
            width = size.width,
            height = size.height,
            "rejecting degenerate size"
        );
        Err(ViewportError::DegenerateSize {
            width: size.width,
            height: size.height,
        })
    }
}
