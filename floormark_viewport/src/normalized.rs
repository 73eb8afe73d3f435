// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};

/// A position in content space, as a fraction of the content size.
///
/// Both coordinates are always within `0.0..=1.0`, independent of how the
/// viewport is currently scaled, panned or rotated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedPoint {
    x: f64,
    y: f64,
}

impl NormalizedPoint {
    /// The top-left corner of the content.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };
    /// The center of the content.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Creates a point, clamping each axis into `0.0..=1.0`.
    ///
    /// NaN coordinates collapse to `0.0`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Creates a point only if both coordinates already lie in `0.0..=1.0`.
    #[must_use]
    pub fn try_new(x: f64, y: f64) -> Option<Self> {
        let unit = 0.0..=1.0;
        (unit.contains(&x) && unit.contains(&y)).then_some(Self { x, y })
    }

    /// Horizontal fraction of the content width.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical fraction of the content height.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Scales this point by `size`, giving a position in content units.
    #[must_use]
    pub fn to_content(self, size: Size) -> Point {
        Point::new(self.x * size.width, self.y * size.height)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::NormalizedPoint;

    #[test]
    fn new_clamps_and_swallows_nan() {
        let p = NormalizedPoint::new(-0.5, 1.5);
        assert_eq!((p.x(), p.y()), (0.0, 1.0));

        let p = NormalizedPoint::new(f64::NAN, f64::INFINITY);
        assert_eq!((p.x(), p.y()), (0.0, 1.0));
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(NormalizedPoint::try_new(0.25, 0.75).is_some());
        assert!(NormalizedPoint::try_new(1.01, 0.5).is_none());
        assert!(NormalizedPoint::try_new(0.5, f64::NAN).is_none());
    }

    #[test]
    fn to_content_scales_by_size() {
        let p = NormalizedPoint::new(0.25, 0.5);
        assert_eq!(p.to_content(Size::new(400.0, 200.0)), Point::new(100.0, 100.0));
    }
}
