// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Which north a heading is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NorthReference {
    /// Geographic north, when the platform can provide it.
    #[default]
    True,
    /// Magnetic north.
    Magnetic,
}

/// One raw reading from the platform compass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingSample {
    /// Heading relative to true north; absent or negative when the platform
    /// has no location fix to correct for declination.
    pub true_heading_degrees: Option<f64>,
    /// Heading relative to magnetic north.
    pub magnetic_heading_degrees: f64,
    /// Maximum deviation of the reading, in degrees; negative means invalid.
    pub accuracy_degrees: f64,
}

impl HeadingSample {
    /// Picks the heading for `north`, falling back to magnetic when no valid
    /// true heading is available.
    #[must_use]
    pub fn heading_for(&self, north: NorthReference) -> f64 {
        match (north, self.true_heading_degrees) {
            (NorthReference::True, Some(true_heading)) if true_heading >= 0.0 => true_heading,
            _ => self.magnetic_heading_degrees,
        }
    }
}
