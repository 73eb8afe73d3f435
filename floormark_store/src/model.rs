// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markers placed on the floor plan.
//!
//! Positions are [`NormalizedPoint`]s, so markers stay attached to the same
//! spot of the image whatever the viewport does.

use floormark_viewport::NormalizedPoint;
use serde::{Deserialize, Serialize};

/// A Bluetooth beacon placed on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeaconPin {
    /// Identifier matching the beacon's advertised peripheral name.
    pub beacon_id: String,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Where the beacon sits on the floor plan.
    #[serde(with = "normalized")]
    pub position: NormalizedPoint,
}

impl BeaconPin {
    /// Creates an unlabeled pin.
    #[must_use]
    pub fn new(beacon_id: impl Into<String>, position: NormalizedPoint) -> Self {
        Self {
            beacon_id: beacon_id.into(),
            label: None,
            position,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A straight measurement line between two points of the floor plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Stable identifier.
    pub id: String,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// First endpoint.
    #[serde(with = "normalized")]
    pub start: NormalizedPoint,
    /// Second endpoint.
    #[serde(with = "normalized")]
    pub end: NormalizedPoint,
}

impl Measurement {
    /// Creates an unlabeled measurement.
    #[must_use]
    pub fn new(id: impl Into<String>, start: NormalizedPoint, end: NormalizedPoint) -> Self {
        Self {
            id: id.into(),
            label: None,
            start,
            end,
        }
    }

    /// Real-world length of the line under `calibration`.
    #[must_use]
    pub fn length_meters(&self, calibration: &MapCalibration) -> f64 {
        let dx = (self.end.x() - self.start.x()) * calibration.content_width_meters;
        let dy = (self.end.y() - self.start.y()) * calibration.content_height_meters;
        dx.hypot(dy)
    }
}

/// Real-world extent of the floor-plan image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapCalibration {
    /// Width covered by the full image, in meters.
    pub content_width_meters: f64,
    /// Height covered by the full image, in meters.
    pub content_height_meters: f64,
}

impl MapCalibration {
    /// Returns `true` when both extents are positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        usable(self.content_width_meters) && usable(self.content_height_meters)
    }
}

/// Serde adapter storing a [`NormalizedPoint`] as `{ "x": .., "y": .. }`.
///
/// Deserialization rejects coordinates outside `0..=1` instead of clamping,
/// so corrupt records are skipped rather than silently moved.
mod normalized {
    use floormark_viewport::NormalizedPoint;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct PointRecord {
        x: f64,
        y: f64,
    }

    pub(super) fn serialize<S: Serializer>(
        point: &NormalizedPoint,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        PointRecord {
            x: point.x(),
            y: point.y(),
        }
        .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NormalizedPoint, D::Error> {
        let PointRecord { x, y } = PointRecord::deserialize(deserializer)?;
        NormalizedPoint::try_new(x, y)
            .ok_or_else(|| D::Error::custom(format!("point ({x}, {y}) outside content")))
    }
}

#[cfg(test)]
mod tests {
    use floormark_viewport::NormalizedPoint;

    use super::{BeaconPin, MapCalibration, Measurement};

    #[test]
    fn measurement_length_uses_both_axes() {
        let calibration = MapCalibration {
            content_width_meters: 40.0,
            content_height_meters: 30.0,
        };
        let line = Measurement::new(
            "hall",
            NormalizedPoint::new(0.0, 0.0),
            NormalizedPoint::new(0.3, 0.4),
        );
        // 12 m across, 12 m down.
        assert!((line.length_meters(&calibration) - 12.0_f64.hypot(12.0)).abs() < 1e-9);
    }

    #[test]
    fn pins_serialize_as_plain_objects() {
        let pin = BeaconPin::new("b1", NormalizedPoint::new(0.25, 0.5)).with_label("Lobby");
        let json = serde_json::to_value(&pin).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "beacon_id": "b1",
                "label": "Lobby",
                "position": { "x": 0.25, "y": 0.5 }
            })
        );
    }

    #[test]
    fn out_of_range_points_fail_to_decode() {
        let json = serde_json::json!({
            "beacon_id": "b1",
            "position": { "x": 1.5, "y": 0.5 }
        });
        assert!(serde_json::from_value::<BeaconPin>(json).is_err());
    }

    #[test]
    fn calibration_validity() {
        let mut calibration = MapCalibration {
            content_width_meters: 10.0,
            content_height_meters: 5.0,
        };
        assert!(calibration.is_valid());
        calibration.content_height_meters = 0.0;
        assert!(!calibration.is_valid());
    }
}
