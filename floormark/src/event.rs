// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floormark_gesture::primitive::GesturePrimitive;
use floormark_heading::{HeadingSample, SmoothedHeading};
use floormark_ranging::estimator::BeaconReading;
use floormark_ranging::slot::ScanSample;
use floormark_viewport::{NormalizedPoint, ViewportState};
use kurbo::{Point, Size};

/// Hardware the session depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Heading source.
    Compass,
    /// Beacon scanner.
    Bluetooth,
}

/// Whether a [`Capability`] can currently deliver samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Availability {
    /// Not reported yet. Samples are accepted.
    #[default]
    Unknown,
    /// Reported as working.
    Available,
    /// Reported as missing, off or unauthorized. Samples are dropped.
    Unavailable,
}

/// One input from a platform collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A phased gesture primitive from the touch layer.
    Gesture(GesturePrimitive),
    /// A compass reading.
    Heading(HeadingSample),
    /// A received advertisement.
    Scan(ScanSample),
    /// A capability changed availability.
    Availability {
        /// Which hardware.
        capability: Capability,
        /// Its new availability.
        availability: Availability,
    },
    /// The view hosting the floor plan changed size.
    ContainerResized(Size),
}

/// What observers of a session are told.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    /// The viewport moved, zoomed or turned.
    ViewportChanged(ViewportState),
    /// The user tapped the floor plan.
    Tapped {
        /// Screen location.
        location: Point,
        /// Content position, if the container size is known.
        normalized: Option<NormalizedPoint>,
    },
    /// The smoothed heading moved.
    HeadingUpdated(SmoothedHeading),
    /// A beacon's distance estimate changed.
    BeaconUpdated {
        /// Advertised peripheral name.
        beacon_id: String,
        /// Updated estimate.
        reading: BeaconReading,
    },
    /// A capability changed availability.
    AvailabilityChanged {
        /// Which hardware.
        capability: Capability,
        /// Its new availability.
        availability: Availability,
    },
}

#[cfg(test)]
mod tests {
    use super::InputEvent;

    #[test]
    fn input_events_cross_threads() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<InputEvent>();
    }
}
