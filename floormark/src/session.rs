// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use floormark_gesture::orchestrator::{GestureConfig, GestureEvent, GestureOrchestrator};
use floormark_heading::{HeadingConfig, HeadingSample, HeadingSmoother};
use floormark_ranging::estimator::{BeaconRangingEstimator, RangingConfig};
use floormark_ranging::slot::{BeaconSample, ScanSample};
use floormark_store::model::{BeaconPin, MapCalibration, Measurement};
use floormark_store::{KeyValueStore, MapDocument, MapStore, StoreError};
use floormark_viewport::{ViewportConfig, ViewportError, ViewportTransform};
use kurbo::{Point, Size};
use thiserror::Error;

use crate::event::{Availability, Capability, InputEvent, Notification};

/// Configuration of every component owned by a [`MapSession`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionConfig {
    /// Viewport limits.
    pub viewport: ViewportConfig,
    /// Gesture interpretation.
    pub gesture: GestureConfig,
    /// Compass filtering.
    pub heading: HeadingConfig,
    /// Beacon distance estimation.
    pub ranging: RangingConfig,
}

/// Failures of session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs the container size, which has not been reported.
    #[error("container size is not known yet")]
    NoContainer,
    /// The viewport refused the update.
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    /// Persisting failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle returned by [`MapSession::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

type Observer = Box<dyn FnMut(&Notification)>;

/// Owner of all state behind one floor-plan screen.
///
/// Events are processed one at a time, either directly through
/// [`handle`](Self::handle) or queued from other threads through
/// [`sender`](Self::sender) and drained by [`pump`](Self::pump).
pub struct MapSession {
    viewport: ViewportTransform,
    gestures: GestureOrchestrator,
    heading: HeadingSmoother,
    ranging: BeaconRangingEstimator,
    compass: Availability,
    bluetooth: Availability,
    beacon_pins: Vec<BeaconPin>,
    measurements: Vec<Measurement>,
    calibration: Option<MapCalibration>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u32,
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl fmt::Debug for MapSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSession")
            .field("viewport", &self.viewport)
            .field("gestures", &self.gestures)
            .field("heading", &self.heading)
            .field("ranging", &self.ranging)
            .field("compass", &self.compass)
            .field("bluetooth", &self.bluetooth)
            .field("beacon_pins", &self.beacon_pins.len())
            .field("measurements", &self.measurements.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl MapSession {
    /// Creates a session with the viewport at its initial state.
    pub fn new(config: SessionConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            viewport: ViewportTransform::new(config.viewport),
            gestures: GestureOrchestrator::new(config.gesture),
            heading: HeadingSmoother::new(config.heading),
            ranging: BeaconRangingEstimator::new(config.ranging),
            compass: Availability::Unknown,
            bluetooth: Availability::Unknown,
            beacon_pins: Vec::new(),
            measurements: Vec::new(),
            calibration: None,
            observers: Vec::new(),
            next_observer: 0,
            sender,
            receiver,
        }
    }

    /// The viewport.
    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    /// The gesture orchestrator, for inspecting in-flight gestures.
    pub fn gestures(&self) -> &GestureOrchestrator {
        &self.gestures
    }

    /// The compass filter.
    pub fn heading(&self) -> &HeadingSmoother {
        &self.heading
    }

    /// Per-beacon distance estimates.
    pub fn ranging(&self) -> &BeaconRangingEstimator {
        &self.ranging
    }

    /// Last reported size of the view hosting the floor plan.
    pub fn container(&self) -> Option<Size> {
        self.gestures.container()
    }

    /// Current availability of `capability`.
    pub fn availability(&self, capability: Capability) -> Availability {
        match capability {
            Capability::Compass => self.compass,
            Capability::Bluetooth => self.bluetooth,
        }
    }

    /// Returns a sender for queueing events from other threads.
    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    /// Handles every queued event. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Registers an observer for all future notifications.
    pub fn subscribe(&mut self, observer: impl FnMut(&Notification) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    /// Processes one event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Gesture(primitive) => {
                let revision = self.viewport.revision();
                let outcome = self.gestures.handle(&mut self.viewport, &primitive);
                self.notify_if_moved(revision);
                match outcome {
                    Some(GestureEvent::Tap {
                        location,
                        normalized,
                    }) => self.notify(&Notification::Tapped {
                        location,
                        normalized,
                    }),
                    Some(other) => tracing::trace!(?other, "gesture finished"),
                    None => {}
                }
            }
            InputEvent::Heading(sample) => self.ingest_heading(&sample),
            InputEvent::Scan(scan) => self.ingest_scan(&scan),
            InputEvent::Availability {
                capability,
                availability,
            } => self.set_availability(capability, availability),
            InputEvent::ContainerResized(size) => {
                if let Err(err) = self.gestures.set_container(size) {
                    tracing::warn!(%err, "ignoring container resize");
                }
            }
        }
    }

    /// Returns the viewport to its initial state, abandoning any gesture.
    pub fn reset_viewport(&mut self) {
        let revision = self.viewport.revision();
        self.gestures.cancel_all();
        self.viewport.reset_transform();
        self.notify_if_moved(revision);
    }

    /// Fits `content` inside the container. Returns the chosen scale.
    pub fn fit_to_bounds(&mut self, content: Size) -> Result<f64, SessionError> {
        let container = self.container().ok_or(SessionError::NoContainer)?;
        let revision = self.viewport.revision();
        self.gestures.cancel_all();
        let scale = self.viewport.fit_to_bounds(content, container)?;
        self.notify_if_moved(revision);
        Ok(scale)
    }

    /// Forgets the smoothed heading, as when the compass is restarted.
    pub fn restart_compass(&mut self) {
        self.heading.reset();
        tracing::debug!("compass restarted");
    }

    /// Forgets every beacon estimate, as when scanning is restarted.
    pub fn restart_scan(&mut self) {
        self.ranging.reset();
        tracing::debug!("scan restarted");
    }

    /// Beacons placed on the map.
    pub fn beacon_pins(&self) -> &[BeaconPin] {
        &self.beacon_pins
    }

    /// Places a beacon, replacing any pin with the same id.
    pub fn place_beacon(&mut self, pin: BeaconPin) {
        match self
            .beacon_pins
            .iter_mut()
            .find(|existing| existing.beacon_id == pin.beacon_id)
        {
            Some(existing) => *existing = pin,
            None => self.beacon_pins.push(pin),
        }
    }

    /// Removes the pin for `beacon_id`, returning it.
    pub fn remove_beacon(&mut self, beacon_id: &str) -> Option<BeaconPin> {
        let index = self
            .beacon_pins
            .iter()
            .position(|pin| pin.beacon_id == beacon_id)?;
        Some(self.beacon_pins.remove(index))
    }

    /// Screen position of the pin for `beacon_id` under the current viewport.
    pub fn beacon_screen_position(&self, beacon_id: &str) -> Option<Point> {
        let container = self.container()?;
        let pin = self.beacon_pins.iter().find(|pin| pin.beacon_id == beacon_id)?;
        Some(self.viewport.normalized_to_view(pin.position, container))
    }

    /// Measurement lines on the map.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Adds a measurement line.
    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Real-world extent of the floor plan, if calibrated.
    pub fn calibration(&self) -> Option<MapCalibration> {
        self.calibration
    }

    /// Sets the real-world extent of the floor plan. Invalid extents clear it.
    pub fn set_calibration(&mut self, calibration: MapCalibration) {
        if calibration.is_valid() {
            self.calibration = Some(calibration);
        } else {
            tracing::warn!(?calibration, "ignoring invalid calibration");
            self.calibration = None;
        }
    }

    /// Snapshot of everything that is persisted.
    pub fn document(&self) -> MapDocument {
        MapDocument {
            viewport: Some(self.viewport.state()),
            beacon_pins: self.beacon_pins.clone(),
            measurements: self.measurements.clone(),
            calibration: self.calibration,
        }
    }

    /// Persists the viewport and the markers.
    pub fn save<S: KeyValueStore>(&self, store: &mut MapStore<S>) -> Result<(), SessionError> {
        store.save_document(&self.document())?;
        Ok(())
    }

    /// Loads the markers and the viewport saved by [`save`](Self::save).
    ///
    /// Unreadable records are skipped. The saved viewport goes through the
    /// usual clamping, so limits tightened since the save still hold.
    pub fn restore<S: KeyValueStore>(&mut self, store: &MapStore<S>) -> Result<(), SessionError> {
        let document = store.load_document();
        self.beacon_pins = document.beacon_pins;
        self.measurements = document.measurements;
        self.calibration = document.calibration;
        if let Some(state) = document.viewport {
            let revision = self.viewport.revision();
            self.gestures.cancel_all();
            let restored = self.viewport.restore(state);
            self.notify_if_moved(revision);
            restored?;
        }
        Ok(())
    }

    fn ingest_heading(&mut self, sample: &HeadingSample) {
        if self.compass == Availability::Unavailable {
            tracing::debug!("dropping heading while compass is unavailable");
            return;
        }
        if let Ok(heading) = self.heading.ingest_sample(sample) {
            self.notify(&Notification::HeadingUpdated(heading));
        }
    }

    fn ingest_scan(&mut self, scan: &ScanSample) {
        if self.bluetooth == Availability::Unavailable {
            tracing::debug!(
                beacon_id = scan.peripheral_name.as_str(),
                "dropping scan while bluetooth is unavailable"
            );
            return;
        }
        let sample = BeaconSample::from_scan(scan);
        if let Ok(reading) = self.ranging.ingest_sample(&sample) {
            self.notify(&Notification::BeaconUpdated {
                beacon_id: sample.beacon_id,
                reading,
            });
        }
    }

    fn set_availability(&mut self, capability: Capability, availability: Availability) {
        let slot = match capability {
            Capability::Compass => &mut self.compass,
            Capability::Bluetooth => &mut self.bluetooth,
        };
        if *slot == availability {
            return;
        }
        *slot = availability;
        tracing::debug!(?capability, ?availability, "availability changed");
        self.notify(&Notification::AvailabilityChanged {
            capability,
            availability,
        });
    }

    fn notify_if_moved(&mut self, revision: u64) {
        if self.viewport.revision() != revision {
            self.notify(&Notification::ViewportChanged(self.viewport.state()));
        }
    }

    fn notify(&mut self, notification: &Notification) {
        for (_, observer) in &mut self.observers {
            observer(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use floormark_store::model::BeaconPin;
    use floormark_viewport::NormalizedPoint;
    use kurbo::{Point, Size};

    use super::{MapSession, SessionError};
    use crate::InputEvent;

    #[test]
    fn fit_needs_a_container() {
        let mut session = MapSession::default();
        assert!(matches!(
            session.fit_to_bounds(Size::new(100.0, 100.0)),
            Err(SessionError::NoContainer)
        ));
    }

    #[test]
    fn placing_a_beacon_twice_moves_it() {
        let mut session = MapSession::default();
        session.place_beacon(BeaconPin::new("b", NormalizedPoint::ORIGIN));
        session.place_beacon(BeaconPin::new("b", NormalizedPoint::CENTER));
        assert_eq!(session.beacon_pins().len(), 1);
        assert_eq!(session.beacon_pins()[0].position, NormalizedPoint::CENTER);
        assert!(session.remove_beacon("b").is_some());
        assert!(session.remove_beacon("b").is_none());
    }

    #[test]
    fn pins_follow_the_viewport_on_screen() {
        let mut session = MapSession::default();
        session.handle(InputEvent::ContainerResized(Size::new(200.0, 100.0)));
        session.place_beacon(BeaconPin::new("b", NormalizedPoint::CENTER));
        assert_eq!(
            session.beacon_screen_position("b"),
            Some(Point::new(100.0, 50.0))
        );
        assert_eq!(session.beacon_screen_position("missing"), None);
    }

    #[test]
    fn unsubscribe_reports_unknown_ids() {
        let mut session = MapSession::default();
        let id = session.subscribe(|_| {});
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
    }
}
