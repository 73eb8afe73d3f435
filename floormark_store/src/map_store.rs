// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floormark_viewport::ViewportState;
use kurbo::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::KeyValueStore;
use crate::model::{BeaconPin, MapCalibration, Measurement};

/// Keys under which records are stored.
pub mod keys {
    /// Last viewport state.
    pub const VIEWPORT: &str = "viewport.state";
    /// Beacon pins, as a JSON array.
    pub const BEACON_PINS: &str = "markers.beacons";
    /// Measurement lines, as a JSON array.
    pub const MEASUREMENTS: &str = "markers.measurements";
    /// Map calibration.
    pub const CALIBRATION: &str = "map.calibration";
}

/// Failure to persist a record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record could not be encoded.
    #[error("failed to encode {key}")]
    Encode {
        /// Key being written.
        key: &'static str,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
}

/// Everything persisted for one floor plan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapDocument {
    /// Viewport to restore, if one was saved.
    pub viewport: Option<ViewportState>,
    /// Placed beacons.
    pub beacon_pins: Vec<BeaconPin>,
    /// Measurement lines.
    pub measurements: Vec<Measurement>,
    /// Image calibration, if known.
    pub calibration: Option<MapCalibration>,
}

#[derive(Serialize, Deserialize)]
struct ViewportRecord {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    rotation_degrees: f64,
}

impl From<&ViewportState> for ViewportRecord {
    fn from(state: &ViewportState) -> Self {
        Self {
            scale: state.scale,
            offset_x: state.offset.x,
            offset_y: state.offset.y,
            rotation_degrees: state.rotation_degrees,
        }
    }
}

impl From<ViewportRecord> for ViewportState {
    fn from(record: ViewportRecord) -> Self {
        Self {
            scale: record.scale,
            offset: Vec2::new(record.offset_x, record.offset_y),
            rotation_degrees: record.rotation_degrees,
        }
    }
}

/// Typed records on top of a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct MapStore<S> {
    store: S,
}

impl<S: KeyValueStore> MapStore<S> {
    /// Wraps a key-value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Unwraps the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Saves the viewport state.
    pub fn save_viewport(&mut self, state: &ViewportState) -> Result<(), StoreError> {
        self.write(keys::VIEWPORT, &ViewportRecord::from(state))
    }

    /// Loads the viewport state.
    ///
    /// Returns `None` when nothing was saved or the record is unreadable. The
    /// values are not clamped here; restore them through the viewport.
    pub fn load_viewport(&self) -> Option<ViewportState> {
        self.read::<ViewportRecord>(keys::VIEWPORT).map(ViewportState::from)
    }

    /// Saves the beacon pins, replacing any saved list.
    pub fn save_beacon_pins(&mut self, pins: &[BeaconPin]) -> Result<(), StoreError> {
        self.write(keys::BEACON_PINS, pins)
    }

    /// Loads the beacon pins, skipping malformed entries.
    pub fn load_beacon_pins(&self) -> Vec<BeaconPin> {
        self.read_list(keys::BEACON_PINS)
    }

    /// Saves the measurements, replacing any saved list.
    pub fn save_measurements(&mut self, measurements: &[Measurement]) -> Result<(), StoreError> {
        self.write(keys::MEASUREMENTS, measurements)
    }

    /// Loads the measurements, skipping malformed entries.
    pub fn load_measurements(&self) -> Vec<Measurement> {
        self.read_list(keys::MEASUREMENTS)
    }

    /// Saves the map calibration.
    pub fn save_calibration(&mut self, calibration: &MapCalibration) -> Result<(), StoreError> {
        self.write(keys::CALIBRATION, calibration)
    }

    /// Loads the map calibration, ignoring non-positive extents.
    pub fn load_calibration(&self) -> Option<MapCalibration> {
        let calibration = self.read::<MapCalibration>(keys::CALIBRATION)?;
        if calibration.is_valid() {
            Some(calibration)
        } else {
            tracing::warn!(
                key = keys::CALIBRATION,
                ?calibration,
                "ignoring invalid calibration"
            );
            None
        }
    }

    /// Deletes the saved viewport.
    pub fn clear_viewport(&mut self) {
        self.store.remove(keys::VIEWPORT);
    }

    /// Deletes the saved calibration.
    pub fn clear_calibration(&mut self) {
        self.store.remove(keys::CALIBRATION);
    }

    /// Replaces every record with the contents of `document`.
    ///
    /// Absent optional records are deleted, so loading afterwards returns
    /// `document` again.
    pub fn save_document(&mut self, document: &MapDocument) -> Result<(), StoreError> {
        match &document.viewport {
            Some(viewport) => self.save_viewport(viewport)?,
            None => self.clear_viewport(),
        }
        self.save_beacon_pins(&document.beacon_pins)?;
        self.save_measurements(&document.measurements)?;
        match &document.calibration {
            Some(calibration) => self.save_calibration(calibration)?,
            None => self.clear_calibration(),
        }
        Ok(())
    }

    /// Loads every record; whatever is readable is returned.
    pub fn load_document(&self) -> MapDocument {
        MapDocument {
            viewport: self.load_viewport(),
            beacon_pins: self.load_beacon_pins(),
            measurements: self.load_measurements(),
            calibration: self.load_calibration(),
        }
    }

    fn write<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(value).map_err(|source| StoreError::Encode { key, source })?;
        self.store.set(key, bytes);
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        let bytes = self.store.get(key)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, %err, "ignoring unreadable record");
                None
            }
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &'static str) -> Vec<T> {
        let Some(items) = self.read::<Vec<serde_json::Value>>(key) else {
            return Vec::new();
        };
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(key, index, %err, "skipping malformed record");
                    None
                }
            })
            .collect()
    }
}
