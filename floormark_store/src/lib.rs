// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floormark Store: persist the viewport and the markers placed on a floor plan.
//!
//! The host platform provides a plain key-value store (bytes keyed by string).
//! This crate layers typed records on top of it:
//!
//! - [`KeyValueStore`]: the storage contract, with [`MemoryStore`] as an
//!   in-process implementation.
//! - [`model`]: beacon pins, measurements and the map calibration.
//! - [`MapStore`]: typed save/load of every record, encoded as JSON.
//!
//! Loading is lenient. Lists are decoded element by element and malformed
//! elements (missing fields, wrong types, coordinates outside the content)
//! are skipped with a warning, so one bad record never hides the rest.
//!
//! ```rust
//! use floormark_store::model::BeaconPin;
//! use floormark_store::{MapStore, MemoryStore};
//! use floormark_viewport::NormalizedPoint;
//!
//! let mut store = MapStore::new(MemoryStore::default());
//! let pins = vec![BeaconPin::new("entrance", NormalizedPoint::new(0.1, 0.9))];
//! store.save_beacon_pins(&pins).unwrap();
//! assert_eq!(store.load_beacon_pins(), pins);
//! ```

mod kv;
mod map_store;
pub mod model;

pub use kv::{KeyValueStore, MemoryStore};
pub use map_store::{MapDocument, MapStore, StoreError, keys};
