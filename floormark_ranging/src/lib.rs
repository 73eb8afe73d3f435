// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floormark Ranging: estimate beacon distance from received signal strength.
//!
//! A beacon placed on the floor plan broadcasts in two formats ("slots"):
//! iBeacon (Slot0) and Eddystone UID (Slot1). Scans deliver a raw RSSI per
//! advertisement. This crate turns that noisy stream into a stable distance
//! per beacon:
//!
//! - [`slot`]: classify an advertisement payload as Slot0, Slot1 or unknown.
//! - [`estimator`]: per-beacon outlier rejection, bounded RSSI history, the
//!   calibrated log-distance formula and exponential smoothing.
//!
//! ## Minimal example
//!
//! ```rust
//! use floormark_ranging::estimator::{BeaconRangingEstimator, RangingConfig};
//! use floormark_ranging::slot::SlotType;
//!
//! let mut ranging = BeaconRangingEstimator::new(RangingConfig::default());
//!
//! // -80 dBm is the calibrated one-meter reading: 1.25 m after the formula.
//! let reading = ranging.ingest("entrance", -80, SlotType::Slot0).unwrap();
//! assert!((reading.distance_meters - 1.25).abs() < 1e-9);
//!
//! // Later readings are blended into the previous distance.
//! let reading = ranging.ingest("entrance", -90, SlotType::Slot0).unwrap();
//! assert!((reading.distance_meters - (0.7 * 1.25 + 0.3 * 2.5)).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod estimator;
pub mod slot;
