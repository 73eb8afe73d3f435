// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-beacon distance estimation.
//!
//! ## Pipeline
//!
//! For each sample of a beacon:
//! 1) Slot1 readings are shifted by [`RangingConfig::slot1_compensation_db`] so
//!    both slots share the Slot0 calibration ("effective" RSSI).
//! 2) Outlier check: once the slot has at least
//!    [`RangingConfig::min_history`] readings and a last valid RSSI exists, a
//!    sample is an outlier when it jumps by more than
//!    [`RangingConfig::max_jump_db`] or lies outside
//!    [`RangingConfig::valid_rssi`].
//! 3) Accepted readings enter the slot's bounded history.
//! 4) Distance: `raw = reference_distance * 2^((calibrated_rssi - rssi) / 10)`,
//!    blended as `smoothed = (1 - w) * last + w * raw` and clamped into
//!    [`RangingConfig::min_distance_meters`]..[`RangingConfig::max_distance_meters`].

use alloc::collections::VecDeque;
use alloc::string::String;
use core::ops::RangeInclusive;

use hashbrown::HashMap;
use thiserror::Error;

use crate::slot::{BeaconSample, SlotType};

/// What happens to readings classified as outliers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutlierPolicy {
    /// Outliers are discarded: no history entry, no distance update.
    #[default]
    Exclude,
    /// Outliers are logged but otherwise treated as valid readings.
    LogOnly,
}

/// Calibration and filtering constants.
#[derive(Clone, Debug, PartialEq)]
pub struct RangingConfig {
    /// RSSI measured at the reference distance, in dBm.
    pub calibrated_rssi_at_1m: i32,
    /// Distance produced when the RSSI equals the calibrated value.
    pub reference_distance_meters: f64,
    /// Signal drop, in dB, that doubles the estimated distance.
    pub doubling_db: f64,
    /// Offset added to Slot1 readings before the Slot0 formula is applied.
    pub slot1_compensation_db: i32,
    /// Weight of the newest raw distance in the exponential blend.
    pub smoothing_weight: f64,
    /// Lower bound of reported distances.
    pub min_distance_meters: f64,
    /// Upper bound of reported distances.
    pub max_distance_meters: f64,
    /// Readings kept per slot.
    pub history_len: usize,
    /// Readings a slot needs before outlier checks start.
    pub min_history: usize,
    /// Largest accepted jump from the last valid RSSI, in dB.
    pub max_jump_db: i32,
    /// Plausible RSSI range in dBm.
    pub valid_rssi: RangeInclusive<i32>,
    /// Outlier handling.
    pub outlier_policy: OutlierPolicy,
}

impl RangingConfig {
    /// Sets the outlier policy.
    #[must_use]
    pub fn with_outlier_policy(mut self, policy: OutlierPolicy) -> Self {
        self.outlier_policy = policy;
        self
    }

    /// Sets the calibrated one-meter RSSI.
    #[must_use]
    pub fn with_calibrated_rssi(mut self, rssi_at_1m: i32) -> Self {
        self.calibrated_rssi_at_1m = rssi_at_1m;
        self
    }

    /// Converts an effective (Slot0-equivalent) RSSI into an unsmoothed
    /// distance.
    #[must_use]
    pub fn raw_distance(&self, effective_rssi: i32) -> f64 {
        let diff = f64::from(self.calibrated_rssi_at_1m) - f64::from(effective_rssi);
        self.reference_distance_meters * libm::exp2(diff / self.doubling_db)
    }

    /// Maps a reading onto the Slot0 calibration.
    #[must_use]
    pub fn effective_rssi(&self, rssi: i32, slot: SlotType) -> i32 {
        match slot.calculation_slot() {
            SlotType::Slot1 => rssi.saturating_add(self.slot1_compensation_db),
            _ => rssi,
        }
    }
}

impl Default for RangingConfig {
    fn default() -> Self {
        Self {
            calibrated_rssi_at_1m: -80,
            reference_distance_meters: 1.25,
            doubling_db: 10.0,
            slot1_compensation_db: -12,
            smoothing_weight: 0.3,
            min_distance_meters: 0.1,
            max_distance_meters: 20.0,
            history_len: 10,
            min_history: 2,
            max_jump_db: 25,
            valid_rssi: -110..=-20,
            outlier_policy: OutlierPolicy::Exclude,
        }
    }
}

/// Why a reading was not used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RssiRejected {
    /// The reading jumped too far from the last valid one.
    #[error("rssi {rssi} jumped from last valid {last_valid_rssi}")]
    Jump {
        /// Effective RSSI of the rejected reading.
        rssi: i32,
        /// Effective RSSI it was compared against.
        last_valid_rssi: i32,
    },
    /// The reading is outside the plausible RSSI range.
    #[error("rssi {rssi} outside plausible range")]
    OutOfRange {
        /// The rejected reading.
        rssi: i32,
    },
}

/// Latest estimate for one beacon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeaconReading {
    /// Smoothed, clamped distance.
    pub distance_meters: f64,
    /// Most recent accepted raw RSSI.
    pub rssi: i32,
}

/// Filter state for one beacon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeaconRangingState {
    slot0: VecDeque<i32>,
    slot1: VecDeque<i32>,
    last_valid_rssi: Option<i32>,
    last_rssi: Option<i32>,
    last_smoothed_distance_meters: Option<f64>,
}

impl BeaconRangingState {
    /// Accepted raw readings of `slot`, oldest first. Unknown maps to Slot0.
    #[must_use]
    pub fn recent_rssi(&self, slot: SlotType) -> &VecDeque<i32> {
        match slot.calculation_slot() {
            SlotType::Slot1 => &self.slot1,
            _ => &self.slot0,
        }
    }

    /// Last accepted reading, on the Slot0 scale.
    #[must_use]
    pub fn last_valid_rssi(&self) -> Option<i32> {
        self.last_valid_rssi
    }

    /// Last smoothed distance.
    #[must_use]
    pub fn last_smoothed_distance_meters(&self) -> Option<f64> {
        self.last_smoothed_distance_meters
    }

    /// Latest reading, once one was accepted.
    #[must_use]
    pub fn reading(&self) -> Option<BeaconReading> {
        Some(BeaconReading {
            distance_meters: self.last_smoothed_distance_meters?,
            rssi: self.last_rssi?,
        })
    }

    fn history_mut(&mut self, slot: SlotType) -> &mut VecDeque<i32> {
        match slot.calculation_slot() {
            SlotType::Slot1 => &mut self.slot1,
            _ => &mut self.slot0,
        }
    }
}

/// Tracks every beacon seen since the last scan restart.
#[derive(Clone, Debug, Default)]
pub struct BeaconRangingEstimator {
    config: RangingConfig,
    beacons: HashMap<String, BeaconRangingState>,
}

impl BeaconRangingEstimator {
    /// Creates an estimator with no tracked beacons.
    #[must_use]
    pub fn new(config: RangingConfig) -> Self {
        Self {
            config,
            beacons: HashMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RangingConfig {
        &self.config
    }

    /// Number of tracked beacons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beacons.len()
    }

    /// Returns `true` when no beacon has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beacons.is_empty()
    }

    /// Feeds a classified sample.
    pub fn ingest_sample(
        &mut self,
        sample: &BeaconSample,
    ) -> Result<BeaconReading, RssiRejected> {
        self.ingest(&sample.beacon_id, sample.rssi, sample.slot)
    }

    /// Feeds one reading for `beacon_id`.
    ///
    /// Returns the updated estimate, or why the reading was discarded. A
    /// discarded reading leaves the beacon's state untouched.
    pub fn ingest(
        &mut self,
        beacon_id: &str,
        rssi: i32,
        slot: SlotType,
    ) -> Result<BeaconReading, RssiRejected> {
        let config = &self.config;
        let state = self.beacons.entry_ref(beacon_id).or_default();
        let effective = config.effective_rssi(rssi, slot);

        if let Err(rejection) = check_outlier(config, state, rssi, effective, slot) {
            match config.outlier_policy {
                OutlierPolicy::Exclude => {
                    tracing::debug!(beacon_id, rssi, %rejection, "discarding rssi outlier");
                    return Err(rejection);
                }
                OutlierPolicy::LogOnly => {
                    tracing::debug!(beacon_id, rssi, %rejection, "keeping rssi outlier");
                }
            }
        }

        let history = state.history_mut(slot);
        history.push_back(rssi);
        while history.len() > config.history_len.max(1) {
            history.pop_front();
        }
        state.last_valid_rssi = Some(effective);
        state.last_rssi = Some(rssi);

        let raw = config.raw_distance(effective);
        let smoothed = match state.last_smoothed_distance_meters {
            Some(last) => (1.0 - config.smoothing_weight) * last + config.smoothing_weight * raw,
            None => raw,
        };
        let distance_meters =
            smoothed.clamp(config.min_distance_meters, config.max_distance_meters);
        state.last_smoothed_distance_meters = Some(distance_meters);

        tracing::trace!(beacon_id, rssi, distance_meters, "beacon ranged");
        Ok(BeaconReading {
            distance_meters,
            rssi,
        })
    }

    /// Latest estimate for `beacon_id`.
    #[must_use]
    pub fn reading(&self, beacon_id: &str) -> Option<BeaconReading> {
        self.beacons.get(beacon_id)?.reading()
    }

    /// Latest estimates for every beacon with at least one accepted reading.
    pub fn readings(&self) -> impl Iterator<Item = (&str, BeaconReading)> + '_ {
        self.beacons
            .iter()
            .filter_map(|(id, state)| Some((id.as_str(), state.reading()?)))
    }

    /// Filter state for `beacon_id`.
    #[must_use]
    pub fn state(&self, beacon_id: &str) -> Option<&BeaconRangingState> {
        self.beacons.get(beacon_id)
    }

    /// Mean of the accepted raw readings of one slot.
    #[must_use]
    pub fn mean_rssi(&self, beacon_id: &str, slot: SlotType) -> Option<f64> {
        let history = self.beacons.get(beacon_id)?.recent_rssi(slot);
        if history.is_empty() {
            return None;
        }
        let sum: f64 = history.iter().copied().map(f64::from).sum();
        let len = history.len() as f64;
        Some(sum / len)
    }

    /// Stops tracking one beacon. Returns whether it was tracked.
    pub fn forget(&mut self, beacon_id: &str) -> bool {
        self.beacons.remove(beacon_id).is_some()
    }

    /// Forgets every beacon, as when scanning restarts.
    pub fn reset(&mut self) {
        self.beacons.clear();
    }
}

fn check_outlier(
    config: &RangingConfig,
    state: &BeaconRangingState,
    rssi: i32,
    effective: i32,
    slot: SlotType,
) -> Result<(), RssiRejected> {
    let Some(last_valid_rssi) = state.last_valid_rssi else {
        return Ok(());
    };
    if state.recent_rssi(slot).len() < config.min_history {
        return Ok(());
    }
    if !config.valid_rssi.contains(&rssi) {
        return Err(RssiRejected::OutOfRange { rssi });
    }
    if effective.abs_diff(last_valid_rssi) > config.max_jump_db.unsigned_abs() {
        return Err(RssiRejected::Jump {
            rssi: effective,
            last_valid_rssi,
        });
    }
    Ok(())
}
