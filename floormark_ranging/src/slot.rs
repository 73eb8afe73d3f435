// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Advertisement classification.
//!
//! The scanner hands over the parsed advertisement fields; only two of them
//! matter here:
//! - Manufacturer data starting with Apple's company identifier (`0x004C`,
//!   little-endian on the wire) marks an iBeacon frame (Slot0).
//! - Service data for the Eddystone service (`FEAA`) whose first byte is the
//!   UID frame type (`0x00`) marks an Eddystone UID frame (Slot1).

use alloc::string::String;
use alloc::vec::Vec;

/// Bluetooth SIG company identifier carried by iBeacon frames.
pub const IBEACON_COMPANY_ID: u16 = 0x004C;
/// 16-bit service UUID of Eddystone, as text.
pub const EDDYSTONE_SERVICE_UUID: &str = "FEAA";
/// Eddystone frame type byte for UID frames.
pub const EDDYSTONE_UID_FRAME: u8 = 0x00;

/// Advertisement format a sample was received in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlotType {
    /// iBeacon.
    Slot0,
    /// Eddystone UID.
    Slot1,
    /// Neither format was recognized.
    #[default]
    Unknown,
}

impl SlotType {
    /// Slot whose calibration applies; unknown frames are treated as Slot0.
    #[must_use]
    pub fn calculation_slot(self) -> Self {
        match self {
            Self::Slot1 => Self::Slot1,
            Self::Slot0 | Self::Unknown => Self::Slot0,
        }
    }
}

/// One service-data entry of an advertisement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceData {
    /// Service UUID as text, either the 16-bit short form (`"FEAA"`) or the
    /// full 128-bit form.
    pub uuid: String,
    /// Raw service data bytes.
    pub data: Vec<u8>,
}

/// The advertisement fields relevant to slot detection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvertisementPayload {
    /// Manufacturer-specific data, company identifier first.
    pub manufacturer_data: Option<Vec<u8>>,
    /// Service-data entries.
    pub service_data: Vec<ServiceData>,
}

impl AdvertisementPayload {
    /// Classifies this payload.
    #[must_use]
    pub fn slot_type(&self) -> SlotType {
        detect_slot(self)
    }
}

/// Raw scan callback contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSample {
    /// Advertised peripheral name, used as the beacon identifier.
    pub peripheral_name: String,
    /// Received signal strength in dBm.
    pub rssi: i32,
    /// Parsed advertisement.
    pub advertisement: AdvertisementPayload,
}

/// A classified RSSI sample for one beacon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeaconSample {
    /// Beacon identifier.
    pub beacon_id: String,
    /// Received signal strength in dBm.
    pub rssi: i32,
    /// Advertisement format.
    pub slot: SlotType,
}

impl BeaconSample {
    /// Classifies a scan callback.
    #[must_use]
    pub fn from_scan(scan: &ScanSample) -> Self {
        Self {
            beacon_id: scan.peripheral_name.clone(),
            rssi: scan.rssi,
            slot: detect_slot(&scan.advertisement),
        }
    }
}

/// Classifies an advertisement payload.
///
/// iBeacon manufacturer data wins when both formats are present.
#[must_use]
pub fn detect_slot(payload: &AdvertisementPayload) -> SlotType {
    if let Some([lo, hi, ..]) = payload.manufacturer_data.as_deref() {
        if u16::from_le_bytes([*lo, *hi]) == IBEACON_COMPANY_ID {
            return SlotType::Slot0;
        }
    }
    let eddystone_uid = payload.service_data.iter().any(|entry| {
        is_eddystone_uuid(&entry.uuid) && entry.data.first() == Some(&EDDYSTONE_UID_FRAME)
    });
    if eddystone_uid {
        SlotType::Slot1
    } else {
        SlotType::Unknown
    }
}

fn is_eddystone_uuid(uuid: &str) -> bool {
    // 128-bit form: 0000FEAA-0000-1000-8000-00805F9B34FB.
    let short = uuid.get(..4);
    let long = uuid.get(4..8).filter(|_| uuid.get(..4) == Some("0000"));
    short.is_some_and(|p| p.eq_ignore_ascii_case(EDDYSTONE_SERVICE_UUID))
        || long.is_some_and(|p| p.eq_ignore_ascii_case(EDDYSTONE_SERVICE_UUID))
}
