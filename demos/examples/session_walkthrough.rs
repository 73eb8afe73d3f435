// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session walkthrough.
//!
//! Feed a `MapSession` the events a floor-plan screen would see: a container
//! size, a pinch, a short pan that turns into a tap, compass readings and a
//! few beacon advertisements from a scanner thread. Then save and restore.
//!
//! Run:
//! - `cargo run -p floormark_demos --example session_walkthrough`
//! - `RUST_LOG=debug cargo run -p floormark_demos --example session_walkthrough`

use std::thread;

use floormark::{InputEvent, MapSession, Notification};
use floormark_gesture::primitive::{GesturePhase, GesturePrimitive};
use floormark_heading::HeadingSample;
use floormark_ranging::slot::{AdvertisementPayload, ScanSample, ServiceData};
use floormark_store::model::BeaconPin;
use floormark_store::{MapStore, MemoryStore};
use floormark_viewport::NormalizedPoint;
use kurbo::{Point, Size, Vec2};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut session = MapSession::default();
    session.subscribe(|notification| match notification {
        Notification::ViewportChanged(state) => println!(
            "viewport: scale {:.2}, offset ({:.1}, {:.1}), rotation {:.1}°",
            state.scale, state.offset.x, state.offset.y, state.rotation_degrees
        ),
        Notification::Tapped {
            location,
            normalized,
        } => println!("tap at {location:?} -> {normalized:?}"),
        Notification::HeadingUpdated(heading) => println!(
            "heading {:.1}° (±{:.0}°{})",
            heading.degrees,
            heading.accuracy_degrees,
            if heading.accuracy_warning { ", calibrate" } else { "" }
        ),
        Notification::BeaconUpdated { beacon_id, reading } => println!(
            "{beacon_id}: {:.2} m at {} dBm",
            reading.distance_meters, reading.rssi
        ),
        Notification::AvailabilityChanged {
            capability,
            availability,
        } => println!("{capability:?} is {availability:?}"),
    });

    session.handle(InputEvent::ContainerResized(Size::new(390.0, 844.0)));
    session.place_beacon(BeaconPin::new("lobby", NormalizedPoint::new(0.25, 0.75)));

    // Pinch out around a point above the center.
    let focal = Point::new(195.0, 300.0);
    for (phase, scale) in [
        (GesturePhase::Began, 1.0),
        (GesturePhase::Changed, 1.4),
        (GesturePhase::Ended, 1.8),
    ] {
        session.handle(InputEvent::Gesture(GesturePrimitive::pinch(phase, scale, focal)));
    }

    // A finger that barely moves is a tap.
    let finger = Point::new(120.0, 500.0);
    session.handle(InputEvent::Gesture(GesturePrimitive::pan(
        GesturePhase::Began,
        Vec2::ZERO,
        finger,
    )));
    session.handle(InputEvent::Gesture(GesturePrimitive::pan(
        GesturePhase::Ended,
        Vec2::new(3.0, 2.0),
        finger,
    )));

    for (degrees, accuracy) in [(356.0, 5.0), (2.0, 5.0), (4.0, 18.0), (90.0, 40.0)] {
        session.handle(InputEvent::Heading(HeadingSample {
            true_heading_degrees: Some(degrees),
            magnetic_heading_degrees: degrees,
            accuracy_degrees: accuracy,
        }));
    }

    let sender = session.sender();
    let scanner = thread::spawn(move || {
        let eddystone = AdvertisementPayload {
            manufacturer_data: None,
            service_data: vec![ServiceData {
                uuid: "FEAA".into(),
                data: vec![0x00, 0xF4],
            }],
        };
        for rssi in [-78, -81, -79, -30, -83] {
            let scan = ScanSample {
                peripheral_name: "lobby".into(),
                rssi,
                advertisement: eddystone.clone(),
            };
            if sender.send(InputEvent::Scan(scan)).is_err() {
                break;
            }
        }
    });
    if scanner.join().is_err() {
        tracing::error!("scanner thread panicked");
    }
    let handled = session.pump();
    tracing::info!(handled, "drained scanner events");

    if let Some(pin) = session.beacon_screen_position("lobby") {
        println!("lobby pin drawn at ({:.1}, {:.1})", pin.x, pin.y);
    }

    let mut store = MapStore::new(MemoryStore::default());
    if let Err(err) = session.save(&mut store) {
        tracing::error!(%err, "save failed");
        return;
    }
    let mut reopened = MapSession::default();
    match reopened.restore(&store) {
        Ok(()) => println!(
            "restored scale {:.2} with {} pin(s)",
            reopened.viewport().scale(),
            reopened.beacon_pins().len()
        ),
        Err(err) => tracing::error!(%err, "restore failed"),
    }
}
