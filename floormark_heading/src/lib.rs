// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floormark Heading: smooth noisy compass headings.
//!
//! Compass readings jitter by several degrees and wrap from 359° to 0°. A naive
//! average of 358° and 2° gives 180°, the opposite direction. [`HeadingSmoother`]
//! filters on the unit circle instead, always turning the short way round.
//!
//! Samples whose reported accuracy is negative (invalid) or worse than
//! [`HeadingConfig::max_accuracy_degrees`] are rejected and leave the filter
//! untouched.
//!
//! ```rust
//! use floormark_heading::{HeadingConfig, HeadingSmoother};
//!
//! let mut compass = HeadingSmoother::new(HeadingConfig::default());
//! compass.ingest(358.0, 5.0).unwrap();
//! let heading = compass.ingest(2.0, 5.0).unwrap();
//!
//! // Moved forward across north, not back through south.
//! assert!(heading.degrees > 358.0);
//! assert!(!heading.accuracy_warning);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod sample;
mod smoother;

pub use sample::{HeadingSample, NorthReference};
pub use smoother::{
    HeadingConfig, HeadingRejected, HeadingSmoother, HeadingState, SmoothedHeading,
};
