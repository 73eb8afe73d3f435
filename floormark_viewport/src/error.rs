// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Reasons a viewport update or query was rejected.
///
/// A rejected update never changes the viewport state.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ViewportError {
    /// A NaN or infinite value was supplied for `field`.
    #[error("non-finite {field} rejected")]
    NonFinite {
        /// Name of the rejected quantity.
        field: &'static str,
    },
    /// Zoom ratios must be strictly positive.
    #[error("zoom ratio {ratio} is not positive")]
    InvalidZoomRatio {
        /// The rejected ratio.
        ratio: f64,
    },
    /// A container or content size had a non-positive or non-finite extent.
    #[error("degenerate size {width}x{height}")]
    DegenerateSize {
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },
}
