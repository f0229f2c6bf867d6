// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawit Geometry: integer points, displacement vectors, and validated extents.
//!
//! These are the value types the Drawit shape-group tree is measured in.
//!
//! - [`IntPoint`]: a location in some coordinate system.
//! - [`IntVector`]: a displacement between two locations. Cross and dot products are
//!   computed in `i64`, so they never overflow.
//! - [`Extent`]: a non-empty axis-aligned rectangle. Every constructor validates that the
//!   rectangle has positive area and that its width, height, right, and bottom all fit in
//!   an `i32`.
//!
//! Floating-point math (rounding, angles, lengths) goes through [`kurbo`]: see
//! [`IntPoint::as_point`], [`IntPoint::from_rounded`], and [`IntVector::as_vec2`].
//!
//! ## Integer semantics
//!
//! Point and vector arithmetic wraps on `i32` overflow. Extents never overflow: any
//! operation that would produce an out-of-range edge returns an [`ExtentError`].
//!
//! ```rust
//! use drawit_geometry::{Extent, IntPoint, IntVector};
//!
//! let extent = Extent::from_left_top_width_height(390, 240, 20, 20).unwrap();
//! assert_eq!(extent.bottom_right(), IntPoint::new(410, 260));
//! assert!(extent.contains(IntPoint::new(410, 240)));
//!
//! let moved = extent.top_left() + IntVector::new(10, 15);
//! assert_eq!(moved, IntPoint::new(400, 255));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod extent;
mod point;

pub use extent::{Extent, ExtentError};
pub use point::{IntPoint, IntVector};
