// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The inner/outer coordinate map of a shape group.

use drawit_geometry::{Extent, IntPoint, IntVector};
use kurbo::{Affine, Vec2};

/// The transform a shape group applies to its contents.
///
/// It is the unique per-axis scale plus translation that carries the group's original
/// extent (inner coordinates) onto its current extent (outer coordinates).
///
/// Integer conversions scale through an `i64` intermediate and truncate toward zero, so
/// they are not exact inverses of each other once the extents differ in size:
///
/// ```rust
/// use drawit_geometry::{Extent, IntVector};
/// use drawit_shape_group::ExtentTransform;
///
/// let original = Extent::from_left_top_width_height(0, 0, 20, 20).unwrap();
/// let current = Extent::from_left_top_width_height(0, 0, 30, 10).unwrap();
/// let tf = ExtentTransform::new(original, current);
///
/// let inner = tf.outer_to_inner_vector(IntVector::new(3, -1));
/// assert_eq!(inner, IntVector::new(2, -2));
/// assert_eq!(tf.inner_to_outer_vector(inner), IntVector::new(3, -1));
///
/// let inner = tf.outer_to_inner_vector(IntVector::new(4, 0));
/// assert_eq!(inner, IntVector::new(2, 0));
/// assert_eq!(tf.inner_to_outer_vector(inner), IntVector::new(3, 0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtentTransform {
    original: Extent,
    current: Extent,
}

impl ExtentTransform {
    /// The transform carrying `original` onto `current`.
    pub const fn new(original: Extent, current: Extent) -> Self {
        Self { original, current }
    }

    /// The identity transform of a group that has not been moved.
    pub const fn identity(extent: Extent) -> Self {
        Self::new(extent, extent)
    }

    /// The extent in inner coordinates.
    pub const fn original(&self) -> Extent {
        self.original
    }

    /// The extent in outer coordinates.
    pub const fn current(&self) -> Extent {
        self.current
    }

    /// Whether the transform only translates (both extents have the same size).
    ///
    /// Point conversions through a translation round-trip exactly.
    pub const fn is_translation(&self) -> bool {
        self.original.width() == self.current.width()
            && self.original.height() == self.current.height()
    }

    /// Convert a displacement from outer to inner coordinates.
    pub fn outer_to_inner_vector(&self, v: IntVector) -> IntVector {
        IntVector::new(
            scale_axis(v.x, self.original.width(), self.current.width()),
            scale_axis(v.y, self.original.height(), self.current.height()),
        )
    }

    /// Convert a displacement from inner to outer coordinates.
    pub fn inner_to_outer_vector(&self, v: IntVector) -> IntVector {
        IntVector::new(
            scale_axis(v.x, self.current.width(), self.original.width()),
            scale_axis(v.y, self.current.height(), self.original.height()),
        )
    }

    /// Convert a location from outer to inner coordinates.
    pub fn outer_to_inner_point(&self, p: IntPoint) -> IntPoint {
        self.original.top_left() + self.outer_to_inner_vector(p - self.current.top_left())
    }

    /// Convert a location from inner to outer coordinates.
    pub fn inner_to_outer_point(&self, p: IntPoint) -> IntPoint {
        self.current.top_left() + self.inner_to_outer_vector(p - self.original.top_left())
    }

    /// Per-axis scale factors from inner to outer, as floating point.
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            f64::from(self.current.width()) / f64::from(self.original.width()),
            f64::from(self.current.height()) / f64::from(self.original.height()),
        )
    }

    /// The inner-to-outer map as an [`Affine`].
    ///
    /// This is the product of the three transforms a group pushes when drawing:
    /// translate to the current top-left, scale, translate away from the original top-left.
    pub fn to_affine(&self) -> Affine {
        let scale = self.scale();
        Affine::translate(self.current.top_left().as_point().to_vec2())
            * Affine::scale_non_uniform(scale.x, scale.y)
            * Affine::translate(-self.original.top_left().as_point().to_vec2())
    }
}

/// `value * numerator / denominator`, truncated toward zero and narrowed to `i32`.
///
/// `denominator` is an extent size, so it is always positive.
#[allow(
    clippy::cast_possible_truncation,
    reason = "scaled coordinates wrap to i32 like the rest of the integer pipeline"
)]
fn scale_axis(value: i32, numerator: i32, denominator: i32) -> i32 {
    (i64::from(value) * i64::from(numerator) / i64::from(denominator)) as i32
}
