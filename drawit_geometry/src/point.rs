// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer points and displacement vectors.

use core::ops::{Add, Neg, Sub};

use kurbo::{Point, Vec2};

/// A location in the two-dimensional integer plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: i32,
    /// Vertical coordinate, growing downward.
    pub y: i32,
}

impl IntPoint {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a point from its coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The same location as a floating-point [`Point`].
    #[inline]
    pub fn as_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Round a floating-point point to the nearest integer point.
    ///
    /// Halfway cases round away from zero. Coordinates outside the `i32` range saturate.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "rounded coordinates saturate at the i32 range"
    )]
    pub fn from_rounded(point: Point) -> Self {
        let rounded = point.round();
        Self::new(rounded.x as i32, rounded.y as i32)
    }
}

impl Add<IntVector> for IntPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: IntVector) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub<IntVector> for IntPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: IntVector) -> Self {
        Self::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl Sub for IntPoint {
    type Output = IntVector;

    #[inline]
    fn sub(self, rhs: Self) -> IntVector {
        IntVector::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl From<(i32, i32)> for IntPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A displacement in the two-dimensional integer plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntVector {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl IntVector {
    /// The zero displacement.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a vector from its components.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cross product `self.x * other.y - self.y * other.x`, computed without overflow.
    #[inline]
    pub const fn cross(self, other: Self) -> i64 {
        self.x as i64 * other.y as i64 - self.y as i64 * other.x as i64
    }

    /// Dot product, computed without overflow.
    #[inline]
    pub const fn dot(self, other: Self) -> i64 {
        self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64
    }

    /// Whether `self` and `other` lie on a common line through the origin.
    #[inline]
    pub const fn is_collinear_with(self, other: Self) -> bool {
        self.cross(other) == 0
    }

    /// The same displacement as a floating-point [`Vec2`].
    ///
    /// Use the result for lengths ([`Vec2::hypot`]) and angles ([`Vec2::atan2`]).
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Add for IntVector {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for IntVector {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl Neg for IntVector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(self.x.wrapping_neg(), self.y.wrapping_neg())
    }
}

impl From<(i32, i32)> for IntVector {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
