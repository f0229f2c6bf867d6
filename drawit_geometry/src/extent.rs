// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated axis-aligned rectangles.

use crate::IntPoint;

/// Reasons an [`Extent`] cannot be constructed.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtentError {
    /// The requested width is zero or negative.
    #[error("width {0} is not positive")]
    NonPositiveWidth(i32),
    /// The requested height is zero or negative.
    #[error("height {0} is not positive")]
    NonPositiveHeight(i32),
    /// `left + width` does not fit in an `i32`.
    #[error("left {left} + width {width} exceeds i32::MAX")]
    RightOverflow {
        /// Requested left edge.
        left: i32,
        /// Requested width.
        width: i32,
    },
    /// `top + height` does not fit in an `i32`.
    #[error("top {top} + height {height} exceeds i32::MAX")]
    BottomOverflow {
        /// Requested top edge.
        top: i32,
        /// Requested height.
        height: i32,
    },
    /// The right edge is not strictly to the right of the left edge.
    #[error("right {right} is not greater than left {left}")]
    RightNotGreaterThanLeft {
        /// Requested left edge.
        left: i32,
        /// Requested right edge.
        right: i32,
    },
    /// The bottom edge is not strictly below the top edge.
    #[error("bottom {bottom} is not greater than top {top}")]
    BottomNotGreaterThanTop {
        /// Requested top edge.
        top: i32,
        /// Requested bottom edge.
        bottom: i32,
    },
    /// `right - left` does not fit in an `i32`.
    #[error("width from {left} to {right} exceeds i32::MAX")]
    WidthOverflow {
        /// Requested left edge.
        left: i32,
        /// Requested right edge.
        right: i32,
    },
    /// `bottom - top` does not fit in an `i32`.
    #[error("height from {top} to {bottom} exceeds i32::MAX")]
    HeightOverflow {
        /// Requested top edge.
        top: i32,
        /// Requested bottom edge.
        bottom: i32,
    },
    /// A bounding box was requested for an empty set of points.
    #[error("no points to bound")]
    NoPoints,
}

/// A non-empty axis-aligned rectangle with integer edges.
///
/// Invariants, checked by every constructor:
/// - `left < right` and `top < bottom`;
/// - `right - left` and `bottom - top` fit in an `i32`.
///
/// Extents are immutable: the `with_*` methods return a revalidated copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Extent {
    /// Create an extent from its top-left corner and its size.
    pub fn from_left_top_width_height(
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    ) -> Result<Self, ExtentError> {
        if width <= 0 {
            return Err(ExtentError::NonPositiveWidth(width));
        }
        if height <= 0 {
            return Err(ExtentError::NonPositiveHeight(height));
        }
        let right = left
            .checked_add(width)
            .ok_or(ExtentError::RightOverflow { left, width })?;
        let bottom = top
            .checked_add(height)
            .ok_or(ExtentError::BottomOverflow { top, height })?;
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Create an extent from its four edges.
    pub fn from_left_top_right_bottom(
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) -> Result<Self, ExtentError> {
        if right <= left {
            return Err(ExtentError::RightNotGreaterThanLeft { left, right });
        }
        if bottom <= top {
            return Err(ExtentError::BottomNotGreaterThanTop { top, bottom });
        }
        if right.checked_sub(left).is_none() {
            return Err(ExtentError::WidthOverflow { left, right });
        }
        if bottom.checked_sub(top).is_none() {
            return Err(ExtentError::HeightOverflow { top, bottom });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// The smallest extent containing every given point.
    ///
    /// Fails if there are no points, or if the points span zero width or height.
    pub fn bounding_box<I>(points: I) -> Result<Self, ExtentError>
    where
        I: IntoIterator<Item = IntPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next().ok_or(ExtentError::NoPoints)?;
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for p in points {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }
        Self::from_left_top_right_bottom(left, top, right, bottom)
    }

    /// The smallest extent containing both `self` and `other`.
    pub fn union(self, other: Self) -> Result<Self, ExtentError> {
        Self::from_left_top_right_bottom(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.left
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.right
    }

    /// Bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Width; always positive.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height; always positive.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Top-left corner.
    #[inline]
    pub const fn top_left(&self) -> IntPoint {
        IntPoint::new(self.left, self.top)
    }

    /// Bottom-right corner.
    #[inline]
    pub const fn bottom_right(&self) -> IntPoint {
        IntPoint::new(self.right, self.bottom)
    }

    /// Whether `point` lies inside or on the boundary of this extent.
    #[inline]
    pub const fn contains(&self, point: IntPoint) -> bool {
        self.left <= point.x
            && point.x <= self.right
            && self.top <= point.y
            && point.y <= self.bottom
    }

    /// A copy with the left edge moved; the right edge stays put.
    pub fn with_left(&self, left: i32) -> Result<Self, ExtentError> {
        Self::from_left_top_right_bottom(left, self.top, self.right, self.bottom)
    }

    /// A copy with the top edge moved; the bottom edge stays put.
    pub fn with_top(&self, top: i32) -> Result<Self, ExtentError> {
        Self::from_left_top_right_bottom(self.left, top, self.right, self.bottom)
    }

    /// A copy with the right edge moved; the left edge stays put.
    pub fn with_right(&self, right: i32) -> Result<Self, ExtentError> {
        Self::from_left_top_right_bottom(self.left, self.top, right, self.bottom)
    }

    /// A copy with the bottom edge moved; the top edge stays put.
    pub fn with_bottom(&self, bottom: i32) -> Result<Self, ExtentError> {
        Self::from_left_top_right_bottom(self.left, self.top, self.right, bottom)
    }

    /// A copy with a new width, keeping the left edge.
    pub fn with_width(&self, width: i32) -> Result<Self, ExtentError> {
        Self::from_left_top_width_height(self.left, self.top, width, self.height())
    }

    /// A copy with a new height, keeping the top edge.
    pub fn with_height(&self, height: i32) -> Result<Self, ExtentError> {
        Self::from_left_top_width_height(self.left, self.top, self.width(), height)
    }
}
