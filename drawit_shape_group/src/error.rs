// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`ShapeGroups`](crate::ShapeGroups).

use drawit_geometry::ExtentError;

use crate::GroupId;

/// Coarse classification of a [`GroupError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument was invalid: a stale handle, a bad index, or subgroups that cannot be
    /// grouped.
    Argument,
    /// The group is in a state that does not support the operation, such as reordering a
    /// root or listing the subgroups of a leaf.
    State,
}

/// Failure of a shape-group operation.
///
/// Operations that fail leave the groups unchanged.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GroupError {
    /// The handle does not refer to a live group in this store.
    #[error("{0:?} does not refer to a live shape group")]
    UnknownGroup(GroupId),
    /// A leaf needs a shape with at least three vertices.
    #[error("shape has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),
    /// A non-leaf group needs at least two subgroups.
    #[error("{0} subgroups given, at least 2 are required")]
    TooFewSubgroups(usize),
    /// The same subgroup was listed twice.
    #[error("{0:?} is listed more than once")]
    DuplicateSubgroup(GroupId),
    /// A subgroup already belongs to another group.
    #[error("{child:?} already belongs to {parent:?}")]
    AlreadyHasParent {
        /// The subgroup that was passed in.
        child: GroupId,
        /// Its current parent.
        parent: GroupId,
    },
    /// A subgroup index was past the end of the subgroup list.
    #[error("index {index} is out of range for {count} subgroups")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of subgroups.
        count: usize,
    },
    /// The group's extent could not be computed.
    #[error(transparent)]
    Extent(#[from] ExtentError),
    /// The operation needs a non-leaf group.
    #[error("{0:?} is a leaf group and has no subgroups")]
    LeafGroup(GroupId),
    /// The operation needs a group with a parent.
    #[error("{0:?} has no parent group")]
    NoParent(GroupId),
    /// Only whole trees can be removed.
    #[error("{child:?} belongs to {parent:?}; only root groups can be removed")]
    NotARoot {
        /// The group that was passed in.
        child: GroupId,
        /// Its parent.
        parent: GroupId,
    },
}

impl GroupError {
    /// Whether this is an argument error or a state error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownGroup(_)
            | Self::TooFewVertices(_)
            | Self::TooFewSubgroups(_)
            | Self::DuplicateSubgroup(_)
            | Self::AlreadyHasParent { .. }
            | Self::IndexOutOfRange { .. }
            | Self::Extent(_) => ErrorKind::Argument,
            Self::LeafGroup(_) | Self::NoParent(_) | Self::NotARoot { .. } => ErrorKind::State,
        }
    }
}
