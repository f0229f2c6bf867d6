// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle and view types for shape groups.

/// Identifier for a shape group in a [`ShapeGroups`](crate::ShapeGroups) store (generational).
///
/// A handle becomes stale when the tree containing its group is removed; stale handles
/// are rejected with [`GroupError::UnknownGroup`](crate::GroupError::UnknownGroup).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GroupId(pub(crate) u32, pub(crate) u32);

impl GroupId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Borrowed view of what a group directly contains.
#[derive(Debug)]
pub enum GroupKind<'a, S> {
    /// A leaf group and its shape.
    Leaf(&'a S),
    /// A non-leaf group and its subgroups, front to back.
    Internal(&'a [GroupId]),
}

// Manual impls: the view is copyable whatever `S` is.
impl<S> Clone for GroupKind<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for GroupKind<'_, S> {}
