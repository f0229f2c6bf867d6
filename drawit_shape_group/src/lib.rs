// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawit Shape Group: a tree of shape groups, each with its own coordinate system.
//!
//! A drawing is a forest of groups. A *leaf group* wraps one shape; a *non-leaf group*
//! wraps an ordered list of subgroups, front to back. Every group carries two extents:
//!
//! - the *original extent*, fixed when the group is created, which also defines the
//!   group's *inner* coordinate system (the one its shape or subgroups are expressed in);
//! - the *current extent*, expressed in the group's *outer* coordinate system (the inner
//!   coordinate system of its parent, or global coordinates for a root).
//!
//! Setting the current extent moves and resizes the group. The map from inner to outer
//! coordinates translates the original top-left onto the current top-left and scales by
//! the ratio of the sizes. The outer coordinate system of a root is the global one.
//!
//! ## API overview
//!
//! - [`ShapeGroups`]: the store that owns every group and its shape.
//! - [`GroupId`]: generational handle of a group.
//! - [`GroupKind`]: borrowed view of what a group contains.
//! - [`ExtentTransform`]: the integer inner/outer map defined by a pair of extents.
//! - [`Shape`] and [`Polygon`]: what a leaf group draws.
//! - [`DrawingCommands`] and [`DrawCommand`]: the stack-machine drawing protocol.
//!
//! Key operations:
//! - [`ShapeGroups::insert_leaf`] / [`ShapeGroups::insert_group`] → [`GroupId`]
//! - [`ShapeGroups::set_extent`] changes where a group is drawn.
//! - [`ShapeGroups::to_inner_coordinates`] / [`ShapeGroups::to_global_coordinates`] and
//!   their vector variants convert across the whole path to the root.
//! - [`ShapeGroups::subgroup_at`] finds the frontmost subgroup under a point.
//! - [`ShapeGroups::bring_to_front`] / [`ShapeGroups::send_to_back`] reorder siblings.
//! - [`ShapeGroups::drawing_commands`] emits the commands for a subtree;
//!   [`DrawingCommands::resolve`] runs the transform stack over them.
//!
//! ## Integer semantics
//!
//! Coordinates are `i32`. Scaling a displacement computes `value * numerator` in `i64`,
//! divides, and truncates toward zero, so conversions through a scaled group do not
//! round-trip exactly. Only translations are exact.
//!
//! ## Errors
//!
//! Every fallible operation returns a [`GroupError`]. [`GroupError::kind`] separates
//! invalid arguments (stale handles, bad subgroup lists, out-of-range extents) from
//! calls that are invalid in the group's current state (reordering a root, asking a leaf
//! for its subgroups).
//!
//! ## Example
//!
//! ```rust
//! use drawit_geometry::{Extent, IntPoint};
//! use drawit_shape_group::{DrawCommand, Polygon, ShapeGroups};
//!
//! let mut groups = ShapeGroups::new();
//! let triangle = |x, y| {
//!     Polygon::new([
//!         IntPoint::new(x - 1, y - 1),
//!         IntPoint::new(x - 1, y + 1),
//!         IntPoint::new(x + 1, y),
//!     ])
//! };
//! let front = groups.insert_leaf(triangle(10, 10)).unwrap();
//! let back = groups.insert_leaf(triangle(20, 10)).unwrap();
//! let root = groups.insert_group(&[front, back]).unwrap();
//!
//! // Draw the whole scene twice as large at (100, 100).
//! let inner = groups.original_extent(root).unwrap();
//! let doubled =
//!     Extent::from_left_top_width_height(100, 100, inner.width() * 2, inner.height() * 2)
//!         .unwrap();
//! groups.set_extent(root, doubled).unwrap();
//!
//! assert_eq!(
//!     groups.to_global_coordinates(front, IntPoint::new(11, 10)).unwrap(),
//!     IntPoint::new(104, 102)
//! );
//!
//! let commands = groups.drawing_commands(root).unwrap();
//! assert!(matches!(commands.as_slice()[0], DrawCommand::PushTranslate(_)));
//! assert_eq!(commands.check_balanced(), Ok(()));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in Kurbo.
//! - `libm`: floating-point support for `no_std` builds through Kurbo.
//! - `tracing`: emits `tracing` events for structural changes and drawing.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod commands;
mod error;
mod groups;
mod log;
mod shape;
mod transform;
mod types;

pub use commands::{Color, CommandError, DrawCommand, DrawingCommands, ResolvedDraw};
pub use error::{ErrorKind, GroupError};
pub use groups::{DepthFirst, ShapeGroups};
pub use shape::{Polygon, Shape};
pub use transform::ExtentTransform;
pub use types::{GroupId, GroupKind};
