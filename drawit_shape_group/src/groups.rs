// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core store implementation: structure, transforms, reordering, drawing.

use alloc::vec::Vec;

use drawit_geometry::{Extent, IntPoint, IntVector};
use hashbrown::HashSet;
use kurbo::Vec2;
use smallvec::SmallVec;

use crate::commands::{DrawCommand, DrawingCommands};
use crate::error::GroupError;
use crate::log::{debug, trace};
use crate::shape::{Polygon, Shape};
use crate::transform::ExtentTransform;
use crate::types::{GroupId, GroupKind};

/// Store owning every shape group of one or more trees.
///
/// Groups are addressed by [`GroupId`] handles. A leaf group wraps one shape of type
/// `S`; a non-leaf group owns an ordered list of two or more subgroups, front to back.
/// Each group also owns two extents: the *original* extent, fixed when the group is
/// created, and the *current* extent, changed with [`ShapeGroups::set_extent`]. Together
/// they define the group's [`ExtentTransform`] from its inner to its outer coordinate
/// system.
///
/// Subgroups are given their parent once, when the non-leaf group is created, and keep
/// it for their whole life, so every group belongs to exactly one tree.
///
/// ## Example
///
/// ```rust
/// use drawit_geometry::{Extent, IntPoint};
/// use drawit_shape_group::{Polygon, ShapeGroups};
///
/// let mut groups = ShapeGroups::new();
/// let a = groups
///     .insert_leaf(Polygon::new([
///         IntPoint::new(0, 0),
///         IntPoint::new(10, 0),
///         IntPoint::new(0, 10),
///     ]))
///     .unwrap();
/// let b = groups
///     .insert_leaf(Polygon::new([
///         IntPoint::new(20, 20),
///         IntPoint::new(30, 20),
///         IntPoint::new(20, 30),
///     ]))
///     .unwrap();
/// let root = groups.insert_group(&[a, b]).unwrap();
/// assert_eq!(
///     groups.original_extent(root).unwrap(),
///     Extent::from_left_top_right_bottom(0, 0, 30, 30).unwrap()
/// );
///
/// // Move `a` by (5, 5) without resizing it.
/// groups
///     .set_extent(a, Extent::from_left_top_width_height(5, 5, 10, 10).unwrap())
///     .unwrap();
/// assert_eq!(
///     groups.to_global_coordinates(a, IntPoint::new(10, 0)).unwrap(),
///     IntPoint::new(15, 5)
/// );
///
/// let commands = groups.drawing_commands(root).unwrap();
/// assert_eq!(commands.push_count(), commands.pop_count());
/// ```
pub struct ShapeGroups<S: Shape = Polygon> {
    /// slots
    nodes: Vec<Option<Node<S>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<S: Shape> core::fmt::Debug for ShapeGroups<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("ShapeGroups")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl<S: Shape> Default for ShapeGroups<S> {
    fn default() -> Self {
        Self::new()
    }
}

type Children = SmallVec<[GroupId; 4]>;

enum Content<S> {
    Leaf(S),
    Internal(Children),
}

struct Node<S> {
    generation: u32,
    parent: Option<GroupId>,
    content: Content<S>,
    original_extent: Extent,
    extent: Extent,
}

impl<S> Node<S> {
    fn transform(&self) -> ExtentTransform {
        ExtentTransform::new(self.original_extent, self.extent)
    }

    fn children(&self) -> Option<&Children> {
        match &self.content {
            Content::Leaf(_) => None,
            Content::Internal(children) => Some(children),
        }
    }
}

impl<S: Shape> ShapeGroups<S> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    // --- construction ---

    /// Create a leaf group wrapping `shape`.
    ///
    /// The group's original and current extents are the bounding box of the shape's
    /// vertices. The new group has no parent.
    ///
    /// Fails if the shape has fewer than three vertices, or if its vertices span zero
    /// width or height.
    pub fn insert_leaf(&mut self, shape: S) -> Result<GroupId, GroupError> {
        let vertices = shape.vertices();
        if vertices.len() < 3 {
            return Err(GroupError::TooFewVertices(vertices.len()));
        }
        let extent = Extent::bounding_box(vertices.iter().copied())?;
        let id = self.alloc(Content::Leaf(shape), extent);
        debug!(id = ?id, extent = ?extent, "inserted leaf group");
        Ok(id)
    }

    /// Create a non-leaf group containing `subgroups`, in the given order (front first).
    ///
    /// The group's original and current extents are the smallest extent containing the
    /// current extents of all subgroups. Each subgroup's parent becomes the new group.
    ///
    /// Fails, leaving every group untouched, if fewer than two subgroups are given, if a
    /// handle is stale, if a subgroup is listed twice, if a subgroup already has a
    /// parent, or if the union of the extents does not fit in an [`Extent`].
    pub fn insert_group(&mut self, subgroups: &[GroupId]) -> Result<GroupId, GroupError> {
        if subgroups.len() < 2 {
            return Err(GroupError::TooFewSubgroups(subgroups.len()));
        }
        let mut seen = HashSet::with_capacity(subgroups.len());
        let mut extents: SmallVec<[Extent; 4]> = SmallVec::with_capacity(subgroups.len());
        for &child in subgroups {
            let node = self.get(child)?;
            if !seen.insert(child) {
                return Err(GroupError::DuplicateSubgroup(child));
            }
            if let Some(parent) = node.parent {
                return Err(GroupError::AlreadyHasParent { child, parent });
            }
            extents.push(node.extent);
        }
        // A fresh group has no ancestors, and every subgroup is a root, so linking them
        // cannot close a cycle.
        let extent = extents[1..]
            .iter()
            .try_fold(extents[0], |acc, &extent| acc.union(extent))?;

        let children: Children = subgroups.iter().copied().collect();
        let id = self.alloc(Content::Internal(children), extent);
        for &child in subgroups {
            self.node_mut(child).parent = Some(id);
        }
        debug!(id = ?id, subgroups = subgroups.len(), extent = ?extent, "inserted group");
        Ok(id)
    }

    /// Remove a root group and every group below it.
    ///
    /// All their handles become stale, and their shapes are dropped. Fails with a state
    /// error if `id` has a parent: a non-leaf group always keeps all its subgroups.
    pub fn remove(&mut self, id: GroupId) -> Result<(), GroupError> {
        if let Some(parent) = self.get(id)?.parent {
            return Err(GroupError::NotARoot { child: id, parent });
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            let node = self.nodes[next.idx()]
                .take()
                .expect("subgroups of a live group are live");
            if let Content::Internal(children) = node.content {
                stack.extend(children);
            }
            self.free_list.push(next.idx());
        }
        debug!(id = ?id, live = self.len(), "removed tree");
        Ok(())
    }

    fn alloc(&mut self, content: Content<S>, extent: Extent) -> GroupId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.nodes.push(None);
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        self.nodes[idx] = Some(Node {
            generation,
            parent: None,
            content,
            original_extent: extent,
            extent,
        });
        id_at(idx, generation)
    }

    // --- structural queries ---

    /// Returns true if `id` refers to a live group.
    pub fn is_alive(&self, id: GroupId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live groups.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Whether the store holds no groups.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the live groups that have no parent.
    pub fn roots(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(n) if n.parent.is_none() => Some(id_at(i, n.generation)),
            _ => None,
        })
    }

    /// What the group directly contains.
    pub fn kind(&self, id: GroupId) -> Result<GroupKind<'_, S>, GroupError> {
        Ok(match &self.get(id)?.content {
            Content::Leaf(shape) => GroupKind::Leaf(shape),
            Content::Internal(children) => GroupKind::Internal(children.as_slice()),
        })
    }

    /// Whether the group is a leaf group.
    pub fn is_leaf(&self, id: GroupId) -> Result<bool, GroupError> {
        Ok(matches!(self.get(id)?.content, Content::Leaf(_)))
    }

    /// The shape of a leaf group, or `None` for a non-leaf group.
    pub fn shape(&self, id: GroupId) -> Result<Option<&S>, GroupError> {
        Ok(match &self.get(id)?.content {
            Content::Leaf(shape) => Some(shape),
            Content::Internal(_) => None,
        })
    }

    /// Mutable access to the shape of a leaf group.
    ///
    /// Editing the shape does not change the group's extents.
    pub fn shape_mut(&mut self, id: GroupId) -> Result<Option<&mut S>, GroupError> {
        Ok(match &mut self.get_mut(id)?.content {
            Content::Leaf(shape) => Some(shape),
            Content::Internal(_) => None,
        })
    }

    /// The subgroups of a non-leaf group, front first, or `None` for a leaf group.
    pub fn subgroups(&self, id: GroupId) -> Result<Option<&[GroupId]>, GroupError> {
        Ok(self.get(id)?.children().map(|c| c.as_slice()))
    }

    /// Number of subgroups of a non-leaf group.
    pub fn subgroup_count(&self, id: GroupId) -> Result<usize, GroupError> {
        Ok(self.internal_children(id)?.len())
    }

    /// The subgroup at `index` (zero is the front) of a non-leaf group.
    pub fn subgroup(&self, id: GroupId, index: usize) -> Result<GroupId, GroupError> {
        let children = self.internal_children(id)?;
        children
            .get(index)
            .copied()
            .ok_or(GroupError::IndexOutOfRange {
                index,
                count: children.len(),
            })
    }

    /// The first subgroup, front to back, whose current extent contains `point`.
    ///
    /// `point` is in the inner coordinates of `id`, which are the outer coordinates of its
    /// subgroups. Extents include their boundary.
    pub fn subgroup_at(&self, id: GroupId, point: IntPoint) -> Result<Option<GroupId>, GroupError> {
        Ok(self
            .internal_children(id)?
            .iter()
            .copied()
            .find(|&child| self.node(child).extent.contains(point)))
    }

    /// The group directly containing `id`, or `None` for a root.
    pub fn parent_of(&self, id: GroupId) -> Result<Option<GroupId>, GroupError> {
        Ok(self.get(id)?.parent)
    }

    /// Strict ancestors of `id`, nearest first, ending at its root.
    pub fn ancestors(&self, id: GroupId) -> Result<Vec<GroupId>, GroupError> {
        let mut ancestors = Vec::new();
        let mut current = self.get(id)?.parent;
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.node(parent).parent;
        }
        Ok(ancestors)
    }

    /// Iterate `id` and every group below it in depth-first pre-order, front first.
    pub fn depth_first(&self, id: GroupId) -> Result<DepthFirst<'_, S>, GroupError> {
        self.get(id)?;
        Ok(DepthFirst {
            groups: self,
            stack: alloc::vec![id],
        })
    }

    /// Every shape contained directly or indirectly by `id`, in depth-first order.
    pub fn all_shapes(&self, id: GroupId) -> Result<Vec<&S>, GroupError> {
        Ok(self
            .depth_first(id)?
            .filter_map(|g| match &self.node(g).content {
                Content::Leaf(shape) => Some(shape),
                Content::Internal(_) => None,
            })
            .collect())
    }

    // --- extents ---

    /// The group's current extent, in its outer coordinate system.
    pub fn extent(&self, id: GroupId) -> Result<Extent, GroupError> {
        Ok(self.get(id)?.extent)
    }

    /// The group's extent in its inner coordinate system; fixed at creation.
    pub fn original_extent(&self, id: GroupId) -> Result<Extent, GroupError> {
        Ok(self.get(id)?.original_extent)
    }

    /// Set the group's current extent, in its outer coordinate system.
    ///
    /// This redefines the group's transform. Shape vertices and subgroup extents are not
    /// touched; they are reinterpreted through the new transform.
    pub fn set_extent(&mut self, id: GroupId, extent: Extent) -> Result<(), GroupError> {
        let node = self.get_mut(id)?;
        node.extent = extent;
        trace!(id = ?id, extent = ?extent, "set extent");
        Ok(())
    }

    /// The group's inner-to-outer transform.
    pub fn transform(&self, id: GroupId) -> Result<ExtentTransform, GroupError> {
        Ok(self.get(id)?.transform())
    }

    // --- coordinate conversions ---

    /// Convert a point from the group's outer to its inner coordinate system.
    pub fn outer_to_inner_point(&self, id: GroupId, p: IntPoint) -> Result<IntPoint, GroupError> {
        Ok(self.get(id)?.transform().outer_to_inner_point(p))
    }

    /// Convert a displacement from the group's outer to its inner coordinate system.
    pub fn outer_to_inner_vector(
        &self,
        id: GroupId,
        v: IntVector,
    ) -> Result<IntVector, GroupError> {
        Ok(self.get(id)?.transform().outer_to_inner_vector(v))
    }

    /// Convert a point from the group's inner to its outer coordinate system.
    pub fn inner_to_outer_point(&self, id: GroupId, p: IntPoint) -> Result<IntPoint, GroupError> {
        Ok(self.get(id)?.transform().inner_to_outer_point(p))
    }

    /// Convert a displacement from the group's inner to its outer coordinate system.
    pub fn inner_to_outer_vector(
        &self,
        id: GroupId,
        v: IntVector,
    ) -> Result<IntVector, GroupError> {
        Ok(self.get(id)?.transform().inner_to_outer_vector(v))
    }

    /// Convert a point from global coordinates to the group's outer coordinates.
    ///
    /// This is the parent's [`to_inner_coordinates`](Self::to_inner_coordinates), or the
    /// identity for a root.
    pub fn global_to_outer_point(&self, id: GroupId, p: IntPoint) -> Result<IntPoint, GroupError> {
        match self.get(id)?.parent {
            Some(parent) => self.to_inner_coordinates(parent, p),
            None => Ok(p),
        }
    }

    /// Convert a displacement from global coordinates to the group's outer coordinates.
    pub fn global_to_outer_vector(
        &self,
        id: GroupId,
        v: IntVector,
    ) -> Result<IntVector, GroupError> {
        match self.get(id)?.parent {
            Some(parent) => self.to_inner_vector(parent, v),
            None => Ok(v),
        }
    }

    /// Convert a point from the group's outer coordinates to global coordinates.
    ///
    /// This is the parent's [`to_global_coordinates`](Self::to_global_coordinates), or
    /// the identity for a root.
    pub fn outer_to_global_point(&self, id: GroupId, p: IntPoint) -> Result<IntPoint, GroupError> {
        match self.get(id)?.parent {
            Some(parent) => self.to_global_coordinates(parent, p),
            None => Ok(p),
        }
    }

    /// Convert a displacement from the group's outer coordinates to global coordinates.
    pub fn outer_to_global_vector(
        &self,
        id: GroupId,
        v: IntVector,
    ) -> Result<IntVector, GroupError> {
        match self.get(id)?.parent {
            Some(parent) => self.to_global_vector(parent, v),
            None => Ok(v),
        }
    }

    /// Convert a point from global coordinates to the group's inner coordinates.
    ///
    /// The global coordinate system is the outer coordinate system of the group's root.
    /// Each group on the way down, starting at the root, applies its outer-to-inner map.
    pub fn to_inner_coordinates(&self, id: GroupId, p: IntPoint) -> Result<IntPoint, GroupError> {
        let path = self.path_to_root(id)?;
        Ok(path
            .iter()
            .rev()
            .fold(p, |p, &g| self.node(g).transform().outer_to_inner_point(p)))
    }

    /// Convert a displacement from global coordinates to the group's inner coordinates.
    ///
    /// Only the sizes of the extents on the path matter, not their positions.
    pub fn to_inner_vector(&self, id: GroupId, v: IntVector) -> Result<IntVector, GroupError> {
        let path = self.path_to_root(id)?;
        Ok(path
            .iter()
            .rev()
            .fold(v, |v, &g| self.node(g).transform().outer_to_inner_vector(v)))
    }

    /// Convert a point from the group's inner coordinates to global coordinates.
    pub fn to_global_coordinates(&self, id: GroupId, p: IntPoint) -> Result<IntPoint, GroupError> {
        let path = self.path_to_root(id)?;
        Ok(path
            .iter()
            .fold(p, |p, &g| self.node(g).transform().inner_to_outer_point(p)))
    }

    /// Convert a displacement from the group's inner coordinates to global coordinates.
    pub fn to_global_vector(&self, id: GroupId, v: IntVector) -> Result<IntVector, GroupError> {
        let path = self.path_to_root(id)?;
        Ok(path
            .iter()
            .fold(v, |v, &g| self.node(g).transform().inner_to_outer_vector(v)))
    }

    // --- reordering ---

    /// Move the group to the front (index zero) of its parent's subgroups.
    ///
    /// The other subgroups keep their relative order. Fails with a state error for a root.
    pub fn bring_to_front(&mut self, id: GroupId) -> Result<(), GroupError> {
        let siblings = self.siblings_mut(id)?;
        let pos = position(siblings, id);
        siblings[..=pos].rotate_right(1);
        debug!(id = ?id, from = pos, "brought to front");
        Ok(())
    }

    /// Move the group to the back (last index) of its parent's subgroups.
    ///
    /// The other subgroups keep their relative order. Fails with a state error for a root.
    pub fn send_to_back(&mut self, id: GroupId) -> Result<(), GroupError> {
        let siblings = self.siblings_mut(id)?;
        let pos = position(siblings, id);
        siblings[pos..].rotate_left(1);
        debug!(id = ?id, from = pos, "sent to back");
        Ok(())
    }

    // --- drawing ---

    /// The commands that draw `id` and everything below it, in its outer coordinates.
    ///
    /// Every group wraps its content in three pushes (translate to the current top-left,
    /// scale, translate away from the original top-left) and three pops. Subgroups are
    /// drawn back to front, so the front subgroup is painted last.
    pub fn drawing_commands(&self, id: GroupId) -> Result<DrawingCommands, GroupError> {
        let mut commands = DrawingCommands::new();
        self.append_drawing_commands(id, &mut commands)?;
        Ok(commands)
    }

    /// Append the commands that draw `id` to `commands`.
    pub fn append_drawing_commands(
        &self,
        id: GroupId,
        commands: &mut DrawingCommands,
    ) -> Result<(), GroupError> {
        self.get(id)?;
        self.emit(id, commands);
        debug!(id = ?id, total = commands.len(), "emitted drawing commands");
        Ok(())
    }

    fn emit(&self, id: GroupId, commands: &mut DrawingCommands) {
        let node = self.node(id);
        let current = node.extent.top_left();
        let original = node.original_extent.top_left();
        commands.push(DrawCommand::PushTranslate(Vec2::new(
            f64::from(current.x),
            f64::from(current.y),
        )));
        commands.push(DrawCommand::PushScale(node.transform().scale()));
        // Negate before converting, so an origin at zero prints as `0`, not `-0`.
        commands.push(DrawCommand::PushTranslate(
            (IntPoint::ORIGIN - original).as_vec2(),
        ));
        match &node.content {
            Content::Leaf(shape) => shape.append_drawing_commands(commands),
            Content::Internal(children) => {
                for &child in children.iter().rev() {
                    self.emit(child, commands);
                }
            }
        }
        for _ in 0..3 {
            commands.push(DrawCommand::PopTransform);
        }
    }

    // --- internals ---

    fn get(&self, id: GroupId) -> Result<&Node<S>, GroupError> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|n| n.generation == id.1)
            .ok_or(GroupError::UnknownGroup(id))
    }

    fn get_mut(&mut self, id: GroupId) -> Result<&mut Node<S>, GroupError> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|n| n.generation == id.1)
            .ok_or(GroupError::UnknownGroup(id))
    }

    /// Access a node reached through tree links; panics if `id` is stale.
    fn node(&self, id: GroupId) -> &Node<S> {
        self.nodes[id.idx()].as_ref().expect("dangling GroupId")
    }

    /// Access a node reached through tree links mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: GroupId) -> &mut Node<S> {
        self.nodes[id.idx()].as_mut().expect("dangling GroupId")
    }

    fn internal_children(&self, id: GroupId) -> Result<&Children, GroupError> {
        self.get(id)?.children().ok_or(GroupError::LeafGroup(id))
    }

    fn siblings_mut(&mut self, id: GroupId) -> Result<&mut Children, GroupError> {
        let parent = self.get(id)?.parent.ok_or(GroupError::NoParent(id))?;
        match &mut self.node_mut(parent).content {
            Content::Internal(children) => Ok(children),
            Content::Leaf(_) => unreachable!("a parent is always a non-leaf group"),
        }
    }

    /// `id` followed by its ancestors, ending at the root.
    fn path_to_root(&self, id: GroupId) -> Result<SmallVec<[GroupId; 8]>, GroupError> {
        let mut path = SmallVec::new();
        path.push(id);
        let mut current = self.get(id)?.parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent).parent;
        }
        Ok(path)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "GroupId stores 32-bit slot indices"
)]
fn id_at(idx: usize, generation: u32) -> GroupId {
    GroupId::new(idx as u32, generation)
}

fn position(siblings: &[GroupId], id: GroupId) -> usize {
    siblings
        .iter()
        .position(|&c| c == id)
        .expect("a group is listed by its parent")
}

/// Depth-first pre-order iterator over a subtree; see [`ShapeGroups::depth_first`].
pub struct DepthFirst<'a, S: Shape> {
    groups: &'a ShapeGroups<S>,
    stack: Vec<GroupId>,
}

impl<S: Shape> core::fmt::Debug for DepthFirst<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthFirst")
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

impl<S: Shape> Iterator for DepthFirst<'_, S> {
    type Item = GroupId;

    fn next(&mut self) -> Option<GroupId> {
        let id = self.stack.pop()?;
        if let Some(children) = self.groups.node(id).children() {
            // Reversed so the front subgroup is visited first.
            self.stack.extend(children.iter().rev().copied());
        }
        Some(id)
    }
}
