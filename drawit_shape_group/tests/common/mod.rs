// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scene: two root groups of resized leaves.

use drawit_geometry::{Extent, IntPoint, IntVector};
use drawit_shape_group::{GroupId, Polygon, ShapeGroups};

pub const TRIANGLE: [(i32, i32); 3] = [(-1, -1), (-1, 1), (1, 0)];
pub const DIAMOND: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
pub const PENTAGON: [(i32, i32); 5] = [(-1, -1), (-2, 0), (0, 1), (2, 0), (1, -1)];

/// Scale `template` by `(sx, sy)`, then move it by `(dx, dy)`.
pub fn polygon(template: &[(i32, i32)], (sx, sy): (i32, i32), (dx, dy): (i32, i32)) -> Polygon {
    let offset = IntVector::new(dx, dy);
    Polygon::new(
        template
            .iter()
            .map(|&(x, y)| IntPoint::new(x * sx, y * sy) + offset)
            .collect::<Vec<_>>(),
    )
}

pub fn ltwh(left: i32, top: i32, width: i32, height: i32) -> Extent {
    Extent::from_left_top_width_height(left, top, width, height).unwrap()
}

pub struct Scene {
    pub groups: ShapeGroups,
    pub leaf1: GroupId,
    pub leaf2: GroupId,
    pub leaf3: GroupId,
    pub leaf4: GroupId,
    pub leaf5: GroupId,
    /// `[leaf1, leaf2, leaf3]`
    pub group1: GroupId,
    /// `[leaf4, leaf5]`
    pub group2: GroupId,
}

impl Scene {
    pub fn new() -> Self {
        let mut groups = ShapeGroups::new();

        let leaf1 = groups
            .insert_leaf(polygon(&TRIANGLE, (10, 10), (400, 250)))
            .unwrap();
        // scale by 3/2, 1/2; translate by 10, 15
        groups.set_extent(leaf1, ltwh(400, 255, 30, 10)).unwrap();

        let leaf2 = groups
            .insert_leaf(polygon(&DIAMOND, (5, 20), (400, 250)))
            .unwrap();
        // scale by 2, 1; translate by -5, 5
        groups.set_extent(leaf2, ltwh(390, 235, 20, 40)).unwrap();

        let leaf3 = groups
            .insert_leaf(polygon(&PENTAGON, (10, 5), (400, 250)))
            .unwrap();
        // scale by 2/5, 2
        groups.set_extent(leaf3, ltwh(380, 245, 16, 20)).unwrap();

        let group1 = groups.insert_group(&[leaf1, leaf2, leaf3]).unwrap();

        let leaf4 = groups
            .insert_leaf(polygon(&TRIANGLE, (-5, 5), (200, 100)))
            .unwrap();
        let leaf5 = groups
            .insert_leaf(polygon(&PENTAGON, (10, -10), (200, 200)))
            .unwrap();
        let group2 = groups.insert_group(&[leaf4, leaf5]).unwrap();

        Self {
            groups,
            leaf1,
            leaf2,
            leaf3,
            leaf4,
            leaf5,
            group1,
            group2,
        }
    }

    pub fn order(&self, group: GroupId) -> Vec<GroupId> {
        self.groups.subgroups(group).unwrap().unwrap().to_vec()
    }

    pub fn inner(&self, group: GroupId, x: i32, y: i32) -> IntPoint {
        self.groups
            .to_inner_coordinates(group, IntPoint::new(x, y))
            .unwrap()
    }

    pub fn global(&self, group: GroupId, x: i32, y: i32) -> IntPoint {
        self.groups
            .to_global_coordinates(group, IntPoint::new(x, y))
            .unwrap()
    }

    pub fn inner_vector(&self, group: GroupId, x: i32, y: i32) -> IntVector {
        self.groups
            .to_inner_vector(group, IntVector::new(x, y))
            .unwrap()
    }
}
