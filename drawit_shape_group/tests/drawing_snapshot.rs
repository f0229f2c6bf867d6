// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialized drawing commands for a small scene.

use drawit_geometry::{Extent, IntPoint};
use drawit_shape_group::{Color, Polygon, ShapeGroups};

fn triangle(x: i32, y: i32) -> Polygon {
    Polygon::new([
        IntPoint::new(x, y),
        IntPoint::new(x + 10, y),
        IntPoint::new(x, y + 10),
    ])
}

#[test]
fn two_triangles() {
    let mut groups = ShapeGroups::new();
    let front = groups
        .insert_leaf(triangle(10, 10).with_color(Color::RED))
        .unwrap();
    let back = groups.insert_leaf(triangle(30, 10)).unwrap();
    let root = groups.insert_group(&[front, back]).unwrap();
    groups
        .set_extent(
            front,
            Extent::from_left_top_width_height(10, 10, 20, 5).unwrap(),
        )
        .unwrap();

    let commands = groups.drawing_commands(root).unwrap();
    insta::assert_snapshot!(commands.to_string().trim_end(), @r"
    pushTranslate 10 10
    pushScale 1 1
    pushTranslate -10 -10
    pushTranslate 30 10
    pushScale 1 1
    pushTranslate -30 -10
    line 30 10 40 10
    line 40 10 30 20
    line 30 20 30 10
    popTransform
    popTransform
    popTransform
    pushTranslate 10 10
    pushScale 2 0.5
    pushTranslate -10 -10
    line 10 10 20 10
    line 20 10 10 20
    line 10 20 10 10
    fill 255 0 0
    popTransform
    popTransform
    popTransform
    popTransform
    popTransform
    popTransform
    ");
}
