// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested shape groups: build a two-level scene, resize a group, convert coordinates,
//! and print the drawing commands.
//!
//! Run:
//! - `cargo run -p drawit_demos --example nested_groups`
//! - `RUST_LOG=drawit_shape_group=debug cargo run -p drawit_demos --example nested_groups`

use drawit_geometry::{Extent, IntPoint, IntVector};
use drawit_shape_group::{Color, DrawCommand, GroupError, Polygon, ShapeGroups};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

const TRIANGLE: [(i32, i32); 3] = [(-1, -1), (-1, 1), (1, 0)];
const DIAMOND: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

fn polygon(template: &[(i32, i32)], scale: i32, center: IntPoint, color: Color) -> Polygon {
    let vertices: Vec<_> = template
        .iter()
        .map(|&(x, y)| center + IntVector::new(x * scale, y * scale))
        .collect();
    Polygon::new(vertices).with_color(color)
}

fn main() -> Result<(), GroupError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut groups = ShapeGroups::new();
    let a = groups.insert_leaf(polygon(&TRIANGLE, 10, IntPoint::new(400, 250), Color::RED))?;
    let b = groups.insert_leaf(polygon(&DIAMOND, 20, IntPoint::new(450, 250), Color::GREEN))?;
    let inner = groups.insert_group(&[a, b])?;
    let c = groups.insert_leaf(polygon(&TRIANGLE, 5, IntPoint::new(200, 100), Color::BLUE))?;
    let root = groups.insert_group(&[inner, c])?;
    println!("root extent: {:?}", groups.extent(root)?);

    // Draw `inner` four times as large, shifted right.
    let original = groups.original_extent(inner)?;
    let enlarged = Extent::from_left_top_width_height(
        original.left() + 100,
        original.top(),
        original.width() * 4,
        original.height() * 4,
    )?;
    groups.set_extent(inner, enlarged)?;

    let global = IntPoint::new(600, 300);
    let local = groups.to_inner_coordinates(a, global)?;
    println!("global {global:?} is {local:?} inside the red triangle");
    println!(
        "and maps back to {:?}",
        groups.to_global_coordinates(a, local)?
    );
    if let Some(hit) = groups.subgroup_at(root, global)? {
        println!("frontmost group under {global:?}: {hit:?}");
    }

    groups.bring_to_front(c)?;
    let commands = groups.drawing_commands(root)?;
    print!("{commands}");

    match commands.resolve() {
        Ok(draws) => {
            for draw in draws {
                if let DrawCommand::Line { from, .. } = draw.command {
                    let Point { x, y } = draw.transform * from;
                    println!("line starts at ({x:.1}, {y:.1}) on screen");
                }
            }
        }
        Err(err) => eprintln!("unbalanced command stream: {err}"),
    }
    Ok(())
}
