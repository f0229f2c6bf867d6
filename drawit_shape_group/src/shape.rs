// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shapes wrapped by leaf groups.

use alloc::vec::Vec;

use drawit_geometry::IntPoint;

use crate::commands::{Color, DrawCommand, DrawingCommands};

/// A shape that can be wrapped by a leaf group.
///
/// Vertices are interpreted in the inner coordinate system of the leaf group that wraps
/// the shape. Drawing commands are expressed in the same coordinates.
pub trait Shape {
    /// The shape's vertices, in order.
    ///
    /// A leaf group needs at least three, and its original extent is their bounding box.
    fn vertices(&self) -> &[IntPoint];

    /// Append the commands that draw this shape.
    ///
    /// Implementations must leave the transform stack as they found it: every push they
    /// emit is matched by a later pop.
    fn append_drawing_commands(&self, commands: &mut DrawingCommands);

    /// The commands that draw this shape.
    fn drawing_commands(&self) -> DrawingCommands {
        let mut commands = DrawingCommands::new();
        self.append_drawing_commands(&mut commands);
        commands
    }
}

/// A closed polygon with straight edges and an optional fill.
///
/// Draws one `line` per edge, closing the outline from the last vertex back to the
/// first, followed by a `fill` when a colour is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<IntPoint>,
    color: Option<Color>,
}

impl Polygon {
    /// Create an unfilled polygon.
    pub fn new(vertices: impl Into<Vec<IntPoint>>) -> Self {
        Self {
            vertices: vertices.into(),
            color: None,
        }
    }

    /// Builder-style variant of [`Polygon::set_color`].
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Replace the vertices.
    ///
    /// A group already wrapping this polygon keeps its original extent.
    pub fn set_vertices(&mut self, vertices: impl Into<Vec<IntPoint>>) {
        self.vertices = vertices.into();
    }

    /// Set the fill colour.
    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    /// The fill colour, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Shape for Polygon {
    fn vertices(&self) -> &[IntPoint] {
        &self.vertices
    }

    fn append_drawing_commands(&self, commands: &mut DrawingCommands) {
        let n = self.vertices.len();
        commands.extend((0..n).map(|i| DrawCommand::Line {
            from: self.vertices[i].as_point(),
            to: self.vertices[(i + 1) % n].as_point(),
        }));
        if let Some(color) = self.color {
            commands.push(DrawCommand::Fill(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Point;

    #[test]
    fn closed_outline_then_fill() {
        let poly = Polygon::new(vec![
            IntPoint::new(0, 0),
            IntPoint::new(4, 0),
            IntPoint::new(0, 3),
        ])
        .with_color(Color::BLUE);
        let cmds = poly.drawing_commands();
        assert_eq!(
            cmds.as_slice(),
            &[
                DrawCommand::Line {
                    from: Point::new(0.0, 0.0),
                    to: Point::new(4.0, 0.0),
                },
                DrawCommand::Line {
                    from: Point::new(4.0, 0.0),
                    to: Point::new(0.0, 3.0),
                },
                DrawCommand::Line {
                    from: Point::new(0.0, 3.0),
                    to: Point::new(0.0, 0.0),
                },
                DrawCommand::Fill(Color::BLUE),
            ]
        );
        assert_eq!(cmds.check_balanced(), Ok(()));
    }

    #[test]
    fn empty_polygon_draws_nothing() {
        assert!(Polygon::default().drawing_commands().is_empty());
    }
}
