// Copyright 2025 the Drawit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack-machine drawing protocol.
//!
//! A command stream is a sequence of whitespace-separated tokens:
//!
//! ```text
//! line x1 y1 x2 y2
//! arc x y radius startAngle sweepAngle
//! fill r g b
//! pushTranslate dx dy
//! pushScale sx sy
//! popTransform
//! ```
//!
//! Coordinates, radii, and angles (radians) are decimal numbers; colour components are
//! integers in `0..=255`. `pushTranslate` and `pushScale` compose a transform onto the
//! current one; `popTransform` restores the transform in effect before the matching push.
//! Streams are built as typed [`DrawCommand`]s and only serialized at the end, via
//! [`Display`](core::fmt::Display).

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::{Affine, Point, Vec2};

/// An opaque RGB fill colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a colour from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One instruction of the drawing protocol.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Stroke a straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Stroke a circular arc.
    Arc {
        /// Centre of the circle.
        center: Point,
        /// Radius of the circle.
        radius: f64,
        /// Angle of the arc's start, in radians from the positive x axis.
        start_angle: f64,
        /// Angle swept by the arc, in radians.
        sweep_angle: f64,
    },
    /// Fill the outline drawn so far.
    Fill(Color),
    /// Push a translation onto the transform stack.
    PushTranslate(Vec2),
    /// Push a per-axis scale onto the transform stack.
    PushScale(Vec2),
    /// Pop the most recently pushed transform.
    PopTransform,
}

impl DrawCommand {
    /// Whether this command pushes onto the transform stack.
    pub fn is_push(&self) -> bool {
        matches!(self, Self::PushTranslate(_) | Self::PushScale(_))
    }

    /// Whether this command pops the transform stack.
    pub fn is_pop(&self) -> bool {
        matches!(self, Self::PopTransform)
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line { from, to } => write!(f, "line {} {} {} {}", from.x, from.y, to.x, to.y),
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
            } => write!(
                f,
                "arc {} {} {radius} {start_angle} {sweep_angle}",
                center.x, center.y
            ),
            Self::Fill(c) => write!(f, "fill {} {} {}", c.r, c.g, c.b),
            Self::PushTranslate(v) => write!(f, "pushTranslate {} {}", v.x, v.y),
            Self::PushScale(v) => write!(f, "pushScale {} {}", v.x, v.y),
            Self::PopTransform => f.write_str("popTransform"),
        }
    }
}

/// Violations of the drawing protocol, found while parsing or replaying a stream.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// A token in operator position is not a known operator.
    #[error("unknown drawing operator `{token}` at token {index}")]
    UnknownOperator {
        /// The offending token.
        token: String,
        /// Token position in the stream.
        index: usize,
    },
    /// The stream ended before an operator received all its arguments.
    #[error("`{operator}` is missing an argument at token {index}")]
    MissingArgument {
        /// The operator being parsed.
        operator: &'static str,
        /// Token position where the argument was expected.
        index: usize,
    },
    /// An argument is not a number of the expected kind.
    #[error("invalid number `{token}` at token {index}")]
    InvalidNumber {
        /// The offending token.
        token: String,
        /// Token position in the stream.
        index: usize,
    },
    /// A colour component lies outside `0..=255`.
    #[error("colour component {value} at token {index} is outside 0..=255")]
    ColorOutOfRange {
        /// The parsed component.
        value: i64,
        /// Token position in the stream.
        index: usize,
    },
    /// A `popTransform` was issued with nothing on the stack.
    #[error("popTransform at command {index} pops an empty transform stack")]
    PopOnEmptyStack {
        /// Command position in the stream.
        index: usize,
    },
    /// The stream ended with transforms still pushed.
    #[error("{depth} transforms are still pushed at the end of the stream")]
    Unbalanced {
        /// Stack depth at the end of the stream.
        depth: usize,
    },
}

/// A draw instruction paired with the transform in effect when it executes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedDraw {
    /// Composition of every transform pushed at this point, outermost first.
    pub transform: Affine,
    /// A [`DrawCommand::Line`], [`DrawCommand::Arc`], or [`DrawCommand::Fill`].
    pub command: DrawCommand,
}

/// An ordered list of drawing commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingCommands {
    commands: Vec<DrawCommand>,
}

impl DrawingCommands {
    /// Create an empty command list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// The commands, in order.
    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterate the commands in order.
    pub fn iter(&self) -> core::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether there are no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `pushTranslate` and `pushScale` commands.
    pub fn push_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_push()).count()
    }

    /// Number of `popTransform` commands.
    pub fn pop_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_pop()).count()
    }

    /// Check that no pop underflows the stack and that every push is popped.
    pub fn check_balanced(&self) -> Result<(), CommandError> {
        let mut depth = 0_usize;
        for (index, command) in self.commands.iter().enumerate() {
            if command.is_push() {
                depth += 1;
            } else if command.is_pop() {
                depth = depth
                    .checked_sub(1)
                    .ok_or(CommandError::PopOnEmptyStack { index })?;
            }
        }
        if depth == 0 {
            Ok(())
        } else {
            Err(CommandError::Unbalanced { depth })
        }
    }

    /// Run the transform stack and return every draw instruction with its transform.
    ///
    /// This is what a renderer does: each `line`, `arc`, or `fill` is drawn through the
    /// composition of all transforms pushed before it and not yet popped.
    pub fn resolve(&self) -> Result<Vec<ResolvedDraw>, CommandError> {
        let mut stack: Vec<Affine> = Vec::new();
        let mut current = Affine::IDENTITY;
        let mut draws = Vec::new();
        for (index, command) in self.commands.iter().enumerate() {
            match *command {
                DrawCommand::PushTranslate(v) => {
                    stack.push(current);
                    current = current * Affine::translate(v);
                }
                DrawCommand::PushScale(s) => {
                    stack.push(current);
                    current = current * Affine::scale_non_uniform(s.x, s.y);
                }
                DrawCommand::PopTransform => {
                    current = stack
                        .pop()
                        .ok_or(CommandError::PopOnEmptyStack { index })?;
                }
                draw => draws.push(ResolvedDraw {
                    transform: current,
                    command: draw,
                }),
            }
        }
        if stack.is_empty() {
            Ok(draws)
        } else {
            Err(CommandError::Unbalanced { depth: stack.len() })
        }
    }
}

impl Extend<DrawCommand> for DrawingCommands {
    fn extend<I: IntoIterator<Item = DrawCommand>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

impl FromIterator<DrawCommand> for DrawingCommands {
    fn from_iter<I: IntoIterator<Item = DrawCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DrawingCommands {
    type Item = &'a DrawCommand;
    type IntoIter = core::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// One command per line, each terminated by a newline.
impl fmt::Display for DrawingCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            writeln!(f, "{command}")?;
        }
        Ok(())
    }
}

/// Parses the token grammar. Stack balance is not checked here; see
/// [`DrawingCommands::check_balanced`].
impl FromStr for DrawingCommands {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens {
            inner: s.split_whitespace().enumerate(),
            last: 0,
        };
        let mut commands = Vec::new();
        while let Some((index, operator)) = tokens.inner.next() {
            tokens.last = index;
            let command = match operator {
                "line" => {
                    let from = tokens.point("line")?;
                    let to = tokens.point("line")?;
                    DrawCommand::Line { from, to }
                }
                "arc" => DrawCommand::Arc {
                    center: tokens.point("arc")?,
                    radius: tokens.number("arc")?,
                    start_angle: tokens.number("arc")?,
                    sweep_angle: tokens.number("arc")?,
                },
                "fill" => DrawCommand::Fill(Color::new(
                    tokens.component("fill")?,
                    tokens.component("fill")?,
                    tokens.component("fill")?,
                )),
                "pushTranslate" => {
                    DrawCommand::PushTranslate(tokens.point("pushTranslate")?.to_vec2())
                }
                "pushScale" => DrawCommand::PushScale(tokens.point("pushScale")?.to_vec2()),
                "popTransform" => DrawCommand::PopTransform,
                _ => {
                    return Err(CommandError::UnknownOperator {
                        token: operator.to_string(),
                        index,
                    });
                }
            };
            commands.push(command);
        }
        Ok(Self { commands })
    }
}

struct Tokens<'a> {
    inner: core::iter::Enumerate<core::str::SplitWhitespace<'a>>,
    last: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, operator: &'static str) -> Result<(usize, &'a str), CommandError> {
        let (index, token) = self.inner.next().ok_or(CommandError::MissingArgument {
            operator,
            index: self.last + 1,
        })?;
        self.last = index;
        Ok((index, token))
    }

    fn number(&mut self, operator: &'static str) -> Result<f64, CommandError> {
        let (index, token) = self.next(operator)?;
        // `inf` and `NaN` parse as `f64` but are not numbers in the protocol.
        token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| CommandError::InvalidNumber {
                token: token.to_string(),
                index,
            })
    }

    fn point(&mut self, operator: &'static str) -> Result<Point, CommandError> {
        Ok(Point::new(self.number(operator)?, self.number(operator)?))
    }

    fn component(&mut self, operator: &'static str) -> Result<u8, CommandError> {
        let (index, token) = self.next(operator)?;
        let value = token
            .parse::<i64>()
            .map_err(|_| CommandError::InvalidNumber {
                token: token.to_string(),
                index,
            })?;
        u8::try_from(value).map_err(|_| CommandError::ColorOutOfRange { value, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn serializes_one_command_per_line() {
        let cmds: DrawingCommands = vec![
            DrawCommand::PushTranslate(Vec2::new(400.0, 255.0)),
            DrawCommand::PushScale(Vec2::new(1.5, 0.5)),
            DrawCommand::Line {
                from: Point::new(390.0, 240.0),
                to: Point::new(-1.25, 0.0),
            },
            DrawCommand::Fill(Color::RED),
            DrawCommand::PopTransform,
            DrawCommand::PopTransform,
        ]
        .into_iter()
        .collect();
        assert_eq!(
            cmds.to_string(),
            "pushTranslate 400 255\npushScale 1.5 0.5\nline 390 240 -1.25 0\nfill 255 0 0\npopTransform\npopTransform\n"
        );
    }

    #[test]
    fn parse_accepts_any_whitespace() {
        let cmds: DrawingCommands =
            "pushTranslate 1 2\n\tarc 0 0 5 0 3.5  line 1 2 3 4 fill 0 128 255 popTransform"
                .parse()
                .unwrap();
        assert_eq!(
            cmds.as_slice(),
            &[
                DrawCommand::PushTranslate(Vec2::new(1.0, 2.0)),
                DrawCommand::Arc {
                    center: Point::ORIGIN,
                    radius: 5.0,
                    start_angle: 0.0,
                    sweep_angle: 3.5,
                },
                DrawCommand::Line {
                    from: Point::new(1.0, 2.0),
                    to: Point::new(3.0, 4.0),
                },
                DrawCommand::Fill(Color::new(0, 128, 255)),
                DrawCommand::PopTransform,
            ]
        );
        assert!("".parse::<DrawingCommands>().unwrap().is_empty());
    }

    #[test]
    fn parse_errors_name_the_token() {
        assert_eq!(
            "line 1 2 3 4 scale 2 2".parse::<DrawingCommands>(),
            Err(CommandError::UnknownOperator {
                token: "scale".to_string(),
                index: 5
            })
        );
        assert_eq!(
            "pushScale 2".parse::<DrawingCommands>(),
            Err(CommandError::MissingArgument {
                operator: "pushScale",
                index: 2
            })
        );
        assert_eq!(
            "line 1 x 3 4".parse::<DrawingCommands>(),
            Err(CommandError::InvalidNumber {
                token: "x".to_string(),
                index: 2
            })
        );
        assert_eq!(
            "fill 0 256 0".parse::<DrawingCommands>(),
            Err(CommandError::ColorOutOfRange {
                value: 256,
                index: 2
            })
        );
        assert_eq!(
            "pushScale inf 1".parse::<DrawingCommands>(),
            Err(CommandError::InvalidNumber {
                token: "inf".to_string(),
                index: 1
            })
        );
        assert_eq!(
            "line NaN 0 0 0".parse::<DrawingCommands>(),
            Err(CommandError::InvalidNumber {
                token: "NaN".to_string(),
                index: 1
            })
        );
        assert_eq!(
            "pushTranslate 0 -infinity".parse::<DrawingCommands>(),
            Err(CommandError::InvalidNumber {
                token: "-infinity".to_string(),
                index: 2
            })
        );
        assert_eq!(
            "fill 0 1.5 0".parse::<DrawingCommands>(),
            Err(CommandError::InvalidNumber {
                token: "1.5".to_string(),
                index: 2
            })
        );
    }

    #[test]
    fn balance() {
        let ok: DrawingCommands = "pushTranslate 1 1 pushScale 2 2 popTransform popTransform"
            .parse()
            .unwrap();
        assert_eq!(ok.push_count(), 2);
        assert_eq!(ok.pop_count(), 2);
        assert_eq!(ok.check_balanced(), Ok(()));

        let underflow: DrawingCommands = "pushTranslate 1 1 popTransform popTransform"
            .parse()
            .unwrap();
        assert_eq!(
            underflow.check_balanced(),
            Err(CommandError::PopOnEmptyStack { index: 2 })
        );

        let open: DrawingCommands = "pushScale 1 1 line 0 0 1 1".parse().unwrap();
        assert_eq!(
            open.check_balanced(),
            Err(CommandError::Unbalanced { depth: 1 })
        );
        assert_eq!(open.resolve(), Err(CommandError::Unbalanced { depth: 1 }));
    }

    #[test]
    fn resolve_composes_pushes_innermost_last() {
        let cmds: DrawingCommands = "pushTranslate 400 255 pushScale 1.5 0.5 pushTranslate -390 -240 \
             line 392 242 390 240 popTransform popTransform popTransform fill 1 2 3"
            .parse()
            .unwrap();
        let draws = cmds.resolve().unwrap();
        assert_eq!(draws.len(), 2);
        let DrawCommand::Line { from, to } = draws[0].command else {
            panic!("expected a line, got {:?}", draws[0].command);
        };
        assert_eq!(draws[0].transform * from, Point::new(403.0, 256.0));
        assert_eq!(draws[0].transform * to, Point::new(400.0, 255.0));
        assert_eq!(
            draws[1].transform,
            Affine::IDENTITY,
            "everything was popped before the fill"
        );
    }

    #[test]
    fn display_parses_back() {
        let text = "pushTranslate -390 -240\narc 1.5 2 3 0.25 -1\npopTransform\n";
        let cmds: DrawingCommands = text.parse().unwrap();
        assert_eq!(cmds.to_string(), text);
    }
}
