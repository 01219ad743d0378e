//! Toolpath emission.
//!
//! Each simplified path becomes one stroke: lift, travel to the start,
//! plunge, one drawing move per remaining vertex, lift.

use crate::humanize::StrokeModel;
use crate::mapper::CoordinateMapper;
use handtrace_core::{MachinePoint, SimplifiedPath};
use std::fmt;

/// One line of motion output.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCommand {
    Comment(String),
    /// Rapid move of the Z axis only
    Lift { z: f64 },
    /// Rapid XY move with the tool raised
    Travel { x: f64, y: f64, feed: u32 },
    /// Linear Z move onto the surface
    Plunge { z: f64, feed: u32 },
    /// Linear drawing move
    Draw { x: f64, y: f64, z: f64, feed: u32 },
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "; {}", text),
            Self::Lift { z } => write!(f, "G0 Z{:.2}", z),
            Self::Travel { x, y, feed } => write!(f, "G0 X{:.3} Y{:.3} F{}", x, y, feed),
            Self::Plunge { z, feed } => write!(f, "G1 Z{:.3} F{}", z, feed),
            Self::Draw { x, y, z, feed } => {
                write!(f, "G1 X{:.3} Y{:.3} Z{:.3} F{}", x, y, z, feed)
            }
        }
    }
}

impl MotionCommand {
    /// Destination in the XY plane, for moves that have one.
    pub fn target(&self) -> Option<MachinePoint> {
        match *self {
            Self::Travel { x, y, .. } | Self::Draw { x, y, .. } => Some(MachinePoint::new(x, y)),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw { .. })
    }
}

/// Converts simplified paths into motion commands.
#[derive(Debug, Clone, Copy)]
pub struct ToolpathEmitter {
    mapper: CoordinateMapper,
    z_safe: f64,
    travel_speed: u32,
}

impl ToolpathEmitter {
    pub fn new(mapper: CoordinateMapper, z_safe: f64, travel_speed: u32) -> Self {
        Self {
            mapper,
            z_safe,
            travel_speed,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Emit the stroke for one path.
    ///
    /// Paths with fewer than two vertices produce no commands. The start
    /// vertex is never perturbed; vertex `i` of `n` is drawn at progress
    /// `i / n`.
    pub fn emit<M: StrokeModel + ?Sized>(
        &self,
        path: &SimplifiedPath,
        model: &mut M,
    ) -> Vec<MotionCommand> {
        if !path.is_drawable() {
            tracing::debug!("Skipping path with {} vertices", path.len());
            return Vec::new();
        }

        let vertices = path.vertices();
        let n = vertices.len();
        let mut commands = Vec::with_capacity(n + 3);

        let start = self.mapper.to_machine(vertices[0]);
        commands.push(MotionCommand::Lift { z: self.z_safe });
        commands.push(MotionCommand::Travel {
            x: start.x,
            y: start.y,
            feed: self.travel_speed,
        });
        commands.push(MotionCommand::Plunge {
            z: model.height(0.0),
            feed: model.plunge_feed_rate(),
        });

        for (i, &vertex) in vertices.iter().enumerate().skip(1) {
            let p = model.tremor(self.mapper.to_machine(vertex));
            let progress = i as f64 / n as f64;
            let z = model.height(progress);
            let feed = model.feed_rate();
            commands.push(MotionCommand::Draw {
                x: p.x,
                y: p.y,
                z,
                feed,
            });
        }

        commands.push(MotionCommand::Lift { z: self.z_safe });
        commands
    }
}
