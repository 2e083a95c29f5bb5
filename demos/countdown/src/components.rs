//! Component payloads used by the demo.

use ecs_component::EntityId;
use glam::Vec2;

/// A value counted down once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub value: i64,
}

/// Position on the text surface, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Movement per frame, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// Reflect the velocity on the axes where `position` left `bounds`,
    /// clamping `position` back inside.
    pub fn bounce(&mut self, position: &mut Vec2, bounds: Vec2) {
        if position.x < 0.0 || position.x > bounds.x {
            self.0.x = -self.0.x;
            position.x = position.x.clamp(0.0, bounds.x);
        }
        if position.y < 0.0 || position.y > bounds.y {
            self.0.y = -self.0.y;
            position.y = position.y.clamp(0.0, bounds.y);
        }
    }
}

/// The glyph a sprite is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub char);

/// Moves the entity toward another entity's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chase {
    pub target: EntityId,
    /// Maximum distance covered per frame.
    pub speed: f32,
}
