//! Demo systems.

use anyhow::{Context, Result};
use ecs_component::{Component, ComponentMap, EntityId, Slot, find, query_components, require};
use ecs_system::{Drawer, System, SystemId, Updater};
use glam::Vec2;
use tracing::debug;

use crate::components::{Chase, Counter, Glyph, Position, Velocity};
use crate::surface::TextSurface;

/// Counts the counter down to zero and prints it.
#[derive(Debug)]
pub struct CountDown {
    id: SystemId,
}

impl CountDown {
    #[must_use]
    pub fn new(id: SystemId) -> Self {
        Self { id }
    }
}

impl System for CountDown {
    fn id(&self) -> SystemId {
        self.id
    }
}

impl Updater for CountDown {
    fn update(
        &mut self,
        _entity: EntityId,
        components: &[Component],
        _world: &ComponentMap,
    ) -> Result<()> {
        let mut counter = Slot::<Counter>::new();
        query_components(components, &mut [&mut counter]);

        let mut counter = counter.borrow_mut();
        counter.value = (counter.value - 1).max(0);
        Ok(())
    }
}

impl Drawer<TextSurface> for CountDown {
    fn draw(&mut self, surface: &mut TextSurface, components: &[Component]) {
        let mut counter = Slot::<Counter>::new();
        query_components(components, &mut [&mut counter]);
        surface.caption(format!("Counter value is {}", counter.borrow().value));
    }
}

/// Applies velocity to position and bounces off the surface edges.
#[derive(Debug)]
pub struct Movement {
    id: SystemId,
    bounds: Vec2,
}

impl Movement {
    #[must_use]
    pub fn new(id: SystemId, bounds: Vec2) -> Self {
        Self { id, bounds }
    }
}

impl System for Movement {
    fn id(&self) -> SystemId {
        self.id
    }
}

impl Updater for Movement {
    fn update(
        &mut self,
        entity: EntityId,
        components: &[Component],
        _world: &ComponentMap,
    ) -> Result<()> {
        let position =
            require::<Position>(components).with_context(|| format!("moving {entity}"))?;
        let velocity =
            require::<Velocity>(components).with_context(|| format!("moving {entity}"))?;

        let mut position = position.borrow_mut();
        let mut velocity = velocity.borrow_mut();
        position.0 += velocity.0;
        velocity.bounce(&mut position.0, self.bounds);
        Ok(())
    }
}

/// Steers an entity toward the position of its [`Chase`] target.
#[derive(Debug)]
pub struct Pursuit {
    id: SystemId,
}

impl Pursuit {
    #[must_use]
    pub fn new(id: SystemId) -> Self {
        Self { id }
    }
}

impl System for Pursuit {
    fn id(&self) -> SystemId {
        self.id
    }
}

impl Updater for Pursuit {
    fn update(
        &mut self,
        entity: EntityId,
        components: &[Component],
        world: &ComponentMap,
    ) -> Result<()> {
        let chase = *require::<Chase>(components)?.borrow();
        let Some(target) = world.get(&chase.target).and_then(|c| find::<Position>(c)) else {
            // The target was unregistered; stay put.
            debug!(entity = entity.id(), target = chase.target.id(), "chase target gone");
            return Ok(());
        };
        let goal = target.borrow().0;

        let position = require::<Position>(components)?;
        let mut position = position.borrow_mut();
        let step = goal - position.0;
        position.0 += step.clamp_length_max(chase.speed);
        Ok(())
    }
}

/// Plots every sprite's glyph at its position.
#[derive(Debug)]
pub struct SpriteDrawer {
    id: SystemId,
}

impl SpriteDrawer {
    #[must_use]
    pub fn new(id: SystemId) -> Self {
        Self { id }
    }
}

impl System for SpriteDrawer {
    fn id(&self) -> SystemId {
        self.id
    }
}

impl Drawer<TextSurface> for SpriteDrawer {
    fn draw(&mut self, surface: &mut TextSurface, components: &[Component]) {
        let mut position = Slot::<Position>::new();
        let mut glyph = Slot::<Glyph>::new();
        query_components(components, &mut [&mut position, &mut glyph]);

        // Draw has no error channel: skip entities missing either component.
        let (Some(position), Some(glyph)) = (position.get(), glyph.get()) else {
            return;
        };
        let at = position.borrow().0.round().max(Vec2::ZERO);
        surface.plot(at.x as usize, at.y as usize, glyph.borrow().0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(entity: EntityId, components: Vec<Component>) -> ComponentMap {
        let mut world = ComponentMap::new();
        world.insert(entity, components);
        world
    }

    #[test]
    fn test_countdown_stops_at_zero() {
        let mut system = CountDown::new(SystemId::from_raw(1));
        let components = vec![Component::new(Counter { value: 1 })];
        let world = ComponentMap::new();

        for _ in 0..3 {
            system
                .update(EntityId::from_raw(1), &components, &world)
                .unwrap();
        }

        assert_eq!(require::<Counter>(&components).unwrap().borrow().value, 0);
    }

    #[test]
    fn test_movement_requires_velocity() {
        let mut system = Movement::new(SystemId::from_raw(1), Vec2::splat(10.0));
        let components = vec![Component::new(Position(Vec2::ZERO))];

        let err = system
            .update(EntityId::from_raw(3), &components, &ComponentMap::new())
            .unwrap_err();

        assert!(format!("{err:#}").contains("Velocity"));
    }

    #[test]
    fn test_pursuit_moves_toward_target() {
        let leader = EntityId::from_raw(1);
        let follower = EntityId::from_raw(2);
        let world = world_with(
            leader,
            vec![Component::new(Position(Vec2::new(10.0, 0.0)))],
        );
        let components = vec![
            Component::new(Position(Vec2::ZERO)),
            Component::new(Chase {
                target: leader,
                speed: 2.0,
            }),
        ];

        Pursuit::new(SystemId::from_raw(1))
            .update(follower, &components, &world)
            .unwrap();

        let position = require::<Position>(&components).unwrap();
        assert_eq!(position.borrow().0, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_pursuit_without_target_is_noop() {
        let components = vec![
            Component::new(Position(Vec2::ONE)),
            Component::new(Chase {
                target: EntityId::from_raw(9),
                speed: 2.0,
            }),
        ];

        Pursuit::new(SystemId::from_raw(1))
            .update(EntityId::from_raw(2), &components, &ComponentMap::new())
            .unwrap();

        assert_eq!(require::<Position>(&components).unwrap().borrow().0, Vec2::ONE);
    }

    #[test]
    fn test_sprite_drawer_plots_glyph() {
        let mut surface = TextSurface::new(3, 1);
        let components = vec![
            Component::new(Glyph('@')),
            Component::new(Position(Vec2::new(2.2, 0.0))),
        ];

        SpriteDrawer::new(SystemId::from_raw(1)).draw(&mut surface, &components);

        assert_eq!(surface.lines(), vec!["..@"]);
    }

    #[test]
    fn test_sprite_drawer_skips_incomplete_entities() {
        let mut surface = TextSurface::new(2, 1);
        SpriteDrawer::new(SystemId::from_raw(1))
            .draw(&mut surface, &[Component::new(Glyph('@'))]);
        assert_eq!(surface.lines(), vec![".."]);
    }
}
