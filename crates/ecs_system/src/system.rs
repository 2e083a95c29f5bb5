//! System capability traits.
//!
//! A system is a unit of behaviour identified by a [`SystemId`]. It gains
//! per-frame work by implementing [`Updater`], [`Drawer`], or both, and is
//! associated with entities by the registry rather than owning them.
//!
//! To register the same system value as both an updater and a drawer, wrap it
//! in `Rc<RefCell<_>>` and register clones of the handle; the traits are
//! implemented for that wrapper.

use std::cell::RefCell;
use std::rc::Rc;

use ecs_component::{Component, ComponentMap, EntityId};

use crate::id::SystemId;

/// Base capability shared by every system.
pub trait System {
    /// The identifier the registry keys this system's entity associations by.
    fn id(&self) -> SystemId;
}

/// A system that mutates state once per frame per associated entity.
pub trait Updater: System {
    /// Update `entity`.
    ///
    /// `components` are the entity's own components in registration order.
    /// `world` maps every registered entity to its components, for
    /// cross-entity lookups.
    ///
    /// # Errors
    ///
    /// Any error aborts the remaining updates of the current frame and is
    /// returned to the frame driver.
    fn update(
        &mut self,
        entity: EntityId,
        components: &[Component],
        world: &ComponentMap,
    ) -> anyhow::Result<()>;
}

/// A system that renders once per frame per associated entity onto a host
/// surface of type `S`.
///
/// Drawing has no error channel; a drawer handles its own failures.
pub trait Drawer<S: ?Sized>: System {
    /// Draw one entity's `components` onto `surface`.
    fn draw(&mut self, surface: &mut S, components: &[Component]);
}

impl<T: System + ?Sized> System for Rc<RefCell<T>> {
    fn id(&self) -> SystemId {
        self.borrow().id()
    }
}

impl<T: Updater + ?Sized> Updater for Rc<RefCell<T>> {
    fn update(
        &mut self,
        entity: EntityId,
        components: &[Component],
        world: &ComponentMap,
    ) -> anyhow::Result<()> {
        self.borrow_mut().update(entity, components, world)
    }
}

impl<S: ?Sized, T: Drawer<S> + ?Sized> Drawer<S> for Rc<RefCell<T>> {
    fn draw(&mut self, surface: &mut S, components: &[Component]) {
        self.borrow_mut().draw(surface, components);
    }
}
