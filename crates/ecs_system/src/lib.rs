//! # ecs_system
//!
//! The "S" in ECS, how per-frame behaviour plugs into the registry.
//!
//! A system implements [`System`] plus [`Updater`] and/or [`Drawer`]. Each
//! system carries a [`SystemId`], issued by a [`SystemAllocator`], which the
//! registry uses to remember which entities the system is associated with.
//!
//! ## Usage
//!
//! ```rust
//! use ecs_component::{Component, ComponentMap, EntityId, Slot, query_components};
//! use ecs_system::{System, SystemAllocator, SystemId, Updater};
//!
//! struct Counter {
//!     value: i64,
//! }
//!
//! struct CountDown {
//!     id: SystemId,
//! }
//!
//! impl System for CountDown {
//!     fn id(&self) -> SystemId {
//!         self.id
//!     }
//! }
//!
//! impl Updater for CountDown {
//!     fn update(
//!         &mut self,
//!         _entity: EntityId,
//!         components: &[Component],
//!         _world: &ComponentMap,
//!     ) -> anyhow::Result<()> {
//!         let mut counter = Slot::<Counter>::new();
//!         query_components(components, &mut [&mut counter]);
//!         counter.borrow_mut().value -= 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut systems = SystemAllocator::new();
//! let countdown = CountDown { id: systems.allocate() };
//! assert!(countdown.id().is_valid());
//! ```

pub mod id;
pub mod system;

pub use id::{SystemAllocator, SystemId};
pub use system::{Drawer, System, Updater};
