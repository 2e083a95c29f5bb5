//! # ecs_component
//!
//! The "E" and "C" in ECS: entity identity and the typed data records
//! attached to entities.
//!
//! This crate provides:
//!
//! - [`EntityId`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`Component`]: a type-erased, shared, mutable data record.
//! - [`query_components`] and [`Slot`]: type-directed component lookup.

pub mod component;
pub mod entity;
pub mod error;
pub mod query;

pub use component::{Component, ComponentMap, ComponentTypeId, Shared};
pub use entity::{EntityAllocator, EntityId};
pub use error::ComponentError;
pub use query::{QuerySlot, Slot, find, query_components, require, same_payload};
