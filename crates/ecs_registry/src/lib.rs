//! # ecs_registry
//!
//! The ECS core: the [`Registry`] binds entities to components and systems to
//! entities, and drives the per-frame update and draw dispatch.
//!
//! The registry is single-threaded and neither `Send` nor `Sync`:
//! components are shared through `Rc<RefCell<_>>` so that in-place mutations
//! made by one system are seen by every system that runs later in the frame.
//!
//! This crate provides:
//!
//! - [`Registry`]: registration, queries, [`Registry::update`] and
//!   [`Registry::draw`].
//! - [`RegistryConfig`]: capacity hints, loadable from JSON.
//! - [`FrameLoop`] / [`FrameConfig`]: a host loop running update then draw
//!   each frame.
//! - [`RegistryError`]: update failures and configuration errors.

pub mod config;
pub mod error;
pub mod frame;
pub mod registry;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use frame::{FrameConfig, FrameLoop};
pub use registry::Registry;
