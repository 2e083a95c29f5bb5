//! The type-erased [`Component`] wrapper.
//!
//! A component is one typed data record attached to an entity. The payload is
//! always held as a [`Shared<T>`] (`Rc<RefCell<T>>`) so every system that
//! resolves it observes the same record: a mutation made by one system during
//! a frame is visible to every system that runs after it.
//!
//! ## Type Identity
//!
//! Matching is by exact concrete type. [`ComponentTypeId`] wraps the payload's
//! [`TypeId`] together with its type name for diagnostics; two components match
//! the same query slot only if their payloads are the same Rust type.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::entity::EntityId;

/// Shared, mutable handle to a component payload.
pub type Shared<T> = Rc<RefCell<T>>;

/// The entity → components mapping owned by the registry.
///
/// Each entity's components are kept in registration order.
pub type ComponentMap = HashMap<EntityId, Vec<Component>>;

/// Identifies the concrete payload type of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTypeId {
    id: TypeId,
    name: &'static str,
}

impl ComponentTypeId {
    /// Returns the [`ComponentTypeId`] for payload type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The fully qualified Rust type name of the payload.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// One typed data record, owned by the registry once registered.
///
/// Cloning a `Component` clones the handle, not the payload.
///
/// # Examples
///
/// ```rust
/// use ecs_component::Component;
///
/// struct Counter {
///     value: i64,
/// }
///
/// let component = Component::new(Counter { value: 10 });
/// let counter = component.downcast::<Counter>().unwrap();
/// counter.borrow_mut().value -= 1;
///
/// assert_eq!(component.downcast::<Counter>().unwrap().borrow().value, 9);
/// ```
#[derive(Clone)]
pub struct Component {
    type_id: ComponentTypeId,
    data: Rc<dyn Any>,
}

impl Component {
    /// Wrap `value` into a new shared payload.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self::from_shared(Rc::new(RefCell::new(value)))
    }

    /// Wrap an existing shared payload. The caller keeps observing the same
    /// record through its own handle.
    #[must_use]
    pub fn from_shared<T: 'static>(shared: Shared<T>) -> Self {
        Self {
            type_id: ComponentTypeId::of::<T>(),
            data: shared,
        }
    }

    /// The concrete payload type.
    #[must_use]
    pub fn type_id(&self) -> ComponentTypeId {
        self.type_id
    }

    /// Returns `true` if the payload is exactly of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id.id == TypeId::of::<T>()
    }

    /// The opaque payload. It is a `RefCell<T>` for the payload type `T`.
    #[must_use]
    pub fn data(&self) -> &Rc<dyn Any> {
        &self.data
    }

    /// Returns a shared handle to the payload if it is of type `T`.
    #[must_use]
    pub fn downcast<T: 'static>(&self) -> Option<Shared<T>> {
        if !self.is::<T>() {
            return None;
        }
        Rc::clone(&self.data).downcast::<RefCell<T>>().ok()
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("type", &self.type_id.name)
            .field("handles", &Rc::strong_count(&self.data))
            .finish()
    }
}
