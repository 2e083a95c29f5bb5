//! Component Query Engine.
//!
//! A query resolves, by concrete payload type, which of an entity's components
//! to bind into a set of typed [`Slot`]s. For every slot, in order, the
//! available components are scanned in order and the **first** component whose
//! payload type matches is bound. Binding clones the shared handle; the slot
//! observes the payload, it never copies it.
//!
//! A slot with no match keeps whatever it held before the query, so a fresh
//! slot stays unbound. Callers choose how to treat that:
//!
//! - [`Slot::borrow`] / [`Slot::borrow_mut`] panic on an unbound slot (fail-fast).
//! - [`Slot::get`] and [`find`] return an `Option`.
//! - [`require`] returns [`ComponentError::Missing`].
//!
//! Complexity is `O(slots × components)`, fine for the handful of components an
//! entity typically carries.

use std::cell::{Ref, RefMut};
use std::rc::Rc;

use crate::component::{Component, ComponentTypeId, Shared};
use crate::error::ComponentError;

/// A typed write-target for a query.
pub trait QuerySlot {
    /// The payload type this slot accepts.
    fn component_type(&self) -> ComponentTypeId;

    /// Bind `component` into the slot. Returns `false` if its payload type
    /// does not match.
    fn bind(&mut self, component: &Component) -> bool;
}

/// A query slot for payload type `T`.
#[derive(Debug)]
pub struct Slot<T> {
    bound: Option<Shared<T>>,
}

impl<T: 'static> Slot<T> {
    /// Create an unbound slot.
    #[must_use]
    pub fn new() -> Self {
        Self { bound: None }
    }

    /// Returns `true` if a component has been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// The bound handle, if any.
    #[must_use]
    pub fn get(&self) -> Option<&Shared<T>> {
        self.bound.as_ref()
    }

    /// Consume the slot, returning the bound handle.
    #[must_use]
    pub fn into_inner(self) -> Option<Shared<T>> {
        self.bound
    }

    /// Immutably borrow the bound payload.
    ///
    /// # Panics
    ///
    /// Panics if the slot is unbound, or if the payload is currently mutably
    /// borrowed elsewhere.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, T> {
        match &self.bound {
            Some(shared) => shared.borrow(),
            None => panic!(
                "query slot for component `{}` is unbound",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Mutably borrow the bound payload.
    ///
    /// # Panics
    ///
    /// Panics if the slot is unbound, or if the payload is currently borrowed
    /// elsewhere.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        match &self.bound {
            Some(shared) => shared.borrow_mut(),
            None => panic!(
                "query slot for component `{}` is unbound",
                std::any::type_name::<T>()
            ),
        }
    }
}

impl<T: 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> QuerySlot for Slot<T> {
    fn component_type(&self) -> ComponentTypeId {
        ComponentTypeId::of::<T>()
    }

    fn bind(&mut self, component: &Component) -> bool {
        match component.downcast::<T>() {
            Some(shared) => {
                self.bound = Some(shared);
                true
            }
            None => false,
        }
    }
}

/// Bind each slot to the first component in `available` whose payload type
/// matches the slot's type.
///
/// # Examples
///
/// ```rust
/// use ecs_component::{Component, Slot, query_components};
///
/// struct Position(f32, f32);
/// struct Name(&'static str);
///
/// let components = vec![Component::new(Name("ship")), Component::new(Position(1.0, 2.0))];
///
/// let mut position = Slot::<Position>::new();
/// let mut name = Slot::<Name>::new();
/// query_components(&components, &mut [&mut position, &mut name]);
///
/// assert_eq!(name.borrow().0, "ship");
/// position.borrow_mut().0 += 1.0;
/// ```
pub fn query_components(available: &[Component], slots: &mut [&mut dyn QuerySlot]) {
    for slot in slots.iter_mut() {
        let wanted = slot.component_type();
        if let Some(component) = available.iter().find(|c| c.type_id() == wanted) {
            slot.bind(component);
        }
    }
}

/// Returns a handle to the first component of type `T` in `available`.
#[must_use]
pub fn find<T: 'static>(available: &[Component]) -> Option<Shared<T>> {
    available.iter().find_map(Component::downcast::<T>)
}

/// Like [`find`], but a missing component is an error.
///
/// # Errors
///
/// Returns [`ComponentError::Missing`] if no component of type `T` is present.
pub fn require<T: 'static>(available: &[Component]) -> Result<Shared<T>, ComponentError> {
    find::<T>(available).ok_or(ComponentError::Missing {
        type_name: std::any::type_name::<T>(),
    })
}

/// Returns `true` if both handles point at the same payload.
#[must_use]
pub fn same_payload<T>(a: &Shared<T>, b: &Shared<T>) -> bool {
    Rc::ptr_eq(a, b)
}
