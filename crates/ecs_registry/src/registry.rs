//! The registry: entity/component bookkeeping and per-frame dispatch.
//!
//! The [`Registry`] owns:
//!
//! - the entity → components mapping (components kept in registration order),
//! - the system → entities associations,
//! - the updaters, in registration order,
//! - the drawers, bucketed by z-index.
//!
//! Each frame the host calls [`Registry::update`] and then
//! [`Registry::draw`]. Registration and unregistration happen between frames;
//! both traversals borrow the registry for their whole duration, so the
//! structure cannot change underneath a running system.

use std::collections::{BTreeMap, HashMap};

use ecs_component::{
    Component, ComponentMap, EntityAllocator, EntityId, QuerySlot, query_components,
};
use ecs_system::{Drawer, SystemAllocator, SystemId, Updater};
use tracing::{debug, trace, warn};

use crate::config::RegistryConfig;
use crate::error::RegistryError;

/// The ECS core, generic over the host's drawing surface `S`.
///
/// # Examples
///
/// ```rust
/// use ecs_component::{Component, ComponentMap, EntityId, require};
/// use ecs_registry::Registry;
/// use ecs_system::{System, SystemId, Updater};
///
/// struct Counter {
///     value: i64,
/// }
///
/// struct Decrement(SystemId);
///
/// impl System for Decrement {
///     fn id(&self) -> SystemId {
///         self.0
///     }
/// }
///
/// impl Updater for Decrement {
///     fn update(
///         &mut self,
///         _entity: EntityId,
///         components: &[Component],
///         _world: &ComponentMap,
///     ) -> anyhow::Result<()> {
///         require::<Counter>(components)?.borrow_mut().value -= 1;
///         Ok(())
///     }
/// }
///
/// let mut registry = Registry::<()>::new();
/// let e1 = registry.spawn();
/// let counter = Component::new(Counter { value: 10 });
/// registry.register_entity(e1, [counter.clone()]);
///
/// let id = registry.next_system_id();
/// registry.register_updater(Decrement(id), &[e1]);
///
/// for _ in 0..3 {
///     registry.update().unwrap();
/// }
/// assert_eq!(counter.downcast::<Counter>().unwrap().borrow().value, 7);
/// ```
pub struct Registry<S: ?Sized> {
    /// Entity ID allocator.
    entities: EntityAllocator,
    /// System ID allocator.
    systems: SystemAllocator,
    /// Entity → components, each list in registration order.
    components: ComponentMap,
    /// System → associated entities, in accumulation order.
    associations: HashMap<SystemId, Vec<EntityId>>,
    /// Update-capable systems in registration order.
    updaters: Vec<Box<dyn Updater>>,
    /// Draw-capable systems keyed by z-index, each bucket in registration order.
    drawers: BTreeMap<i32, Vec<Box<dyn Drawer<S>>>>,
}

impl<S: ?Sized> Registry<S> {
    /// Create an empty registry with default capacity hints.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Create an empty registry sized by `config`.
    #[must_use]
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            entities: EntityAllocator::new(),
            systems: SystemAllocator::new(),
            components: HashMap::with_capacity(config.entity_capacity),
            associations: HashMap::with_capacity(config.system_capacity),
            updaters: Vec::with_capacity(config.system_capacity),
            drawers: BTreeMap::new(),
        }
    }

    /// Issue a fresh entity ID. The entity has no components until
    /// [`Registry::register_entity`] is called.
    pub fn spawn(&mut self) -> EntityId {
        self.entities.allocate()
    }

    /// Issue a fresh system ID, for constructing a system before registering it.
    pub fn next_system_id(&mut self) -> SystemId {
        self.systems.allocate()
    }

    /// Append `components` to `entity`'s component list.
    ///
    /// The entity becomes known to the registry even if `components` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `entity` was not issued by [`Registry::spawn`].
    pub fn register_entity<I>(&mut self, entity: EntityId, components: I)
    where
        I: IntoIterator<Item = Component>,
    {
        assert!(
            self.entities.issued(entity),
            "{entity} was not issued by this registry"
        );

        let list = self.components.entry(entity).or_default();
        let before = list.len();
        list.extend(components);

        debug!(
            entity = entity.id(),
            added = list.len() - before,
            total = list.len(),
            "registered entity components"
        );
    }

    /// Remove `entity` from every system's associations and drop its
    /// components.
    ///
    /// The remaining associations keep their relative order. Unregistering an
    /// unknown entity is a no-op.
    pub fn unregister_entity(&mut self, entity: EntityId) {
        for associated in self.associations.values_mut() {
            associated.retain(|&e| e != entity);
        }

        if let Some(components) = self.components.remove(&entity) {
            debug!(
                entity = entity.id(),
                components = components.len(),
                "unregistered entity"
            );
        }
    }

    /// Append `updater` to the update list and extend its associations with
    /// `entities`.
    ///
    /// Registering the same system twice makes it run twice per entity per
    /// frame, and its associations accumulate rather than replace.
    pub fn register_updater<U>(&mut self, updater: U, entities: &[EntityId])
    where
        U: Updater + 'static,
    {
        let id = updater.id();
        self.associate(id, entities);
        self.updaters.push(Box::new(updater));

        debug!(
            system = id.id(),
            entities = entities.len(),
            updaters = self.updaters.len(),
            "registered updater"
        );
    }

    /// Append `drawer` to the bucket at `z_index` and extend its associations
    /// with `entities`.
    pub fn register_drawer<D>(&mut self, drawer: D, z_index: i32, entities: &[EntityId])
    where
        D: Drawer<S> + 'static,
    {
        let id = drawer.id();
        self.associate(id, entities);
        self.drawers.entry(z_index).or_default().push(Box::new(drawer));

        debug!(
            system = id.id(),
            z_index,
            entities = entities.len(),
            "registered drawer"
        );
    }

    /// Remove every updater and drawer registered under `system`, along with
    /// its associations. Unregistering an unknown system is a no-op.
    pub fn unregister_system(&mut self, system: SystemId) {
        self.updaters.retain(|u| u.id() != system);
        for bucket in self.drawers.values_mut() {
            bucket.retain(|d| d.id() != system);
        }
        self.drawers.retain(|_, bucket| !bucket.is_empty());

        if self.associations.remove(&system).is_some() {
            debug!(system = system.id(), "unregistered system");
        }
    }

    fn associate(&mut self, system: SystemId, entities: &[EntityId]) {
        self.associations
            .entry(system)
            .or_default()
            .extend_from_slice(entities);
    }

    /// Run the query engine over `entity`'s components.
    ///
    /// For an unknown entity every slot is left untouched.
    pub fn query_entity_components(&self, entity: EntityId, slots: &mut [&mut dyn QuerySlot]) {
        query_components(self.components(entity), slots);
    }

    /// The components registered under `entity`, in registration order.
    /// Empty for an unknown entity.
    #[must_use]
    pub fn components(&self, entity: EntityId) -> &[Component] {
        self.components.get(&entity).map(Vec::as_slice).unwrap_or_default()
    }

    /// The entities associated with `system`, in accumulation order, duplicates
    /// included. Empty for an unknown system.
    #[must_use]
    pub fn filter_entities(&self, system: SystemId) -> &[EntityId] {
        self.associations.get(&system).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if `entity` currently has a component list.
    #[must_use]
    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.components.contains_key(&entity)
    }

    /// Returns the number of entities with a component list.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.components.len()
    }

    /// The registered updaters' IDs, in dispatch order.
    #[must_use]
    pub fn updater_ids(&self) -> Vec<SystemId> {
        self.updaters.iter().map(|u| u.id()).collect()
    }

    /// The drawer buckets as `(z_index, drawer IDs)`, in dispatch order.
    #[must_use]
    pub fn drawer_layers(&self) -> Vec<(i32, Vec<SystemId>)> {
        self.drawers
            .iter()
            .map(|(&z, bucket)| (z, bucket.iter().map(|d| d.id()).collect()))
            .collect()
    }

    /// Run every updater over its associated entities.
    ///
    /// Updaters run in registration order, and each one visits its entities in
    /// association order. Every call receives the entity's own components and
    /// the full entity → components map.
    ///
    /// # Errors
    ///
    /// Stops at the first updater error and returns it as
    /// [`RegistryError::Update`]; nothing else runs this frame. The error's
    /// `Display` names the failing system and entity ahead of the updater's
    /// message. [`RegistryError::into_update_source`] returns the updater's
    /// error itself, unchanged.
    pub fn update(&mut self) -> Result<(), RegistryError> {
        for updater in &mut self.updaters {
            let system = updater.id();
            let Some(entities) = self.associations.get(&system) else {
                continue;
            };

            for &entity in entities {
                let own = self.components.get(&entity).map(Vec::as_slice).unwrap_or_default();
                trace!(system = system.id(), entity = entity.id(), "update");

                if let Err(source) = updater.update(entity, own, &self.components) {
                    warn!(
                        system = system.id(),
                        entity = entity.id(),
                        error = %source,
                        "updater failed, aborting frame updates"
                    );
                    return Err(RegistryError::Update {
                        system,
                        entity,
                        source,
                    });
                }
            }
        }

        Ok(())
    }

    /// Run every drawer over its associated entities onto `surface`.
    ///
    /// Buckets are visited in ascending z-index order; within a bucket,
    /// drawers run in registration order, each over its entities in
    /// association order.
    pub fn draw(&mut self, surface: &mut S) {
        for (&z_index, bucket) in &mut self.drawers {
            for drawer in bucket.iter_mut() {
                let system = drawer.id();
                let Some(entities) = self.associations.get(&system) else {
                    continue;
                };

                for &entity in entities {
                    let own = self.components.get(&entity).map(Vec::as_slice).unwrap_or_default();
                    trace!(system = system.id(), entity = entity.id(), z_index, "draw");
                    drawer.draw(surface, own);
                }
            }
        }
    }
}

impl<S: ?Sized> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.components.len())
            .field("updaters", &self.updaters.len())
            .field("drawer_layers", &self.drawers.len())
            .field("associations", &self.associations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ecs_component::{Slot, find};
    use ecs_system::System;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: i64,
    }

    struct Named(&'static str);

    /// Records every entity it sees.
    struct Probe {
        id: SystemId,
    }

    impl System for Probe {
        fn id(&self) -> SystemId {
            self.id
        }
    }

    impl Updater for Probe {
        fn update(
            &mut self,
            _entity: EntityId,
            _components: &[Component],
            _world: &ComponentMap,
        ) -> anyhow::Result<()> {
            Ok(())
        }
    }

    impl Drawer<Vec<(SystemId, usize)>> for Probe {
        fn draw(&mut self, surface: &mut Vec<(SystemId, usize)>, components: &[Component]) {
            surface.push((self.id, components.len()));
        }
    }

    type TestRegistry = Registry<Vec<(SystemId, usize)>>;

    #[test]
    fn test_register_entity_appends_in_order() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        registry.register_entity(e, [Component::new(Counter { value: 1 })]);
        registry.register_entity(e, [Component::new(Named("n"))]);

        let components = registry.components(e);
        assert_eq!(components.len(), 2);
        assert!(components[0].is::<Counter>());
        assert!(components[1].is::<Named>());
    }

    #[test]
    fn test_register_entity_without_components_is_known() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        registry.register_entity(e, []);
        assert!(registry.contains_entity(e));
        assert_eq!(registry.entity_count(), 1);
    }

    #[test]
    #[should_panic(expected = "was not issued by this registry")]
    fn test_register_foreign_entity_panics() {
        let mut registry = TestRegistry::new();
        registry.register_entity(EntityId::from_raw(99), [Component::new(Named("x"))]);
    }

    #[test]
    fn test_associations_accumulate() {
        let mut registry = TestRegistry::new();
        let e1 = registry.spawn();
        let e2 = registry.spawn();
        let id = registry.next_system_id();

        registry.register_updater(Probe { id }, &[e1]);
        registry.register_drawer(Probe { id }, 0, &[e2, e1]);

        assert_eq!(registry.filter_entities(id), &[e1, e2, e1]);
    }

    #[test]
    fn test_filter_unknown_system_is_empty() {
        let registry = TestRegistry::new();
        assert!(registry.filter_entities(SystemId::from_raw(5)).is_empty());
    }

    #[test]
    fn test_unregister_entity_is_stable_and_idempotent() {
        let mut registry = TestRegistry::new();
        let e1 = registry.spawn();
        let e2 = registry.spawn();
        let e3 = registry.spawn();
        for e in [e1, e2, e3] {
            registry.register_entity(e, [Component::new(Counter { value: 0 })]);
        }
        let id = registry.next_system_id();
        registry.register_updater(Probe { id }, &[e1, e2, e3, e2]);

        registry.unregister_entity(e2);
        assert_eq!(registry.filter_entities(id), &[e1, e3]);
        assert!(!registry.contains_entity(e2));

        registry.unregister_entity(e2);
        assert_eq!(registry.filter_entities(id), &[e1, e3]);
        assert_eq!(registry.entity_count(), 2);
    }

    #[test]
    fn test_query_unregistered_entity_leaves_slots_unbound() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        registry.register_entity(e, [Component::new(Counter { value: 3 })]);
        registry.unregister_entity(e);

        let mut counter = Slot::<Counter>::new();
        registry.query_entity_components(e, &mut [&mut counter]);
        assert!(!counter.is_bound());
    }

    #[test]
    fn test_query_entity_components() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        registry.register_entity(
            e,
            [
                Component::new(Named("first")),
                Component::new(Counter { value: 3 }),
            ],
        );

        let mut counter = Slot::<Counter>::new();
        let mut name = Slot::<Named>::new();
        registry.query_entity_components(e, &mut [&mut counter, &mut name]);

        assert_eq!(counter.borrow().value, 3);
        assert_eq!(name.borrow().0, "first");
    }

    #[test]
    fn test_draw_visits_buckets_in_ascending_order() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        registry.register_entity(e, [Component::new(Counter { value: 0 })]);

        let high = registry.next_system_id();
        let low = registry.next_system_id();
        let negative = registry.next_system_id();
        registry.register_drawer(Probe { id: high }, 10, &[e]);
        registry.register_drawer(Probe { id: low }, 5, &[e]);
        registry.register_drawer(Probe { id: negative }, -1, &[e]);

        let mut surface = Vec::new();
        registry.draw(&mut surface);

        let order: Vec<_> = surface.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![negative, low, high]);
    }

    #[test]
    fn test_draw_within_bucket_uses_registration_order() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        let a = registry.next_system_id();
        let b = registry.next_system_id();
        registry.register_drawer(Probe { id: b }, 1, &[e]);
        registry.register_drawer(Probe { id: a }, 1, &[e]);

        let mut surface = Vec::new();
        registry.draw(&mut surface);

        assert_eq!(surface, vec![(b, 0), (a, 0)]);
    }

    #[test]
    fn test_duplicate_updater_registration_runs_twice() {
        struct Inc(SystemId);
        impl System for Inc {
            fn id(&self) -> SystemId {
                self.0
            }
        }
        impl Updater for Inc {
            fn update(
                &mut self,
                _entity: EntityId,
                components: &[Component],
                _world: &ComponentMap,
            ) -> anyhow::Result<()> {
                if let Some(c) = find::<Counter>(components) {
                    c.borrow_mut().value += 1;
                }
                Ok(())
            }
        }

        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        let counter = Component::new(Counter { value: 0 });
        registry.register_entity(e, [counter.clone()]);
        let id = registry.next_system_id();
        registry.register_updater(Inc(id), &[e]);
        registry.register_updater(Inc(id), &[]);

        registry.update().unwrap();

        // Two updater entries, each visiting the shared association list once.
        assert_eq!(counter.downcast::<Counter>().unwrap().borrow().value, 2);
        assert_eq!(registry.updater_ids(), vec![id, id]);
    }

    #[test]
    fn test_unregister_system() {
        let mut registry = TestRegistry::new();
        let e = registry.spawn();
        let keep = registry.next_system_id();
        let gone = registry.next_system_id();
        registry.register_updater(Probe { id: gone }, &[e]);
        registry.register_updater(Probe { id: keep }, &[e]);
        registry.register_drawer(Probe { id: gone }, 3, &[e]);
        registry.register_drawer(Probe { id: keep }, 4, &[e]);

        registry.unregister_system(gone);
        registry.unregister_system(gone);

        assert_eq!(registry.updater_ids(), vec![keep]);
        assert_eq!(registry.drawer_layers(), vec![(4, vec![keep])]);
        assert!(registry.filter_entities(gone).is_empty());
    }

    #[test]
    fn test_with_config() {
        let config = RegistryConfig::default().with_entity_capacity(4);
        let registry = TestRegistry::with_config(&config);
        assert_eq!(registry.entity_count(), 0);
        assert!(format!("{registry:?}").contains("Registry"));
    }
}
