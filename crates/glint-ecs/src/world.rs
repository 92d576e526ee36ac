//! GlintWorld - entity arena with stable IDs, names and parent links

use crate::component::{Position, Tags};
use bimap::BiMap;
use glint_core::{EntityId, GlintError, Result, Vec3};
use std::collections::HashMap;

/// The entity arena for Glint
///
/// Wraps hecs::World with:
/// - Stable EntityId mapping
/// - Named entity lookup
/// - Child -> parent links that never form a cycle
pub struct GlintWorld {
    /// The underlying hecs world
    world: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    /// Entity name -> EntityId mapping
    name_map: HashMap<String, EntityId>,
    /// Parent relationships: child -> parent
    parents: HashMap<EntityId, EntityId>,
}

impl Default for GlintWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GlintWorld {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            name_map: HashMap::new(),
            parents: HashMap::new(),
        }
    }

    /// Spawn a new entity with a name
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();

        if self.name_map.contains_key(&name) {
            return Err(GlintError::DuplicateEntityName(name));
        }

        let entity_id = EntityId::new();
        let hecs_entity = self.world.spawn(());

        self.id_map.insert(entity_id, hecs_entity);
        self.name_map.insert(name, entity_id);

        Ok(entity_id)
    }

    /// Get entity ID by name
    pub fn get_id(&self, name: &str) -> Option<EntityId> {
        self.name_map.get(name).copied()
    }

    /// Get entity ID by name, failing if it does not exist
    pub fn require_id(&self, name: &str) -> Result<EntityId> {
        self.get_id(name)
            .ok_or_else(|| GlintError::EntityNotFound(name.to_string()))
    }

    /// Get entity name by ID
    pub fn get_name(&self, id: EntityId) -> Option<&str> {
        self.name_map
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    /// Attach a component, replacing any previous value of the same type
    pub fn insert<C: hecs::Component>(&mut self, id: EntityId, component: C) -> Result<()> {
        let entity = self.handle(id)?;
        self.world
            .insert_one(entity, component)
            .map_err(|_| GlintError::EntityNotFound(id.to_string()))
    }

    /// Borrow a component
    pub fn get<C: hecs::Component>(&self, id: EntityId) -> Option<hecs::Ref<'_, C>> {
        let entity = *self.id_map.get_by_left(&id)?;
        self.world.get::<&C>(entity).ok()
    }

    /// Mutably borrow a component
    pub fn get_mut<C: hecs::Component>(&self, id: EntityId) -> Option<hecs::RefMut<'_, C>> {
        let entity = *self.id_map.get_by_left(&id)?;
        self.world.get::<&mut C>(entity).ok()
    }

    /// Does the entity carry a component of type `C`?
    ///
    /// Unlike `get`, asking about an entity that does not exist is an error.
    pub fn has<C: hecs::Component>(&self, id: EntityId) -> Result<bool> {
        let entity = self.handle(id)?;
        self.world
            .entity(entity)
            .map(|e| e.has::<C>())
            .map_err(|_| GlintError::EntityNotFound(id.to_string()))
    }

    /// All entities carrying a component of type `C`
    pub fn entities_with<C: hecs::Component>(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .world
            .query::<&C>()
            .iter()
            .filter_map(|(entity, _)| self.id_map.get_by_right(&entity).copied())
            .collect();
        ids.sort();
        ids
    }

    /// First entity (lowest ID) carrying the given tag
    pub fn find_tagged(&self, tag: &str) -> Option<EntityId> {
        let mut query = self.world.query::<&Tags>();
        let found = query
            .iter()
            .filter(|(_, tags)| tags.has(tag))
            .filter_map(|(entity, _)| self.id_map.get_by_right(&entity).copied())
            .min();
        found
    }

    /// World-space position, if the entity has one
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.get::<Position>(id).map(|p| p.0)
    }

    /// Set parent relationship
    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) -> Result<()> {
        if !self.id_map.contains_left(&child) {
            return Err(GlintError::EntityNotFound(child.to_string()));
        }
        if !self.id_map.contains_left(&parent) {
            return Err(GlintError::EntityNotFound(parent.to_string()));
        }

        // The new parent must not be the child itself or one of its descendants
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(GlintError::HierarchyCycle {
                    child: self.display_name(child),
                    parent: self.display_name(parent),
                });
            }
            cursor = self.parents.get(&current).copied();
        }

        self.parents.insert(child, parent);
        Ok(())
    }

    /// Set parent by name
    pub fn set_parent_by_name(&mut self, child: &str, parent: &str) -> Result<()> {
        let child_id = self.require_id(child)?;
        let parent_id = self.require_id(parent)?;
        self.set_parent(child_id, parent_id)
    }

    /// Get parent of an entity
    pub fn get_parent(&self, child: EntityId) -> Option<EntityId> {
        self.parents.get(&child).copied()
    }

    /// The entity itself followed by each of its ancestors, nearest first
    pub fn self_and_ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(Some(id), move |current| self.get_parent(*current))
    }

    /// Nearest entity carrying `C`, searching `id` and then its ancestors
    pub fn find_in_ancestors<C: hecs::Component>(&self, id: EntityId) -> Option<EntityId> {
        self.self_and_ancestors(id)
            .find(|candidate| self.has::<C>(*candidate).unwrap_or(false))
    }

    /// Get number of entities
    pub fn entity_count(&self) -> usize {
        self.name_map.len()
    }

    /// Check if an entity exists
    pub fn contains(&self, id: EntityId) -> bool {
        self.id_map.contains_left(&id)
    }

    /// Check if an entity with name exists
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_map.contains_key(name)
    }

    fn handle(&self, id: EntityId) -> Result<hecs::Entity> {
        self.id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| GlintError::EntityNotFound(id.to_string()))
    }

    fn display_name(&self, id: EntityId) -> String {
        self.get_name(id)
            .map(String::from)
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Moveable, MovementController};

    #[test]
    fn test_spawn_and_get() {
        let mut world = GlintWorld::new();
        let id = world.spawn("test_entity").unwrap();

        assert!(world.contains(id));
        assert!(world.contains_name("test_entity"));
        assert_eq!(world.get_id("test_entity"), Some(id));
        assert_eq!(world.get_name(id), Some("test_entity"));
    }

    #[test]
    fn test_duplicate_name() {
        let mut world = GlintWorld::new();
        world.spawn("test").unwrap();

        assert!(matches!(
            world.spawn("test"),
            Err(GlintError::DuplicateEntityName(_))
        ));
    }

    #[test]
    fn test_parent_child() {
        let mut world = GlintWorld::new();
        let parent = world.spawn("parent").unwrap();
        let child = world.spawn("child").unwrap();

        world.set_parent(child, parent).unwrap();

        assert_eq!(world.get_parent(child), Some(parent));
        let chain: Vec<_> = world.self_and_ancestors(child).collect();
        assert_eq!(chain, vec![child, parent]);
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let mut world = GlintWorld::new();
        let a = world.spawn("a").unwrap();
        let b = world.spawn("b").unwrap();
        let c = world.spawn("c").unwrap();
        world.set_parent(b, a).unwrap();
        world.set_parent(c, b).unwrap();

        assert!(matches!(
            world.set_parent(a, c),
            Err(GlintError::HierarchyCycle { .. })
        ));
        assert!(matches!(
            world.set_parent(a, a),
            Err(GlintError::HierarchyCycle { .. })
        ));
        assert_eq!(world.get_parent(a), None);
    }

    #[test]
    fn test_typed_components() {
        let mut world = GlintWorld::new();
        let id = world.spawn("player").unwrap();
        world.insert(id, Tags::new(["Player"])).unwrap();
        world.insert(id, MovementController::default()).unwrap();
        world.insert(id, Position(Vec3::new(1.0, 2.0, 3.0))).unwrap();

        assert_eq!(world.find_tagged("Player"), Some(id));
        assert_eq!(world.position(id), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(world.has::<MovementController>(id).unwrap());
        assert!(!world.has::<Moveable>(id).unwrap());

        world.get_mut::<MovementController>(id).unwrap().enabled = false;
        assert!(!world.get::<MovementController>(id).unwrap().enabled);
    }

    #[test]
    fn test_has_on_missing_entity_is_error() {
        let world = GlintWorld::new();
        assert!(matches!(
            world.has::<Moveable>(EntityId::from_raw(u64::MAX)),
            Err(GlintError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_find_in_ancestors() {
        let mut world = GlintWorld::new();
        let root = world.spawn("cabinet").unwrap();
        let mid = world.spawn("drawer").unwrap();
        let leaf = world.spawn("handle").unwrap();
        world.set_parent(mid, root).unwrap();
        world.set_parent(leaf, mid).unwrap();
        world.insert(mid, Moveable).unwrap();

        assert_eq!(world.find_in_ancestors::<Moveable>(leaf), Some(mid));
        assert_eq!(world.find_in_ancestors::<Moveable>(root), None);
        assert_eq!(world.entities_with::<Moveable>(), vec![mid]);
    }
}
