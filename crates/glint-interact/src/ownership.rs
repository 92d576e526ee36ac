//! Mapping a hit collider back to the interactable that owns it

use glint_core::{EntityId, Result};
use glint_ecs::{GlintWorld, Moveable};
use tracing::warn;

/// Number of hierarchy levels checked, counting the hit entity itself as level 0
pub const MAX_OWNERSHIP_DEPTH: usize = 6;

/// A successful ownership match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ownership {
    /// Levels walked from the hit entity up to the owner (0 = the owner was hit directly)
    pub depth: usize,
    /// Moveable capability found on the hit entity, or else on the owner or its ancestors
    pub moveable: Option<EntityId>,
}

/// Walk from `hit` up its ancestor chain looking for `owner`.
///
/// Levels 0 through `MAX_OWNERSHIP_DEPTH - 1` are compared; reaching a root
/// or running out of levels is a miss. Fails only if `hit` is not in the world.
pub fn resolve_ownership(
    world: &GlintWorld,
    hit: EntityId,
    owner: EntityId,
) -> Result<Option<Ownership>> {
    let mut moveable = if world.has::<Moveable>(hit)? {
        Some(hit)
    } else {
        None
    };

    let mut current = hit;
    for depth in 0..MAX_OWNERSHIP_DEPTH {
        if current == owner {
            if moveable.is_none() {
                moveable = world.find_in_ancestors::<Moveable>(current);
            }
            return Ok(Some(Ownership { depth, moveable }));
        }

        match world.get_parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    Ok(None)
}

/// `resolve_ownership`, with lookup failures logged and reported as a miss
pub fn owned_by(world: &GlintWorld, hit: EntityId, owner: EntityId) -> Option<Ownership> {
    match resolve_ownership(world, hit, owner) {
        Ok(found) => found,
        Err(e) => {
            warn!(hit = %hit, owner = %owner, error = %e, "ownership walk failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root <- level1 <- level2 <- ... ; returns ids ordered from root down
    fn chain(world: &mut GlintWorld, len: usize) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = Vec::new();
        for i in 0..len {
            let id = world.spawn(format!("node_{}", i)).unwrap();
            if let Some(parent) = ids.last() {
                world.set_parent(id, *parent).unwrap();
            }
            ids.push(id);
        }
        ids
    }

    #[test]
    fn test_direct_hit_matches_at_depth_zero() {
        let mut world = GlintWorld::new();
        let owner = world.spawn("crate").unwrap();

        let found = resolve_ownership(&world, owner, owner).unwrap().unwrap();
        assert_eq!(found.depth, 0);
        assert_eq!(found.moveable, None);
    }

    #[test]
    fn test_descendants_up_to_five_levels_match() {
        let mut world = GlintWorld::new();
        let ids = chain(&mut world, 6);
        let owner = ids[0];

        for (level, hit) in ids.iter().enumerate() {
            let found = resolve_ownership(&world, *hit, owner).unwrap();
            assert_eq!(found.map(|o| o.depth), Some(level), "level {}", level);
        }
    }

    #[test]
    fn test_six_levels_below_is_a_miss() {
        let mut world = GlintWorld::new();
        let ids = chain(&mut world, 7);

        assert_eq!(resolve_ownership(&world, ids[6], ids[0]).unwrap(), None);
        // One level closer is still in reach
        assert!(resolve_ownership(&world, ids[5], ids[0]).unwrap().is_some());
    }

    #[test]
    fn test_unrelated_entity_is_a_miss() {
        let mut world = GlintWorld::new();
        let owner = world.spawn("door").unwrap();
        let other = world.spawn("lamp").unwrap();
        let child = world.spawn("lamp_shade").unwrap();
        world.set_parent(child, other).unwrap();

        assert_eq!(resolve_ownership(&world, child, owner).unwrap(), None);
        // The owner's own parent is not the owner
        world.set_parent(owner, other).unwrap();
        assert_eq!(resolve_ownership(&world, other, owner).unwrap(), None);
    }

    #[test]
    fn test_moveable_on_hit_entity() {
        let mut world = GlintWorld::new();
        let ids = chain(&mut world, 3);
        world.insert(ids[2], Moveable).unwrap();
        world.insert(ids[0], Moveable).unwrap();

        let found = resolve_ownership(&world, ids[2], ids[0]).unwrap().unwrap();
        assert_eq!(found.moveable, Some(ids[2]));
    }

    #[test]
    fn test_moveable_searched_from_owner_upwards() {
        let mut world = GlintWorld::new();
        let room = world.spawn("room").unwrap();
        let ids = chain(&mut world, 3);
        world.set_parent(ids[0], room).unwrap();
        world.insert(room, Moveable).unwrap();
        // Moveable on an entity between hit and owner is not considered
        world.insert(ids[1], Moveable).unwrap();

        let found = resolve_ownership(&world, ids[2], ids[0]).unwrap().unwrap();
        assert_eq!(found.moveable, Some(room));
    }

    #[test]
    fn test_missing_hit_entity_is_logged_miss() {
        let mut world = GlintWorld::new();
        let owner = world.spawn("door").unwrap();
        let ghost = EntityId::from_raw(u64::MAX - 1);

        assert!(resolve_ownership(&world, ghost, owner).is_err());
        assert_eq!(owned_by(&world, ghost, owner), None);
    }
}
