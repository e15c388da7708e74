//! Spawn orchestration around an actor
//!
//! Two passes are offered: [`spawn_spread`] scatters objects independently
//! around a player, [`spawn_group`] first places a group center and then
//! packs members tightly around it. Both are generic over what gets created:
//! a factory closure receives each safe spot and decides what (if anything)
//! to put there.
//!
//! Every pass runs on a fixed attempt budget and returns whatever it managed
//! to place. Callers that need all-or-nothing semantics can check the length
//! of the returned batch.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::locate_actor;
use crate::config::SpawnConfig;
use crate::placement::{find_group_spot, find_spawn_spot, random_offset, SpawnSpot};
use crate::registry::{SpawnRegistry, SpawnTag};
use crate::world::{BlockPos, WorldQuery};

/// Picks a seed position in the configured band around an origin.
fn scatter_seed<W: WorldQuery + ?Sized>(
    blocks: &W,
    origin: BlockPos,
    cfg: &SpawnConfig,
    rng: &mut impl Rng,
) -> BlockPos {
    let x = origin.x + random_offset(rng, cfg.min_spawn_radius, cfg.max_spawn_radius);
    let z = origin.z + random_offset(rng, cfg.min_spawn_radius, cfg.max_spawn_radius);
    let y = if cfg.surface_only_spawning {
        blocks.highest_block_y(x, z)
    } else {
        origin.y + random_offset(rng, cfg.min_y_radius, cfg.max_y_radius)
    };
    BlockPos::new(x, y, z)
}

/// Scatters up to `count` objects independently around an actor.
///
/// Each attempt seeds a fresh position in the configured band and runs the
/// placement search from it. When a safe spot is found the factory decides
/// what to create there; a factory that returns `None` still consumes the
/// attempt. Stops as soon as `count` objects exist or the attempt budget
/// runs out, so the result may be shorter than requested.
///
/// An actor that is missing, offline, or has no position yields an empty
/// batch without touching the block world at all.
pub fn spawn_spread<W, T, F>(
    blocks: &W,
    entities: &mut World,
    actor: Entity,
    count: u32,
    config: &SpawnConfig,
    rng: &mut impl Rng,
    mut factory: F,
) -> Vec<T>
where
    W: WorldQuery + ?Sized,
    F: FnMut(&mut World, &SpawnSpot) -> Option<T>,
{
    let Some(origin) = locate_actor(entities, actor) else {
        return Vec::new();
    };
    let cfg = config.normalized();

    let mut spawned = Vec::new();
    let mut attempts = 0;
    while spawned.len() < count as usize && attempts < cfg.max_spawn_attempts {
        attempts += 1;

        let seed = scatter_seed(blocks, origin, &cfg, rng);
        if let Some(spot) = find_spawn_spot(blocks, origin, seed, &cfg, rng) {
            if let Some(object) = factory(entities, &spot) {
                spawned.push(object);
            }
        }
    }
    spawned
}

/// Places up to `count` objects as one cohesive group near an actor.
///
/// Runs in two phases. First a group center is searched for with the same
/// seeding as [`spawn_spread`], spending at most the configured attempt
/// budget; if no center is found the result is empty. Then members are
/// seeded within `group_spacing` blocks of the center on a doubled attempt
/// budget, and each placed member's footprint blocks later candidates from
/// overlapping it.
pub fn spawn_group<W, T, F>(
    blocks: &W,
    entities: &mut World,
    actor: Entity,
    count: u32,
    config: &SpawnConfig,
    rng: &mut impl Rng,
    mut factory: F,
) -> Vec<T>
where
    W: WorldQuery + ?Sized,
    F: FnMut(&mut World, &SpawnSpot) -> Option<T>,
{
    let Some(origin) = locate_actor(entities, actor) else {
        return Vec::new();
    };
    let cfg = config.normalized();

    let mut center = None;
    let mut attempts = 0;
    while center.is_none() && attempts < cfg.max_spawn_attempts {
        attempts += 1;
        let seed = scatter_seed(blocks, origin, &cfg, rng);
        center = find_spawn_spot(blocks, origin, seed, &cfg, rng);
    }
    let Some(center) = center else {
        return Vec::new();
    };
    let anchor = center.block;
    let spacing = cfg.group_spacing;

    let mut spawned = Vec::new();
    let mut taken: Vec<BlockPos> = Vec::new();
    let mut attempts = 0;
    while spawned.len() < count as usize && attempts < cfg.max_spawn_attempts.saturating_mul(2) {
        attempts += 1;

        let x = anchor.x + rng.gen_range(-spacing..=spacing);
        let z = anchor.z + rng.gen_range(-spacing..=spacing);
        let y = if cfg.surface_only_spawning {
            blocks.highest_block_y(x, z)
        } else {
            anchor.y + rng.gen_range(-1..=1)
        };
        let seed = BlockPos::new(x, y, z);

        if let Some(spot) = find_group_spot(blocks, anchor, seed, &cfg, &taken, rng) {
            if let Some(object) = factory(entities, &spot) {
                taken.push(spot.block);
                spawned.push(object);
            }
        }
    }
    spawned
}

/// [`spawn_spread`] for entity factories, recording every spawned entity in
/// the registry under `tag`.
pub fn spawn_tagged_spread<W, F>(
    blocks: &W,
    entities: &mut World,
    actor: Entity,
    count: u32,
    config: &SpawnConfig,
    tag: &SpawnTag,
    registry: &mut SpawnRegistry,
    rng: &mut impl Rng,
    mut factory: F,
) -> Vec<Entity>
where
    W: WorldQuery + ?Sized,
    F: FnMut(&mut World, &SpawnSpot) -> Option<Entity>,
{
    spawn_spread(blocks, entities, actor, count, config, rng, |entities, spot| {
        let entity = factory(entities, spot)?;
        registry.tag(tag, entity);
        Some(entity)
    })
}

/// [`spawn_group`] for entity factories, recording every spawned entity in
/// the registry under `tag`.
pub fn spawn_tagged_group<W, F>(
    blocks: &W,
    entities: &mut World,
    actor: Entity,
    count: u32,
    config: &SpawnConfig,
    tag: &SpawnTag,
    registry: &mut SpawnRegistry,
    rng: &mut impl Rng,
    mut factory: F,
) -> Vec<Entity>
where
    W: WorldQuery + ?Sized,
    F: FnMut(&mut World, &SpawnSpot) -> Option<Entity>,
{
    spawn_group(blocks, entities, actor, count, config, rng, |entities, spot| {
        let entity = factory(entities, spot)?;
        registry.tag(tag, entity);
        Some(entity)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Creature, Player, Position, Species};
    use crate::world::{FlatWorld, Material};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    fn flat() -> FlatWorld {
        FlatWorld::new(64, 0, 256)
    }

    fn player_at(world: &mut World, x: f32, y: f32, z: f32) -> Entity {
        world.spawn((Player::new("tester"), Position::new(x, y, z)))
    }

    fn creature_factory(world: &mut World, spot: &SpawnSpot) -> Option<Entity> {
        Some(world.spawn((
            Creature {
                species: Species::Zombie,
            },
            Position::from_spot(spot),
        )))
    }

    /// Forwards to a flat world while counting every query made against it.
    struct CountingWorld {
        inner: FlatWorld,
        queries: Cell<u32>,
    }

    impl CountingWorld {
        fn new(inner: FlatWorld) -> Self {
            Self {
                inner,
                queries: Cell::new(0),
            }
        }
    }

    impl WorldQuery for CountingWorld {
        fn material_at(&self, pos: BlockPos) -> Material {
            self.queries.set(self.queries.get() + 1);
            self.inner.material_at(pos)
        }

        fn highest_block_y(&self, x: i32, z: i32) -> i32 {
            self.queries.set(self.queries.get() + 1);
            self.inner.highest_block_y(x, z)
        }

        fn min_height(&self) -> i32 {
            self.queries.set(self.queries.get() + 1);
            self.inner.min_height()
        }

        fn max_height(&self) -> i32 {
            self.queries.set(self.queries.get() + 1);
            self.inner.max_height()
        }
    }

    #[test]
    fn test_spread_spawns_count_objects_on_open_ground() {
        let blocks = flat();
        let mut entities = World::new();
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let config = SpawnConfig::new();
        let mut rng = StdRng::seed_from_u64(11);

        let batch = spawn_spread(
            &blocks,
            &mut entities,
            actor,
            5,
            &config,
            &mut rng,
            creature_factory,
        );

        assert_eq!(batch.len(), 5);
        for entity in &batch {
            let position = entities.get::<&Position>(*entity).unwrap();
            let block = position.block();
            assert_eq!(block.y, 65, "everything lands on the ground layer");
            assert!(block.x.abs() <= config.max_spawn_radius);
            assert!(block.z.abs() <= config.max_spawn_radius);
        }
    }

    #[test]
    fn test_spread_stops_at_count_not_budget() {
        let blocks = flat();
        let mut entities = World::new();
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let mut rng = StdRng::seed_from_u64(12);
        let mut calls = 0;

        let batch = spawn_spread(
            &blocks,
            &mut entities,
            actor,
            3,
            &SpawnConfig::new(),
            &mut rng,
            |world, spot| {
                calls += 1;
                creature_factory(world, spot)
            },
        );

        assert_eq!(batch.len(), 3);
        assert_eq!(calls, 3, "open ground places on every attempt");
    }

    #[test]
    fn test_spread_skips_offline_actor_without_world_queries() {
        let blocks = CountingWorld::new(flat());
        let mut entities = World::new();
        let actor = entities.spawn((
            Player {
                name: "gone".into(),
                online: false,
            },
            Position::new(0.5, 65.0, 0.5),
        ));
        let mut rng = StdRng::seed_from_u64(13);

        let batch = spawn_spread(
            &blocks,
            &mut entities,
            actor,
            5,
            &SpawnConfig::new(),
            &mut rng,
            creature_factory,
        );

        assert!(batch.is_empty());
        assert_eq!(blocks.queries.get(), 0, "invalid actors cost no block queries");
    }

    #[test]
    fn test_spread_skips_despawned_actor() {
        let blocks = CountingWorld::new(flat());
        let mut entities = World::new();
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        entities.despawn(actor).unwrap();
        let mut rng = StdRng::seed_from_u64(14);

        let batch = spawn_spread(
            &blocks,
            &mut entities,
            actor,
            5,
            &SpawnConfig::new(),
            &mut rng,
            creature_factory,
        );

        assert!(batch.is_empty());
        assert_eq!(blocks.queries.get(), 0);
    }

    #[test]
    fn test_spread_factory_refusal_consumes_attempts() {
        let blocks = flat();
        let mut entities = World::new();
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let config = SpawnConfig::new();
        let mut rng = StdRng::seed_from_u64(15);
        let mut offered = 0;

        let batch = spawn_spread(
            &blocks,
            &mut entities,
            actor,
            5,
            &config,
            &mut rng,
            |_, _| {
                offered += 1;
                None::<Entity>
            },
        );

        assert!(batch.is_empty());
        assert_eq!(
            offered, config.max_spawn_attempts,
            "a refusing factory burns the whole budget"
        );
    }

    #[test]
    fn test_group_places_cohesive_pack() {
        let blocks = flat();
        let mut entities = World::new();
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let config = SpawnConfig::new()
            .with_min_spawn_radius(3)
            .with_max_spawn_radius(30)
            .with_min_y_radius(3)
            .with_max_y_radius(20)
            .with_max_spawn_attempts(20)
            .with_group_spacing(2);
        let mut rng = StdRng::seed_from_u64(16);

        let batch = spawn_group(
            &blocks,
            &mut entities,
            actor,
            5,
            &config,
            &mut rng,
            creature_factory,
        );

        assert_eq!(batch.len(), 5, "open flat ground fits the whole group");

        let mut spots = Vec::new();
        for entity in &batch {
            let position = entities.get::<&Position>(*entity).unwrap();
            spots.push(position.block());
        }
        for spot in &spots {
            assert_eq!(spot.y, 65);
        }
        for i in 0..spots.len() {
            for j in (i + 1)..spots.len() {
                assert_ne!(spots[i], spots[j], "members never stack");
                let dx = (spots[i].x - spots[j].x).abs();
                let dz = (spots[i].z - spots[j].z).abs();
                assert!(
                    dx <= 2 * config.group_spacing && dz <= 2 * config.group_spacing,
                    "members share a center within the spacing band"
                );
            }
        }
    }

    #[test]
    fn test_group_empty_when_no_center_exists() {
        // Water everywhere above the floor and water spawns not permitted,
        // so the center search can never succeed.
        let mut blocks = flat();
        blocks.flood(200);
        let mut entities = World::new();
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let mut rng = StdRng::seed_from_u64(17);
        let mut offered = 0;

        let batch = spawn_group(
            &blocks,
            &mut entities,
            actor,
            5,
            &SpawnConfig::new(),
            &mut rng,
            |_, _| {
                offered += 1;
                None::<Entity>
            },
        );

        assert!(batch.is_empty());
        assert_eq!(offered, 0, "no members are attempted without a center");
    }

    #[test]
    fn test_tagged_spread_records_every_entity() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        let tag = SpawnTag::new("horde");
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let mut rng = StdRng::seed_from_u64(18);

        let batch = spawn_tagged_spread(
            &blocks,
            &mut entities,
            actor,
            4,
            &SpawnConfig::new(),
            &tag,
            &mut registry,
            &mut rng,
            creature_factory,
        );

        assert_eq!(batch.len(), 4);
        assert_eq!(registry.tagged(&tag), batch.as_slice());
    }

    #[test]
    fn test_tagged_group_records_every_entity() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        let tag = SpawnTag::new("pack");
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let config = SpawnConfig::new().with_group_spacing(2);
        let mut rng = StdRng::seed_from_u64(19);

        let batch = spawn_tagged_group(
            &blocks,
            &mut entities,
            actor,
            5,
            &config,
            &tag,
            &mut registry,
            &mut rng,
            creature_factory,
        );

        assert_eq!(batch.len(), 5);
        assert_eq!(registry.tagged(&tag), batch.as_slice());
    }

    #[test]
    fn test_tagged_spread_ignores_factory_refusals() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        let tag = SpawnTag::new("nothing");
        let actor = player_at(&mut entities, 0.5, 65.0, 0.5);
        let mut rng = StdRng::seed_from_u64(20);

        let batch = spawn_tagged_spread(
            &blocks,
            &mut entities,
            actor,
            5,
            &SpawnConfig::new(),
            &tag,
            &mut registry,
            &mut rng,
            |_, _| None,
        );

        assert!(batch.is_empty());
        assert_eq!(registry.count(&tag), 0);
    }
}
