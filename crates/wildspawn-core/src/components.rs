//! Components attached to spawned entities and players
//!
//! The library stores everything it spawns in a hecs [`World`]: players it
//! spawns around, creatures and dropped items it creates. Hosts are free to
//! attach their own components alongside these.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::placement::SpawnSpot;
use crate::world::BlockPos;

/// World-space position in continuous coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_spot(spot: &SpawnSpot) -> Self {
        Self::new(spot.x, spot.y, spot.z)
    }

    /// The block containing this position.
    pub fn block(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    pub fn distance_squared_xz(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

/// A player campaigns spawn around. Offline players keep their components
/// but are skipped by every spawn pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub online: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            online: true,
        }
    }
}

/// Creature kinds the stock spawners know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Zombie,
    Skeleton,
    WitherSkeleton,
    Spider,
    Creeper,
    Wolf,
    Chicken,
    Cow,
    Pig,
    Sheep,
    Blaze,
    MagmaCube,
    Drowned,
    Witch,
    Enderman,
    Endermite,
    Shulker,
    Phantom,
}

impl Species {
    /// Whether this species attacks players. Hostiles are the ones the
    /// aggro hook will point at the player they spawned near.
    pub fn is_hostile(&self) -> bool {
        !matches!(
            self,
            Species::Chicken | Species::Cow | Species::Pig | Species::Sheep
        )
    }
}

/// Marker for a creature created by a spawn campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub species: Species,
}

/// Item kinds the stock item spawner can drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Stone,
    Bread,
    Apple,
    GoldenApple,
    Steak,
    Diamond,
    IronIngot,
    GoldIngot,
    Emerald,
    Arrow,
    Torch,
}

/// A stack of one item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
}

impl ItemStack {
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self { kind, count }
    }

    pub fn single(kind: ItemKind) -> Self {
        Self::new(kind, 1)
    }
}

/// Marker for an item lying on the ground waiting to be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedItem {
    pub stack: ItemStack,
}

/// Hostile-AI target, attached by the creature spawner's post-spawn hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggroTarget {
    pub target: Entity,
}

/// Snapshot of every online player and the block they stand in. Taken once
/// at the start of a spawn pass so players joining or leaving mid-pass do
/// not shift the roster under it.
pub fn online_players(world: &World) -> Vec<(Entity, BlockPos)> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .filter(|(_, (player, _))| player.online)
        .map(|(entity, (_, position))| (entity, position.block()))
        .collect()
}

/// Block position of one actor, or `None` when the entity is missing,
/// lacks player data, or is offline.
pub fn locate_actor(world: &World, actor: Entity) -> Option<BlockPos> {
    let player = world.get::<&Player>(actor).ok()?;
    if !player.online {
        return None;
    }
    let position = world.get::<&Position>(actor).ok()?;
    Some(position.block())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_block_floors_negative_coordinates() {
        let position = Position::new(-0.3, 64.9, 2.5);
        assert_eq!(position.block(), BlockPos::new(-1, 64, 2));
    }

    #[test]
    fn test_locate_actor_requires_online_player_with_position() {
        let mut world = World::new();

        let online = world.spawn((Player::new("alice"), Position::new(1.5, 65.0, 2.5)));
        let offline = world.spawn((
            Player {
                name: "bob".into(),
                online: false,
            },
            Position::new(0.0, 65.0, 0.0),
        ));
        let bodiless = world.spawn((Player::new("carol"),));

        assert_eq!(locate_actor(&world, online), Some(BlockPos::new(1, 65, 2)));
        assert_eq!(locate_actor(&world, offline), None);
        assert_eq!(locate_actor(&world, bodiless), None);

        world.despawn(online).unwrap();
        assert_eq!(locate_actor(&world, online), None);
    }

    #[test]
    fn test_online_players_filters_offline() {
        let mut world = World::new();
        let a = world.spawn((Player::new("alice"), Position::new(0.5, 64.0, 0.5)));
        world.spawn((
            Player {
                name: "bob".into(),
                online: false,
            },
            Position::new(9.0, 64.0, 9.0),
        ));

        let roster = online_players(&world);
        assert_eq!(roster, vec![(a, BlockPos::new(0, 64, 0))]);
    }

    #[test]
    fn test_species_hostility_split() {
        assert!(Species::Zombie.is_hostile());
        assert!(Species::Wolf.is_hostile());
        assert!(Species::Blaze.is_hostile());
        assert!(Species::Shulker.is_hostile());
        assert!(Species::Phantom.is_hostile());
        assert!(!Species::Chicken.is_hostile());
        assert!(!Species::Cow.is_hostile());
    }
}
