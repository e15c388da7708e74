//! Stock spawner implementations
//!
//! [`CreatureSpawner`] places creatures and can point hostile ones at the
//! player they spawned near. [`ItemDropSpawner`] places item stacks on the
//! ground. Hosts with richer domains implement [`Spawner`] themselves.

use hecs::{Entity, World};

use crate::campaign::Spawner;
use crate::components::{AggroTarget, Creature, DroppedItem, ItemStack, Position, Species};
use crate::placement::SpawnSpot;

/// Spawns creatures of a requested species.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatureSpawner {
    aggro: bool,
}

impl CreatureSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, every hostile creature gets an [`AggroTarget`] pointing
    /// at the player it spawned near.
    pub fn with_aggro(mut self, aggro: bool) -> Self {
        self.aggro = aggro;
        self
    }
}

impl Spawner for CreatureSpawner {
    type Kind = Species;

    fn create(&mut self, entities: &mut World, spot: &SpawnSpot, kind: &Species) -> Option<Entity> {
        Some(entities.spawn((Creature { species: *kind }, Position::from_spot(spot))))
    }

    fn after_spawn(&mut self, entities: &mut World, spawned: Entity, player: Entity) {
        if !self.aggro {
            return;
        }
        let hostile = entities
            .get::<&Creature>(spawned)
            .map(|creature| creature.species.is_hostile())
            .unwrap_or(false);
        if hostile {
            entities.insert_one(spawned, AggroTarget { target: player }).ok();
        }
    }
}

/// Spawns item stacks lying on the ground.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemDropSpawner;

impl ItemDropSpawner {
    pub fn new() -> Self {
        Self
    }
}

impl Spawner for ItemDropSpawner {
    type Kind = ItemStack;

    fn create(
        &mut self,
        entities: &mut World,
        spot: &SpawnSpot,
        kind: &ItemStack,
    ) -> Option<Entity> {
        Some(entities.spawn((DroppedItem { stack: *kind }, Position::from_spot(spot))))
    }
}
