//! Wildspawn Core - Safe Spawn Placement and Campaigns
//!
//! A library for spawning creatures and item drops around players in a
//! block world: find spots that are actually safe to stand on (solid floor,
//! clear headroom, no unwanted liquids), then run named spawn campaigns
//! over them, one-shot or on a repeating schedule.
//!
//! # Architecture
//!
//! Spawned objects live in a [`hecs`] ECS world owned by the host. The block
//! world stays behind the [`world::WorldQuery`] trait, so the same search
//! runs against a real game map, the bundled [`world::FlatWorld`], or
//! anything else. The library never owns a clock or a thread: hosts drive
//! continuous campaigns by calling `tick` with their own tick counter.
//!
//! # Example
//!
//! ```rust,no_run
//! use wildspawn_core::prelude::*;
//! use wildspawn_core::presets;
//!
//! let blocks = FlatWorld::new(64, 0, 256);
//! let mut entities = hecs::World::new();
//! let mut registry = SpawnRegistry::new();
//!
//! entities.spawn((Player::new("alice"), Position::new(0.5, 65.0, 0.5)));
//!
//! let mut campaign = presets::wolf_pack();
//! campaign.execute(0, &blocks, &mut entities, &mut registry);
//!
//! // Later: undo everything this campaign spawned.
//! registry.remove_all(campaign.tag(), &mut entities);
//! ```
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`world`] | Block positions, materials, and the [`world::WorldQuery`] seam |
//! | [`config`] | Placement tuning knobs shared by searches and campaigns |
//! | [`placement`] | The safe-spot search: seed, test, correct, reseed |
//! | [`spawning`] | Spread and group orchestration around a player |
//! | [`registry`] | Tagging spawned entities for bulk cleanup |
//! | [`schedule`] | Tick time and repeating schedules |
//! | [`components`] | hecs components for players, creatures, and drops |
//! | [`campaign`] | Campaign lifecycle: execute, tick, terminate |
//! | [`spawners`] | Stock creature and item-drop spawners |
//! | [`presets`] | Tuned ready-made campaigns |
//! | [`profiles`] | JSON campaign profiles |

pub mod campaign;
pub mod components;
pub mod config;
pub mod placement;
pub mod presets;
pub mod profiles;
pub mod registry;
pub mod schedule;
pub mod spawners;
pub mod spawning;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::campaign::{SpawnCampaign, Spawner};
    pub use crate::components::{
        AggroTarget, Creature, DroppedItem, ItemKind, ItemStack, Player, Position, Species,
    };
    pub use crate::config::SpawnConfig;
    pub use crate::placement::{find_group_spot, find_spawn_spot, SpawnSpot};
    pub use crate::registry::{SpawnRegistry, SpawnTag};
    pub use crate::schedule::{RepeatingTask, Tick, TICKS_PER_SECOND};
    pub use crate::spawners::{CreatureSpawner, ItemDropSpawner};
    pub use crate::spawning::{spawn_group, spawn_spread, spawn_tagged_group, spawn_tagged_spread};
    pub use crate::world::{BlockPos, FlatWorld, Material, WorldQuery};
}
