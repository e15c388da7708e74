//! Ready-made campaigns
//!
//! Tuned spawn campaigns for common scenarios. Each returns a fully
//! configured [`SpawnCampaign`] that can be customized further with the
//! builder methods before use.

use crate::campaign::SpawnCampaign;
use crate::components::{ItemKind, ItemStack, Species};
use crate::spawners::{CreatureSpawner, ItemDropSpawner};

/// Five angry wolves in a tight pack, each targeting the player they
/// spawned near.
pub fn wolf_pack() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("wolf_pack", Species::Wolf, CreatureSpawner::new().with_aggro(true))
        .with_spawn_count(5)
        .with_group_spawning(true)
        .with_group_spacing(2)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(3)
        .with_max_y_radius(20)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_width_clearance(1.0)
        .with_height_clearance(1.0)
}

/// A small flock of chickens in a group.
pub fn chicken_flock() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("chicken_flock", Species::Chicken, CreatureSpawner::new())
        .with_spawn_count(5)
        .with_group_spawning(true)
        .with_group_spacing(2)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(3)
        .with_max_y_radius(20)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_width_clearance(1.0)
        .with_height_clearance(1.0)
}

/// A herd of cows in a group. Cows need two blocks of headroom.
pub fn cow_herd() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("cow_herd", Species::Cow, CreatureSpawner::new())
        .with_spawn_count(5)
        .with_group_spawning(true)
        .with_group_spacing(2)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(3)
        .with_max_y_radius(20)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_width_clearance(1.0)
        .with_height_clearance(2.0)
}

/// Ten zombies scattered around each player, all at once.
pub fn zombie_horde() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("zombie_horde", Species::Zombie, CreatureSpawner::new())
        .with_spawn_count(10)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(3)
        .with_max_y_radius(20)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_height_clearance(2.0)
}

/// A slow trickle of zombies: one per player every twenty seconds until
/// terminated.
pub fn zombie_invasion() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("zombie_invasion", Species::Zombie, CreatureSpawner::new())
        .with_spawn_count(1)
        .with_continuous_spawning(true)
        .with_interval_secs(20)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(3)
        .with_max_y_radius(20)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_height_clearance(2.0)
}

/// One creeper placed close by with a tall vertical band, so it tends to
/// appear above the player and drop in.
pub fn drop_creeper() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("drop_creeper", Species::Creeper, CreatureSpawner::new())
        .with_spawn_count(1)
        .with_max_spawn_radius(10)
        .with_min_spawn_radius(3)
        .with_max_y_radius(30)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_height_clearance(2.0)
}

/// Fifteen assorted nether creatures, with lava accepted as a floor.
pub fn nether_raid() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("nether_raid", Species::Blaze, CreatureSpawner::new())
        .with_kinds(vec![
            Species::Blaze,
            Species::MagmaCube,
            Species::WitherSkeleton,
        ])
        .with_spawn_count(15)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(5)
        .with_max_y_radius(20)
        .with_min_y_radius(5)
        .with_max_spawn_attempts(20)
        .with_height_clearance(2.0)
        .with_allow_lava_spawns(true)
}

/// Fifteen assorted End creatures scattered around each player.
pub fn end_raid() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("end_raid", Species::Enderman, CreatureSpawner::new())
        .with_kinds(vec![
            Species::Enderman,
            Species::Endermite,
            Species::Shulker,
            Species::Phantom,
        ])
        .with_spawn_count(15)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(5)
        .with_max_y_radius(20)
        .with_min_y_radius(5)
        .with_max_spawn_attempts(20)
        .with_height_clearance(2.0)
}

/// Ten creatures drawn uniformly from the whole species roster.
pub fn random_menagerie() -> SpawnCampaign<CreatureSpawner> {
    SpawnCampaign::new("random_menagerie", Species::Zombie, CreatureSpawner::new())
        .with_kinds(vec![
            Species::Zombie,
            Species::Skeleton,
            Species::WitherSkeleton,
            Species::Spider,
            Species::Creeper,
            Species::Wolf,
            Species::Chicken,
            Species::Cow,
            Species::Pig,
            Species::Sheep,
            Species::Blaze,
            Species::MagmaCube,
            Species::Drowned,
            Species::Witch,
            Species::Enderman,
            Species::Endermite,
            Species::Shulker,
            Species::Phantom,
        ])
        .with_spawn_count(10)
        .with_max_spawn_radius(30)
        .with_min_spawn_radius(3)
        .with_max_y_radius(20)
        .with_min_y_radius(3)
        .with_max_spawn_attempts(20)
        .with_height_clearance(2.0)
}

/// A banquet dropped close around each player, weighted toward staple food
/// with the occasional golden apple.
pub fn feast() -> SpawnCampaign<ItemDropSpawner> {
    SpawnCampaign::new(
        "feast",
        ItemStack::single(ItemKind::Bread),
        ItemDropSpawner::new(),
    )
    .with_weighted_kinds(vec![
        (ItemStack::single(ItemKind::GoldenApple), 0.5),
        (ItemStack::single(ItemKind::Steak), 3.0),
        (ItemStack::single(ItemKind::Bread), 5.0),
        (ItemStack::single(ItemKind::Apple), 5.0),
    ])
    .with_spawn_count(32)
    .with_max_spawn_radius(20)
    .with_min_spawn_radius(1)
    .with_max_y_radius(10)
    .with_min_y_radius(1)
    .with_max_spawn_attempts(20)
    .with_width_clearance(1.0)
    .with_height_clearance(1.0)
    .with_center_y(true)
}

/// A shower of assorted drops around each player.
pub fn drop_party() -> SpawnCampaign<ItemDropSpawner> {
    SpawnCampaign::new(
        "drop_party",
        ItemStack::single(ItemKind::Stone),
        ItemDropSpawner::new(),
    )
    .with_kinds(vec![
        ItemStack::single(ItemKind::Stone),
        ItemStack::single(ItemKind::Bread),
        ItemStack::single(ItemKind::Apple),
        ItemStack::single(ItemKind::Steak),
        ItemStack::single(ItemKind::Diamond),
        ItemStack::single(ItemKind::IronIngot),
        ItemStack::single(ItemKind::GoldIngot),
        ItemStack::single(ItemKind::Emerald),
        ItemStack::single(ItemKind::Arrow),
        ItemStack::single(ItemKind::Torch),
    ])
    .with_spawn_count(32)
    .with_max_spawn_radius(20)
    .with_min_spawn_radius(1)
    .with_max_y_radius(10)
    .with_min_y_radius(1)
    .with_max_spawn_attempts(20)
    .with_width_clearance(1.0)
    .with_height_clearance(1.0)
    .with_center_y(true)
}
