//! Spawn campaigns
//!
//! A [`SpawnCampaign`] bundles everything one recurring spawn concern needs:
//! a placement configuration, a roster of kinds to pick from, a [`Spawner`]
//! that turns safe spots into entities, and an optional repeating schedule.
//! Campaigns are driven entirely by the host: `execute` starts them,
//! `tick` advances continuous ones, `terminate` stops them.
//!
//! Everything a campaign spawns is stamped with its tag in the
//! [`SpawnRegistry`], so `registry.remove_all(campaign.tag(), world)` undoes
//! a campaign without touching anything else.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::{online_players, Player};
use crate::config::SpawnConfig;
use crate::placement::SpawnSpot;
use crate::registry::{SpawnRegistry, SpawnTag};
use crate::schedule::{RepeatingTask, Tick, TICKS_PER_SECOND};
use crate::spawning::{spawn_tagged_group, spawn_tagged_spread};
use crate::world::WorldQuery;

const DEFAULT_SPAWN_COUNT: u32 = 5;
const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Creates domain objects at safe spots on behalf of a campaign.
pub trait Spawner {
    /// What this spawner can be asked to create, e.g. a species or an item
    /// stack.
    type Kind: Clone + PartialEq + std::fmt::Debug;

    /// Creates one object of `kind` at `spot`. Returning `None` declines
    /// the spot; the placement attempt is still spent.
    fn create(
        &mut self,
        entities: &mut World,
        spot: &SpawnSpot,
        kind: &Self::Kind,
    ) -> Option<Entity>;

    /// Called once per spawned entity after a whole pass completes, with
    /// the player the pass ran for.
    fn after_spawn(&mut self, _entities: &mut World, _spawned: Entity, _player: Entity) {}
}

/// One named spawn concern with its own config, kind roster, and schedule.
pub struct SpawnCampaign<S: Spawner> {
    name: String,
    tag: SpawnTag,
    config: SpawnConfig,
    spawner: S,
    default_kind: S::Kind,
    kinds: Vec<(S::Kind, f64)>,
    spawn_count: u32,
    interval_secs: u64,
    use_group_spawning: bool,
    use_continuous_spawning: bool,
    use_random_kinds: bool,
    task: Option<RepeatingTask>,
    last_spawn_count: u32,
    search_rng: StdRng,
    kind_rng: StdRng,
}

/// Draws one kind from a weighted roster, or the default when random
/// selection is off or the roster is empty.
fn pick_kind<K: Clone>(kinds: &[(K, f64)], default: &K, use_random: bool, rng: &mut impl Rng) -> K {
    if !use_random || kinds.is_empty() {
        return default.clone();
    }
    let total: f64 = kinds.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return match kinds.last() {
            Some((kind, _)) => kind.clone(),
            None => default.clone(),
        };
    }
    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (kind, weight) in kinds {
        cumulative += weight;
        if roll <= cumulative {
            return kind.clone();
        }
    }
    match kinds.last() {
        Some((kind, _)) => kind.clone(),
        None => default.clone(),
    }
}

impl<S: Spawner> SpawnCampaign<S> {
    /// A one-shot spread campaign spawning five of `default_kind` with the
    /// default placement config. The campaign's tag is its name.
    pub fn new(name: impl Into<String>, default_kind: S::Kind, spawner: S) -> Self {
        let name = name.into();
        let tag = SpawnTag::new(name.clone());
        Self {
            name,
            tag,
            config: SpawnConfig::new(),
            spawner,
            default_kind,
            kinds: Vec::new(),
            spawn_count: DEFAULT_SPAWN_COUNT,
            interval_secs: DEFAULT_INTERVAL_SECS,
            use_group_spawning: false,
            use_continuous_spawning: false,
            use_random_kinds: false,
            task: None,
            last_spawn_count: 0,
            search_rng: StdRng::from_entropy(),
            kind_rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the roster with equally weighted kinds and enables random
    /// selection. The first kind becomes the default.
    pub fn with_kinds(mut self, kinds: Vec<S::Kind>) -> Self {
        self.kinds = kinds.into_iter().map(|kind| (kind, 1.0)).collect();
        self.use_random_kinds = true;
        if let Some((head, _)) = self.kinds.first() {
            self.default_kind = head.clone();
        }
        self
    }

    /// Replaces the roster with explicitly weighted kinds and enables random
    /// selection. The first kind becomes the default.
    pub fn with_weighted_kinds(mut self, kinds: Vec<(S::Kind, f64)>) -> Self {
        self.kinds = kinds;
        self.use_random_kinds = true;
        if let Some((head, _)) = self.kinds.first() {
            self.default_kind = head.clone();
        }
        self
    }

    /// Overrides the default kind without touching the roster.
    pub fn with_default_kind(mut self, kind: S::Kind) -> Self {
        self.default_kind = kind;
        self
    }

    pub fn with_config(mut self, config: SpawnConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_spawn_count(mut self, count: u32) -> Self {
        self.spawn_count = count;
        self
    }

    pub fn with_interval_secs(mut self, seconds: u64) -> Self {
        self.interval_secs = seconds;
        self
    }

    pub fn with_group_spawning(mut self, enabled: bool) -> Self {
        self.use_group_spawning = enabled;
        self
    }

    pub fn with_continuous_spawning(mut self, enabled: bool) -> Self {
        self.use_continuous_spawning = enabled;
        self
    }

    pub fn with_random_kinds(mut self, enabled: bool) -> Self {
        self.use_random_kinds = enabled;
        self
    }

    /// Seeds both random streams, making the campaign fully deterministic.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.search_rng = StdRng::seed_from_u64(seed);
        self.kind_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        self
    }

    pub fn with_max_spawn_radius(mut self, radius: i32) -> Self {
        self.config = self.config.with_max_spawn_radius(radius);
        self
    }

    pub fn with_min_spawn_radius(mut self, radius: i32) -> Self {
        self.config = self.config.with_min_spawn_radius(radius);
        self
    }

    pub fn with_max_y_radius(mut self, radius: i32) -> Self {
        self.config = self.config.with_max_y_radius(radius);
        self
    }

    pub fn with_min_y_radius(mut self, radius: i32) -> Self {
        self.config = self.config.with_min_y_radius(radius);
        self
    }

    pub fn with_max_spawn_attempts(mut self, attempts: i32) -> Self {
        self.config = self.config.with_max_spawn_attempts(attempts);
        self
    }

    pub fn with_width_clearance(mut self, clearance: f64) -> Self {
        self.config = self.config.with_width_clearance(clearance);
        self
    }

    pub fn with_height_clearance(mut self, clearance: f64) -> Self {
        self.config = self.config.with_height_clearance(clearance);
        self
    }

    pub fn with_group_spacing(mut self, spacing: i32) -> Self {
        self.config = self.config.with_group_spacing(spacing);
        self
    }

    pub fn with_surface_only_spawning(mut self, enabled: bool) -> Self {
        self.config = self.config.with_surface_only_spawning(enabled);
        self
    }

    pub fn with_allow_water_spawns(mut self, enabled: bool) -> Self {
        self.config = self.config.with_allow_water_spawns(enabled);
        self
    }

    pub fn with_allow_lava_spawns(mut self, enabled: bool) -> Self {
        self.config = self.config.with_allow_lava_spawns(enabled);
        self
    }

    pub fn with_center_y(mut self, enabled: bool) -> Self {
        self.config = self.config.with_center_y(enabled);
        self
    }

    /// Adds a kind with weight one, skipping duplicates.
    pub fn add_kind(&mut self, kind: S::Kind) -> &mut Self {
        if !self.kinds.iter().any(|(existing, _)| *existing == kind) {
            self.kinds.push((kind, 1.0));
        }
        self
    }

    pub fn add_weighted_kind(&mut self, kind: S::Kind, weight: f64) -> &mut Self {
        self.kinds.push((kind, weight));
        self
    }

    /// Removes a kind from the roster. If it was the default, the head of
    /// the remaining roster becomes the default.
    pub fn remove_kind(&mut self, kind: &S::Kind) -> &mut Self {
        self.kinds.retain(|(existing, _)| existing != kind);
        if self.default_kind == *kind {
            if let Some((head, _)) = self.kinds.first() {
                self.default_kind = head.clone();
            }
        }
        self
    }

    /// Replaces the roster with equally weighted kinds. The first kind
    /// becomes the default; an empty roster keeps the current default.
    pub fn set_kinds(&mut self, kinds: Vec<S::Kind>) -> &mut Self {
        self.kinds = kinds.into_iter().map(|kind| (kind, 1.0)).collect();
        if let Some((head, _)) = self.kinds.first() {
            self.default_kind = head.clone();
        }
        self
    }

    /// Shrinks the roster to just the current default kind.
    pub fn clear_kinds(&mut self) -> &mut Self {
        self.kinds = vec![(self.default_kind.clone(), 1.0)];
        self
    }

    /// Starts the campaign.
    ///
    /// One-shot campaigns run a full spawn pass immediately and record the
    /// tally; they can be executed again later. Continuous campaigns install
    /// a repeating schedule that first fires one second after `now`, and
    /// refuse (returning false) if one is already installed.
    pub fn execute<W: WorldQuery + ?Sized>(
        &mut self,
        now: Tick,
        blocks: &W,
        entities: &mut World,
        registry: &mut SpawnRegistry,
    ) -> bool {
        self.last_spawn_count = 0;

        if self.use_continuous_spawning {
            if !self.start_continuous_task(now) {
                log::warn!("{}: continuous spawning is already running", self.name);
                return false;
            }
            log::info!(
                "{}: started continuous spawning every {}s",
                self.name,
                self.interval_secs
            );
            true
        } else {
            let player_count = online_players(entities).len();
            let total = self.spawn_for_all_players(blocks, entities, registry);
            self.last_spawn_count = total;
            log::info!(
                "{}: spawned {} objects across {} players",
                self.name,
                total,
                player_count
            );
            true
        }
    }

    /// Polls the continuous schedule and runs a spawn pass when it is due.
    /// Returns how many objects were spawned this tick.
    pub fn tick<W: WorldQuery + ?Sized>(
        &mut self,
        now: Tick,
        blocks: &W,
        entities: &mut World,
        registry: &mut SpawnRegistry,
    ) -> u32 {
        let due = match &mut self.task {
            Some(task) => task.fire_due(now),
            None => false,
        };
        if !due {
            return 0;
        }
        let total = self.spawn_for_all_players(blocks, entities, registry);
        self.last_spawn_count = total;
        total
    }

    /// Stops continuous spawning. Returns false when nothing was running.
    pub fn terminate(&mut self) -> bool {
        if self.stop_continuous_task() {
            log::info!("{}: stopped continuous spawning", self.name);
            true
        } else {
            log::warn!("{}: no continuous spawning to stop", self.name);
            false
        }
    }

    /// Installs the repeating schedule if none is active. The first firing
    /// comes one second after `now`, then every `interval_secs`.
    pub fn start_continuous_task(&mut self, now: Tick) -> bool {
        if self.task.is_some() {
            return false;
        }
        self.task = Some(RepeatingTask::new(
            now,
            TICKS_PER_SECOND,
            self.interval_secs.saturating_mul(TICKS_PER_SECOND),
        ));
        true
    }

    pub fn stop_continuous_task(&mut self) -> bool {
        self.task.take().is_some()
    }

    /// Runs one spawn pass for every online player and returns the total
    /// spawned. The roster is snapshotted up front; post-spawn hooks run
    /// after the whole pass so late hooks see the full batch.
    pub fn spawn_for_all_players<W: WorldQuery + ?Sized>(
        &mut self,
        blocks: &W,
        entities: &mut World,
        registry: &mut SpawnRegistry,
    ) -> u32 {
        let players = online_players(entities);
        let mut placed: Vec<(Entity, Entity)> = Vec::new();

        for (player, _) in &players {
            let batch = self.spawn_for_player(blocks, entities, registry, *player);
            let name = entities
                .get::<&Player>(*player)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            log::debug!("{}: spawned {} objects for {}", self.name, batch.len(), name);
            placed.extend(batch.into_iter().map(|entity| (entity, *player)));
        }

        let total = placed.len() as u32;
        for (entity, player) in placed {
            self.spawner.after_spawn(entities, entity, player);
        }
        total
    }

    /// Runs one spawn pass around a single player, honoring the campaign's
    /// group / spread mode and kind selection.
    pub fn spawn_for_player<W: WorldQuery + ?Sized>(
        &mut self,
        blocks: &W,
        entities: &mut World,
        registry: &mut SpawnRegistry,
        player: Entity,
    ) -> Vec<Entity> {
        let SpawnCampaign {
            config,
            tag,
            spawner,
            default_kind,
            kinds,
            spawn_count,
            use_group_spawning,
            use_random_kinds,
            search_rng,
            kind_rng,
            ..
        } = self;

        let factory = |entities: &mut World, spot: &SpawnSpot| {
            let kind = pick_kind(kinds, default_kind, *use_random_kinds, kind_rng);
            spawner.create(entities, spot, &kind)
        };

        if *use_group_spawning {
            spawn_tagged_group(
                blocks,
                entities,
                player,
                *spawn_count,
                config,
                tag,
                registry,
                search_rng,
                factory,
            )
        } else {
            spawn_tagged_spread(
                blocks,
                entities,
                player,
                *spawn_count,
                config,
                tag,
                registry,
                search_rng,
                factory,
            )
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &SpawnTag {
        &self.tag
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SpawnConfig {
        &mut self.config
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn spawner_mut(&mut self) -> &mut S {
        &mut self.spawner
    }

    pub fn kinds(&self) -> &[(S::Kind, f64)] {
        &self.kinds
    }

    pub fn default_kind(&self) -> &S::Kind {
        &self.default_kind
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn last_spawn_count(&self) -> u32 {
        self.last_spawn_count
    }

    pub fn spawn_count(&self) -> u32 {
        self.spawn_count
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn uses_group_spawning(&self) -> bool {
        self.use_group_spawning
    }

    pub fn uses_continuous_spawning(&self) -> bool {
        self.use_continuous_spawning
    }

    pub fn uses_random_kinds(&self) -> bool {
        self.use_random_kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Creature, Position, Species};
    use crate::world::FlatWorld;

    #[derive(Default)]
    struct RecordingSpawner {
        hooks: Vec<(Entity, Entity)>,
    }

    impl Spawner for RecordingSpawner {
        type Kind = Species;

        fn create(
            &mut self,
            entities: &mut World,
            spot: &SpawnSpot,
            kind: &Species,
        ) -> Option<Entity> {
            Some(entities.spawn((Creature { species: *kind }, Position::from_spot(spot))))
        }

        fn after_spawn(&mut self, _entities: &mut World, spawned: Entity, player: Entity) {
            self.hooks.push((spawned, player));
        }
    }

    fn flat() -> FlatWorld {
        FlatWorld::new(64, 0, 256)
    }

    fn online_player(world: &mut World, name: &str, x: f32, z: f32) -> Entity {
        world.spawn((Player::new(name), Position::new(x, 65.0, z)))
    }

    fn species_in_world(world: &World) -> Vec<Species> {
        world
            .query::<&Creature>()
            .iter()
            .map(|(_, creature)| creature.species)
            .collect()
    }

    #[test]
    fn test_one_shot_execute_covers_every_online_player() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        let alice = online_player(&mut entities, "alice", 0.5, 0.5);
        let bob = online_player(&mut entities, "bob", 200.5, 200.5);
        entities.spawn((
            Player {
                name: "offline".into(),
                online: false,
            },
            Position::new(400.0, 65.0, 400.0),
        ));

        let mut campaign = SpawnCampaign::new("horde", Species::Zombie, RecordingSpawner::default())
            .with_spawn_count(3)
            .with_rng_seed(1);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));
        assert_eq!(campaign.last_spawn_count(), 6);
        assert_eq!(registry.count(campaign.tag()), 6);

        let hooks = &campaign.spawner().hooks;
        assert_eq!(hooks.len(), 6);
        assert_eq!(hooks.iter().filter(|(_, p)| *p == alice).count(), 3);
        assert_eq!(hooks.iter().filter(|(_, p)| *p == bob).count(), 3);
    }

    #[test]
    fn test_one_shot_campaigns_are_repeatable() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        online_player(&mut entities, "alice", 0.5, 0.5);

        let mut campaign = SpawnCampaign::new("horde", Species::Zombie, RecordingSpawner::default())
            .with_spawn_count(2)
            .with_rng_seed(2);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));
        assert!(campaign.execute(100, &blocks, &mut entities, &mut registry));
        assert_eq!(campaign.last_spawn_count(), 2);
        assert_eq!(registry.count(campaign.tag()), 4);
    }

    #[test]
    fn test_continuous_execute_refuses_double_start() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        online_player(&mut entities, "alice", 0.5, 0.5);

        let mut campaign = SpawnCampaign::new("invasion", Species::Zombie, RecordingSpawner::default())
            .with_continuous_spawning(true)
            .with_rng_seed(3);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));
        assert!(campaign.is_running());
        assert_eq!(
            registry.count(campaign.tag()),
            0,
            "nothing spawns until the first firing"
        );

        assert!(!campaign.execute(5, &blocks, &mut entities, &mut registry));

        assert!(campaign.terminate());
        assert!(!campaign.is_running());
        assert!(!campaign.terminate(), "second terminate has nothing to stop");

        assert!(campaign.execute(10, &blocks, &mut entities, &mut registry));
        assert!(campaign.is_running());
    }

    #[test]
    fn test_continuous_campaign_fires_on_schedule() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        online_player(&mut entities, "alice", 0.5, 0.5);

        let mut campaign = SpawnCampaign::new("invasion", Species::Zombie, RecordingSpawner::default())
            .with_continuous_spawning(true)
            .with_interval_secs(2)
            .with_spawn_count(2)
            .with_rng_seed(4);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));

        assert_eq!(campaign.tick(0, &blocks, &mut entities, &mut registry), 0);
        assert_eq!(campaign.tick(19, &blocks, &mut entities, &mut registry), 0);
        assert_eq!(
            campaign.tick(20, &blocks, &mut entities, &mut registry),
            2,
            "first firing lands one second after start"
        );
        assert_eq!(campaign.tick(59, &blocks, &mut entities, &mut registry), 0);
        assert_eq!(
            campaign.tick(60, &blocks, &mut entities, &mut registry),
            2,
            "then every interval"
        );
        assert_eq!(registry.count(campaign.tag()), 4);
    }

    #[test]
    fn test_random_kinds_draw_from_the_roster() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        online_player(&mut entities, "alice", 0.5, 0.5);

        let mut campaign = SpawnCampaign::new("mixed", Species::Zombie, RecordingSpawner::default())
            .with_kinds(vec![Species::Zombie, Species::Chicken])
            .with_spawn_count(20)
            .with_rng_seed(5);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));

        let species = species_in_world(&entities);
        assert_eq!(species.len(), 20);
        assert!(species
            .iter()
            .all(|s| *s == Species::Zombie || *s == Species::Chicken));
        assert!(species.contains(&Species::Zombie));
        assert!(species.contains(&Species::Chicken));
    }

    #[test]
    fn test_zero_weight_kinds_are_never_drawn() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        online_player(&mut entities, "alice", 0.5, 0.5);

        let mut campaign = SpawnCampaign::new("skewed", Species::Zombie, RecordingSpawner::default())
            .with_weighted_kinds(vec![(Species::Chicken, 10.0), (Species::Zombie, 0.0)])
            .with_spawn_count(10)
            .with_rng_seed(6);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));

        let species = species_in_world(&entities);
        assert_eq!(species.len(), 10);
        assert!(species.iter().all(|s| *s == Species::Chicken));
    }

    #[test]
    fn test_default_kind_used_when_random_selection_off() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        online_player(&mut entities, "alice", 0.5, 0.5);

        let mut campaign = SpawnCampaign::new("plain", Species::Witch, RecordingSpawner::default())
            .with_spawn_count(4)
            .with_rng_seed(7);
        campaign.add_kind(Species::Zombie);
        campaign.add_kind(Species::Chicken);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));

        let species = species_in_world(&entities);
        assert_eq!(species.len(), 4);
        assert!(species.iter().all(|s| *s == Species::Witch));
    }

    #[test]
    fn test_kind_roster_management() {
        let mut campaign =
            SpawnCampaign::new("roster", Species::Zombie, RecordingSpawner::default());

        campaign.add_kind(Species::Zombie);
        campaign.add_kind(Species::Zombie);
        assert_eq!(campaign.kinds().len(), 1, "duplicates are skipped");

        campaign.add_weighted_kind(Species::Skeleton, 2.0);
        assert_eq!(campaign.kinds().len(), 2);

        campaign.remove_kind(&Species::Zombie);
        assert_eq!(campaign.kinds().len(), 1);
        assert_eq!(
            *campaign.default_kind(),
            Species::Skeleton,
            "removing the default promotes the roster head"
        );

        campaign.set_kinds(vec![Species::Wolf, Species::Witch]);
        assert_eq!(*campaign.default_kind(), Species::Wolf);

        campaign.clear_kinds();
        assert_eq!(campaign.kinds().len(), 1);
        assert_eq!(campaign.kinds()[0].0, Species::Wolf);
    }

    #[test]
    fn test_execute_with_no_players_spawns_nothing() {
        let blocks = flat();
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();

        let mut campaign = SpawnCampaign::new("empty", Species::Zombie, RecordingSpawner::default())
            .with_rng_seed(8);

        assert!(campaign.execute(0, &blocks, &mut entities, &mut registry));
        assert_eq!(campaign.last_spawn_count(), 0);
        assert_eq!(registry.count(campaign.tag()), 0);
    }
}
