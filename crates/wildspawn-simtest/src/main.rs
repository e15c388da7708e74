//! Wildspawn Headless Spawn Harness
//!
//! Exercises placement, orchestration, and campaign scheduling end to end
//! against the bundled flat world. Runs entirely in-process, with no game
//! server attached.
//!
//! Usage:
//!   cargo run -p wildspawn-simtest
//!   cargo run -p wildspawn-simtest -- --verbose

use hecs::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wildspawn_core::prelude::*;
use wildspawn_core::presets;
use wildspawn_core::profiles::{creature_campaign, item_campaign, load_profiles, SpawnerChoice};

// ── Campaign profiles (same JSON a deployment would ship) ───────────────
const PROFILES_JSON: &str = include_str!("../../../data/spawn_profiles.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Wildspawn Spawn Harness ===\n");

    let mut results = Vec::new();

    // 1. Profile manifest validation
    results.extend(validate_profile_manifest(verbose));

    // 2. Spread placement sweep
    results.extend(validate_spread_placement(verbose));

    // 3. Group cohesion
    results.extend(validate_group_cohesion(verbose));

    // 4. Hostile terrain handling
    results.extend(validate_hostile_terrain(verbose));

    // 5. Continuous campaign schedule
    results.extend(validate_continuous_schedule(verbose));

    // 6. Registry cleanup
    results.extend(validate_registry_cleanup(verbose));

    // 7. Preset roster
    results.extend(validate_preset_roster(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn flat() -> FlatWorld {
    FlatWorld::new(64, 0, 256)
}

fn spawn_player(entities: &mut World, name: &str, x: f32, z: f32) -> hecs::Entity {
    entities.spawn((Player::new(name), Position::new(x, 65.0, z)))
}

// ── 1. Profile Manifest ─────────────────────────────────────────────────

fn validate_profile_manifest(verbose: bool) -> Vec<TestResult> {
    println!("--- Profile Manifest ---");
    let mut results = Vec::new();

    // Raw JSON shape first, then the typed schema.
    let raw: Result<serde_json::Value, _> = serde_json::from_str(PROFILES_JSON);
    results.push(TestResult {
        name: "profiles_valid_json".into(),
        passed: raw.is_ok(),
        detail: match &raw {
            Ok(_) => "file parses as JSON".into(),
            Err(e) => format!("JSON error: {}", e),
        },
    });

    let profiles = match load_profiles(PROFILES_JSON) {
        Ok(p) => p,
        Err(e) => {
            results.push(TestResult {
                name: "profiles_schema".into(),
                passed: false,
                detail: format!("schema error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "profiles_loaded".into(),
        passed: profiles.len() >= 4,
        detail: format!("{} campaigns loaded", profiles.len()),
    });

    let mut names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    let unique = {
        let mut deduped = names.clone();
        deduped.dedup();
        deduped.len() == names.len()
    };
    results.push(TestResult {
        name: "profiles_unique_names".into(),
        passed: unique,
        detail: if unique {
            "campaign names are unique".into()
        } else {
            "duplicate campaign names".into()
        },
    });

    let bad_counts: Vec<_> = profiles.iter().filter(|p| p.count == 0).collect();
    results.push(TestResult {
        name: "profiles_positive_counts".into(),
        passed: bad_counts.is_empty(),
        detail: format!("{} campaigns with zero count", bad_counts.len()),
    });

    let bad_weights: Vec<_> = profiles
        .iter()
        .flat_map(|p| p.kinds.iter().map(move |k| (p.name.as_str(), k.weight)))
        .filter(|(_, w)| *w < 0.0)
        .collect();
    results.push(TestResult {
        name: "profiles_nonnegative_weights".into(),
        passed: bad_weights.is_empty(),
        detail: format!("{} negative kind weights", bad_weights.len()),
    });

    let bad_intervals: Vec<_> = profiles
        .iter()
        .filter(|p| p.continuous && p.interval_secs == 0)
        .collect();
    results.push(TestResult {
        name: "profiles_continuous_intervals".into(),
        passed: bad_intervals.is_empty(),
        detail: format!(
            "{} continuous campaigns with zero interval",
            bad_intervals.len()
        ),
    });

    // Every profile must instantiate with its declared spawner.
    let mut build_failures = Vec::new();
    for profile in &profiles {
        let outcome = match profile.spawner {
            SpawnerChoice::Creature => creature_campaign(profile).map(|_| ()).err(),
            SpawnerChoice::ItemDrop => item_campaign(profile).map(|_| ()).err(),
        };
        if let Some(e) = outcome {
            build_failures.push(format!("{}: {}", profile.name, e));
        }
    }
    results.push(TestResult {
        name: "profiles_instantiate".into(),
        passed: build_failures.is_empty(),
        detail: if build_failures.is_empty() {
            "every profile builds a campaign".into()
        } else {
            build_failures.join("; ")
        },
    });

    if verbose {
        for profile in &profiles {
            println!(
                "    {} ({:?}, count {}, {} kinds)",
                profile.name,
                profile.spawner,
                profile.count,
                profile.kinds.len()
            );
        }
    }

    results
}

// ── 2. Spread Placement ─────────────────────────────────────────────────

fn validate_spread_placement(verbose: bool) -> Vec<TestResult> {
    println!("--- Spread Placement ---");
    let mut results = Vec::new();

    // Open ground fills the requested count exactly.
    let blocks = flat();
    let mut entities = World::new();
    let actor = spawn_player(&mut entities, "scout", 0.5, 0.5);
    let config = SpawnConfig::new();
    let mut rng = StdRng::seed_from_u64(101);

    let batch = spawn_spread(&blocks, &mut entities, actor, 8, &config, &mut rng, |w, s| {
        Some(w.spawn((
            Creature {
                species: Species::Zombie,
            },
            Position::from_spot(s),
        )))
    });
    results.push(TestResult {
        name: "spread_fills_count_on_open_ground".into(),
        passed: batch.len() == 8,
        detail: format!("{}/8 placed", batch.len()),
    });

    // Cluttered sweep: every returned spot must be genuinely standable and
    // inside the horizontal band, across many anchors.
    let mut cluttered = flat();
    let mut scatter = StdRng::seed_from_u64(102);
    for _ in 0..1500 {
        let pos = BlockPos::new(
            scatter.gen_range(-60..=60),
            65 + scatter.gen_range(0..=2),
            scatter.gen_range(-60..=60),
        );
        cluttered.set_block(pos, Material::Stone);
    }
    let config = SpawnConfig::new().with_height_clearance(2.0);

    let mut found = 0;
    let mut unsafe_spots = 0;
    let mut out_of_band = 0;
    let rounds = 40;
    for round in 0..rounds {
        let mut rng = StdRng::seed_from_u64(200 + round);
        let anchor = BlockPos::new(
            rng.gen_range(-30..=30),
            65,
            rng.gen_range(-30..=30),
        );
        let seed = BlockPos::new(
            anchor.x + rng.gen_range(-20..=20),
            anchor.y + rng.gen_range(-20..=20),
            anchor.z + rng.gen_range(-20..=20),
        );
        let Some(spot) = find_spawn_spot(&cluttered, anchor, seed, &config, &mut rng) else {
            continue;
        };
        found += 1;

        let cell = cluttered.material_at(spot.block);
        let head = cluttered.material_at(spot.block.above());
        let standable = cell == Material::Air
            && head == Material::Air
            && cluttered.is_solid(spot.block.below());
        if !standable {
            unsafe_spots += 1;
        }
        if (spot.block.x - anchor.x).abs() > config.max_spawn_radius
            || (spot.block.z - anchor.z).abs() > config.max_spawn_radius
        {
            out_of_band += 1;
        }
    }

    results.push(TestResult {
        name: "spread_finds_spots_in_clutter".into(),
        passed: found >= rounds * 3 / 4,
        detail: format!("{}/{} rounds found a spot", found, rounds),
    });
    results.push(TestResult {
        name: "spread_spots_are_standable".into(),
        passed: unsafe_spots == 0,
        detail: format!("{} unsafe spots returned", unsafe_spots),
    });
    results.push(TestResult {
        name: "spread_spots_stay_in_band".into(),
        passed: out_of_band == 0,
        detail: format!("{} spots outside the radius band", out_of_band),
    });

    if verbose {
        println!("    {} rounds, {} found, clutter density ~10%", rounds, found);
    }

    results
}

// ── 3. Group Cohesion ───────────────────────────────────────────────────

fn validate_group_cohesion(_verbose: bool) -> Vec<TestResult> {
    println!("--- Group Cohesion ---");
    let mut results = Vec::new();

    let blocks = flat();
    let mut entities = World::new();
    let mut registry = SpawnRegistry::new();
    let player = spawn_player(&mut entities, "shepherd", 0.5, 0.5);

    let mut campaign = presets::wolf_pack().with_rng_seed(103);
    let started = campaign.execute(0, &blocks, &mut entities, &mut registry);

    results.push(TestResult {
        name: "group_full_pack_placed".into(),
        passed: started && campaign.last_spawn_count() == 5,
        detail: format!("{}/5 wolves placed", campaign.last_spawn_count()),
    });

    let wolves: Vec<_> = registry.tagged(campaign.tag()).to_vec();
    let mut positions = Vec::new();
    for wolf in &wolves {
        if let Ok(p) = entities.get::<&Position>(*wolf) {
            positions.push(p.block());
        }
    }

    let spacing = campaign.config().group_spacing;
    let mut span_violations = 0;
    let mut stacked = 0;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i] == positions[j] {
                stacked += 1;
            }
            if (positions[i].x - positions[j].x).abs() > 2 * spacing
                || (positions[i].z - positions[j].z).abs() > 2 * spacing
            {
                span_violations += 1;
            }
        }
    }
    results.push(TestResult {
        name: "group_members_cohesive".into(),
        passed: span_violations == 0,
        detail: format!(
            "{} pairs beyond {} blocks of a shared center",
            span_violations, spacing
        ),
    });
    results.push(TestResult {
        name: "group_members_distinct".into(),
        passed: stacked == 0,
        detail: format!("{} stacked member pairs", stacked),
    });

    let mut untargeted = 0;
    for wolf in &wolves {
        match entities.get::<&AggroTarget>(*wolf) {
            Ok(t) if t.target == player => {}
            _ => untargeted += 1,
        }
    }
    results.push(TestResult {
        name: "group_wolves_aggro_player".into(),
        passed: untargeted == 0,
        detail: format!("{} wolves missing an aggro target", untargeted),
    });

    results
}

// ── 4. Hostile Terrain ──────────────────────────────────────────────────

fn validate_hostile_terrain(_verbose: bool) -> Vec<TestResult> {
    println!("--- Hostile Terrain ---");
    let mut results = Vec::new();

    // A single water layer over the whole floor. The vertical band is
    // pinned so every candidate lands in the flooded layer.
    let mut flooded = flat();
    flooded.flood(65);
    let pinned = SpawnConfig::new().with_min_y_radius(0).with_max_y_radius(0);

    let mut entities = World::new();
    let actor = spawn_player(&mut entities, "diver", 0.5, 0.5);

    let mut rng = StdRng::seed_from_u64(104);
    let denied = spawn_spread(
        &flooded,
        &mut entities,
        actor,
        3,
        &pinned,
        &mut rng,
        |w, s| Some(w.spawn((Position::from_spot(s),))),
    );
    results.push(TestResult {
        name: "water_denied_by_default".into(),
        passed: denied.is_empty(),
        detail: format!("{} placements in unpermitted water", denied.len()),
    });

    let mut rng = StdRng::seed_from_u64(105);
    let permitted = spawn_spread(
        &flooded,
        &mut entities,
        actor,
        3,
        &pinned.clone().with_allow_water_spawns(true),
        &mut rng,
        |w, s| Some(w.spawn((Position::from_spot(s),))),
    );
    let all_in_water = permitted
        .iter()
        .all(|e| match entities.get::<&Position>(*e) {
            Ok(p) => flooded.material_at(p.block()) == Material::Water,
            Err(_) => false,
        });
    results.push(TestResult {
        name: "water_permitted_by_flag".into(),
        passed: permitted.len() == 3 && all_in_water,
        detail: format!("{}/3 placed in water cells", permitted.len()),
    });

    // A lava lake at ground level: water permission must not admit it.
    let mut scorched = flat();
    scorched.fill_region(
        BlockPos::new(-30, 65, -30),
        BlockPos::new(30, 65, 30),
        Material::Lava,
    );

    let mut rng = StdRng::seed_from_u64(106);
    let wrong_flag = spawn_spread(
        &scorched,
        &mut entities,
        actor,
        3,
        &pinned.clone().with_allow_water_spawns(true),
        &mut rng,
        |w, s| Some(w.spawn((Position::from_spot(s),))),
    );
    results.push(TestResult {
        name: "lava_not_admitted_by_water_flag".into(),
        passed: wrong_flag.is_empty(),
        detail: format!("{} placements in lava under the water flag", wrong_flag.len()),
    });

    let mut rng = StdRng::seed_from_u64(107);
    let lava_ok = spawn_spread(
        &scorched,
        &mut entities,
        actor,
        3,
        &pinned.clone().with_allow_lava_spawns(true),
        &mut rng,
        |w, s| Some(w.spawn((Position::from_spot(s),))),
    );
    results.push(TestResult {
        name: "lava_permitted_by_flag".into(),
        passed: lava_ok.len() == 3,
        detail: format!("{}/3 placed on the lava lake", lava_ok.len()),
    });

    results
}

// ── 5. Continuous Schedule ──────────────────────────────────────────────

fn validate_continuous_schedule(verbose: bool) -> Vec<TestResult> {
    println!("--- Continuous Schedule ---");
    let mut results = Vec::new();

    let blocks = flat();
    let mut entities = World::new();
    let mut registry = SpawnRegistry::new();
    spawn_player(&mut entities, "settler", 0.5, 0.5);

    // zombie_invasion: one zombie per player every 20 seconds.
    let mut campaign = presets::zombie_invasion().with_rng_seed(108);
    let started = campaign.execute(0, &blocks, &mut entities, &mut registry);
    let restarted = campaign.execute(1, &blocks, &mut entities, &mut registry);

    results.push(TestResult {
        name: "continuous_starts_once".into(),
        passed: started && !restarted && campaign.is_running(),
        detail: format!("start={} second-start={}", started, restarted),
    });

    // First firing one second in, then every interval: 20, 420, 820, 1220.
    let mut firings = Vec::new();
    let mut total = 0;
    for now in 0..=1300u64 {
        let spawned = campaign.tick(now, &blocks, &mut entities, &mut registry);
        if spawned > 0 {
            firings.push(now);
            total += spawned;
        }
    }
    results.push(TestResult {
        name: "continuous_fires_on_schedule".into(),
        passed: firings == vec![20, 420, 820, 1220] && total == 4,
        detail: format!("firings at {:?}, {} spawned", firings, total),
    });

    let stopped = campaign.terminate();
    let idle: u32 = (1301..=1800u64)
        .map(|now| campaign.tick(now, &blocks, &mut entities, &mut registry))
        .sum();
    results.push(TestResult {
        name: "terminate_stops_firing".into(),
        passed: stopped && !campaign.is_running() && idle == 0,
        detail: format!("stopped={} spawns-after-stop={}", stopped, idle),
    });

    let resumed = campaign.execute(2000, &blocks, &mut entities, &mut registry);
    let after_resume = campaign.tick(2020, &blocks, &mut entities, &mut registry);
    results.push(TestResult {
        name: "terminated_campaign_can_restart".into(),
        passed: resumed && after_resume == 1,
        detail: format!("restart={} first-firing-spawned={}", resumed, after_resume),
    });

    if verbose {
        println!("    registry now tracks {} zombies", registry.count(campaign.tag()));
    }

    results
}

// ── 6. Registry Cleanup ─────────────────────────────────────────────────

fn validate_registry_cleanup(_verbose: bool) -> Vec<TestResult> {
    println!("--- Registry Cleanup ---");
    let mut results = Vec::new();

    let blocks = flat();
    let mut entities = World::new();
    let mut registry = SpawnRegistry::new();
    spawn_player(&mut entities, "curator", 0.5, 0.5);

    let mut wolves = presets::wolf_pack().with_rng_seed(109);
    let mut drops = presets::drop_party().with_rng_seed(110);
    wolves.execute(0, &blocks, &mut entities, &mut registry);
    drops.execute(0, &blocks, &mut entities, &mut registry);

    let wolf_count = registry.count(wolves.tag());
    let drop_count = registry.count(drops.tag());
    results.push(TestResult {
        name: "cleanup_campaigns_tracked_separately".into(),
        passed: wolf_count == 5 && drop_count == 20,
        detail: format!("{} wolves, {} drops tracked", wolf_count, drop_count),
    });

    let removed = registry.remove_all(wolves.tag(), &mut entities);
    let creatures_left = entities.query::<&Creature>().iter().count();
    let drops_left = entities.query::<&DroppedItem>().iter().count();
    results.push(TestResult {
        name: "cleanup_removes_only_own_tag".into(),
        passed: removed == 5 && creatures_left == 0 && drops_left == drop_count,
        detail: format!(
            "removed {}, {} creatures and {} drops remain",
            removed, creatures_left, drops_left
        ),
    });

    let forgotten = registry.forget(drops.tag());
    let drops_after_forget = entities.query::<&DroppedItem>().iter().count();
    results.push(TestResult {
        name: "cleanup_forget_keeps_entities".into(),
        passed: forgotten == drop_count && drops_after_forget == drop_count,
        detail: format!(
            "forgot {} entries, {} drops still in the world",
            forgotten, drops_after_forget
        ),
    });

    results
}

// ── 7. Preset Roster ────────────────────────────────────────────────────

fn validate_preset_roster(verbose: bool) -> Vec<TestResult> {
    println!("--- Preset Roster ---");
    let mut results = Vec::new();

    let blocks = flat();

    // (campaign, expected placements on open flat ground)
    let mut one_shots = vec![
        (presets::wolf_pack().with_rng_seed(111), 5),
        (presets::chicken_flock().with_rng_seed(112), 5),
        (presets::cow_herd().with_rng_seed(113), 5),
        (presets::zombie_horde().with_rng_seed(114), 10),
        (presets::drop_creeper().with_rng_seed(115), 1),
        (presets::nether_raid().with_rng_seed(116), 15),
        (presets::end_raid().with_rng_seed(120), 15),
        (presets::random_menagerie().with_rng_seed(117), 10),
    ];

    let mut names: Vec<String> = one_shots.iter().map(|(c, _)| c.name().to_string()).collect();
    names.push(presets::zombie_invasion().name().to_string());
    names.push(presets::feast().name().to_string());
    names.push(presets::drop_party().name().to_string());
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    results.push(TestResult {
        name: "presets_unique_names".into(),
        passed: sorted.len() == names.len(),
        detail: format!("{} presets, {} unique names", names.len(), sorted.len()),
    });

    let mut shortfalls = Vec::new();
    for (campaign, expected) in &mut one_shots {
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        spawn_player(&mut entities, "host", 0.5, 0.5);
        campaign.execute(0, &blocks, &mut entities, &mut registry);
        if campaign.last_spawn_count() != *expected {
            shortfalls.push(format!(
                "{}: {}/{}",
                campaign.name(),
                campaign.last_spawn_count(),
                expected
            ));
        }
        if verbose {
            println!(
                "    {} placed {}/{}",
                campaign.name(),
                campaign.last_spawn_count(),
                expected
            );
        }
    }
    results.push(TestResult {
        name: "presets_fill_expected_counts".into(),
        passed: shortfalls.is_empty(),
        detail: if shortfalls.is_empty() {
            "every creature preset fills its count on open ground".into()
        } else {
            shortfalls.join("; ")
        },
    });

    // Item presets ask for more drops than the attempt budget allows, so a
    // full pass places exactly the budget.
    let mut budget_surprises = Vec::new();
    for mut campaign in [
        presets::feast().with_rng_seed(118),
        presets::drop_party().with_rng_seed(119),
    ] {
        let mut entities = World::new();
        let mut registry = SpawnRegistry::new();
        spawn_player(&mut entities, "host", 0.5, 0.5);
        campaign.execute(0, &blocks, &mut entities, &mut registry);
        let budget = campaign.config().max_spawn_attempts as u32;
        if campaign.last_spawn_count() != budget {
            budget_surprises.push(format!(
                "{}: {} placed with budget {}",
                campaign.name(),
                campaign.last_spawn_count(),
                budget
            ));
        }
    }
    results.push(TestResult {
        name: "presets_item_counts_capped_by_budget".into(),
        passed: budget_surprises.is_empty(),
        detail: if budget_surprises.is_empty() {
            "item presets place one drop per attempt up to the budget".into()
        } else {
            budget_surprises.join("; ")
        },
    });

    results
}
