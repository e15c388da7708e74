//! Safe-location placement search.
//!
//! A bounded stochastic search over the block world: seed a candidate near a
//! bounding point, test it for safety, and on failure apply a cheap local
//! correction (climb out of solids, settle toward ground, wiggle sideways)
//! rather than resampling blindly. A candidate that wanders out of its
//! permitted band is discarded and reseeded, which keeps the search from
//! drifting away from the intended area.
//!
//! Two variants share the core loop:
//! - individual search: band = `max_spawn_radius` per axis around the
//!   reference actor, `max_spawn_attempts * 3` tries
//! - group-member search: band = `group_spacing` per axis around a chosen
//!   group center, `max_spawn_attempts` tries, plus a taken-footprint list
//!   so members of one pass never overlap each other's clearance
//!
//! Exhausting the try budget returns `None`; callers treat that as one
//! skipped placement, never an error.

use rand::Rng;

use crate::config::SpawnConfig;
use crate::world::{BlockPos, Material, WorldQuery};

/// A found placement: the accepted block and world coordinates centered
/// inside it (x/z always, y only when the config asks for it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSpot {
    pub block: BlockPos,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SpawnSpot {
    /// A spot standing in `block`, horizontally centered; `center_y` also
    /// lifts the y coordinate to the block's center.
    pub fn at_block(block: BlockPos, center_y: bool) -> Self {
        Self {
            block,
            x: block.x as f32 + 0.5,
            y: if center_y {
                block.y as f32 + 0.5
            } else {
                block.y as f32
            },
            z: block.z as f32 + 0.5,
        }
    }
}

/// Random offset with magnitude uniform in `[min, max]` and a fair random
/// sign. The shared sampler for radius-band seeding.
pub fn random_offset(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    let magnitude = rng.gen_range(min..=max);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Individual search: find a safe spot near `seed`, never straying more than
/// `max_spawn_radius` blocks per horizontal axis from `anchor` (the
/// reference actor's block).
pub fn find_spawn_spot<W: WorldQuery + ?Sized>(
    world: &W,
    anchor: BlockPos,
    seed: BlockPos,
    config: &SpawnConfig,
    rng: &mut impl Rng,
) -> Option<SpawnSpot> {
    let cfg = config.normalized();
    search(world, anchor, seed, &cfg, &[], Variant::Individual, rng)
}

/// Group-member search: find a safe spot near `seed`, never straying more
/// than `group_spacing` blocks per horizontal axis from `center`, and never
/// landing where its clearance footprint would overlap a block in `taken`.
pub fn find_group_spot<W: WorldQuery + ?Sized>(
    world: &W,
    center: BlockPos,
    seed: BlockPos,
    config: &SpawnConfig,
    taken: &[BlockPos],
    rng: &mut impl Rng,
) -> Option<SpawnSpot> {
    let cfg = config.normalized();
    search(world, center, seed, &cfg, taken, Variant::GroupMember, rng)
}

#[derive(Clone, Copy)]
enum Variant {
    Individual,
    GroupMember,
}

fn search<W: WorldQuery + ?Sized>(
    world: &W,
    bound: BlockPos,
    seed: BlockPos,
    cfg: &SpawnConfig,
    taken: &[BlockPos],
    variant: Variant,
    rng: &mut impl Rng,
) -> Option<SpawnSpot> {
    let (band, max_tries) = match variant {
        Variant::Individual => (cfg.max_spawn_radius, cfg.max_spawn_attempts.saturating_mul(3)),
        Variant::GroupMember => (cfg.group_spacing, cfg.max_spawn_attempts),
    };

    let mut x = seed.x;
    let mut y = clamp_seed_y(world, seed.y);
    let mut z = seed.z;

    let mut tries = 0;
    while tries < max_tries {
        let candidate = BlockPos::new(x, y, z);

        if is_safe_spot(world, candidate, cfg, taken) {
            return Some(SpawnSpot::at_block(candidate, cfg.center_y));
        }

        // Local correction toward validity.
        let below = candidate.below();
        if world.is_solid(candidate) {
            y += 1;
        } else if !world.is_solid(below) && !is_permitted_liquid(world, below, cfg) {
            y -= 1;
        } else {
            x += rng.gen_range(-1..=1);
            z += rng.gen_range(-1..=1);
        }

        // A corrected candidate outside the band is never tested; reseed it.
        if (x - bound.x).abs() > band || (z - bound.z).abs() > band {
            match variant {
                Variant::Individual => {
                    x = bound.x + random_offset(rng, cfg.min_spawn_radius, cfg.max_spawn_radius);
                    z = bound.z + random_offset(rng, cfg.min_spawn_radius, cfg.max_spawn_radius);
                    y = if cfg.surface_only_spawning {
                        world.highest_block_y(x, z)
                    } else {
                        bound.y + random_offset(rng, cfg.min_y_radius, cfg.max_y_radius)
                    };
                }
                Variant::GroupMember => {
                    x = bound.x + rng.gen_range(-cfg.group_spacing..=cfg.group_spacing);
                    z = bound.z + rng.gen_range(-cfg.group_spacing..=cfg.group_spacing);
                    y = if cfg.surface_only_spawning {
                        world.highest_block_y(x, z)
                    } else {
                        // Small vertical variance keeps groups cohesive.
                        bound.y + rng.gen_range(-1..=1)
                    };
                }
            }
        }

        tries += 1;
    }

    None
}

fn clamp_seed_y<W: WorldQuery + ?Sized>(world: &W, y: i32) -> i32 {
    if y < world.min_height() {
        world.min_height()
    } else if y >= world.max_height() {
        world.max_height() - 3
    } else {
        y
    }
}

/// Full safety test: in world bounds, cell safe, standing on solid ground,
/// clearance volume free, footprint not already claimed this pass.
fn is_safe_spot<W: WorldQuery + ?Sized>(
    world: &W,
    pos: BlockPos,
    cfg: &SpawnConfig,
    taken: &[BlockPos],
) -> bool {
    if pos.y < world.min_height() || pos.y >= world.max_height() {
        return false;
    }
    is_safe_block(world, pos, cfg)
        && world.is_solid(pos.below())
        && !overlaps_taken(pos, cfg, taken)
        && has_clearance(world, pos, cfg)
}

/// A cell is safe when empty or an explicitly permitted liquid.
fn is_safe_block<W: WorldQuery + ?Sized>(world: &W, pos: BlockPos, cfg: &SpawnConfig) -> bool {
    world.material_at(pos) == Material::Air || is_permitted_liquid(world, pos, cfg)
}

fn is_permitted_liquid<W: WorldQuery + ?Sized>(
    world: &W,
    pos: BlockPos,
    cfg: &SpawnConfig,
) -> bool {
    match world.material_at(pos) {
        Material::Water => cfg.allow_water_spawns,
        Material::Lava => cfg.allow_lava_spawns,
        _ => false,
    }
}

/// Check the clearance volume above the candidate: a `width x width x
/// height` box of cells that must all be safe. Costs O(width^2 * height)
/// world queries, bounded by config.
fn has_clearance<W: WorldQuery + ?Sized>(world: &W, base: BlockPos, cfg: &SpawnConfig) -> bool {
    let height_blocks = cfg.height_clearance.ceil() as i32;
    let width_blocks = cfg.width_clearance.ceil() as i32;

    if base.y + height_blocks > world.max_height() {
        return false;
    }

    let (lo, hi) = clearance_span(width_blocks);
    for dy in 0..height_blocks {
        for dx in lo..=hi {
            for dz in lo..=hi {
                if !is_safe_block(world, base.offset(dx, dy, dz), cfg) {
                    return false;
                }
            }
        }
    }
    true
}

/// Horizontal extent of the clearance box: centered on the candidate when
/// the rounded width is odd, pushed to the positive side when even.
fn clearance_span(width_blocks: i32) -> (i32, i32) {
    if width_blocks <= 0 {
        (0, -1)
    } else if width_blocks % 2 == 1 {
        let half = width_blocks / 2;
        (-half, half)
    } else {
        (0, width_blocks - 1)
    }
}

/// Would a spot at `pos` have a clearance footprint intersecting one already
/// claimed by an earlier member of the same pass?
fn overlaps_taken(pos: BlockPos, cfg: &SpawnConfig, taken: &[BlockPos]) -> bool {
    if taken.is_empty() {
        return false;
    }
    let height_blocks = cfg.height_clearance.ceil() as i32;
    let width_blocks = cfg.width_clearance.ceil() as i32;
    let (lo, hi) = clearance_span(width_blocks);
    let h_reach = (hi - lo).max(0);
    let v_reach = (height_blocks - 1).max(0);
    taken.iter().any(|t| {
        (pos.x - t.x).abs() <= h_reach
            && (pos.z - t.z).abs() <= h_reach
            && (pos.y - t.y).abs() <= v_reach
    })
}
