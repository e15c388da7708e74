//! Spawn configuration - the knobs every placement and campaign reads.
//!
//! Plain data with chainable setters. Setters never validate; callers that
//! accept host-supplied values run [`SpawnConfig::normalized`] before use,
//! which is what the search and orchestration entry points do.

use serde::{Deserialize, Serialize};

/// Tuning for one spawning feature: radius bands, clearance volume, attempt
/// budget, and placement flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Outer horizontal band, blocks per axis from the reference actor.
    pub max_spawn_radius: i32,
    /// Inner horizontal band, blocks per axis from the reference actor.
    pub min_spawn_radius: i32,
    /// Outer vertical band for seeding, blocks from the actor.
    pub max_y_radius: i32,
    /// Inner vertical band for seeding, blocks from the actor.
    pub min_y_radius: i32,
    /// Base try budget; search variants scale it (x3 individual, x2 group
    /// members).
    pub max_spawn_attempts: i32,
    /// Horizontal clearance in blocks; fractional values round up for block
    /// checks.
    pub width_clearance: f64,
    /// Vertical clearance in blocks; fractional values round up for block
    /// checks.
    pub height_clearance: f64,
    /// How tightly group members cluster around the group center, blocks per
    /// axis.
    pub group_spacing: i32,
    /// Seed candidate y from terrain height instead of a vertical offset.
    pub surface_only_spawning: bool,
    /// Treat water cells as valid placement targets.
    pub allow_water_spawns: bool,
    /// Treat lava cells as valid placement targets.
    pub allow_lava_spawns: bool,
    /// Center the returned y inside the block (y + 0.5) instead of the block
    /// floor.
    pub center_y: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_spawn_radius: 20,
            min_spawn_radius: 3,
            max_y_radius: 20,
            min_y_radius: 3,
            max_spawn_attempts: 20,
            width_clearance: 1.0,
            height_clearance: 1.0,
            group_spacing: 3,
            surface_only_spawning: false,
            allow_water_spawns: false,
            allow_lava_spawns: false,
            center_y: false,
        }
    }
}

impl SpawnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_spawn_radius(mut self, radius: i32) -> Self {
        self.max_spawn_radius = radius;
        self
    }

    pub fn with_min_spawn_radius(mut self, radius: i32) -> Self {
        self.min_spawn_radius = radius;
        self
    }

    pub fn with_max_y_radius(mut self, radius: i32) -> Self {
        self.max_y_radius = radius;
        self
    }

    pub fn with_min_y_radius(mut self, radius: i32) -> Self {
        self.min_y_radius = radius;
        self
    }

    pub fn with_max_spawn_attempts(mut self, attempts: i32) -> Self {
        self.max_spawn_attempts = attempts;
        self
    }

    pub fn with_width_clearance(mut self, clearance: f64) -> Self {
        self.width_clearance = clearance;
        self
    }

    pub fn with_height_clearance(mut self, clearance: f64) -> Self {
        self.height_clearance = clearance;
        self
    }

    pub fn with_group_spacing(mut self, spacing: i32) -> Self {
        self.group_spacing = spacing;
        self
    }

    pub fn with_surface_only_spawning(mut self, surface_only: bool) -> Self {
        self.surface_only_spawning = surface_only;
        self
    }

    pub fn with_allow_water_spawns(mut self, allow: bool) -> Self {
        self.allow_water_spawns = allow;
        self
    }

    pub fn with_allow_lava_spawns(mut self, allow: bool) -> Self {
        self.allow_lava_spawns = allow;
        self
    }

    pub fn with_center_y(mut self, center_y: bool) -> Self {
        self.center_y = center_y;
        self
    }

    /// Copy with host-supplied values forced into usable shape: bands
    /// reordered so min <= max, negatives clamped to zero, attempt budget
    /// floored at one try.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        cfg.min_spawn_radius = cfg.min_spawn_radius.max(0);
        cfg.max_spawn_radius = cfg.max_spawn_radius.max(0);
        cfg.min_y_radius = cfg.min_y_radius.max(0);
        cfg.max_y_radius = cfg.max_y_radius.max(0);
        if cfg.min_spawn_radius > cfg.max_spawn_radius {
            std::mem::swap(&mut cfg.min_spawn_radius, &mut cfg.max_spawn_radius);
        }
        if cfg.min_y_radius > cfg.max_y_radius {
            std::mem::swap(&mut cfg.min_y_radius, &mut cfg.max_y_radius);
        }
        cfg.max_spawn_attempts = cfg.max_spawn_attempts.max(1);
        cfg.width_clearance = cfg.width_clearance.max(0.0);
        cfg.height_clearance = cfg.height_clearance.max(0.0);
        cfg.group_spacing = cfg.group_spacing.max(0);
        cfg
    }
}
