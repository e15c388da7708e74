//! Block-world interface - the queries the placement search needs.
//!
//! The engine never owns terrain. Hosts implement [`WorldQuery`] over their
//! own chunk storage; [`FlatWorld`] is the reference implementation used by
//! the harness, the benches, and the unit tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// This position shifted by the given deltas.
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The block directly below.
    pub fn below(&self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The block directly above.
    pub fn above(&self) -> Self {
        self.offset(0, 1, 0)
    }
}

/// The block kinds the spawn engine distinguishes.
///
/// Placement only cares about three classes - empty, liquid, solid - but
/// hosts and profiles name concrete kinds, so the enum keeps a small
/// terrain palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Air,
    Water,
    Lava,
    Stone,
    Dirt,
    Grass,
    Sand,
    Gravel,
    Snow,
    Wood,
    Leaves,
}

impl Material {
    /// Anything that is neither empty nor liquid blocks placement.
    pub fn is_solid(&self) -> bool {
        !matches!(self, Material::Air | Material::Water | Material::Lava)
    }

    pub fn is_liquid(&self) -> bool {
        matches!(self, Material::Water | Material::Lava)
    }
}

/// Read-only world access for the placement search.
///
/// `max_height` is exclusive: valid block y values are
/// `min_height ..= max_height - 1`.
pub trait WorldQuery {
    /// Material occupying the given block.
    fn material_at(&self, pos: BlockPos) -> Material;

    /// Whether the given block is solid. Provided in terms of
    /// [`material_at`](WorldQuery::material_at).
    fn is_solid(&self, pos: BlockPos) -> bool {
        self.material_at(pos).is_solid()
    }

    /// Y of the topmost non-air block in the column, `min_height - 1` for an
    /// empty column.
    fn highest_block_y(&self, x: i32, z: i32) -> i32;

    /// Lowest valid block y.
    fn min_height(&self) -> i32;

    /// One above the highest valid block y.
    fn max_height(&self) -> i32;
}

/// Reference world: an infinite ground plane with per-block overrides and an
/// optional flood layer.
///
/// Columns are grass at `ground_y`, stone below, air above. `set_block`
/// carves or builds exceptions; `flood` lays water over every column from
/// `ground_y + 1` up to the flood level.
#[derive(Debug, Clone, Default)]
pub struct FlatWorld {
    ground_y: i32,
    min_y: i32,
    max_y: i32,
    water_level: Option<i32>,
    overrides: HashMap<BlockPos, Material>,
}

impl FlatWorld {
    /// World with solid ground at `ground_y` and vertical bounds
    /// `[min_y, max_y)`.
    pub fn new(ground_y: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            ground_y,
            min_y,
            max_y,
            water_level: None,
            overrides: HashMap::new(),
        }
    }

    pub fn ground_y(&self) -> i32 {
        self.ground_y
    }

    /// Override a single block.
    pub fn set_block(&mut self, pos: BlockPos, material: Material) -> &mut Self {
        self.overrides.insert(pos, material);
        self
    }

    /// Override every block in the inclusive box spanned by two corners.
    pub fn fill_region(&mut self, a: BlockPos, b: BlockPos, material: Material) -> &mut Self {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.overrides.insert(BlockPos::new(x, y, z), material);
                }
            }
        }
        self
    }

    /// Cover every column with water from above the ground up to `level`.
    pub fn flood(&mut self, level: i32) -> &mut Self {
        self.water_level = Some(level);
        self
    }

    fn base_material(&self, pos: BlockPos) -> Material {
        if pos.y < self.min_y || pos.y >= self.max_y {
            return Material::Air;
        }
        if pos.y == self.ground_y {
            return Material::Grass;
        }
        if pos.y < self.ground_y {
            return Material::Stone;
        }
        if let Some(level) = self.water_level {
            if pos.y <= level {
                return Material::Water;
            }
        }
        Material::Air
    }
}

impl WorldQuery for FlatWorld {
    fn material_at(&self, pos: BlockPos) -> Material {
        match self.overrides.get(&pos) {
            Some(material) => *material,
            None => self.base_material(pos),
        }
    }

    fn highest_block_y(&self, x: i32, z: i32) -> i32 {
        for y in (self.min_y..self.max_y).rev() {
            if self.material_at(BlockPos::new(x, y, z)) != Material::Air {
                return y;
            }
        }
        self.min_y - 1
    }

    fn min_height(&self) -> i32 {
        self.min_y
    }

    fn max_height(&self) -> i32 {
        self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_world_layers() {
        let world = FlatWorld::new(64, -64, 320);
        assert_eq!(world.material_at(BlockPos::new(0, 64, 0)), Material::Grass);
        assert_eq!(world.material_at(BlockPos::new(5, 20, -3)), Material::Stone);
        assert_eq!(world.material_at(BlockPos::new(5, 65, -3)), Material::Air);
        assert!(world.is_solid(BlockPos::new(0, 64, 0)));
        assert!(!world.is_solid(BlockPos::new(0, 65, 0)));
    }

    #[test]
    fn test_out_of_bounds_is_air() {
        let world = FlatWorld::new(64, -64, 320);
        assert_eq!(world.material_at(BlockPos::new(0, -65, 0)), Material::Air);
        assert_eq!(world.material_at(BlockPos::new(0, 320, 0)), Material::Air);
    }

    #[test]
    fn test_overrides_and_flood() {
        let mut world = FlatWorld::new(64, 0, 128);
        world.set_block(BlockPos::new(1, 65, 1), Material::Wood);
        world.flood(70);
        assert_eq!(world.material_at(BlockPos::new(1, 65, 1)), Material::Wood);
        assert_eq!(world.material_at(BlockPos::new(0, 65, 0)), Material::Water);
        assert_eq!(world.material_at(BlockPos::new(0, 70, 0)), Material::Water);
        assert_eq!(world.material_at(BlockPos::new(0, 71, 0)), Material::Air);
    }

    #[test]
    fn test_highest_block_tracks_structures_and_water() {
        let mut world = FlatWorld::new(64, 0, 128);
        assert_eq!(world.highest_block_y(3, 3), 64);
        world.fill_region(
            BlockPos::new(3, 65, 3),
            BlockPos::new(3, 70, 3),
            Material::Wood,
        );
        assert_eq!(world.highest_block_y(3, 3), 70);
        world.flood(80);
        assert_eq!(world.highest_block_y(0, 0), 80);
    }

    #[test]
    fn test_carved_hole_lowers_column() {
        let mut world = FlatWorld::new(64, 0, 128);
        world.set_block(BlockPos::new(2, 64, 2), Material::Air);
        assert_eq!(world.highest_block_y(2, 2), 63);
        assert_eq!(world.material_at(BlockPos::new(2, 63, 2)), Material::Stone);
    }
}
