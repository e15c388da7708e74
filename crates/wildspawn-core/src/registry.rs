//! Tagging for spawned entities
//!
//! Every campaign stamps the entities it creates with its tag so they can be
//! counted, inspected, or bulk-removed later without touching anything the
//! campaign did not create.

use std::collections::HashMap;

use hecs::{Entity, World};

/// Identifier tying spawned entities back to the campaign that created them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpawnTag(String);

impl SpawnTag {
    pub fn new(name: impl Into<String>) -> Self {
        SpawnTag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpawnTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bookkeeping for tagged entities, grouped per tag.
///
/// The registry never creates entities. Removal is the one operation that
/// touches the world; everything else is pure bookkeeping.
#[derive(Debug, Default)]
pub struct SpawnRegistry {
    buckets: HashMap<SpawnTag, Vec<Entity>>,
}

impl SpawnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entity under a tag. Tagging the same entity twice under one
    /// tag is a no-op.
    pub fn tag(&mut self, tag: &SpawnTag, entity: Entity) {
        let bucket = self.buckets.entry(tag.clone()).or_default();
        if !bucket.contains(&entity) {
            bucket.push(entity);
        }
    }

    pub fn is_tagged(&self, tag: &SpawnTag, entity: Entity) -> bool {
        self.buckets
            .get(tag)
            .map(|bucket| bucket.contains(&entity))
            .unwrap_or(false)
    }

    /// Drops one entity from a tag's bucket. Returns true if it was present.
    pub fn untag(&mut self, tag: &SpawnTag, entity: Entity) -> bool {
        let Some(bucket) = self.buckets.get_mut(tag) else {
            return false;
        };
        let before = bucket.len();
        bucket.retain(|e| *e != entity);
        bucket.len() != before
    }

    /// Entities recorded under a tag, in spawn order.
    pub fn tagged(&self, tag: &SpawnTag) -> &[Entity] {
        self.buckets.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, tag: &SpawnTag) -> usize {
        self.buckets.get(tag).map(Vec::len).unwrap_or(0)
    }

    pub fn tags(&self) -> impl Iterator<Item = &SpawnTag> {
        self.buckets.keys()
    }

    /// Forgets a tag's bookkeeping without despawning anything. Returns how
    /// many entries were dropped.
    pub fn forget(&mut self, tag: &SpawnTag) -> usize {
        self.buckets.remove(tag).map(|bucket| bucket.len()).unwrap_or(0)
    }

    /// Despawns every entity recorded under a tag and forgets the tag.
    /// Returns how many entities were actually despawned; entries that died
    /// some other way since being tagged are skipped.
    pub fn remove_all(&mut self, tag: &SpawnTag, world: &mut World) -> usize {
        let Some(bucket) = self.buckets.remove(tag) else {
            return 0;
        };
        let mut removed = 0;
        for entity in bucket {
            if world.despawn(entity).is_ok() {
                removed += 1;
            }
        }
        removed
    }
}
