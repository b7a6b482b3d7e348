//! Per-region field visibility
//!
//! Each region shows a fixed set of six optional fields. The set is derived
//! from a shuffle seeded by the region name, so it never changes between
//! runs, and it is computed once per process.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use crate::models::{FieldKey, Region};
use crate::rng::SeededRng;

/// Number of optional fields shown per region
pub const FIELDS_PER_REGION: usize = 6;

/// Ordered set of visible field keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<FieldKey>);

impl FieldSet {
    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in canonical display order
    pub fn iter(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.0.iter().copied()
    }

    pub fn has_weather_condition(&self) -> bool {
        FieldKey::WEATHER_CONDITIONS
            .iter()
            .any(|key| self.contains(*key))
    }
}

impl FromIterator<FieldKey> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldKey>>(iter: I) -> Self {
        FieldSet(iter.into_iter().collect())
    }
}

/// Select the visible fields for a region
///
/// Fisher-Yates shuffles the full key list with the `fields:<region>` stream
/// and keeps the first six. When none of those describe sky conditions,
/// the sixth pick is replaced by `rainPct`.
pub fn pick_region_fields(region: Region) -> FieldSet {
    let mut rng = SeededRng::from_key(&format!("fields:{}", region.name_th()));

    let mut keys = FieldKey::ALL;
    for i in (1..keys.len()).rev() {
        let j = rng.index(i + 1);
        keys.swap(i, j);
    }

    ensure_weather_condition(keys[..FIELDS_PER_REGION].to_vec())
        .into_iter()
        .collect()
}

fn ensure_weather_condition(mut picked: Vec<FieldKey>) -> Vec<FieldKey> {
    let has_condition = picked
        .iter()
        .any(|key| FieldKey::WEATHER_CONDITIONS.contains(key));
    if !has_condition {
        if picked.len() >= FIELDS_PER_REGION {
            picked.pop();
        }
        picked.push(FieldKey::RainPct);
    }
    picked
}

/// Process-lifetime cache of every region's field set
///
/// The table is filled once on first access; concurrent first callers
/// block until the single initialization finishes.
pub struct RegionFieldCache {
    sets: OnceLock<HashMap<Region, FieldSet>>,
}

impl RegionFieldCache {
    pub const fn new() -> Self {
        Self {
            sets: OnceLock::new(),
        }
    }

    pub fn get(&self, region: Region) -> &FieldSet {
        let sets = self.sets.get_or_init(|| {
            Region::ALL
                .into_iter()
                .map(|r| (r, pick_region_fields(r)))
                .collect()
        });
        // Every region is inserted by the initializer above.
        &sets[&region]
    }
}

impl Default for RegionFieldCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared cache used by the synthesizer and the seeder report
pub static REGION_FIELDS: RegionFieldCache = RegionFieldCache::new();

/// Field set of a region from the process-wide cache
pub fn region_fields(region: Region) -> &'static FieldSet {
    REGION_FIELDS.get(region)
}
