//! Content catalogs
//!
//! Keyed template indices with rating-bucketed random selection.
//! Random picks probe downward from the requested rating until a
//! non-empty bucket turns up; unique monsters leave their bucket the
//! first time they are created.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::Rng;

use crate::data::templates::{ItemTemplate, ModifierTemplate, MonsterTemplate};
use crate::error::{GameError, GameResult};

/// Maximum monsters placed per room at a difficulty. Density helper
/// for the excluded generators.
pub fn max_monsters_per_room(difficulty: i32) -> i32 {
    (difficulty / 2).max(1)
}

/// Maximum items placed per room at a difficulty.
pub fn max_items_per_room(difficulty: i32) -> i32 {
    (difficulty / 2).max(1)
}

/// Probe a bucket index downward from `max_rating` and pick a random
/// key from the first non-empty bucket. The floor at zero is a content
/// error, never a silent empty result.
fn random_from_buckets(
    buckets: &BTreeMap<i32, Vec<String>>,
    max_rating: i32,
    rng: &mut impl Rng,
) -> GameResult<String> {
    let mut rating = max_rating;
    loop {
        if rating <= 0 {
            return Err(GameError::NothingAtRating(max_rating));
        }
        if let Some(bucket) = buckets.get(&rating) {
            if !bucket.is_empty() {
                return Ok(bucket[rng.gen_range(0..bucket.len())].clone());
            }
        }
        rating -= 1;
    }
}

/// The monster side of the content catalog.
#[derive(Debug, Clone)]
pub struct MonsterCatalog {
    index: HashMap<String, MonsterTemplate>,
    rating_buckets: BTreeMap<i32, Vec<String>>,
    spawned_uniques: HashSet<String>,
}

impl MonsterCatalog {
    pub fn new(templates: Vec<MonsterTemplate>) -> Self {
        let mut index = HashMap::new();
        let mut rating_buckets: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for template in templates {
            rating_buckets
                .entry(template.challenge_rating)
                .or_default()
                .push(template.key.clone());
            index.insert(template.key.clone(), template);
        }
        Self {
            index,
            rating_buckets,
            spawned_uniques: HashSet::new(),
        }
    }

    pub fn template(&self, key: &str) -> GameResult<&MonsterTemplate> {
        self.index
            .get(key)
            .ok_or_else(|| GameError::UnknownKey(format!("monster {key}")))
    }

    pub fn available_keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// A random template key with challenge rating at or below the cap.
    pub fn random_key(&self, max_challenge_rating: i32, rng: &mut impl Rng) -> GameResult<String> {
        random_from_buckets(&self.rating_buckets, max_challenge_rating, rng)
    }

    /// Record an instantiation. Unique templates may pass here once:
    /// the first call removes them from their rating bucket, a second
    /// call is an error.
    pub fn note_spawned(&mut self, key: &str) -> GameResult<()> {
        let template = self
            .index
            .get(key)
            .ok_or_else(|| GameError::UnknownKey(format!("monster {key}")))?;
        if !template.unique {
            return Ok(());
        }
        if !self.spawned_uniques.insert(key.to_string()) {
            return Err(GameError::UniqueExhausted(key.to_string()));
        }
        let rating = template.challenge_rating;
        if let Some(bucket) = self.rating_buckets.get_mut(&rating) {
            bucket.retain(|k| k != key);
            if bucket.is_empty() {
                self.rating_buckets.remove(&rating);
            }
        }
        Ok(())
    }
}

/// The item side of the content catalog.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    index: HashMap<String, ItemTemplate>,
    level_buckets: BTreeMap<i32, Vec<String>>,
}

impl ItemCatalog {
    pub fn new(templates: Vec<ItemTemplate>) -> Self {
        let mut index = HashMap::new();
        let mut level_buckets: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for template in templates {
            level_buckets
                .entry(template.item_level)
                .or_default()
                .push(template.key.clone());
            index.insert(template.key.clone(), template);
        }
        Self {
            index,
            level_buckets,
        }
    }

    pub fn template(&self, key: &str) -> GameResult<&ItemTemplate> {
        self.index
            .get(key)
            .ok_or_else(|| GameError::UnknownKey(format!("item {key}")))
    }

    pub fn available_keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// A random template key with item level at or below the cap.
    pub fn random_key(&self, max_item_level: i32, rng: &mut impl Rng) -> GameResult<String> {
        random_from_buckets(&self.level_buckets, max_item_level, rng)
    }
}

/// The modifier index shared by both template kinds.
#[derive(Debug, Clone)]
pub struct ModifierCatalog {
    index: HashMap<String, ModifierTemplate>,
}

impl ModifierCatalog {
    pub fn new(templates: Vec<ModifierTemplate>) -> Self {
        let index = templates
            .into_iter()
            .map(|t| (t.key.clone(), t))
            .collect();
        Self { index }
    }

    pub fn template(&self, key: &str) -> GameResult<&ModifierTemplate> {
        self.index
            .get(key)
            .ok_or_else(|| GameError::UnknownKey(format!("modifier {key}")))
    }
}
