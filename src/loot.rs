use anyhow::{Context, Result};
use mcrand_core::{
    random_chance, random_int, random_weighted, seed::scoped_seed, JavaRandom, RandomSource,
    RegistryKey,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, warn};

/// Loot tables keyed by name, in stable key order.
#[derive(Debug, Clone, Default)]
pub struct LootTables {
    tables: BTreeMap<RegistryKey, LootTable>,
}

impl LootTables {
    pub fn get(&self, name: &str) -> Option<&LootTable> {
        let key = RegistryKey::parse(name).ok()?;
        self.tables.get(&key)
    }

    pub fn names(&self) -> impl Iterator<Item = &RegistryKey> {
        self.tables.keys()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

#[derive(Debug, Clone)]
pub struct LootTable {
    name: RegistryKey,
    min_rolls: i32,
    max_rolls: i32,
    entries: Vec<(LootEntry, f64)>,
}

#[derive(Debug, Clone)]
struct LootEntry {
    item: RegistryKey,
    min: i32,
    max: i32,
    chance: f64,
}

/// One stack produced by a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LootDrop {
    pub item: RegistryKey,
    pub count: u32,
}

impl LootTable {
    pub fn name(&self) -> &RegistryKey {
        &self.name
    }

    /// Roll the table against `rng`.
    ///
    /// Each roll picks one entry by weight, keeps it with the entry's chance and
    /// draws a count in its `[min, max]` range. Zero counts are dropped.
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Vec<LootDrop>> {
        let rolls = random_int(rng, self.min_rolls, self.max_rolls)?;
        let mut drops = Vec::new();
        for _ in 0..rolls {
            let Some(entry) = random_weighted(rng, &self.entries) else {
                break;
            };
            if !random_chance(rng, entry.chance) {
                continue;
            }
            let count = random_int(rng, entry.min, entry.max)?;
            if count > 0 {
                drops.push(LootDrop {
                    item: entry.item.clone(),
                    count: count.unsigned_abs(),
                });
            }
        }
        Ok(drops)
    }

    /// Roll with a generator seeded from `world_seed` and this table's name.
    ///
    /// The same world seed always produces the same drops for a given table.
    pub fn roll_seeded(&self, world_seed: i64) -> Result<Vec<LootDrop>> {
        self.roll(&mut self.seeded_rng(world_seed))
    }

    /// Generator for this table under `world_seed`; its first roll equals [`Self::roll_seeded`].
    pub fn seeded_rng(&self, world_seed: i64) -> JavaRandom {
        let seed = scoped_seed(world_seed, &self.name.to_string());
        debug!(table = %self.name, world_seed, seed, "seeding loot generator");
        JavaRandom::new(seed)
    }
}

#[derive(Debug, Deserialize)]
struct LootFile {
    #[serde(default)]
    tables: Vec<LootTableDefinition>,
}

#[derive(Debug, Deserialize)]
struct LootTableDefinition {
    name: String,
    #[serde(default)]
    rolls: Option<RollsDefinition>,
    #[serde(default)]
    entries: Vec<LootEntryDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RollsDefinition {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

#[derive(Debug, Deserialize)]
struct LootEntryDefinition {
    item: String,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    min: Option<u32>,
    #[serde(default)]
    max: Option<u32>,
    #[serde(default)]
    chance: Option<f64>,
}

/// Parse loot tables, failing on the first invalid or duplicate table.
pub fn parse_loot_tables_strict(contents: &str) -> Result<LootTables> {
    let file: LootFile = serde_json::from_str(contents).context("Failed to parse loot tables")?;
    let mut tables = LootTables::default();
    for def in &file.tables {
        let table = parse_loot_table(def)
            .with_context(|| format!("Invalid loot table '{}'", def.name))?;
        if tables.tables.contains_key(&table.name) {
            anyhow::bail!("Duplicate loot table '{}'", table.name);
        }
        tables.tables.insert(table.name.clone(), table);
    }
    Ok(tables)
}

/// Parse loot tables, skipping invalid or duplicate tables with a warning.
pub fn parse_loot_tables_lenient(contents: &str, source: &Path) -> LootTables {
    let file: LootFile = match serde_json::from_str(contents) {
        Ok(file) => file,
        Err(err) => {
            warn!("Failed to parse loot tables {}: {err:#}", source.display());
            return LootTables::default();
        }
    };

    let mut tables = LootTables::default();
    for def in &file.tables {
        match parse_loot_table(def) {
            Ok(table) => {
                if tables.tables.contains_key(&table.name) {
                    warn!(
                        "Ignoring duplicate loot table {} from {}",
                        table.name,
                        source.display()
                    );
                    continue;
                }
                tables.tables.insert(table.name.clone(), table);
            }
            Err(err) => {
                warn!(
                    "Ignoring invalid loot table '{}' from {}: {err:#}",
                    def.name,
                    source.display()
                );
            }
        }
    }
    tables
}

pub fn load_loot_tables_strict(path: &Path) -> Result<LootTables> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_loot_tables_strict(&contents).with_context(|| format!("In {}", path.display()))
}

pub fn load_loot_tables_lenient(path: &Path) -> LootTables {
    match fs::read_to_string(path) {
        Ok(contents) => parse_loot_tables_lenient(&contents, path),
        Err(err) => {
            warn!("Failed to read loot tables {}: {err}", path.display());
            LootTables::default()
        }
    }
}

fn parse_loot_table(def: &LootTableDefinition) -> Result<LootTable> {
    let name = RegistryKey::parse(&def.name)?;

    let (min_rolls, max_rolls) = match def.rolls {
        None => (1, 1),
        Some(RollsDefinition::Fixed(rolls)) => (rolls, rolls),
        Some(RollsDefinition::Range { min, max }) => {
            if max < min {
                anyhow::bail!("Rolls max {} < min {}", max, min);
            }
            (min, max)
        }
    };

    let mut entries = Vec::with_capacity(def.entries.len());
    for entry in &def.entries {
        let weight = entry.weight.unwrap_or(1.0);
        if !weight.is_finite() || weight < 0.0 {
            anyhow::bail!(
                "Entry '{}' weight must be finite and non-negative",
                entry.item
            );
        }
        entries.push((parse_loot_entry(entry)?, weight));
    }

    Ok(LootTable {
        name,
        min_rolls: to_i32(min_rolls, "rolls")?,
        max_rolls: to_i32(max_rolls, "rolls")?,
        entries,
    })
}

fn parse_loot_entry(def: &LootEntryDefinition) -> Result<LootEntry> {
    let item = RegistryKey::parse(&def.item)
        .with_context(|| format!("Unknown item token '{}'", def.item))?;

    if def.count.is_some() && (def.min.is_some() || def.max.is_some()) {
        anyhow::bail!("Use either 'count' or 'min'/'max' for item '{}'", item);
    }

    let (min, max) = match (def.count, def.min, def.max) {
        (Some(count), _, _) => (count, count),
        (None, min, max) => {
            let min = min.unwrap_or(1);
            let max = max.unwrap_or(min);
            if max < min {
                anyhow::bail!("Item '{}' has max {} < min {}", item, max, min);
            }
            (min, max)
        }
    };

    let chance = def.chance.unwrap_or(1.0);
    if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
        anyhow::bail!("Item '{}' chance must be in [0, 1]", item);
    }

    Ok(LootEntry {
        item,
        min: to_i32(min, "count")?,
        max: to_i32(max, "count")?,
        chance,
    })
}

fn to_i32(value: u32, what: &str) -> Result<i32> {
    i32::try_from(value).with_context(|| format!("{what} {value} is too large"))
}
