use anyhow::{Context, Result};
use mcrand_core::{
    random_elements, random_weighted,
    seed::{string_seed, time_seed},
    shuffle, AmbientRandom, DrawStep, DrawValue, JavaRandom, RandomSource,
};
use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::config::McrandConfig;
use crate::loot::{LootDrop, LootTable};

/// Where draws come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedChoice {
    Fixed(i64),
    Text(String),
    Ambient,
}

impl SeedChoice {
    /// Pick a source from flags, then config, then the clock.
    ///
    /// Flags win over config, `--ambient` wins over everything, and text seeds
    /// win over numeric ones at the same level.
    pub fn resolve(
        seed: Option<i64>,
        seed_text: Option<&str>,
        ambient: bool,
        config: &McrandConfig,
    ) -> Self {
        if ambient {
            return Self::Ambient;
        }
        if let Some(text) = seed_text.or(config.seed_text.as_deref()).filter(|_| seed.is_none()) {
            return Self::Text(text.to_string());
        }
        if let Some(seed) = seed.or(config.seed) {
            return Self::Fixed(seed);
        }
        let seed = time_seed();
        info!(seed, "no seed configured; using a time-based seed");
        Self::Fixed(seed)
    }

    /// Numeric world seed, or `None` for the ambient source.
    pub fn world_seed(&self) -> Option<i64> {
        match self {
            Self::Fixed(seed) => Some(*seed),
            Self::Text(text) => Some(i64::from(string_seed(text))),
            Self::Ambient => None,
        }
    }

    pub fn source(&self) -> Box<dyn RandomSource + Send> {
        match self.world_seed() {
            Some(seed) => Box::new(JavaRandom::new(seed)),
            None => Box::new(AmbientRandom::new()),
        }
    }
}

impl fmt::Display for SeedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "seed {seed}"),
            Self::Text(text) => write!(f, "seed text {text:?}"),
            Self::Ambient => write!(f, "ambient"),
        }
    }
}

pub fn draw_many<R: RandomSource + ?Sized>(
    source: &mut R,
    step: DrawStep,
    count: usize,
) -> Result<Vec<DrawValue>> {
    (0..count)
        .map(|_| step.apply(&mut *source).with_context(|| format!("{step:?} draw failed")))
        .collect()
}

pub fn shuffled<R: RandomSource + ?Sized>(source: &mut R, mut items: Vec<String>) -> Vec<String> {
    shuffle(source, &mut items);
    items
}

pub fn pick<R: RandomSource + ?Sized>(source: &mut R, items: &[String], count: usize) -> Vec<String> {
    random_elements(source, items, count)
}

/// Parse `name=weight` pairs; a bare `name` weighs 1.
pub fn parse_weighted(entries: &[String]) -> Result<Vec<(String, f64)>> {
    entries
        .iter()
        .map(|entry| -> Result<(String, f64)> {
            let (name, weight) = match entry.rsplit_once('=') {
                Some((name, weight)) => {
                    let weight: f64 = weight
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid weight in '{entry}'"))?;
                    (name.trim(), weight)
                }
                None => (entry.trim(), 1.0),
            };
            if name.is_empty() {
                anyhow::bail!("Missing name in '{entry}'");
            }
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("Weight in '{entry}' must be finite and non-negative");
            }
            Ok((name.to_string(), weight))
        })
        .collect()
}

pub fn pick_weighted<R: RandomSource + ?Sized>(
    source: &mut R,
    entries: &[(String, f64)],
) -> Option<String> {
    random_weighted(source, entries).cloned()
}

#[derive(Debug, Serialize)]
pub struct LootReport {
    pub table: String,
    pub world_seed: Option<i64>,
    pub rolls: Vec<Vec<LootDrop>>,
}

/// Roll `table` `times` times. Seeded choices start from [`LootTable::roll_seeded`].
pub fn roll_loot(choice: &SeedChoice, table: &LootTable, times: usize) -> Result<LootReport> {
    let world_seed = choice.world_seed();
    let mut source: Box<dyn RandomSource> = match world_seed {
        Some(seed) => Box::new(table.seeded_rng(seed)),
        None => Box::new(AmbientRandom::new()),
    };
    let rolls = (0..times)
        .map(|_| table.roll(source.as_mut()))
        .collect::<Result<Vec<_>>>()?;
    Ok(LootReport {
        table: table.name().to_string(),
        world_seed,
        rolls,
    })
}
