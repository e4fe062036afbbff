use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/mcrand.toml";
const DEFAULT_LOOT_PATH: &str = "config/loot.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct McrandConfig {
    /// World seed used when no seed flag is given. `None` picks a time-based seed.
    pub seed: Option<i64>,
    /// Text hashed into a seed; takes precedence over `seed`.
    pub seed_text: Option<String>,
    /// Draws printed by `mcrand draw` when `--count` is omitted.
    pub draw_count: usize,
    /// Loot table file used by `mcrand loot`.
    pub loot_tables: PathBuf,
    /// Print JSON instead of plain text.
    pub json: bool,
}

impl Default for McrandConfig {
    fn default() -> Self {
        Self {
            seed: None,
            seed_text: None,
            draw_count: 10,
            loot_tables: PathBuf::from(DEFAULT_LOOT_PATH),
            json: false,
        }
    }
}

impl McrandConfig {
    /// Load from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<McrandConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    McrandConfig::default()
                }
            },
            Err(err) => {
                // A missing default config is normal; anything else is worth a warning.
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                McrandConfig::default()
            }
        }
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(name: &str) -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("mcrand_config_{timestamp}_{name}"))
    }

    #[test]
    fn missing_file_uses_defaults() {
        let cfg = McrandConfig::load_from_path(&unique_temp_path("missing.toml"));
        assert_eq!(cfg, McrandConfig::default());
        assert_eq!(cfg.draw_count, 10);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let path = unique_temp_path("partial.toml");
        fs::write(&path, "seed = 42\njson = true\n").expect("write config");
        let cfg = McrandConfig::load_from_path(&path);
        assert_eq!(cfg.seed, Some(42));
        assert!(cfg.json);
        assert_eq!(cfg.loot_tables, PathBuf::from(DEFAULT_LOOT_PATH));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let path = unique_temp_path("invalid.toml");
        fs::write(&path, "seed = \"not a number\"").expect("write config");
        assert_eq!(McrandConfig::load_from_path(&path), McrandConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = unique_temp_path("nested").join("mcrand.toml");
        let cfg = McrandConfig {
            seed: Some(-7),
            seed_text: Some("glacier".to_string()),
            draw_count: 3,
            loot_tables: PathBuf::from("packs/loot.json"),
            json: true,
        };
        cfg.save_to_path(&path).expect("save config");
        assert_eq!(McrandConfig::load_from_path(&path), cfg);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let contents = fs::read_to_string(path).expect("shipped config readable");
        let cfg: McrandConfig = toml::from_str(&contents).expect("shipped config parses");
        assert_eq!(cfg.loot_tables, PathBuf::from(DEFAULT_LOOT_PATH));
    }
}
