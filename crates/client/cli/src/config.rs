//! CLI configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

/// Locations and tuning for one CLI invocation.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Snapshot directory of the game-data service.
    pub data_dir: PathBuf,
    /// Directory holding the card artwork.
    pub assets_dir: PathBuf,
    /// Replaces the artwork directory's `gacha_font.ttf` for the pity footer.
    pub font_path: Option<PathBuf>,
    /// JSON document with every user's gacha state.
    pub store_path: PathBuf,
    pub render_workers: Option<usize>,
    pub rng_seed: Option<u64>,
    /// Enables the file log layer when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            assets_dir: PathBuf::from("./assets"),
            font_path: None,
            store_path: default_store_path(),
            render_workers: None,
            rng_seed: None,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GACHA_DATA_DIR` - Game-data snapshot directory (default: ./data)
    /// - `GACHA_ASSETS_DIR` - Card artwork directory (default: ./assets)
    /// - `GACHA_FONT_PATH` - Footer font override (default: {assets}/gacha_font.ttf)
    /// - `GACHA_STORE_PATH` - User store file (default: platform data dir)
    /// - `GACHA_RENDER_WORKERS` - Concurrent card renders (default: 8)
    /// - `GACHA_RNG_SEED` - Seed for reproducible batches (default: OS entropy)
    /// - `GACHA_LOG_DIR` - Also write logs to this directory (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_path("GACHA_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(dir) = read_path("GACHA_ASSETS_DIR") {
            config.assets_dir = dir;
        }
        if let Some(path) = read_path("GACHA_STORE_PATH") {
            config.store_path = path;
        }
        config.font_path = read_path("GACHA_FONT_PATH");
        config.log_dir = read_path("GACHA_LOG_DIR");

        config.render_workers = read_env::<usize>("GACHA_RENDER_WORKERS").map(|n| n.max(1));
        config.rng_seed = read_env::<u64>("GACHA_RNG_SEED");

        config
    }
}

/// Platform data directory, e.g. `~/.local/share/gacha/gacha.json` on Linux.
fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "gacha")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("gacha.json")
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
