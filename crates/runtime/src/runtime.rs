//! High-level gacha orchestrator.
//!
//! [`GachaService`] ties the oracle, the user store, the draw engine and the
//! compositor together behind one call per batch, and is assembled through
//! [`GachaServiceBuilder`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;

use gacha_core::{
    BatchReport, DrawConfig, DrawEngine, PickupPools, PoolKind, UserGachaState,
    find_current_banner,
};

use crate::api::{GachaOutcome, PullOutcome, Result, RuntimeError};
use crate::oracle::{CharacterDict, GachaOracle};
use crate::render::{CardAssets, Compositor};
use crate::repository::UserStore;
use crate::utils::UserLocks;

/// Message returned when the selected server has no running banner.
pub const DEFAULT_NO_BANNER_MESSAGE: &str = "当前服务器没有正在进行的卡池";

/// Runtime configuration shared across the service and its workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub draw: DrawConfig,
    /// Maximum number of cards rendered concurrently.
    pub render_workers: usize,
    /// Seed for reproducible batches; OS entropy when unset.
    pub rng_seed: Option<u64>,
    pub no_banner_message: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            draw: DrawConfig::default(),
            render_workers: 8,
            rng_seed: None,
            no_banner_message: DEFAULT_NO_BANNER_MESSAGE.to_string(),
        }
    }
}

/// Drawn batch plus the dictionary it was drawn against.
enum Prepared {
    Drawn {
        report: BatchReport,
        characters: Arc<CharacterDict>,
    },
    NoActiveBanner(String),
}

/// Draw-and-render entry point.
///
/// Cheap to clone; clones share the per-user locks and the batch counter.
#[derive(Clone)]
pub struct GachaService {
    oracle: Arc<dyn GachaOracle>,
    store: Arc<dyn UserStore>,
    compositor: Compositor,
    config: RuntimeConfig,
    locks: Arc<UserLocks>,
    batches: Arc<AtomicU64>,
}

impl GachaService {
    pub fn builder() -> GachaServiceBuilder {
        GachaServiceBuilder::new()
    }

    /// Runs `pull_count` draws for `user_id` on region `server` and renders
    /// the result sheet.
    pub async fn gacha(&self, user_id: &str, pull_count: u32, server: usize) -> Result<GachaOutcome> {
        self.gacha_at(user_id, pull_count, server, chrono::Utc::now().timestamp())
            .await
    }

    /// [`gacha`](Self::gacha) evaluated at the unix time `now`.
    pub async fn gacha_at(
        &self,
        user_id: &str,
        pull_count: u32,
        server: usize,
        now: i64,
    ) -> Result<GachaOutcome> {
        let (report, characters) = match self.prepare(user_id, pull_count, server, now).await? {
            Prepared::Drawn { report, characters } => (report, characters),
            Prepared::NoActiveBanner(message) => return Ok(GachaOutcome::NoActiveBanner(message)),
        };

        let pity = report.pity();
        let png = self
            .compositor
            .render_with(&report.results, pity, characters)
            .await?;

        Ok(match png {
            Some(png) => GachaOutcome::Image {
                png,
                results: report.results,
                pity,
            },
            None => GachaOutcome::Empty,
        })
    }

    /// Draws and persists a batch without rendering it.
    pub async fn pull(&self, user_id: &str, pull_count: u32, server: usize) -> Result<PullOutcome> {
        self.pull_at(user_id, pull_count, server, chrono::Utc::now().timestamp())
            .await
    }

    /// [`pull`](Self::pull) evaluated at the unix time `now`.
    pub async fn pull_at(
        &self,
        user_id: &str,
        pull_count: u32,
        server: usize,
        now: i64,
    ) -> Result<PullOutcome> {
        Ok(match self.prepare(user_id, pull_count, server, now).await? {
            Prepared::Drawn { report, .. } => PullOutcome::Drawn(report),
            Prepared::NoActiveBanner(message) => PullOutcome::NoActiveBanner(message),
        })
    }

    async fn prepare(
        &self,
        user_id: &str,
        pull_count: u32,
        server: usize,
        now: i64,
    ) -> Result<Prepared> {
        if pull_count == 0 {
            return Err(RuntimeError::InvalidPullCount);
        }

        let common = self.oracle.common_config().await?;
        let available = common.regions.len();
        let region = common
            .regions
            .get(server)
            .ok_or(RuntimeError::UnknownServer { server, available })?;

        let Some(banner) = find_current_banner(&region.current_gacha, now) else {
            tracing::info!("No active banner on server {} at {}", server, now);
            return Ok(Prepared::NoActiveBanner(
                self.config.no_banner_message.clone(),
            ));
        };

        let characters = self.oracle.characters().await?;
        let rates = self.oracle.rate_table().await?;
        let pickups = PickupPools::split(banner, &characters);
        let engine = DrawEngine::new(&rates, pickups, self.config.draw.clone());
        tracing::debug!(
            "Draw pools for server {}: {}",
            server,
            PoolKind::ALL
                .iter()
                .map(|kind| format!(
                    "{}={:.4}/{}",
                    kind,
                    engine.effective_chance(*kind),
                    engine.pool(*kind).characters.len()
                ))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let report = {
            let _guard = self.locks.lock(user_id).await;
            let state = self.load_state(user_id).await?;
            let mut rng = self.batch_rng();
            let report = engine.draw_batch(&mut rng, state, pull_count)?;
            self.save_state(user_id, &report.state).await?;
            report
        };

        tracing::info!(
            "User {} drew {} on server {} ({} new, {} pickup, pity {})",
            user_id,
            report.results.len(),
            server,
            report.results.iter().filter(|r| r.is_new).count(),
            report.results.iter().filter(|r| r.is_pickup).count(),
            report.pity()
        );

        Ok(Prepared::Drawn {
            report,
            characters: Arc::new(characters),
        })
    }

    fn batch_rng(&self) -> StdRng {
        match self.config.rng_seed {
            Some(seed) => {
                let batch = self.batches.fetch_add(1, Ordering::Relaxed);
                StdRng::seed_from_u64(seed ^ batch)
            }
            None => StdRng::from_os_rng(),
        }
    }

    async fn load_state(&self, user_id: &str) -> Result<UserGachaState> {
        let store = Arc::clone(&self.store);
        let user_id = user_id.to_string();
        let state = tokio::task::spawn_blocking(move || store.load(&user_id))
            .await
            .map_err(RuntimeError::StoreTask)??;
        Ok(state)
    }

    async fn save_state(&self, user_id: &str, state: &UserGachaState) -> Result<()> {
        let store = Arc::clone(&self.store);
        let user_id = user_id.to_string();
        let state = state.clone();
        tokio::task::spawn_blocking(move || store.save(&user_id, &state))
            .await
            .map_err(RuntimeError::StoreTask)??;
        Ok(())
    }
}

impl std::fmt::Debug for GachaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GachaService")
            .field("config", &self.config)
            .field("compositor", &self.compositor)
            .finish()
    }
}

/// Builder for [`GachaService`].
pub struct GachaServiceBuilder {
    config: RuntimeConfig,
    oracle: Option<Arc<dyn GachaOracle>>,
    store: Option<Arc<dyn UserStore>>,
    assets: Option<Arc<CardAssets>>,
}

impl GachaServiceBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracle: None,
            store: None,
            assets: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required game-data oracle
    pub fn oracle(mut self, oracle: Arc<dyn GachaOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Set required user store
    pub fn store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set required card artwork
    pub fn assets(mut self, assets: CardAssets) -> Self {
        self.assets = Some(Arc::new(assets));
        self
    }

    pub fn render_workers(mut self, workers: usize) -> Self {
        self.config.render_workers = workers;
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<GachaService> {
        let oracle = self.oracle.ok_or(RuntimeError::MissingComponent("an oracle"))?;
        let store = self.store.ok_or(RuntimeError::MissingComponent("a user store"))?;
        let assets = self.assets.ok_or(RuntimeError::MissingComponent("card assets"))?;

        let compositor = Compositor::new(Arc::clone(&oracle), assets, self.config.render_workers);

        Ok(GachaService {
            oracle,
            store,
            compositor,
            config: self.config,
            locks: Arc::new(UserLocks::new()),
            batches: Arc::new(AtomicU64::new(0)),
        })
    }
}
