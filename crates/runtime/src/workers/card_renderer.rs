//! Bounded, order-preserving card rendering.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;

use gacha_core::{CharacterId, DrawResult};

use crate::oracle::{CharacterDict, GachaOracle, OracleError};
use crate::render::{CardAssets, CardBadges, Portrait, RenderedCard, compose_card, decode};

/// Reasons a card falls back to the placeholder portrait.
#[derive(Debug, Error)]
enum CardFailure {
    #[error("no character record for {0}")]
    MissingRecord(CharacterId),

    #[error("portrait fetch failed: {0}")]
    Fetch(#[from] OracleError),

    #[error("portrait decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Renders cards on tokio tasks, at most `workers` at a time.
#[derive(Clone)]
pub struct CardWorkerPool {
    oracle: Arc<dyn GachaOracle>,
    assets: Arc<CardAssets>,
    permits: Arc<Semaphore>,
    workers: usize,
}

impl CardWorkerPool {
    pub fn new(oracle: Arc<dyn GachaOracle>, assets: Arc<CardAssets>, workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            oracle,
            assets,
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    /// Renders one card per result, in the order of `results`.
    ///
    /// Never fails: every per-card error is logged and replaced by the
    /// placeholder card.
    pub async fn render_cards(
        &self,
        results: &[DrawResult],
        characters: Arc<CharacterDict>,
    ) -> Vec<RenderedCard> {
        let handles: Vec<_> = results
            .iter()
            .copied()
            .map(|result| {
                let oracle = Arc::clone(&self.oracle);
                let assets = Arc::clone(&self.assets);
                let permits = Arc::clone(&self.permits);
                let characters = Arc::clone(&characters);
                let handle = tokio::spawn(async move {
                    // The semaphore is never closed.
                    let _permit = permits.acquire_owned().await.ok();
                    render_card(oracle, assets, characters, result).await
                });
                (result, handle)
            })
            .collect();

        let mut cards = Vec::with_capacity(handles.len());
        for (result, handle) in handles {
            let card = match handle.await {
                Ok(card) => card,
                Err(e) => {
                    tracing::warn!("Card task for {} failed: {}", result.character, e);
                    compose_card(&self.assets, None, badges(&result))
                }
            };
            cards.push(card);
        }
        cards
    }
}

impl std::fmt::Debug for CardWorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardWorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}

fn badges(result: &DrawResult) -> CardBadges {
    CardBadges {
        is_new: result.is_new,
        is_pickup: result.is_pickup,
    }
}

async fn fetch_portrait(
    oracle: &dyn GachaOracle,
    characters: &CharacterDict,
    id: CharacterId,
) -> Result<(Vec<u8>, u8), CardFailure> {
    let record = characters.get(&id).ok_or(CardFailure::MissingRecord(id))?;
    let bytes = oracle.fetch_asset(&record.portrait_path()).await?;
    Ok((bytes, record.star_grade))
}

async fn render_card(
    oracle: Arc<dyn GachaOracle>,
    assets: Arc<CardAssets>,
    characters: Arc<CharacterDict>,
    result: DrawResult,
) -> RenderedCard {
    let fetched = fetch_portrait(oracle.as_ref(), &characters, result.character).await;

    let blocking_assets = Arc::clone(&assets);
    let composed = tokio::task::spawn_blocking(move || {
        let portrait = fetched.and_then(|(bytes, stars)| {
            let image = decode(&bytes)?;
            Ok(Portrait { image, stars })
        });
        let portrait = match portrait {
            Ok(portrait) => Some(portrait),
            Err(e) => {
                tracing::warn!("Student card {} degraded: {}", result.character, e);
                None
            }
        };
        compose_card(&blocking_assets, portrait, badges(&result))
    })
    .await;

    composed.unwrap_or_else(|e| {
        tracing::warn!("Card composition for {} failed: {}", result.character, e);
        compose_card(&assets, None, badges(&result))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use gacha_core::{CharacterRecord, PoolKind, RarityBaseRate, RateTable, Rarity};
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::oracle::{CommonConfig, StaticOracle};
    use crate::render::{encode_png, test_assets};

    fn rates() -> RateTable {
        let empty = |rarity| RarityBaseRate {
            rarity,
            chance: 0.0,
            characters: vec![],
        };
        RateTable::new(empty(Rarity::Three), empty(Rarity::Two), empty(Rarity::One), 0.0, 0.0)
            .unwrap()
    }

    fn result(id: u32) -> DrawResult {
        DrawResult {
            character: CharacterId(id),
            pool: PoolKind::BaseTop,
            is_new: true,
            is_pickup: false,
            is_top_pickup: false,
        }
    }

    fn oracle_with(ids: &[u32], broken: &[u32]) -> (StaticOracle, CharacterDict) {
        let mut oracle = StaticOracle::new(CommonConfig::default(), rates());
        let mut characters = HashMap::new();
        for &id in ids {
            let record = CharacterRecord::new(CharacterId(id), 3, format!("Stu{}", id));
            let bytes = if broken.contains(&id) {
                b"garbage".to_vec()
            } else {
                let portrait = RgbaImage::from_pixel(32, 32, Rgba([0, 200, 0, 255]));
                encode_png(&portrait).unwrap()
            };
            oracle.add_asset(record.portrait_path(), bytes);
            oracle.add_character(record.clone());
            characters.insert(record.id, record);
        }
        (oracle, characters)
    }

    #[tokio::test]
    async fn cards_keep_draw_order_and_degrade_individually() {
        let (oracle, characters) = oracle_with(&[1, 2, 3], &[2]);
        let pool = CardWorkerPool::new(Arc::new(oracle), Arc::new(test_assets()), 2);

        // 4 has no record at all
        let results = [result(1), result(2), result(3), result(4)];
        let cards = pool.render_cards(&results, Arc::new(characters)).await;

        let flags: Vec<(bool, u8)> = cards.iter().map(|c| (c.placeholder, c.stars)).collect();
        assert_eq!(flags, vec![(false, 3), (true, 0), (false, 3), (true, 0)]);
    }

    #[tokio::test]
    async fn missing_asset_uses_placeholder() {
        let record = CharacterRecord::new(CharacterId(1), 3, "Aru");
        let mut oracle = StaticOracle::new(CommonConfig::default(), rates());
        oracle.add_character(record.clone());
        let characters: CharacterDict = HashMap::from([(record.id, record)]);
        let pool = CardWorkerPool::new(Arc::new(oracle), Arc::new(test_assets()), 8);

        let cards = pool.render_cards(&[result(1)], Arc::new(characters)).await;
        assert!(cards[0].placeholder);
        assert_eq!(cards[0].stars, 0);
    }

    #[test]
    fn worker_count_is_at_least_one() {
        let (oracle, _) = oracle_with(&[], &[]);
        let pool = CardWorkerPool::new(Arc::new(oracle), Arc::new(test_assets()), 0);
        assert_eq!(pool.workers, 1);
        assert_eq!(pool.permits.available_permits(), 1);
    }
}
