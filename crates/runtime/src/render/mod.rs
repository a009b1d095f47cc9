//! Result-sheet compositor.
//!
//! Turns an ordered batch of [`DrawResult`]s into a PNG:
//! - cards are rendered concurrently by the card worker pool, each falling
//!   back to the placeholder portrait on failure
//! - cards are laid out in rows of five over the background
//! - the pity counter is written into the footer
mod assets;
mod card;
mod grid;
mod raster;

pub use assets::CardAssets;
pub use card::{CardBadges, Portrait, RenderedCard, compose_card};
pub use grid::{CARDS_PER_ROW, compose_grid, draw_footer};
pub use raster::{TextBox, decode, encode_png};

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use gacha_core::DrawResult;

use crate::oracle::{CharacterDict, GachaOracle, OracleError};
use crate::workers::CardWorkerPool;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode asset {asset}")]
    Decode {
        asset: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode result sheet")]
    Encode(#[source] image::ImageError),

    #[error("invalid font file {0}")]
    InvalidFont(PathBuf),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("sheet rendering task failed")]
    Task(#[source] tokio::task::JoinError),
}

/// Renders draw results into a PNG result sheet.
#[derive(Clone)]
pub struct Compositor {
    oracle: Arc<dyn GachaOracle>,
    assets: Arc<CardAssets>,
    workers: CardWorkerPool,
}

impl Compositor {
    pub fn new(oracle: Arc<dyn GachaOracle>, assets: Arc<CardAssets>, render_workers: usize) -> Self {
        let workers = CardWorkerPool::new(Arc::clone(&oracle), Arc::clone(&assets), render_workers);
        Self {
            oracle,
            assets,
            workers,
        }
    }

    /// Renders `results` using a fresh character dictionary from the oracle.
    ///
    /// Returns `Ok(None)` for an empty batch.
    pub async fn render_batch(
        &self,
        results: &[DrawResult],
        pity: u32,
    ) -> Result<Option<Vec<u8>>, RenderError> {
        if results.is_empty() {
            return Ok(None);
        }
        let characters = Arc::new(self.oracle.characters().await?);
        self.render_with(results, pity, characters).await
    }

    /// Renders `results` against an already fetched character dictionary.
    pub async fn render_with(
        &self,
        results: &[DrawResult],
        pity: u32,
        characters: Arc<CharacterDict>,
    ) -> Result<Option<Vec<u8>>, RenderError> {
        if results.is_empty() {
            return Ok(None);
        }

        let cards = self.workers.render_cards(results, characters).await;
        let placeholders = cards.iter().filter(|card| card.placeholder).count();
        if placeholders > 0 {
            tracing::warn!(
                "{} of {} cards rendered with placeholder portrait",
                placeholders,
                cards.len()
            );
        }

        let assets = Arc::clone(&self.assets);
        let png = tokio::task::spawn_blocking(move || {
            let images: Vec<_> = cards.into_iter().map(|card| card.image).collect();
            let mut sheet = compose_grid(&assets, &images);
            draw_footer(&mut sheet, &assets, pity);
            encode_png(&sheet).map_err(RenderError::Encode)
        })
        .await
        .map_err(RenderError::Task)??;

        tracing::debug!("Rendered result sheet ({} bytes)", png.len());
        Ok(Some(png))
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("assets", &self.assets)
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
pub(crate) use card::tests::{FOOTER_FONT, test_assets};
