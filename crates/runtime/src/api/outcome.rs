//! Results returned by [`GachaService`](crate::GachaService).

use gacha_core::{BatchReport, DrawResult};

/// Outcome of a full draw-and-render invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GachaOutcome {
    /// Encoded PNG result sheet together with the data it shows.
    Image {
        png: Vec<u8>,
        results: Vec<DrawResult>,
        pity: u32,
    },
    /// No banner is running on the selected server; nothing was drawn.
    NoActiveBanner(String),
    /// Draws were made but there was nothing to render.
    Empty,
}

/// Outcome of drawing without rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PullOutcome {
    Drawn(BatchReport),
    NoActiveBanner(String),
}
