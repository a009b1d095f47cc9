//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the oracle, repositories, the draw engine and the
//! compositor so clients can bubble them up with consistent context.
use thiserror::Error;

use gacha_core::DrawError;

pub use crate::oracle::OracleError;
pub use crate::render::RenderError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("pull count must be at least 1")]
    InvalidPullCount,

    #[error("unknown server index {server} ({available} regions available)")]
    UnknownServer { server: usize, available: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("user store task failed")]
    StoreTask(#[source] tokio::task::JoinError),

    #[error("runtime requires {0} to be configured before building")]
    MissingComponent(&'static str),
}
