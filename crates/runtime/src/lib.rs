//! Runtime orchestration for the gacha simulator.
//!
//! This crate wires the pure draw rules of `gacha-core` to the outside world:
//! the game-data oracle, persistent per-user state and the result-sheet
//! renderer. Consumers embed [`GachaService`] and call
//! [`GachaService::gacha`] once per batch.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the service and its builder
//! - [`api`] exposes the error and outcome types clients interact with
//! - [`render`] composes cards and the result sheet
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
//! - card rendering tasks are kept internal to the crate
pub mod api;
pub mod oracle;
pub mod render;
pub mod repository;
pub mod runtime;

mod utils;
mod workers;

pub use api::{GachaOutcome, PullOutcome, Result, RuntimeError};
pub use oracle::{
    CharacterDict, CommonConfig, DirectoryOracle, GachaOracle, OracleError, Region, StaticOracle,
};
pub use render::{CardAssets, Compositor, RenderError};
pub use repository::{FileUserStore, InMemoryUserStore, RepositoryError, UserStore};
pub use runtime::{DEFAULT_NO_BANNER_MESSAGE, GachaService, GachaServiceBuilder, RuntimeConfig};
