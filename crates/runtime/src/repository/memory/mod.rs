//! In-memory repository implementations for tests and embedding.

mod state;

pub use state::InMemoryUserStore;
