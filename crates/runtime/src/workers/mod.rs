//! Background task groups used by the runtime.
//!
//! Card rendering fans out one task per draw result; the results are joined
//! back in draw order before the sheet is assembled.

mod card_renderer;

pub use card_renderer::CardWorkerPool;
