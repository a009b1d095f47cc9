//! Small runtime helpers.

mod locks;

pub use locks::UserLocks;
