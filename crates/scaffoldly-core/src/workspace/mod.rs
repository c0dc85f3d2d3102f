//! Read-only queries against the target workspace

pub mod inspect;

pub use inspect::{exists, is_empty, list, VCS_DIR};
