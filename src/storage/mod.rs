//! Persisted local state

pub mod store;

pub use store::{SkillStore, StoredState};
