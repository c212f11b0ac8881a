//! # Storage Module
//!
//! Seams to the persistence collaborators that own the group roster and the
//! stored split records. The split logic only talks to the traits in
//! [`traits`]; the app embedding this crate supplies the real database-backed
//! implementations.
//!
//! - **traits**: `ParticipantRoster` and `SplitRecordStore`
//! - **memory**: in-process implementations for previews, demos and tests
//! - **config_file**: loading [`shared::SplitConfig`] from a YAML file

pub mod config_file;
pub mod memory;
pub mod traits;

pub use config_file::{load_split_config, save_split_config};
pub use memory::{InMemoryRoster, InMemorySplitRecordStore};
pub use traits::{ParticipantRoster, SplitRecordStore};
