//! Pure target-selection primitives shared across the agent stack.
//!
//! `bot-core` defines the world-object data model (entities, blocks, items on
//! the ground), the name-matching predicate every higher-level operation
//! routes through, and the generic candidate-ranking routine with its default
//! sort-value functions. Everything here is synchronous and side-effect free;
//! the async operation surface lives in the `runtime` crate.
pub mod find;
pub mod item;
pub mod matcher;
pub mod position;
pub mod world;

pub use find::{FindResult, RankOptions, rank};
pub use find::sort::{
    block_sort_value, entity_sort_value, ground_item_sort_value, travel_time_ms,
};
pub use item::{Item, ItemDefinition};
pub use matcher::NameFilter;
pub use position::Vec3;
pub use world::{Block, Candidate, Entity, EntityKind, GroundItem};
