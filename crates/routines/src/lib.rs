//! Example routines built on the agent scripting runtime.
//!
//! Each routine is a plain async function over an [`runtime::AgentSession`]:
//! no framework, no callbacks. They are written against the [`WorldEngine`]
//! seam, so the same routine runs unchanged against the in-memory sim or a
//! live game adapter.
//!
//! [`WorldEngine`]: runtime::WorldEngine

pub mod flowers;
pub mod gather;
pub mod loot;
pub mod points;

pub use flowers::pick_best_flower;
pub use gather::{GatherOptions, gather_blocks};
pub use loot::{LootAndMineOptions, loot_and_mine};
pub use points::PointTable;
