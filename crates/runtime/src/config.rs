//! Explicit option records for the operation surface.
//!
//! Every recognized option and its default is spelled out here instead of a
//! loosely-typed options bag. Value and sort functions are first-class
//! configuration fields plugged into the generic ranking routine.

use std::time::Duration;

use bot_core::{Block, Entity, NameFilter};

use crate::supervisor::DEFAULT_STUCK_INTERVAL;

/// Caller-supplied intrinsic value of a candidate, keyed by its name
/// (username for players). Return a negative value to exclude a candidate
/// outright. Absent function = constant 0.
pub type ValueFn = Box<dyn Fn(&str) -> f64 + Send + Sync>;

/// Caller-supplied ranking key: `(distance, value, candidate) -> key`,
/// lower is better.
pub type SortFn<T> = Box<dyn Fn(f64, f64, &T) -> f64 + Send + Sync>;

/// Session-wide tuning.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Sampling interval for the stuck supervisor.
    pub stuck_interval: Duration,
    /// Ticks to wait after a dig for the server to spawn drops.
    pub drop_wait_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stuck_interval: DEFAULT_STUCK_INTERVAL,
            drop_wait_ticks: 25,
        }
    }
}

/// Options for [`crate::AgentSession::find_entities`].
pub struct FindEntitiesOptions {
    /// Acceptable names; empty = any entity.
    pub filter: NameFilter,
    /// Only return entities that can currently be attacked.
    pub attackable_only: bool,
    /// Entities beyond this distance are not found. Default 50.
    pub max_distance: f64,
    /// Max count of matching entities to consider. Default 1.
    pub max_count: usize,
    pub value_fn: Option<ValueFn>,
    pub sort_fn: Option<SortFn<Entity>>,
}

impl Default for FindEntitiesOptions {
    fn default() -> Self {
        Self {
            filter: NameFilter::any(),
            attackable_only: false,
            max_distance: 50.0,
            max_count: 1,
            value_fn: None,
            sort_fn: None,
        }
    }
}

/// Options for [`crate::AgentSession::find_blocks`].
pub struct FindBlocksOptions {
    /// Acceptable names; empty = any block except air.
    pub filter: NameFilter,
    /// Skip blocks that sit beneath another block.
    pub only_top_blocks: bool,
    /// Blocks beyond this distance are not found. Default 50.
    pub max_distance: f64,
    /// Max count of matching blocks. Default 1.
    pub max_count: usize,
    pub value_fn: Option<ValueFn>,
    pub sort_fn: Option<SortFn<Block>>,
}

impl Default for FindBlocksOptions {
    fn default() -> Self {
        Self {
            filter: NameFilter::any(),
            only_top_blocks: false,
            max_distance: 50.0,
            max_count: 1,
            value_fn: None,
            sort_fn: None,
        }
    }
}

/// Options for [`crate::AgentSession::find_items_on_ground`].
pub struct FindItemsOptions {
    /// Acceptable names; empty = any item.
    pub filter: NameFilter,
    /// Items beyond this distance are not found. Default 50.
    pub max_distance: f64,
    /// Max count of matching items. Default 1.
    pub max_count: usize,
    pub value_fn: Option<ValueFn>,
    pub sort_fn: Option<SortFn<bot_core::GroundItem>>,
}

impl Default for FindItemsOptions {
    fn default() -> Self {
        Self {
            filter: NameFilter::any(),
            max_distance: 50.0,
            max_count: 1,
            value_fn: None,
            sort_fn: None,
        }
    }
}

/// Options for the approach operations.
#[derive(Clone, Debug)]
pub struct ApproachOptions {
    /// Max distance the agent may stand from its target. Default 1 for
    /// entities, 5 for blocks (see the per-operation constructors).
    pub reach: f64,
}

impl ApproachOptions {
    pub fn entity_default() -> Self {
        Self { reach: 1.0 }
    }

    pub fn block_default() -> Self {
        Self { reach: 5.0 }
    }

    pub fn with_reach(reach: f64) -> Self {
        Self { reach }
    }
}

/// Options for [`crate::AgentSession::find_and_dig_block`].
pub struct FindAndDigOptions {
    pub filter: NameFilter,
    pub only_top_blocks: bool,
    /// Default 50.
    pub max_distance: f64,
    /// Approach and pick up the drop after a successful dig. Default true.
    pub collect_drops: bool,
    pub value_fn: Option<ValueFn>,
    pub sort_fn: Option<SortFn<Block>>,
}

impl Default for FindAndDigOptions {
    fn default() -> Self {
        Self {
            filter: NameFilter::any(),
            only_top_blocks: false,
            max_distance: 50.0,
            collect_drops: true,
            value_fn: None,
            sort_fn: None,
        }
    }
}

/// Options for [`crate::AgentSession::attack_entity`].
#[derive(Clone, Debug)]
pub struct AttackOptions {
    /// Distance to close to before swinging. Default 2.
    pub reach: f64,
    /// Equip the highest-damage inventory weapon before swinging.
    /// Default true.
    pub equip_best_weapon: bool,
}

impl Default for AttackOptions {
    fn default() -> Self {
        Self {
            reach: 2.0,
            equip_best_weapon: true,
        }
    }
}

/// Options for [`crate::AgentSession::craft_item`].
#[derive(Clone, Debug)]
pub struct CraftOptions {
    /// Number of recipe applications, not output quantity
    /// (crafting sticks twice yields 8 sticks, not 2). Default 1.
    pub quantity: u32,
    /// Crafting station within reach, for recipes that need one.
    pub crafting_table: Option<Block>,
}

impl Default for CraftOptions {
    fn default() -> Self {
        Self {
            quantity: 1,
            crafting_table: None,
        }
    }
}

impl CraftOptions {
    pub fn times(quantity: u32) -> Self {
        Self {
            quantity,
            crafting_table: None,
        }
    }
}
