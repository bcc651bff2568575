//! Find operations: one generic ranking routine instantiated per variant.

use bot_core::find::sort;
use bot_core::{Block, Entity, FindResult, GroundItem, RankOptions, rank};

use crate::config::{FindBlocksOptions, FindEntitiesOptions, FindItemsOptions};
use crate::session::AgentSession;

impl AgentSession {
    /// Find the best entities near the agent, ranked by the entity sort
    /// function (distance, value, and how long the fight would take).
    ///
    /// Zero matches is a normal outcome and yields an empty vec. Single-
    /// target callers use the default `max_count` of 1 and take the first
    /// result or nothing.
    pub fn find_entities(&self, options: &FindEntitiesOptions) -> Vec<FindResult<Entity>> {
        let origin = self.engine.current_position();
        let candidates = self.engine.entities_within(options.max_distance);
        tracing::debug!(
            filter = ?options.filter,
            count = candidates.len(),
            "searching entities"
        );
        rank(
            origin,
            candidates,
            &options.filter,
            &RankOptions {
                max_distance: Some(options.max_distance),
                max_count: options.max_count,
            },
            |entity: &Entity| {
                entity.is_valid && (!options.attackable_only || entity.is_attackable())
            },
            |name| options.value_fn.as_ref().map_or(0.0, |f| f(name)),
            |distance, value, entity| match &options.sort_fn {
                Some(f) => f(distance, value, entity),
                None => sort::default_entity_sort(distance, value, entity),
            },
        )
    }

    /// Find the best blocks near the agent, ranked by distance, value, and
    /// estimated dig time. Air never matches; `only_top_blocks` skips blocks
    /// buried beneath another block.
    pub fn find_blocks(&self, options: &FindBlocksOptions) -> Vec<FindResult<Block>> {
        let origin = self.engine.current_position();
        let candidates = self.engine.blocks_within(options.max_distance);
        tracing::debug!(
            filter = ?options.filter,
            count = candidates.len(),
            "searching blocks"
        );
        rank(
            origin,
            candidates,
            &options.filter,
            &RankOptions {
                max_distance: Some(options.max_distance),
                max_count: options.max_count,
            },
            |block: &Block| !block.is_air() && (!options.only_top_blocks || !block.has_block_above),
            |name| options.value_fn.as_ref().map_or(0.0, |f| f(name)),
            |distance, value, block| match &options.sort_fn {
                Some(f) => f(distance, value, block),
                None => sort::default_block_sort(distance, value, block),
            },
        )
    }

    /// Find the best items on the ground near the agent, ranked by weighted
    /// distance minus value.
    pub fn find_items_on_ground(&self, options: &FindItemsOptions) -> Vec<FindResult<GroundItem>> {
        let origin = self.engine.current_position();
        let candidates = self.engine.ground_items_within(options.max_distance);
        tracing::debug!(
            filter = ?options.filter,
            count = candidates.len(),
            "searching ground items"
        );
        rank(
            origin,
            candidates,
            &options.filter,
            &RankOptions {
                max_distance: Some(options.max_distance),
                max_count: options.max_count,
            },
            |_| true,
            |name| options.value_fn.as_ref().map_or(0.0, |f| f(name)),
            |distance, value, item| match &options.sort_fn {
                Some(f) => f(distance, value, item),
                None => sort::ground_item_sort_value(distance, value),
            },
        )
    }
}
