//! Dig and collect operations.

use bot_core::{Block, GroundItem, Item, NameFilter};

use crate::config::{ApproachOptions, FindAndDigOptions, FindBlocksOptions, FindItemsOptions};
use crate::error::Result;
use crate::harvest;
use crate::session::AgentSession;
use crate::supervisor::SuperviseOptions;

impl AgentSession {
    /// Equip the most appropriate tool in the inventory for harvesting
    /// `block`. Returns the equipped tool, or `None` when bare hands win or
    /// the equip was rejected (the previously held item stays in hand).
    pub async fn equip_best_harvest_tool(&self, block: &Block) -> Result<Option<Item>> {
        let best = harvest::best_tool(self.engine.as_ref(), block);
        let Some(tool) = best.tool else {
            return Ok(None);
        };
        match self.engine.equip(&tool).await {
            Ok(()) => Ok(Some(tool)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(tool = %tool.name, error = %err, "unable to equip harvest tool");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Dig the given block, equipping the best harvest tool first.
    ///
    /// Returns `Ok(false)` without attempting to dig when no held tool
    /// (bare hands included) can ever harvest the block. The dig runs under
    /// supervision with an extra abort condition: if the target block
    /// vanishes mid-dig (broken by someone else, burned, pushed), the dig is
    /// cancelled instead of spinning forever.
    pub async fn dig_block(&self, block: &Block) -> Result<bool> {
        let best = harvest::best_tool(self.engine.as_ref(), block);
        if !best.is_harvestable() {
            tracing::debug!(block = %block.name, "no held tool can harvest this block");
            return Ok(false);
        }
        self.equip_best_harvest_tool(block).await?;

        tracing::debug!(block = %block.name, dig_time_ms = best.dig_time_ms, "digging");
        let engine = self.engine.clone();
        let position = block.position;
        let name = block.name.clone();
        let target_vanished =
            move || engine.block_at(position).is_none_or(|current| current.name != name);

        let result = self
            .supervised_with(
                self.engine.dig(block),
                SuperviseOptions::default().abort_when(target_vanished),
            )
            .await;
        self.recover("dig_block", result)
    }

    /// Locate the best matching block, walk to it, dig it, and (by default)
    /// pick up the drop.
    ///
    /// Returns `Ok(true)` once the dig completed; a failed drop pickup does
    /// not fail the operation. `Ok(false)` when no block was found, the
    /// approach was interrupted, or the dig could not complete.
    pub async fn find_and_dig_block(&self, options: &FindAndDigOptions) -> Result<bool> {
        let found = self.find_blocks(&FindBlocksOptions {
            filter: options.filter.clone(),
            only_top_blocks: options.only_top_blocks,
            max_distance: options.max_distance,
            max_count: 1,
            value_fn: None,
            sort_fn: None,
        });
        let Some(result) = found.into_iter().next() else {
            tracing::debug!(filter = ?options.filter, "no matching block found");
            return Ok(false);
        };
        let block = result.object;

        if !self
            .approach_block(&block, &ApproachOptions::block_default())
            .await?
        {
            return Ok(false);
        }
        if !self.dig_block(&block).await? {
            return Ok(false);
        }

        if options.collect_drops {
            // Give the server time to spawn the drops, then grab whatever
            // matches the block we just broke.
            self.wait_ticks(self.config.drop_wait_ticks).await;
            let drops = self.find_items_on_ground(&FindItemsOptions {
                filter: NameFilter::partial(block.name.clone()),
                max_distance: 10.0,
                max_count: 1,
                ..Default::default()
            });
            if let Some(drop) = drops.into_iter().next() {
                // Collection is best-effort; the dig already succeeded.
                let _ = self.approach_ground_item(&drop.object, 1.0).await?;
            }
        }
        Ok(true)
    }

    /// Collect every matching item on the ground within range, re-checking
    /// each one still exists before walking to it (another player, or the
    /// agent itself, may have picked it up in the meantime).
    ///
    /// Returns the items that ended up collected.
    pub async fn find_and_collect_items_on_ground(
        &self,
        options: &FindItemsOptions,
    ) -> Result<Vec<GroundItem>> {
        let targets = self.find_items_on_ground(&FindItemsOptions {
            filter: options.filter.clone(),
            max_distance: options.max_distance,
            max_count: usize::MAX,
            ..Default::default()
        });

        let mut collected = Vec::new();
        for target in targets {
            let item = target.object;
            let still_there = self
                .find_items_on_ground(&FindItemsOptions {
                    filter: NameFilter::exact(item.item_name.clone()),
                    max_distance: options.max_distance,
                    max_count: 1,
                    ..Default::default()
                })
                .into_iter()
                .next()
                .is_some();

            if !still_there || self.approach_ground_item(&item, 1.0).await? {
                // Either we walked onto it, or someone (likely us, on a
                // previous leg) already picked it up.
                collected.push(item);
            }
        }
        Ok(collected)
    }
}
