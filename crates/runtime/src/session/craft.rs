//! Crafting and block placement.

use bot_core::{Block, Item, NameFilter};

use crate::config::{ApproachOptions, CraftOptions};
use crate::error::Result;
use crate::session::AgentSession;

impl AgentSession {
    /// Craft an item, holding the crafting activity flag for the duration so
    /// the stuck supervisor does not misread the stationary agent.
    ///
    /// Returns the crafted stack from the inventory, or `None` when the item
    /// name is unknown, no recipe is satisfiable with the current materials,
    /// or the engine rejected the craft.
    pub async fn craft_item(&self, item_name: &str, options: &CraftOptions) -> Result<Option<Item>> {
        if self.engine.item_definition(item_name).is_none() {
            tracing::warn!(item_name, "craft failed: unknown item");
            return Ok(None);
        }
        if options.quantity == 0 {
            tracing::warn!(item_name, "craft failed: quantity must be at least 1");
            return Ok(None);
        }
        if !self
            .engine
            .has_recipe_for(item_name, options.crafting_table.as_ref())
        {
            tracing::debug!(
                item_name,
                "no satisfiable recipe; item invalid or materials missing"
            );
            return Ok(None);
        }

        let _activity = self.activity.crafting_guard();
        match self
            .engine
            .craft(item_name, options.quantity, options.crafting_table.as_ref())
            .await
        {
            Ok(()) => {
                tracing::debug!(item_name, quantity = options.quantity, "crafted");
                let filter = NameFilter::exact(item_name);
                Ok(self
                    .engine
                    .inventory()
                    .into_iter()
                    .find(|item| filter.matches_item(item)))
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(item_name, error = %err, "craft rejected");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Walk adjacent to `target` and place a block from the inventory
    /// against its top face.
    pub async fn place_block(&self, block_name: &str, target: &Block) -> Result<bool> {
        let filter = NameFilter::exact(block_name);
        let Some(stack) = self
            .engine
            .inventory()
            .into_iter()
            .find(|item| filter.matches_item(item))
        else {
            tracing::warn!(block_name, "place failed: not in inventory");
            return Ok(false);
        };

        tracing::debug!(block_name, target = %target.position, "placing block");
        if !self
            .approach_block(target, &ApproachOptions::with_reach(4.0))
            .await?
        {
            return Ok(false);
        }
        match self.engine.place_block(&stack, target).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(block_name, error = %err, "place rejected");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}
