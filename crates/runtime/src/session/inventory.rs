//! Inventory bookkeeping and drop operations.

use bot_core::{Item, NameFilter};

use crate::error::Result;
use crate::session::AgentSession;

impl AgentSession {
    /// Total count across every inventory stack matching the filter.
    pub fn inventory_quantity(&self, filter: &NameFilter) -> u32 {
        self.engine
            .inventory()
            .iter()
            .filter(|item| filter.matches_item(item))
            .map(|item| item.count)
            .sum()
    }

    /// True when the inventory holds at least `quantity` matching items.
    /// A zero quantity is a caller mistake and reports false immediately.
    pub fn inventory_contains(&self, filter: &NameFilter, quantity: u32) -> bool {
        if quantity == 0 {
            tracing::warn!(?filter, "inventory_contains: quantity must be at least 1");
            return false;
        }
        self.inventory_quantity(filter) >= quantity
    }

    /// Toss matching items onto the ground, draining multiple stacks when
    /// one stack cannot satisfy the quantity. `None` drops everything that
    /// matches.
    ///
    /// Returns `Ok(true)` when at least one item was dropped.
    pub async fn drop_inventory_items(
        &self,
        filter: &NameFilter,
        quantity: Option<u32>,
    ) -> Result<bool> {
        if quantity == Some(0) {
            tracing::warn!(?filter, "drop_inventory_items: quantity must be at least 1");
            return Ok(false);
        }

        let stacks: Vec<Item> = self
            .engine
            .inventory()
            .into_iter()
            .filter(|item| filter.matches_item(item))
            .collect();
        let available: u32 = stacks.iter().map(|item| item.count).sum();
        if available == 0 {
            tracing::debug!(?filter, "nothing in inventory to drop");
            return Ok(false);
        }

        let mut remaining = quantity.unwrap_or(available).min(available);
        tracing::debug!(?filter, count = remaining, "dropping items");
        let mut dropped = 0u32;
        for stack in stacks {
            if remaining == 0 {
                break;
            }
            let count = stack.count.min(remaining);
            match self.engine.toss(&stack, count).await {
                Ok(()) => {
                    remaining -= count;
                    dropped += count;
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(item = %stack.name, error = %err, "toss rejected");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(dropped > 0)
    }

    /// Equip a matching inventory item to the hand slot. Returns the item
    /// now held, or `None` when nothing matched or the engine rejected the
    /// swap (the previous hand is left unchanged).
    pub async fn hold_item(&self, name: &str) -> Result<Option<Item>> {
        let filter = NameFilter::exact(name);
        let Some(stack) = self
            .engine
            .inventory()
            .into_iter()
            .find(|item| filter.matches_item(item))
        else {
            tracing::warn!(name, "equip failed: not in inventory");
            return Ok(None);
        };
        match self.engine.equip(&stack).await {
            Ok(()) => Ok(self.engine.held_item()),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(name, error = %err, "equip rejected");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
