//! Container I/O: withdraw and deposit under the activity flag.
//!
//! The activity flag keeps the stuck supervisor from misreading a stationary
//! agent that is legitimately shuffling items through a container window.

use bot_core::{Block, Item, NameFilter};

use crate::engine::ContainerHandle;
use crate::error::Result;
use crate::session::AgentSession;

impl AgentSession {
    /// Open the container block and return its handle. The handle stays
    /// valid until [`Self::close_container`] or until the engine closes the
    /// window on its own (walking away, block destroyed).
    pub async fn open_container(&self, block: &Block) -> Result<Option<ContainerHandle>> {
        match self.engine.open_container(block).await {
            Ok(handle) => Ok(Some(handle)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(block = %block.name, error = %err, "could not open container");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Move matching items from the container into the inventory. `None`
    /// quantity takes everything that matches; a zero quantity is a caller
    /// mistake and reports false immediately.
    ///
    /// Returns `Ok(true)` when at least one item moved.
    pub async fn withdraw(
        &self,
        container: ContainerHandle,
        filter: &NameFilter,
        quantity: Option<u32>,
    ) -> Result<bool> {
        if quantity == Some(0) {
            tracing::warn!(?filter, "withdraw: quantity must be at least 1");
            return Ok(false);
        }
        let _activity = self.activity.container_guard();

        let stacks: Vec<Item> = self
            .engine
            .container_items(container)
            .into_iter()
            .filter(|item| filter.matches_item(item))
            .collect();
        let available: u32 = stacks.iter().map(|item| item.count).sum();
        if available == 0 {
            tracing::debug!(?filter, "nothing matching in container");
            return Ok(false);
        }

        let mut remaining = quantity.unwrap_or(available).min(available);
        let mut moved = 0u32;
        for stack in &stacks {
            if remaining == 0 {
                break;
            }
            let count = stack.count.min(remaining);
            match self.engine.withdraw(container, stack, count).await {
                Ok(()) => {
                    remaining -= count;
                    moved += count;
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(item = %stack.name, error = %err, "withdraw rejected");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        tracing::debug!(?filter, moved, "withdrew items");
        Ok(moved > 0)
    }

    /// Move matching items from the inventory into the container. Same
    /// quantity semantics as [`Self::withdraw`].
    pub async fn deposit(
        &self,
        container: ContainerHandle,
        filter: &NameFilter,
        quantity: Option<u32>,
    ) -> Result<bool> {
        if quantity == Some(0) {
            tracing::warn!(?filter, "deposit: quantity must be at least 1");
            return Ok(false);
        }
        let _activity = self.activity.container_guard();

        let stacks: Vec<Item> = self
            .engine
            .inventory()
            .into_iter()
            .filter(|item| filter.matches_item(item))
            .collect();
        let available: u32 = stacks.iter().map(|item| item.count).sum();
        if available == 0 {
            tracing::debug!(?filter, "nothing matching in inventory");
            return Ok(false);
        }

        let mut remaining = quantity.unwrap_or(available).min(available);
        let mut moved = 0u32;
        for stack in &stacks {
            if remaining == 0 {
                break;
            }
            let count = stack.count.min(remaining);
            match self.engine.deposit(container, stack, count).await {
                Ok(()) => {
                    remaining -= count;
                    moved += count;
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(item = %stack.name, error = %err, "deposit rejected");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        tracing::debug!(?filter, moved, "deposited items");
        Ok(moved > 0)
    }

    pub async fn close_container(&self, container: ContainerHandle) -> Result<()> {
        if let Err(err) = self.engine.close_container(container).await {
            if err.is_recoverable() {
                tracing::warn!(error = %err, "close container rejected");
            } else {
                return Err(err.into());
            }
        }
        Ok(())
    }
}
