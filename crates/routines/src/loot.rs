//! A multi-step routine: loot a supply chest, craft a pickaxe, mine a target.
//!
//! Exercises the container, crafting, and dig surfaces in sequence, with each
//! step checked before the next so a failed leg stops the run cleanly.

use bot_core::NameFilter;
use runtime::{
    AgentSession, ApproachOptions, CraftOptions, FindAndDigOptions, FindBlocksOptions, Result,
};

/// What the routine needs to find in the world and the chest.
pub struct LootAndMineOptions {
    /// Chest block name to loot. Default "chest".
    pub chest_name: String,
    /// Tool to craft from the loot. Default "iron_pickaxe".
    pub tool_name: String,
    /// Block to mine once tooled up. Default "gold_ore".
    pub target_name: String,
}

impl Default for LootAndMineOptions {
    fn default() -> Self {
        Self {
            chest_name: "chest".to_string(),
            tool_name: "iron_pickaxe".to_string(),
            target_name: "gold_ore".to_string(),
        }
    }
}

/// Run the routine to completion. Returns true when the target block was
/// mined, false when any leg came up empty.
pub async fn loot_and_mine(session: &AgentSession, options: &LootAndMineOptions) -> Result<bool> {
    // Leg 1: find the chest and take everything in it.
    let found = session.find_blocks(&FindBlocksOptions {
        filter: NameFilter::exact(options.chest_name.clone()),
        ..Default::default()
    });
    let Some(chest) = found.into_iter().next() else {
        tracing::warn!(chest = %options.chest_name, "no chest in range");
        return Ok(false);
    };
    if !session
        .approach_block(&chest.object, &ApproachOptions::block_default())
        .await?
    {
        return Ok(false);
    }
    let Some(handle) = session.open_container(&chest.object).await? else {
        return Ok(false);
    };
    let looted = session.withdraw(handle, &NameFilter::any(), None).await?;
    session.close_container(handle).await?;
    if !looted {
        tracing::warn!("chest was empty");
        return Ok(false);
    }

    // Leg 2: craft the tool, using a nearby crafting table when one exists.
    let table = session
        .find_blocks(&FindBlocksOptions {
            filter: NameFilter::exact("crafting_table"),
            ..Default::default()
        })
        .into_iter()
        .next()
        .map(|r| r.object);
    if let Some(table) = &table {
        if !session
            .approach_block(table, &ApproachOptions::block_default())
            .await?
        {
            return Ok(false);
        }
    }
    let crafted = session
        .craft_item(
            &options.tool_name,
            &CraftOptions {
                quantity: 1,
                crafting_table: table,
            },
        )
        .await?;
    if crafted.is_none()
        && !session.inventory_contains(&NameFilter::exact(options.tool_name.clone()), 1)
    {
        tracing::warn!(tool = %options.tool_name, "could not craft the tool");
        return Ok(false);
    }

    // Leg 3: mine the target with the fresh tool.
    session
        .find_and_dig_block(&FindAndDigOptions {
            filter: NameFilter::exact(options.target_name.clone()),
            ..Default::default()
        })
        .await
}
