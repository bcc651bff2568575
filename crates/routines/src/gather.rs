//! Log gathering: dig matching blocks until a target quantity is reached,
//! wandering to a new spot whenever the area runs dry.

use bot_core::NameFilter;
use runtime::{AgentSession, FindAndDigOptions, Result};

/// Tuning for [`gather_blocks`].
pub struct GatherOptions {
    /// Block names to harvest, matched partially ("log" matches every wood
    /// variant).
    pub filter: NameFilter,
    /// Stop once this many matching items are in the inventory.
    pub target_quantity: u32,
    /// Give up after this many consecutive empty searches.
    pub max_dry_spells: u32,
}

impl Default for GatherOptions {
    fn default() -> Self {
        Self {
            filter: NameFilter::partial("log"),
            target_quantity: 8,
            max_dry_spells: 5,
        }
    }
}

/// Dig-and-collect loop. Returns the number of matching items gathered.
pub async fn gather_blocks(session: &AgentSession, options: &GatherOptions) -> Result<u32> {
    let starting = session.inventory_quantity(&options.filter);
    let mut dry_spells = 0u32;

    loop {
        let gathered = session.inventory_quantity(&options.filter) - starting;
        if gathered >= options.target_quantity {
            tracing::info!(gathered, "gather target reached");
            return Ok(gathered);
        }

        let dug = session
            .find_and_dig_block(&FindAndDigOptions {
                filter: options.filter.clone(),
                only_top_blocks: true,
                ..Default::default()
            })
            .await?;

        if dug {
            dry_spells = 0;
            continue;
        }

        dry_spells += 1;
        if dry_spells >= options.max_dry_spells {
            let gathered = session.inventory_quantity(&options.filter) - starting;
            tracing::warn!(gathered, "giving up: nothing left to gather nearby");
            return Ok(gathered);
        }
        tracing::debug!(dry_spells, "nothing found, wandering");
        session.wander(5.0, 15.0).await?;
    }
}
