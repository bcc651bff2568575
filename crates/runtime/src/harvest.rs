//! Harvest tool selection.

use bot_core::{Block, Item};

use crate::engine::WorldEngine;

/// Outcome of ranking the inventory against a block's dig time.
///
/// `tool: None` with a finite time means bare hands win. `None` with
/// `f64::INFINITY` means nothing the agent holds can harvest the block;
/// callers must treat that as "cannot currently be harvested", not as an
/// error.
#[derive(Clone, Debug)]
pub struct BestTool {
    pub tool: Option<Item>,
    pub dig_time_ms: f64,
}

impl BestTool {
    pub fn is_harvestable(&self) -> bool {
        self.dig_time_ms.is_finite()
    }
}

/// Rank every held tool, with bare hands as the zero-tool baseline, by the
/// predicted time to dig `block`, and pick the minimum.
pub fn best_tool(engine: &dyn WorldEngine, block: &Block) -> BestTool {
    let mut best = BestTool {
        tool: None,
        dig_time_ms: engine.dig_time_ms(block, None),
    };
    for item in engine.inventory() {
        let dig_time_ms = engine.dig_time_ms(block, Some(&item));
        if dig_time_ms < best.dig_time_ms {
            best = BestTool {
                tool: Some(item),
                dig_time_ms,
            };
        }
    }
    best
}
