//! Flower picking with a point table: prefer the valuable flowers, skip the
//! banned ones, and sweep up whatever drops.

use bot_core::NameFilter;
use runtime::{AgentSession, ApproachOptions, FindBlocksOptions, FindItemsOptions, Result};

use crate::points::PointTable;

/// Pick the most valuable flower in range, then collect its drop.
///
/// Returns how many flowers were picked. One call picks at most one flower;
/// routines run it in their own loop so they can interleave other work.
pub async fn pick_best_flower(
    session: &AgentSession,
    flower_names: &[&str],
    points: &PointTable,
) -> Result<u32> {
    let filter = NameFilter::new(flower_names.iter().map(|n| n.to_string()), false);
    let found = session.find_blocks(&FindBlocksOptions {
        filter: filter.clone(),
        only_top_blocks: true,
        value_fn: Some(points.clone().into_value_fn()),
        ..Default::default()
    });

    let Some(flower) = found.into_iter().next() else {
        tracing::debug!("no flowers in range");
        return Ok(0);
    };

    let name = flower.object.name.clone();
    tracing::info!(flower = %name, value = flower.value, "picking flower");
    if !session
        .approach_block(&flower.object, &ApproachOptions::block_default())
        .await?
    {
        return Ok(0);
    }
    if !session.dig_block(&flower.object).await? {
        return Ok(0);
    }

    session.wait_ticks(session.config().drop_wait_ticks).await;
    let drops = session
        .find_and_collect_items_on_ground(&FindItemsOptions {
            filter: NameFilter::exact(name),
            max_distance: 10.0,
            ..Default::default()
        })
        .await?;
    Ok(drops.len() as u32)
}
