//! Demo driver: runs the example routines against the in-memory sim world.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bot_core::{Block, Item, ItemDefinition, NameFilter, Vec3};
use runtime::{AgentSession, SessionConfig, SimRecipe, SimWorld, WorldEngine};

use routines::{GatherOptions, LootAndMineOptions, gather_blocks, loot_and_mine};

fn block(name: &str, position: Vec3) -> Block {
    Block {
        name: name.to_string(),
        display_name: None,
        position,
        has_block_above: false,
        estimated_dig_time_ms: 0.0,
    }
}

/// A small scene with a stand of trees, a supply chest, and an ore vein.
fn build_world() -> Arc<SimWorld> {
    let world = Arc::new(SimWorld::default());

    for x in [4.0, 7.0, 10.0, 13.0] {
        world.add_block(block("oak_log", Vec3::new(x, 0.0, 2.0)));
    }
    world.set_dig_time("oak_log", None, 30.0);

    let chest_position = Vec3::new(-5.0, 0.0, 0.0);
    world.add_block(block("chest", chest_position));
    world.add_container(
        chest_position,
        vec![Item::new("iron_ingot", 3, 0), Item::new("stick", 2, 1)],
    );
    world.add_block(block("crafting_table", Vec3::new(-3.0, 0.0, 0.0)));

    world.add_block(block("gold_ore", Vec3::new(0.0, 0.0, -8.0)));
    world.set_dig_time("gold_ore", None, f64::INFINITY);
    world.set_dig_time("gold_ore", Some("iron_pickaxe"), 60.0);

    world.define_item(ItemDefinition::new("iron_pickaxe", 1));
    world.add_recipe(
        "iron_pickaxe",
        SimRecipe {
            inputs: vec![("iron_ingot".to_string(), 3), ("stick".to_string(), 2)],
            output_count: 1,
            needs_table: true,
        },
    );

    world
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let world = build_world();
    let session = AgentSession::with_config(
        world.clone() as Arc<dyn WorldEngine>,
        SessionConfig {
            stuck_interval: Duration::from_millis(200),
            drop_wait_ticks: 2,
        },
    );

    let logs = gather_blocks(
        &session,
        &GatherOptions {
            filter: NameFilter::partial("log"),
            target_quantity: 4,
            max_dry_spells: 3,
        },
    )
    .await?;
    tracing::info!(logs, "gathering finished");

    let mined = loot_and_mine(&session, &LootAndMineOptions::default()).await?;
    tracing::info!(mined, "loot-and-mine finished");

    let inventory = world.inventory();
    for stack in inventory {
        tracing::info!(item = %stack.name, count = stack.count, "inventory");
    }
    Ok(())
}
