//! Find, approach, dig, and collect flows against the sim engine.

use std::sync::Arc;
use std::time::Duration;

use runtime::{
    AgentSession, FindAndDigOptions, FindBlocksOptions, FindEntitiesOptions, FindItemsOptions,
    SessionConfig, SimWorld, WorldEngine,
};

use bot_core::{Block, Entity, EntityKind, GroundItem, NameFilter, Vec3};

fn session_over(world: &Arc<SimWorld>) -> AgentSession {
    AgentSession::with_config(
        world.clone() as Arc<dyn WorldEngine>,
        SessionConfig {
            stuck_interval: Duration::from_millis(50),
            drop_wait_ticks: 2,
        },
    )
}

fn block(name: &str, position: Vec3) -> Block {
    Block {
        name: name.to_string(),
        display_name: None,
        position,
        has_block_above: false,
        estimated_dig_time_ms: 0.0,
    }
}

fn mob(id: u32, name: &str, position: Vec3) -> Entity {
    Entity {
        id,
        name: Some(name.to_string()),
        display_name: None,
        username: None,
        position,
        health: 10.0,
        defense: 0.0,
        toughness: 0.0,
        kind: EntityKind::Mob,
        is_valid: true,
    }
}

#[tokio::test]
async fn finds_the_closest_blocks_up_to_max_count() {
    let world = Arc::new(SimWorld::default());
    for x in [2.0, 5.0, 8.0, 11.0, 14.0] {
        world.add_block(block("birch_log", Vec3::new(x, 0.0, 0.0)));
    }
    let session = session_over(&world);

    let found = session.find_blocks(&FindBlocksOptions {
        filter: NameFilter::partial("log"),
        max_count: 3,
        ..Default::default()
    });

    let xs: Vec<f64> = found.iter().map(|r| r.object.position.x).collect();
    assert_eq!(xs, vec![2.0, 5.0, 8.0]);
}

#[tokio::test]
async fn negative_value_excludes_an_entity() {
    let world = Arc::new(SimWorld::default());
    world.spawn_entity(mob(1, "zombie", Vec3::new(3.0, 0.0, 0.0)));
    world.spawn_entity(mob(2, "creeper", Vec3::new(5.0, 0.0, 0.0)));
    let session = session_over(&world);

    let found = session.find_entities(&FindEntitiesOptions {
        max_count: 5,
        value_fn: Some(Box::new(|name| if name == "creeper" { -1.0 } else { 0.0 })),
        ..Default::default()
    });

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].object.name.as_deref(), Some("zombie"));
}

#[tokio::test]
async fn top_block_filter_skips_buried_blocks() {
    let world = Arc::new(SimWorld::default());
    world.add_block(block("stone", Vec3::new(3.0, 0.0, 3.0)));
    world.add_block(block("dirt", Vec3::new(3.0, 1.0, 3.0)));
    let session = session_over(&world);

    let buried = session.find_blocks(&FindBlocksOptions {
        filter: NameFilter::exact("stone"),
        only_top_blocks: true,
        ..Default::default()
    });
    assert!(buried.is_empty());

    let any = session.find_blocks(&FindBlocksOptions {
        filter: NameFilter::exact("stone"),
        ..Default::default()
    });
    assert_eq!(any.len(), 1);
}

#[tokio::test]
async fn digs_a_block_and_collects_the_drop() {
    let world = Arc::new(SimWorld::default());
    let position = Vec3::new(4.0, 0.0, 0.0);
    world.add_block(block("oak_log", position));
    world.set_dig_time("oak_log", None, 40.0);
    let session = session_over(&world);

    let dug = session
        .find_and_dig_block(&FindAndDigOptions {
            filter: NameFilter::exact("oak_log"),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(dug);
    assert!(world.block_at(position).is_none());
    let logs: u32 = world
        .inventory()
        .iter()
        .filter(|item| item.name == "oak_log")
        .map(|item| item.count)
        .sum();
    assert_eq!(logs, 1);
}

#[tokio::test]
async fn unharvestable_block_is_not_dug() {
    let world = Arc::new(SimWorld::default());
    let position = Vec3::new(2.0, 0.0, 0.0);
    world.add_block(block("obsidian", position));
    world.set_dig_time("obsidian", None, f64::INFINITY);
    let session = session_over(&world);

    let target = world.block_at(position).unwrap();
    let dug = session.dig_block(&target).await.unwrap();

    assert!(!dug);
    assert!(world.block_at(position).is_some(), "block must be untouched");
    assert_eq!(world.cancel_count(), 0, "no dig was started, so no cancel");
}

#[tokio::test]
async fn equips_the_fastest_tool_before_digging() {
    let world = Arc::new(SimWorld::default());
    let position = Vec3::new(1.0, 0.0, 0.0);
    world.add_block(block("stone", position));
    world.set_dig_time("stone", None, 1500.0);
    world.set_dig_time("stone", Some("iron_pickaxe"), 30.0);
    world.give("iron_pickaxe", 1);
    let session = session_over(&world);

    let target = world.block_at(position).unwrap();
    let dug = session.dig_block(&target).await.unwrap();

    assert!(dug);
    assert_eq!(
        world.held_item().map(|item| item.name),
        Some("iron_pickaxe".to_string())
    );
}

#[tokio::test]
async fn dig_aborts_when_the_target_block_vanishes() {
    let world = Arc::new(SimWorld::default());
    let position = Vec3::new(1.0, 0.0, 0.0);
    world.add_block(block("stone", position));
    world.set_dig_time("stone", None, 5000.0);
    let session = session_over(&world);

    let saboteur = {
        let world = world.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            world.remove_block(position);
        })
    };

    let target = world.block_at(position).unwrap();
    let dug = session.dig_block(&target).await.unwrap();
    saboteur.await.unwrap();

    assert!(!dug);
    assert_eq!(world.cancel_count(), 1);
}

#[tokio::test]
async fn collects_every_matching_ground_item() {
    let world = Arc::new(SimWorld::default());
    for (i, x) in [3.0, 6.0, 9.0].into_iter().enumerate() {
        world.add_ground_item(GroundItem {
            item_name: "arrow".to_string(),
            display_name: None,
            position: Vec3::new(x, 0.0, 0.0),
            count: i as u32 + 1,
        });
    }
    let session = session_over(&world);

    let collected = session
        .find_and_collect_items_on_ground(&FindItemsOptions {
            filter: NameFilter::exact("arrow"),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(collected.len(), 3);
    assert!(world.ground_items_within(50.0).is_empty());
    let arrows: u32 = world
        .inventory()
        .iter()
        .filter(|item| item.name == "arrow")
        .map(|item| item.count)
        .sum();
    assert_eq!(arrows, 6);
}

#[tokio::test]
async fn wander_moves_the_agent() {
    let world = Arc::new(SimWorld::default());
    let session = session_over(&world);

    let moved = session.wander(3.0, 6.0).await.unwrap();

    assert!(moved);
    let here = world.current_position();
    assert!(here.distance_to(Vec3::ORIGIN) >= 3.0);
}

#[tokio::test]
async fn continuous_goals_are_installed_without_waiting() {
    let world = Arc::new(SimWorld::default());
    let target = mob(7, "skeleton", Vec3::new(8.0, 0.0, 0.0));
    world.spawn_entity(target.clone());
    let session = session_over(&world);

    session.follow_entity(&target, 2.0);
    match world.last_continuous_goal() {
        Some(runtime::Goal::Follow { entity_id, range }) => {
            assert_eq!(entity_id, 7);
            assert_eq!(range, 2.0);
        }
        other => panic!("unexpected goal: {other:?}"),
    }
}
