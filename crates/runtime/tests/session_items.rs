//! Inventory, container, crafting, and combat flows against the sim engine.

use std::sync::Arc;
use std::time::Duration;

use runtime::{
    AgentSession, AttackOptions, CraftOptions, SessionConfig, SimRecipe, SimWorld, WorldEngine,
};

use bot_core::{Block, Entity, EntityKind, Item, ItemDefinition, NameFilter, Vec3};

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

fn mob(id: u32, name: &str, position: Vec3, health: f64) -> Entity {
    Entity {
        id,
        name: Some(name.to_string()),
        display_name: None,
        username: None,
        position,
        health,
        defense: 0.0,
        toughness: 0.0,
        kind: EntityKind::Mob,
        is_valid: true,
    }
}

#[tokio::test]
async fn inventory_quantity_sums_matching_stacks() {
    let world = Arc::new(SimWorld::default());
    world.give("cobblestone", 40);
    world.give("torch", 3);
    let session = session_over(&world);

    assert_eq!(session.inventory_quantity(&NameFilter::exact("cobblestone")), 40);
    assert!(session.inventory_contains(&NameFilter::exact("torch"), 3));
    assert!(!session.inventory_contains(&NameFilter::exact("torch"), 4));
    assert!(!session.inventory_contains(&NameFilter::exact("torch"), 0));
}

#[tokio::test]
async fn drops_a_partial_stack() {
    let world = Arc::new(SimWorld::default());
    world.give("cobblestone", 10);
    let session = session_over(&world);

    let dropped = session
        .drop_inventory_items(&NameFilter::exact("cobblestone"), Some(4))
        .await
        .unwrap();

    assert!(dropped);
    assert_eq!(session.inventory_quantity(&NameFilter::exact("cobblestone")), 6);
    let on_ground: u32 = world
        .ground_items_within(5.0)
        .iter()
        .map(|item| item.count)
        .sum();
    assert_eq!(on_ground, 4);
}

#[tokio::test]
async fn zero_quantity_drop_is_refused() {
    let world = Arc::new(SimWorld::default());
    world.give("cobblestone", 10);
    let session = session_over(&world);

    let dropped = session
        .drop_inventory_items(&NameFilter::exact("cobblestone"), Some(0))
        .await
        .unwrap();

    assert!(!dropped);
    assert_eq!(session.inventory_quantity(&NameFilter::exact("cobblestone")), 10);
}

#[tokio::test]
async fn holds_a_named_item() {
    let world = Arc::new(SimWorld::default());
    world.give("torch", 5);
    let session = session_over(&world);

    let held = session.hold_item("torch").await.unwrap();
    assert_eq!(held.map(|item| item.name), Some("torch".to_string()));

    let missing = session.hold_item("anvil").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn withdraws_and_deposits_through_a_container() {
    let world = Arc::new(SimWorld::default());
    let chest_position = Vec3::new(5.0, 0.0, 5.0);
    world.add_block(block("chest", chest_position));
    world.add_container(chest_position, vec![Item::new("iron_ingot", 10, 0)]);
    let session = session_over(&world);

    let chest = world.block_at(chest_position).unwrap();
    let handle = session.open_container(&chest).await.unwrap().unwrap();

    let took = session
        .withdraw(handle, &NameFilter::exact("iron_ingot"), Some(4))
        .await
        .unwrap();
    assert!(took);
    assert_eq!(session.inventory_quantity(&NameFilter::exact("iron_ingot")), 4);
    assert_eq!(world.container_items(handle)[0].count, 6);

    // None = everything that matches.
    let put = session
        .deposit(handle, &NameFilter::exact("iron_ingot"), None)
        .await
        .unwrap();
    assert!(put);
    assert_eq!(session.inventory_quantity(&NameFilter::exact("iron_ingot")), 0);
    assert_eq!(world.container_items(handle)[0].count, 10);

    session.close_container(handle).await.unwrap();
}

#[tokio::test]
async fn withdrawal_splits_across_container_stacks() {
    let world = Arc::new(SimWorld::default());
    let chest_position = Vec3::new(3.0, 0.0, 0.0);
    world.add_block(block("chest", chest_position));
    world.add_container(
        chest_position,
        vec![Item::new("arrow", 3, 0), Item::new("arrow", 4, 1)],
    );
    let session = session_over(&world);

    let chest = world.block_at(chest_position).unwrap();
    let handle = session.open_container(&chest).await.unwrap().unwrap();

    // 5 arrows need the whole first stack plus part of the second.
    let took = session
        .withdraw(handle, &NameFilter::exact("arrow"), Some(5))
        .await
        .unwrap();
    assert!(took);
    assert_eq!(session.inventory_quantity(&NameFilter::exact("arrow")), 5);
    let left: u32 = world
        .container_items(handle)
        .iter()
        .map(|item| item.count)
        .sum();
    assert_eq!(left, 2);
}

#[tokio::test]
async fn crafts_with_satisfiable_recipe_only() {
    let world = Arc::new(SimWorld::default());
    world.define_item(ItemDefinition::new("oak_planks", 64));
    world.add_recipe(
        "oak_planks",
        SimRecipe {
            inputs: vec![("oak_log".to_string(), 1)],
            output_count: 4,
            needs_table: false,
        },
    );
    let session = session_over(&world);

    // No materials yet.
    let none = session
        .craft_item("oak_planks", &CraftOptions::default())
        .await
        .unwrap();
    assert!(none.is_none());

    world.give("oak_log", 2);
    let crafted = session
        .craft_item("oak_planks", &CraftOptions::times(2))
        .await
        .unwrap()
        .expect("craft should yield a stack");

    assert_eq!(crafted.name, "oak_planks");
    assert_eq!(crafted.count, 8);
    assert_eq!(session.inventory_quantity(&NameFilter::exact("oak_log")), 0);
}

#[tokio::test]
async fn table_recipes_require_a_crafting_table() {
    let world = Arc::new(SimWorld::default());
    world.define_item(ItemDefinition::new("iron_pickaxe", 1));
    world.add_recipe(
        "iron_pickaxe",
        SimRecipe {
            inputs: vec![("iron_ingot".to_string(), 3), ("stick".to_string(), 2)],
            output_count: 1,
            needs_table: true,
        },
    );
    world.give("iron_ingot", 3);
    world.give("stick", 2);
    let session = session_over(&world);

    let without = session
        .craft_item("iron_pickaxe", &CraftOptions::default())
        .await
        .unwrap();
    assert!(without.is_none());

    let table = block("crafting_table", Vec3::new(1.0, 0.0, 1.0));
    let with = session
        .craft_item(
            "iron_pickaxe",
            &CraftOptions {
                quantity: 1,
                crafting_table: Some(table),
            },
        )
        .await
        .unwrap();
    assert_eq!(with.map(|item| item.name), Some("iron_pickaxe".to_string()));
}

#[tokio::test]
async fn unknown_item_does_not_craft() {
    let world = Arc::new(SimWorld::default());
    let session = session_over(&world);

    let crafted = session
        .craft_item("not_a_thing", &CraftOptions::default())
        .await
        .unwrap();
    assert!(crafted.is_none());
}

#[tokio::test]
async fn places_a_block_from_the_inventory() {
    let world = Arc::new(SimWorld::default());
    let anchor_position = Vec3::new(2.0, 0.0, 2.0);
    world.add_block(block("stone", anchor_position));
    world.give("crafting_table", 1);
    let session = session_over(&world);

    let anchor = world.block_at(anchor_position).unwrap();
    let placed = session.place_block("crafting_table", &anchor).await.unwrap();

    assert!(placed);
    let above = world.block_at(anchor_position.offset(0.0, 1.0, 0.0));
    assert_eq!(above.map(|b| b.name), Some("crafting_table".to_string()));
    assert_eq!(session.inventory_quantity(&NameFilter::exact("crafting_table")), 0);
}

#[tokio::test]
async fn consecutive_attacks_respect_the_weapon_cooldown() {
    let world = Arc::new(SimWorld::default());
    world.define_item(ItemDefinition {
        name: "iron_sword".to_string(),
        display_name: None,
        stack_size: 1,
        attack_damage: Some(5.0),
        attack_cooldown_ms: Some(200),
    });
    world.give("iron_sword", 1);
    world.spawn_entity(mob(1, "zombie", Vec3::new(1.0, 0.0, 0.0), 10.0));
    let session = session_over(&world);

    let entities = world.entities_within(10.0);
    let target = &entities[0];

    let started = tokio::time::Instant::now();
    assert!(session
        .attack_entity(target, &AttackOptions::default())
        .await
        .unwrap());
    let first = started.elapsed();

    assert!(session
        .attack_entity(target, &AttackOptions::default())
        .await
        .unwrap());
    let second = started.elapsed() - first;

    // The first swing has no cooldown to wait out; the second must wait out
    // the sword's 200ms.
    assert!(first < Duration::from_millis(150), "first swing waited: {first:?}");
    assert!(second >= Duration::from_millis(180), "second swing too fast: {second:?}");

    let entities = world.entities_within(10.0);
    assert_eq!(entities[0].health, 0.0);
    assert!(!entities[0].is_valid);
}

#[tokio::test]
async fn attack_refuses_invalid_targets() {
    let world = Arc::new(SimWorld::default());
    let mut corpse = mob(2, "zombie", Vec3::new(1.0, 0.0, 0.0), 0.0);
    corpse.is_valid = false;
    world.spawn_entity(corpse.clone());
    let session = session_over(&world);

    let swung = session
        .attack_entity(&corpse, &AttackOptions::default())
        .await
        .unwrap();
    assert!(!swung);
}
