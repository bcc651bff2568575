//! Deterministic in-memory world engine.
//!
//! A small stand-in for the external physics/pathfinding stack, used by the
//! integration tests and the demo binary. Movement and digging take
//! simulated time (scaled way down from real gameplay), cancellation is
//! observable, and world mutations follow the same rules the real engine
//! enforces: digging drops an item stack where the block stood, walking over
//! a ground item picks it up, crafting consumes materials.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use bot_core::{Block, Entity, GroundItem, Item, ItemDefinition, Vec3};

use crate::engine::{ContainerHandle, Goal, WorldEngine};
use crate::error::{EngineError, EngineResult};

/// Dig time assumed for blocks with no registered profile.
const DEFAULT_BARE_HANDS_MS: f64 = 1000.0;

/// Radius within which arriving at a point scoops up ground items.
const PICKUP_RADIUS: f64 = 1.5;

/// Time scaling for the simulation.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub move_ms_per_block: u64,
    pub tick_ms: u64,
    pub craft_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            move_ms_per_block: 2,
            tick_ms: 1,
            craft_ms: 5,
        }
    }
}

/// A crafting recipe the sim can satisfy from the inventory.
#[derive(Clone, Debug)]
pub struct SimRecipe {
    pub inputs: Vec<(String, u32)>,
    pub output_count: u32,
    pub needs_table: bool,
}

struct SimContainer {
    position: Vec3,
    items: Vec<Item>,
}

#[derive(Default)]
struct SimState {
    position: Vec3,
    busy: bool,
    /// When frozen, navigation makes no progress until cancelled. Models an
    /// agent wedged against an obstacle.
    frozen: bool,
    cancel_count: u32,
    entities: Vec<Entity>,
    blocks: Vec<Block>,
    ground_items: Vec<GroundItem>,
    inventory: Vec<Item>,
    held: Option<Item>,
    next_slot: u16,
    definitions: HashMap<String, ItemDefinition>,
    /// (block name, tool name or None for bare hands) -> milliseconds.
    dig_times: HashMap<(String, Option<String>), f64>,
    recipes: HashMap<String, SimRecipe>,
    containers: Vec<SimContainer>,
    continuous_goal: Option<Goal>,
}

/// The in-memory engine.
pub struct SimWorld {
    state: Mutex<SimState>,
    cancelled: Notify,
    config: SimConfig,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimWorld {
    pub fn new(config: SimConfig) -> Self {
        Self {
            state: Mutex::new(SimState::default()),
            cancelled: Notify::new(),
            config,
        }
    }

    // ------------------------------------------------------------------
    // World building
    // ------------------------------------------------------------------

    pub fn set_position(&self, position: Vec3) {
        self.lock().position = position;
    }

    pub fn spawn_entity(&self, entity: Entity) {
        self.lock().entities.push(entity);
    }

    pub fn add_block(&self, block: Block) {
        self.lock().blocks.push(block);
    }

    pub fn add_ground_item(&self, item: GroundItem) {
        self.lock().ground_items.push(item);
    }

    /// Remove the block at `position`, as if broken by another player.
    pub fn remove_block(&self, position: Vec3) {
        self.lock()
            .blocks
            .retain(|b| !b.position.approx_eq(position, 0.1));
    }

    pub fn define_item(&self, definition: ItemDefinition) {
        self.lock()
            .definitions
            .insert(definition.name.clone(), definition);
    }

    /// Add items to the inventory, merging with an existing stack.
    pub fn give(&self, name: &str, count: u32) {
        let mut state = self.lock();
        state.give(name, count);
    }

    pub fn set_dig_time(&self, block: &str, tool: Option<&str>, ms: f64) {
        self.lock()
            .dig_times
            .insert((block.to_string(), tool.map(str::to_string)), ms);
    }

    pub fn add_recipe(&self, output: &str, recipe: SimRecipe) {
        self.lock().recipes.insert(output.to_string(), recipe);
    }

    pub fn add_container(&self, position: Vec3, items: Vec<Item>) {
        self.lock().containers.push(SimContainer { position, items });
    }

    /// Freeze or unfreeze navigation progress.
    pub fn set_frozen(&self, frozen: bool) {
        self.lock().frozen = frozen;
    }

    /// Manual busy override for supervisor tests.
    pub fn set_busy(&self, busy: bool) {
        self.lock().busy = busy;
    }

    /// How many times `cancel_current_goal` has been called.
    pub fn cancel_count(&self) -> u32 {
        self.lock().cancel_count
    }

    pub fn last_continuous_goal(&self) -> Option<Goal> {
        self.lock().continuous_goal.clone()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().expect("sim state poisoned")
    }

    fn goal_target(&self, goal: &Goal) -> Vec3 {
        let state = self.lock();
        match goal {
            Goal::Near { position, .. } | Goal::Reach { position, .. } => *position,
            Goal::Xz { x, z } => Vec3::new(*x, state.position.y, *z),
            Goal::Follow { entity_id, .. } | Goal::Avoid { entity_id, .. } => state
                .entities
                .iter()
                .find(|e| e.id == *entity_id)
                .map(|e| e.position)
                .unwrap_or(state.position),
        }
    }

    /// Move the agent and scoop up any ground items at the destination.
    fn arrive(&self, target: Vec3) {
        let mut state = self.lock();
        state.position = target;
        let picked: Vec<GroundItem> = {
            let position = state.position;
            let (picked, left) = state
                .ground_items
                .drain(..)
                .partition(|item| item.position.distance_to(position) <= PICKUP_RADIUS);
            state.ground_items = left;
            picked
        };
        for item in picked {
            state.give(&item.item_name, item.count);
        }
    }

    async fn walk(&self, distance: f64) -> EngineResult<()> {
        let frozen = self.lock().frozen;
        if frozen {
            // Wedged against an obstacle: no progress until cancelled.
            self.cancelled.notified().await;
            return Err(EngineError::GoalAborted("goal cancelled".into()));
        }
        let walk_time =
            Duration::from_millis((distance * self.config.move_ms_per_block as f64) as u64);
        tokio::select! {
            _ = tokio::time::sleep(walk_time) => Ok(()),
            _ = self.cancelled.notified() => {
                Err(EngineError::GoalAborted("goal cancelled".into()))
            }
        }
    }

    fn resolve_dig_time(state: &SimState, block: &Block, tool: Option<&Item>) -> f64 {
        let bare_hands = state
            .dig_times
            .get(&(block.name.clone(), None))
            .copied()
            .unwrap_or(DEFAULT_BARE_HANDS_MS);
        match tool {
            None => bare_hands,
            Some(tool) => state
                .dig_times
                .get(&(block.name.clone(), Some(tool.name.clone())))
                .copied()
                // A non-tool digs no faster than bare hands.
                .unwrap_or(bare_hands),
        }
    }

    /// Best dig time over bare hands and the whole inventory, matching what
    /// a real adapter reports on queried blocks.
    fn best_dig_time(state: &SimState, block: &Block) -> f64 {
        let mut best = Self::resolve_dig_time(state, block, None);
        for item in &state.inventory {
            best = best.min(Self::resolve_dig_time(state, block, Some(item)));
        }
        best
    }
}

impl SimState {
    fn give(&mut self, name: &str, count: u32) {
        if let Some(stack) = self.inventory.iter_mut().find(|item| item.name == name) {
            stack.count += count;
        } else {
            let slot = self.next_slot;
            self.next_slot += 1;
            self.inventory.push(Item::new(name, count, slot));
        }
    }

    fn take(&mut self, name: &str, mut count: u32) -> bool {
        let available: u32 = self
            .inventory
            .iter()
            .filter(|item| item.name == name)
            .map(|item| item.count)
            .sum();
        if available < count {
            return false;
        }
        for stack in &mut self.inventory {
            if stack.name != name || count == 0 {
                continue;
            }
            let taken = stack.count.min(count);
            stack.count -= taken;
            count -= taken;
        }
        self.inventory.retain(|item| item.count > 0);
        true
    }

    fn recipe_satisfiable(&self, output: &str, crafting_table: Option<&Block>) -> Option<&SimRecipe> {
        let recipe = self.recipes.get(output)?;
        if recipe.needs_table && crafting_table.is_none() {
            return None;
        }
        let satisfied = recipe.inputs.iter().all(|(name, needed)| {
            self.inventory
                .iter()
                .filter(|item| &item.name == name)
                .map(|item| item.count)
                .sum::<u32>()
                >= *needed
        });
        satisfied.then_some(recipe)
    }
}

#[async_trait]
impl WorldEngine for SimWorld {
    fn current_position(&self) -> Vec3 {
        self.lock().position
    }

    fn is_busy(&self) -> bool {
        self.lock().busy
    }

    fn entities_within(&self, radius: f64) -> Vec<Entity> {
        let state = self.lock();
        let position = state.position;
        state
            .entities
            .iter()
            .filter(|e| e.position.distance_to(position) <= radius)
            .cloned()
            .collect()
    }

    fn blocks_within(&self, radius: f64) -> Vec<Block> {
        let state = self.lock();
        let position = state.position;
        state
            .blocks
            .iter()
            .filter(|b| b.position.distance_to(position) <= radius)
            .map(|b| {
                let mut block = b.clone();
                block.has_block_above = state.blocks.iter().any(|other| {
                    !other.is_air()
                        && other.position.approx_eq(b.position.offset(0.0, 1.0, 0.0), 0.1)
                });
                block.estimated_dig_time_ms = Self::best_dig_time(&state, b);
                block
            })
            .collect()
    }

    fn ground_items_within(&self, radius: f64) -> Vec<GroundItem> {
        let state = self.lock();
        let position = state.position;
        state
            .ground_items
            .iter()
            .filter(|item| item.position.distance_to(position) <= radius)
            .cloned()
            .collect()
    }

    fn block_at(&self, position: Vec3) -> Option<Block> {
        let state = self.lock();
        state
            .blocks
            .iter()
            .find(|b| b.position.approx_eq(position, 0.1))
            .cloned()
    }

    fn cancel_current_goal(&self) {
        let mut state = self.lock();
        state.cancel_count += 1;
        drop(state);
        self.cancelled.notify_waiters();
    }

    fn inventory(&self) -> Vec<Item> {
        self.lock().inventory.clone()
    }

    fn held_item(&self) -> Option<Item> {
        self.lock().held.clone()
    }

    fn item_definition(&self, name: &str) -> Option<ItemDefinition> {
        self.lock().definitions.get(name).cloned()
    }

    fn dig_time_ms(&self, block: &Block, tool: Option<&Item>) -> f64 {
        let state = self.lock();
        Self::resolve_dig_time(&state, block, tool)
    }

    async fn goto(&self, goal: Goal) -> EngineResult<()> {
        let target = self.goal_target(&goal);
        let distance = self.lock().position.distance_to(target);
        self.walk(distance).await?;
        self.arrive(target);
        Ok(())
    }

    fn set_continuous_goal(&self, goal: Goal) {
        self.lock().continuous_goal = Some(goal);
    }

    async fn dig(&self, block: &Block) -> EngineResult<()> {
        let dig_time = {
            let state = self.lock();
            let exists = state
                .blocks
                .iter()
                .any(|b| b.position.approx_eq(block.position, 0.1) && b.name == block.name);
            if !exists {
                return Err(EngineError::rejected("dig", "block no longer exists"));
            }
            Self::resolve_dig_time(&state, block, state.held.as_ref())
        };
        if dig_time.is_infinite() {
            return Err(EngineError::rejected("dig", "block cannot be harvested"));
        }

        self.lock().busy = true;
        let result = tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(dig_time as u64)) => Ok(()),
            _ = self.cancelled.notified() => {
                Err(EngineError::GoalAborted("dig cancelled".into()))
            }
        };
        let mut state = self.lock();
        state.busy = false;
        result?;

        state
            .blocks
            .retain(|b| !b.position.approx_eq(block.position, 0.1));
        state.ground_items.push(GroundItem {
            item_name: block.name.clone(),
            display_name: block.display_name.clone(),
            position: block.position,
            count: 1,
        });
        Ok(())
    }

    async fn attack_once(&self, entity_id: u32) -> EngineResult<()> {
        let mut state = self.lock();
        let damage = state
            .held
            .as_ref()
            .and_then(|held| state.definitions.get(&held.name))
            .and_then(|def| def.attack_damage)
            .unwrap_or(1.0);
        let Some(entity) = state.entities.iter_mut().find(|e| e.id == entity_id) else {
            return Err(EngineError::rejected("attack", "entity not found"));
        };
        if !entity.is_attackable() {
            return Err(EngineError::rejected("attack", "entity not attackable"));
        }
        entity.health -= damage;
        if entity.health <= 0.0 {
            entity.is_valid = false;
        }
        Ok(())
    }

    async fn equip(&self, item: &Item) -> EngineResult<()> {
        let mut state = self.lock();
        let Some(stack) = state
            .inventory
            .iter()
            .find(|stack| stack.name == item.name)
            .cloned()
        else {
            return Err(EngineError::rejected("equip", "item not in inventory"));
        };
        state.held = Some(stack);
        Ok(())
    }

    async fn toss(&self, item: &Item, count: u32) -> EngineResult<()> {
        let mut state = self.lock();
        if !state.take(&item.name, count) {
            return Err(EngineError::rejected("toss", "not enough items"));
        }
        let position = state.position;
        state.ground_items.push(GroundItem {
            item_name: item.name.clone(),
            display_name: item.display_name.clone(),
            position: position.offset(1.0, 0.0, 1.0),
            count,
        });
        Ok(())
    }

    async fn open_container(&self, block: &Block) -> EngineResult<ContainerHandle> {
        let state = self.lock();
        state
            .containers
            .iter()
            .position(|c| c.position.approx_eq(block.position, 0.5))
            .map(|index| ContainerHandle(index as u64))
            .ok_or_else(|| EngineError::rejected("open_container", "no container here"))
    }

    fn container_items(&self, container: ContainerHandle) -> Vec<Item> {
        let state = self.lock();
        state
            .containers
            .get(container.0 as usize)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    async fn withdraw(
        &self,
        container: ContainerHandle,
        item: &Item,
        count: u32,
    ) -> EngineResult<()> {
        let mut state = self.lock();
        let Some(chest) = state.containers.get_mut(container.0 as usize) else {
            return Err(EngineError::rejected("withdraw", "container closed"));
        };
        let Some(stack) = chest.items.iter_mut().find(|s| s.name == item.name) else {
            return Err(EngineError::rejected("withdraw", "item not in container"));
        };
        if stack.count < count {
            return Err(EngineError::rejected("withdraw", "not enough items"));
        }
        stack.count -= count;
        chest.items.retain(|s| s.count > 0);
        let name = item.name.clone();
        state.give(&name, count);
        Ok(())
    }

    async fn deposit(
        &self,
        container: ContainerHandle,
        item: &Item,
        count: u32,
    ) -> EngineResult<()> {
        let mut state = self.lock();
        if !state.take(&item.name, count) {
            return Err(EngineError::rejected("deposit", "not enough items"));
        }
        let Some(chest) = state.containers.get_mut(container.0 as usize) else {
            return Err(EngineError::rejected("deposit", "container closed"));
        };
        if let Some(stack) = chest.items.iter_mut().find(|s| s.name == item.name) {
            stack.count += count;
        } else {
            chest.items.push(Item::new(item.name.clone(), count, 0));
        }
        Ok(())
    }

    async fn close_container(&self, _container: ContainerHandle) -> EngineResult<()> {
        Ok(())
    }

    fn has_recipe_for(&self, item_name: &str, crafting_table: Option<&Block>) -> bool {
        self.lock()
            .recipe_satisfiable(item_name, crafting_table)
            .is_some()
    }

    async fn craft(
        &self,
        item_name: &str,
        count: u32,
        crafting_table: Option<&Block>,
    ) -> EngineResult<()> {
        tokio::time::sleep(Duration::from_millis(self.config.craft_ms * count as u64)).await;
        let mut state = self.lock();
        let Some(recipe) = state.recipe_satisfiable(item_name, crafting_table).cloned() else {
            return Err(EngineError::rejected("craft", "recipe not satisfiable"));
        };
        for _ in 0..count {
            for (input, needed) in &recipe.inputs {
                if !state.take(input, *needed) {
                    return Err(EngineError::rejected("craft", "materials ran out"));
                }
            }
            let output = item_name.to_string();
            state.give(&output, recipe.output_count);
        }
        Ok(())
    }

    async fn place_block(&self, item: &Item, against: &Block) -> EngineResult<()> {
        let mut state = self.lock();
        if !state.take(&item.name, 1) {
            return Err(EngineError::rejected("place_block", "item not in inventory"));
        }
        state.blocks.push(Block {
            name: item.name.clone(),
            display_name: item.display_name.clone(),
            position: against.position.offset(0.0, 1.0, 0.0),
            has_block_above: false,
            estimated_dig_time_ms: DEFAULT_BARE_HANDS_MS,
        });
        Ok(())
    }

    async fn wait_ticks(&self, ticks: u32) {
        tokio::time::sleep(Duration::from_millis(self.config.tick_ms * ticks as u64)).await;
    }
}
