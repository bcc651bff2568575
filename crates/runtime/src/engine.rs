//! Consumed interface of the external world/physics engine.
//!
//! Everything behind [`WorldEngine`] belongs to the foreign navigation and
//! simulation stack: path computation, the physics tick clock, static game
//! data, and the transaction primitives for digging, combat, containers, and
//! crafting. The scripting layer only observes and instructs through this
//! trait. Read accessors are synchronous snapshots of the live world;
//! actions suspend the caller until the engine reports completion.

use async_trait::async_trait;

use bot_core::{Block, Entity, GroundItem, Item, ItemDefinition, Vec3};

use crate::error::EngineResult;

/// A navigation goal handed to the external pathfinding engine.
#[derive(Clone, Debug)]
pub enum Goal {
    /// Stand within `range` of a point.
    Near { position: Vec3, range: f64 },
    /// Stand where the block at `position` can be acted on from `reach`.
    Reach { position: Vec3, reach: f64 },
    /// Reach the X/Z column at any height.
    Xz { x: f64, z: f64 },
    /// Keep within `range` of a moving entity. Continuous: never completes
    /// on its own.
    Follow { entity_id: u32, range: f64 },
    /// Keep at least `range` away from an entity. Continuous.
    Avoid { entity_id: u32, range: f64 },
}

/// Opaque handle to an open container window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerHandle(pub u64);

/// Adapter over the external world/physics engine.
#[async_trait]
pub trait WorldEngine: Send + Sync {
    /// The agent's position in the current simulation tick.
    fn current_position(&self) -> Vec3;

    /// True while the engine is mining or building on the agent's behalf.
    ///
    /// Crafting and container interaction are tracked by the session, not
    /// the engine; the supervisor combines both signals.
    fn is_busy(&self) -> bool;

    fn entities_within(&self, radius: f64) -> Vec<Entity>;

    fn blocks_within(&self, radius: f64) -> Vec<Block>;

    fn ground_items_within(&self, radius: f64) -> Vec<GroundItem>;

    /// The block currently occupying `position`, if any is loaded.
    fn block_at(&self, position: Vec3) -> Option<Block>;

    /// Abandon the current navigation goal and stop any in-progress dig.
    ///
    /// Idempotent and safe to call after the action has already finished.
    /// Best-effort: the engine may take one more simulation tick to stop.
    fn cancel_current_goal(&self);

    fn inventory(&self) -> Vec<Item>;

    fn held_item(&self) -> Option<Item>;

    /// Static game-data lookup. `None` when the name is unknown.
    fn item_definition(&self, name: &str) -> Option<ItemDefinition>;

    /// Predicted dig time for `block` with `tool` (`None` = bare hands).
    /// `f64::INFINITY` when the block cannot be harvested that way.
    fn dig_time_ms(&self, block: &Block, tool: Option<&Item>) -> f64;

    /// Compute and walk a route to `goal`. Resolves when the goal is
    /// reached; errors with [`crate::EngineError::GoalAborted`] when the
    /// goal is cancelled out from under it.
    async fn goto(&self, goal: Goal) -> EngineResult<()>;

    /// Install a continuous goal (follow/avoid) without waiting on it.
    fn set_continuous_goal(&self, goal: Goal);

    async fn dig(&self, block: &Block) -> EngineResult<()>;

    /// One attack swing at the entity. Cooldown pacing is the caller's job.
    async fn attack_once(&self, entity_id: u32) -> EngineResult<()>;

    /// Move `item` into the hand slot.
    async fn equip(&self, item: &Item) -> EngineResult<()>;

    /// Toss `count` items from the given inventory stack onto the ground.
    async fn toss(&self, item: &Item, count: u32) -> EngineResult<()>;

    async fn open_container(&self, block: &Block) -> EngineResult<ContainerHandle>;

    fn container_items(&self, container: ContainerHandle) -> Vec<Item>;

    async fn withdraw(
        &self,
        container: ContainerHandle,
        item: &Item,
        count: u32,
    ) -> EngineResult<()>;

    async fn deposit(
        &self,
        container: ContainerHandle,
        item: &Item,
        count: u32,
    ) -> EngineResult<()>;

    async fn close_container(&self, container: ContainerHandle) -> EngineResult<()>;

    /// True when the agent's current materials can craft `item_name`,
    /// considering the crafting station if one is supplied.
    fn has_recipe_for(&self, item_name: &str, crafting_table: Option<&Block>) -> bool;

    /// Run `count` crafting operations for `item_name`. Note `count` is the
    /// number of recipe applications, not the output quantity.
    async fn craft(
        &self,
        item_name: &str,
        count: u32,
        crafting_table: Option<&Block>,
    ) -> EngineResult<()>;

    /// Place one block from `item` against the top face of `against`.
    async fn place_block(&self, item: &Item, against: &Block) -> EngineResult<()>;

    /// Suspend for `ticks` ticks of the engine's physics clock.
    async fn wait_ticks(&self, ticks: u32);
}
