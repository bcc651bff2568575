//! Async runtime for scripting autonomous agents.
//!
//! This crate turns the pure data model of `bot-core` into a live control
//! surface. The layering, top to bottom:
//!
//! - **[`AgentSession`]**: the operation surface a routine programs against
//!   (find, approach, dig, attack, inventory, containers, crafting).
//! - **[`ActionSupervisor`]**: watches long-running movement-backed actions
//!   and cancels the ones making no progress.
//! - **[`WorldEngine`]**: the seam to the actual game adapter. Production
//!   code implements it over the real protocol stack; [`SimWorld`] is the
//!   deterministic in-memory implementation used by tests and demos.
//!
//! Operations report `Ok(false)` for the expected failures of a live world
//! (target vanished, path blocked, engine rejected a race) and reserve `Err`
//! for faults the routine cannot reason about.

pub mod config;
pub mod cooldown;
pub mod engine;
pub mod error;
pub mod harvest;
pub mod session;
pub mod sim;
pub mod supervisor;

pub use config::{
    ApproachOptions, AttackOptions, CraftOptions, FindAndDigOptions, FindBlocksOptions,
    FindEntitiesOptions, FindItemsOptions, SessionConfig, SortFn, ValueFn,
};
pub use cooldown::{AttackCooldownState, DEFAULT_ATTACK_COOLDOWN_MS};
pub use engine::{ContainerHandle, Goal, WorldEngine};
pub use error::{EngineError, EngineResult, Result, RuntimeError};
pub use harvest::{BestTool, best_tool};
pub use session::AgentSession;
pub use sim::{SimConfig, SimRecipe, SimWorld};
pub use supervisor::{
    ActionSupervisor, ActivityFlags, DEFAULT_STUCK_INTERVAL, POSITION_TOLERANCE, SuperviseOptions,
};
