//! The operation surface exposed to calling routines.
//!
//! An [`AgentSession`] owns all per-agent mutable state (attack cooldown,
//! crafting/container activity) and threads it through every operation, so
//! multiple agents can coexist in one process. All operations return
//! `Result<bool>`-style outcomes: `Ok(false)`
//! means "the requested action did not complete" (nothing found, supervisor
//! intervened, engine rejected a transient race) and is a normal result the
//! routine is expected to check, not an error.

mod combat;
mod container;
mod craft;
mod dig;
mod find;
mod inventory;
mod movement;

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::config::SessionConfig;
use crate::cooldown::AttackCooldownState;
use crate::engine::WorldEngine;
use crate::error::{EngineResult, Result, RuntimeError};
use crate::supervisor::{ActionSupervisor, ActivityFlags, SuperviseOptions};

/// A scripting session controlling one agent.
pub struct AgentSession {
    engine: Arc<dyn WorldEngine>,
    config: SessionConfig,
    activity: Arc<ActivityFlags>,
    supervisor: ActionSupervisor,
    cooldown: Mutex<AttackCooldownState>,
}

impl AgentSession {
    pub fn new(engine: Arc<dyn WorldEngine>) -> Self {
        Self::with_config(engine, SessionConfig::default())
    }

    pub fn with_config(engine: Arc<dyn WorldEngine>, config: SessionConfig) -> Self {
        let activity = Arc::new(ActivityFlags::default());
        let supervisor = ActionSupervisor::new(engine.clone(), activity.clone());
        Self {
            engine,
            config,
            activity,
            supervisor,
            cooldown: Mutex::new(AttackCooldownState::default()),
        }
    }

    /// Direct access to the underlying engine adapter.
    pub fn engine(&self) -> &Arc<dyn WorldEngine> {
        &self.engine
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Suspend for `ticks` of the engine's physics clock. Useful when
    /// waiting on the server to update a block or spawn drops.
    pub async fn wait_ticks(&self, ticks: u32) {
        self.engine.wait_ticks(ticks).await;
    }

    /// Run `action` under the stuck supervisor with session defaults.
    pub(crate) async fn supervised<F>(&self, action: F) -> Result<bool>
    where
        F: Future<Output = EngineResult<()>>,
    {
        self.supervisor
            .supervise(
                action,
                SuperviseOptions::with_interval(self.config.stuck_interval),
            )
            .await
    }

    /// Run `action` under the stuck supervisor with caller-tuned options
    /// (the interval is still the session default unless overridden).
    pub(crate) async fn supervised_with<F>(
        &self,
        action: F,
        mut options: SuperviseOptions,
    ) -> Result<bool>
    where
        F: Future<Output = EngineResult<()>>,
    {
        options.interval = Some(options.interval.unwrap_or(self.config.stuck_interval));
        self.supervisor.supervise(action, options).await
    }

    /// Swallow recoverable engine rejections into a false result; transient
    /// world-state races are expected in a live simulation and must not
    /// crash the routine.
    pub(crate) fn recover(&self, operation: &'static str, result: Result<bool>) -> Result<bool> {
        match result {
            Err(RuntimeError::Engine(err)) if err.is_recoverable() => {
                tracing::warn!(operation, error = %err, "engine rejected operation");
                Ok(false)
            }
            other => other,
        }
    }
}
