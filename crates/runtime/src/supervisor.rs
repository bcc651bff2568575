//! Progress supervision for long-running navigation and work actions.
//!
//! Navigation in a continuously simulated world has no natural timeout
//! signal: the pathfinder can silently spin against an obstacle forever.
//! The supervisor wraps any such action, samples agent position and
//! busy-state on a fixed timer, and cancels the action once no physical or
//! task progress is observed for one sampling interval. Busy-state must be
//! part of the check or legitimate stationary work (mining in place,
//! crafting) would be misclassified as stuck.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bot_core::Vec3;

use crate::engine::WorldEngine;
use crate::error::{EngineResult, Result};

/// How long the agent must be inactive to be considered stuck.
pub const DEFAULT_STUCK_INTERVAL: Duration = Duration::from_millis(5000);

/// Positions closer than this on every axis count as "has not moved".
pub const POSITION_TOLERANCE: f64 = 0.005;

/// Foreground activities the session tracks itself because the engine does
/// not: crafting and container interaction. The supervisor consults these in
/// addition to the engine's mining/building flag.
#[derive(Debug, Default)]
pub struct ActivityFlags {
    crafting: AtomicBool,
    container: AtomicBool,
}

impl ActivityFlags {
    pub fn is_active(&self) -> bool {
        self.crafting.load(Ordering::Relaxed) || self.container.load(Ordering::Relaxed)
    }

    /// Mark the agent as crafting until the guard drops.
    pub fn crafting_guard(self: &Arc<Self>) -> ActivityGuard {
        ActivityGuard::raise(self.clone(), ActivityKind::Crafting)
    }

    /// Mark the agent as interacting with a container until the guard drops.
    pub fn container_guard(self: &Arc<Self>) -> ActivityGuard {
        ActivityGuard::raise(self.clone(), ActivityKind::Container)
    }

    fn flag(&self, kind: ActivityKind) -> &AtomicBool {
        match kind {
            ActivityKind::Crafting => &self.crafting,
            ActivityKind::Container => &self.container,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ActivityKind {
    Crafting,
    Container,
}

/// Clears its activity flag when dropped, so an early return or error inside
/// a crafting/container operation can never leave the agent marked busy.
pub struct ActivityGuard {
    flags: Arc<ActivityFlags>,
    kind: ActivityKind,
}

impl ActivityGuard {
    fn raise(flags: Arc<ActivityFlags>, kind: ActivityKind) -> Self {
        flags.flag(kind).store(true, Ordering::Relaxed);
        Self { flags, kind }
    }
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.flags.flag(self.kind).store(false, Ordering::Relaxed);
    }
}

/// Per-invocation tuning for [`ActionSupervisor::supervise`].
#[derive(Default)]
pub struct SuperviseOptions {
    /// Sampling interval; [`DEFAULT_STUCK_INTERVAL`] when unset.
    pub interval: Option<Duration>,
    /// Extra cancellation condition checked every tick (e.g. "the block I am
    /// digging no longer exists"). When it reports true the supervisor
    /// intervenes exactly as it does for a stuck agent.
    pub abort_if: Option<Box<dyn Fn() -> bool + Send>>,
}

impl SuperviseOptions {
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            ..Default::default()
        }
    }

    pub fn abort_when(mut self, condition: impl Fn() -> bool + Send + 'static) -> Self {
        self.abort_if = Some(Box::new(condition));
        self
    }
}

/// One supervision run; created at invocation start, dropped on settle.
struct SupervisionState {
    previous_position: Vec3,
    was_busy: bool,
    /// Latched true once detected; never reset within one invocation.
    stuck: bool,
}

/// Wraps an asynchronous navigation/work action with stuck detection.
pub struct ActionSupervisor {
    engine: Arc<dyn WorldEngine>,
    activity: Arc<ActivityFlags>,
}

impl ActionSupervisor {
    pub fn new(engine: Arc<dyn WorldEngine>, activity: Arc<ActivityFlags>) -> Self {
        Self { engine, activity }
    }

    fn is_busy(&self) -> bool {
        self.engine.is_busy() || self.activity.is_active()
    }

    /// Run `action` under progress supervision.
    ///
    /// Returns `Ok(true)` if the action settled on its own, `Ok(false)` if
    /// the supervisor intervened (cancelled navigation exactly once and
    /// waited for the action to unwind). An error from an action that was
    /// *not* cancelled propagates after the timer is torn down; an error
    /// from a cancelled action is a consequence of the intervention and is
    /// reported as `Ok(false)`.
    ///
    /// The supervisor never retries; retry and backoff policy belong to the
    /// calling routine.
    pub async fn supervise<F>(&self, action: F, options: SuperviseOptions) -> Result<bool>
    where
        F: Future<Output = EngineResult<()>>,
    {
        let interval = options.interval.unwrap_or(DEFAULT_STUCK_INTERVAL);
        let mut state = SupervisionState {
            previous_position: self.engine.current_position(),
            was_busy: self.is_busy(),
            stuck: false,
        };

        // First tick fires one full interval after the baseline sample.
        let mut ticker =
            tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        tokio::pin!(action);

        loop {
            tokio::select! {
                result = &mut action => {
                    // The ticker is dropped on return, on every exit path.
                    return match result {
                        Ok(()) => Ok(!state.stuck),
                        Err(_) if state.stuck => Ok(false),
                        Err(err) => Err(err.into()),
                    };
                }
                _ = ticker.tick() => {
                    if state.stuck {
                        // Already intervened; just wait for the action to
                        // unwind.
                        continue;
                    }
                    self.observe(&mut state, options.abort_if.as_deref());
                }
            }
        }
    }

    fn observe(&self, state: &mut SupervisionState, abort_if: Option<&(dyn Fn() -> bool + Send)>) {
        let position = self.engine.current_position();
        let busy = self.is_busy();

        let stalled = position.approx_eq(state.previous_position, POSITION_TOLERANCE)
            && !state.was_busy
            && !busy;
        let aborted = abort_if.is_some_and(|condition| condition());

        if stalled || aborted {
            if stalled {
                tracing::debug!(%position, "agent is stuck, cancelling current goal");
            } else {
                tracing::debug!("abort condition met, cancelling current goal");
            }
            state.stuck = true;
            self.engine.cancel_current_goal();
        } else {
            state.previous_position = position;
            state.was_busy = busy;
        }
    }
}
