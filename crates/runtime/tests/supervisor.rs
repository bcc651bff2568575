//! Stuck-detection behavior of the action supervisor against the sim engine.

use std::sync::Arc;
use std::time::Duration;

use runtime::{
    ActionSupervisor, ActivityFlags, AgentSession, EngineError, SessionConfig, SimWorld,
    SuperviseOptions, WorldEngine,
};

use bot_core::Vec3;

const INTERVAL: Duration = Duration::from_millis(30);

fn fast_session(world: &Arc<SimWorld>) -> AgentSession {
    AgentSession::with_config(
        world.clone() as Arc<dyn WorldEngine>,
        SessionConfig {
            stuck_interval: INTERVAL,
            drop_wait_ticks: 2,
        },
    )
}

fn bare_supervisor(world: &Arc<SimWorld>) -> (ActionSupervisor, Arc<ActivityFlags>) {
    let activity = Arc::new(ActivityFlags::default());
    let supervisor = ActionSupervisor::new(world.clone() as Arc<dyn WorldEngine>, activity.clone());
    (supervisor, activity)
}

#[tokio::test]
async fn stuck_navigation_is_cancelled_within_one_interval() {
    let world = Arc::new(SimWorld::default());
    world.set_frozen(true);
    let session = fast_session(&world);

    let started = tokio::time::Instant::now();
    let arrived = session
        .approach_position(Vec3::new(100.0, 0.0, 100.0), 1.0)
        .await
        .unwrap();

    assert!(!arrived);
    assert_eq!(world.cancel_count(), 1, "goal must be cancelled exactly once");
    // One interval to notice, with generous slack for the scheduler.
    assert!(started.elapsed() < INTERVAL * 10);
    // The agent never moved.
    assert!(world.current_position().approx_eq(Vec3::ORIGIN, 0.001));
}

#[tokio::test]
async fn moving_agent_settles_without_intervention() {
    let world = Arc::new(SimWorld::default());
    let session = fast_session(&world);

    let arrived = session
        .approach_position(Vec3::new(10.0, 0.0, 0.0), 1.0)
        .await
        .unwrap();

    assert!(arrived);
    assert_eq!(world.cancel_count(), 0);
}

#[tokio::test]
async fn busy_agent_is_never_considered_stuck() {
    let world = Arc::new(SimWorld::default());
    // Stationary but mining: the engine reports busy the whole time.
    world.set_busy(true);
    let (supervisor, _activity) = bare_supervisor(&world);

    let settled = supervisor
        .supervise(
            async {
                tokio::time::sleep(INTERVAL * 4).await;
                Ok::<_, EngineError>(())
            },
            SuperviseOptions::with_interval(INTERVAL),
        )
        .await
        .unwrap();

    assert!(settled);
    assert_eq!(world.cancel_count(), 0);
}

#[tokio::test]
async fn session_activity_counts_as_progress() {
    let world = Arc::new(SimWorld::default());
    let (supervisor, activity) = bare_supervisor(&world);

    // Crafting raises a session-side flag without touching the engine.
    let _guard = activity.crafting_guard();
    let settled = supervisor
        .supervise(
            async {
                tokio::time::sleep(INTERVAL * 4).await;
                Ok::<_, EngineError>(())
            },
            SuperviseOptions::with_interval(INTERVAL),
        )
        .await
        .unwrap();

    assert!(settled);
    assert_eq!(world.cancel_count(), 0);
}

#[tokio::test]
async fn no_side_effects_after_the_action_settles() {
    let world = Arc::new(SimWorld::default());
    let (supervisor, _activity) = bare_supervisor(&world);

    let settled = supervisor
        .supervise(
            async { Ok::<_, EngineError>(()) },
            SuperviseOptions::with_interval(INTERVAL),
        )
        .await
        .unwrap();
    assert!(settled);

    // The sampling timer must be gone: nothing fires after return.
    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(world.cancel_count(), 0);
}

#[tokio::test]
async fn abort_condition_cancels_like_a_stuck_agent() {
    let world = Arc::new(SimWorld::default());
    world.set_frozen(true);
    let (supervisor, _activity) = bare_supervisor(&world);

    let engine: Arc<dyn WorldEngine> = world.clone();
    let settled = supervisor
        .supervise(
            engine.goto(runtime::Goal::Near {
                position: Vec3::new(50.0, 0.0, 0.0),
                range: 1.0,
            }),
            SuperviseOptions::with_interval(INTERVAL).abort_when(|| true),
        )
        .await
        .unwrap();

    assert!(!settled);
    assert_eq!(world.cancel_count(), 1);
}
