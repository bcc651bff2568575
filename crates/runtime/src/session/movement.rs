//! Supervised navigation operations.

use rand::Rng;

use bot_core::{Block, Entity, GroundItem, Vec3};

use crate::config::ApproachOptions;
use crate::engine::Goal;
use crate::error::Result;
use crate::session::AgentSession;

impl AgentSession {
    /// Walk to within `options.reach` of the entity.
    ///
    /// Returns `Ok(true)` once the agent stands at the goal, `Ok(false)`
    /// when the stuck supervisor intervened or the engine abandoned the
    /// route.
    pub async fn approach_entity(&self, entity: &Entity, options: &ApproachOptions) -> Result<bool> {
        tracing::debug!(target = ?entity.name, reach = options.reach, "approaching entity");
        let goal = Goal::Near {
            position: entity.position,
            range: options.reach,
        };
        let result = self.supervised(self.engine.goto(goal)).await;
        self.recover("approach_entity", result)
    }

    /// Walk to where the block can be acted on from `options.reach`.
    pub async fn approach_block(&self, block: &Block, options: &ApproachOptions) -> Result<bool> {
        tracing::debug!(target = %block.name, reach = options.reach, "approaching block");
        let goal = Goal::Reach {
            position: block.position,
            reach: options.reach,
        };
        let result = self.supervised(self.engine.goto(goal)).await;
        self.recover("approach_block", result)
    }

    /// Walk to within `reach` of an item on the ground; the engine picks it
    /// up automatically once adjacent.
    pub async fn approach_ground_item(&self, item: &GroundItem, reach: f64) -> Result<bool> {
        tracing::debug!(target = %item.item_name, "approaching ground item");
        let goal = Goal::Near {
            position: item.position,
            range: reach,
        };
        let result = self.supervised(self.engine.goto(goal)).await;
        self.recover("approach_ground_item", result)
    }

    /// Walk to within `range` of an arbitrary point.
    pub async fn approach_position(&self, position: Vec3, range: f64) -> Result<bool> {
        let goal = Goal::Near { position, range };
        let result = self.supervised(self.engine.goto(goal)).await;
        self.recover("approach_position", result)
    }

    /// Pick a random point between `min_distance` and `max_distance` away on
    /// the X and Z axes and walk toward it. Used by routines to shake loose
    /// after a failed find or collect.
    pub async fn wander(&self, min_distance: f64, max_distance: f64) -> Result<bool> {
        let min_distance = min_distance.max(1.0);
        let max_distance = max_distance.max(min_distance);

        let (dx, dz) = {
            let mut rng = rand::thread_rng();
            let spread = max_distance - min_distance;
            let dx = (min_distance + rng.r#gen::<f64>() * spread)
                * if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
            let dz = (min_distance + rng.r#gen::<f64>() * spread)
                * if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
            (dx, dz)
        };

        let here = self.engine.current_position();
        tracing::debug!(dx, dz, "wandering");
        let goal = Goal::Xz {
            x: here.x + dx,
            z: here.z + dz,
        };
        let result = self.supervised(self.engine.goto(goal)).await;
        self.recover("wander", result)
    }

    /// Keep following the entity within `range`. Continuous: installs the
    /// goal and returns immediately, without supervision.
    pub fn follow_entity(&self, entity: &Entity, range: f64) {
        tracing::debug!(target = ?entity.name, range, "following entity");
        self.engine.set_continuous_goal(Goal::Follow {
            entity_id: entity.id,
            range,
        });
    }

    /// Keep at least `range` away from the entity. Continuous.
    pub fn avoid_entity(&self, entity: &Entity, range: f64) {
        tracing::debug!(target = ?entity.name, range, "avoiding entity");
        self.engine.set_continuous_goal(Goal::Avoid {
            entity_id: entity.id,
            range,
        });
    }
}
