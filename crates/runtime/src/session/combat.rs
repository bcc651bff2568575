//! Attack operations gated by the shared weapon cooldown.

use std::time::Duration;

use tokio::time::Instant;

use bot_core::{Entity, Item};

use crate::config::AttackOptions;
use crate::cooldown::{self, DEFAULT_ATTACK_COOLDOWN_MS};
use crate::error::Result;
use crate::session::AgentSession;

impl AgentSession {
    /// Close to reach, wait out the shared attack cooldown, equip the best
    /// weapon, and swing once.
    ///
    /// Returns `Ok(true)` after a successful swing; the kill itself may take
    /// several calls, which is the calling routine's loop to run.
    pub async fn attack_entity(&self, entity: &Entity, options: &AttackOptions) -> Result<bool> {
        if !entity.is_attackable() {
            tracing::warn!(target = ?entity.name, "target is not attackable");
            return Ok(false);
        }

        if !self
            .approach_position(entity.position, options.reach)
            .await?
        {
            return Ok(false);
        }

        // The cooldown belongs to the agent, not the weapon: the wait uses
        // the *previous* swing's weapon-specific cooldown even if we are
        // about to switch weapons.
        let (snapshot, previous_cooldown) = {
            let state = self.cooldown.lock().expect("cooldown state poisoned");
            let cooldown = self.weapon_cooldown(state.last_weapon());
            (state.clone(), cooldown)
        };
        cooldown::wait_for_cooldown(&snapshot, previous_cooldown).await;

        let weapon = if options.equip_best_weapon {
            self.equip_best_attack_item().await?
        } else {
            self.engine.held_item()
        };

        tracing::debug!(target = ?entity.name, weapon = ?weapon.as_ref().map(|w| &w.name), "attacking");
        match self.engine.attack_once(entity.id).await {
            Ok(()) => {
                let mut state = self.cooldown.lock().expect("cooldown state poisoned");
                state.record(weapon.as_ref(), Instant::now());
                Ok(true)
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(target = ?entity.name, error = %err, "attack rejected");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Equip the highest-damage weapon in the inventory. Returns the item
    /// now in hand; equip rejections leave the current hand unchanged.
    pub async fn equip_best_attack_item(&self) -> Result<Option<Item>> {
        let best = self
            .engine
            .inventory()
            .into_iter()
            .filter_map(|item| {
                let damage = self
                    .engine
                    .item_definition(&item.name)
                    .and_then(|def| def.attack_damage)?;
                Some((item, damage))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(item, _)| item);

        let Some(weapon) = best else {
            return Ok(self.engine.held_item());
        };
        match self.engine.equip(&weapon).await {
            Ok(()) => Ok(Some(weapon)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(weapon = %weapon.name, error = %err, "unable to equip weapon");
                Ok(self.engine.held_item())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Weapon-specific cooldown for the named weapon, falling back to the
    /// bare-handed default.
    fn weapon_cooldown(&self, weapon: Option<&str>) -> Duration {
        let ms = weapon
            .and_then(|name| self.engine.item_definition(name))
            .and_then(|def| def.attack_cooldown_ms)
            .unwrap_or(DEFAULT_ATTACK_COOLDOWN_MS);
        Duration::from_millis(ms)
    }
}
