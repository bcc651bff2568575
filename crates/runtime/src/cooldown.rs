//! Shared attack-cooldown gate.
//!
//! The game applies one attack timer to the agent, not one per weapon:
//! switching weapons neither resets nor bypasses a cooldown already in
//! progress. The gate tracks the previous swing's timestamp and weapon so
//! the next attack can suspend for exactly the remainder.

use std::time::Duration;

use tokio::time::Instant;

use bot_core::Item;

/// Cooldown applied when the previous weapon has no definition of its own
/// (bare hands, non-weapon items).
pub const DEFAULT_ATTACK_COOLDOWN_MS: u64 = 250;

/// Timestamp and weapon of the last swing. One per agent session, living for
/// the whole session; mutated only by the attack operation.
#[derive(Clone, Debug, Default)]
pub struct AttackCooldownState {
    last_attack_at: Option<Instant>,
    last_weapon: Option<String>,
}

impl AttackCooldownState {
    /// Record a successful swing with `weapon` (`None` = bare hands).
    pub fn record(&mut self, weapon: Option<&Item>, at: Instant) {
        self.last_attack_at = Some(at);
        self.last_weapon = weapon.map(|item| item.name.clone());
    }

    /// Name of the weapon used for the previous swing.
    pub fn last_weapon(&self) -> Option<&str> {
        self.last_weapon.as_deref()
    }

    /// Time still to wait before the next swing is allowed.
    pub fn remaining(&self, cooldown: Duration, now: Instant) -> Duration {
        match self.last_attack_at {
            None => Duration::ZERO,
            Some(last) => cooldown.saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// Suspend until the weapon-specific cooldown from the previous swing has
/// elapsed. Resolves immediately when no attack has been recorded or the
/// cooldown has already passed.
pub async fn wait_for_cooldown(state: &AttackCooldownState, cooldown: Duration) {
    let remaining = state.remaining(cooldown, Instant::now());
    if !remaining.is_zero() {
        tracing::debug!(?remaining, "waiting out attack cooldown");
        tokio::time::sleep(remaining).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_no_cooldown() {
        let state = AttackCooldownState::default();
        assert_eq!(
            state.remaining(Duration::from_millis(600), Instant::now()),
            Duration::ZERO
        );
    }

    #[test]
    fn remaining_shrinks_with_time() {
        let mut state = AttackCooldownState::default();
        let t0 = Instant::now();
        state.record(Some(&Item::new("iron_sword", 1, 0)), t0);

        let cooldown = Duration::from_millis(600);
        let halfway = state.remaining(cooldown, t0 + Duration::from_millis(300));
        assert_eq!(halfway, Duration::from_millis(300));

        let expired = state.remaining(cooldown, t0 + Duration::from_millis(900));
        assert_eq!(expired, Duration::ZERO);
    }

    #[test]
    fn switching_weapons_keeps_the_running_cooldown() {
        let mut state = AttackCooldownState::default();
        let t0 = Instant::now();
        state.record(Some(&Item::new("iron_axe", 1, 0)), t0);

        // A new weapon in hand does not touch the timer until it swings.
        assert_eq!(state.last_weapon(), Some("iron_axe"));
        let remaining = state.remaining(Duration::from_millis(1000), t0 + Duration::from_millis(400));
        assert_eq!(remaining, Duration::from_millis(600));
    }
}
