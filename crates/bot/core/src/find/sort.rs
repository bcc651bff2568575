//! Default sort-value functions for the three world-object variants.
//!
//! Each returns a blended cost in milliseconds-of-effort; the best candidate
//! has the lowest value. Character running speed is about 5 blocks per
//! second, and distance to travel rarely means flat ground, but the estimate
//! balances well against dig times and point values in practice. Callers can
//! substitute any monotonic combination of "closer is better, more valuable
//! is better, more costly to acquire is worse".

use crate::world::{Block, Entity};

/// Nominal running speed used to convert distance into travel time.
pub const RUN_SPEED_BLOCKS_PER_SEC: f64 = 5.0;

/// Milliseconds of effort one point of intrinsic value offsets.
pub const VALUE_WEIGHT_MS: f64 = 1000.0;

/// Damage per swing assumed when estimating how long a fight will take.
const NOMINAL_HIT_DAMAGE: f64 = 7.0;

/// Swing-to-swing delay assumed for the fight-time estimate.
const NOMINAL_SWING_MS: f64 = 625.0;

/// Estimated time to run `distance` blocks.
pub fn travel_time_ms(distance: f64) -> f64 {
    distance / RUN_SPEED_BLOCKS_PER_SEC * 1000.0
}

/// Default block ranking: travel time plus dig time, offset by point value.
///
/// A block nobody's tool can harvest has infinite dig time and therefore
/// sorts behind every harvestable candidate.
pub fn block_sort_value(distance: f64, point_value: f64, dig_time_ms: f64) -> f64 {
    travel_time_ms(distance) + dig_time_ms - point_value * VALUE_WEIGHT_MS
}

/// Default entity ranking: travel time plus an estimate of how long the
/// fight will take, offset by point value.
pub fn entity_sort_value(
    distance: f64,
    point_value: f64,
    health: f64,
    defense: f64,
    toughness: f64,
) -> f64 {
    travel_time_ms(distance) + estimated_fight_time_ms(health, defense, toughness)
        - point_value * VALUE_WEIGHT_MS
}

/// Default ground-item ranking: the simplest blend, travel time offset by
/// point value.
pub fn ground_item_sort_value(distance: f64, point_value: f64) -> f64 {
    travel_time_ms(distance) - point_value * VALUE_WEIGHT_MS
}

/// Convenience wrapper applying [`block_sort_value`] to a queried block.
pub fn default_block_sort(distance: f64, value: f64, block: &Block) -> f64 {
    block_sort_value(distance, value, block.estimated_dig_time_ms)
}

/// Convenience wrapper applying [`entity_sort_value`] to a queried entity.
pub fn default_entity_sort(distance: f64, value: f64, entity: &Entity) -> f64 {
    entity_sort_value(
        distance,
        value,
        entity.health,
        entity.defense,
        entity.toughness,
    )
}

/// Proxy for fight duration from the target's survivability stats.
///
/// Damage reduction follows the game's armor formula:
/// `damageTaken = damage * (1 - min(20, max(def/5, def - dmg/(tough/4 + 2))) / 25)`
fn estimated_fight_time_ms(health: f64, defense: f64, toughness: f64) -> f64 {
    let reduction = (defense / 5.0)
        .max(defense - NOMINAL_HIT_DAMAGE / (toughness / 4.0 + 2.0))
        .clamp(0.0, 20.0);
    let damage_per_hit = NOMINAL_HIT_DAMAGE * (1.0 - reduction / 25.0);
    (health / damage_per_hit).ceil() * NOMINAL_SWING_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closer_blocks_rank_better() {
        assert!(block_sort_value(2.0, 0.0, 0.0) < block_sort_value(5.0, 0.0, 0.0));
    }

    #[test]
    fn cheaper_digs_rank_better() {
        assert!(block_sort_value(5.0, 0.0, 500.0) < block_sort_value(5.0, 0.0, 2000.0));
    }

    #[test]
    fn unharvestable_blocks_sort_last() {
        let harvestable = block_sort_value(40.0, 0.0, 10_000.0);
        let unharvestable = block_sort_value(1.0, 100.0, f64::INFINITY);
        assert!(harvestable < unharvestable);
    }

    #[test]
    fn tougher_targets_rank_worse() {
        let squishy = entity_sort_value(5.0, 1.0, 10.0, 0.0, 0.0);
        let armored = entity_sort_value(5.0, 1.0, 20.0, 15.0, 8.0);
        assert!(squishy < armored);
    }

    #[test]
    fn value_offsets_distance_for_ground_items() {
        // Ten points buys ten seconds of running (50 blocks at 5 blocks/s).
        let near_cheap = ground_item_sort_value(2.0, 0.0);
        let far_precious = ground_item_sort_value(20.0, 10.0);
        assert!(far_precious < near_cheap);
    }
}
