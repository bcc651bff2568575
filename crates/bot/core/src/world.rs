//! Discoverable world objects: entities, blocks, and items on the ground.
//!
//! The three variants share the [`Candidate`] capability set consumed by the
//! ranking routine in [`crate::find`]. A snapshot of any of these is only
//! valid for the world state it was queried from: distances and the
//! block-above flag are derived at query time and must be re-queried after
//! any state-changing action (a dig, a pickup, movement).

use crate::position::Vec3;

/// Classification of a live entity reported by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Hostile or passive NPC.
    Mob,
    /// Another player-controlled character.
    Player,
    /// Inert world object (minecart, armor stand, ...).
    Object,
    /// Experience orb or similar non-interactive spawn.
    Orb,
}

/// A dynamically spawned entity in the world.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: u32,
    /// Stable identifier; absent for unnamed entities.
    pub name: Option<String>,
    /// Human-readable name, used interchangeably with `name` when matching.
    pub display_name: Option<String>,
    /// Present only for player-controlled entities; takes priority over
    /// `name` for matching and value lookups.
    pub username: Option<String>,
    pub position: Vec3,
    pub health: f64,
    pub defense: f64,
    pub toughness: f64,
    pub kind: EntityKind,
    /// False once the entity has despawned or died.
    pub is_valid: bool,
}

impl Entity {
    /// A mob or player that is currently alive and valid.
    pub fn is_attackable(&self) -> bool {
        self.is_valid && matches!(self.kind, EntityKind::Mob | EntityKind::Player)
    }
}

/// A block placed in the world.
#[derive(Clone, Debug)]
pub struct Block {
    pub name: String,
    pub display_name: Option<String>,
    pub position: Vec3,
    /// True when another non-air block sits directly above this one.
    /// Derived at query time relative to the current world state.
    pub has_block_above: bool,
    /// Predicted dig time with the best tool currently in the inventory.
    /// `f64::INFINITY` when no held tool (including bare hands) can ever
    /// harvest this block.
    pub estimated_dig_time_ms: f64,
}

impl Block {
    pub fn is_air(&self) -> bool {
        self.name == "air"
    }
}

/// An item stack lying on the ground, waiting to be picked up.
#[derive(Clone, Debug)]
pub struct GroundItem {
    /// Lookup key into the static item-definition table.
    pub item_name: String,
    pub display_name: Option<String>,
    pub position: Vec3,
    pub count: u32,
}

/// Capability set shared by everything discoverable in the world.
///
/// Implemented by [`Entity`], [`Block`], and [`GroundItem`] so the ranking
/// routine in [`crate::find`] works identically across all three variants.
pub trait Candidate {
    fn position(&self) -> Vec3;

    fn name(&self) -> Option<&str>;

    fn display_name(&self) -> Option<&str>;

    fn username(&self) -> Option<&str> {
        None
    }

    /// Key used for value-function lookups: username, then name, then
    /// display name.
    fn value_key(&self) -> Option<&str> {
        self.username().or_else(|| self.name()).or_else(|| self.display_name())
    }
}

impl Candidate for Entity {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl Candidate for Block {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

impl Candidate for GroundItem {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn name(&self) -> Option<&str> {
        Some(&self.item_name)
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
