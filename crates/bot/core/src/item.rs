//! Inventory stacks and static item definitions.

/// A stack of items held in the agent's inventory.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    pub display_name: Option<String>,
    pub count: u32,
    /// Inventory slot index the stack currently occupies.
    pub slot: u16,
}

impl Item {
    pub fn new(name: impl Into<String>, count: u32, slot: u16) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            count,
            slot,
        }
    }
}

/// Static definition of an item type, looked up from the engine's game-data
/// tables. This is the item's *definition*, not an inventory instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: Option<String>,
    pub stack_size: u32,
    /// Damage dealt per swing when used as a weapon.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_damage: Option<f64>,
    /// Weapon-specific attack cooldown. Absent for non-weapons.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_cooldown_ms: Option<u64>,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, stack_size: u32) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            stack_size,
            attack_damage: None,
            attack_cooldown_ms: None,
        }
    }
}
