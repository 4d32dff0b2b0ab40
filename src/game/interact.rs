//! # Interactables
//!
//! Room features the hero interacts with: items, traps, pillars, and chests.
//!
//! Each interactable is owned by exactly one room; picked-up items transfer
//! into the hero's inventory. Repeat interactions are soft failures — an
//! already-sprung trap or an already-activated pillar reports the fact and
//! changes nothing.

use crate::game::hero::Hero;
use crate::PillarKind;
use serde::{Deserialize, Serialize};

/// A carryable, consumed-on-use item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// Restores health, clamped at the hero's maximum
    HealthPotion { heal: u32 },
    /// Reveals the 8 rooms surrounding the hero on the minimap
    VisionPotion,
    /// Thrown at the nearest monster in the room for fixed damage
    ThrowingKnife { damage: u32 },
}

impl Item {
    /// Display name for inventories and event reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Item::HealthPotion { .. } => "Health Potion",
            Item::VisionPotion => "Vision Potion",
            Item::ThrowingKnife { .. } => "Throwing Knife",
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A floor trap that fires once when its room is entered.
///
/// # Examples
///
/// ```
/// use delve::{Catalog, Hero, HeroClass, Position, Trap};
///
/// let catalog = Catalog::builtin();
/// let mut hero = Hero::new("Ada", HeroClass::Warrior, &catalog, Position::origin()).unwrap();
/// let mut trap = Trap::new(12);
///
/// assert_eq!(trap.trigger(&mut hero), Some(12));
/// assert_eq!(trap.trigger(&mut hero), None); // sprung traps are inert
/// trap.reset();
/// assert_eq!(trap.trigger(&mut hero), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    damage: u32,
    sprung: bool,
}

impl Trap {
    /// Creates an armed trap. Negative damage is clamped to zero.
    pub fn new(damage: i32) -> Self {
        Self {
            damage: damage.max(0) as u32,
            sprung: false,
        }
    }

    /// Damage dealt when the trap fires.
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Whether the trap has already fired.
    pub fn is_sprung(&self) -> bool {
        self.sprung
    }

    /// Fires the trap against the hero.
    ///
    /// Returns the damage dealt, or None when the trap has already fired or
    /// the hero is dead — both harmless no-ops.
    pub fn trigger(&mut self, hero: &mut Hero) -> Option<u32> {
        use crate::Combatant;

        if self.sprung || !hero.is_alive() {
            return None;
        }
        self.sprung = true;
        hero.take_damage(self.damage);
        Some(self.damage)
    }

    /// Re-arms the trap so it can fire again.
    pub fn reset(&mut self) {
        self.sprung = false;
    }
}

/// Result of a pillar activation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PillarActivation {
    /// The buff was applied and the pillar is now spent
    Activated,
    /// The pillar had already been activated; nothing changed
    AlreadyActivated,
}

/// A one-time activatable pillar granting a permanent hero buff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    kind: PillarKind,
    activated: bool,
}

impl Pillar {
    pub fn new(kind: PillarKind) -> Self {
        Self {
            kind,
            activated: false,
        }
    }

    pub fn kind(&self) -> PillarKind {
        self.kind
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Activates the pillar, applying its buff to the hero exactly once.
    pub fn activate(&mut self, hero: &mut Hero) -> PillarActivation {
        if self.activated {
            return PillarActivation::AlreadyActivated;
        }
        self.activated = true;
        hero.apply_pillar_buff(self.kind);
        PillarActivation::Activated
    }
}

/// Outcome of a chest-opening attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestOutcome {
    /// Items transferred into the hero's inventory
    Opened { items_taken: usize },
    /// First open requires the entry fee; the chest stays shut
    InsufficientGold,
    /// The room has no openable chest
    NoChest,
}

/// A gold-gated container of items found in treasure rooms.
///
/// The first open charges a flat fee and marks the chest opened; items that
/// do not fit the hero's inventory stay inside and can be collected later
/// free of charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    items: Vec<Item>,
    opened: bool,
    looted: bool,
}

impl Chest {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            opened: false,
            looted: false,
        }
    }

    /// Items still inside the chest.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether the entry fee has been paid.
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Whether every item has been collected.
    pub fn is_looted(&self) -> bool {
        self.looted
    }

    pub(crate) fn mark_opened(&mut self) {
        self.opened = true;
    }

    /// Moves items into the hero's inventory until it fills up.
    ///
    /// Returns the number of items transferred; the remainder stays inside.
    pub(crate) fn transfer_items(&mut self, hero: &mut Hero) -> usize {
        let mut taken = 0;
        while let Some(item) = self.items.first().cloned() {
            if !hero.add_item(item) {
                break;
            }
            self.items.remove(0);
            taken += 1;
        }
        if self.items.is_empty() {
            self.looted = true;
        }
        taken
    }
}
