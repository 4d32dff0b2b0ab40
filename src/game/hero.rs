//! # Hero
//!
//! The player-controlled character: stats, position, gold, a bounded
//! inventory, a mana pool for special attacks, and the permanent buffs
//! granted by pillar activation.

use crate::game::combat::{CombatStats, Combatant};
use crate::game::interact::Item;
use crate::game::Position;
use crate::{config, Catalog, DelveError, DelveResult, Direction, HeroClass, PillarKind};
use serde::{Deserialize, Serialize};

/// Permanent stat bonuses accumulated from pillar buffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroBuffs {
    pub bonus_attack: u32,
    pub bonus_crit_chance: f64,
    pub bonus_max_health: u32,
    pub reduced_mana_cost: bool,
}

/// The player-controlled hero.
///
/// # Examples
///
/// ```
/// use delve::{Catalog, Combatant, Hero, HeroClass, Position};
///
/// let catalog = Catalog::builtin();
/// let hero = Hero::new("Ada", HeroClass::Thief, &catalog, Position::origin()).unwrap();
/// assert!(hero.is_alive());
/// assert_eq!(hero.position(), Position::origin());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    name: String,
    class: HeroClass,
    stats: CombatStats,
    position: Position,
    gold: u32,
    mana: u8,
    inventory: Vec<Item>,
    pillars_activated: u32,
    special_attack_damage: u32,
    special_attack_name: String,
    buffs: HeroBuffs,
}

impl Hero {
    /// Creates a hero of the given class at the given position.
    ///
    /// The name must contain at least one non-whitespace character; base
    /// stats come from the catalog.
    pub fn new(
        name: &str,
        class: HeroClass,
        catalog: &Catalog,
        position: Position,
    ) -> DelveResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DelveError::InvalidArgument(
                "hero name must not be blank".to_string(),
            ));
        }
        let base = catalog.hero(class);
        Ok(Self {
            name: name.to_string(),
            class,
            stats: CombatStats::new(
                base.max_health,
                base.base_attack,
                base.crit_chance,
                base.crit_multiplier,
            ),
            position,
            gold: base.starting_gold,
            mana: config::MAX_MANA,
            inventory: Vec::new(),
            pillars_activated: 0,
            special_attack_damage: base.special_attack_damage,
            special_attack_name: base.special_attack_name.clone(),
            buffs: HeroBuffs::default(),
        })
    }

    pub fn class(&self) -> HeroClass {
        self.class
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Translates the hero one cell in the given direction.
    ///
    /// No bounds or door checks happen here; the session enforces those
    /// before calling.
    pub fn move_by(&mut self, direction: Direction) {
        self.position = self.position + direction.to_delta();
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spends gold if the hero can afford it.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn mana(&self) -> u8 {
        self.mana
    }

    /// Current mana cost of the special attack.
    pub fn special_attack_cost(&self) -> u8 {
        if self.buffs.reduced_mana_cost {
            config::REDUCED_SPECIAL_ATTACK_MANA_COST
        } else {
            config::SPECIAL_ATTACK_MANA_COST
        }
    }

    /// Base damage of the special attack, including accumulated buff bonuses.
    pub fn special_attack_power(&self) -> u32 {
        self.special_attack_damage + self.buffs.bonus_attack
    }

    pub fn special_attack_name(&self) -> &str {
        &self.special_attack_name
    }

    /// Pays for a special attack. Returns false when mana is short.
    pub fn spend_special_mana(&mut self) -> bool {
        let cost = self.special_attack_cost();
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Restores mana from a monster kill, capped at the pool size.
    pub fn regen_mana(&mut self) {
        self.mana = (self.mana + config::MANA_REGEN_ON_KILL).min(config::MAX_MANA);
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.inventory.get(index)
    }

    /// Adds an item to the inventory.
    ///
    /// Returns false (and drops nothing into the bag) when the inventory is
    /// already at capacity — a soft failure, not an error.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.inventory.len() >= config::INVENTORY_CAPACITY {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Removes and returns the item at `index`, if any.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index < self.inventory.len() {
            Some(self.inventory.remove(index))
        } else {
            None
        }
    }

    /// Restores health, clamped at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.stats.heal(amount);
    }

    pub fn pillars_activated(&self) -> u32 {
        self.pillars_activated
    }

    pub fn buffs(&self) -> &HeroBuffs {
        &self.buffs
    }

    /// Applies the permanent buff for an activated pillar.
    ///
    /// Called exactly once per pillar by [`crate::Pillar::activate`].
    pub fn apply_pillar_buff(&mut self, kind: PillarKind) {
        match kind {
            PillarKind::Abstraction => {
                self.buffs.bonus_attack += config::PILLAR_ATTACK_BONUS;
            }
            PillarKind::Encapsulation => {
                self.buffs.bonus_max_health += config::PILLAR_MAX_HEALTH_BONUS;
                self.stats.raise_max_health(config::PILLAR_MAX_HEALTH_BONUS);
            }
            PillarKind::Inheritance => {
                self.buffs.bonus_crit_chance += config::PILLAR_CRIT_CHANCE_BONUS;
                self.stats.crit_chance += config::PILLAR_CRIT_CHANCE_BONUS;
            }
            PillarKind::Polymorphism => {
                self.buffs.reduced_mana_cost = true;
            }
        }
        self.pillars_activated += 1;
    }

    /// Bookkeeping for a defeated monster: gold reward and mana regen.
    pub fn record_kill(&mut self, gold_reward: u32) {
        self.add_gold(gold_reward);
        self.regen_mana();
    }
}

impl Combatant for Hero {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }

    fn attack_power(&self) -> u32 {
        self.stats.base_attack + self.buffs.bonus_attack
    }

    fn name(&self) -> &str {
        &self.name
    }
}
