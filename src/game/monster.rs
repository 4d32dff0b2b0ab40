//! # Monster
//!
//! Monster instances built from catalog archetypes. An elite monster deals
//! 1.5x its kind's base damage; the boss kind is placed only by the
//! pillar-completion trigger.

use crate::game::combat::{CombatStats, Combatant};
use crate::game::interact::Item;
use crate::{config, Catalog, MonsterKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a monster instance.
pub type MonsterId = Uuid;

/// A monster occupying a room.
///
/// # Examples
///
/// ```
/// use delve::{Catalog, Combatant, Monster, MonsterKind};
///
/// let catalog = Catalog::builtin();
/// let goblin = Monster::new(MonsterKind::Goblin, false, &catalog);
/// assert_eq!(goblin.stats().health, 40);
/// assert!(!goblin.is_boss());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    id: MonsterId,
    kind: MonsterKind,
    name: String,
    stats: CombatStats,
    elite: bool,
    boss: bool,
    gold_reward: u32,
    special_attack_name: String,
    loot: Vec<Item>,
}

impl Monster {
    /// Creates a monster instance from its catalog archetype.
    pub fn new(kind: MonsterKind, elite: bool, catalog: &Catalog) -> Self {
        let base = catalog.monster(kind);
        let name = if elite {
            format!("Elite {}", kind)
        } else {
            kind.to_string()
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            name,
            stats: CombatStats::new(
                base.max_health,
                base.base_attack,
                base.crit_chance,
                base.crit_multiplier,
            ),
            elite,
            boss: base.boss,
            gold_reward: base.gold_reward,
            special_attack_name: base.special_attack_name.clone(),
            loot: Vec::new(),
        }
    }

    pub fn id(&self) -> MonsterId {
        self.id
    }

    pub fn kind(&self) -> MonsterKind {
        self.kind
    }

    pub fn is_elite(&self) -> bool {
        self.elite
    }

    pub fn is_boss(&self) -> bool {
        self.boss
    }

    pub fn gold_reward(&self) -> u32 {
        self.gold_reward
    }

    pub fn special_attack_name(&self) -> &str {
        &self.special_attack_name
    }

    pub fn loot(&self) -> &[Item] {
        &self.loot
    }

    /// Adds an item to this monster's drop list.
    pub fn add_loot(&mut self, item: Item) {
        self.loot.push(item);
    }

    /// Drains the drop list, used when the monster is defeated.
    pub fn take_loot(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.loot)
    }
}

impl Combatant for Monster {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }

    fn attack_power(&self) -> u32 {
        if self.elite {
            (self.stats.base_attack as f64 * config::ELITE_DAMAGE_MULTIPLIER).round() as u32
        } else {
            self.stats.base_attack
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elite_damage_multiplier() {
        let catalog = Catalog::builtin();
        let goblin = Monster::new(MonsterKind::Goblin, false, &catalog);
        let elite = Monster::new(MonsterKind::Goblin, true, &catalog);

        let base = catalog.monster(MonsterKind::Goblin).base_attack;
        assert_eq!(goblin.attack_power(), base);
        assert_eq!(
            elite.attack_power(),
            (base as f64 * config::ELITE_DAMAGE_MULTIPLIER).round() as u32
        );
    }

    #[test]
    fn test_goblin_two_hits_clamp_to_zero() {
        let catalog = Catalog::builtin();
        let mut goblin = Monster::new(MonsterKind::Goblin, false, &catalog);
        assert_eq!(goblin.stats().health, 40);

        goblin.take_damage(25);
        assert_eq!(goblin.stats().health, 15);
        goblin.take_damage(25);
        assert_eq!(goblin.stats().health, 0);
        assert!(!goblin.is_alive());
    }

    #[test]
    fn test_boss_flag_comes_from_catalog() {
        let catalog = Catalog::builtin();
        let boss = Monster::new(catalog.boss_kind(), false, &catalog);
        assert!(boss.is_boss());
        assert!(boss.gold_reward() > 0);
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let catalog = Catalog::builtin();
        let a = Monster::new(MonsterKind::Skeleton, false, &catalog);
        let b = Monster::new(MonsterKind::Skeleton, false, &catalog);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_loot_drains_once() {
        let catalog = Catalog::builtin();
        let mut ogre = Monster::new(MonsterKind::Ogre, false, &catalog);
        ogre.add_loot(Item::HealthPotion { heal: 20 });

        let drops = ogre.take_loot();
        assert_eq!(drops.len(), 1);
        assert!(ogre.take_loot().is_empty());
    }
}
