//! # Catalog Module
//!
//! Static archetype tables for heroes, monsters, pillars, and rooms.
//!
//! Every base stat in the engine resolves through the [`Catalog`]: an
//! immutable table built once at startup, either from the builtin defaults or
//! from JSON seed rows supplied by a persistence layer. Lookups are plain
//! enum-keyed table reads; nothing here is mutated at runtime.

use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Playable hero archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Warrior,
    Priestess,
    Thief,
}

impl HeroClass {
    /// Returns all hero classes.
    pub fn all() -> Vec<HeroClass> {
        vec![HeroClass::Warrior, HeroClass::Priestess, HeroClass::Thief]
    }
}

impl std::fmt::Display for HeroClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeroClass::Warrior => write!(f, "Warrior"),
            HeroClass::Priestess => write!(f, "Priestess"),
            HeroClass::Thief => write!(f, "Thief"),
        }
    }
}

impl FromStr for HeroClass {
    type Err = DelveError;

    fn from_str(s: &str) -> DelveResult<Self> {
        match s.to_lowercase().as_str() {
            "warrior" => Ok(HeroClass::Warrior),
            "priestess" => Ok(HeroClass::Priestess),
            "thief" => Ok(HeroClass::Thief),
            other => Err(DelveError::InvalidArgument(format!(
                "unknown hero class: {}",
                other
            ))),
        }
    }
}

/// Monster archetypes, including the single boss kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Skeleton,
    Ogre,
    DreadWarden,
}

impl MonsterKind {
    /// Returns the kinds eligible for random placement during generation.
    ///
    /// The boss kind is excluded; it only ever appears through the
    /// pillar-completion trigger.
    pub fn spawnable() -> Vec<MonsterKind> {
        vec![MonsterKind::Goblin, MonsterKind::Skeleton, MonsterKind::Ogre]
    }

    /// Returns all monster kinds.
    pub fn all() -> Vec<MonsterKind> {
        vec![
            MonsterKind::Goblin,
            MonsterKind::Skeleton,
            MonsterKind::Ogre,
            MonsterKind::DreadWarden,
        ]
    }
}

impl std::fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonsterKind::Goblin => write!(f, "Goblin"),
            MonsterKind::Skeleton => write!(f, "Skeleton"),
            MonsterKind::Ogre => write!(f, "Ogre"),
            MonsterKind::DreadWarden => write!(f, "Dread Warden"),
        }
    }
}

/// The four pillars, each granting a distinct permanent hero buff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PillarKind {
    Abstraction,
    Encapsulation,
    Inheritance,
    Polymorphism,
}

impl PillarKind {
    /// Returns all pillar kinds.
    pub fn all() -> Vec<PillarKind> {
        vec![
            PillarKind::Abstraction,
            PillarKind::Encapsulation,
            PillarKind::Inheritance,
            PillarKind::Polymorphism,
        ]
    }

    /// Describes the buff this pillar grants.
    pub fn buff_description(&self) -> &'static str {
        match self {
            PillarKind::Abstraction => "increases attack damage",
            PillarKind::Encapsulation => "increases maximum health",
            PillarKind::Inheritance => "increases critical hit chance",
            PillarKind::Polymorphism => "reduces special attack mana cost",
        }
    }
}

impl std::fmt::Display for PillarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PillarKind::Abstraction => write!(f, "Abstraction"),
            PillarKind::Encapsulation => write!(f, "Encapsulation"),
            PillarKind::Inheritance => write!(f, "Inheritance"),
            PillarKind::Polymorphism => write!(f, "Polymorphism"),
        }
    }
}

/// The role a room plays in the dungeon.
///
/// Attaching a pillar, trap, or chest to a room updates its kind
/// automatically; Entrance, Exit, and Boss are assigned by generation and the
/// boss-spawn trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Empty,
    Trap,
    Treasure,
    Monster,
    Pillar,
    Entrance,
    Exit,
    Boss,
}

/// Base stats for one hero class. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    pub max_health: u32,
    pub base_attack: u32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub special_attack_damage: u32,
    pub special_attack_name: String,
    pub starting_gold: u32,
}

/// Base stats for one monster kind. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub max_health: u32,
    pub base_attack: u32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub gold_reward: u32,
    pub special_attack_name: String,
    pub boss: bool,
}

/// Immutable archetype table resolved once at startup.
///
/// # Examples
///
/// ```
/// use delve::{Catalog, HeroClass, MonsterKind};
///
/// let catalog = Catalog::builtin();
/// assert_eq!(catalog.monster(MonsterKind::Goblin).max_health, 40);
/// assert!(catalog.hero(HeroClass::Warrior).base_attack > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    heroes: HashMap<HeroClass, HeroStats>,
    monsters: HashMap<MonsterKind, MonsterStats>,
}

impl Catalog {
    /// Builds the builtin archetype table.
    pub fn builtin() -> Self {
        let mut heroes = HashMap::new();
        heroes.insert(
            HeroClass::Warrior,
            HeroStats {
                max_health: 125,
                base_attack: 15,
                crit_chance: 0.10,
                crit_multiplier: 2.0,
                special_attack_damage: 30,
                special_attack_name: "Crushing Blow".to_string(),
                starting_gold: 15,
            },
        );
        heroes.insert(
            HeroClass::Priestess,
            HeroStats {
                max_health: 100,
                base_attack: 10,
                crit_chance: 0.15,
                crit_multiplier: 2.0,
                special_attack_damage: 22,
                special_attack_name: "Radiant Smite".to_string(),
                starting_gold: 20,
            },
        );
        heroes.insert(
            HeroClass::Thief,
            HeroStats {
                max_health: 90,
                base_attack: 12,
                crit_chance: 0.25,
                crit_multiplier: 2.5,
                special_attack_damage: 25,
                special_attack_name: "Shadow Strike".to_string(),
                starting_gold: 25,
            },
        );

        let mut monsters = HashMap::new();
        monsters.insert(
            MonsterKind::Goblin,
            MonsterStats {
                max_health: 40,
                base_attack: 7,
                crit_chance: 0.05,
                crit_multiplier: 1.5,
                gold_reward: 8,
                special_attack_name: "Shiv".to_string(),
                boss: false,
            },
        );
        monsters.insert(
            MonsterKind::Skeleton,
            MonsterStats {
                max_health: 50,
                base_attack: 10,
                crit_chance: 0.10,
                crit_multiplier: 1.5,
                gold_reward: 12,
                special_attack_name: "Bone Rattle".to_string(),
                boss: false,
            },
        );
        monsters.insert(
            MonsterKind::Ogre,
            MonsterStats {
                max_health: 75,
                base_attack: 14,
                crit_chance: 0.05,
                crit_multiplier: 2.0,
                gold_reward: 20,
                special_attack_name: "Crush".to_string(),
                boss: false,
            },
        );
        monsters.insert(
            MonsterKind::DreadWarden,
            MonsterStats {
                max_health: 200,
                base_attack: 20,
                crit_chance: 0.20,
                crit_multiplier: 2.0,
                gold_reward: 100,
                special_attack_name: "Soulfire".to_string(),
                boss: true,
            },
        );

        Self { heroes, monsters }
    }

    /// Builds a catalog from JSON seed rows.
    ///
    /// The document must carry an entry for every hero class and monster
    /// kind; a partial table fails fast rather than falling back silently.
    pub fn from_json(json: &str) -> DelveResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serializes the table to JSON seed rows.
    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> DelveResult<()> {
        for class in HeroClass::all() {
            if !self.heroes.contains_key(&class) {
                return Err(DelveError::InvalidArgument(format!(
                    "catalog is missing hero class {}",
                    class
                )));
            }
        }
        for kind in MonsterKind::all() {
            if !self.monsters.contains_key(&kind) {
                return Err(DelveError::InvalidArgument(format!(
                    "catalog is missing monster kind {}",
                    kind
                )));
            }
        }
        if !self.monsters.values().any(|stats| stats.boss) {
            return Err(DelveError::InvalidArgument(
                "catalog has no boss monster".to_string(),
            ));
        }
        Ok(())
    }

    /// Looks up base stats for a hero class.
    ///
    /// Completeness is checked at construction, so every class resolves.
    pub fn hero(&self, class: HeroClass) -> &HeroStats {
        &self.heroes[&class]
    }

    /// Looks up base stats for a monster kind.
    pub fn monster(&self, kind: MonsterKind) -> &MonsterStats {
        &self.monsters[&kind]
    }

    /// Returns the kind tagged as the boss.
    pub fn boss_kind(&self) -> MonsterKind {
        MonsterKind::all()
            .into_iter()
            .find(|kind| self.monsters[kind].boss)
            .unwrap_or(MonsterKind::DreadWarden)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_complete() {
        let catalog = Catalog::builtin();
        for class in HeroClass::all() {
            assert!(catalog.hero(class).max_health > 0);
        }
        for kind in MonsterKind::all() {
            assert!(catalog.monster(kind).max_health > 0);
        }
    }

    #[test]
    fn test_builtin_boss_kind() {
        let catalog = Catalog::builtin();
        let boss = catalog.boss_kind();
        assert!(catalog.monster(boss).boss);
        assert!(!MonsterKind::spawnable().contains(&boss));
    }

    #[test]
    fn test_goblin_base_stats() {
        let catalog = Catalog::builtin();
        let goblin = catalog.monster(MonsterKind::Goblin);
        assert_eq!(goblin.max_health, 40);
        assert!(!goblin.boss);
    }

    #[test]
    fn test_json_seed_round_trip() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json().unwrap();
        let reloaded = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_partial_seed_rows_rejected() {
        let json = r#"{"heroes": {}, "monsters": {}}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_class_parsing() {
        assert_eq!("warrior".parse::<HeroClass>().unwrap(), HeroClass::Warrior);
        assert_eq!("THIEF".parse::<HeroClass>().unwrap(), HeroClass::Thief);
        assert!("wizard".parse::<HeroClass>().is_err());
    }

    #[test]
    fn test_pillar_kinds_are_distinct_buffs() {
        let descriptions: std::collections::HashSet<_> = PillarKind::all()
            .into_iter()
            .map(|kind| kind.buff_description())
            .collect();
        assert_eq!(descriptions.len(), 4);
    }
}
