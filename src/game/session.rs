//! # Session Module
//!
//! The controller that drives a single game: it owns the dungeon, the hero,
//! the catalog, and the session RNG, and applies each player action as one
//! discrete state transition.
//!
//! Every action returns the [`GameEvent`]s it produced so a host UI can
//! report them; hero defeat is an event, not an error. Read accessors are
//! cheap and side-effect-free, safe to poll from a render loop.

use crate::game::combat::{self, Combatant};
use crate::game::hero::Hero;
use crate::game::interact::{ChestOutcome, Item, PillarActivation};
use crate::game::room::Room;
use crate::game::world::Dungeon;
use crate::game::{Direction, Position};
use crate::generation::{utils, DungeonGenerator, GenerationConfig, Generator};
use crate::{Catalog, DelveError, DelveResult, HeroClass, PillarKind};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Something observable that happened during a player action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HeroMoved { from: Position, to: Position },
    MoveBlocked { direction: Direction },
    TrapTriggered { damage: u32 },
    HeroStruck { target: String, damage: u32, crit: bool },
    MonsterStruck { attacker: String, damage: u32, crit: bool },
    MonsterDefeated { name: String, gold: u32 },
    LootDropped { count: usize },
    HeroDefeated,
    NoTarget,
    NotEnoughMana { cost: u8 },
    ItemPickedUp { name: String },
    InventoryFull,
    ItemUsed { name: String },
    ChestOpened { items_taken: usize },
    ChestLocked { fee: u32 },
    PillarActivated { kind: PillarKind },
    PillarAlreadyActive,
    BossSpawned { at: Position },
}

/// One running game: dungeon, hero, catalog, and the session RNG.
///
/// # Examples
///
/// ```
/// use delve::{Difficulty, GameSession, GenerationConfig, HeroClass};
///
/// let config = GenerationConfig::new(10, 10, Difficulty::Normal, 42);
/// let session = GameSession::new("Ada", HeroClass::Warrior, &config).unwrap();
/// assert_eq!(session.hero().position(), session.dungeon().spawn_point());
/// ```
#[derive(Debug)]
pub struct GameSession {
    dungeon: Dungeon,
    hero: Hero,
    catalog: Catalog,
    rng: StdRng,
    seed: u64,
}

impl GameSession {
    /// Initializes a new game with the builtin catalog.
    pub fn new(name: &str, class: HeroClass, config: &GenerationConfig) -> DelveResult<Self> {
        Self::with_catalog(name, class, config, Catalog::builtin())
    }

    /// Initializes a new game with an externally seeded catalog.
    pub fn with_catalog(
        name: &str,
        class: HeroClass,
        config: &GenerationConfig,
        catalog: Catalog,
    ) -> DelveResult<Self> {
        let generator = DungeonGenerator::new();
        let mut rng = utils::create_rng(config);
        let dungeon = generator.generate(config, &catalog, &mut rng)?;
        let hero = Hero::new(name, class, &catalog, dungeon.spawn_point())?;

        let mut session = Self {
            dungeon,
            hero,
            catalog,
            rng,
            seed: config.seed,
        };
        let spawn = session.dungeon.spawn_point();
        if let Some(room) = session.dungeon.room_mut(spawn) {
            room.enter(&mut session.hero);
        }
        info!(
            "new game: {} the {} enters a {} dungeon",
            session.hero.name(),
            class,
            session.dungeon.difficulty()
        );
        Ok(session)
    }

    /// Rebuilds a session from saved state.
    ///
    /// The RNG restarts from the stored seed; the catalog travels with the
    /// save so seeded archetype tables survive a reload.
    pub fn resume(dungeon: Dungeon, hero: Hero, catalog: Catalog, seed: u64) -> DelveResult<Self> {
        if !dungeon.in_bounds(hero.position()) {
            return Err(DelveError::InvalidState(format!(
                "hero position {} is outside the {}x{} dungeon",
                hero.position(),
                dungeon.width(),
                dungeon.height()
            )));
        }
        Ok(Self {
            dungeon,
            hero,
            catalog,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The room the hero currently occupies.
    pub fn current_room(&self) -> Option<&Room> {
        self.dungeon.room(self.hero.position())
    }

    /// Whether the hero has fallen.
    pub fn is_defeat(&self) -> bool {
        !self.hero.is_alive()
    }

    /// Whether the boss spawned and has since been cleared from the exit.
    pub fn is_victory(&self) -> bool {
        self.dungeon.is_boss_spawned()
            && self
                .dungeon
                .room(self.dungeon.exit_point())
                .map(|room| room.monsters().is_empty())
                .unwrap_or(false)
    }

    /// Moves the hero one room in the given direction.
    ///
    /// Blocked when the current room's door on that side is closed or the
    /// destination is out of bounds. Entering a room fires its trap.
    pub fn move_hero(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let from = self.hero.position();
        let door_open = self
            .dungeon
            .room(from)
            .map(|room| room.is_door_open(direction))
            .unwrap_or(false);
        let dest = from + direction.to_delta();

        if !door_open || !self.dungeon.in_bounds(dest) {
            events.push(GameEvent::MoveBlocked { direction });
            return events;
        }

        self.hero.move_by(direction);
        events.push(GameEvent::HeroMoved { from, to: dest });
        if let Some(room) = self.dungeon.room_mut(dest) {
            if let Some(damage) = room.enter(&mut self.hero) {
                debug!("trap at {} hits for {}", dest, damage);
                events.push(GameEvent::TrapTriggered { damage });
            }
        }
        if !self.hero.is_alive() {
            events.push(GameEvent::HeroDefeated);
        }
        events
    }

    /// Hero basic attack against the room's first monster.
    pub fn attack(&mut self) -> Vec<GameEvent> {
        let base_damage = self.hero.attack_power();
        self.strike_monster(base_damage)
    }

    /// Hero special attack: buffed damage, paid for from the mana pool.
    ///
    /// Mana is only spent when there is a target; swinging at an empty room
    /// costs nothing.
    pub fn special_attack(&mut self) -> Vec<GameEvent> {
        let has_target = self
            .current_room()
            .and_then(|room| room.first_monster())
            .is_some();
        if !has_target {
            return vec![GameEvent::NoTarget];
        }
        if !self.hero.spend_special_mana() {
            return vec![GameEvent::NotEnoughMana {
                cost: self.hero.special_attack_cost(),
            }];
        }
        let base_damage = self.hero.special_attack_power();
        self.strike_monster(base_damage)
    }

    /// Resolves one hero strike and, if the target survives, its
    /// counterattack.
    fn strike_monster(&mut self, base_damage: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let pos = self.hero.position();
        let room = match self.dungeon.room_mut(pos) {
            Some(room) => room,
            None => return events,
        };
        let target_id = match room.first_monster() {
            Some(monster) => monster.id(),
            None => {
                events.push(GameEvent::NoTarget);
                return events;
            }
        };

        let outcome = match room.monster_mut(target_id) {
            Some(monster) => {
                let outcome =
                    combat::strike_with(base_damage, self.hero.stats(), monster, &mut self.rng);
                events.push(GameEvent::HeroStruck {
                    target: monster.name().to_string(),
                    damage: outcome.damage,
                    crit: outcome.crit,
                });
                outcome
            }
            None => return events,
        };

        if outcome.target_defeated {
            if let Some(mut defeated) = room.remove_monster(target_id) {
                let gold = defeated.gold_reward();
                let drops = defeated.take_loot();
                if !drops.is_empty() {
                    events.push(GameEvent::LootDropped { count: drops.len() });
                    for item in drops {
                        room.add_item(item);
                    }
                }
                self.hero.record_kill(gold);
                debug!("{} defeated, {} gold awarded", defeated.name(), gold);
                events.push(GameEvent::MonsterDefeated {
                    name: defeated.name().to_string(),
                    gold,
                });
            }
        } else if let Some(monster) = room.monster_mut(target_id) {
            let counter = combat::strike(&*monster, &mut self.hero, &mut self.rng);
            events.push(GameEvent::MonsterStruck {
                attacker: monster.name().to_string(),
                damage: counter.damage,
                crit: counter.crit,
            });
            if counter.target_defeated {
                events.push(GameEvent::HeroDefeated);
            }
        }
        events
    }

    /// Picks up the ground item at `index` in the current room.
    ///
    /// A full inventory leaves the item on the ground.
    pub fn pick_up_item(&mut self, index: usize) -> Vec<GameEvent> {
        let pos = self.hero.position();
        let room = match self.dungeon.room_mut(pos) {
            Some(room) => room,
            None => return Vec::new(),
        };
        match room.take_item(index) {
            Some(item) => {
                let name = item.name();
                if self.hero.add_item(item.clone()) {
                    vec![GameEvent::ItemPickedUp {
                        name: name.to_string(),
                    }]
                } else {
                    room.add_item(item);
                    vec![GameEvent::InventoryFull]
                }
            }
            None => Vec::new(),
        }
    }

    /// Uses the inventory item at `index`, consuming it.
    ///
    /// Most items soft-fail when they have nothing to act on; the vision
    /// potion is deliberately strict and errors on a dead hero.
    pub fn use_item(&mut self, index: usize) -> DelveResult<Vec<GameEvent>> {
        let item = match self.hero.item(index) {
            Some(item) => item.clone(),
            None => return Ok(Vec::new()),
        };
        let mut events = Vec::new();

        match item {
            Item::HealthPotion { heal } => {
                // Defeat is terminal; the potion stays in the bag
                if !self.hero.is_alive() {
                    return Ok(events);
                }
                self.hero.remove_item(index);
                self.hero.heal(heal);
                events.push(GameEvent::ItemUsed {
                    name: item.name().to_string(),
                });
            }
            Item::VisionPotion => {
                if !self.hero.is_alive() {
                    return Err(DelveError::InvalidState(
                        "a dead hero cannot drink a vision potion".to_string(),
                    ));
                }
                self.hero.remove_item(index);
                self.dungeon.reveal_around(self.hero.position());
                events.push(GameEvent::ItemUsed {
                    name: item.name().to_string(),
                });
            }
            Item::ThrowingKnife { damage } => {
                self.hero.remove_item(index);
                events.push(GameEvent::ItemUsed {
                    name: item.name().to_string(),
                });
                events.extend(self.throw_at_monster(damage));
            }
        }
        Ok(events)
    }

    /// Applies thrown-item damage to the room's first monster, if any.
    fn throw_at_monster(&mut self, damage: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let pos = self.hero.position();
        let room = match self.dungeon.room_mut(pos) {
            Some(room) => room,
            None => return events,
        };
        let target_id = match room.first_monster() {
            Some(monster) => monster.id(),
            None => {
                events.push(GameEvent::NoTarget);
                return events;
            }
        };
        if let Some(monster) = room.monster_mut(target_id) {
            monster.take_damage(damage);
            events.push(GameEvent::HeroStruck {
                target: monster.name().to_string(),
                damage,
                crit: false,
            });
            if !monster.is_alive() {
                if let Some(mut defeated) = room.remove_monster(target_id) {
                    let gold = defeated.gold_reward();
                    for item in defeated.take_loot() {
                        room.add_item(item);
                    }
                    self.hero.record_kill(gold);
                    events.push(GameEvent::MonsterDefeated {
                        name: defeated.name().to_string(),
                        gold,
                    });
                }
            }
        }
        events
    }

    /// Opens the chest in the current room, if any.
    pub fn open_chest(&mut self) -> Vec<GameEvent> {
        let pos = self.hero.position();
        let room = match self.dungeon.room_mut(pos) {
            Some(room) => room,
            None => return Vec::new(),
        };
        match room.open_chest(&mut self.hero) {
            ChestOutcome::Opened { items_taken } => {
                vec![GameEvent::ChestOpened { items_taken }]
            }
            ChestOutcome::InsufficientGold => vec![GameEvent::ChestLocked {
                fee: crate::config::CHEST_GOLD_FEE,
            }],
            ChestOutcome::NoChest => Vec::new(),
        }
    }

    /// Activates the pillar in the current room, if any.
    ///
    /// A fresh activation buffs the hero and advances the dungeon's pillar
    /// counter; completing the set spawns the boss.
    pub fn activate_pillar(&mut self) -> Vec<GameEvent> {
        let pos = self.hero.position();
        let activation = {
            let room = match self.dungeon.room_mut(pos) {
                Some(room) => room,
                None => return Vec::new(),
            };
            match room.pillar_mut() {
                Some(pillar) => {
                    let kind = pillar.kind();
                    (pillar.activate(&mut self.hero), kind)
                }
                None => return Vec::new(),
            }
        };

        match activation {
            (PillarActivation::Activated, kind) => {
                let mut events = vec![GameEvent::PillarActivated { kind }];
                if self.dungeon.record_pillar_activation(&self.catalog) {
                    events.push(GameEvent::BossSpawned {
                        at: self.dungeon.exit_point(),
                    });
                }
                events
            }
            (PillarActivation::AlreadyActivated, _) => {
                vec![GameEvent::PillarAlreadyActive]
            }
        }
    }
}
