//! # Room
//!
//! One cell of the dungeon grid: its kind, visited flag, four door flags,
//! and the monsters, items, and interactables it holds.
//!
//! Doors never change after generation; everything else shrinks or flips as
//! the hero consumes the room's contents. List getters return read-only
//! slices — callers go through the mutators.

use crate::game::hero::Hero;
use crate::game::interact::{Chest, ChestOutcome, Item, Pillar, Trap};
use crate::game::monster::{Monster, MonsterId};
use crate::game::Position;
use crate::{config, Direction, RoomKind};
use serde::{Deserialize, Serialize};

/// Door flags for the four cardinal sides of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doors {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Doors {
    /// Whether the door on the given side is open.
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Opens or closes the door on the given side.
    pub fn set_open(&mut self, direction: Direction, open: bool) {
        match direction {
            Direction::North => self.north = open,
            Direction::East => self.east = open,
            Direction::South => self.south = open,
            Direction::West => self.west = open,
        }
    }
}

/// One cell of the dungeon grid.
///
/// Room identity is its position; equality of contents is only used by
/// save/load round-trip checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    position: Position,
    kind: RoomKind,
    visited: bool,
    doors: Doors,
    monsters: Vec<Monster>,
    items: Vec<Item>,
    pillar: Option<Pillar>,
    trap: Option<Trap>,
    chest: Option<Chest>,
}

impl Room {
    /// Creates an empty, unvisited room with all doors closed.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            kind: RoomKind::Empty,
            visited: false,
            doors: Doors::default(),
            monsters: Vec::new(),
            items: Vec::new(),
            pillar: None,
            trap: None,
            chest: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: RoomKind) {
        self.kind = kind;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub fn doors(&self) -> Doors {
        self.doors
    }

    pub fn is_door_open(&self, direction: Direction) -> bool {
        self.doors.is_open(direction)
    }

    pub fn set_door(&mut self, direction: Direction, open: bool) {
        self.doors.set_open(direction, open);
    }

    /// Read-only view of the monsters in this room.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn add_monster(&mut self, monster: Monster) {
        self.monsters.push(monster);
    }

    /// Removes and returns the monster with the given id, if present.
    pub fn remove_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let index = self.monsters.iter().position(|m| m.id() == id)?;
        Some(self.monsters.remove(index))
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id() == id)
    }

    /// The first monster in the room, the default target for hero attacks.
    pub fn first_monster(&self) -> Option<&Monster> {
        self.monsters.first()
    }

    pub fn clear_monsters(&mut self) {
        self.monsters.clear();
    }

    /// Read-only view of the ground items in this room.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the ground item at `index`, if any.
    pub fn take_item(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn pillar(&self) -> Option<&Pillar> {
        self.pillar.as_ref()
    }

    pub fn pillar_mut(&mut self) -> Option<&mut Pillar> {
        self.pillar.as_mut()
    }

    /// Attaches a pillar, retyping the room accordingly.
    pub fn set_pillar(&mut self, pillar: Pillar) {
        self.pillar = Some(pillar);
        self.kind = RoomKind::Pillar;
    }

    pub fn trap(&self) -> Option<&Trap> {
        self.trap.as_ref()
    }

    /// Attaches a trap, retyping the room accordingly.
    pub fn set_trap(&mut self, trap: Trap) {
        self.trap = Some(trap);
        self.kind = RoomKind::Trap;
    }

    pub fn chest(&self) -> Option<&Chest> {
        self.chest.as_ref()
    }

    /// Attaches a chest, retyping the room accordingly.
    pub fn set_chest(&mut self, chest: Chest) {
        self.chest = Some(chest);
        self.kind = RoomKind::Treasure;
    }

    /// Marks the room visited and fires any un-sprung trap.
    ///
    /// Trap damage is automatic on entry, not player-initiated. Returns the
    /// damage dealt if the trap fired.
    pub fn enter(&mut self, hero: &mut Hero) -> Option<u32> {
        self.visited = true;
        self.trap.as_mut().and_then(|trap| trap.trigger(hero))
    }

    /// Attempts to open this room's chest for the hero.
    ///
    /// The first open charges [`config::CHEST_GOLD_FEE`] gold and only goes
    /// through when the hero can pay; later opens transfer any remaining
    /// items free of charge. Items past inventory capacity stay in the chest.
    pub fn open_chest(&mut self, hero: &mut Hero) -> ChestOutcome {
        if self.kind != RoomKind::Treasure {
            return ChestOutcome::NoChest;
        }
        let chest = match self.chest.as_mut() {
            Some(chest) => chest,
            None => return ChestOutcome::NoChest,
        };

        if !chest.is_opened() {
            if !hero.spend_gold(config::CHEST_GOLD_FEE) {
                return ChestOutcome::InsufficientGold;
            }
            chest.mark_opened();
        }

        let items_taken = chest.transfer_items(hero);
        ChestOutcome::Opened { items_taken }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, Combatant, HeroClass, PillarKind};

    fn test_hero() -> Hero {
        let catalog = Catalog::builtin();
        Hero::new("Tester", HeroClass::Warrior, &catalog, Position::origin()).unwrap()
    }

    #[test]
    fn test_new_room_is_closed_and_empty() {
        let room = Room::new(Position::new(2, 3));
        assert_eq!(room.kind(), RoomKind::Empty);
        assert!(!room.is_visited());
        for dir in Direction::all() {
            assert!(!room.is_door_open(dir));
        }
    }

    #[test]
    fn test_attaching_interactables_retypes_room() {
        let mut room = Room::new(Position::origin());
        room.set_trap(Trap::new(5));
        assert_eq!(room.kind(), RoomKind::Trap);

        let mut room = Room::new(Position::origin());
        room.set_pillar(Pillar::new(PillarKind::Abstraction));
        assert_eq!(room.kind(), RoomKind::Pillar);

        let mut room = Room::new(Position::origin());
        room.set_chest(Chest::new(vec![Item::VisionPotion]));
        assert_eq!(room.kind(), RoomKind::Treasure);
    }

    #[test]
    fn test_enter_marks_visited_and_fires_trap_once() {
        let mut hero = test_hero();
        let full = hero.stats().health;
        let mut room = Room::new(Position::origin());
        room.set_trap(Trap::new(8));

        assert_eq!(room.enter(&mut hero), Some(8));
        assert!(room.is_visited());
        assert_eq!(hero.stats().health, full - 8);

        // Re-entering a sprung trap room is harmless
        assert_eq!(room.enter(&mut hero), None);
        assert_eq!(hero.stats().health, full - 8);
    }

    #[test]
    fn test_chest_first_open_requires_fee() {
        let mut hero = test_hero();
        // Drain gold below the fee
        let gold = hero.gold();
        hero.spend_gold(gold);
        hero.add_gold(config::CHEST_GOLD_FEE - 1);

        let mut room = Room::new(Position::origin());
        room.set_chest(Chest::new(vec![Item::HealthPotion { heal: 20 }]));

        assert_eq!(room.open_chest(&mut hero), ChestOutcome::InsufficientGold);
        assert_eq!(hero.gold(), config::CHEST_GOLD_FEE - 1);
        assert!(!room.chest().unwrap().is_opened());
        assert!(hero.inventory().is_empty());

        // With enough gold the fee is charged exactly once
        hero.add_gold(1);
        assert_eq!(
            room.open_chest(&mut hero),
            ChestOutcome::Opened { items_taken: 1 }
        );
        assert_eq!(hero.gold(), 0);
        assert_eq!(hero.inventory().len(), 1);
    }

    #[test]
    fn test_chest_reopen_is_free_and_transfers_remainder() {
        let mut hero = test_hero();
        let mut room = Room::new(Position::origin());
        let contents =
            vec![Item::HealthPotion { heal: 20 }; crate::config::INVENTORY_CAPACITY + 3];
        room.set_chest(Chest::new(contents));

        let outcome = room.open_chest(&mut hero);
        assert_eq!(
            outcome,
            ChestOutcome::Opened {
                items_taken: crate::config::INVENTORY_CAPACITY
            }
        );
        let gold_after_fee = hero.gold();
        assert_eq!(room.chest().unwrap().items().len(), 3);

        // Make space and reopen; no second fee
        hero.remove_item(0);
        hero.remove_item(0);
        hero.remove_item(0);
        let outcome = room.open_chest(&mut hero);
        assert_eq!(outcome, ChestOutcome::Opened { items_taken: 3 });
        assert_eq!(hero.gold(), gold_after_fee);
        assert!(room.chest().unwrap().is_looted());
    }

    #[test]
    fn test_open_chest_outside_treasure_room() {
        let mut hero = test_hero();
        let mut room = Room::new(Position::origin());
        assert_eq!(room.open_chest(&mut hero), ChestOutcome::NoChest);
    }

    #[test]
    fn test_monster_bookkeeping() {
        let catalog = Catalog::builtin();
        let mut room = Room::new(Position::origin());
        let goblin = Monster::new(crate::MonsterKind::Goblin, false, &catalog);
        let id = goblin.id();
        room.add_monster(goblin);

        assert_eq!(room.monsters().len(), 1);
        assert!(room.monster_mut(id).is_some());

        let removed = room.remove_monster(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(room.monsters().is_empty());
        assert!(room.remove_monster(id).is_none());
    }
}
