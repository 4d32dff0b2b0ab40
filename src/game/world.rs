//! # World Module
//!
//! The dungeon: a grid of rooms plus the pillar-progression state machine.
//!
//! Rooms are stored row-major and addressed by [`Position`]. The dungeon
//! tracks how many pillars were placed and how many the hero has activated;
//! once the two counts meet, the boss spawns in the exit room exactly once.

use crate::game::monster::Monster;
use crate::game::room::Room;
use crate::game::Position;
use crate::{Catalog, DelveError, DelveResult, RoomKind};
use log::info;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Difficulty setting chosen at generation time.
///
/// Scales elite-monster odds and trap damage during generation and is inert
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Chance that a placed monster is elite.
    pub fn elite_chance(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.10,
            Difficulty::Normal => 0.20,
            Difficulty::Hard => 0.35,
        }
    }

    /// Damage dealt by generated traps.
    pub fn trap_damage(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 10,
            Difficulty::Hard => 15,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Normal => write!(f, "Normal"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = DelveError;

    fn from_str(s: &str) -> DelveResult<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DelveError::InvalidArgument(format!(
                "unknown difficulty: {}",
                other
            ))),
        }
    }
}

/// Where the dungeon stands in the pillar-to-boss progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PillarProgress {
    /// Pillars remain to be activated
    Collecting,
    /// Every placed pillar is active but the boss has not spawned yet
    AllCollected,
    /// The boss occupies the exit room (terminal)
    BossSpawned,
}

/// The dungeon grid and its session-long state.
///
/// Created once per game by the generator, mutated by room interactions and
/// the pillar/boss trigger, and replaced wholesale on a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    width: u32,
    height: u32,
    difficulty: Difficulty,
    // Row-major grid; index = y * width + x
    rooms: Vec<Room>,
    spawn: Position,
    exit: Position,
    total_pillars: u32,
    activated_pillars: u32,
    boss_spawned: bool,
}

impl Dungeon {
    /// Creates a dungeon of all-empty rooms with spawn at the origin and the
    /// exit in the far corner.
    ///
    /// Dimensions must both be positive.
    pub fn new(width: u32, height: u32, difficulty: Difficulty) -> DelveResult<Self> {
        if width == 0 || height == 0 {
            return Err(DelveError::InvalidDimensions { width, height });
        }
        let mut rooms = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                rooms.push(Room::new(Position::new(x, y)));
            }
        }
        Ok(Self {
            width,
            height,
            difficulty,
            rooms,
            spawn: Position::origin(),
            exit: Position::new(width as i32 - 1, height as i32 - 1),
            total_pillars: 0,
            activated_pillars: 0,
            boss_spawned: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn spawn_point(&self) -> Position {
        self.spawn
    }

    pub fn exit_point(&self) -> Position {
        self.exit
    }

    pub fn total_pillars(&self) -> u32 {
        self.total_pillars
    }

    pub fn activated_pillars(&self) -> u32 {
        self.activated_pillars
    }

    pub fn is_boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    /// Records how many pillars generation placed. Capped at the global
    /// pillar limit.
    pub fn set_total_pillars(&mut self, count: u32) {
        self.total_pillars = count.min(crate::config::MAX_PILLARS);
    }

    /// Whether the position falls inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y as u32 * self.width + pos.x as u32) as usize
    }

    /// The room at `pos`, if in bounds.
    pub fn room(&self, pos: Position) -> Option<&Room> {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.rooms.get(index)
        } else {
            None
        }
    }

    /// Mutable access to the room at `pos`, if in bounds.
    pub fn room_mut(&mut self, pos: Position) -> Option<&mut Room> {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.rooms.get_mut(index)
        } else {
            None
        }
    }

    /// Iterates every room in row-major order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Current stage of the pillar-to-boss progression.
    pub fn pillar_progress(&self) -> PillarProgress {
        if self.boss_spawned {
            PillarProgress::BossSpawned
        } else if self.total_pillars > 0 && self.activated_pillars >= self.total_pillars {
            PillarProgress::AllCollected
        } else {
            PillarProgress::Collecting
        }
    }

    /// Records one pillar activation and runs the boss-spawn trigger.
    ///
    /// The activated count never exceeds the total, excess calls are
    /// harmless, and the boss spawns at most once. Returns true only on the
    /// call that spawns the boss.
    pub fn record_pillar_activation(&mut self, catalog: &Catalog) -> bool {
        if self.activated_pillars < self.total_pillars {
            self.activated_pillars += 1;
        }
        if self.total_pillars > 0
            && self.activated_pillars >= self.total_pillars
            && !self.boss_spawned
        {
            self.spawn_boss(catalog);
            return true;
        }
        false
    }

    /// Places the boss in the exit room, clearing whatever lived there.
    fn spawn_boss(&mut self, catalog: &Catalog) {
        self.boss_spawned = true;
        let boss = Monster::new(catalog.boss_kind(), false, catalog);
        info!(
            "all {} pillars active, {} awaits at {}",
            self.total_pillars,
            boss.kind(),
            self.exit
        );
        let exit = self.exit;
        if let Some(room) = self.room_mut(exit) {
            room.clear_monsters();
            room.set_kind(RoomKind::Boss);
            room.add_monster(boss);
        }
    }

    /// Marks the 8 rooms surrounding `center` as visited.
    ///
    /// Backs the vision potion; out-of-bounds neighbors are skipped.
    pub fn reveal_around(&mut self, center: Position) {
        for pos in center.adjacent_positions() {
            if let Some(room) = self.room_mut(pos) {
                room.mark_visited();
            }
        }
    }
}
