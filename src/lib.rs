//! # Delve
//!
//! A turn-based dungeon-crawler game engine.
//!
//! ## Architecture Overview
//!
//! Delve simulates a grid of rooms explored by a player-controlled hero. The
//! core architecture revolves around several key concepts:
//!
//! - **Catalog**: Static, read-only archetype tables for heroes, monsters,
//!   pillars, and rooms, seedable from JSON rows
//! - **Game State**: The dungeon grid, per-room state, and the hero/monster
//!   combat model
//! - **Session**: A controller that applies discrete player actions and
//!   reports the resulting game events
//! - **Generation System**: Procedural dungeon layout and content placement
//!   driven by an injected random source
//! - **Save System**: JSON round-trip of the full session state
//!
//! ## Simulation Model
//!
//! The engine is single-threaded and turn-based: every player action (move,
//! attack, use item, activate pillar) is one atomically-applied state
//! transition. A host render loop reads state through cheap accessors and
//! never mutates internals directly. All randomness flows through explicitly
//! seeded generators so any run can be reproduced.

pub mod catalog;
pub mod game;
pub mod generation;
pub mod save;

// Core module re-exports
pub use catalog::*;
pub use game::*;
pub use generation::*;
pub use save::*;

// Explicit re-exports for commonly used types
pub use catalog::{Catalog, HeroClass, HeroStats, MonsterKind, MonsterStats, PillarKind, RoomKind};
pub use game::{
    // From combat
    AttackOutcome,
    Chest,
    ChestOutcome,
    CombatStats,
    Combatant,
    // From world
    Difficulty,
    Direction,
    Doors,
    Dungeon,
    // From session
    GameEvent,
    GameSession,
    // From entities
    Hero,
    // From interactables
    Item,
    Monster,
    MonsterId,
    Pillar,
    PillarActivation,
    PillarProgress,
    Position,
    Room,
    Trap,
};
pub use generation::{DungeonGenerator, GenerationConfig, Generator};
pub use save::SaveGame;

/// Core error type for the Delve game engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Dungeon dimensions must both be positive
    #[error("Invalid dungeon dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A constructor or operation received an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was attempted in a state that forbids it
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gameplay balance constants.
pub mod config {
    /// Maximum number of items a hero can carry
    pub const INVENTORY_CAPACITY: usize = 10;

    /// Gold charged the first time a chest is opened
    pub const CHEST_GOLD_FEE: u32 = 10;

    /// Maximum number of pillars placed in any dungeon
    pub const MAX_PILLARS: u32 = 4;

    /// Size of the hero's mana pool
    pub const MAX_MANA: u8 = 4;

    /// Mana cost of the hero's special attack
    pub const SPECIAL_ATTACK_MANA_COST: u8 = 2;

    /// Special attack cost once the Polymorphism buff is held
    pub const REDUCED_SPECIAL_ATTACK_MANA_COST: u8 = 1;

    /// Mana restored when the hero defeats a monster
    pub const MANA_REGEN_ON_KILL: u8 = 1;

    /// Damage multiplier applied to elite monsters
    pub const ELITE_DAMAGE_MULTIPLIER: f64 = 1.5;

    /// Attack granted by the Abstraction pillar
    pub const PILLAR_ATTACK_BONUS: u32 = 5;

    /// Max health granted by the Encapsulation pillar
    pub const PILLAR_MAX_HEALTH_BONUS: u32 = 20;

    /// Crit chance granted by the Inheritance pillar
    pub const PILLAR_CRIT_CHANCE_BONUS: f64 = 0.05;
}
