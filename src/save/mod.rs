//! # Save Module
//!
//! JSON round-trip of the full session state.
//!
//! A [`SaveGame`] captures everything observable about a run — the dungeon
//! grid with per-room visited/door/interactable state, the hero, the
//! archetype catalog, and the generation seed — and reconstructs an
//! identical session on load. The format carries a version number checked
//! on load.

use crate::game::hero::Hero;
use crate::game::session::GameSession;
use crate::game::world::Dungeon;
use crate::{Catalog, DelveError, DelveResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of one running game.
///
/// # Examples
///
/// ```
/// use delve::{Difficulty, GameSession, GenerationConfig, HeroClass, SaveGame};
///
/// let config = GenerationConfig::new(6, 6, Difficulty::Easy, 7);
/// let session = GameSession::new("Ada", HeroClass::Priestess, &config).unwrap();
///
/// let json = session.snapshot().to_json().unwrap();
/// let restored = SaveGame::from_json(&json).unwrap().into_session().unwrap();
/// assert_eq!(restored.hero(), session.hero());
/// assert_eq!(restored.dungeon(), session.dungeon());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub seed: u64,
    pub dungeon: Dungeon,
    pub hero: Hero,
    pub catalog: Catalog,
}

impl SaveGame {
    /// Serializes the snapshot to pretty JSON.
    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot, rejecting unknown format versions.
    pub fn from_json(json: &str) -> DelveResult<Self> {
        let save: SaveGame = serde_json::from_str(json)?;
        if save.version != SAVE_VERSION {
            return Err(DelveError::InvalidState(format!(
                "unsupported save version {} (expected {})",
                save.version, SAVE_VERSION
            )));
        }
        Ok(save)
    }

    /// Writes the snapshot to a file.
    pub fn write_to(&self, path: &Path) -> DelveResult<()> {
        fs::write(path, self.to_json()?)?;
        info!("game saved to {}", path.display());
        Ok(())
    }

    /// Reads a snapshot from a file.
    pub fn read_from(path: &Path) -> DelveResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Rebuilds a running session from this snapshot.
    pub fn into_session(self) -> DelveResult<GameSession> {
        GameSession::resume(self.dungeon, self.hero, self.catalog, self.seed)
    }
}

impl GameSession {
    /// Captures the session as a versioned snapshot.
    pub fn snapshot(&self) -> SaveGame {
        SaveGame {
            version: SAVE_VERSION,
            seed: self.seed(),
            dungeon: self.dungeon().clone(),
            hero: self.hero().clone(),
            catalog: self.catalog().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Difficulty, GenerationConfig, HeroClass};

    fn session() -> GameSession {
        let config = GenerationConfig::new(6, 6, Difficulty::Normal, 21);
        GameSession::new("Ada", HeroClass::Warrior, &config).unwrap()
    }

    #[test]
    fn test_json_round_trip_preserves_state() {
        let mut session = session();
        session.move_hero(crate::Direction::East);
        session.move_hero(crate::Direction::South);

        let save = session.snapshot();
        let json = save.to_json().unwrap();
        let reloaded = SaveGame::from_json(&json).unwrap();
        assert_eq!(save, reloaded);

        let restored = reloaded.into_session().unwrap();
        assert_eq!(restored.hero(), session.hero());
        assert_eq!(restored.dungeon(), session.dungeon());
    }

    #[test]
    fn test_seeded_catalog_survives_restore() {
        // Seed rows with a non-builtin boss reward
        let json = Catalog::builtin()
            .to_json()
            .unwrap()
            .replace("\"gold_reward\": 100", "\"gold_reward\": 777");
        let catalog = Catalog::from_json(&json).unwrap();
        let boss = catalog.boss_kind();
        assert_eq!(catalog.monster(boss).gold_reward, 777);

        let config = GenerationConfig::new(6, 6, Difficulty::Normal, 21);
        let session = GameSession::with_catalog("Ada", HeroClass::Warrior, &config, catalog)
            .unwrap();

        let restored = session.snapshot().into_session().unwrap();
        assert_eq!(restored.catalog(), session.catalog());
        assert_eq!(restored.catalog().monster(boss).gold_reward, 777);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut save = session().snapshot();
        save.version = SAVE_VERSION + 1;
        let json = serde_json::to_string(&save).unwrap();
        assert!(matches!(
            SaveGame::from_json(&json),
            Err(DelveError::InvalidState(_))
        ));
    }

    #[test]
    fn test_garbage_json_rejected() {
        assert!(matches!(
            SaveGame::from_json("not a save"),
            Err(DelveError::Serde(_))
        ));
    }
}
