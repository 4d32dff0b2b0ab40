//! Property-style checks over combat math and generation invariants.

use delve::{
    Catalog, CombatStats, Difficulty, DungeonGenerator, GenerationConfig, Generator, Position,
    RoomKind, Trap,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    /// Damage never increases health and always lands in [0, max].
    #[test]
    fn damage_is_monotonic(max_health in 1u32..10_000, hits in prop::collection::vec(0u32..5_000, 0..20)) {
        let mut stats = CombatStats::new(max_health, 10, 0.0, 2.0);
        for hit in hits {
            let before = stats.health;
            stats.take_damage(hit);
            prop_assert!(stats.health <= before);
            prop_assert!(stats.health <= stats.max_health);
        }
    }

    /// Healing a full-health character is a no-op, however often applied.
    #[test]
    fn healing_at_cap_is_idempotent(max_health in 1u32..10_000, heals in prop::collection::vec(0u32..5_000, 1..20)) {
        let mut stats = CombatStats::new(max_health, 10, 0.0, 2.0);
        for heal in heals {
            stats.heal(heal);
            prop_assert_eq!(stats.health, max_health);
        }
    }

    /// Trap construction clamps any negative damage to zero.
    #[test]
    fn trap_damage_is_never_negative(damage in i32::MIN..i32::MAX) {
        let trap = Trap::new(damage);
        prop_assert_eq!(trap.damage(), damage.max(0) as u32);
    }

    /// Every valid grid generates the full room count with pinned corners.
    #[test]
    fn generation_fills_the_grid(width in 1u32..9, height in 1u32..9, seed in any::<u64>()) {
        let config = GenerationConfig::new(width, height, Difficulty::Normal, seed);
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(seed);
        let dungeon = DungeonGenerator::new().generate(&config, &catalog, &mut rng).unwrap();

        prop_assert_eq!(dungeon.rooms().count(), (width * height) as usize);
        prop_assert!(dungeon.total_pillars() <= 4);

        let exit_kind = dungeon.room(dungeon.exit_point()).unwrap().kind();
        prop_assert_eq!(exit_kind, RoomKind::Exit);
        if width * height > 1 {
            prop_assert_ne!(dungeon.spawn_point(), dungeon.exit_point());
            let spawn_kind = dungeon.room(Position::new(0, 0)).unwrap().kind();
            prop_assert_eq!(spawn_kind, RoomKind::Entrance);
        }
    }
}
