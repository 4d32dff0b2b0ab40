//! # Combat Module
//!
//! Stat block and strike resolution shared by heroes and monsters.
//!
//! There is no character class hierarchy: both sides of a fight carry the
//! same [`CombatStats`] record and expose it through the small [`Combatant`]
//! capability trait. Crit rolls draw from an injected random source so any
//! exchange can be replayed deterministically.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Core stat block shared by every character.
///
/// Health is always kept within `[0, max_health]`: damage saturates at zero
/// and healing clamps at the maximum.
///
/// # Examples
///
/// ```
/// use delve::CombatStats;
///
/// let mut stats = CombatStats::new(100, 15, 0.05, 2.0);
/// stats.take_damage(30);
/// assert_eq!(stats.health, 70);
/// stats.take_damage(1000);
/// assert_eq!(stats.health, 0);
/// assert!(!stats.is_alive());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: u32,
    pub max_health: u32,
    pub base_attack: u32,
    /// Probability in [0, 1) that a strike crits
    pub crit_chance: f64,
    /// Damage multiplier applied on a crit
    pub crit_multiplier: f64,
}

impl CombatStats {
    /// Creates a stat block at full health.
    pub fn new(max_health: u32, base_attack: u32, crit_chance: f64, crit_multiplier: f64) -> Self {
        Self {
            health: max_health,
            max_health,
            base_attack,
            crit_chance,
            crit_multiplier,
        }
    }

    /// Whether this character is still alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage, saturating at zero health.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restores health, clamping at the maximum.
    ///
    /// Defeat is terminal: a character at zero health stays there.
    pub fn heal(&mut self, amount: u32) {
        if self.health == 0 {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Raises the health cap without changing current health.
    pub fn raise_max_health(&mut self, amount: u32) {
        self.max_health += amount;
    }
}

/// Outcome of a single resolved strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Damage actually applied to the target
    pub damage: u32,
    /// Whether the crit roll succeeded
    pub crit: bool,
    /// Whether the strike reduced the target to zero health
    pub target_defeated: bool,
}

/// Capability trait implemented by every fighting character.
///
/// The trait carries the combat contract only: stat access, effective attack
/// power, and the derived liveness/damage operations. Variant-specific state
/// (inventory, loot, buffs) stays on the concrete types.
pub trait Combatant {
    /// Read access to the shared stat block.
    fn stats(&self) -> &CombatStats;

    /// Mutable access to the shared stat block.
    fn stats_mut(&mut self) -> &mut CombatStats;

    /// Effective damage before the crit roll, including variant modifiers
    /// (elite multiplier, pillar attack bonuses).
    fn attack_power(&self) -> u32;

    /// Display name used in combat reporting.
    fn name(&self) -> &str;

    /// Whether this character is still alive.
    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }

    /// Applies damage, saturating at zero health.
    fn take_damage(&mut self, amount: u32) {
        self.stats_mut().take_damage(amount);
    }
}

/// Rolls crit and computes the damage of one strike.
///
/// A uniform draw in [0, 1) below `crit_chance` multiplies the base damage by
/// `crit_multiplier` (rounded) before any clamping happens on the target.
pub fn roll_damage(
    base_damage: u32,
    crit_chance: f64,
    crit_multiplier: f64,
    rng: &mut StdRng,
) -> (u32, bool) {
    let crit = rng.gen::<f64>() < crit_chance;
    let damage = if crit {
        (base_damage as f64 * crit_multiplier).round() as u32
    } else {
        base_damage
    };
    (damage, crit)
}

/// Resolves one strike from an attacker onto a target.
pub fn strike(
    attacker: &dyn Combatant,
    target: &mut dyn Combatant,
    rng: &mut StdRng,
) -> AttackOutcome {
    strike_with(
        attacker.attack_power(),
        attacker.stats(),
        target,
        rng,
    )
}

/// Resolves a strike with an explicit base damage.
///
/// Used for special attacks, which swap in their own base damage but keep the
/// attacker's crit profile.
pub fn strike_with(
    base_damage: u32,
    attacker_stats: &CombatStats,
    target: &mut dyn Combatant,
    rng: &mut StdRng,
) -> AttackOutcome {
    let (damage, crit) = roll_damage(
        base_damage,
        attacker_stats.crit_chance,
        attacker_stats.crit_multiplier,
        rng,
    );
    target.take_damage(damage);
    AttackOutcome {
        damage,
        crit,
        target_defeated: !target.is_alive(),
    }
}
