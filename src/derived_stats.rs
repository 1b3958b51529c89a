//! Stats derived from base attributes and the current stage bonus.

use crate::character::Character;
use crate::cultivation::{breakthrough_chance, cultivation_speed};
use crate::stages::StageLadder;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub total_attack: u32,
    pub total_defense: u32,
    pub total_max_health: u32,
    pub total_max_mana: u32,
    pub total_max_spirit: u32,
    /// Percentage multiplier on cultivation gain.
    pub cultivation_speed: f64,
    /// Percentage chance of the next breakthrough attempt succeeding.
    pub breakthrough_chance: f64,
}

impl DerivedStats {
    /// Computes totals by scaling base combat attributes with the current
    /// stage's bonus, plus the two cultivation-derived percentages.
    pub fn calculate(character: &Character, ladder: &StageLadder) -> Self {
        let stage = character.current_stage(ladder);
        let multiplier = 1.0 + stage.attribute_bonus_percent / 100.0;
        let scale = |value: u32| (value as f64 * multiplier).floor() as u32;

        Self {
            total_attack: scale(character.base.attack),
            total_defense: scale(character.base.defense),
            total_max_health: scale(character.base.max_health),
            total_max_mana: scale(character.base.max_mana),
            total_max_spirit: scale(character.base.max_spirit),
            cultivation_speed: cultivation_speed(character),
            breakthrough_chance: breakthrough_chance(character, ladder),
        }
    }
}
