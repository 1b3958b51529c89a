//! Speed and chance calculators.
//!
//! Pure functions of character attributes; no hidden state, no
//! randomness. Constants are tuning data in [`crate::constants`].

use crate::character::Character;
use crate::constants::{
    AFFINITY_SPEED_WEIGHT, BASE_CULTIVATION_SPEED, BREAKTHROUGH_BASE_CHANCE,
    BREAKTHROUGH_CHANCE_CAP, PHYSIQUE_CHANCE_DIVISOR, PHYSIQUE_CHANCE_UNIT,
    PHYSIQUE_SPEED_DIVISOR, PHYSIQUE_SPEED_UNIT, SOUL_STRENGTH_BONUS_CAP,
};
use crate::stages::StageLadder;

/// Cultivation speed as a percentage multiplier on progress gain.
///
/// `base + floor(physique/20)*10 + highest affinity*0.5 + title bonus`.
pub fn cultivation_speed(character: &Character) -> f64 {
    let physique_bonus =
        (character.base.physique / PHYSIQUE_SPEED_DIVISOR) as f64 * PHYSIQUE_SPEED_UNIT;
    let affinity_bonus = character.base.affinities.highest() as f64 * AFFINITY_SPEED_WEIGHT;
    let title_bonus = character
        .title
        .as_ref()
        .map_or(0.0, |title| title.bonuses.cultivation_speed);

    (BASE_CULTIVATION_SPEED + physique_bonus + affinity_bonus + title_bonus).max(0.0)
}

/// Breakthrough success chance as a percentage in `[0, 95]`.
///
/// Hard-gated to 0 unless cultivation sits at the current stage ceiling,
/// and always 0 at the terminal stage. The 95 ceiling means a
/// breakthrough is never guaranteed, whatever the stats.
pub fn breakthrough_chance(character: &Character, ladder: &StageLadder) -> f64 {
    let current = character.current_stage(ladder);
    let Some(next) = ladder.next_stage(current) else {
        return 0.0;
    };
    if character.base.cultivation < current.max_cultivation {
        return 0.0;
    }

    let requirement = next.requirements.soul_strength.max(1);
    let ratio = character.base.soul_strength as f64 / requirement as f64;
    let soul_bonus = ((ratio - 1.0) * 100.0).clamp(0.0, SOUL_STRENGTH_BONUS_CAP);
    let physique_bonus =
        (character.base.physique / PHYSIQUE_CHANCE_DIVISOR) as f64 * PHYSIQUE_CHANCE_UNIT;

    (BREAKTHROUGH_BASE_CHANCE + soul_bonus + physique_bonus).clamp(0.0, BREAKTHROUGH_CHANCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Element;
    use crate::stages::builtin_ladder;
    use crate::title::builtin_titles;

    fn fresh_character(ladder: &StageLadder) -> Character {
        let mut character = Character::new("Test", ladder);
        character.base.physique = 0;
        character.base.affinities.set(Element::Metal, 0);
        character.base.affinities.set(Element::Wood, 0);
        character.base.affinities.set(Element::Water, 0);
        character.base.affinities.set(Element::Fire, 0);
        character.base.affinities.set(Element::Earth, 0);
        character
    }

    #[test]
    fn test_speed_base_only() {
        let ladder = builtin_ladder();
        let character = fresh_character(&ladder);
        assert_eq!(cultivation_speed(&character), 100.0);
    }

    #[test]
    fn test_speed_physique_steps_every_twenty() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        character.base.physique = 19;
        assert_eq!(cultivation_speed(&character), 100.0);
        character.base.physique = 20;
        assert_eq!(cultivation_speed(&character), 110.0);
        character.base.physique = 45;
        assert_eq!(cultivation_speed(&character), 120.0);
    }

    #[test]
    fn test_speed_uses_highest_affinity_only() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        character.base.affinities.set(Element::Fire, 80);
        character.base.affinities.set(Element::Water, 60);
        assert_eq!(cultivation_speed(&character), 140.0);
    }

    #[test]
    fn test_speed_includes_title_bonus() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        character.title = Some(builtin_titles().remove(0));
        assert_eq!(cultivation_speed(&character), 105.0);
    }

    #[test]
    fn test_chance_zero_below_ceiling() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        character.base.soul_strength = 10_000;
        character.base.cultivation = ladder.stage_for(0).max_cultivation - 1;
        assert_eq!(breakthrough_chance(&character, &ladder), 0.0);
    }

    #[test]
    fn test_chance_zero_at_terminal_stage() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        let terminal = ladder.stages().last().unwrap();
        character.base.cultivation = terminal.max_cultivation;
        character.base.soul_strength = u32::MAX;
        assert_eq!(breakthrough_chance(&character, &ladder), 0.0);
    }

    #[test]
    fn test_chance_base_when_requirement_exactly_met() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        let first = ladder.stage_for(0);
        let next = ladder.next_stage(first).unwrap();
        character.base.cultivation = first.max_cultivation;
        character.base.soul_strength = next.requirements.soul_strength;
        assert_eq!(breakthrough_chance(&character, &ladder), 50.0);
    }

    #[test]
    fn test_chance_never_exceeds_cap() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        character.base.cultivation = ladder.stage_for(0).max_cultivation;
        for soul in [0u32, 1, 10, 100, 1_000, 100_000] {
            for physique in [0u32, 50, 100, 500, 5_000] {
                character.base.soul_strength = soul;
                character.base.physique = physique;
                let chance = breakthrough_chance(&character, &ladder);
                assert!(
                    (0.0..=95.0).contains(&chance),
                    "chance {} out of range for soul {} physique {}",
                    chance,
                    soul,
                    physique
                );
            }
        }
    }

    #[test]
    fn test_chance_soul_shortfall_never_negative_bonus() {
        let ladder = builtin_ladder();
        let mut character = fresh_character(&ladder);
        let first = ladder.stage_for(0);
        character.base.cultivation = first.max_cultivation;
        // Far below the requirement: the soul bonus clamps at 0, not below.
        character.base.soul_strength = 1;
        assert_eq!(breakthrough_chance(&character, &ladder), 50.0);
    }
}
