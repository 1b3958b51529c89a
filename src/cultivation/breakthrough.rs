//! Breakthrough eligibility and resolution.
//!
//! `resolve_breakthrough` is the one randomized transition in the engine.
//! It draws from the injected random source only when an attempt is
//! actually made; an ineligible call returns immediately without
//! consuming randomness, so seeded replays stay aligned.

use crate::character::Character;
use crate::cultivation::speed::breakthrough_chance;
use crate::stages::StageLadder;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolves the opaque item/task requirement identifiers a stage may
/// carry. The engine never interprets these ids itself.
pub trait RequirementResolver {
    fn is_met(&self, id: &str) -> bool;
}

/// Treats every external requirement as satisfied.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRequirementsMet;

impl RequirementResolver for AllRequirementsMet {
    fn is_met(&self, _id: &str) -> bool {
        true
    }
}

/// One unmet breakthrough condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibilityReason {
    /// Terminal stage: there is no higher stage to break through to.
    HighestStageReached,
    CultivationBelowCeiling { required: u64, current: u64 },
    SoulStrengthTooLow { required: u32, current: u32 },
    MissingItem(String),
    UnfinishedTask(String),
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::HighestStageReached => {
                write!(f, "already at the highest stage")
            }
            IneligibilityReason::CultivationBelowCeiling { required, current } => {
                write!(f, "cultivation too low: need {}, have {}", required, current)
            }
            IneligibilityReason::SoulStrengthTooLow { required, current } => {
                write!(
                    f,
                    "soul strength too low: need {}, have {}",
                    required, current
                )
            }
            IneligibilityReason::MissingItem(id) => write!(f, "missing item: {}", id),
            IneligibilityReason::UnfinishedTask(id) => write!(f, "unfinished task: {}", id),
        }
    }
}

/// Every unmet condition, accumulated rather than short-circuited, so a
/// caller can present the complete list.
#[derive(Debug, Clone, Default)]
pub struct EligibilityReport {
    pub reasons: Vec<IneligibilityReason>,
}

impl EligibilityReport {
    pub fn eligible(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Checks every breakthrough precondition for the character's current
/// stage.
pub fn check_eligibility(
    character: &Character,
    ladder: &StageLadder,
    resolver: &impl RequirementResolver,
) -> EligibilityReport {
    let current = character.current_stage(ladder);
    let Some(next) = ladder.next_stage(current) else {
        return EligibilityReport {
            reasons: vec![IneligibilityReason::HighestStageReached],
        };
    };

    let mut reasons = Vec::new();
    if character.base.cultivation < current.max_cultivation {
        reasons.push(IneligibilityReason::CultivationBelowCeiling {
            required: current.max_cultivation,
            current: character.base.cultivation,
        });
    }
    if character.base.soul_strength < next.requirements.soul_strength {
        reasons.push(IneligibilityReason::SoulStrengthTooLow {
            required: next.requirements.soul_strength,
            current: character.base.soul_strength,
        });
    }
    for item in &next.requirements.items {
        if !resolver.is_met(item) {
            reasons.push(IneligibilityReason::MissingItem(item.clone()));
        }
    }
    for task in &next.requirements.tasks {
        if !resolver.is_met(task) {
            reasons.push(IneligibilityReason::UnfinishedTask(task.clone()));
        }
    }

    EligibilityReport { reasons }
}

/// Losses applied by the caller after a failed attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakthroughPenalties {
    pub cultivation_loss: u64,
    pub soul_strength_loss: u32,
    pub vitality_loss: Option<u32>,
}

/// Outcome of one breakthrough attempt.
///
/// `Ineligible` is a normal result, distinct from `Failure`: the attempt
/// never happened and no randomness was drawn.
#[derive(Debug, Clone)]
pub enum BreakthroughOutcome {
    Ineligible(EligibilityReport),
    Success {
        new_stage_id: String,
        chance: f64,
        roll: f64,
    },
    Failure {
        penalties: BreakthroughPenalties,
        chance: f64,
        roll: f64,
    },
}

/// Resolves one breakthrough attempt against an injected random source.
///
/// Pure over the character: the caller applies the transition through
/// [`Character::apply_breakthrough_success`] or
/// [`Character::apply_breakthrough_failure`].
pub fn resolve_breakthrough<R: Rng>(
    character: &Character,
    ladder: &StageLadder,
    resolver: &impl RequirementResolver,
    rng: &mut R,
) -> BreakthroughOutcome {
    let report = check_eligibility(character, ladder, resolver);
    if !report.eligible() {
        return BreakthroughOutcome::Ineligible(report);
    }

    let current = character.current_stage(ladder);
    let Some(next) = ladder.next_stage(current) else {
        // Eligibility already rules this out; kept total rather than panicking.
        return BreakthroughOutcome::Ineligible(EligibilityReport {
            reasons: vec![IneligibilityReason::HighestStageReached],
        });
    };

    let chance = breakthrough_chance(character, ladder);
    let roll = rng.gen_range(0.0..100.0);

    if roll < chance {
        BreakthroughOutcome::Success {
            new_stage_id: next.id.clone(),
            chance,
            roll,
        }
    } else {
        let penalty = ladder.penalty_for(current.phase);
        let ceiling = current.max_cultivation as f64;
        let cultivation_loss = (ceiling * (1.0 - penalty.cultivation_retained)).floor() as u64;
        let vitality_loss = penalty
            .vitality_loss_fraction
            .map(|fraction| (ceiling * fraction).floor() as u32);
        BreakthroughOutcome::Failure {
            penalties: BreakthroughPenalties {
                cultivation_loss,
                soul_strength_loss: penalty.soul_strength_loss,
                vitality_loss,
            },
            chance,
            roll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::builtin_ladder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ready_character(ladder: &StageLadder) -> Character {
        let mut character = Character::new("Test", ladder);
        let first = ladder.stage_for(0);
        let next = ladder.next_stage(first).unwrap();
        character.base.cultivation = first.max_cultivation;
        character.base.soul_strength = next.requirements.soul_strength * 2;
        character
    }

    struct NothingMet;
    impl RequirementResolver for NothingMet {
        fn is_met(&self, _id: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_eligibility_accumulates_all_reasons() {
        let ladder = builtin_ladder();
        let mut character = Character::new("Test", &ladder);
        character.base.cultivation = 100;
        character.base.soul_strength = 0;

        let report = check_eligibility(&character, &ladder, &AllRequirementsMet);
        assert!(!report.eligible());
        assert_eq!(report.reasons.len(), 2);
        assert!(report
            .reasons
            .iter()
            .any(|r| matches!(r, IneligibilityReason::CultivationBelowCeiling { .. })));
        assert!(report
            .reasons
            .iter()
            .any(|r| matches!(r, IneligibilityReason::SoulStrengthTooLow { .. })));
    }

    #[test]
    fn test_eligibility_echoes_unmet_requirement_ids() {
        let ladder = builtin_ladder();
        let mut stages = crate::stages::builtin_stages();
        stages[1].requirements.items.push("foundation_pill".to_string());
        stages[1].requirements.tasks.push("sect_trial".to_string());
        let ladder_with_items =
            StageLadder::new(stages, crate::stages::builtin_penalties()).unwrap();

        let character = ready_character(&ladder);
        let report = check_eligibility(&character, &ladder_with_items, &NothingMet);
        assert!(report
            .reasons
            .contains(&IneligibilityReason::MissingItem("foundation_pill".to_string())));
        assert!(report
            .reasons
            .contains(&IneligibilityReason::UnfinishedTask("sect_trial".to_string())));
    }

    #[test]
    fn test_terminal_stage_reports_no_higher_stage() {
        let ladder = builtin_ladder();
        let mut character = Character::new("Test", &ladder);
        let terminal = ladder.stages().last().unwrap();
        character.base.cultivation = terminal.max_cultivation;

        let report = check_eligibility(&character, &ladder, &AllRequirementsMet);
        assert_eq!(
            report.reasons,
            vec![IneligibilityReason::HighestStageReached]
        );
    }

    #[test]
    fn test_ineligible_resolve_draws_no_randomness() {
        let ladder = builtin_ladder();
        let character = Character::new("Test", &ladder);

        let mut used = ChaCha8Rng::seed_from_u64(7);
        let mut untouched = ChaCha8Rng::seed_from_u64(7);

        let outcome = resolve_breakthrough(&character, &ladder, &AllRequirementsMet, &mut used);
        assert!(matches!(outcome, BreakthroughOutcome::Ineligible(_)));

        // The generator state must be unchanged by the ineligible call.
        assert_eq!(
            used.gen_range(0.0..100.0),
            untouched.gen_range(0.0..100.0)
        );
    }

    #[test]
    fn test_resolution_is_deterministic_and_pure() {
        let ladder = builtin_ladder();
        let character = ready_character(&ladder);
        let snapshot = character.clone();

        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = rng_a.clone();
        let outcome_a = resolve_breakthrough(&character, &ladder, &AllRequirementsMet, &mut rng_a);
        let outcome_b = resolve_breakthrough(&character, &ladder, &AllRequirementsMet, &mut rng_b);

        match (&outcome_a, &outcome_b) {
            (
                BreakthroughOutcome::Success { roll: a, .. },
                BreakthroughOutcome::Success { roll: b, .. },
            ) => assert_eq!(a, b),
            (
                BreakthroughOutcome::Failure { roll: a, .. },
                BreakthroughOutcome::Failure { roll: b, .. },
            ) => assert_eq!(a, b),
            _ => panic!("same seed produced diverging outcomes"),
        }
        assert_eq!(character.base, snapshot.base);
        assert_eq!(character.stage_id(), snapshot.stage_id());
    }

    #[test]
    fn test_success_targets_the_next_stage() {
        let ladder = builtin_ladder();
        let character = ready_character(&ladder);
        let current = character.current_stage(&ladder);
        let next = ladder.next_stage(current).unwrap();

        // Search seeds until one succeeds; chance is at least 50%.
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let BreakthroughOutcome::Success { new_stage_id, .. } =
                resolve_breakthrough(&character, &ladder, &AllRequirementsMet, &mut rng)
            {
                assert_eq!(new_stage_id, next.id);
                return;
            }
        }
        panic!("no success in 32 seeds at >=50% chance");
    }

    #[test]
    fn test_failure_penalties_match_phase_table() {
        let ladder = builtin_ladder();
        let character = ready_character(&ladder);
        let current = character.current_stage(&ladder);
        let penalty = *ladder.penalty_for(current.phase);

        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let BreakthroughOutcome::Failure { penalties, .. } =
                resolve_breakthrough(&character, &ladder, &AllRequirementsMet, &mut rng)
            {
                let expected_loss = (current.max_cultivation as f64
                    * (1.0 - penalty.cultivation_retained))
                    .floor() as u64;
                assert_eq!(penalties.cultivation_loss, expected_loss);
                assert!(penalties.cultivation_loss <= current.max_cultivation);
                assert_eq!(penalties.soul_strength_loss, penalty.soul_strength_loss);
                return;
            }
        }
        panic!("no failure in 64 seeds at <=95% chance");
    }
}
