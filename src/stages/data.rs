//! Builtin stage ladder and failure-penalty definitions.
//!
//! This is the default tuning data; deployments can override it with a
//! JSON document parsed by [`StageLadder::from_json`].

use super::ladder::{BreakthroughRequirements, Phase, PhasePenalty, Stage, StageLadder};
use std::collections::HashMap;

fn stage(
    id: &str,
    name: &str,
    phase: Phase,
    level: u32,
    min_cultivation: u64,
    max_cultivation: u64,
    soul_strength: u32,
    attribute_bonus_percent: f64,
    description: &str,
) -> Stage {
    Stage {
        id: id.to_string(),
        name: name.to_string(),
        phase,
        level,
        min_cultivation,
        max_cultivation,
        requirements: BreakthroughRequirements {
            soul_strength,
            items: Vec::new(),
            tasks: Vec::new(),
        },
        attribute_bonus_percent,
        skill_points: level,
        description: description.to_string(),
    }
}

/// Returns the full builtin ladder, mortal through true immortal.
pub fn builtin_stages() -> Vec<Stage> {
    vec![
        stage(
            "mortal",
            "Mortal",
            Phase::Mortal,
            0,
            0,
            999,
            0,
            0.0,
            "An ordinary body, untouched by spiritual energy.",
        ),
        stage(
            "qi_refining_early",
            "Qi Refining (Early)",
            Phase::Cultivator,
            1,
            1_000,
            2_999,
            10,
            5.0,
            "The first wisps of qi circulate through the meridians.",
        ),
        stage(
            "qi_refining_middle",
            "Qi Refining (Middle)",
            Phase::Cultivator,
            2,
            3_000,
            5_999,
            20,
            10.0,
            "Qi flows freely; the body begins to strengthen.",
        ),
        stage(
            "qi_refining_late",
            "Qi Refining (Late)",
            Phase::Cultivator,
            3,
            6_000,
            9_761,
            35,
            15.0,
            "The meridians are saturated; a foundation awaits.",
        ),
        stage(
            "foundation_early",
            "Foundation (Early)",
            Phase::Cultivator,
            4,
            9_762,
            19_999,
            60,
            25.0,
            "A spiritual foundation takes root in the dantian.",
        ),
        stage(
            "foundation_middle",
            "Foundation (Middle)",
            Phase::Cultivator,
            5,
            20_000,
            39_999,
            90,
            35.0,
            "The foundation hardens; lifespan begins to lengthen.",
        ),
        stage(
            "foundation_late",
            "Foundation (Late)",
            Phase::Cultivator,
            6,
            40_000,
            69_999,
            130,
            45.0,
            "The foundation is complete; a core can be condensed.",
        ),
        stage(
            "golden_core_early",
            "Golden Core (Early)",
            Phase::Cultivator,
            7,
            70_000,
            119_999,
            200,
            60.0,
            "A golden core spins within the dantian.",
        ),
        stage(
            "golden_core_middle",
            "Golden Core (Middle)",
            Phase::Cultivator,
            8,
            120_000,
            199_999,
            280,
            75.0,
            "The core brightens; techniques gain weight.",
        ),
        stage(
            "golden_core_late",
            "Golden Core (Late)",
            Phase::Cultivator,
            9,
            200_000,
            329_999,
            380,
            90.0,
            "The core nears perfection; a soul stirs inside it.",
        ),
        stage(
            "nascent_soul_early",
            "Nascent Soul (Early)",
            Phase::Cultivator,
            10,
            330_000,
            549_999,
            520,
            110.0,
            "An infant soul emerges from the shattered core.",
        ),
        stage(
            "nascent_soul_middle",
            "Nascent Soul (Middle)",
            Phase::Cultivator,
            11,
            550_000,
            899_999,
            700,
            130.0,
            "The nascent soul matures and learns to roam.",
        ),
        stage(
            "nascent_soul_late",
            "Nascent Soul (Late)",
            Phase::Cultivator,
            12,
            900_000,
            1_499_999,
            950,
            150.0,
            "Soul and body act as one; mortality loosens its grip.",
        ),
        stage(
            "spirit_transformation",
            "Spirit Transformation",
            Phase::Immortal,
            13,
            1_500_000,
            2_499_999,
            1_300,
            180.0,
            "The soul transforms, touching the laws of heaven.",
        ),
        stage(
            "void_refinement",
            "Void Refinement",
            Phase::Immortal,
            14,
            2_500_000,
            3_999_999,
            1_800,
            220.0,
            "The void itself becomes a medium for cultivation.",
        ),
        stage(
            "tribulation_transcendence",
            "Tribulation Transcendence",
            Phase::Immortal,
            15,
            4_000_000,
            6_499_999,
            2_500,
            270.0,
            "Heavenly tribulation looms; survive it and ascend.",
        ),
        stage(
            "true_immortal",
            "True Immortal",
            Phase::Immortal,
            16,
            6_500_000,
            99_999_999,
            3_500,
            330.0,
            "Beyond the ladder. There is no higher stage.",
        ),
    ]
}

/// Failure penalties per phase. Higher phases risk more on a failed
/// breakthrough.
pub fn builtin_penalties() -> HashMap<Phase, PhasePenalty> {
    let mut penalties = HashMap::new();
    penalties.insert(
        Phase::Mortal,
        PhasePenalty {
            cultivation_retained: 0.95,
            soul_strength_loss: 1,
            vitality_loss_fraction: None,
        },
    );
    penalties.insert(
        Phase::Cultivator,
        PhasePenalty {
            cultivation_retained: 0.90,
            soul_strength_loss: 5,
            vitality_loss_fraction: Some(0.01),
        },
    );
    penalties.insert(
        Phase::Immortal,
        PhasePenalty {
            cultivation_retained: 0.85,
            soul_strength_loss: 20,
            vitality_loss_fraction: Some(0.02),
        },
    );
    penalties
}

/// The validated builtin ladder.
pub fn builtin_ladder() -> StageLadder {
    StageLadder::new(builtin_stages(), builtin_penalties())
        .expect("builtin stage ladder is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stages_are_contiguous() {
        let stages = builtin_stages();
        for pair in stages.windows(2) {
            assert_eq!(
                pair[0].max_cultivation + 1,
                pair[1].min_cultivation,
                "gap between {} and {}",
                pair[0].id,
                pair[1].id
            );
        }
    }

    #[test]
    fn test_builtin_requirements_increase() {
        let stages = builtin_stages();
        for pair in stages.windows(2) {
            assert!(
                pair[0].requirements.soul_strength < pair[1].requirements.soul_strength,
                "soul strength requirement should grow from {} to {}",
                pair[0].id,
                pair[1].id
            );
        }
    }

    #[test]
    fn test_every_phase_has_penalty() {
        let penalties = builtin_penalties();
        for phase in Phase::all() {
            assert!(penalties.contains_key(&phase));
        }
    }

    #[test]
    fn test_mortal_phase_is_gentlest() {
        let penalties = builtin_penalties();
        let mortal = penalties[&Phase::Mortal];
        let immortal = penalties[&Phase::Immortal];
        assert!(mortal.cultivation_retained > immortal.cultivation_retained);
        assert!(mortal.soul_strength_loss < immortal.soul_strength_loss);
    }
}
