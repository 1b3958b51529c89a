//! Progress accumulation for one cultivation session.

use crate::character::Character;
use crate::constants::{
    BASE_GAIN_PER_UNIT, INSIGHT_CHANCE, INSIGHT_MULTIPLIER, INSIGHT_PROGRESS_THRESHOLD,
};
use crate::cultivation::speed::cultivation_speed;
use crate::stages::StageLadder;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of one accumulation step, applied by the caller through
/// [`Character::apply_cultivation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultivationGain {
    /// Cultivation after the step, clamped to the stage ceiling.
    pub new_cultivation: u64,
    /// Actual delta after clamping.
    pub gained: u64,
    /// Whether a sudden-epiphany bonus fired this step.
    pub insight: bool,
}

/// Accumulates cultivation for `elapsed_units` units of practice.
///
/// `gained = floor(base * units * speed/100 * insight multiplier)`,
/// clamped so the result never exceeds the current stage ceiling.
/// Advancement past the ceiling happens only through a breakthrough.
///
/// Insight is rolled only when the character is at least 90% through the
/// stage; below that band no randomness is drawn, keeping seeded replays
/// aligned.
pub fn cultivate<R: Rng>(
    character: &Character,
    ladder: &StageLadder,
    elapsed_units: f64,
    rng: &mut R,
) -> CultivationGain {
    let stage = character.current_stage(ladder);
    let cultivation = character.base.cultivation;

    let insight = stage.progress_fraction(cultivation) >= INSIGHT_PROGRESS_THRESHOLD
        && rng.gen_bool(INSIGHT_CHANCE);
    let multiplier = if insight { INSIGHT_MULTIPLIER } else { 1.0 };

    let speed = cultivation_speed(character) / 100.0;
    let gained = (BASE_GAIN_PER_UNIT * elapsed_units.max(0.0) * speed * multiplier).floor() as u64;

    let new_cultivation = cultivation
        .saturating_add(gained)
        .min(stage.max_cultivation);

    CultivationGain {
        new_cultivation,
        gained: new_cultivation - cultivation,
        insight,
    }
}
