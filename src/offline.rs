//! Offline progression.
//!
//! Cultivation continues while the player is away, at a reduced rate and
//! capped at seven days. Insight never fires offline, so the calculation
//! is fully deterministic; the stage ceiling still applies.

use crate::constants::{BASE_GAIN_PER_UNIT, MAX_OFFLINE_SECONDS, OFFLINE_MULTIPLIER};
use crate::cultivation::{cultivation_speed, CultivationGain};
use crate::events::{LogDetails, LogKind};
use crate::stages::StageLadder;
use crate::tick::GameState;
use chrono::Utc;

/// Report of offline progression results.
#[derive(Debug, Default, Clone)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    pub capped_seconds: i64,
    pub cultivation_gained: u64,
    pub cultivation_before: u64,
    pub cultivation_after: u64,
    /// Effective offline rate as a percentage of the online rate.
    pub offline_rate_percent: f64,
}

/// Cultivation earned over `elapsed_seconds` away, before the stage
/// ceiling clamp. One online second is one cultivation unit.
pub fn calculate_offline_gain(
    character: &crate::character::Character,
    elapsed_seconds: i64,
) -> u64 {
    let capped_seconds = elapsed_seconds.clamp(0, MAX_OFFLINE_SECONDS);
    let units = capped_seconds as f64 * OFFLINE_MULTIPLIER;
    let speed = cultivation_speed(character) / 100.0;
    (BASE_GAIN_PER_UNIT * units * speed).floor() as u64
}

/// Applies offline gains accrued since `last_save_time` and syncs the
/// bookkeeping timestamps to now.
pub fn process_offline_progression(state: &mut GameState, ladder: &StageLadder) -> OfflineReport {
    let now = Utc::now().timestamp();
    let elapsed_seconds = now - state.last_save_time;
    if elapsed_seconds <= 0 {
        return OfflineReport::default();
    }

    let cultivation_before = state.character.base.cultivation;
    let ceiling = state.character.current_stage(ladder).max_cultivation;
    let raw_gain = calculate_offline_gain(&state.character, elapsed_seconds);
    let new_cultivation = cultivation_before.saturating_add(raw_gain).min(ceiling);

    let gain = CultivationGain {
        new_cultivation,
        gained: new_cultivation - cultivation_before,
        insight: false,
    };
    state.character.apply_cultivation(&gain, ladder);
    state.character.touch();
    state.last_save_time = now;

    if gain.gained > 0 {
        state.journal.record(
            state.character.id,
            LogKind::Cultivate,
            format!(
                "Gained {} cultivation while away ({}s)",
                gain.gained,
                elapsed_seconds.min(MAX_OFFLINE_SECONDS)
            ),
            LogDetails {
                cultivation_gained: Some(gain.gained),
                ..LogDetails::default()
            },
        );
    }

    OfflineReport {
        elapsed_seconds,
        capped_seconds: elapsed_seconds.min(MAX_OFFLINE_SECONDS),
        cultivation_gained: gain.gained,
        cultivation_before,
        cultivation_after: new_cultivation,
        offline_rate_percent: OFFLINE_MULTIPLIER * 100.0,
    }
}
