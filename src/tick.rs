//! Per-tick orchestration.
//!
//! This is the layer that drives the pure engine: it runs one cultivation
//! step per second of ticks, applies results through the canonical
//! [`Character`] methods, records journal entries, and returns
//! [`TickEvent`]s for the presentation layer. Game logic never touches UI
//! types directly.

use crate::character::Character;
use crate::constants::TICKS_PER_SECOND;
use crate::cultivation::{
    cultivate, resolve_breakthrough, BreakthroughOutcome, BreakthroughPenalties,
    IneligibilityReason, RequirementResolver,
};
use crate::events::{Journal, LogDetails, LogKind};
use crate::stages::StageLadder;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single event produced by a game tick or a breakthrough attempt.
///
/// The presentation layer maps these to log panes and effects; the
/// `message` is ready for direct display.
#[derive(Debug, Clone)]
pub enum TickEvent {
    /// Cultivation advanced this second.
    CultivationGained {
        gained: u64,
        insight: bool,
        message: String,
    },

    /// Cultivation reached the stage ceiling; a breakthrough may be
    /// attempted.
    BreakthroughReady {
        stage_name: String,
        message: String,
    },

    /// A breakthrough attempt could not be made.
    BreakthroughBlocked {
        reasons: Vec<IneligibilityReason>,
        message: String,
    },

    /// A breakthrough attempt succeeded.
    BreakthroughSucceeded {
        new_stage_name: String,
        message: String,
    },

    /// A breakthrough attempt failed and penalties were applied.
    BreakthroughFailed {
        penalties: BreakthroughPenalties,
        message: String,
    },
}

/// Everything a tick produced. The caller renders events and decides
/// when to autosave.
#[derive(Debug, Default)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

/// The whole persisted session: one character, their journal, and the
/// bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub character: Character,
    pub journal: Journal,
    /// Unix timestamp of the last save, for offline-gain calculation.
    pub last_save_time: i64,
    pub play_time_seconds: u64,
    pub auto_cultivate: bool,
}

impl GameState {
    pub fn new(name: impl Into<String>, ladder: &StageLadder) -> Self {
        let character = Character::new(name, ladder);
        Self {
            character,
            journal: Journal::default(),
            last_save_time: chrono::Utc::now().timestamp(),
            play_time_seconds: 0,
            auto_cultivate: true,
        }
    }
}

/// Processes a single 100ms tick.
///
/// Ten ticks make a second; cultivation advances once per second. Pass a
/// seeded `rand_chacha::ChaCha8Rng` in tests for deterministic behavior.
pub fn game_tick<R: Rng>(
    state: &mut GameState,
    ladder: &StageLadder,
    tick_counter: &mut u32,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();

    *tick_counter += 1;
    if *tick_counter < TICKS_PER_SECOND {
        return result;
    }
    *tick_counter = 0;
    state.play_time_seconds += 1;

    if !state.auto_cultivate {
        return result;
    }

    let ceiling = state.character.current_stage(ladder).max_cultivation;
    let at_ceiling_before = state.character.base.cultivation >= ceiling;

    let gain = cultivate(&state.character, ladder, 1.0, rng);
    if gain.gained > 0 {
        state.character.apply_cultivation(&gain, ladder);
        state.character.touch();

        let kind = if gain.insight {
            LogKind::Insight
        } else {
            LogKind::Cultivate
        };
        let message = if gain.insight {
            format!(
                "Sudden insight! Gained {} cultivation (x1.5)",
                gain.gained
            )
        } else {
            format!("Gained {} cultivation", gain.gained)
        };
        state.journal.record(
            state.character.id,
            kind,
            message.clone(),
            LogDetails {
                cultivation_gained: Some(gain.gained),
                ..LogDetails::default()
            },
        );
        result.events.push(TickEvent::CultivationGained {
            gained: gain.gained,
            insight: gain.insight,
            message,
        });
    }

    // Announce the ceiling exactly once, on the second it is reached.
    if !at_ceiling_before && gain.new_cultivation >= ceiling {
        let stage = state.character.current_stage(ladder);
        result.events.push(TickEvent::BreakthroughReady {
            stage_name: stage.name.clone(),
            message: format!(
                "{} is saturated; a breakthrough may be attempted",
                stage.name
            ),
        });
    }

    result
}

/// Drives one breakthrough attempt and applies its outcome to the state.
pub fn attempt_breakthrough<R: Rng>(
    state: &mut GameState,
    ladder: &StageLadder,
    resolver: &impl RequirementResolver,
    rng: &mut R,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    let from_stage_name = state.character.current_stage(ladder).name.clone();

    match resolve_breakthrough(&state.character, ladder, resolver, rng) {
        BreakthroughOutcome::Ineligible(report) => {
            let listed = report
                .reasons
                .iter()
                .map(|reason| reason.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            events.push(TickEvent::BreakthroughBlocked {
                reasons: report.reasons,
                message: format!("Conditions not met: {}", listed),
            });
        }
        BreakthroughOutcome::Success { new_stage_id, .. } => {
            let Some(new_stage) = ladder.get(&new_stage_id) else {
                return events;
            };
            let new_stage = new_stage.clone();
            state.character.apply_breakthrough_success(&new_stage, ladder);
            state.character.touch();

            let message = format!("Breakthrough! Entered {}", new_stage.name);
            state.journal.record(
                state.character.id,
                LogKind::BreakthroughSuccess,
                message.clone(),
                LogDetails::default(),
            );
            state.journal.record(
                state.character.id,
                LogKind::StageChange,
                format!("{} -> {}", from_stage_name, new_stage.name),
                LogDetails {
                    stage_change: Some((from_stage_name, new_stage.name.clone())),
                    ..LogDetails::default()
                },
            );
            events.push(TickEvent::BreakthroughSucceeded {
                new_stage_name: new_stage.name,
                message,
            });
        }
        BreakthroughOutcome::Failure { penalties, .. } => {
            state.character.apply_breakthrough_failure(&penalties, ladder);
            state.character.touch();

            let message = format!(
                "Breakthrough failed: lost {} cultivation, {} soul strength",
                penalties.cultivation_loss, penalties.soul_strength_loss
            );
            state.journal.record(
                state.character.id,
                LogKind::BreakthroughFailure,
                message.clone(),
                LogDetails {
                    cultivation_lost: Some(penalties.cultivation_loss),
                    soul_strength_lost: Some(penalties.soul_strength_loss),
                    vitality_lost: penalties.vitality_loss,
                    ..LogDetails::default()
                },
            );
            events.push(TickEvent::BreakthroughFailed { penalties, message });
        }
    }

    events
}
