//! Stage types and the validated [`StageLadder`].
//!
//! A ladder is an ordered, contiguous list of stages covering every
//! cultivation value from zero upward. Construction validates the whole
//! table; a malformed ladder is a configuration error and the ladder
//! refuses to exist, so runtime lookups are total.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Coarse grouping of stages sharing a failure-penalty profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Mortal,
    Cultivator,
    Immortal,
}

impl Phase {
    pub fn all() -> [Phase; 3] {
        [Phase::Mortal, Phase::Cultivator, Phase::Immortal]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Mortal => "mortal",
            Phase::Cultivator => "cultivator",
            Phase::Immortal => "immortal",
        }
    }
}

/// What a character must satisfy to enter a stage.
///
/// `items` and `tasks` are opaque identifiers resolved by an external
/// collaborator; the engine only echoes the unmet ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakthroughRequirements {
    pub soul_strength: u32,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// A single rung of the progression ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub phase: Phase,
    /// 0-based position in the ladder.
    pub level: u32,
    /// Inclusive cultivation bounds owned by this stage.
    pub min_cultivation: u64,
    pub max_cultivation: u64,
    /// Requirements to enter this stage from the one below it.
    pub requirements: BreakthroughRequirements,
    /// Multiplicative bonus on base combat attributes while in this stage.
    pub attribute_bonus_percent: f64,
    #[serde(default)]
    pub skill_points: u32,
    #[serde(default)]
    pub description: String,
}

impl Stage {
    pub fn contains(&self, cultivation: u64) -> bool {
        cultivation >= self.min_cultivation && cultivation <= self.max_cultivation
    }

    /// How far through this stage a cultivation value is, in `0.0..=1.0`.
    pub fn progress_fraction(&self, cultivation: u64) -> f64 {
        if cultivation <= self.min_cultivation {
            return 0.0;
        }
        if cultivation >= self.max_cultivation {
            return 1.0;
        }
        let span = (self.max_cultivation - self.min_cultivation) as f64;
        (cultivation - self.min_cultivation) as f64 / span
    }
}

/// Penalty profile applied when a breakthrough fails, keyed by [`Phase`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhasePenalty {
    /// Fraction of the stage ceiling kept; the rest is lost on failure.
    pub cultivation_retained: f64,
    /// Flat soul strength loss.
    pub soul_strength_loss: u32,
    /// Optional vitality loss, as a fraction of the stage ceiling.
    #[serde(default)]
    pub vitality_loss_fraction: Option<f64>,
}

/// Integrity violations found while constructing a [`StageLadder`].
///
/// These are fatal: the caller gets no ladder and must fix its config.
#[derive(Debug, Error)]
pub enum LadderError {
    #[error("stage ladder is empty")]
    Empty,
    #[error("ladder does not start at zero (first stage min is {0})")]
    NonZeroStart(u64),
    #[error("stage {id:?} has min {min} greater than max {max}")]
    InvalidBounds { id: String, min: u64, max: u64 },
    #[error("stage {id:?} has level {level}, expected {expected}")]
    OutOfOrder { id: String, level: u32, expected: u32 },
    #[error("gap between {prev:?} (max {prev_max}) and {next:?} (min {next_min})")]
    Discontinuous {
        prev: String,
        prev_max: u64,
        next: String,
        next_min: u64,
    },
    #[error("duplicate stage id {0:?}")]
    DuplicateId(String),
    #[error("no failure penalty profile for phase {0:?}")]
    MissingPenalty(&'static str),
    #[error("unknown stage id {0:?}")]
    UnknownStage(String),
}

/// Errors from loading a ladder out of a JSON config document.
#[derive(Debug, Error)]
pub enum LadderConfigError {
    #[error("malformed stage config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] LadderError),
}

/// The on-disk shape of a stage config document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub stages: Vec<Stage>,
    pub failure_penalties: HashMap<Phase, PhasePenalty>,
}

/// A validated, ordered stage ladder plus its failure-penalty table.
#[derive(Debug, Clone)]
pub struct StageLadder {
    stages: Vec<Stage>,
    penalties: HashMap<Phase, PhasePenalty>,
}

impl StageLadder {
    /// Validates and wraps a stage table. See [`LadderError`] for the
    /// integrity rules.
    pub fn new(
        stages: Vec<Stage>,
        penalties: HashMap<Phase, PhasePenalty>,
    ) -> Result<Self, LadderError> {
        if stages.is_empty() {
            return Err(LadderError::Empty);
        }
        if stages[0].min_cultivation != 0 {
            return Err(LadderError::NonZeroStart(stages[0].min_cultivation));
        }

        let mut seen_ids = HashSet::new();
        for (position, stage) in stages.iter().enumerate() {
            if !seen_ids.insert(stage.id.clone()) {
                return Err(LadderError::DuplicateId(stage.id.clone()));
            }
            if stage.min_cultivation > stage.max_cultivation {
                return Err(LadderError::InvalidBounds {
                    id: stage.id.clone(),
                    min: stage.min_cultivation,
                    max: stage.max_cultivation,
                });
            }
            if stage.level as usize != position {
                return Err(LadderError::OutOfOrder {
                    id: stage.id.clone(),
                    level: stage.level,
                    expected: position as u32,
                });
            }
            if position > 0 {
                let prev = &stages[position - 1];
                if prev.max_cultivation + 1 != stage.min_cultivation {
                    return Err(LadderError::Discontinuous {
                        prev: prev.id.clone(),
                        prev_max: prev.max_cultivation,
                        next: stage.id.clone(),
                        next_min: stage.min_cultivation,
                    });
                }
            }
            if !penalties.contains_key(&stage.phase) {
                return Err(LadderError::MissingPenalty(stage.phase.name()));
            }
        }

        Ok(Self { stages, penalties })
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(document: &str) -> Result<Self, LadderConfigError> {
        let config: StageConfig = serde_json::from_str(document)?;
        Ok(Self::new(config.stages, config.failure_penalties)?)
    }

    /// The stage whose bounds contain `cultivation`.
    ///
    /// Values beyond the terminal stage's ceiling clamp to the terminal
    /// stage, so the lookup is total for any input.
    pub fn stage_for(&self, cultivation: u64) -> &Stage {
        let count = self
            .stages
            .partition_point(|stage| stage.min_cultivation <= cultivation);
        let index = count.saturating_sub(1).min(self.stages.len() - 1);
        &self.stages[index]
    }

    pub fn get(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    /// Like [`StageLadder::get`], but an unknown id is a typed rejection
    /// instead of a silent `None`, for callers holding ids from outside.
    pub fn require(&self, id: &str) -> Result<&Stage, LadderError> {
        self.get(id)
            .ok_or_else(|| LadderError::UnknownStage(id.to_string()))
    }

    /// The stage one rung above, or `None` for the terminal stage.
    pub fn next_stage(&self, stage: &Stage) -> Option<&Stage> {
        self.stages.get(stage.level as usize + 1)
    }

    pub fn is_terminal(&self, stage: &Stage) -> bool {
        stage.level as usize == self.stages.len() - 1
    }

    /// The failure-penalty profile for a phase. Total after validation:
    /// every phase appearing in the ladder has an entry.
    pub fn penalty_for(&self, phase: Phase) -> &PhasePenalty {
        &self.penalties[&phase]
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &Stage> {
        self.stages.iter().filter(move |stage| stage.phase == phase)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
