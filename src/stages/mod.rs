//! The stage ladder: realm/stage definitions, lookup, and validation.

mod data;
mod ladder;

pub use data::{builtin_ladder, builtin_penalties, builtin_stages};
pub use ladder::{
    BreakthroughRequirements, LadderConfigError, LadderError, Phase, PhasePenalty, Stage,
    StageConfig, StageLadder,
};
