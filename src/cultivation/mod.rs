//! The cultivation progression engine.
//!
//! Pure functions over a character snapshot and the stage ladder. Every
//! probabilistic decision draws from an injected `rand::Rng`; nothing in
//! here mutates a character or touches persistence. Callers apply the
//! returned results through the canonical methods on
//! [`crate::character::Character`].

pub mod breakthrough;
pub mod session;
pub mod speed;

pub use breakthrough::{
    check_eligibility, resolve_breakthrough, AllRequirementsMet, BreakthroughOutcome,
    BreakthroughPenalties, EligibilityReport, IneligibilityReason, RequirementResolver,
};
pub use session::{cultivate, CultivationGain};
pub use speed::{breakthrough_chance, cultivation_speed};
