//! The character record and its canonical progression mutations.
//!
//! All progression state changes go through the `apply_*` methods here.
//! The engine functions in [`crate::cultivation`] are pure; they compute
//! a result and the caller applies it through exactly one of these
//! methods, which also refresh the cached stage id. Nothing else may set
//! the stage id directly.

use crate::attributes::Affinities;
use crate::cultivation::breakthrough::BreakthroughPenalties;
use crate::cultivation::session::CultivationGain;
use crate::stages::{Stage, StageLadder};
use crate::title::Title;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub gold: u64,
    pub spirit_stones: u64,
    pub contribution: u64,
}

/// Base attributes owned by a single character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseAttributes {
    pub level: u32,
    /// Accumulated cultivation; always within the bounds of exactly one
    /// stage of the ladder.
    pub cultivation: u64,
    /// Gates breakthrough eligibility and chance; reduced on failure.
    pub soul_strength: u32,
    /// Feeds the speed and chance formulas.
    pub physique: u32,
    /// Reduced on failed breakthroughs in the harsher phases. Floors at 0.
    pub vitality: u32,
    pub affinities: Affinities,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub spirit: u32,
    pub max_spirit: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub crit_rate: f64,
    pub dodge_rate: f64,
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self {
            level: 1,
            cultivation: 0,
            soul_strength: 10,
            physique: 10,
            vitality: 100,
            affinities: Affinities::new(),
            health: 100,
            max_health: 100,
            mana: 50,
            max_mana: 50,
            spirit: 30,
            max_spirit: 30,
            attack: 10,
            defense: 5,
            speed: 10,
            crit_rate: 5.0,
            dodge_rate: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub base: BaseAttributes,
    pub title: Option<Title>,
    pub reputation: i64,
    pub currency: Currency,
    /// Unix timestamp of the last progression event, used for offline gains.
    pub last_active: i64,
    /// Cached id of the stage containing `base.cultivation`. Recomputed by
    /// every mutation method, never set from outside.
    stage_id: String,
}

impl Character {
    /// Creates a character at stage-zero defaults.
    pub fn new(name: impl Into<String>, ladder: &StageLadder) -> Self {
        let base = BaseAttributes::default();
        let stage_id = ladder.stage_for(base.cultivation).id.clone();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            base,
            title: None,
            reputation: 0,
            currency: Currency::default(),
            last_active: Utc::now().timestamp(),
            stage_id,
        }
    }

    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    /// The stage whose bounds contain the current cultivation value.
    pub fn current_stage<'a>(&self, ladder: &'a StageLadder) -> &'a Stage {
        ladder.stage_for(self.base.cultivation)
    }

    fn sync_stage(&mut self, ladder: &StageLadder) {
        let stage = ladder.stage_for(self.base.cultivation);
        if self.stage_id != stage.id {
            self.stage_id = stage.id.clone();
        }
    }

    /// Applies the result of [`crate::cultivation::cultivate`].
    pub fn apply_cultivation(&mut self, gain: &CultivationGain, ladder: &StageLadder) {
        self.base.cultivation = gain.new_cultivation;
        self.sync_stage(ladder);
    }

    /// Applies a successful breakthrough: cultivation resets to the floor
    /// of the new stage.
    pub fn apply_breakthrough_success(&mut self, new_stage: &Stage, ladder: &StageLadder) {
        self.base.cultivation = new_stage.min_cultivation;
        self.base.level = self.base.level.saturating_add(1);
        self.sync_stage(ladder);
    }

    /// Applies failure penalties. Every attribute floors at zero.
    pub fn apply_breakthrough_failure(
        &mut self,
        penalties: &BreakthroughPenalties,
        ladder: &StageLadder,
    ) {
        self.base.cultivation = self.base.cultivation.saturating_sub(penalties.cultivation_loss);
        self.base.soul_strength = self
            .base
            .soul_strength
            .saturating_sub(penalties.soul_strength_loss);
        if let Some(vitality_loss) = penalties.vitality_loss {
            self.base.vitality = self.base.vitality.saturating_sub(vitality_loss);
        }
        self.sync_stage(ladder);
    }

    /// Records activity now, for offline-gain bookkeeping.
    pub fn touch(&mut self) {
        self.last_active = Utc::now().timestamp();
    }
}
