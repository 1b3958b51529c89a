//! Ascend - Cultivation Idle RPG Library
//!
//! A progression engine for an idle cultivation simulator: characters
//! accumulate cultivation through a ladder of stages and advance by
//! probabilistic breakthrough attempts. All engine functions are pure and
//! take an injected random source so outcomes are reproducible in tests.

pub mod attributes;
pub mod character;
pub mod constants;
pub mod cultivation;
pub mod derived_stats;
pub mod events;
pub mod offline;
pub mod save_manager;
pub mod stages;
pub mod tick;
pub mod title;
