//! Character titles and their attribute bonuses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TitleCategory {
    Sect,
    World,
    Achievement,
    Special,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TitleRank {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Flat bonuses a title grants while worn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TitleBonuses {
    /// Added to the cultivation speed percentage.
    pub cultivation_speed: f64,
    pub attack: u32,
    pub defense: u32,
}

/// Conditions to earn a title. Checked by the presentation layer, not
/// the engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TitleRequirements {
    pub level: u32,
    pub reputation: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TitleCategory,
    pub rank: TitleRank,
    pub bonuses: TitleBonuses,
    pub requirements: TitleRequirements,
}

/// A small builtin title set.
pub fn builtin_titles() -> Vec<Title> {
    vec![
        Title {
            id: "outer_disciple".to_string(),
            name: "Outer Disciple".to_string(),
            description: "Accepted into a sect's outer court.".to_string(),
            category: TitleCategory::Sect,
            rank: TitleRank::Common,
            bonuses: TitleBonuses {
                cultivation_speed: 5.0,
                attack: 0,
                defense: 0,
            },
            requirements: TitleRequirements {
                level: 5,
                reputation: 100,
            },
        },
        Title {
            id: "inner_disciple".to_string(),
            name: "Inner Disciple".to_string(),
            description: "Proven worth; granted access to the inner halls.".to_string(),
            category: TitleCategory::Sect,
            rank: TitleRank::Rare,
            bonuses: TitleBonuses {
                cultivation_speed: 15.0,
                attack: 5,
                defense: 5,
            },
            requirements: TitleRequirements {
                level: 20,
                reputation: 1_000,
            },
        },
        Title {
            id: "sword_saint".to_string(),
            name: "Sword Saint".to_string(),
            description: "A name spoken with awe across the nine provinces.".to_string(),
            category: TitleCategory::World,
            rank: TitleRank::Legendary,
            bonuses: TitleBonuses {
                cultivation_speed: 40.0,
                attack: 50,
                defense: 20,
            },
            requirements: TitleRequirements {
                level: 60,
                reputation: 50_000,
            },
        },
    ]
}
