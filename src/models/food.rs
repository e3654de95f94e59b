// ABOUTME: Food and consumption models: defense systems, benefit strengths, meal times
// ABOUTME: Catalog entries, consumed items, and logged consumption events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// The five nutritional defense systems a food can support
///
/// This is a closed enum: exactly five values, never extended at runtime.
/// Keeping it closed gives compile-time exhaustiveness checking everywhere
/// systems are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefenseSystem {
    /// Blood vessel formation and regulation
    Angiogenesis,
    /// Stem cell driven tissue repair
    Regeneration,
    /// Gut bacteria health
    Microbiome,
    /// DNA repair and protection
    DnaProtection,
    /// Immune system function
    Immunity,
}

impl DefenseSystem {
    /// All five systems, in canonical order
    pub const ALL: [Self; 5] = [
        Self::Angiogenesis,
        Self::Regeneration,
        Self::Microbiome,
        Self::DnaProtection,
        Self::Immunity,
    ];
}

impl fmt::Display for DefenseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Angiogenesis => "ANGIOGENESIS",
            Self::Regeneration => "REGENERATION",
            Self::Microbiome => "MICROBIOME",
            Self::DnaProtection => "DNA_PROTECTION",
            Self::Immunity => "IMMUNITY",
        };
        write!(f, "{name}")
    }
}

/// Qualitative benefit strength of a food for a defense system
///
/// Ordinal, used for display and recommendation priority only. Score
/// arithmetic counts presence, not strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenefitStrength {
    /// Minor supporting evidence
    Low,
    /// Moderate supporting evidence
    Medium,
    /// Strong supporting evidence
    High,
}

/// The five fixed meal-time slots in a day
///
/// Declaration order is chronological; the derived `Ord` is used to sort
/// events within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealTime {
    /// First meal of the day
    Breakfast,
    /// Mid-morning snack
    MorningSnack,
    /// Midday meal
    Lunch,
    /// Mid-afternoon snack
    AfternoonSnack,
    /// Evening meal
    Dinner,
}

impl MealTime {
    /// All five slots, in chronological order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::MorningSnack,
        Self::Lunch,
        Self::AfternoonSnack,
        Self::Dinner,
    ];
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Breakfast => "BREAKFAST",
            Self::MorningSnack => "MORNING_SNACK",
            Self::Lunch => "LUNCH",
            Self::AfternoonSnack => "AFTERNOON_SNACK",
            Self::Dinner => "DINNER",
        };
        write!(f, "{name}")
    }
}

/// A (system, strength) pair attributed to a food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemBenefit {
    /// Defense system the food benefits
    pub system: DefenseSystem,
    /// How strongly the food supports that system
    pub strength: BenefitStrength,
}

/// A canonical food known to the reference catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFood {
    /// Canonical food name (e.g. "tomato")
    pub name: String,
    /// Food category (e.g. "vegetable")
    pub category: String,
    /// Benefit strength per defense system; keys are a subset of the five systems
    pub system_benefits: BTreeMap<DefenseSystem, BenefitStrength>,
}

impl CatalogFood {
    /// Benefits of this food as (system, strength) pairs, in canonical system order
    #[must_use]
    pub fn benefits(&self) -> Vec<SystemBenefit> {
        self.system_benefits
            .iter()
            .map(|(&system, &strength)| SystemBenefit { system, strength })
            .collect()
    }

    /// Whether this food benefits the given system
    #[must_use]
    pub fn benefits_system(&self, system: DefenseSystem) -> bool {
        self.system_benefits.contains_key(&system)
    }
}

/// One food within a logged meal
///
/// `benefits` are resolved once at log time and persisted with the item, so
/// later catalog changes do not retroactively alter past scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumedFoodItem {
    /// Food name as logged
    pub name: String,
    /// Logged quantity, if any (scoring is presence-based and ignores it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Unit for the quantity, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Defense-system benefits resolved at log time
    pub benefits: Vec<SystemBenefit>,
}

impl ConsumedFoodItem {
    /// Create an item with benefits and no quantity information
    #[must_use]
    pub fn new(name: impl Into<String>, benefits: Vec<SystemBenefit>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
            benefits,
        }
    }
}

/// One logged meal occurrence for a user
///
/// `date` is a calendar day, not an instant; callers normalize to the user's
/// local day before persisting. Events are immutable once created — edits and
/// deletes happen upstream and must trigger score-cache invalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day the meal belongs to
    pub date: NaiveDate,
    /// Which of the five slots the meal was eaten at
    pub meal_time: MealTime,
    /// Foods eaten at this meal
    pub items: Vec<ConsumedFoodItem>,
}
