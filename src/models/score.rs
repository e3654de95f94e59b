// ABOUTME: Daily 5x5x5 score models: per-system coverage and performance tiers
// ABOUTME: Always derived from consumption events; never the source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use crate::constants::scoring::FOODS_PER_SYSTEM_TARGET;
use crate::models::food::{DefenseSystem, MealTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Performance tier, a step function of the overall score
///
/// Boundaries are inclusive on the lower bound, exclusive on the upper,
/// except Master which includes 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceTier {
    /// Overall score in [0, 20)
    Beginner,
    /// Overall score in [20, 40)
    Intermediate,
    /// Overall score in [40, 60)
    Advanced,
    /// Overall score in [60, 80)
    Expert,
    /// Overall score in [80, 100]
    Master,
}

impl PerformanceTier {
    /// Tier for an overall score in 0..=100
    #[must_use]
    pub const fn from_score(overall_score: u8) -> Self {
        match overall_score {
            0..=19 => Self::Beginner,
            20..=39 => Self::Intermediate,
            40..=59 => Self::Advanced,
            60..=79 => Self::Expert,
            _ => Self::Master,
        }
    }
}

/// Per-system coverage detail within a daily score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCoverage {
    /// Defense system this entry covers
    pub system: DefenseSystem,
    /// Distinct foods logged against this system today
    pub unique_food_count: u32,
    /// `min(unique_food_count / 5, 1) * 100`, a display value
    pub coverage_percent: u8,
    /// The distinct (case-folded) food names behind the count
    pub unique_foods: BTreeSet<String>,
}

impl SystemCoverage {
    /// Coverage percentage for a unique-food count, capped at 100
    #[must_use]
    pub fn percent_for_count(unique_food_count: u32) -> u8 {
        let capped = unique_food_count.min(FOODS_PER_SYSTEM_TARGET);
        ((capped * 100) / FOODS_PER_SYSTEM_TARGET) as u8
    }

    /// Whether this system has reached its daily 5-food target
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unique_food_count >= FOODS_PER_SYSTEM_TARGET
    }
}

/// Computed 5x5x5 coverage score for one user-day
///
/// A derived, cacheable value: recomputable at any time from the day's
/// consumption events and destroyed (not marked stale) on invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScore {
    /// Rounded mean of the three dimension scores, 0..=100
    pub overall_score: u8,
    /// Breadth: share of the five systems with at least one food, 0..=100
    pub system_score: u8,
    /// Depth: capped per-system food counts against the 25-point target, 0..=100
    pub food_score: u8,
    /// Spread: share of the five meal times logged, 0..=100
    pub frequency_score: u8,
    /// Step-function tier of the overall score
    pub performance_tier: PerformanceTier,
    /// Per-system detail, in canonical system order, always five entries
    pub per_system_breakdown: Vec<SystemCoverage>,
    /// Meal-time slots with no logged food today, in chronological order
    pub missed_meal_times: Vec<MealTime>,
}

impl DailyScore {
    /// Coverage entry for one system
    #[must_use]
    pub fn coverage_for(&self, system: DefenseSystem) -> Option<&SystemCoverage> {
        self.per_system_breakdown
            .iter()
            .find(|c| c.system == system)
    }

    /// Systems that have reached the daily 5-food target
    #[must_use]
    pub fn completed_systems(&self) -> Vec<DefenseSystem> {
        self.per_system_breakdown
            .iter()
            .filter(|c| c.is_complete())
            .map(|c| c.system)
            .collect()
    }
}
