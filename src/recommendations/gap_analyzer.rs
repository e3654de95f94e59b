// ABOUTME: Identifies coverage gaps in a daily score: missing systems, weak systems, missed meals
// ABOUTME: Maps gap severity to recommendation priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use crate::constants::recommendations::{CRITICAL_GAP_FOOD_COUNT, HIGH_GAP_FOOD_COUNT_MAX};
use crate::constants::scoring::FOODS_PER_SYSTEM_TARGET;
use crate::models::{DailyScore, DefenseSystem, MealTime, RecommendationPriority};

/// One defense system below its daily food target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemGap {
    /// The under-covered system
    pub system: DefenseSystem,
    /// Distinct foods logged against it today
    pub unique_food_count: u32,
    /// How many more foods would close the gap
    pub foods_needed: u32,
}

impl SystemGap {
    /// Whether the system has no coverage at all
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.unique_food_count == 0
    }
}

/// Coverage gaps for one user-day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapAnalysis {
    /// Systems with zero foods, in canonical order
    pub missing_systems: Vec<SystemGap>,
    /// Systems with some but not enough foods, weakest first
    pub weak_systems: Vec<SystemGap>,
    /// Meal-time slots with no logged food, in chronological order
    pub missed_meal_times: Vec<MealTime>,
    /// The day's overall score the gaps were derived from
    pub overall_score: u8,
}

impl GapAnalysis {
    /// All gap systems, missing first then weak (weakest first)
    #[must_use]
    pub fn gap_systems(&self) -> Vec<SystemGap> {
        let mut gaps = self.missing_systems.clone();
        gaps.extend(self.weak_systems.iter().copied());
        gaps
    }

    /// Whether every system has reached its daily target
    #[must_use]
    pub fn fully_covered(&self) -> bool {
        self.missing_systems.is_empty() && self.weak_systems.is_empty()
    }

    /// Missed main meals (breakfast, lunch, dinner), in chronological order
    #[must_use]
    pub fn missed_main_meals(&self) -> Vec<MealTime> {
        self.missed_meal_times
            .iter()
            .copied()
            .filter(|slot| {
                matches!(slot, MealTime::Breakfast | MealTime::Lunch | MealTime::Dinner)
            })
            .collect()
    }
}

/// Identify coverage gaps in a daily score
///
/// A system with 0 foods is missing; 1..4 foods is weak; 5 or more is
/// complete and drives no recommendation. Weak systems are ordered weakest
/// first so the largest remaining gap is addressed first.
#[must_use]
pub fn analyze_gaps(score: &DailyScore) -> GapAnalysis {
    let mut missing_systems = Vec::new();
    let mut weak_systems = Vec::new();

    for coverage in &score.per_system_breakdown {
        if coverage.unique_food_count >= FOODS_PER_SYSTEM_TARGET {
            continue;
        }
        let gap = SystemGap {
            system: coverage.system,
            unique_food_count: coverage.unique_food_count,
            foods_needed: FOODS_PER_SYSTEM_TARGET - coverage.unique_food_count,
        };
        if gap.is_missing() {
            missing_systems.push(gap);
        } else {
            weak_systems.push(gap);
        }
    }

    weak_systems.sort_by_key(|gap| gap.unique_food_count);

    GapAnalysis {
        missing_systems,
        weak_systems,
        missed_meal_times: score.missed_meal_times.clone(),
        overall_score: score.overall_score,
    }
}

/// Priority for a gap system, from how far below target it is
///
/// Zero foods is critical, 1..=2 is high, 3..=4 is medium.
#[must_use]
pub const fn priority_for_gap(unique_food_count: u32) -> RecommendationPriority {
    if unique_food_count <= CRITICAL_GAP_FOOD_COUNT {
        RecommendationPriority::Critical
    } else if unique_food_count <= HIGH_GAP_FOOD_COUNT_MAX {
        RecommendationPriority::High
    } else {
        RecommendationPriority::Medium
    }
}
