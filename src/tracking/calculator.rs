// ABOUTME: Composes the three-dimensional 5x5x5 daily score from aggregated consumption
// ABOUTME: Breadth across systems, capped depth within each, and meal-time spread
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use super::aggregator::ConsumptionAggregate;
use crate::constants::scoring::{
    DEFENSE_SYSTEM_COUNT, FOODS_PER_SYSTEM_TARGET, MAX_FOOD_POINTS, MEAL_TIMES_PER_DAY,
};
use crate::models::{DailyScore, DefenseSystem, MealTime, PerformanceTier, SystemCoverage};

/// Compute the daily 5x5x5 score from an aggregate
///
/// Three independent dimensions, each 0..=100:
/// - `system_score` rewards breadth: systems with at least one unique food.
/// - `food_score` rewards depth: per-system unique-food counts, capped at the
///   5-food target before summing so over-eating one system cannot
///   compensate for ignoring another.
/// - `frequency_score` rewards spread: distinct meal times logged.
///
/// The overall score is the rounded arithmetic mean of the three. Zero
/// consumption yields all-zero scores and the Beginner tier, not an error.
/// Pure and idempotent over its input.
#[must_use]
pub fn compute(aggregate: &ConsumptionAggregate) -> DailyScore {
    let covered_systems = aggregate.covered_system_count();
    let system_score = (covered_systems * 100 / DEFENSE_SYSTEM_COUNT) as u8;

    let capped_food_points: u32 = DefenseSystem::ALL
        .iter()
        .map(|&system| {
            aggregate
                .unique_food_count(system)
                .min(FOODS_PER_SYSTEM_TARGET)
        })
        .sum();
    let food_score = (capped_food_points * 100 / MAX_FOOD_POINTS) as u8;

    let meal_times_logged = aggregate.meal_times_present.len() as u32;
    let frequency_score =
        (meal_times_logged.min(MEAL_TIMES_PER_DAY) * 100 / MEAL_TIMES_PER_DAY) as u8;

    // Equal-weight mean of the three dimensions, rounded to nearest integer
    let overall_score = ((f64::from(system_score)
        + f64::from(food_score)
        + f64::from(frequency_score))
        / 3.0)
        .round() as u8;

    let per_system_breakdown = DefenseSystem::ALL
        .iter()
        .map(|&system| {
            let unique_foods = aggregate
                .per_system_unique_foods
                .get(&system)
                .cloned()
                .unwrap_or_default();
            let unique_food_count = unique_foods.len() as u32;
            SystemCoverage {
                system,
                unique_food_count,
                coverage_percent: SystemCoverage::percent_for_count(unique_food_count),
                unique_foods,
            }
        })
        .collect();

    let missed_meal_times = MealTime::ALL
        .iter()
        .copied()
        .filter(|slot| !aggregate.meal_times_present.contains(slot))
        .collect();

    DailyScore {
        overall_score,
        system_score,
        food_score,
        frequency_score,
        performance_tier: PerformanceTier::from_score(overall_score),
        per_system_breakdown,
        missed_meal_times,
    }
}
