// ABOUTME: 5x5x5 scoring targets and trend/streak analysis thresholds
// ABOUTME: Named constants to eliminate magic numbers in score composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

/// Number of defense systems (fixed by the domain, never extended at runtime)
pub const DEFENSE_SYSTEM_COUNT: u32 = 5;

/// Daily unique-food target within each defense system
pub const FOODS_PER_SYSTEM_TARGET: u32 = 5;

/// Number of meal-time slots in a day
pub const MEAL_TIMES_PER_DAY: u32 = 5;

/// Maximum capped food points across all systems (5 systems x 5 foods)
pub const MAX_FOOD_POINTS: u32 = DEFENSE_SYSTEM_COUNT * FOODS_PER_SYSTEM_TARGET;

/// Default margin, in score points, by which the later-half mean must differ
/// from the earlier-half mean before a trend counts as improving/declining
pub const DEFAULT_TREND_THRESHOLD: f64 = 5.0;

/// Default overall score a day must reach to extend a streak
pub const DEFAULT_STREAK_QUALIFYING_SCORE: u8 = 70;
