// ABOUTME: Domain models for defense-system nutrition tracking
// ABOUTME: Foods and consumption events, daily scores, and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Domain models
//!
//! Plain serde-derived data structures shared across the engine. These carry
//! no formatting, localization, or transport concerns.

/// Foods, benefits, meal times, and consumption events
pub mod food;
/// Recommendations and their lifecycle status
pub mod recommendation;
/// Daily 5x5x5 scores and performance tiers
pub mod score;

pub use food::{
    BenefitStrength, CatalogFood, ConsumedFoodItem, ConsumptionEvent, DefenseSystem, MealTime,
    SystemBenefit,
};
pub use recommendation::{
    Recommendation, RecommendationPriority, RecommendationStatus, RecommendationType,
};
pub use score::{DailyScore, PerformanceTier, SystemCoverage};
