// ABOUTME: Recommendation generation and expiry defaults
// ABOUTME: Stale advice is excluded from next-action selection after the expiry horizon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

/// Default hours after creation at which a recommendation expires
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Unique-food count at or below which a gap system is critical
pub const CRITICAL_GAP_FOOD_COUNT: u32 = 0;

/// Upper bound (inclusive) of the unique-food range mapped to high priority
pub const HIGH_GAP_FOOD_COUNT_MAX: u32 = 2;

/// Number of candidate foods surfaced in a food-suggestion recommendation
pub const FOOD_SUGGESTION_LIMIT: usize = 5;
