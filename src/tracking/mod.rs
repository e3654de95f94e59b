// ABOUTME: Consumption aggregation, 5x5x5 score composition, and trend analysis
// ABOUTME: Pure computations over in-memory event data; safe under any concurrency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Tracking module
//!
//! Turns a day's consumption events into the three-dimensional 5x5x5 score
//! and analyzes multi-day sequences for trends and streaks. Everything here
//! is a pure, side-effect-free function over its inputs.

/// Per-system unique-food aggregation over a day's events
pub mod aggregator;
/// 5x5x5 score composition and performance tiering
pub mod calculator;
/// Trend direction, streaks, weekly summaries, and score comparison
pub mod trend;

pub use aggregator::{aggregate, ConsumptionAggregate};
pub use calculator::compute;
pub use trend::{
    analyze_trend, compare_scores, compute_streak, summarize_week, DatedScore, ScoreComparison,
    TrendDirection, WeeklySummary,
};
