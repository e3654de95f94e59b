// ABOUTME: Gap analysis, recommendation generation, and lifecycle management
// ABOUTME: At most one live recommendation per (system, type); strict status transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Recommendations module
//!
//! Inspects coverage gaps in a freshly computed daily score and produces a
//! deduplicated, priority-ordered list of next actions. Lifecycle status
//! moves only through the state machine; invalid transitions fail rather
//! than silently succeeding.

/// Recommendation candidate synthesis, dedup, selection, and lifecycle
pub mod engine;
/// Missing/weak system and missed-meal gap analysis
pub mod gap_analyzer;

pub use engine::{recommend_foods, FoodCandidate, GenerationContext, RecommendationEngine};
pub use gap_analyzer::{analyze_gaps, priority_for_gap, GapAnalysis, SystemGap};
