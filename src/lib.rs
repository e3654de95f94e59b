// ABOUTME: Main library entry point for the Wellness Hub intelligence engine
// ABOUTME: Turns logged food consumption into 5x5x5 defense scores and next-action recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

#![deny(unsafe_code)]

//! # Wellness Intelligence
//!
//! Scoring and recommendation engine for defense-system nutrition tracking.
//! The engine converts raw food-consumption events into a normalized daily
//! coverage score across the five nutritional defense systems, caches that
//! score per user-day with explicit invalidation, and derives a deduplicated,
//! priority-ordered list of next-action recommendations from coverage gaps.
//!
//! ## Architecture
//!
//! - **Catalog**: fuzzy matching of free-text ingredients against the
//!   reference food catalog
//! - **Tracking**: consumption aggregation, 5x5x5 score composition, trend
//!   and streak analysis
//! - **Cache**: per-(user, day) score cache with explicit invalidation and a
//!   TTL safety net
//! - **Recommendations**: gap analysis, candidate synthesis, and the
//!   recommendation lifecycle state machine
//! - **Storage**: trait boundaries to the catalog, consumption log, and
//!   recommendation stores
//! - **Service**: the orchestrator request handlers talk to
//!
//! The engine returns plain data structures; HTTP shaping, authentication,
//! and rendering are the caller's responsibility.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wellness_intelligence::config::EngineConfig;
//! use wellness_intelligence::service::ScoringService;
//! use wellness_intelligence::storage::memory::{
//!     InMemoryCatalog, InMemoryConsumptionLog, InMemoryRecommendationStore,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EngineConfig::from_env();
//! let service = ScoringService::new(
//!     Arc::new(InMemoryCatalog::default()),
//!     Arc::new(InMemoryConsumptionLog::default()),
//!     Arc::new(InMemoryRecommendationStore::default()),
//!     config,
//! )
//! .await?;
//!
//! let user = uuid::Uuid::new_v4();
//! let today = chrono::Utc::now().date_naive();
//! let score = service.score_for_day(user, today).await?;
//! println!("overall: {}", score.overall_score);
//! # Ok(())
//! # }
//! ```

/// Per-(user, day) score cache with explicit invalidation
pub mod cache;

/// Reference food catalog access and ingredient matching
pub mod catalog;

/// Environment-based engine configuration
pub mod config;

/// Domain constants: 5x5x5 targets, tiers, TTLs, thresholds
pub mod constants;

/// Unified error handling (`AppError`, `ErrorCode`, `AppResult`)
pub mod errors;

/// Domain models: foods, consumption events, scores, recommendations
pub mod models;

/// Gap analysis, recommendation generation, and lifecycle management
pub mod recommendations;

/// Orchestration layer wiring tracking, cache, and recommendations together
pub mod service;

/// Trait boundaries to external stores, plus in-memory implementations
pub mod storage;

/// Consumption aggregation, score calculation, trend and streak analysis
pub mod tracking;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{
    BenefitStrength, CatalogFood, ConsumedFoodItem, ConsumptionEvent, DailyScore, DefenseSystem,
    MealTime, PerformanceTier, Recommendation, RecommendationPriority, RecommendationStatus,
    RecommendationType, SystemCoverage,
};
