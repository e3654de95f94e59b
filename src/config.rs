// ABOUTME: Environment-based engine configuration with sensible defaults
// ABOUTME: Tunables for cache sizing/TTL, trend and streak thresholds, and expiry horizons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Engine configuration
//!
//! All tunables are read from environment variables with defaults from
//! `constants`. The 5x5x5 targets themselves are fixed domain constants and
//! deliberately not configurable.

use crate::cache::CacheConfig;
use crate::constants::recommendations::DEFAULT_EXPIRY_HOURS;
use crate::constants::scoring::{DEFAULT_STREAK_QUALIFYING_SCORE, DEFAULT_TREND_THRESHOLD};
use std::env;

/// Top-level engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Score cache configuration
    pub cache: CacheConfig,
    /// Margin, in score points, before a trend counts as improving/declining
    pub trend_threshold: f64,
    /// Overall score a day must reach to extend a streak
    pub streak_qualifying_score: u8,
    /// Hours after creation at which recommendations expire
    pub recommendation_expiry_hours: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            streak_qualifying_score: DEFAULT_STREAK_QUALIFYING_SCORE,
            recommendation_expiry_hours: DEFAULT_EXPIRY_HOURS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Recognized variables: `SCORE_CACHE_MAX_ENTRIES`, `SCORE_CACHE_TTL_SECS`,
    /// `SCORE_CACHE_CLEANUP_INTERVAL_SECS`, `TREND_THRESHOLD`,
    /// `STREAK_QUALIFYING_SCORE`, `RECOMMENDATION_EXPIRY_HOURS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache: CacheConfig::from_env(),
            trend_threshold: env_parsed("TREND_THRESHOLD", defaults.trend_threshold),
            streak_qualifying_score: env_parsed(
                "STREAK_QUALIFYING_SCORE",
                defaults.streak_qualifying_score,
            ),
            recommendation_expiry_hours: env_parsed(
                "RECOMMENDATION_EXPIRY_HOURS",
                defaults.recommendation_expiry_hours,
            ),
        }
    }
}

/// Parse an environment variable, falling back to a default and logging when
/// a set value fails to parse
fn env_parsed<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {name}={raw}, using default");
            default
        }),
        Err(_) => default,
    }
}
