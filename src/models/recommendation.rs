// ABOUTME: Recommendation model with type, priority, and lifecycle status
// ABOUTME: Status transitions follow a strict state machine; violations are errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use crate::models::food::DefenseSystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of next action a recommendation proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    /// Add specific foods from the catalog
    FoodSuggestion,
    /// Cook a recipe targeting a system
    Recipe,
    /// Build a multi-day meal plan
    MealPlan,
    /// Complete a step of the daily logging workflow (e.g. a missed meal)
    WorkflowStep,
}

/// Recommendation urgency, derived from how far a system is below target
///
/// Declared in ascending order so the derived `Ord` ranks `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationPriority {
    /// Nice to have
    Low,
    /// System is close to target
    Medium,
    /// System has little coverage
    High,
    /// System has no coverage at all
    Critical,
}

/// Lifecycle status of a recommendation
///
/// ```text
/// PENDING --accept--> ACTED_ON --mark_shopped--> SHOPPED --complete--> COMPLETED
/// PENDING | ACTED_ON | SHOPPED --dismiss--> DISMISSED
/// ACTED_ON --complete--> COMPLETED   (recipe-only flow skips shopping)
/// ```
///
/// `Completed` and `Dismissed` are terminal. Monotonic progression protects
/// downstream analytics; invalid transitions fail rather than silently
/// succeeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationStatus {
    /// Generated, awaiting user action
    Pending,
    /// User accepted and started acting on it
    ActedOn,
    /// Ingredients purchased
    Shopped,
    /// Fully carried out
    Completed,
    /// Rejected by the user
    Dismissed,
}

impl RecommendationStatus {
    /// Whether a caller-invoked transition from `self` to `next` is allowed
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::ActedOn)
                | (Self::ActedOn, Self::Shopped)
                | (Self::ActedOn | Self::Shopped, Self::Completed)
                | (Self::Pending | Self::ActedOn | Self::Shopped, Self::Dismissed)
        )
    }

    /// Whether this status accepts no further transitions
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Dismissed)
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::ActedOn => "ACTED_ON",
            Self::Shopped => "SHOPPED",
            Self::Completed => "COMPLETED",
            Self::Dismissed => "DISMISSED",
        };
        write!(f, "{name}")
    }
}

/// A suggested next action derived from coverage gaps
///
/// Uniqueness is enforced by `(target_system, rec_type)` at generation time:
/// at most one live recommendation per system per type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Kind of action proposed
    pub rec_type: RecommendationType,
    /// Urgency derived from gap severity
    pub priority: RecommendationPriority,
    /// Lifecycle status
    pub status: RecommendationStatus,
    /// Defense system this targets, if system-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_system: Option<DefenseSystem>,
    /// Short card title
    pub title: String,
    /// Longer explanation of the suggested action
    pub description: String,
    /// Deep link the presentation layer routes the user to
    pub action_url: String,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Instant after which this recommendation is excluded from selection
    pub expires_at: DateTime<Utc>,
}

impl Recommendation {
    /// Dedup key: at most one live recommendation per (system, type)
    #[must_use]
    pub const fn dedup_key(&self) -> (Option<DefenseSystem>, RecommendationType) {
        (self.target_system, self.rec_type)
    }

    /// Whether the recommendation has passed its expiry horizon at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether this recommendation is eligible for next-action selection
    #[must_use]
    pub fn is_actionable(&self, now: DateTime<Utc>) -> bool {
        self.status == RecommendationStatus::Pending && !self.is_expired(now)
    }
}
