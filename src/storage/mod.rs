// ABOUTME: Trait boundaries to the catalog, consumption log, and recommendation stores
// ABOUTME: The engine owns no persistence; read failures surface as retryable DataUnavailable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Storage boundary
//!
//! The engine is invoked between these three stores and never persists
//! anything itself. A store read failure is a retryable [`DataUnavailable`]
//! error, never a silent zero score: callers must be able to distinguish
//! "zero data" from "failed to load data".
//!
//! [`DataUnavailable`]: crate::errors::ErrorCode::DataUnavailable

/// In-memory store implementations
pub mod memory;

use crate::errors::AppResult;
use crate::models::{CatalogFood, ConsumptionEvent, Recommendation, RecommendationStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl DateRange {
    /// Range covering exactly one day
    #[must_use]
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Range covering `days` consecutive days ending at `end` (inclusive)
    #[must_use]
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let start = end - chrono::Days::new(u64::from(days.saturating_sub(1)));
        Self { start, end }
    }

    /// Whether the range contains the given day
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The days of the range in ascending order
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = self.start;
        while current <= self.end {
            days.push(current);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        days
    }
}

/// Read access to the reference food catalog
///
/// The catalog is assumed small enough to load wholesale per matching batch.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All canonical foods with their defense-system benefits
    ///
    /// An empty catalog is valid: matching degrades to `None` confidence for
    /// everything rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable)
    /// when the backing store cannot be read.
    async fn list_catalog_foods(&self) -> AppResult<Vec<CatalogFood>>;
}

/// Read access to the consumption log
#[async_trait]
pub trait ConsumptionStore: Send + Sync {
    /// Consumption events for a user within a date range, ordered by date
    /// ascending then meal time
    ///
    /// # Errors
    ///
    /// Returns [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable)
    /// when the backing store cannot be read.
    async fn query_consumption_events(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<ConsumptionEvent>>;
}

/// Durable storage for recommendations and their lifecycle status
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persist a batch of newly generated recommendations
    ///
    /// # Errors
    ///
    /// Returns [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable)
    /// when the backing store cannot be written.
    async fn save_recommendations(&self, recommendations: &[Recommendation]) -> AppResult<()>;

    /// All still-pending recommendations for a user
    ///
    /// # Errors
    ///
    /// Returns [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable)
    /// when the backing store cannot be read.
    async fn load_pending_recommendations(&self, user_id: Uuid) -> AppResult<Vec<Recommendation>>;

    /// One recommendation by id, `None` when unknown
    ///
    /// # Errors
    ///
    /// Returns [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable)
    /// when the backing store cannot be read.
    async fn get_recommendation(&self, id: Uuid) -> AppResult<Option<Recommendation>>;

    /// Overwrite the stored status of one recommendation
    ///
    /// # Errors
    ///
    /// Returns [`ResourceNotFound`](crate::errors::ErrorCode::ResourceNotFound)
    /// for an unknown id, or
    /// [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable) when the
    /// backing store cannot be written.
    async fn update_status(&self, id: Uuid, new_status: RecommendationStatus) -> AppResult<()>;
}
