// ABOUTME: Integration tests for the score cache: TTL, invalidation, and degradation
// ABOUTME: Verifies a read after invalidation never reflects deleted consumption data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{item, TestHarness};
use std::time::Duration;
use uuid::Uuid;
use wellness_intelligence::cache::factory::ScoreCache;
use wellness_intelligence::cache::memory::InMemoryScoreCache;
use wellness_intelligence::cache::{CacheConfig, ScoreCacheKey, ScoreCacheProvider};
use wellness_intelligence::models::{BenefitStrength, DefenseSystem, MealTime};
use wellness_intelligence::tracking::{aggregate, compute};

fn test_cache_config(score_ttl: Duration) -> CacheConfig {
    CacheConfig {
        score_ttl,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    }
}

#[tokio::test]
async fn test_provider_put_get_roundtrip() {
    let cache = InMemoryScoreCache::new(test_cache_config(Duration::from_secs(60)))
        .await
        .unwrap();
    let key = ScoreCacheKey::new(Uuid::new_v4(), common::test_date());
    let score = compute(&aggregate(&[]));

    cache.put(&key, &score, Duration::from_secs(60)).await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap(), Some(score));
    assert!(cache.exists(&key).await.unwrap());
    assert!(cache.ttl(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_provider_entries_expire() {
    let cache = InMemoryScoreCache::new(test_cache_config(Duration::from_millis(50)))
        .await
        .unwrap();
    let key = ScoreCacheKey::new(Uuid::new_v4(), common::test_date());
    let score = compute(&aggregate(&[]));

    cache
        .put(&key, &score, Duration::from_millis(50))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(cache.get(&key).await.unwrap(), None);
    assert!(!cache.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_provider_invalidate_destroys_entry() {
    let cache = InMemoryScoreCache::new(test_cache_config(Duration::from_secs(60)))
        .await
        .unwrap();
    let key = ScoreCacheKey::new(Uuid::new_v4(), common::test_date());
    let score = compute(&aggregate(&[]));

    cache.put(&key, &score, Duration::from_secs(60)).await.unwrap();
    cache.invalidate(&key).await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap(), None);
}

#[tokio::test]
async fn test_user_pattern_invalidation_spares_other_users() {
    let cache = InMemoryScoreCache::new(test_cache_config(Duration::from_secs(60)))
        .await
        .unwrap();
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    let score = compute(&aggregate(&[]));

    for offset in 0u64..3 {
        let date = common::test_date() + chrono::Days::new(offset);
        cache
            .put(
                &ScoreCacheKey::new(user_a, date),
                &score,
                Duration::from_secs(60),
            )
            .await
            .unwrap();
    }
    let key_b = ScoreCacheKey::new(user_b, common::test_date());
    cache.put(&key_b, &score, Duration::from_secs(60)).await.unwrap();

    let removed = cache
        .invalidate_pattern(&ScoreCacheKey::user_pattern(user_a))
        .await
        .unwrap();
    assert_eq!(removed, 3);
    assert!(cache.exists(&key_b).await.unwrap());
}

#[tokio::test]
async fn test_lru_evicts_oldest_entry_at_capacity() {
    let config = CacheConfig {
        max_entries: 2,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    };
    let cache = InMemoryScoreCache::new(config).await.unwrap();
    let score = compute(&aggregate(&[]));
    let keys: Vec<ScoreCacheKey> = (0u64..3)
        .map(|offset| {
            ScoreCacheKey::new(
                Uuid::new_v4(),
                common::test_date() + chrono::Days::new(offset),
            )
        })
        .collect();

    for key in &keys {
        cache.put(key, &score, Duration::from_secs(60)).await.unwrap();
    }

    assert!(!cache.exists(&keys[0]).await.unwrap());
    assert!(cache.exists(&keys[1]).await.unwrap());
    assert!(cache.exists(&keys[2]).await.unwrap());
}

#[tokio::test]
async fn test_batch_invalidation_removes_all_listed_days() {
    let cache = ScoreCache::new(test_cache_config(Duration::from_secs(60))).await;
    let user_id = Uuid::new_v4();
    let score = compute(&aggregate(&[]));
    let dates: Vec<chrono::NaiveDate> = (0u64..3)
        .map(|offset| common::test_date() + chrono::Days::new(offset))
        .collect();

    for &date in &dates {
        cache.put(user_id, date, &score).await;
    }
    cache.invalidate_batch(user_id, &dates[..2]).await;

    assert!(cache.get(user_id, dates[0]).await.is_none());
    assert!(cache.get(user_id, dates[1]).await.is_none());
    assert!(cache.get(user_id, dates[2]).await.is_some());
}

#[tokio::test]
async fn test_disabled_cache_misses_without_error() {
    let cache = ScoreCache::disabled();
    let user_id = Uuid::new_v4();
    let score = compute(&aggregate(&[]));

    cache.put(user_id, common::test_date(), &score).await;
    assert!(cache.get(user_id, common::test_date()).await.is_none());
    assert_eq!(cache.invalidate_user(user_id).await, 0);
}

#[tokio::test]
async fn test_read_after_delete_never_reflects_deleted_data() {
    let harness = TestHarness::new().await;
    harness
        .log_event(
            MealTime::Breakfast,
            vec![item(
                "yogurt",
                &[(DefenseSystem::Microbiome, BenefitStrength::High)],
            )],
        )
        .await;

    let before = harness
        .service
        .score_for_day(harness.user_id, common::test_date())
        .await
        .unwrap();
    assert_eq!(before.system_score, 20);

    // Upstream deletes the day's events and invalidates, as writers must
    harness.log.remove_day(harness.user_id, common::test_date()).await;
    harness
        .service
        .invalidate(harness.user_id, common::test_date())
        .await;

    let after = harness
        .service
        .score_for_day(harness.user_id, common::test_date())
        .await
        .unwrap();
    assert_eq!(after.overall_score, 0);
    assert_eq!(after.system_score, 0);
}

#[tokio::test]
async fn test_stale_cache_entry_served_until_invalidated() {
    // Without invalidation the cached value is returned even after new
    // writes; the TTL alone is only a safety net
    let harness = TestHarness::new().await;
    let empty = harness
        .service
        .score_for_day(harness.user_id, common::test_date())
        .await
        .unwrap();
    assert_eq!(empty.overall_score, 0);

    harness
        .log
        .append(common::event(
            harness.user_id,
            common::test_date(),
            MealTime::Lunch,
            vec![item(
                "tomato",
                &[(DefenseSystem::Angiogenesis, BenefitStrength::High)],
            )],
        ))
        .await;

    let still_cached = harness
        .service
        .score_for_day(harness.user_id, common::test_date())
        .await
        .unwrap();
    assert_eq!(still_cached.overall_score, 0);

    harness
        .service
        .invalidate(harness.user_id, common::test_date())
        .await;
    let fresh = harness
        .service
        .score_for_day(harness.user_id, common::test_date())
        .await
        .unwrap();
    assert_eq!(fresh.system_score, 20);
}
