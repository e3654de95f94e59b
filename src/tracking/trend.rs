// ABOUTME: Trend direction, consecutive-day streaks, weekly summaries, and score comparison
// ABOUTME: Operates on supplied score sequences; never reads stores itself
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use crate::models::DailyScore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a multi-day score sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    /// Later half meaningfully above the earlier half
    Improving,
    /// Later half meaningfully below the earlier half
    Declining,
    /// Within the threshold either way, or too little data
    Stable,
}

/// One day's overall score, dated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedScore {
    /// Calendar day
    pub date: NaiveDate,
    /// Overall score for that day, 0..=100
    pub overall_score: u8,
}

/// Summary of a run of consecutive days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// First day covered
    pub start: NaiveDate,
    /// Last day covered
    pub end: NaiveDate,
    /// Rounded mean of the daily overall scores
    pub average_score: u8,
    /// Day with the highest overall score
    pub best_day: NaiveDate,
    /// Day with the lowest overall score
    pub worst_day: NaiveDate,
    /// Direction across the window
    pub trend: TrendDirection,
    /// The daily scores behind the summary, in date order
    pub daily_scores: Vec<DatedScore>,
}

/// Difference between two days' scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComparison {
    /// Second day's overall minus first day's overall
    pub improvement: i32,
    /// Improvement relative to the first day, percent, 0 when the first day
    /// scored zero
    pub improvement_percent: i32,
}

/// Direction of a score sequence, earlier-half mean vs later-half mean
///
/// For odd-length input the earlier half gets the extra entry. Sequences
/// shorter than 2 entries are always `Stable`.
#[must_use]
pub fn analyze_trend(scores: &[u8], threshold: f64) -> TrendDirection {
    if scores.len() < 2 {
        return TrendDirection::Stable;
    }

    let (earlier, later) = scores.split_at(scores.len().div_ceil(2));
    let earlier_mean = mean(earlier);
    let later_mean = mean(later);

    if later_mean > earlier_mean + threshold {
        TrendDirection::Improving
    } else if later_mean < earlier_mean - threshold {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Consecutive qualifying days, walking backward from the most recent day
///
/// A day extends the streak when its overall score meets or exceeds
/// `qualifying_score`. The walk stops at the first day below the threshold
/// or at a gap in the date sequence; a missing day breaks the streak, it
/// does not skip it.
#[must_use]
pub fn compute_streak(daily_scores: &[DatedScore], qualifying_score: u8) -> u32 {
    let mut sorted: Vec<DatedScore> = daily_scores.to_vec();
    sorted.sort_by_key(|entry| entry.date);

    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;

    for entry in sorted.iter().rev() {
        if let Some(expected_date) = expected {
            if entry.date != expected_date {
                break;
            }
        }
        if entry.overall_score < qualifying_score {
            break;
        }
        streak += 1;
        expected = entry.date.pred_opt();
    }

    streak
}

/// Summarize a run of consecutive daily scores
///
/// Returns `None` for an empty input.
#[must_use]
pub fn summarize_week(daily_scores: &[DatedScore], trend_threshold: f64) -> Option<WeeklySummary> {
    let mut sorted: Vec<DatedScore> = daily_scores.to_vec();
    sorted.sort_by_key(|entry| entry.date);

    let first = sorted.first()?;
    let last = sorted.last()?;

    let scores: Vec<u8> = sorted.iter().map(|entry| entry.overall_score).collect();
    let average_score = mean(&scores).round() as u8;

    let best_day = sorted
        .iter()
        .max_by_key(|entry| entry.overall_score)
        .map(|entry| entry.date)?;
    let worst_day = sorted
        .iter()
        .min_by_key(|entry| entry.overall_score)
        .map(|entry| entry.date)?;

    Some(WeeklySummary {
        start: first.date,
        end: last.date,
        average_score,
        best_day,
        worst_day,
        trend: analyze_trend(&scores, trend_threshold),
        daily_scores: sorted,
    })
}

/// Compare two days' scores
#[must_use]
pub fn compare_scores(first: &DailyScore, second: &DailyScore) -> ScoreComparison {
    let improvement = i32::from(second.overall_score) - i32::from(first.overall_score);
    let improvement_percent = if first.overall_score > 0 {
        (f64::from(improvement) / f64::from(first.overall_score) * 100.0).round() as i32
    } else {
        0
    };
    ScoreComparison {
        improvement,
        improvement_percent,
    }
}

fn mean(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
}
