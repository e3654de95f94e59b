// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups 5x5x5 scoring targets, cache TTLs, and recommendation horizons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Constants module
//!
//! Engine constants organized by domain. The 5x5x5 targets are fixed domain
//! constants, not configuration: 5 defense systems, 5 foods per system per
//! day, 5 meal times per day.

/// Score cache defaults
pub mod cache;
/// Recommendation generation and expiry defaults
pub mod recommendations;
/// 5x5x5 scoring targets and analysis thresholds
pub mod scoring;
