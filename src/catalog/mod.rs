// ABOUTME: Reference food catalog access and ingredient matching
// ABOUTME: Resolves free-text food names to catalog entries and their benefits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Catalog module
//!
//! The reference catalog is a read-mostly collection of canonical food
//! names, each tagged with the defense systems it benefits. Matching is a
//! pure computation over an in-memory catalog snapshot and is safe to call
//! from any number of concurrent request handlers.

/// Free-text ingredient to catalog-entry matching
pub mod matcher;

pub use matcher::{
    match_batch, match_ingredient, resolve_recipe_ingredients, MatchConfidence, MatchResult,
};
