// ABOUTME: Offset-based pagination parameters for list endpoints
// ABOUTME: Provides page/limit parsing with clamped bounds and skip computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Offset pagination for goal listings
//!
//! Listings are ordered by creation time descending and paged with
//! `page`/`limit` query parameters; `skip = (page - 1) * limit`.

use serde::{Deserialize, Serialize};

use crate::constants::limits;

/// Pagination parameters as accepted from callers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: limits::DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Build parameters from optional query values, clamping to sane bounds
    ///
    /// A zero or missing `page` becomes 1; `limit` is clamped to
    /// `1..=MAX_PAGE_SIZE` with the configured default when absent.
    #[must_use]
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(limits::DEFAULT_PAGE_SIZE)
            .clamp(1, limits::MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Number of items to skip before this page
    #[must_use]
    pub const fn skip(&self) -> u64 {
        ((self.page - 1) as u64) * (self.limit as u64)
    }
}

/// A page of items together with the total matching count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// Total number of items matching the filter, across all pages
    pub total: u64,
}

impl<T> Page<T> {
    /// An empty page with a zero total
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let params = PaginationParams::from_query(None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, limits::DEFAULT_PAGE_SIZE);
        assert_eq!(params.skip(), 0);
    }

    #[test]
    fn test_skip_is_offset_based() {
        let params = PaginationParams::from_query(Some(3), Some(10));
        assert_eq!(params.skip(), 20);
    }

    #[test]
    fn test_limit_clamped() {
        let params = PaginationParams::from_query(Some(1), Some(10_000));
        assert_eq!(params.limit, limits::MAX_PAGE_SIZE);

        let params = PaginationParams::from_query(Some(0), Some(0));
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);
    }
}
