//! Extraction statistics tracking.
//!
//! This module provides thread-safe counters for absorbed extraction failures,
//! skipped structured-data blocks and completed/failed analyses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use strum::IntoEnumIterator;

use super::types::Facet;

/// Thread-safe extraction statistics tracker.
///
/// Every `Facet` is initialized to zero on creation, so lookups never miss.
/// Shared across tasks behind an `Arc`.
pub struct ExtractionStats {
    field_failures: HashMap<Facet, AtomicUsize>,
    skipped_blocks: AtomicUsize,
    profiles_built: AtomicUsize,
    analyses_failed: AtomicUsize,
}

/// Point-in-time copy of `ExtractionStats`, serializable for the status endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub profiles_built: usize,
    pub analyses_failed: usize,
    pub skipped_structured_blocks: usize,
    pub field_failures: HashMap<String, usize>,
}

impl Default for ExtractionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStats {
    pub fn new() -> Self {
        let mut field_failures = HashMap::new();
        for facet in Facet::iter() {
            field_failures.insert(facet, AtomicUsize::new(0));
        }

        ExtractionStats {
            field_failures,
            skipped_blocks: AtomicUsize::new(0),
            profiles_built: AtomicUsize::new(0),
            analyses_failed: AtomicUsize::new(0),
        }
    }

    /// Increment the failure counter of a facet.
    pub fn record_field_failure(&self, facet: Facet) {
        if let Some(counter) = self.field_failures.get(&facet) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ExtractionStats initialization.",
                facet
            );
        }
    }

    pub fn record_skipped_blocks(&self, count: usize) {
        self.skipped_blocks.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_profile(&self) {
        self.profiles_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_analysis_failure(&self) {
        self.analyses_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the failure count for a facet.
    pub fn field_failure_count(&self, facet: Facet) -> usize {
        self.field_failures
            .get(&facet)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total absorbed failures across all facets.
    pub fn total_field_failures(&self) -> usize {
        Facet::iter().map(|f| self.field_failure_count(f)).sum()
    }

    pub fn skipped_block_count(&self) -> usize {
        self.skipped_blocks.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            profiles_built: self.profiles_built.load(Ordering::SeqCst),
            analyses_failed: self.analyses_failed.load(Ordering::SeqCst),
            skipped_structured_blocks: self.skipped_block_count(),
            field_failures: Facet::iter()
                .map(|f| (f.as_str().to_string(), self.field_failure_count(f)))
                .collect(),
        }
    }
}
