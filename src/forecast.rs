//! Campaign reach forecast.
//!
//! Each traffic segment is sampled independently and carries its own event
//! volume. The forecaster evaluates the targeting against every segment's
//! catalog and folds the per-segment vectors into one [`ReachAggregator`].

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{AddOutcome, ReachAggregator, ReachSummary};
use crate::error::Result;
use crate::targeting::{ReachCatalog, Targeting};

/// Forecast result with segment bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ForecastReport {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: ReachSummary,
    /// Segments that contributed to the estimate
    #[cfg_attr(feature = "serde", serde(skip))]
    pub merged_segments: usize,
    /// Segments discarded because they matched nothing
    #[cfg_attr(feature = "serde", serde(skip))]
    pub dropped_segments: usize,
}

/// Reach forecaster over a set of traffic segments.
#[derive(Clone, Debug, Default)]
pub struct ReachForecaster {
    segments: Vec<ReachCatalog>,
}

impl ReachForecaster {
    pub fn new(segments: Vec<ReachCatalog>) -> Self {
        Self { segments }
    }

    pub fn push(&mut self, segment: ReachCatalog) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[ReachCatalog] {
        &self.segments
    }

    /// Estimate occurrences and percentiles for `targeting`.
    pub fn forecast(&self, targeting: &Targeting) -> Result<ForecastReport> {
        let mut reach = ReachAggregator::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            let vector = segment.evaluate(targeting)?;
            let outcome = reach.add(&vector, segment.total_events_count());
            debug!(
                segment = idx,
                occurrence_percent = vector.occurrence_percent(),
                total_events_count = segment.total_events_count(),
                merged = outcome == AddOutcome::Merged,
                "segment reach"
            );
        }

        Ok(ForecastReport {
            summary: reach.export(),
            merged_segments: reach.merged(),
            dropped_segments: reach.dropped(),
        })
    }
}
