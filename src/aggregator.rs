//! Reach Aggregator
//!
//! Folds reach vectors from independently sampled segments into one
//! estimate. Each vector is scaled to the event volume it was sampled from
//! (`occurrence_percent * total_events_count`) and its percentiles are
//! blended in proportion to that scaled contribution.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vector::{Percentiles, ReachVector};

/// Fixed-point scale of exported percentiles (milli-units).
pub const PERCENTILE_SCALE: f64 = 1000.0;

/// Result of folding one vector into the aggregator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum AddOutcome {
    /// The vector contributed occurrences and percentiles.
    Merged,
    /// Rounded total occurrences were zero; the sample was discarded.
    Dropped,
}

/// Running weighted estimate, owned by a single caller.
#[derive(Clone, Debug, Default)]
pub struct ReachAggregator {
    occurrences: f64,
    percentiles: Percentiles,
    merged: usize,
    dropped: usize,
}

impl ReachAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `vector`, sampled from `total_events_count` events, into the estimate.
    ///
    /// # Example
    /// ```
    /// use alice_reach::{AddOutcome, ReachAggregator, ReachVector};
    ///
    /// let mut reach = ReachAggregator::new();
    /// let half = ReachVector::new(vec![0xF0], 10, 20, 30);
    /// assert_eq!(reach.add(&half, 100), AddOutcome::Merged);
    ///
    /// let summary = reach.export();
    /// assert_eq!(summary.occurrences, 50);
    /// assert_eq!(summary.percentiles.p50, 20_000);
    /// ```
    pub fn add(&mut self, vector: &ReachVector, total_events_count: u64) -> AddOutcome {
        let additional = vector.occurrence_percent() * total_events_count as f64;
        let total = self.occurrences + additional;

        if total.round() == 0.0 {
            self.dropped += 1;
            debug!(
                occurrence_percent = vector.occurrence_percent(),
                total_events_count,
                "dropping reach sample with zero occurrences"
            );
            return AddOutcome::Dropped;
        }

        let incoming = vector.percentiles();
        self.percentiles = if self.occurrences == 0.0 {
            incoming
        } else {
            let current = self.percentiles;
            Percentiles {
                p25: (self.occurrences * current.p25 + additional * incoming.p25) / total,
                p50: (self.occurrences * current.p50 + additional * incoming.p50) / total,
                p75: (self.occurrences * current.p75 + additional * incoming.p75) / total,
            }
        };
        self.occurrences = total;
        self.merged += 1;

        AddOutcome::Merged
    }

    /// Snapshot: rounded occurrences and milli-unit percentiles.
    pub fn export(&self) -> ReachSummary {
        ReachSummary {
            occurrences: self.occurrences.round() as u64,
            percentiles: SummaryPercentiles {
                p25: (self.percentiles.p25 * PERCENTILE_SCALE).round() as u64,
                p50: (self.percentiles.p50 * PERCENTILE_SCALE).round() as u64,
                p75: (self.percentiles.p75 * PERCENTILE_SCALE).round() as u64,
            },
        }
    }

    #[inline]
    pub fn occurrences(&self) -> f64 {
        self.occurrences
    }

    #[inline]
    pub fn percentiles(&self) -> Percentiles {
        self.percentiles
    }

    /// Number of samples that contributed
    pub fn merged(&self) -> usize {
        self.merged
    }

    /// Number of samples discarded by the zero-occurrence guard
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.merged == 0
    }
}

/// Exported reach estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReachSummary {
    pub occurrences: u64,
    pub percentiles: SummaryPercentiles,
}

/// Percentiles in milli-units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SummaryPercentiles {
    #[cfg_attr(feature = "serde", serde(rename = "25"))]
    pub p25: u64,
    #[cfg_attr(feature = "serde", serde(rename = "50"))]
    pub p50: u64,
    #[cfg_attr(feature = "serde", serde(rename = "75"))]
    pub p75: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_add() {
        let mut agg = ReachAggregator::new();
        let v = ReachVector::new(vec![0xF0], 10, 20, 30);
        assert_eq!(v.occurrence_percent(), 0.5);

        assert_eq!(agg.add(&v, 100), AddOutcome::Merged);
        assert_eq!(agg.occurrences(), 50.0);
        assert_eq!(agg.percentiles(), Percentiles::new(10, 20, 30));

        let summary = agg.export();
        assert_eq!(summary.occurrences, 50);
        assert_eq!(
            summary.percentiles,
            SummaryPercentiles {
                p25: 10_000,
                p50: 20_000,
                p75: 30_000
            }
        );
    }

    #[test]
    fn test_weighted_blend() {
        let mut agg = ReachAggregator::new();
        // 0.25 * 400 = 100 occurrences at 1.0
        let a = ReachVector::new(vec![0xC0], 1.0, 1.0, 1.0);
        // 0.75 * 400 = 300 occurrences at 2.0
        let b = ReachVector::new(vec![0xFC], 2.0, 2.0, 2.0);

        assert_eq!(agg.add(&a, 400), AddOutcome::Merged);
        assert_eq!(agg.add(&b, 400), AddOutcome::Merged);

        assert_eq!(agg.occurrences(), 400.0);
        assert!((agg.percentiles().p50 - 1.75).abs() < 1e-12);
        assert_eq!(agg.export().percentiles.p50, 1750);
        assert_eq!(agg.merged(), 2);
    }

    #[test]
    fn test_zero_occurrences_is_noop() {
        let mut agg = ReachAggregator::new();
        let zero = ReachVector::new(vec![0u8; 4], 5, 6, 7);

        assert_eq!(agg.add(&zero, 1_000_000), AddOutcome::Dropped);
        assert_eq!(agg.occurrences(), 0.0);
        assert_eq!(agg.percentiles(), Percentiles::default());
        assert_eq!(agg.dropped(), 1);
        assert!(agg.is_empty());
        assert_eq!(agg.export(), ReachSummary::default());
    }

    #[test]
    fn test_rounds_to_zero_is_dropped() {
        let mut agg = ReachAggregator::new();
        // 1 / 64 * 10 = 0.156 -> rounds to 0
        let sparse = ReachVector::new(vec![0x01, 0, 0, 0, 0, 0, 0, 0], 9, 9, 9);
        assert_eq!(agg.add(&sparse, 10), AddOutcome::Dropped);
        assert_eq!(agg.occurrences(), 0.0);
    }

    #[test]
    fn test_zero_sample_after_data_keeps_percentiles() {
        let mut agg = ReachAggregator::new();
        let v = ReachVector::new(vec![0xFF], 3, 4, 5);
        let zero = ReachVector::new(vec![0x00], 100, 100, 100);

        assert_eq!(agg.add(&v, 10), AddOutcome::Merged);
        assert_eq!(agg.add(&zero, 10), AddOutcome::Merged);
        assert_eq!(agg.occurrences(), 10.0);
        assert_eq!(agg.percentiles(), Percentiles::new(3, 4, 5));
    }
}
