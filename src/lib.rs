//! # ALICE-Reach
//!
//! **Targeting reach estimation over sampled audiences**
//!
//! > "Reach is a bitset. Combining targeting is set algebra."
//!
//! ## Architecture
//!
//! - **ReachVector**: one bit per sampled slot + 25/50/75 percentiles of the
//!   metric on the matching slots. AND / OR / NOT are exact on the bits and
//!   blend the percentiles by population weight.
//! - **ReachAggregator**: scales vectors to their segment's event volume and
//!   keeps a running occurrence-weighted estimate.
//! - **ReachCatalog / ReachForecaster**: evaluate `requires` / `excludes`
//!   targeting against per-segment atoms and aggregate the segments.
//!
//! ## Performance
//!
//! | Operation | Time | Space |
//! |-----------|------|-------|
//! | Popcount | **O(N / 64)** (512-bit blocks) | O(1) |
//! | AND / OR / NOT | O(N) | O(N) new vector |
//! | Aggregator add | O(N / 64) | O(1) |
//!
//! ## Example
//!
//! ```
//! use alice_reach::{Percentiles, ReachAggregator, ReachVector};
//!
//! let us = ReachVector::from_bit_str("1111_0000", Percentiles::new(1.0, 2.0, 3.0))?;
//! let mobile = ReachVector::from_bit_str("1100_1100", Percentiles::new(2.0, 3.0, 4.0))?;
//!
//! let us_mobile = us.and(&mobile)?;
//! assert_eq!(us_mobile.occurrence_percent(), 0.25);
//!
//! let mut reach = ReachAggregator::new();
//! let _ = reach.add(&us_mobile, 10_000);
//! assert_eq!(reach.export().occurrences, 2_500);
//! # Ok::<(), alice_reach::ReachError>(())
//! ```

extern crate alloc;

pub mod aggregator;
pub mod bits;
pub mod error;
pub mod forecast;
pub mod targeting;
pub mod vector;

pub use aggregator::{AddOutcome, ReachAggregator, ReachSummary, SummaryPercentiles};
pub use error::{ReachError, Result};
pub use forecast::{ForecastReport, ReachForecaster};
pub use targeting::{ReachCatalog, Targeting};
pub use vector::{Percentiles, ReachVector};

#[cfg(feature = "serde")]
pub mod wire;

/// Version
pub const VERSION: &str = "0.1.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_targeting() {
        let us = ReachVector::from_bit_str("11110000", Percentiles::new(1, 2, 3)).unwrap();
        let mobile = ReachVector::from_bit_str("11001100", Percentiles::new(2, 3, 4)).unwrap();

        // us AND NOT mobile
        let reach = us.and(&mobile.not()).unwrap();
        assert_eq!(reach.data(), &[0b0011_0000]);
        assert_eq!(reach.occurrence_percent(), 0.25);
    }

    #[test]
    fn test_end_to_end() {
        let a = ReachVector::from_bit_str("1111_1111_0000_0000", Percentiles::new(1, 1, 1)).unwrap();
        let b = ReachVector::from_bit_str("0000_0000_1111_1111", Percentiles::new(3, 3, 3)).unwrap();

        let mut reach = ReachAggregator::new();
        assert_eq!(reach.add(&a.or(&b).unwrap(), 200), AddOutcome::Merged);

        let summary = reach.export();
        assert_eq!(summary.occurrences, 200);
        // disjoint halves with equal weights
        assert_eq!(summary.percentiles.p50, 2000);
    }

    #[test]
    fn test_empty_vectors() {
        let empty = ReachVector::new(Vec::new(), 1, 2, 3);
        assert_eq!(empty.occurrence_percent(), 0.0);
        assert!(empty.is_empty());

        let mut reach = ReachAggregator::new();
        assert_eq!(reach.add(&empty, 1_000), AddOutcome::Dropped);
    }
}
