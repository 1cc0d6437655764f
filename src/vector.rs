//! Reach Vector
//!
//! A sampled audience for one targeting predicate: one bit per sampled slot,
//! plus the 25th/50th/75th percentiles of the metric observed on the slots
//! where the predicate holds.
//!
//! **Combination**: AND / OR / NOT act on the bitset exactly and on the
//! percentiles approximately. Raw observations are not available, so the
//! percentiles of a combination are a weighted mean of the operands',
//! weighted by how much of each operand's population lies outside the
//! intersection.
//!
//! Note that AND and OR use different denominators: AND divides each
//! operand's population by its own exclusive count, OR divides it by the
//! *other* operand's exclusive count. Both estimators are kept as they are.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bits;
use crate::error::{ReachError, Result};

/// Percentile triple of the reach metric, in raw metric units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Percentiles {
    #[cfg_attr(feature = "serde", serde(rename = "25"))]
    pub p25: f64,
    #[cfg_attr(feature = "serde", serde(rename = "50"))]
    pub p50: f64,
    #[cfg_attr(feature = "serde", serde(rename = "75"))]
    pub p75: f64,
}

impl Percentiles {
    pub fn new(p25: impl Into<f64>, p50: impl Into<f64>, p75: impl Into<f64>) -> Self {
        Self {
            p25: p25.into(),
            p50: p50.into(),
            p75: p75.into(),
        }
    }

    /// Weighted mean of two triples, normalized by the weight sum.
    #[inline]
    pub fn blend(&self, weight: f64, other: &Percentiles, other_weight: f64) -> Percentiles {
        let total = weight + other_weight;
        if total == 0.0 {
            return Percentiles {
                p25: (self.p25 + other.p25) / 2.0,
                p50: (self.p50 + other.p50) / 2.0,
                p75: (self.p75 + other.p75) / 2.0,
            };
        }
        let inv = 1.0 / total;
        Percentiles {
            p25: (self.p25 * weight + other.p25 * other_weight) * inv,
            p50: (self.p50 * weight + other.p50 * other_weight) * inv,
            p75: (self.p75 * weight + other.p75 * other_weight) * inv,
        }
    }
}

/// `population / exclusive`, or 1 when the exclusive part is empty.
#[inline(always)]
fn weight(population: usize, exclusive: usize) -> f64 {
    if exclusive == 0 {
        1.0
    } else {
        population as f64 / exclusive as f64
    }
}

/// Immutable reach sample for one targeting predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachVector {
    data: Vec<u8>,
    percentiles: Percentiles,
}

impl ReachVector {
    pub fn new(
        data: impl Into<Vec<u8>>,
        percentile25: impl Into<f64>,
        percentile50: impl Into<f64>,
        percentile75: impl Into<f64>,
    ) -> Self {
        Self::with_percentiles(data, Percentiles::new(percentile25, percentile50, percentile75))
    }

    pub fn with_percentiles(data: impl Into<Vec<u8>>, percentiles: Percentiles) -> Self {
        Self {
            data: data.into(),
            percentiles,
        }
    }

    /// Build from a textual bit string, most significant bit first.
    ///
    /// # Example
    /// ```
    /// use alice_reach::{Percentiles, ReachVector};
    ///
    /// let v = ReachVector::from_bit_str("10000101011001000010001010001110", Percentiles::default())?;
    /// assert_eq!(v.occurrence_percent(), 0.375);
    /// # Ok::<(), alice_reach::ReachError>(())
    /// ```
    pub fn from_bit_str(bits: &str, percentiles: Percentiles) -> Result<Self> {
        Ok(Self::with_percentiles(bits::parse(bits)?, percentiles))
    }

    /// Every slot set: the whole sampled audience.
    pub fn full(len: usize, percentiles: Percentiles) -> Self {
        Self::with_percentiles(vec![0xFF; len], percentiles)
    }

    /// No slot set.
    pub fn zeroed(len: usize, percentiles: Percentiles) -> Self {
        Self::with_percentiles(vec![0u8; len], percentiles)
    }

    /// Intersection of two predicates.
    pub fn and(&self, other: &ReachVector) -> Result<ReachVector> {
        self.check_len(other)?;

        let data = bits::and(&self.data, &other.data);
        let bits_a = self.count_ones();
        let bits_b = other.count_ones();
        let bits_ab = bits::count_ones(&data);

        // Containment (bits == bits_ab) falls out of weight() as 1
        let weight_a = weight(bits_a, bits_a - bits_ab);
        let weight_b = weight(bits_b, bits_b - bits_ab);

        Ok(ReachVector {
            data,
            percentiles: self.percentiles.blend(weight_a, &other.percentiles, weight_b),
        })
    }

    /// Union of two predicates.
    pub fn or(&self, other: &ReachVector) -> Result<ReachVector> {
        self.check_len(other)?;

        let data = bits::or(&self.data, &other.data);
        let bits_a = self.count_ones();
        let bits_b = other.count_ones();
        let bits_ab = bits::count_ones_and(&self.data, &other.data);

        let weight_a = weight(bits_a, bits_b - bits_ab);
        let weight_b = weight(bits_b, bits_a - bits_ab);

        Ok(ReachVector {
            data,
            percentiles: self.percentiles.blend(weight_a, &other.percentiles, weight_b),
        })
    }

    /// Negated predicate. Percentiles are carried over unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> ReachVector {
        ReachVector {
            data: bits::not(&self.data),
            percentiles: self.percentiles,
        }
    }

    /// Fraction of sampled slots satisfying the predicate.
    #[inline]
    pub fn occurrence_percent(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count_ones() as f64 / (8 * self.data.len()) as f64
    }

    #[inline]
    pub fn count_ones(&self) -> usize {
        bits::count_ones(&self.data)
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn percentiles(&self) -> Percentiles {
        self.percentiles
    }

    pub fn percentile25(&self) -> f64 {
        self.percentiles.p25
    }
    pub fn percentile50(&self) -> f64 {
        self.percentiles.p50
    }
    pub fn percentile75(&self) -> f64 {
        self.percentiles.p75
    }

    /// Sample size in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample size in slots
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8
    }

    #[inline]
    fn check_len(&self, other: &ReachVector) -> Result<()> {
        if self.data.len() != other.data.len() {
            return Err(ReachError::LengthMismatch {
                left: self.data.len(),
                right: other.data.len(),
            });
        }
        Ok(())
    }
}
