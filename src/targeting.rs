//! Targeting Evaluation
//!
//! A campaign's targeting is a pair of maps, `requires` and `excludes`,
//! from a targeting key (`site:domain`, `device:type`, ...) to the values it
//! accepts. A catalog holds one reach vector per known key/value atom for a
//! single traffic segment and turns an expression into one combined vector:
//!
//! ```text
//! reach = AND_k( OR_v requires[k][v] )  AND  AND_k( NOT OR_v excludes[k][v] )
//! ```
//!
//! With no `requires` the catalog's base vector (all sampled traffic) is the
//! starting point.

use alloc::string::String;
use alloc::vec::Vec;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ReachError, Result};
use crate::vector::ReachVector;

/// Targeting expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Targeting {
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires: BTreeMap<String, Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub excludes: BTreeMap<String, Vec<String>>,
}

impl Targeting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: accept `values` for `key`.
    pub fn require<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Builder: reject `values` for `key`.
    pub fn exclude<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.requires.values().all(Vec::is_empty) && self.excludes.values().all(Vec::is_empty)
    }
}

/// Reach atoms of one traffic segment.
#[derive(Clone, Debug)]
pub struct ReachCatalog {
    total_events_count: u64,
    base: ReachVector,
    atoms: HashMap<String, HashMap<String, ReachVector>>,
}

impl ReachCatalog {
    /// Create a catalog around the base vector; every atom must match its length.
    pub fn new(total_events_count: u64, base: ReachVector) -> Self {
        Self {
            total_events_count,
            base,
            atoms: HashMap::new(),
        }
    }

    /// Register the vector for `key = value`, replacing any previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        vector: ReachVector,
    ) -> Result<()> {
        let key = key.into();
        let value = value.into();
        if vector.len() != self.base.len() {
            return Err(ReachError::CatalogLengthMismatch {
                key,
                value,
                expected: self.base.len(),
                found: vector.len(),
            });
        }
        self.atoms.entry(key).or_default().insert(value, vector);
        Ok(())
    }

    pub fn get(&self, key: &str, value: &str) -> Option<&ReachVector> {
        self.atoms.get(key).and_then(|values| values.get(value))
    }

    #[inline]
    pub fn total_events_count(&self) -> u64 {
        self.total_events_count
    }

    #[inline]
    pub fn base(&self) -> &ReachVector {
        &self.base
    }

    /// Sample size in bytes shared by every vector of the catalog
    #[inline]
    pub fn vector_len(&self) -> usize {
        self.base.len()
    }

    /// Number of key/value atoms
    pub fn len(&self) -> usize {
        self.atoms.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.values().all(HashMap::is_empty)
    }

    /// Combine the atoms named by `targeting` into one vector.
    pub fn evaluate(&self, targeting: &Targeting) -> Result<ReachVector> {
        let mut reach: Option<ReachVector> = None;

        for (key, values) in &targeting.requires {
            if values.is_empty() {
                continue;
            }
            let any = match self.any_of(key, values)? {
                Some(v) => v,
                // Nothing in this segment can match
                None => ReachVector::zeroed(self.vector_len(), self.base.percentiles()),
            };
            reach = Some(match reach {
                Some(acc) => acc.and(&any)?,
                None => any,
            });
        }

        let mut reach = reach.unwrap_or_else(|| self.base.clone());

        for (key, values) in &targeting.excludes {
            if let Some(any) = self.any_of(key, values)? {
                reach = reach.and(&any.not())?;
            }
        }

        trace!(
            occurrence_percent = reach.occurrence_percent(),
            "evaluated targeting"
        );
        Ok(reach)
    }

    /// OR over the known values of `key`; `None` when none is known.
    fn any_of(&self, key: &str, values: &[String]) -> Result<Option<ReachVector>> {
        let mut acc: Option<ReachVector> = None;
        for value in values {
            let Some(vector) = self.get(key, value) else {
                debug!(key, value = value.as_str(), "no reach data for targeting value");
                continue;
            };
            acc = Some(match acc {
                Some(a) => a.or(vector)?,
                None => vector.clone(),
            });
        }
        Ok(acc)
    }
}
