//! JSON boundary for reach data.
//!
//! Vectors travel as hex-encoded bitsets with their percentile triple:
//!
//! ```json
//! {"data": "8564228e", "percentiles": {"25": 1.2, "50": 2.5, "75": 4.2}}
//! ```
//!
//! A catalog document carries the segment's event
//! volume, the all-traffic base vector and the key/value atoms:
//!
//! ```json
//! {
//!   "total_events_count": 120000,
//!   "base": {"data": "ffff", "percentiles": {"25": 1, "50": 2, "75": 3}},
//!   "vectors": [
//!     {"key": "device:type", "value": "mobile", "data": "f0f0", "percentiles": {"25": 1, "50": 2, "75": 3}}
//!   ]
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::targeting::ReachCatalog;
use crate::vector::{Percentiles, ReachVector};

/// Serialized form of a [`ReachVector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
    pub percentiles: Percentiles,
}

impl From<VectorRecord> for ReachVector {
    fn from(record: VectorRecord) -> Self {
        ReachVector::with_percentiles(record.data, record.percentiles)
    }
}

impl From<&ReachVector> for VectorRecord {
    fn from(vector: &ReachVector) -> Self {
        Self {
            data: vector.data().to_vec(),
            percentiles: vector.percentiles(),
        }
    }
}

/// One key/value atom of a catalog document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    pub key: String,
    pub value: String,
    #[serde(flatten)]
    pub vector: VectorRecord,
}

/// Serialized form of a [`ReachCatalog`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub total_events_count: u64,
    pub base: VectorRecord,
    #[serde(default)]
    pub vectors: Vec<AtomRecord>,
}

impl CatalogRecord {
    /// Validate lengths and build the in-memory catalog.
    pub fn into_catalog(self) -> Result<ReachCatalog> {
        let mut catalog = ReachCatalog::new(self.total_events_count, self.base.into());
        for atom in self.vectors {
            catalog.insert(atom.key, atom.value, atom.vector.into())?;
        }
        Ok(catalog)
    }
}

impl ReachCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<CatalogRecord>(json)?.into_catalog()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader::<_, CatalogRecord>(reader)?.into_catalog()
    }

    /// Load a catalog document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// Parse a JSON array of catalog documents, one per traffic segment.
pub fn catalogs_from_json(json: &str) -> Result<Vec<ReachCatalog>> {
    serde_json::from_str::<Vec<CatalogRecord>>(json)?
        .into_iter()
        .map(CatalogRecord::into_catalog)
        .collect()
}

/// Load a JSON array of catalog documents from disk.
pub fn load_catalogs<P: AsRef<Path>>(path: P) -> Result<Vec<ReachCatalog>> {
    let file = File::open(path)?;
    serde_json::from_reader::<_, Vec<CatalogRecord>>(BufReader::new(file))?
        .into_iter()
        .map(CatalogRecord::into_catalog)
        .collect()
}
