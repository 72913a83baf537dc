//! Typed identifiers shared across write-routing and scan-planning components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed hash bucket within a table's key space.
///
/// Always in `[0, bucket_count)` for the owning table; independent of how
/// many writer instances currently run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketId(
    /// Raw numeric id value.
    pub u32,
);

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parallel writer instance within the current job topology.
///
/// Always in `[0, slot_count)`; slot counts may change between job
/// deployments, never mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WriterSlot(
    /// Raw numeric id value.
    pub u32,
);

impl fmt::Display for WriterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scan work unit produced by fragment packing.
///
/// Sequential from 0 within one planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitId(
    /// Raw numeric id value.
    pub u32,
);

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
