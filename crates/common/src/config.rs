use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{LkbError, Result};

/// Read-path scan planning knobs.
///
/// `max_partition_bytes` caps the accounted size of one scan partition;
/// `open_cost_bytes` is the fixed per-fragment overhead charged against the
/// budget so many tiny fragments do not starve a partition of real bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub max_partition_bytes: i64,
    pub open_cost_bytes: i64,
    pub min_scan_partitions: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_partition_bytes: 128 * 1024 * 1024,
            open_cost_bytes: 4 * 1024 * 1024,
            min_scan_partitions: 1,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_partition_bytes <= 0 {
            return Err(LkbError::InvalidConfig(format!(
                "max_partition_bytes must be positive, got {}",
                self.max_partition_bytes
            )));
        }
        if self.open_cost_bytes < 0 {
            return Err(LkbError::InvalidConfig(format!(
                "open_cost_bytes must be non-negative, got {}",
                self.open_cost_bytes
            )));
        }
        if self.min_scan_partitions == 0 {
            return Err(LkbError::InvalidConfig(
                "min_scan_partitions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective split budget for a scan over `total_bytes` of fragment data.
    ///
    /// Spreads the scan across at least `min_scan_partitions` units, but never
    /// plans below the per-fragment open cost and never above
    /// `max_partition_bytes`.
    pub fn effective_split_bytes(&self, total_bytes: i64) -> i64 {
        let per_partition = total_bytes / self.min_scan_partitions.max(1) as i64;
        per_partition
            .max(self.open_cost_bytes)
            .min(self.max_partition_bytes)
            .max(1)
    }

    pub fn load_from_json(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: ScanConfig =
            serde_json::from_str(&s).map_err(|e| LkbError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Write-path bucket layout knobs, fixed per table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteConfig {
    /// Number of hash buckets in the table's key space.
    pub bucket_count: u32,
    /// Comma-delimited record-key field names that feed the bucket hash.
    pub index_key_fields: String,
}

impl WriteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(LkbError::InvalidConfig(
                "bucket_count must be positive".to_string(),
            ));
        }
        if self.index_key_fields.is_empty() {
            return Err(LkbError::InvalidConfig(
                "index_key_fields must name at least one field".to_string(),
            ));
        }
        Ok(())
    }
}
