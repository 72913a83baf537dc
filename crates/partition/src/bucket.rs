use std::sync::Arc;

use lkb_common::{BucketId, LkbError, Result, WriteConfig, WriterSlot};
use serde::{Deserialize, Serialize};

/// Write-path record identifier: partition path plus record key.
///
/// Opaque to the assigner; only hash-oracle implementations look inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub partition_path: String,
    pub record_key: String,
}

impl RecordKey {
    pub fn new(partition_path: impl Into<String>, record_key: impl Into<String>) -> Self {
        Self {
            partition_path: partition_path.into(),
            record_key: record_key.into(),
        }
    }
}

/// Bucket-hash oracle injected by the host engine.
///
/// Implementations must be deterministic and total over syntactically valid
/// keys, and must return a bucket in `[0, bucket_count)`.
pub trait BucketHasher: Send + Sync {
    fn bucket_id(
        &self,
        key: &RecordKey,
        index_key_fields: &str,
        bucket_count: u32,
    ) -> Result<BucketId>;
}

/// Routes records to parallel writer slots by table bucket.
///
/// All records sharing a bucket land on the same slot for a fixed slot count,
/// independent of arrival order, restarts, or concurrent callers. The slot
/// count may differ from the bucket count (typically fewer slots).
pub struct BucketAssigner {
    bucket_count: u32,
    index_key_fields: String,
    hasher: Arc<dyn BucketHasher>,
}

impl std::fmt::Debug for BucketAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketAssigner")
            .field("bucket_count", &self.bucket_count)
            .field("index_key_fields", &self.index_key_fields)
            .finish_non_exhaustive()
    }
}

impl BucketAssigner {
    /// Bucket count and index key fields are fixed per table.
    pub fn try_new(
        bucket_count: u32,
        index_key_fields: impl Into<String>,
        hasher: Arc<dyn BucketHasher>,
    ) -> Result<Self> {
        if bucket_count == 0 {
            return Err(LkbError::InvalidConfig(
                "bucket_count must be positive".to_string(),
            ));
        }
        let index_key_fields = index_key_fields.into();
        if index_key_fields.is_empty() {
            return Err(LkbError::InvalidConfig(
                "index_key_fields must name at least one field".to_string(),
            ));
        }
        Ok(Self {
            bucket_count,
            index_key_fields,
            hasher,
        })
    }

    /// Build from a table's write configuration.
    pub fn from_config(config: &WriteConfig, hasher: Arc<dyn BucketHasher>) -> Result<Self> {
        config.validate()?;
        Self::try_new(config.bucket_count, config.index_key_fields.clone(), hasher)
    }

    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    /// Writer slot for one record under the current job topology.
    ///
    /// `slot_count` is the number of active writer instances; it changes only
    /// between deployments, never mid-run. Oracle failures propagate
    /// unchanged.
    pub fn assign(&self, key: &RecordKey, slot_count: u32) -> Result<WriterSlot> {
        if slot_count == 0 {
            return Err(LkbError::InvalidConfig(
                "slot_count must be positive".to_string(),
            ));
        }
        let bucket = self
            .hasher
            .bucket_id(key, &self.index_key_fields, self.bucket_count)?;
        Ok(WriterSlot(bucket.0 % slot_count))
    }
}
