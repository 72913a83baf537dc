use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use lkb_common::{BucketId, LkbError, Result};

use crate::bucket::{BucketHasher, RecordKey};

/// Reference bucket-hash oracle for embedded and test deployments.
///
/// Record keys come in two shapes: a plain value, or `field:value` pairs
/// joined by `,` (e.g. `uuid:42,ts:1700000000`). For the pair shape, only the
/// values of the fields named in `index_key_fields` feed the hash, in the
/// order the field list names them; records that agree on those values bucket
/// together no matter what the other fields hold. Production engines inject
/// their own [`BucketHasher`] instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldHashBucketHasher;

impl BucketHasher for FieldHashBucketHasher {
    fn bucket_id(
        &self,
        key: &RecordKey,
        index_key_fields: &str,
        bucket_count: u32,
    ) -> Result<BucketId> {
        if bucket_count == 0 {
            return Err(LkbError::InvalidConfig(
                "bucket_count must be positive".to_string(),
            ));
        }
        let mut h = DefaultHasher::new();
        if key.record_key.contains(':') {
            for field in index_key_fields.split(',') {
                let field = field.trim();
                let value = key
                    .record_key
                    .split(',')
                    .filter_map(|pair| pair.split_once(':'))
                    .find(|(name, _)| name.trim() == field)
                    .map(|(_, value)| value)
                    .ok_or_else(|| {
                        LkbError::KeyResolution(format!(
                            "record key {:?} has no field {field:?}",
                            key.record_key
                        ))
                    })?;
                value.hash(&mut h);
            }
        } else {
            key.record_key.hash(&mut h);
        }
        Ok(BucketId((h.finish() % u64::from(bucket_count)) as u32))
    }
}
