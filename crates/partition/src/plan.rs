use std::time::Instant;

use lkb_common::metrics::global_metrics;
use lkb_common::{Result, ScanConfig};
use tracing::debug;

use crate::pack::{pack_fragments, FileFragment, FilePartition};

/// Plan one table scan from a pruned fragment list.
///
/// Derives the effective split budget from the scan config and the total
/// fragment bytes, packs, and records plan-level observability. The
/// partitioning itself depends only on the inputs; repeated calls with the
/// same fragments and config produce the same scan units.
pub fn plan_scan(
    table: &str,
    fragments: &[FileFragment],
    config: &ScanConfig,
) -> Result<Vec<FilePartition>> {
    config.validate()?;
    let started = Instant::now();

    let total_bytes = fragments
        .iter()
        .map(|f| f.length)
        .fold(0_i64, i64::saturating_add);
    let max_split_bytes = config.effective_split_bytes(total_bytes);

    let partitions = pack_fragments(fragments, max_split_bytes, config.open_cost_bytes)?;

    let oversized = fragments
        .iter()
        .filter(|f| f.length > max_split_bytes)
        .count();
    debug!(
        table,
        fragments = fragments.len(),
        partitions = partitions.len(),
        total_bytes,
        max_split_bytes,
        "planned table scan"
    );
    global_metrics().record_scan_plan(
        table,
        partitions.len() as u64,
        fragments.len() as u64,
        total_bytes.max(0) as u64,
        oversized as u64,
        started.elapsed().as_secs_f64(),
    );
    Ok(partitions)
}
