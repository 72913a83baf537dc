use lkb_common::{LkbError, Result, SplitId};
use serde::{Deserialize, Serialize};

/// Physical readable unit of storage with a known byte length.
///
/// Lengths are signed because upstream catalog metadata reports signed 64-bit
/// sizes; a negative length is rejected at planning time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFragment {
    pub path: String,
    pub length: i64,
}

impl FileFragment {
    pub fn new(path: impl Into<String>, length: i64) -> Self {
        Self {
            path: path.into(),
            length,
        }
    }
}

/// Ordered group of fragments assigned as one unit of parallel read work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePartition {
    pub index: SplitId,
    pub fragments: Vec<FileFragment>,
}

impl FilePartition {
    /// Sum of fragment lengths without the open-cost overhead.
    pub fn raw_bytes(&self) -> i64 {
        self.fragments.iter().map(|f| f.length).sum()
    }

    /// Accounted size under the packing cost model.
    pub fn accounted_bytes(&self, open_cost_bytes: i64) -> i64 {
        self.fragments
            .iter()
            .map(|f| f.length.saturating_add(open_cost_bytes))
            .fold(0_i64, i64::saturating_add)
    }
}

/// Group fragments into scan partitions bounded by `max_split_bytes`.
///
/// Single forward pass in input order, no sorting, no lookahead: the current
/// partition closes before admitting a fragment only when the fragment's
/// length would push the accounted size past the budget and the partition
/// already holds something. A fragment is then always admitted, so a fragment
/// larger than the budget occupies a partition alone rather than being split.
/// Each admission charges `length + open_cost_bytes` against the budget.
///
/// Output order is exactly input order across and within partitions, with
/// sequential [`SplitId`]s from 0. Callers rely on these boundaries being
/// stable for identical input, so the input order is part of the contract.
pub fn pack_fragments(
    fragments: &[FileFragment],
    max_split_bytes: i64,
    open_cost_bytes: i64,
) -> Result<Vec<FilePartition>> {
    if max_split_bytes <= 0 {
        return Err(LkbError::InvalidConfig(format!(
            "max_split_bytes must be positive, got {max_split_bytes}"
        )));
    }
    if open_cost_bytes < 0 {
        return Err(LkbError::InvalidConfig(format!(
            "open_cost_bytes must be non-negative, got {open_cost_bytes}"
        )));
    }
    for fragment in fragments {
        if fragment.length < 0 {
            return Err(LkbError::InvalidFragment(format!(
                "fragment {} has negative length {}",
                fragment.path, fragment.length
            )));
        }
    }

    let mut partitions: Vec<FilePartition> = Vec::new();
    let mut current: Vec<FileFragment> = Vec::new();
    let mut current_bytes = 0_i64;
    for fragment in fragments {
        if !current.is_empty() && current_bytes.saturating_add(fragment.length) > max_split_bytes {
            close_partition(&mut partitions, &mut current);
            current_bytes = 0;
        }
        current_bytes = current_bytes
            .saturating_add(fragment.length)
            .saturating_add(open_cost_bytes);
        current.push(fragment.clone());
    }
    if !current.is_empty() {
        close_partition(&mut partitions, &mut current);
    }
    Ok(partitions)
}

fn close_partition(partitions: &mut Vec<FilePartition>, current: &mut Vec<FileFragment>) {
    let index = SplitId(partitions.len() as u32);
    partitions.push(FilePartition {
        index,
        fragments: std::mem::take(current),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frags(lengths: &[i64]) -> Vec<FileFragment> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, len)| FileFragment::new(format!("part-{i}.parquet"), *len))
            .collect()
    }

    fn lengths(partition: &FilePartition) -> Vec<i64> {
        partition.fragments.iter().map(|f| f.length).collect()
    }

    #[test]
    fn packs_in_input_order_without_sorting() {
        // 50 alone: admitting 60 at accounted size 50 would reach 110 > 100.
        let out = pack_fragments(&frags(&[50, 60, 10]), 100, 0).expect("pack");
        assert_eq!(out.len(), 2);
        assert_eq!(lengths(&out[0]), vec![50]);
        assert_eq!(lengths(&out[1]), vec![60, 10]);
        assert_eq!(out[0].index, SplitId(0));
        assert_eq!(out[1].index, SplitId(1));
    }

    #[test]
    fn empty_input_yields_no_partitions() {
        let out = pack_fragments(&[], 100, 10).expect("pack");
        assert!(out.is_empty());
    }

    #[test]
    fn open_cost_counts_against_admitted_fragments() {
        // budget 100, cost 20: f0 admits at 50, f1 reaches accounted 100,
        // f2 would need 130 so it opens the next partition.
        let out = pack_fragments(&frags(&[30, 30, 30]), 100, 20).expect("pack");
        assert_eq!(out.len(), 2);
        assert_eq!(lengths(&out[0]), vec![30, 30]);
        assert_eq!(lengths(&out[1]), vec![30]);
    }

    #[test]
    fn oversized_fragment_sits_alone() {
        let out = pack_fragments(&frags(&[10, 500, 10]), 100, 0).expect("pack");
        assert_eq!(out.len(), 3);
        assert_eq!(lengths(&out[0]), vec![10]);
        assert_eq!(lengths(&out[1]), vec![500]);
        assert_eq!(lengths(&out[2]), vec![10]);
    }

    #[test]
    fn leading_oversized_fragment_starts_its_own_partition() {
        let out = pack_fragments(&frags(&[500, 10, 10]), 100, 0).expect("pack");
        assert_eq!(out.len(), 2);
        assert_eq!(lengths(&out[0]), vec![500]);
        assert_eq!(lengths(&out[1]), vec![10, 10]);
    }

    #[test]
    fn zero_length_fragments_are_admitted() {
        let out = pack_fragments(&frags(&[0, 0, 0]), 10, 4).expect("pack");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].fragments.len(), 3);
        assert_eq!(out[0].accounted_bytes(4), 12);
    }

    #[test]
    fn conserves_fragments_exactly() {
        let input = frags(&[10, 90, 5, 5, 200, 1, 64, 30, 30, 30]);
        let out = pack_fragments(&input, 100, 7).expect("pack");
        let flattened: Vec<FileFragment> = out
            .iter()
            .flat_map(|p| p.fragments.iter().cloned())
            .collect();
        assert_eq!(flattened, input);
        for (i, p) in out.iter().enumerate() {
            assert_eq!(p.index, SplitId(i as u32));
            assert!(!p.fragments.is_empty());
        }
    }

    #[test]
    fn repacking_identical_input_gives_identical_boundaries() {
        let input = frags(&[33, 12, 99, 100, 1, 1, 1, 58]);
        let a = pack_fragments(&input, 100, 5).expect("pack");
        let b = pack_fragments(&input, 100, 5).expect("pack");
        assert_eq!(a, b);
    }

    #[test]
    fn reordered_input_changes_the_partitioning() {
        let forward = pack_fragments(&frags(&[50, 60, 10]), 100, 0).expect("pack");
        let reversed = pack_fragments(&frags(&[10, 60, 50]), 100, 0).expect("pack");
        assert_ne!(
            forward.iter().map(lengths).collect::<Vec<_>>(),
            reversed.iter().map(lengths).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rejects_non_positive_budget() {
        let err = pack_fragments(&frags(&[1]), 0, 0).unwrap_err();
        assert!(matches!(err, LkbError::InvalidConfig(_)));
        let err = pack_fragments(&frags(&[1]), -5, 0).unwrap_err();
        assert!(matches!(err, LkbError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_negative_open_cost() {
        let err = pack_fragments(&frags(&[1]), 100, -1).unwrap_err();
        assert!(matches!(err, LkbError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_negative_fragment_length() {
        let input = vec![
            FileFragment::new("ok.parquet", 10),
            FileFragment::new("corrupt.parquet", -1),
        ];
        let err = pack_fragments(&input, 100, 0).unwrap_err();
        match err {
            LkbError::InvalidFragment(msg) => assert!(msg.contains("corrupt.parquet")),
            other => panic!("expected InvalidFragment, got {other:?}"),
        }
    }
}
