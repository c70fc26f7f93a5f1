//! Fold construction for the three partitioning methods.

use naiad_segments::RecessionSegment;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::{CvConfig, CvMethod};

/// Segment indices of one fold.
#[derive(Debug, Clone)]
pub(crate) struct FoldIndices {
    pub(crate) train: Vec<usize>,
    pub(crate) validation: Vec<usize>,
}

/// Partitions segment indices into folds per the configured method.
///
/// Requires at least 2 segments (checked by the caller). k-fold shuffles
/// with a seeded generator and clamps k to the segment count, so every fold
/// validates at least one segment and the partition is deterministic.
pub(crate) fn build_folds(segments: &[RecessionSegment], config: &CvConfig) -> Vec<FoldIndices> {
    let n = segments.len();
    match config.method() {
        CvMethod::KFold => {
            let mut indices: Vec<usize> = (0..n).collect();
            let mut rng = StdRng::seed_from_u64(config.seed());
            indices.shuffle(&mut rng);

            let k = config.k().min(n);
            (0..k)
                .map(|fold| {
                    let mut train = Vec::with_capacity(n - n / k);
                    let mut validation = Vec::with_capacity(n / k + 1);
                    for (pos, &idx) in indices.iter().enumerate() {
                        if pos % k == fold {
                            validation.push(idx);
                        } else {
                            train.push(idx);
                        }
                    }
                    FoldIndices { train, validation }
                })
                .collect()
        }
        CvMethod::LeaveOneOut => (0..n)
            .map(|held_out| FoldIndices {
                train: (0..n).filter(|&i| i != held_out).collect(),
                validation: vec![held_out],
            })
            .collect(),
        CvMethod::TemporalSplit => {
            let mut by_start: Vec<usize> = (0..n).collect();
            by_start.sort_by_key(|&i| segments[i].start_ts());

            let n_train = ((0.7 * n as f64).ceil() as usize).clamp(1, n - 1);
            vec![FoldIndices {
                train: by_start[..n_train].to_vec(),
                validation: by_start[n_train..].to_vec(),
            }]
        }
    }
}
