//! Seeded, stratified train/test split

use crate::encode::LungCapClass;
use lungcap_core::{Error, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Row indices of each partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Test rows per class: floors of the proportional share, then the leftover
/// rows to the largest remainders (earlier classes win ties)
fn allocate(class_counts: &[usize], n_test: usize) -> Vec<usize> {
    let n: usize = class_counts.iter().sum();
    let exact: Vec<f64> = class_counts
        .iter()
        .map(|&c| n_test as f64 * c as f64 / n as f64)
        .collect();
    let mut alloc: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut order: Vec<usize> = (0..class_counts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    let leftover = n_test - alloc.iter().sum::<usize>();
    for &class in order.iter().take(leftover) {
        alloc[class] += 1;
    }
    alloc
}

/// Split rows so each class keeps its share in the test set
///
/// The test set holds `ceil(test_fraction * n)` rows. Both partitions come
/// back shuffled; the same seed and labels always give the same split.
pub fn stratified_split(
    labels: &[LungCapClass],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::invalid_probability("Test fraction", test_fraction));
    }
    let n = labels.len();
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }

    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); LungCapClass::ALL.len()];
    for (i, label) in labels.iter().enumerate() {
        by_class[label.index()].push(i);
    }
    if let Some(class) = LungCapClass::ALL.iter().find(|c| by_class[c.index()].len() < 2) {
        return Err(Error::InvalidInput(format!(
            "Class '{class}' has fewer than two members; cannot stratify"
        )));
    }

    let counts: Vec<usize> = by_class.iter().map(Vec::len).collect();
    let alloc = allocate(&counts, n_test);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut split = TrainTestSplit {
        train: Vec::with_capacity(n - n_test),
        test: Vec::with_capacity(n_test),
    };
    for (mut members, take) in by_class.into_iter().zip(alloc) {
        members.shuffle(&mut rng);
        split.test.extend_from_slice(&members[..take]);
        split.train.extend_from_slice(&members[take..]);
    }
    split.train.shuffle(&mut rng);
    split.test.shuffle(&mut rng);

    debug!(train = split.train.len(), test = split.test.len(), "stratified split");
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LungCapClass::{High, Low};

    #[test]
    fn test_allocation_largest_remainder() {
        // 131 * 327 / 654 = 65.5 for both classes; the tie goes to the first
        assert_eq!(allocate(&[327, 327], 131), vec![66, 65]);
        assert_eq!(allocate(&[70, 30], 20), vec![14, 6]);
        assert_eq!(allocate(&[5, 2], 2), vec![1, 1]);
    }

    #[test]
    fn test_sizes_and_disjointness() {
        let labels: Vec<_> = (0..654).map(|i| if i % 2 == 0 { Low } else { High }).collect();
        let split = stratified_split(&labels, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 131);
        assert_eq!(split.train.len(), 523);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..654).collect::<Vec<_>>());
    }

    #[test]
    fn test_deterministic_for_seed() {
        let labels: Vec<_> = (0..50).map(|i| if i % 3 == 0 { High } else { Low }).collect();
        let a = stratified_split(&labels, 0.2, 42).unwrap();
        let b = stratified_split(&labels, 0.2, 42).unwrap();
        let c = stratified_split(&labels, 0.2, 7).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let labels = vec![Low, Low, Low, High];
        assert!(stratified_split(&labels, 0.5, 1).is_err());
        assert!(stratified_split(&[Low, High, Low, High], 1.5, 1).is_err());
    }
}
