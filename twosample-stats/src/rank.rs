//! Average ranking with tie bookkeeping.
//!
//! Rank-based tests need both the mid-ranks and the sizes of the tie groups
//! (for the variance correction), so [`rank_average`] returns them together.

/// Mid-ranks of a data set plus the sizes of its tie groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// 1-based average rank of each input value, in input order.
    pub ranks: Vec<f64>,
    /// Size of every group of equal values with more than one member.
    pub tie_groups: Vec<usize>,
}

impl Ranking {
    /// Whether any two values were equal.
    pub fn has_ties(&self) -> bool {
        !self.tie_groups.is_empty()
    }

    /// Σ (t³ - t) over tie groups, the term in the tie-corrected variance.
    pub fn tie_term(&self) -> f64 {
        self.tie_groups
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }
}

/// Assign average ranks to `data`: tied values receive the mean of the ranks
/// they would otherwise occupy.
///
/// Empty input produces an empty ranking.
pub fn rank_average(data: &[f64]) -> Ranking {
    let n = data.len();
    let mut indexed: Vec<(f64, usize)> = data
        .iter()
        .copied()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();
    indexed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut ranks = vec![0.0; n];
    let mut tie_groups = Vec::new();

    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && indexed[j].0 == indexed[i].0 {
            j += 1;
        }
        // Ranks in the group are (i+1)..=j, so their mean is (i+1+j)/2.
        let rank_val = (i + 1 + j) as f64 / 2.0;
        for &(_, orig_idx) in &indexed[i..j] {
            ranks[orig_idx] = rank_val;
        }
        if j - i > 1 {
            tie_groups.push(j - i);
        }
        i = j;
    }

    Ranking { ranks, tie_groups }
}

// ── Tests ──────────────────────────────────────────────────────────────────
