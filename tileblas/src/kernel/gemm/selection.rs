use serde::{Deserialize, Serialize};

use super::GemmVariant;
use crate::Transpose;

/// Transposition of the two GEMM operands, the first key of the selection tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransposeCombination {
    /// Neither operand transposed.
    NoTransAB,
    /// A untransposed, B transposed.
    NoTransA,
    /// A transposed, B untransposed.
    NoTransB,
    /// Both operands transposed.
    TransAB,
}

impl TransposeCombination {
    pub fn new(
        transpose_a: Transpose,
        transpose_b: Transpose,
    ) -> Self {
        match (transpose_a.is_transposed(), transpose_b.is_transposed()) {
            (false, false) => TransposeCombination::NoTransAB,
            (false, true) => TransposeCombination::NoTransA,
            (true, false) => TransposeCombination::NoTransB,
            (true, true) => TransposeCombination::TransAB,
        }
    }

    /// Variants the selection table can pick for this combination.
    pub fn eligible_variants(&self) -> &'static [GemmVariant] {
        match self {
            TransposeCombination::NoTransAB => {
                &[GemmVariant::Step8x8, GemmVariant::Step16x16, GemmVariant::Micro16x2]
            },
            TransposeCombination::NoTransA => {
                &[GemmVariant::Step8x8, GemmVariant::LoopUnroll16, GemmVariant::Micro16x2]
            },
            TransposeCombination::NoTransB => &[GemmVariant::Micro16x2],
            TransposeCombination::TransAB => &[
                GemmVariant::LoopUnroll16,
                GemmVariant::Step8x8,
                GemmVariant::Micro8x2,
                GemmVariant::Micro16x2,
            ],
        }
    }

    /// Picks the variant tuned for an `m x n x k` problem.
    ///
    /// Thresholds are performance heuristics; every variant is correct for
    /// every shape.
    pub fn select(
        &self,
        m: usize,
        n: usize,
        k: usize,
    ) -> GemmVariant {
        match self {
            TransposeCombination::NoTransAB => select_no_trans_ab(m, n, k),
            TransposeCombination::NoTransA => select_no_trans_a(m, n, k),
            TransposeCombination::NoTransB => GemmVariant::Micro16x2,
            TransposeCombination::TransAB => select_trans_ab(m, n, k),
        }
    }
}

fn select_no_trans_ab(
    m: usize,
    n: usize,
    k: usize,
) -> GemmVariant {
    if (m < 600 && n < 600 && k < 10) || (m < 1800 && n < 600 && k < 600) {
        GemmVariant::Step8x8
    } else if (m < 600 && n < 600 && k < 1800) || (m < 1800 && ((n < 600 && k < 1800) || (n < 1800 && k < 10))) {
        GemmVariant::Step16x16
    } else {
        GemmVariant::Micro16x2
    }
}

fn select_no_trans_a(
    m: usize,
    n: usize,
    k: usize,
) -> GemmVariant {
    if ((10..6000).contains(&m) && n < 600 && k < 10)
        || ((600..1800).contains(&m) && n < 10 && (1800..6000).contains(&k))
        || (m < 600 && n < 600 && k > 1800 && k < 6000)
    {
        GemmVariant::Step8x8
    } else if (600..6000).contains(&m) && n < 600 && k < 600 {
        GemmVariant::Micro16x2
    } else if m > 1800 && m < 6000 && n < 600 && (1800..10000).contains(&k) {
        GemmVariant::LoopUnroll16
    } else {
        GemmVariant::Micro16x2
    }
}

fn select_trans_ab(
    m: usize,
    n: usize,
    k: usize,
) -> GemmVariant {
    if m < 600 && n < 600 && (600..1800).contains(&k) {
        GemmVariant::LoopUnroll16
    } else if (600..6000).contains(&m) && n < 600 && k < 1800 {
        GemmVariant::Micro16x2
    } else if (1800..6000).contains(&m) && n < 10 && (600..6000).contains(&k) {
        GemmVariant::Step8x8
    } else if (6000..10000).contains(&m) && n < 10 && (1800..6000).contains(&k) {
        GemmVariant::Micro8x2
    } else {
        GemmVariant::Micro16x2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combination_treats_conjugate_as_transposed() {
        assert_eq!(
            TransposeCombination::new(Transpose::ConjTrans, Transpose::NoTrans),
            TransposeCombination::NoTransB
        );
        assert_eq!(TransposeCombination::new(Transpose::NoTrans, Transpose::Trans), TransposeCombination::NoTransA);
        assert_eq!(TransposeCombination::new(Transpose::Trans, Transpose::ConjTrans), TransposeCombination::TransAB);
    }

    #[test]
    fn trans_ab_table() {
        let table = TransposeCombination::TransAB;
        assert_eq!(table.select(100, 100, 1000), GemmVariant::LoopUnroll16);
        assert_eq!(table.select(1000, 100, 100), GemmVariant::Micro16x2);
        assert_eq!(table.select(2000, 5, 3000), GemmVariant::Step8x8);
        assert_eq!(table.select(7000, 5, 3000), GemmVariant::Micro8x2);
        assert_eq!(table.select(100, 100, 100), GemmVariant::Micro16x2);
    }

    #[test]
    fn no_trans_b_is_always_micro16() {
        for (m, n, k) in [(1, 1, 1), (700, 5, 3000), (9000, 9000, 9000)] {
            assert_eq!(TransposeCombination::NoTransB.select(m, n, k), GemmVariant::Micro16x2);
        }
    }

    #[test]
    fn no_trans_a_table() {
        let table = TransposeCombination::NoTransA;
        assert_eq!(table.select(100, 100, 5), GemmVariant::Step8x8);
        assert_eq!(table.select(1000, 5, 2000), GemmVariant::Step8x8);
        assert_eq!(table.select(100, 100, 2000), GemmVariant::Step8x8);
        assert_eq!(table.select(100, 100, 1800), GemmVariant::Micro16x2);
        assert_eq!(table.select(1000, 100, 100), GemmVariant::Micro16x2);
        assert_eq!(table.select(3000, 100, 2000), GemmVariant::LoopUnroll16);
        assert_eq!(table.select(5, 5, 5), GemmVariant::Micro16x2);
    }

    #[test]
    fn no_trans_ab_table() {
        let table = TransposeCombination::NoTransAB;
        assert_eq!(table.select(2, 2, 2), GemmVariant::Step8x8);
        assert_eq!(table.select(1000, 100, 100), GemmVariant::Step8x8);
        assert_eq!(table.select(100, 100, 1000), GemmVariant::Step16x16);
        assert_eq!(table.select(1000, 1000, 5), GemmVariant::Step16x16);
        assert_eq!(table.select(2000, 2000, 2000), GemmVariant::Micro16x2);
    }

    #[test]
    fn selected_variant_is_always_eligible() {
        let combinations = [
            TransposeCombination::NoTransAB,
            TransposeCombination::NoTransA,
            TransposeCombination::NoTransB,
            TransposeCombination::TransAB,
        ];
        let sizes = [1, 9, 10, 599, 600, 1799, 1800, 1801, 5999, 6000, 9999, 10000];
        for combination in combinations {
            for &m in &sizes {
                for &n in &sizes {
                    for &k in &sizes {
                        let variant = combination.select(m, n, k);
                        assert!(combination.eligible_variants().contains(&variant), "{combination:?} {m} {n} {k}");
                    }
                }
            }
        }
    }
}
