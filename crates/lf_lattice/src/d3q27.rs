// crates/lf_lattice/src/d3q27.rs

//! D3Q27 格子
//!
//! 三维 27 速格子，填充到每半区 16 槽（`ND = 32`），
//! 便于 256 位寄存器整批加载。

use crate::descriptor::Lattice;

/// D3Q27 速度集
///
/// 槽位布局（`s = n*16 + d`）：
///
/// - `(0,0)`: 静止速度，权重 8/27
/// - `(0,1..14)`: 13 个正方向
/// - `(1,0)`: 幽灵槽（权重 0）
/// - `(1,1..14)`: 13 个负方向
/// - `(*,14..16)`: 填充
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct D3Q27;

const W0: f64 = 8.0 / 27.0; // 静止速度
const WA: f64 = 2.0 / 27.0; // 面邻居 |c|=1
const WB: f64 = 1.0 / 54.0; // 棱邻居 |c|^2=2
const WC: f64 = 1.0 / 216.0; // 角邻居 |c|^2=3

impl Lattice for D3Q27 {
    const DIM: usize = 3;
    const SPEEDS: usize = 27;
    const HSPEED: usize = 14;
    const PAD: usize = 2;
    const OFF: usize = 16;
    const ND: usize = 32;

    const CS: f64 = 0.577_350_269_189_625_8;
    const CS2: f64 = 1.0 / 3.0;

    #[rustfmt::skip]
    const DX: [i32; 32] = [
        //     0  1  2  3  4  5  6  7  8  9 10 11 12 13 (p) (p)
               0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1,  0,  0,
               0,-1, 0, 0,-1,-1,-1,-1, 0, 0,-1,-1,-1,-1,  0,  0,
    ];

    #[rustfmt::skip]
    const DY: [i32; 32] = [
               0, 0, 1, 0, 1,-1, 0, 0, 1, 1, 1, 1,-1,-1,  0,  0,
               0, 0,-1, 0,-1, 1, 0, 0,-1,-1,-1,-1, 1, 1,  0,  0,
    ];

    #[rustfmt::skip]
    const DZ: [i32; 32] = [
               0, 0, 0, 1, 0, 0, 1,-1, 1,-1, 1,-1, 1,-1,  0,  0,
               0, 0, 0,-1, 0, 0,-1, 1,-1, 1,-1, 1,-1, 1,  0,  0,
    ];

    #[rustfmt::skip]
    const W: [f64; 32] = [
        W0, WA, WA, WA, WB, WB, WB, WB, WB, WB, WC, WC, WC, WC, 0.0, 0.0,
       0.0, WA, WA, WA, WB, WB, WB, WB, WB, WB, WC, WC, WC, WC, 0.0, 0.0,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    type L = D3Q27;

    #[test]
    fn test_layout_constants() {
        assert_eq!(L::ND, 2 * L::OFF);
        assert_eq!(L::OFF, L::HSPEED + L::PAD);
        assert_eq!(L::SPEEDS, 2 * (L::HSPEED - 1) + 1);
        assert!((L::CS * L::CS - L::CS2).abs() < 1e-15);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = L::W.iter().sum();
        assert!((sum - 1.0).abs() < 1e-14, "sum = {sum}");
    }

    #[test]
    fn test_physical_slot_count() {
        let count = (0..2)
            .flat_map(|n| (0..L::OFF).map(move |d| (n, d)))
            .filter(|&(n, d)| L::is_physical(n, d))
            .count();
        assert_eq!(count, L::SPEEDS);
    }

    #[test]
    fn test_closed_under_negation() {
        for d in 1..L::HSPEED {
            let pos = d;
            let neg = L::OFF + d;
            assert_eq!(L::DX[pos], -L::DX[neg]);
            assert_eq!(L::DY[pos], -L::DY[neg]);
            assert_eq!(L::DZ[pos], -L::DZ[neg]);
            assert_eq!(L::W[pos], L::W[neg]);
        }
    }

    #[test]
    fn test_inert_slots_are_zero() {
        for &s in &[L::OFF, 14, 15, L::OFF + 14, L::OFF + 15] {
            assert_eq!(L::W[s], 0.0);
            assert_eq!(L::c(s), [0, 0, 0]);
        }
    }

    #[test]
    fn test_first_moment_vanishes() {
        let (mut mx, mut my, mut mz) = (0.0f64, 0.0, 0.0);
        for s in 0..L::ND {
            mx += L::W[s] * L::DX[s] as f64;
            my += L::W[s] * L::DY[s] as f64;
            mz += L::W[s] * L::DZ[s] as f64;
        }
        assert!(mx.abs() < 1e-15 && my.abs() < 1e-15 && mz.abs() < 1e-15);
    }

    #[test]
    fn test_second_moment_is_isotropic() {
        // sum_i w_i c_ia c_ib = cs^2 delta_ab
        for (a, b) in [(0, 0), (1, 1), (2, 2), (0, 1), (0, 2), (1, 2)] {
            let comp = |s: usize, axis: usize| match axis {
                0 => L::DX[s] as f64,
                1 => L::DY[s] as f64,
                _ => L::DZ[s] as f64,
            };
            let m: f64 = (0..L::ND).map(|s| L::W[s] * comp(s, a) * comp(s, b)).sum();
            let expected = if a == b { L::CS2 } else { 0.0 };
            assert!((m - expected).abs() < 1e-14, "({a},{b}): {m}");
        }
    }

    #[test]
    fn test_opposite_mapping() {
        assert_eq!(L::opposite(0, 0), (0, 0));
        assert_eq!(L::opposite(1, 0), (1, 0));
        assert_eq!(L::opposite(0, 5), (1, 5));
        assert_eq!(L::opposite(1, 5), (0, 5));
    }
}
