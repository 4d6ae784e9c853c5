// crates/lf_lattice/src/descriptor.rs

//! 速度集描述符 trait
//!
//! 描述符是纯编译期数据：速度向量、权重、声速以及内存布局常量，
//! 不含任何行为。物理内核对描述符单态化后，所有表访问都会被
//! 常量折叠。

use lf_foundation::Scalar;

/// 离散速度集描述符
///
/// # 布局约定
///
/// 所有表长度均为 [`Lattice::ND`]，按槽位 `s = n*OFF + d` 索引。
/// 未使用的槽位（幽灵槽、填充槽）权重为 0、速度为 0。
///
/// # 不变量
///
/// - 权重之和为 1
/// - 速度集在取反下封闭：槽 `(0,d)` 与 `(1,d)`（`d ≥ 1`）互为反向
/// - `ND == 2 * OFF`，`HSPEED <= OFF`
pub trait Lattice: Copy + Send + Sync + 'static {
    /// 空间维数
    const DIM: usize;

    /// 离散速度数（物理上有意义的方向数，含静止速度）
    const SPEEDS: usize;

    /// 半速度数：一个半区内有效槽位数（静止速度或幽灵槽 + 正/负方向）
    const HSPEED: usize;

    /// 每个半区尾部的 SIMD 对齐填充槽数
    const PAD: usize;

    /// 半区步长：`HSPEED + PAD`
    const OFF: usize;

    /// 每个单元存储的槽位总数：`2 * OFF`
    const ND: usize;

    /// 格子声速 `c_s`
    const CS: f64;

    /// 格子声速平方 `c_s^2`
    const CS2: f64;

    /// 各槽位速度的 x 分量
    const DX: [i32; 32];

    /// 各槽位速度的 y 分量
    const DY: [i32; 32];

    /// 各槽位速度的 z 分量
    const DZ: [i32; 32];

    /// 各槽位权重（幽灵槽与填充槽为 0）
    const W: [f64; 32];

    /// 槽位权重，转换到计算精度
    #[inline(always)]
    fn w<S: Scalar>(slot: usize) -> S {
        S::from_config(Self::W[slot])
    }

    /// 槽位速度向量
    #[inline(always)]
    fn c(slot: usize) -> [i32; 3] {
        [Self::DX[slot], Self::DY[slot], Self::DZ[slot]]
    }

    /// 反向槽位：静止速度映射到自身，其余映射到另一半区的同序槽
    #[inline(always)]
    fn opposite(n: usize, d: usize) -> (usize, usize) {
        if d == 0 {
            (n, d)
        } else {
            (1 - n, d)
        }
    }

    /// 判断槽位是否携带物理分布（非幽灵、非填充）
    #[inline(always)]
    fn is_physical(n: usize, d: usize) -> bool {
        d < Self::HSPEED && !(n == 1 && d == 0)
    }
}
