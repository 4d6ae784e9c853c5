// crates/lf_physics/src/collision/mod.rs

//! 碰撞算子
//!
//! 三种算子共享一个 "碰撞单元" 能力（[`CollideStream`] trait），
//! 在编译期单态化选择，运行期零分派开销：
//!
//! - [`Bgk`]: 单松弛时间
//! - [`BgkSmagorinsky`]: BGK + Smagorinsky 亚格子湍流闭合
//! - [`Trt`]: 双松弛时间
//!
//! 算子是纯单元局部函数：输入已加载的分布与松弛参数，输出
//! 更新后的分布与宏观矩，不读写任何邻居状态。这一独立性是
//! 分块并行安全的前提。

mod bgk;
mod bgk_smagorinsky;
mod trt;

pub use bgk::Bgk;
pub use bgk_smagorinsky::BgkSmagorinsky;
pub use trt::Trt;

use lf_foundation::Scalar;
use lf_lattice::Lattice;

use crate::types::RelaxationScaled;

/// 单元宏观矩
#[derive(Debug, Clone, Copy)]
pub struct Moments<S> {
    /// 密度
    pub rho: S,
    /// 速度
    pub u: [S; 3],
}

/// 碰撞单元能力
///
/// 实现约定：幽灵槽与填充槽权重为 0，平衡分布恒为 0，算子
/// 必须保持这些槽位为 0。
pub trait CollideStream<S: Scalar, L: Lattice>: Send + Sync + 'static {
    /// 算子名（日志与报告用）
    const NAME: &'static str;

    /// 碰撞单个单元，返回碰撞前的宏观矩
    fn collide(f: &mut [S; 32], relax: &RelaxationScaled<S>) -> Moments<S>;
}

/// 由分布计算密度与速度
#[inline(always)]
pub fn moments<S: Scalar, L: Lattice>(f: &[S; 32]) -> Moments<S> {
    let mut rho = S::ZERO;
    let mut mx = S::ZERO;
    let mut my = S::ZERO;
    let mut mz = S::ZERO;
    for s in 0..L::ND {
        let fs = f[s];
        rho += fs;
        mx += fs * S::from_config(L::DX[s] as f64);
        my += fs * S::from_config(L::DY[s] as f64);
        mz += fs * S::from_config(L::DZ[s] as f64);
    }
    let inv = S::ONE / rho;
    Moments {
        rho,
        u: [mx * inv, my * inv, mz * inv],
    }
}

/// 单个槽位的平衡分布
///
/// `f_eq = ρ·w·(1 + 3(c·u) + 9/2(c·u)² - 3/2 u·u)`
#[inline(always)]
pub fn equilibrium<S: Scalar, L: Lattice>(slot: usize, rho: S, u: &[S; 3], uu: S) -> S {
    let three = S::from_config(3.0);
    let cu = u[0] * S::from_config(L::DX[slot] as f64)
        + u[1] * S::from_config(L::DY[slot] as f64)
        + u[2] * S::from_config(L::DZ[slot] as f64);
    let cu3 = three * cu;
    L::w::<S>(slot) * rho * (S::ONE + cu3 + S::HALF * cu3 * cu3 - S::from_config(1.5) * uu)
}

/// 全部槽位的平衡分布
#[inline(always)]
pub fn equilibrium_all<S: Scalar, L: Lattice>(rho: S, u: &[S; 3], out: &mut [S; 32]) {
    let uu = u[0] * u[0] + u[1] * u[1] + u[2] * u[2];
    for (slot, slot_out) in out.iter_mut().enumerate().take(L::ND) {
        *slot_out = equilibrium::<S, L>(slot, rho, u, uu);
    }
}
