// crates/lf_physics/src/collision/trt.rs

//! TRT 双松弛时间算子
//!
//! 分布按反向方向对分解为对称部分与反对称部分：
//!
//! ```text
//! f⁺ = (f_i + f_ī)/2    以 ω  弛豫（决定粘度）
//! f⁻ = (f_i - f_ī)/2    以 ω⁻ 弛豫（由魔参数 Λ 调节精度/稳定性）
//! ```
//!
//! 静止速度是自反向方向，只有对称部分，按 ω 弛豫。

use lf_foundation::Scalar;
use lf_lattice::Lattice;

use super::{equilibrium_all, moments, CollideStream, Moments};
use crate::types::RelaxationScaled;

/// TRT 双松弛时间碰撞
#[derive(Debug, Clone, Copy, Default)]
pub struct Trt;

impl<S: Scalar, L: Lattice> CollideStream<S, L> for Trt {
    const NAME: &'static str = "trt";

    #[inline(always)]
    fn collide(f: &mut [S; 32], relax: &RelaxationScaled<S>) -> Moments<S> {
        let m = moments::<S, L>(f);
        let mut feq = [S::ZERO; 32];
        equilibrium_all::<S, L>(m.rho, &m.u, &mut feq);

        let omega = relax.omega;
        let omega_m = relax.omega_m;

        // 静止速度：纯对称
        f[0] -= omega * (f[0] - feq[0]);

        for d in 1..L::HSPEED {
            let sp = d;
            let sm = L::OFF + d;
            let f_sym = S::HALF * (f[sp] + f[sm]);
            let f_asym = S::HALF * (f[sp] - f[sm]);
            let feq_sym = S::HALF * (feq[sp] + feq[sm]);
            let feq_asym = S::HALF * (feq[sp] - feq[sm]);
            let d_sym = omega * (f_sym - feq_sym);
            let d_asym = omega_m * (f_asym - feq_asym);
            f[sp] -= d_sym + d_asym;
            f[sm] -= d_sym - d_asym;
        }
        m
    }
}
