// crates/lf_physics/src/collision/bgk.rs

//! BGK 单松弛时间算子
//!
//! `f' = f - ω·(f - f_eq)`，最简单的碰撞模型，高雷诺数下
//! 数值稳定性最差。

use lf_foundation::Scalar;
use lf_lattice::Lattice;

use super::{equilibrium_all, moments, CollideStream, Moments};
use crate::types::RelaxationScaled;

/// BGK 单松弛时间碰撞
#[derive(Debug, Clone, Copy, Default)]
pub struct Bgk;

impl<S: Scalar, L: Lattice> CollideStream<S, L> for Bgk {
    const NAME: &'static str = "bgk";

    #[inline(always)]
    fn collide(f: &mut [S; 32], relax: &RelaxationScaled<S>) -> Moments<S> {
        let m = moments::<S, L>(f);
        let mut feq = [S::ZERO; 32];
        equilibrium_all::<S, L>(m.rho, &m.u, &mut feq);
        let omega = relax.omega;
        for s in 0..L::ND {
            f[s] -= omega * (f[s] - feq[s]);
        }
        m
    }
}
