// crates/lf_physics/src/boundary/guo.rs

//! Guo 非平衡外推开边界
//!
//! 从目标宏观条件重建边界节点的全部分布：
//!
//! ```text
//! f_b = f_eq(目标矩) + (f_邻 - f_eq(邻居矩))
//! ```
//!
//! 速度边界（入口）指定 `u`，密度取内侧邻居；压力边界（出口）
//! 指定 `ρ`，速度取内侧邻居。非平衡部分从内侧邻居外推，精度
//! 优于一阶外推。
//!
//! 重建结果写入本相位碰撞 pass 的读取位置，因此必须在同一
//! 相位的碰撞 pass 之前执行。每个读取位置只被唯一的
//! `(单元, 方向)` 消费，元素间写入互不重叠，可无锁并行。

use rayon::prelude::*;

use lf_foundation::Scalar;
use lf_lattice::Lattice;

use super::{BoundaryElement, Orientation};
use crate::collision::{equilibrium_all, moments};
use crate::population::{Layout, PopulationView};
use crate::types::Parity;

/// Guo 边界类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuoKind {
    /// 指定速度（入口），密度取内侧邻居
    Velocity,
    /// 指定密度/压力（出口），速度取内侧邻居
    Pressure,
}

/// 对一个面的边界元素列表执行 Guo 重建
pub fn apply<S: Scalar, L: Lattice>(
    view: PopulationView<S>,
    layout: Layout<L>,
    parity: Parity,
    kind: GuoKind,
    orientation: Orientation,
    elements: &[BoundaryElement],
) {
    let normal = orientation.normal();
    elements.par_iter().for_each(|elem| {
        // 内侧邻居（几何保证在域内）
        let ix = (elem.x as i64 + normal[0] as i64) as usize;
        let iy = (elem.y as i64 + normal[1] as i64) as usize;
        let iz = (elem.z as i64 + normal[2] as i64) as usize;

        let mut f_n = [S::ZERO; 32];
        unsafe {
            view.load(
                &layout,
                parity,
                &layout.window_x(ix),
                &layout.window_y(iy),
                &layout.window_z(iz),
                0,
                &mut f_n,
            );
        }
        let m_n = moments::<S, L>(&f_n);

        let (rho_t, u_t) = match kind {
            GuoKind::Velocity => (
                m_n.rho,
                [
                    S::from_config(elem.u[0]),
                    S::from_config(elem.u[1]),
                    S::from_config(elem.u[2]),
                ],
            ),
            GuoKind::Pressure => (S::from_config(elem.rho), m_n.u),
        };

        let mut feq_n = [S::ZERO; 32];
        equilibrium_all::<S, L>(m_n.rho, &m_n.u, &mut feq_n);
        let mut f_b = [S::ZERO; 32];
        equilibrium_all::<S, L>(rho_t, &u_t, &mut f_b);
        for s in 0..L::ND {
            f_b[s] += f_n[s] - feq_n[s];
        }

        unsafe {
            view.store_at_read(
                &layout,
                parity,
                &layout.window_x(elem.x),
                &layout.window_y(elem.y),
                &layout.window_z(elem.z),
                0,
                &f_b,
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::equilibrium_all;
    use crate::population::Population;
    use crate::types::Relaxation;
    use lf_lattice::D3Q27;

    type L = D3Q27;
    type Pop = Population<f64, L>;

    fn relax() -> Relaxation {
        Relaxation::from_tau::<L>(0.6, 0.25).unwrap()
    }

    /// 全域填充平衡分布到给定相位的读取位置
    fn fill_equilibrium(pop: &mut Pop, parity: Parity, rho: f64, u: [f64; 3]) {
        let lay = pop.layout();
        let mut feq = [0.0; 32];
        equilibrium_all::<f64, L>(rho, &u, &mut feq);
        for z in 0..lay.nz() {
            for y in 0..lay.ny() {
                for x in 0..lay.nx() {
                    pop.store_at_read(
                        parity,
                        &lay.window_x(x),
                        &lay.window_y(y),
                        &lay.window_z(z),
                        0,
                        &feq,
                    );
                }
            }
        }
    }

    #[test]
    fn test_velocity_inlet_imposes_target_velocity() {
        // 邻居处于 (ρ=1, u=0.02) 平衡态，入口目标 u=0.05：
        // 重建后边界读取位置的矩应为 (ρ_邻, u 目标)
        let mut pop = Pop::new(6, 4, 4, relax());
        let lay = pop.layout();
        fill_equilibrium(&mut pop, Parity::Even, 1.0, [0.02, 0.0, 0.0]);

        let inlet: Vec<_> = (0..4)
            .flat_map(|z| (0..4).map(move |y| BoundaryElement {
                x: 0,
                y,
                z,
                rho: 1.0,
                u: [0.05, 0.0, 0.0],
            }))
            .collect();

        apply(
            pop.view(),
            lay,
            Parity::Even,
            GuoKind::Velocity,
            Orientation::Left,
            &inlet,
        );

        let mut f = [0.0; 32];
        pop.load(
            Parity::Even,
            &lay.window_x(0),
            &lay.window_y(2),
            &lay.window_z(2),
            0,
            &mut f,
        );
        let m = moments::<f64, L>(&f);
        assert!((m.rho - 1.0).abs() < 1e-12, "rho = {}", m.rho);
        assert!((m.u[0] - 0.05).abs() < 1e-12, "ux = {}", m.u[0]);
        assert!(m.u[1].abs() < 1e-12 && m.u[2].abs() < 1e-12);
    }

    #[test]
    fn test_pressure_outlet_imposes_target_density() {
        let mut pop = Pop::new(6, 4, 4, relax());
        let lay = pop.layout();
        fill_equilibrium(&mut pop, Parity::Odd, 1.05, [0.03, 0.0, 0.0]);

        let outlet: Vec<_> = (0..4)
            .flat_map(|z| (0..4).map(move |y| BoundaryElement {
                x: 5,
                y,
                z,
                rho: 1.0,
                u: [0.0; 3],
            }))
            .collect();

        apply(
            pop.view(),
            lay,
            Parity::Odd,
            GuoKind::Pressure,
            Orientation::Right,
            &outlet,
        );

        let mut f = [0.0; 32];
        pop.load(
            Parity::Odd,
            &lay.window_x(5),
            &lay.window_y(1),
            &lay.window_z(2),
            0,
            &mut f,
        );
        let m = moments::<f64, L>(&f);
        assert!((m.rho - 1.0).abs() < 1e-12, "rho = {}", m.rho);
        // 速度继承自内侧邻居
        assert!((m.u[0] - 0.03).abs() < 1e-12, "ux = {}", m.u[0]);
    }

    #[test]
    fn test_equilibrium_neighbour_gives_pure_equilibrium() {
        // 邻居恰为平衡态时，非平衡外推项为零，
        // 重建结果就是目标矩的平衡分布
        let mut pop = Pop::new(6, 4, 4, relax());
        let lay = pop.layout();
        fill_equilibrium(&mut pop, Parity::Even, 1.0, [0.05, 0.0, 0.0]);

        let elem = [BoundaryElement {
            x: 0,
            y: 2,
            z: 2,
            rho: 1.0,
            u: [0.05, 0.0, 0.0],
        }];
        apply(
            pop.view(),
            lay,
            Parity::Even,
            GuoKind::Velocity,
            Orientation::Left,
            &elem,
        );

        let mut f = [0.0; 32];
        pop.load(
            Parity::Even,
            &lay.window_x(0),
            &lay.window_y(2),
            &lay.window_z(2),
            0,
            &mut f,
        );
        let mut feq = [0.0; 32];
        equilibrium_all::<f64, L>(1.0, &[0.05, 0.0, 0.0], &mut feq);
        for s in 0..L::ND {
            assert!((f[s] - feq[s]).abs() < 1e-14, "slot {s}");
        }
    }
}
