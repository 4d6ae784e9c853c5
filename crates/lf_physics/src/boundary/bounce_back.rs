// crates/lf_physics/src/boundary/bounce_back.rs

//! 半程反弹无滑移壁面
//!
//! 壁面假定位于格点之间的半程处。碰撞 pass 结束后，对每个
//! 固体节点把流入固体的分布原路反射回流体：
//!
//! - 偶相位：`F[s][ī] = F[s+c_i][i]`（下一奇相位的读取位置）
//! - 奇相位：`F[s+c_i][i] = F[s][ī]`（下一偶相位的读取位置）
//!
//! 两种相位下不同 `(节点, 方向)` 的写入目标互不重叠，元素列表
//! 可以无锁并行遍历。

use rayon::prelude::*;

use lf_foundation::Scalar;
use lf_lattice::Lattice;

use super::{BoundaryElement, SolidMask};
use crate::population::{Layout, PopulationView};
use crate::types::Parity;

/// 对壁面元素列表执行半程反弹
///
/// 邻居坐标按周期回绕。指向另一个固体节点的方向被跳过：
/// 固体-固体链接不携带流体信息，跳过它们后任意两个元素的
/// 读写目标互不重叠。
pub fn apply<S: Scalar, L: Lattice>(
    view: PopulationView<S>,
    layout: Layout<L>,
    parity: Parity,
    wall: &[BoundaryElement],
    mask: &SolidMask,
) {
    wall.par_iter().for_each(|elem| {
        let xw = layout.window_x(elem.x);
        let yw = layout.window_y(elem.y);
        let zw = layout.window_z(elem.z);
        for n in 0..2 {
            for d in 1..L::HSPEED {
                let s = n * L::OFF + d;
                let fx = xw[(1 + L::DX[s]) as usize];
                let fy = yw[(1 + L::DY[s]) as usize];
                let fz = zw[(1 + L::DZ[s]) as usize];
                if mask.is_solid(fx, fy, fz) {
                    continue;
                }
                // 固体节点自身的反向槽
                let solid = layout.spatial_to_linear(elem.x, elem.y, elem.z, 0, 1 - n, d);
                // 方向 c_i 指向的流体邻居的正向槽
                let fluid = layout.spatial_to_linear(fx, fy, fz, 0, n, d);
                unsafe {
                    match parity {
                        Parity::Even => view.set(solid, view.get(fluid)),
                        Parity::Odd => view.set(fluid, view.get(solid)),
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Population;
    use crate::types::Relaxation;
    use lf_lattice::D3Q27;

    type L = D3Q27;
    type Pop = Population<f64, L>;

    fn relax() -> Relaxation {
        Relaxation::from_tau::<L>(0.6, 0.25).unwrap()
    }

    #[test]
    fn test_even_reflection_copies_opposite() {
        // 偶相位：固体槽 ī 必须精确等于邻居槽 i 的碰撞前值
        let mut pop = Pop::new(6, 6, 6, relax());
        let lay = pop.layout();
        let wall = [BoundaryElement::wall(2, 2, 2)];

        // 在 +x 邻居 (3,2,2) 的槽 (0,1) 放一个标记值
        let src = lay.spatial_to_linear(3, 2, 2, 0, 0, 1);
        pop.raw_mut()[src] = 0.125;

        let mask = SolidMask::from_elements(6, 6, 6, &wall);
        apply(pop.view(), lay, Parity::Even, &wall, &mask);

        let dst = lay.spatial_to_linear(2, 2, 2, 0, 1, 1);
        assert_eq!(pop.raw()[dst], 0.125);
    }

    #[test]
    fn test_odd_reflection_copies_back() {
        // 奇相位：邻居槽 i 必须精确等于固体槽 ī 的值
        let mut pop = Pop::new(6, 6, 6, relax());
        let lay = pop.layout();
        let wall = [BoundaryElement::wall(2, 2, 2)];

        let src = lay.spatial_to_linear(2, 2, 2, 0, 1, 1);
        pop.raw_mut()[src] = 0.375;

        let mask = SolidMask::from_elements(6, 6, 6, &wall);
        apply(pop.view(), lay, Parity::Odd, &wall, &mask);

        let dst = lay.spatial_to_linear(3, 2, 2, 0, 0, 1);
        assert_eq!(pop.raw()[dst], 0.375);
    }

    #[test]
    fn test_reflection_covers_all_directions() {
        // 每个非静止方向都被反射：写入目标集合大小 = 26
        let mut pop = Pop::new(6, 6, 6, relax());
        let lay = pop.layout();
        let wall = [BoundaryElement::wall(2, 3, 2)];

        // 给所有邻居正向槽放非零标记
        for n in 0..2 {
            for d in 1..L::HSPEED {
                let s = n * L::OFF + d;
                let xw = lay.window_x(2);
                let yw = lay.window_y(3);
                let zw = lay.window_z(2);
                let idx = lay.spatial_to_linear(
                    xw[(1 + L::DX[s]) as usize],
                    yw[(1 + L::DY[s]) as usize],
                    zw[(1 + L::DZ[s]) as usize],
                    0,
                    n,
                    d,
                );
                pop.raw_mut()[idx] = (s + 1) as f64;
            }
        }

        let mask = SolidMask::from_elements(6, 6, 6, &wall);
        apply(pop.view(), lay, Parity::Even, &wall, &mask);

        for n in 0..2 {
            for d in 1..L::HSPEED {
                let s = n * L::OFF + d;
                let solid = lay.spatial_to_linear(2, 3, 2, 0, 1 - n, d);
                assert_eq!(pop.raw()[solid], (s + 1) as f64, "slot {s}");
            }
        }
    }
}
