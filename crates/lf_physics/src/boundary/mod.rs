// crates/lf_physics/src/boundary/mod.rs

//! 边界条件
//!
//! 两类边界在固定的标记节点列表上执行，均为无状态、
//! 每相位幂等的变换：
//!
//! - [`bounce_back`]: 半程反弹无滑移壁面，碰撞 pass 之后执行
//! - [`guo`]: Guo 非平衡外推开边界（速度入口 / 压力出口），
//!   同一相位碰撞 pass 之前执行
//!
//! 元素列表由几何生成器在时间循环之前构建一次，循环期间只读。
//! 列表顺序不影响正确性（元素间无数据依赖），仅影响缓存局部性。

pub mod bounce_back;
pub mod guo;

pub use guo::GuoKind;

use serde::{Deserialize, Serialize};

/// 边界面朝向
///
/// 命名对应域的六个面，`normal` 返回指向流体内部的单位法向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// x = 0 面
    Left,
    /// x = NX-1 面
    Right,
    /// y = 0 面
    Front,
    /// y = NY-1 面
    Back,
    /// z = 0 面
    Bottom,
    /// z = NZ-1 面
    Top,
}

impl Orientation {
    /// 指向流体内部的法向
    #[inline]
    pub fn normal(self) -> [i32; 3] {
        match self {
            Orientation::Left => [1, 0, 0],
            Orientation::Right => [-1, 0, 0],
            Orientation::Front => [0, 1, 0],
            Orientation::Back => [0, -1, 0],
            Orientation::Bottom => [0, 0, 1],
            Orientation::Top => [0, 0, -1],
        }
    }
}

/// 单个边界节点
///
/// 携带格点坐标与目标宏观量。壁面元素只用坐标；Guo 速度边界
/// 用 `u`，Guo 压力边界用 `rho`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryElement {
    /// x 坐标
    pub x: usize,
    /// y 坐标
    pub y: usize,
    /// z 坐标
    pub z: usize,
    /// 目标密度
    pub rho: f64,
    /// 目标速度
    pub u: [f64; 3],
}

impl BoundaryElement {
    /// 纯几何元素（壁面）
    pub fn wall(x: usize, y: usize, z: usize) -> Self {
        Self {
            x,
            y,
            z,
            rho: 1.0,
            u: [0.0; 3],
        }
    }
}

/// 固体节点掩码
///
/// 反弹 pass 用它跳过固体-固体方向对：这类方向不携带流体
/// 信息，跳过后相邻壁面元素的读写目标互不重叠，列表才能
/// 无锁并行。
#[derive(Debug, Clone)]
pub struct SolidMask {
    nx: usize,
    ny: usize,
    solid: Vec<bool>,
}

impl SolidMask {
    /// 由壁面元素列表构建
    pub fn from_elements(nx: usize, ny: usize, nz: usize, wall: &[BoundaryElement]) -> Self {
        let mut solid = vec![false; nx * ny * nz];
        for e in wall {
            solid[(e.z * ny + e.y) * nx + e.x] = true;
        }
        Self { nx, ny, solid }
    }

    /// 节点是否为固体
    #[inline(always)]
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.solid[(z * self.ny + y) * self.nx + x]
    }
}

/// 几何生成器输出的三组边界元素
///
/// 三个列表互不相交：壁面节点优先，入口/出口列表不含壁面
/// 单元。列表在时间循环前构建一次，循环期间只读。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boundaries {
    /// 无滑移壁面节点（含障碍物与槽道壁）
    pub wall: Vec<BoundaryElement>,
    /// 速度入口节点
    pub inlet: Vec<BoundaryElement>,
    /// 压力出口节点
    pub outlet: Vec<BoundaryElement>,
}
