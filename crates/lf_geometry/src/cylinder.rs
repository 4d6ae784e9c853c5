// crates/lf_geometry/src/cylinder.rs

//! 圆柱绕流场景体素化
//!
//! 以格子分辨率为单位把圆柱体素化成实心格点集合，再从中提取
//! 边界元素表：
//!
//! - 至少有一个流体邻居的实心格点成为壁面元素（零目标速度）；
//! - `x = 0` 平面上的流体格点成为入口元素（给定密度与速度）；
//! - `x = NX-1` 平面上的流体格点成为出口元素（给定密度）；
//! - 其余域面由寻址窗口的周期回绕处理。
//!
//! 元素表按 z 主序生成，顺序只影响缓存局部性，不影响语义。

use std::fmt;
use std::str::FromStr;

use lf_physics::{Boundaries, BoundaryElement};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 圆柱的纵轴方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// 沿 x 轴（与主流向平行）
    X,
    /// 沿 y 轴
    Y,
    /// 沿 z 轴（典型展向圆柱绕流）
    Z,
}

impl Axis {
    /// 轴名（小写单字母）
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 轴名解析失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisParseError(String);

impl fmt::Display for AxisParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "无法识别的轴名: {} (期望 x/y/z)", self.0)
    }
}

impl std::error::Error for AxisParseError {}

impl FromStr for Axis {
    type Err = AxisParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(AxisParseError(other.to_owned())),
        }
    }
}

/// 圆柱场景描述
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CylinderSpec {
    /// 半径（格子单位）
    pub radius: f64,
    /// 轴心位置（格点坐标，纵轴方向分量被忽略）
    pub position: [usize; 3],
    /// 纵轴方向
    pub axis: Axis,
    /// 是否在垂直于 y/z 的域面上加壁面（通道流）
    pub walls_on_sides: bool,
}

/// 判定格点是否落在圆柱（含通道壁）内
fn is_solid(spec: &CylinderSpec, ny: usize, nz: usize, x: usize, y: usize, z: usize) -> bool {
    if spec.walls_on_sides && (y == 0 || y == ny - 1 || z == 0 || z == nz - 1) {
        return true;
    }
    let [px, py, pz] = spec.position;
    let (da, db) = match spec.axis {
        Axis::X => (y as f64 - py as f64, z as f64 - pz as f64),
        Axis::Y => (x as f64 - px as f64, z as f64 - pz as f64),
        Axis::Z => (x as f64 - px as f64, y as f64 - py as f64),
    };
    da * da + db * db <= spec.radius * spec.radius
}

/// 体素化圆柱绕流场景
///
/// `resolution` 为 `[nx, ny, nz]`；`rho0` 与 `u0` 是入口元素的目标宏观量，
/// 出口元素只使用 `rho0`。返回的三张元素表互不相交。
pub fn cylinder_3d(
    resolution: [usize; 3],
    spec: &CylinderSpec,
    rho0: f64,
    u0: [f64; 3],
) -> Boundaries {
    let [nx, ny, nz] = resolution;
    let mut bounds = Boundaries::default();

    // 壁面：带流体邻居的实心格点（26 邻域，周期回绕）
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                if !is_solid(spec, ny, nz, x, y, z) {
                    continue;
                }
                if has_fluid_neighbour(spec, nx, ny, nz, x, y, z) {
                    bounds.wall.push(BoundaryElement::wall(x, y, z));
                }
            }
        }
    }

    // 入口与出口：x 方向两个域面上的流体格点
    for z in 0..nz {
        for y in 0..ny {
            if !is_solid(spec, ny, nz, 0, y, z) {
                bounds.inlet.push(BoundaryElement {
                    x: 0,
                    y,
                    z,
                    rho: rho0,
                    u: u0,
                });
            }
            if !is_solid(spec, ny, nz, nx - 1, y, z) {
                bounds.outlet.push(BoundaryElement {
                    x: nx - 1,
                    y,
                    z,
                    rho: rho0,
                    u: [0.0; 3],
                });
            }
        }
    }

    info!(
        axis = spec.axis.name(),
        radius = spec.radius,
        walls = bounds.wall.len(),
        inlets = bounds.inlet.len(),
        outlets = bounds.outlet.len(),
        "圆柱场景体素化完成"
    );
    bounds
}

fn has_fluid_neighbour(
    spec: &CylinderSpec,
    nx: usize,
    ny: usize,
    nz: usize,
    x: usize,
    y: usize,
    z: usize,
) -> bool {
    for dz in -1i64..=1 {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                let fx = (x as i64 + dx).rem_euclid(nx as i64) as usize;
                let fy = (y as i64 + dy).rem_euclid(ny as i64) as usize;
                let fz = (z as i64 + dz).rem_euclid(nz as i64) as usize;
                if !is_solid(spec, ny, nz, fx, fy, fz) {
                    return true;
                }
            }
        }
    }
    false
}

// ============================================================
// 测试
// ============================================================
