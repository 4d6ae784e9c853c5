// crates/lf_geometry/src/lib.rs

//! LatticeFlux 场景几何模块
//!
//! 把解析几何体（目前只有圆柱）体素化成求解器消费的边界元素表。
//! 体素化只在初始化阶段运行一次，因此以可读性优先，不做并行。
//!
//! # 示例
//!
//! ```
//! use lf_geometry::{cylinder_3d, Axis, CylinderSpec};
//!
//! let spec = CylinderSpec {
//!     radius: 4.0,
//!     position: [8, 16, 16],
//!     axis: Axis::X,
//!     walls_on_sides: true,
//! };
//! let bounds = cylinder_3d([32, 32, 32], &spec, 1.0, [0.05, 0.0, 0.0]);
//! assert!(!bounds.wall.is_empty());
//! assert!(!bounds.inlet.is_empty());
//! ```

#![warn(missing_docs)]

mod cylinder;

pub use cylinder::{cylinder_3d, Axis, AxisParseError, CylinderSpec};
