// crates/lf_physics/src/lib.rs

//! LatticeFlux 物理引擎
//!
//! 格子 Boltzmann 求解器的核心：AA 访问模式的分布函数存储、
//! 碰撞算子、边界条件和时间推进驱动。
//!
//! # 模块组织
//!
//! - [`types`]: 奇偶相位、松弛参数等基础类型
//! - [`population`]: 分布函数存储与 AA 寻址（唯一的索引实现）
//! - [`continuum`]: 宏观场（密度 + 三个速度分量）
//! - [`collision`]: BGK / BGK-Smagorinsky / TRT 碰撞算子
//! - [`boundary`]: 半程反弹与 Guo 非平衡外推边界
//! - [`engine`]: 分块并行的时间推进驱动
//!
//! # 并行安全前提
//!
//! 同一相位内任意两个单元的写入位置互不重叠（AA 寻址保证），
//! 因此碰撞流动 pass 可以按块无锁并行。相位之间必须有全域屏障，
//! 由 rayon 的 `par_iter` 汇合点天然提供。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod collision;
pub mod continuum;
pub mod engine;
pub mod population;
pub mod types;

pub use boundary::{Boundaries, BoundaryElement, GuoKind, Orientation, SolidMask};
pub use collision::{Bgk, BgkSmagorinsky, CollideStream, Trt};
pub use continuum::Continuum;
pub use engine::{Simulation, SimulationConfig, StepReport};
pub use population::{Layout, Population, PopulationView};
pub use types::{Parity, Relaxation};
