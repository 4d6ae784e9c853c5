// crates/lf_foundation/src/lib.rs

//! LatticeFlux 基础层
//!
//! 提供整个项目的基础抽象，包括：
//! - [`memory`]: 缓存行对齐的连续缓冲区（格子数据的唯一存储形式）
//! - [`scalar`]: 统一标量 trait（f32/f64 编译期切换）
//! - [`precision`]: 运行时精度选择枚举（仅 App 层接触）
//! - [`error`]: 统一错误类型
//!
//! # 设计原则
//!
//! 1. **计算层零成本抽象**: 物理内核对 [`Scalar`] 单态化，无运行时开销
//! 2. **一次分配**: 格子缓冲区在构造时分配一次，运行期间不再增长
//! 3. **分配失败即致命**: 部分分配的格子无法正确模拟，
//!    缓冲区分配失败直接走 `handle_alloc_error` 终止进程

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod memory;
pub mod precision;
pub mod scalar;

pub use error::{LfError, LfResult};
pub use memory::{AlignedVec, Alignment, CacheAlign};
pub use precision::Precision;
pub use scalar::Scalar;
