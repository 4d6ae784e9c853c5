// crates/lf_io/src/lib.rs

//! LatticeFlux 输出模块
//!
//! 把求解器内部状态写到磁盘：
//!
//! - [`vtk`]: 宏观量的 legacy ASCII VTK 导出（STRUCTURED_POINTS）
//! - [`backup`]: 分布函数的二进制备份与恢复（断点续算）
//! - [`params`]: 模拟参数的 JSON 导出
//!
//! 所有接口都带缓冲、可失败，错误统一收敛到 [`IoError`]。

#![warn(missing_docs)]

pub mod backup;
pub mod error;
pub mod params;
pub mod vtk;

pub use error::{IoError, IoResult};
