// crates/lf_lattice/src/lib.rs

//! LatticeFlux 离散速度集
//!
//! 定义速度集描述符 trait 及具体格子：
//! - [`descriptor`]: [`Lattice`] trait，约定填充后的双半区内存布局
//! - [`d3q27`]: 27 速三维格子（本项目默认格子）
//!
//! # 内存布局约定
//!
//! 每个单元存储 `ND` 个槽位，分为两个半区，各 `OFF` 个槽：
//!
//! ```text
//! 槽位 s = n*OFF + d，n ∈ {0,1}，d ∈ 0..OFF
//!   (0, 0)          静止速度
//!   (0, 1..HSPEED)  正方向速度
//!   (1, 0)          幽灵槽（权重 0，速度 0，加载时清零）
//!   (1, 1..HSPEED)  负方向速度（正方向取反）
//!   (*, HSPEED..)   对齐填充（权重 0）
//! ```
//!
//! 幽灵槽与填充槽使两个半区步长一致，半区互换退化为一次
//! 异或操作，这是 AA 访问模式寻址的前提。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod d3q27;
pub mod descriptor;

pub use d3q27::D3Q27;
pub use descriptor::Lattice;
