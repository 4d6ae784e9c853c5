// crates/lf_physics/src/types.rs

//! 引擎基础类型
//!
//! 奇偶相位标记与松弛参数。松弛参数以 f64 存储（配置层精度），
//! 内核在 pass 入口处一次性转换到计算精度。

use lf_foundation::{LfError, LfResult, Scalar};
use lf_lattice::Lattice;
use serde::{Deserialize, Serialize};

/// TRT 模型魔参数默认值
///
/// `Λ = 1/4` 给出最优的稳态收敛性（Ginzburg 的 "magic" 取值）。
pub const DEFAULT_LAMBDA: f64 = 0.25;

/// 时间步奇偶相位
///
/// AA 访问模式下读写寻址随相位交替，两个相位（偶 + 奇）合起来
/// 才构成一个完整的物理时间步。同一 pass 内禁止混用两种相位的
/// 寻址。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    /// 偶相位：单元读写自身槽位
    Even,
    /// 奇相位：单元从上游邻居读、向下游邻居写
    Odd,
}

impl Parity {
    /// 翻转相位
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }
}

/// 松弛参数组
///
/// 由雷诺数、特征速度和特征长度推导：
///
/// ```text
/// ν   = U·L / Re
/// τ   = ν / c_s² + 1/2
/// ω   = 1 / τ
/// ω⁻  = (τ - 1/2) / (Λ + (τ - 1/2)/2)
/// ```
///
/// 构造时校验 `τ > 1/2`（等价于 `ω ∈ (0,2)`），越界即配置错误，
/// 不做任何自动修正。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relaxation {
    /// 运动粘度（格子单位）
    pub nu: f64,
    /// 层流松弛时间
    pub tau: f64,
    /// 碰撞频率（对称部分）
    pub omega: f64,
    /// TRT 魔参数
    pub lambda: f64,
    /// 碰撞频率（反对称部分，仅 TRT 使用）
    pub omega_m: f64,
}

impl Relaxation {
    /// 由物理工况推导松弛参数
    ///
    /// # 参数
    /// - `re`: 雷诺数
    /// - `u`: 特征速度（格子单位）
    /// - `l`: 特征长度（格子单位）
    /// - `lambda`: TRT 魔参数，通常取 [`DEFAULT_LAMBDA`]
    pub fn from_reynolds<L: Lattice>(re: f64, u: f64, l: f64, lambda: f64) -> LfResult<Self> {
        if re <= 0.0 || u <= 0.0 || l <= 0.0 {
            return Err(LfError::invalid_config(format!(
                "Re={re}, U={u}, L={l} 必须均为正"
            )));
        }
        let nu = u * l / re;
        Self::from_viscosity::<L>(nu, lambda)
    }

    /// 由运动粘度直接构造（测试和重启路径使用）
    pub fn from_viscosity<L: Lattice>(nu: f64, lambda: f64) -> LfResult<Self> {
        let tau = nu / L::CS2 + 0.5;
        Self::from_tau::<L>(tau, lambda)
    }

    /// 由松弛时间直接构造
    pub fn from_tau<L: Lattice>(tau: f64, lambda: f64) -> LfResult<Self> {
        let omega = 1.0 / tau;
        if tau <= 0.5 || !(0.0..2.0).contains(&omega) {
            return Err(LfError::UnstableRelaxation { tau, omega });
        }
        if lambda <= 0.0 {
            return Err(LfError::OutOfRange {
                field: "lambda",
                value: lambda,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        let half = tau - 0.5;
        let omega_m = half / (lambda + 0.5 * half);
        Ok(Self {
            nu: half * L::CS2,
            tau,
            omega,
            lambda,
            omega_m,
        })
    }

    /// 转换到计算精度
    #[inline]
    pub fn cast<S: Scalar>(&self) -> RelaxationScaled<S> {
        RelaxationScaled {
            tau: S::from_config(self.tau),
            omega: S::from_config(self.omega),
            omega_m: S::from_config(self.omega_m),
        }
    }
}

/// 计算精度下的松弛参数（pass 入口一次转换）
#[derive(Debug, Clone, Copy)]
pub struct RelaxationScaled<S: Scalar> {
    /// 层流松弛时间
    pub tau: S,
    /// 碰撞频率（对称部分）
    pub omega: S,
    /// 碰撞频率（反对称部分）
    pub omega_m: S,
}
