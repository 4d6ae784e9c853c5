// crates/lf_foundation/src/scalar.rs

//! 统一标量类型抽象
//!
//! 提供编译期精度选择的唯一接口，物理内核在 f32 和 f64 之间零成本切换。
//!
//! # 设计原则
//!
//! 1. **单一职责**: 仅解决精度切换问题，不定义物理常量
//! 2. **零成本抽象**: `#[inline]` + 编译期单态化
//! 3. **密封 trait**: 只有 f32 和 f64 可以实现
//!
//! # 使用示例
//!
//! ```
//! use lf_foundation::Scalar;
//!
//! fn equilibrium_weight<S: Scalar>(w: S, rho: S) -> S {
//!     w * rho
//! }
//!
//! let f32_val = equilibrium_weight(0.25f32, 1.0f32);
//! let f64_val = equilibrium_weight(0.25f64, 1.0f64);
//! ```

use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::Pod;
use num_traits::{Float, FromPrimitive, NumAssign};

use crate::precision::Precision;

// 密封 trait，禁止外部实现
mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// 统一标量类型约束
///
/// 所有物理计算必须使用此 trait 作为泛型边界。
///
/// # 架构约束
///
/// - **必须**: 作为泛型约束使用，如 `<S: Scalar>`
/// - **禁止**: 作为 trait 对象使用，如 `&dyn Scalar`
pub trait Scalar:
    private::Sealed
    + Float
    + FromPrimitive
    + NumAssign
    + Pod
    + Copy
    + Clone
    + Debug
    + Display
    + Send
    + Sync
    + Sum
    + Default
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// 零值: `0.0`
    const ZERO: Self;

    /// 单位值: `1.0`
    const ONE: Self;

    /// 二: `2.0`
    const TWO: Self;

    /// 一半: `0.5`
    const HALF: Self;

    /// 机器精度
    const EPSILON: Self;

    /// 对应的运行时精度标记（用于 IO 头部的精度协商）
    const PRECISION: Precision;

    /// 从配置层 f64 转换到运行层 S（f32 模式下可能丢失精度）
    fn from_config(v: f64) -> Self;

    /// 转换回 f64（用于输出或跨模块接口）
    fn to_f64(self) -> f64;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;
    const EPSILON: Self = f32::EPSILON;
    const PRECISION: Precision = Precision::F32;

    #[inline]
    fn from_config(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;
    const EPSILON: Self = f64::EPSILON;
    const PRECISION: Precision = Precision::F64;

    #[inline]
    fn from_config(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic_sum<S: Scalar>(values: &[S]) -> S {
        values.iter().copied().sum()
    }

    #[test]
    fn test_scalar_f64() {
        let v = [1.0f64, 2.0, 3.0];
        assert!((generic_sum(&v) - 6.0).abs() < 1e-15);
    }

    #[test]
    fn test_scalar_f32() {
        let v = [1.0f32, 2.0, 3.0];
        assert!((generic_sum(&v) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_config_roundtrip() {
        assert_eq!(f64::from_config(0.25), 0.25);
        assert_eq!(f32::from_config(0.25), 0.25f32);
        assert_eq!(0.25f64.to_f64(), 0.25);
    }

    #[test]
    fn test_constants() {
        assert_eq!(f64::HALF + f64::HALF, f64::ONE);
        assert_eq!(f32::TWO * f32::HALF, f32::ONE);
    }

    #[test]
    fn test_precision_marker() {
        assert_eq!(<f32 as Scalar>::PRECISION.size_bytes(), 4);
        assert_eq!(<f64 as Scalar>::PRECISION.size_bytes(), 8);
    }
}
