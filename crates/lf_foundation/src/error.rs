// crates/lf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `LfError` 枚举和 `LfResult` 类型别名。IO 专属错误在 `lf_io`
//! 中扩展，最终都可转换为 `LfError` 以实现跨层传递。
//!
//! # 设计原则
//!
//! 1. **前置条件即配置错误**: 松弛参数越界（`TAU <= 1/2`）在构造期报告，
//!    运行中不重试、不自动修正
//! 2. **分配失败不在此建模**: 格子缓冲区分配失败是致命的，
//!    由 [`crate::memory`] 直接终止进程

use thiserror::Error;

/// 统一结果类型
pub type LfResult<T> = Result<T, LfError>;

/// LatticeFlux 错误类型
#[derive(Error, Debug)]
pub enum LfError {
    /// 松弛参数数值不稳定（构造期前置条件）
    #[error("松弛参数不稳定: TAU={tau} (要求 TAU > 1/2), OMEGA={omega} (要求 0 < OMEGA < 2)")]
    UnstableRelaxation {
        /// 松弛时间
        tau: f64,
        /// 碰撞频率
        omega: f64,
    },

    /// 无效配置
    #[error("无效配置: {message}")]
    InvalidConfig {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 错误描述
        message: String,
    },
}

impl LfError {
    /// 创建无效配置错误
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LfError::UnstableRelaxation {
            tau: 0.4,
            omega: 2.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("TAU=0.4"));
        assert!(msg.contains("OMEGA=2.5"));
    }

    #[test]
    fn test_convenience_constructors() {
        let err = LfError::invalid_config("NT 必须为偶数");
        assert!(matches!(err, LfError::InvalidConfig { .. }));
    }
}
