// crates/lf_io/src/error.rs

//! IO 错误类型定义
//!
//! 统一的 thiserror 枚举，底层 `std::io::Error` 自动转换进来。

use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 底层文件系统错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 备份文件维度与目标不匹配
    #[error("维度不匹配: {field} 期望 {expected}, 文件 {actual}")]
    DimensionMismatch {
        /// 字段名
        field: &'static str,
        /// 期望值
        expected: usize,
        /// 文件中的值
        actual: usize,
    },

    /// 文件格式损坏或不被识别
    #[error("格式错误: {0}")]
    Format(String),

    /// JSON 序列化失败
    #[error("序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 功能尚未实现
    #[error("功能尚未实现: {0}")]
    Unimplemented(&'static str),
}
