// apps/lf_cli/src/commands/convert.rs

//! 输出文件转换命令
//!
//! 历史接口，尚未实现：调用返回错误，进程以非零码退出。

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lf_io::IoError;
use tracing::error;

/// 转换命令参数
#[derive(Args)]
pub struct ConvertArgs {
    /// 输入文件
    pub input: PathBuf,

    /// 输出文件
    pub output: Option<PathBuf>,
}

/// 执行转换命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    error!(input = %args.input.display(), "convert 尚未实现");
    Err(IoError::Unimplemented("convert").into())
}
