// apps/lf_cli/src/main.rs

//! LatticeFlux 命令行界面
//!
//! 圆柱绕流基准的命令行入口。应用层只接触运行时参数：
//! 精度通过 `Precision` 枚举选择，碰撞算子通过 `Operator` 枚举
//! 选择，泛型在 `commands::run` 内部一次性单态化。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// LatticeFlux 格子 Boltzmann 求解器命令行工具
#[derive(Parser)]
#[command(name = "lf_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LatticeFlux D3Q27 lattice Boltzmann solver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行圆柱绕流基准
    Run(commands::run::RunArgs),
    /// 显示构建与格子信息
    Info(commands::info::InfoArgs),
    /// 转换既有输出文件（保留接口）
    Convert(commands::convert::ConvertArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 不带子命令时以默认参数跑基准，与历史行为一致
    match cli.command {
        Some(Commands::Run(args)) => commands::run::execute(args),
        Some(Commands::Info(args)) => commands::info::execute(args),
        Some(Commands::Convert(args)) => commands::convert::execute(args),
        None => commands::run::execute(commands::run::RunArgs::default()),
    }
}
