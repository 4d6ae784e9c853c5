// apps/lf_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示构建信息、格子常数与可用 CPU 特性。

use anyhow::Result;
use clap::Args;
use lf_lattice::{D3Q27, Lattice};
use lf_physics::SimulationConfig;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示系统信息
    #[arg(long)]
    pub system: bool,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let all = !args.system && !args.defaults;

    if args.system || all {
        print_system_info();
    }
    if args.defaults || all {
        if all {
            println!();
        }
        print_default_config();
    }
    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("LatticeFlux CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);

    println!("\n格子: D3Q27");
    println!("  离散速度: {}", D3Q27::SPEEDS);
    println!("  存储槽位: {}", D3Q27::ND);
    println!("  声速平方: {}", D3Q27::CS2);

    println!("\n可用精度:");
    println!("  - f32 (单精度)");
    println!("  - f64 (双精度)");

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            println!("\nCPU 特性: AVX2 可用");
        }
        if is_x86_feature_detected!("fma") {
            println!("CPU 特性: FMA 可用");
        }
    }
}

fn print_default_config() {
    println!("=== 默认配置 ===");
    let config = SimulationConfig::default();
    println!("分辨率: {}x{}x{}", config.nx, config.ny, config.nz);
    println!("时间步数: {}", config.nt);
    println!("雷诺数: {}", config.re);
    println!("特征速度: {}", config.u);
    println!("特征长度: {}", config.l);
    if let Ok(relax) = config.relaxation::<D3Q27>() {
        println!("运动粘度: {:.6}", relax.nu);
        println!("松弛时间: {:.6}", relax.tau);
    }
}
