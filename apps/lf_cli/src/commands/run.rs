// apps/lf_cli/src/commands/run.rs

//! 圆柱绕流基准命令
//!
//! 把命令行参数装配成求解器配置与场景几何，按精度与碰撞算子
//! 单态化之后执行仿真，周期性导出 VTK 快照，结束时打印 MLUPS。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lf_foundation::{LfError, Precision, Scalar};
use lf_geometry::{cylinder_3d, Axis, CylinderSpec};
use lf_io::params::{export_parameters, RunParameters};
use lf_lattice::D3Q27;
use lf_physics::types::DEFAULT_LAMBDA;
use lf_physics::{Bgk, BgkSmagorinsky, CollideStream, Simulation, SimulationConfig, Trt};
use tracing::info;

/// 碰撞算子选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operator {
    /// 单松弛 BGK
    Bgk,
    /// BGK + Smagorinsky 亚格子湍流模型
    BgkSmagorinsky,
    /// 双松弛 TRT
    Trt,
}

/// 运行基准参数
#[derive(Args)]
pub struct RunArgs {
    /// x 方向分辨率
    #[arg(long, default_value_t = 192)]
    pub nx: usize,

    /// y 方向分辨率
    #[arg(long, default_value_t = 96)]
    pub ny: usize,

    /// z 方向分辨率
    #[arg(long, default_value_t = 96)]
    pub nz: usize,

    /// 时间步数（必须为偶数）
    #[arg(long, default_value_t = 10_000)]
    pub nt: usize,

    /// 雷诺数
    #[arg(long, default_value_t = 1000.0)]
    pub re: f64,

    /// 特征速度（格子单位）
    #[arg(long, default_value_t = 0.05)]
    pub u: f64,

    /// 碰撞算子
    #[arg(long, value_enum, default_value_t = Operator::BgkSmagorinsky)]
    pub operator: Operator,

    /// TRT 魔法参数
    #[arg(long, default_value_t = DEFAULT_LAMBDA)]
    pub lambda: f64,

    /// 圆柱半径（格子单位，默认 L/2）
    #[arg(long)]
    pub radius: Option<f64>,

    /// 圆柱纵轴方向
    #[arg(long, default_value = "x")]
    pub axis: Axis,

    /// 使用 f32 精度
    #[arg(long)]
    pub f32: bool,

    /// rayon 线程数（0 = 自动）
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// 输出目录
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// 关闭宏观量计算与快照导出（纯性能测试）
    #[arg(long)]
    pub no_save: bool,

    /// 结束时备份分布函数（断点续算）
    #[arg(long)]
    pub backup: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            nx: 192,
            ny: 96,
            nz: 96,
            nt: 10_000,
            re: 1000.0,
            u: 0.05,
            operator: Operator::BgkSmagorinsky,
            lambda: DEFAULT_LAMBDA,
            radius: None,
            axis: Axis::X,
            f32: false,
            threads: 0,
            output: PathBuf::from("output"),
            no_save: false,
            backup: false,
        }
    }
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== LatticeFlux 基准启动 ===");

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("rayon 线程池初始化失败")?;
    }

    let precision = if args.f32 {
        Precision::F32
    } else {
        Precision::F64
    };
    info!(
        precision = precision.name(),
        threads = rayon::current_num_threads(),
        "运行环境"
    );

    match precision {
        Precision::F32 => dispatch::<f32>(&args, precision),
        Precision::F64 => dispatch::<f64>(&args, precision),
    }
}

fn dispatch<S: Scalar>(args: &RunArgs, precision: Precision) -> Result<()> {
    match args.operator {
        Operator::Bgk => run_typed::<S, Bgk>(args, precision),
        Operator::BgkSmagorinsky => run_typed::<S, BgkSmagorinsky>(args, precision),
        Operator::Trt => run_typed::<S, Trt>(args, precision),
    }
}

fn run_typed<S: Scalar, Op: CollideStream<S, D3Q27>>(
    args: &RunArgs,
    precision: Precision,
) -> Result<()> {
    // 特征长度取通道高度的 1/5，与基准定义一致
    let l = args.ny / 5;
    let config = SimulationConfig {
        nx: args.nx,
        ny: args.ny,
        nz: args.nz,
        nt: args.nt,
        re: args.re,
        u: args.u,
        l,
        rho0: 1.0,
        u0: [args.u, 0.0, 0.0],
        lambda: args.lambda,
        save: !args.no_save,
    };
    let relaxation = config.relaxation::<D3Q27>()?;

    let spec = CylinderSpec {
        radius: args.radius.unwrap_or(l as f64 / 2.0),
        position: [args.nx / 4, args.ny / 2, args.nz / 2],
        axis: args.axis,
        walls_on_sides: true,
    };
    let bounds = cylinder_3d(
        [args.nx, args.ny, args.nz],
        &spec,
        config.rho0,
        config.u0,
    );

    export_parameters(
        &args.output.join("parameters.json"),
        &RunParameters {
            config: config.clone(),
            relaxation,
            operator: Op::NAME.to_owned(),
            precision,
            threads: rayon::current_num_threads(),
        },
    )?;

    let mut sim: Simulation<S, D3Q27, Op> = Simulation::new(config, bounds)?;

    let out = args.output.clone();
    let report = sim.run(|cont, step| {
        lf_io::vtk::write_continuum(&out, cont, step)
            .map(|_| ())
            .map_err(|e| LfError::internal(format!("VTK 导出失败: {e}")))
    })?;

    if args.backup {
        lf_io::backup::export_population(&out.join("population.lfpb"), sim.population())?;
    }

    info!(
        steps = report.steps,
        seconds = format!("{:.2}", report.seconds),
        mlups = format!("{:.2}", report.mlups),
        "基准完成"
    );
    println!(
        "{} steps in {:.2} s  ->  {:.2} MLUPS",
        report.steps, report.seconds, report.mlups
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: RunArgs,
    }

    #[test]
    fn test_defaults_match_benchmark() {
        let h = Harness::parse_from(["lf_cli"]);
        assert_eq!(h.args.nx, 192);
        assert_eq!(h.args.nt, 10_000);
        assert_eq!(h.args.operator, Operator::BgkSmagorinsky);
        assert!(!h.args.f32);
    }

    #[test]
    fn test_operator_and_axis_parsing() {
        let h = Harness::parse_from(["lf_cli", "--operator", "trt", "--axis", "z", "--f32"]);
        assert_eq!(h.args.operator, Operator::Trt);
        assert_eq!(h.args.axis, Axis::Z);
        assert!(h.args.f32);
    }

    #[test]
    fn test_bad_operator_rejected() {
        assert!(Harness::try_parse_from(["lf_cli", "--operator", "mrt"]).is_err());
    }
}
