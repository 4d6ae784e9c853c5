// crates/lf_physics/src/engine/mod.rs

//! 时间推进驱动
//!
//! 驱动器按偶/奇相位交替推进：每个相位内依次执行入口/出口
//! Guo 边界、全域融合碰撞流动 pass、壁面半程反弹。两个相位
//! 合计把信息沿每个方向精确推进一个格距，构成一个完整的物理
//! 时间步。
//!
//! 快照导出节拍为每 `NT/10` 步，导出前对壁面单元清零。导出
//! 格式对引擎不可见，由调用方以回调形式注入。

pub mod blocks;

use std::marker::PhantomData;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use lf_foundation::{LfError, LfResult, Scalar};
use lf_lattice::Lattice;

use crate::boundary::{bounce_back, guo, Boundaries, GuoKind, Orientation, SolidMask};
use crate::collision::{equilibrium_all, CollideStream};
use crate::continuum::{Continuum, NM};
use crate::population::Population;
use crate::types::{Parity, Relaxation, DEFAULT_LAMBDA};

use blocks::BlockGrid;

/// 求解器配置
///
/// 默认值对应 Re=1000 的圆柱绕流基准工况。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// x 方向分辨率
    pub nx: usize,
    /// y 方向分辨率
    pub ny: usize,
    /// z 方向分辨率
    pub nz: usize,
    /// 时间步数（必须为偶数）
    pub nt: usize,
    /// 雷诺数
    pub re: f64,
    /// 特征速度（格子单位）
    pub u: f64,
    /// 特征长度（格子单位）
    pub l: usize,
    /// 初始密度
    pub rho0: f64,
    /// 初始速度
    pub u0: [f64; 3],
    /// TRT 魔参数
    pub lambda: f64,
    /// 是否在碰撞 pass 中更新宏观场（基准测试时关闭）
    pub save: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let u = 0.05;
        Self {
            nx: 192,
            ny: 96,
            nz: 96,
            nt: 10000,
            re: 1000.0,
            u,
            l: 96 / 5,
            rho0: 1.0,
            u0: [u, 0.0, 0.0],
            lambda: DEFAULT_LAMBDA,
            save: true,
        }
    }
}

impl SimulationConfig {
    /// 校验配置
    pub fn validate(&self) -> LfResult<()> {
        if self.nx == 0 || self.ny == 0 || self.nz == 0 {
            return Err(LfError::invalid_config(format!(
                "域分辨率 {}x{}x{} 不能为零",
                self.nx, self.ny, self.nz
            )));
        }
        if self.nt % 2 != 0 {
            return Err(LfError::invalid_config(format!(
                "时间步数 {} 必须为偶数（偶/奇相位成对执行）",
                self.nt
            )));
        }
        if self.rho0 <= 0.0 {
            return Err(LfError::invalid_config(format!(
                "初始密度 {} 必须为正",
                self.rho0
            )));
        }
        Ok(())
    }

    /// 推导松弛参数（含稳定性校验）
    pub fn relaxation<L: Lattice>(&self) -> LfResult<Relaxation> {
        self.validate()?;
        Relaxation::from_reynolds::<L>(self.re, self.u, self.l as f64, self.lambda)
    }

    /// 快照导出间隔（步）
    pub fn snapshot_interval(&self) -> usize {
        (self.nt / 10).max(2)
    }
}

/// 运行结果报告
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StepReport {
    /// 已执行的时间步数
    pub steps: usize,
    /// 墙钟耗时（秒）
    pub seconds: f64,
    /// 每秒百万格点更新数
    pub mlups: f64,
}

/// 格子 Boltzmann 求解器
///
/// 对标量精度 `S`、格子 `L` 与碰撞算子 `Op` 单态化。
pub struct Simulation<S: Scalar, L: Lattice, Op: CollideStream<S, L>> {
    config: SimulationConfig,
    pop: Population<S, L>,
    cont: Continuum<S>,
    bounds: Boundaries,
    solid: SolidMask,
    blocks: BlockGrid,
    _op: PhantomData<Op>,
}

impl<S: Scalar, L: Lattice, Op: CollideStream<S, L>> Simulation<S, L, Op> {
    /// 创建求解器并施加初始条件
    ///
    /// 分布函数以 `(ρ₀, u₀)` 的平衡分布填充到首个偶相位的读取
    /// 位置，宏观场同步填充，保证第 0 步导出即为初始条件。
    pub fn new(config: SimulationConfig, bounds: Boundaries) -> LfResult<Self> {
        let relax = config.relaxation::<L>()?;
        info!(
            operator = Op::NAME,
            nx = config.nx,
            ny = config.ny,
            nz = config.nz,
            nt = config.nt,
            re = config.re,
            tau = relax.tau,
            omega = relax.omega,
            "初始化求解器"
        );
        let solid = SolidMask::from_elements(config.nx, config.ny, config.nz, &bounds.wall);
        let mut sim = Self {
            pop: Population::new(config.nx, config.ny, config.nz, relax),
            cont: Continuum::new(config.nx, config.ny, config.nz),
            blocks: BlockGrid::new(config.nx, config.ny, config.nz),
            config,
            bounds,
            solid,
            _op: PhantomData,
        };
        sim.initialise();
        Ok(sim)
    }

    /// 配置
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// 分布函数存储
    pub fn population(&self) -> &Population<S, L> {
        &self.pop
    }

    /// 分布函数存储（备份导入用）
    pub fn population_mut(&mut self) -> &mut Population<S, L> {
        &mut self.pop
    }

    /// 宏观场
    pub fn continuum(&self) -> &Continuum<S> {
        &self.cont
    }

    fn initialise(&mut self) {
        let rho = S::from_config(self.config.rho0);
        let u = [
            S::from_config(self.config.u0[0]),
            S::from_config(self.config.u0[1]),
            S::from_config(self.config.u0[2]),
        ];
        let mut feq = [S::ZERO; 32];
        equilibrium_all::<S, L>(rho, &u, &mut feq);

        let lay = self.pop.layout();
        for z in 0..lay.nz() {
            let zw = lay.window_z(z);
            for y in 0..lay.ny() {
                let yw = lay.window_y(y);
                for x in 0..lay.nx() {
                    let xw = lay.window_x(x);
                    self.pop.store_at_read(Parity::Even, &xw, &yw, &zw, 0, &feq);
                    self.cont.set(x, y, z, 0, rho);
                    self.cont.set(x, y, z, 1, u[0]);
                    self.cont.set(x, y, z, 2, u[1]);
                    self.cont.set(x, y, z, 3, u[2]);
                }
            }
        }
    }

    /// 单个相位：Guo 边界 → 碰撞流动 → 壁面反弹
    pub fn step(&mut self, parity: Parity) {
        let lay = self.pop.layout();
        if !self.bounds.inlet.is_empty() {
            guo::apply(
                self.pop.view(),
                lay,
                parity,
                GuoKind::Velocity,
                Orientation::Left,
                &self.bounds.inlet,
            );
        }
        if !self.bounds.outlet.is_empty() {
            guo::apply(
                self.pop.view(),
                lay,
                parity,
                GuoKind::Pressure,
                Orientation::Right,
                &self.bounds.outlet,
            );
        }
        self.collide_pass(parity, self.config.save);
        if !self.bounds.wall.is_empty() {
            bounce_back::apply(self.pop.view(), lay, parity, &self.bounds.wall, &self.solid);
        }
    }

    /// 一个完整物理时间步（偶 + 奇相位）
    pub fn step_pair(&mut self) {
        let parity = Parity::Even;
        self.step(parity);
        self.step(parity.flipped());
    }

    /// 融合碰撞流动 pass
    ///
    /// 按块并行遍历全域。块间写入互斥由 AA 寻址保证；
    /// `par_iter` 的汇合点充当相位间的全域屏障。
    fn collide_pass(&mut self, parity: Parity, save: bool) {
        let lay = self.pop.layout();
        let relax = self.pop.relaxation().cast::<S>();
        let (nx, ny) = (lay.nx(), lay.ny());
        let view = self.pop.view();
        let cview = self.cont.view();
        let blocks = self.blocks;

        (0..blocks.num_blocks()).into_par_iter().for_each(|id| {
            let (xs, ys, zs) = blocks.block_ranges(id);
            let mut f = [S::ZERO; 32];
            for z in zs {
                let zw = lay.window_z(z);
                for y in ys.clone() {
                    let yw = lay.window_y(y);
                    for x in xs.clone() {
                        let xw = lay.window_x(x);
                        unsafe {
                            view.load(&lay, parity, &xw, &yw, &zw, 0, &mut f);
                        }
                        let m = Op::collide(&mut f, &relax);
                        unsafe {
                            view.store(&lay, parity, &xw, &yw, &zw, 0, &f);
                        }
                        if save {
                            let base = ((z * ny + y) * nx + x) * NM;
                            unsafe {
                                cview.set(base, m.rho);
                                cview.set(base + 1, m.u[0]);
                                cview.set(base + 2, m.u[1]);
                                cview.set(base + 3, m.u[2]);
                            }
                        }
                    }
                }
            }
        });
    }

    /// 导出前清零壁面单元的宏观量
    pub fn zero_boundary_cells(&mut self) {
        for elem in &self.bounds.wall {
            self.cont.set_zero(elem.x, elem.y, elem.z);
        }
    }

    /// 运行完整仿真
    ///
    /// `on_snapshot` 在导出节拍（以及第 0 步）收到当前宏观场与
    /// 步号，格式由调用方决定。
    pub fn run<F>(&mut self, mut on_snapshot: F) -> LfResult<StepReport>
    where
        F: FnMut(&Continuum<S>, usize) -> LfResult<()>,
    {
        let nt = self.config.nt;
        let interval = self.config.snapshot_interval();
        let save = self.config.save;
        info!(steps = nt, interval, "仿真开始");

        let start = Instant::now();
        let mut i = 0usize;
        while i < nt {
            self.step_pair();
            if save && i % interval == 0 {
                info!(step = i, total = nt, "进度");
                self.zero_boundary_cells();
                on_snapshot(&self.cont, i)?;
            }
            i += 2;
        }
        let seconds = start.elapsed().as_secs_f64();

        let cells = (self.config.nx * self.config.ny * self.config.nz) as f64;
        let mlups = cells * nt as f64 / seconds / 1.0e6;
        info!(seconds, mlups, "仿真结束");
        Ok(StepReport {
            steps: nt,
            seconds,
            mlups,
        })
    }
}
