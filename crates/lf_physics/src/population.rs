// crates/lf_physics/src/population.rs

//! 分布函数存储与 AA 访问模式寻址
//!
//! 整个引擎唯一的索引实现。分布函数存放在一块缓存行对齐的
//! 连续缓冲区中，不使用第二块乒乓缓冲：流动通过相位相关的
//! 寻址隐式完成。
//!
//! # 寻址规则
//!
//! 记槽位 `(n,d)` 的速度为 `c`，其反向槽位为 `opp(n,d)`
//! （静止速度映射到自身，其余交换半区）：
//!
//! | 相位 | 读取方向 `(n,d)` | 写入方向 `(n,d)` |
//! |------|------------------|------------------|
//! | 偶   | 本单元槽 `(n,d)` | 本单元槽 `opp(n,d)` |
//! | 奇   | 邻居 `x-c` 槽 `opp(n,d)` | 邻居 `x+c` 槽 `(n,d)` |
//!
//! 偶相位把碰撞结果写入反向槽位，奇相位从反向槽位读出并写到
//! 下游邻居的正向槽位，两个相位合计恰好完成一格流动。
//!
//! 坐标以三元窗口 `[prev, self, next]` 传入，周期回绕或钳位由
//! 调用方在构造窗口时决定，寻址本身无分支。

use std::marker::PhantomData;

use lf_foundation::{AlignedVec, Scalar};
use lf_lattice::Lattice;

use crate::types::{Parity, Relaxation};

/// 3D 坐标窗口：`[prev, self, next]`
pub type Window = [usize; 3];

/// 构造周期回绕的坐标窗口
#[inline(always)]
pub fn periodic_window(i: usize, extent: usize) -> Window {
    [
        if i == 0 { extent - 1 } else { i - 1 },
        i,
        if i + 1 == extent { 0 } else { i + 1 },
    ]
}

// ============================================================================
// 纯寻址层
// ============================================================================

/// 域布局：不持有数据的纯寻址对象
///
/// `Copy` 语义使并行 pass 能把寻址与 [`PopulationView`] 一起
/// 传入工作线程。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<L: Lattice> {
    nx: usize,
    ny: usize,
    nz: usize,
    npop: usize,
    _lattice: PhantomData<L>,
}

impl<L: Lattice> Layout<L> {
    /// 创建布局
    pub fn new(nx: usize, ny: usize, nz: usize, npop: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            npop,
            _lattice: PhantomData,
        }
    }

    /// x 方向分辨率
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向分辨率
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// z 方向分辨率
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// 并排存储的分布函数组数
    #[inline]
    pub fn npop(&self) -> usize {
        self.npop
    }

    /// 缓冲区总长度
    #[inline]
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz * self.npop * L::ND
    }

    /// 布局是否为空域
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 4D 逻辑坐标到扁平偏移的双射
    #[inline(always)]
    pub fn spatial_to_linear(
        &self,
        x: usize,
        y: usize,
        z: usize,
        p: usize,
        n: usize,
        d: usize,
    ) -> usize {
        debug_assert!(x < self.nx && y < self.ny && z < self.nz);
        debug_assert!(p < self.npop && n < 2 && d < L::OFF);
        (((z * self.ny + y) * self.nx + x) * self.npop + p) * L::ND + n * L::OFF + d
    }

    /// [`spatial_to_linear`](Self::spatial_to_linear) 的逆映射
    pub fn linear_to_spatial(&self, index: usize) -> (usize, usize, usize, usize, usize, usize) {
        let d = index % L::OFF;
        let n = (index / L::OFF) % 2;
        let cell = index / L::ND;
        let p = cell % self.npop;
        let cell = cell / self.npop;
        let x = cell % self.nx;
        let cell = cell / self.nx;
        let y = cell % self.ny;
        let z = cell / self.ny;
        (x, y, z, p, n, d)
    }

    /// 方向 `(n,d)` 在给定相位下的读取偏移
    #[inline(always)]
    pub fn index_read(
        &self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        n: usize,
        d: usize,
        p: usize,
    ) -> usize {
        match parity {
            Parity::Even => self.spatial_to_linear(x[1], y[1], z[1], p, n, d),
            Parity::Odd => {
                let s = n * L::OFF + d;
                let (no, _) = L::opposite(n, d);
                // 上游邻居 x - c
                let xi = x[(1 - L::DX[s]) as usize];
                let yi = y[(1 - L::DY[s]) as usize];
                let zi = z[(1 - L::DZ[s]) as usize];
                self.spatial_to_linear(xi, yi, zi, p, no, d)
            }
        }
    }

    /// 方向 `(n,d)` 在给定相位下的写入偏移
    #[inline(always)]
    pub fn index_write(
        &self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        n: usize,
        d: usize,
        p: usize,
    ) -> usize {
        match parity {
            Parity::Even => {
                let (no, _) = L::opposite(n, d);
                self.spatial_to_linear(x[1], y[1], z[1], p, no, d)
            }
            Parity::Odd => {
                let s = n * L::OFF + d;
                // 下游邻居 x + c
                let xi = x[(1 + L::DX[s]) as usize];
                let yi = y[(1 + L::DY[s]) as usize];
                let zi = z[(1 + L::DZ[s]) as usize];
                self.spatial_to_linear(xi, yi, zi, p, n, d)
            }
        }
    }

    /// 单元 `i` 沿轴 `extent` 的周期窗口
    #[inline(always)]
    pub fn window_x(&self, x: usize) -> Window {
        periodic_window(x, self.nx)
    }

    /// y 轴周期窗口
    #[inline(always)]
    pub fn window_y(&self, y: usize) -> Window {
        periodic_window(y, self.ny)
    }

    /// z 轴周期窗口
    #[inline(always)]
    pub fn window_z(&self, z: usize) -> Window {
        periodic_window(z, self.nz)
    }
}

// ============================================================================
// 数据层
// ============================================================================

/// 分布函数存储
///
/// 缓冲区大小为 `NX·NY·NZ·NPOP·ND`，构造时一次分配，
/// 分配失败直接终止进程（不存在部分格子的降级模式）。
pub struct Population<S: Scalar, L: Lattice> {
    layout: Layout<L>,
    relax: Relaxation,
    f: AlignedVec<S>,
}

impl<S: Scalar, L: Lattice> Population<S, L> {
    /// 创建单组分布函数存储
    pub fn new(nx: usize, ny: usize, nz: usize, relax: Relaxation) -> Self {
        Self::with_populations(nx, ny, nz, 1, relax)
    }

    /// 创建 `npop` 组并排存储的分布函数
    pub fn with_populations(
        nx: usize,
        ny: usize,
        nz: usize,
        npop: usize,
        relax: Relaxation,
    ) -> Self {
        let layout = Layout::new(nx, ny, nz, npop);
        Self {
            layout,
            relax,
            f: AlignedVec::zeros(layout.len()),
        }
    }

    /// 域布局（纯寻址对象，`Copy`）
    #[inline]
    pub fn layout(&self) -> Layout<L> {
        self.layout
    }

    /// 松弛参数
    #[inline]
    pub fn relaxation(&self) -> &Relaxation {
        &self.relax
    }

    /// 原始缓冲区（备份导出用）
    #[inline]
    pub fn raw(&self) -> &[S] {
        self.f.as_slice()
    }

    /// 可变原始缓冲区（备份导入用）
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [S] {
        self.f.as_mut_slice()
    }

    /// 读取单个方向的分布值
    #[inline(always)]
    pub fn read(
        &self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        n: usize,
        d: usize,
        p: usize,
    ) -> S {
        self.f[self.layout.index_read(parity, x, y, z, n, d, p)]
    }

    /// 写入单个方向的分布值
    #[inline(always)]
    pub fn write(
        &mut self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        n: usize,
        d: usize,
        p: usize,
        value: S,
    ) {
        let idx = self.layout.index_write(parity, x, y, z, n, d, p);
        self.f[idx] = value;
    }

    /// 加载一个单元的全部分布到寄存器数组
    ///
    /// 幽灵槽强制清零，保证矩计算不受残留值影响。
    #[inline(always)]
    pub fn load(
        &self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        p: usize,
        f: &mut [S; 32],
    ) {
        for n in 0..2 {
            for d in 0..L::OFF {
                f[n * L::OFF + d] = self.f[self.layout.index_read(parity, x, y, z, n, d, p)];
            }
        }
        f[L::OFF] = S::ZERO;
    }

    /// 将碰撞后的分布写回（隐式流动）
    #[inline(always)]
    pub fn store(
        &mut self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        p: usize,
        f: &[S; 32],
    ) {
        for n in 0..2 {
            for d in 0..L::OFF {
                let idx = self.layout.index_write(parity, x, y, z, n, d, p);
                self.f[idx] = f[n * L::OFF + d];
            }
        }
    }

    /// 将一组分布写到本相位的读取位置
    ///
    /// 边界条件在碰撞 pass 之前改写其即将读取的值时使用。
    /// 每个读取位置在同一相位内只被唯一的单元消费，因此不同
    /// 边界单元的写入互不重叠。
    #[inline(always)]
    pub fn store_at_read(
        &mut self,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        p: usize,
        f: &[S; 32],
    ) {
        for n in 0..2 {
            for d in 0..L::OFF {
                if !L::is_physical(n, d) {
                    continue;
                }
                let idx = self.layout.index_read(parity, x, y, z, n, d, p);
                self.f[idx] = f[n * L::OFF + d];
            }
        }
    }

    /// 获取无锁并行视图
    ///
    /// 独占借用保证视图存续期间不存在其他安全访问路径。
    pub fn view(&mut self) -> PopulationView<S> {
        PopulationView {
            ptr: self.f.as_mut_slice().as_mut_ptr(),
            len: self.f.len(),
        }
    }
}

// ============================================================================
// 并行视图
// ============================================================================

/// 跨线程共享的原始缓冲区视图
///
/// 碰撞流动 pass 与边界 pass 在块间并行时使用。安全性依赖
/// AA 寻址的写入互斥不变量：同一相位内任意两个单元（或两个
/// 边界元素）的写入偏移互不重叠。
#[derive(Clone, Copy)]
pub struct PopulationView<S> {
    ptr: *mut S,
    len: usize,
}

unsafe impl<S: Scalar> Send for PopulationView<S> {}
unsafe impl<S: Scalar> Sync for PopulationView<S> {}

impl<S: Scalar> PopulationView<S> {
    /// 缓冲区长度
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 缓冲区是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 读取偏移处的值
    ///
    /// # Safety
    ///
    /// 偏移必须来自同一 [`Population`] 的 [`Layout`]，且调用方
    /// 处于满足块间写入互斥不变量的 pass 中。
    #[inline(always)]
    pub unsafe fn get(&self, index: usize) -> S {
        debug_assert!(index < self.len);
        *self.ptr.add(index)
    }

    /// 写入偏移处的值
    ///
    /// # Safety
    ///
    /// 同 [`get`](Self::get)，并要求没有其他线程并发写同一偏移。
    #[inline(always)]
    pub unsafe fn set(&self, index: usize, value: S) {
        debug_assert!(index < self.len);
        *self.ptr.add(index) = value;
    }

    /// 按布局加载一个单元的全部分布（幽灵槽清零）
    ///
    /// # Safety
    ///
    /// 同 [`get`](Self::get)。
    #[inline(always)]
    pub unsafe fn load<L: Lattice>(
        &self,
        layout: &Layout<L>,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        p: usize,
        f: &mut [S; 32],
    ) {
        for n in 0..2 {
            for d in 0..L::OFF {
                f[n * L::OFF + d] = self.get(layout.index_read(parity, x, y, z, n, d, p));
            }
        }
        f[L::OFF] = S::ZERO;
    }

    /// 按布局写回一个单元的全部分布
    ///
    /// # Safety
    ///
    /// 同 [`set`](Self::set)。
    #[inline(always)]
    pub unsafe fn store<L: Lattice>(
        &self,
        layout: &Layout<L>,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        p: usize,
        f: &[S; 32],
    ) {
        for n in 0..2 {
            for d in 0..L::OFF {
                self.set(layout.index_write(parity, x, y, z, n, d, p), f[n * L::OFF + d]);
            }
        }
    }

    /// 按布局把分布写到本相位的读取位置（边界条件用）
    ///
    /// # Safety
    ///
    /// 同 [`set`](Self::set)，且仲裁规则见
    /// [`Population::store_at_read`]。
    #[inline(always)]
    pub unsafe fn store_at_read<L: Lattice>(
        &self,
        layout: &Layout<L>,
        parity: Parity,
        x: &Window,
        y: &Window,
        z: &Window,
        p: usize,
        f: &[S; 32],
    ) {
        for n in 0..2 {
            for d in 0..L::OFF {
                if !L::is_physical(n, d) {
                    continue;
                }
                self.set(layout.index_read(parity, x, y, z, n, d, p), f[n * L::OFF + d]);
            }
        }
    }
}
