// crates/lf_physics/src/continuum.rs

//! 宏观场（Continuum）
//!
//! 每个单元存 4 个值：密度与三个速度分量。宏观场是导出量，
//! 仅由碰撞 pass 在导出节拍时写入，以及导出前对固体/边界
//! 单元清零。

use lf_foundation::{AlignedVec, Scalar};

/// 每个单元的宏观量个数：ρ, ux, uy, uz
pub const NM: usize = 4;

/// 宏观场存储
pub struct Continuum<S: Scalar> {
    nx: usize,
    ny: usize,
    nz: usize,
    m: AlignedVec<S>,
}

impl<S: Scalar> Continuum<S> {
    /// 创建并清零
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            m: AlignedVec::zeros(nx * ny * nz * NM),
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

    /// 单元 `(x,y,z)` 第 `m` 个宏观量的偏移
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize, z: usize, m: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny && z < self.nz && m < NM);
        ((z * self.ny + y) * self.nx + x) * NM + m
    }

    /// 读取宏观量
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize, z: usize, m: usize) -> S {
        self.m[self.index(x, y, z, m)]
    }

    /// 写入宏观量
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, z: usize, m: usize, value: S) {
        let idx = self.index(x, y, z, m);
        self.m[idx] = value;
    }

    /// 单元四元组 `(ρ, ux, uy, uz)`
    #[inline]
    pub fn cell(&self, x: usize, y: usize, z: usize) -> [S; NM] {
        let base = self.index(x, y, z, 0);
        [self.m[base], self.m[base + 1], self.m[base + 2], self.m[base + 3]]
    }

    /// 将单元的全部宏观量清零（固体与边界单元导出前调用）
    #[inline]
    pub fn set_zero(&mut self, x: usize, y: usize, z: usize) {
        let base = self.index(x, y, z, 0);
        for m in 0..NM {
            self.m[base + m] = S::ZERO;
        }
    }

    /// 原始缓冲区（导出用）
    #[inline]
    pub fn raw(&self) -> &[S] {
        self.m.as_slice()
    }

    /// 原始缓冲区（备份导入用）
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [S] {
        self.m.as_mut_slice()
    }

    /// 获取无锁并行视图
    pub fn view(&mut self) -> ContinuumView<S> {
        ContinuumView {
            ptr: self.m.as_mut_slice().as_mut_ptr(),
            len: self.m.len(),
        }
    }
}

/// 跨线程共享的宏观场视图
///
/// 碰撞 pass 在导出节拍写宏观量时使用，每个单元只由拥有它的
/// 块写入。
#[derive(Clone, Copy)]
pub struct ContinuumView<S> {
    ptr: *mut S,
    len: usize,
}

unsafe impl<S: Scalar> Send for ContinuumView<S> {}
unsafe impl<S: Scalar> Sync for ContinuumView<S> {}

impl<S: Scalar> ContinuumView<S> {
    /// 写入偏移处的值
    ///
    /// # Safety
    ///
    /// 偏移必须来自同一 [`Continuum`] 的 `index`，且没有其他线程
    /// 并发写同一单元。
    #[inline(always)]
    pub unsafe fn set(&self, index: usize, value: S) {
        debug_assert!(index < self.len);
        *self.ptr.add(index) = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuum_zero_init() {
        let c: Continuum<f64> = Continuum::new(4, 3, 2);
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..4 {
                    assert_eq!(c.cell(x, y, z), [0.0; NM]);
                }
            }
        }
    }

    #[test]
    fn test_continuum_set_get() {
        let mut c: Continuum<f32> = Continuum::new(4, 4, 4);
        c.set(1, 2, 3, 0, 1.0);
        c.set(1, 2, 3, 1, 0.05);
        assert_eq!(c.get(1, 2, 3, 0), 1.0);
        assert_eq!(c.cell(1, 2, 3), [1.0, 0.05, 0.0, 0.0]);
        c.set_zero(1, 2, 3);
        assert_eq!(c.cell(1, 2, 3), [0.0; NM]);
    }

    #[test]
    fn test_continuum_index_dense() {
        let c: Continuum<f64> = Continuum::new(5, 4, 3);
        assert_eq!(c.index(0, 0, 0, 0), 0);
        assert_eq!(c.index(4, 3, 2, 3) + 1, c.raw().len());
    }
}
