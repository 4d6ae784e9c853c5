// crates/lf_physics/src/engine/blocks.rs

//! 立方块域分解
//!
//! 域按固定边长的立方块划分，每块是一个独立的并行工作单元。
//! 所有单元计算代价相同，静态划分即可，无需动态负载均衡。

use std::ops::Range;

/// 块边长
pub const BLOCK_SIZE: usize = 32;

/// 块网格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    nbx: usize,
    nby: usize,
    nbz: usize,
}

impl BlockGrid {
    /// 按域分辨率划分块
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            nbx: nx.div_ceil(BLOCK_SIZE),
            nby: ny.div_ceil(BLOCK_SIZE),
            nbz: nz.div_ceil(BLOCK_SIZE),
        }
    }

    /// 块总数
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.nbx * self.nby * self.nbz
    }

    /// 块 `id` 覆盖的单元范围 `(x, y, z)`
    ///
    /// x 变化最快，与线性内存布局一致。
    #[inline]
    pub fn block_ranges(&self, id: usize) -> (Range<usize>, Range<usize>, Range<usize>) {
        debug_assert!(id < self.num_blocks());
        let bx = id % self.nbx;
        let by = (id / self.nbx) % self.nby;
        let bz = id / (self.nbx * self.nby);
        let x0 = bx * BLOCK_SIZE;
        let y0 = by * BLOCK_SIZE;
        let z0 = bz * BLOCK_SIZE;
        (
            x0..(x0 + BLOCK_SIZE).min(self.nx),
            y0..(y0 + BLOCK_SIZE).min(self.ny),
            z0..(z0 + BLOCK_SIZE).min(self.nz),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_count() {
        let g = BlockGrid::new(192, 96, 96);
        assert_eq!(g.num_blocks(), 6 * 3 * 3);
        let g = BlockGrid::new(16, 16, 16);
        assert_eq!(g.num_blocks(), 1);
        let g = BlockGrid::new(33, 32, 1);
        assert_eq!(g.num_blocks(), 2);
    }

    #[test]
    fn test_blocks_tile_domain_exactly() {
        // 每个单元恰好属于一个块
        let g = BlockGrid::new(40, 33, 7);
        let mut seen = vec![0u8; 40 * 33 * 7];
        for id in 0..g.num_blocks() {
            let (xs, ys, zs) = g.block_ranges(id);
            for z in zs {
                for y in ys.clone() {
                    for x in xs.clone() {
                        seen[(z * 33 + y) * 40 + x] += 1;
                    }
                }
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_partial_edge_blocks_are_clamped() {
        let g = BlockGrid::new(33, 32, 32);
        let (xs, _, _) = g.block_ranges(1);
        assert_eq!(xs, 32..33);
    }
}
