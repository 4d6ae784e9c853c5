// crates/lf_io/src/backup.rs

//! 分布函数与宏观场的备份与恢复
//!
//! 支持模拟中断后续算的二进制快照。
//!
//! # 文件格式 (v1)
//!
//! ```text
//! [魔数: 4 bytes] "LFPB" (分布函数) / "LFCM" (宏观场)
//! [版本: u32]
//! [nx: u64] [ny: u64] [nz: u64]
//! [npop: u64] [nd: u64]          (仅分布函数)
//! [标量宽度: u8] (4 = f32, 8 = f64)
//! [原始缓冲区: len * 标量宽度 bytes, 小端]
//! ```
//!
//! 恢复时对每个维度做一致性检查，任何不匹配都拒绝加载。

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use lf_foundation::Scalar;
use lf_lattice::Lattice;
use lf_physics::{Continuum, Population};
use tracing::info;

use crate::error::{IoError, IoResult};

const MAGIC: &[u8; 4] = b"LFPB";
const MAGIC_CONTINUUM: &[u8; 4] = b"LFCM";
const VERSION: u32 = 1;

/// 导出分布函数到文件
pub fn export_population<S: Scalar, L: Lattice>(
    path: &Path,
    pop: &Population<S, L>,
) -> IoResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let lay = pop.layout();
    let mut w = BufWriter::new(File::create(path)?);

    w.write_all(MAGIC)?;
    w.write_all(&VERSION.to_le_bytes())?;
    w.write_all(&(lay.nx() as u64).to_le_bytes())?;
    w.write_all(&(lay.ny() as u64).to_le_bytes())?;
    w.write_all(&(lay.nz() as u64).to_le_bytes())?;
    w.write_all(&(lay.npop() as u64).to_le_bytes())?;
    w.write_all(&(L::ND as u64).to_le_bytes())?;
    w.write_all(&[S::PRECISION.size_bytes() as u8])?;
    w.write_all(bytemuck::cast_slice(pop.raw()))?;
    w.flush()?;

    info!(path = %path.display(), cells = lay.nx() * lay.ny() * lay.nz(), "分布函数备份完成");
    Ok(())
}

/// 从文件恢复分布函数
///
/// 文件里的网格与格子参数必须与 `pop` 完全一致。
pub fn import_population<S: Scalar, L: Lattice>(
    path: &Path,
    pop: &mut Population<S, L>,
) -> IoResult<()> {
    let mut r = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(IoError::Format(format!("魔数不匹配: {magic:?}")));
    }
    let version = read_u32(&mut r)?;
    if version != VERSION {
        return Err(IoError::Format(format!("不支持的版本: {version}")));
    }

    let lay = pop.layout();
    check(&mut r, "nx", lay.nx())?;
    check(&mut r, "ny", lay.ny())?;
    check(&mut r, "nz", lay.nz())?;
    check(&mut r, "npop", lay.npop())?;
    check(&mut r, "nd", L::ND)?;

    let mut width = [0u8; 1];
    r.read_exact(&mut width)?;
    if width[0] as usize != S::PRECISION.size_bytes() {
        return Err(IoError::DimensionMismatch {
            field: "scalar_bytes",
            expected: S::PRECISION.size_bytes(),
            actual: width[0] as usize,
        });
    }

    r.read_exact(bytemuck::cast_slice_mut(pop.raw_mut()))?;
    Ok(())
}

/// 导出宏观场到文件
pub fn export_continuum<S: Scalar>(path: &Path, cont: &Continuum<S>) -> IoResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);

    w.write_all(MAGIC_CONTINUUM)?;
    w.write_all(&VERSION.to_le_bytes())?;
    w.write_all(&(cont.nx() as u64).to_le_bytes())?;
    w.write_all(&(cont.ny() as u64).to_le_bytes())?;
    w.write_all(&(cont.nz() as u64).to_le_bytes())?;
    w.write_all(&[S::PRECISION.size_bytes() as u8])?;
    w.write_all(bytemuck::cast_slice(cont.raw()))?;
    w.flush()?;
    Ok(())
}

/// 从文件恢复宏观场
pub fn import_continuum<S: Scalar>(path: &Path, cont: &mut Continuum<S>) -> IoResult<()> {
    let mut r = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC_CONTINUUM {
        return Err(IoError::Format(format!("魔数不匹配: {magic:?}")));
    }
    let version = read_u32(&mut r)?;
    if version != VERSION {
        return Err(IoError::Format(format!("不支持的版本: {version}")));
    }

    check(&mut r, "nx", cont.nx())?;
    check(&mut r, "ny", cont.ny())?;
    check(&mut r, "nz", cont.nz())?;

    let mut width = [0u8; 1];
    r.read_exact(&mut width)?;
    if width[0] as usize != S::PRECISION.size_bytes() {
        return Err(IoError::DimensionMismatch {
            field: "scalar_bytes",
            expected: S::PRECISION.size_bytes(),
            actual: width[0] as usize,
        });
    }

    r.read_exact(bytemuck::cast_slice_mut(cont.raw_mut()))?;
    Ok(())
}

fn read_u32<R: Read>(r: &mut R) -> IoResult<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> IoResult<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn check<R: Read>(r: &mut R, field: &'static str, expected: usize) -> IoResult<()> {
    let actual = read_u64(r)? as usize;
    if actual != expected {
        return Err(IoError::DimensionMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

// ============================================================
// 测试
// ============================================================
