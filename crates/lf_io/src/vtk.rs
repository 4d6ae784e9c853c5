// crates/lf_io/src/vtk.rs

//! Legacy ASCII VTK 导出
//!
//! 把宏观场写成 `STRUCTURED_POINTS` 数据集，ParaView 可直接打开。
//! 点序与内部存储一致（x 最快，z 最慢），无需任何转置。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lf_foundation::Scalar;
use lf_physics::continuum::NM;
use lf_physics::Continuum;
use tracing::debug;

use crate::error::IoResult;

/// 写文件头与点网格描述
fn write_header<W: Write, S: Scalar>(
    w: &mut W,
    cont: &Continuum<S>,
    title: &str,
) -> IoResult<()> {
    writeln!(w, "# vtk DataFile Version 3.0")?;
    writeln!(w, "{title}")?;
    writeln!(w, "ASCII")?;
    writeln!(w, "DATASET STRUCTURED_POINTS")?;
    writeln!(w, "DIMENSIONS {} {} {}", cont.nx(), cont.ny(), cont.nz())?;
    writeln!(w, "ORIGIN 0 0 0")?;
    writeln!(w, "SPACING 1 1 1")?;
    writeln!(w, "POINT_DATA {}", cont.nx() * cont.ny() * cont.nz())?;
    Ok(())
}

/// 导出完整宏观场（密度标量 + 速度矢量）
///
/// 文件名为 `lbm_<step>.vtk`，写入 `dir`（不存在则创建）。
pub fn write_continuum<S: Scalar>(
    dir: &Path,
    cont: &Continuum<S>,
    step: usize,
) -> IoResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("lbm_{step}.vtk"));
    let mut w = BufWriter::new(File::create(&path)?);

    write_header(&mut w, cont, &format!("LatticeFlux continuum, step {step}"))?;

    writeln!(w, "SCALARS density double 1")?;
    writeln!(w, "LOOKUP_TABLE default")?;
    for z in 0..cont.nz() {
        for y in 0..cont.ny() {
            for x in 0..cont.nx() {
                writeln!(w, "{:e}", cont.get(x, y, z, 0).to_f64())?;
            }
        }
    }

    writeln!(w, "VECTORS velocity double")?;
    for z in 0..cont.nz() {
        for y in 0..cont.ny() {
            for x in 0..cont.nx() {
                let c = cont.cell(x, y, z);
                writeln!(
                    w,
                    "{:e} {:e} {:e}",
                    c[1].to_f64(),
                    c[2].to_f64(),
                    c[3].to_f64()
                )?;
            }
        }
    }

    w.flush()?;
    debug!(path = %path.display(), step, "VTK 导出完成");
    Ok(path)
}

/// 导出单个宏观分量
///
/// `moment` 是分量下标（0=rho，1..=3 为速度分量），`name` 用作
/// 字段名与文件名前缀。
pub fn write_scalar<S: Scalar>(
    dir: &Path,
    cont: &Continuum<S>,
    moment: usize,
    name: &str,
    step: usize,
) -> IoResult<PathBuf> {
    assert!(moment < NM, "分量下标越界: {moment}");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}_{step}.vtk"));
    let mut w = BufWriter::new(File::create(&path)?);

    write_header(&mut w, cont, &format!("LatticeFlux {name}, step {step}"))?;

    writeln!(w, "SCALARS {name} double 1")?;
    writeln!(w, "LOOKUP_TABLE default")?;
    for z in 0..cont.nz() {
        for y in 0..cont.ny() {
            for x in 0..cont.nx() {
                writeln!(w, "{:e}", cont.get(x, y, z, moment).to_f64())?;
            }
        }
    }

    w.flush()?;
    Ok(path)
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Continuum<f64> {
        let mut c = Continuum::new(2, 2, 1);
        for y in 0..2 {
            for x in 0..2 {
                c.set(x, y, 0, 0, 1.0);
                c.set(x, y, 0, 1, 0.05);
            }
        }
        c
    }

    #[test]
    fn test_vtk_header_layout() {
        let dir = std::env::temp_dir().join("lf_io_test_vtk");
        let path = write_continuum(&dir, &sample(), 40).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# vtk DataFile Version 3.0");
        assert_eq!(lines[2], "ASCII");
        assert_eq!(lines[3], "DATASET STRUCTURED_POINTS");
        assert_eq!(lines[4], "DIMENSIONS 2 2 1");
        assert_eq!(lines[7], "POINT_DATA 4");
        assert_eq!(lines[8], "SCALARS density double 1");
        // 4 个密度值之后是速度段
        assert_eq!(lines[14], "VECTORS velocity double");
        assert!(lines[15].starts_with("5e-2 "));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_scalar_export_names_field() {
        let dir = std::env::temp_dir().join("lf_io_test_vtk_scalar");
        let path = write_scalar(&dir, &sample(), 1, "ux", 0).unwrap();
        assert!(path.ends_with("ux_0.vtk"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("SCALARS ux double 1"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
