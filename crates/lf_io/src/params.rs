// crates/lf_io/src/params.rs

//! 模拟参数导出
//!
//! 把一次运行的完整配置写成 JSON，便于后处理脚本和复现实验。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lf_foundation::Precision;
use lf_physics::types::Relaxation;
use lf_physics::SimulationConfig;
use serde::{Deserialize, Serialize};

use crate::error::IoResult;

/// 一次运行的可序列化参数集
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParameters {
    /// 求解器配置
    pub config: SimulationConfig,
    /// 推导出的松弛参数
    pub relaxation: Relaxation,
    /// 碰撞算子名
    pub operator: String,
    /// 浮点精度
    pub precision: Precision,
    /// rayon 线程数
    pub threads: usize,
}

/// 把参数集写成带缩进的 JSON 文件
pub fn export_parameters(path: &Path, params: &RunParameters) -> IoResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, params)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_lattice::D3Q27;

    #[test]
    fn test_parameters_round_trip() {
        let config = SimulationConfig::default();
        let relaxation = config.relaxation::<D3Q27>().unwrap();
        let params = RunParameters {
            config,
            relaxation,
            operator: "bgk-smagorinsky".to_owned(),
            precision: Precision::F64,
            threads: 8,
        };

        let path = std::env::temp_dir().join("lf_io_test_params.json");
        export_parameters(&path, &params).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: RunParameters = serde_json::from_str(&text).unwrap();
        assert_eq!(back.config.nx, params.config.nx);
        assert_eq!(back.operator, "bgk-smagorinsky");
        assert!((back.relaxation.tau - relaxation.tau).abs() < 1e-15);
        std::fs::remove_file(&path).ok();
    }
}
