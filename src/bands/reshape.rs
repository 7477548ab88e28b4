//! # 能带数据重整
//!
//! 把 Quantum ESPRESSO 导出的两列 (k, E) 采样流转置成每个 k 点
//! 一行、每条能带一列的表。
//!
//! 能带数 N 取最小 k 值在原始序列里出现的次数。历史脚本对出现
//! 次数多于 N 的 k 点静默截断到前 N 个能量；`Compat` 模式保留该
//! 行为，`Strict` 模式把任何不一致当成错误。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 使用
//! - 使用 `error.rs`

use crate::error::{QcpostError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 手工整理的 .gnu 导出文件携带的表头行
pub const HEADER_LINE: &str = "k E";

/// 不一致能带数的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReshapeMode {
    /// 多出的能量静默截断（与历史脚本一致）
    Compat,
    /// 任何与能带数不一致的 k 点都报错
    Strict,
}

/// 重整后的能带表
///
/// `bands[n][i]` 是第 n 条能带在 `kpoints[i]` 处的能量。
/// 不变量：每条能带的长度都等于 `kpoints.len()`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandTable {
    /// 去重升序的 k 值
    pub kpoints: Vec<f64>,

    /// 能带为主序的能量列
    pub bands: Vec<Vec<f64>>,
}

impl BandTable {
    pub fn num_kpoints(&self) -> usize {
        self.kpoints.len()
    }

    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// 全表能量最小/最大值
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for band in &self.bands {
            for &e in band {
                min = min.min(e);
                max = max.max(e);
            }
        }
        if min.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

/// 读取并重整能带文件
pub fn reshape_band_file(path: &Path, mode: ReshapeMode) -> Result<BandTable> {
    let content = fs::read_to_string(path).map_err(|e| QcpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    reshape_band_content(&content, &path.display().to_string(), mode)
}

/// 从字符串内容重整能带表
pub fn reshape_band_content(content: &str, label: &str, mode: ReshapeMode) -> Result<BandTable> {
    let samples = parse_band_samples(content, label)?;
    reshape(&samples, mode)
}

/// 解析两列采样流
///
/// 首行若是表头 `k E` 则按名跳过；token 数不是 2 的行静默跳过；
/// 两 token 行里出现非数值 token 报 ParseError。
pub fn parse_band_samples(content: &str, label: &str) -> Result<Vec<(f64, f64)>> {
    let mut samples = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if idx == 0 && line.trim() == HEADER_LINE {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            continue;
        }

        let k: f64 = tokens[0].parse().map_err(|_| QcpostError::ParseError {
            format: "band data".to_string(),
            path: label.to_string(),
            reason: format!("line {}: '{}' is not numeric", idx + 1, tokens[0]),
        })?;
        let e: f64 = tokens[1].parse().map_err(|_| QcpostError::ParseError {
            format: "band data".to_string(),
            path: label.to_string(),
            reason: format!("line {}: '{}' is not numeric", idx + 1, tokens[1]),
        })?;

        samples.push((k, e));
    }

    Ok(samples)
}

/// 把采样流转置成能带表
pub fn reshape(samples: &[(f64, f64)], mode: ReshapeMode) -> Result<BandTable> {
    if samples.is_empty() {
        return Err(QcpostError::Other(
            "no band samples found in input".to_string(),
        ));
    }

    // 去重升序的 k 值
    let mut kpoints: Vec<f64> = samples.iter().map(|(k, _)| *k).collect();
    kpoints.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    kpoints.dedup();

    // 能带数 = 最小 k 在原始序列的出现次数
    let k_min = kpoints[0];
    let num_bands = samples.iter().filter(|(k, _)| *k == k_min).count();

    let mut bands: Vec<Vec<f64>> = vec![Vec::with_capacity(kpoints.len()); num_bands];

    for &k in &kpoints {
        let energies: Vec<f64> = samples
            .iter()
            .filter(|(sk, _)| *sk == k)
            .map(|(_, e)| *e)
            .collect();

        if energies.len() < num_bands || (mode == ReshapeMode::Strict && energies.len() != num_bands)
        {
            return Err(QcpostError::BandCountMismatch {
                kpoint: k,
                expected: num_bands,
                found: energies.len(),
            });
        }

        for (band, &energy) in bands.iter_mut().zip(energies.iter()) {
            band.push(energy);
        }
    }

    Ok(BandTable { kpoints, bands })
}
