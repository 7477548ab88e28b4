//! # slab 子命令 CLI 定义
//!
//! CRYSTAL 日志转板层结构文件 (POSCAR / pw.x 片段)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/slab.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 支持的输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SlabFormat {
    /// VASP POSCAR format
    Poscar,
    /// Quantum ESPRESSO pw.x structure cards
    PwIn,
}

impl std::fmt::Display for SlabFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlabFormat::Poscar => write!(f, "poscar"),
            SlabFormat::PwIn => write!(f, "pw-in"),
        }
    }
}

/// slab 子命令参数
#[derive(Args, Debug)]
pub struct SlabArgs {
    /// Input CRYSTAL log file, or a directory of logs
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for converted files
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Target output format
    #[arg(short, long, value_enum, default_value_t = SlabFormat::Poscar)]
    pub target: SlabFormat,

    /// Vacuum gap added above the slab (length units of the source log)
    #[arg(long, default_value_t = 15.0)]
    pub vacuum: f64,

    /// Do not add any vacuum padding
    #[arg(long, default_value_t = false)]
    pub no_vacuum: bool,

    /// Emit full-precision components instead of the legacy 15-character fields
    #[arg(long, default_value_t = false)]
    pub full_precision: bool,

    /// Re-parse emitted POSCAR output and check that species grouping and
    /// lattice survive the number formatting
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Glob pattern for input files (directory mode)
    #[arg(short, long, default_value = "*.out")]
    pub pattern: String,

    /// Recurse into subdirectories (directory mode)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto, directory mode)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
