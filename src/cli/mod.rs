//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `bands`: 能带数据重整 (QE .gnu 导出 -> 每带一列的 CSV)
//! - `slab`: CRYSTAL 日志转板层结构文件 (POSCAR / pw.x 片段)
//! - `scf`: 从 relax 计算拼接 scf.in
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: bands, slab, scf

pub mod bands;
pub mod scf;
pub mod slab;

use clap::{Parser, Subcommand};

/// qcpost - Quantum ESPRESSO / CRYSTAL 后处理工具箱
#[derive(Parser)]
#[command(name = "qcpost")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A post-processing toolkit for Quantum ESPRESSO and CRYSTAL calculations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Reshape two-column (k, E) band data into one column per band
    Bands(bands::BandsArgs),

    /// Convert CRYSTAL output logs to slab structure files (POSCAR / pw.x)
    Slab(slab::SlabArgs),

    /// Splice relax results into an scf.in input file
    Scf(scf::ScfArgs),
}
