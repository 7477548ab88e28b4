//! # bands 子命令 CLI 定义
//!
//! 能带数据重整 (两列采样流 -> 每带一列的 CSV，可选作图)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/bands.rs`

use clap::Args;
use std::path::PathBuf;

/// bands 子命令参数
#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Input band data file (whitespace-separated k E pairs)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long, default_value = "bands.csv")]
    pub output: PathBuf,

    /// Generate a band structure plot (PNG, or SVG by extension)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot title (defaults to the input file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Reject k-points whose energy count differs from the band count
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}
