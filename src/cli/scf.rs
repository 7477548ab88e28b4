//! # scf 子命令 CLI 定义
//!
//! 从 relax 计算目录拼接 scf.in
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scf.rs`

use crate::parsers::pw_relax::DEFAULT_POSITION_LINES;
use clap::Args;
use std::path::PathBuf;

/// scf 子命令参数
#[derive(Args, Debug)]
pub struct ScfArgs {
    /// Directory containing relax.out and relax.in
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Relaxation output file name
    #[arg(long, default_value = "relax.out")]
    pub relax_out: String,

    /// Relaxation input file name
    #[arg(long, default_value = "relax.in")]
    pub relax_in: String,

    /// Output file name
    #[arg(long, default_value = "scf.in")]
    pub output: String,

    /// Number of atomic-position lines to copy from the relax output
    #[arg(long, default_value_t = DEFAULT_POSITION_LINES)]
    pub position_lines: usize,

    /// Calculation prefix written into the &CONTROL block
    #[arg(long, default_value = "slab")]
    pub prefix: String,
}
