//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `bands/`, `parsers/`, `models/`, `utils/`
//! - 子模块: bands, slab, scf

pub mod bands;
pub mod scf;
pub mod slab;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Bands(args) => bands::execute(args),
        Commands::Slab(args) => slab::execute(args),
        Commands::Scf(args) => scf::execute(args),
    }
}
