//! # qcpost - Quantum ESPRESSO / CRYSTAL 后处理工具箱
//!
//! 把零散的计算后处理脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `bands` - 能带数据重整 (两列采样流 -> 每带一列的 CSV，可选作图)
//! - `slab`  - CRYSTAL 日志转板层结构文件 (POSCAR / pw.x 片段)
//! - `scf`   - 从 relax 计算拼接 scf.in
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── bands/      (能带重整、导出、作图)
//!   ├── parsers/    (日志解析器与结构发射器)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod bands;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
