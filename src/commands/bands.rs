//! # bands 命令实现
//!
//! 重整能带数据并导出 CSV，可选生成能带图。
//!
//! ## 依赖关系
//! - 使用 `cli/bands.rs` 定义的参数
//! - 使用 `bands/` 模块
//! - 使用 `utils/output.rs`

use crate::bands::{export, plot, reshape, ReshapeMode};
use crate::cli::bands::BandsArgs;
use crate::error::{QcpostError, Result};
use crate::utils::output;

/// 执行 bands 命令
pub fn execute(args: BandsArgs) -> Result<()> {
    output::print_header("Reshaping band data");

    if !args.input.exists() {
        return Err(QcpostError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let mode = if args.strict {
        ReshapeMode::Strict
    } else {
        ReshapeMode::Compat
    };

    let table = reshape::reshape_band_file(&args.input, mode)?;

    output::print_info(&format!("Reshaped '{}'", args.input.display()));
    output::print_kv("k-points", &table.num_kpoints().to_string());
    output::print_kv("bands", &table.num_bands().to_string());
    if let Some((e_min, e_max)) = table.energy_range() {
        output::print_kv("energy range", &format!("{:.4} .. {:.4} eV", e_min, e_max));
    }

    export::to_csv(&table, &args.output)?;
    output::print_success(&format!("Band table saved to '{}'", args.output.display()));

    if let Some(ref plot_path) = args.plot {
        let title = args.title.clone().unwrap_or_else(|| {
            args.input
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("Band structure")
                .to_string()
        });
        plot::generate_band_plot(&table, plot_path, &title)?;
        output::print_success(&format!("Band plot saved to '{}'", plot_path.display()));
    }

    Ok(())
}
