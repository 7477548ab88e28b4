//! # scf 命令实现
//!
//! 从 relax 计算目录提取坐标块和晶胞块，拼出 scf.in。
//!
//! ## 依赖关系
//! - 使用 `cli/scf.rs` 定义的参数
//! - 使用 `parsers/pw_relax.rs`, `utils/pwscf.rs`
//! - 使用 `utils/output.rs`

use crate::cli::scf::ScfArgs;
use crate::error::{QcpostError, Result};
use crate::parsers::pw_relax;
use crate::utils::output;
use crate::utils::pwscf::{self, ScfConfig};

use std::fs;

/// 执行 scf 命令
pub fn execute(args: ScfArgs) -> Result<()> {
    output::print_header("Generating SCF input");

    if !args.dir.exists() {
        return Err(QcpostError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let relax_out = args.dir.join(&args.relax_out);
    let relax_in = args.dir.join(&args.relax_in);

    for path in [&relax_out, &relax_in] {
        if !path.exists() {
            return Err(QcpostError::FileNotFound {
                path: path.display().to_string(),
            });
        }
    }

    let positions = pw_relax::extract_final_positions(&relax_out, args.position_lines)?;
    let cell = pw_relax::extract_cell_parameters(&relax_in)?;

    output::print_info(&format!(
        "Extracted {} position lines from '{}'",
        args.position_lines,
        relax_out.display()
    ));
    output::print_info(&format!(
        "Extracted cell parameters from '{}'",
        relax_in.display()
    ));

    let config = ScfConfig {
        prefix: args.prefix.clone(),
        nat: args.position_lines,
        ..ScfConfig::default()
    };

    let content = pwscf::generate_scf_input(&config, &cell, &positions);

    let output_path = args.dir.join(&args.output);
    fs::write(&output_path, content).map_err(|e| QcpostError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    output::print_done(&format!("SCF input written to '{}'", output_path.display()));

    Ok(())
}
