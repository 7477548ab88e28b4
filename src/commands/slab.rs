//! # slab 命令实现
//!
//! 把 CRYSTAL 日志转换成板层结构文件。
//!
//! ## 功能
//! - 单文件模式：转换一个日志并打印物种摘要
//! - 目录模式：按 glob 收集日志并行转换
//! - 排序（原子序数降序）、z 归零、真空层在转换管线里统一完成
//!
//! ## 依赖关系
//! - 使用 `cli/slab.rs` 定义的参数
//! - 使用 `parsers/crystal_out.rs`, `parsers/poscar.rs`, `parsers/pw_in.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::slab::{SlabArgs, SlabFormat};
use crate::error::{QcpostError, Result};
use crate::models::SlabStructure;
use crate::parsers::{crystal_out, poscar, pw_in};
use crate::utils::numfmt::NumberStyle;
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tabled::{Table, Tabled};
use walkdir::WalkDir;

/// 物种摘要行
#[derive(Debug, Clone, Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Atoms")]
    count: usize,
}

enum ConvertOutcome {
    Converted(Box<SlabStructure>),
    Skipped,
}

/// 执行 slab 命令
pub fn execute(args: SlabArgs) -> Result<()> {
    output::print_header(&format!("Converting to {} format", args.target));

    if !args.input.exists() {
        return Err(QcpostError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let vacuum = if args.no_vacuum {
        None
    } else {
        Some(args.vacuum)
    };
    let style = if args.full_precision {
        NumberStyle::Full
    } else {
        NumberStyle::Legacy
    };

    fs::create_dir_all(&args.output).map_err(|e| QcpostError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    if args.input.is_file() {
        convert_single(&args, vacuum, style)
    } else {
        convert_batch(&args, vacuum, style)
    }
}

/// POSCAR 回读校验：物种分组、原子数和带真空层的晶格必须在数值
/// 格式化之后原样可还原（legacy 截断对大数量级会破坏这一点）。
fn verify_poscar(content: &str, slab: &SlabStructure, vacuum: Option<f64>) -> Result<()> {
    let parsed = poscar::parse_poscar_content(content, &slab.name)?;

    let grouping = slab.species_grouping();
    let species: Vec<&str> = grouping.iter().map(|g| g.species.as_str()).collect();
    let counts: Vec<usize> = grouping.iter().map(|g| g.count).collect();

    if parsed.species != species || parsed.counts != counts {
        return Err(QcpostError::Other(format!(
            "round-trip check failed for '{}': species grouping not preserved",
            parsed.name
        )));
    }

    if parsed.positions.len() != slab.atoms.len() || parsed.coordinate_marker != "direct" {
        return Err(QcpostError::Other(format!(
            "round-trip check failed for '{}': atom block not preserved",
            parsed.name
        )));
    }

    let expected = slab.lattice_matrix(vacuum)?;
    if (parsed.lattice[2][2] - expected[2][2]).abs() > 1e-6 {
        return Err(QcpostError::Other(format!(
            "round-trip check failed for '{}': out-of-plane lattice component \
             {} does not survive formatting (expected {})",
            parsed.name, parsed.lattice[2][2], expected[2][2]
        )));
    }

    Ok(())
}

/// 单文件模式
fn convert_single(args: &SlabArgs, vacuum: Option<f64>, style: NumberStyle) -> Result<()> {
    match convert_file(
        &args.input,
        &args.output,
        args.target,
        vacuum,
        style,
        args.overwrite,
        args.verify,
    )? {
        ConvertOutcome::Skipped => {
            output::print_skip(&format!(
                "{}: output exists (use --overwrite)",
                args.input.display()
            ));
        }
        ConvertOutcome::Converted(slab) => {
            let rows: Vec<SpeciesRow> = slab
                .species_grouping()
                .into_iter()
                .map(|g| SpeciesRow {
                    species: g.species,
                    count: g.count,
                })
                .collect();
            println!("{}", Table::new(&rows));

            output::print_done(&format!(
                "Converted '{}' ({} atoms) to '{}'",
                args.input.display(),
                slab.atoms.len(),
                args.target
            ));
        }
    }

    Ok(())
}

/// 目录模式：并行批量转换
fn convert_batch(args: &SlabArgs, vacuum: Option<f64>, style: NumberStyle) -> Result<()> {
    let files = collect_input_files(&args.input, &args.pattern, args.recursive)?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} files to convert", files.len()));

    let num_threads = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();

    let pb = progress::create_progress_bar(files.len() as u64, "Converting");
    let success_count = AtomicUsize::new(0);
    let skip_count = AtomicUsize::new(0);

    files.par_iter().for_each(|input_path| {
        match convert_file(
            input_path,
            &args.output,
            args.target,
            vacuum,
            style,
            args.overwrite,
            args.verify,
        ) {
            Ok(ConvertOutcome::Converted(_)) => {
                success_count.fetch_add(1, Ordering::SeqCst);
            }
            Ok(ConvertOutcome::Skipped) => {
                skip_count.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                pb.suspend(|| {
                    output::print_error(&format!("{}: {}", input_path.display(), e));
                });
            }
        }
        pb.inc(1);
    });

    pb.finish_with_message("Done");

    output::print_done(&format!(
        "Converted {} file(s) to '{}' in '{}' ({} skipped)",
        success_count.load(Ordering::SeqCst),
        args.target,
        args.output.display(),
        skip_count.load(Ordering::SeqCst)
    ));

    Ok(())
}

/// 收集输入文件
fn collect_input_files(input_dir: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = if recursive {
        WalkDir::new(input_dir)
    } else {
        WalkDir::new(input_dir).max_depth(1)
    };

    let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
        QcpostError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if glob_pattern.matches(name) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// 转换单个日志文件：解析 → 排序 → z 归零 → 发射
fn convert_file(
    input_path: &Path,
    output_dir: &Path,
    target: SlabFormat,
    vacuum: Option<f64>,
    style: NumberStyle,
    overwrite: bool,
    verify: bool,
) -> Result<ConvertOutcome> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("slab");

    let output_path = match target {
        SlabFormat::Poscar => output_dir.join(format!("POSCAR_{}", stem)),
        SlabFormat::PwIn => output_dir.join(format!("{}.pwi", stem)),
    };

    if output_path.exists() && !overwrite {
        return Ok(ConvertOutcome::Skipped);
    }

    let mut slab = crystal_out::parse_slab_log(input_path)?;
    slab.sort_by_atomic_number_desc();
    slab.shift_z_to_zero();

    let content = match target {
        SlabFormat::Poscar => poscar::to_poscar_string(&slab, vacuum, style)?,
        SlabFormat::PwIn => pw_in::to_pw_input_string(&slab, vacuum, style)?,
    };

    if verify && target == SlabFormat::Poscar {
        verify_poscar(&content, &slab, vacuum)?;
    }

    fs::write(&output_path, content).map_err(|e| QcpostError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(ConvertOutcome::Converted(Box::new(slab)))
}
