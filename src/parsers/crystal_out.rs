//! # CRYSTAL 输出日志解析器
//!
//! 从 CRYSTAL 的 .out 日志中提取笛卡尔坐标块和晶格向量块。
//!
//! ## 块格式说明
//! ```text
//! CARTESIAN COORDINATES - PRIMITIVE CELL
//! ***************************...            # 3 行表头
//!     1    42 MO    0.00E+00  1.82E+00  4.56E+00
//!     2    16 S     1.58E+00  9.12E-01  3.00E+00
//!                                           # 首 token 非整数即块结束
//!
//! DIRECT LATTICE VECTORS CARTESIAN COMPONENTS (ANGSTROM)
//! ***************************...            # 3 行表头
//!  B1   3.16E+00  0.00E+00  0.00E+00        # 行标签丢弃，分量保留为文本
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/slab.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{QcpostError, Result};
use crate::models::{LatticeVectors, SlabAtom, SlabStructure};
use crate::parsers::find_anchor;
use regex::Regex;
use std::fs;
use std::path::Path;

/// 坐标块锚行
pub const COORDINATES_ANCHOR: &str = "CARTESIAN COORDINATES - PRIMITIVE CELL";

/// 坐标块数据行相对锚行的偏移（锚行 + 3 行表头）
pub const COORDINATES_HEADER_SKIP: usize = 4;

/// 晶格向量块锚行
pub const LATTICE_ANCHOR: &str = "DIRECT LATTICE VECTORS CARTESIAN COMPONENTS (ANGSTROM)";

/// 晶格向量数据行相对锚行的偏移
pub const LATTICE_HEADER_SKIP: usize = 4;

/// 坐标行的字段数：序号、原子序数、元素符号、x、y、z
const COORDINATE_ROW_FIELDS: usize = 6;

/// 解析 CRYSTAL 输出日志文件
pub fn parse_slab_log(path: &Path) -> Result<SlabStructure> {
    let content = fs::read_to_string(path).map_err(|e| QcpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_slab_content(
        &content,
        path.file_stem().and_then(|s| s.to_str()).unwrap_or("slab"),
    )
}

/// 从字符串内容解析两个数据块
pub fn parse_slab_content(content: &str, name: &str) -> Result<SlabStructure> {
    let atoms = parse_coordinates_content(content, name)?;
    let lattice = parse_lattice_content(content, name)?;
    Ok(SlabStructure::new(name, atoms, lattice))
}

/// 解析笛卡尔坐标块
///
/// 从锚行后第 4 行开始读，直到首个 token 不再是十进制整数为止。
pub fn parse_coordinates_content(content: &str, label: &str) -> Result<Vec<SlabAtom>> {
    let lines: Vec<&str> = content.lines().collect();

    let anchor =
        find_anchor(&lines, COORDINATES_ANCHOR).ok_or_else(|| QcpostError::AnchorNotFound {
            anchor: COORDINATES_ANCHOR.to_string(),
            path: label.to_string(),
        })?;

    let species_re = Regex::new(r"^[A-Z][A-Za-z]?$").unwrap();
    let mut atoms = Vec::new();

    for (line_idx, line) in lines
        .iter()
        .enumerate()
        .skip(anchor + COORDINATES_HEADER_SKIP)
    {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        // 首 token 不是十进制整数即数据块结束（含空行）
        match tokens.first() {
            Some(first) if first.parse::<u64>().is_ok() => {}
            _ => break,
        }

        if tokens.len() < COORDINATE_ROW_FIELDS {
            return Err(QcpostError::MalformedRow {
                path: label.to_string(),
                line: line_idx + 1,
                reason: format!(
                    "expected {} fields, found {}",
                    COORDINATE_ROW_FIELDS,
                    tokens.len()
                ),
            });
        }

        let atomic_number: u32 = tokens[1].parse().map_err(|_| QcpostError::ParseError {
            format: "crystal output".to_string(),
            path: label.to_string(),
            reason: format!(
                "line {}: atomic number '{}' is not an integer",
                line_idx + 1,
                tokens[1]
            ),
        })?;

        let species = tokens[2];
        if !species_re.is_match(species) {
            return Err(QcpostError::MalformedRow {
                path: label.to_string(),
                line: line_idx + 1,
                reason: format!("'{}' is not an element symbol", species),
            });
        }

        let mut cart = [0.0; 3];
        for (i, token) in tokens[3..COORDINATE_ROW_FIELDS].iter().enumerate() {
            cart[i] = token.parse().map_err(|_| QcpostError::ParseError {
                format: "crystal output".to_string(),
                path: label.to_string(),
                reason: format!("line {}: coordinate '{}' is not numeric", line_idx + 1, token),
            })?;
        }

        atoms.push(SlabAtom::new(atomic_number, species, cart));
    }

    Ok(atoms)
}

/// 解析晶格向量块
///
/// 从锚行后第 4 行开始恰好读 3 行；每行首 token 是行标签 (B1/B2/B3)，
/// 丢弃之，余下 3 个分量保留为文本 token。
pub fn parse_lattice_content(content: &str, label: &str) -> Result<LatticeVectors> {
    let lines: Vec<&str> = content.lines().collect();

    let anchor = find_anchor(&lines, LATTICE_ANCHOR).ok_or_else(|| QcpostError::AnchorNotFound {
        anchor: LATTICE_ANCHOR.to_string(),
        path: label.to_string(),
    })?;

    let start = anchor + LATTICE_HEADER_SKIP;
    let mut rows = [
        [String::new(), String::new(), String::new()],
        [String::new(), String::new(), String::new()],
        [String::new(), String::new(), String::new()],
    ];

    for (i, row) in rows.iter_mut().enumerate() {
        let line = lines.get(start + i).ok_or_else(|| QcpostError::MalformedRow {
            path: label.to_string(),
            line: start + i + 1,
            reason: "unexpected end of file in lattice vector block".to_string(),
        })?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(QcpostError::MalformedRow {
                path: label.to_string(),
                line: start + i + 1,
                reason: format!(
                    "expected row label and 3 components, found {} fields",
                    tokens.len()
                ),
            });
        }

        for (j, component) in row.iter_mut().enumerate() {
            *component = tokens[j + 1].to_string();
        }
    }

    Ok(LatticeVectors::new(rows))
}
