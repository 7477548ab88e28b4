//! # pw.x relax 输出/输入块提取器
//!
//! 从 relax.out 提取最终原子坐标块，从 relax.in 提取晶胞参数块。
//! 两个块都是逐字切片，不解析其内容。
//!
//! ## 依赖关系
//! - 被 `commands/scf.rs` 使用
//! - 无数据模型依赖（输出是不透明文本块）

use crate::error::{QcpostError, Result};
use crate::parsers::find_anchor;
use std::fs;
use std::path::Path;

/// relax.out 最终坐标锚行
pub const FINAL_COORDINATES_ANCHOR: &str = "Begin final coordinates";

/// 锚行之后跳过的行数（空行 + ATOMIC_POSITIONS 标题行）
pub const FINAL_COORDINATES_SKIP: usize = 2;

/// 默认提取的坐标行数
pub const DEFAULT_POSITION_LINES: usize = 16;

/// relax.in 晶胞参数锚行
pub const CELL_PARAMETERS_ANCHOR: &str = "CELL_PARAMETERS";

/// 锚行之后提取的行数
pub const CELL_PARAMETERS_LINES: usize = 4;

/// 从 relax.out 提取最终原子坐标块
pub fn extract_final_positions(path: &Path, num_lines: usize) -> Result<String> {
    let content = read_file(path)?;
    extract_final_positions_content(&content, &path.display().to_string(), num_lines)
}

/// 从字符串内容提取最终原子坐标块
pub fn extract_final_positions_content(
    content: &str,
    label: &str,
    num_lines: usize,
) -> Result<String> {
    let lines: Vec<&str> = content.lines().collect();

    let anchor = find_anchor(&lines, FINAL_COORDINATES_ANCHOR).ok_or_else(|| {
        QcpostError::AnchorNotFound {
            anchor: FINAL_COORDINATES_ANCHOR.to_string(),
            path: label.to_string(),
        }
    })?;

    slice_verbatim(
        &lines,
        anchor + 1 + FINAL_COORDINATES_SKIP,
        num_lines,
        label,
    )
}

/// 从 relax.in 提取晶胞参数块
pub fn extract_cell_parameters(path: &Path) -> Result<String> {
    let content = read_file(path)?;
    extract_cell_parameters_content(&content, &path.display().to_string())
}

/// 从字符串内容提取晶胞参数块
pub fn extract_cell_parameters_content(content: &str, label: &str) -> Result<String> {
    let lines: Vec<&str> = content.lines().collect();

    let anchor =
        find_anchor(&lines, CELL_PARAMETERS_ANCHOR).ok_or_else(|| QcpostError::AnchorNotFound {
            anchor: CELL_PARAMETERS_ANCHOR.to_string(),
            path: label.to_string(),
        })?;

    slice_verbatim(&lines, anchor + 1, CELL_PARAMETERS_LINES, label)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| QcpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 逐字切出 [start, start + count) 的行并拼接
fn slice_verbatim(lines: &[&str], start: usize, count: usize, label: &str) -> Result<String> {
    if start + count > lines.len() {
        return Err(QcpostError::ParseError {
            format: "relax".to_string(),
            path: label.to_string(),
            reason: format!(
                "expected {} lines after line {}, file has {}",
                count,
                start,
                lines.len()
            ),
        });
    }

    let mut block = String::new();
    for line in &lines[start..start + count] {
        block.push_str(line);
        block.push('\n');
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relax_out() -> String {
        let mut text = String::from(
            "     Final energy   =   -489.23146721 Ry\n\
             Begin final coordinates\n\
             \n\
             ATOMIC_POSITIONS (angstrom)\n",
        );
        for i in 0..16 {
            text.push_str(&format!("S    1.580000000   0.912213374   {}.000000000\n", i));
        }
        text.push_str("End final coordinates\n");
        text
    }

    const RELAX_IN: &str = "&CONTROL\n    calculation = 'relax'\n/\nCELL_PARAMETERS angstrom\n   3.160000  0.000000  0.000000\n  -1.580000  2.736640  0.000000\n   0.000000  0.000000 12.300000\n\nATOMIC_POSITIONS angstrom\n";

    #[test]
    fn test_extract_final_positions() {
        let block =
            extract_final_positions_content(&relax_out(), "relax.out", DEFAULT_POSITION_LINES)
                .unwrap();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("S "));
        assert!(lines[0].contains("0.000000000"));
        assert!(lines[15].contains("15.000000000"));
        // 标题行和结束标记不在块里
        assert!(!block.contains("ATOMIC_POSITIONS"));
        assert!(!block.contains("End final"));
    }

    #[test]
    fn test_extract_cell_parameters() {
        let block = extract_cell_parameters_content(RELAX_IN, "relax.in").unwrap();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("3.160000"));
        assert!(lines[2].contains("12.300000"));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_missing_anchor() {
        let err = extract_final_positions_content("no anchors\n", "x", 16).unwrap_err();
        assert!(matches!(err, QcpostError::AnchorNotFound { .. }));

        let err = extract_cell_parameters_content("no anchors\n", "x").unwrap_err();
        assert!(matches!(err, QcpostError::AnchorNotFound { .. }));
    }

    #[test]
    fn test_truncated_file_is_parse_error() {
        let text = "Begin final coordinates\n\nATOMIC_POSITIONS (angstrom)\nS  0 0 0\n";
        let err = extract_final_positions_content(text, "short", 16).unwrap_err();
        assert!(matches!(err, QcpostError::ParseError { .. }));
    }
}
