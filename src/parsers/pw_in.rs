//! # pw.x 结构片段发射器
//!
//! 把板层结构序列化成 Quantum ESPRESSO pw.x 输入里的
//! CELL_PARAMETERS / ATOMIC_POSITIONS 两个卡片。
//!
//! ## 依赖关系
//! - 被 `commands/slab.rs` 使用
//! - 使用 `models/structure.rs`, `utils/numfmt.rs`

use crate::error::Result;
use crate::models::SlabStructure;
use crate::utils::numfmt::{format_component, NumberStyle};

/// CELL_PARAMETERS 卡片标题
pub const CELL_CARD_HEADER: &str = "CELL_PARAMETERS angstrom";

/// ATOMIC_POSITIONS 卡片标题
pub const POSITIONS_CARD_HEADER: &str = "ATOMIC_POSITIONS angstrom";

/// 把板层结构转换为 pw.x 结构片段
///
/// 真空层处理与 POSCAR 发射器一致；原子行是 `元素 x y z` 列序。
pub fn to_pw_input_string(
    slab: &SlabStructure,
    vacuum_gap: Option<f64>,
    style: NumberStyle,
) -> Result<String> {
    let matrix = slab.lattice_matrix(vacuum_gap)?;

    let mut result = String::new();

    result.push_str(CELL_CARD_HEADER);
    result.push('\n');
    for row in &matrix {
        result.push_str(&format!(
            "  {}  {}  {}\n",
            format_component(row[0], style),
            format_component(row[1], style),
            format_component(row[2], style)
        ));
    }

    result.push('\n');
    result.push_str(POSITIONS_CARD_HEADER);
    result.push('\n');
    for atom in &slab.atoms {
        result.push_str(&format!(
            "{:<2}  {}  {}  {}\n",
            atom.species,
            format_component(atom.cart[0], style),
            format_component(atom.cart[1], style),
            format_component(atom.cart[2], style)
        ));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatticeVectors, SlabAtom};

    fn slab() -> SlabStructure {
        let lattice = LatticeVectors::new([
            ["3.16".to_string(), "0.0".to_string(), "0.0".to_string()],
            ["-1.58".to_string(), "2.73664".to_string(), "0.0".to_string()],
            ["0.0".to_string(), "0.0".to_string(), "12.3".to_string()],
        ]);
        SlabStructure::new(
            "mos2",
            vec![
                SlabAtom::new(42, "MO", [0.0, 1.824427, 1.56]),
                SlabAtom::new(16, "S", [1.58, 0.912213, 0.0]),
                SlabAtom::new(16, "S", [1.58, 0.912213, 3.12]),
            ],
            lattice,
        )
    }

    #[test]
    fn test_card_layout() {
        let text = to_pw_input_string(&slab(), None, NumberStyle::Full).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CELL_CARD_HEADER);
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], POSITIONS_CARD_HEADER);
        assert_eq!(lines.len(), 9);
        // 元素符号在行首
        assert!(lines[6].starts_with("MO"));
        assert!(lines[7].starts_with("S "));
    }

    #[test]
    fn test_vacuum_padding_matches_poscar_emitter() {
        let slab = slab();
        let text = to_pw_input_string(&slab, Some(15.0), NumberStyle::Full).unwrap();
        let third_row = text.lines().nth(3).unwrap();
        let c3: f64 = third_row.split_whitespace().nth(2).unwrap().parse().unwrap();
        assert!((c3 - (12.3 + 3.12 + 15.0)).abs() < 1e-6);
    }

    #[test]
    fn test_legacy_style_components() {
        let text = to_pw_input_string(&slab(), None, NumberStyle::Legacy).unwrap();
        let row = text.lines().nth(1).unwrap();
        for token in row.split_whitespace() {
            assert_eq!(token.len(), 15);
        }
    }
}
