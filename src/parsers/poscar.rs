//! # VASP POSCAR 格式发射器/解析器
//!
//! 把板层结构序列化成 POSCAR 风格文本，并提供反向解析用于校验。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols
//! n1 n2 ...              # number of atoms per element
//! direct                 # coordinate marker
//! x1 y1 z1 Element1      # atom positions, species label appended
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/slab.rs` 使用
//! - 使用 `models/structure.rs`, `utils/numfmt.rs`

use crate::error::{QcpostError, Result};
use crate::models::SlabStructure;
use crate::utils::numfmt::{format_component, NumberStyle};

/// 把板层结构转换为 POSCAR 格式字符串
///
/// `vacuum_gap` 给定时第三晶格向量的第三分量被改写为
/// 原值 + max(z) + gap。
pub fn to_poscar_string(
    slab: &SlabStructure,
    vacuum_gap: Option<f64>,
    style: NumberStyle,
) -> Result<String> {
    let matrix = slab.lattice_matrix(vacuum_gap)?;

    let mut result = String::new();

    // Line 0: Comment
    result.push_str(&format!("{}\n", slab.name));

    // Line 1: Scale
    result.push_str("1.0\n");

    // Lines 2-4: Lattice
    for row in &matrix {
        result.push_str(&format!(
            "  {}  {}  {}\n",
            format_component(row[0], style),
            format_component(row[1], style),
            format_component(row[2], style)
        ));
    }

    // 元素与计数，按首次出现顺序
    let grouping = slab.species_grouping();
    let symbols: Vec<&str> = grouping.iter().map(|g| g.species.as_str()).collect();
    result.push_str(&format!("   {}\n", symbols.join("   ")));

    let counts: Vec<String> = grouping.iter().map(|g| g.count.to_string()).collect();
    result.push_str(&format!("   {}\n", counts.join("   ")));

    result.push_str("direct\n");

    for atom in &slab.atoms {
        result.push_str(&format!(
            "  {}  {}  {}  {}\n",
            format_component(atom.cart[0], style),
            format_component(atom.cart[1], style),
            format_component(atom.cart[2], style),
            atom.species
        ));
    }

    Ok(result)
}

/// 解析后的 POSCAR 文件内容
#[derive(Debug, Clone)]
pub struct PoscarFile {
    pub name: String,
    pub scale: f64,
    pub lattice: [[f64; 3]; 3],
    pub species: Vec<String>,
    pub counts: Vec<usize>,
    pub coordinate_marker: String,
    pub positions: Vec<[f64; 3]>,
}

/// 从字符串内容解析 POSCAR 格式
pub fn parse_poscar_content(content: &str, default_name: &str) -> Result<PoscarFile> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() < 8 {
        return Err(QcpostError::ParseError {
            format: "poscar".to_string(),
            path: default_name.to_string(),
            reason: "File too short".to_string(),
        });
    }

    let name = lines[0].trim().to_string();
    let name = if name.is_empty() {
        default_name.to_string()
    } else {
        name
    };

    let scale: f64 = lines[1].trim().parse().unwrap_or(1.0);

    let mut lattice = [[0.0; 3]; 3];
    for (i, row) in lattice.iter_mut().enumerate() {
        let parts: Vec<f64> = lines[2 + i]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(QcpostError::ParseError {
                format: "poscar".to_string(),
                path: name.clone(),
                reason: format!("Invalid lattice vector at line {}", 3 + i),
            });
        }
        *row = [parts[0] * scale, parts[1] * scale, parts[2] * scale];
    }

    let species: Vec<String> = lines[5].split_whitespace().map(|s| s.to_string()).collect();
    let counts: Vec<usize> = lines[6]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();

    if species.len() != counts.len() {
        return Err(QcpostError::ParseError {
            format: "poscar".to_string(),
            path: name.clone(),
            reason: format!(
                "{} element symbols but {} counts",
                species.len(),
                counts.len()
            ),
        });
    }

    let coordinate_marker = lines[7].trim().to_string();

    let mut positions = Vec::new();
    for line in lines.iter().skip(8) {
        let parts: Vec<f64> = line
            .split_whitespace()
            .take(3)
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            break;
        }
        positions.push([parts[0], parts[1], parts[2]]);
    }

    Ok(PoscarFile {
        name,
        scale,
        lattice,
        species,
        counts,
        coordinate_marker,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatticeVectors, SlabAtom};

    fn sorted_slab() -> SlabStructure {
        let lattice = LatticeVectors::new([
            ["3.16".to_string(), "0.0".to_string(), "0.0".to_string()],
            ["-1.58".to_string(), "2.73664".to_string(), "0.0".to_string()],
            ["0.0".to_string(), "0.0".to_string(), "12.3".to_string()],
        ]);
        let mut slab = SlabStructure::new(
            "mos2",
            vec![
                SlabAtom::new(16, "S", [1.58, 0.912213, 3.0]),
                SlabAtom::new(42, "MO", [0.0, 1.824427, 4.56]),
                SlabAtom::new(16, "S", [1.58, 0.912213, 6.12]),
            ],
            lattice,
        );
        slab.sort_by_atomic_number_desc();
        slab.shift_z_to_zero();
        slab
    }

    #[test]
    fn test_poscar_layout() {
        let slab = sorted_slab();
        let text = to_poscar_string(&slab, None, NumberStyle::Legacy).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "mos2");
        assert_eq!(lines[1], "1.0");
        assert_eq!(lines[7], "direct");
        // 排序后 MO 在前
        assert!(lines[5].trim().starts_with("MO"));
        assert_eq!(lines[6].trim(), "1   2");
        assert!(lines[8].trim_end().ends_with("MO"));
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_legacy_components_are_15_chars() {
        let slab = sorted_slab();
        let text = to_poscar_string(&slab, None, NumberStyle::Legacy).unwrap();
        let lattice_line = text.lines().nth(2).unwrap();
        for token in lattice_line.split_whitespace() {
            assert_eq!(token.len(), 15);
        }
    }

    #[test]
    fn test_round_trip_species_grouping() {
        let slab = sorted_slab();
        let text = to_poscar_string(&slab, Some(15.0), NumberStyle::Full).unwrap();
        let parsed = parse_poscar_content(&text, "round_trip").unwrap();

        let grouping = slab.species_grouping();
        let species: Vec<&str> = grouping.iter().map(|g| g.species.as_str()).collect();
        let counts: Vec<usize> = grouping.iter().map(|g| g.count).collect();

        assert_eq!(parsed.species, species);
        assert_eq!(parsed.counts, counts);
        assert_eq!(parsed.coordinate_marker, "direct");
        assert_eq!(parsed.positions.len(), slab.atoms.len());
    }

    #[test]
    fn test_vacuum_padding_in_emitted_lattice() {
        let slab = sorted_slab();
        let max_z = slab.max_z().unwrap();
        let text = to_poscar_string(&slab, Some(15.0), NumberStyle::Full).unwrap();
        let parsed = parse_poscar_content(&text, "vacuum").unwrap();

        assert!((parsed.lattice[2][2] - (12.3 + max_z + 15.0)).abs() < 1e-6);
        // 没有真空层时保持原值
        let text = to_poscar_string(&slab, None, NumberStyle::Full).unwrap();
        let parsed = parse_poscar_content(&text, "no_vacuum").unwrap();
        assert!((parsed.lattice[2][2] - 12.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_mismatched_species_counts() {
        let content = "x\n1.0\n1 0 0\n0 1 0\n0 0 1\n  MO  S\n  3\ndirect\n0 0 0\n";
        assert!(parse_poscar_content(content, "bad").is_err());
    }
}
