//! # 表面板层结构数据模型
//!
//! 定义从 CRYSTAL 输出日志提取出来的板层结构表示，以及发射前的
//! 原位变换（排序、z 归零、真空层推导）。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 使用 `error.rs`

use crate::error::{QcpostError, Result};
use serde::{Deserialize, Serialize};

/// 单个原子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabAtom {
    /// 原子序数
    pub atomic_number: u32,

    /// 元素符号，保留日志里的原始文本
    pub species: String,

    /// 笛卡尔坐标 [x, y, z]，单位与来源日志一致
    pub cart: [f64; 3],
}

impl SlabAtom {
    pub fn new(atomic_number: u32, species: impl Into<String>, cart: [f64; 3]) -> Self {
        SlabAtom {
            atomic_number,
            species: species.into(),
            cart,
        }
    }
}

/// 晶格向量：三行，每行三个数值文本 token。
///
/// 分量保持日志里的原始字符串，直到发射时才转成浮点数，
/// 真空层修正量也是发射时才加上的派生值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatticeVectors {
    pub rows: [[String; 3]; 3],
}

impl LatticeVectors {
    pub fn new(rows: [[String; 3]; 3]) -> Self {
        LatticeVectors { rows }
    }

    /// 把文本分量转成 3x3 浮点矩阵
    pub fn to_matrix(&self, label: &str) -> Result<[[f64; 3]; 3]> {
        let mut matrix = [[0.0; 3]; 3];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, token) in row.iter().enumerate() {
                matrix[i][j] = token.parse().map_err(|_| QcpostError::ParseError {
                    format: "lattice vectors".to_string(),
                    path: label.to_string(),
                    reason: format!("token '{}' in vector B{} is not numeric", token, i + 1),
                })?;
            }
        }
        Ok(matrix)
    }
}

/// 每个元素的原子数（首次出现顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub species: String,
    pub count: usize,
}

/// 板层结构：原子表 + 晶格向量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabStructure {
    /// 结构名称（来源文件主干名）
    pub name: String,

    /// 原子列表，顺序即解析顺序
    pub atoms: Vec<SlabAtom>,

    /// 晶格向量
    pub lattice: LatticeVectors,
}

impl SlabStructure {
    pub fn new(name: impl Into<String>, atoms: Vec<SlabAtom>, lattice: LatticeVectors) -> Self {
        SlabStructure {
            name: name.into(),
            atoms,
            lattice,
        }
    }

    /// 按原子序数降序稳定排序；同序数原子保持输入顺序
    pub fn sort_by_atomic_number_desc(&mut self) {
        self.atoms
            .sort_by(|a, b| b.atomic_number.cmp(&a.atomic_number));
    }

    /// 把所有 z 坐标平移到 min(z) = 0。第一次应用后即幂等。
    pub fn shift_z_to_zero(&mut self) {
        let min_z = match self.min_z() {
            Some(z) => z,
            None => return,
        };
        for atom in &mut self.atoms {
            atom.cart[2] -= min_z;
        }
    }

    pub fn min_z(&self) -> Option<f64> {
        self.atoms
            .iter()
            .map(|a| a.cart[2])
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn max_z(&self) -> Option<f64> {
        self.atoms
            .iter()
            .map(|a| a.cart[2])
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// 发射用晶格矩阵。`vacuum_gap` 给定时在第三向量的第三分量上
    /// 加 max(z) + gap，保证平移后的板层上方留出真空层。
    pub fn lattice_matrix(&self, vacuum_gap: Option<f64>) -> Result<[[f64; 3]; 3]> {
        let mut matrix = self.lattice.to_matrix(&self.name)?;
        if let Some(gap) = vacuum_gap {
            matrix[2][2] += self.max_z().unwrap_or(0.0) + gap;
        }
        Ok(matrix)
    }

    /// 按首次出现顺序统计各元素的原子数
    pub fn species_grouping(&self) -> Vec<SpeciesCount> {
        let mut grouping: Vec<SpeciesCount> = Vec::new();
        for atom in &self.atoms {
            match grouping.iter_mut().find(|g| g.species == atom.species) {
                Some(group) => group.count += 1,
                None => grouping.push(SpeciesCount {
                    species: atom.species.clone(),
                    count: 1,
                }),
            }
        }
        grouping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_lattice() -> LatticeVectors {
        LatticeVectors::new([
            [
                "3.160000".to_string(),
                "0.000000".to_string(),
                "0.000000".to_string(),
            ],
            [
                "-1.580000".to_string(),
                "2.736640".to_string(),
                "0.000000".to_string(),
            ],
            [
                "0.000000".to_string(),
                "0.000000".to_string(),
                "12.300000".to_string(),
            ],
        ])
    }

    fn mos2_fragment() -> SlabStructure {
        SlabStructure::new(
            "mos2",
            vec![
                SlabAtom::new(16, "S", [0.0, 1.82, 3.0]),
                SlabAtom::new(42, "MO", [1.58, 0.91, 4.56]),
                SlabAtom::new(16, "S", [0.0, 1.82, 6.12]),
                SlabAtom::new(42, "MO", [0.0, 0.0, 5.0]),
            ],
            simple_lattice(),
        )
    }

    #[test]
    fn test_sort_descending_atomic_number() {
        let mut slab = mos2_fragment();
        slab.sort_by_atomic_number_desc();
        let numbers: Vec<u32> = slab.atoms.iter().map(|a| a.atomic_number).collect();
        assert_eq!(numbers, vec![42, 42, 16, 16]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut slab = mos2_fragment();
        slab.sort_by_atomic_number_desc();
        // 同序数原子保持输入顺序
        assert!((slab.atoms[0].cart[2] - 4.56).abs() < 1e-12);
        assert!((slab.atoms[1].cart[2] - 5.0).abs() < 1e-12);

        let once: Vec<[f64; 3]> = slab.atoms.iter().map(|a| a.cart).collect();
        slab.sort_by_atomic_number_desc();
        let twice: Vec<[f64; 3]> = slab.atoms.iter().map(|a| a.cart).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_shift_z_to_zero() {
        let mut slab = SlabStructure::new(
            "two_atoms",
            vec![
                SlabAtom::new(42, "MO", [0.0, 0.0, 3.0]),
                SlabAtom::new(16, "S", [0.0, 0.0, 5.0]),
            ],
            simple_lattice(),
        );
        slab.shift_z_to_zero();
        assert_eq!(slab.atoms[0].cart[2], 0.0);
        assert_eq!(slab.atoms[1].cart[2], 2.0);
        assert_eq!(slab.min_z(), Some(0.0));
    }

    #[test]
    fn test_shift_is_idempotent() {
        let mut slab = mos2_fragment();
        slab.shift_z_to_zero();
        let once: Vec<f64> = slab.atoms.iter().map(|a| a.cart[2]).collect();
        slab.shift_z_to_zero();
        let twice: Vec<f64> = slab.atoms.iter().map(|a| a.cart[2]).collect();
        assert_eq!(once, twice);
        assert_eq!(slab.min_z(), Some(0.0));
    }

    #[test]
    fn test_species_grouping_first_occurrence_order() {
        let slab = mos2_fragment();
        let grouping = slab.species_grouping();
        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping[0].species, "S");
        assert_eq!(grouping[0].count, 2);
        assert_eq!(grouping[1].species, "MO");
        assert_eq!(grouping[1].count, 2);
    }

    #[test]
    fn test_vacuum_padding_added_to_out_of_plane_component() {
        let mut slab = mos2_fragment();
        slab.shift_z_to_zero();
        let max_z = slab.max_z().unwrap();
        let matrix = slab.lattice_matrix(Some(15.0)).unwrap();
        assert!((matrix[2][2] - (12.3 + max_z + 15.0)).abs() < 1e-9);
        // 其余分量不受影响
        assert!((matrix[0][0] - 3.16).abs() < 1e-12);
        assert!((matrix[2][0]).abs() < 1e-12);
    }

    #[test]
    fn test_lattice_matrix_rejects_non_numeric_token() {
        let lattice = LatticeVectors::new([
            [
                "3.16".to_string(),
                "0.0".to_string(),
                "0.0".to_string(),
            ],
            [
                "0.0".to_string(),
                "abc".to_string(),
                "0.0".to_string(),
            ],
            [
                "0.0".to_string(),
                "0.0".to_string(),
                "12.3".to_string(),
            ],
        ]);
        assert!(lattice.to_matrix("bad").is_err());
    }
}
