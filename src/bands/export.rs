//! # 能带表导出
//!
//! 导出重整后的能带表到 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 调用
//! - 使用 `bands/reshape.rs` 的 BandTable 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::bands::BandTable;
use crate::error::{QcpostError, Result};
use std::io::Write;
use std::path::Path;

/// 导出能带表为 CSV 文件：表头 k,e0,e1,...，每个 k 点一行
pub fn to_csv(table: &BandTable, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path).map_err(|e| QcpostError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    write_csv(table, file)
}

/// 写入任意 writer（测试用内存缓冲）
pub fn write_csv<W: Write>(table: &BandTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["k".to_string()];
    for n in 0..table.num_bands() {
        header.push(format!("e{}", n));
    }
    wtr.write_record(&header)?;

    for (i, k) in table.kpoints.iter().enumerate() {
        let mut record = vec![format!("{:.6}", k)];
        for band in &table.bands {
            record.push(format!("{:.6}", band[i]));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()
        .map_err(|e| QcpostError::CsvError(csv::Error::from(e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_layout() {
        let table = BandTable {
            kpoints: vec![0.0, 0.5],
            bands: vec![vec![-1.0, -0.5], vec![2.0, 1.5]],
        };

        let mut buffer = Vec::new();
        write_csv(&table, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "k,e0,e1");
        assert_eq!(lines[1], "0.000000,-1.000000,2.000000");
        assert_eq!(lines[2], "0.500000,-0.500000,1.500000");
        assert_eq!(lines.len(), 3);
    }
}
