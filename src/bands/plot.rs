//! # 能带图生成
//!
//! 使用 `plotters` 库把能带表画成折线图，每条能带一条曲线。
//! 按输出文件扩展名选择 PNG 或 SVG 后端。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 调用
//! - 使用 `bands/reshape.rs` 的 BandTable 结构
//! - 使用 `plotters` 渲染图表

use crate::bands::BandTable;
use crate::error::{QcpostError, Result};

use plotters::prelude::*;
use std::path::Path;

/// 默认图像尺寸
const PLOT_SIZE: (u32, u32) = (1000, 700);

/// 生成能带图
pub fn generate_band_plot(table: &BandTable, output_path: &Path, title: &str) -> Result<()> {
    if table.num_kpoints() < 2 {
        return Err(QcpostError::Other(
            "at least two k-points are required for a band plot".to_string(),
        ));
    }

    let is_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let root = SVGBackend::new(output_path, PLOT_SIZE).into_drawing_area();
        draw_band_chart(&root, table, title)?;
        root.present()
            .map_err(|e| QcpostError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
        draw_band_chart(&root, table, title)?;
        root.present()
            .map_err(|e| QcpostError::Other(e.to_string()))?;
    }

    Ok(())
}

/// 绘制能带图的核心逻辑
fn draw_band_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &BandTable,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| QcpostError::Other(format!("{:?}", e)))?;

    let x_min = *table.kpoints.first().unwrap();
    let x_max = *table.kpoints.last().unwrap();
    let (e_min, e_max) = table
        .energy_range()
        .ok_or_else(|| QcpostError::Other("no energies to plot".to_string()))?;
    let y_margin = ((e_max - e_min).abs() * 0.05).max(0.1);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, (e_min - y_margin)..(e_max + y_margin))
        .map_err(|e| QcpostError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("k")
        .y_desc("Energy (eV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| QcpostError::Other(format!("{:?}", e)))?;

    for (n, band) in table.bands.iter().enumerate() {
        let color = Palette99::pick(n).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                table.kpoints.iter().zip(band.iter()).map(|(k, e)| (*k, *e)),
                color.stroke_width(2),
            ))
            .map_err(|e| QcpostError::Other(format!("{:?}", e)))?;
    }

    Ok(())
}
