//! # 数值格式化工具
//!
//! 结构文件发射器共用的坐标/晶格分量格式化。
//!
//! 历史脚本把每个分量先按 15 位小数定点格式化，再把字符串截断到前
//! 15 个字符。对大数量级的值会丢失小数点甚至符号位，但旧的工作流
//! 对这种输出逐字节比对，所以作为 `Legacy` 模式保留，`Full` 模式
//! 输出完整精度。
//!
//! ## 依赖关系
//! - 被 `parsers/poscar.rs`, `parsers/pw_in.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 数值输出风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberStyle {
    /// 15 位小数定点，截断到前 15 个字符（与历史脚本逐字节兼容）
    Legacy,
    /// 16 宽、10 位小数定点，不截断
    Full,
}

/// 格式化单个坐标/晶格分量
pub fn format_component(value: f64, style: NumberStyle) -> String {
    match style {
        NumberStyle::Legacy => {
            let mut s = format!("{:.15}", value);
            s.truncate(15);
            s
        }
        NumberStyle::Full => format!("{:16.10}", value),
    }
}
