//! # 解析器模块
//!
//! 提供 CRYSTAL / Quantum ESPRESSO 输出日志的解析器和结构文件发射器。
//!
//! 所有日志解析都是同一套线格式文法：定位锚行 → 跳过固定行数的
//! 表头 → 按列位取字段。锚文本和跳过行数在各子模块里以命名常量
//! 给出。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: crystal_out, poscar, pw_in, pw_relax

pub mod crystal_out;
pub mod poscar;
pub mod pw_in;
pub mod pw_relax;

/// 定位锚行：返回第一条包含锚文本的行号
pub(crate) fn find_anchor(lines: &[&str], anchor: &str) -> Option<usize> {
    lines.iter().position(|line| line.contains(anchor))
}
