//! # 能带处理模块
//!
//! 两列 (k, E) 采样流的重整、CSV 导出与作图。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 使用
//! - 子模块: reshape, export, plot

pub mod export;
pub mod plot;
pub mod reshape;

pub use reshape::{BandTable, ReshapeMode};
