//! 核心扫描库：在单层目录中按文本模式提取接口声明名
//!
//! 设计要点：
//! - 只遍历根目录的直接子项，子目录一律跳过，不下钻。
//! - 读取前由路径守卫确认文件位于根目录之内，越界即中止扫描。
//! - 字节级匹配（`regex::bytes`），非法 UTF-8 不会导致错误。
//! - 结果顺序 = 目录枚举顺序 + 文件内匹配顺序；不排序、不去重。

mod config;
mod options;
mod pattern;
mod scan;

pub mod guard;

pub use config::ConfigError;
pub use guard::{GuardError, SearchRoot};
pub use options::{is_eligible_file_name, ScanOptions, ScanStats, DEFAULT_EXTENSION};
pub use pattern::{MatchPattern, PatternError, DEFAULT_PATTERN};
pub use scan::{scan, scan_with_stats, ScanError};
