//! 扫描选项与统计信息
use std::path::Path;

use crate::pattern::MatchPattern;

/// 默认源文件扩展名
pub const DEFAULT_EXTENSION: &str = "go";

/// 扫描选项：由调用方构建一次后显式传入扫描器
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 声明匹配模式
    pub pattern: MatchPattern,
    /// 源文件扩展名（不含前导 `.`，大小写不敏感）
    pub extension: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            pattern: MatchPattern::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ScanOptions {
    pub fn with_pattern(mut self, pattern: MatchPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// 设置扩展名；前导 `.` 会被去掉
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// 文件资格判断：仅看最后一个路径段是否以 `.<ext>` 结尾
    pub fn is_eligible_file_name(&self, path: &Path) -> bool {
        is_eligible_file_name(path, &self.extension)
    }
}

/// 文件资格判断（大小写不敏感）
///
/// `Foo.go`、`foo.GO`、`/a/b/Foo.go` 合格；`foo.txt`、`foo` 不合格。
pub fn is_eligible_file_name(path: &Path, extension: &str) -> bool {
    // 按原始字节比较，文件名不必是合法 UTF-8
    let name = match path.file_name() {
        Some(s) => s.as_encoded_bytes(),
        None => return false,
    };
    let suffix = format!(".{extension}");
    let suffix = suffix.as_bytes();
    name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub entries_skipped: usize,
    pub names_found: usize,
}
