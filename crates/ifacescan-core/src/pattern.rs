//! 声明匹配模式（字节级正则）
use regex::bytes::Regex;
use thiserror::Error;

/// 默认模式：`type <Name> interface {`，第 1 个捕获组为声明名
pub const DEFAULT_PATTERN: &str = r"type\s+(\w+)\s+interface\s*\{";

/// 模式构建错误
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern `{pattern}`")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern `{0}` has no capture group; the declaration name is read from group 1")]
    MissingCaptureGroup(String),
}

/// 已编译的匹配模式
///
/// 基于 `regex::bytes`，文件内容无需是合法 UTF-8；捕获到的名字按 lossy 方式解码。
#[derive(Debug, Clone)]
pub struct MatchPattern {
    re: Regex,
}

impl MatchPattern {
    /// 编译自定义模式；至少需要一个捕获组
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let re = Regex::new(pattern).map_err(|source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        })?;
        // captures_len 包含隐式的第 0 组
        if re.captures_len() < 2 {
            return Err(PatternError::MissingCaptureGroup(pattern.to_string()));
        }
        Ok(Self { re })
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }

    /// 按从左到右、互不重叠的顺序提取每个匹配的第 1 组
    pub fn extract(&self, haystack: &[u8]) -> Vec<String> {
        self.re
            .captures_iter(haystack)
            .filter_map(|caps| caps.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .collect()
    }
}

impl Default for MatchPattern {
    fn default() -> Self {
        Self {
            re: Regex::new(DEFAULT_PATTERN).expect("default pattern compiles"),
        }
    }
}
