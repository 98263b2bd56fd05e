//! 配置文件加载（TOML）
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::options::ScanOptions;
use crate::pattern::{MatchPattern, PatternError};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// 配置文件结构（字段均可省略，缺省时使用内置默认值）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// 兼容两种字段名：pattern 或 regex
    #[serde(default, alias = "regex")]
    pattern: Option<String>,
    #[serde(default)]
    extension: Option<String>,
}

impl ScanOptions {
    /// 从 TOML 文本构建扫描选项
    pub fn from_config_str(txt: &str, origin: &Path) -> Result<Self, ConfigError> {
        let parsed: ConfigFile = toml::from_str(txt).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        let mut opts = ScanOptions::default();
        if let Some(p) = parsed.pattern {
            opts = opts.with_pattern(MatchPattern::new(&p)?);
        }
        if let Some(ext) = parsed.extension {
            opts = opts.with_extension(&ext);
        }
        Ok(opts)
    }

    /// 从 TOML 配置文件构建扫描选项
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        let txt = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_config_str(&txt, path)
    }
}
