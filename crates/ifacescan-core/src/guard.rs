//! 路径守卫：确定扫描根目录，并校验候选文件不越出根目录
//!
//! 校验基于“清洗后的路径做前缀比较”（纯文本计算，不解析符号链接）。
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// 路径守卫错误
#[derive(Debug, Error)]
pub enum GuardError {
    /// 无法将根目录解析为绝对路径
    #[error("failed to resolve absolute path of {path}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 候选路径清洗后不在根目录之下
    #[error("file path {candidate} (clean path: {clean}) is outside the base directory {root}")]
    OutsideRoot {
        candidate: PathBuf,
        clean: PathBuf,
        root: PathBuf,
    },
}

/// 扫描根目录（绝对、已清洗；单次扫描内不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
    path: PathBuf,
}

impl SearchRoot {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for SearchRoot {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// 将 `root` 解析为绝对路径并清洗，作为本次扫描的信任边界
pub fn establish(root: &Path) -> Result<SearchRoot, GuardError> {
    let abs = std::path::absolute(root).map_err(|source| GuardError::Resolve {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(SearchRoot { path: clean_path(&abs) })
}

/// 清洗 `candidate` 并确认其以 `root` 为前缀；返回清洗后的路径
///
/// 前缀按路径分量比较，`/tmp/foo-bar` 不会被视为位于 `/tmp/foo` 之下。
pub fn validate(candidate: &Path, root: &SearchRoot) -> Result<PathBuf, GuardError> {
    let clean = clean_path(candidate);
    if clean.starts_with(&root.path) {
        Ok(clean)
    } else {
        Err(GuardError::OutsideRoot {
            candidate: candidate.to_path_buf(),
            clean,
            root: root.path.clone(),
        })
    }
}

/// 词法清洗：去掉 `.`，折叠 `..`，统一分隔符
///
/// 绝对路径下根目录之上的 `..` 被丢弃（`/..` 等价于 `/`）；
/// 相对路径开头无法折叠的 `..` 原样保留。
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
