//! 扫描主流程：单层遍历 → 资格过滤 → 路径校验 → 读取 → 匹配
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::guard::{self, GuardError, SearchRoot};
use crate::options::{ScanOptions, ScanStats};

/// 扫描错误；任何一种都会中止整次扫描，不返回部分结果
#[derive(Debug, Error)]
pub enum ScanError {
    /// 根目录无法解析或列出（不存在、无权限、不是目录、遍历中途被删除）
    #[error("failed to walk directory {path}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 候选文件清洗后越出根目录
    #[error(transparent)]
    PathOutsideRoot(GuardError),

    /// 已列出的文件读取失败
    #[error("failed to read file {path}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 扫描 `root` 的直接子项，按目录枚举顺序返回所有声明名
///
/// 子目录不会被进入；同名声明原样保留。
pub fn scan(root: &Path, opts: &ScanOptions) -> Result<Vec<String>, ScanError> {
    scan_with_stats(root, opts).map(|(names, _)| names)
}

/// 同 [`scan`]，并附带统计信息
pub fn scan_with_stats(root: &Path, opts: &ScanOptions) -> Result<(Vec<String>, ScanStats), ScanError> {
    let search_root = guard::establish(root).map_err(|e| ScanError::DirectoryUnreadable {
        path: root.to_path_buf(),
        source: Box::new(e),
    })?;

    let mut stats = ScanStats::default();
    let mut names: Vec<String> = Vec::new();

    // 遍历绝对根目录本身（depth 0）及其直接子项（depth 1）；不排序，保留文件系统枚举顺序
    for entry in WalkDir::new(search_root.path()).max_depth(1) {
        let entry = entry.map_err(|e| ScanError::DirectoryUnreadable {
            path: search_root.path().to_path_buf(),
            source: Box::new(e),
        })?;

        let file_type = entry.file_type();
        if entry.depth() == 0 && !file_type.is_dir() {
            return Err(ScanError::DirectoryUnreadable {
                path: search_root.path().to_path_buf(),
                source: Box::new(std::io::Error::other("not a directory")),
            });
        }
        if file_type.is_dir() {
            if entry.depth() > 0 {
                debug!(path = ?entry.path(), "skipping subdirectory");
                stats.entries_skipped += 1;
            }
            continue;
        }
        // 符号链接仅在指向普通文件时参与扫描
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file || !opts.is_eligible_file_name(entry.path()) {
            debug!(path = ?entry.path(), "skipping ineligible entry");
            stats.entries_skipped += 1;
            continue;
        }

        let found = scan_file(entry.path(), &search_root, opts)?;
        debug!(path = ?entry.path(), matches = found.len(), "file scanned");
        stats.files_scanned += 1;
        stats.names_found += found.len();
        names.extend(found);
    }

    Ok((names, stats))
}

/// 校验并读取单个文件，返回其中的声明名（按出现顺序）
pub(crate) fn scan_file(path: &Path, root: &SearchRoot, opts: &ScanOptions) -> Result<Vec<String>, ScanError> {
    let clean = guard::validate(path, root).map_err(ScanError::PathOutsideRoot)?;
    let data = std::fs::read(&clean).map_err(|source| ScanError::FileUnreadable {
        path: clean.clone(),
        source,
    })?;
    Ok(opts.pattern.extract(&data))
}
