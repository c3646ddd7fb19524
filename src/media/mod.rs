//! 文件存储
//!
//! 数据库只保存相对于存储根目录的文件名（如 `data_parsed/xxx.csv`），
//! 读写时由 [`MediaStore`] 拼接出绝对路径。存储根目录显式传入，不读取全局配置。

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::config::MediaConfig;
use crate::errors::{CollectError, Result};

static UNSAFE_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("Invalid file name regex"));

/// 文件类别，决定保存的子目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Original, // 原始上传文件
    Parsed,   // 解析结果文件
}

/// 删除结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Missing,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    original_dir: String,
    parsed_dir: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            original_dir: "data_original".to_string(),
            parsed_dir: "data_parsed".to_string(),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            original_dir: config.original_dir.clone(),
            parsed_dir: config.parsed_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir_for(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Original => &self.original_dir,
            MediaKind::Parsed => &self.parsed_dir,
        }
    }

    /// 创建存储根目录及子目录
    pub async fn prepare(&self) -> Result<()> {
        for kind in [MediaKind::Original, MediaKind::Parsed] {
            let dir = self.root.join(self.dir_for(kind));
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                CollectError::file_operation(format!("创建存储目录 {} 失败: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// 将相对文件名拼接为绝对路径
    pub fn absolute_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// 保存文件内容，返回相对文件名
    ///
    /// 文件名加上时间戳与 UUID 前缀，避免同名上传互相覆盖。
    pub async fn save(&self, kind: MediaKind, file_name: &str, content: &[u8]) -> Result<String> {
        let dir = self.dir_for(kind);
        tokio::fs::create_dir_all(self.root.join(dir))
            .await
            .map_err(|e| CollectError::file_operation(format!("创建存储目录失败: {e}")))?;

        let relative = format!(
            "{dir}/{}-{}-{}",
            chrono::Utc::now().timestamp(),
            Uuid::new_v4().simple(),
            sanitize_file_name(file_name)
        );
        let path = self.absolute_path(&relative);

        tokio::fs::write(&path, content).await.map_err(|e| {
            CollectError::file_operation(format!("写入文件 {} 失败: {e}", path.display()))
        })?;
        debug!("Stored {} bytes at {}", content.len(), relative);

        Ok(relative)
    }

    /// 删除文件；文件已不存在时返回 `Missing` 而不是错误
    pub async fn remove(&self, relative: &str) -> Result<RemoveOutcome> {
        if !is_safe_relative(relative) {
            return Err(CollectError::validation(format!(
                "非法的存储路径: {relative}"
            )));
        }

        let path = self.absolute_path(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(RemoveOutcome::Removed),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(RemoveOutcome::Missing),
            Err(e) => Err(CollectError::file_operation(format!(
                "删除文件 {} 失败: {e}",
                path.display()
            ))),
        }
    }
}

/// 只保留基础文件名中的安全字符
fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let cleaned = UNSAFE_NAME_CHARS.replace_all(base, "_");
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload.bin".to_string()
    } else {
        cleaned.into_owned()
    }
}

/// 相对路径不能是绝对路径，也不能包含 `..`
fn is_safe_relative(relative: &str) -> bool {
    !relative.is_empty()
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_path_joins_root() {
        let store = MediaStore::new("/srv/media");
        assert_eq!(
            store.absolute_path("data_parsed/a.csv"),
            PathBuf::from("/srv/media/data_parsed/a.csv")
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("my data (1).csv"), "my_data__1_.csv");
        assert_eq!(sanitize_file_name(""), "upload.bin");
    }

    #[test]
    fn test_is_safe_relative() {
        assert!(is_safe_relative("data_original/a.csv"));
        assert!(!is_safe_relative("../a.csv"));
        assert!(!is_safe_relative("/etc/passwd"));
        assert!(!is_safe_relative(""));
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path());
        store.prepare().await.unwrap();

        let relative = store
            .save(MediaKind::Original, "raw.csv", b"a,b\n1,2\n")
            .await
            .unwrap();
        assert!(relative.starts_with("data_original/"));
        assert!(relative.ends_with("-raw.csv"));
        assert!(store.absolute_path(&relative).exists());

        assert_eq!(store.remove(&relative).await.unwrap(), RemoveOutcome::Removed);
        assert!(!store.absolute_path(&relative).exists());
        assert_eq!(store.remove(&relative).await.unwrap(), RemoveOutcome::Missing);
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path());
        let err = store.remove("../outside.csv").await.unwrap_err();
        assert!(matches!(err, CollectError::Validation(_)));
    }
}
