//! 用户数据存储
//!
//! 所有用户记录持久化为单个 JSON 数组文件。每次操作都读写完整文件，
//! 文件不存在时自动初始化为空数组。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::app::users::model::User;

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("文件读取失败: {0}")]
    FileRead(String),

    #[error("文件写入失败: {0}")]
    FileWrite(String),

    #[error("数据解析失败: {0}")]
    Parse(String),

    #[error("数据序列化失败: {0}")]
    Serialize(String),
}

/// 基于 JSON 文件的用户存储
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 数据文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取完整用户列表
    ///
    /// 文件不存在时先创建空数组文件，再返回空列表。
    pub async fn load(&self) -> Result<Vec<User>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StorageError::Parse(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.save(&[]).await?;
                info!("数据文件不存在，已初始化: {}", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(StorageError::FileRead(e.to_string())),
        }
    }

    /// 将完整用户列表写回文件
    ///
    /// 使用 pretty 格式序列化，便于直接查看数据文件。
    pub async fn save(&self, users: &[User]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(users)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::FileWrite(e.to_string()))?;
            }
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StorageError::FileWrite(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_user(id: i64, email: &str) -> User {
        User {
            id,
            name: format!("用户{}", id),
            email: email.to_string(),
            age: Some(20 + id),
        }
    }

    #[tokio::test]
    async fn test_load_initializes_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("users.json");
        let store = JsonFileStore::new(&path);

        let users = store.load().await.unwrap();
        assert!(users.is_empty());

        // 文件已被创建为空数组
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[]");
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));

        let users = vec![sample_user(1, "a@test.com"), sample_user(2, "b@test.com")];
        store.save(&users).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[0].email, "a@test.com");
        assert_eq!(loaded[1].id, 2);
        assert_eq!(loaded[1].age, Some(22));
    }

    #[tokio::test]
    async fn test_save_pretty_prints() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));

        store.save(&[sample_user(1, "a@test.com")]).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n"));
        assert!(content.contains("  \"id\": 1"));
    }

    #[tokio::test]
    async fn test_load_corrupted_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "这不是 JSON").unwrap();

        let store = JsonFileStore::new(&path);
        let result = store.load().await;
        assert!(matches!(result, Err(StorageError::Parse(_))));
    }
}
