//! 用户业务服务

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::model::{CreateUserRequest, UpdateUserRequest, User};
use crate::core::error::ApiError;
use crate::infrastructure::storage::JsonFileStore;

/// 用户管理服务
///
/// 每个操作在同一把锁内完成完整的 读取-修改-写回 周期，
/// 并发请求之间不会互相覆盖写入结果。
#[derive(Clone)]
pub struct UserService {
    store: Arc<Mutex<JsonFileStore>>,
}

impl UserService {
    pub fn new(store: JsonFileStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// 获取所有用户
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let store = self.store.lock().await;
        Ok(store.load().await?)
    }

    /// 根据 ID 获取用户
    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        let store = self.store.lock().await;
        let users = store.load().await?;

        users
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// 创建用户
    pub async fn create(&self, payload: CreateUserRequest) -> Result<User, ApiError> {
        // 校验必填字段，空字符串视为未提供
        let name = match payload.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(ApiError::BadRequest(
                    "Name and email are required".to_string(),
                ))
            }
        };
        let email = match payload.email {
            Some(email) if !email.is_empty() => email,
            _ => {
                return Err(ApiError::BadRequest(
                    "Name and email are required".to_string(),
                ))
            }
        };

        let store = self.store.lock().await;
        let mut users = store.load().await?;

        // 邮箱唯一性检查（区分大小写的精确匹配）
        if users.iter().any(|user| user.email == email) {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }

        // 分配 ID：取当前最大 ID + 1，空列表从 1 开始
        let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;

        let user = User {
            id,
            name,
            email,
            age: payload.age,
        };

        users.push(user.clone());
        store.save(&users).await?;

        info!("创建用户: {} (id={})", user.name, user.id);

        Ok(user)
    }

    /// 部分更新用户
    pub async fn update(&self, id: i64, payload: UpdateUserRequest) -> Result<User, ApiError> {
        let store = self.store.lock().await;
        let mut users = store.load().await?;

        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        // name / email 只在提供了非空值时更新，空字符串保持原值
        if let Some(name) = payload.name.filter(|name| !name.is_empty()) {
            user.name = name;
        }
        if let Some(email) = payload.email.filter(|email| !email.is_empty()) {
            user.email = email;
        }
        // age 只要出现在请求体中就生效，包括显式 null（清空年龄）
        if let Some(age) = payload.age {
            user.age = age;
        }

        let updated = user.clone();
        store.save(&users).await?;

        info!("更新用户: {} (id={})", updated.name, updated.id);

        Ok(updated)
    }

    /// 删除用户，返回被删除的记录
    pub async fn delete(&self, id: i64) -> Result<User, ApiError> {
        let store = self.store.lock().await;
        let mut users = store.load().await?;

        let index = users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let removed = users.remove(index);
        store.save(&users).await?;

        info!("删除用户: {} (id={})", removed.name, removed.id);

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn test_service(dir: &TempDir) -> UserService {
        UserService::new(JsonFileStore::new(dir.path().join("users.json")))
    }

    fn create_request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            age: None,
        }
    }

    #[tokio::test]
    async fn test_id_assignment_starts_at_one() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        let first = service
            .create(create_request("张三", "zhangsan@example.com"))
            .await
            .unwrap();
        let second = service
            .create(create_request("李四", "lisi@example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_id_reused_after_deleting_max() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        service
            .create(create_request("张三", "zhangsan@example.com"))
            .await
            .unwrap();
        service
            .create(create_request("李四", "lisi@example.com"))
            .await
            .unwrap();

        // 删除最大 ID 后，下一个 ID 回到 max + 1
        service.delete(2).await.unwrap();
        let third = service
            .create(create_request("王五", "wangwu@example.com"))
            .await
            .unwrap();
        assert_eq!(third.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        service
            .create(create_request("张三", "zhangsan@example.com"))
            .await
            .unwrap();
        let result = service
            .create(create_request("李四", "zhangsan@example.com"))
            .await;

        assert!(matches!(result, Err(ApiError::Conflict(_))));

        // 冲突的创建不会留下任何数据
        let users = service.list().await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        let missing_email = CreateUserRequest {
            name: Some("张三".to_string()),
            email: None,
            age: None,
        };
        assert!(matches!(
            service.create(missing_email).await,
            Err(ApiError::BadRequest(_))
        ));

        let empty_name = CreateUserRequest {
            name: Some("".to_string()),
            email: Some("zhangsan@example.com".to_string()),
            age: None,
        };
        assert!(matches!(
            service.create(empty_name).await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_age_tristate() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        service
            .create(CreateUserRequest {
                name: Some("张三".to_string()),
                email: Some("zhangsan@example.com".to_string()),
                age: Some(25),
            })
            .await
            .unwrap();

        // 缺失 age 字段，原值保持不变
        let no_age = UpdateUserRequest {
            name: Some("张三丰".to_string()),
            email: None,
            age: None,
        };
        let updated = service.update(1, no_age).await.unwrap();
        assert_eq!(updated.name, "张三丰");
        assert_eq!(updated.age, Some(25));

        // 显式 null 清空年龄
        let null_age = UpdateUserRequest {
            name: None,
            email: None,
            age: Some(None),
        };
        let updated = service.update(1, null_age).await.unwrap();
        assert_eq!(updated.age, None);
    }

    #[tokio::test]
    async fn test_update_ignores_empty_strings() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        service
            .create(create_request("张三", "zhangsan@example.com"))
            .await
            .unwrap();

        let empty_fields = UpdateUserRequest {
            name: Some("".to_string()),
            email: Some("".to_string()),
            age: None,
        };
        let updated = service.update(1, empty_fields).await.unwrap();
        assert_eq!(updated.name, "张三");
        assert_eq!(updated.email, "zhangsan@example.com");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_user() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        service
            .create(create_request("张三", "zhangsan@example.com"))
            .await
            .unwrap();

        let removed = service.delete(1).await.unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(removed.email, "zhangsan@example.com");

        assert!(matches!(
            service.get(1).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_id_not_found() {
        let dir = tempdir().unwrap();
        let service = test_service(&dir);

        assert!(matches!(
            service.get(99).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(99).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
