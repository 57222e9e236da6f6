//! 用户数据模型

use serde::{Deserialize, Deserializer, Serialize};

/// 用户记录
///
/// `age` 可选，缺省时序列化为 `null`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
}

/// 创建用户请求体
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

/// 部分更新用户请求体
///
/// `age` 用双层 Option 区分「字段缺失」和「显式 null」：
/// - 缺失 -> `None`，保持原值
/// - `"age": null` -> `Some(None)`，清空年龄
/// - `"age": 36` -> `Some(Some(36))`，更新年龄
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub age: Option<Option<i64>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// 单个用户响应
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// 带确认消息的用户响应（创建 / 更新 / 删除）
#[derive(Debug, Serialize)]
pub struct UserMessageResponse {
    pub message: String,
    pub user: User,
}
