//! # 用户记录服务
//!
//! 学习用的 Rust Web 项目，包括：
//! - 基于 axum 的用户 CRUD API，数据持久化为单个 JSON 文件
//! - 统一的错误响应、CORS 和请求日志
//! - 独立的文件流式读取 / 拷贝 / gzip 压缩演示（见 src/bin/）

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::users::handler::{create_router, AppState};
pub use app::users::service::UserService;
pub use config::Config;
pub use infrastructure::storage::JsonFileStore;
