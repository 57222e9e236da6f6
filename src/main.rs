//! 用户记录服务入口
//!
//! 端口可被第一个命令行参数覆盖，例如：
//! `cargo run --bin user_api 3001`

use std::env;

use tokio::net::TcpListener;
use tracing::info;

use user_api_learning::app::users::handler::{create_router, AppState};
use user_api_learning::app::users::service::UserService;
use user_api_learning::config;
use user_api_learning::infrastructure::logger::Logger;
use user_api_learning::infrastructure::storage::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载并校验配置
    let config = config::load_config()?;
    config.validate()?;

    // 初始化日志
    Logger::init(&config.logging)?;

    // 命令行参数优先于配置文件中的端口
    let args: Vec<String> = env::args().collect();
    let port = args
        .get(1)
        .and_then(|arg| arg.parse::<u16>().ok())
        .unwrap_or(config.http.port);

    // 组装存储、服务和路由
    let store = JsonFileStore::new(&config.storage.data_file);
    let state = AppState {
        user_service: UserService::new(store),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(format!("{}:{}", config.http.bind_address, port)).await?;
    let addr = listener.local_addr()?;

    info!("🚀 用户记录服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /user      - 获取所有用户");
    info!("   POST   /user      - 创建新用户");
    info!("   GET    /user/:id  - 获取特定用户");
    info!("   PATCH  /user/:id  - 部分更新用户");
    info!("   DELETE /user/:id  - 删除用户");
    info!("💾 数据文件: {}", config.storage.data_file.display());

    axum::serve(listener, app).await?;

    Ok(())
}
