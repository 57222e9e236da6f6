//! 用户 HTTP 处理器与路由

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::model::{
    CreateUserRequest, UpdateUserRequest, UserListResponse, UserMessageResponse, UserResponse,
};
use super::service::UserService;
use crate::core::error::ApiError;
use crate::core::middleware::request_logging_middleware;

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

/// 构建完整路由，包含 CORS、统一响应头和请求日志中间件
///
/// 任意路径的 OPTIONS 请求都由 CORS 层直接应答 200 空响应体，
/// 不会进入路由。已注册路径上未匹配的方法和未知路径一样返回 404。
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/user",
            get(list_users).post(create_user).fallback(fallback_handler),
        )
        .route(
            "/user/:id",
            get(get_user)
                .patch(update_user)
                .delete(delete_user)
                .fallback(fallback_handler),
        )
        .fallback(fallback_handler)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 获取所有用户
async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.user_service.list().await?;
    Ok(Json(UserListResponse { users }))
}

/// 根据 ID 获取用户
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get(id).await?;
    Ok(Json(UserResponse { user }))
}

/// 创建用户
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserMessageResponse>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;
    let user = state.user_service.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse {
            message: "User added successfully".to_string(),
            user,
        }),
    ))
}

/// 部分更新用户
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserMessageResponse>, ApiError> {
    // 先校验 ID，再解析请求体
    let id = parse_user_id(&id)?;
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;
    let user = state.user_service.update(id, payload).await?;

    Ok(Json(UserMessageResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// 删除用户
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserMessageResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.delete(id).await?;

    Ok(Json(UserMessageResponse {
        message: "User deleted successfully".to_string(),
        user,
    }))
}

/// 未匹配的路由和方法统一返回 404
async fn fallback_handler(method: Method, uri: Uri) -> Response {
    tracing::debug!("未匹配的路由: {} {}", method, uri);
    ApiError::NotFound("Route not found".to_string()).into_response()
}

/// 解析路径中的用户 ID，非整数一律视为无效
fn parse_user_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".to_string()))
}
