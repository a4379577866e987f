//! HTTP Routes
//!
//! API Endpoints（均位于可配置的根路径下）:
//! - /add           POST    添加规则
//! - /remove/{id}   DELETE  删除规则
//! - /synchronize   POST    同步全部规则
//! - /list          GET     列出规则
//! - /ping          GET     健康检查

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由，挂载到 `base_path` 之下
pub fn create_routes(base_path: &str) -> Router<Arc<AppState>> {
    let trimmed = base_path.trim_end_matches('/');
    if trimmed.is_empty() {
        rule_routes()
    } else {
        Router::new().nest(trimmed, rule_routes())
    }
}

/// 规则路由
fn rule_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/add", post(handlers::add))
        .route("/remove/:id", delete(handlers::remove))
        .route("/synchronize", post(handlers::synchronize))
        .route("/list", get(handlers::list))
}
