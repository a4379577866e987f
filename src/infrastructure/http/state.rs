//! Application State
//!
//! 持有注入的 RestListener，每个请求共享同一个实例

use std::sync::Arc;

use crate::application::RestListener;

/// 应用状态
pub struct AppState {
    pub listener: Arc<dyn RestListener>,
    /// 路由挂载的根路径，由 HttpServer 根据配置写入
    pub base_path: String,
}

impl AppState {
    /// 创建应用状态
    pub fn new(listener: Arc<dyn RestListener>) -> Self {
        Self {
            listener,
            base_path: "/".to_string(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}
