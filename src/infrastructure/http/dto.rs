//! Data Transfer Objects
//!
//! 请求体解析与响应体结构

use serde::Serialize;

use crate::application::{ListenerError, Payload};

/// JSON 解析失败时返回给调用方的固定消息
pub const PARSE_ERROR_MESSAGE: &str = "Couldn't parse JSON";

// ============================================================================
// 响应结构
// ============================================================================

/// 错误响应体 `{"error": msg}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 空对象 `{}`
#[derive(Debug, Serialize)]
pub struct Empty {}

// ============================================================================
// 请求体解析
// ============================================================================

/// 解析单个 JSON 对象
pub fn parse_map(body: &[u8]) -> Result<Payload, ListenerError> {
    serde_json::from_slice::<Payload>(body).map_err(|e| parse_failure(body, e))
}

/// 解析 JSON 对象数组，保持原有顺序
pub fn parse_list(body: &[u8]) -> Result<Vec<Payload>, ListenerError> {
    serde_json::from_slice::<Vec<Payload>>(body).map_err(|e| parse_failure(body, e))
}

fn parse_failure(body: &[u8], err: serde_json::Error) -> ListenerError {
    tracing::debug!(error = %err, "JSON parse error");
    tracing::error!(body = %String::from_utf8_lossy(body), "Couldn't parse JSON query");
    ListenerError::processing_with_source(PARSE_ERROR_MESSAGE, err)
}
