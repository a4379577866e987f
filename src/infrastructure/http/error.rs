//! HTTP Error Handling
//!
//! 将 ListenerError 转换为 HTTP 响应

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorBody;
use crate::application::ListenerError;

/// 错误响应体格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    /// `{"error": msg}`
    Json,
    /// 纯文本消息
    PlainText,
}

/// API 错误
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// 返回给调用方的顶层消息
    pub message: String,
    /// 完整错误链，只写入日志
    pub detail: String,
    pub format: ErrorFormat,
}

impl ApiError {
    /// JSON 格式的错误响应
    pub fn json(err: ListenerError) -> Self {
        Self::from_listener(err, ErrorFormat::Json)
    }

    /// 纯文本格式的错误响应
    pub fn plain_text(err: ListenerError) -> Self {
        Self::from_listener(err, ErrorFormat::PlainText)
    }

    /// 状态码仅由错误标签决定，消息只取顶层文本
    pub fn from_listener(err: ListenerError, format: ErrorFormat) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
            detail: err.chain(),
            format,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %self.detail, "Request failed");
        } else {
            tracing::warn!(status = %self.status.as_u16(), error = %self.detail, "Request rejected");
        }

        match self.format {
            ErrorFormat::Json => (self.status, Json(ErrorBody::new(self.message))).into_response(),
            ErrorFormat::PlainText => (self.status, self.message).into_response(),
        }
    }
}
