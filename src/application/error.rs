//! 应用层错误定义
//!
//! Listener 返回的结果标签：未找到 / 处理失败

use std::error::Error as StdError;

use http::StatusCode;
use thiserror::Error;

/// 错误来源（仅用于诊断日志，不返回给调用方）
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Listener 错误
#[derive(Debug, Error)]
pub enum ListenerError {
    /// 标识符不对应任何已知资源
    #[error("{0}")]
    NotFound(String),

    /// 其他处理失败
    #[error("{message}")]
    Processing {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ListenerError {
    /// 创建 NotFound 错误
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// 创建处理失败错误
    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带原因的处理失败错误
    pub fn processing_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Processing {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 错误标签对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 完整的错误链，供诊断输出
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut current = self.source();
        while let Some(cause) = current {
            out.push_str(": caused by: ");
            out.push_str(&cause.to_string());
            current = cause.source();
        }
        out
    }
}
