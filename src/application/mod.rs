//! 应用层
//!
//! 包含：
//! - ports: 六边形架构端口定义（RestListener）
//! - error: Listener 结果标签（NotFound / Processing）

pub mod error;
pub mod ports;

pub use error::ListenerError;
pub use ports::{Payload, RestListener};
