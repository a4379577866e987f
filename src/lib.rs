//! correlation-rest - 关联规则 REST 服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 应用层 (application/):
//! - Ports: RestListener 端口定义
//! - Error: ListenerError（NotFound / Processing）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: add / remove / synchronize / list 四个接口
//! - Memory: 内存规则存储（RestListener 参考实现）

pub mod application;
pub mod config;
pub mod infrastructure;

pub use crate::config::{load_config, AppConfig};
