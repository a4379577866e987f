//! Rest Listener Port - 关联规则引擎抽象
//!
//! HTTP 层把 add / remove / synchronize / list 四种操作转发给该端口，
//! 具体实现在 infrastructure 层

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::application::error::ListenerError;

/// 请求载荷：字符串键到任意 JSON 值的映射，不做 schema 校验
pub type Payload = Map<String, Value>;

/// Rest Listener Port
///
/// 实现必须可被多个并发请求安全共享，HTTP 层不做任何加锁或串行化
#[async_trait]
pub trait RestListener: Send + Sync {
    /// 添加一条规则
    async fn add(&self, rule: Payload) -> Result<(), ListenerError>;

    /// 按标识符删除规则
    ///
    /// 标识符不存在时返回 `ListenerError::NotFound`
    async fn remove(&self, id: &str) -> Result<(), ListenerError>;

    /// 用给定序列同步全部规则（整批一次调用）
    async fn synchronize(&self, rules: Vec<Payload>) -> Result<(), ListenerError>;

    /// 列出规则，返回已序列化的 JSON 字符串
    async fn list(&self) -> Result<String, ListenerError>;
}
