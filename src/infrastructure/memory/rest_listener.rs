//! In-Memory Rest Listener Implementation
//!
//! 以规则的 `id` 字段为键，将规则保存在内存中

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::{Payload, RestListener};
use crate::application::ListenerError;

/// 规则标识字段
const ID_FIELD: &str = "id";

/// 内存规则存储
///
/// 所有读写都经过同一把锁，synchronize 在锁内整体替换规则集
pub struct InMemoryRestListener {
    rules: RwLock<BTreeMap<String, Payload>>,
}

impl InMemoryRestListener {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前规则数量
    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }

    fn rule_id(rule: &Payload) -> Result<String, ListenerError> {
        match rule.get(ID_FIELD) {
            Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
            _ => Err(ListenerError::processing(
                "Rule must contain a string \"id\" field",
            )),
        }
    }
}

impl Default for InMemoryRestListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RestListener for InMemoryRestListener {
    async fn add(&self, rule: Payload) -> Result<(), ListenerError> {
        let id = Self::rule_id(&rule)?;
        let replaced = self.rules.write().await.insert(id.clone(), rule).is_some();
        tracing::info!(rule_id = %id, replaced, "Rule added");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), ListenerError> {
        self.rules
            .write()
            .await
            .remove(id)
            .map(|_| {
                tracing::info!(rule_id = %id, "Rule removed");
            })
            .ok_or_else(|| ListenerError::not_found(format!("Rule not found: {}", id)))
    }

    async fn synchronize(&self, rules: Vec<Payload>) -> Result<(), ListenerError> {
        // 先在锁外构建完整的新规则集，任何一条无效则不做修改
        let replacement = rules
            .into_iter()
            .map(|rule| Self::rule_id(&rule).map(|id| (id, rule)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let count = replacement.len();

        *self.rules.write().await = replacement;

        tracing::info!(count, "Rules synchronized");
        Ok(())
    }

    async fn list(&self) -> Result<String, ListenerError> {
        // BTreeMap 按 id 有序
        let rules: Vec<Value> = self
            .rules
            .read()
            .await
            .values()
            .cloned()
            .map(Value::Object)
            .collect();

        serde_json::to_string(&rules)
            .map_err(|e| ListenerError::processing_with_source("Couldn't serialize rules", e))
    }
}
