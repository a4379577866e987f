//! Rule HTTP Handlers
//!
//! add / remove / synchronize / list 四个操作，全部转发给 listener

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{parse_list, parse_map, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 添加规则
///
/// 成功返回 201 与 `{}`，失败返回 500 与 `{"error": msg}`
pub async fn add(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Empty>), ApiError> {
    tracing::info!("Add request with json: {}", String::from_utf8_lossy(&body));

    let rule = parse_map(&body).map_err(ApiError::json)?;
    state.listener.add(rule).await.map_err(ApiError::json)?;

    Ok((StatusCode::CREATED, Json(Empty {})))
}

/// 删除规则
///
/// 失败时响应体为纯文本消息：未找到返回 404，其他返回 500
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(id = %id, "Remove request");

    state
        .listener
        .remove(&id)
        .await
        .map_err(ApiError::plain_text)?;

    Ok(StatusCode::OK)
}

/// 同步规则
///
/// 整个序列一次性交给 listener
pub async fn synchronize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    tracing::info!(
        "Synchronize request with json: {}",
        String::from_utf8_lossy(&body)
    );

    let rules = parse_list(&body).map_err(ApiError::json)?;
    state
        .listener
        .synchronize(rules)
        .await
        .map_err(ApiError::json)?;

    Ok(StatusCode::OK)
}

/// 列出规则
///
/// listener 返回的字符串原样作为响应体，不再重新编码
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("List request");

    let body = state.listener.list().await.map_err(ApiError::json)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tower::util::ServiceExt;

    use crate::application::{ListenerError, Payload, RestListener};
    use crate::infrastructure::http::routes::create_routes;
    use crate::infrastructure::http::state::AppState;

    /// 记录收到的调用
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Add(Payload),
        Remove(String),
        Synchronize(Vec<Payload>),
        List,
    }

    /// 预设的 listener 结果
    #[derive(Clone, Copy)]
    enum Outcome {
        Ok,
        NotFound,
        Failure,
    }

    struct RecordingListener {
        calls: Mutex<Vec<Call>>,
        outcome: Outcome,
        list_body: String,
    }

    impl RecordingListener {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcome,
                list_body: String::new(),
            })
        }

        fn with_list_body(body: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcome: Outcome::Ok,
                list_body: body.to_string(),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<(), ListenerError> {
            self.calls.lock().unwrap().push(call);
            match self.outcome {
                Outcome::Ok => Ok(()),
                Outcome::NotFound => Err(ListenerError::not_found("Rule not found: abc123")),
                Outcome::Failure => Err(ListenerError::processing("listener exploded")),
            }
        }
    }

    #[async_trait]
    impl RestListener for RecordingListener {
        async fn add(&self, rule: Payload) -> Result<(), ListenerError> {
            self.record(Call::Add(rule))
        }

        async fn remove(&self, id: &str) -> Result<(), ListenerError> {
            self.record(Call::Remove(id.to_string()))
        }

        async fn synchronize(&self, rules: Vec<Payload>) -> Result<(), ListenerError> {
            self.record(Call::Synchronize(rules))
        }

        async fn list(&self) -> Result<String, ListenerError> {
            self.record(Call::List)?;
            Ok(self.list_body.clone())
        }
    }

    fn app(listener: Arc<RecordingListener>) -> Router {
        create_routes("/").with_state(Arc::new(AppState::new(listener)))
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn object(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_add_forwards_payload() {
        let listener = RecordingListener::new(Outcome::Ok);
        let (status, body) = send(
            app(listener.clone()),
            request("POST", "/add", r#"{"id":"r1","n":2,"nested":{"on":true},"tags":["a"]}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "{}");
        assert_eq!(
            listener.calls(),
            vec![Call::Add(object(
                json!({"id": "r1", "n": 2, "nested": {"on": true}, "tags": ["a"]})
            ))]
        );
    }

    #[tokio::test]
    async fn test_add_malformed_json_skips_listener() {
        let listener = RecordingListener::new(Outcome::Ok);
        let (status, body) = send(app(listener.clone()), request("POST", "/add", "{not json")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Couldn't parse JSON"}"#);
        assert!(listener.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_listener_failure() {
        let listener = RecordingListener::new(Outcome::Failure);
        let (status, body) = send(app(listener), request("POST", "/add", r#"{"a":1}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"listener exploded"}"#);
    }

    #[tokio::test]
    async fn test_remove_ok() {
        let listener = RecordingListener::new(Outcome::Ok);
        let (status, body) = send(app(listener.clone()), request("DELETE", "/remove/abc123", "")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(listener.calls(), vec![Call::Remove("abc123".to_string())]);
    }

    #[tokio::test]
    async fn test_remove_not_found_is_plain_text() {
        let listener = RecordingListener::new(Outcome::NotFound);
        let (status, body) = send(app(listener), request("DELETE", "/remove/abc123", "")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Rule not found: abc123");
    }

    #[tokio::test]
    async fn test_remove_failure_is_plain_text() {
        let listener = RecordingListener::new(Outcome::Failure);
        let (status, body) = send(app(listener), request("DELETE", "/remove/abc123", "")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "listener exploded");
    }

    #[tokio::test]
    async fn test_synchronize_forwards_sequence_once() {
        let listener = RecordingListener::new(Outcome::Ok);
        let (status, body) = send(
            app(listener.clone()),
            request("POST", "/synchronize", r#"[{"a":1},{"b":2}]"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(
            listener.calls(),
            vec![Call::Synchronize(vec![
                object(json!({"a": 1})),
                object(json!({"b": 2})),
            ])]
        );
    }

    #[tokio::test]
    async fn test_synchronize_malformed_json() {
        let listener = RecordingListener::new(Outcome::Ok);
        let (status, body) = send(
            app(listener.clone()),
            request("POST", "/synchronize", r#"{"a":1}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Couldn't parse JSON"}"#);
        assert!(listener.calls().is_empty());
    }

    #[tokio::test]
    async fn test_synchronize_listener_failure() {
        let listener = RecordingListener::new(Outcome::Failure);
        let (status, body) = send(app(listener), request("POST", "/synchronize", "[]")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"listener exploded"}"#);
    }

    #[tokio::test]
    async fn test_list_passes_body_through() {
        // 非规范格式的 JSON 也必须原样返回
        let raw = "[ {\"id\" : \"r1\"},\n {\"id\":\"r2\"} ]";
        let listener = RecordingListener::with_list_body(raw);
        let response = app(listener.clone())
            .oneshot(request("GET", "/list", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], raw.as_bytes());
        assert_eq!(listener.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_list_failure() {
        let listener = RecordingListener::new(Outcome::Failure);
        let (status, body) = send(app(listener), request("GET", "/list", "")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"listener exploded"}"#);
    }

    #[tokio::test]
    async fn test_routes_under_base_path() {
        let listener = RecordingListener::new(Outcome::Ok);
        let app = create_routes("/correlation/").with_state(Arc::new(AppState::new(listener)));

        let (status, _) = send(app.clone(), request("GET", "/correlation/list", "")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(app, request("GET", "/list", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
