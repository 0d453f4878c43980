//! 数据传输对象（DTO）定义
//!
//! 与后端 REST API 的 JSON 契约一一对应。
//! 服务端返回的未知字段（如 `user_id`）在反序列化时被忽略。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 当前登录用户（客户端只读，仅在会话内存中保留）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// 待办事项
///
/// `created_at` 由服务端分配，ISO 时间戳。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// `/token` 端点的响应（`token_type` 恒为 "bearer"，忽略）
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// 注册请求体
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 创建待办请求体
#[derive(Debug, Clone, Serialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 部分更新请求体
///
/// `None` 字段不参与序列化，对应后端 `PUT /todos/{id}`
/// 只更新显式给出的字段的语义。
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_deserializes_server_shape() {
        let json = r#"{
            "id": "abc123",
            "title": "Buy milk",
            "description": null,
            "completed": false,
            "created_at": "2024-03-01T12:30:00Z",
            "user_id": "u1"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id, "abc123");
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, None);
        assert!(!todo.completed);
    }

    #[test]
    fn todo_description_defaults_to_none_when_absent() {
        let json = r#"{
            "id": "abc123",
            "title": "Buy milk",
            "completed": true,
            "created_at": "2024-03-01T12:30:00Z"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.description, None);
        assert!(todo.completed);
    }

    #[test]
    fn toggle_patch_serializes_only_completed() {
        let patch = UpdateTodoRequest {
            completed: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn edit_patch_serializes_title_and_description() {
        let patch = UpdateTodoRequest {
            title: Some("Updated".to_string()),
            description: Some(String::new()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Updated", "description": "" })
        );
    }

    #[test]
    fn token_response_ignores_token_type() {
        let json = r#"{ "access_token": "tok-1", "token_type": "bearer" }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok-1");
    }
}
