//! REST API 客户端
//!
//! `TodoApi` 是一个显式携带凭证的客户端值：`base_url` + 可选 bearer token。
//! 凭证在构建每个请求时显式附加，不存在全局可变的默认请求头；
//! 被 in-flight 请求克隆走的客户端保留其创建时的凭证，登出不做追溯撤销。

use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;

use crate::models::{
    CreateTodoRequest, RegisterRequest, Todo, TokenResponse, UpdateTodoRequest, User,
};

/// API 错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 请求构建失败
    Request(String),
    /// 网络/传输层失败
    Network(String),
    /// 服务端拒绝（非 2xx）；`detail` 为服务端给出的可读信息，
    /// 错误体中没有时使用按操作指定的回退文案
    Api { status: u16, detail: String },
    /// 响应体解析失败
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Request(msg) => write!(f, "Failed to build request: {msg}"),
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::Api { detail, .. } => write!(f, "{detail}"),
            ApiError::Decode(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

/// 带凭证的 API 客户端
///
/// 每个会话构建一次并随 `SessionState` 传递；组件拿到的是值的克隆。
#[derive(Debug, Clone, PartialEq)]
pub struct TodoApi {
    base_url: String,
    token: Option<String>,
}

impl TodoApi {
    /// 未认证客户端（登录、注册）
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// 携带 bearer token 的客户端
    pub fn with_token(base_url: &str, token: String) -> Self {
        Self {
            token: Some(token),
            ..Self::new(base_url)
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 附加认证头（如有凭证）
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    /// 登录：OAuth2 password flow，表单编码的请求体
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = form_urlencode(&[("username", username), ("password", password)]);
        let res = Request::post(&self.url("/token"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let res = check(res, "Login failed").await?;
        json_body(&res).await
    }

    /// 注册新用户：成功返回 `()`，不返回会话
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        let res = Request::post(&self.url("/register"))
            .json(req)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(res, "Registration failed").await?;
        Ok(())
    }

    /// 校验当前会话并取回用户信息
    pub async fn me(&self) -> Result<User, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/users/me")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let res = check(res, "Session verification failed").await?;
        json_body(&res).await
    }

    /// 拉取整张待办列表（服务端顺序）
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/todos")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let res = check(res, "Failed to fetch todos").await?;
        json_body(&res).await
    }

    /// 创建待办，返回服务端补全后的完整条目
    pub async fn create_todo(&self, req: &CreateTodoRequest) -> Result<Todo, ApiError> {
        let res = self
            .authorize(Request::post(&self.url("/todos")))
            .json(req)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let res = check(res, "Failed to create todo").await?;
        json_body(&res).await
    }

    /// 部分更新，返回服务端的完整最新表示
    pub async fn update_todo(
        &self,
        id: &str,
        patch: &UpdateTodoRequest,
    ) -> Result<Todo, ApiError> {
        let res = self
            .authorize(Request::put(&self.url(&format!("/todos/{id}"))))
            .json(patch)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let res = check(res, "Failed to update todo").await?;
        json_body(&res).await
    }

    /// 按 id 删除待办
    pub async fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::delete(&self.url(&format!("/todos/{id}"))))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(res, "Failed to delete todo").await?;
        Ok(())
    }
}

/// 统一的非 2xx 处理：从错误体提取 `detail`，否则用调用方回退文案
async fn check(res: Response, fallback: &str) -> Result<Response, ApiError> {
    if res.ok() {
        return Ok(res);
    }
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status,
        detail: error_detail(&body, fallback),
    })
}

async fn json_body<T: DeserializeOwned>(res: &Response) -> Result<T, ApiError> {
    res.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// 从服务端错误体提取人类可读的 `detail` 字段
///
/// FastAPI 风格：`{"detail": "..."}`。`detail` 缺失或不是字符串
/// （例如校验错误的数组形式）时返回回退文案。
fn error_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(str::to_string)))
        .unwrap_or_else(|| fallback.to_string())
}

/// application/x-www-form-urlencoded 编码
fn form_urlencode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, NON_ALPHANUMERIC),
                utf8_percent_encode(v, NON_ALPHANUMERIC)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let api = TodoApi::new("http://localhost:8000/");
        assert_eq!(api.url("/todos"), "http://localhost:8000/todos");
    }

    #[test]
    fn url_joins_path_without_leading_slash() {
        let api = TodoApi::new("http://localhost:8000");
        assert_eq!(api.url("todos"), "http://localhost:8000/todos");
    }

    #[test]
    fn with_token_keeps_credential() {
        let api = TodoApi::with_token("http://localhost:8000", "tok-1".to_string());
        assert_eq!(api.token.as_deref(), Some("tok-1"));

        let without = TodoApi::new("http://localhost:8000");
        assert_eq!(without.token, None);
    }

    #[test]
    fn form_urlencode_plain_values() {
        let body = form_urlencode(&[("username", "alice"), ("password", "secret")]);
        assert_eq!(body, "username=alice&password=secret");
    }

    #[test]
    fn form_urlencode_escapes_reserved_characters() {
        let body = form_urlencode(&[("username", "al ice"), ("password", "p@ss&wörd")]);
        assert_eq!(body, "username=al%20ice&password=p%40ss%26w%C3%B6rd");
    }

    #[test]
    fn error_detail_extracts_server_message() {
        let body = r#"{"detail": "Incorrect username or password"}"#;
        assert_eq!(
            error_detail(body, "Login failed"),
            "Incorrect username or password"
        );
    }

    #[test]
    fn error_detail_falls_back_on_missing_field() {
        assert_eq!(error_detail(r#"{"message": "nope"}"#, "Login failed"), "Login failed");
    }

    #[test]
    fn error_detail_falls_back_on_non_string_detail() {
        // FastAPI 校验错误的 detail 是数组
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#;
        assert_eq!(error_detail(body, "Failed to create todo"), "Failed to create todo");
    }

    #[test]
    fn error_detail_falls_back_on_invalid_json() {
        assert_eq!(error_detail("<html>502</html>", "Failed to fetch todos"), "Failed to fetch todos");
        assert_eq!(error_detail("", "Failed to fetch todos"), "Failed to fetch todos");
    }
}
