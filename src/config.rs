//! API 配置
//!
//! 后端地址在编译期通过 `TODO_API_URL` 环境变量覆盖，
//! 未设置时回落到本地开发端点。

/// 默认的本地开发后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// 当前构建使用的后端地址
pub fn api_base_url() -> &'static str {
    match option_env!("TODO_API_URL") {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_API_URL,
    }
}
