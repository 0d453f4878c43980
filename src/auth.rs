//! 会话与认证状态管理
//!
//! 会话状态是显式的三态联合：`Unknown`（启动探测中）、
//! `Unauthenticated`、`Authenticated`。凭证随 `TodoApi` 一起
//! 存放在 `Authenticated` 中，由需要的组件显式取用；
//! 路由服务通过注入的认证信号检查状态，与本模块解耦。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TodoApi;
use crate::config;
use crate::models::{RegisterRequest, User};
use crate::web::LocalStorage;

/// 持久化 token 的 LocalStorage 键（客户端唯一的持久状态）
pub const TOKEN_STORAGE_KEY: &str = "todo_token";

/// 已认证会话：当前用户 + 携带凭证的 API 客户端
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: User,
    pub api: TodoApi,
}

/// 会话状态机
///
/// `Unknown -> {Unauthenticated, Authenticated}`：初始化探测完成；
/// `Unauthenticated -> Authenticated`：登录成功；
/// `Authenticated -> Unauthenticated`：登出或 token 校验失败。
/// 不存在其他迁移。
#[derive(Clone, Debug, PartialEq, Default)]
pub enum SessionState {
    /// 初始状态：持久化 token 的有效性探测尚未完成，
    /// 此状态下只渲染加载指示，不渲染任何路由
    #[default]
    Unknown,
    /// 无有效会话
    Unauthenticated,
    /// 有效会话
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// 启动探测是否已完成
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由守卫注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 启动探测是否完成的信号
    pub fn resolved_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_resolved())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话
///
/// 没有持久化 token 时直接进入未认证态，不发任何网络请求；
/// 有 token 时探测 `/users/me`，失败则清除过期 token 后进入未认证态，
/// 保证陈旧凭证不会存活到认证完成之后。
pub fn init_session(ctx: &AuthContext) {
    let set_state = ctx.set_state;
    match LocalStorage::get(TOKEN_STORAGE_KEY) {
        None => set_state.set(SessionState::Unauthenticated),
        Some(token) => {
            spawn_local(async move {
                let api = TodoApi::with_token(config::api_base_url(), token);
                match api.me().await {
                    Ok(user) => {
                        set_state.set(SessionState::Authenticated(Session { user, api }));
                    }
                    Err(_) => {
                        LocalStorage::delete(TOKEN_STORAGE_KEY);
                        set_state.set(SessionState::Unauthenticated);
                    }
                }
            });
        }
    }
}

/// 登录
///
/// 单次尝试，不重试；是否让用户重试由界面决定。
/// 成功路径：取 token -> 持久化 -> 构建带凭证客户端 -> 取回用户。
/// 取回用户失败时撤掉刚写入的 token，避免留下半成功的会话。
pub async fn login(ctx: &AuthContext, username: String, password: String) -> Result<(), String> {
    let api = TodoApi::new(config::api_base_url());
    let token = api
        .login(&username, &password)
        .await
        .map_err(|e| e.to_string())?;

    LocalStorage::set(TOKEN_STORAGE_KEY, &token.access_token);
    let api = TodoApi::with_token(config::api_base_url(), token.access_token);
    match api.me().await {
        Ok(user) => {
            ctx.set_state
                .set(SessionState::Authenticated(Session { user, api }));
            Ok(())
        }
        Err(e) => {
            LocalStorage::delete(TOKEN_STORAGE_KEY);
            Err(e.to_string())
        }
    }
}

/// 注册新用户（成功后不自动登录）
pub async fn register(username: String, email: String, password: String) -> Result<(), String> {
    let api = TodoApi::new(config::api_base_url());
    let req = RegisterRequest {
        username,
        email,
        password,
    };
    api.register(&req).await.map_err(|e| e.to_string())
}

/// 登出：同步完成，不发网络请求，不会失败
///
/// 已经 in-flight 的请求持有各自克隆的凭证，这里不做追溯撤销。
/// 导航由路由服务监听认证状态变化自动处理。
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(TOKEN_STORAGE_KEY);
    ctx.set_state.set(SessionState::Unauthenticated);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn initial_state_is_unknown_and_unresolved() {
        let state = SessionState::default();
        assert_eq!(state, SessionState::Unknown);
        assert!(!state.is_resolved());
        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
    }

    #[test]
    fn unauthenticated_is_resolved_but_not_authenticated() {
        let state = SessionState::Unauthenticated;
        assert!(state.is_resolved());
        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
    }

    #[test]
    fn authenticated_exposes_session() {
        let state = SessionState::Authenticated(Session {
            user: user(),
            api: TodoApi::with_token("http://localhost:8000", "tok-1".to_string()),
        });
        assert!(state.is_resolved());
        assert!(state.is_authenticated());
        assert_eq!(state.session().unwrap().user.username, "alice");
    }
}
