//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 路由守卫是 `(路由, 认证状态)` 的纯函数，三个入口
//! （导航、popstate、认证状态变化）共用同一张真值表。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页（默认路由）
    #[default]
    Login,
    /// 注册页
    Register,
    /// 待办列表（需要认证）
    Todos,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由
    ///
    /// 根路径映射到待办列表：未认证用户随后被守卫弹回登录页，
    /// 由此复现"根路径按认证状态分流"的行为。
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/todos" => Self::Todos,
            "/login" => Self::Login,
            "/register" => Self::Register,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Todos => "/todos",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Todos)
    }

    /// 已认证用户是否应离开此路由（登录/注册页）
    pub fn redirects_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// **核心守卫逻辑**：由 `(目标路由, 认证状态)` 得出实际渲染的路由
    ///
    /// 输出恒为自身在相同认证状态下的不动点，不存在重定向循环。
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::Login
        } else if self.redirects_when_authenticated() && is_authenticated {
            Self::Todos
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests;
