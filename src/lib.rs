//! Todo 单页应用前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话与认证状态管理
//! - `api`: 显式携带凭证的 REST 客户端
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

mod components {
    pub mod icons;
    pub mod login;
    pub mod navbar;
    pub mod register;
    pub mod todo_list;
}

// 原生 Web API 封装模块
pub(crate) mod web;

use leptos::prelude::*;

use crate::auth::{AuthContext, init_session};
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::register::RegisterPage;
use crate::components::todo_list::TodoListPage;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Todos => view! { <TodoListPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 恢复会话：探测完成前只渲染加载指示，不渲染任何路由
    init_session(&auth_ctx);

    // 3. 认证信号注入路由服务，实现守卫与认证系统的解耦
    let resolved = auth_ctx.resolved_signal();
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Show
            when=move || resolved.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <Router is_authenticated=is_authenticated>
                <div class="min-h-screen bg-base-200">
                    <Show when=move || is_authenticated.get()>
                        <Navbar />
                    </Show>
                    <RouterOutlet matcher=route_matcher />
                </div>
            </Router>
        </Show>
    }
}
