use crate::auth::{logout, use_auth};
use crate::components::icons::{ClipboardIcon, LogOutIcon};
use leptos::prelude::*;

/// 顶部导航栏，仅在已认证时由 App 渲染
#[component]
pub fn Navbar() -> impl IntoView {
    let auth_ctx = use_auth();

    let username = move || {
        auth_ctx
            .state
            .with(|s| s.session().map(|sess| sess.user.username.clone()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        // 导航由路由服务监听认证状态变化自动处理
        logout(&auth_ctx);
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm">
            <div class="flex-1 gap-2">
                <ClipboardIcon attr:class="h-6 w-6 text-primary" />
                <span class="text-xl font-bold">"Todo App"</span>
            </div>
            <div class="flex-none gap-2">
                <span class="badge badge-neutral hidden md:inline-flex">
                    {username}
                </span>
                <button on:click=on_logout class="btn btn-ghost btn-sm gap-2">
                    <LogOutIcon attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </div>
    }
}
