use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::{CheckIcon, PencilIcon, PlusIcon, TrashIcon, XMarkIcon};
use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};

pub mod state;

use state::TodoListState;

#[component]
pub fn TodoListPage() -> impl IntoView {
    let auth_ctx = use_auth();

    let (list, set_list) = signal(TodoListState::default());
    let (loading, set_loading) = signal(true);
    let (new_title, set_new_title) = signal(String::new());
    let (new_description, set_new_description) = signal(String::new());

    // 会话中的 API 客户端：凭证随客户端值走，不依赖全局默认头
    let api = move || {
        auth_ctx
            .state
            .with_untracked(|s| s.session().map(|sess| sess.api.clone()))
    };

    // 挂载时拉取整表；失败保持空表并亮出错误横幅
    Effect::new(move |_| {
        let Some(api) = api() else {
            set_loading.set(false);
            return;
        };
        spawn_local(async move {
            match api.list_todos().await {
                Ok(todos) => set_list.update(|s| s.replace_all(todos)),
                Err(e) => set_list.update(|s| s.fail(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        // 空白标题在发请求前拦下
        if new_title.get().trim().is_empty() {
            return;
        }
        let Some(api) = api() else { return };
        let req = CreateTodoRequest {
            title: new_title.get(),
            description: Some(new_description.get()),
        };
        spawn_local(async move {
            match api.create_todo(&req).await {
                Ok(todo) => {
                    set_list.update(|s| s.append(todo));
                    set_new_title.set(String::new());
                    set_new_description.set(String::new());
                }
                Err(e) => set_list.update(|s| s.fail(e.to_string())),
            }
        });
    };

    // 行内编辑保存与切换完成共用的部分更新路径：
    // 成功后用服务端返回的完整表示替换本地条目
    let on_update = Callback::new(move |(id, patch): (String, UpdateTodoRequest)| {
        let Some(api) = api() else { return };
        spawn_local(async move {
            match api.update_todo(&id, &patch).await {
                Ok(todo) => set_list.update(|s| s.replace(todo)),
                Err(e) => set_list.update(|s| s.fail(e.to_string())),
            }
        });
    });

    let on_delete = Callback::new(move |id: String| {
        let Some(api) = api() else { return };
        spawn_local(async move {
            match api.delete_todo(&id).await {
                Ok(()) => set_list.update(|s| s.remove(&id)),
                Err(e) => set_list.update(|s| s.fail(e.to_string())),
            }
        });
    });

    let counts_line = move || {
        let counts = list.with(|s| s.counts());
        format!(
            "Total: {} todos • Completed: {} • Pending: {}",
            counts.total, counts.completed, counts.pending
        )
    };

    view! {
        <div class="max-w-4xl mx-auto py-8 px-4 sm:px-6 lg:px-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="px-6 py-4 border-b border-base-200">
                        <h2 class="card-title text-2xl">"My Todos"</h2>
                    </div>

                    <div class="px-6 py-4 border-b border-base-200 bg-base-200/50">
                        <form on:submit=on_create class="space-y-4">
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                <input
                                    type="text"
                                    placeholder="Todo title..."
                                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                                    prop:value=new_title
                                    class="input input-bordered w-full"
                                    required
                                />
                                <input
                                    type="text"
                                    placeholder="Description (optional)..."
                                    on:input=move |ev| set_new_description.set(event_target_value(&ev))
                                    prop:value=new_description
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <button type="submit" class="btn btn-primary gap-2">
                                <PlusIcon attr:class="w-5 h-5" /> "Add Todo"
                            </button>
                        </form>
                    </div>

                    <Show when=move || list.with(|s| s.error.is_some())>
                        <div role="alert" class="alert alert-error rounded-none text-sm">
                            <span>{move || list.with(|s| s.error.clone().unwrap_or_default())}</span>
                        </div>
                    </Show>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex items-center justify-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                    >
                        <Show
                            when=move || list.with(|s| !s.todos.is_empty())
                            fallback=|| view! {
                                <div class="px-6 py-8 text-center text-base-content/60">
                                    <p>"No todos yet. Create your first todo above!"</p>
                                </div>
                            }
                        >
                            <div class="divide-y divide-base-200">
                                <For
                                    each=move || list.get().todos
                                    key=|todo| todo.clone()
                                    children=move |todo: Todo| {
                                        view! {
                                            <TodoItem
                                                todo=todo
                                                list=list
                                                set_list=set_list
                                                on_update=on_update
                                                on_delete=on_delete
                                            />
                                        }
                                    }
                                />
                            </div>
                        </Show>
                    </Show>

                    <Show when=move || list.with(|s| !s.todos.is_empty())>
                        <div class="px-6 py-3 bg-base-200/50 text-sm text-base-content/70">
                            {counts_line}
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// 单条待办：展示模式与行内编辑模式二选一
///
/// 行的 key 是整条 `Todo`，任何字段变化都会重建该行，
/// 因此行内快照始终与本地镜像一致。
#[component]
fn TodoItem(
    todo: Todo,
    list: ReadSignal<TodoListState>,
    set_list: WriteSignal<TodoListState>,
    #[prop(into)] on_update: Callback<(String, UpdateTodoRequest)>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let is_editing = {
        let id = todo.id.clone();
        move || list.with(|s| s.draft.as_ref().is_some_and(|d| d.id == id))
    };

    let on_toggle = {
        let id = todo.id.clone();
        let completed = todo.completed;
        move |_| {
            on_update.run((
                id.clone(),
                UpdateTodoRequest {
                    completed: Some(!completed),
                    ..Default::default()
                },
            ));
        }
    };

    let start_edit = {
        let todo = todo.clone();
        move |_| set_list.update(|s| s.begin_edit(&todo))
    };

    let delete = {
        let id = todo.id.clone();
        move |_| on_delete.run(id.clone())
    };

    // 保存前校验草稿标题非空；提交 {title, description} 部分更新
    let save_edit = move |_| {
        let Some(draft) = list.with_untracked(|s| s.draft.clone()) else {
            return;
        };
        if draft.title.trim().is_empty() {
            return;
        }
        on_update.run((
            draft.id,
            UpdateTodoRequest {
                title: Some(draft.title),
                description: Some(draft.description),
                ..Default::default()
            },
        ));
    };

    let cancel_edit = move |_| set_list.update(|s| s.cancel_edit());

    let draft_title = move || {
        list.with(|s| s.draft.as_ref().map(|d| d.title.clone()))
            .unwrap_or_default()
    };
    let draft_description = move || {
        list.with(|s| s.draft.as_ref().map(|d| d.description.clone()))
            .unwrap_or_default()
    };

    let title_class = if todo.completed {
        "text-lg font-medium line-through text-base-content/50"
    } else {
        "text-lg font-medium"
    };
    let description_class = if todo.completed {
        "text-sm line-through text-base-content/40"
    } else {
        "text-sm text-base-content/70"
    };

    let display = {
        let todo = todo.clone();
        move || {
            let created = todo.created_at.format("%b %e, %Y").to_string();
            view! {
                <div class="flex items-center justify-between">
                    <div class="flex items-center gap-3 flex-1">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-primary"
                            prop:checked=todo.completed
                            on:change=on_toggle.clone()
                        />
                        <div class="flex-1">
                            <h3 class=title_class>{todo.title.clone()}</h3>
                            {todo.description.clone().map(|d| view! {
                                <p class=description_class>{d}</p>
                            })}
                            <p class="text-xs text-base-content/40 mt-1">
                                "Created: " {created}
                            </p>
                        </div>
                    </div>
                    <div class="flex gap-1">
                        <button
                            on:click=start_edit.clone()
                            class="btn btn-ghost btn-sm btn-circle text-base-content/50 hover:text-primary"
                        >
                            <PencilIcon attr:class="w-5 h-5" />
                        </button>
                        <button
                            on:click=delete.clone()
                            class="btn btn-ghost btn-sm btn-circle text-base-content/50 hover:text-error"
                        >
                            <TrashIcon attr:class="w-5 h-5" />
                        </button>
                    </div>
                </div>
            }
        }
    };

    view! {
        <div class="px-6 py-4">
            <Show when=is_editing fallback=display>
                <div class="space-y-3">
                    <input
                        type="text"
                        prop:value=draft_title
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            set_list.update(|s| {
                                if let Some(d) = s.draft.as_mut() {
                                    d.title = value.clone();
                                }
                            });
                        }
                        class="input input-bordered w-full"
                    />
                    <input
                        type="text"
                        placeholder="Description..."
                        prop:value=draft_description
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            set_list.update(|s| {
                                if let Some(d) = s.draft.as_mut() {
                                    d.description = value.clone();
                                }
                            });
                        }
                        class="input input-bordered w-full"
                    />
                    <div class="flex gap-2">
                        <button on:click=save_edit class="btn btn-success btn-sm gap-1">
                            <CheckIcon attr:class="w-4 h-4" /> "Save"
                        </button>
                        <button on:click=cancel_edit class="btn btn-neutral btn-sm gap-1">
                            <XMarkIcon attr:class="w-4 h-4" /> "Cancel"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
