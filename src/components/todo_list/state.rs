//! 待办列表本地状态
//!
//! 纯逻辑层：本地列表是服务端状态的 best-effort 镜像。
//! 成功的 CRUD 调用只用服务端返回的单条表示修补本地副本
//! （不整表刷新）；失败时本地列表保持原样，只写入共享错误槽。

use crate::models::Todo;

/// 编辑草稿：保存前独立于已提交条目的临时副本，全局至多一份
#[derive(Clone, Debug, PartialEq)]
pub struct EditDraft {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// 汇总统计（渲染期派生，不存储）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TodoCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// 待办列表状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoListState {
    /// 服务端顺序的本地镜像
    pub todos: Vec<Todo>,
    /// 唯一的编辑草稿槽
    pub draft: Option<EditDraft>,
    /// 共享错误槽：下一次成功的调用会清除它
    pub error: Option<String>,
}

impl TodoListState {
    /// 整表替换（挂载时的列表拉取）
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.error = None;
    }

    /// 追加服务端返回的新条目（创建成功）
    pub fn append(&mut self, todo: Todo) {
        self.todos.push(todo);
        self.error = None;
    }

    /// 用服务端返回的完整表示替换同 id 条目，保持列表顺序（更新成功）
    ///
    /// 同时退出编辑模式：保存与切换完成共用此路径。
    pub fn replace(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
        self.draft = None;
        self.error = None;
    }

    /// 移除指定 id 的条目（删除成功）
    pub fn remove(&mut self, id: &str) {
        self.todos.retain(|t| t.id != id);
        self.error = None;
    }

    /// 进入编辑模式：复制 {id, title, description} 到草稿槽
    ///
    /// 已有未保存草稿时静默整体替换，刻意不弹确认。
    pub fn begin_edit(&mut self, todo: &Todo) {
        self.draft = Some(EditDraft {
            id: todo.id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
        });
    }

    /// 放弃草稿，不发网络请求
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// 记录失败：只写错误槽，其余状态一律不动
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// 渲染期派生的汇总统计，恒有 total = completed + pending
    pub fn counts(&self) -> TodoCounts {
        let completed = self.todos.iter().filter(|t| t.completed).count();
        TodoCounts {
            total: self.todos.len(),
            completed,
            pending: self.todos.len() - completed,
        }
    }
}

#[cfg(test)]
mod tests;
