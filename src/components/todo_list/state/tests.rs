use super::*;
use chrono::{TimeZone, Utc};

fn todo(id: &str, title: &str, completed: bool) -> Todo {
    Todo {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        completed,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn populated() -> TodoListState {
    let mut state = TodoListState::default();
    state.replace_all(vec![
        todo("1", "Buy milk", false),
        todo("3", "Walk dog", false),
        todo("5", "Write report", true),
    ]);
    state
}

#[test]
fn replace_all_mirrors_server_order_and_clears_error() {
    let mut state = TodoListState::default();
    state.fail("Failed to fetch todos");
    state.replace_all(vec![todo("1", "a", false), todo("2", "b", true)]);

    assert_eq!(
        state.todos.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        ["1", "2"]
    );
    assert_eq!(state.error, None);
}

#[test]
fn append_adds_exactly_one_item_at_the_end() {
    let mut state = populated();
    state.append(todo("7", "New item", false));

    assert_eq!(state.todos.len(), 4);
    assert_eq!(state.todos.last().unwrap().id, "7");
    assert!(!state.todos.last().unwrap().completed);
}

#[test]
fn replace_patches_only_the_matching_item_in_place() {
    let mut state = populated();
    let mut toggled = todo("3", "Walk dog", true);
    toggled.description = Some("around the block".to_string());
    state.replace(toggled);

    // 位置不变，只有目标条目被服务端表示覆盖
    assert_eq!(state.todos[1].id, "3");
    assert!(state.todos[1].completed);
    assert_eq!(state.todos[1].description.as_deref(), Some("around the block"));
    assert_eq!(state.todos[0], todo("1", "Buy milk", false));
    assert_eq!(state.todos[2], todo("5", "Write report", true));
}

#[test]
fn replace_exits_edit_mode() {
    let mut state = populated();
    let target = state.todos[1].clone();
    state.begin_edit(&target);
    assert!(state.draft.is_some());

    state.replace(todo("3", "Walk the dog", false));
    assert_eq!(state.draft, None);
}

#[test]
fn remove_deletes_exactly_that_item_and_keeps_order() {
    let mut state = populated();
    state.remove("5");

    assert_eq!(
        state.todos.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        ["1", "3"]
    );
}

#[test]
fn begin_edit_copies_fields_into_the_draft() {
    let mut state = populated();
    let mut target = state.todos[0].clone();
    target.description = Some("2 liters".to_string());
    state.begin_edit(&target);

    let draft = state.draft.as_ref().unwrap();
    assert_eq!(draft.id, "1");
    assert_eq!(draft.title, "Buy milk");
    assert_eq!(draft.description, "2 liters");
}

#[test]
fn begin_edit_defaults_missing_description_to_empty() {
    let mut state = populated();
    let target = state.todos[0].clone();
    state.begin_edit(&target);

    assert_eq!(state.draft.as_ref().unwrap().description, "");
}

#[test]
fn begin_edit_on_another_item_silently_replaces_the_draft() {
    let mut state = populated();
    let first = state.todos[0].clone();
    let second = state.todos[1].clone();

    state.begin_edit(&first);
    state.draft.as_mut().unwrap().title = "unsaved edit".to_string();
    state.begin_edit(&second);

    // 第一份草稿（含未保存修改）被整体丢弃，只剩第二份
    let draft = state.draft.as_ref().unwrap();
    assert_eq!(draft.id, "3");
    assert_eq!(draft.title, "Walk dog");
}

#[test]
fn cancel_edit_drops_the_draft_only() {
    let mut state = populated();
    let target = state.todos[0].clone();
    state.begin_edit(&target);
    let todos_before = state.todos.clone();

    state.cancel_edit();
    assert_eq!(state.draft, None);
    assert_eq!(state.todos, todos_before);
}

#[test]
fn fail_sets_the_error_and_touches_nothing_else() {
    let mut state = populated();
    let target = state.todos[1].clone();
    state.begin_edit(&target);
    let before = state.clone();

    state.fail("Failed to update todo");

    assert_eq!(state.error.as_deref(), Some("Failed to update todo"));
    assert_eq!(state.todos, before.todos);
    assert_eq!(state.draft, before.draft);
}

#[test]
fn next_success_clears_a_previous_error() {
    let mut state = populated();
    state.fail("Failed to delete todo");
    state.remove("1");

    assert_eq!(state.error, None);
}

#[test]
fn counts_always_satisfy_the_identity() {
    let empty = TodoListState::default();
    assert_eq!(
        empty.counts(),
        TodoCounts {
            total: 0,
            completed: 0,
            pending: 0
        }
    );

    let state = populated();
    let counts = state.counts();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.completed, 1);
    assert_eq!(counts.pending, 2);
    assert_eq!(counts.total, counts.completed + counts.pending);
}
