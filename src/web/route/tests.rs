use super::*;

const ALL_ROUTES: [AppRoute; 4] = [
    AppRoute::Login,
    AppRoute::Register,
    AppRoute::Todos,
    AppRoute::NotFound,
];

#[test]
fn known_paths_round_trip() {
    for route in ALL_ROUTES {
        assert_eq!(AppRoute::from_path(route.to_path()), route);
    }
}

#[test]
fn root_path_maps_to_todos() {
    assert_eq!(AppRoute::from_path("/"), AppRoute::Todos);
}

#[test]
fn unknown_path_is_not_found() {
    assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
}

#[test]
fn todos_requires_auth() {
    assert_eq!(AppRoute::Todos.guard(false), AppRoute::Login);
    assert_eq!(AppRoute::Todos.guard(true), AppRoute::Todos);
}

#[test]
fn auth_screens_redirect_when_authenticated() {
    assert_eq!(AppRoute::Login.guard(true), AppRoute::Todos);
    assert_eq!(AppRoute::Register.guard(true), AppRoute::Todos);
    assert_eq!(AppRoute::Login.guard(false), AppRoute::Login);
    assert_eq!(AppRoute::Register.guard(false), AppRoute::Register);
}

#[test]
fn not_found_passes_through() {
    assert_eq!(AppRoute::NotFound.guard(true), AppRoute::NotFound);
    assert_eq!(AppRoute::NotFound.guard(false), AppRoute::NotFound);
}

#[test]
fn root_redirect_follows_auth_state() {
    // "/" 已认证 -> 待办列表，未认证 -> 登录页
    assert_eq!(AppRoute::from_path("/").guard(true), AppRoute::Todos);
    assert_eq!(AppRoute::from_path("/").guard(false), AppRoute::Login);
}

#[test]
fn guard_output_is_a_fixed_point() {
    // 守卫结果再过一次守卫必须不变，否则存在重定向循环
    for route in ALL_ROUTES {
        for is_auth in [false, true] {
            let resolved = route.guard(is_auth);
            assert_eq!(resolved.guard(is_auth), resolved);
        }
    }
}
