use chrono::Utc;
use leptos::*;

use crate::{
    components::layout::LoadingSpinner,
    state::auth::{use_auth, use_session},
    utils::navigation::{redirect_to, LOGIN_PATH},
};

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let session = use_session();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        if state.is_authenticated && !session.expire_if_stale(Utc::now()) {
            return;
        }
        redirect_to(LOGIN_PATH);
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Hides admin sections from everyone else. Does not redirect.
#[component]
pub fn AdminOnly(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_admin = create_memo(move |_| {
        let state = auth.get();
        should_render_admin_children(state.is_authenticated, state.loading, state.is_admin())
    });
    view! {
        <Show when=move || is_admin.get()>
            {children()}
        </Show>
    }
}

fn should_render_admin_children(is_authenticated: bool, is_loading: bool, is_admin: bool) -> bool {
    is_authenticated && is_admin && !is_loading
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{AdminOnly, RequireAuth};
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::{admin_user, provide_auth, student_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_auth(Some(student_user()));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_anonymous() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_shows_loading_spinner_while_restoring() {
        let html = render_to_string(move || {
            let (auth, set_auth) = create_signal(AuthState {
                user: None,
                is_authenticated: false,
                loading: true,
            });
            provide_context((auth, set_auth));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("loading-spinner"));
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn admin_only_renders_for_admins() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user()));
            view! {
                <AdminOnly>
                    {|| view! { <div>"admin-section"</div> }}
                </AdminOnly>
            }
        });
        assert!(html.contains("admin-section"));
    }

    #[test]
    fn admin_only_hides_for_students() {
        let html = render_to_string(move || {
            provide_auth(Some(student_user()));
            view! {
                <AdminOnly>
                    {|| view! { <div>"admin-section"</div> }}
                </AdminOnly>
            }
        });
        assert!(!html.contains("admin-section"));
    }
}
