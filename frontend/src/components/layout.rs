use leptos::*;

use crate::{
    components::confirm_dialog::ConfirmDialog,
    state::auth::{use_auth, use_logout},
    utils::{
        navigation::{redirect_to, LOGIN_PATH},
        notice::use_notices,
    },
};

pub const LOGOUT_NOTICE: &str = "Logged out";

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let notices = use_notices();
    let logout = use_logout();
    let confirm_open = create_rw_signal(false);

    let user_label = move || {
        auth.get()
            .user
            .map(|user| format!("{} ({})", user.full_name, user.role))
            .unwrap_or_default()
    };
    let on_confirm = Callback::new(move |_| {
        confirm_open.set(false);
        logout.call(());
        notices.alert(LOGOUT_NOTICE);
        redirect_to(LOGIN_PATH);
    });

    view! {
        <header class="app-header">
            <h1>"Library"</h1>
            <div class="user-info">
                <span id="user-name">{user_label}</span>
                <button
                    id="logout-btn"
                    type="button"
                    class="btn"
                    on:click=move |_| confirm_open.set(true)
                >
                    "Log out"
                </button>
            </div>
            <ConfirmDialog
                is_open=Signal::derive(move || confirm_open.get())
                title="Log out"
                message="Are you sure you want to log out?"
                on_confirm=on_confirm
                on_cancel=Callback::new(move |_| confirm_open.set(false))
            />
        </header>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status">
            <div class="spinner"></div>
        </div>
    }
}
