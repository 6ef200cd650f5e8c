use leptos::*;

use crate::pages::login::utils::AuthTab;

#[component]
pub fn AuthTabs(tab: RwSignal<AuthTab>) -> impl IntoView {
    let class_for = move |target: AuthTab| {
        move || {
            if tab.get() == target {
                "auth-tab active"
            } else {
                "auth-tab"
            }
        }
    };
    view! {
        <div class="auth-tabs" role="tablist">
            <button
                type="button"
                class=class_for(AuthTab::Login)
                data-tab="login"
                on:click=move |_| tab.set(AuthTab::Login)
            >
                "Log in"
            </button>
            <button
                type="button"
                class=class_for(AuthTab::Register)
                data-tab="register"
                on:click=move |_| tab.set(AuthTab::Register)
            >
                "Register"
            </button>
        </div>
    }
}
