use leptos::*;

use crate::pages::login::{
    components::{
        form::{LoginForm, RegisterForm},
        tabs::AuthTabs,
    },
    utils::AuthTab,
    view_model::use_login_view_model,
};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let login_pending = vm.login_action.pending();
    let register_pending = vm.register_action.pending();
    let on_login = Callback::new(move |_| vm.submit_login());
    let on_register = Callback::new(move |_| vm.submit_registration());

    view! {
        <section id="auth-section" class="auth-container">
            <h1>"Library"</h1>
            <AuthTabs tab=vm.tab />
            <Show
                when=move || vm.tab.get() == AuthTab::Login
                fallback=move || view! {
                    <RegisterForm form=vm.register_form pending=register_pending on_submit=on_register />
                }
            >
                <LoginForm form=vm.login_form pending=login_pending on_submit=on_login />
            </Show>
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_starts_on_login_tab() {
        let html = render_to_string(|| view! { <LoginPanel /> });
        assert!(html.contains("login-form"));
        assert!(!html.contains("register-form"));
        assert!(html.contains("Register"));
    }
}
