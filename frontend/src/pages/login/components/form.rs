use leptos::{ev::SubmitEvent, *};

use crate::pages::login::utils::{LoginFormState, RegisterFormState};

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                id=id
                name=id
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn LoginForm(
    form: LoginFormState,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };
    view! {
        <form id="login-form" class="auth-form" on:submit=handle_submit>
            <TextField id="login-email" label="Email" input_type="email" value=form.email />
            <TextField id="login-password" label="Password" input_type="password" value=form.password />
            <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                {move || if pending.get() { "Logging in..." } else { "Log in" }}
            </button>
        </form>
    }
}

#[component]
pub fn RegisterForm(
    form: RegisterFormState,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };
    view! {
        <form id="register-form" class="auth-form" on:submit=handle_submit>
            <TextField id="register-name" label="Full name" value=form.full_name />
            <TextField id="register-email" label="Email" input_type="email" value=form.email />
            <TextField id="register-password" label="Password" input_type="password" value=form.password />
            <TextField
                id="register-password-confirm"
                label="Confirm password"
                input_type="password"
                value=form.confirm_password
            />
            <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                {move || if pending.get() { "Registering..." } else { "Register" }}
            </button>
        </form>
    }
}
