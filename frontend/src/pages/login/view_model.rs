use leptos::*;

use super::utils::{AuthTab, LoginFormState, LoginInput, RegisterFormState, RegistrationInput};
use crate::api::{ApiError, UserResponse};
use crate::state::auth;
use crate::utils::{
    navigation::{redirect_to, LIBRARY_PATH},
    notice::use_notices,
};

pub const LOGIN_SUCCESS_NOTICE: &str = "Login successful!";
pub const REGISTER_SUCCESS_NOTICE: &str = "Registration successful! You can now log in.";

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub tab: RwSignal<AuthTab>,
    pub login_form: LoginFormState,
    pub register_form: RegisterFormState,
    pub login_action: Action<LoginInput, Result<UserResponse, ApiError>>,
    pub register_action: Action<RegistrationInput, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit_login(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        self.login_action.dispatch(self.login_form.to_input());
    }

    pub fn submit_registration(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        self.register_action.dispatch(self.register_form.to_input());
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let notices = use_notices();
    let tab = create_rw_signal(AuthTab::default());
    let login_form = LoginFormState::default();
    let register_form = RegisterFormState::default();
    let login_action = auth::use_login_action();
    let register_action = auth::use_register_action();

    {
        let notices = notices.clone();
        create_effect(move |_| {
            if let Some(result) = login_action.value().get() {
                match result {
                    Ok(_) => {
                        notices.alert(LOGIN_SUCCESS_NOTICE);
                        redirect_to(LIBRARY_PATH);
                    }
                    Err(err) => notices.alert(&err.error),
                }
            }
        });
    }

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(()) => {
                    notices.alert(REGISTER_SUCCESS_NOTICE);
                    let submitted = register_form.to_input();
                    login_form.prefill(submitted.email.trim(), &submitted.password);
                    register_form.reset();
                    tab.set(AuthTab::Login);
                }
                Err(err) => notices.alert(&err.error),
            }
        }
    });

    LoginViewModel {
        tab,
        login_form,
        register_form,
        login_action,
        register_action,
    }
}
