use leptos::*;

use crate::api::{ApiError, LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Email is trimmed; the password is sent as typed.
pub fn validate_credentials(input: &LoginInput) -> Result<LoginRequest, ApiError> {
    let email = input.email.trim();
    if email.is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("Please enter your email and password"));
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: input.password.clone(),
    })
}

pub fn validate_registration(input: &RegistrationInput) -> Result<RegisterRequest, ApiError> {
    let full_name = input.full_name.trim();
    let email = input.email.trim();
    if full_name.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("Please fill in all fields"));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if input.password != input.confirm_password {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(RegisterRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: input.password.clone(),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_input(&self) -> LoginInput {
        LoginInput {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
        }
    }

    pub fn prefill(&self, email: &str, password: &str) {
        self.email.set(email.to_string());
        self.password.set(password.to_string());
    }
}

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub full_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            full_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            confirm_password: create_rw_signal(String::new()),
        }
    }
}

impl RegisterFormState {
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput {
            full_name: self.full_name.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
        }
    }

    pub fn reset(&self) {
        self.full_name.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.confirm_password.set(String::new());
    }
}
