use std::rc::Rc;

use chrono::Utc;
use leptos::*;

use crate::{
    api::{ApiClient, ApiError, UserResponse},
    pages::login::{
        repository::LoginRepository,
        utils::{LoginInput, RegistrationInput},
    },
    state::session::{SessionController, SessionState},
};

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(UserResponse::is_admin).unwrap_or(false)
    }
}

impl From<&SessionState> for AuthState {
    fn from(state: &SessionState) -> Self {
        match state.session() {
            Some(session) => Self {
                user: Some(session.user.clone()),
                is_authenticated: true,
                loading: false,
            },
            None => Self::default(),
        }
    }
}

/// Mirrors the controller into a signal, then restores the stored session.
pub fn create_auth_context(session: &SessionController) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        loading: true,
        ..AuthState::default()
    });
    session.subscribe(move |state| {
        let _ = set_auth_state.try_set(AuthState::from(state));
    });
    session.restore(Utc::now());
    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context(&use_session());
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_session() -> SessionController {
    use_context::<SessionController>().unwrap_or_else(SessionController::browser)
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(use_session()))
}

pub async fn login_request(
    input: LoginInput,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<UserResponse, ApiError> {
    set_auth_state.update(|state| state.loading = true);
    let result = repo.submit_login(input).await;
    set_auth_state.update(|state| state.loading = false);
    result
}

pub fn logout(repo: &LoginRepository, set_auth_state: WriteSignal<AuthState>) {
    repo.logout();
    set_auth_state.set(AuthState::default());
}

fn login_repository() -> LoginRepository {
    LoginRepository::new_with_client(Rc::new(use_api()))
}

pub fn use_login_action() -> Action<LoginInput, Result<UserResponse, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = login_repository();

    create_action(move |input: &LoginInput| {
        let input = input.clone();
        let repo = repo.clone();
        async move { login_request(input, &repo, set_auth).await }
    })
}

pub fn use_register_action() -> Action<RegistrationInput, Result<(), ApiError>> {
    let repo = login_repository();

    create_action(move |input: &RegistrationInput| {
        let input = input.clone();
        let repo = repo.clone();
        async move { repo.submit_registration(input).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let repo = login_repository();
    Callback::new(move |_| logout(&repo, set_auth))
}
