use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::RequireAuth,
    pages::{library::LibraryPage, login::LoginPage},
    state::{auth::AuthProvider, session::SessionController},
    utils::{
        navigation::{LIBRARY_PATH, LOGIN_PATH},
        notice::Notices,
    },
};

pub const ROUTE_PATHS: &[&str] = &[LIBRARY_PATH, LOGIN_PATH];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[LIBRARY_PATH];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &[LOGIN_PATH];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    let notices = Notices::browser();
    let session = SessionController::new(
        crate::utils::storage::default_storage(),
        notices.notifier(),
    );
    provide_context(notices);
    provide_context(session.clone());
    provide_context(ApiClient::new(session));
    app_routes()
}

fn app_routes() -> impl IntoView {
    provide_meta_context();
    view! {
        <Title text="Library" />
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path=LIBRARY_PATH view=ProtectedLibrary/>
                    <Route path=LOGIN_PATH view=LoginPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedLibrary() -> impl IntoView {
    view! { <RequireAuth><LibraryPage/></RequireAuth> }
}
