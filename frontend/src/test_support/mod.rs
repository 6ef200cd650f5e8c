#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use chrono::{DateTime, Utc};
    use leptos::*;

    use crate::api::UserResponse;
    use crate::state::auth::AuthState;
    use crate::state::session::SessionController;
    use crate::utils::notice::{Notices, Notifier};
    use crate::utils::storage::MemoryStorage;

    pub fn admin_user() -> UserResponse {
        UserResponse {
            id: 1,
            full_name: "Ada Admin".into(),
            email: "ada@example.com".into(),
            role: "admin".into(),
        }
    }

    pub fn student_user() -> UserResponse {
        UserResponse {
            id: 2,
            full_name: "Sam Student".into(),
            email: "sam@example.com".into(),
            role: "student".into(),
        }
    }

    /// An unsigned token whose payload carries only `sub` and `exp`.
    pub fn token_expiring_at(exp: DateTime<Utc>) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = serde_json::json!({ "sub": "1", "exp": exp.timestamp() });
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.test-signature", header, payload)
    }

    /// Records alerts and holds deferred tasks until `run_deferred`.
    #[derive(Default)]
    pub struct RecordingNotifier {
        alerts: RefCell<Vec<String>>,
        deferred: RefCell<Vec<Box<dyn FnOnce()>>>,
        deferred_total: Cell<usize>,
    }

    impl RecordingNotifier {
        pub fn alerts(&self) -> Vec<String> {
            self.alerts.borrow().clone()
        }

        /// Number of tasks ever deferred, including ones already run.
        pub fn deferred_count(&self) -> usize {
            self.deferred_total.get()
        }

        pub fn run_deferred(&self) {
            let tasks: Vec<_> = self.deferred.borrow_mut().drain(..).collect();
            for task in tasks {
                task();
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn defer(&self, task: Box<dyn FnOnce()>) {
            self.deferred_total.set(self.deferred_total.get() + 1);
            self.deferred.borrow_mut().push(task);
        }
    }

    pub fn memory_session() -> (SessionController, Rc<MemoryStorage>, Rc<RecordingNotifier>) {
        let storage = Rc::new(MemoryStorage::new());
        let notifier = Rc::new(RecordingNotifier::default());
        let session = SessionController::new(storage.clone(), notifier.clone());
        (session, storage, notifier)
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn provide_recording_notices() -> Rc<RecordingNotifier> {
        let notifier = Rc::new(RecordingNotifier::default());
        provide_context(Notices::new(notifier.clone()));
        notifier
    }
}
