use std::rc::Rc;

use leptos::use_context;

/// Delay before a deferred notice is shown, so the view can settle first.
pub const NOTICE_DELAY_MS: u32 = 100;

/// Blocking, user-visible notices.
pub trait Notifier {
    fn alert(&self, message: &str);
    /// Run `task` once the current event has been processed.
    fn defer(&self, task: Box<dyn FnOnce()>);
}

pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        log::info!("notice: {}", message);
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        #[cfg(target_arch = "wasm32")]
        gloo_timers::callback::Timeout::new(NOTICE_DELAY_MS, task).forget();
        #[cfg(not(target_arch = "wasm32"))]
        task();
    }
}

#[derive(Clone)]
pub struct Notices {
    notifier: Rc<dyn Notifier>,
}

impl Notices {
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserNotifier))
    }

    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::clone(&self.notifier)
    }

    pub fn alert(&self, message: &str) {
        self.notifier.alert(message);
    }
}

pub fn use_notices() -> Notices {
    use_context::<Notices>().unwrap_or_else(Notices::browser)
}
