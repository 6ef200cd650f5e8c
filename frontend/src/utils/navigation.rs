pub const LIBRARY_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

pub fn redirect_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if location.pathname().map(|current| current == path).unwrap_or(false) {
                return;
            }
            let _ = location.set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::debug!("redirect to {} skipped outside the browser", path);
}
