use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOAN_DAYS: u32 = 14;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "DEFAULT_LOAN_DAYS")]
    pub default_loan_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub default_loan_days: u32,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_loan_days: DEFAULT_LOAN_DAYS,
        }
    }
}

impl ResolvedConfig {
    pub fn from_runtime(cfg: RuntimeConfig) -> Self {
        let api_base_url = cfg
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let default_loan_days = cfg
            .default_loan_days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_LOAN_DAYS);
        Self {
            api_base_url,
            default_loan_days,
        }
    }
}

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;
    use anyhow::{ensure, Context};
    use wasm_bindgen::JsValue;

    fn field(obj: &JsValue, keys: &[&str]) -> Option<JsValue> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &JsValue::from_str(key))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
        })
    }

    // Expect optional global object: window.<name> = { API_BASE_URL: "...", DEFAULT_LOAN_DAYS: 14 }
    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let api_base_url =
            field(&any, &["API_BASE_URL", "api_base_url"]).and_then(|v| v.as_string());
        let default_loan_days = field(&any, &["DEFAULT_LOAN_DAYS", "default_loan_days"])
            .and_then(|v| v.as_f64().or_else(|| v.as_string()?.parse().ok()))
            .map(|days| days as u32);
        if api_base_url.is_none() && default_loan_days.is_none() {
            return None;
        }
        Some(RuntimeConfig {
            api_base_url,
            default_loan_days,
        })
    }

    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        read_global("__LIBRARY_ENV").or_else(|| read_global("__LIBRARY_CONFIG"))
    }

    pub async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
        let origin = web_sys::window()
            .context("no global `window` exists")?
            .location()
            .origin()
            .map_err(|_| anyhow::anyhow!("window origin unavailable"))?;
        let resp = reqwest::get(format!("{}/config.json", origin))
            .await
            .context("config.json request failed")?;
        ensure!(
            resp.status().is_success(),
            "config.json returned {}",
            resp.status()
        );
        resp.json::<RuntimeConfig>()
            .await
            .context("config.json is not valid")
    }
}

async fn load_runtime_config() -> RuntimeConfig {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(cfg) = browser::snapshot_from_globals() {
            return cfg;
        }
        match browser::fetch_runtime_config().await {
            Ok(cfg) => return cfg,
            Err(err) => log::debug!("Using default runtime config: {:#}", err),
        }
    }
    RuntimeConfig::default()
}

pub async fn resolve() -> ResolvedConfig {
    if let Some(cached) = RESOLVED.get() {
        return cached.clone();
    }
    let resolved = ResolvedConfig::from_runtime(load_runtime_config().await);
    RESOLVED.get_or_init(|| resolved).clone()
}

pub async fn await_api_base_url() -> String {
    resolve().await.api_base_url
}

pub async fn await_default_loan_days() -> u32 {
    resolve().await.default_loan_days
}

pub async fn init() {
    let cfg = resolve().await;
    log::info!(
        "Runtime config: api_base_url={}, default_loan_days={}",
        cfg.api_base_url,
        cfg.default_loan_days
    );
}
