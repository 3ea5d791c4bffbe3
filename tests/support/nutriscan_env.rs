use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

const CONFIG_HOME_VAR: &str = "NUTRISCAN_CONFIG_HOME";
const PREDICT_URL_VAR: &str = "NUTRISCAN_PREDICT_URL";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app at a scratch config home (and optionally an endpoint) for
/// the lifetime of the guard.
pub struct NutriscanEnvGuard {
    previous_home: Option<String>,
    previous_url: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl NutriscanEnvGuard {
    pub fn set(path: PathBuf, endpoint: Option<&str>) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_VAR).ok();
        let previous_url = std::env::var(PREDICT_URL_VAR).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_VAR, path);
            match endpoint {
                Some(endpoint) => std::env::set_var(PREDICT_URL_VAR, endpoint),
                None => std::env::remove_var(PREDICT_URL_VAR),
            }
        }
        Self {
            previous_home,
            previous_url,
            _lock: lock,
        }
    }
}

fn restore(name: &str, value: Option<String>) {
    // SAFETY: tests run under a global lock to prevent concurrent env mutations.
    unsafe {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
}

impl Drop for NutriscanEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_VAR, self.previous_home.take());
        restore(PREDICT_URL_VAR, self.previous_url.take());
    }
}
