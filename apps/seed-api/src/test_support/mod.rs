//! Test helpers for code that reads `API_*`, `APP_ENV`/`NODE_ENV` and `OPENAPI_OUT`.

use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub(crate) mod env {
    use super::*;

    /// Serialises env-mutating tests and restores every touched variable on drop.
    pub(crate) struct EnvGuard {
        _lock: MutexGuard<'static, ()>,
        saved: HashMap<String, Option<String>>,
    }

    pub(crate) fn guard() -> EnvGuard {
        EnvGuard {
            _lock: ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
            saved: HashMap::new(),
        }
    }

    /// Lock the environment with every key in `keys` unset.
    pub(crate) fn cleared(keys: &[&str]) -> EnvGuard {
        let mut guard = guard();
        for key in keys {
            guard.remove(key);
        }
        guard
    }

    impl EnvGuard {
        fn remember(&mut self, key: &str) {
            self.saved
                .entry(key.to_string())
                .or_insert_with(|| std::env::var(key).ok());
        }

        pub(crate) fn set(&mut self, key: &str, value: impl AsRef<str>) {
            self.remember(key);
            std::env::set_var(key, value.as_ref());
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.remember(key);
            std::env::remove_var(key);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain() {
                match value {
                    Some(val) => std::env::set_var(&key, val),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::env;

    #[test]
    fn guard_restores_previous_values() {
        const KEY: &str = "API_RANDOM_SEED";
        let before = std::env::var(KEY).ok();
        {
            let mut guard = env::cleared(&[KEY]);
            assert!(std::env::var(KEY).is_err());
            guard.set(KEY, "7");
            guard.set(KEY, "8");
            assert_eq!(std::env::var(KEY).as_deref(), Ok("8"));
        }
        assert_eq!(std::env::var(KEY).ok(), before);
    }
}
