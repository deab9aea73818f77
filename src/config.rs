//! Configuration for the Slack client and data file paths
//!
//! Values come from environment variables (a local .env file is loaded
//! first via dotenvy), with constants as fallback defaults.

use std::path::PathBuf;

/// Default file paths (overridable via env vars or CLI flags)
pub const BIRTHDAY_FILE: &str = "birthdays.csv";
pub const COUPON_FILE: &str = "coupons.csv";
pub const I18N_FILE: &str = "i18n.json";

/// Base locale used when a person's locale has no translation entry
pub const BASE_LOCALE: &str = "en";

/// Production Slack Web API endpoint
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub slack_token: String,
    pub slack_api_url: String,
    pub birthday_file: PathBuf,
    pub coupon_file: PathBuf,
    pub i18n_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from the environment, using defaults for
    /// anything unset. The Slack token may legitimately be empty here;
    /// it is validated when the client is built.
    pub fn new() -> Self {
        Self::load_dotenv();

        Self {
            slack_token: std::env::var("SLACK_BOT_TOKEN").unwrap_or_default(),
            slack_api_url: std::env::var("SLACK_API_URL")
                .unwrap_or_else(|_| SLACK_API_URL.to_string()),
            birthday_file: Self::env_path("BIRTHDAY_FILE", BIRTHDAY_FILE),
            coupon_file: Self::env_path("COUPON_FILE", COUPON_FILE),
            i18n_file: Self::env_path("I18N_FILE", I18N_FILE),
        }
    }

    fn env_path(key: &str, default: &str) -> PathBuf {
        std::env::var(key)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(default))
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        // Try current directory first, then parent
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{LazyLock, Mutex};

    static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    struct EnvGuard {
        key: String,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let original = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self {
                key: key.to_string(),
                original,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(value) => std::env::set_var(&self.key, value),
                None => std::env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::remove_var("BIRTHDAY_FILE");
        std::env::remove_var("COUPON_FILE");
        std::env::remove_var("I18N_FILE");
        std::env::remove_var("SLACK_API_URL");

        let config = Config::new();
        assert_eq!(config.birthday_file, PathBuf::from(BIRTHDAY_FILE));
        assert_eq!(config.coupon_file, PathBuf::from(COUPON_FILE));
        assert_eq!(config.i18n_file, PathBuf::from(I18N_FILE));
        assert_eq!(config.slack_api_url, SLACK_API_URL);
    }

    #[test]
    fn test_env_overrides_paths() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _g1 = EnvGuard::set("BIRTHDAY_FILE", "/tmp/people.csv");
        let _g2 = EnvGuard::set("COUPON_FILE", "/tmp/codes.csv");
        let _g3 = EnvGuard::set("SLACK_API_URL", "http://localhost:9999/api");

        let config = Config::new();
        assert_eq!(config.birthday_file, PathBuf::from("/tmp/people.csv"));
        assert_eq!(config.coupon_file, PathBuf::from("/tmp/codes.csv"));
        assert_eq!(config.slack_api_url, "http://localhost:9999/api");
    }

    #[test]
    fn test_config_constants() {
        assert_eq!(BIRTHDAY_FILE, "birthdays.csv");
        assert_eq!(COUPON_FILE, "coupons.csv");
        assert_eq!(I18N_FILE, "i18n.json");
        assert_eq!(BASE_LOCALE, "en");
        assert!(SLACK_API_URL.starts_with("https://slack.com"));
    }

    #[test]
    fn test_config_clone_and_debug() {
        let _lock = ENV_LOCK.lock().unwrap();
        let config = Config::new();
        let cloned = config.clone();
        assert_eq!(cloned.slack_api_url, config.slack_api_url);

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("Config"));
    }
}
