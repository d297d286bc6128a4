//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `STORE_*` environment variables and config
//! files, in that order of precedence.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Coins, START_BALANCE};

const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_IDENTITY_URL: &str = "http://127.0.0.1:8081";

/// Runtime settings for the store service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STORE")]
pub struct StoreSettings {
    /// Postgres connection string.
    pub database_url: String,
    /// Listen address for the HTTP server.
    pub bind_addr: Option<SocketAddr>,
    /// Base URL of the identity service.
    pub identity_url: Option<String>,
    /// Upper bound for a single identity service call.
    #[ortho_config(default = 500)]
    pub identity_timeout_ms: u64,
    /// Deadline applied to every store request.
    #[ortho_config(default = 3000)]
    pub request_timeout_ms: u64,
    /// Balance given to users on first contact.
    pub start_balance: Option<u64>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl StoreSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_BIND_PORT)))
    }

    pub fn identity_url(&self) -> &str {
        self.identity_url.as_deref().unwrap_or(DEFAULT_IDENTITY_URL)
    }

    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(self.identity_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn start_balance(&self) -> Coins {
        self.start_balance.map_or(START_BALANCE, Coins::new)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "STORE_DATABASE_URL",
        "STORE_BIND_ADDR",
        "STORE_IDENTITY_URL",
        "STORE_IDENTITY_TIMEOUT_MS",
        "STORE_REQUEST_TIMEOUT_MS",
        "STORE_START_BALANCE",
        "STORE_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> Result<StoreSettings, impl std::fmt::Debug> {
        StoreSettings::load_from_iter([OsString::from("merch-store")])
    }

    #[rstest]
    fn defaults_fill_everything_but_the_database() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "STORE_DATABASE_URL").then(|| "postgres://localhost/store".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args().expect("config should load");
        assert_eq!(settings.database_url, "postgres://localhost/store");
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(settings.identity_url(), DEFAULT_IDENTITY_URL);
        assert_eq!(settings.identity_timeout(), Duration::from_millis(500));
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.start_balance(), START_BALANCE);
        assert_eq!(settings.pool_max_size, 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STORE_DATABASE_URL", Some("postgres://db/store".to_owned())),
            ("STORE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("STORE_IDENTITY_URL", Some("http://identity:8081/".to_owned())),
            ("STORE_IDENTITY_TIMEOUT_MS", Some("250".to_owned())),
            ("STORE_REQUEST_TIMEOUT_MS", Some("1500".to_owned())),
            ("STORE_START_BALANCE", Some("50".to_owned())),
            ("STORE_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args().expect("config should load");
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(settings.identity_url(), "http://identity:8081/");
        assert_eq!(settings.identity_timeout(), Duration::from_millis(250));
        assert_eq!(settings.request_timeout(), Duration::from_millis(1500));
        assert_eq!(settings.start_balance(), Coins::new(50));
        assert_eq!(settings.pool_max_size, 4);
    }

    #[rstest]
    fn missing_database_url_is_an_error() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        assert!(load_from_empty_args().is_err());
    }
}
