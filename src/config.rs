/*
 * Responsibility
 * - 環境変数や設定の読み込み (APP_ENV, PORT, DATABASE_URL, DATABASE_MAX_CONNECTIONS)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - APP_ENV=test のときは既定ポートを 3001 にする
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const TEST_PORT: u16 = 3001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Test => TEST_PORT,
            _ => DEFAULT_PORT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,
    pub database_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let app_env = AppEnv::parse(&var("APP_ENV").unwrap_or_default());
        let port = resolve_port(app_env, var("PORT").as_deref());

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            None => 5,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
        })
    }
}

// An explicit PORT wins; otherwise the environment picks the default.
fn resolve_port(app_env: AppEnv, port: Option<&str>) -> u16 {
    port.and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| app_env.default_port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_listens_on_3001() {
        assert_eq!(resolve_port(AppEnv::parse("test"), None), 3001);
        assert_eq!(resolve_port(AppEnv::parse("TEST"), None), 3001);
    }

    #[test]
    fn other_envs_listen_on_3000() {
        assert_eq!(resolve_port(AppEnv::parse("development"), None), 3000);
        assert_eq!(resolve_port(AppEnv::parse("prod"), None), 3000);
        assert_eq!(resolve_port(AppEnv::parse(""), None), 3000);
    }

    #[test]
    fn explicit_port_overrides_and_garbage_falls_back() {
        assert_eq!(resolve_port(AppEnv::Test, Some("8080")), 8080);
        assert_eq!(resolve_port(AppEnv::Development, Some("not-a-port")), 3000);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn missing_database_url_fails_startup() {
        let err = Config::from_lookup(lookup(&[("APP_ENV", "test")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
        assert_eq!(err.to_string(), "missing configuration: DATABASE_URL");
    }

    #[test]
    fn test_env_config_binds_3001() {
        let config = Config::from_lookup(lookup(&[
            ("APP_ENV", "test"),
            ("DATABASE_URL", "postgres://localhost/dogs"),
        ]))
        .unwrap();

        assert_eq!(config.app_env, AppEnv::Test);
        assert_eq!(config.addr.port(), 3001);
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn zero_pool_size_is_invalid() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/dogs"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DATABASE_MAX_CONNECTIONS")));
    }
}
