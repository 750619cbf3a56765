use crate::error::{AppError, AppResult};
use crate::utils::ShiftWindow;
use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub business: BusinessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// 外部身份提供方签发的访问令牌校验参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default)]
    pub issuer: Option<String>,
}

/// 账单金额取价来源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// 结算时重新读取目录价格
    #[default]
    Catalog,
    /// 使用下单时记录在明细上的单价
    Snapshot,
}

impl std::str::FromStr for PriceSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalog" => Ok(PriceSource::Catalog),
            "snapshot" => Ok(PriceSource::Snapshot),
            other => Err(AppError::ConfigError(format!(
                "Unknown price source: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// 门店本地时间相对 UTC 的偏移 (分钟)
    pub utc_offset_minutes: i32,
    /// 吧台视图营业窗口 [shift_start, shift_end)，格式 HH:MM
    pub shift_start: String,
    pub shift_end: String,
    pub price_source: PriceSource,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 7 * 60,
            shift_start: "06:00".to_string(),
            shift_end: "23:30".to_string(),
            price_source: PriceSource::Catalog,
        }
    }
}

impl BusinessConfig {
    pub fn shift_window(&self) -> AppResult<ShiftWindow> {
        let offset = FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            AppError::ConfigError(format!(
                "Invalid UTC offset: {} minutes",
                self.utc_offset_minutes
            ))
        })?;
        let parse = |value: &str| {
            NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
                AppError::ConfigError(format!("Invalid shift time (expected HH:MM): {value}"))
            })
        };
        let open = parse(&self.shift_start)?;
        let close = parse(&self.shift_end)?;
        ShiftWindow::new(offset, open, close)
    }
}

fn default_connect_timeout_secs() -> u64 {
    8
}

fn default_acquire_timeout_secs() -> u64 {
    8
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::from_toml_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 与令牌密钥在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and config.toml was not found")?;
                let jwt_secret = get_env("AUTH_JWT_SECRET")
                    .ok_or("AUTH_JWT_SECRET is not set and config.toml was not found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        connect_timeout_secs: default_connect_timeout_secs(),
                        acquire_timeout_secs: default_acquire_timeout_secs(),
                    },
                    auth: AuthConfig {
                        jwt_secret,
                        issuer: get_env("AUTH_ISSUER"),
                    },
                    business: BusinessConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.database.connect_timeout_secs = n;
        }
        if let Ok(v) = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.database.acquire_timeout_secs = n;
        }
        if let Ok(v) = env::var("AUTH_JWT_SECRET") {
            config.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("AUTH_ISSUER") {
            config.auth.issuer = Some(v);
        }
        if let Ok(v) = env::var("BUSINESS_UTC_OFFSET_MINUTES")
            && let Ok(n) = v.parse()
        {
            config.business.utc_offset_minutes = n;
        }
        if let Ok(v) = env::var("BUSINESS_SHIFT_START") {
            config.business.shift_start = v;
        }
        if let Ok(v) = env::var("BUSINESS_SHIFT_END") {
            config.business.shift_end = v;
        }
        if let Ok(v) = env::var("BUSINESS_PRICE_SOURCE") {
            config.business.price_source = v.parse()?;
        }

        // 启动前校验营业窗口配置
        config.business.shift_window()?;

        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }
}
