use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, Result};

/// 默认配置文件
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// 环境变量前缀，分隔符为 `__`
pub const ENV_PREFIX: &str = "SLC";
/// 兼容旧前端的 API 地址变量
pub const LEGACY_API_BASE_URL_ENV: &str = "API_BASE_URL";

/// 静态配置（启动时加载）
///
/// - api: 短链接服务地址与超时
/// - storage: 本地状态文件
/// - notification: 通知显示时长
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    /// ENV 前缀：SLC，分隔符：__
    /// 示例：SLC__API__BASE_URL=https://sho.rt
    ///
    /// 显式指定的配置文件必须存在；默认的 config.toml 可以不存在。
    pub fn try_load(path: Option<&str>) -> Result<Self> {
        Self::try_load_with_legacy(path, std::env::var(LEGACY_API_BASE_URL_ENV).ok())
    }

    /// 同 [`Self::try_load`]，旧变量 `API_BASE_URL` 的值由调用方传入
    fn try_load_with_legacy(path: Option<&str>, legacy_base_url: Option<String>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let base_url_layered = settings.get_string("api.base_url").is_ok();
        let mut config: StaticConfig = settings.try_deserialize()?;

        // 未通过分层配置设置 base_url 时，回退到旧变量
        if !base_url_layered
            && let Some(url) = legacy_base_url
            && !url.trim().is_empty()
        {
            config.api.base_url = url.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// 加载配置，失败时打印错误并回退到默认值
    pub fn load(path: Option<&str>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ClientError::config("api.base_url must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(ClientError::config("api.timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 短链接服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 本地状态存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 状态文件路径，留空则只保存在内存中
    #[serde(default = "default_storage_path")]
    pub path: String,
}

/// 通知配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_ttl_ms")]
    pub ttl_ms: u64,
    #[serde(default = "default_notification_error_ttl_ms")]
    pub error_ttl_ms: u64,
}

impl NotificationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn error_ttl(&self) -> Duration {
        Duration::from_millis(self.error_ttl_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 日志文件，留空输出到 stderr
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_api_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_storage_path() -> String {
    "client_state.json".to_string()
}

fn default_notification_ttl_ms() -> u64 {
    3000
}

fn default_notification_error_ttl_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    false
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_notification_ttl_ms(),
            error_ttl_ms: default_notification_error_ttl_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
