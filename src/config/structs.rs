use serde::{Deserialize, Serialize};

/// Default alphabet for generated aliases: ASCII letters and digits.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 与环境变量加载，启动时使用）
///
/// 优先级：ENV > config file > 默认值
/// ENV 前缀：SA，分隔符：__
/// 示例：SA__SERVER__PORT=9999
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub alias: AliasConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// An explicitly given path must exist; the default `config.toml` is optional.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("SA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("alias.reserved")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        settings.try_deserialize::<StaticConfig>()
    }

    /// 生成 TOML 配置文本
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("# failed to render config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Public address short URLs are built from
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// 存储后端配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// "memory" or "file"
    #[serde(default = "default_store_backend")]
    pub backend: String,
    /// Snapshot path used by the file backend
    #[serde(default = "default_store_path")]
    pub path: String,
}

/// 别名策略配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AliasConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_generated_length")]
    pub generated_length: usize,
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Extra reserved words on top of the built-in route names
    #[serde(default)]
    pub reserved: Vec<String>,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CorsConfig {
    /// Empty: same-origin only. `"*"`: any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
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

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_store_backend() -> String {
    "memory".to_string()
}

fn default_store_path() -> String {
    "aliases.json".to_string()
}

fn default_min_length() -> usize {
    3
}

fn default_max_length() -> usize {
    50
}

fn default_generated_length() -> usize {
    6
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

fn default_max_retries() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
            base_url: default_base_url(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
        }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            generated_length: default_generated_length(),
            alphabet: default_alphabet(),
            max_retries: default_max_retries(),
            reserved: Vec::new(),
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
