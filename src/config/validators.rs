//! 配置值验证模块
//!
//! 启动前检查静态配置。别名策略本身的约束由 `AliasPolicy::from_config` 检查。

use super::StaticConfig;

const STORE_BACKENDS: &[&str] = &["memory", "file"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// 验证静态配置是否合法
pub fn validate_config(config: &StaticConfig) -> Result<(), String> {
    if !STORE_BACKENDS.contains(&config.store.backend.as_str()) {
        return Err(format!(
            "Unknown store backend: '{}'. Valid: {:?}",
            config.store.backend, STORE_BACKENDS
        ));
    }

    if config.store.backend == "file" && config.store.path.trim().is_empty() {
        return Err("store.path must be set when store.backend = \"file\"".to_string());
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(format!(
            "Unknown log format: '{}'. Valid: {:?}",
            config.logging.format, LOG_FORMATS
        ));
    }

    let base = url::Url::parse(&config.server.base_url)
        .map_err(|e| format!("server.base_url is not a valid URL: {}", e))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(format!(
            "server.base_url must use http or https, got '{}'",
            base.scheme()
        ));
    }

    if config.server.workers == 0 {
        return Err("server.workers must be at least 1".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&StaticConfig::default()).is_ok());
    }

    #[test]
    fn test_unknown_backend() {
        let mut cfg = StaticConfig::default();
        cfg.store.backend = "redis".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.contains("redis"));
    }

    #[test]
    fn test_file_backend_requires_path() {
        let mut cfg = StaticConfig::default();
        cfg.store.backend = "file".to_string();
        cfg.store.path = "  ".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_bad_log_format() {
        let mut cfg = StaticConfig::default();
        cfg.logging.format = "yaml".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_bad_base_url() {
        let mut cfg = StaticConfig::default();
        cfg.server.base_url = "not a url".to_string();
        assert!(validate_config(&cfg).is_err());

        cfg.server.base_url = "ftp://short.example".to_string();
        assert!(validate_config(&cfg).is_err());
    }
}
