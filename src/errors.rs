use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidUrl(String),
    InvalidAliasFormat(String),
    ReservedAlias(String),
    AliasTaken(String),
    AliasGenerationExhausted(String),
    NotFound(String),
    Storage(String),
    Config(String),
}

impl RegistryError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::InvalidUrl(_) => "E001",
            RegistryError::InvalidAliasFormat(_) => "E002",
            RegistryError::ReservedAlias(_) => "E003",
            RegistryError::AliasTaken(_) => "E004",
            RegistryError::AliasGenerationExhausted(_) => "E005",
            RegistryError::NotFound(_) => "E006",
            RegistryError::Storage(_) => "E007",
            RegistryError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            RegistryError::InvalidUrl(_) => "Invalid URL",
            RegistryError::InvalidAliasFormat(_) => "Invalid Alias Format",
            RegistryError::ReservedAlias(_) => "Reserved Alias",
            RegistryError::AliasTaken(_) => "Alias Taken",
            RegistryError::AliasGenerationExhausted(_) => "Alias Generation Exhausted",
            RegistryError::NotFound(_) => "Alias Not Found",
            RegistryError::Storage(_) => "Storage Error",
            RegistryError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            RegistryError::InvalidUrl(msg) => msg,
            RegistryError::InvalidAliasFormat(msg) => msg,
            RegistryError::ReservedAlias(msg) => msg,
            RegistryError::AliasTaken(msg) => msg,
            RegistryError::AliasGenerationExhausted(msg) => msg,
            RegistryError::NotFound(msg) => msg,
            RegistryError::Storage(msg) => msg,
            RegistryError::Config(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RegistryError {}

// 便捷的构造函数
impl RegistryError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        RegistryError::InvalidUrl(msg.into())
    }

    pub fn invalid_alias_format<T: Into<String>>(msg: T) -> Self {
        RegistryError::InvalidAliasFormat(msg.into())
    }

    pub fn reserved_alias<T: Into<String>>(msg: T) -> Self {
        RegistryError::ReservedAlias(msg.into())
    }

    pub fn alias_taken<T: Into<String>>(msg: T) -> Self {
        RegistryError::AliasTaken(msg.into())
    }

    pub fn alias_generation_exhausted<T: Into<String>>(msg: T) -> Self {
        RegistryError::AliasGenerationExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RegistryError::NotFound(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        RegistryError::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        RegistryError::Config(msg.into())
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            RegistryError::invalid_url(""),
            RegistryError::invalid_alias_format(""),
            RegistryError::reserved_alias(""),
            RegistryError::alias_taken(""),
            RegistryError::alias_generation_exhausted(""),
            RegistryError::not_found(""),
            RegistryError::storage(""),
            RegistryError::config(""),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = RegistryError::not_found("Alias 'abc' not found");
        assert_eq!(err.to_string(), "Alias Not Found: Alias 'abc' not found");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::other("disk full");
        assert!(matches!(RegistryError::from(io), RegistryError::Storage(_)));
    }
}
