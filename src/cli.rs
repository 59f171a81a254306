//! Command-line interface definitions using clap

use clap::Parser;

/// shortalias - URL shortener with a concurrency-safe alias registry
#[derive(Parser, Debug, Default)]
#[command(name = "shortalias")]
#[command(version)]
#[command(about = "URL shortener with a concurrency-safe alias registry", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file (default: config.toml if present)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_flag() {
        let cli = Cli::parse_from(["shortalias", "-c", "custom.toml"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(!cli.print_config);
    }

    #[test]
    fn test_parse_print_config() {
        let cli = Cli::parse_from(["shortalias", "--config=x.toml", "--print-config"]);
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        assert!(cli.print_config);
    }

    #[test]
    fn test_no_args() {
        let cli = Cli::parse_from(["shortalias"]);
        assert!(cli.config.is_none());
    }
}
