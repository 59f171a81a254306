use clap::Parser;

use shortalias::cli::Cli;
use shortalias::config::{StaticConfig, validate_config};
use shortalias::errors::RegistryError;
use shortalias::{runtime, system};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match StaticConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let err = RegistryError::config(e.to_string());
            eprintln!("{}", err.format_colored());
            std::process::exit(1);
        }
    };

    if cli.print_config {
        print!("{}", config.to_toml());
        return Ok(());
    }

    if let Err(e) = validate_config(&config) {
        eprintln!("{}", RegistryError::config(e).format_colored());
        std::process::exit(1);
    }

    // Buffered log lines are flushed when the guard drops
    let log_guard = system::init_logging(&config.logging)?;

    if let Err(e) = runtime::run_server(config).await {
        drop(log_guard);
        match e.downcast_ref::<RegistryError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}
