mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use rhtmx_routes::RoutesConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rhtmx-routes")]
#[command(version, about = "RHTMX route table inspector", long_about = None)]
struct Cli {
    /// Route table to load
    #[arg(short, long, global = true, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered routes in precedence order
    Routes,

    /// Resolve a request path to its route, page and parameters
    Resolve {
        /// Request path, optionally with a query string
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate internal and external paths for a route name or literal path
    Url {
        /// Route name, or a literal path starting with `/`
        name_or_path: String,

        /// Locale to generate for (default: the configured default locale)
        #[arg(short, long)]
        locale: Option<String>,

        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = RoutesConfig::load(&cli.config)?.into_registry()?;
    tracing::debug!("Loaded {} routes from {:?}", registry.len(), cli.config);

    match cli.command {
        Commands::Routes => {
            commands::routes::execute(&registry);
        }
        Commands::Resolve { url, json } => {
            if !commands::resolve::execute(&registry, &url, json)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Url {
            name_or_path,
            locale,
            params,
            json,
        } => {
            let locale = locale.unwrap_or_else(|| registry.locale_config().default_locale.clone());
            commands::url::execute(&registry, &name_or_path, &locale, params, json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Parses `key=value`; the value may be empty or contain `=`
fn parse_param(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got `{}`", raw))?;

    if key.is_empty() {
        return Err(anyhow!("parameter name must not be empty in `{}`", raw));
    }

    Ok((key.to_string(), value.to_string()))
}
