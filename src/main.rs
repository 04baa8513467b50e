//! Command-line host for the Kilo Code provider plugin
//!
//! Loads a host configuration file, runs the plugin's config hook on it and
//! writes the result back (or prints it). Exits with status 1 when
//! `KILOCODE_API_KEY` is missing.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;

use kilocode_provider::catalog::{CatalogConfig, LoggingObserver, ModelCatalog};
use kilocode_provider::defaults;
use kilocode_provider::error::ProviderError;
use kilocode_provider::plugin::{KiloCodeProviderPlugin, PluginInput};
use kilocode_provider::registrar::ModelSource;
use kilocode_provider::telemetry;
use kilocode_provider::types::Registration;

#[derive(Parser, Debug)]
#[command(name = "kilocode-provider", version, about = "Register the Kilo Code provider in an OpenCode configuration")]
struct Cli {
    /// Host configuration file (JSON); treated as `{}` when it does not exist
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the live OpenRouter catalog instead of the built-in model table
    #[arg(long)]
    live_models: bool,

    /// Models listing endpoint used with --live-models
    #[arg(long, env = defaults::catalog::MODELS_URL_ENV, default_value = defaults::catalog::MODELS_URL)]
    models_url: String,

    /// Print the resulting configuration instead of writing it back
    #[arg(long)]
    print: bool,
}

async fn load_config(path: Option<&Path>) -> Result<Value, ProviderError> {
    let Some(path) = path else {
        return Ok(Value::Object(Default::default()));
    };
    match tokio::fs::read_to_string(path).await {
        Ok(text) if text.trim().is_empty() => Ok(Value::Object(Default::default())),
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Value::Object(Default::default())),
        Err(e) => Err(e.into()),
    }
}

async fn run(cli: Cli) -> Result<(), ProviderError> {
    let mut plugin = KiloCodeProviderPlugin::new();
    if cli.live_models {
        let catalog = ModelCatalog::new(
            CatalogConfig::new()
                .with_models_url(cli.models_url.clone())
                .with_observer(Arc::new(LoggingObserver)),
        );
        plugin = plugin.with_model_source(ModelSource::Live(Arc::new(catalog)));
    }

    let mut config = load_config(cli.config.as_deref()).await?;
    let hooks = plugin.init(&PluginInput::default());
    let registration = hooks.config.config(&mut config).await?;

    let rendered = serde_json::to_string_pretty(&config)?;
    match (&cli.config, cli.print) {
        (Some(path), false) => {
            if registration == Registration::Registered {
                tokio::fs::write(path, format!("{rendered}\n")).await?;
                tracing::info!(
                    target: "kilocode::cli",
                    path = %path.display(),
                    "configuration written"
                );
            }
        }
        _ => println!("{rendered}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match telemetry::init_from_env() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            None
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_missing_credential() => {
            eprintln!("{e}");
            eprintln!("\nOpenCode startup aborted.\n");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
