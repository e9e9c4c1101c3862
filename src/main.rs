//! Service entry point: config loading, data loading, and API startup.

use std::process;
use std::sync::Arc;

use asset_energy::api::{self, AppState};
use asset_energy::cli::{self, CliOptions};
use asset_energy::config::ServiceConfig;
use asset_energy::logging;
use asset_energy::store::EnergyStore;

/// Loads the config file if one was given and applies CLI overrides.
fn build_config(cli: &CliOptions) -> Result<ServiceConfig, String> {
    let mut config = match cli.config {
        Some(ref path) => ServiceConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => ServiceConfig::default(),
    };

    if let Some(ref data) = cli.data {
        config.data.path = data.clone();
    }
    if let Some(host) = cli.host {
        config.server.host = host.to_string();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(joined.join("\n"));
    }
    Ok(config)
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        process::exit(0);
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    logging::init(&config.logging.filter);

    // No data, no service.
    let store = match EnergyStore::load(&config.data.path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("{e}");
            process::exit(1);
        }
    };

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("{e}");
            process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        store,
        reducer: config.reducer(),
    });

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        tracing::error!("failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(api::serve(state, addr)) {
        tracing::error!("server error: {e}");
        process::exit(1);
    }
}
