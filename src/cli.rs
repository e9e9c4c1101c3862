//! Command-line arguments for the service binary.

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Parsed CLI arguments. Flags override values from the config file.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    parse_args_from(env::args().skip(1).collect())
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--data" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --data (expected a JSON file path)",
                )?;
                if opts.data.replace(PathBuf::from(path)).is_some() {
                    return Err("--data provided more than once".to_string());
                }
            }
            "--host" => {
                i += 1;
                let raw =
                    args.next_or_err(i, "missing value for --host (expected an IP address)")?;
                let host = raw
                    .parse::<IpAddr>()
                    .map_err(|_| format!("--host value \"{raw}\" is not a valid IP address"))?;
                opts.host = Some(host);
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(port);
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("asset-energy: asset energy demand lookup service");
    eprintln!();
    eprintln!("Usage: asset-energy [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>   Load service config from TOML file");
    eprintln!("  --data <path>     JSON data file (overrides data.path)");
    eprintln!("  --host <ip>       Bind address (overrides server.host)");
    eprintln!("  --port <u16>      Bind port (overrides server.port)");
    eprintln!("  --help            Show this help message");
}
