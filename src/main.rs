//! shutterbox - command line interface to a photo service API.
//!
//! A thin wrapper over the library, intended for manual endpoint
//! exploration and scripted uploads.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use directories::BaseDirs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shutterbox::{Client, Params};

/// Command line interface to a photo service API.
#[derive(Parser, Debug)]
#[command(name = "shutterbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration profile name or full path to a configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Host to connect to, bypassing any configuration file
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// HTTP method (GET or POST)
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Request field as name=value (repeatable); photo=@<file> attaches
    /// a photo upload
    #[arg(short = 'F', long = "field")]
    field: Vec<String>,

    /// Endpoint to request
    #[arg(short, long, default_value = "/photos/list.json")]
    endpoint: String,

    /// Pretty-print the JSON response
    #[arg(short, long)]
    pretty: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let client = if let Some(host) = &cli.host {
        Client::new(host)
    } else {
        Client::from_config(cli.config.as_deref()).context("failed to load configuration")?
    };

    let mut params = Params::new();
    let mut files: BTreeMap<String, PathBuf> = BTreeMap::new();
    for field in &cli.field {
        let (name, value) = field
            .split_once('=')
            .with_context(|| format!("invalid field '{}', expected name=value", field))?;
        // photo=@<file> means "upload this file", like curl's -F syntax
        if name == "photo" {
            if let Some(path) = value.strip_prefix('@') {
                files.insert(name.to_string(), expand_home(path));
                continue;
            }
        }
        params = params.set(name, value);
    }

    if cli.verbose > 0 {
        println!("Client:");
        println!("  host = {}", client.host());
        if let Some(path) = &client.auth().config_path {
            println!("  config = {}", path.display());
        }
        println!("  authenticated = {}", client.auth().credentials.is_some());
        println!();
    }

    let body = match cli.method.to_uppercase().as_str() {
        "GET" => {
            if !files.is_empty() {
                bail!("photo files can only be sent with POST");
            }
            client.get_raw(&cli.endpoint, params)?
        }
        "POST" => {
            if files.is_empty() {
                client.post_raw(&cli.endpoint, params)?
            } else {
                client.post_files_raw(&cli.endpoint, params, &files)?
            }
        }
        other => bail!("unsupported method: {}", other),
    };

    if cli.pretty {
        // Responses are normally JSON; anything else is printed verbatim
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{}", body),
        }
    } else {
        println!("{}", body);
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn expand_home(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Some(base) = BaseDirs::new() {
            let home = base.home_dir();
            return match path.strip_prefix("~/") {
                Some(rest) => home.join(rest),
                None => home.to_path_buf(),
            };
        }
    }
    PathBuf::from(path)
}
