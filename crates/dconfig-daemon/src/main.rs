//! dconfig-inspect binary
//!
//! Operator tool over the daemon's identity layer.
//!
//! ## Usage
//!
//! ```bash
//! # Which app/namespace/resource does a file belong to?
//! dconfig-inspect resolve /usr/share/dsg/apps/dock/configs/main.json
//! dconfig-inspect resolve --generic --data-dir /data/dsg /data/dsg/configs/org.app/general.json
//!
//! # Split a connection key
//! dconfig-inspect conn-key /dock/main/3 --strict
//!
//! # Name a peer
//! dconfig-inspect whois pid 1234
//! dconfig-inspect whois uid 1000
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use dconfig_daemon::{
    ConfigureIdResolver, DaemonConfig, FixedStandardPaths, PathLayout, StandardPaths,
    process_name_by_pid, user_name_by_uid,
};
use dconfig_types::{ordinal_of, resource_key_of, try_ordinal_of};

/// Inspect dconfig resource identities, connection keys and peers.
#[derive(Parser, Debug)]
#[command(name = "dconfig-inspect")]
#[command(about = "Inspect dconfig resource identities, connection keys and peers")]
struct Args {
    /// Config file (default: ~/.config/dconfig/daemon.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a resource path into app id, sub path and resource
    Resolve {
        path: String,

        /// Only try the data-directory layout
        #[arg(long)]
        generic: bool,

        /// Data directory (overrides config and DSG_DATA_DIRS)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Split a connection key into resource key and ordinal
    ConnKey {
        key: String,

        /// Fail on a missing or malformed ordinal instead of using 0
        #[arg(long)]
        strict: bool,
    },

    /// Look up a process or user name
    Whois {
        #[command(subcommand)]
        target: WhoisTarget,
    },
}

#[derive(Subcommand, Debug)]
enum WhoisTarget {
    /// Process name for a pid
    Pid { pid: u32 },
    /// Login name for a uid
    Uid { uid: u32 },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DaemonConfig::load(path),
        None => DaemonConfig::load_default(),
    }
    .context("loading daemon config")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Resolve {
            path,
            generic,
            data_dir,
            json,
        } => {
            let paths: Arc<dyn StandardPaths> = match data_dir {
                Some(dir) => Arc::new(FixedStandardPaths::new(dir)),
                None => config.standard_paths(),
            };
            let resolver = ConfigureIdResolver::new(paths);
            tracing::debug!(root = %resolver.configs_root().display(), %path, "resolving");

            let found = if generic {
                let id = resolver.resolve_generic(&path);
                (!id.is_empty()).then_some((PathLayout::Generic, id))
            } else {
                resolver.resolve(&path)
            };

            let Some((layout, id)) = found else {
                eprintln!("no known layout matches {path}");
                return Ok(ExitCode::FAILURE);
            };

            if json {
                let out = serde_json::json!({
                    "layout": layout,
                    "app_id": id.app_id,
                    "sub_path": id.sub_path,
                    "resource": id.resource,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("layout:   {layout}");
                println!("app_id:   {}", id.app_id);
                println!("sub_path: {}", id.sub_path);
                println!("resource: {}", id.resource);
            }
        }

        Command::ConnKey { key, strict } => {
            let ordinal = if strict {
                match try_ordinal_of(&key) {
                    Ok(ordinal) => ordinal,
                    Err(e) => {
                        eprintln!("{e}");
                        return Ok(ExitCode::FAILURE);
                    }
                }
            } else {
                ordinal_of(&key)
            };
            println!("resource_key: {}", resource_key_of(&key));
            println!("ordinal:      {ordinal}");
        }

        Command::Whois { target } => match target {
            WhoisTarget::Pid { pid } => println!("{}", process_name_by_pid(pid)),
            WhoisTarget::Uid { uid } => println!("{}", user_name_by_uid(uid)),
        },
    }

    Ok(ExitCode::SUCCESS)
}
