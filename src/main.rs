mod config;
mod constants;
mod core_cli;
mod core_command;
mod core_error;
mod core_fs;
mod core_log;
mod core_network;
mod helpers;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use crate::core_log::logger::init_logger;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    // Configuration file is optional; the defaults serve the working directory
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    if let Some(bind) = args.bind {
        config.server.bind_address = bind.to_string();
    }
    if let Some(root) = args.root {
        config.server.root_dir = root;
    }

    server::run(config, args.port).await
}
