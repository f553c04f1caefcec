use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "ftserver",
    about = "A two-socket file transfer server: commands on a control port, payloads on a client-chosen data port."
)]
pub struct Cli {
    /// Control port to listen on
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind the control and data listeners to
    #[arg(short, long)]
    pub bind: Option<IpAddr>,

    /// Directory to serve (defaults to the working directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
