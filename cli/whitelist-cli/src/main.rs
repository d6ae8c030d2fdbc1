#![forbid(unsafe_code)]
#![allow(unreachable_pub)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod key_args;
mod public_key;
mod sign_whitelist;

#[derive(Parser, Debug)]
#[command(name = "whitelist")]
#[command(about = "STARK whitelist signing tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    SignWhitelist(sign_whitelist::Cli),
    PublicKey(public_key::Cli),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::SignWhitelist(args) => sign_whitelist::run(args)?,
        Commands::PublicKey(args) => public_key::run(&args)?,
    }

    Ok(())
}
