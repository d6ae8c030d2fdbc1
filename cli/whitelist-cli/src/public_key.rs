use anyhow::{Context, Result};
use clap::Parser;

use whitelist_cli::hex_encode;

use crate::key_args::KeyArgs;

#[derive(Parser, Debug)]
#[command(name = "public-key")]
#[command(about = "Print the STARK public key the contract verifies against", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    key: KeyArgs,
}

pub fn run(args: &Cli) -> Result<()> {
    let key = args.key.load().context("Failed to load signing key")?;
    let public_key = key.public_key();

    println!("Public key (hex): {}", hex_encode(&public_key));
    println!("Public key (dec): {public_key}");

    Ok(())
}
