use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use whitelist_cli::{hex_encode, sign_whitelist_file, SignatureFormat, WhitelistSigner};

use crate::key_args::KeyArgs;

#[derive(Parser, Debug)]
#[command(name = "sign-whitelist")]
#[command(about = "Sign every whitelist entry and write the signature file", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    key: KeyArgs,

    /// Whitelist JSON file: an array of {"address", "quantity"} objects
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON file for the signed entries
    #[arg(short, long)]
    output: PathBuf,

    /// Encoding of the r and s components in the output
    #[arg(long, value_enum, default_value_t = SignatureFormat::Number)]
    signature_format: SignatureFormat,
}

pub fn run(args: Cli) -> Result<()> {
    let key = args.key.load().context("Failed to load signing key")?;
    let signer = WhitelistSigner::new(key);

    let signed = sign_whitelist_file(&signer, &args.input, &args.output, args.signature_format)
        .with_context(|| format!("Failed to sign whitelist {:?}", args.input))?;

    println!("Signed {} entries", signed.len());
    println!("Signer public key: {}", hex_encode(&signer.public_key()));
    println!("Signatures written to {:?}", args.output);

    Ok(())
}
