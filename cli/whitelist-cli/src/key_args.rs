use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};
use whitelist_cli::{hex_encode, load_dotenv, StarkKey, DEFAULT_KEY_ENV};

/// Where the signing key comes from.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Environment variable holding the private key (hex, with or without 0x)
    #[arg(short = 'k', long, default_value = DEFAULT_KEY_ENV)]
    pub key_env: String,

    /// Env file to load before reading the key (defaults to ./.env if present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

impl KeyArgs {
    pub fn load(&self) -> whitelist_cli::Result<StarkKey> {
        if let Some(path) = load_dotenv(self.env_file.as_deref())? {
            debug!(path = %path.display(), "loaded env file");
        }
        let key = StarkKey::from_env(&self.key_env)?;
        info!(
            key_env = %self.key_env,
            public_key = %hex_encode(&key.public_key()),
            "loaded signing key"
        );
        Ok(key)
    }
}
