#![forbid(unsafe_code)]

pub mod batch;
pub mod common;
pub mod config;
pub mod error;
pub mod signer;
pub mod whitelist;

pub use batch::sign_whitelist_file;
pub use common::{hex_encode, parse_felt_hex, write_file_atomic};
pub use config::load_dotenv;
pub use error::{Result, SignerError};
pub use signer::{entry_digest, StarkKey, WhitelistSigner, DEFAULT_KEY_ENV, EC_ORDER};
pub use whitelist::{
    load_whitelist, parse_entries, render_signatures, SignatureFormat, SignedEntry,
    WhitelistEntry,
};
